use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier for a catalog track.
///
/// Catalog files use either integer or string ids. The original form is
/// kept so that serialized results echo the id exactly as it was loaded.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TrackId {
    Number(i64),
    Text(String),
}

impl From<i64> for TrackId {
    fn from(id: i64) -> Self {
        Self::Number(id)
    }
}

impl From<i32> for TrackId {
    fn from(id: i32) -> Self {
        Self::Number(i64::from(id))
    }
}

impl From<&str> for TrackId {
    fn from(id: &str) -> Self {
        Self::Text(id.to_string())
    }
}

impl From<String> for TrackId {
    fn from(id: String) -> Self {
        Self::Text(id)
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}
