use serde::{Deserialize, Deserializer, Serialize};

use crate::model::ids::TrackId;

/// A tagged track in the catalog.
///
/// Tracks are loaded once and never mutated afterwards. Only `tags` take
/// part in matching; `title` and `artist` are carried for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub id: TrackId,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub artist: String,

    /// Short descriptive phrases ("beach sunset", "lo-fi"), matched
    /// case-insensitively. Order is preserved and duplicates are allowed.
    ///
    /// A missing or `null` field loads as an empty list.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tags: Vec<String>,
}

impl Track {
    #[must_use]
    pub fn new(id: impl Into<TrackId>, title: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            artist: artist.into(),
            tags: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn is_untagged(&self) -> bool {
        self.tags.is_empty()
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}
