//! Image references accepted by the vision provider.

use std::fmt;
use std::path::{Path, PathBuf};

use base64::Engine as _;

use crate::error::{VisionError, VisionResult};

/// Where the image to analyze comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// A remote `http(s)` URL or an inline `data:` URL, sent as is.
    Url(String),
    /// A local file, inlined as a base64 `data:` URL.
    File(PathBuf),
}

impl ImageSource {
    /// Interpret a user-supplied image reference.
    ///
    /// # Errors
    /// Returns [`VisionError::InvalidImage`] for a blank reference.
    pub fn parse(reference: &str) -> VisionResult<Self> {
        let reference = reference.trim();
        if reference.is_empty() {
            return Err(VisionError::InvalidImage(
                "image reference required".to_string(),
            ));
        }

        let lower = reference.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") || lower.starts_with("data:")
        {
            Ok(Self::Url(reference.to_string()))
        } else {
            Ok(Self::File(PathBuf::from(reference)))
        }
    }

    /// The URL to send to the provider.
    ///
    /// # Errors
    /// Returns an error if a local file cannot be read or is empty.
    pub fn to_url(&self) -> VisionResult<String> {
        match self {
            Self::Url(url) => Ok(url.clone()),
            Self::File(path) => {
                if !path.is_file() {
                    return Err(VisionError::InvalidImage(format!(
                        "no such image file: {}",
                        path.display()
                    )));
                }
                let bytes = std::fs::read(path)?;
                if bytes.is_empty() {
                    return Err(VisionError::InvalidImage(format!(
                        "image file is empty: {}",
                        path.display()
                    )));
                }
                Ok(data_url(mime_for_path(path), &bytes))
            }
        }
    }
}

impl fmt::Display for ImageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Url(url) if url.starts_with("data:") => write!(f, "<inline image>"),
            Self::Url(url) => write!(f, "{url}"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

fn mime_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match ext.as_deref() {
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "image/jpeg",
    }
}

fn data_url(mime: &str, bytes: &[u8]) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
    format!("data:{mime};base64,{encoded}")
}
