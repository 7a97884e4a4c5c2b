//! The shared, read-only track catalog.
//!
//! A [`Catalog`] is built once at startup and then handed to every ranking
//! call. Cloning it only bumps a reference count; the tracks themselves are
//! never copied or mutated.

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::model::Track;

/// Ordered, immutable collection of tracks.
#[derive(Debug, Clone)]
pub struct Catalog {
    tracks: Arc<[Track]>,
}

impl Catalog {
    /// Build a catalog from tracks in their catalog order.
    ///
    /// Duplicate ids are kept but logged, since ids are expected to be unique.
    #[must_use]
    pub fn from_tracks(tracks: Vec<Track>) -> Self {
        let mut seen = HashSet::with_capacity(tracks.len());
        for track in &tracks {
            if !seen.insert(&track.id) {
                log::warn!("Duplicate track id in catalog: {}", track.id);
            }
        }

        Self {
            tracks: tracks.into(),
        }
    }

    /// Parse a catalog from a JSON array of tracks.
    ///
    /// # Errors
    /// Returns an error if the text is not a JSON array of track objects.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let tracks: Vec<Track> = serde_json::from_str(json)?;
        Ok(Self::from_tracks(tracks))
    }

    /// Load a catalog from a JSON file.
    ///
    /// # Errors
    /// Returns [`Error::CatalogNotFound`] if the file does not exist, or an
    /// I/O or serialization error if it cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::CatalogNotFound {
                path: path.to_path_buf(),
            });
        }

        let contents = std::fs::read_to_string(path)?;
        let catalog = Self::from_json_str(&contents)?;

        log::debug!(
            "Loaded {} tracks from {}",
            catalog.len(),
            path.display()
        );

        Ok(catalog)
    }

    #[must_use]
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Track> {
        self.tracks.iter()
    }

    /// Count how many tracks carry each tag (case-insensitive).
    ///
    /// Sorted by count descending, then alphabetically.
    #[must_use]
    pub fn tag_frequencies(&self) -> Vec<(String, usize)> {
        let mut counts: HashMap<String, usize> = HashMap::new();
        for track in self.tracks.iter() {
            let distinct: HashSet<String> = track
                .tags
                .iter()
                .map(|t| t.trim().to_lowercase())
                .filter(|t| !t.is_empty())
                .collect();
            for tag in distinct {
                *counts.entry(tag).or_insert(0) += 1;
            }
        }

        let mut frequencies: Vec<(String, usize)> = counts.into_iter().collect();
        frequencies.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        frequencies
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::from_tracks(Vec::new())
    }
}
