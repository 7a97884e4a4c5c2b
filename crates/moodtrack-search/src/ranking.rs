//! Filter, sort and truncate scored tracks.

use moodtrack_core::{Catalog, Track};

use crate::result::ScoredMatch;
use crate::scoring::{score_track, MatchOptions};
use crate::tokenizer::TokenizedText;

/// Ranks catalog tracks against analysis text.
///
/// A `Matcher` holds no state besides its options, so one instance can be
/// shared by any number of concurrent callers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Matcher {
    options: MatchOptions,
}

impl Matcher {
    #[must_use]
    pub const fn new(options: MatchOptions) -> Self {
        Self { options }
    }

    #[must_use]
    pub const fn options(&self) -> &MatchOptions {
        &self.options
    }

    /// Rank the catalog against `text`.
    #[must_use]
    pub fn rank<'a>(&self, text: &str, catalog: &'a Catalog) -> Vec<ScoredMatch<'a>> {
        self.rank_tracks(text, catalog.tracks())
    }

    /// Rank a slice of tracks against `text`.
    ///
    /// Tracks scoring zero are dropped. The rest are sorted by score,
    /// highest first, with equal scores left in catalog order, and cut
    /// down to the configured limit.
    #[must_use]
    pub fn rank_tracks<'a>(&self, text: &str, tracks: &'a [Track]) -> Vec<ScoredMatch<'a>> {
        let text = TokenizedText::new(text);

        let mut matches: Vec<ScoredMatch<'a>> = tracks
            .iter()
            .map(|track| score_track(track, &text, &self.options))
            .filter(ScoredMatch::is_relevant)
            .collect();

        let relevant = matches.len();

        // `sort_by` is stable, which keeps ties in catalog order.
        matches.sort_by(|a, b| b.match_score.cmp(&a.match_score));
        matches.truncate(self.options.limit());

        log::debug!(
            "Ranked {} tracks against {} chars of text: {} relevant, {} returned",
            tracks.len(),
            text.normalized().chars().count(),
            relevant,
            matches.len()
        );

        matches
    }
}

/// Rank with the default weights and limit.
#[must_use]
pub fn rank<'a>(text: &str, catalog: &'a Catalog) -> Vec<ScoredMatch<'a>> {
    Matcher::default().rank(text, catalog)
}
