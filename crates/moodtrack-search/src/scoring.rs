//! Per-tag scoring.
//!
//! Each tag is classified into one of two mutually exclusive tiers. The
//! exact tier is tried first; the partial tier is only consulted when the
//! full phrase is absent from the text. A track's score is the sum of its
//! tag contributions, so the order in which tags are visited never changes
//! the result.

use moodtrack_core::error::{Error, Result};
use moodtrack_core::Track;

use crate::result::ScoredMatch;
use crate::tokenizer::{split_words, TokenizedText};

/// Points for a tag whose full phrase occurs in the text.
pub const EXACT_WEIGHT: u32 = 10;

/// Points per long-enough tag word found in the text.
pub const PARTIAL_WEIGHT: u32 = 5;

/// Tag words must be longer than this (in characters) to earn partial credit.
pub const MIN_PARTIAL_WORD_LEN: usize = 3;

/// Upper bound on the number of ranked results.
pub const MAX_RESULTS: usize = 10;

/// Weights and limits used by the ranking engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchOptions {
    exact_weight: u32,
    partial_weight: u32,
    min_partial_word_len: usize,
    limit: usize,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            exact_weight: EXACT_WEIGHT,
            partial_weight: PARTIAL_WEIGHT,
            min_partial_word_len: MIN_PARTIAL_WORD_LEN,
            limit: MAX_RESULTS,
        }
    }
}

impl MatchOptions {
    /// Build options with custom weights.
    ///
    /// # Errors
    /// Returns [`Error::InvalidData`] if either weight is zero, since a
    /// zero-weight match would record a tag without contributing to the score.
    pub fn new(exact_weight: u32, partial_weight: u32) -> Result<Self> {
        if exact_weight == 0 || partial_weight == 0 {
            return Err(Error::InvalidData(format!(
                "match weights must be positive (exact = {exact_weight}, partial = {partial_weight})"
            )));
        }

        Ok(Self {
            exact_weight,
            partial_weight,
            ..Self::default()
        })
    }

    /// Set the maximum number of results, clamped to `1..=MAX_RESULTS`.
    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit.clamp(1, MAX_RESULTS);
        self
    }

    #[must_use]
    pub const fn exact_weight(&self) -> u32 {
        self.exact_weight
    }

    #[must_use]
    pub const fn partial_weight(&self) -> u32 {
        self.partial_weight
    }

    #[must_use]
    pub const fn min_partial_word_len(&self) -> usize {
        self.min_partial_word_len
    }

    #[must_use]
    pub const fn limit(&self) -> usize {
        self.limit
    }
}

/// How a single tag relates to the analysis text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagMatch {
    /// The whole tag phrase occurs in the text.
    Exact,
    /// The phrase is absent but `hits` of its long words occur.
    Partial { hits: u32 },
    Miss,
}

impl TagMatch {
    #[must_use]
    pub const fn score(&self, options: &MatchOptions) -> u32 {
        match self {
            Self::Exact => options.exact_weight,
            Self::Partial { hits } => options.partial_weight.saturating_mul(*hits),
            Self::Miss => 0,
        }
    }

    #[must_use]
    pub const fn is_match(&self) -> bool {
        !matches!(self, Self::Miss)
    }
}

/// Classify one tag against the text.
///
/// Blank tags never match: an empty phrase is trivially contained in any
/// text.
pub fn classify_tag(tag: &str, text: &TokenizedText, options: &MatchOptions) -> TagMatch {
    let tag = tag.to_lowercase();
    if tag.trim().is_empty() {
        return TagMatch::Miss;
    }

    if text.contains(&tag) {
        return TagMatch::Exact;
    }

    let hits = split_words(&tag)
        .iter()
        .filter(|word| word.chars().count() > options.min_partial_word_len)
        .filter(|word| text.contains(word))
        .count();

    match u32::try_from(hits) {
        Ok(0) => TagMatch::Miss,
        Ok(hits) => TagMatch::Partial { hits },
        Err(_) => TagMatch::Partial { hits: u32::MAX },
    }
}

/// Score a track by summing its tag contributions.
///
/// The result always borrows `track`; a zero score means no tag matched.
pub fn score_track<'a>(
    track: &'a Track,
    text: &TokenizedText,
    options: &MatchOptions,
) -> ScoredMatch<'a> {
    let mut match_score: u32 = 0;
    let mut matching_tags = Vec::new();

    for tag in &track.tags {
        let tier = classify_tag(tag, text, options);
        if tier.is_match() {
            match_score = match_score.saturating_add(tier.score(options));
            matching_tags.push(tag.as_str());
        }
    }

    ScoredMatch {
        track,
        match_score,
        matching_tags,
    }
}
