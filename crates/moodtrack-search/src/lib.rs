//! Tag-overlap ranking engine for moodtrack.
//!
//! Scores every catalog track against a free-text vibe description by
//! comparing its tags with the lower-cased text, then keeps the positive
//! scores, sorts them and truncates to the top results.
//!
//! # Example
//!
//! ```
//! use moodtrack_core::{Catalog, Track};
//! use moodtrack_search::Matcher;
//!
//! let catalog = Catalog::from_tracks(vec![
//!     Track::new(1, "Golden Hour", "The Palms").with_tags(["beach sunset", "chill"]),
//!     Track::new(2, "Strobe", "Night Shift").with_tags(["party"]),
//! ]);
//!
//! let matches = Matcher::default().rank("a warm beach sunset evening", &catalog);
//! assert_eq!(matches.len(), 1);
//! assert_eq!(matches[0].match_score, 10);
//! ```

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod ranking;
pub mod result;
pub mod scoring;
pub mod tokenizer;

pub use ranking::{rank, Matcher};
pub use result::{MatchResponse, ScoredMatch};
pub use scoring::{
    classify_tag, score_track, MatchOptions, TagMatch, EXACT_WEIGHT, MAX_RESULTS,
    MIN_PARTIAL_WORD_LEN, PARTIAL_WEIGHT,
};
pub use tokenizer::{split_words, TokenizedText};
