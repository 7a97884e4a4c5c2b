//! Ranked output types.

use serde::Serialize;

use moodtrack_core::Track;

/// A track together with its relevance score.
///
/// Serializes as the track's own fields plus `matchScore` and
/// `matchingTags`. The track is borrowed from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredMatch<'a> {
    #[serde(flatten)]
    pub track: &'a Track,

    pub match_score: u32,

    /// Tags that contributed to the score, in the track's tag order.
    pub matching_tags: Vec<&'a str>,
}

impl ScoredMatch<'_> {
    #[must_use]
    pub const fn is_relevant(&self) -> bool {
        self.match_score > 0
    }
}

/// The analysis text and the ranked matches for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResponse<'a> {
    pub analysis: &'a str,
    pub matches: Vec<ScoredMatch<'a>>,
    pub total_matches: usize,
}

impl<'a> MatchResponse<'a> {
    #[must_use]
    pub fn new(analysis: &'a str, matches: Vec<ScoredMatch<'a>>) -> Self {
        let total_matches = matches.len();
        Self {
            analysis,
            matches,
            total_matches,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scored_match_serializes_flat_camel_case() {
        let track = Track::new(1, "Golden Hour", "The Palms").with_tags(["beach sunset", "chill"]);
        let scored = ScoredMatch {
            track: &track,
            match_score: 10,
            matching_tags: vec!["beach sunset"],
        };

        let value = serde_json::to_value(&scored).unwrap();

        assert_eq!(value["id"], 1);
        assert_eq!(value["title"], "Golden Hour");
        assert_eq!(value["artist"], "The Palms");
        assert_eq!(value["tags"], serde_json::json!(["beach sunset", "chill"]));
        assert_eq!(value["matchScore"], 10);
        assert_eq!(value["matchingTags"], serde_json::json!(["beach sunset"]));
    }

    #[test]
    fn test_response_counts_matches() {
        let track = Track::new("a", "t", "x").with_tags(["rain"]);
        let response = MatchResponse::new(
            "rainy night",
            vec![ScoredMatch {
                track: &track,
                match_score: 10,
                matching_tags: vec!["rain"],
            }],
        );

        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(response.total_matches, 1);
        assert_eq!(value["totalMatches"], 1);
        assert_eq!(value["analysis"], "rainy night");
        assert_eq!(value["matches"][0]["id"], "a");
    }

    #[test]
    fn test_empty_response() {
        let response = MatchResponse::new("", Vec::new());
        assert!(response.is_empty());
        assert_eq!(response.total_matches, 0);
    }
}
