//! Behavioural tests for the ranking engine.
//!
//! These exercise the public API end to end: catalog in, ranked matches out.

use moodtrack_core::{Catalog, Track, TrackId};
use moodtrack_search::{rank, score_track, Matcher, MatchResponse, TokenizedText, MAX_RESULTS};

fn ids(catalog_matches: &[moodtrack_search::ScoredMatch<'_>]) -> Vec<TrackId> {
    catalog_matches.iter().map(|m| m.track.id.clone()).collect()
}

fn vibe_catalog() -> Catalog {
    Catalog::from_tracks(vec![
        Track::new(1, "Golden Hour Drive", "The Palm Lines")
            .with_tags(["beach sunset", "chill", "summer", "warm"]),
        Track::new(2, "Strobe Season", "Night Shift").with_tags(["party", "neon", "club"]),
        Track::new(3, "Cassette Kids", "Rewind Club").with_tags(["retro 90s vibe", "nostalgic"]),
        Track::new(4, "Rain on Glass", "Lena Ortiz").with_tags(["rainy day", "melancholy", "blue"]),
        Track::new(5, "Untitled", "Unknown"),
    ])
}

#[test]
fn test_exact_phrase_scenario() {
    let catalog = Catalog::from_tracks(vec![
        Track::new(1, "a", "x").with_tags(["beach sunset", "chill"]),
        Track::new(2, "b", "y").with_tags(["party"]),
    ]);

    let analysis = "a warm beach sunset evening";
    let response = MatchResponse::new(analysis, rank(analysis, &catalog));

    assert_eq!(response.total_matches, 1);
    assert_eq!(ids(&response.matches), vec![TrackId::from(1)]);
    assert_eq!(response.matches[0].match_score, 10);
}

#[test]
fn test_empty_text_yields_no_matches() {
    let catalog = vibe_catalog();
    let response = MatchResponse::new("", rank("", &catalog));
    assert!(response.matches.is_empty());
    assert_eq!(response.total_matches, 0);
}

#[test]
fn test_partial_word_scenario() {
    let catalog = Catalog::from_tracks(vec![Track::new(1, "a", "x").with_tags(["retro 90s vibe"])]);

    let matches = rank("totally retro and vibe-heavy", &catalog);

    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].match_score, 10);
    assert_eq!(matches[0].matching_tags, vec!["retro 90s vibe"]);
}

#[test]
fn test_stable_tie_break_scenario() {
    let catalog = Catalog::from_tracks(vec![
        Track::new("A", "a", "x").with_tags(["sunset"]),
        Track::new("B", "b", "y").with_tags(["sunny meadow"]),
        Track::new("C", "c", "z").with_tags(["meadow"]),
    ]);

    // A = 10 (exact), B = 5 (partial "meadow"), C = 10 (exact)
    let matches = rank("sunset over a meadow", &catalog);

    assert_eq!(
        ids(&matches),
        vec![TrackId::from("A"), TrackId::from("C"), TrackId::from("B")]
    );
}

#[test]
fn test_large_catalog_is_bounded() {
    // Track i gets (i % 5) + 1 matching tags, so scores repeat in bands.
    let tracks: Vec<Track> = (0..50)
        .map(|i: i32| {
            let tags: Vec<&str> = ["rain", "night", "city", "neon", "glass"]
                .into_iter()
                .take(usize::try_from(i % 5).unwrap() + 1)
                .collect();
            Track::new(i, "t", "a").with_tags(tags)
        })
        .collect();
    let catalog = Catalog::from_tracks(tracks);

    let matches = rank("rain at night, city neon on glass", &catalog);

    assert_eq!(matches.len(), MAX_RESULTS);
    assert!(matches.iter().all(|m| m.match_score == 50));
    let expected: Vec<TrackId> = (0..10).map(|k| TrackId::from(k * 5 + 4)).collect();
    assert_eq!(ids(&matches), expected);
}

#[test]
fn test_ranking_is_idempotent() {
    let catalog = vibe_catalog();
    let text = "Warm summer beach at sunset, a chill and nostalgic retro feel";

    let first = rank(text, &catalog);
    let second = rank(text, &catalog);

    assert_eq!(first, second);
}

#[test]
fn test_matching_tags_are_ordered_subset() {
    let catalog = vibe_catalog();
    let matches = rank(
        "A blue, melancholy rainy day at the beach; warm but nostalgic",
        &catalog,
    );

    assert!(!matches.is_empty());
    for m in &matches {
        let mut remaining = m.track.tags.iter();
        for tag in &m.matching_tags {
            assert!(
                remaining.any(|t| t == tag),
                "{tag} out of order or missing for track {}",
                m.track.id
            );
        }
    }
}

#[test]
fn test_zero_scores_never_returned() {
    let catalog = vibe_catalog();
    let matches = rank("neon party club with melancholy blue light", &catalog);

    assert!(matches.iter().all(|m| m.match_score > 0));
    assert!(!ids(&matches).contains(&TrackId::from(5)));
    assert!(!ids(&matches).contains(&TrackId::from(1)));
}

#[test]
fn test_exact_phrase_for_missed_tag_adds_full_weight() {
    let track = Track::new(1, "a", "x").with_tags(["beach sunset", "chill", "golden hour"]);
    let base = "a beach at dusk";

    let before = score_track(&track, &TokenizedText::new(base), &Default::default());
    let extended = format!("{base}, golden hour");
    let after = score_track(&track, &TokenizedText::new(&extended), &Default::default());

    assert!(after.match_score >= before.match_score);
    assert_eq!(after.match_score, before.match_score + 10);
}

#[test]
fn test_exact_phrase_caps_three_word_partial() {
    // Three long words scattered in the text earn 3 x 5 as a partial match.
    // Once the whole phrase appears the tag is exact and earns a flat 10.
    let track = Track::new(1, "a", "x").with_tags(["golden summer sunset"]);
    let base = "golden light, summer, sunset";

    let before = score_track(&track, &TokenizedText::new(base), &Default::default());
    let extended = format!("{base} golden summer sunset");
    let after = score_track(&track, &TokenizedText::new(&extended), &Default::default());

    assert_eq!(before.match_score, 15);
    assert_eq!(after.match_score, 10);
    assert_eq!(after.matching_tags, vec!["golden summer sunset"]);
}

#[test]
fn test_catalog_is_untouched_by_ranking() {
    let catalog = vibe_catalog();
    let snapshot: Vec<Track> = catalog.tracks().to_vec();

    let _matches = Matcher::default().rank("warm summer party", &catalog);

    assert_eq!(catalog.tracks(), snapshot.as_slice());
}

#[test]
fn test_serialized_response_shape() {
    let catalog = vibe_catalog();
    let analysis = "Neon party lights";
    let response = MatchResponse::new(analysis, rank(analysis, &catalog));

    let value = serde_json::to_value(&response).unwrap();

    assert_eq!(value["analysis"], analysis);
    assert_eq!(value["totalMatches"], 1);
    assert_eq!(value["matches"][0]["id"], 2);
    assert_eq!(value["matches"][0]["matchScore"], 20);
    assert_eq!(
        value["matches"][0]["matchingTags"],
        serde_json::json!(["party", "neon"])
    );
}
