use anyhow::{Context, Result};
use std::fmt;

use moodtrack_search::MatchResponse;

/// Tags shown per track in text output.
const MAX_DISPLAY_TAGS: usize = 12;

/// Print a response as pretty JSON or as text.
pub fn print_response(response: &MatchResponse<'_>, json: bool, show_analysis: bool) -> Result<()> {
    if json {
        let out = serde_json::to_string_pretty(response).context("Failed to serialize matches")?;
        println!("{out}");
    } else {
        print!("{}", format_response(response, show_analysis));
    }
    Ok(())
}

/// Render matches the way the result page lays them out: title, artist,
/// score, then the track's tags.
pub fn format_response(response: &MatchResponse<'_>, show_analysis: bool) -> String {
    ResponseView {
        response,
        show_analysis,
    }
    .to_string()
}

struct ResponseView<'r, 'a> {
    response: &'r MatchResponse<'a>,
    show_analysis: bool,
}

impl fmt::Display for ResponseView<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let response = self.response;

        if self.show_analysis && !response.analysis.is_empty() {
            writeln!(f, "Vibe analysis")?;
            writeln!(f, "=============")?;
            writeln!(f, "{}\n", response.analysis.trim())?;
        }

        if response.is_empty() {
            return writeln!(f, "No matching tracks.");
        }

        writeln!(f, "Top matches ({})", response.total_matches)?;
        writeln!(f, "===========")?;

        for (rank, m) in response.matches.iter().enumerate() {
            writeln!(
                f,
                "{:>2}. {} - {}  (Score: {})",
                rank + 1,
                m.track.title,
                m.track.artist,
                m.match_score
            )?;

            if !m.track.tags.is_empty() {
                let tags: Vec<String> = m
                    .track
                    .tags
                    .iter()
                    .take(MAX_DISPLAY_TAGS)
                    .map(|t| format!("#{t}"))
                    .collect();
                writeln!(f, "    {}", tags.join(" "))?;
            }

            writeln!(f, "    matched: {}", m.matching_tags.join(", "))?;
        }

        Ok(())
    }
}
