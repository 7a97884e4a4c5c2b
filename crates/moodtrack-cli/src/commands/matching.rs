use anyhow::{Context, Result};
use std::io::Read;
use std::path::{Path, PathBuf};

use moodtrack_core::Catalog;
use moodtrack_search::{MatchResponse, Matcher};
use moodtrack_vision::Config;

use crate::commands::render::print_response;

/// Read the description from `--file`, stdin (`-`), or the positional text.
fn resolve_text(text: Option<String>, file: Option<PathBuf>) -> Result<String> {
    match (text, file) {
        (_, Some(path)) if path == Path::new("-") => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read description from stdin")?;
            Ok(buf)
        }
        (_, Some(path)) => std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read description from {}", path.display())),
        (Some(text), None) => Ok(text),
        (None, None) => {
            anyhow::bail!("Provide a description to match, or --file PATH (use - for stdin)")
        }
    }
}

pub fn run_match(
    config: &Config,
    text: Option<String>,
    file: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let text = resolve_text(text, file)?;

    let catalog = Catalog::load(&config.catalog_path).with_context(|| {
        format!("Failed to load catalog from {}", config.catalog_path.display())
    })?;
    let matcher = Matcher::new(config.match_options()?);

    log::info!("Matching {} tracks", catalog.len());

    let response = MatchResponse::new(&text, matcher.rank(&text, &catalog));
    print_response(&response, json, false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_positional_text() {
        let text = resolve_text(Some("neon night".to_string()), None).unwrap();
        assert_eq!(text, "neon night");
    }

    #[test]
    fn test_resolve_requires_input() {
        assert!(resolve_text(None, None).is_err());
    }

    #[test]
    fn test_resolve_missing_file() {
        let err = resolve_text(None, Some(PathBuf::from("/no/such/description.txt"))).unwrap_err();
        assert!(err.to_string().contains("description.txt"));
    }
}
