//! Image in, ranked tracks out.

use anyhow::{Context, Result};

use moodtrack_core::Catalog;
use moodtrack_search::{MatchResponse, Matcher};

use crate::client::{VibeAnalyzer, VisionClient};
use crate::config::Config;
use crate::error::VisionResult;
use crate::image::ImageSource;

/// Combines an analyzer with the shared catalog and a matcher.
///
/// Analysis is the only fallible, asynchronous step. Ranking the returned
/// text is pure and borrows from both the text and the catalog.
#[derive(Debug)]
pub struct VibePipeline<A> {
    analyzer: A,
    catalog: Catalog,
    matcher: Matcher,
}

impl VibePipeline<VisionClient> {
    /// Build the pipeline from configuration: load the catalog and set up
    /// the vision client and scoring options.
    ///
    /// # Errors
    /// Returns an error if the catalog cannot be loaded, the scoring
    /// options are invalid, or no API key is configured.
    pub fn from_config(config: &Config) -> Result<Self> {
        let catalog = Catalog::load(&config.catalog_path).with_context(|| {
            format!("Failed to load catalog from {}", config.catalog_path.display())
        })?;
        let matcher = Matcher::new(config.match_options()?);
        let client = VisionClient::from_config(config)?;

        Ok(Self::new(client, catalog, matcher))
    }
}

impl<A: VibeAnalyzer> VibePipeline<A> {
    #[must_use]
    pub fn new(analyzer: A, catalog: Catalog, matcher: Matcher) -> Self {
        Self {
            analyzer,
            catalog,
            matcher,
        }
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Describe the image's vibe.
    ///
    /// # Errors
    /// Propagates any failure from the analyzer.
    pub async fn analyze(&self, image: &ImageSource) -> VisionResult<String> {
        self.analyzer.describe(image).await
    }

    /// Rank the catalog against an analysis.
    #[must_use]
    pub fn respond<'a>(&'a self, analysis: &'a str) -> MatchResponse<'a> {
        MatchResponse::new(analysis, self.matcher.rank(analysis, &self.catalog))
    }
}
