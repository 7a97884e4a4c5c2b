use anyhow::{Context, Result};

use moodtrack_vision::{Config, ImageSource, VibePipeline};

use crate::commands::render::print_response;

pub async fn run_analyze(config: &Config, image: &str, json: bool) -> Result<()> {
    let image = ImageSource::parse(image)?;
    let pipeline = VibePipeline::from_config(config)?;

    log::info!(
        "Analyzing {} against {} tracks",
        image,
        pipeline.catalog().len()
    );

    let analysis = pipeline
        .analyze(&image)
        .await
        .context("Failed to analyze image")?;

    let response = pipeline.respond(&analysis);
    print_response(&response, json, true)
}
