use anyhow::{Context, Result};

use moodtrack_core::Catalog;
use moodtrack_vision::Config;

pub fn show_catalog(config: &Config, list_tags: bool) -> Result<()> {
    let catalog = Catalog::load(&config.catalog_path).with_context(|| {
        format!("Failed to load catalog from {}", config.catalog_path.display())
    })?;

    let untagged = catalog.iter().filter(|t| t.is_untagged()).count();
    let tag_count: usize = catalog.iter().map(|t| t.tags.len()).sum();
    let frequencies = catalog.tag_frequencies();

    println!("\nCatalog: {}\n", config.catalog_path.display());
    println!("  Tracks: {}", catalog.len());
    println!("  Tags: {} ({} distinct)", tag_count, frequencies.len());
    println!("  Untagged tracks: {}", untagged);

    if untagged > 0 {
        println!("\n  Untagged tracks can never match; add tags to include them");
    }

    if list_tags && !frequencies.is_empty() {
        println!("\nTags by track count:");
        for (tag, count) in &frequencies {
            println!("  {count:>4}  {tag}");
        }
    }

    Ok(())
}
