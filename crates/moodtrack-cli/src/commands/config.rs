use anyhow::Result;
use moodtrack_vision::{config, Config};

/// Keys accepted by `config get`.
const KEYS: &str = "openai_api_key, api_base_url, vision_model, max_tokens, max_retries, \
request_timeout_secs, catalog_path, log_level, exact_weight, partial_weight, result_limit";

/// Hide all but the last four characters of a secret.
fn mask(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 4 {
        return "****".to_string();
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("****{tail}")
}

/// Show the current effective configuration.
pub fn show_config(config: &Config) -> Result<()> {
    println!("Current Configuration");
    println!("=====================\n");

    println!("Config file: {}", config::config_file_path().display());

    let exists = config::config_file_path().exists();
    println!("File exists: {}\n", if exists { "yes" } else { "no (using defaults)" });

    println!("Settings:");
    println!(
        "  openai_api_key: {}",
        config.api_key().as_deref().map_or_else(|| "<not set>".to_string(), mask)
    );
    println!("  api_base_url: {}", config.api_base_url);
    println!("  vision_model: {}", config.vision_model);
    println!("  max_tokens: {}", config.max_tokens);
    println!("  max_retries: {}", config.max_retries);
    println!("  request_timeout_secs: {}", config.request_timeout_secs);
    println!("  catalog_path: {}", config.catalog_path.display());
    println!("  log_level: {}", config.log_level);
    println!("  exact_weight: {}", config.exact_weight);
    println!("  partial_weight: {}", config.partial_weight);
    println!("  result_limit: {}", config.result_limit);

    println!("\nPriority: CLI args > ENV vars (MOOD_*) > Config file > Defaults");

    Ok(())
}

/// Get a specific config value.
pub fn get_config(config: &Config, key: &str) -> Result<()> {
    let value = match key {
        "openai_api_key" => config
            .api_key()
            .as_deref()
            .map_or_else(|| "<not set>".to_string(), mask),
        "api_base_url" => config.api_base_url.clone(),
        "vision_model" => config.vision_model.clone(),
        "max_tokens" => config.max_tokens.to_string(),
        "max_retries" => config.max_retries.to_string(),
        "request_timeout_secs" => config.request_timeout_secs.to_string(),
        "catalog_path" => config.catalog_path.display().to_string(),
        "log_level" => config.log_level.clone(),
        "exact_weight" => config.exact_weight.to_string(),
        "partial_weight" => config.partial_weight.to_string(),
        "result_limit" => config.result_limit.to_string(),
        _ => anyhow::bail!("Unknown config key: {}\n\nValid keys: {}", key, KEYS),
    };

    println!("{value}");
    Ok(())
}

/// Show the config file path.
pub fn show_path() -> Result<()> {
    println!("{}", config::config_file_path().display());
    Ok(())
}

/// Show example configuration.
pub fn show_example() -> Result<()> {
    print!("{}", config::example_config());
    Ok(())
}

/// Initialize config file with defaults.
pub fn init_config() -> Result<()> {
    let created = config::ensure_config_file()?;
    let config_path = config::config_file_path();

    if created {
        println!("✓ Created config file: {}", config_path.display());
        println!("\nEdit this file to configure moodtrack.");
    } else {
        println!("Config file already exists: {}", config_path.display());
    }

    Ok(())
}
