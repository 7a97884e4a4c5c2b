use anyhow::{Context, Result};
use confyg::{env, Confygery};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use moodtrack_search::{MatchOptions, EXACT_WEIGHT, MAX_RESULTS, PARTIAL_WEIGHT};

pub const DEFAULT_API_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_VISION_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_MAX_TOKENS: u32 = 400;

/// Placeholder key shown in the example config file. Treated as unset.
const API_KEY_PLACEHOLDER: &str = "your-api-key-here";

/// Configuration for moodtrack.
///
/// Configuration is loaded from multiple sources with the following priority:
/// 1. CLI arguments (highest priority)
/// 2. Environment variables (MOOD_* prefix)
/// 3. Config file (~/.config/moodtrack/config.toml)
/// 4. Built-in defaults (lowest priority)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// API key for the vision provider.
    ///
    /// Can be set via:
    /// - ENV: MOOD_OPENAI_API_KEY (or OPENAI_API_KEY)
    /// - Config: openai_api_key = "..."
    pub openai_api_key: Option<String>,

    /// Base URL of an OpenAI-compatible API.
    pub api_base_url: String,

    /// Vision model used to describe images.
    pub vision_model: String,

    /// Upper bound on the length of the analysis text.
    pub max_tokens: u32,

    /// Retries for transient provider failures.
    pub max_retries: usize,

    pub request_timeout_secs: u64,

    /// Path to the JSON track catalog.
    ///
    /// Can be set via:
    /// - CLI: --catalog /path/to/songs.json
    /// - ENV: MOOD_CATALOG_PATH
    /// - Config: catalog_path = "/path/to/songs.json"
    /// - Default: ~/.local/share/moodtrack/songs.json
    pub catalog_path: PathBuf,

    /// Log level: error, warn, info, debug or trace.
    pub log_level: String,

    /// Points for a tag whose whole phrase appears in the analysis.
    pub exact_weight: u32,

    /// Points per long tag word appearing in the analysis.
    pub partial_weight: u32,

    /// Number of matches to return (at most 10).
    pub result_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            vision_model: DEFAULT_VISION_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            max_retries: 2,
            request_timeout_secs: 60,
            catalog_path: default_catalog_path(),
            log_level: "info".to_string(),
            exact_weight: EXACT_WEIGHT,
            partial_weight: PARTIAL_WEIGHT,
            result_limit: MAX_RESULTS,
        }
    }
}

impl Config {
    /// Load configuration from file and environment variables.
    ///
    /// Searches for config file at: ~/.config/moodtrack/config.toml
    /// Reads environment variables with MOOD_ prefix.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load() -> Result<Self> {
        let config_path = config_file_path();

        let mut builder = Confygery::new()
            .context("Failed to create config builder")?;

        if config_path.exists() {
            let path_str = config_path.to_str()
                .ok_or_else(|| anyhow::anyhow!("Config path contains invalid UTF-8"))?;
            builder.add_file(path_str)
                .context("Failed to load config file")?;
        }

        let env_opts = env::Options::with_top_level("mood");
        builder.add_env(env_opts)
            .context("Failed to load environment variables")?;

        let config: Self = builder.build()
            .context("Failed to build configuration")?;

        log::debug!("Loaded configuration from {}", config_path.display());

        Ok(config)
    }

    /// Load configuration, overriding the catalog path.
    ///
    /// This is used when the --catalog CLI flag is provided.
    pub fn load_with_catalog_path(catalog_path: PathBuf) -> Result<Self> {
        let mut config = Self::load()?;
        config.catalog_path = catalog_path;
        Ok(config)
    }

    /// The configured API key, falling back to `OPENAI_API_KEY`.
    ///
    /// Blank keys and the example file's placeholder count as unset.
    pub fn api_key(&self) -> Option<String> {
        resolve_api_key(self.openai_api_key.as_deref(), || {
            std::env::var("OPENAI_API_KEY").ok()
        })
    }

    /// Ranking options derived from the configured weights and limit.
    ///
    /// # Errors
    /// Returns an error if a weight is zero.
    pub fn match_options(&self) -> Result<MatchOptions> {
        let options = MatchOptions::new(self.exact_weight, self.partial_weight)
            .context("Invalid scoring weights in configuration")?;
        Ok(options.with_limit(self.result_limit))
    }
}

fn resolve_api_key(
    configured: Option<&str>,
    fallback: impl FnOnce() -> Option<String>,
) -> Option<String> {
    let usable = |k: &str| !k.trim().is_empty() && k.trim() != API_KEY_PLACEHOLDER;

    configured
        .filter(|&k| usable(k))
        .map(str::to_string)
        .or_else(fallback)
        .filter(|k| usable(k.as_str()))
}

/// Get the default catalog path.
///
/// Returns: ~/.local/share/moodtrack/songs.json (or platform equivalent)
fn default_catalog_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("moodtrack")
        .join("songs.json")
}

/// Get the config file path.
///
/// Returns:
/// - Linux: ~/.config/moodtrack/config.toml
/// - macOS: ~/Library/Application Support/moodtrack/config.toml
/// - Windows: %APPDATA%\moodtrack\config.toml
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("moodtrack")
        .join("config.toml")
}

/// Get the example config file content.
pub fn example_config() -> &'static str {
    r#"# Moodtrack Configuration File
#
# Configuration is loaded from multiple sources with the following priority:
# 1. CLI arguments (highest priority)
# 2. Environment variables (MOOD_* prefix)
# 3. This config file
# 4. Built-in defaults (lowest priority)

# API key for the OpenAI-compatible vision provider
#
# Can also be set via:
# - Environment: MOOD_OPENAI_API_KEY=your-key-here
# - Environment: OPENAI_API_KEY=your-key-here
#openai_api_key = "your-api-key-here"

# Provider endpoint and model
#api_base_url = "https://api.openai.com/v1"
#vision_model = "gpt-4o-mini"
#max_tokens = 400
#max_retries = 2
#request_timeout_secs = 60

# Path to the JSON track catalog
#
# A JSON array of {"id", "title", "artist", "tags"} objects.
#
# Can also be set via:
# - CLI: moodtrack --catalog /custom/songs.json match "..."
# - Environment: MOOD_CATALOG_PATH=/custom/songs.json
#
# Default: Platform-specific data directory
#catalog_path = "/path/to/songs.json"

# Logging: error, warn, info, debug, trace
#log_level = "info"

# Scoring
#exact_weight = 10
#partial_weight = 5
#result_limit = 10
"#
}

/// Create default config file if it doesn't exist.
///
/// Returns true if a new file was created, false if it already existed.
pub fn ensure_config_file() -> Result<bool> {
    let config_path = config_file_path();

    if config_path.exists() {
        return Ok(false);
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)
            .context("Failed to create config directory")?;
    }

    std::fs::write(&config_path, example_config())
        .context("Failed to write config file")?;

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(!config.catalog_path.as_os_str().is_empty());
        assert!(config.openai_api_key.is_none());
        assert_eq!(config.vision_model, "gpt-4o-mini");
        assert_eq!(config.max_tokens, 400);
    }

    #[test]
    fn test_default_match_options() {
        let options = Config::default().match_options().unwrap();
        assert_eq!(options, MatchOptions::default());
    }

    #[test]
    fn test_zero_weight_rejected() {
        let config = Config {
            partial_weight: 0,
            ..Config::default()
        };
        assert!(config.match_options().is_err());
    }

    #[test]
    fn test_result_limit_clamped() {
        let config = Config {
            result_limit: 40,
            ..Config::default()
        };
        assert_eq!(config.match_options().unwrap().limit(), MAX_RESULTS);
    }

    #[test]
    fn test_configured_api_key_wins() {
        let config = Config {
            openai_api_key: Some("sk-configured".to_string()),
            ..Config::default()
        };
        assert_eq!(config.api_key().as_deref(), Some("sk-configured"));
    }

    #[test]
    fn test_example_config_parses_as_partial_config() {
        let config: Config = toml::from_str(example_config()).unwrap();
        assert!(config.openai_api_key.is_none());
        assert_eq!(config.exact_weight, EXACT_WEIGHT);
    }

    #[test]
    fn test_example_config_defers_to_env_key() {
        let config: Config = toml::from_str(example_config()).unwrap();
        let key = resolve_api_key(config.openai_api_key.as_deref(), || {
            Some("sk-from-env".to_string())
        });
        assert_eq!(key.as_deref(), Some("sk-from-env"));
    }

    #[test]
    fn test_placeholder_key_is_unset() {
        let key = resolve_api_key(Some("your-api-key-here"), || Some("sk-from-env".to_string()));
        assert_eq!(key.as_deref(), Some("sk-from-env"));
        assert!(resolve_api_key(Some("your-api-key-here"), || None).is_none());
    }

    #[test]
    fn test_blank_key_falls_back() {
        let key = resolve_api_key(Some("  "), || Some("sk-from-env".to_string()));
        assert_eq!(key.as_deref(), Some("sk-from-env"));
        assert!(resolve_api_key(None, || Some(String::new())).is_none());
    }

    #[test]
    fn test_configured_key_skips_fallback() {
        let key = resolve_api_key(Some("sk-configured"), || panic!("fallback consulted"));
        assert_eq!(key.as_deref(), Some("sk-configured"));
    }

    #[test]
    fn test_config_load() {
        // Should not fail even if config file doesn't exist
        let result = Config::load();
        assert!(result.is_ok());
    }

    #[test]
    fn test_config_with_custom_catalog_path() {
        let custom_path = PathBuf::from("/tmp/songs.json");
        let config = Config::load_with_catalog_path(custom_path.clone());
        assert!(config.is_ok());
        assert_eq!(config.unwrap().catalog_path, custom_path);
    }
}
