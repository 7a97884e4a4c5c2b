use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use moodtrack_vision::Config;

mod commands;

#[derive(Debug, Parser)]
#[command(name = "moodtrack", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the track catalog (default: ~/.local/share/moodtrack/songs.json)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// Rank the catalog against a vibe description
    ///
    /// Every track's tags are compared with the text. A tag whose whole
    /// phrase appears in the text earns 10 points; otherwise each of its
    /// words longer than three characters that appears earns 5 points.
    /// Tracks with no matching tag are dropped, the rest are sorted by
    /// score (ties keep catalog order) and the top 10 are shown.
    Match {
        /// The description to match (e.g. "a warm beach sunset")
        text: Option<String>,

        /// Read the description from a file ("-" for stdin)
        #[arg(long, conflicts_with = "text")]
        file: Option<PathBuf>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Describe an image with a vision model, then rank the catalog
    ///
    /// The image may be an http(s) URL, a data: URL, or a local file,
    /// which is sent inline. Requires an API key (openai_api_key in the
    /// config file, MOOD_OPENAI_API_KEY or OPENAI_API_KEY).
    Analyze {
        /// Image URL or path
        image: String,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show catalog statistics
    Catalog {
        /// List tags by how many tracks carry them
        #[arg(long)]
        tags: bool,
    },
    /// Inspect or initialize configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Debug, clap::Subcommand)]
enum ConfigAction {
    /// Show the effective configuration
    Show,
    /// Print a single configuration value
    Get {
        /// Configuration key (e.g. catalog_path)
        key: String,
    },
    /// Print the config file path
    Path,
    /// Print an example config file
    Example,
    /// Create the config file with defaults if missing
    Init,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match cli.catalog {
        Some(path) => Config::load_with_catalog_path(path)?,
        None => Config::load()?,
    };

    commands::logging::init(&config.log_level, cli.verbose)?;

    match cli.command {
        Commands::Match { text, file, json } => {
            commands::run_match(&config, text, file, json)?;
        }
        Commands::Analyze { image, json } => {
            commands::run_analyze(&config, &image, json).await?;
        }
        Commands::Catalog { tags } => {
            commands::show_catalog(&config, tags)?;
        }
        Commands::Config { action } => match action.unwrap_or(ConfigAction::Show) {
            ConfigAction::Show => commands::config::show_config(&config)?,
            ConfigAction::Get { key } => commands::config::get_config(&config, &key)?,
            ConfigAction::Path => commands::config::show_path()?,
            ConfigAction::Example => commands::config::show_example()?,
            ConfigAction::Init => commands::config::init_config()?,
        },
    }

    Ok(())
}
