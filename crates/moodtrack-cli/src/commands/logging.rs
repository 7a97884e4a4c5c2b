use anyhow::Result;
use twyg::{LogLevel, OptsBuilder, Output};

/// Map a configured level name to a log level, defaulting to info.
fn parse_level(level: &str) -> LogLevel {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => LogLevel::Trace,
        "debug" => LogLevel::Debug,
        "warn" | "warning" => LogLevel::Warn,
        "error" => LogLevel::Error,
        _ => LogLevel::Info,
    }
}

/// Set up logging to stderr so that command output on stdout stays clean.
///
/// Each `-v` raises the configured level: one to debug, two to trace.
pub fn init(level: &str, verbose: u8) -> Result<()> {
    let level = match verbose {
        0 => parse_level(level),
        1 => LogLevel::Debug,
        _ => LogLevel::Trace,
    };

    let opts = OptsBuilder::new()
        .coloured(true)
        .output(Output::Stderr)
        .level(level)
        .report_caller(false)
        .build()
        .map_err(|e| anyhow::anyhow!("Invalid logging options: {e:?}"))?;

    twyg::setup(opts).map_err(|e| anyhow::anyhow!("Could not set up logger: {e:?}"))?;

    Ok(())
}
