//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for digital-twin
#[derive(Parser, Debug)]
#[command(name = "digital-twin")]
#[command(author, version, about = "Conversational proxy with persistent session memory")]
#[command(long_about = r#"
Digital Twin serves a small HTTP API that relays chat messages to a
language model (OpenAI or AWS Bedrock) and keeps each session's
transcript in local files or an S3 bucket.

Endpoints:
  POST /chat                       {message, session_id?} -> {response, session_id}
  GET  /conversation/<session_id>  stored transcript
  GET  /health                     liveness and active provider

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./twin.toml         Project-level config
3. ~/.config/digital-twin/config.toml   Global config
Environment variables (AI_MODEL_USE, USE_S3, S3_BUCKET, MEMORY_DIR, ...)
override all files.

Example:
  digital-twin --port 8005
  AI_MODEL_USE=bedrock digital-twin -v
"#)]
pub struct Cli {
    /// Address to bind (overrides server.host)
    #[arg(long, value_name = "HOST")]
    pub host: Option<String>,

    /// Port to listen on (overrides server.port)
    #[arg(short, long, value_name = "PORT")]
    pub port: Option<u16>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Also write logs to daily-rotated files in this directory
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files (environment still applies)
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_overrides() {
        let cli = Cli::parse_from(["digital-twin", "--port", "9001", "-vv", "--no-config"]);
        assert_eq!(cli.port, Some(9001));
        assert_eq!(cli.verbose, 2);
        assert!(cli.no_config);
        assert!(cli.host.is_none());
    }
}
