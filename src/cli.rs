//! CLI argument parsing for Shiftaudit

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for the audit result
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format (default)
    Text,
    /// JSON audit result for machine parsing
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "shiftaudit")]
#[command(version)]
#[command(about = "Report the DOM elements contributing to cumulative layout shift", long_about = None)]
pub struct Cli {
    /// Artifacts JSON file with `traces` and `TraceElements`
    #[arg(short, long, value_name = "PATH")]
    pub artifacts: PathBuf,

    /// Output format (text or json)
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Audit configuration file (TOML)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Pass whose trace provides the aggregate CLS (overrides config)
    #[arg(short, long, value_name = "NAME")]
    pub pass: Option<String>,

    /// Enable debug tracing output to stderr
    #[arg(long)]
    pub debug: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_artifacts() {
        let cli = Cli::parse_from(["shiftaudit", "--artifacts", "artifacts.json"]);
        assert_eq!(cli.artifacts, PathBuf::from("artifacts.json"));
        assert_eq!(cli.format, OutputFormat::Text);
        assert!(cli.config.is_none());
        assert!(cli.pass.is_none());
        assert!(!cli.debug);
    }

    #[test]
    fn test_cli_requires_artifacts() {
        assert!(Cli::try_parse_from(["shiftaudit"]).is_err());
    }

    #[test]
    fn test_cli_json_format() {
        let cli = Cli::parse_from(["shiftaudit", "-a", "a.json", "--format", "json"]);
        assert_eq!(cli.format, OutputFormat::Json);
    }

    #[test]
    fn test_cli_pass_and_config() {
        let cli = Cli::parse_from([
            "shiftaudit",
            "-a",
            "a.json",
            "--config",
            "audit.toml",
            "--pass",
            "navigation",
            "--debug",
        ]);
        assert_eq!(cli.config, Some(PathBuf::from("audit.toml")));
        assert_eq!(cli.pass.as_deref(), Some("navigation"));
        assert!(cli.debug);
    }

    #[test]
    fn test_cli_rejects_unknown_format() {
        assert!(Cli::try_parse_from(["shiftaudit", "-a", "a.json", "--format", "html"]).is_err());
    }
}
