//! CLI - Command Line Interface for Cinescope
//!
//! Every browsing action the TUI offers is also scriptable. Output is
//! JSON-parseable when `--json` is given or stdout is not a terminal.
//!
//! # Examples
//!
//! ```bash
//! # First two pages of the popular feed
//! cinescope popular --pages 2
//!
//! # Search and look up one title
//! cinescope search "dune" --json
//! cinescope info 438631
//!
//! # Resolve an artwork path
//! cinescope image /d5NXSklXo0qyIYkgV94XAgMIckC.jpg --size original
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::io::IsTerminal;
use std::path::PathBuf;

use crate::api::CatalogError;
use crate::models::ImageSize;

// =============================================================================
// Exit Codes
// =============================================================================

/// Exit codes for CLI operations (semantic for scripting)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success
    Success = 0,
    /// General error
    Error = 1,
    /// Invalid arguments
    InvalidArgs = 2,
    /// Network error or non-success status
    NetworkError = 3,
    /// Missing credentials or unreadable settings
    ConfigError = 4,
    /// Title does not exist
    NotFound = 5,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

impl From<&CatalogError> for ExitCode {
    fn from(err: &CatalogError) -> ExitCode {
        match err {
            e if e.is_not_found() => ExitCode::NotFound,
            CatalogError::InvalidPage => ExitCode::InvalidArgs,
            e if e.is_network() => ExitCode::NetworkError,
            _ => ExitCode::Error,
        }
    }
}

// =============================================================================
// Main CLI Structure
// =============================================================================

/// Cinescope - movie discovery in the terminal
///
/// Run without arguments to launch interactive TUI.
/// Use subcommands for scriptable automation.
#[derive(Parser, Debug)]
#[command(
    name = "cinescope",
    version,
    about = "Browse, search and inspect movies from the terminal",
    long_about = "Browse popular movies, search as you type, and read cast and \
                  reviews for any title.\n\n\
                  Run without arguments to launch the interactive TUI.\n\
                  Use subcommands for automation and scripting.\n\n\
                  Requires API_URL and TMDB_ACCESS_TOKEN in the environment \
                  or a .env file.",
    after_help = "EXAMPLES:\n\
                  cinescope                           Launch interactive TUI\n\
                  cinescope popular --pages 2         First two feed pages\n\
                  cinescope search \"blade runner\"     Search for titles\n\
                  cinescope info 438631 --json        Details, cast and reviews"
)]
pub struct Cli {
    /// Output format as JSON (default for non-TTY)
    #[arg(long, short = 'j', global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Path to settings file
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run (omit for TUI mode)
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Check if running in CLI mode (has subcommand)
    pub fn is_cli_mode(&self) -> bool {
        self.command.is_some()
    }

    /// Check if JSON output should be used
    pub fn should_json(&self) -> bool {
        self.json || !std::io::stdout().is_terminal()
    }
}

// =============================================================================
// Subcommands
// =============================================================================

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List popular movies
    #[command(visible_alias = "p")]
    Popular(PopularCmd),

    /// Search movies by title
    #[command(visible_alias = "s")]
    Search(SearchCmd),

    /// Details, cast and reviews for one movie
    #[command(visible_alias = "i")]
    Info(InfoCmd),

    /// Build an artwork URL from a poster or backdrop path
    #[command(visible_alias = "img")]
    Image(ImageCmd),
}

/// List popular movies
#[derive(Args, Debug)]
pub struct PopularCmd {
    /// Fetch only this page
    #[arg(long, conflicts_with = "pages")]
    pub page: Option<u32>,

    /// Number of pages to accumulate, starting from the first
    #[arg(long, default_value = "1")]
    pub pages: u32,

    /// Maximum number of results to print
    #[arg(long, short = 'l')]
    pub limit: Option<usize>,
}

/// Search movies by title
#[derive(Args, Debug)]
pub struct SearchCmd {
    /// Search query (at least 3 characters by default)
    #[arg(required = true)]
    pub query: String,

    /// Results page to print
    #[arg(long, default_value = "1")]
    pub page: u32,

    /// Maximum number of results to print
    #[arg(long, short = 'l')]
    pub limit: Option<usize>,
}

/// Details for one movie
#[derive(Args, Debug)]
pub struct InfoCmd {
    /// TMDB movie ID (e.g., 438631)
    #[arg(required = true)]
    pub id: u64,

    /// Print whatever parts loaded instead of failing as a whole
    #[arg(long)]
    pub partial: bool,
}

/// Build an artwork URL
#[derive(Args, Debug)]
pub struct ImageCmd {
    /// Path as returned by the API (e.g., /abc123.jpg)
    #[arg(required = true)]
    pub path: String,

    /// Size tier
    #[arg(long, short = 's', value_enum, default_value = "medium")]
    pub size: SizeArg,
}

/// Image size tier
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SizeArg {
    /// 200px wide
    Small,
    /// 500px wide
    #[default]
    Medium,
    /// Full resolution
    Original,
}

impl From<SizeArg> for ImageSize {
    fn from(size: SizeArg) -> ImageSize {
        match size {
            SizeArg::Small => ImageSize::Small,
            SizeArg::Medium => ImageSize::Medium,
            SizeArg::Original => ImageSize::Original,
        }
    }
}

// =============================================================================
// JSON Output Types
// =============================================================================

/// Generic JSON output wrapper with status
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonOutput<T: Serialize> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "is_zero")]
    pub exit_code: i32,
}

fn is_zero(n: &i32) -> bool {
    *n == 0
}

impl<T: Serialize> JsonOutput<T> {
    /// Create success output with data
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
            exit_code: 0,
        }
    }

    /// Create error output (no data)
    pub fn error_msg(msg: impl Into<String>, code: ExitCode) -> JsonOutput<()> {
        JsonOutput::<()> {
            data: None,
            error: Some(msg.into()),
            exit_code: code.into(),
        }
    }
}

// =============================================================================
// Output Helpers
// =============================================================================

/// Output handler for consistent formatting
pub struct Output {
    pub json: bool,
    pub quiet: bool,
}

impl Output {
    pub fn new(cli: &Cli) -> Self {
        Self {
            json: cli.should_json(),
            quiet: cli.quiet,
        }
    }

    /// Print success data: the JSON envelope, or `text` for humans
    pub fn print<T: Serialize>(&self, data: &T, text: impl FnOnce() -> String) -> anyhow::Result<()> {
        if self.json {
            let output = JsonOutput::success(data);
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            println!("{}", text());
        }
        Ok(())
    }

    /// Print error and return exit code
    pub fn error(&self, msg: impl Into<String>, code: ExitCode) -> ExitCode {
        let msg = msg.into();
        if self.json {
            let output = JsonOutput::<()>::error_msg(&msg, code);
            if let Ok(json) = serde_json::to_string_pretty(&output) {
                eprintln!("{}", json);
            }
        } else if !self.quiet {
            eprintln!("Error: {}", msg);
        }
        code
    }

    /// Print info message (suppressed in quiet mode)
    pub fn info(&self, msg: impl std::fmt::Display) {
        if !self.quiet && !self.json {
            eprintln!("{}", msg);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_args_is_tui_mode() {
        let cli = Cli::parse_from::<_, &str>([]);
        assert!(!cli.is_cli_mode());
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(i32::from(ExitCode::Success), 0);
        assert_eq!(i32::from(ExitCode::Error), 1);
        assert_eq!(i32::from(ExitCode::InvalidArgs), 2);
        assert_eq!(i32::from(ExitCode::NetworkError), 3);
        assert_eq!(i32::from(ExitCode::ConfigError), 4);
        assert_eq!(i32::from(ExitCode::NotFound), 5);
    }

    #[test]
    fn test_catalog_error_exit_codes() {
        assert_eq!(ExitCode::from(&CatalogError::Status(404)), ExitCode::NotFound);
        assert_eq!(ExitCode::from(&CatalogError::Status(503)), ExitCode::NetworkError);
        assert_eq!(ExitCode::from(&CatalogError::InvalidPage), ExitCode::InvalidArgs);
        assert_eq!(
            ExitCode::from(&CatalogError::Schema("missing results".into())),
            ExitCode::Error
        );
    }

    #[test]
    fn test_error_envelope_omits_data() {
        let out = JsonOutput::<()>::error_msg("boom", ExitCode::NetworkError);
        let json = serde_json::to_value(&out).unwrap();
        assert_eq!(json, serde_json::json!({"error": "boom", "exit_code": 3}));
    }

    #[test]
    fn test_success_envelope_omits_exit_code() {
        let json = serde_json::to_value(JsonOutput::success(vec![1, 2])).unwrap();
        assert_eq!(json, serde_json::json!({"data": [1, 2]}));
    }
}
