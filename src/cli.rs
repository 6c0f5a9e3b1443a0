//! CLI definition and parsing.
//! Defines Args and provides parse() for command-line handling.
//!
//! Notes:
//! - --debug is a shorthand for --log-level debug and wins over it.
//! - CLI flags override values from the config file.

use clap::{Parser, ValueHint};
use std::path::{Path, PathBuf};

use organise_downloads::{Config, LogLevel};

/// Sort the top level of a downloads folder into `<ext>_files` subdirectories.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Sort downloads into per-extension subdirectories")]
pub struct Args {
    /// Directory to organise (default: your Downloads folder).
    #[arg(
        long = "source",
        short = 's',
        value_name = "DIR",
        value_hint = ValueHint::DirPath
    )]
    pub source: Option<PathBuf>,

    /// Config file holding the excluded extensions.
    #[arg(
        long = "config",
        short = 'c',
        value_name = "FILE",
        value_hint = ValueHint::FilePath,
        help = "Config file (default: ORGANISE_DOWNLOADS_CONFIG or the per-user config dir)"
    )]
    pub config: Option<PathBuf>,

    /// Enable debug logging (equivalent to `--log-level debug`).
    #[arg(
        short = 'd',
        long,
        help = "Enable debug logging (shorthand for --log-level debug)"
    )]
    pub debug: bool,

    /// Set log level. One of: quiet, normal, info, debug.
    #[arg(long, value_parser = parse_level, help = "Set log level: quiet, normal, info, debug")]
    pub log_level: Option<LogLevel>,

    /// Write a sample config file to the config location, then exit.
    #[arg(long, help = "Write a sample config file and exit without scanning")]
    pub sample_config: bool,

    /// Print which config file would be used, then exit.
    #[arg(long, help = "Print the config file location and exit")]
    pub print_config: bool,

    /// Emit logs in structured JSON (includes timestamp, level, and structured fields).
    #[arg(long, help = "Emit logs in structured JSON")]
    pub json: bool,
}

fn parse_level(s: &str) -> Result<LogLevel, String> {
    s.parse()
}

impl Args {
    /// Effective log level derived from flags.
    /// Precedence: --debug > --log-level value > None (use config default).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            return Some(LogLevel::Debug);
        }
        self.log_level
    }

    /// Source directory given on the command line, with stray shell quotes removed.
    pub fn resolved_source(&self) -> Option<PathBuf> {
        self.source.as_deref().map(sanitize_path)
    }

    /// Apply CLI overrides to a loaded Config (in-place). No-ops for unset flags.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        if let Some(src) = self.resolved_source() {
            cfg.source_dir = Some(src);
        }
        if let Some(level) = self.effective_log_level() {
            cfg.log_level = level;
        }
    }
}

/// Trim quotes left behind by PowerShell/CMD quoting, plus one trailing
/// separator that such quoting tends to leave (`'C:\Downloads\'`).
fn sanitize_path(p: &Path) -> PathBuf {
    let raw = p.to_string_lossy();
    let mut inner: String = raw.trim().trim_matches(|c| c == '\'' || c == '"').to_string();
    if inner.len() > 1 && (inner.ends_with('\\') || inner.ends_with('/')) {
        inner.pop();
    }
    PathBuf::from(inner)
}

pub fn parse() -> Args {
    Args::parse()
}
