//! Core configuration types.
//! - Config holds runtime settings with sensible defaults.
//! - ExclusionSet is the ordered list of extensions that are never moved.
//! - LogLevel represents verbosity with simple parsing helpers.

use anyhow::Context;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use super::paths;
use super::DEFAULT_EXCLUDED_EXTENSIONS;

/// Program-defined verbosity levels exposed to users/config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Only errors
    Quiet,
    /// Informational output (default)
    #[default]
    Normal,
    /// More info (like verbose)
    Info,
    /// Debug/trace
    Debug,
}

impl LogLevel {
    /// Parse common string names into our LogLevel (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "quiet" | "error" | "none" => Some(LogLevel::Quiet),
            "normal" => Some(LogLevel::Normal),
            "info" | "verbose" | "detailed" => Some(LogLevel::Info),
            "debug" | "trace" => Some(LogLevel::Debug),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Quiet => "quiet",
            LogLevel::Normal => "normal",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        };
        f.write_str(s)
    }
}

impl FromStr for LogLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid log level: '{s}'"))
    }
}

/// Extensions (each starting with `.`) that must never be moved.
///
/// Matching is exact and case-sensitive: `.bak` does not exclude `.BAK`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusionSet(Vec<String>);

impl ExclusionSet {
    /// An empty set: every extension is eligible.
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn contains(&self, extension: &str) -> bool {
        self.0.iter().any(|e| e == extension)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl Default for ExclusionSet {
    fn default() -> Self {
        DEFAULT_EXCLUDED_EXTENSIONS.iter().copied().collect()
    }
}

impl<S: Into<String>> FromIterator<S> for ExclusionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Runtime configuration for one organise run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory whose top level gets sorted; `None` when no downloads
    /// directory could be found and none was given
    pub source_dir: Option<PathBuf>,
    /// Extensions left where they are
    pub excluded: ExclusionSet,
    /// Console/file verbosity
    pub log_level: LogLevel,
    /// Optional path to a log file
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_dir: paths::default_source_dir(),
            excluded: ExclusionSet::default(),
            log_level: LogLevel::Normal,
            log_file: paths::default_log_path(),
        }
    }
}

impl Config {
    /// Construct a Config for `source_dir`; other fields use defaults.
    pub fn new(source_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: Some(source_dir.into()),
            ..Default::default()
        }
    }

    /// The directory to sort. Never guesses: without a known downloads
    /// directory the caller must name one.
    pub fn source_dir(&self) -> anyhow::Result<&Path> {
        self.source_dir
            .as_deref()
            .context("cannot determine downloads directory; pass --source")
    }
}
