//! XML configuration support.
//! - Loads the exclusion list and log settings from config.xml (quick_xml + serde).
//! - Writes a commented sample config on request (`--sample-config`).
//!
//! Notes:
//! - This module only reads/writes the config file; the core never sees it,
//!   only the resulting `ExclusionSet`.
//! - Unknown XML elements are rejected so typos do not silently drop exclusions.

use anyhow::{bail, Context, Result};
use quick_xml::de::from_str as from_xml_str;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use super::paths::{default_config_path, env_config_path, path_has_symlink_ancestor};
use super::types::{Config, ExclusionSet, LogLevel};
use super::DEFAULT_EXCLUDED_EXTENSIONS;
use crate::platform::write_config_secure_new_0600;

/// Struct mirroring the XML config for deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename = "config", deny_unknown_fields)]
struct XmlConfig {
    #[serde(rename = "excluded_extensions")]
    excluded_extensions: Option<XmlExtensionList>,
    #[serde(rename = "log_level")]
    log_level: Option<String>,
    #[serde(rename = "log_file")]
    log_file: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct XmlExtensionList {
    #[serde(rename = "extension", default)]
    extension: Vec<String>,
}

/// Settings read from a config file. `None` fields keep the built-in defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileConfig {
    pub excluded: Option<ExclusionSet>,
    pub log_level: Option<LogLevel>,
    pub log_file: Option<PathBuf>,
}

impl FileConfig {
    /// Overlay the file's values onto `cfg`.
    pub fn apply_to(&self, cfg: &mut Config) {
        if let Some(excluded) = &self.excluded {
            cfg.excluded = excluded.clone();
        }
        if let Some(level) = self.log_level {
            cfg.log_level = level;
        }
        if let Some(file) = &self.log_file {
            cfg.log_file = Some(file.clone());
        }
    }
}

/// Parse config XML text.
pub fn parse_config_str(content: &str) -> Result<FileConfig> {
    let parsed: XmlConfig = from_xml_str(content).context("parse config xml")?;

    let excluded = parsed.excluded_extensions.map(|list| {
        list.extension
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect::<ExclusionSet>()
    });

    let log_level = match parsed.log_level.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(s) => Some(s.parse::<LogLevel>().map_err(anyhow::Error::msg)?),
    };

    let log_file = parsed
        .log_file
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(PathBuf::from);

    Ok(FileConfig {
        excluded,
        log_level,
        log_file,
    })
}

/// Load a config from a specific XML file path.
pub fn load_config_file(path: &Path) -> Result<FileConfig> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("read config xml '{}'", path.display()))?;
    parse_config_str(&contents).with_context(|| format!("in config file '{}'", path.display()))
}

/// Pick the config file for this run and load it.
///
/// A path given by `--config` or `ORGANISE_DOWNLOADS_CONFIG` must exist. The
/// default location is optional: when no file is there, `Ok(None)` tells the
/// caller to use built-in defaults.
pub fn resolve_config(explicit: Option<&Path>) -> Result<Option<(PathBuf, FileConfig)>> {
    if let Some(path) = explicit.map(Path::to_path_buf).or_else(env_config_path) {
        let cfg = load_config_file(&path)?;
        return Ok(Some((path, cfg)));
    }
    let Some(path) = default_config_path() else {
        return Ok(None);
    };
    if !path.exists() {
        return Ok(None);
    }
    let cfg = load_config_file(&path)?;
    Ok(Some((path, cfg)))
}

/// Text of the sample config written by `--sample-config`.
pub fn sample_config() -> String {
    let extensions: String = DEFAULT_EXCLUDED_EXTENSIONS
        .iter()
        .map(|e| format!("    <extension>{e}</extension>\n"))
        .collect();
    format!(
        "<!--\n  organise_downloads configuration (XML)\n\n  excluded_extensions -> files ending in one of these are never moved.\n                         Each entry starts with a dot; matching is exact and case-sensitive.\n  log_level           -> quiet | normal | info | debug\n  log_file            -> path to log file (optional; stdout/stderr still used)\n\n  CLI flags override values set here.\n-->\n<config>\n  <excluded_extensions>\n{extensions}  </excluded_extensions>\n  <log_level>normal</log_level>\n</config>\n"
    )
}

/// Write the sample config to `path`; never overwrites an existing file.
pub fn write_sample_config(path: &Path) -> Result<()> {
    if path.exists() {
        bail!("Refusing to overwrite existing config {}", path.display());
    }
    if path_has_symlink_ancestor(path)? {
        bail!(
            "Refusing to create config: ancestor of {} is a symlink",
            path.display()
        );
    }
    write_config_secure_new_0600(path, sample_config().as_bytes())
}
