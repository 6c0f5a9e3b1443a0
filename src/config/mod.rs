//! Config module.
//! Provides configuration types, default paths, and XML loading.

pub mod paths;
pub mod types;
pub mod xml;

pub use paths::{
    default_config_path, default_log_path, default_source_dir, env_config_path,
    path_has_symlink_ancestor,
};
pub use types::{Config, ExclusionSet, LogLevel};
pub use xml::{load_config_file, resolve_config, sample_config, write_sample_config, FileConfig};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "ORGANISE_DOWNLOADS_CONFIG";

/// Extensions excluded when no config file says otherwise (Finder metadata).
pub const DEFAULT_EXCLUDED_EXTENSIONS: &[&str] = &[".DS_Store", ".localized"];
