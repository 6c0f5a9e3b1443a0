//! Application orchestrator.
//! Loads/merges config, builds the logger, installs the interrupt handler,
//! lists and classifies the source directory, then drains the mover's reports.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn, Dispatch};

use organise_downloads::config::{
    env_config_path, resolve_config, write_sample_config, CONFIG_ENV_VAR,
};
use organise_downloads::output as out;
use organise_downloads::{
    classify, default_config_path, list_source_dir, Config, Mover, OrganizeError, Shutdown,
};

use crate::cli::Args;
use crate::logging::build_dispatch;

/// Run the CLI application.
pub fn run(args: Args) -> Result<()> {
    if args.print_config {
        print_config_location(args.config.as_deref());
        return Ok(());
    }

    if args.sample_config {
        let path = args
            .config
            .clone()
            .or_else(default_config_path)
            .context("Could not determine a config location; pass --config <FILE>")?;
        write_sample_config(&path)
            .with_context(|| format!("write sample config to {}", path.display()))?;
        out::print_success(&format!("Sample config written to: {}", path.display()));
        out::print_info("Edit <excluded_extensions> to choose which files stay where they are.");
        return Ok(());
    }

    // Config file first, then CLI overrides (CLI wins).
    let mut cfg = Config::default();
    let loaded_from = match resolve_config(args.config.as_deref()) {
        Ok(Some((path, file_cfg))) => {
            file_cfg.apply_to(&mut cfg);
            Some(path)
        }
        Ok(None) => None,
        Err(e) => {
            out::print_error(&format!("{e:#}"));
            return Err(e);
        }
    };
    args.apply_overrides(&mut cfg);
    if let Err(e) = cfg.source_dir() {
        out::print_error(&e.to_string());
        return Err(e);
    }

    let (dispatch, guard) = build_dispatch(cfg.log_level, cfg.log_file.as_deref(), args.json)
        .map_err(|e| {
            out::print_error(&format!("Failed to initialize logging: {}", e));
            e
        })?;

    let shutdown = Shutdown::new();
    {
        let shutdown = shutdown.clone();
        if let Err(e) = ctrlc::set_handler(move || {
            shutdown.request();
            out::print_warn("Received interrupt; stopping after the current file...");
        }) {
            out::print_warn(&format!("Could not install interrupt handler: {e}"));
        }
    }

    let result = tracing::dispatcher::with_default(&dispatch, || {
        debug!(?args, config = ?loaded_from, "starting organise_downloads");
        organise(&cfg, &dispatch, &shutdown)
    });

    // Flush buffered file logs before reporting the outcome.
    drop(guard);
    result
}

fn organise(cfg: &Config, dispatch: &Dispatch, shutdown: &Shutdown) -> Result<()> {
    let source_dir = cfg.source_dir()?;
    info!(
        source = %source_dir.display(),
        excluded = ?cfg.excluded.as_slice(),
        "START"
    );

    let source = canonical_source(source_dir).map_err(log_fatal)?;
    let entries = list_source_dir(&source).map_err(log_fatal)?;
    let targets = classify(&entries, &cfg.excluded, dispatch);

    if targets.is_empty() {
        info!("No files to move.");
        out::print_info("No files to move.");
        return Ok(());
    }
    info!(
        files = targets.file_count(),
        destinations = targets.destination_count(),
        "files to move"
    );

    let handle = Mover::new(&source)
        .with_logger(dispatch.clone())
        .with_shutdown(shutdown.clone())
        .spawn(targets)
        .map_err(log_fatal)?;

    for dst in handle.reports() {
        info!(dst = %dst.display(), "relocated");
        out::print_moved(&dst);
    }

    let summary = handle.join().map_err(log_fatal)?;
    if summary.moved < summary.total {
        warn!(
            not_moved = summary.total - summary.moved,
            "some files were left in place; see earlier log lines"
        );
    }
    info!(%summary, "DONE");
    out::print_success(&summary.to_string());
    Ok(())
}

/// Resolve symlinks in the source path; failure counts as a listing failure.
fn canonical_source(dir: &Path) -> Result<PathBuf, OrganizeError> {
    dunce::canonicalize(dir).map_err(|source| OrganizeError::ListSource {
        path: dir.to_path_buf(),
        source,
    })
}

fn log_fatal(e: OrganizeError) -> anyhow::Error {
    error!(code = e.code(), kind = e.kind(), error = %e, "run aborted");
    out::print_error(&e.to_string());
    e.into()
}

fn print_config_location(explicit: Option<&Path>) {
    if let Some(p) = explicit {
        out::print_info(&format!("Using config given by --config:\n  {}\n", p.display()));
        return;
    }
    if let Some(cfg_env) = env_config_path() {
        out::print_info(&format!(
            "Using {CONFIG_ENV_VAR} (explicit):\n  {}\n",
            cfg_env.display()
        ));
        out::print_info(&format!("To override, unset {CONFIG_ENV_VAR} or pass --config."));
        return;
    }
    match default_config_path() {
        Some(p) => {
            out::print_info(&format!("Default config path:\n  {}\n", p.display()));
            if p.exists() {
                out::print_info("A config file already exists at that location.");
            } else {
                out::print_info(
                    "No config file exists there yet; built-in exclusions are used. Run with --sample-config to create one.",
                );
            }
        }
        None => out::print_error("Could not determine a default config path."),
    }
}
