//! Application orchestrator.
//! Loads/merges config, initializes logging, runs the selected command and
//! prints its summary (plain or JSON).

use anyhow::{bail, Result};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use std::path::Path;
use tracing::{debug, error};

use dataprep::cli::{Args, Command};
use dataprep::config::CONFIG_ENV;
use dataprep::output as out;
use dataprep::{
    append_manifest, create_template_config, default_config_path, load_config, partition,
    partition_with_thread_rng, resize_images, BatchReport, Config, DataPrepError, ImageSize,
    LanczosResizer, PartitionRequest, TransferMode, TransferOptions,
};

use crate::logging::init_tracing;

/// Final line printed in `--json` mode.
#[derive(Serialize)]
struct Summary<'a, T: Serialize> {
    command: &'a str,
    dry_run: bool,
    report: &'a T,
}

/// Run the CLI application.
pub fn run(args: Args) -> Result<()> {
    // Handle --print-config before logging init
    if args.print_config {
        print_config_location(&args);
        return Ok(());
    }

    let Some(command) = args.command.clone() else {
        bail!("no command given; run `dataprep --help` for usage");
    };

    if let Command::InitConfig = command {
        return init_config(args.config.as_deref());
    }

    // Defaults < XML < CLI flags
    let mut cfg = load_config(args.config.as_deref())?.unwrap_or_default();
    args.apply_overrides(&mut cfg);

    // Held until the end of run so the file appender flushes.
    let _guard = init_tracing(&cfg.log_level, cfg.log_file.as_deref(), args.json).map_err(|e| {
        out::print_error(&format!("Failed to initialize logging: {e}"));
        e
    })?;

    debug!("Starting dataprep: {:?}", args);

    let result = execute(&cfg, &command, args.json);
    if let Err(e) = &result {
        log_failure(e);
    }
    result
}

fn print_config_location(args: &Args) {
    if let Some(p) = &args.config {
        out::print_info(&format!("Using --config (explicit):\n  {}\n", p.display()));
        return;
    }
    if let Ok(cfg_env) = std::env::var(CONFIG_ENV) {
        out::print_info(&format!("Using {CONFIG_ENV} (explicit):\n  {cfg_env}\n"));
        out::print_info(&format!("To override, unset {CONFIG_ENV} or set it to another file."));
        return;
    }
    match default_config_path() {
        Ok(p) => {
            out::print_info(&format!("Default dataprep config path:\n  {}\n", p.display()));
            if p.exists() {
                out::print_info("A config file already exists at that location.");
            } else {
                out::print_info("No config file exists there yet. Run `dataprep init-config` to create a template.");
            }
        }
        Err(e) => out::print_error(&format!("Could not determine a default config path: {e}")),
    }
}

fn init_config(explicit: Option<&Path>) -> Result<()> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => default_config_path()?,
    };
    create_template_config(&path)?;
    out::print_success(&format!("A template dataprep config was written to: {}", path.display()));
    out::print_info("Edit it to change defaults; CLI flags still take precedence.");
    Ok(())
}

fn execute(cfg: &Config, command: &Command, json: bool) -> Result<()> {
    match command {
        Command::Resize {
            source_dir,
            dest_dir,
            width,
            height,
        } => {
            let size = ImageSize::new(*width, *height)?;
            let report = resize_images(
                source_dir,
                dest_dir,
                size,
                &cfg.image_extensions,
                &LanczosResizer,
                cfg.dry_run,
            )?;
            emit_batch("resize", "resized", cfg.dry_run, &report, json)
        }
        Command::Partition {
            source_dir,
            dest_dir,
            extension,
            percentage,
            mode,
            seed,
            ..
        } => {
            let mut request = PartitionRequest::new(source_dir, dest_dir, *mode);
            if let Some(ext) = extension {
                request = request.with_extension(ext.as_str());
            }
            if let Some(p) = percentage {
                request = request.with_percentage(*p);
            }
            let opts = TransferOptions::from(cfg);
            let report = match seed {
                Some(seed) => partition(&request, &opts, &mut ChaCha8Rng::seed_from_u64(*seed))?,
                None => partition_with_thread_rng(&request, &opts)?,
            };
            let verb = match mode {
                TransferMode::Move => "moved",
                TransferMode::Copy => "copied",
            };
            emit_batch("partition", verb, cfg.dry_run, &report, json)
        }
        Command::Manifest {
            manifest,
            source_dir,
            columns,
            label,
        } => {
            let report = append_manifest(manifest, source_dir, columns.as_deref(), label.as_deref(), cfg.dry_run)?;
            if json {
                print_json("manifest", cfg.dry_run, &report)
            } else {
                out::print_manifest_summary(&report, cfg.dry_run);
                Ok(())
            }
        }
        // Handled before the config is loaded.
        Command::InitConfig => Ok(()),
    }
}

fn emit_batch(command: &str, verb: &str, dry_run: bool, report: &BatchReport, json: bool) -> Result<()> {
    if json {
        print_json(command, dry_run, report)
    } else {
        out::print_batch_summary(verb, report);
        Ok(())
    }
}

fn print_json<T: Serialize>(command: &str, dry_run: bool, report: &T) -> Result<()> {
    let summary = Summary {
        command,
        dry_run,
        report,
    };
    println!("{}", serde_json::to_string(&summary)?);
    Ok(())
}

/// Structured error event; typed failures carry their code and kind.
fn log_failure(e: &anyhow::Error) {
    let Some(dp) = e.downcast_ref::<DataPrepError>() else {
        let error = format!("{e:#}");
        error!(error = %error, "Command failed");
        return;
    };
    let code = dp.code();
    let kind = dp.kind();
    match dp {
        DataPrepError::SourceNotFound(path) => {
            error!(code, kind, path = %path.display(), "Source directory not found")
        }
        DataPrepError::InvalidPercentage(p) => {
            error!(code, kind, percentage = *p, "Percentage out of range")
        }
        DataPrepError::ColumnsRequired(path) => {
            error!(code, kind, manifest = %path.display(), "Column headers required for a new manifest")
        }
        DataPrepError::InvalidSize { width, height } => {
            error!(code, kind, width = *width, height = *height, "Target size must be non-zero")
        }
        DataPrepError::SameDirectory(path) => {
            error!(code, kind, path = %path.display(), "Source and destination are the same directory")
        }
    }
}
