//! Tracing initialization for the `dataprep` binary.
//!
//! One subscriber: an EnvFilter derived from `LogLevel`, a stdout layer, and an
//! optional non-blocking file layer. `--json` switches both layers to JSON lines.
//! RUST_LOG is not consulted; the config file and flags decide the level.

use anyhow::Result;
use chrono::Local;
use dataprep::output as out;
use dataprep::platform::open_log_file_secure_append;
use dataprep::{path_has_symlink_ancestor, LogLevel};
use std::fmt as stdfmt;
use std::path::Path;
use tracing::Subscriber;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt as tsfmt;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::{Layer, SubscriberExt};
use tracing_subscriber::registry;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;

/// DD/MM/YY HH:MM:SS in local time.
struct LocalHumanTime;
impl FormatTime for LocalHumanTime {
    fn format_time(&self, w: &mut tsfmt::format::Writer<'_>) -> stdfmt::Result {
        write!(w, "{}", Local::now().format("%d/%m/%y %H:%M:%S"))
    }
}

/// Filter directives per level. Decoder crates stay at warn below `debug`.
fn env_filter_for(lvl: &LogLevel) -> EnvFilter {
    EnvFilter::new(match lvl {
        LogLevel::Quiet => "error",
        LogLevel::Normal => "warn,dataprep=info",
        LogLevel::Info => "warn,dataprep=debug",
        LogLevel::Debug => "trace",
    })
}

fn fmt_layer<S, W>(writer: W, json: bool, ansi: bool) -> Box<dyn Layer<S> + Send + Sync>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    if json {
        tsfmt::layer()
            .json()
            .with_timer(LocalHumanTime)
            .with_level(true)
            .with_target(true)
            .with_ansi(false)
            .with_writer(writer)
            .boxed()
    } else {
        tsfmt::layer()
            .compact()
            .with_timer(LocalHumanTime)
            .with_level(true)
            .with_target(false)
            .with_ansi(ansi)
            .with_writer(writer)
            .boxed()
    }
}

/// Open the log file for non-blocking appends, or explain on stderr why not.
fn open_file_writer(path: &Path) -> Option<(NonBlocking, WorkerGuard)> {
    match path_has_symlink_ancestor(path) {
        Ok(false) => {}
        Ok(true) => {
            eprintln!(
                "Refusing to enable file logging: ancestor of {} is a symlink",
                path.display()
            );
            return None;
        }
        Err(e) => {
            eprintln!("Error checking log path {} for symlinks: {}", path.display(), e);
            return None;
        }
    }

    match open_log_file_secure_append(path) {
        Ok(file) => Some(tracing_appender::non_blocking(file)),
        Err(e) => {
            eprintln!("Failed to open log file {}: {}", path.display(), e);
            None
        }
    }
}

/// Install the global subscriber. The returned guard (present when file logging
/// is active) must live until exit so buffered lines reach the file.
pub fn init_tracing(
    lvl: &LogLevel,
    log_file: Option<&Path>,
    json: bool,
) -> Result<Option<WorkerGuard>> {
    let file = log_file.and_then(|path| {
        let opened = open_file_writer(path);
        if opened.is_none() {
            out::print_warn(&format!(
                "File logging to '{}' is disabled for this run; logs still go to stdout.",
                path.display()
            ));
        }
        opened
    });
    let (file_layer, guard) = match file {
        Some((writer, guard)) => (Some(fmt_layer(writer, json, false)), Some(guard)),
        None => (None, None),
    };

    registry()
        .with(env_filter_for(lvl))
        .with(fmt_layer(std::io::stdout, json, atty::is(atty::Stream::Stdout)))
        .with(file_layer)
        .try_init()?;
    Ok(guard)
}
