//! Tracing initialization.
//!
//! Behavior:
//! - Log level is driven by LogLevel (no RUST_LOG override here).
//! - Events go to stderr so stdout stays free for "Moved X -> Y" lines.
//! - JSON/compact formatting is selected via the `json` flag.
//! - If `log_file` is provided and no ancestor is a symlink, a non-blocking file layer is added.

use anyhow::{Result, anyhow};
use chrono::Local;
use std::fmt as stdfmt;
use std::fs::OpenOptions;
use std::path::Path;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::fmt as tsfmt;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::Registry;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

use upload_relocator::output as out;
use upload_relocator::{LogLevel, path_has_symlink_ancestor};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Human-friendly timestamp formatter (DD/MM/YY HH:MM:SS)
struct LocalHumanTime;
impl FormatTime for LocalHumanTime {
    fn format_time(&self, w: &mut tsfmt::format::Writer<'_>) -> stdfmt::Result {
        write!(w, "{}", Local::now().format("%d/%m/%y %H:%M:%S"))
    }
}

fn env_filter(lvl: LogLevel) -> EnvFilter {
    let level = match lvl {
        LogLevel::Quiet => LevelFilter::ERROR,
        LogLevel::Normal => LevelFilter::INFO,
        LogLevel::Info => LevelFilter::DEBUG,
        LogLevel::Debug => LevelFilter::TRACE,
    };
    EnvFilter::default().add_directive(level.into())
}

fn stderr_layer(lvl: LogLevel, json: bool) -> BoxedLayer {
    let base = tsfmt::layer()
        .with_timer(LocalHumanTime)
        .with_target(true)
        .with_writer(std::io::stderr);
    if json {
        base.json().with_filter(env_filter(lvl)).boxed()
    } else {
        base.compact().with_filter(env_filter(lvl)).boxed()
    }
}

fn file_layer(lvl: LogLevel, json: bool, writer: NonBlocking) -> BoxedLayer {
    let base = tsfmt::layer()
        .with_timer(LocalHumanTime)
        .with_target(true)
        .with_ansi(false)
        .with_writer(writer);
    if json {
        base.json().with_filter(env_filter(lvl)).boxed()
    } else {
        base.compact().with_filter(env_filter(lvl)).boxed()
    }
}

/// Open `path` for appending behind a non-blocking writer, refusing symlinked ancestors.
fn open_non_blocking_writer(path: &Path) -> Result<(NonBlocking, WorkerGuard)> {
    if path_has_symlink_ancestor(path)? {
        return Err(anyhow!("an ancestor of {} is a symlink", path.display()));
    }
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    Ok(tracing_appender::non_blocking(file))
}

/// Install the global subscriber. The returned guard must be held until exit to flush
/// the file layer.
pub fn init_tracing(
    lvl: LogLevel,
    log_file: Option<&Path>,
    json: bool,
) -> Result<Option<WorkerGuard>> {
    let mut layers: Vec<BoxedLayer> = vec![stderr_layer(lvl, json)];
    let mut guard = None;

    if let Some(path) = log_file {
        match open_non_blocking_writer(path) {
            Ok((writer, g)) => {
                layers.push(file_layer(lvl, json, writer));
                guard = Some(g);
            }
            Err(e) => out::print_warn(&format!(
                "File logging to '{}' was not enabled ({e:#}); logs continue on stderr.",
                path.display()
            )),
        }
    }

    tracing_subscriber::registry()
        .with(layers)
        .try_init()
        .map_err(|e| anyhow!("install tracing subscriber: {e}"))?;
    Ok(guard)
}
