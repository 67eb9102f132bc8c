pub mod catalog;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod features;
pub mod model;
pub mod predictor;
pub mod presentation;
pub mod ranking;
pub mod service;

use std::path::{Path, PathBuf};

use tracing::Subscriber;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt::{self, MakeWriter},
    prelude::*,
    registry::LookupSpan,
    EnvFilter, Layer,
};

use crate::config::LoggingConfig;

/// Where log lines are written for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogTargets {
    pub file: Option<PathBuf>,
    pub stderr: bool,
}

impl LogTargets {
    /// Non-interactive commands always log to stderr, and also to the
    /// configured file when there is one. The interactive dashboard logs only
    /// to the file, since anything written to the terminal would corrupt the
    /// screen.
    pub fn resolve(cfg: &LoggingConfig, interactive: bool) -> Self {
        Self {
            file: cfg.file.clone(),
            stderr: !interactive,
        }
    }

    pub fn is_silent(&self) -> bool {
        self.file.is_none() && !self.stderr
    }
}

/// Initialize tracing/logging
///
/// `RUST_LOG` takes precedence over the configured level. Destinations follow
/// [`LogTargets::resolve`]; a silent run installs no subscriber at all.
///
/// The returned guard flushes the file writer and must be held until exit.
///
/// Note: This function can only be called once.
pub fn init_tracing(cfg: &LoggingConfig, interactive: bool) -> Option<WorkerGuard> {
    let targets = LogTargets::resolve(cfg, interactive);
    if targets.is_silent() {
        return None;
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cfg.level));
    let json = cfg.format == "json";

    let (file_layer, guard) = match &targets.file {
        Some(path) => {
            let directory = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let file_name = path
                .file_name()
                .map(|n| n.to_os_string())
                .unwrap_or_else(|| "flat-prices.log".into());

            let appender = tracing_appender::rolling::never(directory, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (Some(fmt_layer(writer, json, false)), Some(guard))
        }
        None => (None, None),
    };
    let stderr_layer = targets
        .stderr
        .then(|| fmt_layer(std::io::stderr, json, true));

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .init();
    guard
}

fn fmt_layer<S, W>(writer: W, json: bool, ansi: bool) -> Box<dyn Layer<S> + Send + Sync>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    if json {
        fmt::layer()
            .json()
            .with_target(true)
            .with_writer(writer)
            .boxed()
    } else {
        fmt::layer()
            .with_target(true)
            .with_ansi(ansi)
            .with_writer(writer)
            .boxed()
    }
}
