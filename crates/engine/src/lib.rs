// crates/engine/src/lib.rs
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

pub mod attribution;
pub mod config;
pub mod error;
pub mod matcher;
pub mod path_security;
pub mod processor;
pub mod registry;
pub mod results;

pub use devtodo_core::{Language, LineResolution, ScanOptions};
pub use registry::resolve_language;

use crate::config::{Config, ConfigBuilder};
use crate::error::{EngineError, Result};
use crate::processor::ScanContext;
use crate::results::{ResultSet, ScanReport, SkippedFile};

/// Shared cancellation signal, checked before each file.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Scan `files` and aggregate their annotations.
///
/// Per-file failures are logged and collected in [`ScanReport::skipped`].
///
/// # Errors
///
/// Returns an error only for call-level failures: an invalid keyword set or
/// repository root, a bad extension map, or a thread pool that cannot be built.
pub fn run(config: &Config, files: &[PathBuf]) -> Result<ScanReport> {
    run_with(config, files, &CancelFlag::new())
}

/// [`run`] with an external cancellation flag.
///
/// # Errors
///
/// See [`run`].
pub fn run_with(config: &Config, files: &[PathBuf], cancel: &CancelFlag) -> Result<ScanReport> {
    let ctx = ScanContext::new(config)?;
    run_in_context(&ctx, files, cancel)
}

/// Run over an already prepared context (custom attributors, tests).
///
/// # Errors
///
/// [`EngineError::ThreadPool`] when the worker pool cannot be built.
pub fn run_in_context(
    ctx: &ScanContext<'_>,
    files: &[PathBuf],
    cancel: &CancelFlag,
) -> Result<ScanReport> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(ctx.config.jobs)
        .build()?;

    let outcomes: Vec<Option<Result<ResultSet>>> = pool.install(|| {
        files
            .par_iter()
            .map(|path| {
                if cancel.is_cancelled() {
                    return None;
                }
                Some(ctx.process_file(path))
            })
            .collect()
    });

    let mut report = ScanReport::default();
    for (path, outcome) in files.iter().zip(outcomes) {
        match outcome {
            None => report.cancelled = true,
            Some(Ok(partial)) => {
                report.files_scanned += 1;
                report.results.merge(partial);
            }
            Some(Err(e)) => {
                log::warn!("skipping {}: {e}", path.display());
                report.skipped.push(SkippedFile::new(path.clone(), &e));
            }
        }
    }
    if report.cancelled {
        log::info!("scan cancelled after {} file(s)", report.files_scanned);
    }
    Ok(report)
}

/// Convenience entry point with default settings and attribution enabled.
///
/// # Errors
///
/// See [`run`].
pub fn compute_annotations<S: AsRef<str>>(
    files: &[PathBuf],
    keywords: &[S],
    repository_root: &Path,
) -> Result<ScanReport> {
    let config = ConfigBuilder::default()
        .repository_root(repository_root)
        .keywords(
            keywords
                .iter()
                .map(|k| k.as_ref().to_string())
                .collect::<Vec<_>>(),
        )
        .build()
        .map_err(|e| EngineError::Config(e.to_string()))?;
    run(&config, files)
}
