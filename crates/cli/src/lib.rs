// crates/cli/src/lib.rs
#![allow(clippy::multiple_crate_versions)]

pub mod args;
pub mod config;
pub mod error;
pub mod filesystem;
pub mod options;
pub mod parsers;
pub mod presentation;

use crate::config::Settings;
use crate::error::Result;
use crate::filesystem::{WalkOptions, collect_files};
use devtodo_engine::registry::ExtensionOverrides;
use std::fs::File;
use std::io::{self, BufWriter, Write};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Walk, scan and print according to `settings`.
///
/// # Errors
///
/// Call-level failures only; skipped files are reported on stderr.
pub fn execute(settings: &Settings) -> Result<()> {
    let overrides = ExtensionOverrides::new(&settings.engine.map_ext)?;
    let files = collect_files(
        &WalkOptions {
            roots: &settings.paths,
            base: &settings.engine.repository_root,
            exclude: &settings.exclude,
            hidden: settings.hidden,
        },
        &overrides,
    )?;

    let report = devtodo_engine::run(&settings.engine, &files)?;

    match &settings.output {
        Some(path) => {
            let mut out = BufWriter::new(File::create(path)?);
            presentation::render(&report, settings.format, &mut out)?;
        }
        None => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            presentation::render(&report, settings.format, &mut out)?;
        }
    }

    let mut err = io::stderr().lock();
    presentation::write_skipped(&report, &mut err)?;
    err.flush()?;
    Ok(())
}
