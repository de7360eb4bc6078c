// crates/cli/src/filesystem.rs
use crate::error::Result;
use devtodo_engine::path_security::PathPolicy;
use devtodo_engine::registry::ExtensionOverrides;
use ignore::WalkBuilder;
use ignore::overrides::{Override, OverrideBuilder};
use std::path::{Path, PathBuf};

/// 走査オプション
#[derive(Debug, Clone)]
pub struct WalkOptions<'a> {
    pub roots: &'a [PathBuf],
    /// Base directory the exclude globs are relative to.
    pub base: &'a Path,
    pub exclude: &'a [String],
    pub hidden: bool,
}

/// Walk `roots` and collect every file whose language resolves.
///
/// `.gitignore` rules are honoured. Explicit file roots bypass the ignore
/// rules but still need a resolvable language. The result is sorted.
///
/// # Errors
///
/// A missing or unresolvable root, or an invalid exclude glob.
pub fn collect_files(options: &WalkOptions<'_>, overrides: &ExtensionOverrides) -> Result<Vec<PathBuf>> {
    let Some((first, rest)) = options.roots.split_first() else {
        return Ok(Vec::new());
    };

    let policy = PathPolicy::default();
    for root in options.roots {
        policy.check(root)?;
    }

    let mut builder = WalkBuilder::new(first);
    for root in rest {
        builder.add(root);
    }
    builder
        .hidden(!options.hidden)
        .git_ignore(true)
        .require_git(false)
        .overrides(exclude_overrides(options.base, options.exclude)?);

    let mut files = Vec::new();
    for entry in builder.build() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                log::warn!("walk: {e}");
                continue;
            }
        };
        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        if overrides.resolve(&name).is_some() {
            files.push(entry.into_path());
        } else {
            log::trace!("no language for {}", entry.path().display());
        }
    }
    files.sort();
    files.dedup();
    log::info!("collected {} file(s)", files.len());
    Ok(files)
}

/// `!glob` で除外パターンを登録する
fn exclude_overrides(base: &Path, exclude: &[String]) -> Result<Override> {
    let mut builder = OverrideBuilder::new(base);
    for glob in exclude {
        let glob = glob.trim();
        if glob.is_empty() {
            continue;
        }
        let negated = if glob.starts_with('!') {
            glob.to_string()
        } else {
            format!("!{glob}")
        };
        builder.add(&negated)?;
    }
    Ok(builder.build()?)
}
