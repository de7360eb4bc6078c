// crates/engine/src/path_security.rs
//! パスの閉じ込め
//!
//! Every file the engine reads and every path handed to git must stay inside
//! the repository root.
//!
//! # Threats
//!
//! - **Path traversal**: `..` components escaping the root
//! - **Symlinks**: links resolving outside the root
//! - **Option injection**: names starting with `-` reaching a command line

use crate::error::{EngineError, Result};
use std::path::{Component, Path, PathBuf};

/// Deepest path accepted, counted in normal components.
pub const MAX_PATH_DEPTH: usize = 256;

/// Rules a path must satisfy before it is used.
///
/// Symlinks are followed; their targets are confined like any other path.
#[derive(Debug, Clone, Default)]
pub struct PathPolicy {
    /// Canonical directory the resolved path must lie under.
    pub root: Option<PathBuf>,
}

impl PathPolicy {
    /// Confine paths to `root` (canonicalized on construction).
    ///
    /// # Errors
    ///
    /// [`EngineError::InvalidInput`] when `root` cannot be resolved.
    pub fn within(root: &Path) -> Result<Self> {
        let root = root.canonicalize().map_err(|e| {
            EngineError::InvalidInput(format!("root '{}': {e}", root.display()))
        })?;
        Ok(Self { root: Some(root) })
    }

    /// Resolve `path` and check it against the policy. Returns the canonical path.
    ///
    /// # Errors
    ///
    /// * [`EngineError::PermissionDenied`] for NUL bytes, excessive depth,
    ///   or `..` under a confining root.
    /// * [`EngineError::FileRead`] when the path cannot be resolved.
    /// * [`EngineError::OutsideRepository`] when it resolves outside the root.
    pub fn check(&self, path: &Path) -> Result<PathBuf> {
        if path.to_string_lossy().contains('\0') {
            return Err(EngineError::PermissionDenied("path contains null bytes".into()));
        }
        let depth = path
            .components()
            .filter(|c| matches!(c, Component::Normal(_)))
            .count();
        if depth > MAX_PATH_DEPTH {
            return Err(EngineError::PermissionDenied(format!(
                "path exceeds maximum depth of {MAX_PATH_DEPTH} (found {depth})"
            )));
        }
        if self.root.is_some() && path.components().any(|c| c == Component::ParentDir) {
            return Err(EngineError::PermissionDenied(
                "path traversal attempt detected (contains '..')".into(),
            ));
        }
        let canonical = path.canonicalize().map_err(|source| EngineError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        if let Some(root) = &self.root
            && !canonical.starts_with(root)
        {
            return Err(EngineError::OutsideRepository(path.to_path_buf()));
        }
        Ok(canonical)
    }
}

/// Lexical check, no filesystem access: `..` never climbs above the start.
#[must_use]
pub fn stays_inside(path: &Path) -> bool {
    if path.to_string_lossy().contains('\0') {
        return false;
    }
    let mut depth: isize = 0;
    for component in path.components() {
        match component {
            Component::ParentDir => {
                depth -= 1;
                if depth < 0 {
                    return false;
                }
            }
            Component::Normal(_) => depth += 1,
            _ => {}
        }
    }
    true
}

/// Canonicalize `path` and express it relative to `canonical_root` with `/`
/// separators.
///
/// # Errors
///
/// [`EngineError::FileRead`] when the path cannot be resolved,
/// [`EngineError::OutsideRepository`] when it lies outside the root.
pub fn relative_to_root(path: &Path, canonical_root: &Path) -> Result<(PathBuf, String)> {
    let canonical = path.canonicalize().map_err(|source| EngineError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let relative = canonical
        .strip_prefix(canonical_root)
        .map_err(|_| EngineError::OutsideRepository(path.to_path_buf()))?;
    let display = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");
    Ok((canonical, display))
}
