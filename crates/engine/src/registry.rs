// crates/engine/src/registry.rs
//! ファイル種別の解決とメモ化
//!
//! Wraps the static file-type table with a process-wide memo keyed by
//! extension. Entries are only ever added.

use crate::error::{EngineError, Result};
use devtodo_core::language::{self, Language};
use std::sync::{LazyLock, PoisonError, RwLock};

/// Memoised extension → language lookups.
pub struct FileTypeTable {
    memo: RwLock<hashbrown::HashMap<String, Option<Language>>>,
}

impl FileTypeTable {
    #[must_use]
    pub fn new() -> Self {
        let mut seed = hashbrown::HashMap::new();
        seed.insert(".yml".to_string(), Some(Language::Yaml));
        Self {
            memo: RwLock::new(seed),
        }
    }

    /// Resolve `file_name`, consulting and filling the memo.
    pub fn resolve(&self, file_name: &str) -> Option<Language> {
        let ext = language::file_extension(file_name);
        if let Some(hit) = self
            .memo
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(ext)
        {
            return *hit;
        }
        let resolved = language::resolve_language(file_name);
        log::debug!("file type for '{ext}' resolved to {resolved:?}");
        self.memo
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(ext.to_string())
            .or_insert(resolved);
        resolved
    }

    /// Number of memoised extensions.
    pub fn cached(&self) -> usize {
        self.memo.read().unwrap_or_else(PoisonError::into_inner).len()
    }
}

impl Default for FileTypeTable {
    fn default() -> Self {
        Self::new()
    }
}

static TABLE: LazyLock<FileTypeTable> = LazyLock::new(FileTypeTable::new);

/// Resolve a file name to its language using the shared table.
pub fn resolve_language(file_name: &str) -> Option<Language> {
    TABLE.resolve(file_name)
}

/// User-supplied extension overrides (`tpl` → `html`).
#[derive(Debug, Clone, Default)]
pub struct ExtensionOverrides {
    map: hashbrown::HashMap<String, Language>,
}

impl ExtensionOverrides {
    /// Validate a raw `extension → language id` map.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Config`] when a language id is unknown.
    pub fn new(raw: &hashbrown::HashMap<String, String>) -> Result<Self> {
        let mut map = hashbrown::HashMap::with_capacity(raw.len());
        for (ext, id) in raw {
            let language = Language::from_id(id).ok_or_else(|| {
                EngineError::Config(format!("unknown language '{id}' mapped from '{ext}'"))
            })?;
            map.insert(ext.trim_start_matches('.').to_string(), language);
        }
        Ok(Self { map })
    }

    /// Override for the extension of `file_name`, if one is configured.
    #[must_use]
    pub fn lookup(&self, file_name: &str) -> Option<Language> {
        if self.map.is_empty() {
            return None;
        }
        let ext = language::file_extension(file_name);
        self.map.get(ext.trim_start_matches('.')).copied()
    }

    /// Overrides first, then the shared table.
    #[must_use]
    pub fn resolve(&self, file_name: &str) -> Option<Language> {
        self.lookup(file_name).or_else(|| resolve_language(file_name))
    }
}
