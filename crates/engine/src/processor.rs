// crates/engine/src/processor.rs
use crate::attribution::{Attributor, GitAttributor, NoAttribution};
use crate::config::Config;
use crate::error::{EngineError, Result};
use crate::matcher::AnnotationMatcher;
use crate::path_security::relative_to_root;
use crate::registry::ExtensionOverrides;
use crate::results::{Annotation, ResultSet};
use devtodo_core::find_comments;
use std::path::{Path, PathBuf};

/// Leading bytes inspected for NUL when deciding whether a file is binary.
const BINARY_SNIFF_LEN: usize = 8192;

/// Everything shared by the per-file workers of one run.
pub struct ScanContext<'c> {
    pub config: &'c Config,
    pub matcher: AnnotationMatcher,
    pub attributor: Box<dyn Attributor>,
    pub root: PathBuf,
    pub overrides: ExtensionOverrides,
}

impl<'c> ScanContext<'c> {
    /// Validate `config` and prepare a context.
    ///
    /// # Errors
    ///
    /// [`EngineError::InvalidInput`] for a bad keyword set or repository root,
    /// [`EngineError::Config`] for an invalid extension map.
    pub fn new(config: &'c Config) -> Result<Self> {
        let root = config.repository_root.canonicalize().map_err(|e| {
            EngineError::InvalidInput(format!(
                "repository root '{}': {e}",
                config.repository_root.display()
            ))
        })?;
        if !root.is_dir() {
            return Err(EngineError::InvalidInput(format!(
                "repository root '{}' is not a directory",
                root.display()
            )));
        }
        let attributor: Box<dyn Attributor> = if config.attribution {
            Box::new(GitAttributor::new(&root, config.attribution_timeout))
        } else {
            Box::new(NoAttribution)
        };
        Ok(Self {
            config,
            matcher: AnnotationMatcher::new(&config.keywords)?,
            attributor,
            root,
            overrides: ExtensionOverrides::new(&config.map_ext)?,
        })
    }

    #[must_use]
    pub fn with_attributor(mut self, attributor: Box<dyn Attributor>) -> Self {
        self.attributor = attributor;
        self
    }

    /// Scan one file into a private partial result.
    ///
    /// # Errors
    ///
    /// Any per-file failure: confinement, language resolution, I/O, binary
    /// content, or a scan error.
    pub fn process_file(&self, path: &Path) -> Result<ResultSet> {
        let (canonical, relative) = relative_to_root(path, &self.root)?;
        let language = self
            .overrides
            .resolve(&relative)
            .ok_or_else(|| EngineError::UnsupportedLanguage(relative.clone()))?;

        let bytes = std::fs::read(&canonical).map_err(|source| EngineError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        if bytes[..bytes.len().min(BINARY_SNIFF_LEN)].contains(&0) {
            return Err(EngineError::InvalidInput(format!("'{relative}' is not a text file")));
        }
        let text = String::from_utf8_lossy(&bytes);

        let records = find_comments(
            &text,
            language.profile(),
            self.config.scan,
            self.config.line_resolution,
        )?;

        let mut partial = ResultSet::new();
        for record in records {
            let Some((keyword, message)) = self.matcher.match_content(&record.content) else {
                continue;
            };
            let author = self.attributor.author(Path::new(&relative), record.line);
            partial.record(Annotation {
                keyword,
                message,
                file: relative.clone(),
                line: record.line,
                author,
            });
        }
        log::debug!("{relative}: {} annotation(s) as {language}", partial.total());
        Ok(partial)
    }
}
