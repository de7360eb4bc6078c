// crates/cli/src/config.rs
//! 設定の解決
//!
//! 優先順位: コマンドライン (環境変数を含む) > 設定ファイル > 既定値

use crate::args::Args;
use crate::error::{AppError, Result};
use crate::options::OutputFormat;
pub use devtodo_engine::config::{Config, ConfigBuilder};
use devtodo_engine::ScanOptions;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Name of the per-repository configuration file.
pub const CONFIG_FILE_NAME: &str = ".devtodo.yml";

/// `.devtodo.yml` の内容
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub keywords: Option<Vec<String>>,
    pub exclude: Vec<String>,
    pub map_ext: hashbrown::HashMap<String, String>,
    pub blame: Option<bool>,
    pub blame_timeout_secs: Option<u64>,
    pub jobs: Option<usize>,
}

impl FileConfig {
    /// Read and parse a YAML configuration file.
    ///
    /// # Errors
    ///
    /// I/O failure or malformed YAML.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        let parsed = serde_yaml::from_str(&text)?;
        log::debug!("loaded configuration from {}", path.display());
        Ok(parsed)
    }

    /// Explicit `--config`, else `<root>/.devtodo.yml` when present.
    ///
    /// # Errors
    ///
    /// See [`FileConfig::load`]. A missing explicit file is an error.
    pub fn discover(explicit: Option<&Path>, root: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let implicit = root.join(CONFIG_FILE_NAME);
        if implicit.is_file() {
            Self::load(&implicit)
        } else {
            Ok(Self::default())
        }
    }
}

/// 実行に必要な設定一式
#[derive(Debug, Clone)]
pub struct Settings {
    pub engine: Config,
    pub paths: Vec<PathBuf>,
    pub exclude: Vec<String>,
    pub hidden: bool,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
}

impl Settings {
    /// Merge parsed arguments over the configuration file.
    ///
    /// # Errors
    ///
    /// Unreadable configuration or invalid merged values.
    pub fn resolve(args: Args) -> Result<Self> {
        let root = args.scan.root.clone().unwrap_or_else(|| PathBuf::from("."));
        let file = FileConfig::discover(args.config.as_deref(), &root)?;
        Self::merge(args, file, root)
    }

    fn merge(args: Args, file: FileConfig, root: PathBuf) -> Result<Self> {
        let keywords = if args.annotation.keywords.is_empty() {
            file.keywords.unwrap_or_default()
        } else {
            args.annotation.keywords
        };

        let mut map_ext = file.map_ext;
        map_ext.extend(args.scan.map_ext);

        let mut exclude = file.exclude;
        exclude.extend(args.scan.exclude);

        let timeout_secs = args.annotation.blame_timeout.or(file.blame_timeout_secs);
        if timeout_secs == Some(0) {
            return Err(AppError::Config("blame_timeout_secs must be positive".into()));
        }
        let jobs = args.scan.jobs.or(file.jobs);
        if jobs == Some(0) {
            return Err(AppError::Config("jobs must be positive".into()));
        }

        let mut builder = ConfigBuilder::default();
        builder
            .repository_root(root.clone())
            .scan(ScanOptions {
                scan_blocks: !args.annotation.no_block_comments,
                scan_lines: !args.annotation.no_line_comments,
            })
            .line_resolution(args.annotation.line_mode)
            .map_ext(map_ext)
            .attribution(!args.annotation.no_blame && file.blame.unwrap_or(true));
        if !keywords.is_empty() {
            builder.keywords(keywords);
        }
        if let Some(secs) = timeout_secs {
            builder.attribution_timeout(Duration::from_secs(secs));
        }
        if let Some(jobs) = jobs {
            builder.jobs(jobs);
        }
        let engine = builder
            .build()
            .map_err(|e| AppError::Config(e.to_string()))?;

        let paths = if args.paths.is_empty() {
            vec![root]
        } else {
            args.paths
        };

        Ok(Self {
            engine,
            paths,
            exclude,
            hidden: args.scan.hidden,
            format: args.output.format,
            output: args.output.output,
        })
    }
}
