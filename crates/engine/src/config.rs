// crates/engine/src/config.rs
use devtodo_core::{LineResolution, ScanOptions};
use derive_builder::Builder;
use std::path::PathBuf;
use std::time::Duration;

/// Keywords searched for when none are configured.
pub const DEFAULT_KEYWORDS: &[&str] = &["TODO", "FIXME"];

/// Default bound on each attribution process.
pub const DEFAULT_ATTRIBUTION_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Builder)]
#[builder(setter(into))]
pub struct Config {
    /// Directory that relative paths and attribution queries are anchored to.
    #[builder(default = "PathBuf::from(\".\")")]
    pub repository_root: PathBuf,
    #[builder(default = "default_keywords()")]
    pub keywords: Vec<String>,
    /// Worker threads; `0` lets rayon decide.
    #[builder(default = "num_cpus::get()")]
    pub jobs: usize,
    #[builder(default)]
    pub scan: ScanOptions,
    #[builder(default)]
    pub line_resolution: LineResolution,
    /// Extension (without dot) to language id, consulted before the file-type table.
    #[builder(default)]
    pub map_ext: hashbrown::HashMap<String, String>,
    #[builder(default = "true")]
    pub attribution: bool,
    #[builder(default = "DEFAULT_ATTRIBUTION_TIMEOUT")]
    pub attribution_timeout: Duration,
}

fn default_keywords() -> Vec<String> {
    DEFAULT_KEYWORDS.iter().map(ToString::to_string).collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            repository_root: PathBuf::from("."),
            keywords: default_keywords(),
            jobs: num_cpus::get(),
            scan: ScanOptions::default(),
            line_resolution: LineResolution::default(),
            map_ext: hashbrown::HashMap::new(),
            attribution: true,
            attribution_timeout: DEFAULT_ATTRIBUTION_TIMEOUT,
        }
    }
}
