// crates/engine/src/error.rs
use devtodo_core::ScanError;
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unsupported language for '{0}'")]
    UnsupportedLanguage(String),

    #[error("Scan failed: {0}")]
    Scan(#[from] ScanError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("External tool unavailable: {0}")]
    ExternalToolUnavailable(String),

    #[error("Path '{0}' is outside the repository root")]
    OutsideRepository(PathBuf),

    #[error("Failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
}

/// Discriminant of [`EngineError`] used in reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    FileRead,
    UnsupportedLanguage,
    UnclosedBlockComment,
    NestingTooDeep,
    InvalidInput,
    PermissionDenied,
    ExternalToolUnavailable,
    OutsideRepository,
    ThreadPool,
    Config,
    Regex,
}

impl EngineError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::FileRead { .. } => ErrorKind::FileRead,
            Self::UnsupportedLanguage(_) | Self::Scan(ScanError::UnsupportedLanguage(_)) => {
                ErrorKind::UnsupportedLanguage
            }
            Self::Scan(ScanError::UnclosedBlockComment { .. }) => ErrorKind::UnclosedBlockComment,
            Self::Scan(ScanError::NestingTooDeep { .. }) => ErrorKind::NestingTooDeep,
            Self::InvalidInput(_) => ErrorKind::InvalidInput,
            Self::PermissionDenied(_) => ErrorKind::PermissionDenied,
            Self::ExternalToolUnavailable(_) => ErrorKind::ExternalToolUnavailable,
            Self::OutsideRepository(_) => ErrorKind::OutsideRepository,
            Self::ThreadPool(_) => ErrorKind::ThreadPool,
            Self::Config(_) => ErrorKind::Config,
            Self::Regex(_) => ErrorKind::Regex,
        }
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_errors_map_to_their_own_kind() {
        let err = EngineError::from(ScanError::UnclosedBlockComment { line: 4 });
        assert_eq!(err.kind(), ErrorKind::UnclosedBlockComment);
        assert_eq!(
            err.to_string(),
            "Scan failed: unclosed block comment opened on line 4"
        );
    }

    #[test]
    fn test_kind_serializes_snake_case() {
        let json = serde_json::to_string(&ErrorKind::ExternalToolUnavailable).unwrap();
        assert_eq!(json, "\"external_tool_unavailable\"");
    }
}
