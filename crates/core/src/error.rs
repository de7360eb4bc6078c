// crates/core/src/error.rs
//! スキャナのエラー型

use alloc::string::String;
use core::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanError {
    /// No profile is registered under this identifier.
    UnsupportedLanguage(String),
    /// Input ended inside a block comment opened on `line`.
    UnclosedBlockComment { line: usize },
    /// Block comments nested deeper than `limit`.
    NestingTooDeep { line: usize, limit: usize },
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedLanguage(id) => write!(f, "language \"{id}\" is not supported"),
            Self::UnclosedBlockComment { line } => {
                write!(f, "unclosed block comment opened on line {line}")
            }
            Self::NestingTooDeep { line, limit } => {
                write!(f, "block comments nested deeper than {limit} at line {line}")
            }
        }
    }
}

impl core::error::Error for ScanError {}
