// crates/core/src/lib.rs
//! `devtodo` のコアライブラリ
//!
//! Pure text-in, records-out: language profiles, the comment scanner and the
//! comment cleaner. No I/O happens here.

#![no_std]
#![allow(clippy::cargo_common_metadata)]
#![allow(clippy::multiple_crate_versions)]

extern crate alloc;

pub mod cleaner;
pub mod error;
pub mod language;
pub mod scanner;

pub use cleaner::{CommentRecord, LineResolution, clean};
pub use error::ScanError;
pub use language::{Language, LanguageProfile, get_profile, resolve_language};
pub use scanner::{CommentTree, MAX_BLOCK_DEPTH, ScanOptions, scan};

use alloc::vec::Vec;

/// Scan `input` and return its cleaned comment records.
///
/// # Errors
///
/// Propagates [`ScanError`] from the scanner.
pub fn find_comments(
    input: &str,
    profile: &LanguageProfile,
    options: ScanOptions,
    resolution: LineResolution,
) -> Result<Vec<CommentRecord>, ScanError> {
    let tree = scan(input, profile, options)?;
    Ok(clean(&tree, resolution))
}
