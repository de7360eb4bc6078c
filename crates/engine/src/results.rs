// crates/engine/src/results.rs
//! 集計結果
//!
//! `ResultSet` maps keyword → file → occurrences. All maps are ordered so
//! that serialisation is deterministic.

use crate::error::{EngineError, ErrorKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// A matched annotation ready to be recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    pub keyword: String,
    pub message: String,
    /// Path relative to the repository root, `/` separated.
    pub file: String,
    pub line: usize,
    pub author: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occurrence {
    #[serde(rename = "lineNo")]
    pub line: usize,
    pub message: String,
    pub author: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordEntry {
    pub total: usize,
    pub files: BTreeMap<String, Vec<Occurrence>>,
}

/// Annotations grouped by keyword, then by file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultSet {
    entries: BTreeMap<String, KeywordEntry>,
}

impl ResultSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, annotation: Annotation) {
        let entry = self.entries.entry(annotation.keyword).or_default();
        entry.total += 1;
        entry
            .files
            .entry(annotation.file)
            .or_default()
            .push(Occurrence {
                line: annotation.line,
                message: annotation.message,
                author: annotation.author,
            });
    }

    /// Fold `other` into `self`, appending occurrences per file.
    pub fn merge(&mut self, other: Self) {
        for (keyword, incoming) in other.entries {
            let entry = self.entries.entry(keyword).or_default();
            entry.total += incoming.total;
            for (file, occurrences) in incoming.files {
                entry.files.entry(file).or_default().extend(occurrences);
            }
        }
    }

    #[must_use]
    pub fn get(&self, keyword: &str) -> Option<&KeywordEntry> {
        self.entries.get(keyword)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &KeywordEntry)> {
        self.entries.iter()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of recorded occurrences across all keywords.
    #[must_use]
    pub fn total(&self) -> usize {
        self.entries.values().map(|e| e.total).sum()
    }

    /// Copy with every author cleared.
    #[must_use]
    pub fn without_authors(&self) -> Self {
        let mut copy = self.clone();
        for entry in copy.entries.values_mut() {
            for occ in entry.files.values_mut().flatten() {
                occ.author = None;
            }
        }
        copy
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = (&'a String, &'a KeywordEntry);
    type IntoIter = std::collections::btree_map::Iter<'a, String, KeywordEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// A file that contributed nothing, and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub kind: ErrorKind,
    pub reason: String,
}

impl SkippedFile {
    #[must_use]
    pub fn new(path: PathBuf, error: &EngineError) -> Self {
        Self {
            path,
            kind: error.kind(),
            reason: error.to_string(),
        }
    }
}

/// Outcome of a batch run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanReport {
    pub results: ResultSet,
    pub skipped: Vec<SkippedFile>,
    pub files_scanned: usize,
    pub cancelled: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ann(keyword: &str, file: &str, line: usize) -> Annotation {
        Annotation {
            keyword: keyword.into(),
            message: format!("msg {line}"),
            file: file.into(),
            line,
            author: None,
        }
    }

    #[test]
    fn test_first_occurrence_is_recorded() {
        let mut set = ResultSet::new();
        set.record(ann("TODO", "a.rs", 3));
        let entry = set.get("TODO").unwrap();
        assert_eq!(entry.total, 1);
        assert_eq!(entry.files["a.rs"].len(), 1);
    }

    #[test]
    fn test_total_matches_occurrences() {
        let mut set = ResultSet::new();
        set.record(ann("TODO", "a.rs", 1));
        set.record(ann("TODO", "a.rs", 2));
        set.record(ann("TODO", "b.rs", 1));
        set.record(ann("FIXME", "b.rs", 5));
        let todo = set.get("TODO").unwrap();
        assert_eq!(todo.total, todo.files.values().map(Vec::len).sum::<usize>());
        assert_eq!(todo.total, 3);
        assert_eq!(set.total(), 4);
    }

    #[test]
    fn test_merge_is_order_independent_for_disjoint_files() {
        let mut a = ResultSet::new();
        a.record(ann("TODO", "a.rs", 1));
        let mut b = ResultSet::new();
        b.record(ann("TODO", "b.rs", 2));
        b.record(ann("FIXME", "b.rs", 3));

        let mut ab = ResultSet::new();
        ab.merge(a.clone());
        ab.merge(b.clone());
        let mut ba = ResultSet::new();
        ba.merge(b);
        ba.merge(a);
        assert_eq!(ab, ba);
    }

    #[test]
    fn test_serialized_shape() {
        let mut set = ResultSet::new();
        set.record(Annotation {
            keyword: "TODO".into(),
            message: "fix bug".into(),
            file: "src/a.rs".into(),
            line: 7,
            author: Some("Jane".into()),
        });
        let json = serde_json::to_value(&set).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "TODO": {
                    "total": 1,
                    "files": {
                        "src/a.rs": [ { "lineNo": 7, "message": "fix bug", "author": "Jane" } ]
                    }
                }
            })
        );
    }

    #[test]
    fn test_without_authors_clears_only_authors() {
        let mut set = ResultSet::new();
        let mut first = ann("TODO", "a.rs", 1);
        first.author = Some("alice".into());
        set.record(first);
        set.record(ann("TODO", "a.rs", 2));

        let cleared = set.without_authors();
        assert_eq!(cleared.total(), 2);
        let occurrences = &cleared.get("TODO").unwrap().files["a.rs"];
        assert!(occurrences.iter().all(|o| o.author.is_none()));
        assert_eq!(set.get("TODO").unwrap().files["a.rs"][0].author.as_deref(), Some("alice"));
    }
}
