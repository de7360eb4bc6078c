// crates/core/src/cleaner.rs
//! コメント本文の抽出と行番号の決定
//!
//! Turns a [`CommentTree`] into [`CommentRecord`]s: one per line comment and
//! one per text-bearing line inside a top-level block comment.

use crate::scanner::{CommentTree, Node, Token, TokenKind};
use alloc::string::{String, ToString};
use alloc::vec::Vec;

/// Cleaned text of one comment line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentRecord {
    pub content: String,
    /// 1-based line.
    pub line: usize,
}

/// How a record's line number is determined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum LineResolution {
    /// Line carried by the token that produced the record.
    #[default]
    Tracked,
    /// First run of source lines containing the content, searched from the top.
    Rescan,
}

/// Extract comment records in source order.
#[must_use]
pub fn clean(tree: &CommentTree<'_>, resolution: LineResolution) -> Vec<CommentRecord> {
    let mut records = Vec::new();
    for node in tree.nodes() {
        match node {
            Node::Leaf(tok) if matches!(tok.kind, TokenKind::LineComment { .. }) => {
                if let Some(rec) = record(tree, tok, tok.body(), false, resolution) {
                    records.push(rec);
                }
            }
            Node::Leaf(_) => {}
            Node::Block(id) => {
                for inner in &tree.block(*id).nodes {
                    if let Node::Leaf(tok) = inner
                        && tok.kind == TokenKind::Text
                        && let Some(rec) = record(tree, tok, tok.text, true, resolution)
                    {
                        records.push(rec);
                    }
                }
            }
        }
    }
    records
}

fn record(
    tree: &CommentTree<'_>,
    tok: &Token<'_>,
    body: &str,
    is_block: bool,
    resolution: LineResolution,
) -> Option<CommentRecord> {
    if tok.text.trim().chars().count() <= 1 {
        return None;
    }
    let (stripped, content) = clean_text(body);
    if content.is_empty() {
        return None;
    }
    let tracked = tok.line + stripped.matches('\n').count();
    let line = match resolution {
        LineResolution::Tracked => tracked,
        LineResolution::Rescan => locate_line(tree.source(), content, is_block).unwrap_or(tracked),
    };
    Some(CommentRecord {
        content: content.to_string(),
        line,
    })
}

/// Split off the leading run of characters that are not alphanumeric, `:`,
/// `,` or `@`, and trim what remains. Returns `(stripped, cleaned)`.
#[must_use]
pub fn clean_text(body: &str) -> (&str, &str) {
    let start = body
        .char_indices()
        .find(|&(_, c)| c.is_alphanumeric() || matches!(c, ':' | ',' | '@'))
        .map_or(body.len(), |(idx, _)| idx);
    (&body[..start], body[start..].trim())
}

/// Find the line on which `content` occurs in `input`.
///
/// Block content is matched piecewise against consecutive lines; the line on
/// which the last piece matches is returned.
#[must_use]
pub fn locate_line(input: &str, content: &str, is_block: bool) -> Option<usize> {
    let pieces: Vec<&str> = if is_block {
        content.lines().collect()
    } else {
        alloc::vec![content]
    };
    if pieces.is_empty() {
        return None;
    }
    let lines: Vec<&str> = input.lines().collect();
    (0..lines.len()).find_map(|start| {
        let window = lines.get(start..start + pieces.len())?;
        window
            .iter()
            .zip(&pieces)
            .all(|(line, piece)| line.contains(piece))
            .then_some(start + pieces.len())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::Language;
    use crate::scanner::{ScanOptions, scan};

    fn records(lang: Language, src: &str, resolution: LineResolution) -> Vec<(String, usize)> {
        let tree = scan(src, lang.profile(), ScanOptions::default()).unwrap();
        clean(&tree, resolution)
            .into_iter()
            .map(|r| (r.content, r.line))
            .collect()
    }

    #[test]
    fn test_clean_text() {
        assert_eq!(clean_text("  ** TODO: x  "), ("  ** ", "TODO: x"));
        assert_eq!(clean_text("@param a"), ("", "@param a"));
        assert_eq!(clean_text("---"), ("---", ""));
    }

    #[test]
    fn test_line_and_block_records() {
        let src = "// TODO: a\nint x; /* skip */\n/*\n * FIXME update docs\n */\n";
        assert_eq!(
            records(Language::C, src, LineResolution::Tracked),
            [
                ("TODO: a".to_string(), 1),
                ("skip".to_string(), 2),
                ("FIXME update docs".to_string(), 4),
            ]
        );
    }

    #[test]
    fn test_short_comments_are_dropped() {
        assert!(records(Language::Python, "#\n#!\n# -\n", LineResolution::Tracked).is_empty());
    }

    #[test]
    fn test_rescan_finds_first_occurrence() {
        let src = "x = 'TODO: dup'\n# TODO: dup\n";
        assert_eq!(
            records(Language::Python, src, LineResolution::Rescan),
            [("TODO: dup".to_string(), 1)]
        );
        assert_eq!(
            records(Language::Python, src, LineResolution::Tracked),
            [("TODO: dup".to_string(), 2)]
        );
    }

    #[test]
    fn test_locate_line_multi_piece() {
        let input = "a\nfoo\nbar\nfoo\n";
        assert_eq!(locate_line(input, "foo\nbar", true), Some(3));
        assert_eq!(locate_line(input, "bar", false), Some(3));
        assert_eq!(locate_line(input, "zzz", false), None);
    }

    #[test]
    fn test_nested_block_interior_is_ignored() {
        let src = "(* outer (* inner *) tail *)\n";
        assert_eq!(
            records(Language::OCaml, src, LineResolution::Tracked),
            [("outer".to_string(), 1), ("tail".to_string(), 1)]
        );
    }
}
