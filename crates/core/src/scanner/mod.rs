// crates/core/src/scanner/mod.rs
//! コメントスキャナ
//!
//! A single left-to-right pass over the source that classifies spans as text,
//! line breaks, line comments and block comments. Block comments become
//! containers in the resulting [`CommentTree`]; everything else is a leaf.

mod lexeme;
mod token;

pub use lexeme::is_ident_char;
pub use token::{Block, BlockId, CommentTree, Node, Token, TokenKind};

use crate::error::ScanError;
use crate::language::LanguageProfile;
use alloc::vec::Vec;

/// Deepest block nesting accepted before the scan is abandoned.
pub const MAX_BLOCK_DEPTH: usize = 64;

/// Which comment kinds to recognise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanOptions {
    pub scan_blocks: bool,
    pub scan_lines: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            scan_blocks: true,
            scan_lines: true,
        }
    }
}

/// Scan `source` with the comment syntax of `profile`.
///
/// # Errors
///
/// * [`ScanError::UnclosedBlockComment`] when input ends inside a block.
/// * [`ScanError::NestingTooDeep`] when blocks nest deeper than [`MAX_BLOCK_DEPTH`].
pub fn scan<'a>(
    source: &'a str,
    profile: &LanguageProfile,
    options: ScanOptions,
) -> Result<CommentTree<'a>, ScanError> {
    Scanner::new(source, profile, options).run()
}

struct Scanner<'a, 'p> {
    src: &'a str,
    profile: &'p LanguageProfile,
    options: ScanOptions,
    triple: bool,
    tree: CommentTree<'a>,
    stack: Vec<BlockId>,
    pos: usize,
    line: usize,
    prev_ends_in_word: bool,
}

impl<'a, 'p> Scanner<'a, 'p> {
    fn new(src: &'a str, profile: &'p LanguageProfile, options: ScanOptions) -> Self {
        Self {
            src,
            profile,
            options,
            triple: profile.is_triple_quote_style(),
            tree: CommentTree::new(src),
            stack: Vec::new(),
            pos: 0,
            line: 1,
            prev_ends_in_word: false,
        }
    }

    fn in_block(&self) -> bool {
        !self.stack.is_empty()
    }

    fn run(mut self) -> Result<CommentTree<'a>, ScanError> {
        while self.pos < self.src.len() {
            self.step()?;
        }
        if let Some(&innermost) = self.stack.last() {
            return Err(ScanError::UnclosedBlockComment {
                line: self.tree.block(innermost).line,
            });
        }
        Ok(self.tree)
    }

    fn step(&mut self) -> Result<(), ScanError> {
        let i = self.pos;
        let rest = &self.src[i..];

        if let Some(len) = lexeme::try_skip_escape(self.src, i) {
            self.leaf(TokenKind::Text, len);
            return Ok(());
        }

        if self.quote_allowed(rest)
            && let Some(len) = lexeme::try_skip_quoted_string(self.src, i)
        {
            self.leaf(TokenKind::Text, len);
            return Ok(());
        }

        if let Some(len) = lexeme::try_skip_newline(self.src, i) {
            self.leaf(TokenKind::Newline, len);
            return Ok(());
        }

        if self.options.scan_blocks
            && !(self.triple && self.in_block())
            && let Some(len) = self.profile.match_block_open(rest)
        {
            return self.open_block(len);
        }

        if self.options.scan_blocks
            && self.in_block()
            && let Some(len) = self.profile.match_block_close(rest)
        {
            self.leaf(TokenKind::BlockClose, len);
            self.stack.pop();
            return Ok(());
        }

        if self.options.scan_lines
            && !self.in_block()
            && let Some(prefix) = self.profile.match_line_comment(rest)
        {
            let body = &rest[prefix..];
            let mut len = lexeme::line_end(body);
            if let Some(term) = self.profile.find_line_terminator(&body[..len]) {
                len = term;
            }
            self.leaf(TokenKind::LineComment { prefix }, prefix + len);
            return Ok(());
        }

        let len = lexeme::try_skip_word_run(self.src, i)
            .unwrap_or_else(|| lexeme::char_len(self.src, i));
        self.leaf(TokenKind::Text, len);
        Ok(())
    }

    fn quote_allowed(&self, rest: &str) -> bool {
        let Some(first) = rest.chars().next() else {
            return false;
        };
        !self.in_block()
            && !self.prev_ends_in_word
            && !self.profile.starts_line_prefix(first)
            && !(self.triple && self.profile.match_block_open(rest).is_some())
    }

    fn open_block(&mut self, len: usize) -> Result<(), ScanError> {
        if self.stack.len() >= MAX_BLOCK_DEPTH {
            return Err(ScanError::NestingTooDeep {
                line: self.line,
                limit: MAX_BLOCK_DEPTH,
            });
        }
        let id = self.tree.new_block(self.line);
        self.tree.push(self.stack.last().copied(), Node::Block(id));
        self.stack.push(id);
        self.leaf(TokenKind::BlockOpen, len);
        Ok(())
    }

    fn leaf(&mut self, kind: TokenKind, len: usize) {
        let text = &self.src[self.pos..self.pos + len];
        let token = Token {
            kind,
            text,
            offset: self.pos,
            line: self.line,
        };
        self.tree.push(self.stack.last().copied(), Node::Leaf(token));
        self.pos += len;
        self.line += text.bytes().filter(|&b| b == b'\n').count();
        self.prev_ends_in_word = text.bytes().last().is_some_and(is_ident_char);
    }
}
