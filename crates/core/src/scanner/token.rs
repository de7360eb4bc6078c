// crates/core/src/scanner/token.rs
//! トークンとコメントツリー

use alloc::vec::Vec;

/// Classification of a scanned span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Text,
    Newline,
    /// A line comment; `prefix` is the byte length of its opening delimiter.
    LineComment { prefix: usize },
    BlockOpen,
    BlockClose,
}

/// A span of the scanned source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    /// Byte offset of `text` in the source.
    pub offset: usize,
    /// 1-based physical line on which the span starts.
    pub line: usize,
}

impl<'a> Token<'a> {
    /// Text of a line comment after its delimiter; the whole text otherwise.
    #[must_use]
    pub fn body(&self) -> &'a str {
        match self.kind {
            TokenKind::LineComment { prefix } => &self.text[prefix..],
            _ => self.text,
        }
    }

    #[must_use]
    pub fn end(&self) -> usize {
        self.offset + self.text.len()
    }
}

/// Index of a block in [`CommentTree`]'s arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockId(pub(crate) usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Node<'a> {
    Leaf(Token<'a>),
    Block(BlockId),
}

/// Interior of one block comment, opener and closer included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block<'a> {
    /// Line of the opening delimiter.
    pub line: usize,
    pub nodes: Vec<Node<'a>>,
}

/// Ordered scan result of one source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentTree<'a> {
    source: &'a str,
    root: Vec<Node<'a>>,
    blocks: Vec<Block<'a>>,
}

impl<'a> CommentTree<'a> {
    pub(crate) const fn new(source: &'a str) -> Self {
        Self {
            source,
            root: Vec::new(),
            blocks: Vec::new(),
        }
    }

    #[must_use]
    pub const fn source(&self) -> &'a str {
        self.source
    }

    /// Top-level nodes in source order.
    #[must_use]
    pub fn nodes(&self) -> &[Node<'a>] {
        &self.root
    }

    #[must_use]
    pub fn block(&self, id: BlockId) -> &Block<'a> {
        &self.blocks[id.0]
    }

    pub(crate) fn new_block(&mut self, line: usize) -> BlockId {
        self.blocks.push(Block {
            line,
            nodes: Vec::new(),
        });
        BlockId(self.blocks.len() - 1)
    }

    /// Append to the root (`None`) or to a block, merging adjacent text or
    /// newline leaves.
    pub(crate) fn push(&mut self, container: Option<BlockId>, node: Node<'a>) {
        let source = self.source;
        let nodes = match container {
            Some(id) => &mut self.blocks[id.0].nodes,
            None => &mut self.root,
        };
        if let (Node::Leaf(next), Some(Node::Leaf(prev))) = (node, nodes.last_mut())
            && prev.kind == next.kind
            && matches!(next.kind, TokenKind::Text | TokenKind::Newline)
            && prev.end() == next.offset
        {
            prev.text = &source[prev.offset..next.end()];
            return;
        }
        nodes.push(node);
    }

    /// Every comment token (line comments, block delimiters and block
    /// interiors), depth first.
    #[must_use]
    pub fn comment_tokens(&self) -> Vec<Token<'a>> {
        let mut out = Vec::new();
        for node in &self.root {
            match node {
                Node::Leaf(tok) if matches!(tok.kind, TokenKind::LineComment { .. }) => {
                    out.push(*tok);
                }
                Node::Leaf(_) => {}
                Node::Block(id) => self.collect_block(*id, &mut out),
            }
        }
        out
    }

    fn collect_block(&self, id: BlockId, out: &mut Vec<Token<'a>>) {
        for node in &self.blocks[id.0].nodes {
            match node {
                Node::Leaf(tok) => out.push(*tok),
                Node::Block(inner) => self.collect_block(*inner, out),
            }
        }
    }
}
