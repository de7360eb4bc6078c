// crates/core/src/language/comment_style.rs
//! コメント構文の定義
//!
//! A [`LanguageProfile`] describes the literal delimiters of one language's
//! comments. Profiles are `'static` and never change at runtime.

use super::Language;

/// 行コメントの構文
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineSyntax {
    /// Prefixes that start a line comment, tried in order.
    pub prefixes: &'static [&'static str],
    /// Sequences that end a line comment before the line break (PHP `?>`).
    pub terminators: &'static [&'static str],
}

/// ブロックコメントの構文
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockSyntax {
    pub open: &'static str,
    pub close: &'static str,
    /// The open delimiter does not count when immediately followed by one of these.
    pub open_not_followed_by: &'static [&'static str],
}

/// 言語ごとのコメント構文プロファイル
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageProfile {
    pub language: Language,
    pub line: Option<LineSyntax>,
    pub block: Option<BlockSyntax>,
}

impl LanguageProfile {
    /// Block open and close are the same text (`"""`, `###`).
    #[must_use]
    pub fn is_triple_quote_style(&self) -> bool {
        self.block.is_some_and(|b| b.open == b.close)
    }

    /// Length of the line-comment prefix at the start of `rest`, if any.
    #[must_use]
    pub fn match_line_comment(&self, rest: &str) -> Option<usize> {
        let line = self.line?;
        line.prefixes
            .iter()
            .find(|p| rest.starts_with(**p))
            .map(|p| p.len())
    }

    /// Length of the block opener at the start of `rest`, if any.
    #[must_use]
    pub fn match_block_open(&self, rest: &str) -> Option<usize> {
        let block = self.block?;
        let after = rest.strip_prefix(block.open)?;
        if block
            .open_not_followed_by
            .iter()
            .any(|guard| after.starts_with(*guard))
        {
            return None;
        }
        Some(block.open.len())
    }

    /// Length of the block closer at the start of `rest`, if any.
    #[must_use]
    pub fn match_block_close(&self, rest: &str) -> Option<usize> {
        let block = self.block?;
        rest.starts_with(block.close).then_some(block.close.len())
    }

    /// Offset of the earliest line terminator in `body`, if the syntax has any.
    #[must_use]
    pub fn find_line_terminator(&self, body: &str) -> Option<usize> {
        self.line?
            .terminators
            .iter()
            .filter_map(|t| body.find(*t))
            .min()
    }

    /// Whether `c` begins one of the line-comment prefixes.
    #[must_use]
    pub fn starts_line_prefix(&self, c: char) -> bool {
        self.line
            .is_some_and(|l| l.prefixes.iter().any(|p| p.starts_with(c)))
    }
}

const fn line(prefixes: &'static [&'static str]) -> Option<LineSyntax> {
    Some(LineSyntax {
        prefixes,
        terminators: &[],
    })
}

const fn block(open: &'static str, close: &'static str) -> Option<BlockSyntax> {
    Some(BlockSyntax {
        open,
        close,
        open_not_followed_by: &[],
    })
}

const SLASH: Option<LineSyntax> = line(&["//"]);
const HASH: Option<LineSyntax> = line(&["#"]);
const DASH: Option<LineSyntax> = line(&["--"]);
const PERCENT: Option<LineSyntax> = line(&["%"]);
const C_BLOCK: Option<BlockSyntax> = block("/*", "*/");
const ML_BLOCK: Option<BlockSyntax> = block("(*", "*)");
const MARKUP_BLOCK: Option<BlockSyntax> = Some(BlockSyntax {
    open: "<!--",
    close: "-->",
    open_not_followed_by: &[">", "->"],
});

macro_rules! profile {
    ($lang:ident, $line:expr, $block:expr) => {
        LanguageProfile {
            language: Language::$lang,
            line: $line,
            block: $block,
        }
    };
}

static PROFILES: &[LanguageProfile] = &[
    profile!(Ada, DASH, None),
    profile!(Apl, line(&["⍝"]), None),
    profile!(AppleScript, DASH, ML_BLOCK),
    profile!(Bat, line(&["REM ", "rem ", "::"]), None),
    profile!(Bibtex, PERCENT, None),
    profile!(C, SLASH, C_BLOCK),
    profile!(Clojure, line(&[";"]), None),
    profile!(CoffeeScript, HASH, block("###", "###")),
    profile!(Cpp, SLASH, C_BLOCK),
    profile!(CSharp, SLASH, C_BLOCK),
    profile!(Css, None, C_BLOCK),
    profile!(Cuda, SLASH, C_BLOCK),
    profile!(Dart, SLASH, C_BLOCK),
    profile!(Dockerfile, HASH, None),
    profile!(DwScript, SLASH, C_BLOCK),
    profile!(FSharp, SLASH, ML_BLOCK),
    profile!(Go, SLASH, C_BLOCK),
    profile!(Groovy, SLASH, C_BLOCK),
    profile!(Handlebars, SLASH, block("{{!", "}}")),
    profile!(Haskell, DASH, block("{-", "-}")),
    profile!(Hlsl, SLASH, C_BLOCK),
    profile!(Html, None, MARKUP_BLOCK),
    profile!(Ignore, HASH, None),
    profile!(Ini, line(&[";", "#"]), None),
    profile!(Isml, None, block("<iscomment>", "</iscomment>")),
    profile!(Jade, SLASH, MARKUP_BLOCK),
    profile!(Java, SLASH, C_BLOCK),
    profile!(JavaScript, SLASH, C_BLOCK),
    profile!(JavaScriptReact, SLASH, C_BLOCK),
    profile!(Jsonc, SLASH, C_BLOCK),
    profile!(Julia, HASH, block("#=", "=#")),
    profile!(Jupyter, HASH, None),
    profile!(Latex, PERCENT, None),
    profile!(Less, SLASH, C_BLOCK),
    profile!(Lua, DASH, block("--[[", "]]")),
    profile!(Makefile, HASH, None),
    profile!(Markdown, None, MARKUP_BLOCK),
    profile!(Matlab, PERCENT, block("%{", "%}")),
    profile!(ObjectiveC, SLASH, C_BLOCK),
    profile!(OCaml, None, ML_BLOCK),
    profile!(Pascal, SLASH, ML_BLOCK),
    profile!(Perl, HASH, block("=begin", "=end")),
    profile!(Perl6, HASH, block("=begin", "=end")),
    profile!(
        Php,
        Some(LineSyntax {
            prefixes: &["#", "//"],
            terminators: &["?>"],
        }),
        C_BLOCK
    ),
    profile!(PowerShell, HASH, block("<#", "#>")),
    profile!(Properties, HASH, None),
    profile!(Python, HASH, block("\"\"\"", "\"\"\"")),
    profile!(R, HASH, None),
    profile!(Razor, SLASH, C_BLOCK),
    profile!(Ruby, HASH, block("=begin", "=end")),
    profile!(Rust, SLASH, C_BLOCK),
    profile!(Sass, SLASH, C_BLOCK),
    profile!(ShaderLab, SLASH, C_BLOCK),
    profile!(ShellScript, HASH, None),
    profile!(Sql, DASH, C_BLOCK),
    profile!(Swift, SLASH, C_BLOCK),
    profile!(TypeScript, SLASH, C_BLOCK),
    profile!(Vb, line(&["'", "REM "]), None),
    profile!(Vue, SLASH, MARKUP_BLOCK),
    profile!(Xml, None, MARKUP_BLOCK),
    profile!(Xsl, None, block("<xsl:comment>", "</xsl:comment>")),
    profile!(Yaml, HASH, None),
];

/// `PROFILES` is laid out in `Language::ALL` order.
pub(super) fn profile_of(language: Language) -> &'static LanguageProfile {
    &PROFILES[language as usize]
}
