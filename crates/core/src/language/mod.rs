// crates/core/src/language/mod.rs
//! 言語レジストリ
//!
//! Every language the scanner understands is a variant of [`Language`]. The
//! enumeration order is significant: file-type resolution walks languages in
//! this order and the last matching candidate wins.

pub mod comment_style;
pub mod file_types;

pub use comment_style::{BlockSyntax, LanguageProfile, LineSyntax};
pub use file_types::{file_extension, resolve_uncached as resolve_language};

use crate::error::ScanError;
use alloc::string::ToString;

macro_rules! languages {
    ($($variant:ident => $id:literal),+ $(,)?) => {
        /// Supported language identifiers.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum Language {
            $($variant,)+
        }

        impl Language {
            /// All languages in registry order.
            pub const ALL: &'static [Self] = &[$(Self::$variant,)+];

            /// Lower-case identifier (`"cpp"`, `"shellscript"`, ...).
            #[must_use]
            pub const fn id(self) -> &'static str {
                match self {
                    $(Self::$variant => $id,)+
                }
            }
        }
    };
}

languages! {
    Ada => "ada",
    Apl => "apl",
    AppleScript => "applescript",
    Bat => "bat",
    Bibtex => "bibtex",
    C => "c",
    Clojure => "clojure",
    CoffeeScript => "coffeescript",
    Cpp => "cpp",
    CSharp => "csharp",
    Css => "css",
    Cuda => "cuda",
    Dart => "dart",
    Dockerfile => "dockerfile",
    DwScript => "dwscript",
    FSharp => "fsharp",
    Go => "go",
    Groovy => "groovy",
    Handlebars => "handlebars",
    Haskell => "haskell",
    Hlsl => "hlsl",
    Html => "html",
    Ignore => "ignore",
    Ini => "ini",
    Isml => "isml",
    Jade => "jade",
    Java => "java",
    JavaScript => "javascript",
    JavaScriptReact => "javascriptreact",
    Jsonc => "jsonc",
    Julia => "julia",
    Jupyter => "jupyter",
    Latex => "latex",
    Less => "less",
    Lua => "lua",
    Makefile => "makefile",
    Markdown => "markdown",
    Matlab => "matlab",
    ObjectiveC => "objectivec",
    OCaml => "ocaml",
    Pascal => "pascal",
    Perl => "perl",
    Perl6 => "perl6",
    Php => "php",
    PowerShell => "powershell",
    Properties => "properties",
    Python => "python",
    R => "r",
    Razor => "razor",
    Ruby => "ruby",
    Rust => "rust",
    Sass => "sass",
    ShaderLab => "shaderlab",
    ShellScript => "shellscript",
    Sql => "sql",
    Swift => "swift",
    TypeScript => "typescript",
    Vb => "vb",
    Vue => "vue",
    Xml => "xml",
    Xsl => "xsl",
    Yaml => "yaml",
}

impl Language {
    /// Parse an identifier, ignoring ASCII case.
    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        let id = id.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|lang| lang.id().eq_ignore_ascii_case(id))
    }

    /// Comment syntax of this language.
    #[must_use]
    pub fn profile(self) -> &'static LanguageProfile {
        comment_style::profile_of(self)
    }

    /// File extensions and exact file names associated with this language.
    #[must_use]
    pub fn extensions(self) -> &'static [&'static str] {
        file_types::extensions_of(self)
    }
}

impl core::fmt::Display for Language {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.id())
    }
}

impl core::str::FromStr for Language {
    type Err = ScanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_id(s).ok_or_else(|| ScanError::UnsupportedLanguage(s.to_string()))
    }
}

/// Look up the profile for a language identifier.
///
/// # Errors
///
/// Returns [`ScanError::UnsupportedLanguage`] when `id` names no known language.
pub fn get_profile(id: &str) -> Result<&'static LanguageProfile, ScanError> {
    id.parse::<Language>().map(Language::profile)
}
