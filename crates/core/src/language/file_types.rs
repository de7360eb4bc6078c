// crates/core/src/language/file_types.rs
//! 拡張子・ファイル名から言語への対応表

use super::Language;

/// Extension and exact-name candidates per language, in `Language::ALL` order.
static FILE_TYPES: &[(Language, &[&str])] = &[
    (Language::Ada, &[".adb", ".ads"]),
    (Language::Apl, &[".apl"]),
    (Language::AppleScript, &[".scpt"]),
    (Language::Bat, &[".bat", ".btm", ".cmd"]),
    (Language::Bibtex, &[".bib"]),
    (Language::C, &[".c", ".i"]),
    (Language::Clojure, &[".clj", ".cljc", ".cljs", ".cljx", ".clojure", ".edn"]),
    (Language::CoffeeScript, &[".coffee", ".cson", ".iced"]),
    (
        Language::Cpp,
        &[
            ".c++", ".cc", ".cpp", ".cxx", ".h.in", ".h", ".h++", ".hh", ".hpp.in", ".hpp", ".hxx",
            ".ii", ".inl", ".ino", ".ipp", ".ixx", ".tpp", ".txx",
        ],
    ),
    (Language::CSharp, &[".cake", ".cs", ".csx"]),
    (Language::Css, &[".css"]),
    (Language::Cuda, &[".cu", ".cuh"]),
    (Language::Dart, &[".dart"]),
    (Language::Dockerfile, &[".containerfile", ".dockerfile", "Containerfile", "Dockerfile"]),
    (Language::DwScript, &[".ds"]),
    (Language::FSharp, &[".fs", ".fsi", ".fsscript", ".fsx"]),
    (Language::Go, &[".go"]),
    (Language::Groovy, &[".gradle", ".groovy", ".gvy", ".jenkinsfile", ".nf"]),
    (Language::Handlebars, &[".handlebars", ".hbs", ".hjs"]),
    (Language::Haskell, &[".hs"]),
    (Language::Hlsl, &[".cginc", ".compute", ".fx", ".fxh", ".hlsl", ".hlsli", ".psh", ".vsh"]),
    (
        Language::Html,
        &[
            ".asp", ".aspx", ".ejs", ".htm", ".html", ".jshtm", ".jsp", ".mdoc", ".rhtml",
            ".shtml", ".volt", ".xht", ".xhtml",
        ],
    ),
    (
        Language::Ignore,
        &[
            ".eslintignore", ".gitignore", ".npmignore", ".prettierignore", ".vscodeignore",
        ],
    ),
    (Language::Ini, &[".ini"]),
    (Language::Isml, &[".isml"]),
    (Language::Jade, &[".jade", ".pug"]),
    (Language::Java, &[".jav", ".java"]),
    (Language::JavaScript, &[".cjs", ".es6", ".js", ".mjs", ".pac"]),
    (Language::JavaScriptReact, &[".jsx"]),
    (
        Language::Jsonc,
        &[
            ".babelrc.json", ".babelrc", ".ember-cli", ".eslintrc.json", ".eslintrc", ".hintrc",
            ".jsfmtrc", ".jshintrc", ".jsonc", ".swcrc", "babel.config.json", "jsconfig.json",
            "tsconfig.json",
        ],
    ),
    (Language::Julia, &[".jl"]),
    (Language::Jupyter, &[".ipynb"]),
    (Language::Latex, &[".ctx", ".ltx", ".tex", ".bbx", ".cbx", ".cls", ".sty"]),
    (Language::Less, &[".less"]),
    (Language::Lua, &[".lua"]),
    (Language::Makefile, &[".mak", ".mk", "GNUmakefile", "makefile", "Makefile", "OCamlMakefile"]),
    (
        Language::Markdown,
        &[
            ".markdn", ".markdown", ".md", ".mdown", ".mdtext", ".mdtxt", ".mdwn", ".mkd",
            ".workbook",
        ],
    ),
    (Language::Matlab, &[".mat"]),
    (Language::ObjectiveC, &[".m", ".mm"]),
    (Language::OCaml, &[".ml", ".mli"]),
    (Language::Pascal, &[".pp", ".pas", ".inc"]),
    (Language::Perl, &[".pl", ".PL", ".pm", ".pod", ".psgi", ".t"]),
    (Language::Perl6, &[".nqp", ".p6", ".pl6", ".pm6"]),
    (Language::Php, &[".ctp", ".php", ".php4", ".php5", ".phtml"]),
    (Language::PowerShell, &[".ps1", ".psd1", ".psm1", ".psrc", ".pssc"]),
    (
        Language::Properties,
        &[
            ".cfg", ".conf", ".directory", ".editorconfig", ".gitattributes", ".gitconfig",
            ".gitmodules", ".npmrc", ".properties",
        ],
    ),
    (
        Language::Python,
        &[
            ".cpy", ".gyp", ".gypi", ".ipy", ".py", ".pyi", ".pyt", ".pyw", ".rpy", "SConscript",
            "SConstruct", "Snakefile",
        ],
    ),
    (Language::R, &[".r", ".rhistory", ".rprofile", ".rt"]),
    (Language::Razor, &[".cshtml"]),
    (
        Language::Ruby,
        &[
            ".erb", ".gemspec", ".podspec", ".rake", ".rb", ".rbi", ".rbx", ".rjs", ".ru",
            "appfile", "appraisals", "berksfile.lock", "berksfile", "brewfile", "capfile",
            "cheffile", "dangerfile", "deliverfile", "fastfile", "gemfile", "guardfile", "gymfile",
            "hobofile", "matchfile", "podfile", "puppetfile", "rakefile", "rantfile", "scanfile",
            "snapfile", "thorfile", "vagrantfile",
        ],
    ),
    (Language::Rust, &[".rs"]),
    (Language::Sass, &[".sass", ".scss"]),
    (Language::ShaderLab, &[".shader"]),
    (
        Language::ShellScript,
        &[
            ".bash_aliases", ".bash_login", ".bash_logout", ".bash_profile", ".bash", ".bashrc",
            ".csh", ".cshrc", ".ebuild", ".envrc", ".hushlogin", ".ksh", ".profile", ".sh",
            ".tcshrc", ".xprofile", ".xsession", ".Xsession", ".xsessionrc", ".yash_profile",
            ".yashrc", ".zlogin", ".zlogout", ".zprofile", ".zsh-theme", ".zsh", ".zshenv",
            ".zshrc", "APKBUILD", "bashrc_Apple_Terminal", "PKGBUILD", "zlogin", "zlogout",
            "zprofile", "zshenv", "zshrc_Apple_Terminal", "zshrc",
        ],
    ),
    (Language::Sql, &[".dsql", ".sql"]),
    (Language::Swift, &[".swift"]),
    (Language::TypeScript, &[".cts", ".mts", ".ts", ".tsx"]),
    (Language::Vb, &[".bas", ".brs", ".vb", ".vba", ".vbs"]),
    (Language::Vue, &[".vue"]),
    (
        Language::Xml,
        &[
            ".ascx", ".atom", ".axaml", ".axml", ".bpmn", ".cpt", ".csl", ".csproj.user",
            ".csproj", ".dita", ".ditamap", ".dtd", ".dtml", ".ent", ".fsproj", ".fxml", ".iml",
            ".jmx", ".launch", ".menu", ".mod", ".mxml", ".nuspec", ".opml", ".owl", ".proj",
            ".props", ".pt", ".publishsettings", ".pubxml.user", ".pubxml", ".rbxlx", ".rbxmx",
            ".rdf", ".rng", ".rss", ".shproj", ".storyboard", ".svg", ".targets", ".tld", ".tmx",
            ".vbproj.user", ".vbproj", ".vcxproj.filters", ".vcxproj", ".wsdl", ".wxi", ".wxl",
            ".wxs", ".xaml", ".xbl", ".xib", ".xlf", ".xliff", ".xml", ".xoml", ".xpdl", ".xsd",
            ".xul",
        ],
    ),
    (Language::Xsl, &[".xsl", ".xslt"]),
    (Language::Yaml, &[".cff", ".eyaml", ".eyml", ".yaml", ".yml"]),
];

pub(super) fn extensions_of(language: Language) -> &'static [&'static str] {
    FILE_TYPES[language as usize].1
}

/// Final path component, accepting both `/` and `\` separators.
#[must_use]
pub fn base_name(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

/// Suffix of the base name from its last `.` (dot included), or the whole
/// base name when it has no dot.
///
/// ```
/// use devtodo_core::language::file_extension;
/// assert_eq!(file_extension("src/main.rs"), ".rs");
/// assert_eq!(file_extension("config.h.in"), ".in");
/// assert_eq!(file_extension("Makefile"), "Makefile");
/// ```
#[must_use]
pub fn file_extension(path: &str) -> &str {
    let name = base_name(path);
    name.rfind('.').map_or(name, |idx| &name[idx..])
}

/// Resolve a file name against the table without any caching.
///
/// Every candidate of every language is visited; a candidate matches when the
/// file name ends with it, or when it ends with the file's extension. The last
/// match wins.
#[must_use]
pub fn resolve_uncached(path: &str) -> Option<Language> {
    let name = base_name(path);
    if name.is_empty() {
        return None;
    }
    let ext = file_extension(name);
    let mut found = None;
    for &(language, candidates) in FILE_TYPES {
        for candidate in candidates {
            if name.ends_with(candidate) || candidate.ends_with(ext) {
                found = Some(language);
            }
        }
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_order_matches_enum() {
        assert_eq!(FILE_TYPES.len(), Language::ALL.len());
        for (idx, (language, _)) in FILE_TYPES.iter().enumerate() {
            assert_eq!(Language::ALL[idx], *language);
        }
    }

    #[test]
    fn test_simple_extensions() {
        assert_eq!(resolve_uncached("main.rs"), Some(Language::Rust));
        assert_eq!(resolve_uncached("src/app.ts"), Some(Language::TypeScript));
        assert_eq!(resolve_uncached("C:\\work\\main.c"), Some(Language::C));
        assert_eq!(resolve_uncached("script.py"), Some(Language::Python));
        assert_eq!(resolve_uncached("deploy.yml"), Some(Language::Yaml));
    }

    #[test]
    fn test_exact_file_names() {
        assert_eq!(resolve_uncached("Makefile"), Some(Language::Makefile));
        assert_eq!(resolve_uncached("docker/Dockerfile"), Some(Language::Dockerfile));
        assert_eq!(resolve_uncached(".gitignore"), Some(Language::Ignore));
        assert_eq!(resolve_uncached("tsconfig.json"), Some(Language::Jsonc));
    }

    #[test]
    fn test_multi_part_extension() {
        assert_eq!(resolve_uncached("config.h.in"), Some(Language::Cpp));
    }

    #[test]
    fn test_unknown_extension() {
        assert_eq!(resolve_uncached("archive.tar.gz"), None);
        assert_eq!(resolve_uncached("notes.unknownext"), None);
        assert_eq!(resolve_uncached("dir/"), None);
    }

    #[test]
    fn test_file_extension() {
        assert_eq!(file_extension("a/b/c.tar.gz"), ".gz");
        assert_eq!(file_extension(".bashrc"), ".bashrc");
        assert_eq!(file_extension("README"), "README");
    }
}
