// crates/engine/src/matcher.rs
//! キーワード注釈の照合

use crate::error::{EngineError, Result};
use regex::Regex;

/// Matches cleaned comment content against a keyword set.
#[derive(Debug, Clone)]
pub struct AnnotationMatcher {
    keywords: Vec<String>,
    pattern: Regex,
}

impl AnnotationMatcher {
    /// Build a matcher for `keywords` (case-insensitive, duplicates ignored).
    ///
    /// # Errors
    ///
    /// [`EngineError::InvalidInput`] for an empty set or a blank keyword, or
    /// one containing whitespace.
    pub fn new<I, S>(keywords: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized = Vec::new();
        for kw in keywords {
            let kw = kw.as_ref().trim();
            if kw.is_empty() {
                return Err(EngineError::InvalidInput("blank keyword".into()));
            }
            if kw.chars().any(char::is_whitespace) {
                return Err(EngineError::InvalidInput(format!(
                    "keyword '{kw}' contains whitespace"
                )));
            }
            normalized.push(kw.to_uppercase());
        }
        if normalized.is_empty() {
            return Err(EngineError::InvalidInput("keyword set is empty".into()));
        }
        normalized.sort_unstable_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        normalized.dedup();

        let alternation = normalized
            .iter()
            .map(|kw| regex::escape(kw))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = Regex::new(&format!(r"(?is)^({alternation})(?:\([^)]*\))?:?\s+(.+)$"))?;
        Ok(Self {
            keywords: normalized,
            pattern,
        })
    }

    /// Upper-cased keywords, longest first.
    #[must_use]
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// `(KEYWORD, message)` when `content` is an annotation.
    #[must_use]
    pub fn match_content(&self, content: &str) -> Option<(String, String)> {
        let caps = self.pattern.captures(content)?;
        let keyword = caps.get(1)?.as_str().to_uppercase();
        let message = caps.get(2)?.as_str().trim();
        let meaningful = message.trim_end_matches(|c: char| !(c.is_alphanumeric() || c == '_'));
        if meaningful.is_empty() {
            return None;
        }
        Some((keyword, message.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher() -> AnnotationMatcher {
        AnnotationMatcher::new(["todo", "FIXME", "Todo"]).unwrap()
    }

    #[test]
    fn test_keywords_are_normalised() {
        assert_eq!(matcher().keywords(), ["FIXME", "TODO"]);
    }

    #[test]
    fn test_basic_match() {
        assert_eq!(
            matcher().match_content("TODO: fix bug"),
            Some(("TODO".into(), "fix bug".into()))
        );
        assert_eq!(
            matcher().match_content("fixme   update docs  "),
            Some(("FIXME".into(), "update docs".into()))
        );
    }

    #[test]
    fn test_tag_in_parentheses() {
        assert_eq!(
            matcher().match_content("TODO(alice): rename"),
            Some(("TODO".into(), "rename".into()))
        );
    }

    #[test]
    fn test_requires_whitespace_after_keyword() {
        assert_eq!(matcher().match_content("TODOS are fine"), None);
        assert_eq!(matcher().match_content("TODO:nospace"), None);
        assert_eq!(matcher().match_content("not a TODO: here"), None);
    }

    #[test]
    fn test_rejects_punctuation_only_message() {
        assert_eq!(matcher().match_content("TODO: ..."), None);
        assert_eq!(matcher().match_content("TODO:"), None);
    }

    #[test]
    fn test_invalid_keyword_sets() {
        let empty: [&str; 0] = [];
        assert!(matches!(AnnotationMatcher::new(empty), Err(EngineError::InvalidInput(_))));
        assert!(matches!(AnnotationMatcher::new(["  "]), Err(EngineError::InvalidInput(_))));
        assert!(matches!(AnnotationMatcher::new(["TO DO"]), Err(EngineError::InvalidInput(_))));
    }

    #[test]
    fn test_regex_metacharacters_are_literal() {
        let m = AnnotationMatcher::new(["C++"]).unwrap();
        assert_eq!(m.match_content("c++ port"), Some(("C++".into(), "port".into())));
        assert_eq!(m.match_content("cc port"), None);
    }
}
