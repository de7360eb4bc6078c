// crates/core/src/scanner/lexeme.rs
//! 字句スキップのヘルパー
//!
//! Each helper looks at the bytes starting at `i` and returns the length of the
//! lexeme found there, or `None` when the rule does not apply.

/// 識別子に使える文字かどうかを判定
#[inline]
#[must_use]
pub const fn is_ident_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// UTF-8 sequence length announced by a leading byte.
#[inline]
const fn utf8_width(b: u8) -> usize {
    match b {
        0x00..=0x7F => 1,
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xFF => 4,
        _ => 1,
    }
}

/// Length of the character starting at `i`.
#[inline]
#[must_use]
pub fn char_len(src: &str, i: usize) -> usize {
    src.as_bytes().get(i).map_or(0, |&b| utf8_width(b)).min(src.len() - i)
}

/// `\` followed by any character except a line break.
#[must_use]
pub fn try_skip_escape(src: &str, i: usize) -> Option<usize> {
    let bytes = src.as_bytes();
    if bytes.get(i) != Some(&b'\\') {
        return None;
    }
    match bytes.get(i + 1) {
        None | Some(b'\r' | b'\n') => None,
        Some(_) => Some(1 + char_len(src, i + 1)),
    }
}

/// A string opened and closed by the same `'`, `"` or backtick.
///
/// Backslash escapes are honoured. Single and double quoted strings stop at a
/// line break, backtick strings may span lines. Unterminated strings are not
/// strings.
#[must_use]
pub fn try_skip_quoted_string(src: &str, i: usize) -> Option<usize> {
    let bytes = &src.as_bytes()[i..];
    let quote = *bytes.first()?;
    if !matches!(quote, b'\'' | b'"' | b'`') {
        return None;
    }
    let multiline = quote == b'`';
    let mut j = 1;
    while j < bytes.len() {
        match bytes[j] {
            b'\n' if !multiline => return None,
            b'\\' if j + 1 < bytes.len() => {
                if bytes[j + 1] == b'\n' && !multiline {
                    return None;
                }
                j += 2;
            }
            b if b == quote => return Some(j + 1),
            _ => j += 1,
        }
    }
    None
}

/// `\r*\n`
#[must_use]
pub fn try_skip_newline(src: &str, i: usize) -> Option<usize> {
    let bytes = &src.as_bytes()[i..];
    let crs = bytes.iter().take_while(|&&b| b == b'\r').count();
    (bytes.get(crs) == Some(&b'\n')).then_some(crs + 1)
}

/// Maximal run of ASCII letters, digits, spaces and tabs, excluding `C`.
#[must_use]
pub fn try_skip_word_run(src: &str, i: usize) -> Option<usize> {
    let len = src.as_bytes()[i..]
        .iter()
        .take_while(|&&b| (b.is_ascii_alphanumeric() && b != b'C') || b == b' ' || b == b'\t')
        .count();
    (len > 0).then_some(len)
}

/// Offset of the first `\r` or `\n` in `body`, or its length.
#[must_use]
pub fn line_end(body: &str) -> usize {
    body.find(['\r', '\n']).unwrap_or(body.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(try_skip_escape(r"\/\/ x", 0), Some(2));
        assert_eq!(try_skip_escape("\\é", 0), Some(3));
        assert_eq!(try_skip_escape("\\\n", 0), None);
        assert_eq!(try_skip_escape("\\", 0), None);
        assert_eq!(try_skip_escape("a", 0), None);
    }

    #[test]
    fn test_quoted_string() {
        assert_eq!(try_skip_quoted_string(r#""a // b" x"#, 0), Some(8));
        assert_eq!(try_skip_quoted_string(r#""a \" b""#, 0), Some(8));
        assert_eq!(try_skip_quoted_string("''", 0), Some(2));
        assert_eq!(try_skip_quoted_string("\"open\nclose\"", 0), None);
        assert_eq!(try_skip_quoted_string("`a\nb`", 0), Some(5));
        assert_eq!(try_skip_quoted_string("\"never closed", 0), None);
        assert_eq!(try_skip_quoted_string("x", 0), None);
    }

    #[test]
    fn test_newline() {
        assert_eq!(try_skip_newline("\n", 0), Some(1));
        assert_eq!(try_skip_newline("\r\r\nx", 0), Some(3));
        assert_eq!(try_skip_newline("\rx", 0), None);
    }

    #[test]
    fn test_word_run_stops_at_capital_c() {
        assert_eq!(try_skip_word_run("ab 1\tCd", 0), Some(5));
        assert_eq!(try_skip_word_run("Cd", 0), None);
        assert_eq!(try_skip_word_run("-x", 0), None);
    }

    #[test]
    fn test_char_len() {
        assert_eq!(char_len("a⍝", 1), 3);
        assert_eq!(char_len("a", 0), 1);
    }
}
