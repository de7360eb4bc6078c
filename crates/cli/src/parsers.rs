// crates/cli/src/parsers.rs
use std::{fmt::Display, str::FromStr};

fn parse_bounded_number<T>(s: &str, min: T, max: Option<T>) -> Result<T, String>
where
    T: Copy + PartialOrd + Display + FromStr,
    <T as FromStr>::Err: Display,
{
    let value = s
        .trim()
        .parse::<T>()
        .map_err(|err| format!("invalid number '{s}': {err}"))?;
    if value < min {
        return Err(format!("value must be at least {min}"));
    }
    if let Some(max_bound) = max
        && value > max_bound
    {
        return Err(format!("value must be at most {max_bound}"));
    }
    Ok(value)
}

/// Parse a positive `usize` (>= 1) from CLI input.
///
/// # Errors
/// Returns an error if the input string is not a valid number or is less than 1.
pub fn parse_positive_usize(s: &str) -> Result<usize, String> {
    parse_bounded_number(s, 1, None)
}

/// Parse an attribution timeout in whole seconds, within [1, 600].
///
/// # Errors
/// Returns an error if the input is not a number or is out of range.
pub fn parse_timeout_secs(s: &str) -> Result<u64, String> {
    parse_bounded_number(s, 1, Some(600))
}

/// Parse a single annotation keyword: non-empty, no whitespace.
///
/// # Errors
/// Returns an error for blank keywords or keywords containing whitespace.
pub fn parse_keyword(s: &str) -> Result<String, String> {
    let kw = s.trim();
    if kw.is_empty() {
        return Err("keyword must not be empty".into());
    }
    if kw.chars().any(char::is_whitespace) {
        return Err(format!("keyword '{kw}' must not contain whitespace"));
    }
    Ok(kw.to_string())
}

/// Parse a key=value pair string into a tuple.
///
/// # Errors
/// Returns an error if the input string does not contain an '=' character.
pub fn parse_key_val(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .filter(|(k, v)| !k.is_empty() && !v.is_empty())
        .ok_or_else(|| format!("Expected key=val: {s}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_key_val() {
        let (k, v) = parse_key_val("tpl=html").unwrap();
        assert_eq!(k, "tpl");
        assert_eq!(v, "html");
    }

    #[test]
    fn test_parse_key_val_error() {
        assert!(parse_key_val("no_equals").is_err());
        assert!(parse_key_val("=html").is_err());
    }

    #[test]
    fn test_parse_keyword() {
        assert_eq!(parse_keyword(" todo ").unwrap(), "todo");
        assert!(parse_keyword("").is_err());
        assert!(parse_keyword("TO DO").is_err());
    }

    #[test]
    fn test_parse_timeout_bounds() {
        assert_eq!(parse_timeout_secs("5").unwrap(), 5);
        assert!(parse_timeout_secs("0").is_err());
        assert!(parse_timeout_secs("601").is_err());
    }
}
