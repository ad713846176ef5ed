//! SQL `LIKE` evaluation for the in-memory index
//!
//! `%` matches any run of characters, `_` matches one character, the escape
//! character makes the next character literal. Matching ignores case, as
//! SQLite's default `LIKE` does.

use regex::{Regex, RegexBuilder};

use super::errors::{SourceError, SourceResult};

/// A compiled `LIKE` pattern
#[derive(Debug, Clone)]
pub struct LikeMatcher {
    regex: Regex,
}

impl LikeMatcher {
    pub fn compile(pattern: &str, escape: char) -> SourceResult<Self> {
        let mut expr = String::with_capacity(pattern.len() + 8);
        expr.push('^');

        let mut chars = pattern.chars();
        while let Some(c) = chars.next() {
            if c == escape {
                // A dangling escape matches itself.
                let literal = chars.next().unwrap_or(c);
                push_literal(&mut expr, literal);
                continue;
            }
            match c {
                '%' => expr.push_str(".*"),
                '_' => expr.push('.'),
                other => push_literal(&mut expr, other),
            }
        }
        expr.push('$');

        let regex = RegexBuilder::new(&expr)
            .case_insensitive(true)
            .dot_matches_new_line(true)
            .build()
            .map_err(|e| SourceError::InvalidPattern(e.to_string()))?;
        Ok(Self { regex })
    }

    pub fn is_match(&self, value: &str) -> bool {
        self.regex.is_match(value)
    }
}

fn push_literal(expr: &mut String, c: char) {
    let mut buf = [0u8; 4];
    expr.push_str(&regex::escape(c.encode_utf8(&mut buf)));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn like(pattern: &str, value: &str) -> bool {
        LikeMatcher::compile(pattern, '\\').unwrap().is_match(value)
    }

    #[test]
    fn test_contains_pattern() {
        assert!(like("%/Music/Rock/%", "/storage/emulated/0/Music/Rock/a.mp3"));
        assert!(!like("%/Music/Rock/%", "/storage/emulated/0/Music/Rockabilly/a.mp3"));
    }

    #[test]
    fn test_case_insensitive() {
        assert!(like("%/music/%", "/sdcard/Music/song.mp3"));
    }

    #[test]
    fn test_underscore_matches_one_char() {
        assert!(like("a_c", "abc"));
        assert!(!like("a_c", "abbc"));
    }

    #[test]
    fn test_escaped_wildcards_are_literal() {
        assert!(like("%/50\\%\\_off/%", "/x/50%_off/y.mp3"));
        assert!(!like("%/50\\%\\_off/%", "/x/5000off/y.mp3"));
    }

    #[test]
    fn test_regex_metacharacters_are_literal() {
        assert!(like("%/(Live) [2020]/%", "/a/(Live) [2020]/b.flac"));
        assert!(!like("a.c", "abc"));
    }
}
