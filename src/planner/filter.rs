//! Row filter restricting a query to one directory subtree

use std::fmt;

/// Escape character used in rendered `LIKE` patterns
pub const LIKE_ESCAPE: char = '\\';

/// A `LIKE` predicate on one column
///
/// The pattern is stored already escaped; `%` and `_` inside it are wildcards
/// unless preceded by [`LIKE_ESCAPE`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowFilter {
    column: String,
    pattern: String,
}

impl RowFilter {
    /// Matches rows whose `column` contains `<path>/`, i.e. anything located
    /// somewhere below the directory `path`.
    ///
    /// A trailing `/` on `path` is ignored. Wildcard characters in `path`
    /// match literally.
    pub fn under_directory(column: impl Into<String>, path: &str) -> Self {
        let directory = path.trim_end_matches('/');
        let mut pattern = String::with_capacity(directory.len() + 3);
        pattern.push('%');
        for c in directory.chars() {
            if matches!(c, '%' | '_') || c == LIKE_ESCAPE {
                pattern.push(LIKE_ESCAPE);
            }
            pattern.push(c);
        }
        pattern.push_str("/%");

        Self {
            column: column.into(),
            pattern,
        }
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    /// The escaped `LIKE` pattern
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Renders the selection clause, e.g. `_data LIKE '%/Music/Rock/%' ESCAPE '\'`
    pub fn selection(&self) -> String {
        format!(
            "{} LIKE '{}' ESCAPE '{}'",
            self.column,
            self.pattern.replace('\'', "''"),
            LIKE_ESCAPE
        )
    }
}

impl fmt::Display for RowFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.selection())
    }
}
