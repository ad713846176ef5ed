//! Column decoding rules
//!
//! Each column name maps to one [`ColumnKind`]; the lookup table is built
//! once per plan so the row loop never inspects names itself.

use std::collections::HashMap;

use crate::source::{RawRow, SourceResult};

use super::record::FieldValue;

/// How a column's raw value is decoded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// 64-bit row identifiers
    Id,
    /// Sizes, timestamps, durations, track numbers
    Number,
    /// Booleans stored as integers, non-zero = true
    Flag,
    /// Everything else
    Text,
}

impl ColumnKind {
    /// Decoding rule for a known media column; unknown columns are text
    pub fn of(column: &str) -> Self {
        match column {
            "_id" | "album_id" | "artist_id" | "genre_id" => ColumnKind::Id,
            "_size" | "bookmark" | "date_added" | "date_modified" | "duration" | "track"
            | "year" => ColumnKind::Number,
            "is_alarm" | "is_audiobook" | "is_music" | "is_notification" | "is_podcast"
            | "is_ringtone" => ColumnKind::Flag,
            _ => ColumnKind::Text,
        }
    }

    /// Reads the value at `index` of `row`
    pub fn extract(&self, row: &dyn RawRow, index: usize) -> SourceResult<FieldValue> {
        match self {
            ColumnKind::Id | ColumnKind::Number => row.get_long(index).map(FieldValue::from),
            ColumnKind::Flag => Ok(row
                .get_long(index)?
                .map_or(FieldValue::Null, |v| FieldValue::Bool(v != 0))),
            ColumnKind::Text => row.get_text(index).map(FieldValue::from),
        }
    }
}

/// Name → kind lookup for one plan
#[derive(Debug, Clone, Default)]
pub struct ColumnKinds {
    kinds: HashMap<String, ColumnKind>,
}

impl ColumnKinds {
    pub fn for_columns<S: AsRef<str>>(columns: &[S]) -> Self {
        Self {
            kinds: columns
                .iter()
                .map(|c| (c.as_ref().to_string(), ColumnKind::of(c.as_ref())))
                .collect(),
        }
    }

    /// Kind of `column`, falling back to the static rule for columns the
    /// source reports but the plan did not list
    pub fn kind(&self, column: &str) -> ColumnKind {
        self.kinds
            .get(column)
            .copied()
            .unwrap_or_else(|| ColumnKind::of(column))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::SourceError;

    struct OneRow {
        columns: Vec<String>,
        longs: Vec<Option<i64>>,
    }

    impl RawRow for OneRow {
        fn column_names(&self) -> &[String] {
            &self.columns
        }

        fn get_long(&self, index: usize) -> SourceResult<Option<i64>> {
            self.longs
                .get(index)
                .copied()
                .ok_or(SourceError::ColumnOutOfRange(index))
        }

        fn get_text(&self, index: usize) -> SourceResult<Option<String>> {
            self.get_long(index).map(|v| v.map(|v| v.to_string()))
        }
    }

    #[test]
    fn test_kinds() {
        assert_eq!(ColumnKind::of("_id"), ColumnKind::Id);
        assert_eq!(ColumnKind::of("duration"), ColumnKind::Number);
        assert_eq!(ColumnKind::of("is_music"), ColumnKind::Flag);
        assert_eq!(ColumnKind::of("title"), ColumnKind::Text);
        assert_eq!(ColumnKind::of("something_new"), ColumnKind::Text);
    }

    #[test]
    fn test_flag_decoding() {
        let row = OneRow {
            columns: vec!["is_music".into(), "is_alarm".into(), "is_podcast".into()],
            longs: vec![Some(1), Some(0), None],
        };
        let flag = ColumnKind::Flag;
        assert_eq!(flag.extract(&row, 0).unwrap(), FieldValue::Bool(true));
        assert_eq!(flag.extract(&row, 1).unwrap(), FieldValue::Bool(false));
        assert_eq!(flag.extract(&row, 2).unwrap(), FieldValue::Null);
    }

    #[test]
    fn test_table_lookup() {
        let kinds = ColumnKinds::for_columns(&["_id", "title"]);
        assert_eq!(kinds.kind("_id"), ColumnKind::Id);
        assert_eq!(kinds.kind("title"), ColumnKind::Text);
        assert_eq!(kinds.kind("is_ringtone"), ColumnKind::Flag);
    }

    #[test]
    fn test_extra_columns_outside_projection() {
        let kinds = ColumnKinds::for_columns(&["_id", "title"]);
        assert_eq!(kinds.kind("genre_id"), ColumnKind::Id);
        assert_eq!(kinds.kind("year"), ColumnKind::Number);

        let row = OneRow {
            columns: vec!["genre_id".into(), "year".into()],
            longs: vec![Some(4), Some(1999)],
        };
        assert_eq!(kinds.kind("year").extract(&row, 1).unwrap(), FieldValue::Integer(1999));
    }
}
