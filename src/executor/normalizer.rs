//! Row normalization: one raw row → one record

use crate::observability::{log_event_with_fields, Event};
use crate::planner::QueryPlan;
use crate::source::RawRow;

use super::columns::ColumnKinds;
use super::record::{FieldValue, NormalizedRecord};

/// Converts raw rows into records using the plan's column kinds
#[derive(Debug, Clone)]
pub struct RowNormalizer {
    kinds: ColumnKinds,
}

impl RowNormalizer {
    pub fn new(plan: &QueryPlan) -> Self {
        Self {
            kinds: ColumnKinds::for_columns(&plan.columns),
        }
    }

    /// Decodes every column the row reports.
    ///
    /// A column that fails to decode is stored as null; the remaining
    /// columns are still decoded.
    pub fn normalize(&self, row: &dyn RawRow) -> NormalizedRecord {
        let mut record = NormalizedRecord::new();

        for (index, column) in row.column_names().iter().enumerate() {
            let value = match self.kinds.kind(column).extract(row, index) {
                Ok(value) => value,
                Err(e) => {
                    let reason = e.to_string();
                    log_event_with_fields(
                        Event::ColumnDecodeFailed,
                        &[
                            ("column", column.as_str()),
                            ("code", e.code()),
                            ("reason", reason.as_str()),
                        ],
                    );
                    FieldValue::Null
                }
            };
            record.insert(column.as_str(), value);
        }

        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::QueryPlanner;
    use crate::source::{SourceError, SourceResult};

    struct FlakyRow {
        columns: Vec<String>,
    }

    impl RawRow for FlakyRow {
        fn column_names(&self) -> &[String] {
            &self.columns
        }

        fn get_long(&self, index: usize) -> SourceResult<Option<i64>> {
            match self.columns[index].as_str() {
                "_id" => Ok(Some(11)),
                "duration" => Err(SourceError::TypeMismatch {
                    column: "duration".into(),
                    expected: "integer",
                }),
                _ => Ok(None),
            }
        }

        fn get_text(&self, index: usize) -> SourceResult<Option<String>> {
            match self.columns[index].as_str() {
                "title" => Ok(Some("Intro".into())),
                _ => Ok(None),
            }
        }
    }

    fn normalizer() -> RowNormalizer {
        RowNormalizer::new(&QueryPlanner::build_plan(None, 0, false, 0, None).unwrap())
    }

    #[test]
    fn test_typed_values() {
        let row = FlakyRow {
            columns: vec!["_id".into(), "title".into(), "album".into()],
        };
        let record = normalizer().normalize(&row);
        assert_eq!(record.get("_id"), Some(&FieldValue::Integer(11)));
        assert_eq!(record.get("title"), Some(&FieldValue::Text("Intro".into())));
        assert_eq!(record.get("album"), Some(&FieldValue::Null));
    }

    #[test]
    fn test_failed_column_does_not_abort_row() {
        let row = FlakyRow {
            columns: vec!["_id".into(), "duration".into(), "title".into()],
        };
        let record = normalizer().normalize(&row);
        assert_eq!(record.len(), 3);
        assert_eq!(record.get("duration"), Some(&FieldValue::Null));
        assert_eq!(record.get("title"), Some(&FieldValue::Text("Intro".into())));
    }

    #[test]
    fn test_driven_by_row_columns() {
        let row = FlakyRow {
            columns: vec!["title".into(), "extra_column".into()],
        };
        let record = normalizer().normalize(&row);
        let keys: Vec<&str> = record.keys().collect();
        assert_eq!(keys, ["extra_column", "title"]);
    }
}
