//! Derived fields that the media index does not store

use std::path::Path;

use crate::planner::MediaScope;

use super::record::{FieldValue, NormalizedRecord};

/// Locator of the track: `<scope content uri>/<_id>`
pub const URI_FIELD: &str = "_uri";
/// Extension of the `_data` path, without the dot
pub const EXTENSION_FIELD: &str = "file_extension";
/// File name of the `_data` path without its extension
pub const DISPLAY_NAME_WO_EXT_FIELD: &str = "_display_name_wo_ext";

/// Every key [`RecordEnricher::enrich`] produces
pub const ENRICHMENT_FIELDS: &[&str] = &[URI_FIELD, EXTENSION_FIELD, DISPLAY_NAME_WO_EXT_FIELD];

const PATH_COLUMN: &str = "_data";
const ID_COLUMN: &str = "_id";

/// Computes derived fields from an already normalized record
pub struct RecordEnricher;

impl RecordEnricher {
    /// Returns only the derived fields; each key is always present, null when
    /// its inputs are missing.
    pub fn enrich(scope: MediaScope, record: &NormalizedRecord) -> NormalizedRecord {
        let mut extra = NormalizedRecord::new();

        let uri = record
            .get(ID_COLUMN)
            .and_then(FieldValue::as_i64)
            .map(|id| format!("{}/{}", scope.content_uri(), id));
        extra.insert(URI_FIELD, FieldValue::from(uri));

        let path = record.get(PATH_COLUMN).and_then(FieldValue::as_str).map(Path::new);
        let extension = path
            .and_then(Path::extension)
            .map(|e| e.to_string_lossy().into_owned());
        let stem = path
            .and_then(Path::file_stem)
            .map(|s| s.to_string_lossy().into_owned());
        extra.insert(EXTENSION_FIELD, FieldValue::from(extension));
        extra.insert(DISPLAY_NAME_WO_EXT_FIELD, FieldValue::from(stem));

        extra
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: Option<i64>, data: Option<&str>) -> NormalizedRecord {
        let mut record = NormalizedRecord::new();
        record.insert("_id", FieldValue::from(id));
        record.insert("_data", FieldValue::from(data.map(String::from)));
        record
    }

    #[test]
    fn test_full_enrichment() {
        let extra = RecordEnricher::enrich(
            MediaScope::External,
            &record(Some(42), Some("/storage/Music/Rock/Song One.mp3")),
        );
        assert_eq!(
            extra.get(URI_FIELD).and_then(FieldValue::as_str),
            Some("content://media/external/audio/media/42")
        );
        assert_eq!(extra.get(EXTENSION_FIELD).and_then(FieldValue::as_str), Some("mp3"));
        assert_eq!(
            extra.get(DISPLAY_NAME_WO_EXT_FIELD).and_then(FieldValue::as_str),
            Some("Song One")
        );
    }

    #[test]
    fn test_internal_scope_uri() {
        let extra = RecordEnricher::enrich(MediaScope::Internal, &record(Some(3), None));
        assert_eq!(
            extra.get(URI_FIELD).and_then(FieldValue::as_str),
            Some("content://media/internal/audio/media/3")
        );
    }

    #[test]
    fn test_missing_inputs_yield_nulls() {
        let extra = RecordEnricher::enrich(MediaScope::External, &record(None, None));
        let keys: Vec<&str> = extra.keys().collect();
        assert_eq!(keys.len(), ENRICHMENT_FIELDS.len());
        for field in ENRICHMENT_FIELDS {
            assert!(extra.get(field).unwrap().is_null(), "{}", field);
        }
    }

    #[test]
    fn test_file_without_extension() {
        let extra = RecordEnricher::enrich(MediaScope::External, &record(Some(1), Some("/a/README")));
        assert!(extra.get(EXTENSION_FIELD).unwrap().is_null());
        assert_eq!(
            extra.get(DISPLAY_NAME_WO_EXT_FIELD).and_then(FieldValue::as_str),
            Some("README")
        );
    }
}
