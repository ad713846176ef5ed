//! In-memory media index
//!
//! One table per scope. Evaluates the plan the way an SQLite-backed media
//! index would: the row filter as a `LIKE` pattern, the sort order with
//! NULL < integer < text, `COLLATE NOCASE` as ASCII case folding, and ties
//! kept in insertion order.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering as AtomicOrdering};
use std::sync::{Arc, RwLock};

use crate::planner::{MediaScope, QueryPlan, SortDirection, LIKE_ESCAPE};

use super::cursor::{Cursor, MediaSource, RawRow};
use super::errors::{SourceError, SourceResult};
use super::like::LikeMatcher;

/// A stored value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Null,
    Long(i64),
    Text(String),
}

impl Cell {
    fn type_rank(&self) -> u8 {
        match self {
            Cell::Null => 0,
            Cell::Long(_) => 1,
            Cell::Text(_) => 2,
        }
    }

    fn as_text(&self) -> Option<String> {
        match self {
            Cell::Null => None,
            Cell::Long(v) => Some(v.to_string()),
            Cell::Text(s) => Some(s.clone()),
        }
    }

    fn compare(&self, other: &Cell, fold_case: bool) -> Ordering {
        match (self, other) {
            (Cell::Long(a), Cell::Long(b)) => a.cmp(b),
            (Cell::Text(a), Cell::Text(b)) if fold_case => a
                .bytes()
                .map(|c| c.to_ascii_lowercase())
                .cmp(b.bytes().map(|c| c.to_ascii_lowercase())),
            (Cell::Text(a), Cell::Text(b)) => a.cmp(b),
            _ => self.type_rank().cmp(&other.type_rank()),
        }
    }
}

impl From<i64> for Cell {
    fn from(v: i64) -> Self {
        Cell::Long(v)
    }
}

impl From<i32> for Cell {
    fn from(v: i32) -> Self {
        Cell::Long(i64::from(v))
    }
}

impl From<bool> for Cell {
    fn from(v: bool) -> Self {
        Cell::Long(i64::from(v))
    }
}

impl From<&str> for Cell {
    fn from(v: &str) -> Self {
        Cell::Text(v.to_string())
    }
}

impl From<String> for Cell {
    fn from(v: String) -> Self {
        Cell::Text(v)
    }
}

impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Cell::Null)
    }
}

static NULL_CELL: Cell = Cell::Null;

/// One stored track; columns absent from the map read as NULL
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaRow(BTreeMap<String, Cell>);

impl MediaRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, column: impl Into<String>, value: impl Into<Cell>) -> Self {
        self.0.insert(column.into(), value.into());
        self
    }

    pub fn get(&self, column: &str) -> &Cell {
        self.0.get(column).unwrap_or(&NULL_CELL)
    }
}

/// In-memory implementation of [`MediaSource`]
#[derive(Debug)]
pub struct MemorySource {
    tables: RwLock<HashMap<MediaScope, Vec<MediaRow>>>,
    access_granted: AtomicBool,
    open_cursors: Arc<AtomicUsize>,
}

impl Default for MemorySource {
    fn default() -> Self {
        Self::new()
    }
}

impl MemorySource {
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(HashMap::new()),
            access_granted: AtomicBool::new(true),
            open_cursors: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Appends a row to the table of `scope`
    pub fn insert(&self, scope: MediaScope, row: MediaRow) {
        let mut tables = self.tables.write().unwrap_or_else(|e| e.into_inner());
        tables.entry(scope).or_default().push(row);
    }

    /// Builder-style bulk insert
    pub fn with_rows(self, scope: MediaScope, rows: impl IntoIterator<Item = MediaRow>) -> Self {
        for row in rows {
            self.insert(scope, row);
        }
        self
    }

    /// Subsequent opens fail with a permission error
    pub fn revoke_access(&self) {
        self.access_granted.store(false, AtomicOrdering::SeqCst);
    }

    pub fn grant_access(&self) {
        self.access_granted.store(true, AtomicOrdering::SeqCst);
    }

    /// Cursors opened and not yet closed
    pub fn open_cursors(&self) -> usize {
        self.open_cursors.load(AtomicOrdering::SeqCst)
    }

    fn select(&self, plan: &QueryPlan) -> SourceResult<Vec<MediaRow>> {
        let matcher = plan
            .row_filter
            .as_ref()
            .map(|f| LikeMatcher::compile(f.pattern(), LIKE_ESCAPE).map(|m| (f.column(), m)))
            .transpose()?;

        let tables = self.tables.read().unwrap_or_else(|e| e.into_inner());
        let mut rows: Vec<MediaRow> = tables
            .get(&plan.scope)
            .map(|rows| rows.as_slice())
            .unwrap_or_default()
            .iter()
            .filter(|row| match &matcher {
                Some((column, m)) => row.get(column).as_text().is_some_and(|v| m.is_match(&v)),
                None => true,
            })
            .cloned()
            .collect();

        let column = plan.sort.column();
        let fold_case = plan.sort.folds_case();
        rows.sort_by(|a, b| {
            let ordering = a.get(column).compare(b.get(column), fold_case);
            match plan.sort.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });
        Ok(rows)
    }
}

impl MediaSource for MemorySource {
    fn open(&self, plan: &QueryPlan) -> SourceResult<Box<dyn Cursor>> {
        if !self.access_granted.load(AtomicOrdering::SeqCst) {
            return Err(SourceError::PermissionDenied(format!(
                "read access to {} not granted",
                plan.scope.content_uri()
            )));
        }

        let columns: Arc<[String]> = plan.columns.clone().into();
        let rows = self
            .select(plan)?
            .into_iter()
            .map(|row| MemoryRow {
                cells: columns.iter().map(|c| row.get(c).clone()).collect(),
                columns: Arc::clone(&columns),
            })
            .collect();

        self.open_cursors.fetch_add(1, AtomicOrdering::SeqCst);
        Ok(Box::new(MemoryCursor {
            rows,
            position: None,
            closed: false,
            open_cursors: Arc::clone(&self.open_cursors),
        }))
    }
}

struct MemoryRow {
    columns: Arc<[String]>,
    cells: Vec<Cell>,
}

impl MemoryRow {
    fn cell(&self, index: usize) -> SourceResult<&Cell> {
        self.cells
            .get(index)
            .ok_or(SourceError::ColumnOutOfRange(index))
    }
}

impl RawRow for MemoryRow {
    fn column_names(&self) -> &[String] {
        &self.columns
    }

    fn get_long(&self, index: usize) -> SourceResult<Option<i64>> {
        match self.cell(index)? {
            Cell::Null => Ok(None),
            Cell::Long(v) => Ok(Some(*v)),
            Cell::Text(s) => s.trim().parse().map(Some).map_err(|_| SourceError::TypeMismatch {
                column: self.columns[index].clone(),
                expected: "integer",
            }),
        }
    }

    fn get_text(&self, index: usize) -> SourceResult<Option<String>> {
        Ok(self.cell(index)?.as_text())
    }
}

struct MemoryCursor {
    rows: Vec<MemoryRow>,
    position: Option<usize>,
    closed: bool,
    open_cursors: Arc<AtomicUsize>,
}

impl Cursor for MemoryCursor {
    fn count(&self) -> Option<usize> {
        Some(self.rows.len())
    }

    fn advance(&mut self) -> SourceResult<Option<&dyn RawRow>> {
        if self.closed {
            return Err(SourceError::Faulted("cursor already closed".into()));
        }
        let next = self.position.map_or(0, |p| p + 1);
        self.position = Some(next);
        Ok(self.rows.get(next).map(|row| row as &dyn RawRow))
    }

    fn close(&mut self) {
        if !self.closed {
            self.closed = true;
            self.open_cursors.fetch_sub(1, AtomicOrdering::SeqCst);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::QueryPlanner;

    fn track(id: i64, title: &str, data: &str) -> MediaRow {
        MediaRow::new()
            .with("_id", id)
            .with("title", title)
            .with("_data", data)
    }

    fn titles(source: &MemorySource, plan: &QueryPlan) -> Vec<String> {
        let mut cursor = source.open(plan).unwrap();
        let title_index = plan.columns.iter().position(|c| c == "title").unwrap();
        let mut out = Vec::new();
        while let Some(row) = cursor.advance().unwrap() {
            out.push(row.get_text(title_index).unwrap().unwrap_or_default());
        }
        cursor.close();
        out
    }

    #[test]
    fn test_sort_folds_case_when_asked() {
        let source = MemorySource::new().with_rows(
            MediaScope::External,
            vec![
                track(1, "banana", "/a/1.mp3"),
                track(2, "Apple", "/a/2.mp3"),
                track(3, "cherry", "/a/3.mp3"),
            ],
        );
        let nocase = QueryPlanner::build_plan(Some(0), 0, true, 0, None).unwrap();
        assert_eq!(titles(&source, &nocase), ["Apple", "banana", "cherry"]);

        let binary = QueryPlanner::build_plan(Some(0), 1, false, 0, None).unwrap();
        assert_eq!(titles(&source, &binary), ["cherry", "banana", "Apple"]);
    }

    #[test]
    fn test_nulls_sort_first_ascending() {
        let source = MemorySource::new().with_rows(
            MediaScope::External,
            vec![
                track(1, "b", "/a/1.mp3"),
                MediaRow::new().with("_id", 2).with("_data", "/a/2.mp3"),
            ],
        );
        let plan = QueryPlanner::build_plan(None, 0, false, 0, None).unwrap();
        assert_eq!(titles(&source, &plan), ["", "b"]);
    }

    #[test]
    fn test_directory_filter() {
        let source = MemorySource::new().with_rows(
            MediaScope::External,
            vec![
                track(1, "a", "/Music/Rock/a.mp3"),
                track(2, "b", "/Music/Rockabilly/b.mp3"),
                track(3, "c", "/Music/Rock/live/c.mp3"),
            ],
        );
        let plan = QueryPlanner::build_plan(None, 0, false, 0, Some("/Music/Rock")).unwrap();
        assert_eq!(titles(&source, &plan), ["a", "c"]);
    }

    #[test]
    fn test_scopes_are_separate_tables() {
        let source = MemorySource::new()
            .with_rows(MediaScope::External, vec![track(1, "ext", "/e/1.mp3")])
            .with_rows(MediaScope::Internal, vec![track(2, "int", "/i/2.ogg")]);
        let plan = QueryPlanner::build_plan(None, 0, false, 1, None).unwrap();
        assert_eq!(titles(&source, &plan), ["int"]);
    }

    #[test]
    fn test_revoked_access() {
        let source = MemorySource::new();
        source.revoke_access();
        let plan = QueryPlanner::build_plan(None, 0, false, 0, None).unwrap();
        assert!(matches!(source.open(&plan), Err(SourceError::PermissionDenied(_))));
        assert_eq!(source.open_cursors(), 0);
    }

    #[test]
    fn test_open_cursor_accounting() {
        let source = MemorySource::new();
        let plan = QueryPlanner::build_plan(None, 0, false, 0, None).unwrap();
        let mut cursor = source.open(&plan).unwrap();
        assert_eq!(source.open_cursors(), 1);
        cursor.close();
        cursor.close();
        assert_eq!(source.open_cursors(), 0);
        assert!(cursor.advance().is_err());
    }

    #[test]
    fn test_text_that_is_not_a_number() {
        let source = MemorySource::new().with_rows(
            MediaScope::External,
            vec![MediaRow::new().with("_id", "not-a-number")],
        );
        let plan = QueryPlanner::build_plan(None, 0, false, 0, None).unwrap();
        let id_index = plan.columns.iter().position(|c| c == "_id").unwrap();
        let mut cursor = source.open(&plan).unwrap();
        let row = cursor.advance().unwrap().unwrap();
        assert!(matches!(row.get_long(id_index), Err(SourceError::TypeMismatch { .. })));
        assert_eq!(row.get_text(id_index).unwrap().as_deref(), Some("not-a-number"));
    }
}
