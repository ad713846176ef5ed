//! Interface of the tabular media index
//!
//! A [`MediaSource`] opens a [`Cursor`] for a plan; the cursor lends out one
//! [`RawRow`] at a time. A row borrows the cursor, so it cannot be read after
//! the cursor advances or closes.

use std::ops::{Deref, DerefMut};

use crate::observability::{log_event, Event};
use crate::planner::QueryPlan;

use super::errors::SourceResult;

/// Positional access to the current row of a cursor
pub trait RawRow {
    /// Column names in positional order, as reported by the source
    fn column_names(&self) -> &[String];

    /// Reads an integer column. `Ok(None)` for SQL NULL.
    fn get_long(&self, index: usize) -> SourceResult<Option<i64>>;

    /// Reads a text column. `Ok(None)` for SQL NULL.
    fn get_text(&self, index: usize) -> SourceResult<Option<String>>;
}

/// Forward-only iterator over a query result
pub trait Cursor: Send {
    /// Number of rows, if the source knows it up front
    fn count(&self) -> Option<usize> {
        None
    }

    /// Moves to the next row
    fn advance(&mut self) -> SourceResult<Option<&dyn RawRow>>;

    /// Releases the cursor. Must be safe to call more than once.
    fn close(&mut self);
}

/// A queryable media index
pub trait MediaSource: Send + Sync {
    /// Opens a cursor over `plan.scope`, projecting `plan.columns`, filtered by
    /// `plan.row_filter` and ordered by `plan.sort`.
    fn open(&self, plan: &QueryPlan) -> SourceResult<Box<dyn Cursor>>;
}

/// Owns an open cursor and closes it when dropped, including during unwinding
pub struct CursorGuard {
    cursor: Box<dyn Cursor>,
    closed: bool,
}

impl CursorGuard {
    pub fn new(cursor: Box<dyn Cursor>) -> Self {
        Self {
            cursor,
            closed: false,
        }
    }

    /// Closes the cursor now
    pub fn close(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if !self.closed {
            self.closed = true;
            self.cursor.close();
            log_event(Event::CursorClosed);
        }
    }
}

impl Deref for CursorGuard {
    type Target = dyn Cursor;

    fn deref(&self) -> &Self::Target {
        self.cursor.as_ref()
    }
}

impl DerefMut for CursorGuard {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.cursor.as_mut()
    }
}

impl Drop for CursorGuard {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct CountingCursor {
        closes: Arc<AtomicUsize>,
    }

    impl Cursor for CountingCursor {
        fn advance(&mut self) -> SourceResult<Option<&dyn RawRow>> {
            Ok(None)
        }

        fn close(&mut self) {
            self.closes.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn guard(closes: &Arc<AtomicUsize>) -> CursorGuard {
        CursorGuard::new(Box::new(CountingCursor {
            closes: Arc::clone(closes),
        }))
    }

    #[test]
    fn test_drop_closes_once() {
        let closes = Arc::new(AtomicUsize::new(0));
        drop(guard(&closes));
        assert_eq!(closes.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_explicit_close_does_not_double_close() {
        let closes = Arc::new(AtomicUsize::new(0));
        guard(&closes).close();
        assert_eq!(closes.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_unwinding_closes() {
        let closes = Arc::new(AtomicUsize::new(0));
        let inner = Arc::clone(&closes);
        let outcome = std::panic::catch_unwind(move || {
            let mut g = guard(&inner);
            let _ = g.advance();
            panic!("row decoder blew up");
        });
        assert!(outcome.is_err());
        assert_eq!(closes.load(Ordering::SeqCst), 1);
    }
}
