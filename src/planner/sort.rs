//! Sort field, direction and the rendered sort clause

use std::fmt;

use super::errors::{OptionError, PlannerResult};

/// Field an audio query is sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SongSortType {
    Title,
    Artist,
    Album,
    Duration,
    DateAdded,
    Size,
    DisplayName,
}

impl SongSortType {
    /// Resolves a `sortType` option code. An absent code sorts by title.
    pub fn from_code(code: Option<i64>) -> PlannerResult<Self> {
        match code {
            None | Some(0) => Ok(SongSortType::Title),
            Some(1) => Ok(SongSortType::Artist),
            Some(2) => Ok(SongSortType::Album),
            Some(3) => Ok(SongSortType::Duration),
            Some(4) => Ok(SongSortType::DateAdded),
            Some(5) => Ok(SongSortType::Size),
            Some(6) => Ok(SongSortType::DisplayName),
            Some(other) => Err(OptionError::UnknownSortType(other)),
        }
    }

    /// Column this sort type orders by
    pub fn column(&self) -> &'static str {
        match self {
            SongSortType::Title => "title",
            SongSortType::Artist => "artist",
            SongSortType::Album => "album",
            SongSortType::Duration => "duration",
            SongSortType::DateAdded => "date_added",
            SongSortType::Size => "_size",
            SongSortType::DisplayName => "_display_name",
        }
    }

    /// Whether the column holds text (collation only applies to text)
    pub fn is_textual(&self) -> bool {
        matches!(
            self,
            SongSortType::Title
                | SongSortType::Artist
                | SongSortType::Album
                | SongSortType::DisplayName
        )
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// Resolves an `orderType` option code: 0 = ascending, 1 = descending
    pub fn from_code(code: i64) -> PlannerResult<Self> {
        match code {
            0 => Ok(SortDirection::Asc),
            1 => Ok(SortDirection::Desc),
            other => Err(OptionError::UnknownOrderType(other)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// Fully resolved ordering for a query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOrder {
    pub sort_type: SongSortType,
    pub direction: SortDirection,
    pub ignore_case: bool,
}

impl SortOrder {
    pub fn new(sort_type: SongSortType, direction: SortDirection, ignore_case: bool) -> Self {
        Self {
            sort_type,
            direction,
            ignore_case,
        }
    }

    /// Column the order applies to
    pub fn column(&self) -> &'static str {
        self.sort_type.column()
    }

    /// True when comparisons fold ASCII case
    pub fn folds_case(&self) -> bool {
        self.ignore_case && self.sort_type.is_textual()
    }

    /// Renders the clause, e.g. `title COLLATE NOCASE ASC` or `duration DESC`
    pub fn clause(&self) -> String {
        if self.folds_case() {
            format!("{} COLLATE NOCASE {}", self.column(), self.direction.as_str())
        } else {
            format!("{} {}", self.column(), self.direction.as_str())
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.clause())
    }
}
