//! Query planner: turns caller options into an immutable query plan

use super::errors::PlannerResult;
use super::filter::RowFilter;
use super::options::QueryOptions;
use super::scope::MediaScope;
use super::sort::{SongSortType, SortDirection, SortOrder};

/// Columns requested for every audio query. The first entry is the primary
/// path column that directory filters apply to.
pub const AUDIO_PROJECTION: &[&str] = &[
    "_data",
    "_display_name",
    "_id",
    "_size",
    "album",
    "album_id",
    "artist",
    "artist_id",
    "bookmark",
    "composer",
    "date_added",
    "date_modified",
    "duration",
    "title",
    "track",
    "is_alarm",
    "is_audiobook",
    "is_music",
    "is_notification",
    "is_podcast",
    "is_ringtone",
];

/// Fully resolved description of one audio query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryPlan {
    pub scope: MediaScope,
    pub sort: SortOrder,
    pub row_filter: Option<RowFilter>,
    pub columns: Vec<String>,
}

impl QueryPlan {
    /// Rendered sort clause
    pub fn sort_clause(&self) -> String {
        self.sort.clause()
    }

    /// Rendered selection, if the plan filters rows
    pub fn selection(&self) -> Option<String> {
        self.row_filter.as_ref().map(RowFilter::selection)
    }

    /// Column directory filters match against
    pub fn primary_path_column(&self) -> &str {
        self.columns.first().map(String::as_str).unwrap_or(AUDIO_PROJECTION[0])
    }
}

/// Builds query plans. Stateless; every call is a pure function of its inputs.
pub struct QueryPlanner;

impl QueryPlanner {
    /// Validates option codes and produces a plan.
    ///
    /// Fails with an [`OptionError`](super::OptionError) for an unknown sort,
    /// order or scope code.
    pub fn build_plan(
        sort_type: Option<i64>,
        order_type: i64,
        ignore_case: bool,
        scope: i64,
        path: Option<&str>,
    ) -> PlannerResult<QueryPlan> {
        let sort = SortOrder::new(
            SongSortType::from_code(sort_type)?,
            SortDirection::from_code(order_type)?,
            ignore_case,
        );
        let scope = MediaScope::from_code(scope)?;
        let columns: Vec<String> = AUDIO_PROJECTION.iter().map(|c| c.to_string()).collect();
        let row_filter = path.map(|p| RowFilter::under_directory(columns[0].clone(), p));

        Ok(QueryPlan {
            scope,
            sort,
            row_filter,
            columns,
        })
    }

    /// Builds a plan from decoded call options
    pub fn plan(options: &QueryOptions) -> PlannerResult<QueryPlan> {
        Self::build_plan(
            options.sort_type,
            options.order_type,
            options.ignore_case,
            options.uri,
            options.path.as_deref(),
        )
    }
}
