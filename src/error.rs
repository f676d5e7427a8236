//! Errors raised where a query leaves the builder and becomes a request.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Reasons a query or request cannot be sent.
#[derive(Error, Debug)]
pub enum QueryError {
    /// The query has no standalone term (it is empty or filter-only).
    #[error("query has no standalone term: {query:?}")]
    NoStandaloneTerm {
        /// The rendered query.
        query: String,
    },

    /// The rendered query is longer than the endpoint accepts.
    #[error("query is {len} characters, limit is {max}")]
    TooLong {
        /// Rendered length in characters.
        len: usize,
        /// Configured limit.
        max: usize,
    },

    /// `max_results` is outside the endpoint's range.
    #[error("max_results {got} is outside {min}..={max}")]
    MaxResultsOutOfRange {
        /// Requested value.
        got: u32,
        /// Smallest accepted value.
        min: u32,
        /// Largest accepted value.
        max: u32,
    },

    /// The search window ends before it starts.
    #[error("start_time {start} is after end_time {end}")]
    InvalidTimeRange {
        /// Requested `start_time`.
        start: DateTime<Utc>,
        /// Requested `end_time`.
        end: DateTime<Utc>,
    },

    /// A rule update with nothing to add or delete.
    #[error("rule update is empty")]
    EmptyRuleSet,

    /// Encoding a request body failed.
    #[error("encoding request body: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Result type for request construction.
pub type QueryResult<T> = Result<T, QueryError>;
