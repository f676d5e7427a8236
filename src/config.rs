//! Endpoint limits applied when a query is turned into a request.

use serde::{Deserialize, Serialize};

/// Limits enforced by [`SearchRequest`](crate::SearchRequest) and
/// [`RuleUpdate`](crate::RuleUpdate).
///
/// The defaults match the standard recent-search and filtered-stream
/// endpoints. Callers with elevated access can raise them, typically by
/// deserializing this from their own configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryLimits {
    /// Maximum length of a rendered query, in characters.
    #[serde(default = "default_max_query_len")]
    pub max_query_len: usize,

    /// Smallest accepted `max_results`.
    #[serde(default = "default_min_results")]
    pub min_results: u32,

    /// Largest accepted `max_results`.
    #[serde(default = "default_max_results")]
    pub max_results: u32,
}

fn default_max_query_len() -> usize {
    512
}

fn default_min_results() -> u32 {
    10
}

fn default_max_results() -> u32 {
    100
}

impl Default for QueryLimits {
    fn default() -> Self {
        Self {
            max_query_len: default_max_query_len(),
            min_results: default_min_results(),
            max_results: default_max_results(),
        }
    }
}

impl QueryLimits {
    /// Checks the length of a rendered query.
    pub(crate) fn check_len(&self, rendered: &str) -> crate::QueryResult<()> {
        let len = rendered.chars().count();
        if len > self.max_query_len {
            return Err(crate::QueryError::TooLong {
                len,
                max: self.max_query_len,
            });
        }
        Ok(())
    }
}
