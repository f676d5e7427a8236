//! Recent-search request parameters.
//!
//! This module only shapes the parameters of a `GET 2/tweets/search/recent`
//! call. Sending it, signing it and decoding the reply belong to the caller's
//! HTTP layer.

use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, Utc};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use tracing::{debug, warn};

use crate::config::QueryLimits;
use crate::error::{QueryError, QueryResult};
use crate::query::Query;

/// API path for recent search.
pub const SEARCH_RECENT_PATH: &str = "2/tweets/search/recent";

/// Everything but the RFC 3986 unreserved characters.
const PARAM_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Families of optional response fields, one request parameter each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldSet {
    /// `tweet.fields`
    Tweet,
    /// `user.fields`
    User,
    /// `media.fields`
    Media,
    /// `poll.fields`
    Poll,
    /// `place.fields`
    Place,
}

impl FieldSet {
    /// The request parameter name.
    pub const fn label(self) -> &'static str {
        match self {
            FieldSet::Tweet => "tweet.fields",
            FieldSet::User => "user.fields",
            FieldSet::Media => "media.fields",
            FieldSet::Poll => "poll.fields",
            FieldSet::Place => "place.fields",
        }
    }
}

/// Optional parameters for a search. The default leaves every choice to the
/// server.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchOptions {
    /// A pagination token from a previous reply (`next_token`).
    pub page_token: Option<String>,

    /// Oldest UTC time from which results are returned.
    pub start_time: Option<DateTime<Utc>>,

    /// Newest UTC time up to which results are returned.
    pub end_time: Option<DateTime<Utc>>,

    /// Page size; `None` or `Some(0)` lets the server choose.
    pub max_results: Option<u32>,

    /// Only return results with IDs greater than this.
    pub since_id: Option<String>,

    /// Only return results with IDs smaller than this.
    pub until_id: Option<String>,

    /// Expansions to include.
    pub expansions: Vec<String>,

    /// Optional response fields, sent in [`FieldSet`] order.
    pub fields: BTreeMap<FieldSet, Vec<String>>,
}

impl SearchOptions {
    /// Adds optional response fields to the given set.
    pub fn with_fields<I>(mut self, set: FieldSet, fields: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.fields
            .entry(set)
            .or_default()
            .extend(fields.into_iter().map(Into::into));
        self
    }

    /// Adds expansions.
    pub fn with_expansions<I>(mut self, expansions: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.expansions.extend(expansions.into_iter().map(Into::into));
        self
    }

    fn check(&self, limits: &QueryLimits) -> QueryResult<()> {
        if let Some(got) = self.max_results.filter(|&n| n != 0) {
            if got < limits.min_results || got > limits.max_results {
                return Err(QueryError::MaxResultsOutOfRange {
                    got,
                    min: limits.min_results,
                    max: limits.max_results,
                });
            }
        }
        if let (Some(start), Some(end)) = (self.start_time, self.end_time) {
            if start > end {
                return Err(QueryError::InvalidTimeRange { start, end });
            }
        }
        Ok(())
    }
}

/// A checked recent-search request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    query: String,
    options: SearchOptions,
}

impl SearchRequest {
    /// Builds a request for `query` under the default [`QueryLimits`].
    pub fn new(query: &Query, options: SearchOptions) -> QueryResult<Self> {
        Self::with_limits(query, options, &QueryLimits::default())
    }

    /// Builds a request for `query`, rejecting queries without a standalone
    /// term and options the endpoint would refuse.
    pub fn with_limits(
        query: &Query,
        options: SearchOptions,
        limits: &QueryLimits,
    ) -> QueryResult<Self> {
        let rendered = query.render();
        if !query.is_valid() {
            warn!(query = %rendered, "Rejecting search query with no standalone term");
            return Err(QueryError::NoStandaloneTerm { query: rendered });
        }
        limits.check_len(&rendered)?;
        options.check(limits)?;

        debug!(
            query = %rendered,
            max_results = ?options.max_results,
            paged = options.page_token.is_some(),
            "Built search request"
        );
        Ok(Self {
            query: rendered,
            options,
        })
    }

    /// The API path to call.
    pub fn path(&self) -> &'static str {
        SEARCH_RECENT_PATH
    }

    /// The rendered `query` parameter.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// The options the request was built with.
    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    /// Returns a copy of this request positioned at the given page.
    pub fn with_page_token(&self, token: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.options.page_token = Some(token.into());
        next
    }

    /// Request parameters in a stable order, `query` first.
    pub fn params(&self) -> Vec<(String, String)> {
        let o = &self.options;
        let mut params = vec![("query".to_string(), self.query.clone())];

        if let Some(ref token) = o.page_token {
            params.push(("next_token".to_string(), token.clone()));
        }
        if let Some(start) = o.start_time {
            params.push(("start_time".to_string(), format_time(start)));
        }
        if let Some(end) = o.end_time {
            params.push(("end_time".to_string(), format_time(end)));
        }
        if let Some(n) = o.max_results.filter(|&n| n != 0) {
            params.push(("max_results".to_string(), n.to_string()));
        }
        if let Some(ref id) = o.since_id {
            params.push(("since_id".to_string(), id.clone()));
        }
        if let Some(ref id) = o.until_id {
            params.push(("until_id".to_string(), id.clone()));
        }
        if !o.expansions.is_empty() {
            params.push(("expansions".to_string(), o.expansions.join(",")));
        }
        for (set, values) in &o.fields {
            if !values.is_empty() {
                params.push((set.label().to_string(), values.join(",")));
            }
        }
        params
    }

    /// Percent-encoded query string, without a leading `?`.
    pub fn encode(&self) -> String {
        self.params()
            .iter()
            .map(|(k, v)| {
                format!(
                    "{}={}",
                    utf8_percent_encode(k, PARAM_ENCODE_SET),
                    utf8_percent_encode(v, PARAM_ENCODE_SET)
                )
            })
            .collect::<Vec<_>>()
            .join("&")
    }
}

fn format_time(t: DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::Builder;

    const B: Builder = Builder::new();

    #[test]
    fn filter_only_query_is_rejected() {
        let q = B.and([B.is_verified(), B.not(B.has_media())]);
        let err = SearchRequest::new(&q, SearchOptions::default()).unwrap_err();
        match err {
            QueryError::NoStandaloneTerm { query } => {
                assert_eq!(query, "is:verified -has:media");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn empty_query_is_rejected() {
        let q = B.or(Vec::<Query>::new());
        assert!(matches!(
            SearchRequest::new(&q, SearchOptions::default()),
            Err(QueryError::NoStandaloneTerm { .. })
        ));
    }

    #[test]
    fn long_query_is_rejected() {
        let q = B.all(std::iter::repeat("cat").take(200));
        assert!(matches!(
            SearchRequest::new(&q, SearchOptions::default()),
            Err(QueryError::TooLong { len: 799, max: 512 })
        ));

        let limits = QueryLimits {
            max_query_len: 1024,
            ..Default::default()
        };
        assert!(SearchRequest::with_limits(&q, SearchOptions::default(), &limits).is_ok());
    }

    #[test]
    fn max_results_range() {
        let q = B.word("cat");
        for (n, ok) in [(0, true), (9, false), (10, true), (100, true), (101, false)] {
            let opts = SearchOptions {
                max_results: Some(n),
                ..Default::default()
            };
            assert_eq!(SearchRequest::new(&q, opts).is_ok(), ok, "max_results={n}");
        }
    }

    #[test]
    fn inverted_time_range_is_rejected() {
        let opts = SearchOptions {
            start_time: Some(Utc.with_ymd_and_hms(2021, 3, 2, 0, 0, 0).unwrap()),
            end_time: Some(Utc.with_ymd_and_hms(2021, 3, 1, 0, 0, 0).unwrap()),
            ..Default::default()
        };
        assert!(matches!(
            SearchRequest::new(&B.word("cat"), opts),
            Err(QueryError::InvalidTimeRange { .. })
        ));
    }

    #[test]
    fn params_in_order() {
        let q = B.and([B.some(["cat", "dog"]), B.has_images()]);
        let opts = SearchOptions {
            start_time: Some(Utc.with_ymd_and_hms(2021, 3, 1, 12, 30, 0).unwrap()),
            max_results: Some(50),
            since_id: Some("1000".into()),
            ..Default::default()
        }
        .with_expansions(["author_id"])
        .with_fields(FieldSet::User, ["username"])
        .with_fields(FieldSet::Tweet, ["created_at", "lang"]);

        let req = SearchRequest::new(&q, opts).unwrap();
        assert_eq!(req.path(), "2/tweets/search/recent");
        assert_eq!(
            req.params(),
            vec![
                ("query".to_string(), "(cat OR dog) has:images".to_string()),
                ("start_time".to_string(), "2021-03-01T12:30:00Z".to_string()),
                ("max_results".to_string(), "50".to_string()),
                ("since_id".to_string(), "1000".to_string()),
                ("expansions".to_string(), "author_id".to_string()),
                ("tweet.fields".to_string(), "created_at,lang".to_string()),
                ("user.fields".to_string(), "username".to_string()),
            ]
        );
    }

    #[test]
    fn field_sets_do_not_shadow_other_params() {
        let opts = SearchOptions::default()
            .with_expansions(["author_id"])
            .with_fields(FieldSet::Tweet, ["lang"])
            .with_fields(FieldSet::Media, ["url"])
            .with_fields(FieldSet::Tweet, ["source"]);
        let req = SearchRequest::new(&B.word("cat"), opts).unwrap();

        let params = req.params();
        let names: Vec<&str> = params.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(names, ["query", "expansions", "tweet.fields", "media.fields"]);
        assert_eq!(params[0].1, "cat");
        assert_eq!(params[2].1, "lang,source");
    }

    #[test]
    fn encode_escapes_reserved_characters() {
        let q = B.and([B.word("you are here"), B.not(B.from("@jack"))]);
        let req = SearchRequest::new(&q, SearchOptions::default()).unwrap();
        assert_eq!(req.encode(), "query=%22you%20are%20here%22%20-from%3Ajack");
    }

    #[test]
    fn page_token_is_carried_forward() {
        let req = SearchRequest::new(&B.hashtag("rust"), SearchOptions::default()).unwrap();
        let next = req.with_page_token("abc");
        assert_eq!(req.options().page_token, None);
        assert_eq!(next.params()[1], ("next_token".to_string(), "abc".to_string()));
        assert_eq!(next.query(), "#rust");
    }
}
