//! `tweetq`: typed search-query expressions for the Twitter v2 API.
//!
//! A [`Query`] is a small boolean expression over words, tagged terms
//! (`from:`, `#`, `@`, `url:`, ...) and field filters (`has:images`,
//! `lang:en`, ...). Queries are built with a stateless [`Builder`] whose
//! combinators normalize as they go: nested `And`/`Or` nodes of the same kind
//! are flattened, `Not` is pushed down to the leaves by De Morgan's laws, and
//! double negations cancel. Every tree that exists is already normalized.
//!
//! A query renders into the search grammar with [`Query::render`] (or
//! `Display`), and [`Query::is_valid`] reports whether it contains a
//! standalone term. Filters alone cannot justify a search, so
//! `has:images -is:retweet` renders fine but is not valid.
//!
//! [`SearchRequest`] and [`RuleUpdate`] turn a query into request parameters
//! for the recent-search and filtered-stream-rule endpoints, rejecting invalid
//! queries before they reach the network. Transport, signing and reply
//! decoding are left to the caller.

#![warn(missing_docs)]

mod builder;
mod config;
mod error;
mod query;
mod rules;
mod search;

pub use builder::Builder;
pub use config::QueryLimits;
pub use error::{QueryError, QueryResult};
pub use query::{Conjunction, Disjunction, Filter, Negation, Query, Tag, Tagged, Word};
pub use rules::{RuleAdd, RuleQuery, RuleUpdate, STREAM_RULES_PATH};
pub use search::{FieldSet, SearchOptions, SearchRequest, SEARCH_RECENT_PATH};
