//! Filtered-stream rule reads and updates.
//!
//! A read fetches all rules or a chosen few by ID. Each update either adds
//! rules or deletes them by ID, never both. The same body is used to apply a
//! change and to validate it without applying it (`dry_run`).

use serde::Serialize;
use tracing::{debug, warn};

use crate::config::QueryLimits;
use crate::error::{QueryError, QueryResult};
use crate::query::Query;

/// API path for stream rule reads and updates.
pub const STREAM_RULES_PATH: &str = "2/tweets/search/stream/rules";

/// A rule to add: a query and an optional tag echoed back on matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleAdd {
    /// The rule's query.
    pub value: Query,
    /// A label for the rule.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

impl RuleAdd {
    /// An untagged rule.
    pub fn new(value: Query) -> Self {
        Self { value, tag: None }
    }

    /// A tagged rule.
    pub fn tagged(value: Query, tag: impl Into<String>) -> Self {
        Self {
            value,
            tag: Some(tag.into()),
        }
    }
}

/// A read of the current stream rules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleQuery {
    ids: Vec<String>,
}

impl RuleQuery {
    /// Reads every rule.
    pub fn all() -> Self {
        Self::default()
    }

    /// Reads the rules with the given IDs. With no IDs, reads every rule.
    pub fn by_id<I>(ids: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let ids: Vec<String> = ids.into_iter().map(Into::into).collect();
        debug!(count = ids.len(), "Built stream rule read");
        Self { ids }
    }

    /// The requested rule IDs; empty means all rules.
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// The API path to call.
    pub fn path(&self) -> &'static str {
        STREAM_RULES_PATH
    }

    /// URL parameters: `ids`, comma-joined, when specific rules are asked for.
    pub fn params(&self) -> Vec<(String, String)> {
        if self.ids.is_empty() {
            Vec::new()
        } else {
            vec![("ids".to_string(), self.ids.join(","))]
        }
    }
}

#[derive(Serialize)]
struct DeleteIds<'a> {
    ids: &'a [String],
}

/// A checked change to the stream rule set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleUpdate {
    /// Rules to add.
    Add(Vec<RuleAdd>),
    /// Rule IDs to delete.
    #[serde(serialize_with = "serialize_delete")]
    Delete(Vec<String>),
}

fn serialize_delete<S: serde::Serializer>(ids: &[String], s: S) -> Result<S::Ok, S::Error> {
    DeleteIds { ids }.serialize(s)
}

impl RuleUpdate {
    /// Adds rules under the default [`QueryLimits`].
    pub fn add(rules: impl IntoIterator<Item = RuleAdd>) -> QueryResult<Self> {
        Self::add_with_limits(rules, &QueryLimits::default())
    }

    /// Adds rules, rejecting any rule whose query has no standalone term or
    /// is too long.
    pub fn add_with_limits(
        rules: impl IntoIterator<Item = RuleAdd>,
        limits: &QueryLimits,
    ) -> QueryResult<Self> {
        let rules: Vec<RuleAdd> = rules.into_iter().collect();
        if rules.is_empty() {
            return Err(QueryError::EmptyRuleSet);
        }
        for rule in &rules {
            let rendered = rule.value.render();
            if !rule.value.is_valid() {
                warn!(query = %rendered, tag = ?rule.tag, "Rejecting stream rule with no standalone term");
                return Err(QueryError::NoStandaloneTerm { query: rendered });
            }
            limits.check_len(&rendered)?;
        }
        debug!(count = rules.len(), "Built stream rule additions");
        Ok(RuleUpdate::Add(rules))
    }

    /// Deletes rules by ID.
    pub fn delete<I>(ids: I) -> QueryResult<Self>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let ids: Vec<String> = ids.into_iter().map(Into::into).collect();
        if ids.is_empty() {
            return Err(QueryError::EmptyRuleSet);
        }
        debug!(count = ids.len(), "Built stream rule deletions");
        Ok(RuleUpdate::Delete(ids))
    }

    /// The API path to call.
    pub fn path(&self) -> &'static str {
        STREAM_RULES_PATH
    }

    /// The JSON request body.
    pub fn body(&self) -> QueryResult<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    /// URL parameters; a dry run only validates the change.
    pub fn params(&self, dry_run: bool) -> Vec<(String, String)> {
        if dry_run {
            vec![("dry_run".to_string(), "true".to_string())]
        } else {
            Vec::new()
        }
    }
}
