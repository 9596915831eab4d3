//! Query types
//!
//! Defines the query value, its range filters and the DSL serializer.

use crate::error::{Error, Result};
use crate::types::{JsonValue, SortOrder, SortValue};
use serde::{Serialize, Serializer};
use serde_json::json;

/// Strict comparison used for cursor and boundary filters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparator {
    /// `field > value`
    Gt,
    /// `field < value`
    Lt,
}

impl Comparator {
    /// Comparator that skips everything already seen when walking in `order`
    pub fn after(order: SortOrder) -> Self {
        match order {
            SortOrder::Asc => Self::Gt,
            SortOrder::Desc => Self::Lt,
        }
    }

    /// Elasticsearch range operator name
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Gt => "gt",
            Self::Lt => "lt",
        }
    }

    /// Range bound for this comparator
    pub fn bound(self, value: SortValue) -> RangeBound {
        match self {
            Self::Gt => RangeBound::Gt(value),
            Self::Lt => RangeBound::Lt(value),
        }
    }
}

/// Bound applied to a numeric field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeBound {
    /// Strictly greater than
    Gt(SortValue),
    /// Strictly less than
    Lt(SortValue),
    /// Inclusive on both ends
    Between {
        /// Lower bound (inclusive)
        start: SortValue,
        /// Upper bound (inclusive)
        end: SortValue,
    },
}

impl RangeBound {
    /// Check whether a value satisfies the bound
    pub fn contains(&self, value: SortValue) -> bool {
        match *self {
            Self::Gt(bound) => value > bound,
            Self::Lt(bound) => value < bound,
            Self::Between { start, end } => start <= value && value <= end,
        }
    }

    fn to_dsl(self) -> JsonValue {
        match self {
            Self::Gt(value) => json!({ "gt": value }),
            Self::Lt(value) => json!({ "lt": value }),
            Self::Between { start, end } => json!({ "gte": start, "lte": end }),
        }
    }
}

/// A composable search query
///
/// `MatchAll` is the identity of [`Query::and`].
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Query {
    /// Matches every document
    #[default]
    MatchAll,
    /// Caller supplied query DSL, passed through untouched
    Dsl(JsonValue),
    /// Numeric range filter on a single field
    Range {
        /// Field name
        field: String,
        /// Bound to apply
        bound: RangeBound,
    },
    /// All parts must match
    And(Vec<Query>),
}

impl Query {
    /// Create a range filter query
    pub fn range(field: impl Into<String>, bound: RangeBound) -> Self {
        Self::Range {
            field: field.into(),
            bound,
        }
    }

    /// Wrap raw query DSL, recognising `{"match_all":{}}`
    pub fn from_dsl(dsl: JsonValue) -> Self {
        if dsl == json!({ "match_all": {} }) {
            Self::MatchAll
        } else {
            Self::Dsl(dsl)
        }
    }

    /// Parse query DSL text; blank text means match everything
    pub fn from_dsl_str(text: &str) -> Result<Self> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(Self::MatchAll);
        }
        let dsl: JsonValue = serde_json::from_str(text)?;
        if !dsl.is_object() {
            return Err(Error::invalid_argument("query must be a JSON object"));
        }
        Ok(Self::from_dsl(dsl))
    }

    /// Check if this query matches everything
    pub fn is_match_all(&self) -> bool {
        matches!(self, Self::MatchAll)
    }

    /// Combine two queries, both must match
    #[must_use]
    pub fn and(self, other: Query) -> Self {
        match (self, other) {
            (Self::MatchAll, q) | (q, Self::MatchAll) => q,
            (Self::And(mut left), Self::And(right)) => {
                left.extend(right);
                Self::And(left)
            }
            (Self::And(mut left), q) => {
                left.push(q);
                Self::And(left)
            }
            (q, Self::And(mut right)) => {
                right.insert(0, q);
                Self::And(right)
            }
            (left, right) => Self::And(vec![left, right]),
        }
    }

    /// New query additionally requiring `field <comparator> value`
    #[must_use]
    pub fn with_bound(&self, field: &str, comparator: Comparator, value: SortValue) -> Self {
        self.clone()
            .and(Self::range(field, comparator.bound(value)))
    }

    /// New query additionally requiring `start <= field <= end`
    #[must_use]
    pub fn with_range(&self, field: &str, start: SortValue, end: SortValue) -> Self {
        self.clone()
            .and(Self::range(field, RangeBound::Between { start, end }))
    }

    /// Serialize to Elasticsearch query DSL
    pub fn to_dsl(&self) -> JsonValue {
        match self {
            Self::MatchAll => json!({ "match_all": {} }),
            Self::Dsl(dsl) => dsl.clone(),
            Self::Range { field, bound } => json!({ "range": { field.as_str(): bound.to_dsl() } }),
            Self::And(parts) => {
                let (filters, musts): (Vec<&Query>, Vec<&Query>) = parts
                    .iter()
                    .partition(|q| matches!(q, Self::Range { .. }));

                let mut bool_query = serde_json::Map::new();
                if !musts.is_empty() {
                    bool_query.insert(
                        "must".to_string(),
                        JsonValue::Array(musts.iter().map(|q| q.to_dsl()).collect()),
                    );
                }
                if !filters.is_empty() {
                    bool_query.insert(
                        "filter".to_string(),
                        JsonValue::Array(filters.iter().map(|q| q.to_dsl()).collect()),
                    );
                }
                json!({ "bool": bool_query })
            }
        }
    }

    /// Evaluate against a document source, for in-process backends
    pub fn matches(&self, source: &JsonValue) -> Result<bool> {
        match self {
            Self::MatchAll => Ok(true),
            Self::Dsl(dsl) => Err(Error::unsupported_query(format!(
                "raw query DSL can only be evaluated by the search engine: {dsl}"
            ))),
            Self::Range { field, bound } => Ok(source
                .get(field)
                .and_then(JsonValue::as_i64)
                .is_some_and(|value| bound.contains(value))),
            Self::And(parts) => {
                for part in parts {
                    if !part.matches(source)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
        }
    }
}

impl Serialize for Query {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_dsl().serialize(serializer)
    }
}
