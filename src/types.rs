//! Common types used throughout es-deep-pager
//!
//! Shared type aliases and small value types used by several modules.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

/// Signed 64-bit value of the unique sort field of one document
pub type SortValue = i64;

// ============================================================================
// Sort Order
// ============================================================================

/// Direction in which the sort field is traversed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Smallest sort value first
    #[default]
    Asc,
    /// Largest sort value first
    Desc,
}

impl SortOrder {
    /// Build from an `ascending` flag
    pub fn from_ascending(ascending: bool) -> Self {
        if ascending {
            Self::Asc
        } else {
            Self::Desc
        }
    }

    /// Whether this is ascending order
    pub fn is_ascending(self) -> bool {
        matches!(self, Self::Asc)
    }

    /// The opposite order
    #[must_use]
    pub fn reversed(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    /// Elasticsearch spelling of the order
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_order() {
        assert_eq!(SortOrder::default(), SortOrder::Asc);
        assert_eq!(SortOrder::from_ascending(false), SortOrder::Desc);
        assert_eq!(SortOrder::Asc.reversed(), SortOrder::Desc);
        assert_eq!(SortOrder::Desc.reversed().reversed(), SortOrder::Desc);
        assert!(SortOrder::Asc.is_ascending());
        assert_eq!(SortOrder::Desc.to_string(), "desc");
    }

    #[test]
    fn test_sort_order_serde() {
        let order: SortOrder = serde_json::from_str("\"desc\"").unwrap();
        assert_eq!(order, SortOrder::Desc);
        assert_eq!(serde_json::to_string(&SortOrder::Asc).unwrap(), "\"asc\"");
    }
}
