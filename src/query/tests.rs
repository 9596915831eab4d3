//! Tests for the query module

use super::*;
use crate::types::SortOrder;
use pretty_assertions::assert_eq;
use serde_json::json;

// ============================================================================
// Composition Tests
// ============================================================================

#[test]
fn test_match_all_is_and_identity() {
    let range = Query::range("id", RangeBound::Gt(5));
    assert_eq!(Query::MatchAll.and(range.clone()), range);
    assert_eq!(range.clone().and(Query::MatchAll), range);
}

#[test]
fn test_and_flattens() {
    let a = Query::from_dsl(json!({"term": {"kind": "a"}}));
    let b = Query::range("id", RangeBound::Gt(1));
    let c = Query::range("id", RangeBound::Lt(9));

    let combined = a.clone().and(b.clone()).and(c.clone());
    assert_eq!(combined, Query::And(vec![a.clone(), b.clone(), c.clone()]));

    let nested = a.clone().and(b.clone().and(c.clone()));
    assert_eq!(nested, Query::And(vec![a, b, c]));
}

#[test]
fn test_with_bound_leaves_original_untouched() {
    let base = Query::from_dsl(json!({"term": {"kind": "a"}}));
    let snapshot = base.clone();

    let bounded = base.with_bound("id", Comparator::Gt, 100);
    let ranged = base.with_range("id", 1, 10);

    assert_eq!(base, snapshot);
    assert_ne!(bounded, base);
    assert_ne!(ranged, bounded);
}

#[test]
fn test_cursor_bound_is_not_cumulative() {
    // Each cursor is built from the base query, never from the previous cursor.
    let base = Query::MatchAll;
    let first = base.with_bound("id", Comparator::Gt, 10);
    let second = base.with_bound("id", Comparator::Gt, 20);
    assert_eq!(second, Query::range("id", RangeBound::Gt(20)));
    assert_ne!(first, second);
}

#[test]
fn test_comparator_after_order() {
    assert_eq!(Comparator::after(SortOrder::Asc), Comparator::Gt);
    assert_eq!(Comparator::after(SortOrder::Desc), Comparator::Lt);
    assert_eq!(Comparator::Gt.as_str(), "gt");
    assert_eq!(Comparator::Lt.bound(3), RangeBound::Lt(3));
}

// ============================================================================
// DSL Serialization Tests
// ============================================================================

#[test]
fn test_match_all_dsl() {
    assert_eq!(Query::MatchAll.to_dsl(), json!({"match_all": {}}));
}

#[test]
fn test_with_bound_dsl_over_match_all() {
    let q = Query::MatchAll.with_bound("id", Comparator::Lt, -42);
    assert_eq!(q.to_dsl(), json!({"range": {"id": {"lt": -42}}}));
}

#[test]
fn test_with_range_dsl_wraps_in_bool() {
    let base = Query::from_dsl(json!({"term": {"kind": "a"}}));
    let q = base.with_range("id", 1, 500);

    assert_eq!(
        q.to_dsl(),
        json!({
            "bool": {
                "must": [{"term": {"kind": "a"}}],
                "filter": [{"range": {"id": {"gte": 1, "lte": 500}}}]
            }
        })
    );
}

#[test]
fn test_filter_only_bool() {
    let q = Query::range("id", RangeBound::Gt(1)).and(Query::range("id", RangeBound::Lt(5)));
    assert_eq!(
        q.to_dsl(),
        json!({
            "bool": {
                "filter": [
                    {"range": {"id": {"gt": 1}}},
                    {"range": {"id": {"lt": 5}}}
                ]
            }
        })
    );
}

#[test]
fn test_extreme_values_serialize_exactly() {
    let q = Query::MatchAll.with_range("id", i64::MIN, i64::MAX);
    assert_eq!(
        q.to_dsl(),
        json!({"range": {"id": {"gte": i64::MIN, "lte": i64::MAX}}})
    );
}

#[test]
fn test_query_serialize_matches_dsl() {
    let q = Query::MatchAll.with_bound("seq", Comparator::Gt, 7);
    let body = json!({ "query": q });
    assert_eq!(body, json!({"query": {"range": {"seq": {"gt": 7}}}}));
}

// ============================================================================
// Parsing Tests
// ============================================================================

#[test]
fn test_from_dsl_str_blank_is_match_all() {
    assert!(Query::from_dsl_str("").unwrap().is_match_all());
    assert!(Query::from_dsl_str("   \n").unwrap().is_match_all());
    assert!(Query::from_dsl_str(r#"{"match_all":{}}"#)
        .unwrap()
        .is_match_all());
}

#[test]
fn test_from_dsl_str_keeps_raw_query() {
    let q = Query::from_dsl_str(r#"{"term": {"user": "kimchy"}}"#).unwrap();
    assert_eq!(q, Query::Dsl(json!({"term": {"user": "kimchy"}})));
}

#[test]
fn test_from_dsl_str_rejects_malformed() {
    assert!(matches!(
        Query::from_dsl_str("{\"term\":"),
        Err(crate::Error::JsonParse(_))
    ));
    assert!(matches!(
        Query::from_dsl_str("[1, 2]"),
        Err(crate::Error::InvalidArgument { .. })
    ));
}

// ============================================================================
// Evaluation Tests
// ============================================================================

#[test]
fn test_range_bound_contains() {
    assert!(RangeBound::Gt(1).contains(2));
    assert!(!RangeBound::Gt(1).contains(1));
    assert!(RangeBound::Lt(1).contains(0));
    assert!(!RangeBound::Lt(1).contains(1));
    let between = RangeBound::Between { start: -3, end: 3 };
    assert!(between.contains(-3));
    assert!(between.contains(3));
    assert!(!between.contains(4));
}

#[test]
fn test_matches_documents() {
    let q = Query::MatchAll.with_range("id", 10, 20).with_bound("id", Comparator::Gt, 15);

    assert!(q.matches(&json!({"id": 16})).unwrap());
    assert!(!q.matches(&json!({"id": 15})).unwrap());
    assert!(!q.matches(&json!({"id": 21})).unwrap());
    assert!(!q.matches(&json!({"name": "no id"})).unwrap());
    assert!(!q.matches(&json!({"id": "16"})).unwrap());
}

#[test]
fn test_matches_rejects_raw_dsl() {
    let q = Query::from_dsl(json!({"term": {"kind": "a"}}));
    let result = q.matches(&json!({"kind": "a"}));
    assert!(matches!(result, Err(crate::Error::UnsupportedQuery { .. })));
}
