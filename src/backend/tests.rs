//! Tests for the backend module

use super::*;
use crate::error::Error;
use crate::http::{HttpClient, HttpClientConfig};
use crate::query::{Comparator, Query};
use crate::types::SortOrder;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn es_backend(server: &MockServer) -> ElasticsearchBackend {
    let config = HttpClientConfig::builder().base_url(server.uri()).build();
    ElasticsearchBackend::new(HttpClient::with_config(config).unwrap())
}

fn fetch_request<'a>(query: &'a Query, from: i64, size: i64) -> FetchRequest<'a> {
    FetchRequest {
        index: "test_data",
        query,
        source: None,
        sort_field: "id",
        order: SortOrder::Asc,
        from,
        size,
    }
}

// ============================================================================
// Elasticsearch Request Shape Tests
// ============================================================================

#[test]
fn test_search_body() {
    let query = Query::MatchAll.with_bound("id", Comparator::Gt, 10);
    let source = vec!["id".to_string(), "name".to_string()];
    let request = FetchRequest {
        index: "test_data_*",
        query: &query,
        source: Some(source.as_slice()),
        sort_field: "id",
        order: SortOrder::Desc,
        from: 5,
        size: 100,
    };

    assert_eq!(
        ElasticsearchBackend::search_body(&request),
        json!({
            "query": {"range": {"id": {"gt": 10}}},
            "sort": [{"id": "desc"}],
            "from": 5,
            "size": 100,
            "track_total_hits": false,
            "_source": ["id", "name"]
        })
    );
}

#[test]
fn test_search_body_without_source_filter() {
    let query = Query::MatchAll;
    let body = ElasticsearchBackend::search_body(&fetch_request(&query, 0, 1));
    assert!(body.get("_source").is_none());
}

#[test]
fn test_count_body() {
    let query = Query::from_dsl(json!({"term": {"kind": "a"}}));
    assert_eq!(
        ElasticsearchBackend::count_body(&query),
        json!({"query": {"term": {"kind": "a"}}})
    );
}

#[test]
fn test_decode_hit_prefers_sort_array() {
    let hit = json!({"_id": "1", "_source": {"id": 7}, "sort": [9]});
    let doc = ElasticsearchBackend::decode_hit(hit.clone(), "id").unwrap();
    assert_eq!(doc.sort_value, 9);
    assert_eq!(doc.payload, hit);
}

#[test]
fn test_decode_hit_falls_back_to_source() {
    let hit = json!({"_id": "1", "_source": {"id": -7}});
    let doc = ElasticsearchBackend::decode_hit(hit, "id").unwrap();
    assert_eq!(doc.sort_value, -7);

    let hit = json!({"_id": "2", "_source": {"id": "123"}});
    assert_eq!(ElasticsearchBackend::decode_hit(hit, "id").unwrap().sort_value, 123);
}

#[test]
fn test_decode_hit_keeps_full_i64_precision() {
    let hit = json!({"_id": "big", "sort": [i64::MAX]});
    assert_eq!(
        ElasticsearchBackend::decode_hit(hit, "id").unwrap().sort_value,
        i64::MAX
    );
}

#[test]
fn test_decode_hit_without_sort_value() {
    let hit = json!({"_id": "abc", "_source": {"name": "x"}});
    match ElasticsearchBackend::decode_hit(hit, "id") {
        Err(Error::Decode { message }) => assert!(message.contains("[abc]")),
        other => panic!("Expected decode error, got {other:?}"),
    }
}

// ============================================================================
// Elasticsearch Round Trip Tests
// ============================================================================

#[tokio::test]
async fn test_es_count() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/test_data/_count"))
        .and(body_json(json!({"query": {"match_all": {}}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 1000000,
            "_shards": {"total": 1, "successful": 1, "skipped": 0, "failed": 0}
        })))
        .mount(&mock_server)
        .await;

    let backend = es_backend(&mock_server);
    let count = backend.count("test_data", &Query::MatchAll).await.unwrap();
    assert_eq!(count, 1_000_000);
}

#[tokio::test]
async fn test_es_fetch() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/test_data/_search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "took": 3,
            "hits": {
                "hits": [
                    {"_id": "a", "_source": {"id": 1}, "sort": [1]},
                    {"_id": "b", "_source": {"id": 2}, "sort": [2]}
                ]
            }
        })))
        .mount(&mock_server)
        .await;

    let backend = es_backend(&mock_server);
    let query = Query::MatchAll;
    let batch = backend.fetch(&fetch_request(&query, 0, 2)).await.unwrap();

    assert_eq!(batch.len(), 2);
    assert_eq!(batch[0].sort_value, 1);
    assert_eq!(batch[1].payload["_id"], "b");
}

#[tokio::test]
async fn test_es_fetch_empty_hits() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/test_data/_search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"hits": {"hits": []}})))
        .mount(&mock_server)
        .await;

    let backend = es_backend(&mock_server);
    let query = Query::MatchAll;
    let batch = backend.fetch(&fetch_request(&query, 0, 10)).await.unwrap();
    assert!(batch.is_empty());
}

#[tokio::test]
async fn test_es_fetch_window_rejected() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/test_data/_search"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": {"type": "illegal_argument_exception",
                      "reason": "Result window is too large"}
        })))
        .mount(&mock_server)
        .await;

    let backend = es_backend(&mock_server);
    let query = Query::MatchAll;
    let err = backend
        .fetch(&fetch_request(&query, 20_000, 10))
        .await
        .unwrap_err();

    assert!(err.is_backend());
    assert!(matches!(err, Error::HttpStatus { status: 400, .. }));
}

#[tokio::test]
async fn test_es_count_malformed_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/test_data/_count"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"counted": 3})))
        .mount(&mock_server)
        .await;

    let backend = es_backend(&mock_server);
    let result = backend.count("test_data", &Query::MatchAll).await;
    assert!(matches!(result, Err(Error::Decode { .. })));
}

#[tokio::test]
async fn test_es_ping() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "node1",
            "cluster_name": "search",
            "version": {"number": "8.13.4"}
        })))
        .mount(&mock_server)
        .await;

    let info = es_backend(&mock_server).ping().await.unwrap();
    assert_eq!(info.cluster_name, "search");
    assert_eq!(info.version.number, "8.13.4");
}

// ============================================================================
// Memory Backend Tests
// ============================================================================

fn memory_backend() -> MemoryBackend {
    let mut backend = MemoryBackend::with_caps(10, 5);
    backend.extend(
        "test_data_1",
        (1..=6).map(|id| json!({"id": id * 10, "name": format!("doc-{id}"), "extra": true})),
    );
    backend.extend(
        "test_data_2",
        (1..=4).map(|id| json!({"id": -id, "name": format!("neg-{id}")})),
    );
    backend
}

#[tokio::test]
async fn test_memory_count_with_wildcard() {
    let backend = memory_backend();
    assert_eq!(backend.count("test_data_*", &Query::MatchAll).await.unwrap(), 10);
    assert_eq!(backend.count("test_data_2", &Query::MatchAll).await.unwrap(), 4);
    assert_eq!(
        backend
            .count("test_data_1,test_data_2", &Query::MatchAll.with_range("id", -2, 20))
            .await
            .unwrap(),
        4
    );
    assert_eq!(backend.count("other_*", &Query::MatchAll).await.unwrap(), 0);
}

#[tokio::test]
async fn test_memory_missing_index() {
    let backend = memory_backend();
    let result = backend.count("nope", &Query::MatchAll).await;
    assert!(matches!(result, Err(Error::Backend { .. })));
}

#[tokio::test]
async fn test_memory_fetch_orders_and_pages() {
    let backend = memory_backend();
    let query = Query::MatchAll;

    let mut request = fetch_request(&query, 2, 3);
    request.index = "test_data_*";
    let batch = backend.fetch(&request).await.unwrap();
    let values: Vec<i64> = batch.iter().map(|d| d.sort_value).collect();
    assert_eq!(values, vec![-2, -1, 10]);

    request.order = SortOrder::Desc;
    request.from = 0;
    let batch = backend.fetch(&request).await.unwrap();
    let values: Vec<i64> = batch.iter().map(|d| d.sort_value).collect();
    assert_eq!(values, vec![60, 50, 40]);
    assert_eq!(batch[0].payload["_index"], "test_data_1");
    assert_eq!(batch[0].payload["sort"], json!([60]));
}

#[tokio::test]
async fn test_memory_enforces_caps() {
    let backend = memory_backend();
    let query = Query::MatchAll;

    let mut request = fetch_request(&query, 11, 1);
    request.index = "test_data_1";
    assert!(matches!(
        backend.fetch(&request).await,
        Err(Error::Backend { .. })
    ));

    request.from = 0;
    request.size = 6;
    assert!(matches!(
        backend.fetch(&request).await,
        Err(Error::Backend { .. })
    ));

    request.size = 5;
    assert_eq!(backend.fetch(&request).await.unwrap().len(), 5);
}

#[tokio::test]
async fn test_memory_source_projection() {
    let backend = memory_backend();
    let query = Query::MatchAll;
    let source = vec!["id".to_string(), "na*".to_string()];

    let mut request = fetch_request(&query, 0, 1);
    request.index = "test_data_1";
    request.source = Some(source.as_slice());

    let batch = backend.fetch(&request).await.unwrap();
    assert_eq!(
        batch[0].payload["_source"],
        json!({"id": 10, "name": "doc-1"})
    );
}

#[tokio::test]
async fn test_memory_missing_sort_field() {
    let mut backend = MemoryBackend::new();
    backend.insert("idx", json!({"name": "no id"}));

    let query = Query::MatchAll;
    let mut request = fetch_request(&query, 0, 1);
    request.index = "idx";
    assert!(matches!(
        backend.fetch(&request).await,
        Err(Error::Decode { .. })
    ));
}

#[tokio::test]
async fn test_memory_delete_where() {
    let mut backend = memory_backend();
    backend.delete_where("id", |id| id < 0);
    assert_eq!(backend.count("test_data_*", &Query::MatchAll).await.unwrap(), 6);
}

#[tokio::test]
async fn test_shared_backend_handles() {
    let backend = Arc::new(memory_backend());
    assert_eq!(backend.count("test_data_1", &Query::MatchAll).await.unwrap(), 6);

    let borrowed = &*backend;
    assert_eq!(
        SearchBackend::count(&borrowed, "test_data_2", &Query::MatchAll)
            .await
            .unwrap(),
        4
    );
}
