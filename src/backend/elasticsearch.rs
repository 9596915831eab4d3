//! Elasticsearch backend
//!
//! Maps the two backend primitives onto the `_count` and `_search` APIs.
//! All knowledge of the response JSON shape (`hits.hits`, `sort` arrays,
//! `_source`) lives here.

use super::types::{Batch, Document, FetchRequest, SearchBackend};
use crate::error::{Error, Result};
use crate::http::HttpClient;
use crate::query::Query;
use crate::types::{JsonValue, SortValue};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::trace;

#[derive(Debug, Deserialize)]
struct CountResponse {
    count: i64,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    hits: HitsEnvelope,
}

#[derive(Debug, Deserialize)]
struct HitsEnvelope {
    #[serde(default)]
    hits: Vec<JsonValue>,
}

/// Version block of the cluster root endpoint
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClusterVersion {
    /// Version number, e.g. "8.13.4"
    #[serde(default)]
    pub number: String,
}

/// Response of `GET /`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClusterInfo {
    /// Node name
    #[serde(default)]
    pub name: String,
    /// Cluster name
    #[serde(default)]
    pub cluster_name: String,
    /// Version details
    #[serde(default)]
    pub version: ClusterVersion,
}

/// Search backend talking to an Elasticsearch cluster
#[derive(Debug)]
pub struct ElasticsearchBackend {
    client: HttpClient,
}

impl ElasticsearchBackend {
    /// Create a backend over a configured HTTP client
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }

    /// The underlying HTTP client
    pub fn client(&self) -> &HttpClient {
        &self.client
    }

    /// Fetch cluster information, used as a connectivity check
    pub async fn ping(&self) -> Result<ClusterInfo> {
        self.client.get_json("/").await
    }

    /// Request body for a `_search` call
    pub fn search_body(request: &FetchRequest<'_>) -> JsonValue {
        let mut body = json!({
            "query": request.query,
            "sort": [{ request.sort_field: request.order.as_str() }],
            "from": request.from,
            "size": request.size,
            "track_total_hits": false,
        });
        if let Some(source) = request.source {
            body["_source"] = json!(source);
        }
        body
    }

    /// Request body for a `_count` call
    pub fn count_body(query: &Query) -> JsonValue {
        json!({ "query": query })
    }

    /// Turn one raw hit into a document, extracting its sort value
    pub fn decode_hit(hit: JsonValue, sort_field: &str) -> Result<Document> {
        let sort_value = hit
            .get("sort")
            .and_then(|sort| sort.get(0))
            .and_then(as_sort_value)
            .or_else(|| {
                hit.get("_source")
                    .and_then(|source| source.get(sort_field))
                    .and_then(as_sort_value)
            })
            .ok_or_else(|| {
                let id = hit.get("_id").and_then(JsonValue::as_str).unwrap_or("?");
                Error::decode(format!(
                    "hit [{id}] has no integer value for sort field '{sort_field}'"
                ))
            })?;

        Ok(Document::new(hit, sort_value))
    }
}

/// Sort values come back as JSON numbers, or as strings from some clients
fn as_sort_value(value: &JsonValue) -> Option<SortValue> {
    match value {
        JsonValue::Number(n) => n.as_i64(),
        JsonValue::String(s) => s.parse().ok(),
        _ => None,
    }
}

fn index_path(index: &str, endpoint: &str) -> String {
    format!("/{}/{endpoint}", index.trim_matches('/'))
}

#[async_trait]
impl SearchBackend for ElasticsearchBackend {
    async fn count(&self, index: &str, query: &Query) -> Result<i64> {
        let body = Self::count_body(query);
        let response: CountResponse = self
            .client
            .post_json(&index_path(index, "_count"), &body)
            .await?;
        trace!(index, count = response.count, "count probe");
        Ok(response.count)
    }

    async fn fetch(&self, request: &FetchRequest<'_>) -> Result<Batch> {
        let body = Self::search_body(request);
        let response: SearchResponse = self
            .client
            .post_json(&index_path(request.index, "_search"), &body)
            .await?;

        response
            .hits
            .hits
            .into_iter()
            .map(|hit| Self::decode_hit(hit, request.sort_field))
            .collect()
    }
}
