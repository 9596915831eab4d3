//! In-memory search backend
//!
//! Keeps documents in process and answers `count`/`fetch` the way a
//! search engine would, including a `max_result_window`-style cap on
//! `from` and `size`. Queries are evaluated with [`Query::matches`], so
//! only match-all and range filters are supported.

use super::types::{Batch, Document, FetchRequest, SearchBackend};
use crate::error::{Error, Result};
use crate::query::Query;
use crate::types::{JsonObject, JsonValue, SortOrder};
use async_trait::async_trait;
use serde_json::json;
use std::collections::BTreeMap;

/// In-process index of JSON documents
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    indices: BTreeMap<String, Vec<JsonValue>>,
    max_from: Option<i64>,
    max_size: Option<i64>,
}

impl MemoryBackend {
    /// Create an empty backend without paging caps
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty backend rejecting `from > max_from` or `size > max_size`
    pub fn with_caps(max_from: i64, max_size: i64) -> Self {
        Self {
            max_from: Some(max_from),
            max_size: Some(max_size),
            ..Self::default()
        }
    }

    /// Create an index if it does not exist yet
    pub fn create_index(&mut self, index: impl Into<String>) {
        self.indices.entry(index.into()).or_default();
    }

    /// Add one document source to an index
    pub fn insert(&mut self, index: impl Into<String>, source: JsonValue) {
        self.indices.entry(index.into()).or_default().push(source);
    }

    /// Add many document sources to an index
    pub fn extend(&mut self, index: impl Into<String>, sources: impl IntoIterator<Item = JsonValue>) {
        self.indices.entry(index.into()).or_default().extend(sources);
    }

    /// Remove every document whose `field` satisfies `predicate`
    pub fn delete_where(&mut self, field: &str, predicate: impl Fn(i64) -> bool) {
        for docs in self.indices.values_mut() {
            docs.retain(|doc| !doc.get(field).and_then(JsonValue::as_i64).is_some_and(&predicate));
        }
    }

    /// Resolve an index expression: comma separated names, `*` wildcards
    fn resolve(&self, expression: &str) -> Result<Vec<&str>> {
        let mut names = Vec::new();
        for pattern in expression.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            if let Some(prefix) = pattern.strip_suffix('*') {
                names.extend(
                    self.indices
                        .keys()
                        .filter(|name| name.starts_with(prefix))
                        .map(String::as_str),
                );
            } else if let Some((name, _)) = self.indices.get_key_value(pattern) {
                names.push(name.as_str());
            } else {
                return Err(Error::backend(format!("no such index [{pattern}]")));
            }
        }
        names.sort_unstable();
        names.dedup();
        Ok(names)
    }

    fn matching<'a>(&'a self, index: &str, query: &Query) -> Result<Vec<(&'a str, &'a JsonValue)>> {
        let mut hits = Vec::new();
        for name in self.resolve(index)? {
            for doc in &self.indices[name] {
                if query.matches(doc)? {
                    hits.push((name, doc));
                }
            }
        }
        Ok(hits)
    }

    fn check_window(&self, from: i64, size: i64) -> Result<()> {
        if from < 0 || size < 0 {
            return Err(Error::backend(format!(
                "from [{from}] and size [{size}] must be non-negative"
            )));
        }
        if let Some(max_from) = self.max_from {
            if from > max_from {
                return Err(Error::backend(format!(
                    "Result window is too large, from [{from}] exceeds [{max_from}]"
                )));
            }
        }
        if let Some(max_size) = self.max_size {
            if size > max_size {
                return Err(Error::backend(format!(
                    "Result window is too large, size [{size}] exceeds [{max_size}]"
                )));
            }
        }
        Ok(())
    }
}

/// Keep only the requested top-level source fields.
///
/// `*` keeps everything, `prefix*` matches by prefix, `obj.*` keeps `obj`.
fn project(source: &JsonValue, fields: Option<&[String]>) -> JsonValue {
    let (Some(fields), Some(object)) = (fields, source.as_object()) else {
        return source.clone();
    };
    let keep = |key: &str| {
        fields.iter().any(|field| match field.strip_suffix('*') {
            Some(prefix) => match prefix.strip_suffix('.') {
                Some(object) => key == object,
                None => key.starts_with(prefix),
            },
            None => key == field,
        })
    };
    let projected: JsonObject = object
        .iter()
        .filter(|(key, _)| keep(key))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();
    JsonValue::Object(projected)
}

#[async_trait]
impl SearchBackend for MemoryBackend {
    async fn count(&self, index: &str, query: &Query) -> Result<i64> {
        Ok(self.matching(index, query)?.len() as i64)
    }

    async fn fetch(&self, request: &FetchRequest<'_>) -> Result<Batch> {
        self.check_window(request.from, request.size)?;

        let mut hits = Vec::new();
        for (name, doc) in self.matching(request.index, request.query)? {
            let sort_value = doc
                .get(request.sort_field)
                .and_then(JsonValue::as_i64)
                .ok_or_else(|| {
                    Error::decode(format!(
                        "document in [{name}] has no integer value for sort field '{}'",
                        request.sort_field
                    ))
                })?;
            hits.push((name, doc, sort_value));
        }

        hits.sort_by_key(|(_, _, value)| *value);
        if request.order == SortOrder::Desc {
            hits.reverse();
        }

        Ok(hits
            .into_iter()
            .skip(request.from as usize)
            .take(request.size as usize)
            .map(|(name, doc, sort_value)| {
                let payload = json!({
                    "_index": name,
                    "_source": project(doc, request.source),
                    "sort": [sort_value],
                });
                Document::new(payload, sort_value)
            })
            .collect())
    }
}
