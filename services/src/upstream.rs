//! Client for the upstream backend REST service.
//!
//! Every dashboard resource maps onto one upstream collection; see
//! [`Resource::upstream_path`]. Responses come wrapped as
//! `{success, data, meta?}`.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// `UPSTREAM_URL` value that selects [`MemoryUpstream`] in local runs.
pub const MEMORY_UPSTREAM_URL: &str = "memory";

#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("upstream returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("upstream request failed: {0}")]
    Transport(String),
    #[error("failed to decode upstream response: {0}")]
    Decode(String),
}

/// Dashboard resources served under `/api/{resource}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Applications,
    Startups,
    Companies,
    Contacts,
    Thesis,
}

impl Resource {
    pub const ALL: [Self; 5] = [
        Self::Applications,
        Self::Startups,
        Self::Companies,
        Self::Contacts,
        Self::Thesis,
    ];

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.as_str() == raw)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Applications => "applications",
            Self::Startups => "startups",
            Self::Companies => "companies",
            Self::Contacts => "contacts",
            Self::Thesis => "thesis",
        }
    }

    pub fn upstream_path(&self) -> &'static str {
        match self {
            Self::Applications => "/startup-application",
            Self::Startups => "/startup",
            Self::Companies => "/organization",
            Self::Contacts => "/contacts",
            Self::Thesis => "/thesis",
        }
    }
}

/// Pagination block of upstream list responses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpstreamMeta {
    pub total_pages: u32,
    pub has_next_page: bool,
    pub has_previous_page: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
}

impl UpstreamMeta {
    pub fn for_page(page: u32, page_size: u32, total: u64) -> Self {
        let page_size = u64::from(page_size.max(1));
        let total_pages = u32::try_from(total.div_ceil(page_size)).unwrap_or(u32::MAX);
        Self {
            total_pages,
            has_next_page: page < total_pages,
            has_previous_page: page > 1,
            total: Some(total),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamPage {
    pub data: Value,
    pub meta: Option<UpstreamMeta>,
}

/// List parameters forwarded as query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub page: u32,
    pub page_size: u32,
    /// Extra `key=value` filters, e.g. `type=founder`.
    pub filters: Vec<(String, String)>,
}

impl ListQuery {
    pub fn new(page: u32, page_size: u32) -> Self {
        Self {
            page,
            page_size,
            filters: Vec::new(),
        }
    }

    pub fn with_filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.push((key.into(), value.into()));
        self
    }

    fn to_params(&self) -> Vec<(String, String)> {
        let mut params = vec![
            ("page".to_owned(), self.page.to_string()),
            ("pageSize".to_owned(), self.page_size.to_string()),
        ];
        params.extend(self.filters.iter().cloned());
        params
    }
}

/// Backend the routes forward to. `bearer` is the exchanged upstream token.
pub trait Upstream: Clone + Send + Sync + 'static {
    fn is_reachable(&self) -> impl Future<Output = bool> + Send;

    fn list(
        &self,
        resource: Resource,
        query: &ListQuery,
        bearer: &str,
    ) -> impl Future<Output = Result<UpstreamPage, UpstreamError>> + Send;

    fn get(
        &self,
        resource: Resource,
        id: &str,
        bearer: &str,
    ) -> impl Future<Output = Result<Value, UpstreamError>> + Send;

    fn put(
        &self,
        resource: Resource,
        id: &str,
        body: &Value,
        bearer: &str,
    ) -> impl Future<Output = Result<Value, UpstreamError>> + Send;
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct UpstreamEnvelope {
    success: Option<bool>,
    data: Value,
    meta: Option<UpstreamMeta>,
    #[serde(alias = "message")]
    error: Option<String>,
}

fn decode_envelope(status: u16, body: &[u8]) -> Result<UpstreamPage, UpstreamError> {
    if status == 404 {
        return Err(UpstreamError::NotFound(
            String::from_utf8_lossy(body).into_owned(),
        ));
    }
    if !(200..300).contains(&status) {
        return Err(UpstreamError::Status {
            status,
            body: String::from_utf8_lossy(body).into_owned(),
        });
    }
    let envelope: UpstreamEnvelope =
        serde_json::from_slice(body).map_err(|e| UpstreamError::Decode(e.to_string()))?;
    if envelope.success != Some(true) {
        return Err(UpstreamError::NotFound(
            envelope
                .error
                .unwrap_or_else(|| "response was not successful".to_owned()),
        ));
    }
    Ok(UpstreamPage {
        data: envelope.data,
        meta: envelope.meta,
    })
}

/// [`Upstream`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpUpstream {
    client: reqwest::Client,
    base_url: String,
}

impl HttpUpstream {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_owned(),
        }
    }

    fn url(&self, resource: Resource, id: Option<&str>) -> String {
        match id {
            Some(id) => format!("{}{}/{}", self.base_url, resource.upstream_path(), id),
            None => format!("{}{}", self.base_url, resource.upstream_path()),
        }
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<UpstreamPage, UpstreamError> {
        let response = request
            .send()
            .await
            .map_err(|e| UpstreamError::Transport(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| UpstreamError::Transport(e.to_string()))?;
        decode_envelope(status, &body)
    }
}

impl Upstream for HttpUpstream {
    async fn is_reachable(&self) -> bool {
        let url = format!("{}/health", self.base_url);
        match self.client.get(&url).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                warn!("Upstream health check failed: {}", e);
                false
            }
        }
    }

    async fn list(
        &self,
        resource: Resource,
        query: &ListQuery,
        bearer: &str,
    ) -> Result<UpstreamPage, UpstreamError> {
        let url = self.url(resource, None);
        debug!(%url, page = query.page, page_size = query.page_size, "upstream list");
        let request = self
            .client
            .get(url)
            .query(&query.to_params())
            .bearer_auth(bearer);
        self.send(request).await
    }

    async fn get(&self, resource: Resource, id: &str, bearer: &str) -> Result<Value, UpstreamError> {
        let url = self.url(resource, Some(id));
        debug!(%url, "upstream get");
        let request = self.client.get(url).bearer_auth(bearer);
        self.send(request).await.map(|page| page.data)
    }

    async fn put(
        &self,
        resource: Resource,
        id: &str,
        body: &Value,
        bearer: &str,
    ) -> Result<Value, UpstreamError> {
        let url = self.url(resource, Some(id));
        debug!(%url, "upstream put");
        let request = self.client.put(url).json(body).bearer_auth(bearer);
        self.send(request).await.map(|page| page.data)
    }
}

/// In-memory [`Upstream`] for tests and running without a backend.
///
/// Rows are keyed by their `id`. Filters match top-level fields by string
/// equality. Updates merge the `{resource}` fragment of the body into the
/// row, plus any sibling fragment whose key names a nested object of the row.
#[derive(Debug, Clone, Default)]
pub struct MemoryUpstream {
    rows: Arc<RwLock<HashMap<Resource, Vec<Value>>>>,
    unreachable: bool,
    bearers: Arc<RwLock<Vec<String>>>,
}

impl MemoryUpstream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unreachable() -> Self {
        Self {
            unreachable: true,
            ..Self::default()
        }
    }

    pub fn with_rows(self, resource: Resource, rows: Vec<Value>) -> Self {
        if let Ok(mut guard) = self.rows.write() {
            guard.insert(resource, rows);
        }
        self
    }

    /// Bearer tokens seen so far, oldest first.
    pub fn bearers(&self) -> Vec<String> {
        self.bearers.read().map(|b| b.clone()).unwrap_or_default()
    }

    fn record(&self, bearer: &str) {
        if let Ok(mut guard) = self.bearers.write() {
            guard.push(bearer.to_owned());
        }
    }

    fn snapshot(&self, resource: Resource) -> Vec<Value> {
        self.rows
            .read()
            .ok()
            .and_then(|rows| rows.get(&resource).cloned())
            .unwrap_or_default()
    }
}

fn id_matches(row: &Value, id: &str) -> bool {
    match row.get("id") {
        Some(Value::String(s)) => s == id,
        Some(Value::Number(n)) => n.to_string() == id,
        _ => false,
    }
}

fn field_matches(row: &Value, key: &str, expected: &str) -> bool {
    match row.get(key) {
        Some(Value::String(s)) => s == expected,
        Some(Value::Null) | None => false,
        Some(other) => other.to_string() == expected,
    }
}

fn merge_into(target: &mut Map<String, Value>, fragment: &Value) {
    if let Value::Object(fields) = fragment {
        for (key, value) in fields {
            target.insert(key.clone(), value.clone());
        }
    }
}

impl Upstream for MemoryUpstream {
    async fn is_reachable(&self) -> bool {
        !self.unreachable
    }

    async fn list(
        &self,
        resource: Resource,
        query: &ListQuery,
        bearer: &str,
    ) -> Result<UpstreamPage, UpstreamError> {
        self.record(bearer);
        let matching: Vec<Value> = self
            .snapshot(resource)
            .into_iter()
            .filter(|row| {
                query
                    .filters
                    .iter()
                    .all(|(key, value)| field_matches(row, key, value))
            })
            .collect();

        let page_size = query.page_size.max(1) as usize;
        let start = (query.page.max(1) as usize - 1) * page_size;
        let data: Vec<Value> = matching.iter().skip(start).take(page_size).cloned().collect();
        let meta = UpstreamMeta::for_page(query.page, query.page_size, matching.len() as u64);

        Ok(UpstreamPage {
            data: Value::Array(data),
            meta: Some(meta),
        })
    }

    async fn get(&self, resource: Resource, id: &str, bearer: &str) -> Result<Value, UpstreamError> {
        self.record(bearer);
        self.snapshot(resource)
            .into_iter()
            .find(|row| id_matches(row, id))
            .ok_or_else(|| UpstreamError::NotFound(format!("{} {}", resource.as_str(), id)))
    }

    async fn put(
        &self,
        resource: Resource,
        id: &str,
        body: &Value,
        bearer: &str,
    ) -> Result<Value, UpstreamError> {
        self.record(bearer);
        let mut guard = self
            .rows
            .write()
            .map_err(|e| UpstreamError::Transport(e.to_string()))?;
        let row = guard
            .get_mut(&resource)
            .and_then(|rows| rows.iter_mut().find(|row| id_matches(row, id)))
            .and_then(Value::as_object_mut)
            .ok_or_else(|| UpstreamError::NotFound(format!("{} {}", resource.as_str(), id)))?;

        if let Value::Object(fragments) = body {
            for (key, fragment) in fragments {
                if key == resource.as_str() {
                    merge_into(row, fragment);
                } else if let Some(Value::Object(nested)) = row.get_mut(key) {
                    merge_into(nested, fragment);
                }
            }
        }

        Ok(Value::Object(row.clone()))
    }
}
