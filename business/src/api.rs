//! Client for the dashboard data routes (`/api/{resource}`).

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use crate::config::BusinessConfig;
use crate::error::{BusinessError, BusinessResult};
use crate::http::{Client, Response};
use crate::page::PageMeta;

/// Response envelope of the data routes.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ApiEnvelope {
    pub success: bool,
    pub data: Value,
    pub meta: Option<PageMeta>,
    pub error: Option<String>,
}

/// Transport used by the page driver.
#[async_trait]
pub trait PageApi: Send + Sync {
    async fn get(&self, path: &str, params: &[(String, String)]) -> BusinessResult<ApiEnvelope>;

    async fn put(&self, path: &str, body: &Value) -> BusinessResult<ApiEnvelope>;
}

/// [`PageApi`] over HTTP with the caller's session token as bearer.
#[derive(Debug, Clone)]
pub struct HttpPageApi {
    client: Client,
    config: BusinessConfig,
}

impl HttpPageApi {
    pub fn new(config: BusinessConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// `path` is rooted at `/api`; the base url is prefixed here.
    fn url(&self, path: &str) -> String {
        let base = self.config.api_base_url.trim_end_matches('/');
        format!("{base}{path}")
    }
}

fn with_query(url: String, params: &[(String, String)]) -> BusinessResult<String> {
    if params.is_empty() {
        return Ok(url);
    }
    let parsed = reqwest::Url::parse_with_params(&url, params)
        .map_err(|e| BusinessError::Http(format!("invalid url {url}: {e}")))?;
    Ok(parsed.into())
}

/// Decodes a response, treating a missing `success` flag as not-found.
pub fn decode_envelope(response: &Response) -> BusinessResult<ApiEnvelope> {
    if response.status == 404 {
        return Err(BusinessError::NotFound(response.text()));
    }
    if !response.is_success() {
        return Err(BusinessError::Status {
            status: response.status,
            body: response.text(),
        });
    }
    let envelope: ApiEnvelope = response.json()?;
    if !envelope.success {
        let reason = envelope
            .error
            .unwrap_or_else(|| "response was not successful".to_owned());
        return Err(BusinessError::NotFound(reason));
    }
    Ok(envelope)
}

#[async_trait]
impl PageApi for HttpPageApi {
    async fn get(&self, path: &str, params: &[(String, String)]) -> BusinessResult<ApiEnvelope> {
        let url = with_query(self.url(path), params)?;
        let response = self
            .client
            .get(url)
            .bearer(self.config.session_token())
            .header("accept", "application/json")
            .send()
            .await?;
        decode_envelope(&response)
    }

    async fn put(&self, path: &str, body: &Value) -> BusinessResult<ApiEnvelope> {
        let response = self
            .client
            .put(self.url(path))
            .bearer(self.config.session_token())
            .json(body)?
            .send()
            .await?;
        decode_envelope(&response)
    }
}
