//! Thin HTTP layer over `reqwest`.
//!
//! Requests are described by a [`RequestBuilder`] and resolved into a plain
//! [`Response`] holding only owned data, so results can be moved across the
//! channel back to the UI thread.

use std::collections::HashMap;

use cohort_utils::version_info::format_env_version;

use crate::error::{BusinessError, BusinessResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Put,
}

#[derive(Debug, Clone)]
pub struct Response {
    pub status: u16,
    /// Lowercased header names.
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
}

impl Response {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_lowercase()).map(String::as_str)
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn json<T: serde::de::DeserializeOwned>(&self) -> BusinessResult<T> {
        serde_json::from_slice(&self.body).map_err(|e| BusinessError::Decode(e.to_string()))
    }
}

#[derive(Debug, Clone)]
pub struct RequestBuilder {
    client: reqwest::Client,
    method: Method,
    url: String,
    headers: HashMap<String, String>,
    body: Option<Vec<u8>>,
}

impl RequestBuilder {
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Adds `Authorization: Bearer <token>` when a token is present.
    pub fn bearer(self, token: Option<&str>) -> Self {
        match token {
            Some(token) => self.header("authorization", format!("Bearer {token}")),
            None => self,
        }
    }

    pub fn json<T: serde::Serialize>(mut self, value: &T) -> BusinessResult<Self> {
        let bytes = serde_json::to_vec(value).map_err(|e| BusinessError::Decode(e.to_string()))?;
        self.body = Some(bytes);
        self.headers
            .insert("content-type".to_owned(), "application/json".to_owned());
        Ok(self)
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub async fn send(self) -> BusinessResult<Response> {
        let mut request = match self.method {
            Method::Get => self.client.get(&self.url),
            Method::Put => self.client.put(&self.url),
        };
        for (name, value) in &self.headers {
            request = request.header(name, value);
        }
        if let Some(body) = self.body {
            request = request.body(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| BusinessError::Http(e.to_string()))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_lowercase(), v.to_owned()))
            })
            .collect();
        let body = response
            .bytes()
            .await
            .map_err(|e| BusinessError::Http(e.to_string()))?
            .to_vec();

        Ok(Response {
            status,
            headers,
            body,
        })
    }
}

/// Shares one connection pool across requests.
#[derive(Debug, Clone)]
pub struct Client {
    inner: reqwest::Client,
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

impl Client {
    pub fn new() -> Self {
        let user_agent = format!("cohort-dashboard/{}", format_env_version());
        let inner = reqwest::Client::builder()
            .user_agent(user_agent)
            .build()
            .unwrap_or_default();
        Self { inner }
    }

    pub fn get(&self, url: impl Into<String>) -> RequestBuilder {
        self.request(Method::Get, url)
    }

    pub fn put(&self, url: impl Into<String>) -> RequestBuilder {
        self.request(Method::Put, url)
    }

    fn request(&self, method: Method, url: impl Into<String>) -> RequestBuilder {
        RequestBuilder {
            client: self.inner.clone(),
            method,
            url: url.into(),
            headers: HashMap::new(),
            body: None,
        }
    }
}
