//! Shared types for V1 API endpoints.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};

use crate::config::MAX_PAGE_SIZE;
use crate::upstream::{UpstreamMeta, UpstreamPage};

/// Generic error response for V1 API.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct V1ErrorResponse {
    pub error: String,
    pub message: String,
}

impl V1ErrorResponse {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            error: "not_found".to_owned(),
            message: message.into(),
        }
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self {
            error: "internal_error".to_owned(),
            message: message.into(),
        }
    }

    pub fn not_implemented(message: impl Into<String>) -> Self {
        Self {
            error: "not_implemented".to_owned(),
            message: message.into(),
        }
    }
}

/// Pagination parameters shared by list endpoints.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct V1ListQuery {
    /// 1-based page number (default 1).
    pub page: Option<u32>,
    /// Items per page, 1 to 100.
    pub page_size: Option<u32>,
}

impl V1ListQuery {
    /// `(page, page_size)` with defaults applied and bounds enforced.
    pub fn resolve(&self, default_page_size: u32) -> (u32, u32) {
        let page = self.page.unwrap_or(1).max(1);
        let page_size = self
            .page_size
            .unwrap_or(default_page_size)
            .clamp(1, MAX_PAGE_SIZE);
        (page, page_size)
    }
}

/// One page of a collection.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct V1Paginated {
    #[schema(value_type = Vec<Object>)]
    pub data: Vec<Value>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u32,
    pub has_next: bool,
    pub has_prev: bool,
}

impl V1Paginated {
    /// Builds the page from an upstream response, computing whatever the
    /// upstream meta leaves out.
    pub fn from_upstream(page: u32, page_size: u32, upstream: UpstreamPage) -> Self {
        let data = match upstream.data {
            Value::Array(items) => items,
            Value::Null => Vec::new(),
            other => vec![other],
        };
        let count = data.len() as u64;
        let meta = match upstream.meta {
            Some(meta) => UpstreamMeta {
                total: meta.total.or(Some(count)),
                ..meta
            },
            None => UpstreamMeta::for_page(page, page_size, count),
        };

        Self {
            data,
            total: meta.total.unwrap_or(count),
            page,
            page_size,
            total_pages: meta.total_pages,
            has_next: page < meta.total_pages,
            has_prev: page > 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_list_query_defaults_and_clamps() {
        assert_eq!(V1ListQuery::default().resolve(10), (1, 10));

        let query = V1ListQuery {
            page: Some(0),
            page_size: Some(500),
        };
        assert_eq!(query.resolve(10), (1, 100));

        let query = V1ListQuery {
            page: Some(3),
            page_size: Some(0),
        };
        assert_eq!(query.resolve(10), (3, 1));
    }

    #[test]
    fn test_paginated_from_upstream_meta() {
        let page = V1Paginated::from_upstream(
            2,
            10,
            UpstreamPage {
                data: json!([{ "id": "1" }]),
                meta: Some(UpstreamMeta {
                    total_pages: 3,
                    has_next_page: true,
                    has_previous_page: true,
                    total: Some(21),
                }),
            },
        );

        assert_eq!(page.total, 21);
        assert_eq!(page.total_pages, 3);
        assert!(page.has_next);
        assert!(page.has_prev);
    }

    #[test]
    fn test_paginated_without_meta() {
        let page = V1Paginated::from_upstream(
            1,
            10,
            UpstreamPage {
                data: json!([{ "id": "1" }, { "id": "2" }]),
                meta: None,
            },
        );

        assert_eq!(page.total, 2);
        assert_eq!(page.total_pages, 1);
        assert!(!page.has_next);
        assert!(!page.has_prev);
    }

    #[test]
    fn test_paginated_serializes_camel_case() {
        let page = V1Paginated::from_upstream(
            1,
            5,
            UpstreamPage {
                data: Value::Null,
                meta: None,
            },
        );
        let json = serde_json::to_value(&page).unwrap();

        assert_eq!(json["pageSize"], 5);
        assert_eq!(json["hasNext"], false);
        assert_eq!(json["data"], json!([]));
    }
}
