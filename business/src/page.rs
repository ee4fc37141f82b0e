//! Page renderer: the state machine behind every table page.
//!
//! The renderer never performs I/O. Operations return the [`PageRequest`]
//! to execute and [`PageRenderer::apply`] consumes the matching
//! [`PageOutcome`]. Every request gets a fresh [`RequestId`]; an outcome
//! whose id is not the latest one issued is dropped, so a slow response can
//! never overwrite the result of a newer request.

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::columns::{
    ColumnDescriptor, applications_columns, companies_columns, contacts_columns,
    startups_columns, thesis_stage_columns,
};
use crate::config::DEFAULT_PAGE_SIZE;
use crate::error::BusinessResult;
use crate::payload::plan_update;
use crate::pivot::{format_startups_for_stage_table, thesis_startups};
use crate::record::{RowRecord, value_to_id};

/// Page size used when loading tab options from a remote list.
pub const TAB_OPTIONS_PAGE_SIZE: u32 = 100;

/// Filter key that switches the request path to `/{resource}/{value}`.
pub const BY_ID_FILTER_KEY: &str = "id";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageKind {
    Applications,
    Companies,
    Contacts,
    Thesis,
    Startups,
}

impl PageKind {
    pub const ALL: [Self; 5] = [
        Self::Applications,
        Self::Companies,
        Self::Contacts,
        Self::Thesis,
        Self::Startups,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Self::Applications => "Applications",
            Self::Companies => "Companies",
            Self::Contacts => "Contacts",
            Self::Thesis => "Thesis",
            Self::Startups => "Startups",
        }
    }

    /// Dashboard route, used for breadcrumbs.
    pub fn route(&self) -> &'static str {
        match self {
            Self::Applications => "/dashboard/applications",
            Self::Companies => "/dashboard/companies",
            Self::Contacts => "/dashboard/contacts",
            Self::Thesis => "/dashboard/thesis",
            Self::Startups => "/dashboard/startups",
        }
    }

    pub fn config(&self, page_size: u32) -> PageConfig {
        let (resource, columns, tab_filter) = match self {
            Self::Applications => ("applications", applications_columns(), None),
            Self::Companies => ("companies", companies_columns(), None),
            Self::Contacts => (
                "contacts",
                contacts_columns(),
                Some(TabFilter {
                    key: "type".to_owned(),
                    source: TabSource::Static(vec![
                        TabOption::new("Founders", "founder"),
                        TabOption::new("Mentors", "mentor"),
                        TabOption::new("Investors", "investor"),
                    ]),
                }),
            ),
            Self::Thesis => (
                "thesis",
                thesis_stage_columns(),
                Some(TabFilter {
                    key: BY_ID_FILTER_KEY.to_owned(),
                    source: TabSource::Remote {
                        resource: "thesis".to_owned(),
                    },
                }),
            ),
            Self::Startups => ("startups", startups_columns(), None),
        };

        PageConfig {
            kind: *self,
            resource: resource.to_owned(),
            entity: resource.to_owned(),
            columns,
            tab_filter,
            page_size: page_size.max(1),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabOption {
    pub label: String,
    pub value: String,
}

impl TabOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TabSource {
    Static(Vec<TabOption>),
    /// Options are the rows of another resource (`{id, name}`).
    Remote { resource: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabFilter {
    pub key: String,
    pub source: TabSource,
}

#[derive(Debug, Clone)]
pub struct PageConfig {
    pub kind: PageKind,
    /// Path segment under `/api`.
    pub resource: String,
    /// Root key of single-field update bodies.
    pub entity: String,
    pub columns: Vec<ColumnDescriptor>,
    pub tab_filter: Option<TabFilter>,
    pub page_size: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageMeta {
    pub total_pages: u32,
    pub has_next_page: bool,
    pub has_previous_page: bool,
}

impl PageMeta {
    /// Meta for responses that are not paginated.
    pub fn single() -> Self {
        Self {
            total_pages: 1,
            has_next_page: false,
            has_previous_page: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageState {
    pub rows: Vec<RowRecord>,
    pub meta: PageMeta,
    pub current_page: u32,
    pub tab_filter_options: Vec<TabOption>,
    pub active_tab: Option<String>,
    pub is_loading: bool,
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            meta: PageMeta::default(),
            current_page: 1,
            tab_filter_options: Vec::new(),
            active_tab: None,
            is_loading: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(u64);

impl RequestId {
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Path plus query parameters of a read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageQuery {
    pub path: String,
    pub params: Vec<(String, String)>,
}

impl PageQuery {
    fn list(resource: &str, page: u32, page_size: u32) -> Self {
        Self {
            path: format!("/api/{resource}"),
            params: vec![
                ("page".to_owned(), page.to_string()),
                ("pageSize".to_owned(), page_size.to_string()),
            ],
        }
    }

    fn by_id(resource: &str, id: &str) -> Self {
        Self {
            path: format!("/api/{resource}/{id}"),
            params: Vec::new(),
        }
    }

    /// `path?k=v&...`, unencoded; for logs and assertions.
    pub fn display(&self) -> String {
        if self.params.is_empty() {
            return self.path.clone();
        }
        let query = self
            .params
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&");
        format!("{}?{query}", self.path)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PageRequest {
    TabOptions {
        id: RequestId,
        query: PageQuery,
    },
    Rows {
        id: RequestId,
        query: PageQuery,
        page: u32,
        tab: Option<String>,
    },
    Update {
        id: RequestId,
        path: String,
        body: Value,
    },
}

impl PageRequest {
    pub fn id(&self) -> RequestId {
        match self {
            Self::TabOptions { id, .. } | Self::Rows { id, .. } | Self::Update { id, .. } => *id,
        }
    }

    /// Reads may be abandoned once superseded; writes must run to completion.
    pub fn is_read(&self) -> bool {
        !matches!(self, Self::Update { .. })
    }
}

/// Body of a successful rows response.
#[derive(Debug, Clone, PartialEq)]
pub struct RowsPage {
    pub data: Value,
    pub meta: Option<PageMeta>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PageOutcome {
    TabOptions {
        id: RequestId,
        result: BusinessResult<Vec<TabOption>>,
    },
    Rows {
        id: RequestId,
        page: u32,
        tab: Option<String>,
        result: BusinessResult<RowsPage>,
    },
    Updated {
        id: RequestId,
        result: BusinessResult<()>,
    },
}

impl PageOutcome {
    pub fn id(&self) -> RequestId {
        match self {
            Self::TabOptions { id, .. } | Self::Rows { id, .. } | Self::Updated { id, .. } => *id,
        }
    }
}

/// Reads tab options out of a list response (`[{id, name}]`).
pub fn tab_options_from(data: &Value) -> Vec<TabOption> {
    data.as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|item| {
                    let value = item.get("id").and_then(value_to_id)?;
                    let label = ["name", "title", "label"]
                        .iter()
                        .find_map(|k| item.get(*k).and_then(Value::as_str))
                        .map(str::to_owned)
                        .unwrap_or_else(|| value.clone());
                    Some(TabOption { label, value })
                })
                .collect()
        })
        .unwrap_or_default()
}

#[derive(Debug)]
pub struct PageRenderer {
    config: PageConfig,
    state: PageState,
    issued: u64,
    latest: Option<RequestId>,
}

impl PageRenderer {
    pub fn new(config: PageConfig) -> Self {
        Self {
            config,
            state: PageState::default(),
            issued: 0,
            latest: None,
        }
    }

    pub fn for_kind(kind: PageKind) -> Self {
        Self::new(kind.config(DEFAULT_PAGE_SIZE))
    }

    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    pub fn state(&self) -> &PageState {
        &self.state
    }

    pub fn latest_request(&self) -> Option<RequestId> {
        self.latest
    }

    fn issue(&mut self) -> RequestId {
        self.issued += 1;
        let id = RequestId(self.issued);
        self.latest = Some(id);
        self.state.is_loading = true;
        id
    }

    /// First request of a freshly shown page.
    pub fn mount(&mut self) -> PageRequest {
        self.state = PageState::default();

        let remote = match self.config.tab_filter.as_ref().map(|f| &f.source) {
            Some(TabSource::Remote { resource }) => Some(resource.clone()),
            Some(TabSource::Static(options)) => {
                self.state.tab_filter_options = options.clone();
                None
            }
            None => None,
        };

        match remote {
            Some(resource) => {
                let id = self.issue();
                PageRequest::TabOptions {
                    id,
                    query: PageQuery::list(&resource, 1, TAB_OPTIONS_PAGE_SIZE),
                }
            }
            None => {
                let tab = self.state.tab_filter_options.first().map(|o| o.value.clone());
                self.rows_request(1, tab)
            }
        }
    }

    fn rows_query(&self, page: u32, tab: Option<&str>) -> PageQuery {
        let resource = &self.config.resource;
        match (self.config.tab_filter.as_ref(), tab) {
            (Some(filter), Some(value)) if filter.key == BY_ID_FILTER_KEY => {
                PageQuery::by_id(resource, value)
            }
            (Some(filter), Some(value)) => {
                let mut query = PageQuery::list(resource, page, self.config.page_size);
                query.params.push((filter.key.clone(), value.to_owned()));
                query
            }
            _ => PageQuery::list(resource, page, self.config.page_size),
        }
    }

    fn rows_request(&mut self, page: u32, tab: Option<String>) -> PageRequest {
        let query = self.rows_query(page, tab.as_deref());
        let id = self.issue();
        debug!("{:?} #{} fetch {}", self.config.kind, id.0, query.display());
        PageRequest::Rows {
            id,
            query,
            page,
            tab,
        }
    }

    /// Selects a tab and reloads its first page.
    pub fn change_tab(&mut self, value: impl Into<String>) -> Option<PageRequest> {
        self.config.tab_filter.as_ref()?;
        Some(self.rows_request(1, Some(value.into())))
    }

    /// Requests page `page`, if it lies within `1..=total_pages`.
    pub fn go_to_page(&mut self, page: u32) -> Option<PageRequest> {
        if page < 1 || page > self.state.meta.total_pages {
            debug!(
                "{:?} ignoring page {} outside 1..={}",
                self.config.kind, page, self.state.meta.total_pages
            );
            return None;
        }
        let tab = self.current_tab();
        Some(self.rows_request(page, tab))
    }

    pub fn next_page(&mut self) -> Option<PageRequest> {
        self.go_to_page(self.state.current_page.saturating_add(1))
    }

    pub fn previous_page(&mut self) -> Option<PageRequest> {
        self.go_to_page(self.state.current_page.saturating_sub(1))
    }

    /// Reloads what is currently shown.
    pub fn refresh(&mut self) -> PageRequest {
        let page = self.state.current_page.max(1);
        let tab = self.current_tab();
        self.rows_request(page, tab)
    }

    /// Tab to fetch with; the first option until a rows fetch has landed.
    fn current_tab(&self) -> Option<String> {
        self.state.active_tab.clone().or_else(|| {
            self.config.tab_filter.as_ref()?;
            self.state.tab_filter_options.first().map(|o| o.value.clone())
        })
    }

    /// Commits an edited cell of row `row_index`.
    ///
    /// Returns `None` when the row does not exist or carries no `id`.
    pub fn commit_edit(
        &mut self,
        row_index: usize,
        accessor: &str,
        value: Value,
    ) -> Option<PageRequest> {
        let row = self.state.rows.get(row_index)?;
        let plan = plan_update(&self.config.entity, accessor, value, row);
        let Some(row_id) = plan.row_id else {
            warn!(
                "{:?} row {} has no id, dropping edit of {}",
                self.config.kind, row_index, accessor
            );
            return None;
        };
        let path = format!("/api/{}/{}", self.config.resource, row_id);
        let id = self.issue();
        Some(PageRequest::Update {
            id,
            path,
            body: plan.body,
        })
    }

    /// Folds an outcome into the state; may return a follow-up request.
    pub fn apply(&mut self, outcome: PageOutcome) -> Option<PageRequest> {
        if Some(outcome.id()) != self.latest {
            debug!(
                "{:?} discarding stale outcome #{}",
                self.config.kind,
                outcome.id().0
            );
            return None;
        }

        match outcome {
            PageOutcome::TabOptions { result, .. } => match result {
                Ok(options) => {
                    let first = options.first().map(|o| o.value.clone());
                    self.state.tab_filter_options = options;
                    match first {
                        Some(tab) => Some(self.rows_request(1, Some(tab))),
                        None => {
                            self.state.is_loading = false;
                            None
                        }
                    }
                }
                Err(err) => {
                    warn!("{:?} failed to load tab options: {err}", self.config.kind);
                    self.state.is_loading = false;
                    None
                }
            },
            PageOutcome::Rows {
                page, tab, result, ..
            } => {
                match result {
                    Ok(rows_page) => {
                        let rows = self.shape_rows(&rows_page.data);
                        self.state.rows = rows;
                        self.state.meta = rows_page.meta.unwrap_or_else(PageMeta::single);
                        self.state.current_page = page;
                        self.state.active_tab = tab;
                    }
                    Err(err) => {
                        warn!("{:?} failed to fetch page {page}: {err}", self.config.kind);
                    }
                }
                self.state.is_loading = false;
                None
            }
            PageOutcome::Updated { result, .. } => match result {
                Ok(()) => Some(self.refresh()),
                Err(err) => {
                    warn!("{:?} update failed: {err}", self.config.kind);
                    self.state.is_loading = false;
                    None
                }
            },
        }
    }

    fn shape_rows(&self, data: &Value) -> Vec<RowRecord> {
        if self.config.kind == PageKind::Thesis {
            return format_startups_for_stage_table(&thesis_startups(data), &self.config.columns);
        }
        match data {
            Value::Array(items) => items.iter().cloned().map(RowRecord::new).collect(),
            Value::Null => Vec::new(),
            other => vec![RowRecord::new(other.clone())],
        }
    }
}
