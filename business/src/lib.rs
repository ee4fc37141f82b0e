//! Domain core of the cohort dashboard.
//!
//! Column descriptors describe how rows render and which cells are editable,
//! [`PageRenderer`] drives a generic table page as a pure state machine, and
//! [`PageDriver`] executes its requests against the data routes.

mod api;
mod breadcrumbs;
mod columns;
mod config;
mod driver;
mod error;
mod http;
mod page;
mod payload;
mod pivot;
mod record;
mod table;

pub use api::{ApiEnvelope, HttpPageApi, PageApi, decode_envelope};
pub use breadcrumbs::{Breadcrumb, generate_breadcrumbs, generate_breadcrumbs_with_home};
pub use columns::{
    CellDisplay, CellKind, ColumnDescriptor, DEFAULT_TAG_COLOR, SelectOption,
    applications_columns, companies_columns, contacts_columns, format_date, startups_columns,
    thesis_stage_columns,
};
pub use config::{BusinessConfig, DEFAULT_PAGE_SIZE};
pub use driver::{PageDriver, execute, run_until_idle};
pub use error::{BusinessError, BusinessResult};
pub use http::{Client, Method, RequestBuilder, Response};
pub use page::{
    BY_ID_FILTER_KEY, PageConfig, PageKind, PageMeta, PageOutcome, PageQuery, PageRenderer,
    PageRequest, PageState, RequestId, RowsPage, TAB_OPTIONS_PAGE_SIZE, TabFilter, TabOption,
    TabSource, tab_options_from,
};
pub use payload::{
    APPLICATIONS_ENTITY, EVALUATION_STAGE_KEY, STARTUP_KEY, UpdatePlan, build_update_payload,
    plan_update,
};
pub use pivot::{format_startups_for_stage_table, thesis_startups};
pub use record::{EvaluationStage, RowRecord, stage_key};
pub use table::TableView;
