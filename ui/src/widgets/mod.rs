mod breadcrumbs;
mod env_version;
pub mod table;

pub use breadcrumbs::breadcrumbs;
pub use env_version::env_version;
pub use table::{TableIntent, TableWidgetState, data_table};
