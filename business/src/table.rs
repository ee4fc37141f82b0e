//! Headless view model for the generic table widget.

use crate::columns::{CellDisplay, ColumnDescriptor};
use crate::page::{PageState, TabOption};

#[derive(Debug, Clone, PartialEq)]
pub struct TableView {
    pub headers: Vec<String>,
    /// `cells[row][column]`, in column order.
    pub cells: Vec<Vec<CellDisplay>>,
    pub current_page: u32,
    pub total_pages: u32,
    pub can_previous: bool,
    pub can_next: bool,
    pub tabs: Vec<TabOption>,
    pub active_tab: Option<String>,
    pub is_loading: bool,
}

impl TableView {
    pub fn new(columns: &[ColumnDescriptor], state: &PageState) -> Self {
        let headers = columns.iter().map(|c| c.label.clone()).collect();
        let cells = state
            .rows
            .iter()
            .map(|row| columns.iter().map(|c| c.display(row)).collect())
            .collect();
        let total_pages = state.meta.total_pages;

        Self {
            headers,
            cells,
            current_page: state.current_page,
            total_pages,
            can_previous: state.current_page > 1 && total_pages > 0,
            can_next: state.current_page < total_pages,
            tabs: state.tab_filter_options.clone(),
            active_tab: state.active_tab.clone(),
            is_loading: state.is_loading,
        }
    }

    pub fn page_label(&self) -> String {
        format!("Page {} of {}", self.current_page, self.total_pages.max(1))
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
