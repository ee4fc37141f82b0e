//! One dashboard page: a [`PageRenderer`] fed by a [`PageDriver`], drawn by
//! the generic table widget.

use std::sync::Arc;
use std::time::Duration;

use cohort_business::{PageApi, PageDriver, PageKind, PageRenderer, PageRequest, TableView};
use egui::Ui;
use log::debug;
use serde_json::Value;
use tokio::runtime::Handle;

use crate::widgets::{TableIntent, TableWidgetState, data_table};

/// How often to poll the driver while a request is in flight.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

pub struct TablePage {
    renderer: PageRenderer,
    driver: PageDriver,
    table: TableWidgetState,
    mounted: bool,
}

impl TablePage {
    pub fn new(kind: PageKind, page_size: u32, api: Arc<dyn PageApi>, runtime: Handle) -> Self {
        Self {
            renderer: PageRenderer::new(kind.config(page_size)),
            driver: PageDriver::new(api, runtime),
            table: TableWidgetState::default(),
            mounted: false,
        }
    }

    pub fn kind(&self) -> PageKind {
        self.renderer.config().kind
    }

    pub fn renderer(&self) -> &PageRenderer {
        &self.renderer
    }

    pub fn is_loading(&self) -> bool {
        self.renderer.state().is_loading
    }

    fn dispatch(&mut self, request: Option<PageRequest>) {
        if let Some(request) = request {
            self.driver.dispatch(request);
        }
    }

    /// Issues the first request once. Called by [`Self::ui`].
    pub fn mount(&mut self) {
        if !self.mounted {
            self.mounted = true;
            let request = self.renderer.mount();
            self.driver.dispatch(request);
        }
    }

    /// Folds arrived outcomes into the renderer.
    pub fn poll(&mut self) -> bool {
        self.driver.pump(&mut self.renderer)
    }

    pub fn handle(&mut self, intent: TableIntent) {
        debug!("{:?} intent {:?}", self.kind(), intent);
        let request = match intent {
            TableIntent::PreviousPage => self.renderer.previous_page(),
            TableIntent::NextPage => self.renderer.next_page(),
            TableIntent::ChangeTab(value) => self.renderer.change_tab(value),
            TableIntent::Edit {
                row,
                accessor,
                value,
            } => self
                .renderer
                .commit_edit(row, &accessor, Value::String(value)),
        };
        self.dispatch(request);
    }

    pub fn ui(&mut self, ui: &mut Ui) {
        self.mount();
        self.poll();

        if self.is_loading() {
            ui.ctx().request_repaint_after(POLL_INTERVAL);
        }

        let view = TableView::new(&self.renderer.config().columns, self.renderer.state());
        let intents = data_table(ui, &view, &self.renderer.config().columns, &mut self.table);
        for intent in intents {
            self.handle(intent);
        }
    }
}
