use std::sync::Arc;

use cohort_business::{BusinessConfig, HttpPageApi, PageApi, PageKind};
use tokio::runtime::Handle;

use crate::{pages::TablePage, widgets};

pub struct CohortApp {
    api: Arc<dyn PageApi>,
    runtime: Handle,
    page_size: u32,
    page: TablePage,
}

impl CohortApp {
    /// Called once before the first frame. Opens the first page kind.
    pub fn new(config: BusinessConfig, runtime: Handle) -> Self {
        let page_size = config.page_size;
        Self::with_api(Arc::new(HttpPageApi::new(config)), page_size, runtime)
    }

    pub fn with_api(api: Arc<dyn PageApi>, page_size: u32, runtime: Handle) -> Self {
        let page = TablePage::new(PageKind::ALL[0], page_size, Arc::clone(&api), runtime.clone());
        Self {
            api,
            runtime,
            page_size,
            page,
        }
    }

    pub fn current(&self) -> PageKind {
        self.page.kind()
    }

    pub fn page(&self) -> &TablePage {
        &self.page
    }

    /// Switches to `kind`. The previous page's requests are cancelled.
    pub fn navigate(&mut self, kind: PageKind) {
        if kind == self.current() {
            return;
        }
        log::info!("navigating to {}", kind.route());
        self.page = TablePage::new(
            kind,
            self.page_size,
            Arc::clone(&self.api),
            self.runtime.clone(),
        );
    }

    fn navigate_to_route(&mut self, href: &str) {
        if let Some(kind) = PageKind::ALL.into_iter().find(|k| k.route() == href) {
            self.navigate(kind);
        }
    }

    pub fn ui(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                let current = self.current();
                for kind in PageKind::ALL {
                    if ui.selectable_label(kind == current, kind.title()).clicked() {
                        self.navigate(kind);
                    }
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    widgets::env_version(ui);
                });
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let route = self.current().route();
            if let Some(href) = widgets::breadcrumbs(ui, route) {
                self.navigate_to_route(&href);
            }
            ui.heading(self.current().title());
            ui.separator();
            self.page.ui(ui);
        });
    }
}

impl eframe::App for CohortApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ui(ctx);
    }
}
