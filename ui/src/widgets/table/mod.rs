//! Generic data table.
//!
//! Renders a [`TableView`] without knowing which entity it shows and reports
//! what the user asked for as [`TableIntent`]s:
//! - `columns`: egui column layout per descriptor kind
//! - `header`: header row
//! - `cells`: one renderer per [`cohort_business::CellDisplay`] variant

mod cells;
pub mod columns;
mod header;

use cohort_business::{ColumnDescriptor, TableView};
use egui::{Button, Ui};
use egui_extras::TableBuilder;

pub use cells::tag_color;
use cells::render_cell;
use columns::{HEADER_HEIGHT, ROW_HEIGHT, table_columns};
use header::render_table_header;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableIntent {
    PreviousPage,
    NextPage,
    ChangeTab(String),
    Edit {
        row: usize,
        accessor: String,
        value: String,
    },
}

/// Widget-local state kept across frames.
#[derive(Debug, Default)]
pub struct TableWidgetState {
    /// Shown above the table; not applied to the rows.
    pub search: String,
}

/// Renders tabs, search box, grid and pagination controls.
pub fn data_table(
    ui: &mut Ui,
    view: &TableView,
    columns: &[ColumnDescriptor],
    state: &mut TableWidgetState,
) -> Vec<TableIntent> {
    let mut intents = Vec::new();

    ui.horizontal(|ui| {
        for tab in &view.tabs {
            let active = view.active_tab.as_deref() == Some(tab.value.as_str());
            if ui.selectable_label(active, &tab.label).clicked() && !active {
                intents.push(TableIntent::ChangeTab(tab.value.clone()));
            }
        }
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.add(
                egui::TextEdit::singleline(&mut state.search)
                    .hint_text("Search...")
                    .desired_width(180.0),
            );
            if view.is_loading {
                ui.spinner();
            }
        });
    });
    ui.add_space(4.0);

    if view.is_empty() && !view.is_loading {
        ui.weak("No results");
    } else {
        render_grid(ui, view, columns, &mut intents);
    }

    ui.add_space(4.0);
    ui.horizontal(|ui| {
        if ui
            .add_enabled(view.can_previous, Button::new("Previous"))
            .clicked()
        {
            intents.push(TableIntent::PreviousPage);
        }
        ui.label(view.page_label());
        if ui.add_enabled(view.can_next, Button::new("Next")).clicked() {
            intents.push(TableIntent::NextPage);
        }
    });

    intents
}

fn render_grid(
    ui: &mut Ui,
    view: &TableView,
    columns: &[ColumnDescriptor],
    intents: &mut Vec<TableIntent>,
) {
    let available_height = ui.available_height() - ROW_HEIGHT * 2.0;

    let builder = TableBuilder::new(ui)
        .striped(true)
        .resizable(false)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center));

    table_columns(columns)
        .into_iter()
        .fold(builder, TableBuilder::column)
        .min_scrolled_height(0.0)
        .max_scroll_height(available_height.max(ROW_HEIGHT))
        .header(HEADER_HEIGHT, |mut header| {
            render_table_header(&mut header, &view.headers);
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, view.cells.len(), |mut row| {
                let row_index = row.index();
                for (column_index, cell) in view.cells[row_index].iter().enumerate() {
                    row.col(|ui| {
                        if let Some(value) = render_cell(ui, cell, (row_index, column_index)) {
                            if let Some(descriptor) = columns.get(column_index) {
                                intents.push(TableIntent::Edit {
                                    row: row_index,
                                    accessor: descriptor.accessor_key.clone(),
                                    value,
                                });
                            }
                        }
                    });
                }
            });
        });
}
