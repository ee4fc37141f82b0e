//! Table header rendering.

use egui::Ui;
use egui_extras::TableRow;

/// Renders `headers` in order with centered, bold labels.
#[inline]
pub fn render_table_header(header: &mut TableRow<'_, '_>, headers: &[String]) {
    for label in headers {
        header.col(|ui| {
            render_header_cell(ui, label);
        });
    }
}

#[inline]
fn render_header_cell(ui: &mut Ui, label: &str) {
    ui.centered_and_justified(|ui| {
        ui.strong(label);
    });
}
