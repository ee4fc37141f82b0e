//! Column layout for the data table.

use cohort_business::{CellKind, ColumnDescriptor};
use egui_extras::Column;

pub const ROW_HEIGHT: f32 = 30.0;
pub const HEADER_HEIGHT: f32 = 24.0;

const DATE_WIDTH: f32 = 100.0;
const TAG_WIDTH: f32 = 110.0;
const SELECT_WIDTH: f32 = 150.0;

/// One egui column per descriptor. Short, fixed-shape kinds get exact widths,
/// free text shares whatever is left.
pub fn table_columns(descriptors: &[ColumnDescriptor]) -> Vec<Column> {
    descriptors
        .iter()
        .map(|descriptor| match descriptor.cell_kind() {
            CellKind::Date => Column::exact(DATE_WIDTH),
            CellKind::Tag | CellKind::IconTag => Column::exact(TAG_WIDTH),
            CellKind::Select => Column::exact(SELECT_WIDTH),
            _ => Column::remainder().at_least(100.0).clip(true),
        })
        .collect()
}
