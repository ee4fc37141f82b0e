//! Stage grid for the thesis page.
//!
//! The thesis endpoint returns a flat list of startups. The thesis table
//! shows one column per evaluation stage instead, so the list is pivoted:
//! row `i` holds the `i`-th startup of every stage.

use serde_json::{Map, Value};

use crate::columns::ColumnDescriptor;
use crate::record::{RowRecord, stage_key};

/// Pivots `startups` into a stage-keyed grid following `columns`.
///
/// A startup lands in the column whose accessor root key matches its
/// `evaluationStage` (read at the top level, then under `startup`).
/// Startups matching no column are dropped.
pub fn format_startups_for_stage_table(
    startups: &[RowRecord],
    columns: &[ColumnDescriptor],
) -> Vec<RowRecord> {
    let roots: Vec<&str> = columns.iter().map(ColumnDescriptor::root_key).collect();
    let mut buckets: Vec<Vec<&Value>> = vec![Vec::new(); roots.len()];

    for startup in startups {
        let Some(stage) = startup_stage(startup) else {
            continue;
        };
        let key = stage_key(stage);
        if let Some(idx) = roots.iter().position(|root| stage_key(root) == key) {
            buckets[idx].push(startup.value());
        }
    }

    let height = buckets.iter().map(Vec::len).max().unwrap_or(0);

    (0..height)
        .map(|i| {
            let mut row = Map::new();
            for (root, bucket) in roots.iter().zip(&buckets) {
                let cell = bucket.get(i).map(|v| (*v).clone()).unwrap_or(Value::Null);
                row.insert((*root).to_owned(), cell);
            }
            RowRecord::new(Value::Object(row))
        })
        .collect()
}

fn startup_stage(row: &RowRecord) -> Option<&str> {
    row.get_path("evaluationStage")
        .or_else(|| row.get_path("startup.evaluationStage"))
        .and_then(Value::as_str)
}

/// Extracts the startup list from a thesis response body.
///
/// Accepts either a bare array or an object carrying one under `startups`.
pub fn thesis_startups(data: &Value) -> Vec<RowRecord> {
    let list = match data {
        Value::Array(items) => items.as_slice(),
        Value::Object(map) => map
            .get("startups")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default(),
        _ => &[],
    };
    list.iter().cloned().map(RowRecord::new).collect()
}
