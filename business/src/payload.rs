//! Turns a flat cell edit into the nested body the backend expects.

use serde_json::{Map, Value, json};

use crate::record::{RowRecord, value_to_id};

/// Entity whose stage edits are mirrored onto the related startup.
pub const APPLICATIONS_ENTITY: &str = "applications";
pub const EVALUATION_STAGE_KEY: &str = "evaluationStage";
pub const STARTUP_KEY: &str = "startup";

/// Builds the update body for editing `path` to `value`.
///
/// - `status` on `contacts` → `{"contacts": {"status": value}}`
/// - `startup.investmentType` → `{"startup": {"investmentType": value, "id": <context.startup.id>}}`
/// - deeper paths nest without an id.
///
/// Paths are not validated; empty segments become empty keys.
pub fn build_update_payload(path: &str, value: Value, entity: &str, context: &RowRecord) -> Value {
    let segments: Vec<&str> = path.split('.').collect();

    if let [key] = segments.as_slice() {
        return json!({ entity: { *key: value } });
    }

    let root = segments[0];
    let mut nested = segments[1..]
        .iter()
        .rev()
        .fold(value, |inner, segment| json!({ *segment: inner }));

    if segments.len() == 2 {
        if let (Some(id), Some(obj)) = (context.related_id(root), nested.as_object_mut()) {
            obj.insert("id".to_owned(), id.clone());
        }
    }

    json!({ root: nested })
}

/// A PUT to send for one cell edit.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdatePlan {
    /// Id of the row being edited; the request goes to `/{resource}/{row_id}`.
    pub row_id: Option<String>,
    pub body: Value,
}

/// Builds the full update for an edit, including entity-specific siblings.
///
/// Stage edits on applications also move the related startup, so the body
/// gains `startup: {evaluationStage, id}` next to `applications: {...}`.
pub fn plan_update(entity: &str, path: &str, value: Value, context: &RowRecord) -> UpdatePlan {
    let mut body = build_update_payload(path, value, entity, context);

    if entity == APPLICATIONS_ENTITY {
        let stage = body
            .get(APPLICATIONS_ENTITY)
            .and_then(|applications| applications.get(EVALUATION_STAGE_KEY))
            .cloned();

        if let (Some(stage), Some(root)) = (stage, body.as_object_mut()) {
            let mut startup = Map::new();
            startup.insert(EVALUATION_STAGE_KEY.to_owned(), stage);
            if let Some(id) = context.related_id(STARTUP_KEY) {
                startup.insert("id".to_owned(), id.clone());
            }
            root.insert(STARTUP_KEY.to_owned(), Value::Object(startup));
        }
    }

    UpdatePlan {
        row_id: context.value().get("id").and_then(value_to_id),
        body,
    }
}
