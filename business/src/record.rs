//! Row records and the accelerator's evaluation stages.
//!
//! A row is whatever the backend sends for one entity (application, company,
//! contact). The client never enforces a schema on it; columns read into it
//! through dotted accessor paths.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One entity as returned by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowRecord(Value);

impl RowRecord {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn empty() -> Self {
        Self(Value::Object(serde_json::Map::new()))
    }

    pub fn value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    /// Reads a dotted accessor path (`startup.founder.name`).
    ///
    /// Returns `None` when any segment is missing or a non-object is hit
    /// before the last segment. A JSON `null` at the leaf is returned as-is.
    pub fn get_path(&self, accessor: &str) -> Option<&Value> {
        accessor
            .split('.')
            .try_fold(&self.0, |current, segment| current.as_object()?.get(segment))
    }

    /// Top-level `id`, accepting both string and numeric ids.
    pub fn id(&self) -> Option<String> {
        self.get_path("id").and_then(value_to_id)
    }

    /// `id` of the related object stored under `key`, as sent by the backend.
    ///
    /// Only string and numeric ids count; blanks and nulls are `None`.
    pub fn related_id(&self, key: &str) -> Option<&Value> {
        self.0
            .get(key)?
            .get("id")
            .filter(|id| value_to_id(id).is_some())
    }
}

impl From<Value> for RowRecord {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

pub(crate) fn value_to_id(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Position of an application in the accelerator pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EvaluationStage {
    Sourcing,
    Screening,
    FirstMeeting,
    DueDiligence,
    InvestmentCommittee,
    Portfolio,
    Rejected,
}

impl EvaluationStage {
    pub const ALL: [Self; 7] = [
        Self::Sourcing,
        Self::Screening,
        Self::FirstMeeting,
        Self::DueDiligence,
        Self::InvestmentCommittee,
        Self::Portfolio,
        Self::Rejected,
    ];

    /// Wire value (`dueDiligence`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sourcing => "sourcing",
            Self::Screening => "screening",
            Self::FirstMeeting => "firstMeeting",
            Self::DueDiligence => "dueDiligence",
            Self::InvestmentCommittee => "investmentCommittee",
            Self::Portfolio => "portfolio",
            Self::Rejected => "rejected",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Sourcing => "Sourcing",
            Self::Screening => "Screening",
            Self::FirstMeeting => "First Meeting",
            Self::DueDiligence => "Due Diligence",
            Self::InvestmentCommittee => "Investment Committee",
            Self::Portfolio => "Portfolio",
            Self::Rejected => "Rejected",
        }
    }

    /// Parses any spelling that normalizes to a known stage.
    pub fn parse(raw: &str) -> Option<Self> {
        let key = stage_key(raw);
        Self::ALL.into_iter().find(|stage| stage_key(stage.as_str()) == key)
    }
}

/// Normalized comparison key: lowercase ASCII alphanumerics only.
///
/// `"Due Diligence"`, `"due_diligence"` and `"dueDiligence"` share a key.
pub fn stage_key(raw: &str) -> String {
    raw.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_get_path_walks_nested_objects() {
        let row = RowRecord::new(json!({
            "startup": { "founder": { "name": "Ada" } },
            "status": null
        }));

        assert_eq!(row.get_path("startup.founder.name"), Some(&json!("Ada")));
        assert_eq!(row.get_path("status"), Some(&Value::Null));
        assert_eq!(row.get_path("startup.missing"), None);
        assert_eq!(row.get_path("startup.founder.name.first"), None);
    }

    #[test]
    fn test_ids_accept_strings_and_numbers() {
        let row = RowRecord::new(json!({ "id": 42, "startup": { "id": "abc" } }));
        assert_eq!(row.id().as_deref(), Some("42"));
        assert_eq!(row.related_id("startup"), Some(&json!("abc")));
        assert_eq!(row.related_id("company"), None);

        let numeric = RowRecord::new(json!({ "startup": { "id": 5 } }));
        assert_eq!(numeric.related_id("startup"), Some(&json!(5)));
        let blank = RowRecord::new(json!({ "startup": { "id": "" } }));
        assert_eq!(blank.related_id("startup"), None);

        let blank = RowRecord::new(json!({ "id": "" }));
        assert_eq!(blank.id(), None);
    }

    #[test]
    fn test_stage_parse_is_spelling_insensitive() {
        assert_eq!(
            EvaluationStage::parse("Due Diligence"),
            Some(EvaluationStage::DueDiligence)
        );
        assert_eq!(
            EvaluationStage::parse("due_diligence"),
            Some(EvaluationStage::DueDiligence)
        );
        assert_eq!(
            EvaluationStage::parse("INVESTMENTCOMMITTEE"),
            Some(EvaluationStage::InvestmentCommittee)
        );
        assert_eq!(EvaluationStage::parse("graduated"), None);
    }

    #[test]
    fn test_stage_serde_uses_camel_case() {
        let json = serde_json::to_value(EvaluationStage::FirstMeeting).unwrap();
        assert_eq!(json, json!("firstMeeting"));
    }
}
