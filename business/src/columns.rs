//! Declarative column descriptors for the generic table pages.
//!
//! A page is described by a list of [`ColumnDescriptor`]s. Each one maps a
//! header label to a dotted accessor path and a rendering hint; the table
//! widget never knows which entity it is showing.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::record::{EvaluationStage, RowRecord};

/// Rendering hint for a column's cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CellKind {
    #[default]
    Text,
    Tag,
    Date,
    Avatar,
    Url,
    Select,
    IconTag,
    Email,
    Phone,
}

/// One entry of a tag/select column's option list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
    pub color: String,
}

impl SelectOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            color: color.into(),
        }
    }
}

/// Colour used for tags whose value has no matching option.
pub const DEFAULT_TAG_COLOR: &str = "gray";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDescriptor {
    pub label: String,
    pub accessor_key: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<CellKind>,
    #[serde(rename = "option", default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<SelectOption>>,
}

/// What a single cell should show, resolved against a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellDisplay {
    Empty,
    Text(String),
    Tag {
        label: String,
        color: String,
        with_icon: bool,
    },
    Date(String),
    Avatar {
        name: String,
        image_url: Option<String>,
    },
    Url(String),
    Email(String),
    Phone(String),
    Select {
        current: Option<String>,
        options: Vec<SelectOption>,
    },
}

impl ColumnDescriptor {
    pub fn new(label: impl Into<String>, accessor_key: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            accessor_key: accessor_key.into(),
            kind: None,
            options: None,
        }
    }

    pub fn kind(mut self, kind: CellKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn options(mut self, options: Vec<SelectOption>) -> Self {
        self.options = Some(options);
        self
    }

    pub fn cell_kind(&self) -> CellKind {
        self.kind.unwrap_or_default()
    }

    /// First segment of the accessor path.
    pub fn root_key(&self) -> &str {
        self.accessor_key
            .split('.')
            .next()
            .unwrap_or(&self.accessor_key)
    }

    pub fn is_editable(&self) -> bool {
        matches!(self.cell_kind(), CellKind::Select)
    }

    pub fn option_for(&self, value: &str) -> Option<&SelectOption> {
        self.options
            .as_deref()
            .and_then(|options| options.iter().find(|o| o.value == value))
    }

    /// Resolves this column against `row`.
    pub fn display(&self, row: &RowRecord) -> CellDisplay {
        let value = match row.get_path(&self.accessor_key) {
            None | Some(Value::Null) => {
                // Editable cells still need their option list with no value set.
                if self.is_editable() {
                    return CellDisplay::Select {
                        current: None,
                        options: self.options.clone().unwrap_or_default(),
                    };
                }
                return CellDisplay::Empty;
            }
            Some(value) => value,
        };

        match self.cell_kind() {
            CellKind::Text => CellDisplay::Text(value_to_text(value)),
            CellKind::Email => CellDisplay::Email(value_to_text(value)),
            CellKind::Phone => CellDisplay::Phone(value_to_text(value)),
            CellKind::Url => CellDisplay::Url(value_to_text(value)),
            CellKind::Date => CellDisplay::Date(format_date(&value_to_text(value))),
            CellKind::Tag | CellKind::IconTag => {
                let raw = value_to_text(value);
                let (label, color) = match self.option_for(&raw) {
                    Some(option) => (option.label.clone(), option.color.clone()),
                    None => (raw, DEFAULT_TAG_COLOR.to_owned()),
                };
                CellDisplay::Tag {
                    label,
                    color,
                    with_icon: self.cell_kind() == CellKind::IconTag,
                }
            }
            CellKind::Avatar => avatar_display(value),
            CellKind::Select => CellDisplay::Select {
                current: Some(value_to_text(value)),
                options: self.options.clone().unwrap_or_default(),
            },
        }
    }
}

fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        Value::Array(items) => items
            .iter()
            .map(value_to_text)
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}

/// `2024-03-01T10:00:00Z` → `2024-03-01`. Unparseable input is kept verbatim.
pub fn format_date(raw: &str) -> String {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return ts.format("%Y-%m-%d").to_string();
    }
    if let Ok(day) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return day.format("%Y-%m-%d").to_string();
    }
    raw.to_owned()
}

fn avatar_display(value: &Value) -> CellDisplay {
    match value {
        Value::Object(map) => {
            let name = ["name", "label", "fullName"]
                .iter()
                .find_map(|k| map.get(*k).and_then(Value::as_str))
                .unwrap_or_default()
                .to_owned();
            let image_url = ["avatar", "logo", "image"]
                .iter()
                .find_map(|k| map.get(*k).and_then(Value::as_str))
                .map(str::to_owned);
            CellDisplay::Avatar { name, image_url }
        }
        other => CellDisplay::Avatar {
            name: value_to_text(other),
            image_url: None,
        },
    }
}

fn stage_options() -> Vec<SelectOption> {
    const COLORS: [&str; 7] = ["blue", "cyan", "teal", "orange", "purple", "green", "red"];
    EvaluationStage::ALL
        .iter()
        .zip(COLORS)
        .map(|(stage, color)| SelectOption::new(stage.label(), stage.as_str(), color))
        .collect()
}

fn investment_options() -> Vec<SelectOption> {
    vec![
        SelectOption::new("Pre-Seed", "Pre-Seed", "gray"),
        SelectOption::new("Seed", "Seed", "green"),
        SelectOption::new("Series A", "Series A", "blue"),
    ]
}

pub fn applications_columns() -> Vec<ColumnDescriptor> {
    vec![
        ColumnDescriptor::new("Startup", "startup").kind(CellKind::Avatar),
        ColumnDescriptor::new("Founder", "startup.founder.name"),
        ColumnDescriptor::new("Stage", "evaluationStage")
            .kind(CellKind::Select)
            .options(stage_options()),
        ColumnDescriptor::new("Investment", "startup.investmentType")
            .kind(CellKind::Select)
            .options(investment_options()),
        ColumnDescriptor::new("Website", "startup.website").kind(CellKind::Url),
        ColumnDescriptor::new("Submitted", "createdAt").kind(CellKind::Date),
    ]
}

/// Startup rows carry their fields at the top level.
pub fn startups_columns() -> Vec<ColumnDescriptor> {
    vec![
        ColumnDescriptor::new("Startup", "name").kind(CellKind::Avatar),
        ColumnDescriptor::new("Founder", "founder.name"),
        ColumnDescriptor::new("Stage", "evaluationStage")
            .kind(CellKind::Select)
            .options(stage_options()),
        ColumnDescriptor::new("Investment", "investmentType")
            .kind(CellKind::Select)
            .options(investment_options()),
        ColumnDescriptor::new("Website", "website").kind(CellKind::Url),
        ColumnDescriptor::new("Added", "createdAt").kind(CellKind::Date),
    ]
}

pub fn companies_columns() -> Vec<ColumnDescriptor> {
    vec![
        ColumnDescriptor::new("Company", "organization").kind(CellKind::Avatar),
        ColumnDescriptor::new("Industry", "industry").kind(CellKind::Tag),
        ColumnDescriptor::new("Status", "status")
            .kind(CellKind::IconTag)
            .options(vec![
                SelectOption::new("Active", "active", "green"),
                SelectOption::new("Inactive", "inactive", "gray"),
            ]),
        ColumnDescriptor::new("Website", "website").kind(CellKind::Url),
        ColumnDescriptor::new("Added", "createdAt").kind(CellKind::Date),
    ]
}

pub fn contacts_columns() -> Vec<ColumnDescriptor> {
    vec![
        ColumnDescriptor::new("Name", "name"),
        ColumnDescriptor::new("Email", "email").kind(CellKind::Email),
        ColumnDescriptor::new("Phone", "phone").kind(CellKind::Phone),
        ColumnDescriptor::new("Company", "organization.name"),
        ColumnDescriptor::new("Type", "type")
            .kind(CellKind::Tag)
            .options(vec![
                SelectOption::new("Founder", "founder", "blue"),
                SelectOption::new("Mentor", "mentor", "purple"),
                SelectOption::new("Investor", "investor", "green"),
            ]),
    ]
}

/// One column per pipeline stage; the pivot fills each with a startup.
pub fn thesis_stage_columns() -> Vec<ColumnDescriptor> {
    EvaluationStage::ALL
        .iter()
        .map(|stage| {
            ColumnDescriptor::new(stage.label(), format!("{}.name", stage.as_str()))
                .kind(CellKind::Text)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_descriptor_deserializes_declarative_form() {
        let column: ColumnDescriptor = serde_json::from_value(json!({
            "label": "Stage",
            "accessorKey": "startup.evaluationStage",
            "type": "icon-tag",
            "option": [{ "label": "Seed", "value": "seed", "color": "green" }]
        }))
        .unwrap();

        assert_eq!(column.accessor_key, "startup.evaluationStage");
        assert_eq!(column.cell_kind(), CellKind::IconTag);
        assert_eq!(column.root_key(), "startup");
        assert_eq!(column.option_for("seed").map(|o| o.color.as_str()), Some("green"));
    }

    #[test]
    fn test_missing_type_is_text() {
        let column: ColumnDescriptor =
            serde_json::from_value(json!({ "label": "Name", "accessorKey": "name" })).unwrap();
        assert_eq!(column.cell_kind(), CellKind::Text);
        assert!(!column.is_editable());
    }

    #[test]
    fn test_tag_display_uses_option_or_fallback() {
        let column = ColumnDescriptor::new("Type", "type")
            .kind(CellKind::Tag)
            .options(vec![SelectOption::new("Mentor", "mentor", "purple")]);

        let mentor = RowRecord::new(json!({ "type": "mentor" }));
        assert_eq!(
            column.display(&mentor),
            CellDisplay::Tag {
                label: "Mentor".to_owned(),
                color: "purple".to_owned(),
                with_icon: false,
            }
        );

        let other = RowRecord::new(json!({ "type": "advisor" }));
        assert_eq!(
            column.display(&other),
            CellDisplay::Tag {
                label: "advisor".to_owned(),
                color: DEFAULT_TAG_COLOR.to_owned(),
                with_icon: false,
            }
        );
    }

    #[test]
    fn test_date_and_empty_cells() {
        let column = ColumnDescriptor::new("Submitted", "createdAt").kind(CellKind::Date);
        let row = RowRecord::new(json!({ "createdAt": "2024-03-01T10:00:00Z" }));
        assert_eq!(column.display(&row), CellDisplay::Date("2024-03-01".to_owned()));

        let odd = RowRecord::new(json!({ "createdAt": "last week" }));
        assert_eq!(column.display(&odd), CellDisplay::Date("last week".to_owned()));

        let missing = RowRecord::new(json!({}));
        assert_eq!(column.display(&missing), CellDisplay::Empty);
    }

    #[test]
    fn test_avatar_reads_name_and_logo() {
        let column = ColumnDescriptor::new("Startup", "startup").kind(CellKind::Avatar);
        let row = RowRecord::new(json!({
            "startup": { "name": "Acme", "logo": "https://cdn/acme.png" }
        }));
        assert_eq!(
            column.display(&row),
            CellDisplay::Avatar {
                name: "Acme".to_owned(),
                image_url: Some("https://cdn/acme.png".to_owned()),
            }
        );
    }

    #[test]
    fn test_select_without_value_keeps_options() {
        let columns = applications_columns();
        let stage = columns
            .iter()
            .find(|c| c.accessor_key == "evaluationStage")
            .unwrap();
        match stage.display(&RowRecord::empty()) {
            CellDisplay::Select { current, options } => {
                assert_eq!(current, None);
                assert_eq!(options.len(), EvaluationStage::ALL.len());
            }
            other => panic!("unexpected display {other:?}"),
        }
    }

    #[test]
    fn test_startup_row_fills_every_column() {
        let row = RowRecord::new(json!({
            "id": "s1",
            "name": "Acme",
            "evaluationStage": "screening",
            "investmentType": "Seed",
            "website": "https://acme.io",
            "founder": { "name": "Ada" },
            "createdAt": "2024-03-01T10:00:00Z"
        }));

        for column in startups_columns() {
            let display = column.display(&row);
            assert_ne!(display, CellDisplay::Empty, "{} is empty", column.label);
            if let CellDisplay::Select { current, .. } = display {
                assert!(current.is_some(), "{} has no selection", column.label);
            }
        }
    }

    #[test]
    fn test_thesis_columns_are_rooted_at_stages() {
        let roots: Vec<String> = thesis_stage_columns()
            .iter()
            .map(|c| c.root_key().to_owned())
            .collect();
        assert_eq!(roots.first().map(String::as_str), Some("sourcing"));
        assert!(roots.iter().any(|r| r == "dueDiligence"));
    }
}
