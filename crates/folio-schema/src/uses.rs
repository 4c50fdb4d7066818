//! Uses page schema.

use folio_core::ContentKind;
use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::{
    Schema,
    fields::{Choice, Fields, absolute_url, choice, integer, text},
    report::{FieldPath, Report, ValidationError},
};

const KNOWN_FIELDS: &[&str] = &["category", "items", "order"];

/// Section of the uses page a group belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UsesCategory {
    Tools,
    Stack,
}

impl Choice for UsesCategory {
    const VARIANTS: &'static [(&'static str, Self)] =
        &[("tools", Self::Tools), ("stack", Self::Stack)];
}

/// A single tool or technology.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UsesItem {
    pub name: String,
    pub description: String,
    pub url: Option<Url>,
}

/// A validated group of tools or stack items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UsesGroup {
    pub category: UsesCategory,
    /// Items in display order.
    pub items: Vec<UsesItem>,
    /// Position among groups of the same category.
    pub order: i32,
}

fn check_item(fields: Fields<'_>, report: &mut Report) -> Option<UsesItem> {
    let name = fields.required("name", "string", text, report);
    let description = fields.required("description", "string", text, report);
    let url = fields.optional("url", absolute_url, report);
    Some(UsesItem {
        name: name?,
        description: description?,
        url,
    })
}

impl Schema for UsesGroup {
    const KIND: ContentKind = ContentKind::Uses;

    fn validate(raw: &Value) -> Result<Self, ValidationError> {
        let root = FieldPath::root();
        let mut report = Report::default();
        let Some(fields) = Fields::object(raw, &root, &mut report) else {
            return Err(report.into_error());
        };
        fields.note_unknown(KNOWN_FIELDS);

        let category = fields.required(
            "category",
            &UsesCategory::expectation(),
            choice::<UsesCategory>,
            &mut report,
        );
        let items = fields.required_objects("items", &mut report, check_item);
        let order = fields.required("order", "integer", integer, &mut report);

        match (category, items, order) {
            (Some(category), Some(items), Some(order)) if report.is_clean() => Ok(Self {
                category,
                items,
                order,
            }),
            _ => Err(report.into_error()),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::report::ViolationKind;

    #[test]
    fn test_tools_group() {
        let raw = json!({
            "category": "tools",
            "items": [{ "name": "Editor", "description": "Code editing" }],
            "order": 1
        });

        let group = UsesGroup::validate(&raw).expect("valid group");

        assert_eq!(group.category, UsesCategory::Tools);
        assert_eq!(group.order, 1);
        assert_eq!(group.items.len(), 1);
        assert_eq!(group.items[0].name, "Editor");
        assert!(group.items[0].url.is_none());
    }

    #[test]
    fn test_item_order_is_preserved() {
        let raw = json!({
            "category": "stack",
            "items": [
                { "name": "Rust", "description": "Services", "url": "https://www.rust-lang.org" },
                { "name": "PostgreSQL", "description": "Storage" },
                { "name": "Astro", "description": "This site" }
            ],
            "order": 2
        });

        let group = UsesGroup::validate(&raw).expect("valid group");
        let names: Vec<&str> = group.items.iter().map(|item| item.name.as_str()).collect();
        assert_eq!(names, vec!["Rust", "PostgreSQL", "Astro"]);
        assert_eq!(
            group.items[0].url.as_ref().map(Url::as_str),
            Some("https://www.rust-lang.org/")
        );
    }

    #[test]
    fn test_bad_items_report_indexed_paths() {
        let raw = json!({
            "category": "hardware",
            "items": [
                { "name": "Keyboard" },
                { "name": "Mouse", "description": "Pointing", "url": "mouse" }
            ]
        });

        let err = UsesGroup::validate(&raw).unwrap_err();

        assert!(err.has("category", ViolationKind::Enumeration));
        assert!(err.has("items[0].description", ViolationKind::Missing));
        assert!(err.has("items[1].url", ViolationKind::Format));
        assert!(err.has("order", ViolationKind::Missing));
        assert_eq!(err.violations.len(), 4);
    }

    #[test]
    fn test_items_must_be_a_list() {
        let raw = json!({ "category": "tools", "items": "Editor", "order": 1 });
        let err = UsesGroup::validate(&raw).unwrap_err();
        assert!(err.has("items", ViolationKind::TypeMismatch));
    }

    #[test]
    fn test_order_must_be_numeric() {
        let raw = json!({ "category": "tools", "items": [], "order": "first" });
        let err = UsesGroup::validate(&raw).unwrap_err();
        assert!(err.has("order", ViolationKind::TypeMismatch));
    }
}
