//! Journey timeline schema.

use chrono::NaiveDate;
use folio_core::ContentKind;
use serde::Serialize;
use serde_json::Value;

use crate::{
    Schema,
    fields::{Choice, Fields, calendar_date, choice, text},
    report::{FieldPath, Report, ValidationError},
};

const KNOWN_FIELDS: &[&str] = &["date", "title", "type", "description", "skills"];

/// Kind of step on the journey timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JourneyKind {
    Milestone,
    Learning,
    Transition,
}

impl Choice for JourneyKind {
    const VARIANTS: &'static [(&'static str, Self)] = &[
        ("milestone", Self::Milestone),
        ("learning", Self::Learning),
        ("transition", Self::Transition),
    ];
}

/// A validated journey timeline entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JourneyEntry {
    pub date: NaiveDate,
    pub title: String,
    /// Authored as `type`.
    #[serde(rename = "type")]
    pub kind: JourneyKind,
    pub description: String,
    pub skills: Option<Vec<String>>,
}

impl Schema for JourneyEntry {
    const KIND: ContentKind = ContentKind::Journey;

    fn validate(raw: &Value) -> Result<Self, ValidationError> {
        let root = FieldPath::root();
        let mut report = Report::default();
        let Some(fields) = Fields::object(raw, &root, &mut report) else {
            return Err(report.into_error());
        };
        fields.note_unknown(KNOWN_FIELDS);

        let date = fields.required("date", "date", calendar_date, &mut report);
        let title = fields.required("title", "string", text, &mut report);
        let kind = fields.required(
            "type",
            &JourneyKind::expectation(),
            choice::<JourneyKind>,
            &mut report,
        );
        let description = fields.required("description", "string", text, &mut report);
        let skills = fields.optional_list("skills", "string", text, &mut report);

        match (date, title, kind, description) {
            (Some(date), Some(title), Some(kind), Some(description)) if report.is_clean() => {
                Ok(Self {
                    date,
                    title,
                    kind,
                    description,
                    skills,
                })
            }
            _ => Err(report.into_error()),
        }
    }
}
