//! Testimonial schema.

use folio_core::ContentKind;
use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::{
    Schema,
    fields::{Fields, absolute_url, boolean, text},
    report::{FieldPath, Report, ValidationError},
};

const KNOWN_FIELDS: &[&str] = &[
    "name",
    "role",
    "company",
    "relationship",
    "quote",
    "date",
    "linkedin",
    "featured",
];

/// A validated testimonial.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Testimonial {
    pub name: String,
    pub role: String,
    pub company: String,
    /// How the author knows the site owner, e.g. "Managed me at Acme".
    pub relationship: String,
    pub quote: String,
    /// Free-form date label as shown on the page.
    pub date: String,
    pub linkedin: Option<Url>,
    pub featured: bool,
}

impl Schema for Testimonial {
    const KIND: ContentKind = ContentKind::Testimonials;

    fn validate(raw: &Value) -> Result<Self, ValidationError> {
        let root = FieldPath::root();
        let mut report = Report::default();
        let Some(fields) = Fields::object(raw, &root, &mut report) else {
            return Err(report.into_error());
        };
        fields.note_unknown(KNOWN_FIELDS);

        let r = &mut report;
        let name = fields.required("name", "string", text, r);
        let role = fields.required("role", "string", text, r);
        let company = fields.required("company", "string", text, r);
        let relationship = fields.required("relationship", "string", text, r);
        let quote = fields.required("quote", "string", text, r);
        let date = fields.required("date", "string", text, r);
        let linkedin = fields.optional("linkedin", absolute_url, r);
        let featured = fields.defaulted("featured", boolean, false, r);

        match (name, role, company, relationship, quote, date) {
            (Some(name), Some(role), Some(company), Some(relationship), Some(quote), Some(date))
                if report.is_clean() =>
            {
                Ok(Self {
                    name,
                    role,
                    company,
                    relationship,
                    quote,
                    date,
                    linkedin,
                    featured,
                })
            }
            _ => Err(report.into_error()),
        }
    }
}
