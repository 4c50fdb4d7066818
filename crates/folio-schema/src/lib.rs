//! Folio Schema Library
//!
//! Validation of raw content records into typed records, one schema per
//! content kind.
//!
//! # Modules
//!
//! - [`project`] - Project case studies
//! - [`journey`] - Journey timeline entries
//! - [`uses`] - Tool and stack groups
//! - [`testimonial`] - Testimonials
//! - [`report`] - Field-level violations and the aggregate [`ValidationError`]
//! - [`date`] - Calendar date coercion
//!
//! # Example
//!
//! ```
//! use folio_schema::{Schema, UsesGroup};
//! use serde_json::json;
//!
//! let raw = json!({
//!     "category": "tools",
//!     "items": [{ "name": "Editor", "description": "Code editing" }],
//!     "order": 1
//! });
//! let group = UsesGroup::validate(&raw).unwrap();
//! assert!(group.items[0].url.is_none());
//! ```

pub mod date;
mod fields;
pub mod journey;
pub mod project;
pub mod report;
pub mod testimonial;
pub mod uses;

use folio_core::ContentKind;
use serde_json::Value;

pub use fields::Choice;
pub use journey::{JourneyEntry, JourneyKind};
pub use project::{Impact, Metric, ProjectRecord, ProjectStatus};
pub use report::{Actual, FieldPath, ValidationError, Violation, ViolationKind};
pub use testimonial::Testimonial;
pub use uses::{UsesCategory, UsesGroup, UsesItem};

/// A typed content record validated from a raw record.
///
/// Validation is pure: the same raw record always produces the same record
/// or the same error, and every violated field is reported at once.
pub trait Schema: Sized {
    /// Collection this schema validates.
    const KIND: ContentKind;

    /// Validate a raw record, applying defaults.
    fn validate(raw: &Value) -> Result<Self, ValidationError>;
}
