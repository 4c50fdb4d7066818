//! Validation failure reporting.

use std::fmt;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

const MAX_ACTUAL_CHARS: usize = 60;

/// Dotted path of a field within a raw record, e.g. `impact.metrics[1].label`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct FieldPath(String);

impl FieldPath {
    /// Path of the record itself.
    pub fn root() -> Self {
        Self::default()
    }

    /// Path of a named field below this one.
    pub fn key(&self, key: &str) -> Self {
        if self.0.is_empty() {
            Self(key.to_string())
        } else {
            Self(format!("{}.{key}", self.0))
        }
    }

    /// Path of a sequence element below this one.
    pub fn index(&self, index: usize) -> Self {
        Self(format!("{}[{index}]", self.0))
    }

    /// Whether this is the record root.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Path as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            f.write_str("(record)")
        } else {
            f.write_str(&self.0)
        }
    }
}

/// Category of a field-level violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    /// A required field is absent.
    Missing,
    /// The value is not of the expected primitive type.
    TypeMismatch,
    /// A string fails a format constraint (URL, date).
    Format,
    /// The value is not a member of a closed set.
    Enumeration,
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Missing => "missing required field",
            Self::TypeMismatch => "wrong type",
            Self::Format => "invalid format",
            Self::Enumeration => "not an allowed value",
        })
    }
}

/// The offending value of a violation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Actual {
    /// The field was not present.
    Missing,
    /// Compact JSON rendering of the value found.
    Value(String),
}

impl Actual {
    /// Render a raw value for an error message.
    pub fn of(value: &Value) -> Self {
        Self::Value(value.to_string())
    }
}

impl fmt::Display for Actual {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => f.write_str("missing"),
            Self::Value(rendered) => match rendered.char_indices().nth(MAX_ACTUAL_CHARS) {
                Some((cut, _)) => write!(f, "{}...", &rendered[..cut]),
                None => f.write_str(rendered),
            },
        }
    }
}

/// A single field that failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Violation {
    /// Where the field sits in the record.
    pub path: FieldPath,

    /// What went wrong.
    pub kind: ViolationKind,

    /// The constraint the field must satisfy.
    pub expected: String,

    /// What was found instead.
    pub actual: Actual,
}

impl Violation {
    /// A required field that is absent.
    pub fn missing(path: FieldPath, expected: impl Into<String>) -> Self {
        Self {
            path,
            kind: ViolationKind::Missing,
            expected: expected.into(),
            actual: Actual::Missing,
        }
    }

    /// A present field that breaks a constraint.
    pub fn invalid(
        path: FieldPath,
        kind: ViolationKind,
        expected: impl Into<String>,
        value: &Value,
    ) -> Self {
        Self {
            path,
            kind,
            expected: expected.into(),
            actual: Actual::of(value),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}: expected {}, found {}",
            self.path, self.kind, self.expected, self.actual
        )
    }
}

/// Every violation found in a single raw record.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{} invalid field(s): {}", .violations.len(), join(.violations))]
pub struct ValidationError {
    /// Violations in schema field order.
    pub violations: Vec<Violation>,
}

impl ValidationError {
    /// Violations reported for a field path.
    pub fn at<'a>(&'a self, path: &'a str) -> impl Iterator<Item = &'a Violation> + 'a {
        self.violations
            .iter()
            .filter(move |violation| violation.path.as_str() == path)
    }

    /// Whether any violation of `kind` was reported for `path`.
    pub fn has(&self, path: &str, kind: ViolationKind) -> bool {
        self.at(path).any(|violation| violation.kind == kind)
    }
}

fn join(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Collector of violations while a record is being checked.
#[derive(Debug, Default)]
pub(crate) struct Report {
    violations: Vec<Violation>,
}

impl Report {
    pub(crate) fn push(&mut self, violation: Violation) {
        self.violations.push(violation);
    }

    pub(crate) fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }

    pub(crate) fn into_error(self) -> ValidationError {
        ValidationError {
            violations: self.violations,
        }
    }
}
