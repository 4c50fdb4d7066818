//! Field rules shared by the content schemas.
//!
//! A schema walks its raw record through a [`Fields`] view, asking for each
//! field with a leaf rule. Every failed check is pushed to the [`Report`] and
//! the walk carries on, so one pass surfaces every problem in the record.

use chrono::NaiveDate;
use serde_json::{Map, Value};
use url::Url;

use crate::{
    date::{DATE_EXPECTATION, parse_date},
    report::{FieldPath, Report, Violation, ViolationKind},
};

/// Why a present value failed a leaf rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Mismatch {
    kind: ViolationKind,
    expected: String,
}

impl Mismatch {
    fn new(kind: ViolationKind, expected: impl Into<String>) -> Self {
        Self {
            kind,
            expected: expected.into(),
        }
    }

    fn type_of(expected: &str) -> Self {
        Self::new(ViolationKind::TypeMismatch, expected)
    }
}

/// A check and conversion of a single leaf value.
pub(crate) type Leaf<T> = fn(&Value) -> Result<T, Mismatch>;

/// A closed set of string values.
pub trait Choice: Copy + Sized + 'static {
    /// Accepted spellings and the variants they map to.
    const VARIANTS: &'static [(&'static str, Self)];

    /// Look up a variant by its exact spelling.
    fn from_name(name: &str) -> Option<Self> {
        Self::VARIANTS
            .iter()
            .find(|(candidate, _)| *candidate == name)
            .map(|(_, variant)| *variant)
    }

    /// The expectation text used in enumeration violations.
    fn expectation() -> String {
        let names: Vec<&str> = Self::VARIANTS.iter().map(|(name, _)| *name).collect();
        format!("one of {{{}}}", names.join(", "))
    }
}

pub(crate) fn text(value: &Value) -> Result<String, Mismatch> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| Mismatch::type_of("string"))
}

pub(crate) fn boolean(value: &Value) -> Result<bool, Mismatch> {
    value.as_bool().ok_or_else(|| Mismatch::type_of("boolean"))
}

pub(crate) fn integer(value: &Value) -> Result<i32, Mismatch> {
    if !(value.is_i64() || value.is_u64()) {
        return Err(Mismatch::type_of("integer"));
    }
    value
        .as_i64()
        .and_then(|n| i32::try_from(n).ok())
        .ok_or_else(|| {
            Mismatch::new(
                ViolationKind::Format,
                format!("integer between {} and {}", i32::MIN, i32::MAX),
            )
        })
}

pub(crate) fn count(value: &Value) -> Result<u32, Mismatch> {
    if !value.is_u64() {
        return Err(Mismatch::type_of("non-negative integer"));
    }
    value
        .as_u64()
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| {
            Mismatch::new(
                ViolationKind::Format,
                format!("non-negative integer up to {}", u32::MAX),
            )
        })
}

pub(crate) fn absolute_url(value: &Value) -> Result<Url, Mismatch> {
    let raw = value.as_str().ok_or_else(|| Mismatch::type_of("URL string"))?;
    Url::parse(raw).map_err(|_| Mismatch::new(ViolationKind::Format, "valid URL"))
}

pub(crate) fn calendar_date(value: &Value) -> Result<NaiveDate, Mismatch> {
    let raw = value
        .as_str()
        .ok_or_else(|| Mismatch::type_of("date string"))?;
    parse_date(raw).ok_or_else(|| Mismatch::new(ViolationKind::Format, DATE_EXPECTATION))
}

pub(crate) fn choice<C: Choice>(value: &Value) -> Result<C, Mismatch> {
    let raw = value
        .as_str()
        .ok_or_else(|| Mismatch::new(ViolationKind::TypeMismatch, C::expectation()))?;
    C::from_name(raw).ok_or_else(|| Mismatch::new(ViolationKind::Enumeration, C::expectation()))
}

/// View over one object level of a raw record.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Fields<'a> {
    map: &'a Map<String, Value>,
    path: &'a FieldPath,
}

impl<'a> Fields<'a> {
    /// View `value` as an object, reporting a type mismatch otherwise.
    pub(crate) fn object(
        value: &'a Value,
        path: &'a FieldPath,
        report: &mut Report,
    ) -> Option<Self> {
        match value.as_object() {
            Some(map) => Some(Self { map, path }),
            None => {
                report.push(Violation::invalid(
                    path.clone(),
                    ViolationKind::TypeMismatch,
                    "object",
                    value,
                ));
                None
            }
        }
    }

    // `null` is treated the same as an absent key.
    fn get(&self, key: &str) -> Option<&'a Value> {
        self.map.get(key).filter(|value| !value.is_null())
    }

    /// Log keys the schema does not know about. They are dropped from the output.
    pub(crate) fn note_unknown(&self, known: &[&str]) {
        for key in self.map.keys().filter(|key| !known.contains(&key.as_str())) {
            tracing::trace!(path = %self.path.key(key), "ignoring unknown field");
        }
    }

    /// A field that must be present.
    pub(crate) fn required<T>(
        &self,
        key: &str,
        expected: &str,
        leaf: Leaf<T>,
        report: &mut Report,
    ) -> Option<T> {
        match self.get(key) {
            Some(value) => check(value, self.path.key(key), leaf, report),
            None => {
                report.push(Violation::missing(self.path.key(key), expected));
                None
            }
        }
    }

    /// A field that may be absent. Absence yields `None` with no violation.
    pub(crate) fn optional<T>(&self, key: &str, leaf: Leaf<T>, report: &mut Report) -> Option<T> {
        self.get(key)
            .and_then(|value| check(value, self.path.key(key), leaf, report))
    }

    /// A field that falls back to `default` when absent.
    pub(crate) fn defaulted<T>(
        &self,
        key: &str,
        leaf: Leaf<T>,
        default: T,
        report: &mut Report,
    ) -> T {
        match self.get(key) {
            Some(value) => check(value, self.path.key(key), leaf, report).unwrap_or(default),
            None => default,
        }
    }

    /// A required sequence of leaf values.
    pub(crate) fn required_list<T>(
        &self,
        key: &str,
        item_expected: &str,
        leaf: Leaf<T>,
        report: &mut Report,
    ) -> Option<Vec<T>> {
        let path = self.path.key(key);
        match self.get(key) {
            Some(value) => sequence(value, &path, item_expected, report, |item, item_path, report| {
                check(item, item_path, leaf, report)
            }),
            None => {
                report.push(Violation::missing(path, format!("list of {item_expected}")));
                None
            }
        }
    }

    /// An optional sequence of leaf values.
    pub(crate) fn optional_list<T>(
        &self,
        key: &str,
        item_expected: &str,
        leaf: Leaf<T>,
        report: &mut Report,
    ) -> Option<Vec<T>> {
        let path = self.path.key(key);
        self.get(key).and_then(|value| {
            sequence(value, &path, item_expected, report, |item, item_path, report| {
                check(item, item_path, leaf, report)
            })
        })
    }

    /// A required sequence of nested objects, each checked with `item`.
    pub(crate) fn required_objects<T>(
        &self,
        key: &str,
        report: &mut Report,
        item: impl Fn(Fields<'_>, &mut Report) -> Option<T>,
    ) -> Option<Vec<T>> {
        let path = self.path.key(key);
        match self.get(key) {
            Some(value) => objects(value, &path, report, item),
            None => {
                report.push(Violation::missing(path, "list of objects"));
                None
            }
        }
    }

    /// An optional sequence of nested objects, each checked with `item`.
    pub(crate) fn optional_objects<T>(
        &self,
        key: &str,
        report: &mut Report,
        item: impl Fn(Fields<'_>, &mut Report) -> Option<T>,
    ) -> Option<Vec<T>> {
        let path = self.path.key(key);
        self.get(key)
            .and_then(|value| objects(value, &path, report, item))
    }

    /// A required nested object, checked with `inner`.
    pub(crate) fn required_object<T>(
        &self,
        key: &str,
        report: &mut Report,
        inner: impl FnOnce(Fields<'_>, &mut Report) -> Option<T>,
    ) -> Option<T> {
        let path = self.path.key(key);
        match self.get(key) {
            Some(value) => {
                let fields = Fields::object(value, &path, report)?;
                inner(fields, report)
            }
            None => {
                report.push(Violation::missing(path, "object"));
                None
            }
        }
    }
}

fn check<T>(value: &Value, path: FieldPath, leaf: Leaf<T>, report: &mut Report) -> Option<T> {
    match leaf(value) {
        Ok(checked) => Some(checked),
        Err(mismatch) => {
            report.push(Violation::invalid(path, mismatch.kind, mismatch.expected, value));
            None
        }
    }
}

// Every element is checked even after a failure.
fn sequence<T>(
    value: &Value,
    path: &FieldPath,
    item_expected: &str,
    report: &mut Report,
    item: impl Fn(&Value, FieldPath, &mut Report) -> Option<T>,
) -> Option<Vec<T>> {
    let Some(items) = value.as_array() else {
        report.push(Violation::invalid(
            path.clone(),
            ViolationKind::TypeMismatch,
            format!("list of {item_expected}"),
            value,
        ));
        return None;
    };

    let checked: Vec<Option<T>> = items
        .iter()
        .enumerate()
        .map(|(index, element)| item(element, path.index(index), report))
        .collect();
    checked.into_iter().collect()
}

fn objects<T>(
    value: &Value,
    path: &FieldPath,
    report: &mut Report,
    item: impl Fn(Fields<'_>, &mut Report) -> Option<T>,
) -> Option<Vec<T>> {
    sequence(value, path, "objects", report, |element, element_path, report| {
        let fields = Fields::object(element, &element_path, report)?;
        item(fields, report)
    })
}
