//! Field-level validation primitives shared by the listing and payment schemas.
//!
//! Schemas read an untyped JSON payload through [`FieldReader`], which records every
//! violated field instead of stopping at the first one so forms can show all errors at once.
//! Value rules (lengths, bounds, formats) are `validator` derives checked on the draft.

use std::borrow::Cow;
use std::fmt;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use uuid::Uuid;
use validator::Validate;

/// Field path used when the payload itself is not a JSON object.
pub const ROOT_FIELD: &str = "$";

/// Reason a single field was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Violation {
    #[error("is required")]
    Required,
    #[error("must not be empty")]
    Empty,
    #[error("must be at most {max} characters")]
    TooLong { max: usize },
    #[error("must be a string")]
    NotAString,
    #[error("must be a number")]
    NotANumber,
    #[error("must be greater than zero")]
    NotPositive,
    #[error("must not be negative")]
    Negative,
    #[error("must be a list")]
    NotAList,
    #[error("must be an object")]
    NotAnObject,
    #[error("must be one of: {}", .allowed.join(", "))]
    UnknownChoice { allowed: &'static [&'static str] },
    #[error("must match {pattern}")]
    PatternMismatch { pattern: &'static str },
    #[error("must be a canonical UUID")]
    InvalidUuid,
    #[error("is invalid")]
    Invalid,
    #[error("exceeds the {tier} tier limit of {limit}")]
    ExceedsEntitlement { tier: &'static str, limit: u32 },
    #[error("is not included in the {tier} tier")]
    NotIncluded { tier: &'static str },
}

/// A rejected field together with the reason it was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    pub field: String,
    #[serde(rename = "reason", serialize_with = "serialize_violation")]
    pub violation: Violation,
}

impl FieldIssue {
    pub fn new(field: impl Into<String>, violation: Violation) -> Self {
        Self {
            field: field.into(),
            violation,
        }
    }
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.violation)
    }
}

fn serialize_violation<S>(violation: &Violation, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(violation)
}

/// Batch of field issues returned when a payload fails validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("validation failed: {}", summarize(.issues))]
pub struct ValidationError {
    issues: Vec<FieldIssue>,
}

fn summarize(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationError {
    pub fn new(issues: Vec<FieldIssue>) -> Self {
        Self { issues }
    }

    pub fn single(field: impl Into<String>, violation: Violation) -> Self {
        Self::new(vec![FieldIssue::new(field, violation)])
    }

    pub fn issues(&self) -> &[FieldIssue] {
        &self.issues
    }

    /// Rejected field paths in the order they were checked.
    pub fn fields(&self) -> Vec<&str> {
        self.issues.iter().map(|issue| issue.field.as_str()).collect()
    }

    pub fn has_issue(&self, field: &str) -> bool {
        self.issues.iter().any(|issue| issue.field == field)
    }

    pub fn violation_for(&self, field: &str) -> Option<&Violation> {
        self.issues
            .iter()
            .find(|issue| issue.field == field)
            .map(|issue| &issue.violation)
    }
}

impl Serialize for ValidationError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("ValidationError", 2)?;
        state.serialize_field("error", "validation failed")?;
        state.serialize_field("issues", &self.issues)?;
        state.end()
    }
}

impl IntoResponse for ValidationError {
    fn into_response(self) -> Response {
        (StatusCode::BAD_REQUEST, axum::Json(self)).into_response()
    }
}

/// Closed set of string values accepted for an enumerated field.
pub trait Choice: Sized + Copy + 'static {
    const ALL: &'static [Self];
    const NAMES: &'static [&'static str];

    fn as_str(self) -> &'static str;

    fn parse(raw: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|choice| choice.as_str() == raw)
    }
}

/// Reads typed fields out of a JSON object while collecting every violation.
///
/// The reader checks presence and JSON shape only. Length, range, and format rules are
/// declared with `validator` derives on a draft struct and merged in through
/// [`FieldReader::check_rules`]. `null` counts as absent. Accessors return `None` for a
/// missing or rejected field, so the final value should only be assembled through
/// [`FieldReader::finish`].
pub struct FieldReader<'a> {
    object: Option<&'a Map<String, Value>>,
    read: Vec<String>,
    issues: Vec<FieldIssue>,
}

impl<'a> FieldReader<'a> {
    pub fn new(raw: &'a Value) -> Self {
        let (object, issues) = match raw.as_object() {
            Some(object) => (Some(object), Vec::new()),
            None => (None, vec![FieldIssue::new(ROOT_FIELD, Violation::NotAnObject)]),
        };
        Self {
            object,
            read: Vec::new(),
            issues,
        }
    }

    pub fn reject(&mut self, field: impl Into<String>, violation: Violation) {
        self.issues.push(FieldIssue::new(field, violation));
    }

    fn value(&mut self, name: &str, required: bool) -> Option<&'a Value> {
        self.read.push(name.to_string());
        let object = self.object?;
        match object.get(name) {
            Some(Value::Null) | None => {
                if required {
                    self.reject(name, Violation::Required);
                }
                None
            }
            Some(value) => Some(value),
        }
    }

    fn text(&mut self, name: &str, required: bool) -> Option<String> {
        let value = self.value(name, required)?;
        match value.as_str() {
            Some(text) => Some(text.to_string()),
            None => {
                self.reject(name, Violation::NotAString);
                None
            }
        }
    }

    pub fn required_text(&mut self, name: &str) -> Option<String> {
        self.text(name, true)
    }

    pub fn optional_text(&mut self, name: &str) -> Option<String> {
        self.text(name, false)
    }

    /// JSON number; numeric strings are rejected.
    fn number(&mut self, name: &str, required: bool) -> Option<f64> {
        let value = self.value(name, required)?;
        let number = value.as_f64();
        if number.is_none() {
            self.reject(name, Violation::NotANumber);
        }
        number
    }

    pub fn required_number(&mut self, name: &str) -> Option<f64> {
        self.number(name, true)
    }

    pub fn optional_number(&mut self, name: &str) -> Option<f64> {
        self.number(name, false)
    }

    fn choice<C: Choice>(&mut self, name: &str, required: bool) -> Option<C> {
        let value = self.value(name, required)?;
        let parsed = value.as_str().and_then(C::parse);
        if parsed.is_none() {
            self.reject(
                name,
                Violation::UnknownChoice {
                    allowed: C::NAMES,
                },
            );
        }
        parsed
    }

    pub fn required_choice<C: Choice>(&mut self, name: &str) -> Option<C> {
        self.choice(name, true)
    }

    pub fn optional_choice<C: Choice>(&mut self, name: &str) -> Option<C> {
        self.choice(name, false)
    }

    /// List of strings; each bad element is reported as `name[index]`.
    pub fn optional_text_list(&mut self, name: &str) -> Option<Vec<String>> {
        let value = self.value(name, false)?;
        let Some(items) = value.as_array() else {
            self.reject(name, Violation::NotAList);
            return None;
        };

        let mut texts = Vec::with_capacity(items.len());
        let mut valid = true;
        for (index, item) in items.iter().enumerate() {
            match item.as_str() {
                Some(text) => texts.push(text.to_string()),
                None => {
                    self.reject(format!("{name}[{index}]"), Violation::NotAString);
                    valid = false;
                }
            }
        }

        valid.then_some(texts)
    }

    pub fn optional_object(&mut self, name: &str) -> Option<Map<String, Value>> {
        let value = self.value(name, false)?;
        match value.as_object() {
            Some(object) => Some(object.clone()),
            None => {
                self.reject(name, Violation::NotAnObject);
                None
            }
        }
    }

    /// Hyphenated 36-character UUID; braced, URN, and simple forms are rejected.
    pub fn optional_uuid(&mut self, name: &str) -> Option<Uuid> {
        let value = self.value(name, false)?;
        let parsed = value
            .as_str()
            .filter(|text| text.len() == 36)
            .and_then(|text| Uuid::parse_str(text).ok());
        if parsed.is_none() {
            self.reject(name, Violation::InvalidUuid);
        }
        parsed
    }

    /// Run the `validator` rules declared on `draft` and merge their issues, keeping
    /// every issue in the order its field was read.
    pub fn check_rules<V: Validate>(&mut self, draft: &V) {
        if let Err(errors) = draft.validate() {
            for (field, failures) in errors.field_errors() {
                let field = self.wire_name(&field);
                for failure in failures {
                    self.reject(field.clone(), rule_violation(failure));
                }
            }
        }

        let read = &self.read;
        self.issues
            .sort_by_key(|issue| read_position(read, &issue.field));
    }

    /// Payload name for a rule key, which may be the Rust field name.
    fn wire_name(&self, key: &str) -> String {
        self.read
            .iter()
            .find(|name| name.as_str() == key || snake_case(name) == key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }

    /// Return the assembled value, or every collected issue.
    pub fn finish<T>(self, value: Option<T>) -> Result<T, ValidationError> {
        if !self.issues.is_empty() {
            return Err(ValidationError::new(self.issues));
        }

        value.ok_or_else(|| ValidationError::single(ROOT_FIELD, Violation::Required))
    }
}

fn rule_violation(failure: &validator::ValidationError) -> Violation {
    let param = |key: &str| failure.params.get(key);
    match failure.code.as_ref() {
        "length" => {
            let empty = param("value")
                .and_then(Value::as_str)
                .is_some_and(str::is_empty);
            match param("max").and_then(Value::as_u64) {
                Some(max) if !empty => Violation::TooLong {
                    max: usize::try_from(max).unwrap_or(usize::MAX),
                },
                _ => Violation::Empty,
            }
        }
        "range" if param("exclusive_min").is_some() => Violation::NotPositive,
        "range" => Violation::Negative,
        // Pattern rules carry their pattern as a static message.
        "pattern" => match failure.message.as_ref() {
            Some(Cow::Borrowed(pattern)) => Violation::PatternMismatch { pattern: *pattern },
            _ => Violation::Invalid,
        },
        _ => Violation::Invalid,
    }
}

fn read_position(read: &[String], field: &str) -> Option<usize> {
    let base = field.split('[').next().unwrap_or(field);
    read.iter().position(|name| name == base)
}

fn snake_case(name: &str) -> String {
    let mut snake = String::with_capacity(name.len() + 4);
    for ch in name.chars() {
        if ch.is_ascii_uppercase() {
            snake.push('_');
            snake.push(ch.to_ascii_lowercase());
        } else {
            snake.push(ch);
        }
    }
    snake
}
