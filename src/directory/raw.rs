//! Typed view over the loosely-shaped source payload.
//!
//! The remote list is arbitrary JSON. This module narrows it into
//! `RawRecord`s whose fields are plain Rust types, so the normalizer
//! never touches `serde_json::Value` directly. Wrong-typed fields come
//! out as `None` here; defaults are the normalizer's job.

use serde_json::Value;

/// Top-level shape of a fetched payload.
#[derive(Debug, Clone, PartialEq)]
pub enum RawPayload {
    Records(Vec<RawRecord>),
    /// Payload was valid JSON but not an array. Carries the JSON kind found.
    NotAnArray(&'static str),
}

impl RawPayload {
    pub fn from_value(value: &Value) -> Self {
        match value.as_array() {
            Some(items) => Self::Records(items.iter().map(RawRecord::from_value).collect()),
            None => Self::NotAnArray(json_kind(value)),
        }
    }
}

/// One source record with every field narrowed to the type it should have.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRecord {
    pub id: Option<String>,
    pub name: Option<String>,
    /// One entry per element of `specialities`; `None` where no usable name.
    pub specialities: Vec<Option<String>>,
    /// Stringified scalar, e.g. `"13 Years of experience"` or `"7"`.
    pub experience: Option<String>,
    /// Stringified scalar, e.g. `"₹ 500"`.
    pub fees: Option<String>,
    pub video_consult: bool,
    pub in_clinic: bool,
    pub availability: Option<String>,
    pub degree: Option<String>,
    pub rating: Option<f64>,
    pub rating_count: Option<f64>,
    pub photo: Option<String>,
    pub clinic_name: Option<String>,
    pub locality: Option<String>,
    pub city: Option<String>,
    pub address_line1: Option<String>,
}

impl RawRecord {
    /// Narrow one element of the payload. Non-object elements yield an all-empty record.
    pub fn from_value(value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            return Self::default();
        };

        let clinic = obj.get("clinic").and_then(Value::as_object);
        let address = clinic
            .and_then(|c| c.get("address"))
            .and_then(Value::as_object);

        Self {
            id: obj.get("id").and_then(scalar_text),
            name: obj.get("name").and_then(text),
            specialities: obj
                .get("specialities")
                .and_then(Value::as_array)
                .map(|items| {
                    items
                        .iter()
                        .map(|s| s.get("name").and_then(specialty_name))
                        .collect()
                })
                .unwrap_or_default(),
            experience: obj.get("experience").and_then(scalar_text),
            fees: obj.get("fees").and_then(scalar_text),
            video_consult: obj.get("video_consult").is_some_and(truthy),
            in_clinic: obj.get("in_clinic").is_some_and(truthy),
            availability: obj.get("availability").and_then(text),
            degree: obj.get("degree").and_then(text),
            rating: obj.get("rating").and_then(number),
            rating_count: obj.get("ratingCount").and_then(number),
            photo: obj.get("photo").and_then(text),
            clinic_name: clinic.and_then(|c| c.get("name")).and_then(text),
            locality: address.and_then(|a| a.get("locality")).and_then(text),
            city: address.and_then(|a| a.get("city")).and_then(text),
            address_line1: address.and_then(|a| a.get("address_line1")).and_then(text),
        }
    }
}

/// Non-blank string, trimmed.
fn text(value: &Value) -> Option<String> {
    value
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// String, number or bool rendered as text. Containers and null give `None`.
fn scalar_text(value: &Value) -> Option<String> {
    let rendered = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return None,
    };
    (!rendered.is_empty()).then_some(rendered)
}

/// Non-blank string or non-zero number. Booleans are not names.
fn specialty_name(value: &Value) -> Option<String> {
    match value {
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::String(_) | Value::Number(_) => scalar_text(value),
        _ => None,
    }
}

/// Finite number, or a string that parses as one.
fn number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        _ => false,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
