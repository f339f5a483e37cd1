//! Request input and declared-type coercion.
//!
//! Query strings only carry text. Before a record is constructed, every
//! declared field is looked up and coerced to its [`FieldKind`]; this is the
//! first of the two steps that run ahead of a handler.

use std::borrow::Cow;

use thiserror::Error;

use crate::value::Value;

/// Decoded query (and path) parameters of a single request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestInput {
    params: Vec<(String, String)>,
}

/// Declared type of an input field.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Integer,
    Real,
    Boolean,
}

/// One declared input field of a record.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

/// Fields extracted and coerced from a request, in declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fields {
    values: Vec<(&'static str, Value)>,
}

/// Extraction failure (before any record logic runs).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExtractError {
    #[error("missing required parameter `{name}`")]
    Missing { name: &'static str },

    #[error("parameter `{name}` is not a valid {expected}: {raw:?}")]
    Mistyped {
        name: &'static str,
        expected: &'static str,
        raw: String,
    },
}

/// Query string that cannot be decoded.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("query component {raw:?} is not valid UTF-8 once percent-decoded")]
    InvalidUtf8 { raw: String },
}

impl RequestInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode an `application/x-www-form-urlencoded` query string.
    ///
    /// Unlike lossy form decoding, bytes that do not form valid UTF-8 are an
    /// error rather than U+FFFD.
    pub fn parse_query(raw: &str) -> Result<Self, QueryError> {
        let mut params = Vec::new();
        for pair in raw.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            params.push((decode_component(key)?, decode_component(value)?));
        }
        Ok(Self { params })
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            params: pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }

    /// Add a parameter (path parameters are appended after the query).
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.params.push((key.into(), value.into()));
    }

    /// Last occurrence wins when a key repeats.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Look up and coerce every declared field.
    pub fn extract(&self, schema: &[FieldSpec]) -> Result<Fields, ExtractError> {
        let mut fields = Fields::default();
        for spec in schema {
            match self.get(spec.name) {
                Some(raw) => fields.values.push((spec.name, coerce(spec, raw)?)),
                None if spec.required => return Err(ExtractError::Missing { name: spec.name }),
                None => {}
            }
        }
        Ok(fields)
    }
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Integer => "integer",
            FieldKind::Real => "real number",
            FieldKind::Boolean => "boolean",
        }
    }
}

impl FieldSpec {
    pub const fn required(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: true,
        }
    }

    pub const fn optional(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: false,
        }
    }
}

impl Fields {
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.iter().find(|(k, _)| *k == name).map(|(_, v)| v)
    }

    /// Remove a field, returning its coerced value.
    pub fn take(&mut self, name: &str) -> Option<Value> {
        let idx = self.values.iter().position(|(k, _)| *k == name)?;
        Some(self.values.remove(idx).1)
    }

    /// Remove a text field. Fields of other kinds are left in place.
    pub fn take_text(&mut self, name: &str) -> Option<String> {
        let idx = self
            .values
            .iter()
            .position(|(k, v)| *k == name && matches!(v, Value::Text(_)))?;
        match self.values.remove(idx).1 {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

fn decode_component(raw: &str) -> Result<String, QueryError> {
    // `+` is a space in form encoding; `%2B` still decodes to a literal plus.
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(Cow::into_owned)
        .map_err(|_| QueryError::InvalidUtf8 {
            raw: raw.to_string(),
        })
}

fn coerce(spec: &FieldSpec, raw: &str) -> Result<Value, ExtractError> {
    let mistyped = || ExtractError::Mistyped {
        name: spec.name,
        expected: spec.kind.as_str(),
        raw: raw.to_string(),
    };

    match spec.kind {
        FieldKind::Text => Ok(Value::Text(raw.to_string())),
        FieldKind::Integer => raw.trim().parse::<i64>().map(Value::Integer).map_err(|_| mistyped()),
        FieldKind::Real => raw
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .map(Value::Real)
            .ok_or_else(mistyped),
        FieldKind::Boolean => match raw.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(Value::Boolean(true)),
            "false" | "0" | "no" | "off" => Ok(Value::Boolean(false)),
            _ => Err(mistyped()),
        },
    }
}
