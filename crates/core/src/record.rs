//! Records: typed, validated objects built from request input.
//!
//! Construction runs as a pipeline ahead of the handler:
//!
//! ```text
//! RequestInput --extract(SCHEMA)--> Fields --construct--> Record --> handler
//!              (ExtractError)               (ValidationError)
//! ```
//!
//! Either failure aborts the request before the handler is invoked. A record
//! is immutable once built.

use thiserror::Error;

use crate::error::Failure;
use crate::input::{FieldKind, FieldSpec, Fields, RequestInput};
use crate::value::{RecordValue, Value};

/// Construction-time failure of a record.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("field `{field}` is required")]
    MissingField { field: &'static str },

    #[error("field `{field}` is invalid: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// A typed object constructed from request input.
pub trait Record: Sized {
    /// Name used in logs.
    const TYPE_NAME: &'static str;

    /// Declared input fields, in output order.
    const SCHEMA: &'static [FieldSpec];

    /// Build the record from already-coerced fields.
    fn construct(fields: Fields) -> Result<Self, ValidationError>;

    /// Flatten into declared fields for conversion.
    fn to_record_value(&self) -> RecordValue;

    /// Run both pipeline steps against a request.
    fn from_input(input: &RequestInput) -> Result<Self, Failure> {
        let fields = input.extract(Self::SCHEMA)?;
        let record = Self::construct(fields)?;
        tracing::debug!(record = Self::TYPE_NAME, "record constructed");
        Ok(record)
    }
}

/// Record with a single required text field, `name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameRecord {
    name: String,
}

impl NameRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Record for NameRecord {
    const TYPE_NAME: &'static str = "NameRecord";
    const SCHEMA: &'static [FieldSpec] = &[FieldSpec::required("name", FieldKind::Text)];

    fn construct(mut fields: Fields) -> Result<Self, ValidationError> {
        let name = fields
            .take_text("name")
            .ok_or(ValidationError::MissingField { field: "name" })?;
        Ok(Self { name })
    }

    fn to_record_value(&self) -> RecordValue {
        RecordValue::new(Self::TYPE_NAME, vec![("name", Value::from(self.name.as_str()))])
    }
}

impl From<NameRecord> for Value {
    fn from(value: NameRecord) -> Self {
        Value::Record(value.to_record_value())
    }
}
