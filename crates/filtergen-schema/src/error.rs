//! Schema, extraction and limitation errors.
//!
//! [`SchemaDefinitionError`] is raised while building the static schema
//! tables and is fatal to the process. The other two describe a problem with
//! one descriptor document and only ever cause that document to be skipped.

use filtergen_core::ErrorCategory;
use thiserror::Error;

use crate::field::Section;

/// A field schema table is malformed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaDefinitionError {
    /// The same alias is declared by two field specs.
    #[error("schema {schema:?}: alias {alias:?} is declared more than once")]
    DuplicateAlias { schema: String, alias: String },

    /// A field spec declares no alias at all.
    #[error("schema {schema:?}: {section} field #{position} has no alias")]
    EmptyAliases {
        schema: String,
        section: Section,
        position: usize,
    },
}

/// A raw document does not conform to its field schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    /// The document is not a JSON object.
    #[error("while processing {schema}: expected an object, found {found}")]
    NotAnObject { schema: String, found: String },

    /// A required field is absent under all of its aliases.
    #[error("while processing {schema}: {field} required - not found")]
    MissingRequired { schema: String, field: String },

    /// A key matches no field of the schema.
    #[error("while processing {schema}: {field} is neither processed nor ignored")]
    UnknownField { schema: String, field: String },

    /// A key names a field that is recognized but not yet supported.
    #[error("while processing {schema}: {field} is not yet supported")]
    UnsupportedField { schema: String, field: String },
}

impl ExtractError {
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::SchemaViolation
    }

    /// Name of the schema the failing document was checked against.
    pub fn schema(&self) -> &str {
        match self {
            Self::NotAnObject { schema, .. }
            | Self::MissingRequired { schema, .. }
            | Self::UnknownField { schema, .. }
            | Self::UnsupportedField { schema, .. } => schema,
        }
    }
}

/// An extracted value lies outside the bounds its field declares.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LimitViolation {
    #[error("value ({value}) in field ({field}) of {schema} is too large, maximum accepted is {maximum}")]
    AboveMaximum {
        schema: String,
        field: String,
        value: f64,
        maximum: f64,
    },

    #[error("value ({value}) in field ({field}) of {schema} is too small, minimum accepted is {minimum}")]
    BelowMinimum {
        schema: String,
        field: String,
        value: f64,
        minimum: f64,
    },

    #[error("length ({length}) in field ({field}) of {schema} is too large, maximum accepted is {len_maximum}")]
    TooLong {
        schema: String,
        field: String,
        length: usize,
        len_maximum: usize,
    },

    #[error("length ({length}) in field ({field}) of {schema} is too small, minimum accepted is {len_minimum}")]
    TooShort {
        schema: String,
        field: String,
        length: usize,
        len_minimum: usize,
    },

    /// A numerically bounded field holds something that is not a number.
    #[error("field ({field}) of {schema} has a numeric limitation but holds {value}")]
    NotNumeric {
        schema: String,
        field: String,
        value: String,
    },

    /// A length-bounded field holds neither a list nor a string.
    #[error("field ({field}) of {schema} has a length limitation but holds {value}")]
    NoLength {
        schema: String,
        field: String,
        value: String,
    },
}

impl LimitViolation {
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::LimitationViolation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_required_display() {
        let err = ExtractError::MissingRequired {
            schema: "members".to_string(),
            field: "default".to_string(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("members"));
        assert!(msg.contains("default"));
        assert_eq!(err.category(), ErrorCategory::SchemaViolation);
        assert_eq!(err.schema(), "members");
    }

    #[test]
    fn unknown_field_display() {
        let err = ExtractError::UnknownField {
            schema: "general".to_string(),
            field: "colour".to_string(),
        };
        assert!(format!("{err}").contains("colour"));
    }

    #[test]
    fn limit_violation_display() {
        let err = LimitViolation::AboveMaximum {
            schema: "general".to_string(),
            field: "number_of_inputs".to_string(),
            value: 2.0,
            maximum: 1.0,
        };
        let msg = format!("{err}");
        assert!(msg.contains("number_of_inputs"));
        assert!(msg.contains("maximum accepted is 1"));
        assert_eq!(err.category(), ErrorCategory::LimitationViolation);
    }

    #[test]
    fn duplicate_alias_display() {
        let err = SchemaDefinitionError::DuplicateAlias {
            schema: "members".to_string(),
            alias: "name".to_string(),
        };
        assert!(format!("{err}").contains("\"name\""));
    }
}
