//! # Extractor
//!
//! Turns one raw document into a [`Description`] according to a
//! [`FieldSchema`].
//!
//! ## Alias priority
//!
//! Aliases are probed last-declared first, and the first hit wins. A document
//! carrying both `name` and `itk_name` therefore yields the `itk_name` value,
//! the more specific of the two.
//!
//! ## Unknown keys
//!
//! After every processed field is resolved, each key of the document must
//! belong to the processed or ignored section. Keys of the not-implemented
//! section pass only with [`ExtractOptions::tolerate_unimplemented`].
//!
//! A JSON `null` counts as absent.

use filtergen_core::Description;
use serde_json::Value;

use crate::error::ExtractError;
use crate::field::{FieldSchema, Section};

/// Switches that change how strictly documents are checked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Accept keys listed as not implemented instead of failing on them.
    pub tolerate_unimplemented: bool,
}

/// Extract one document.
pub fn extract(
    document: &Value,
    schema: &FieldSchema,
    options: ExtractOptions,
) -> Result<Description, ExtractError> {
    let object = document.as_object().ok_or_else(|| ExtractError::NotAnObject {
        schema: schema.name().to_string(),
        found: json_kind(document).to_string(),
    })?;

    tracing::debug!(schema = schema.name(), "processing");
    let mut description = Description::new();

    for spec in schema.processed() {
        let found = spec
            .aliases
            .iter()
            .rev()
            .find_map(|alias| object.get(*alias).filter(|v| !v.is_null()));

        let value = match found {
            Some(value) => value.clone(),
            None if spec.required => {
                return Err(ExtractError::MissingRequired {
                    schema: schema.name().to_string(),
                    field: spec.canonical().to_string(),
                });
            }
            None => spec.kind.zero(),
        };
        tracing::debug!(schema = schema.name(), field = spec.canonical(), value = %value);
        description.insert(spec.canonical(), value);
    }

    for key in object.keys() {
        match schema.section_of(key) {
            Some(Section::Processed | Section::Ignored) => {}
            Some(Section::NotImplemented) if options.tolerate_unimplemented => {
                tracing::debug!(schema = schema.name(), field = %key, "tolerating not-implemented field");
            }
            Some(Section::NotImplemented) => {
                return Err(ExtractError::UnsupportedField {
                    schema: schema.name().to_string(),
                    field: key.clone(),
                });
            }
            None => {
                return Err(ExtractError::UnknownField {
                    schema: schema.name().to_string(),
                    field: key.clone(),
                });
            }
        }
    }

    Ok(description)
}

/// Extract every item of a list value, stopping at the first failure.
///
/// A value that is not a list holds no items.
pub fn extract_list(
    items: &Value,
    schema: &FieldSchema,
    options: ExtractOptions,
) -> Result<Vec<Description>, ExtractError> {
    match items {
        Value::Array(items) => items
            .iter()
            .map(|item| extract(item, schema, options))
            .collect(),
        _ => Ok(Vec::new()),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}
