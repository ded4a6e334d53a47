//! # List Filter
//!
//! Narrows list-valued fields whose spec carries a sub-filter marker. An item
//! is dropped when it contains the marker: as a substring for text items, as
//! an element for list items, as a key for object items.

use filtergen_core::Description;
use serde_json::Value;

use crate::field::FieldSchema;

/// Filter every description in place.
pub fn filter_fields(schema: &FieldSchema, descriptions: &mut [Description]) {
    for description in descriptions.iter_mut() {
        for spec in schema.processed() {
            let Some(marker) = spec.sub_filter else {
                continue;
            };
            if let Some(Value::Array(items)) = description.get_mut(spec.canonical()) {
                let before = items.len();
                items.retain(|item| !contains_marker(item, marker));
                if items.len() != before {
                    tracing::debug!(
                        schema = schema.name(),
                        field = spec.canonical(),
                        removed = before - items.len(),
                        "filtered list items"
                    );
                }
            }
        }
    }
}

/// Filter a list of lists in place.
pub fn filter_fields_nested(schema: &FieldSchema, groups: &mut [Vec<Description>]) {
    for group in groups.iter_mut() {
        filter_fields(schema, group);
    }
}

fn contains_marker(item: &Value, marker: &str) -> bool {
    match item {
        Value::String(s) => s.contains(marker),
        Value::Array(elements) => elements.iter().any(|e| e.as_str() == Some(marker)),
        Value::Object(map) => map.contains_key(marker),
        _ => false,
    }
}
