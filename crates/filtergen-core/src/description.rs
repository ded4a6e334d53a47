//! # Normalized Descriptions
//!
//! A [`Description`] maps canonical field names to values. The extractor
//! guarantees that every field declared "processed" by the schema is present
//! (absent optional fields hold the zero value of their [`ValueKind`]) and
//! that no other key is.
//!
//! Descriptor documents are loosely typed: defaults are written as numbers or
//! strings, vector settings as lists under a text key. Values therefore stay
//! as [`serde_json::Value`] and the accessors below interpret them leniently.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Declared kind of a descriptor field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    Text,
    Integer,
    Float,
    Boolean,
    List,
}

impl ValueKind {
    /// The value stored for an absent optional field of this kind.
    pub fn zero(self) -> Value {
        match self {
            Self::Text => Value::String(String::new()),
            Self::Integer => Value::from(0),
            Self::Float => Value::from(0.0),
            Self::Boolean => Value::Bool(false),
            Self::List => Value::Array(Vec::new()),
        }
    }

    /// Lower-case name used in diagnostics.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Boolean => "boolean",
            Self::List => "list",
        }
    }
}

impl std::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated, defaulted mapping from canonical field name to value.
///
/// Field order is the canonical-name order, which keeps every downstream
/// rendering deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Description {
    fields: BTreeMap<String, Value>,
}

impl Description {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a field, returning the previous value.
    pub fn insert(&mut self, field: impl Into<String>, value: Value) -> Option<Value> {
        self.fields.insert(field.into(), value)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn get_mut(&mut self, field: &str) -> Option<&mut Value> {
        self.fields.get_mut(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate over `(canonical name, value)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut Value)> {
        self.fields.iter_mut().map(|(k, v)| (k.as_str(), v))
    }

    /// String value of a field, or `""` when absent or not a string.
    pub fn text(&self, field: &str) -> &str {
        self.get(field).and_then(Value::as_str).unwrap_or("")
    }

    /// True when the field renders to nothing but whitespace.
    pub fn is_blank(&self, field: &str) -> bool {
        self.render(field).trim().is_empty()
    }

    /// Integer value of a field. Numeric strings are accepted.
    pub fn integer(&self, field: &str) -> Option<i64> {
        match self.get(field)? {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse().ok(),
            Value::Bool(b) => Some(i64::from(*b)),
            _ => None,
        }
    }

    /// Marker flags such as `ignore_impl` are set by `1`, `true` or `"1"`.
    pub fn flag(&self, field: &str) -> bool {
        match self.get(field) {
            Some(Value::Bool(b)) => *b,
            Some(Value::Number(n)) => n.as_i64() == Some(1),
            Some(Value::String(s)) => matches!(s.trim(), "1" | "true" | "True"),
            _ => false,
        }
    }

    /// List value of a field, or an empty slice.
    pub fn list(&self, field: &str) -> &[Value] {
        match self.get(field) {
            Some(Value::Array(items)) => items,
            _ => &[],
        }
    }

    /// Render a field the way it is spliced into generated code.
    pub fn render(&self, field: &str) -> String {
        self.get(field).map(render_scalar).unwrap_or_default()
    }
}

impl FromIterator<(String, Value)> for Description {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

/// Render a JSON value as literal code text.
///
/// Strings are emitted without quotes, numbers and booleans in their JSON
/// spelling, `null` as nothing. Compound values fall back to compact JSON.
pub fn render_scalar(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Description {
        let mut d = Description::new();
        d.insert("name", json!("Radius"));
        d.insert("dim_vec", json!(1));
        d.insert("default", json!(2.5));
        d.insert("ignore_impl", json!("1"));
        d.insert("inputs", json!(["a.nrrd"]));
        d.insert("md5hash", Value::Null);
        d
    }

    #[test]
    fn zero_values_per_kind() {
        assert_eq!(ValueKind::Text.zero(), json!(""));
        assert_eq!(ValueKind::Integer.zero(), json!(0));
        assert_eq!(ValueKind::Float.zero().to_string(), "0.0");
        assert_eq!(ValueKind::Boolean.zero(), json!(false));
        assert_eq!(ValueKind::List.zero(), json!([]));
    }

    #[test]
    fn text_is_empty_for_non_strings() {
        let d = sample();
        assert_eq!(d.text("name"), "Radius");
        assert_eq!(d.text("dim_vec"), "");
        assert_eq!(d.text("missing"), "");
    }

    #[test]
    fn integer_accepts_numeric_strings() {
        let mut d = sample();
        assert_eq!(d.integer("dim_vec"), Some(1));
        d.insert("dim_vec", json!(" 0 "));
        assert_eq!(d.integer("dim_vec"), Some(0));
        assert_eq!(d.integer("name"), None);
    }

    #[test]
    fn flags() {
        let mut d = sample();
        assert!(d.flag("ignore_impl"));
        d.insert("ignore_impl", json!(0));
        assert!(!d.flag("ignore_impl"));
        d.insert("ignore_impl", json!(true));
        assert!(d.flag("ignore_impl"));
        assert!(!d.flag("ignore_setup"));
    }

    #[test]
    fn render_and_blank() {
        let d = sample();
        assert_eq!(d.render("default"), "2.5");
        assert!(d.is_blank("md5hash"));
        assert!(d.is_blank("missing"));
        assert!(!d.is_blank("name"));
        assert_eq!(d.list("inputs").len(), 1);
        assert!(d.list("name").is_empty());
    }

    #[test]
    fn iteration_is_name_ordered() {
        let d = sample();
        let names: Vec<&str> = d.iter().map(|(k, _)| k).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }
}
