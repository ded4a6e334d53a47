//! # Field Schemas
//!
//! A [`FieldSchema`] declares the keys recognized in one kind of descriptor
//! document, split into three sections:
//!
//! - **processed**: extracted into the normalized description;
//! - **ignored**: legal but of no use to the generator;
//! - **not implemented**: legal upstream but not handled yet. Tolerated only
//!   when the caller asks for it.
//!
//! Each [`FieldSpec`] lists its accepted aliases, canonical alias first. No
//! alias may appear twice in one schema, across all three sections; this is
//! checked once when the schema is built, so every later lookup is a single
//! map probe.
//!
//! The five standard schemas live in [`crate::catalog`].

use std::collections::HashMap;

use filtergen_core::ValueKind;

use crate::error::SchemaDefinitionError;

/// Numeric and length bounds attached to a processed field.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Limitation {
    pub maximum: Option<f64>,
    pub minimum: Option<f64>,
    pub len_maximum: Option<usize>,
    pub len_minimum: Option<usize>,
}

impl Limitation {
    /// Inclusive numeric range.
    pub const fn between(minimum: f64, maximum: f64) -> Self {
        Self {
            maximum: Some(maximum),
            minimum: Some(minimum),
            len_maximum: None,
            len_minimum: None,
        }
    }

    /// Inclusive length range for list or text values.
    pub const fn length_between(len_minimum: usize, len_maximum: usize) -> Self {
        Self {
            maximum: None,
            minimum: None,
            len_maximum: Some(len_maximum),
            len_minimum: Some(len_minimum),
        }
    }

    pub fn is_numeric(&self) -> bool {
        self.maximum.is_some() || self.minimum.is_some()
    }

    pub fn is_length(&self) -> bool {
        self.len_maximum.is_some() || self.len_minimum.is_some()
    }
}

/// One recognized field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    /// Accepted keys. The first one is the canonical name.
    pub aliases: &'static [&'static str],
    pub kind: ValueKind,
    pub required: bool,
    pub limitation: Option<Limitation>,
    /// Items of a list value containing this marker are dropped.
    pub sub_filter: Option<&'static str>,
}

impl FieldSpec {
    pub const fn optional(aliases: &'static [&'static str], kind: ValueKind) -> Self {
        Self {
            aliases,
            kind,
            required: false,
            limitation: None,
            sub_filter: None,
        }
    }

    pub const fn required(aliases: &'static [&'static str], kind: ValueKind) -> Self {
        Self {
            aliases,
            kind,
            required: true,
            limitation: None,
            sub_filter: None,
        }
    }

    /// A key listed only so that it is not reported as unknown.
    pub const fn known(aliases: &'static [&'static str]) -> Self {
        Self::optional(aliases, ValueKind::Text)
    }

    pub const fn with_limitation(mut self, limitation: Limitation) -> Self {
        self.limitation = Some(limitation);
        self
    }

    pub const fn with_sub_filter(mut self, marker: &'static str) -> Self {
        self.sub_filter = Some(marker);
        self
    }

    /// Canonical field name (first alias).
    pub fn canonical(&self) -> &'static str {
        self.aliases.first().copied().unwrap_or("")
    }
}

/// Section of a schema a key belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Processed,
    Ignored,
    NotImplemented,
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Processed => "processed",
            Self::Ignored => "ignored",
            Self::NotImplemented => "not_implemented",
        })
    }
}

/// Recognized keys of one document kind.
#[derive(Debug, Clone)]
pub struct FieldSchema {
    name: String,
    processed: Vec<FieldSpec>,
    ignored: Vec<FieldSpec>,
    not_implemented: Vec<FieldSpec>,
    sections: HashMap<&'static str, Section>,
}

impl FieldSchema {
    /// Build a schema, rejecting empty alias lists and any alias declared
    /// twice.
    pub fn new(
        name: impl Into<String>,
        processed: &[FieldSpec],
        ignored: &[FieldSpec],
        not_implemented: &[FieldSpec],
    ) -> Result<Self, SchemaDefinitionError> {
        let name = name.into();
        let mut sections = HashMap::new();

        for (section, specs) in [
            (Section::Processed, processed),
            (Section::Ignored, ignored),
            (Section::NotImplemented, not_implemented),
        ] {
            for (position, spec) in specs.iter().enumerate() {
                if spec.aliases.is_empty() {
                    return Err(SchemaDefinitionError::EmptyAliases {
                        schema: name,
                        section,
                        position,
                    });
                }
                for alias in spec.aliases {
                    if sections.insert(*alias, section).is_some() {
                        return Err(SchemaDefinitionError::DuplicateAlias {
                            schema: name,
                            alias: (*alias).to_string(),
                        });
                    }
                }
            }
        }

        Ok(Self {
            name,
            processed: processed.to_vec(),
            ignored: ignored.to_vec(),
            not_implemented: not_implemented.to_vec(),
            sections,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn processed(&self) -> &[FieldSpec] {
        &self.processed
    }

    pub fn ignored(&self) -> &[FieldSpec] {
        &self.ignored
    }

    pub fn not_implemented(&self) -> &[FieldSpec] {
        &self.not_implemented
    }

    /// Section declaring `key` as one of its aliases.
    pub fn section_of(&self, key: &str) -> Option<Section> {
        self.sections.get(key).copied()
    }

    /// Processed spec whose canonical name is `field`.
    pub fn processed_spec(&self, field: &str) -> Option<&FieldSpec> {
        self.processed.iter().find(|s| s.canonical() == field)
    }

    /// Canonical names of all processed fields, in declaration order.
    pub fn canonical_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.processed.iter().map(FieldSpec::canonical)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROCESSED: &[FieldSpec] = &[
        FieldSpec::required(&["name", "itk_name"], ValueKind::Text),
        FieldSpec::optional(&["count"], ValueKind::Integer)
            .with_limitation(Limitation::between(1.0, 1.0)),
    ];

    #[test]
    fn test_sections_are_indexed_by_alias() {
        let schema = FieldSchema::new("demo", PROCESSED, &[FieldSpec::known(&["doc"])], &[
            FieldSpec::known(&["later"]),
        ])
        .unwrap();
        assert_eq!(schema.section_of("itk_name"), Some(Section::Processed));
        assert_eq!(schema.section_of("doc"), Some(Section::Ignored));
        assert_eq!(schema.section_of("later"), Some(Section::NotImplemented));
        assert_eq!(schema.section_of("colour"), None);
        assert_eq!(
            schema.canonical_names().collect::<Vec<_>>(),
            vec!["name", "count"]
        );
        assert!(schema.processed_spec("count").unwrap().limitation.is_some());
        assert!(schema.processed_spec("itk_name").is_none());
    }

    #[test]
    fn test_duplicate_alias_across_sections_rejected() {
        let err = FieldSchema::new("demo", PROCESSED, &[FieldSpec::known(&["itk_name"])], &[])
            .unwrap_err();
        assert_eq!(
            err,
            SchemaDefinitionError::DuplicateAlias {
                schema: "demo".to_string(),
                alias: "itk_name".to_string(),
            }
        );
    }

    #[test]
    fn test_empty_alias_list_rejected() {
        let err = FieldSchema::new("demo", &[FieldSpec::known(&[])], &[], &[]).unwrap_err();
        assert!(matches!(err, SchemaDefinitionError::EmptyAliases { position: 0, .. }));
    }
}
