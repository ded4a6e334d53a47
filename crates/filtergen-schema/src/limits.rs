//! # Limitation Checker
//!
//! Applies the numeric and length bounds declared by processed fields. The
//! first violation fails the whole check; the caller then drops the document
//! it came from. Nothing is mutated.

use filtergen_core::{render_scalar, Description};
use serde_json::Value;

use crate::error::LimitViolation;
use crate::field::{FieldSchema, FieldSpec, Limitation};

/// Check every description against the bounds of `schema`.
pub fn check_limits(schema: &FieldSchema, descriptions: &[Description]) -> Result<(), LimitViolation> {
    for description in descriptions {
        for spec in schema.processed() {
            let (Some(limitation), Some(value)) = (spec.limitation, description.get(spec.canonical()))
            else {
                continue;
            };
            check_value(schema, spec, &limitation, value)?;
        }
    }
    Ok(())
}

/// Check a list of lists, such as the settings of every test.
pub fn check_limits_nested(
    schema: &FieldSchema,
    groups: &[Vec<Description>],
) -> Result<(), LimitViolation> {
    groups.iter().try_for_each(|group| check_limits(schema, group))
}

fn check_value(
    schema: &FieldSchema,
    spec: &FieldSpec,
    limitation: &Limitation,
    value: &Value,
) -> Result<(), LimitViolation> {
    let schema_name = || schema.name().to_string();
    let field = || spec.canonical().to_string();

    if limitation.is_numeric() {
        let number = as_number(value).ok_or_else(|| LimitViolation::NotNumeric {
            schema: schema_name(),
            field: field(),
            value: render_scalar(value),
        })?;
        if let Some(maximum) = limitation.maximum {
            if number > maximum {
                return Err(LimitViolation::AboveMaximum {
                    schema: schema_name(),
                    field: field(),
                    value: number,
                    maximum,
                });
            }
        }
        if let Some(minimum) = limitation.minimum {
            if number < minimum {
                return Err(LimitViolation::BelowMinimum {
                    schema: schema_name(),
                    field: field(),
                    value: number,
                    minimum,
                });
            }
        }
    }

    if limitation.is_length() {
        let length = length_of(value).ok_or_else(|| LimitViolation::NoLength {
            schema: schema_name(),
            field: field(),
            value: render_scalar(value),
        })?;
        if let Some(len_maximum) = limitation.len_maximum {
            if length > len_maximum {
                return Err(LimitViolation::TooLong {
                    schema: schema_name(),
                    field: field(),
                    length,
                    len_maximum,
                });
            }
        }
        if let Some(len_minimum) = limitation.len_minimum {
            if length < len_minimum {
                return Err(LimitViolation::TooShort {
                    schema: schema_name(),
                    field: field(),
                    length,
                    len_minimum,
                });
            }
        }
    }

    Ok(())
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn length_of(value: &Value) -> Option<usize> {
    match value {
        Value::Array(items) => Some(items.len()),
        Value::String(s) => Some(s.chars().count()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SchemaCatalog;
    use serde_json::json;

    fn general(number_of_inputs: Value) -> Description {
        let mut d = Description::new();
        d.insert("name", json!("AbsImageFilter"));
        d.insert("number_of_inputs", number_of_inputs);
        d
    }

    fn test_case(inputs: Value) -> Description {
        let mut d = Description::new();
        d.insert("tag", json!("default"));
        d.insert("inputs", inputs);
        d
    }

    #[test]
    fn test_value_within_bounds_passes() {
        let c = SchemaCatalog::standard().unwrap();
        assert!(check_limits(&c.general, &[general(json!(1))]).is_ok());
        assert!(check_limits(&c.general, &[general(json!("1"))]).is_ok());
    }

    #[test]
    fn test_value_above_maximum_fails() {
        let c = SchemaCatalog::standard().unwrap();
        let err = check_limits(&c.general, &[general(json!(2))]).unwrap_err();
        assert!(matches!(err, LimitViolation::AboveMaximum { value, .. } if value == 2.0));
    }

    #[test]
    fn test_value_below_minimum_fails() {
        let c = SchemaCatalog::standard().unwrap();
        let err = check_limits(&c.general, &[general(json!(0))]).unwrap_err();
        assert!(matches!(err, LimitViolation::BelowMinimum { .. }));
    }

    #[test]
    fn test_non_numeric_value_fails() {
        let c = SchemaCatalog::standard().unwrap();
        let err = check_limits(&c.general, &[general(json!("many"))]).unwrap_err();
        assert!(matches!(err, LimitViolation::NotNumeric { .. }));
    }

    #[test]
    fn test_length_bounds() {
        let c = SchemaCatalog::standard().unwrap();
        assert!(check_limits(&c.tests, &[test_case(json!(["a.nrrd"]))]).is_ok());
        assert!(matches!(
            check_limits(&c.tests, &[test_case(json!(["a.nrrd", "b.nrrd"]))]),
            Err(LimitViolation::TooLong { length: 2, .. })
        ));
        assert!(matches!(
            check_limits(&c.tests, &[test_case(json!([]))]),
            Err(LimitViolation::TooShort { length: 0, .. })
        ));
        assert!(matches!(
            check_limits(&c.tests, &[test_case(json!(3))]),
            Err(LimitViolation::NoLength { .. })
        ));
    }

    #[test]
    fn test_one_bad_item_fails_the_whole_list() {
        let c = SchemaCatalog::standard().unwrap();
        let good = test_case(json!(["a.nrrd"]));
        let bad = test_case(json!([]));
        assert!(check_limits(&c.tests, &[good.clone(), bad.clone()]).is_err());
        assert!(check_limits_nested(&c.tests, &[vec![good.clone()], vec![bad]]).is_err());
        assert!(check_limits_nested(&c.tests, &[vec![good], vec![]]).is_ok());
    }

    #[test]
    fn test_fields_without_limitations_are_not_inspected() {
        let c = SchemaCatalog::standard().unwrap();
        let mut d = general(json!(1));
        d.insert("members", json!("not a list"));
        assert!(check_limits(&c.general, &[d]).is_ok());
    }
}
