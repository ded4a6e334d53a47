//! # Type Checks
//!
//! Run before any fragment is generated. Every member and measurement must
//! resolve in the [`TypeMapper`], every vector member must carry a known
//! accessor type, and every test setting must end up with a resolvable type.
//! Measurement results must also have a variant reader.
//!
//! Settings that name no `type` take `type` and `dim_vec` from the member
//! (or measurement) of the same name.

use filtergen_core::Description;
use serde_json::Value;

use crate::error::CodegenError;
use crate::model::FilterDocument;
use crate::typemap::{Arity, TypeMapper};

/// Check members and measurements, then complete and check test settings.
pub fn check_document(doc: &mut FilterDocument, types: &TypeMapper) -> Result<(), CodegenError> {
    check_members(&doc.members, types)?;
    for measurement in &doc.measurements {
        types.resolve(measurement, "name")?;
    }
    for case in &mut doc.tests {
        resolve_settings(&mut case.settings, &doc.members, types)?;
        resolve_settings(&mut case.measurements, &doc.measurements, types)?;
        for result in &case.measurements {
            let type_name = result.text("type");
            if types.variant_reader(type_name).is_none() {
                return Err(CodegenError::UnsupportedVariantType {
                    name: result.render("parameter"),
                    type_name: type_name.to_string(),
                });
            }
        }
    }
    Ok(())
}

/// Every `(type, dim_vec)` resolves; every vector has a known accessor.
pub fn check_members(members: &[Description], types: &TypeMapper) -> Result<(), CodegenError> {
    for member in members {
        let resolved = types.resolve(member, "name")?;
        if resolved.arity == Arity::Vector {
            types.member_accessor(member)?;
        }
    }
    Ok(())
}

/// Fill in missing setting types from `sources`, then resolve each setting.
pub fn resolve_settings(
    settings: &mut [Description],
    sources: &[Description],
    types: &TypeMapper,
) -> Result<(), CodegenError> {
    for setting in settings.iter_mut() {
        if setting.is_blank("type") {
            let parameter = setting.render("parameter");
            let source = sources
                .iter()
                .find(|m| m.render("name") == parameter)
                .ok_or_else(|| CodegenError::UnresolvedSettingType {
                    parameter: parameter.clone(),
                })?;
            inherit_type(setting, source);
        }
        types.resolve(setting, "parameter")?;
    }
    Ok(())
}

fn inherit_type(setting: &mut Description, source: &Description) {
    let type_value = source.get("type").cloned().unwrap_or(Value::Null);
    let dim_vec = source.get("dim_vec").cloned().unwrap_or(Value::from(0));
    setting.insert("type", type_value);
    setting.insert("dim_vec", dim_vec);
}
