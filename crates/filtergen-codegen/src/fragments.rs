//! # Fragment Generators
//!
//! Pure functions from normalized descriptions to snippets of C++ text. Each
//! snippet lands in exactly one template token (see [`crate::tokens`]).
//!
//! Per member:
//!
//! | Function | Token |
//! |---|---|
//! | [`parameter_declaration`] | `Parameters` |
//! | [`setup_fragments`] | `SetupFilterParameters`, `CheckIntegerEntry`, includes |
//! | [`read_parameter`] | `ReadFilterParameters` |
//! | [`initialization`] | `InitializationParameters` |
//! | [`parameter_description`] | `FilterParameterDescription` |
//!
//! Per filter: [`filter_body`] (`Filter`), [`internal_dispatch`]
//! (`FilterInternal`, `DataCheckInternal`) and [`format_includes`].
//!
//! Every function re-resolves types through the [`TypeMapper`] and returns
//! its miss as an error rather than assuming an earlier check ran.

use std::collections::BTreeSet;

use filtergen_core::Description;

use crate::error::CodegenError;
use crate::typemap::{Arity, TypeMapper};

/// Template that supplies a structuring element and kernel members.
pub const KERNEL_TEMPLATE: &str = "KernelImageFilter";

/// Marker shown when no parameter description is available.
pub const NOT_AVAILABLE: &str = "N/A";

/// Description fields in priority order.
const DESCRIPTION_FIELDS: [&str; 4] = [
    "detaileddescriptionSet",
    "briefdescriptionSet",
    "detaileddescriptionGet",
    "briefdescriptionGet",
];

// ─── Per-member fragments ────────────────────────────────────────────

/// Read/write property declaration.
pub fn parameter_declaration(member: &Description, types: &TypeMapper) -> Result<String, CodegenError> {
    let target = types.resolve(member, "name")?.target.name;
    let name = member.render("name");
    Ok(format!(
        "    SIMPL_FILTER_PARAMETER({target}, {name})\n    Q_PROPERTY({target} {name} READ get{name} WRITE set{name})\n\n"
    ))
}

/// Read-only property declaration for a measurement.
pub fn measurement_declaration(
    measurement: &Description,
    types: &TypeMapper,
) -> Result<String, CodegenError> {
    let target = types.resolve(measurement, "name")?.target.name;
    let name = measurement.render("name");
    Ok(format!(
        "    SIMPL_FILTER_PARAMETER({target}, {name})\n    Q_PROPERTY({target} {name} READ get{name})\n\n"
    ))
}

/// What one member contributes to parameter setup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupFragment {
    /// Header declaring the registration macro.
    pub include: &'static str,
    /// Registration line, empty when the member is flagged `ignore_setup`.
    pub setup: String,
    /// Bounds-check line, empty when the component matches the source type.
    pub limits: String,
}

pub fn setup_fragments(
    member: &Description,
    filter_name: &str,
    types: &TypeMapper,
) -> Result<SetupFragment, CodegenError> {
    let resolved = types.resolve(member, "name")?;
    let name = member.render("name");

    let setup = if member.flag("ignore_setup") {
        String::new()
    } else {
        format!(
            "  parameters.push_back({}(\"{name}\", {name}, FilterParameter::Parameter, {filter_name}));\n",
            resolved.target.macro_name
        )
    };

    let limits = if resolved.needs_bounds_check() {
        format!(
            "  this->{}<{},{}>(m_{name}, \"{name}\",{});\n",
            resolved.arity.check_entry(),
            resolved.source,
            resolved.target.name,
            u8::from(resolved.integral)
        )
    } else {
        String::new()
    };

    Ok(SetupFragment {
        include: resolved.target.include,
        setup,
        limits,
    })
}

/// Deserialization call restoring the member from a saved pipeline.
pub fn read_parameter(member: &Description, types: &TypeMapper) -> Result<String, CodegenError> {
    let reader = types.resolve(member, "name")?.target.reader;
    let name = member.render("name");
    Ok(format!("  set{name}(reader->{reader}(\"{name}\", get{name}()));\n"))
}

/// Constructor initialisation from the member default.
pub fn initialization(member: &Description, types: &TypeMapper) -> Result<String, CodegenError> {
    let resolved = types.resolve(member, "name")?;
    Ok(format!(
        "  m_{}={}<{},{},{}>({});\n",
        member.render("name"),
        resolved.arity.init_cast(),
        resolved.std_type,
        resolved.target.name,
        resolved.target.component,
        member.render("default")
    ))
}

/// Markdown table row documenting one parameter.
pub fn parameter_description(member: &Description, types: &TypeMapper) -> Result<String, CodegenError> {
    let target = types.resolve(member, "name")?.target.name;
    let text = DESCRIPTION_FIELDS
        .iter()
        .map(|field| member.render(field))
        .find(|text| !text.trim().is_empty())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());
    Ok(format!("| {} | {target}| {text} |", member.render("name")))
}

// ─── Per-filter fragments ────────────────────────────────────────────

/// Body of the templated filter method: instantiate, configure, run, then
/// read measurements back.
pub fn filter_body(
    general: &Description,
    members: &[Description],
    measurements: &[Description],
    types: &TypeMapper,
) -> Result<String, CodegenError> {
    let name = general.text("name");
    let kernel = general.text("template_code_filename") == KERNEL_TEMPLATE;

    let mut out = if !general.is_blank("filter_type") {
        format!("  typedef {} FilterType;\n", general.render("filter_type"))
    } else if kernel {
        format!(
            "  typedef itk::{name}<InputImageType, OutputImageType, StructuringElementType> FilterType;\n"
        )
    } else {
        format!("  typedef itk::{name}<InputImageType, OutputImageType> FilterType;\n")
    };
    out.push_str("  typename FilterType::Pointer filter = FilterType::New();\n");

    for member in members.iter().filter(|m| !m.flag("ignore_impl")) {
        let member_name = member.render("name");
        let resolved = types.resolve(member, "name")?;
        let call = match resolved.arity {
            Arity::Scalar => format!("static_cast<{}>(m_{member_name})", resolved.source),
            Arity::Vector => {
                let accessor = types.member_accessor(member)?;
                format!(
                    "CastVec3ToITK<{},{},{}>(m_{member_name},{})",
                    resolved.target.name,
                    accessor.itk_type,
                    accessor.component_path(),
                    accessor.dimension_path()
                )
            }
        };
        if member.is_blank("custom_itk_cast") {
            out.push_str(&format!("  filter->Set{member_name}({call});\n"));
        } else {
            out.push_str(&format!("  {}\n", member.render("custom_itk_cast")));
        }
    }

    if kernel {
        out.push_str("  filter->SetKernel(structuringElement);\n");
    }
    out.push_str(
        "  this->ITKImageBase::filter<InputPixelType, OutputPixelType, Dimension, FilterType>(filter);\n",
    );

    for measurement in measurements {
        let m = measurement.render("name");
        out.push_str("  {\n");
        out.push_str(&format!("    QString outputVal = \"{m} :%1\";\n"));
        out.push_str(&format!("    m_{m} = filter->Get{m}();\n"));
        out.push_str(&format!(
            "    notifyWarningMessage(getHumanLabel(),outputVal.arg(m_{m}),0);\n"
        ));
        out.push_str("  }\n");
    }
    Ok(out)
}

/// Pixel-type dispatch calling `function` (`this->filter` or
/// `this->dataCheck`).
pub fn internal_dispatch(general: &Description, function: &str) -> String {
    let output = if !general.is_blank("output_image_type") {
        let image_type = general.render("output_image_type");
        Some((format!("{image_type}::PixelType"), typename_flag(&image_type)))
    } else if !general.is_blank("output_pixel_type") {
        let pixel_type = general.render("output_pixel_type");
        let flag = typename_flag(&pixel_type);
        Some((pixel_type, flag))
    } else {
        None
    };
    match output {
        Some((pixel_type, flag)) => format!(
            "  Dream3DArraySwitchMacroOutputType({function}, getSelectedCellArrayPath(), -4,{pixel_type},{flag});"
        ),
        None => format!("  Dream3DArraySwitchMacro({function}, getSelectedCellArrayPath(), -4);"),
    }
}

/// Whether the output type needs a `typename` qualifier, and which one.
fn typename_flag(output_type: &str) -> u8 {
    if output_type.contains("InputImageType::") {
        1
    } else if output_type.contains("TImageType::") {
        2
    } else {
        0
    }
}

/// `#include` lines, de-duplicated and sorted.
pub fn format_includes<I, S>(includes: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    includes
        .into_iter()
        .map(|i| i.as_ref().trim().to_string())
        .filter(|i| !i.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(|i| format!("#include <{i}>\n"))
        .collect()
}
