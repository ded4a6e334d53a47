//! # Standard Schemas
//!
//! The five document kinds of a filter descriptor, as static tables, plus the
//! members that certain templates add on their own.
//!
//! | Schema           | Validates                                   |
//! |------------------|---------------------------------------------|
//! | `general`        | the top-level descriptor                    |
//! | `inputs`         | each item of `inputs`                       |
//! | `members`        | each item of `members` and `measurements`   |
//! | `tests`          | each item of `tests`                        |
//! | `tests_settings` | each test setting and measurement result    |
//!
//! The tables are built into [`FieldSchema`]s once, by
//! [`SchemaCatalog::standard`], and passed by reference from there on.

use filtergen_core::ValueKind::{Float, Integer, List, Text};
use serde_json::{json, Value};

use crate::error::SchemaDefinitionError;
use crate::field::{FieldSchema, FieldSpec, Limitation};

/// Include-file entries containing this marker belong to a sibling generator.
pub const FOREIGN_INCLUDE_MARKER: &str = "sitk";

// ─── general ─────────────────────────────────────────────────────────

pub const GENERAL_PROCESSED: &[FieldSpec] = &[
    FieldSpec::required(&["name", "itk_name"], Text),
    FieldSpec::required(&["number_of_inputs"], Integer)
        .with_limitation(Limitation::between(1.0, 1.0)),
    FieldSpec::optional(&["include_files"], List).with_sub_filter(FOREIGN_INCLUDE_MARKER),
    FieldSpec::optional(&["members"], List),
    FieldSpec::optional(&["inputs"], List),
    FieldSpec::optional(&["tests"], List),
    FieldSpec::optional(&["briefdescription"], Text),
    FieldSpec::optional(&["detaileddescription"], Text),
    FieldSpec::optional(&["output_image_type"], Text),
    FieldSpec::optional(&["output_pixel_type"], Text),
    FieldSpec::required(&["template_code_filename"], Text),
    FieldSpec::required(&["template_test_filename"], Text),
    FieldSpec::optional(&["filter_type"], Text),
    FieldSpec::optional(&["measurements"], List),
];

pub const GENERAL_IGNORED: &[FieldSpec] = &[
    FieldSpec::known(&["public_declarations"]),
    FieldSpec::known(&["custom_methods"]),
    FieldSpec::known(&["doc"]),
    FieldSpec::known(&["additional_template_types"]),
    FieldSpec::known(&["custom_set_intput"]),
];

pub const GENERAL_NOT_IMPLEMENTED: &[FieldSpec] = &[
    FieldSpec::known(&["pixel_types"]),
    FieldSpec::known(&["vector_pixel_types_by_component"]),
    FieldSpec::known(&["no_procedure"]),
    FieldSpec::known(&["no_output_type"]),
    FieldSpec::known(&["constant_type"]),
    FieldSpec::known(&["pixel_types2"]),
    FieldSpec::known(&["vector_pixel_types_by_component2"]),
    FieldSpec::known(&["template_type"]),
    FieldSpec::known(&["no_return_image"]),
    FieldSpec::known(&["custom_type2"]),
    FieldSpec::known(&["custom_register"]),
    FieldSpec::known(&["long"]),
    FieldSpec::known(&["custom_set_input"]),
];

// ─── members / measurements ──────────────────────────────────────────

pub const MEMBERS_PROCESSED: &[FieldSpec] = &[
    FieldSpec::required(&["name", "itk_name"], Text),
    FieldSpec::optional(&["type"], Text),
    FieldSpec::required(&["default"], Text),
    FieldSpec::optional(&["dim_vec"], Integer),
    FieldSpec::optional(&["itk_type"], Text),
    FieldSpec::optional(&["briefdescriptionSet"], Text),
    FieldSpec::optional(&["detaileddescriptionSet"], Text),
    FieldSpec::optional(&["detaileddescriptionGet"], Text),
    FieldSpec::optional(&["briefdescriptionGet"], Text),
    FieldSpec::optional(&["custom_itk_cast"], Text),
    FieldSpec::optional(&["ignore_setup"], Integer),
    FieldSpec::optional(&["ignore_impl"], Integer),
];

pub const MEMBERS_IGNORED: &[FieldSpec] = &[
    FieldSpec::known(&["no_get_method"]),
    FieldSpec::known(&["doc"]),
    FieldSpec::known(&["no_print"]),
    FieldSpec::known(&["no_set_method"]),
];

pub const MEMBERS_NOT_IMPLEMENTED: &[FieldSpec] = &[
    FieldSpec::known(&["set_as_scalar"]),
    FieldSpec::known(&["pixeltype"]),
    FieldSpec::known(&["point_vec"]),
    FieldSpec::known(&["enum"]),
];

// ─── inputs ──────────────────────────────────────────────────────────

pub const INPUTS_PROCESSED: &[FieldSpec] = &[
    FieldSpec::required(&["name"], Text),
    FieldSpec::required(&["type"], Text),
];

pub const INPUTS_NOT_IMPLEMENTED: &[FieldSpec] = &[
    FieldSpec::known(&["no_size_check"]),
    FieldSpec::known(&["custom_itk_cast"]),
    FieldSpec::known(&["optional"]),
];

// ─── tests ───────────────────────────────────────────────────────────

pub const TESTS_PROCESSED: &[FieldSpec] = &[
    FieldSpec::required(&["tag"], Text),
    FieldSpec::optional(&["md5hash"], Text),
    FieldSpec::optional(&["settings"], List),
    FieldSpec::required(&["inputs"], List).with_limitation(Limitation::length_between(1, 1)),
    FieldSpec::optional(&["tolerance"], Float),
    FieldSpec::optional(&["measurements_results"], List),
];

pub const TESTS_IGNORED: &[FieldSpec] = &[
    FieldSpec::known(&["description"]),
    FieldSpec::known(&["inputA"]),
    FieldSpec::known(&["inputB"]),
    FieldSpec::known(&["sha1hash"]),
];

pub const TESTS_NOT_IMPLEMENTED: &[FieldSpec] = &[
    FieldSpec::known(&["no_procedure"]),
    FieldSpec::known(&["inputA_cast"]),
    FieldSpec::known(&["inputB_cast"]),
];

// ─── tests_settings / measurement results ────────────────────────────

pub const TESTS_SETTINGS_PROCESSED: &[FieldSpec] = &[
    FieldSpec::required(&["parameter", "name"], Text),
    FieldSpec::required(&["value"], Text),
    FieldSpec::optional(&["dim_vec"], Integer),
    FieldSpec::optional(&["type"], Text),
];

pub const TESTS_SETTINGS_IGNORED: &[FieldSpec] = &[
    FieldSpec::known(&["cxx_value"]),
    FieldSpec::known(&["python_value"]),
    FieldSpec::known(&["lua_value"]),
    FieldSpec::known(&["ruby_value"]),
    FieldSpec::known(&["java_value"]),
    FieldSpec::known(&["tcl_value"]),
    FieldSpec::known(&["R_value"]),
    FieldSpec::known(&["csharp_value"]),
    FieldSpec::known(&["no_get_method"]),
];

/// The five standard schemas, built and checked once.
#[derive(Debug, Clone)]
pub struct SchemaCatalog {
    pub general: FieldSchema,
    pub inputs: FieldSchema,
    pub members: FieldSchema,
    pub tests: FieldSchema,
    pub tests_settings: FieldSchema,
}

impl SchemaCatalog {
    pub fn standard() -> Result<Self, SchemaDefinitionError> {
        Ok(Self {
            general: FieldSchema::new(
                "general",
                GENERAL_PROCESSED,
                GENERAL_IGNORED,
                GENERAL_NOT_IMPLEMENTED,
            )?,
            inputs: FieldSchema::new("inputs", INPUTS_PROCESSED, &[], INPUTS_NOT_IMPLEMENTED)?,
            members: FieldSchema::new(
                "members",
                MEMBERS_PROCESSED,
                MEMBERS_IGNORED,
                MEMBERS_NOT_IMPLEMENTED,
            )?,
            tests: FieldSchema::new("tests", TESTS_PROCESSED, TESTS_IGNORED, TESTS_NOT_IMPLEMENTED)?,
            tests_settings: FieldSchema::new(
                "tests_settings",
                TESTS_SETTINGS_PROCESSED,
                TESTS_SETTINGS_IGNORED,
                &[],
            )?,
        })
    }
}

/// Members a template adds to every filter generated from it, as raw member
/// documents. They go through the `members` schema like any other member.
pub fn default_members(template_code_filename: &str) -> Vec<Value> {
    match template_code_filename {
        "KernelImageFilter" => vec![
            json!({
                "name": "KernelRadius",
                "type": "unsigned int",
                "default": "std::vector<unsigned int>(3, 1)",
                "dim_vec": 1,
                "itk_type": "typename FilterType::RadiusType",
                "briefdescriptionSet": "",
                "detaileddescriptionSet": "",
                "briefdescriptionGet": "",
                "detaileddescriptionGet": "",
                "ignore_impl": 1
            }),
            json!({
                "name": "KernelType",
                "type": "int",
                "default": "itk::simple::sitkBall",
                "dim_vec": 0,
                "itk_type": "typename itk::simple::KernelEnum",
                "briefdescriptionSet": "",
                "detaileddescriptionSet": "",
                "briefdescriptionGet": "",
                "detaileddescriptionGet": "",
                "ignore_setup": 1,
                "ignore_impl": 1
            }),
        ],
        _ => Vec::new(),
    }
}
