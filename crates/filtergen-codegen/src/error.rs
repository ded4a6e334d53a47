//! Type-mapping errors raised while checking or rendering one document.

use filtergen_core::ErrorCategory;
use thiserror::Error;

/// A member, measurement or test setting has no usable type conversion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodegenError {
    /// No entry for the `(type, dim_vec)` pair.
    #[error("type not supported for {name}: {type_name:?} (dim_vec: {dim_vec})")]
    UnsupportedType {
        name: String,
        type_name: String,
        dim_vec: i64,
    },

    /// A vector member declares no `itk_type`.
    #[error("vector member {name} is missing its itk_type")]
    MissingAccessorType { name: String },

    /// A vector member declares an `itk_type` with no known accessor.
    #[error("itk_type not supported for {name}: {itk_type:?}")]
    UnknownAccessorType { name: String, itk_type: String },

    /// A measurement type has no variant reader for result checks.
    #[error("no variant reader for measurement {name} of type {type_name:?}")]
    UnsupportedVariantType { name: String, type_name: String },

    /// A test setting names no type, and no member of that name supplies one.
    #[error("no type found for test setting {parameter}")]
    UnresolvedSettingType { parameter: String },
}

impl CodegenError {
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::TypeMappingMiss
    }
}
