//! # Type Mapper
//!
//! Static tables translating a source type and arity into the target
//! parameter representation, and vector accessor types into the value and
//! dimension paths needed to build them.
//!
//! ## Tables
//!
//! | Table | Key | Value |
//! |---|---|---|
//! | [`TYPE_PAIRS`] | `(type, arity)` | target type, std container type |
//! | [`TARGET_TYPES`] | target type | include, registration macro, component, reader |
//! | [`INTEGRAL_TYPES`] | source type | bounds-check integer flag |
//! | [`VARIANT_READERS`] | source type | `QVariant` conversion call |
//! | [`VECTOR_ACCESSORS`] | `itk_type` | accessor kind, namespace |
//!
//! A lookup miss is a [`CodegenError`]: the document is skipped, the batch
//! continues.

use std::collections::HashMap;

use filtergen_core::Description;

use crate::error::CodegenError;

/// Scalar or three-component vector, from a descriptor's `dim_vec`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arity {
    Scalar,
    Vector,
}

impl Arity {
    pub fn from_dim_vec(dim_vec: i64) -> Option<Self> {
        match dim_vec {
            0 => Some(Self::Scalar),
            1 => Some(Self::Vector),
            _ => None,
        }
    }

    /// Cast helper used to initialise a parameter from its default.
    pub fn init_cast(self) -> &'static str {
        match self {
            Self::Scalar => "StaticCastScalar",
            Self::Vector => "CastStdToVec3",
        }
    }

    /// Bounds check applied when the component type differs from the source.
    pub fn check_entry(self) -> &'static str {
        match self {
            Self::Scalar => "CheckIntegerEntry",
            Self::Vector => "CheckVectorEntry",
        }
    }
}

/// Target parameter type with its registration details.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetType {
    pub name: &'static str,
    pub include: &'static str,
    pub macro_name: &'static str,
    pub component: &'static str,
    pub reader: &'static str,
}

pub const TARGET_TYPES: &[TargetType] = &[
    TargetType {
        name: "double",
        include: "SIMPLib/FilterParameters/DoubleFilterParameter.h",
        macro_name: "SIMPL_NEW_DOUBLE_FP",
        component: "double",
        reader: "readValue",
    },
    TargetType {
        name: "float",
        include: "SIMPLib/FilterParameters/FloatFilterParameter.h",
        macro_name: "SIMPL_NEW_FLOAT_FP",
        component: "float",
        reader: "readValue",
    },
    TargetType {
        name: "int",
        include: "SIMPLib/FilterParameters/IntFilterParameter.h",
        macro_name: "SIMPL_NEW_INTEGER_FP",
        component: "int",
        reader: "readValue",
    },
    TargetType {
        name: "bool",
        include: "SIMPLib/FilterParameters/BooleanFilterParameter.h",
        macro_name: "SIMPL_NEW_BOOL_FP",
        component: "bool",
        reader: "readValue",
    },
    TargetType {
        name: "FloatVec3_t",
        include: "SIMPLib/FilterParameters/FloatVec3FilterParameter.h",
        macro_name: "SIMPL_NEW_FLOAT_VEC3_FP",
        component: "float",
        reader: "readFloatVec3",
    },
    TargetType {
        name: "IntVec3_t",
        include: "SIMPLib/FilterParameters/IntVec3FilterParameter.h",
        macro_name: "SIMPL_NEW_INT_VEC3_FP",
        component: "int",
        reader: "readIntVec3",
    },
];

/// `(source type, arity, target type, std type)`.
pub const TYPE_PAIRS: &[(&str, Arity, &str, &str)] = &[
    ("double", Arity::Scalar, "double", "double"),
    ("float", Arity::Scalar, "float", "float"),
    ("int", Arity::Scalar, "int", "int"),
    ("int32_t", Arity::Scalar, "int", "int"),
    ("unsigned int", Arity::Scalar, "double", "double"),
    ("uint64_t", Arity::Scalar, "double", "double"),
    ("uint32_t", Arity::Scalar, "double", "double"),
    ("uint8_t", Arity::Scalar, "int", "int"),
    ("bool", Arity::Scalar, "bool", "bool"),
    ("double", Arity::Vector, "FloatVec3_t", "std::vector<double>"),
    ("float", Arity::Vector, "FloatVec3_t", "std::vector<float>"),
    ("int", Arity::Vector, "IntVec3_t", "std::vector<int>"),
    ("unsigned int", Arity::Vector, "FloatVec3_t", "std::vector<unsigned int>"),
    ("int64_t", Arity::Vector, "FloatVec3_t", "std::vector<int64_t>"),
    ("uint32_t", Arity::Vector, "FloatVec3_t", "std::vector<uint32_t>"),
    ("int32_t", Arity::Vector, "FloatVec3_t", "std::vector<int32_t>"),
    ("bool", Arity::Vector, "IntVec3_t", "std::vector<bool>"),
];

pub const INTEGRAL_TYPES: &[(&str, bool)] = &[
    ("uint64_t", true),
    ("uint8_t", true),
    ("double", false),
    ("float", false),
    ("int", true),
    ("unsigned int", true),
    ("int64_t", true),
    ("uint32_t", true),
    ("int32_t", true),
    ("bool", true),
];

pub const VARIANT_READERS: &[(&str, &str)] = &[
    ("double", "toDouble()"),
    ("float", "toFloat()"),
    ("int", "toInt()"),
    ("int32_t", "toInt()"),
    ("unsigned int", "toUInt()"),
    ("uint64_t", "toULongLong()"),
    ("uint32_t", "toUInt()"),
    ("bool", "toBool()"),
];

/// Shape of an upstream vector type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessorKind {
    Size,
    Array,
    Point,
    Vector,
    Index,
    Offset,
}

impl AccessorKind {
    pub fn value_type(self) -> &'static str {
        match self {
            Self::Size => "SizeValueType",
            Self::Array | Self::Point | Self::Vector => "ValueType",
            Self::Index => "IndexValueType",
            Self::Offset => "OffsetValueType",
        }
    }

    pub fn dimension(self) -> &'static str {
        match self {
            Self::Point => "PointDimension",
            _ => "Dimension",
        }
    }
}

/// `(itk_type, accessor kind, namespace)`.
pub const VECTOR_ACCESSORS: &[(&str, AccessorKind, &str)] = &[
    ("typename FilterType::SizeType", AccessorKind::Size, "FilterType::SizeType"),
    ("typename FilterType::ArrayType", AccessorKind::Array, "FilterType::ArrayType"),
    ("typename FilterType::PointType", AccessorKind::Point, "FilterType::PointType"),
    ("typename FilterType::SpacingType", AccessorKind::Vector, "FilterType::SpacingType"),
    ("typename FilterType::IndexType", AccessorKind::Index, "FilterType::IndexType"),
    ("typename FilterType::InputSizeType", AccessorKind::Size, "FilterType::InputSizeType"),
    (
        "typename FilterType::StandardDeviationsType",
        AccessorKind::Array,
        "FilterType::StandardDeviationsType",
    ),
    ("typename FilterType::OriginPointType", AccessorKind::Point, "FilterType::OriginPointType"),
    ("typename FilterType::PatternArrayType", AccessorKind::Array, "FilterType::PatternArrayType"),
    ("typename FilterType::FlipAxesArrayType", AccessorKind::Array, "FilterType::FlipAxesArrayType"),
    ("typename InputImageType::SizeType", AccessorKind::Size, "InputImageType::SizeType"),
    ("typename FilterType::OffsetType", AccessorKind::Offset, "FilterType::OffsetType"),
    ("typename FilterType::OrderArrayType", AccessorKind::Array, "FilterType::OrderArrayType"),
    ("typename FilterType::WeightsType", AccessorKind::Array, "FilterType::WeightsType"),
    ("typename InputImageType::IndexType", AccessorKind::Index, "InputImageType::IndexType"),
    (
        "typename FilterType::InputImageIndexType",
        AccessorKind::Index,
        "FilterType::InputImageIndexType",
    ),
    ("typename FilterType::LayoutArrayType", AccessorKind::Index, "FilterType::LayoutArrayType"),
    ("typename FilterType::RadiusType", AccessorKind::Size, "FilterType::RadiusType"),
    (
        "typename FilterType::PermuteOrderArrayType",
        AccessorKind::Array,
        "FilterType::PermuteOrderArrayType",
    ),
    (
        "typename FilterType::ExpandFactorsType",
        AccessorKind::Array,
        "FilterType::ExpandFactorsType",
    ),
    (
        "typename FilterType::ShrinkFactorsType",
        AccessorKind::Array,
        "FilterType::ShrinkFactorsType",
    ),
];

/// A source type resolved against the tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedType<'a> {
    pub source: &'a str,
    pub arity: Arity,
    pub target: &'static TargetType,
    pub std_type: &'static str,
    pub integral: bool,
}

impl ResolvedType<'_> {
    /// Whether the registered component differs from the source type, in
    /// which case the value is bounds-checked before use.
    pub fn needs_bounds_check(&self) -> bool {
        self.target.component != self.source
    }
}

/// Upstream vector type with the paths used to convert into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VectorAccessor {
    pub itk_type: &'static str,
    pub kind: AccessorKind,
    pub namespace: &'static str,
}

impl VectorAccessor {
    /// `typename <namespace>::<value type>`
    pub fn component_path(&self) -> String {
        format!("typename {}::{}", self.namespace, self.kind.value_type())
    }

    /// `<namespace>::<dimension>`
    pub fn dimension_path(&self) -> String {
        format!("{}::{}", self.namespace, self.kind.dimension())
    }
}

/// Read-only lookup tables, built once and passed by reference.
#[derive(Debug, Clone)]
pub struct TypeMapper {
    pairs: HashMap<&'static str, Vec<(Arity, &'static TargetType, &'static str)>>,
    integral: HashMap<&'static str, bool>,
    readers: HashMap<&'static str, &'static str>,
    accessors: HashMap<&'static str, VectorAccessor>,
}

impl TypeMapper {
    pub fn standard() -> Self {
        let targets: HashMap<&str, &'static TargetType> =
            TARGET_TYPES.iter().map(|t| (t.name, t)).collect();
        let mut pairs: HashMap<&'static str, Vec<_>> = HashMap::new();
        for (source, arity, target, std_type) in TYPE_PAIRS {
            if let Some(t) = targets.get(target) {
                pairs.entry(*source).or_default().push((*arity, *t, *std_type));
            }
        }
        let accessors = VECTOR_ACCESSORS
            .iter()
            .map(|(itk_type, kind, namespace)| {
                (
                    *itk_type,
                    VectorAccessor {
                        itk_type: *itk_type,
                        kind: *kind,
                        namespace: *namespace,
                    },
                )
            })
            .collect();
        Self {
            pairs,
            integral: INTEGRAL_TYPES.iter().copied().collect(),
            readers: VARIANT_READERS.iter().copied().collect(),
            accessors,
        }
    }

    /// Resolve a `(type, dim_vec)` pair.
    pub fn lookup<'a>(&self, type_name: &'a str, dim_vec: i64) -> Option<ResolvedType<'a>> {
        let arity = Arity::from_dim_vec(dim_vec)?;
        let &(_, target, std_type) = self
            .pairs
            .get(type_name)?
            .iter()
            .find(|(a, _, _)| *a == arity)?;
        Some(ResolvedType {
            source: type_name,
            arity,
            target,
            std_type,
            integral: self.integral.get(type_name).copied().unwrap_or(false),
        })
    }

    /// Resolve the `type` and `dim_vec` fields of a member, measurement or
    /// typed test setting. `name_field` names the field used in diagnostics.
    pub fn resolve<'a>(
        &self,
        description: &'a Description,
        name_field: &str,
    ) -> Result<ResolvedType<'a>, CodegenError> {
        let type_name = description.text("type");
        let dim_vec = description.integer("dim_vec").unwrap_or(0);
        self.lookup(type_name, dim_vec)
            .ok_or_else(|| CodegenError::UnsupportedType {
                name: description.render(name_field),
                type_name: type_name.to_string(),
                dim_vec,
            })
    }

    pub fn accessor(&self, itk_type: &str) -> Option<&VectorAccessor> {
        self.accessors.get(itk_type)
    }

    /// Accessor of a vector member, with the member named in the error.
    pub fn member_accessor(&self, member: &Description) -> Result<&VectorAccessor, CodegenError> {
        let itk_type = member.text("itk_type");
        if itk_type.trim().is_empty() {
            return Err(CodegenError::MissingAccessorType {
                name: member.render("name"),
            });
        }
        self.accessor(itk_type)
            .ok_or_else(|| CodegenError::UnknownAccessorType {
                name: member.render("name"),
                itk_type: itk_type.to_string(),
            })
    }

    pub fn variant_reader(&self, type_name: &str) -> Option<&'static str> {
        self.readers.get(type_name).copied()
    }
}
