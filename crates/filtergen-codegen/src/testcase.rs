//! # Test-Case Generators
//!
//! One C++ test function per test case: load the input image, set every
//! setting as a filter property, execute, then compare the output either by
//! checksum (when the test carries an `md5hash`) or against a baseline image
//! with the test's tolerance. Measurement results are checked last.

use filtergen_core::{naming, render_scalar, Description};
use serde_json::Value;

use crate::error::CodegenError;
use crate::model::TestCase;
use crate::typemap::{Arity, TypeMapper};

const VECTOR_COMPONENTS: [&str; 3] = ["x", "y", "z"];

/// Full test function for one test case.
pub fn test_function(raw_name: &str, case: &TestCase, types: &TypeMapper) -> Result<String, CodegenError> {
    let filter_name = naming::filter_name(raw_name);
    let tag = case.test.render("tag");
    let input = case
        .test
        .list("inputs")
        .first()
        .map(render_scalar)
        .unwrap_or_default();

    let mut out = format!("int {}\n{{\n", naming::test_function_name(raw_name, &tag));
    out.push_str(&format!(
        "    QString input_filename = UnitTest::DataDir + QString(\"/Data/JSONFilters/{input}\");\n"
    ));
    out.push_str(
        "    DataArrayPath input_path(\"TestContainer\", \"TestAttributeMatrixName\", \"TestAttributeArrayName\");\n",
    );
    out.push_str("    DataContainerArray::Pointer containerArray = DataContainerArray::New();\n");
    out.push_str("    this->ReadImage(input_filename, containerArray, input_path);\n");
    out.push_str(&format!("    QString filtName = \"{filter_name}\";\n"));
    out.push_str("    FilterManager* fm = FilterManager::Instance();\n");
    out.push_str("    IFilterFactory::Pointer filterFactory = fm->getFactoryForFilter(filtName);\n");
    out.push_str("    DREAM3D_REQUIRE_NE(filterFactory.get(),0);\n");
    out.push_str("    AbstractFilter::Pointer filter = filterFactory->create();\n");
    out.push_str("    QVariant var;\n");
    out.push_str("    bool propWasSet;\n");
    out.push_str("    var.setValue(input_path);\n");
    out.push_str("    propWasSet = filter->setProperty(\"SelectedCellArrayPath\", var);\n");
    out.push_str("    DREAM3D_REQUIRE_EQUAL(propWasSet, true);\n");
    out.push_str("    var.setValue(false);\n");
    out.push_str("    propWasSet = filter->setProperty(\"SaveAsNewArray\", var);\n");
    out.push_str("    DREAM3D_REQUIRE_EQUAL(propWasSet, true);\n");

    for setting in &case.settings {
        out.push_str(&setting_block(setting, types)?);
    }

    out.push_str("    filter->setDataContainerArray(containerArray);\n");
    out.push_str("    filter->execute();\n");
    out.push_str("    DREAM3D_REQUIRED(filter->getErrorCondition(), >= , 0);\n");
    out.push_str("    DREAM3D_REQUIRED(filter->getWarningCondition(), >= , 0);\n");
    out.push_str(&format!(
        "    WriteImage(\"{filter_name}{tag}.nrrd\", containerArray, input_path);\n"
    ));

    if case.test.is_blank("md5hash") {
        out.push_str(&format!(
            "    QString baseline_filename = UnitTest::DataDir + QString(\"/Data/JSONFilters/Baseline/BasicFilters_{raw_name}_{tag}.nrrd\");\n"
        ));
        out.push_str(
            "    DataArrayPath baseline_path(\"BContainer\", \"BAttributeMatrixName\", \"BAttributeArrayName\");\n",
        );
        out.push_str("    this->ReadImage(baseline_filename, containerArray, baseline_path);\n");
        out.push_str(&format!(
            "    int res = this->CompareImages(containerArray, input_path, baseline_path, {});\n",
            tolerance(&case.test)
        ));
        out.push_str("    DREAM3D_REQUIRE_EQUAL(res,0);\n");
    } else {
        out.push_str("    QString md5Output;\n");
        out.push_str("    GetMD5FromDataContainer(containerArray, input_path, md5Output);\n");
        out.push_str(&format!(
            "    DREAM3D_REQUIRE_EQUAL(QString(md5Output), QString(\"{}\"));\n",
            case.test.render("md5hash")
        ));
    }

    for result in &case.measurements {
        let type_name = result.text("type");
        let reader = types
            .variant_reader(type_name)
            .ok_or_else(|| CodegenError::UnsupportedVariantType {
                name: result.render("parameter"),
                type_name: type_name.to_string(),
            })?;
        out.push_str(&format!(
            "    var = filter->property(\"{}\");\n",
            result.render("parameter")
        ));
        out.push_str(&format!(
            "    DREAM3D_REQUIRE_EQUAL(var.{reader},{});\n",
            result.render("value")
        ));
    }

    out.push_str("    return 0;\n}\n\n");
    Ok(out)
}

/// Registration line for one test function.
pub fn register_test(raw_name: &str, case: &TestCase) -> String {
    format!(
        "    DREAM3D_REGISTER_TEST( {});\n",
        naming::test_function_name(raw_name, &case.test.render("tag"))
    )
}

/// Scoped block setting one filter property.
fn setting_block(setting: &Description, types: &TypeMapper) -> Result<String, CodegenError> {
    let resolved = types.resolve(setting, "parameter")?;
    let mut out = String::from("    {\n");
    out.push_str(&format!("        {} d3d_var;\n", resolved.target.name));
    match resolved.arity {
        Arity::Scalar => {
            out.push_str(&format!("        d3d_var = {};\n", setting.render("value")));
        }
        Arity::Vector => {
            let values = vector_values(setting.get("value"));
            for (i, component) in VECTOR_COMPONENTS.iter().enumerate() {
                match values.get(i) {
                    Some(v) => out.push_str(&format!("        d3d_var.{component} = {v};\n")),
                    None => out.push_str(&format!(
                        "        d3d_var.{component} = 0; // should not be taken into account. Dim <\n"
                    )),
                }
            }
        }
    }
    out.push_str("        var.setValue(d3d_var);\n");
    out.push_str(&format!(
        "        propWasSet = filter->setProperty(\"{}\", var);\n",
        setting.render("parameter")
    ));
    out.push_str("        DREAM3D_REQUIRE_EQUAL(propWasSet, true);\n");
    out.push_str("    }\n");
    Ok(out)
}

/// Components of a vector setting. A lone scalar is its first component.
fn vector_values(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items.iter().map(render_scalar).collect(),
        Some(Value::Null) | None => Vec::new(),
        Some(other) => vec![render_scalar(other)],
    }
}

/// Baseline comparison tolerance, rendered as a floating-point literal.
fn tolerance(test: &Description) -> String {
    match test.get("tolerance") {
        Some(Value::Number(n)) if n.is_f64() => n.to_string(),
        Some(Value::Number(n)) => format!("{n}.0"),
        Some(Value::String(s)) if !s.trim().is_empty() => s.trim().to_string(),
        _ => "0.0".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn describe(pairs: &[(&str, Value)]) -> Description {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), v.clone()))
            .collect()
    }

    fn case(md5: &str, tolerance: Value) -> TestCase {
        TestCase {
            test: describe(&[
                ("tag", json!("float")),
                ("md5hash", json!(md5)),
                ("inputs", json!(["Input/RA-Float.nrrd"])),
                ("tolerance", tolerance),
            ]),
            ..TestCase::default()
        }
    }

    #[test]
    fn test_checksum_comparison() {
        let types = TypeMapper::standard();
        let code = test_function("AbsImageFilter", &case("abc123", json!(0.0)), &types).unwrap();
        assert!(code.starts_with("int TestITKAbsImagefloatTest()\n{\n"));
        assert!(code.contains("QString(\"/Data/JSONFilters/Input/RA-Float.nrrd\")"));
        assert!(code.contains("QString filtName = \"ITKAbsImage\";"));
        assert!(code.contains("WriteImage(\"ITKAbsImagefloat.nrrd\", containerArray, input_path);"));
        assert!(code.contains("DREAM3D_REQUIRE_EQUAL(QString(md5Output), QString(\"abc123\"));"));
        assert!(!code.contains("baseline_filename"));
        assert!(code.ends_with("    return 0;\n}\n\n"));
    }

    #[test]
    fn test_baseline_comparison() {
        let types = TypeMapper::standard();
        let code = test_function("AbsImageFilter", &case("", json!(0.01)), &types).unwrap();
        assert!(code.contains("/Data/JSONFilters/Baseline/BasicFilters_AbsImageFilter_float.nrrd"));
        assert!(code.contains("CompareImages(containerArray, input_path, baseline_path, 0.01);"));
        assert!(!code.contains("md5Output"));
    }

    #[test]
    fn test_tolerance_rendering() {
        assert_eq!(tolerance(&describe(&[("tolerance", json!(0.0))])), "0.0");
        assert_eq!(tolerance(&describe(&[("tolerance", json!(2))])), "2.0");
        assert_eq!(tolerance(&describe(&[])), "0.0");
        assert_eq!(tolerance(&describe(&[("tolerance", json!("1e-3"))])), "1e-3");
    }

    #[test]
    fn test_scalar_and_vector_settings() {
        let types = TypeMapper::standard();
        let mut c = case("abc", json!(0.0));
        c.settings = vec![
            describe(&[
                ("parameter", json!("Sigma")),
                ("value", json!("2.5")),
                ("type", json!("double")),
                ("dim_vec", json!(0)),
            ]),
            describe(&[
                ("parameter", json!("Radius")),
                ("value", json!([1, 2])),
                ("type", json!("unsigned int")),
                ("dim_vec", json!(1)),
            ]),
        ];
        let code = test_function("MedianImageFilter", &c, &types).unwrap();
        assert!(code.contains("        double d3d_var;\n        d3d_var = 2.5;\n"));
        assert!(code.contains(
            "        FloatVec3_t d3d_var;\n        d3d_var.x = 1;\n        d3d_var.y = 2;\n        d3d_var.z = 0; // should not be taken into account. Dim <\n"
        ));
        assert!(code.contains("propWasSet = filter->setProperty(\"Radius\", var);"));
    }

    #[test]
    fn test_measurement_checks() {
        let types = TypeMapper::standard();
        let mut c = case("abc", json!(0.0));
        c.measurements = vec![describe(&[
            ("parameter", json!("Maximum")),
            ("value", json!("255")),
            ("type", json!("double")),
            ("dim_vec", json!(0)),
        ])];
        let code = test_function("MinimumMaximumImageFilter", &c, &types).unwrap();
        assert!(code.contains(
            "    var = filter->property(\"Maximum\");\n    DREAM3D_REQUIRE_EQUAL(var.toDouble(),255);\n"
        ));
    }

    #[test]
    fn test_register_test() {
        assert_eq!(
            register_test("AbsImageFilter", &case("", json!(0.0))),
            "    DREAM3D_REGISTER_TEST( TestITKAbsImagefloatTest());\n"
        );
    }
}
