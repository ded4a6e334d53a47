//! End-to-end code assembly for a minimal descriptor: extract with the
//! standard schemas, type-check, assemble tokens and render a template.

use filtergen_codegen::{assemble_tokens, check_document, render_text, FilterDocument, TypeMapper};
use filtergen_schema::{extract, extract_list, ExtractOptions, SchemaCatalog};
use serde_json::json;

fn radius_document() -> FilterDocument {
    let catalog = SchemaCatalog::standard().unwrap();
    let options = ExtractOptions::default();
    let raw = json!({
        "name": "MedianImageFilter",
        "number_of_inputs": 1,
        "template_code_filename": "ImageFilter",
        "template_test_filename": "ImageFilter",
        "members": [
            {"name": "Radius", "type": "int", "default": "1", "dim_vec": 0}
        ]
    });
    let general = extract(&raw, &catalog.general, options).unwrap();
    let members = extract_list(general.get("members").unwrap(), &catalog.members, options).unwrap();
    FilterDocument {
        general,
        members,
        ..FilterDocument::default()
    }
}

#[test]
fn radius_member_produces_property_registration_and_cast() {
    let types = TypeMapper::standard();
    let mut doc = radius_document();
    check_document(&mut doc, &types).unwrap();
    let tokens = assemble_tokens(&doc, &types, "NoModule").unwrap();

    let parameters = tokens.get("Parameters").unwrap();
    assert!(parameters.contains("SIMPL_FILTER_PARAMETER(int, Radius)"));
    assert!(parameters.contains("Q_PROPERTY(int Radius READ getRadius WRITE setRadius)"));

    let setup = tokens.get("SetupFilterParameters").unwrap();
    assert!(setup.contains("SIMPL_NEW_INTEGER_FP(\"Radius\", Radius,"));

    let filter = tokens.get("Filter").unwrap();
    assert!(filter.contains("filter->SetRadius(static_cast<int>(m_Radius));"));
}

#[test]
fn rendering_is_reproducible() {
    let types = TypeMapper::standard();
    let template = "// File automatically generated\nclass ${FilterName}\n{\n${Parameters}};\n${Unused}\n";

    let render_once = || {
        let mut doc = radius_document();
        check_document(&mut doc, &types).unwrap();
        let tokens = assemble_tokens(&doc, &types, "NoModule").unwrap();
        render_text(template, &tokens)
    };

    let first = render_once();
    assert_eq!(first, render_once());
    assert!(first.starts_with("// File automatically generated\nclass ITKMedianImage\n{\n"));
    assert!(first.contains("${Unused}"), "unknown placeholders stay verbatim");
}
