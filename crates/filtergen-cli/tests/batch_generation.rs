//! Batch generation against the shipped template set, in scratch plugin roots.

use std::path::{Path, PathBuf};

use filtergen_cli::config::{Layout, OutputLayout};
use filtergen_cli::module::ModuleLocator;
use filtergen_cli::pipeline::{BatchReport, OutputTarget, Pipeline, PipelineOptions, Stage, Tables};
use filtergen_core::{ErrorCategory, GENERATED_FILE_MARKER};
use serde_json::{json, Value};

fn template_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../templates")
}

struct Scratch {
    dir: tempfile::TempDir,
    layout: OutputLayout,
}

impl Scratch {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let layout = Layout {
            template_dir: template_dir(),
            ..Layout::default()
        }
        .resolve(&dir.path().join("plugin"));
        std::fs::create_dir_all(dir.path().join("json")).unwrap();
        Self { dir, layout }
    }

    fn add_document(&self, file: &str, doc: &Value) -> PathBuf {
        let path = self.dir.path().join("json").join(file);
        std::fs::write(&path, serde_json::to_string_pretty(doc).unwrap()).unwrap();
        path
    }

    fn documents(&self) -> Vec<PathBuf> {
        filtergen_cli::discover::discover_documents(&self.dir.path().join("json")).unwrap()
    }

    fn run(&self, options: PipelineOptions, write: bool) -> BatchReport {
        let tables = Tables::standard().unwrap();
        let modules = ModuleLocator::empty();
        Pipeline::new(&tables, options).run_batch(
            &self.documents(),
            OutputTarget {
                layout: &self.layout,
                modules: &modules,
                write,
            },
        )
    }

    fn outputs(&self, filter_name: &str) -> Vec<PathBuf> {
        let p = self.layout.output_paths(filter_name);
        vec![p.header, p.source, p.test, p.documentation]
    }
}

fn strict() -> PipelineOptions {
    PipelineOptions {
        verify_limits: true,
        ..PipelineOptions::default()
    }
}

fn overwriting() -> PipelineOptions {
    PipelineOptions {
        overwrite: true,
        ..strict()
    }
}

fn abs_document() -> Value {
    json!({
        "name": "AbsImageFilter",
        "number_of_inputs": 1,
        "template_code_filename": "ImageFilter",
        "template_test_filename": "ImageFilter",
        "briefdescription": "Computes the absolute value of each pixel.",
        "detaileddescription": "",
        "include_files": [],
        "members": [
            {"name": "Scale", "type": "double", "default": "1.0", "dim_vec": 0,
             "briefdescriptionSet": "Output scale."}
        ],
        "tests": [
            {"tag": "float", "inputs": ["Input/RA-Float.nrrd"],
             "md5hash": "8ac0ae3a1b1bf3e0a4e5bb6ed1fc1a55",
             "settings": [{"parameter": "Scale", "value": "2.0"}]}
        ]
    })
}

#[test]
fn generates_four_marked_files() {
    let scratch = Scratch::new();
    scratch.add_document("Abs.json", &abs_document());

    let report = scratch.run(strict(), true);
    assert_eq!(report.succeeded, vec!["ITKAbsImage"]);
    assert!(report.skipped.is_empty());
    assert_eq!(report.written, scratch.outputs("ITKAbsImage"));

    for path in scratch.outputs("ITKAbsImage") {
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(
            contents.starts_with(GENERATED_FILE_MARKER),
            "{} lacks the marker",
            path.display()
        );
        assert!(!contents.contains("${"), "{} has unrendered tokens", path.display());
    }

    let header = std::fs::read_to_string(&scratch.outputs("ITKAbsImage")[0]).unwrap();
    assert!(header.contains("class ITKAbsImage : public ITKImageBase"));
    assert!(header.contains("#include <itkAbsImageFilter.h>"));
    assert!(header.contains("SIMPL_FILTER_PARAMETER(double, Scale)"));

    let test = std::fs::read_to_string(&scratch.outputs("ITKAbsImage")[2]).unwrap();
    assert!(test.contains("int TestITKAbsImagefloatTest()"));
    assert!(test.contains("DREAM3D_REGISTER_TEST( TestITKAbsImagefloatTest());"));
    assert!(test.contains("        double d3d_var;\n        d3d_var = 2.0;\n"));
}

#[test]
fn type_miss_isolates_one_document() {
    let scratch = Scratch::new();
    scratch.add_document("Abs.json", &abs_document());
    let mut broken = abs_document();
    broken["name"] = json!("LabelImageFilter");
    broken["members"][0]["type"] = json!("std::string");
    scratch.add_document("Label.json", &broken);

    let report = scratch.run(strict(), true);
    assert_eq!(report.total, 2);
    assert_eq!(report.succeeded, vec!["ITKAbsImage"]);
    assert_eq!(report.skipped.len(), 1);
    let (path, skipped) = &report.skipped[0];
    assert!(path.ends_with("Label.json"));
    assert_eq!(skipped.stage, Stage::TypesChecked);
    assert_eq!(skipped.reason.category(), Some(ErrorCategory::TypeMappingMiss));

    assert!(scratch.outputs("ITKAbsImage").iter().all(|p| p.is_file()));
    assert!(scratch.outputs("ITKLabelImage").iter().all(|p| !p.exists()));
}

#[test]
fn hand_authored_files_are_never_overwritten() {
    let scratch = Scratch::new();
    scratch.add_document("Abs.json", &abs_document());
    let outputs = scratch.outputs("ITKAbsImage");
    std::fs::create_dir_all(outputs[0].parent().unwrap()).unwrap();
    std::fs::write(&outputs[0], "// maintained by hand\n").unwrap();

    let report = scratch.run(overwriting(), true);
    assert!(report.succeeded.is_empty());
    assert_eq!(report.skipped[0].1.stage, Stage::ExistingFileChecked);
    assert_eq!(
        report.skipped[0].1.reason.category(),
        Some(ErrorCategory::OverwritePolicy)
    );
    assert_eq!(
        std::fs::read_to_string(&outputs[0]).unwrap(),
        "// maintained by hand\n"
    );
    assert!(!outputs[1].exists());
}

#[test]
fn overwrite_is_idempotent() {
    let scratch = Scratch::new();
    scratch.add_document("Abs.json", &abs_document());
    let outputs = scratch.outputs("ITKAbsImage");

    assert_eq!(scratch.run(strict(), true).succeeded.len(), 1);
    let first: Vec<String> = outputs
        .iter()
        .map(|p| std::fs::read_to_string(p).unwrap())
        .collect();

    let again = scratch.run(strict(), true);
    assert!(again.succeeded.is_empty(), "existing files need --overwrite");
    assert_eq!(again.skipped[0].1.stage, Stage::ExistingFileChecked);

    assert_eq!(scratch.run(overwriting(), true).succeeded.len(), 1);
    let second: Vec<String> = outputs
        .iter()
        .map(|p| std::fs::read_to_string(p).unwrap())
        .collect();
    assert_eq!(first, second);
}

#[test]
fn skipped_document_leaves_no_partial_files() {
    let scratch = Scratch::new();
    let mut doc = abs_document();
    doc["template_code_filename"] = json!("NoSuchFilter");
    scratch.add_document("Abs.json", &doc);

    let report = scratch.run(strict(), true);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].1.stage, Stage::FragmentsAssembled);
    assert!(report.written.is_empty());
    assert!(scratch.outputs("ITKAbsImage").iter().all(|p| !p.exists()));
}

#[test]
fn unwritable_test_dir_leaves_no_partial_files() {
    let scratch = Scratch::new();
    scratch.add_document("Abs.json", &abs_document());
    std::fs::create_dir_all(scratch.layout.test_dir.parent().unwrap()).unwrap();
    std::fs::write(&scratch.layout.test_dir, "not a directory\n").unwrap();

    let report = scratch.run(strict(), true);
    assert!(report.succeeded.is_empty());
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].1.stage, Stage::FilesWritten);
    assert!(report.skipped[0].1.reason.category().is_none());
    assert!(report.written.is_empty());

    let outputs = scratch.outputs("ITKAbsImage");
    assert!(!outputs[0].exists(), "header left behind");
    assert!(!outputs[1].exists(), "source left behind");
    assert!(!outputs[3].exists(), "documentation left behind");
}

#[test]
fn dry_run_writes_nothing() {
    let scratch = Scratch::new();
    scratch.add_document("Abs.json", &abs_document());

    let report = scratch.run(strict(), false);
    assert_eq!(report.succeeded, vec!["ITKAbsImage"]);
    assert!(report.written.is_empty());
    assert!(!scratch.layout.filters_dir.exists());
}

#[test]
fn kernel_template_builds_structuring_element() {
    let scratch = Scratch::new();
    let mut doc = abs_document();
    doc["name"] = json!("GrayscaleDilateImageFilter");
    doc["template_code_filename"] = json!("KernelImageFilter");
    doc["template_test_filename"] = json!("KernelImageFilter");
    doc["members"] = json!([]);
    doc["tests"][0]["settings"] = json!([]);
    scratch.add_document("Dilate.json", &doc);

    let report = scratch.run(strict(), true);
    assert_eq!(report.succeeded, vec!["ITKGrayscaleDilateImage"]);

    let outputs = scratch.outputs("ITKGrayscaleDilateImage");
    let source = std::fs::read_to_string(&outputs[1]).unwrap();
    assert!(source.contains("StructuringElementType structuringElement"));
    assert!(source.contains(
        "typedef itk::GrayscaleDilateImageFilter<InputImageType, OutputImageType, StructuringElementType> FilterType;"
    ));
    assert!(source.contains("filter->SetKernel(structuringElement);"));
    assert!(source.contains("m_KernelType=StaticCastScalar<"));
    assert!(source.contains("(itk::simple::sitkBall);"));

    let header = std::fs::read_to_string(&outputs[0]).unwrap();
    assert!(header.contains("SIMPL_FILTER_PARAMETER(FloatVec3_t, KernelRadius)"));
}

#[test]
fn module_lookup_fills_subgroup() {
    let scratch = Scratch::new();
    scratch.add_document("Abs.json", &abs_document());
    let itk = scratch.dir.path().join("ITK/Modules/Filtering/ImageIntensity/include");
    std::fs::create_dir_all(&itk).unwrap();
    std::fs::write(
        itk.join("itkAbsImageFilter.h"),
        "/** \\class AbsImageFilter\n * \\ingroup ITKImageIntensity\n */\n",
    )
    .unwrap();

    let tables = Tables::standard().unwrap();
    let modules = ModuleLocator::scan(&scratch.dir.path().join("ITK"));
    let report = Pipeline::new(&tables, strict()).run_batch(
        &scratch.documents(),
        OutputTarget {
            layout: &scratch.layout,
            modules: &modules,
            write: true,
        },
    );
    assert_eq!(report.succeeded.len(), 1);
    let source = std::fs::read_to_string(&scratch.outputs("ITKAbsImage")[1]).unwrap();
    assert!(source.contains("return \"ITK ImageIntensity\";"));
}
