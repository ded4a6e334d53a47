//! # Document Pipeline
//!
//! Drives one descriptor document through every stage, in order:
//!
//! ```text
//! Parsed → GeneralExtracted → ExistingFileChecked → SubfieldsExtracted
//!        → TestsAssembled → LimitsVerified → FieldsFiltered → TypesChecked
//!        → FragmentsAssembled → FilesWritten
//! ```
//!
//! A failure at any stage produces [`Skipped`], naming the stage the document
//! failed to reach. All four files are rendered in memory before the first
//! write, so a skipped document never leaves files behind. One document's
//! failure never stops the batch.

use std::fmt;
use std::path::{Path, PathBuf};

use filtergen_codegen::{
    assemble_tokens, check_document, render_text, CodegenError, FilterDocument, TestCase, TypeMapper,
};
use filtergen_core::{ensure_marker, naming, Description, ErrorCategory};
use filtergen_schema::{
    check_limits, check_limits_nested, default_members, extract, extract_list, filter_fields,
    filter_fields_nested, ExtractError, ExtractOptions, LimitViolation, SchemaCatalog,
    SchemaDefinitionError,
};
use serde_json::Value;

use crate::config::OutputLayout;
use crate::module::ModuleLocator;
use crate::overwrite::{check_existing, OverwriteError};
use crate::templates::{TemplateError, TemplateSet};

static ABSENT: Value = Value::Null;

/// Static tables shared by every document of a run.
#[derive(Debug, Clone)]
pub struct Tables {
    pub schemas: SchemaCatalog,
    pub types: TypeMapper,
}

impl Tables {
    pub fn standard() -> Result<Self, SchemaDefinitionError> {
        Ok(Self {
            schemas: SchemaCatalog::standard()?,
            types: TypeMapper::standard(),
        })
    }
}

/// Pipeline stages, in the order a document passes through them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    Parsed,
    GeneralExtracted,
    ExistingFileChecked,
    SubfieldsExtracted,
    TestsAssembled,
    LimitsVerified,
    FieldsFiltered,
    TypesChecked,
    FragmentsAssembled,
    FilesWritten,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Parsed => "Parsed",
            Self::GeneralExtracted => "GeneralExtracted",
            Self::ExistingFileChecked => "ExistingFileChecked",
            Self::SubfieldsExtracted => "SubfieldsExtracted",
            Self::TestsAssembled => "TestsAssembled",
            Self::LimitsVerified => "LimitsVerified",
            Self::FieldsFiltered => "FieldsFiltered",
            Self::TypesChecked => "TypesChecked",
            Self::FragmentsAssembled => "FragmentsAssembled",
            Self::FilesWritten => "FilesWritten",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a document was abandoned.
#[derive(Debug, thiserror::Error)]
pub enum SkipReason {
    #[error("reading document: {0}")]
    Read(#[source] std::io::Error),

    #[error("parsing document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error(transparent)]
    Limit(#[from] LimitViolation),

    #[error(transparent)]
    Codegen(#[from] CodegenError),

    #[error(transparent)]
    Overwrite(#[from] OverwriteError),

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error("writing {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl SkipReason {
    /// Taxonomy category, or `None` for I/O and parse failures.
    pub fn category(&self) -> Option<ErrorCategory> {
        match self {
            Self::Extract(e) => Some(e.category()),
            Self::Limit(e) => Some(e.category()),
            Self::Codegen(e) => Some(e.category()),
            Self::Overwrite(e) => Some(e.category()),
            Self::Read(_) | Self::Parse(_) | Self::Template(_) | Self::Write { .. } => None,
        }
    }
}

/// A document abandoned before reaching `stage`.
#[derive(Debug, thiserror::Error)]
#[error("{stage}: {reason}")]
pub struct Skipped {
    pub stage: Stage,
    #[source]
    pub reason: SkipReason,
}

fn at<E: Into<SkipReason>>(stage: Stage) -> impl FnOnce(E) -> Skipped {
    move |e| Skipped {
        stage,
        reason: e.into(),
    }
}

/// One rendered output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFile {
    pub path: PathBuf,
    pub contents: String,
}

/// Every file of one successfully rendered filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFilter {
    pub filter_name: String,
    pub files: Vec<RenderedFile>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PipelineOptions {
    pub extract: ExtractOptions,
    /// Run the Limitation Checker.
    pub verify_limits: bool,
    /// Replace previously generated files.
    pub overwrite: bool,
}

/// Where and whether a batch writes its output.
#[derive(Debug, Clone, Copy)]
pub struct OutputTarget<'a> {
    pub layout: &'a OutputLayout,
    pub modules: &'a ModuleLocator,
    /// `false` renders everything but writes nothing.
    pub write: bool,
}

/// Outcome of a batch.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub total: usize,
    /// Filter names, in input order.
    pub succeeded: Vec<String>,
    pub skipped: Vec<(PathBuf, Skipped)>,
    pub written: Vec<PathBuf>,
}

impl BatchReport {
    pub fn has_failures(&self) -> bool {
        !self.skipped.is_empty()
    }

    /// One console line per skipped document, e.g. `  SKIP: json/Abs.json: <reason>`.
    pub fn skip_lines(&self, label: &str) -> Vec<String> {
        self.skipped
            .iter()
            .map(|(path, skipped)| format!("  {label}: {}: {skipped}", path.display()))
            .collect()
    }

    fn record_skip(&mut self, path: &Path, skipped: Skipped) {
        tracing::warn!(
            document = %path.display(),
            stage = %skipped.stage,
            category = ?skipped.reason.category(),
            reason = %skipped.reason,
            "skipping document"
        );
        self.skipped.push((path.to_path_buf(), skipped));
    }
}

/// Per-run pipeline over borrowed static tables.
#[derive(Debug, Clone, Copy)]
pub struct Pipeline<'a> {
    tables: &'a Tables,
    options: PipelineOptions,
}

impl<'a> Pipeline<'a> {
    pub fn new(tables: &'a Tables, options: PipelineOptions) -> Self {
        Self { tables, options }
    }

    /// Read and parse one document.
    pub fn load(path: &Path) -> Result<Value, Skipped> {
        let content = std::fs::read_to_string(path).map_err(|e| Skipped {
            stage: Stage::Parsed,
            reason: SkipReason::Read(e),
        })?;
        serde_json::from_str(&content).map_err(at(Stage::Parsed))
    }

    /// Run every stage up to `TypesChecked`. The overwrite policy is applied
    /// only when `outputs` is given.
    pub fn check(&self, raw: &Value, outputs: Option<&OutputLayout>) -> Result<FilterDocument, Skipped> {
        let schemas = &self.tables.schemas;
        let opts = self.options.extract;

        let mut general = extract(raw, &schemas.general, opts).map_err(at(Stage::GeneralExtracted))?;
        let raw_name = general.text("name").to_string();
        tracing::debug!(filter = %raw_name, "general fields extracted");

        if let Some(layout) = outputs {
            let paths = layout.output_paths(&naming::filter_name(&raw_name));
            let decision = check_existing(&paths.guarded(), self.options.overwrite)
                .map_err(at(Stage::ExistingFileChecked))?;
            tracing::debug!(filter = %raw_name, ?decision, "existing outputs checked");
        }

        let stage = Stage::SubfieldsExtracted;
        let mut inputs = extract_list(field(&general, "inputs"), &schemas.inputs, opts).map_err(at(stage))?;
        let mut members =
            extract_list(field(&general, "members"), &schemas.members, opts).map_err(at(stage))?;
        for default in default_members(general.text("template_code_filename")) {
            members.push(extract(&default, &schemas.members, opts).map_err(at(stage))?);
        }
        let mut measurements =
            extract_list(field(&general, "measurements"), &schemas.members, opts).map_err(at(stage))?;
        let declared_tests =
            extract_list(field(&general, "tests"), &schemas.tests, opts).map_err(at(stage))?;
        if !inputs.is_empty() {
            general.insert("number_of_inputs", Value::from(inputs.len()));
        }

        let mut tests = Vec::with_capacity(declared_tests.len());
        let mut settings = Vec::with_capacity(declared_tests.len());
        let mut results = Vec::with_capacity(declared_tests.len());
        for test in declared_tests {
            let extracted = extract_list(field(&test, "settings"), &schemas.tests_settings, opts).and_then(
                |s| {
                    extract_list(field(&test, "measurements_results"), &schemas.tests_settings, opts)
                        .map(|r| (s, r))
                },
            );
            match extracted {
                Ok((s, r)) => {
                    tests.push(test);
                    settings.push(s);
                    results.push(r);
                }
                Err(e) => tracing::warn!(
                    filter = %raw_name,
                    tag = %test.render("tag"),
                    error = %e,
                    "dropping test with invalid settings"
                ),
            }
        }
        debug_assert!(tests.len() == settings.len() && tests.len() == results.len());

        if self.options.verify_limits {
            let stage = Stage::LimitsVerified;
            check_limits(&schemas.general, std::slice::from_ref(&general)).map_err(at(stage))?;
            check_limits(&schemas.inputs, &inputs).map_err(at(stage))?;
            check_limits(&schemas.members, &members).map_err(at(stage))?;
            check_limits(&schemas.members, &measurements).map_err(at(stage))?;
            check_limits(&schemas.tests, &tests).map_err(at(stage))?;
            check_limits_nested(&schemas.tests_settings, &settings).map_err(at(stage))?;
            check_limits_nested(&schemas.tests_settings, &results).map_err(at(stage))?;
        } else {
            tracing::debug!(filter = %raw_name, "limit verification disabled");
        }

        filter_fields(&schemas.general, std::slice::from_mut(&mut general));
        filter_fields(&schemas.inputs, &mut inputs);
        filter_fields(&schemas.members, &mut members);
        filter_fields(&schemas.members, &mut measurements);
        filter_fields(&schemas.tests, &mut tests);
        filter_fields_nested(&schemas.tests_settings, &mut settings);
        filter_fields_nested(&schemas.tests_settings, &mut results);

        let mut doc = FilterDocument {
            general,
            inputs,
            members,
            measurements,
            tests: pair_tests(tests, settings, results),
        };
        check_document(&mut doc, &self.tables.types).map_err(at(Stage::TypesChecked))?;
        tracing::debug!(filter = %raw_name, tests = doc.tests.len(), "types checked");
        Ok(doc)
    }

    /// Assemble tokens and render all four files in memory.
    pub fn render(
        &self,
        doc: &FilterDocument,
        layout: &OutputLayout,
        modules: &ModuleLocator,
    ) -> Result<GeneratedFilter, Skipped> {
        let stage = Stage::FragmentsAssembled;
        let raw_name = doc.raw_name();
        let module = modules.module_for(&naming::itk_header(raw_name));
        let tokens = assemble_tokens(doc, &self.tables.types, &module).map_err(at(stage))?;
        let templates =
            TemplateSet::load(&layout.template_paths(doc.template_code_filename())).map_err(at(stage))?;

        let filter_name = naming::filter_name(raw_name);
        let paths = layout.output_paths(&filter_name);
        let files = [
            (paths.header, &templates.header),
            (paths.source, &templates.source),
            (paths.test, &templates.test),
            (paths.documentation, &templates.documentation),
        ]
        .into_iter()
        .map(|(path, template)| RenderedFile {
            path,
            contents: ensure_marker(render_text(template, &tokens)),
        })
        .collect();
        Ok(GeneratedFilter { filter_name, files })
    }

    /// Every stage from `Parsed` to `FragmentsAssembled` for one document.
    pub fn generate_document(
        &self,
        path: &Path,
        layout: &OutputLayout,
        modules: &ModuleLocator,
    ) -> Result<GeneratedFilter, Skipped> {
        let raw = Self::load(path)?;
        let doc = self.check(&raw, Some(layout))?;
        self.render(&doc, layout, modules)
    }

    /// Generate every document, continuing past failures.
    pub fn run_batch(&self, documents: &[PathBuf], target: OutputTarget<'_>) -> BatchReport {
        let mut report = BatchReport {
            total: documents.len(),
            ..BatchReport::default()
        };
        for path in documents {
            tracing::info!(document = %path.display(), "processing document");
            let generated = self
                .generate_document(path, target.layout, target.modules)
                .and_then(|filter| {
                    if target.write {
                        write_files(&filter)?;
                    }
                    Ok(filter)
                });
            match generated {
                Ok(filter) => {
                    tracing::info!(filter = %filter.filter_name, files = filter.files.len(), "filter generated");
                    if target.write {
                        report.written.extend(filter.files.iter().map(|f| f.path.clone()));
                    }
                    report.succeeded.push(filter.filter_name);
                }
                Err(skipped) => report.record_skip(path, skipped),
            }
        }
        report
    }

    /// Check every document up to `TypesChecked` without touching outputs.
    pub fn run_validation(&self, documents: &[PathBuf]) -> BatchReport {
        let mut report = BatchReport {
            total: documents.len(),
            ..BatchReport::default()
        };
        for path in documents {
            match Self::load(path).and_then(|raw| self.check(&raw, None)) {
                Ok(doc) => {
                    tracing::info!(document = %path.display(), "document passed");
                    report.succeeded.push(naming::filter_name(doc.raw_name()));
                }
                Err(skipped) => report.record_skip(path, skipped),
            }
        }
        report
    }
}

/// Write every rendered file, creating parent directories.
///
/// All directories are created before the first file is written. If any
/// write fails, the files already written by this call are removed again so
/// a filter is never left half on disk.
pub fn write_files(filter: &GeneratedFilter) -> Result<(), Skipped> {
    let failed = |path: &Path| {
        let path = path.to_path_buf();
        move |source| Skipped {
            stage: Stage::FilesWritten,
            reason: SkipReason::Write { path, source },
        }
    };
    for parent in filter.files.iter().filter_map(|f| f.path.parent()) {
        std::fs::create_dir_all(parent).map_err(failed(parent))?;
    }

    let mut written: Vec<&Path> = Vec::with_capacity(filter.files.len());
    for file in &filter.files {
        if let Err(e) = std::fs::write(&file.path, &file.contents) {
            for path in written {
                if let Err(cleanup) = std::fs::remove_file(path) {
                    tracing::warn!(path = %path.display(), error = %cleanup, "could not remove partial output");
                }
            }
            return Err(failed(&file.path)(e));
        }
        tracing::debug!(path = %file.path.display(), bytes = file.contents.len(), "wrote file");
        written.push(&file.path);
    }
    Ok(())
}

fn field<'d>(description: &'d Description, name: &str) -> &'d Value {
    description.get(name).unwrap_or(&ABSENT)
}

fn pair_tests(
    tests: Vec<Description>,
    settings: Vec<Vec<Description>>,
    results: Vec<Vec<Description>>,
) -> Vec<TestCase> {
    tests
        .into_iter()
        .zip(settings)
        .zip(results)
        .map(|((test, settings), measurements)| TestCase {
            test,
            settings,
            measurements,
        })
        .collect()
}
