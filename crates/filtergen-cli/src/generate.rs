//! # Generate Subcommand
//!
//! Renders every descriptor document in a directory into filter sources,
//! unit tests and documentation under a plugin root.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use filtergen_schema::ExtractOptions;

use crate::config::GeneratorConfig;
use crate::discover::discover_documents;
use crate::module::ModuleLocator;
use crate::pipeline::{OutputTarget, Pipeline, PipelineOptions, Tables};

/// Arguments for the `filtergen generate` subcommand.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Directory containing the JSON descriptor documents.
    #[arg(short = 'j', long)]
    pub json_dir: PathBuf,

    /// Plugin root directory that receives the generated files.
    #[arg(short = 'd', long)]
    pub root_dir: PathBuf,

    /// Accept fields that are recognised but not supported yet.
    #[arg(short = 'n', long)]
    pub not_implemented: bool,

    /// Replace files written by a previous run.
    #[arg(short = 'o', long)]
    pub overwrite: bool,

    /// Skip numeric and length limit checks.
    #[arg(short = 'b', long)]
    pub disable_verifications: bool,

    /// ITK source tree used to look up each filter's module.
    #[arg(short = 'I', long)]
    pub itk_source_dir: Option<PathBuf>,

    /// Run the whole pipeline but write nothing.
    #[arg(long)]
    pub dry_run: bool,
}

impl GenerateArgs {
    pub fn pipeline_options(&self) -> PipelineOptions {
        PipelineOptions {
            extract: ExtractOptions {
                tolerate_unimplemented: self.not_implemented,
            },
            verify_limits: !self.disable_verifications,
            overwrite: self.overwrite,
        }
    }
}

/// Execute the generate subcommand.
///
/// Individual document failures are reported but never change the exit
/// code; only an unreadable input directory is fatal.
pub fn run_generate(args: &GenerateArgs, config: &GeneratorConfig, tables: &Tables) -> Result<u8> {
    let documents = discover_documents(&args.json_dir)
        .with_context(|| format!("reading descriptor directory: {}", args.json_dir.display()))?;
    let layout = config.layout.resolve(&args.root_dir);
    let modules = match &args.itk_source_dir {
        Some(dir) => ModuleLocator::scan(dir),
        None => ModuleLocator::empty(),
    };

    let pipeline = Pipeline::new(tables, args.pipeline_options());
    let report = pipeline.run_batch(
        &documents,
        OutputTarget {
            layout: &layout,
            modules: &modules,
            write: !args.dry_run,
        },
    );

    tracing::info!(
        total = report.total,
        generated = report.succeeded.len(),
        skipped = report.skipped.len(),
        "batch complete"
    );

    if args.dry_run {
        println!("Dry run: no files were written.");
    }
    println!(
        "Generated {}/{} filter(s) into {}",
        report.succeeded.len(),
        report.total,
        args.root_dir.display()
    );
    for line in report.skip_lines("SKIP") {
        println!("{line}");
    }
    if !report.succeeded.is_empty() {
        println!();
        println!("Add these filters to ITKImageProcessingFilters/SourceList.cmake and Test/CMakeLists.txt:");
        for name in &report.succeeded {
            println!("  {name}");
        }
        println!();
        println!("Update 'Test/TestFileLocations.h.in' with the new test names.");
    }

    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(dir: &std::path::Path) -> GenerateArgs {
        GenerateArgs {
            json_dir: dir.join("json"),
            root_dir: dir.join("plugin"),
            not_implemented: false,
            overwrite: false,
            disable_verifications: false,
            itk_source_dir: None,
            dry_run: false,
        }
    }

    #[test]
    fn test_pipeline_options_follow_flags() {
        let dir = tempfile::tempdir().unwrap();
        let mut a = args(dir.path());
        let options = a.pipeline_options();
        assert!(options.verify_limits);
        assert!(!options.overwrite);
        assert!(!options.extract.tolerate_unimplemented);

        a.not_implemented = true;
        a.disable_verifications = true;
        a.overwrite = true;
        let options = a.pipeline_options();
        assert!(!options.verify_limits);
        assert!(options.overwrite);
        assert!(options.extract.tolerate_unimplemented);
    }

    #[test]
    fn test_unreadable_input_directory_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let tables = Tables::standard().unwrap();
        let result = run_generate(&args(dir.path()), &GeneratorConfig::default(), &tables);
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_input_directory_succeeds() {
        let dir = tempfile::tempdir().unwrap();
        let a = args(dir.path());
        std::fs::create_dir_all(&a.json_dir).unwrap();
        let tables = Tables::standard().unwrap();
        assert_eq!(run_generate(&a, &GeneratorConfig::default(), &tables).unwrap(), 0);
        assert!(!a.root_dir.exists());
    }
}
