//! # Validate Subcommand
//!
//! Checks descriptor documents through type checking without rendering or
//! writing anything. Exits 1 when any document fails.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use filtergen_schema::ExtractOptions;

use crate::discover::discover_documents;
use crate::pipeline::{Pipeline, PipelineOptions, Tables};

/// Arguments for the `filtergen validate` subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Directory containing the JSON descriptor documents.
    #[arg(short = 'j', long)]
    pub json_dir: PathBuf,

    /// Accept fields that are recognised but not supported yet.
    #[arg(short = 'n', long)]
    pub not_implemented: bool,

    /// Skip numeric and length limit checks.
    #[arg(short = 'b', long)]
    pub disable_verifications: bool,
}

/// Execute the validate subcommand.
pub fn run_validate(args: &ValidateArgs, tables: &Tables) -> Result<u8> {
    let documents = discover_documents(&args.json_dir)
        .with_context(|| format!("reading descriptor directory: {}", args.json_dir.display()))?;

    let options = PipelineOptions {
        extract: ExtractOptions {
            tolerate_unimplemented: args.not_implemented,
        },
        verify_limits: !args.disable_verifications,
        overwrite: false,
    };
    let report = Pipeline::new(tables, options).run_validation(&documents);

    println!(
        "Descriptors: {}/{} passed",
        report.succeeded.len(),
        report.total
    );
    for line in report.skip_lines("FAIL") {
        println!("{line}");
    }

    if report.has_failures() {
        println!(
            "\n{} descriptor(s) failed validation out of {} total.",
            report.skipped.len(),
            report.total
        );
        return Ok(1);
    }
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failures_set_exit_code() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("good.json"),
            r#"{"name": "AbsImageFilter", "number_of_inputs": 1,
                "template_code_filename": "ImageFilter", "template_test_filename": "ImageFilter"}"#,
        )
        .unwrap();
        let args = ValidateArgs {
            json_dir: dir.path().to_path_buf(),
            not_implemented: false,
            disable_verifications: false,
        };
        let tables = Tables::standard().unwrap();
        assert_eq!(run_validate(&args, &tables).unwrap(), 0);

        std::fs::write(dir.path().join("bad.json"), r#"{"name": "AbsImageFilter"}"#).unwrap();
        assert_eq!(run_validate(&args, &tables).unwrap(), 1);
    }
}
