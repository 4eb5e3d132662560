//! Implementation of the `toothmarks eval` command.

use std::fs::read_to_string;
use std::path::PathBuf;

use clap::ValueEnum;
use miette::IntoDiagnostic;
use serde::Serialize;
use toothmarks::{Arch, Dentition, EvaluateError, JawAttributes, LandmarkTemplate};

use crate::output::table::format_landmark_table;
use crate::output::TemplateDiagnostic;

/// Arguments for the eval command.
#[derive(Debug, clap::Args)]
pub struct EvalArgs {
    /// Template file to evaluate (.yaml)
    pub file: PathBuf,

    /// Arch to evaluate for; omit to leave it wildcard
    #[arg(long, value_enum)]
    pub arch: Option<ArchArg>,

    /// Dentition stage to evaluate for; omit to leave it wildcard
    #[arg(long, value_enum)]
    pub dentition: Option<DentitionArg>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arch choices on the command line.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ArchArg {
    Upper,
    Lower,
}

/// Dentition choices on the command line.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DentitionArg {
    Adult,
    Primary,
}

/// JSON output for eval results.
#[derive(Serialize)]
struct EvalResult {
    landmarks: Vec<String>,
}

/// Run the eval command.
pub fn run_eval(args: EvalArgs) -> miette::Result<i32> {
    let content = read_to_string(&args.file)
        .into_diagnostic()
        .map_err(|e| miette::miette!("Cannot read template file {}: {}", args.file.display(), e))?;

    let template = match LandmarkTemplate::from_text(&content) {
        Ok(template) => template,
        Err(error) => {
            let diagnostic = TemplateDiagnostic::from_load_error(&args.file, &content, &error);
            return Err(diagnostic.into());
        }
    };

    let attributes = query_attributes(&args);
    match template.evaluate(attributes) {
        Ok(landmarks) => {
            if args.json {
                let output = EvalResult { landmarks };
                println!(
                    "{}",
                    serde_json::to_string_pretty(&output).into_diagnostic()?
                );
            } else {
                println!("{}", format_landmark_table(&landmarks));
            }
            Ok(exitcode::OK)
        }
        // A template with no entry for this jaw is a normal outcome, with
        // its own exit status so scripts can tell it from a malformed query.
        Err(EvaluateError::LandmarksUndefined { attributes }) => {
            if args.json {
                let output = serde_json::json!({ "undefined": attributes.to_string() });
                println!(
                    "{}",
                    serde_json::to_string_pretty(&output).into_diagnostic()?
                );
            } else {
                println!("no landmarks defined for {}", attributes);
            }
            Ok(exitcode::UNAVAILABLE)
        }
        Err(error) => {
            if args.json {
                let output = serde_json::json!({ "error": error.to_string() });
                eprintln!(
                    "{}",
                    serde_json::to_string_pretty(&output).into_diagnostic()?
                );
            } else {
                eprintln!("Evaluation error: {}", error);
            }
            Ok(exitcode::DATAERR)
        }
    }
}

/// Build the queried attributes from the command-line flags.
fn query_attributes(args: &EvalArgs) -> JawAttributes {
    let mut attributes = JawAttributes::wildcard();
    if let Some(arch) = args.arch {
        attributes = attributes.with_arch(match arch {
            ArchArg::Upper => Arch::Upper,
            ArchArg::Lower => Arch::Lower,
        });
    }
    if let Some(dentition) = args.dentition {
        attributes = attributes.with_dentition(match dentition {
            DentitionArg::Adult => Dentition::Adult,
            DentitionArg::Primary => Dentition::Primary,
        });
    }
    attributes
}
