//! Implementation of the `toothmarks check` command.

use std::fs::read_to_string;
use std::path::PathBuf;

use miette::{IntoDiagnostic, Report};
use serde::Serialize;
use toothmarks::{LandmarkTemplate, LoadError};

use crate::output::TemplateDiagnostic;

/// Arguments for the check command.
#[derive(Debug, clap::Args)]
pub struct CheckArgs {
    /// Template files to check (.yaml)
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output for one checked file.
#[derive(Serialize)]
struct CheckResult {
    file: String,
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    branches: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Run the check command.
pub fn run_check(args: CheckArgs, verbose: bool) -> miette::Result<i32> {
    let mut results = Vec::new();
    let mut any_failed = false;

    for path in &args.files {
        let file = path.display().to_string();
        let content = match read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                any_failed = true;
                let error = LoadError::Io {
                    path: path.clone(),
                    source: e,
                };
                if !args.json {
                    eprintln!("{}", error);
                }
                results.push(CheckResult {
                    file,
                    ok: false,
                    branches: None,
                    error: Some(error.to_string()),
                });
                continue;
            }
        };

        match LandmarkTemplate::from_text(&content) {
            Ok(template) => {
                if !args.json && verbose {
                    println!("ok: {} ({} branches)", file, template.branches().len());
                }
                results.push(CheckResult {
                    file,
                    ok: true,
                    branches: Some(template.branches().len()),
                    error: None,
                });
            }
            Err(error) => {
                any_failed = true;
                if !args.json {
                    let diagnostic = TemplateDiagnostic::from_load_error(path, &content, &error);
                    eprintln!("{:?}", Report::new(diagnostic));
                }
                results.push(CheckResult {
                    file,
                    ok: false,
                    branches: None,
                    error: Some(error.to_string()),
                });
            }
        }
    }

    if args.json {
        let output = serde_json::to_string_pretty(&results).into_diagnostic()?;
        println!("{}", output);
    } else if !any_failed {
        println!("{} file(s) ok", results.len());
    }

    if any_failed {
        Ok(exitcode::DATAERR)
    } else {
        Ok(exitcode::OK)
    }
}
