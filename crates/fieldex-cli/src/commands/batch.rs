//! Batch command - parse multiple text files with one profile.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use console::style;
use glob::glob;
use tracing::warn;

use fieldex_core::{ParseOutcome, Profile};

use super::parse::{format_outcome, OutputFormat};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Profile file with extraction patterns
    #[arg(short, long)]
    profile: PathBuf,

    /// Output directory (default: print to stdout)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Continue when a file cannot be read
    #[arg(long)]
    continue_on_error: bool,
}

/// Result of parsing a single file.
struct FileResult {
    path: PathBuf,
    outcome: Option<ParseOutcome>,
    error: Option<String>,
}

pub fn run(args: BatchArgs) -> anyhow::Result<()> {
    let profile = Profile::from_file(&args.profile)?;
    let normalizer = profile.normalizer();

    // Expand glob pattern
    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|entry| entry.ok())
        .filter(|path| path.is_file())
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to parse",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let mut results = Vec::with_capacity(files.len());
    for path in files {
        match fs::read_to_string(&path) {
            Ok(text) => {
                let outcome = normalizer.parse(&text);
                for error in outcome.errors() {
                    warn!("{}: {}", path.display(), error);
                }
                results.push(FileResult {
                    path,
                    outcome: Some(outcome),
                    error: None,
                });
            }
            Err(err) => {
                if !args.continue_on_error {
                    anyhow::bail!("Failed to read {}: {}", path.display(), err);
                }
                results.push(FileResult {
                    path,
                    outcome: None,
                    error: Some(err.to_string()),
                });
            }
        }
    }

    for result in &results {
        let Some(outcome) = &result.outcome else {
            continue;
        };
        let rendered = format_outcome(outcome, args.format)?;
        match &args.output_dir {
            Some(dir) => {
                fs::write(dir.join(output_file_name(&result.path, args.format)), &rendered)?;
            }
            None => {
                println!("{}", style(result.path.display()).bold());
                println!("{}", rendered);
            }
        }
    }

    if args.summary {
        let summary = summary_csv(&results)?;
        match &args.output_dir {
            Some(dir) => fs::write(dir.join("summary.csv"), &summary)?,
            None => println!("{}", summary),
        }
    }

    let failed = results.iter().filter(|r| r.error.is_some()).count();
    let clean = results
        .iter()
        .filter(|r| r.outcome.as_ref().is_some_and(|o| o.is_ok()))
        .count();
    println!(
        "{} Parsed {} files ({} clean, {} failed to read)",
        style("✓").green(),
        results.len(),
        clean,
        failed
    );

    Ok(())
}

fn output_file_name(input: &Path, format: OutputFormat) -> String {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    let extension = match format {
        OutputFormat::Json => "json",
        OutputFormat::Csv => "csv",
        OutputFormat::Text => "txt",
    };
    format!("{stem}.{extension}")
}

fn summary_csv(results: &[FileResult]) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(["file", "status", "diagnostics"])?;

    for result in results {
        let (status, diagnostics) = match (&result.outcome, &result.error) {
            (Some(outcome), _) if outcome.is_ok() => ("ok".to_string(), String::new()),
            (Some(outcome), _) => (
                "diagnostics".to_string(),
                outcome
                    .errors()
                    .iter()
                    .map(|e| e.to_string())
                    .collect::<Vec<_>>()
                    .join("; "),
            ),
            (None, err) => (
                "read failed".to_string(),
                err.clone().unwrap_or_default(),
            ),
        };
        wtr.write_record([result.path.display().to_string(), status, diagnostics])?;
    }

    Ok(String::from_utf8(wtr.into_inner()?)?)
}
