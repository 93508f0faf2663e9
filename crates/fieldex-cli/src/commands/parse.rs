//! Parse command - extract fields from a single text file.

use std::fs;
use std::io::Read;
use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::debug;

use fieldex_core::{ParseOutcome, Profile, Value};

/// Arguments for the parse command.
#[derive(Args)]
pub struct ParseArgs {
    /// Input text file ("-" for stdin)
    #[arg(default_value = "-")]
    input: String,

    /// Profile file with extraction patterns
    #[arg(short, long)]
    profile: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Override the profile's line separator
    #[arg(long)]
    separator: Option<String>,

    /// Match labels case-sensitively, keeping inner whitespace
    #[arg(long)]
    strict: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

pub fn run(args: ParseArgs) -> anyhow::Result<()> {
    let profile = Profile::from_file(&args.profile)?;
    let text = read_input(&args.input)?;

    let mut normalizer = profile.normalizer().with_strict_mode(args.strict);
    if let Some(separator) = &args.separator {
        normalizer.set_separator(separator.clone());
    }

    debug!("parsing {} with profile {:?}", args.input, profile.name);

    let outcome = normalizer.parse(&text);

    if !outcome.is_ok() {
        eprintln!("{}", style("Parse diagnostics:").yellow());
        for error in outcome.errors() {
            eprintln!("  - {}", error);
        }
    }

    let rendered = format_outcome(&outcome, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &rendered)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", rendered);
    }

    Ok(())
}

fn read_input(input: &str) -> anyhow::Result<String> {
    if input == "-" {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        return Ok(buffer);
    }

    let path = PathBuf::from(input);
    if !path.exists() {
        anyhow::bail!("Input file not found: {}", path.display());
    }
    Ok(fs::read_to_string(path)?)
}

pub(crate) fn format_outcome(
    outcome: &ParseOutcome,
    format: OutputFormat,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(outcome.to_json_pretty()?),
        OutputFormat::Csv => format_csv(outcome),
        OutputFormat::Text => Ok(format_text(outcome)),
    }
}

fn format_csv(outcome: &ParseOutcome) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(outcome.items().keys())?;
    wtr.write_record(outcome.items().values().map(Value::to_string))?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(outcome: &ParseOutcome) -> String {
    let mut output = String::new();
    for (key, value) in outcome.items() {
        output.push_str(&format!("{}: {}\n", key, value));
    }
    output
}
