//! Profile command - manage extraction profiles.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use console::style;

use fieldex_core::{
    validate_patterns, MatchMethod, Pattern, Profile, ValueTransform, ValueType,
};

/// Arguments for the profile command.
#[derive(Args)]
pub struct ProfileArgs {
    #[command(subcommand)]
    command: ProfileCommand,
}

#[derive(Subcommand)]
enum ProfileCommand {
    /// Show a profile (or the built-in starter profile)
    Show {
        /// Profile file (default: the user profile path)
        path: Option<PathBuf>,
    },

    /// Initialize a new profile file
    Init(InitArgs),

    /// Validate a profile's pattern set
    Validate {
        /// Profile file to check
        path: PathBuf,
    },

    /// Show the default profile file path
    Path,
}

#[derive(Args)]
struct InitArgs {
    /// Output path for the profile file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Overwrite existing file
    #[arg(long)]
    force: bool,
}

pub fn run(args: ProfileArgs) -> anyhow::Result<()> {
    match args.command {
        ProfileCommand::Show { path } => show_profile(path),
        ProfileCommand::Init(init_args) => init_profile(init_args),
        ProfileCommand::Validate { path } => validate_profile(&path),
        ProfileCommand::Path => show_path(),
    }
}

fn default_profile_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("fieldex")
        .join("profile.json")
}

/// A starter profile demonstrating the common field shapes.
fn starter_profile() -> Profile {
    Profile {
        name: "starter".to_string(),
        separator: "\n".to_string(),
        labels: Vec::new(),
        patterns: vec![
            Pattern::new("name", ValueType::String).with_label("name"),
            Pattern::new("age", ValueType::Int)
                .with_label("age")
                .with_transform(ValueTransform {
                    match_method: MatchMethod::Fuzzy,
                    replaces: [("years".to_string(), String::new())].into_iter().collect(),
                    separators: Vec::new(),
                }),
            Pattern::new("hobbies", ValueType::Array)
                .with_label("hobbies")
                .with_match_method(MatchMethod::Fuzzy)
                .with_transform(ValueTransform {
                    separators: vec![",".to_string(), "and".to_string()],
                    ..ValueTransform::default()
                }),
        ],
    }
}

fn show_profile(path: Option<PathBuf>) -> anyhow::Result<()> {
    let path = path.unwrap_or_else(default_profile_path);

    let profile = if path.exists() {
        Profile::from_file(&path)?
    } else {
        println!(
            "{} No profile found at {}, showing the starter profile.",
            style("ℹ").blue(),
            path.display()
        );
        starter_profile()
    };

    println!("{}", serde_json::to_string_pretty(&profile)?);

    Ok(())
}

fn init_profile(args: InitArgs) -> anyhow::Result<()> {
    let output_path = args.output.unwrap_or_else(default_profile_path);

    if output_path.exists() && !args.force {
        anyhow::bail!(
            "Profile already exists at {}. Use --force to overwrite.",
            output_path.display()
        );
    }

    // Create parent directory if needed
    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)?;
    }

    starter_profile().save(&output_path)?;

    println!(
        "{} Created profile at {}",
        style("✓").green(),
        output_path.display()
    );

    Ok(())
}

fn validate_profile(path: &Path) -> anyhow::Result<()> {
    let profile = Profile::from_file(path)?;

    match validate_patterns(&profile.patterns) {
        Ok(()) => {
            println!(
                "{} {} patterns are valid",
                style("✓").green(),
                profile.patterns.len()
            );
            Ok(())
        }
        Err(err) => anyhow::bail!("Invalid profile: {}", err),
    }
}

fn show_path() -> anyhow::Result<()> {
    let path = default_profile_path();

    println!("Profile file: {}", path.display());

    if path.exists() {
        println!("Status: {}", style("exists").green());
    } else {
        println!("Status: {}", style("not created").yellow());
        println!();
        println!("Run 'fieldex profile init' to create one.");
    }

    Ok(())
}
