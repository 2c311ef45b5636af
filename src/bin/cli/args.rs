//! CLI Argument Structures
//!
//! Argument definitions and command structures used by the nomen binary.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Type-driven identifier naming checks
#[derive(Parser)]
#[command(name = "nomen")]
#[command(version = VERSION)]
#[command(about = "Nomen - type-driven identifier naming checks")]
#[command(long_about = "
Derive the acceptable names for a value from its type, and report identifiers
that hide their type behind generic names.

Common Usage:

  # Show the base names a type allows
  nomen candidates 'App\\Entity\\OrderEntity'

  # Check one identifier against a type, with a type model
  nomen check item 'App\\Entity\\OrderEntity' --types types.yml

  # Check a batch of subjects and emit JSON
  nomen lint subjects.yml --types types.yml --format json
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the candidate base names for a type expression
    Candidates(CandidatesArgs),

    /// Check a single identifier against a type expression
    Check(CheckArgs),

    /// Check every subject in a YAML or JSON subjects file
    Lint(LintArgs),

    /// Print default configuration in YAML format
    #[command(name = "print-default-config")]
    PrintDefaultConfig,

    /// Validate a nomen configuration file
    #[command(name = "validate-config")]
    ValidateConfig(ValidateConfigArgs),
}

/// Type model and configuration inputs shared by the analysis commands
#[derive(Args, Clone, Default)]
pub struct ModelArgs {
    /// Type model file (YAML or JSON) describing classes and interfaces
    #[arg(long, env = "NOMEN_TYPES")]
    pub types: Option<PathBuf>,

    /// Configuration file (YAML or JSON)
    #[arg(short, long, env = "NOMEN_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Args)]
pub struct CandidatesArgs {
    /// Type expression, e.g. `?App\Order` or `array<int, App\Node>`
    #[arg(value_name = "TYPE")]
    pub type_expression: String,

    #[command(flatten)]
    pub model: ModelArgs,
}

#[derive(Args)]
pub struct CheckArgs {
    /// Identifier to check, with or without the leading `$`
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Type expression the identifier holds
    #[arg(value_name = "TYPE")]
    pub type_expression: String,

    #[command(flatten)]
    pub model: ModelArgs,
}

#[derive(Args)]
pub struct LintArgs {
    /// Subjects file (YAML or JSON)
    #[arg(value_name = "SUBJECTS")]
    pub subjects: PathBuf,

    #[command(flatten)]
    pub model: ModelArgs,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Args)]
pub struct ValidateConfigArgs {
    /// Path to configuration file to validate
    #[arg(value_name = "FILE")]
    pub config: PathBuf,

    /// Show detailed configuration breakdown
    #[arg(long)]
    pub detailed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable format
    Text,
    /// JSON format output
    Json,
}
