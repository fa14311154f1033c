//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::cli::commands::{
    colors::ColorsCommands, completions::CompletionsArgs, inherit::InheritArgs, init::InitArgs,
    page::PageCommands, presets::PresetsArgs, sections::SectionsCommands,
    theming::ThemingCommands, validate::ValidateArgs,
};

#[derive(Parser)]
#[command(name = "luna")]
#[command(author, version, about = "Luna site design toolkit")]
#[command(long_about = "Resolve inherited design settings, manage color schemas, section templates and theming tokens for a Luna site stored as plain files.")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose output (debug logging)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Site root (default: auto-detect by finding .luna/)
    #[arg(long, global = true)]
    pub site: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new Luna site
    Init(InitArgs),

    /// Resolve inherited design fields for a page
    Inherit(InheritArgs),

    /// Inspect pages and their ancestor chains
    #[command(subcommand)]
    Page(PageCommands),

    /// Site color schema and stored color presets
    #[command(subcommand)]
    Colors(ColorsCommands),

    /// Show the built-in design presets
    Presets(PresetsArgs),

    /// Custom section templates
    #[command(subcommand)]
    Sections(SectionsCommands),

    /// Luna theming tokens (colors, fonts, buttons)
    #[command(subcommand)]
    Theming(ThemingCommands),

    /// Validate page files against the page schema
    Validate(ValidateArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Pick per command (json for service results, tables for lists, yaml for pages)
    #[default]
    Auto,
    /// JSON format (for programming)
    Json,
    /// YAML format (full fidelity)
    Yaml,
}

impl OutputFormat {
    /// This format, or `fallback` when it is `Auto`
    pub fn or(self, fallback: OutputFormat) -> OutputFormat {
        match self {
            OutputFormat::Auto => fallback,
            other => other,
        }
    }

    /// Parse a configured default (`json`, `yaml`/`yml`, `auto`)
    pub fn from_config(value: &str) -> Option<OutputFormat> {
        match value.trim().to_ascii_lowercase().as_str() {
            "auto" => Some(OutputFormat::Auto),
            "json" => Some(OutputFormat::Json),
            "yaml" | "yml" => Some(OutputFormat::Yaml),
            _ => None,
        }
    }
}
