//! `luna theming` command - Site-wide design tokens

use clap::Subcommand;
use console::style;
use miette::Result;
use std::path::PathBuf;

use crate::cli::helpers::{read_document, Site};
use crate::cli::output::print_value;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::theming;

#[derive(Subcommand, Debug)]
pub enum ThemingCommands {
    /// Show the stored tokens (or the built-in defaults)
    Show,

    /// Validate and store new tokens
    Set(SetArgs),

    /// Remove the stored tokens and go back to the built-in set
    Reset,
}

#[derive(clap::Args, Debug)]
pub struct SetArgs {
    /// Tokens as JSON or YAML
    pub value: Option<String>,

    /// Read tokens from a file
    #[arg(long, conflicts_with = "value")]
    pub file: Option<PathBuf>,
}

pub fn run(cmd: ThemingCommands, global: &GlobalOpts) -> Result<()> {
    let site = Site::open(global)?;
    let format = site.format(global);

    match cmd {
        ThemingCommands::Show => {
            let registry = site.registry()?;
            print_value(&theming::get(&registry), format.or(OutputFormat::Json))
        }
        ThemingCommands::Set(args) => {
            let input = read_document(args.value.as_deref(), args.file.as_deref())?;
            if !input.is_object() {
                return Err(miette::miette!(
                    help = "expected an object with colors, fonts and/or buttons",
                    "Invalid theming input"
                ));
            }
            let mut registry = site.registry()?;
            let view = theming::update(&mut registry, &input)?;
            if format != OutputFormat::Auto {
                return print_value(&view, format);
            }
            println!("{} Luna theming updated", style("✓").green());
            Ok(())
        }
        ThemingCommands::Reset => {
            let mut registry = site.registry()?;
            let view = theming::reset(&mut registry)?;
            if format != OutputFormat::Auto {
                return print_value(&view, format);
            }
            println!("{} Luna theming reset to built-in tokens", style("✓").green());
            Ok(())
        }
    }
}
