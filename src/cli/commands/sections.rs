//! `luna sections` command - Custom section templates

use clap::Subcommand;
use console::style;
use miette::Result;
use std::path::PathBuf;

use crate::cli::helpers::{read_document, Site};
use crate::cli::output::print_value;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::sections::NewSection;
use crate::core::SectionStore;

#[derive(Subcommand, Debug)]
pub enum SectionsCommands {
    /// List section templates and their categories
    List,

    /// Save a new section template
    New(NewArgs),

    /// Delete a section template
    Delete(DeleteArgs),
}

#[derive(clap::Args, Debug)]
pub struct NewArgs {
    /// Template name
    #[arg(long, short = 'n')]
    pub name: String,

    /// Block data as JSON or YAML
    #[arg(long, short = 'd')]
    pub data: Option<String>,

    /// Read block data from a file
    #[arg(long, conflicts_with = "data")]
    pub file: Option<PathBuf>,

    /// Category (default: General)
    #[arg(long, short = 'c')]
    pub category: Option<String>,

    /// Description
    #[arg(long)]
    pub description: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct DeleteArgs {
    /// Template ID
    pub id: String,
}

pub fn run(cmd: SectionsCommands, global: &GlobalOpts) -> Result<()> {
    let site = Site::open(global)?;
    let format = site.format(global);
    let actor = site.actor(None, None);
    let mut registry = site.registry()?;
    let mut store = SectionStore::new(&mut registry);

    match cmd {
        SectionsCommands::List => print_value(&store.list(), format.or(OutputFormat::Json)),
        SectionsCommands::New(args) => {
            let data = read_document(args.data.as_deref(), args.file.as_deref())?;
            let section = store.create(
                NewSection {
                    name: args.name,
                    description: args.description,
                    category: args.category,
                    data,
                },
                &actor,
            )?;
            if format != OutputFormat::Auto {
                return print_value(&section, format);
            }
            println!(
                "{} Created section {} in {}",
                style(&section.id).cyan(),
                style(&section.name).bold(),
                section.category
            );
            Ok(())
        }
        SectionsCommands::Delete(args) => {
            let deleted = store.delete(&args.id)?;
            if format != OutputFormat::Auto {
                return print_value(&deleted, format);
            }
            println!("{} {}", style("✓").green(), deleted.message);
            Ok(())
        }
    }
}
