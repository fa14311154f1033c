//! `luna colors` command - Site color schema and stored presets

use clap::Subcommand;
use console::style;
use miette::Result;

use crate::cli::helpers::{parse_assignments, Site};
use crate::cli::output::print_value;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::color::ColorSuggestion;
use crate::core::ColorSchemaService;

#[derive(Subcommand, Debug)]
pub enum ColorsCommands {
    /// Show the current schema, stored presets and suggestions
    Show,

    /// Replace the color schema; invalid colors are dropped
    Set(SetArgs),

    /// Make a stored preset the current schema
    Apply(PresetArgs),

    /// Store the current schema as a named preset
    SavePreset(PresetArgs),
}

#[derive(clap::Args, Debug)]
pub struct SetArgs {
    /// Colors as KEY=VALUE (e.g., primary_color=#0070ae)
    #[arg(required = true)]
    pub colors: Vec<String>,
}

#[derive(clap::Args, Debug)]
pub struct PresetArgs {
    /// Preset name
    pub name: String,
}

pub fn run(cmd: ColorsCommands, global: &GlobalOpts) -> Result<()> {
    let site = Site::open(global)?;
    let format = site.format(global);
    let mut registry = site.registry()?;
    let mut service = ColorSchemaService::new(&mut registry);

    match cmd {
        ColorsCommands::Show => print_value(&service.get(), format.or(OutputFormat::Json)),
        ColorsCommands::Set(args) => {
            let input = parse_assignments(&args.colors)?;
            let updated = service.update(&input)?;
            if format != OutputFormat::Auto {
                return print_value(&updated, format);
            }
            let dropped = input.len() - updated.updated_schema.len();
            println!(
                "{} Color schema updated ({} color(s))",
                style("✓").green(),
                updated.updated_schema.len()
            );
            if dropped > 0 && !global.quiet {
                println!(
                    "{} {} invalid color(s) dropped",
                    style("!").yellow(),
                    dropped
                );
            }
            print_suggestions(&updated.suggestions, global.quiet);
            Ok(())
        }
        ColorsCommands::Apply(args) => {
            let applied = service.apply_preset(Some(args.name.as_str()))?;
            if format != OutputFormat::Auto {
                return print_value(&applied, format);
            }
            println!(
                "{} Applied preset {}",
                style("✓").green(),
                style(&applied.applied_preset).cyan()
            );
            print_suggestions(&applied.suggestions, global.quiet);
            Ok(())
        }
        ColorsCommands::SavePreset(args) => {
            let preset = service.save_preset(&args.name)?;
            if format != OutputFormat::Auto {
                return print_value(&preset, format);
            }
            println!(
                "{} Saved preset {} ({} color(s))",
                style("✓").green(),
                style(&preset.name).cyan(),
                preset.colors.len()
            );
            Ok(())
        }
    }
}

fn print_suggestions(suggestions: &[ColorSuggestion], quiet: bool) {
    if quiet || suggestions.is_empty() {
        return;
    }
    println!();
    println!("Suggestions:");
    for suggestion in suggestions {
        println!(
            "  {} {} {}",
            style(&suggestion.color).cyan(),
            suggestion.name,
            style(&suggestion.usage).dim()
        );
    }
}
