//! `luna presets` command - Built-in design presets

use miette::Result;

use crate::cli::output::print_value;
use crate::cli::GlobalOpts;
use crate::entities::preset::design_presets;

#[derive(clap::Args, Debug)]
pub struct PresetsArgs {}

pub fn run(_args: PresetsArgs, global: &GlobalOpts) -> Result<()> {
    // Static data; no site needed
    print_value(&design_presets(), global.format)
}
