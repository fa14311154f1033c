//! `luna inherit` command - Resolve inherited design fields for a page

use miette::Result;

use crate::cli::helpers::{content_error, Site};
use crate::cli::output::print_value;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::inherit::{query, DESIGN_SCHEMA_BEHAVIOR};

#[derive(clap::Args, Debug)]
pub struct InheritArgs {
    /// Page path (e.g., /products/widgets)
    #[arg(default_value = "/")]
    pub path: String,

    /// Comma-separated behavior namespaces to resolve
    #[arg(long, short = 'b', default_value = DESIGN_SCHEMA_BEHAVIOR)]
    pub behaviors: String,

    /// Resolve as this user instead of the configured actor
    #[arg(long)]
    pub actor: Option<String>,

    /// Comma-separated roles of the acting user
    #[arg(long)]
    pub roles: Option<String>,
}

pub fn run(args: InheritArgs, global: &GlobalOpts) -> Result<()> {
    let site = Site::open(global)?;
    let tree = site.content()?;
    let actor = site.actor(args.actor.as_deref(), args.roles.as_deref());

    tracing::debug!(
        path = args.path.as_str(),
        actor = actor.display_name(),
        "resolving inherited design"
    );

    let resolved = query(&tree, &actor, &args.path, &args.behaviors).map_err(content_error)?;
    print_value(&resolved, site.format(global).or(OutputFormat::Json))
}
