//! `luna page` command - Inspect pages and ancestor chains

use clap::Subcommand;
use console::style;
use miette::Result;
use serde::Serialize;
use tabled::{builder::Builder, settings::Style};

use crate::cli::helpers::{content_error, truncate_str, Site};
use crate::cli::output::print_value;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::node::ContentNode;
use crate::core::{Actor, ContentRepository, ContentTree};
use crate::entities::Page;

#[derive(Subcommand, Debug)]
pub enum PageCommands {
    /// List all pages
    List,

    /// Show a page's stored fields
    Show(PageArgs),

    /// Show a page's ancestor chain, nearest first
    Chain(PageArgs),
}

#[derive(clap::Args, Debug)]
pub struct PageArgs {
    /// Page path (e.g., /products/widgets)
    #[arg(default_value = "/")]
    pub path: String,

    /// Comma-separated roles of the acting user (for the viewable column)
    #[arg(long)]
    pub roles: Option<String>,
}

/// One row of `page list` / `page chain`
#[derive(Debug, Serialize)]
struct PageSummary<'a> {
    path: &'a str,
    url: &'a str,
    title: &'a str,
    design: bool,
    #[serde(skip_serializing_if = "<[String]>::is_empty")]
    view_roles: &'a [String],
    fields: Vec<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    viewable: Option<bool>,
}

impl<'a> PageSummary<'a> {
    fn of(node: &'a ContentNode) -> Self {
        Self {
            path: &node.path,
            url: &node.url,
            title: &node.page.title,
            design: node.page.design,
            view_roles: &node.page.view_roles,
            fields: node.page.fields.keys().map(String::as_str).collect(),
            viewable: None,
        }
    }
}

#[derive(Debug, Serialize)]
struct PageDetail<'a> {
    path: &'a str,
    url: &'a str,
    #[serde(flatten)]
    page: &'a Page,
}

pub fn run(cmd: PageCommands, global: &GlobalOpts) -> Result<()> {
    let site = Site::open(global)?;
    let tree = site.content()?;
    let format = site.format(global);

    match cmd {
        PageCommands::List => run_list(&tree, format, global.quiet),
        PageCommands::Show(args) => run_show(&tree, &args, format),
        PageCommands::Chain(args) => {
            let actor = site.actor(None, args.roles.as_deref());
            run_chain(&tree, &args, &actor, format)
        }
    }
}

fn run_list(tree: &ContentTree, format: OutputFormat, quiet: bool) -> Result<()> {
    let pages: Vec<PageSummary> = tree.iter().map(PageSummary::of).collect();

    if format != OutputFormat::Auto {
        return print_value(&pages, format);
    }

    if pages.is_empty() {
        if !quiet {
            println!("No pages found under content/");
        }
        return Ok(());
    }

    let mut builder = Builder::default();
    builder.push_record(["Path", "Title", "Design", "View roles", "Fields"]);
    for page in &pages {
        builder.push_record([
            page.path.to_string(),
            truncate_str(page.title, 30),
            yes_no(page.design).to_string(),
            page.view_roles.join(", "),
            page.fields.join(", "),
        ]);
    }
    println!("{}", builder.build().with(Style::sharp()));

    if !quiet {
        println!();
        println!("{} page(s) found", style(pages.len()).cyan());
    }
    Ok(())
}

fn run_show(tree: &ContentTree, args: &PageArgs, format: OutputFormat) -> Result<()> {
    let node = tree.lookup(&args.path).map_err(content_error)?;
    let detail = PageDetail {
        path: &node.path,
        url: &node.url,
        page: &node.page,
    };
    print_value(&detail, format.or(OutputFormat::Yaml))
}

fn run_chain(tree: &ContentTree, args: &PageArgs, actor: &Actor, format: OutputFormat) -> Result<()> {
    let node = tree.lookup(&args.path).map_err(content_error)?;
    let chain = tree.ancestor_chain(node).map_err(content_error)?;

    let mut rows = Vec::with_capacity(chain.len());
    for ancestor in chain {
        let mut summary = PageSummary::of(ancestor);
        summary.viewable = Some(tree.can_view(actor, ancestor).map_err(content_error)?);
        rows.push(summary);
    }

    if format != OutputFormat::Auto {
        return print_value(&rows, format);
    }

    let mut builder = Builder::default();
    builder.push_record(["#", "Path", "Title", "Design", "Viewable", "Fields"]);
    for (depth, row) in rows.iter().enumerate() {
        builder.push_record([
            depth.to_string(),
            row.path.to_string(),
            truncate_str(row.title, 30),
            yes_no(row.design).to_string(),
            yes_no(row.viewable.unwrap_or(false)).to_string(),
            row.fields.join(", "),
        ]);
    }
    println!("{}", builder.build().with(Style::sharp()));
    Ok(())
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}
