//! `luna validate` command - Validate page files against the page schema

use console::style;
use miette::Result;
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::cli::helpers::Site;
use crate::cli::GlobalOpts;
use crate::core::Registry;
use crate::schema::Validator;

#[derive(clap::Args, Debug)]
pub struct ValidateArgs {
    /// Page files to validate (default: every page under content/)
    #[arg()]
    pub paths: Vec<PathBuf>,

    /// Strict mode - warnings become errors
    #[arg(long)]
    pub strict: bool,

    /// Continue validation after first error
    #[arg(long)]
    pub keep_going: bool,

    /// Show summary only, don't show individual errors
    #[arg(long)]
    pub summary: bool,
}

/// Validation statistics
#[derive(Default)]
struct ValidationStats {
    files_checked: usize,
    files_passed: usize,
    files_failed: usize,
    total_errors: usize,
    total_warnings: usize,
}

pub fn run(args: ValidateArgs, global: &GlobalOpts) -> Result<()> {
    let site = Site::open(global)?;
    let validator = Validator::new()?;
    let project = &site.project;

    let files: Vec<PathBuf> = if args.paths.is_empty() {
        project.iter_page_files().collect()
    } else {
        args.paths.clone()
    };

    let mut stats = ValidationStats::default();
    let mut had_error = false;

    if !global.quiet {
        println!(
            "{} Validating {} file(s)...\n",
            style("→").blue(),
            files.len()
        );
    }

    // Two files claiming the same site path: the first one loaded wins
    let mut claimed: BTreeMap<String, PathBuf> = BTreeMap::new();

    for path in &files {
        stats.files_checked += 1;

        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                if !args.summary {
                    println!("{} {} - {}", style("✗").red(), path.display(), e);
                }
                stats.files_failed += 1;
                stats.total_errors += 1;
                had_error = true;
                if !args.keep_going {
                    break;
                }
                continue;
            }
        };

        let filename = path.display().to_string();
        match validator.validate(&content, &filename) {
            Ok(()) => {
                let duplicate = project.page_path(path).and_then(|site_path| {
                    match claimed.get(&site_path) {
                        Some(first) => Some((site_path, first.clone())),
                        None => {
                            claimed.insert(site_path, path.clone());
                            None
                        }
                    }
                });

                match duplicate {
                    None => {
                        stats.files_passed += 1;
                        if !args.summary && !global.quiet {
                            println!("{} {}", style("✓").green(), path.display());
                        }
                    }
                    Some((site_path, first)) => {
                        stats.total_warnings += 1;
                        if !args.summary {
                            println!(
                                "{} {} - page {} is already defined by {} (ignored)",
                                style("!").yellow(),
                                path.display(),
                                style(&site_path).cyan(),
                                first.display()
                            );
                        }
                        if args.strict {
                            stats.files_failed += 1;
                            had_error = true;
                        } else {
                            stats.files_passed += 1;
                        }
                    }
                }
            }
            Err(e) => {
                stats.files_failed += 1;
                stats.total_errors += e.violation_count();
                had_error = true;

                if !args.summary {
                    println!(
                        "{} {} - {} error(s)",
                        style("✗").red(),
                        path.display(),
                        e.violation_count()
                    );

                    let report = miette::Report::new(e);
                    println!("{:?}", report);
                }

                if !args.keep_going {
                    break;
                }
            }
        }
    }

    // The registry is shared by every site service
    if let Err(e) = Registry::open(&project.registry_path()) {
        stats.total_errors += 1;
        had_error = true;
        if !args.summary {
            println!("{} {}", style("✗").red(), e);
        }
    }

    println!();
    println!("{}", style("─".repeat(60)).dim());
    println!("{}", style("Validation Summary").bold());
    println!("{}", style("─".repeat(60)).dim());
    println!("  Files checked:  {}", style(stats.files_checked).cyan());
    println!("  Files passed:   {}", style(stats.files_passed).green());
    println!("  Files failed:   {}", style(stats.files_failed).red());
    println!("  Total errors:   {}", style(stats.total_errors).red());

    if stats.total_warnings > 0 {
        println!("  Total warnings: {}", style(stats.total_warnings).yellow());
    }

    println!();

    if had_error {
        if stats.files_failed == 1 {
            Err(miette::miette!("Validation failed: 1 file has errors"))
        } else if stats.files_failed == 0 {
            Err(miette::miette!("Validation failed: site registry is unreadable"))
        } else {
            Err(miette::miette!(
                "Validation failed: {} files have errors",
                stats.files_failed
            ))
        }
    } else {
        println!("{} All files passed validation!", style("✓").green().bold());
        Ok(())
    }
}
