use clap::Parser;
use miette::Result;
use luna::cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior (terminate silently) for proper Unix piping.
    // Without this, piping to `head`, `grep -q`, etc. causes a panic on broken pipe.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    let global = cli.global;

    init_logging(global.verbose, global.quiet);

    match cli.command {
        Commands::Init(args) => luna::cli::commands::init::run(args),
        Commands::Inherit(args) => luna::cli::commands::inherit::run(args, &global),
        Commands::Page(cmd) => luna::cli::commands::page::run(cmd, &global),
        Commands::Colors(cmd) => luna::cli::commands::colors::run(cmd, &global),
        Commands::Presets(args) => luna::cli::commands::presets::run(args, &global),
        Commands::Sections(cmd) => luna::cli::commands::sections::run(cmd, &global),
        Commands::Theming(cmd) => luna::cli::commands::theming::run(cmd, &global),
        Commands::Validate(args) => luna::cli::commands::validate::run(args, &global),
        Commands::Completions(args) => luna::cli::commands::completions::run(args),
    }
}

/// Logs go to stderr so structured output on stdout stays parseable.
/// `RUST_LOG` takes precedence over the flags.
fn init_logging(verbose: bool, quiet: bool) {
    let default = if verbose {
        "luna=debug"
    } else if quiet {
        "luna=error"
    } else {
        "luna=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}
