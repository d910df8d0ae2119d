use clap::{Parser, ValueEnum};
use miette::Result;
use rigkit::cli::{Cli, Commands, OutputFormat};
use rigkit::core::Config;

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior (terminate silently) for proper Unix piping.
    // Without this, piping to `head`, `grep -q`, etc. causes a panic on broken pipe.
    // This is standard practice for CLI tools that output to stdout.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
    // Install miette's fancy error handler for beautiful diagnostics
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
    let mut global = cli.global;

    // `auto` defers to the configured default format, when one is set.
    if global.format == OutputFormat::Auto {
        if let Some(configured) = Config::load().default_format.as_deref() {
            if let Ok(format) = OutputFormat::from_str(configured, true) {
                global.format = format;
            }
        }
    }

    match cli.command {
        Commands::Init(args) => rigkit::cli::commands::init::run(args),
        Commands::Part(cmd) => rigkit::cli::commands::part::run(cmd, &global),
        Commands::Install(args) => rigkit::cli::commands::install::run(args, &global),
        Commands::Remove(args) => rigkit::cli::commands::remove::run(args, &global),
        Commands::Nodes(args) => rigkit::cli::commands::nodes::run(args, &global),
        Commands::Select(args) => rigkit::cli::commands::select::run(args, &global),
        Commands::Status(args) => rigkit::cli::commands::status::run(args, &global),
        Commands::Clear(args) => rigkit::cli::commands::clear::run(args, &global),
        Commands::Reset(args) => rigkit::cli::commands::reset::run(args, &global),
        Commands::Build(cmd) => rigkit::cli::commands::build::run(cmd, &global),
        Commands::Completions(args) => rigkit::cli::commands::completions::run(args),
    }
}
