//! `rig reset` command - Reset the current build to empty

use console::style;
use miette::Result;

use crate::cli::commands::SessionContext;
use crate::cli::GlobalOpts;

#[derive(clap::Args, Debug)]
pub struct ResetArgs {
    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

pub fn run(args: ResetArgs, global: &GlobalOpts) -> Result<()> {
    let mut ctx = SessionContext::open(global)?;

    let count = ctx.session.parts().len();
    if count > 0 && !args.yes {
        eprintln!(
            "{} This discards {} installed part{}. Re-run with {} to confirm.",
            style("!").yellow(),
            count,
            if count == 1 { "" } else { "s" },
            style("--yes").yellow()
        );
        return Err(miette::miette!("reset not confirmed"));
    }

    ctx.session.reset();
    ctx.save()?;

    println!("{} Build reset", style("✓").green());
    Ok(())
}
