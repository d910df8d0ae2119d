//! `rig remove` command - Remove a part from the current build

use console::style;
use miette::Result;

use crate::cli::commands::SessionContext;
use crate::cli::GlobalOpts;

#[derive(clap::Args, Debug)]
pub struct RemoveArgs {
    /// Installed part ID to remove
    pub part_id: String,
}

pub fn run(args: RemoveArgs, global: &GlobalOpts) -> Result<()> {
    let mut ctx = SessionContext::open(global)?;

    let was_installed = ctx.session.parts().iter().any(|p| p.id() == args.part_id);
    ctx.session.remove(&args.part_id);
    ctx.save()?;

    if was_installed {
        println!(
            "{} Removed {}",
            style("✓").green(),
            style(&args.part_id).cyan()
        );
    } else {
        // Removal of an unknown id is a no-op, not an error.
        println!(
            "{} {} was not installed",
            style("!").yellow(),
            style(&args.part_id).cyan()
        );
    }

    if !global.quiet {
        let stats = ctx.session.stats();
        println!(
            "Cost ${}  Power {}W  Workstation {}  Gaming {}  Efficiency {}",
            stats.total_cost,
            stats.total_wattage,
            stats.workstation_score,
            stats.gaming_score,
            stats.power_efficiency,
        );
    }

    Ok(())
}
