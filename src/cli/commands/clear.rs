//! `rig clear` command - Clear pending notices

use console::style;
use miette::Result;

use crate::cli::commands::SessionContext;
use crate::cli::GlobalOpts;

#[derive(clap::Args, Debug)]
pub struct ClearArgs {}

pub fn run(_args: ClearArgs, global: &GlobalOpts) -> Result<()> {
    let mut ctx = SessionContext::open(global)?;

    let count = ctx.session.notices().len();
    ctx.session.clear_notices();
    ctx.save()?;

    if count > 0 {
        println!(
            "{} Cleared {} notice{}",
            style("✓").green(),
            count,
            if count == 1 { "" } else { "s" }
        );
    } else {
        println!("No pending notices.");
    }
    Ok(())
}
