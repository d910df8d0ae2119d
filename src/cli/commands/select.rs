//! `rig select` command - Select a mount node for the next install

use console::style;
use miette::Result;

use crate::cli::commands::SessionContext;
use crate::cli::GlobalOpts;

#[derive(clap::Args, Debug)]
pub struct SelectArgs {
    /// Mount node to select (see `rig nodes`)
    #[arg(required_unless_present = "clear")]
    pub node_id: Option<String>,

    /// Clear the current selection instead
    #[arg(long, conflicts_with = "node_id")]
    pub clear: bool,
}

pub fn run(args: SelectArgs, global: &GlobalOpts) -> Result<()> {
    let mut ctx = SessionContext::open(global)?;

    if args.clear {
        ctx.session.select_node(None);
        ctx.save()?;
        println!("{} Selection cleared", style("✓").green());
        return Ok(());
    }

    let node_id = args
        .node_id
        .ok_or_else(|| miette::miette!("a node id is required unless --clear is given"))?;
    let node = ctx
        .session
        .open_nodes()
        .into_iter()
        .find(|n| n.id == node_id)
        .ok_or_else(|| miette::miette!("no open mount node named '{}'", node_id))?;

    ctx.session.select_node(Some(node.id.clone()));
    ctx.save()?;

    println!(
        "{} Selected {} ({})",
        style("✓").green(),
        style(&node.id).cyan(),
        node.slot
    );
    Ok(())
}
