//! `rig nodes` command - List the mount nodes currently open

use miette::Result;

use crate::cli::commands::SessionContext;
use crate::cli::{GlobalOpts, OutputFormat};

#[derive(clap::Args, Debug)]
pub struct NodesArgs {}

pub fn run(_args: NodesArgs, global: &GlobalOpts) -> Result<()> {
    let ctx = SessionContext::open(global)?;
    let nodes = ctx.session.open_nodes();

    match global.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&nodes).unwrap_or_default());
        }
        OutputFormat::Id => {
            for node in &nodes {
                println!("{}", node.id);
            }
        }
        _ => {
            if nodes.is_empty() {
                println!("No open mount nodes. The build is fully populated.");
                return Ok(());
            }
            println!("NODE\tSLOT\tLABEL");
            for node in &nodes {
                let label = match &node.socket {
                    Some(socket) => format!("{} ({})", node.label, socket),
                    None => node.label.clone(),
                };
                println!("{}\t{}\t{}", node.id, node.slot, label);
            }
        }
    }

    Ok(())
}
