//! `rig install` command - Install a part into the current build

use console::style;
use miette::Result;

use crate::cli::commands::SessionContext;
use crate::cli::helpers::styled_notice;
use crate::cli::GlobalOpts;
use crate::core::session::InstallResult;

#[derive(clap::Args, Debug)]
pub struct InstallArgs {
    /// Part ID from the catalog (e.g. "cpu_001")
    pub part_id: String,

    /// Target mount node (default: the selected node, then the first
    /// open node for the part's type)
    #[arg(long)]
    pub node: Option<String>,
}

pub fn run(args: InstallArgs, global: &GlobalOpts) -> Result<()> {
    let mut ctx = SessionContext::open(global)?;

    let part = ctx
        .catalog
        .get(&args.part_id)
        .ok_or_else(|| miette::miette!("part not found in catalog: {}", args.part_id))?
        .clone();

    // An explicit --node must name a currently open mount node.
    let explicit_node = match &args.node {
        Some(node_id) => {
            let node = ctx
                .session
                .open_nodes()
                .into_iter()
                .find(|n| &n.id == node_id)
                .ok_or_else(|| miette::miette!("no open mount node named '{}'", node_id))?;
            Some(node)
        }
        None => None,
    };

    let result = ctx.session.install(&part, explicit_node);
    ctx.save()?;

    match result {
        InstallResult::Installed { advisories } => {
            let node_label = ctx
                .session
                .parts()
                .last()
                .and_then(|p| p.node_id.clone())
                .unwrap_or_else(|| "(free mount)".to_string());
            println!(
                "{} Installed {} into {}",
                style("✓").green(),
                style(&part.name).bold(),
                style(node_label).cyan()
            );
            for advisory in &advisories {
                println!("{}", styled_notice(advisory));
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
        InstallResult::Rejected(notice) => {
            eprintln!("{}", styled_notice(&notice));
            Err(miette::miette!("installation rejected: {}", notice.kind))
        }
    }
}
