//! `rig status` command - Current build dashboard

use console::style;
use miette::Result;

use crate::cli::commands::SessionContext;
use crate::cli::helpers::{styled_notice, truncate_str};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::model::stats::SystemStats;

#[derive(clap::Args, Debug)]
pub struct StatusArgs {}

pub fn run(_args: StatusArgs, global: &GlobalOpts) -> Result<()> {
    let ctx = SessionContext::open(global)?;
    let session = &ctx.session;

    if global.format == OutputFormat::Json {
        let status = serde_json::json!({
            "parts": session.parts().iter().map(|p| p.placement()).collect::<Vec<_>>(),
            "stats": session.stats(),
            "notices": session.notices(),
            "open_nodes": session.open_nodes(),
            "selected_node": session.selected_node(),
        });
        println!("{}", serde_json::to_string_pretty(&status).unwrap_or_default());
        return Ok(());
    }

    println!("{}", style("Current Build").bold().underlined());
    println!();

    if session.parts().is_empty() {
        println!("No parts installed. Start with {}.", style("rig install mobo_001").yellow());
    } else {
        println!("PART\tTYPE\tNODE\tNAME");
        for part in session.parts() {
            println!(
                "{}\t{}\t{}\t{}",
                part.id(),
                part.install_type(),
                part.node_id.as_deref().unwrap_or("-"),
                truncate_str(&part.part.name, 32),
            );
        }
    }

    println!();
    print_stats(session.stats());

    if let Some(selected) = session.selected_node() {
        println!();
        println!("Selected node: {}", style(selected).cyan());
    }

    if !session.notices().is_empty() {
        println!();
        println!("{}", style("Notices").bold());
        for notice in session.notices() {
            println!("  {}", styled_notice(notice));
        }
    }

    Ok(())
}

fn print_stats(stats: &SystemStats) {
    println!("Cost:         ${}", style(stats.total_cost).green());
    println!("Power:        {}W", style(stats.total_wattage).blue());
    println!("Workstation:  {}", stats.workstation_score);
    println!("Gaming:       {}", stats.gaming_score);

    let efficiency = match stats.power_efficiency {
        0..=39 => style(stats.power_efficiency).red(),
        40..=79 => style(stats.power_efficiency).yellow(),
        _ => style(stats.power_efficiency).green(),
    };
    println!("Efficiency:   {}/100", efficiency);
}
