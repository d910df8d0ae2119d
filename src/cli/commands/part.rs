//! `rig part` command - Part catalog queries

use clap::{Subcommand, ValueEnum};
use console::style;
use miette::Result;

use crate::cli::commands::open_workspace;
use crate::cli::helpers::{escape_csv, format_price, truncate_str};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::catalog::Catalog;
use crate::model::part::{Part, SpecValue};

#[derive(Subcommand, Debug)]
pub enum PartCommands {
    /// List catalog parts with filtering
    List(ListArgs),

    /// Show a part's details
    Show(ShowArgs),
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Filter by display category (e.g. "Processors")
    #[arg(long, short = 'c')]
    pub category: Option<String>,

    /// Filter by install type (case, motherboard, cpu, gpu, ram, psu)
    #[arg(long, short = 't')]
    pub part_type: Option<String>,

    /// Search in part id, name, and description
    #[arg(long)]
    pub search: Option<String>,

    /// Sort by field
    #[arg(long, default_value = "id")]
    pub sort: SortField,

    /// Reverse sort order
    #[arg(long, short = 'r')]
    pub reverse: bool,

    /// Limit number of results
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,

    /// Show only count
    #[arg(long)]
    pub count: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum SortField {
    Id,
    Name,
    Category,
    Price,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Part ID (e.g. "cpu_001")
    pub id: String,
}

pub fn run(cmd: PartCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        PartCommands::List(args) => run_list(args, global),
        PartCommands::Show(args) => run_show(args, global),
    }
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let workspace = open_workspace(global)?;
    let catalog = Catalog::load(&workspace.catalog_dir())?;

    let mut parts: Vec<&Part> = catalog
        .parts()
        .iter()
        .filter(|p| {
            args.category
                .as_deref()
                .map_or(true, |c| p.category.eq_ignore_ascii_case(c))
        })
        .filter(|p| {
            args.part_type
                .as_deref()
                .map_or(true, |t| p.install_type.to_string().eq_ignore_ascii_case(t))
        })
        .filter(|p| {
            args.search.as_deref().map_or(true, |needle| {
                let needle = needle.to_lowercase();
                p.id.to_lowercase().contains(&needle)
                    || p.name.to_lowercase().contains(&needle)
                    || p.description
                        .as_deref()
                        .map_or(false, |d| d.to_lowercase().contains(&needle))
            })
        })
        .collect();

    match args.sort {
        SortField::Id => parts.sort_by(|a, b| a.id.cmp(&b.id)),
        SortField::Name => parts.sort_by(|a, b| a.name.cmp(&b.name)),
        SortField::Category => parts.sort_by(|a, b| a.category.cmp(&b.category)),
        SortField::Price => parts.sort_by(|a, b| a.price_estimate.total_cmp(&b.price_estimate)),
    }
    if args.reverse {
        parts.reverse();
    }
    if let Some(limit) = args.limit {
        parts.truncate(limit);
    }

    if args.count {
        println!("{}", parts.len());
        return Ok(());
    }

    if parts.is_empty() {
        println!("No parts found.");
        return Ok(());
    }

    match global.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&parts).unwrap_or_default());
        }
        OutputFormat::Id => {
            for part in parts {
                println!("{}", part.id);
            }
        }
        OutputFormat::Csv => {
            println!("id,name,type,category,price");
            for part in parts {
                println!(
                    "{},{},{},{},{}",
                    escape_csv(&part.id),
                    escape_csv(&part.name),
                    part.install_type,
                    escape_csv(&part.category),
                    part.price_estimate.round() as i64,
                );
            }
        }
        OutputFormat::Auto | OutputFormat::Tsv => {
            println!("ID\tNAME\tTYPE\tCATEGORY\tPRICE");
            for part in parts {
                println!(
                    "{}\t{}\t{}\t{}\t{}",
                    part.id,
                    truncate_str(&part.name, 28),
                    part.install_type,
                    part.category,
                    format_price(part.price_estimate),
                );
            }
        }
    }

    Ok(())
}

fn run_show(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let workspace = open_workspace(global)?;
    let catalog = Catalog::load(&workspace.catalog_dir())?;

    let part = catalog
        .get(&args.id)
        .ok_or_else(|| miette::miette!("part not found in catalog: {}", args.id))?;

    if global.format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(part).unwrap_or_default());
        return Ok(());
    }

    println!("{}  {}", style(&part.id).cyan().bold(), style(&part.name).bold());
    println!("Type:      {}", part.install_type);
    println!("Category:  {}", part.category);
    println!("Price:     {}", format_price(part.price_estimate));
    if let Some(description) = &part.description {
        println!("About:     {}", description);
    }
    if !part.specs.0.is_empty() {
        println!("Specs:");
        for (key, value) in &part.specs.0 {
            match value {
                SpecValue::Number(n) => println!("  {}: {}", key, n),
                SpecValue::Text(t) => println!("  {}: {}", key, t),
            }
        }
    }
    if !part.mount_nodes.is_empty() {
        println!("Mount nodes:");
        for node in &part.mount_nodes {
            println!("  {} ({})", node.id, node.slot);
        }
    }

    Ok(())
}
