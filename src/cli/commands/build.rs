//! `rig build` command - Saved build management

use clap::Subcommand;
use console::style;
use miette::Result;

use crate::cli::commands::SessionContext;
use crate::cli::helpers::{escape_csv, truncate_str};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::config::Config;
use crate::core::identity::BuildId;
use crate::core::store::{BuildStore, FsBuildStore};
use crate::model::notice::{Notice, NoticeKind, Severity};

#[derive(Subcommand, Debug)]
pub enum BuildCommands {
    /// Save the current build under a name
    Save(SaveArgs),

    /// List saved builds
    List(ListArgs),

    /// Show a saved build document
    Show(ShowArgs),

    /// Load a saved build into the current session
    Load(LoadArgs),
}

#[derive(clap::Args, Debug)]
pub struct SaveArgs {
    /// Name for the saved build (e.g. "Plex Server")
    pub name: String,
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Limit number of results
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,

    /// Show only count
    #[arg(long)]
    pub count: bool,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Build ID (BLD-...)
    pub id: BuildId,
}

#[derive(clap::Args, Debug)]
pub struct LoadArgs {
    /// Build ID (BLD-...)
    pub id: BuildId,
}

pub fn run(cmd: BuildCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        BuildCommands::Save(args) => run_save(args, global),
        BuildCommands::List(args) => run_list(args, global),
        BuildCommands::Show(args) => run_show(args, global),
        BuildCommands::Load(args) => run_load(args, global),
    }
}

fn run_save(args: SaveArgs, global: &GlobalOpts) -> Result<()> {
    let mut ctx = SessionContext::open(global)?;
    let store = FsBuildStore::new(ctx.workspace.builds_dir());
    let author = Config::load().author();

    let id = match store.save_build(&args.name, &author, ctx.session.parts(), ctx.session.stats())
    {
        Ok(id) => id,
        Err(e) => {
            // Record the failure on the session so `rig status` shows it.
            ctx.session.push_notice(Notice::new(
                NoticeKind::SaveFailed,
                Severity::Error,
                e.to_string(),
            ));
            ctx.save()?;
            return Err(miette::miette!("{}", e));
        }
    };

    println!(
        "{} Saved build {} as {}",
        style("✓").green(),
        style(&args.name).bold(),
        style(&id).cyan()
    );
    Ok(())
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let ctx = SessionContext::open(global)?;
    let store = FsBuildStore::new(ctx.workspace.builds_dir());

    let mut builds = store.list_builds().map_err(|e| miette::miette!("{}", e))?;
    if let Some(limit) = args.limit {
        builds.truncate(limit);
    }

    if args.count {
        println!("{}", builds.len());
        return Ok(());
    }

    if builds.is_empty() {
        println!("No saved builds.");
        return Ok(());
    }

    match global.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&builds).unwrap_or_default());
        }
        OutputFormat::Id => {
            for build in &builds {
                println!("{}", build.id);
            }
        }
        OutputFormat::Csv => {
            println!("id,name,created,parts,cost,wattage");
            for build in &builds {
                println!(
                    "{},{},{},{},{},{}",
                    build.id,
                    escape_csv(&build.name),
                    build.created_at.to_rfc3339(),
                    build.parts.len(),
                    build.total_cost,
                    build.total_wattage,
                );
            }
        }
        OutputFormat::Auto | OutputFormat::Tsv => {
            println!("ID\tNAME\tCREATED\tPARTS\tCOST\tPOWER");
            for build in &builds {
                println!(
                    "{}\t{}\t{}\t{}\t${}\t{}W",
                    build.id,
                    truncate_str(&build.name, 24),
                    build.created_at.format("%Y-%m-%d %H:%M"),
                    build.parts.len(),
                    build.total_cost,
                    build.total_wattage,
                );
            }
        }
    }

    Ok(())
}

fn run_show(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let ctx = SessionContext::open(global)?;
    let store = FsBuildStore::new(ctx.workspace.builds_dir());

    let (build, parts) = store
        .load_build(&args.id, &ctx.catalog)
        .map_err(|e| miette::miette!("{}", e))?;

    if global.format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&build).unwrap_or_default());
        return Ok(());
    }

    println!("{}  {}", style(&build.id).cyan().bold(), style(&build.name).bold());
    println!("Author:   {}", build.author);
    println!("Created:  {}", build.created_at.format("%Y-%m-%d %H:%M"));
    println!("Cost:     ${}", build.total_cost);
    println!("Power:    {}W", build.total_wattage);
    println!("Parts:");
    for placement in &build.parts {
        let name = parts
            .iter()
            .find(|p| p.id() == placement.part_id)
            .map(|p| p.part.name.as_str())
            .unwrap_or("(no longer in catalog)");
        println!(
            "  {}\t{}\t{}",
            placement.part_id,
            placement.node_id.as_deref().unwrap_or("-"),
            name,
        );
    }

    Ok(())
}

fn run_load(args: LoadArgs, global: &GlobalOpts) -> Result<()> {
    let mut ctx = SessionContext::open(global)?;
    let store = FsBuildStore::new(ctx.workspace.builds_dir());

    let (build, parts) = store
        .load_build(&args.id, &ctx.catalog)
        .map_err(|e| miette::miette!("{}", e))?;

    let dropped = build.parts.len() - parts.len();
    let loaded = parts.len();
    ctx.session.replace_parts(parts);
    ctx.save()?;

    println!(
        "{} Loaded {} ({} part{})",
        style("✓").green(),
        style(&build.name).bold(),
        loaded,
        if loaded == 1 { "" } else { "s" }
    );
    if dropped > 0 {
        println!(
            "{} {} part{} no longer in the catalog, skipped",
            style("!").yellow(),
            dropped,
            if dropped == 1 { "" } else { "s" }
        );
    }

    Ok(())
}
