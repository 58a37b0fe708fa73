//! `cbk history` command - recipe audit trail

use clap::Subcommand;
use console::style;
use miette::Result;

use crate::cli::helpers::{discover_project, emit_serialized, parse_id};
use crate::cli::GlobalOpts;
use crate::store::Store;

#[derive(Subcommand, Debug)]
pub enum HistoryCommands {
    /// List line-item change log entries for a recipe
    Changes(RecipeArg),

    /// List history snapshots for a recipe
    Snapshots(RecipeArg),
}

#[derive(clap::Args, Debug)]
pub struct RecipeArg {
    /// Recipe ID (RCP-...)
    pub recipe: String,
}

pub fn run(cmd: HistoryCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        HistoryCommands::Changes(args) => run_changes(args, global),
        HistoryCommands::Snapshots(args) => run_snapshots(args, global),
    }
}

fn run_changes(args: RecipeArg, global: &GlobalOpts) -> Result<()> {
    let project = discover_project()?;
    let store = Store::open(&project);

    let recipe = parse_id(&args.recipe)?;
    let changes = store
        .changes_for_recipe(&recipe)
        .map_err(|e| miette::miette!("{}", e))?;
    let ids: Vec<_> = changes.iter().map(|c| c.id.clone()).collect();

    if emit_serialized(&changes, &ids, global)? {
        return Ok(());
    }

    if changes.is_empty() {
        println!("No changes found.");
        return Ok(());
    }
    for c in &changes {
        println!(
            "{}  {}  {}: {:.2} -> {:.2}  {}",
            style(&c.id.to_string()).cyan(),
            style(&c.recipe_code).yellow(),
            c.field_changed,
            c.old_value,
            c.new_value,
            style(c.changed_at.format("%Y-%m-%d %H:%M")).dim()
        );
    }
    println!("{} change(s) found", changes.len());
    Ok(())
}

fn run_snapshots(args: RecipeArg, global: &GlobalOpts) -> Result<()> {
    let project = discover_project()?;
    let store = Store::open(&project);

    let recipe = parse_id(&args.recipe)?;
    let snapshots = store
        .snapshots_for_recipe(&recipe)
        .map_err(|e| miette::miette!("{}", e))?;
    let ids: Vec<_> = snapshots.iter().map(|s| s.id.clone()).collect();

    if emit_serialized(&snapshots, &ids, global)? {
        return Ok(());
    }

    if snapshots.is_empty() {
        println!("No snapshots found.");
        return Ok(());
    }
    for s in &snapshots {
        println!(
            "{}  {}  cost {:.2}  per-unit {:.2}  {} item(s)  {}  {}",
            style(&s.id.to_string()).cyan(),
            style(&s.recipe_code).yellow(),
            s.total_raw_material_cost,
            s.price_per_unit,
            s.items.len(),
            s.reason,
            style(s.snapshot_at.format("%Y-%m-%d %H:%M")).dim()
        );
    }
    println!("{} snapshot(s) found", snapshots.len());
    Ok(())
}
