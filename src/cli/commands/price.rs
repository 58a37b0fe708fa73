//! `cbk price` command - denormalized price cache operations

use clap::Subcommand;
use console::style;
use miette::Result;

use crate::cli::helpers::{discover_project, emit_serialized, open_ledger, parse_id};
use crate::cli::GlobalOpts;
use crate::core::auth::{ActionGate, OpenGate};
use crate::core::config::Config;

#[derive(Subcommand, Debug)]
pub enum PriceCommands {
    /// Re-derive a material's current price from its quote timeline
    Sync(SyncArgs),

    /// List price-change log entries for a material, newest first
    Changes(ChangesArgs),
}

#[derive(clap::Args, Debug)]
pub struct SyncArgs {
    /// Material ID (MAT-...)
    pub material: String,
}

#[derive(clap::Args, Debug)]
pub struct ChangesArgs {
    /// Material ID (MAT-...)
    pub material: String,
}

pub fn run(cmd: PriceCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        PriceCommands::Sync(args) => run_sync(args, global),
        PriceCommands::Changes(args) => run_changes(args, global),
    }
}

fn run_sync(args: SyncArgs, _global: &GlobalOpts) -> Result<()> {
    let project = discover_project()?;
    let (_store, ledger) = open_ledger(&project);
    let actor = Config::load(&project).author();

    if !OpenGate.can_edit_material_cost(&actor) {
        return Err(miette::miette!(
            "{} is not permitted to edit material costs",
            actor
        ));
    }

    let material = parse_id(&args.material)?;
    let outcome = ledger
        .sync_latest_price(&material, &actor)
        .map_err(|e| miette::miette!("{}", e))?;

    if outcome.changed {
        println!(
            "Synced {}: {} recipe(s) repriced",
            style(&material.to_string()).cyan(),
            outcome.updated_recipes.len()
        );
        for recipe in &outcome.updated_recipes {
            println!("  {}", style(&recipe.to_string()).yellow());
        }
    } else {
        println!("{} already in sync", style(&material.to_string()).cyan());
    }
    Ok(())
}

fn run_changes(args: ChangesArgs, global: &GlobalOpts) -> Result<()> {
    let project = discover_project()?;
    let (_store, ledger) = open_ledger(&project);

    let material = parse_id(&args.material)?;
    let changes = ledger
        .price_changes(&material)
        .map_err(|e| miette::miette!("{}", e))?;
    let ids: Vec<_> = changes.iter().map(|c| c.id.clone()).collect();

    if emit_serialized(&changes, &ids, global)? {
        return Ok(());
    }

    if changes.is_empty() {
        println!("No price changes found.");
        return Ok(());
    }
    for c in &changes {
        println!(
            "{}  {}  {:.2} -> {:.2}  {}",
            style(&c.id.to_string()).cyan(),
            c.vendor_name,
            c.old_price,
            c.new_price,
            style(c.changed_at.format("%Y-%m-%d %H:%M")).dim()
        );
    }
    println!("{} change(s) found", changes.len());
    Ok(())
}
