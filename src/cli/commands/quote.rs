//! `cbk quote` command - the vendor quote ledger

use clap::Subcommand;
use console::style;
use miette::Result;

use crate::cli::helpers::{discover_project, emit_serialized, open_ledger, parse_id};
use crate::cli::GlobalOpts;
use crate::core::auth::{ActionGate, OpenGate};
use crate::core::config::Config;
use crate::ledger::QuoteRequest;

#[derive(Subcommand, Debug)]
pub enum QuoteCommands {
    /// Record a new vendor quote (may trigger cost propagation)
    Record(RecordArgs),

    /// List quotes for a material, newest first
    List(ListArgs),
}

#[derive(clap::Args, Debug)]
pub struct RecordArgs {
    /// Material ID (MAT-...)
    #[arg(long, short = 'm')]
    pub material: String,

    /// Vendor ID (VEN-...)
    #[arg(long, short = 'v')]
    pub vendor: String,

    /// Quoted quantity
    #[arg(long, short = 'q')]
    pub quantity: f64,

    /// Unit of measure
    #[arg(long, short = 'u')]
    pub unit: String,

    /// Quoted unit price
    #[arg(long, short = 'p')]
    pub price: f64,

    /// Brand reference
    #[arg(long)]
    pub brand: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Material ID (MAT-...)
    pub material: String,
}

pub fn run(cmd: QuoteCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        QuoteCommands::Record(args) => run_record(args, global),
        QuoteCommands::List(args) => run_list(args, global),
    }
}

fn run_record(args: RecordArgs, global: &GlobalOpts) -> Result<()> {
    let project = discover_project()?;
    let (_store, ledger) = open_ledger(&project);
    let actor = Config::load(&project).author();

    // Permission evaluation is owned by an external collaborator; the
    // ledger itself never checks it
    if !OpenGate.can_edit_material_cost(&actor) {
        return Err(miette::miette!(
            "{} is not permitted to edit material costs",
            actor
        ));
    }

    let quote = ledger
        .record_quote(QuoteRequest {
            material: parse_id(&args.material)?,
            vendor: parse_id(&args.vendor)?,
            quantity: args.quantity,
            unit: args.unit,
            price: args.price,
            brand: args.brand,
            recorded_by: actor,
            effective_date: None,
        })
        .map_err(|e| miette::miette!("{}", e))?;

    if emit_serialized(&quote, &[quote.id.clone()], global)? {
        return Ok(());
    }
    println!(
        "Recorded quote {} ({} @ {:.2} per {})",
        style(&quote.id.to_string()).cyan(),
        style(&quote.vendor_name).yellow(),
        quote.price,
        quote.unit
    );
    Ok(())
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let project = discover_project()?;
    let (_store, ledger) = open_ledger(&project);

    let material = parse_id(&args.material)?;
    let quotes = ledger
        .list_quotes(&material)
        .map_err(|e| miette::miette!("{}", e))?;
    let ids: Vec<_> = quotes.iter().map(|q| q.id.clone()).collect();

    if emit_serialized(&quotes, &ids, global)? {
        return Ok(());
    }

    if quotes.is_empty() {
        println!("No quotes found.");
        return Ok(());
    }
    for q in &quotes {
        println!(
            "{}  {}  {:.2} per {}  {}",
            style(&q.id.to_string()).cyan(),
            q.vendor_name,
            q.price,
            q.unit,
            style(q.effective_date.format("%Y-%m-%d")).dim()
        );
    }
    println!("{} quote(s) found", quotes.len());
    Ok(())
}
