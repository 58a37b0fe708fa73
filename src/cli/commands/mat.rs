//! `cbk mat` command - material records
//!
//! Master-data CRUD proper lives outside this tool; this surface is the
//! minimal collaborator interface the pricing ledger and engine consume.

use clap::Subcommand;
use console::style;
use miette::Result;

use crate::cli::helpers::{discover_project, emit_serialized, parse_id};
use crate::cli::GlobalOpts;
use crate::core::config::Config;
use crate::entities::Material;
use crate::store::Store;

#[derive(Subcommand, Debug)]
pub enum MatCommands {
    /// Create a new material
    New(NewArgs),

    /// List materials
    List,

    /// Show a material's details
    Show(ShowArgs),
}

#[derive(clap::Args, Debug)]
pub struct NewArgs {
    /// Material name
    #[arg(long, short = 'n')]
    pub name: String,

    /// Unit of measure reference (e.g. kg)
    #[arg(long, short = 'u')]
    pub unit: Option<String>,

    /// Category reference
    #[arg(long)]
    pub category: Option<String>,

    /// Subcategory reference
    #[arg(long)]
    pub subcategory: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Material ID (MAT-...)
    pub id: String,
}

pub fn run(cmd: MatCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        MatCommands::New(args) => run_new(args, global),
        MatCommands::List => run_list(global),
        MatCommands::Show(args) => run_show(args, global),
    }
}

fn run_new(args: NewArgs, global: &GlobalOpts) -> Result<()> {
    let project = discover_project()?;
    let store = Store::open(&project);
    let config = Config::load(&project);

    let mut material = Material::new(&args.name, config.author());
    material.unit = args.unit;
    material.category = args.category;
    material.subcategory = args.subcategory;

    store
        .insert_material(&material)
        .map_err(|e| miette::miette!("{}", e))?;

    if emit_serialized(&material, &[material.id.clone()], global)? {
        return Ok(());
    }
    println!(
        "Created material {} ({})",
        style(&material.id.to_string()).cyan(),
        style(&material.name).yellow()
    );
    Ok(())
}

fn run_list(global: &GlobalOpts) -> Result<()> {
    let project = discover_project()?;
    let store = Store::open(&project);

    let materials = store.list_materials().map_err(|e| miette::miette!("{}", e))?;
    let ids: Vec<_> = materials.iter().map(|m| m.id.clone()).collect();

    if emit_serialized(&materials, &ids, global)? {
        return Ok(());
    }

    if materials.is_empty() {
        println!("No materials found.");
        return Ok(());
    }

    for mat in &materials {
        let price = mat
            .current_price
            .map(|p| format!("{:.2}", p))
            .unwrap_or_else(|| "-".to_string());
        let vendor = mat.current_vendor_name.as_deref().unwrap_or("-");
        println!(
            "{}  {}  {} {}",
            style(&mat.id.to_string()).cyan(),
            mat.name,
            style(price).yellow(),
            style(vendor).dim()
        );
    }
    println!("{} material(s) found", materials.len());
    Ok(())
}

fn run_show(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let project = discover_project()?;
    let store = Store::open(&project);

    let id = parse_id(&args.id)?;
    let mat = store.material(&id).map_err(|e| miette::miette!("{}", e))?;

    if emit_serialized(&mat, &[mat.id.clone()], global)? {
        return Ok(());
    }

    println!("{}: {}", style("ID").bold(), style(&mat.id.to_string()).cyan());
    println!("{}: {}", style("Name").bold(), style(&mat.name).yellow());
    if let Some(ref unit) = mat.unit {
        println!("{}: {}", style("Unit").bold(), unit);
    }
    match mat.current_price {
        Some(price) => {
            println!("{}: {:.2}", style("Current price").bold(), price);
            if let Some(ref vendor) = mat.current_vendor_name {
                println!("{}: {}", style("Current vendor").bold(), vendor);
            }
            if let Some(date) = mat.current_price_date {
                println!(
                    "{}: {}",
                    style("Price date").bold(),
                    date.format("%Y-%m-%d %H:%M")
                );
            }
        }
        None => println!("{}: none recorded", style("Current price").bold()),
    }
    println!(
        "{}: {} | {}: {}",
        style("Author").dim(),
        mat.author,
        style("Revision").dim(),
        mat.entity_revision
    );
    Ok(())
}
