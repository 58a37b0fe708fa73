//! `cbk ven` command - vendor records

use clap::Subcommand;
use console::style;
use miette::Result;

use crate::cli::helpers::{discover_project, emit_serialized};
use crate::cli::GlobalOpts;
use crate::core::config::Config;
use crate::entities::Vendor;
use crate::store::Store;

#[derive(Subcommand, Debug)]
pub enum VenCommands {
    /// Create a new vendor
    New(NewArgs),

    /// List vendors
    List,
}

#[derive(clap::Args, Debug)]
pub struct NewArgs {
    /// Vendor name
    #[arg(long, short = 'n')]
    pub name: String,

    /// Contact email
    #[arg(long)]
    pub email: Option<String>,

    /// Contact phone
    #[arg(long)]
    pub phone: Option<String>,
}

pub fn run(cmd: VenCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        VenCommands::New(args) => run_new(args, global),
        VenCommands::List => run_list(global),
    }
}

fn run_new(args: NewArgs, global: &GlobalOpts) -> Result<()> {
    let project = discover_project()?;
    let store = Store::open(&project);
    let config = Config::load(&project);

    let mut vendor = Vendor::new(&args.name, config.author());
    vendor.email = args.email;
    vendor.phone = args.phone;

    store
        .insert_vendor(&vendor)
        .map_err(|e| miette::miette!("{}", e))?;

    if emit_serialized(&vendor, &[vendor.id.clone()], global)? {
        return Ok(());
    }
    println!(
        "Created vendor {} ({})",
        style(&vendor.id.to_string()).cyan(),
        style(&vendor.name).yellow()
    );
    Ok(())
}

fn run_list(global: &GlobalOpts) -> Result<()> {
    let project = discover_project()?;
    let store = Store::open(&project);

    let vendors = store.list_vendors().map_err(|e| miette::miette!("{}", e))?;
    let ids: Vec<_> = vendors.iter().map(|v| v.id.clone()).collect();

    if emit_serialized(&vendors, &ids, global)? {
        return Ok(());
    }

    if vendors.is_empty() {
        println!("No vendors found.");
        return Ok(());
    }
    for ven in &vendors {
        println!(
            "{}  {}  {}",
            style(&ven.id.to_string()).cyan(),
            ven.name,
            style(ven.email.as_deref().unwrap_or("-")).dim()
        );
    }
    println!("{} vendor(s) found", vendors.len());
    Ok(())
}
