//! `cbk rcp` command - recipes and line items

use clap::Subcommand;
use console::style;
use miette::Result;

use crate::cli::helpers::{discover_project, emit_serialized, parse_id};
use crate::cli::GlobalOpts;
use crate::core::config::Config;
use crate::entities::{Recipe, RecipeLineItem};
use crate::store::Store;

#[derive(Subcommand, Debug)]
pub enum RcpCommands {
    /// Create a new recipe
    New(NewArgs),

    /// Add a material line item to a recipe
    AddItem(AddItemArgs),

    /// List recipes
    List,

    /// Show a recipe with its line items and aggregates
    Show(ShowArgs),
}

#[derive(clap::Args, Debug)]
pub struct NewArgs {
    /// Recipe code (e.g. BRD-01)
    #[arg(long, short = 'c')]
    pub code: String,

    /// Recipe name
    #[arg(long, short = 'n')]
    pub name: String,

    /// Units produced per batch
    #[arg(long, short = 'b')]
    pub batch_size: f64,
}

#[derive(clap::Args, Debug)]
pub struct AddItemArgs {
    /// Recipe ID (RCP-...)
    pub recipe: String,

    /// Material ID (MAT-...)
    #[arg(long, short = 'm')]
    pub material: String,

    /// Quantity of material consumed
    #[arg(long, short = 'q')]
    pub quantity: f64,

    /// Usable output mass in kg
    #[arg(long, short = 'y')]
    pub yield_amount: Option<f64>,

    /// Unit price; defaults to the material's current price
    #[arg(long, short = 'p')]
    pub price: Option<f64>,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Recipe ID (RCP-...)
    pub id: String,
}

pub fn run(cmd: RcpCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        RcpCommands::New(args) => run_new(args, global),
        RcpCommands::AddItem(args) => run_add_item(args, global),
        RcpCommands::List => run_list(global),
        RcpCommands::Show(args) => run_show(args, global),
    }
}

fn run_new(args: NewArgs, global: &GlobalOpts) -> Result<()> {
    let project = discover_project()?;
    let store = Store::open(&project);
    let config = Config::load(&project);

    let recipe = Recipe::new(&args.code, &args.name, args.batch_size, config.author());
    store
        .insert_recipe(&recipe)
        .map_err(|e| miette::miette!("{}", e))?;

    if emit_serialized(&recipe, &[recipe.id.clone()], global)? {
        return Ok(());
    }
    println!(
        "Created recipe {} ({} {})",
        style(&recipe.id.to_string()).cyan(),
        style(&recipe.code).yellow(),
        recipe.name
    );
    Ok(())
}

fn run_add_item(args: AddItemArgs, global: &GlobalOpts) -> Result<()> {
    let project = discover_project()?;
    let store = Store::open(&project);

    let recipe_id = parse_id(&args.recipe)?;
    let material_id = parse_id(&args.material)?;

    let mut recipe = store
        .recipe(&recipe_id)
        .map_err(|e| miette::miette!("{}", e))?;
    let material = store
        .material(&material_id)
        .map_err(|e| miette::miette!("{}", e))?;

    let price = args
        .price
        .or(material.current_price)
        .ok_or_else(|| {
            miette::miette!(
                "No price given and material {} has no recorded quote yet",
                material.id
            )
        })?;

    let mut item = RecipeLineItem::new(recipe_id.clone(), material_id, args.quantity, price);
    item.yield_amount = args.yield_amount;
    item.recalculate();
    store.insert_item(&item).map_err(|e| miette::miette!("{}", e))?;

    // Keep the aggregates consistent with the new item set
    let items = store
        .items_for_recipe(&recipe_id)
        .map_err(|e| miette::miette!("{}", e))?;
    recipe.recalculate_aggregates(&items);
    store
        .save_recipe(&mut recipe)
        .map_err(|e| miette::miette!("{}", e))?;

    if emit_serialized(&item, &[item.id.clone()], global)? {
        return Ok(());
    }
    println!(
        "Added item {} to {} (total {:.2})",
        style(&item.id.to_string()).cyan(),
        style(&recipe.code).yellow(),
        item.total_price
    );
    Ok(())
}

fn run_list(global: &GlobalOpts) -> Result<()> {
    let project = discover_project()?;
    let store = Store::open(&project);

    let recipes = store.list_recipes().map_err(|e| miette::miette!("{}", e))?;
    let ids: Vec<_> = recipes.iter().map(|r| r.id.clone()).collect();

    if emit_serialized(&recipes, &ids, global)? {
        return Ok(());
    }

    if recipes.is_empty() {
        println!("No recipes found.");
        return Ok(());
    }
    for rcp in &recipes {
        println!(
            "{}  {}  {}  cost {:.2}  per-unit {:.2}",
            style(&rcp.id.to_string()).cyan(),
            style(&rcp.code).yellow(),
            rcp.name,
            rcp.total_raw_material_cost,
            rcp.price_per_unit
        );
    }
    println!("{} recipe(s) found", recipes.len());
    Ok(())
}

fn run_show(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let project = discover_project()?;
    let store = Store::open(&project);

    let id = parse_id(&args.id)?;
    let recipe = store.recipe(&id).map_err(|e| miette::miette!("{}", e))?;
    let items = store
        .items_for_recipe(&id)
        .map_err(|e| miette::miette!("{}", e))?;

    if emit_serialized(&(&recipe, &items), &[recipe.id.clone()], global)? {
        return Ok(());
    }

    println!(
        "{}: {} ({})",
        style("Recipe").bold(),
        style(&recipe.code).yellow(),
        recipe.name
    );
    println!("{}: {}", style("ID").bold(), style(&recipe.id.to_string()).cyan());
    println!("{}: {}", style("Batch size").bold(), recipe.batch_size);
    println!();
    for item in &items {
        let per_kg = item
            .price_per_kg
            .map(|p| format!("  {:.2}/kg", p))
            .unwrap_or_default();
        println!(
            "  {}  {} x {:.2} = {:.2}{}",
            style(&item.id.to_string()).dim(),
            item.quantity,
            item.price,
            item.total_price,
            per_kg
        );
    }
    println!();
    println!(
        "{}: {:.2}",
        style("Total raw material cost").bold(),
        recipe.total_raw_material_cost
    );
    println!(
        "{}: {:.2}",
        style("Price per unit").bold(),
        recipe.price_per_unit
    );
    Ok(())
}
