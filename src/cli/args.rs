//! CLI argument definitions

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::cli::commands::history::HistoryCommands;
use crate::cli::commands::mat::MatCommands;
use crate::cli::commands::price::PriceCommands;
use crate::cli::commands::quote::QuoteCommands;
use crate::cli::commands::rcp::RcpCommands;
use crate::cli::commands::ven::VenCommands;

/// Costbook - track vendor-quoted material prices and recipe costs
#[derive(Parser, Debug)]
#[command(name = "cbk", version, about)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by all subcommands
#[derive(Args, Debug)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'o', global = true, value_enum, default_value = "auto")]
    pub output: OutputFormat,
}

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Auto,
    /// JSON
    Json,
    /// YAML
    Yaml,
    /// Entity ids only
    Id,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a costbook project in the current directory
    Init,

    /// Material records (collaborator interface for the pricing ledger)
    #[command(subcommand)]
    Mat(MatCommands),

    /// Vendor records
    #[command(subcommand)]
    Ven(VenCommands),

    /// Recipes and their line items
    #[command(subcommand)]
    Rcp(RcpCommands),

    /// Vendor quote ledger
    #[command(subcommand)]
    Quote(QuoteCommands),

    /// Denormalized price cache operations
    #[command(subcommand)]
    Price(PriceCommands),

    /// Recipe audit trail (change logs and snapshots)
    #[command(subcommand)]
    History(HistoryCommands),
}
