use clap::Parser;
use costbook::cli::{Cli, Commands};
use miette::Result;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Install miette's fancy error handler for beautiful diagnostics
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init => costbook::cli::commands::init::run(),
        Commands::Mat(cmd) => costbook::cli::commands::mat::run(cmd, &cli.global),
        Commands::Ven(cmd) => costbook::cli::commands::ven::run(cmd, &cli.global),
        Commands::Rcp(cmd) => costbook::cli::commands::rcp::run(cmd, &cli.global),
        Commands::Quote(cmd) => costbook::cli::commands::quote::run(cmd, &cli.global),
        Commands::Price(cmd) => costbook::cli::commands::price::run(cmd, &cli.global),
        Commands::History(cmd) => costbook::cli::commands::history::run(cmd, &cli.global),
    }
}
