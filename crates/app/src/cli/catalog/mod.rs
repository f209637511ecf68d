//! `catalog` commands

use clap::{Args, Subcommand};

mod seed_demo;

#[derive(Debug, Args)]
pub(crate) struct CatalogCommand {
    #[command(subcommand)]
    command: CatalogSubcommand,
}

#[derive(Debug, Subcommand)]
enum CatalogSubcommand {
    /// Load a small demo catalog for one shop
    SeedDemo(seed_demo::SeedDemoArgs),
}

pub(crate) async fn run(command: CatalogCommand) -> Result<(), String> {
    match command.command {
        CatalogSubcommand::SeedDemo(args) => seed_demo::run(args).await,
    }
}
