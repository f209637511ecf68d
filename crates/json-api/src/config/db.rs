//! Database Config

use clap::Args;

/// Catalog and cart storage.
#[derive(Debug, Args)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection string for the runtime role; startup fails if
    /// that role bypasses row-level security
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: String,
}
