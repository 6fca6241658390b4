//! Migration CLI for the `posts` table.
//!
//! Reads `DATABASE_URL` (or `-u`) and runs `up`, `down`, `status`, `fresh`...

use sea_orm_migration::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!("Running post store migrations");
    cli::run_cli(migration::Migrator).await;
}
