//! Schema migration CLI for the power-monitor SQLite store.
//!
//! Reads `DATABASE_URL` (e.g. `sqlite://database.db?mode=rwc`) from the
//! environment or a `.env` file.

use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    cli::run_cli(migration::Migrator).await;
}
