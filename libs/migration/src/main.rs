//! Migration CLI for the accounts schema.
//!
//! Reads DATABASE_URL, e.g. `migration up` or `migration status`.

use migration::Migrator;
use sea_orm_migration::cli;

#[tokio::main]
async fn main() {
    cli::run_cli(Migrator).await;
}
