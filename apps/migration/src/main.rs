//! Schema tool for the CMS tables (`posts`, `service_pages`,
//! `contact_messages`).
//!
//! Reads `DATABASE_URL` from the environment or `.env`. Subcommands come from
//! sea-orm-migration: `up`, `down`, `status`, `fresh`, `refresh`, `reset`.

use sea_orm_migration::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,sea_orm_migration=info,sqlx=warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if std::env::var("DATABASE_URL").is_err() {
        tracing::error!("DATABASE_URL is not set; nothing to migrate");
        std::process::exit(1);
    }

    cli::run_cli(migration::Migrator).await;
}
