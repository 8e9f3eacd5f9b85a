//! Schema for the content database: posts, service pages and the contact
//! inbox.

pub use sea_orm_migration::prelude::*;

mod m20250101_000001_create_posts;
mod m20250101_000002_create_service_pages;
mod m20250101_000003_create_contact_messages;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250101_000001_create_posts::Migration),
            Box::new(m20250101_000002_create_service_pages::Migration),
            Box::new(m20250101_000003_create_contact_messages::Migration),
        ]
    }
}
