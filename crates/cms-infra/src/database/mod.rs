//! Persistence adapters.

mod connections;
mod memory;

#[cfg(feature = "postgres")]
mod postgres_base;
#[cfg(feature = "postgres")]
pub mod postgres_repo;

#[cfg(feature = "postgres")]
pub mod entity;

pub use connections::{DatabaseConfig, DatabaseConnections};
pub use memory::{
    InMemoryContactRepository, InMemoryPostRepository, InMemoryRepository,
    InMemoryServiceRepository, Record,
};

#[cfg(feature = "postgres")]
pub use postgres_repo::{
    PostgresContactRepository, PostgresPostRepository, PostgresServiceRepository,
};

#[cfg(feature = "postgres")]
#[cfg(test)]
mod tests;
