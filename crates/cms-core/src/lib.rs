//! # CMS Core
//!
//! The domain layer of the content API.
//! This crate holds the entities, their validation rules, the entity services
//! and the ports infrastructure must implement. It has zero infrastructure
//! dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod services;

pub use error::DomainError;
