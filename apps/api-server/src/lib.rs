//! # API Server
//!
//! HTTP surface of the content API. The binary in `main.rs` only wires
//! configuration to [`app::build_app`]; everything else lives here so the
//! integration tests can drive the same app.

pub mod app;
pub mod config;
pub mod handlers;
pub mod middleware;
pub mod state;
pub mod telemetry;

pub use app::build_app;
pub use config::AppConfig;
pub use state::{AppContext, AppState};
