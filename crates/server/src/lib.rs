//! # Digibank Server
//!
//! HTTP boundary: caller identity, JSON parsing and status mapping around
//! the business services.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use config::AppConfig;
pub use routes::create_router;
pub use state::AppState;
