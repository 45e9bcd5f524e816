//! HTTP surface for the contract generator.

pub mod config;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod routes;
pub mod state;

pub use config::{Config, ConfigOrigin, load_config};
pub use error::ApiError;
pub use routes::router;
pub use state::AppState;
