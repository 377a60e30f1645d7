//! Core module — configuration, state and server

pub mod config;
pub mod server;
pub mod state;

pub use config::{Config, MerchantConfig};
pub use server::Server;
pub use state::ServerState;
