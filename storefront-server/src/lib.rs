//! Storefront Server — e-commerce backend
//!
//! # Architecture overview
//!
//! - **HTTP API** (`api`): per-resource axum routers and handlers
//! - **Order domain** (`orders`): pricing, order numbers, fulfillment and
//!   payment — the business core, independent of HTTP
//! - **Database** (`db`): embedded SurrealDB models and repositories
//! - **Auth** (`auth`): verification of externally-issued JWT credentials
//!
//! # Module structure
//!
//! ```text
//! storefront-server/src/
//! ├── core/          # config, state, server
//! ├── auth/          # JWT verification, extractors
//! ├── api/           # HTTP routes and handlers
//! ├── db/            # models and repositories
//! ├── orders/        # order domain core
//! └── utils/         # errors, logging, validation
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod orders;
pub mod utils;

// Re-export public types
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use db::DbService;
pub use orders::OrderService;
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// Set up process environment: dotenv and logging
pub fn setup_environment() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(None, log_dir.as_deref());

    Ok(())
}
