//! Server state
//!
//! [`ServerState`] holds the shared handles every request needs: the
//! configuration, the embedded database and the JWT verification service.
//! It is `Clone` (cheap Arc/handle copies) and injected into handlers via
//! axum's `State`.

use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db::DbService;
use crate::orders::OrderService;

#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Config,
    /// Embedded database (SurrealDB)
    pub db: Surreal<Db>,
    /// JWT verification service
    pub jwt_service: Arc<JwtService>,
}

impl ServerState {
    pub fn new(config: Config, db: Surreal<Db>, jwt_service: Arc<JwtService>) -> Self {
        Self {
            config,
            db,
            jwt_service,
        }
    }

    /// Initialize state: data directory, database, services
    ///
    /// # Panics
    ///
    /// Panics when the data directory or database cannot be initialized —
    /// the server cannot run without them.
    pub async fn initialize(config: &Config) -> Self {
        std::fs::create_dir_all(&config.data_dir).expect("Failed to create data directory");

        let db_path = config.database_path();
        let db_service = DbService::new(&db_path.to_string_lossy())
            .await
            .expect("Failed to initialize database");

        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));

        Self::new(config.clone(), db_service.db, jwt_service)
    }

    /// Initialize with an in-memory database (tests, ephemeral runs)
    pub async fn initialize_in_memory(config: &Config) -> Self {
        let db_service = DbService::new_memory()
            .await
            .expect("Failed to initialize in-memory database");
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        Self::new(config.clone(), db_service.db, jwt_service)
    }

    /// Database handle
    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }

    /// JWT verification service
    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }

    /// Order service over this state's database
    pub fn order_service(&self) -> OrderService {
        OrderService::new(self.db.clone(), self.config.merchant.clone())
    }
}
