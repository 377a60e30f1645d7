//! Database Module
//!
//! Embedded SurrealDB storage: connection bootstrap, schema definition,
//! models and repositories.

pub mod models;
pub mod repository;

use crate::utils::AppError;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem, RocksDb};

const NAMESPACE: &str = "storefront";
const DATABASE: &str = "storefront";

/// Schema bootstrap statements.
///
/// The unique index on `order.order_no` is the authoritative uniqueness
/// guarantee for the human-facing order number; the generator's retry loop
/// is only a best-effort optimization on top of it.
const SCHEMA: &[&str] = &[
    "DEFINE TABLE IF NOT EXISTS product SCHEMALESS",
    "DEFINE TABLE IF NOT EXISTS coupon SCHEMALESS",
    "DEFINE INDEX IF NOT EXISTS coupon_code_unique ON TABLE coupon FIELDS code UNIQUE",
    "DEFINE TABLE IF NOT EXISTS order SCHEMALESS",
    "DEFINE INDEX IF NOT EXISTS order_no_unique ON TABLE order FIELDS order_no UNIQUE",
    "DEFINE INDEX IF NOT EXISTS order_user_idx ON TABLE order FIELDS user",
    "DEFINE TABLE IF NOT EXISTS cart SCHEMALESS",
    "DEFINE INDEX IF NOT EXISTS cart_user_unique ON TABLE cart FIELDS user UNIQUE",
    "DEFINE TABLE IF NOT EXISTS wishlist SCHEMALESS",
    "DEFINE INDEX IF NOT EXISTS wishlist_user_unique ON TABLE wishlist FIELDS user UNIQUE",
];

/// Database service — owns the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open the on-disk database (RocksDB engine) and apply the schema
    pub async fn new(db_path: &str) -> Result<Self, AppError> {
        let db = Surreal::new::<RocksDb>(db_path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        let service = Self { db };
        service.init().await?;

        tracing::info!("Database opened at {db_path} (SurrealDB/RocksDB)");
        Ok(service)
    }

    /// Open an in-memory database (tests and ephemeral runs)
    pub async fn new_memory() -> Result<Self, AppError> {
        let db = Surreal::new::<Mem>(())
            .await
            .map_err(|e| AppError::database(format!("Failed to open in-memory database: {e}")))?;

        let service = Self { db };
        service.init().await?;
        Ok(service)
    }

    async fn init(&self) -> Result<(), AppError> {
        self.db
            .use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        for stmt in SCHEMA {
            self.db
                .query(*stmt)
                .await
                .map_err(|e| AppError::database(format!("Schema statement failed: {e}")))?;
        }
        tracing::info!("Database schema applied ({} statements)", SCHEMA.len());
        Ok(())
    }
}
