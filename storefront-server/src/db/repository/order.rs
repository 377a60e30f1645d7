//! Order Repository
//!
//! The unique index on `order_no` is the source of truth for human-facing
//! identifier uniqueness; `create` surfaces a violation as
//! [`RepoError::Duplicate`] so the service can map it to a Conflict.

use super::{BaseRepository, RepoError, RepoResult, strip_table_prefix};
use crate::db::models::Order;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

pub const ORDER_TABLE: &str = "order";

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Insert a new order document
    pub async fn create(&self, order: Order) -> RepoResult<Order> {
        let result: Result<Option<Order>, surrealdb::Error> = self
            .base
            .db()
            .create(ORDER_TABLE)
            .content(order)
            .await;

        match result {
            Ok(created) => {
                created.ok_or_else(|| RepoError::Database("Failed to create order".to_string()))
            }
            Err(e) => {
                let msg = e.to_string();
                if msg.contains("order_no_unique") || msg.contains("already contains") {
                    Err(RepoError::Duplicate("Order number already exists".to_string()))
                } else {
                    Err(e.into())
                }
            }
        }
    }

    /// Find order by storage key
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Order>> {
        let pure_id = strip_table_prefix(ORDER_TABLE, id).to_string();
        let order: Option<Order> = self.base.db().select((ORDER_TABLE, pure_id)).await?;
        Ok(order)
    }

    /// Find order by its human-facing number (identifier pre-check)
    pub async fn find_by_order_no(&self, order_no: &str) -> RepoResult<Option<Order>> {
        let orders: Vec<Order> = self
            .base
            .db()
            .query("SELECT * FROM order WHERE order_no = $order_no")
            .bind(("order_no", order_no.to_string()))
            .await?
            .take(0)?;
        Ok(orders.into_iter().next())
    }

    /// Find all orders owned by a buyer, newest first
    pub async fn find_by_user(&self, user: &str) -> RepoResult<Vec<Order>> {
        let orders: Vec<Order> = self
            .base
            .db()
            .query("SELECT * FROM order WHERE user = $user ORDER BY created_at DESC")
            .bind(("user", user.to_string()))
            .await?
            .take(0)?;
        Ok(orders)
    }

    /// Find all orders (admin view), newest first
    pub async fn find_all(&self) -> RepoResult<Vec<Order>> {
        let orders: Vec<Order> = self
            .base
            .db()
            .query("SELECT * FROM order ORDER BY created_at DESC")
            .await?
            .take(0)?;
        Ok(orders)
    }

    /// Persist a mutated order document (full replace)
    pub async fn save(&self, mut order: Order) -> RepoResult<Order> {
        // The record id is the update key, not part of the content
        let id = order
            .id
            .take()
            .ok_or_else(|| RepoError::Validation("Order has no id".to_string()))?;

        let saved: Option<Order> = self
            .base
            .db()
            .update((ORDER_TABLE, id.key().to_string()))
            .content(order)
            .await?;

        saved.ok_or_else(|| RepoError::NotFound("Order not found".to_string()))
    }

    /// Total order count (admin stats)
    pub async fn count(&self) -> RepoResult<i64> {
        let rows: Vec<CountRow> = self
            .base
            .db()
            .query("SELECT count() AS count FROM order GROUP ALL")
            .await?
            .take(0)?;
        Ok(rows.into_iter().next().map(|r| r.count).unwrap_or(0))
    }

    /// Sum of all order totals (admin stats)
    pub async fn revenue(&self) -> RepoResult<f64> {
        let rows: Vec<RevenueRow> = self
            .base
            .db()
            .query("SELECT math::sum(total) AS revenue FROM order GROUP ALL")
            .await?
            .take(0)?;
        Ok(rows.into_iter().next().map(|r| r.revenue).unwrap_or(0.0))
    }
}

#[derive(serde::Deserialize)]
struct CountRow {
    count: i64,
}

#[derive(serde::Deserialize)]
struct RevenueRow {
    revenue: f64,
}
