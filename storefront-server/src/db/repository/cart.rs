//! Cart Repository
//!
//! One cart document per user (unique index on `user`).

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::Cart;
use crate::utils::time::now_millis;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

pub const CART_TABLE: &str = "cart";

#[derive(Clone)]
pub struct CartRepository {
    base: BaseRepository,
}

impl CartRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find a user's cart
    pub async fn find_by_user(&self, user: &str) -> RepoResult<Option<Cart>> {
        let carts: Vec<Cart> = self
            .base
            .db()
            .query("SELECT * FROM cart WHERE user = $user")
            .bind(("user", user.to_string()))
            .await?
            .take(0)?;
        Ok(carts.into_iter().next())
    }

    /// Persist a cart (insert on first save, replace afterwards)
    pub async fn save(&self, mut cart: Cart) -> RepoResult<Cart> {
        cart.updated_at = now_millis();

        // The record id is the update key, not part of the content
        let saved: Option<Cart> = match cart.id.take() {
            Some(id) => {
                self.base
                    .db()
                    .update((CART_TABLE, id.key().to_string()))
                    .content(cart)
                    .await?
            }
            None => self.base.db().create(CART_TABLE).content(cart).await?,
        };

        saved.ok_or_else(|| RepoError::Database("Failed to save cart".to_string()))
    }
}
