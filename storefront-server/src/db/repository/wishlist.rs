//! Wishlist Repository
//!
//! One wishlist document per user (unique index on `user`).

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::Wishlist;
use crate::utils::time::now_millis;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

pub const WISHLIST_TABLE: &str = "wishlist";

#[derive(Clone)]
pub struct WishlistRepository {
    base: BaseRepository,
}

impl WishlistRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find a user's wishlist
    pub async fn find_by_user(&self, user: &str) -> RepoResult<Option<Wishlist>> {
        let wishlists: Vec<Wishlist> = self
            .base
            .db()
            .query("SELECT * FROM wishlist WHERE user = $user")
            .bind(("user", user.to_string()))
            .await?
            .take(0)?;
        Ok(wishlists.into_iter().next())
    }

    /// Persist a wishlist (insert on first save, replace afterwards)
    pub async fn save(&self, mut wishlist: Wishlist) -> RepoResult<Wishlist> {
        wishlist.updated_at = now_millis();

        // The record id is the update key, not part of the content
        let saved: Option<Wishlist> = match wishlist.id.take() {
            Some(id) => {
                self.base
                    .db()
                    .update((WISHLIST_TABLE, id.key().to_string()))
                    .content(wishlist)
                    .await?
            }
            None => self.base.db().create(WISHLIST_TABLE).content(wishlist).await?,
        };

        saved.ok_or_else(|| RepoError::Database("Failed to save wishlist".to_string()))
    }
}
