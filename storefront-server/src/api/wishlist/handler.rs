//! Wishlist API Handlers

use axum::{Json, extract::State};
use serde::Deserialize;
use surrealdb::RecordId;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::Wishlist;
use crate::db::repository::product::PRODUCT_TABLE;
use crate::db::repository::{WishlistRepository, strip_table_prefix};
use crate::utils::AppResult;
use crate::utils::time::now_millis;

fn product_ref(id: &str) -> RecordId {
    RecordId::from_table_key(PRODUCT_TABLE, strip_table_prefix(PRODUCT_TABLE, id))
}

/// Get the caller's wishlist
pub async fn get_wishlist(
    user: CurrentUser,
    State(state): State<ServerState>,
) -> AppResult<Json<Wishlist>> {
    let repo = WishlistRepository::new(state.get_db());
    let wishlist = repo
        .find_by_user(&user.id)
        .await?
        .unwrap_or_else(|| Wishlist::empty(&user.id, now_millis()));
    Ok(Json(wishlist))
}

/// Wishlist mutation request
#[derive(Debug, Deserialize)]
pub struct WishlistRequest {
    pub product_id: String,
}

/// Add a product (idempotent)
pub async fn add_product(
    user: CurrentUser,
    State(state): State<ServerState>,
    Json(payload): Json<WishlistRequest>,
) -> AppResult<Json<Wishlist>> {
    let repo = WishlistRepository::new(state.get_db());
    let mut wishlist = repo
        .find_by_user(&user.id)
        .await?
        .unwrap_or_else(|| Wishlist::empty(&user.id, now_millis()));

    let product = product_ref(&payload.product_id);
    if !wishlist.products.contains(&product) {
        wishlist.products.push(product);
    }

    let wishlist = repo.save(wishlist).await?;
    Ok(Json(wishlist))
}

/// Remove a product
pub async fn remove_product(
    user: CurrentUser,
    State(state): State<ServerState>,
    Json(payload): Json<WishlistRequest>,
) -> AppResult<Json<Wishlist>> {
    let repo = WishlistRepository::new(state.get_db());
    let mut wishlist = repo
        .find_by_user(&user.id)
        .await?
        .unwrap_or_else(|| Wishlist::empty(&user.id, now_millis()));

    let product = product_ref(&payload.product_id);
    wishlist.products.retain(|p| p != &product);

    let wishlist = repo.save(wishlist).await?;
    Ok(Json(wishlist))
}
