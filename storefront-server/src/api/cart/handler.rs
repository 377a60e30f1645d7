//! Cart API Handlers
//!
//! One cart document per authenticated user; a user with no stored cart
//! reads as an empty one.

use axum::{Json, extract::State};
use serde::Deserialize;
use surrealdb::RecordId;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Cart, CartItem};
use crate::db::repository::product::PRODUCT_TABLE;
use crate::db::repository::{CartRepository, strip_table_prefix};
use crate::utils::time::now_millis;
use crate::utils::{AppError, AppResult};

fn product_ref(id: &str) -> RecordId {
    RecordId::from_table_key(PRODUCT_TABLE, strip_table_prefix(PRODUCT_TABLE, id))
}

/// Get the caller's cart
pub async fn get_cart(
    user: CurrentUser,
    State(state): State<ServerState>,
) -> AppResult<Json<Cart>> {
    let repo = CartRepository::new(state.get_db());
    let cart = repo
        .find_by_user(&user.id)
        .await?
        .unwrap_or_else(|| Cart::empty(&user.id, now_millis()));
    Ok(Json(cart))
}

/// Add-to-cart request
#[derive(Debug, Deserialize)]
pub struct AddToCartRequest {
    pub product_id: String,
    pub qty: i32,
}

/// Add an item (or increase its quantity)
pub async fn add_item(
    user: CurrentUser,
    State(state): State<ServerState>,
    Json(payload): Json<AddToCartRequest>,
) -> AppResult<Json<Cart>> {
    if payload.qty < 1 {
        return Err(AppError::validation("qty must be at least 1"));
    }

    let repo = CartRepository::new(state.get_db());
    let mut cart = repo
        .find_by_user(&user.id)
        .await?
        .unwrap_or_else(|| Cart::empty(&user.id, now_millis()));

    let product = product_ref(&payload.product_id);
    match cart.items.iter_mut().find(|i| i.product == product) {
        Some(item) => item.qty += payload.qty,
        None => cart.items.push(CartItem {
            product,
            qty: payload.qty,
        }),
    }

    let cart = repo.save(cart).await?;
    Ok(Json(cart))
}

/// Update-cart request
#[derive(Debug, Deserialize)]
pub struct UpdateCartRequest {
    pub product_id: String,
    pub qty: i32,
}

/// Set an item's quantity (no-op if the item is absent)
pub async fn update_item(
    user: CurrentUser,
    State(state): State<ServerState>,
    Json(payload): Json<UpdateCartRequest>,
) -> AppResult<Json<Cart>> {
    if payload.qty < 1 {
        return Err(AppError::validation("qty must be at least 1"));
    }

    let repo = CartRepository::new(state.get_db());
    let mut cart = repo
        .find_by_user(&user.id)
        .await?
        .ok_or_else(|| AppError::not_found("Cart not found"))?;

    let product = product_ref(&payload.product_id);
    if let Some(item) = cart.items.iter_mut().find(|i| i.product == product) {
        item.qty = payload.qty;
        cart = repo.save(cart).await?;
    }

    Ok(Json(cart))
}

/// Remove-from-cart request
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartRequest {
    pub product_id: String,
}

/// Remove an item
pub async fn remove_item(
    user: CurrentUser,
    State(state): State<ServerState>,
    Json(payload): Json<RemoveFromCartRequest>,
) -> AppResult<Json<Cart>> {
    let repo = CartRepository::new(state.get_db());
    let mut cart = repo
        .find_by_user(&user.id)
        .await?
        .unwrap_or_else(|| Cart::empty(&user.id, now_millis()));

    let product = product_ref(&payload.product_id);
    cart.items.retain(|i| i.product != product);

    let cart = repo.save(cart).await?;
    Ok(Json(cart))
}
