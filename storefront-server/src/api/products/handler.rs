//! Product API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use validator::Validate;

use crate::auth::{AdminUser, CurrentUser};
use crate::core::ServerState;
use crate::db::models::{Product, ProductCategory, ProductCreate, ProductUpdate, Review};
use crate::db::repository::ProductRepository;
use crate::utils::time::now_millis;
use crate::utils::validation::{MAX_TEXT_LEN, validate_optional_text};
use crate::utils::{AppError, AppResult};

/// Query params for listing products
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub category: Option<ProductCategory>,
}

/// List products, optionally filtered by category
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Product>>> {
    let repo = ProductRepository::new(state.get_db());
    let products = match query.category {
        Some(category) => repo.find_by_category(category).await?,
        None => repo.find_all().await?,
    };
    Ok(Json(products))
}

/// Get product by id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Product>> {
    let repo = ProductRepository::new(state.get_db());
    let product = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Product {} not found", id)))?;
    Ok(Json(product))
}

/// Create a product (admin)
pub async fn create(
    _admin: AdminUser,
    State(state): State<ServerState>,
    Json(payload): Json<ProductCreate>,
) -> AppResult<Json<Product>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let repo = ProductRepository::new(state.get_db());
    let product = repo.create(payload).await?;
    Ok(Json(product))
}

/// Update a product (admin)
pub async fn update(
    _admin: AdminUser,
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<ProductUpdate>,
) -> AppResult<Json<Product>> {
    if let Some(name) = &payload.name
        && name.trim().is_empty()
    {
        return Err(AppError::validation("name must not be empty"));
    }
    if let Some(price) = payload.price
        && price < 0.0
    {
        return Err(AppError::validation("price must be non-negative"));
    }
    if let Some(stock) = payload.stock
        && stock < 0
    {
        return Err(AppError::validation("stock must be non-negative"));
    }

    let repo = ProductRepository::new(state.get_db());
    let product = repo.update(&id, payload).await?;
    Ok(Json(product))
}

/// Delete a product (admin)
pub async fn delete(
    _admin: AdminUser,
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<serde_json::Value>> {
    let repo = ProductRepository::new(state.get_db());
    repo.delete(&id).await?;
    Ok(Json(serde_json::json!({ "deleted": true })))
}

/// Review request
#[derive(Debug, Deserialize)]
pub struct ReviewRequest {
    pub rating: i32,
    pub comment: Option<String>,
}

/// Add a review to a product (buyer)
pub async fn add_review(
    user: CurrentUser,
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<ReviewRequest>,
) -> AppResult<Json<Product>> {
    if !(1..=5).contains(&payload.rating) {
        return Err(AppError::validation("rating must be between 1 and 5"));
    }
    validate_optional_text(&payload.comment, "comment", MAX_TEXT_LEN)?;

    let repo = ProductRepository::new(state.get_db());
    let product = repo
        .add_review(
            &id,
            Review {
                user: user.id,
                rating: payload.rating,
                comment: payload.comment,
                at: now_millis(),
            },
        )
        .await?;
    Ok(Json(product))
}
