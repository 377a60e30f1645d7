//! Admin API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use validator::Validate;

use crate::auth::AdminUser;
use crate::core::ServerState;
use crate::db::models::{Coupon, CouponCreate, Order};
use crate::db::repository::{CouponRepository, OrderRepository, ProductRepository};
use crate::utils::{AppError, AppResult};

/// Store-wide stats
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub total_orders: i64,
    pub total_products: i64,
    pub total_revenue: f64,
}

pub async fn stats(
    _admin: AdminUser,
    State(state): State<ServerState>,
) -> AppResult<Json<StatsResponse>> {
    let orders = OrderRepository::new(state.get_db());
    let products = ProductRepository::new(state.get_db());

    Ok(Json(StatsResponse {
        total_orders: orders.count().await?,
        total_products: products.count().await?,
        total_revenue: orders.revenue().await?,
    }))
}

/// List all orders
pub async fn list_orders(
    _admin: AdminUser,
    State(state): State<ServerState>,
) -> AppResult<Json<Vec<Order>>> {
    let orders = state.order_service().list_all().await?;
    Ok(Json(orders))
}

/// Create a coupon
pub async fn create_coupon(
    _admin: AdminUser,
    State(state): State<ServerState>,
    Json(payload): Json<CouponCreate>,
) -> AppResult<Json<Coupon>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let repo = CouponRepository::new(state.get_db());
    let coupon = repo.create(payload).await?;
    Ok(Json(coupon))
}

/// List all coupons (including inactive and expired)
pub async fn list_coupons(
    _admin: AdminUser,
    State(state): State<ServerState>,
) -> AppResult<Json<Vec<Coupon>>> {
    let repo = CouponRepository::new(state.get_db());
    let coupons = repo.find_all().await?;
    Ok(Json(coupons))
}

/// Delete a coupon
pub async fn delete_coupon(
    _admin: AdminUser,
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<serde_json::Value>> {
    let repo = CouponRepository::new(state.get_db());
    repo.delete(&id).await?;
    Ok(Json(serde_json::json!({ "deleted": true })))
}
