//! Coupon API Handlers

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::CouponPublic;
use crate::db::repository::CouponRepository;
use crate::utils::AppResult;
use crate::utils::time::now_millis;

/// List active, unexpired coupons (public)
pub async fn list_public(State(state): State<ServerState>) -> AppResult<Json<Vec<CouponPublic>>> {
    let repo = CouponRepository::new(state.get_db());
    let coupons = repo.find_active(now_millis()).await?;
    Ok(Json(coupons.into_iter().map(CouponPublic::from).collect()))
}

/// Apply-coupon request
#[derive(Debug, Deserialize)]
pub struct ApplyCouponRequest {
    pub code: String,
}

/// Discount preview response
#[derive(Debug, Serialize)]
pub struct DiscountResponse {
    pub discount: f64,
}

/// Preview a coupon against the caller's cart
///
/// Errors when the code is missing, unknown, or not applicable to the
/// current cart subtotal.
pub async fn apply(
    user: CurrentUser,
    State(state): State<ServerState>,
    Json(payload): Json<ApplyCouponRequest>,
) -> AppResult<Json<DiscountResponse>> {
    let discount = state
        .order_service()
        .preview_coupon(&user.id, &payload.code)
        .await?;
    Ok(Json(DiscountResponse { discount }))
}
