//! Order API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;

use crate::auth::{AdminUser, CurrentUser};
use crate::core::ServerState;
use crate::db::models::Order;
use crate::orders::{CreateOrderInput, UpdateStatusInput};
use crate::utils::AppResult;
use crate::utils::validation::{MAX_SHORT_TEXT_LEN, validate_required_text};

/// Create an order from the submitted line items
pub async fn create(
    user: CurrentUser,
    State(state): State<ServerState>,
    Json(payload): Json<CreateOrderInput>,
) -> AppResult<Json<Order>> {
    let order = state.order_service().create_order(&user.id, payload).await?;
    Ok(Json(order))
}

/// List the caller's orders
pub async fn list(
    user: CurrentUser,
    State(state): State<ServerState>,
) -> AppResult<Json<Vec<Order>>> {
    let orders = state.order_service().list_for_user(&user.id).await?;
    Ok(Json(orders))
}

/// Get one order (owner or admin)
pub async fn get_by_id(
    user: CurrentUser,
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Order>> {
    let order = state
        .order_service()
        .get_order(&id, &user.id, user.is_admin())
        .await?;
    Ok(Json(order))
}

/// Update fulfillment status and shipment data (admin)
pub async fn update_status(
    _admin: AdminUser,
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateStatusInput>,
) -> AppResult<Json<Order>> {
    let order = state.order_service().update_status(&id, payload).await?;
    Ok(Json(order))
}

/// Submit-transaction request
#[derive(Debug, Deserialize)]
pub struct SubmitTransactionRequest {
    pub transaction_id: String,
}

/// Buyer submits their UPI transaction reference
pub async fn submit_transaction(
    user: CurrentUser,
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<SubmitTransactionRequest>,
) -> AppResult<Json<Order>> {
    validate_required_text(&payload.transaction_id, "transactionId", MAX_SHORT_TEXT_LEN)?;

    let order = state
        .order_service()
        .submit_payment(&id, &user.id, &payload.transaction_id)
        .await?;
    Ok(Json(order))
}

/// Verify-transaction request
#[derive(Debug, Deserialize)]
pub struct VerifyTransactionRequest {
    pub success: bool,
    pub transaction_id: Option<String>,
}

/// Admin verifies (or rejects) a submitted payment
pub async fn verify_transaction(
    _admin: AdminUser,
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<VerifyTransactionRequest>,
) -> AppResult<Json<Order>> {
    let order = state
        .order_service()
        .verify_payment(&id, payload.success, payload.transaction_id.as_deref())
        .await?;
    Ok(Json(order))
}
