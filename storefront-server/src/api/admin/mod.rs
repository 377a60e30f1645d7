//! Admin API module
//!
//! Store-wide stats, full order listing and coupon CRUD. Every route
//! requires the admin role.

mod handler;

use axum::{
    Router,
    routing::{delete, get},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/admin", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/stats", get(handler::stats))
        .route("/orders", get(handler::list_orders))
        .route("/coupons", get(handler::list_coupons).post(handler::create_coupon))
        .route("/coupons/{id}", delete(handler::delete_coupon))
}
