//! Coupon API module
//!
//! Public listing plus the buyer-facing cart preview. Admin CRUD lives
//! under `/api/admin/coupons`.

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/coupons", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list_public))
        .route("/apply", post(handler::apply))
}
