//! Order API module
//!
//! Buyer-facing order creation and queries, the two-actor payment
//! verification sub-flow, and the admin status/shipment update.

mod handler;

use axum::{
    Router,
    routing::{get, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/status", put(handler::update_status))
        .route("/{id}/transaction/submit", put(handler::submit_transaction))
        .route("/{id}/transaction", put(handler::verify_transaction))
}
