//! Cart API module

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/cart", routes())
}

fn routes() -> Router<ServerState> {
    Router::new().route(
        "/",
        get(handler::get_cart)
            .post(handler::add_item)
            .put(handler::update_item)
            .delete(handler::remove_item),
    )
}
