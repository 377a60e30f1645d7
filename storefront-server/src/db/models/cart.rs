//! Cart and Wishlist Models
//!
//! One document per user (unique index on `user`).

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Cart line item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItem {
    #[serde(with = "serde_helpers::record_id")]
    pub product: RecordId,
    pub qty: i32,
}

/// Shopping cart entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cart {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    pub user: String,
    #[serde(default)]
    pub items: Vec<CartItem>,
    pub updated_at: i64,
}

impl Cart {
    /// Empty cart for a user that has none stored yet
    pub fn empty(user: impl Into<String>, now: i64) -> Self {
        Self {
            id: None,
            user: user.into(),
            items: Vec::new(),
            updated_at: now,
        }
    }
}

/// Wishlist entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wishlist {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    pub user: String,
    #[serde(default, with = "serde_helpers::vec_record_id")]
    pub products: Vec<RecordId>,
    pub updated_at: i64,
}

impl Wishlist {
    /// Empty wishlist for a user that has none stored yet
    pub fn empty(user: impl Into<String>, now: i64) -> Self {
        Self {
            id: None,
            user: user.into(),
            products: Vec::new(),
            updated_at: now,
        }
    }
}
