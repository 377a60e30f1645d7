//! Coupon Model
//!
//! Percentage discount code with an activity window and a minimum-order
//! eligibility gate. Lifecycle is owned by admin CRUD; the order engine
//! only reads coupons.

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Coupon entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coupon {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    pub code: String,
    /// Percentage discount, 0..=100 (clamped at computation time)
    pub discount: f64,
    /// Minimum order subtotal for the coupon to apply
    #[serde(default)]
    pub min_amount: f64,
    /// Expiry as Unix millis
    pub expiration: i64,
    #[serde(default = "default_true")]
    pub is_active: bool,
    pub created_at: i64,
}

fn default_true() -> bool {
    true
}

/// Create coupon payload
#[derive(Debug, Clone, Deserialize, validator::Validate)]
pub struct CouponCreate {
    #[validate(length(min = 1, max = 64))]
    pub code: String,
    #[validate(range(min = 0.0, max = 100.0))]
    pub discount: f64,
    pub expiration: i64,
    #[validate(range(min = 0.0))]
    pub min_amount: Option<f64>,
    pub is_active: Option<bool>,
}

/// Public projection for the storefront coupon listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CouponPublic {
    pub code: String,
    pub discount: f64,
    pub min_amount: f64,
    pub expiration: i64,
}

impl From<Coupon> for CouponPublic {
    fn from(c: Coupon) -> Self {
        Self {
            code: c.code,
            discount: c.discount,
            min_amount: c.min_amount,
            expiration: c.expiration,
        }
    }
}
