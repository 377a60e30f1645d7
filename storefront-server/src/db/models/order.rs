//! Order Model
//!
//! The order document is immutable in identity and line items once created;
//! only fulfillment status, shipment data and the payment sub-flow mutate
//! afterwards.

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Fulfillment status lifecycle
///
/// The documented flow is Pending → Processing → Shipped → Delivered with
/// Cancelled reachable from any state. The engine appends history on every
/// update call and does not restrict transition order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum OrderStatus {
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Processing => "Processing",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
        };
        f.write_str(s)
    }
}

/// Payment method, fixed at creation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PaymentMethod {
    #[serde(rename = "COD")]
    Cod,
    #[serde(rename = "ONLINE")]
    Online,
}

/// Online-payment confirmation lifecycle (absent on COD orders)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PaymentStatus {
    Pending,
    Submitted,
    Paid,
    Failed,
}

/// Order line item, stored exactly as submitted
///
/// The client price is kept only as an audit echo; totals always come from
/// the catalog price at creation time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub product: Option<RecordId>,
    pub qty: i32,
    #[serde(default)]
    pub price: f64,
}

/// Shipping address supplied at checkout
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ShippingAddress {
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub country: Option<String>,
}

/// Shipment record, populated by admin status updates
///
/// Once set, fields persist through later transitions; partial updates
/// merge rather than overwrite.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Shipment {
    pub courier_name: Option<String>,
    pub tracking_id: Option<String>,
    pub tracking_url: Option<String>,
}

/// Append-only status history entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusEntry {
    pub status: OrderStatus,
    pub at: i64,
}

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    /// 15-digit human-facing identifier (unique index), distinct from `id`
    pub order_no: String,
    /// Buyer id from the verified credential
    pub user: String,
    pub items: Vec<OrderItem>,
    pub subtotal: f64,
    pub discount_amount: f64,
    pub total: f64,
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub coupon: Option<RecordId>,
    pub payment_method: PaymentMethod,
    /// UPI deep link, present only for ONLINE orders
    pub upi_uri: Option<String>,
    /// Present only for ONLINE orders
    pub payment_status: Option<PaymentStatus>,
    pub transaction_id: Option<String>,
    pub status: OrderStatus,
    #[serde(default)]
    pub shipping_address: ShippingAddress,
    #[serde(default)]
    pub shipment: Shipment,
    pub status_history: Vec<StatusEntry>,
    pub shipped_at: Option<i64>,
    pub delivered_at: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}
