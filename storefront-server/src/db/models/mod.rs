//! Database models
//!
//! One module per table. API request/response DTOs that mirror a table's
//! shape live next to the entity they describe.

pub mod cart;
pub mod coupon;
pub mod order;
pub mod product;
pub mod serde_helpers;

pub use cart::{Cart, CartItem, Wishlist};
pub use coupon::{Coupon, CouponCreate, CouponPublic};
pub use order::{
    Order, OrderItem, OrderStatus, PaymentMethod, PaymentStatus, Shipment, ShippingAddress,
    StatusEntry,
};
pub use product::{Product, ProductCategory, ProductCreate, ProductUpdate, Review};
