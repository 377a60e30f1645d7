//! API route modules
//!
//! # Structure
//!
//! - [`health`] — liveness check
//! - [`products`] — catalog read + admin CRUD + reviews
//! - [`coupons`] — public listing and cart preview
//! - [`cart`] / [`wishlist`] — per-user cart and wishlist
//! - [`orders`] — order creation, payment sub-flow, admin status updates
//! - [`admin`] — stats, order listing, coupon CRUD

pub mod admin;
pub mod cart;
pub mod coupons;
pub mod health;
pub mod orders;
pub mod products;
pub mod wishlist;
