//! Authentication module
//!
//! The storefront does not issue credentials itself — an external identity
//! service does. This module verifies the opaque bearer token it issues and
//! exposes the caller's identity to handlers via extractors.
//!
//! - [`jwt`] — token validation service and claims
//! - [`extractor`] — [`CurrentUser`] / [`AdminUser`] axum extractors

pub mod extractor;
pub mod jwt;

pub use extractor::AdminUser;
pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
