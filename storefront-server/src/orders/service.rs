//! Order service
//!
//! Stateless orchestration over the repositories. Every method is a plain
//! function of its inputs plus datastore state; the service owns no caches
//! and no mutable state of its own.

use rust_decimal::Decimal;
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

use super::money::to_f64;
use super::order_no;
use super::payment;
use super::pricing;
use super::status::{ShipmentPatch, apply_status_update};
use crate::core::config::MerchantConfig;
use crate::db::models::{
    Order, OrderItem, OrderStatus, PaymentMethod, PaymentStatus, Shipment, ShippingAddress,
    StatusEntry,
};
use crate::db::repository::product::PRODUCT_TABLE;
use crate::db::repository::{
    CartRepository, CouponRepository, OrderRepository, ProductRepository, RepoError,
    strip_table_prefix,
};
use crate::utils::time::now_millis;
use crate::utils::{AppError, AppResult};

/// Requested line item (client quantity is trusted, client price is not)
#[derive(Debug, Clone, serde::Deserialize)]
pub struct OrderItemInput {
    pub product: String,
    pub qty: i32,
    /// Client-echoed price, stored for audit only
    pub price: Option<f64>,
}

/// Order creation input
#[derive(Debug, Clone, serde::Deserialize)]
pub struct CreateOrderInput {
    pub items: Vec<OrderItemInput>,
    pub payment_method: PaymentMethod,
    pub coupon_code: Option<String>,
    pub shipping_address: Option<ShippingAddress>,
}

/// Status update input (admin)
#[derive(Debug, Clone, serde::Deserialize)]
pub struct UpdateStatusInput {
    pub status: OrderStatus,
    pub courier_name: Option<String>,
    pub tracking_id: Option<String>,
    pub tracking_url: Option<String>,
}

/// Order service — composes the order, product, coupon and cart repositories
#[derive(Clone)]
pub struct OrderService {
    orders: OrderRepository,
    products: ProductRepository,
    coupons: CouponRepository,
    carts: CartRepository,
    merchant: MerchantConfig,
}

impl OrderService {
    pub fn new(db: Surreal<Db>, merchant: MerchantConfig) -> Self {
        Self {
            orders: OrderRepository::new(db.clone()),
            products: ProductRepository::new(db.clone()),
            coupons: CouponRepository::new(db.clone()),
            carts: CartRepository::new(db),
            merchant,
        }
    }

    /// Create an order for a buyer
    ///
    /// Totals are recomputed from catalog prices; unresolvable product refs
    /// are skipped (stored as submitted, contributing nothing). The order
    /// document is authoritative once inserted — the stock adjustment that
    /// follows is best-effort per item.
    pub async fn create_order(&self, user: &str, input: CreateOrderInput) -> AppResult<Order> {
        if input.items.is_empty() {
            return Err(AppError::validation("No items to order"));
        }

        let now = now_millis();

        // Resolve catalog prices; remember which refs actually exist so the
        // stock adjustment below only touches those.
        let mut lines: Vec<(f64, i32)> = Vec::new();
        let mut resolved: Vec<(String, i32)> = Vec::new();
        let mut items: Vec<OrderItem> = Vec::with_capacity(input.items.len());

        for item in &input.items {
            let key = strip_table_prefix(PRODUCT_TABLE, &item.product).to_string();
            match self.products.find_by_id(&key).await {
                Ok(Some(product)) => {
                    lines.push((product.price, item.qty));
                    resolved.push((key.clone(), item.qty));
                }
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!(product = %item.product, error = %e, "Price lookup failed, skipping item");
                }
            }
            items.push(OrderItem {
                product: Some(RecordId::from_table_key(PRODUCT_TABLE, key)),
                qty: item.qty,
                price: item.price.unwrap_or(0.0),
            });
        }

        let subtotal = pricing::subtotal(&lines);

        // Optional coupon; an unknown code simply yields no discount here
        // (the preview endpoint is the strict path)
        let coupon = match input.coupon_code.as_deref().map(str::trim) {
            Some(code) if !code.is_empty() => self.coupons.find_by_code(code).await?,
            _ => None,
        };
        let discount = coupon
            .as_ref()
            .map(|c| pricing::compute_discount(subtotal, c, now))
            .unwrap_or(Decimal::ZERO);
        let total = pricing::final_total(subtotal, discount);

        // Best-effort uniqueness pre-check; the unique index is the backstop
        let mut order_no = order_no::generate();
        for _ in 0..order_no::MAX_RETRIES {
            if self.orders.find_by_order_no(&order_no).await?.is_none() {
                break;
            }
            order_no = order_no::generate();
        }

        let is_online = input.payment_method == PaymentMethod::Online;
        let total_f64 = to_f64(total);
        let upi_uri = is_online.then(|| {
            payment::build_upi_uri(
                &self.merchant.upi_vpa,
                &self.merchant.upi_name,
                total_f64,
                &order_no,
            )
        });

        let order = Order {
            id: None,
            order_no,
            user: user.to_string(),
            items,
            subtotal: to_f64(subtotal),
            discount_amount: to_f64(discount),
            total: total_f64,
            coupon: coupon.and_then(|c| c.id),
            payment_method: input.payment_method,
            upi_uri,
            payment_status: is_online.then_some(PaymentStatus::Pending),
            transaction_id: None,
            status: OrderStatus::Pending,
            shipping_address: input.shipping_address.unwrap_or_default(),
            shipment: Shipment::default(),
            status_history: vec![StatusEntry {
                status: OrderStatus::Pending,
                at: now,
            }],
            shipped_at: None,
            delivered_at: None,
            created_at: now,
            updated_at: now,
        };

        let created = self.orders.create(order).await.map_err(|e| match e {
            RepoError::Duplicate(_) => {
                AppError::conflict("Could not allocate a unique order number")
            }
            other => other.into(),
        })?;

        // Stock adjustment runs after the commit; failures are per-item and
        // never unwind the order
        for (key, qty) in resolved {
            if let Err(e) = self.products.decrement_stock(&key, qty).await {
                tracing::warn!(product = %key, error = %e, "Stock decrement failed");
            }
        }

        Ok(created)
    }

    /// Preview a coupon against the buyer's stored cart
    ///
    /// Unlike order creation, an inapplicable coupon is an error here, not a
    /// silent zero.
    pub async fn preview_coupon(&self, user: &str, code: &str) -> AppResult<f64> {
        let code = code.trim();
        if code.is_empty() {
            return Err(AppError::validation("Coupon code required"));
        }

        let now = now_millis();
        let cart = self.carts.find_by_user(user).await?;

        let mut lines: Vec<(f64, i32)> = Vec::new();
        if let Some(cart) = &cart {
            for item in &cart.items {
                if let Some(product) = self
                    .products
                    .find_by_id(&item.product.key().to_string())
                    .await?
                {
                    lines.push((product.price, item.qty));
                }
            }
        }
        let subtotal = pricing::subtotal(&lines);

        let coupon = self
            .coupons
            .find_by_code(code)
            .await?
            .ok_or_else(|| AppError::not_found("Invalid coupon code"))?;

        let discount = pricing::compute_discount(subtotal, &coupon, now);
        if discount <= Decimal::ZERO {
            return Err(AppError::validation("Coupon not applicable"));
        }

        Ok(to_f64(discount))
    }

    /// List orders owned by a buyer
    pub async fn list_for_user(&self, user: &str) -> AppResult<Vec<Order>> {
        Ok(self.orders.find_by_user(user).await?)
    }

    /// List all orders (admin)
    pub async fn list_all(&self) -> AppResult<Vec<Order>> {
        Ok(self.orders.find_all().await?)
    }

    /// Fetch one order, visible to its owner or an admin
    ///
    /// A foreign order reads as not-found rather than forbidden so order ids
    /// don't leak.
    pub async fn get_order(&self, id: &str, requester: &str, is_admin: bool) -> AppResult<Order> {
        let order = self.load(id).await?;
        if !is_admin && order.user != requester {
            return Err(AppError::not_found(format!("Order {} not found", id)));
        }
        Ok(order)
    }

    /// Admin status/shipment update
    pub async fn update_status(&self, id: &str, input: UpdateStatusInput) -> AppResult<Order> {
        let mut order = self.load(id).await?;

        let patch = ShipmentPatch {
            courier_name: input.courier_name,
            tracking_id: input.tracking_id,
            tracking_url: input.tracking_url,
        };
        apply_status_update(&mut order, input.status, patch, now_millis())?;

        let saved = self.orders.save(order).await?;
        tracing::info!(order_no = %saved.order_no, status = %saved.status, "Order status updated");
        Ok(saved)
    }

    /// Buyer submits a payment reference
    pub async fn submit_payment(&self, id: &str, user: &str, reference: &str) -> AppResult<Order> {
        let mut order = self.load(id).await?;
        payment::submit_transaction(&mut order, user, reference, now_millis())?;
        Ok(self.orders.save(order).await?)
    }

    /// Admin verifies a payment
    pub async fn verify_payment(
        &self,
        id: &str,
        success: bool,
        reference: Option<&str>,
    ) -> AppResult<Order> {
        let mut order = self.load(id).await?;
        payment::verify_transaction(&mut order, success, reference, now_millis())?;
        Ok(self.orders.save(order).await?)
    }

    async fn load(&self, id: &str) -> AppResult<Order> {
        self.orders
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Order {} not found", id)))
    }
}
