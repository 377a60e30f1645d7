//! Fulfillment status updates and shipment merging
//!
//! A single admin-invoked operation: target status plus an optional typed
//! shipment patch. Supplied patch fields merge into the stored shipment
//! record; unsupplied fields are left untouched. Every call appends exactly
//! one entry to the status history, whatever the target.

use super::tracking::build_tracking_url;
use crate::db::models::{Order, OrderStatus, StatusEntry};
use crate::utils::{AppError, AppResult};

/// Typed shipment patch supplied alongside a status update
#[derive(Debug, Clone, Default)]
pub struct ShipmentPatch {
    pub courier_name: Option<String>,
    pub tracking_id: Option<String>,
    pub tracking_url: Option<String>,
}

impl ShipmentPatch {
    /// Drop empty-after-trim values so they cannot clobber stored fields
    fn normalized(self) -> Self {
        fn clean(v: Option<String>) -> Option<String> {
            v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
        }
        Self {
            courier_name: clean(self.courier_name),
            tracking_id: clean(self.tracking_id),
            tracking_url: clean(self.tracking_url),
        }
    }
}

/// Apply a status update to an order in place
///
/// Shipped requires a courier name and tracking id, supplied with this call
/// or already stored from a prior partial update. `shipped_at` and
/// `delivered_at` are stamped only on the first entry into their status.
/// Transition order is otherwise not restricted.
pub fn apply_status_update(
    order: &mut Order,
    target: OrderStatus,
    patch: ShipmentPatch,
    now: i64,
) -> AppResult<()> {
    let patch = patch.normalized();
    let supplied_url = patch.tracking_url.clone();

    // Merge supplied shipment fields regardless of target status
    if let Some(courier) = patch.courier_name {
        order.shipment.courier_name = Some(courier);
    }
    if let Some(tracking) = patch.tracking_id {
        order.shipment.tracking_id = Some(tracking);
    }
    if let Some(url) = patch.tracking_url {
        order.shipment.tracking_url = Some(url);
    }

    if target == OrderStatus::Shipped {
        let courier = order.shipment.courier_name.as_deref().unwrap_or("");
        let tracking = order.shipment.tracking_id.as_deref().unwrap_or("");
        if courier.is_empty() || tracking.is_empty() {
            return Err(AppError::validation(
                "Courier name and tracking id are required to mark an order Shipped",
            ));
        }

        // Supplied URL wins; otherwise keep a stored one; otherwise synthesize
        if supplied_url.is_none() && order.shipment.tracking_url.is_none() {
            order.shipment.tracking_url = Some(build_tracking_url(courier, tracking));
        }

        if order.shipped_at.is_none() {
            order.shipped_at = Some(now);
        }
    }

    if target == OrderStatus::Delivered && order.delivered_at.is_none() {
        order.delivered_at = Some(now);
    }

    order.status = target;
    order.status_history.push(StatusEntry { status: target, at: now });
    order.updated_at = now;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::{PaymentMethod, Shipment, ShippingAddress};

    fn pending_order() -> Order {
        Order {
            id: None,
            order_no: "123456789012345".to_string(),
            user: "user:alice".to_string(),
            items: vec![],
            subtotal: 50.0,
            discount_amount: 0.0,
            total: 50.0,
            coupon: None,
            payment_method: PaymentMethod::Cod,
            upi_uri: None,
            payment_status: None,
            transaction_id: None,
            status: OrderStatus::Pending,
            shipping_address: ShippingAddress::default(),
            shipment: Shipment::default(),
            status_history: vec![StatusEntry {
                status: OrderStatus::Pending,
                at: 1000,
            }],
            shipped_at: None,
            delivered_at: None,
            created_at: 1000,
            updated_at: 1000,
        }
    }

    #[test]
    fn test_history_grows_by_one_per_call() {
        let mut order = pending_order();
        apply_status_update(&mut order, OrderStatus::Processing, ShipmentPatch::default(), 2000)
            .unwrap();
        assert_eq!(order.status_history.len(), 2);

        // Repeating the same target still appends
        apply_status_update(&mut order, OrderStatus::Processing, ShipmentPatch::default(), 3000)
            .unwrap();
        assert_eq!(order.status_history.len(), 3);
        assert_eq!(order.status, OrderStatus::Processing);
    }

    #[test]
    fn test_shipped_requires_courier_and_tracking() {
        let mut order = pending_order();
        let err = apply_status_update(
            &mut order,
            OrderStatus::Shipped,
            ShipmentPatch::default(),
            2000,
        )
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        // Rejected update must not mutate the order
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.status_history.len(), 1);
        assert!(order.shipped_at.is_none());
    }

    #[test]
    fn test_shipped_accepts_previously_stored_shipment_fields() {
        let mut order = pending_order();
        // Partial update stores courier/tracking while still Processing
        apply_status_update(
            &mut order,
            OrderStatus::Processing,
            ShipmentPatch {
                courier_name: Some("BlueDart".to_string()),
                tracking_id: Some("AWB42".to_string()),
                tracking_url: None,
            },
            2000,
        )
        .unwrap();

        apply_status_update(&mut order, OrderStatus::Shipped, ShipmentPatch::default(), 3000)
            .unwrap();
        assert_eq!(order.status, OrderStatus::Shipped);
        assert_eq!(order.shipped_at, Some(3000));
        assert_eq!(
            order.shipment.tracking_url.as_deref(),
            Some("https://www.bluedart.com/track?track=AWB42")
        );
    }

    #[test]
    fn test_supplied_url_wins_over_synthesis() {
        let mut order = pending_order();
        apply_status_update(
            &mut order,
            OrderStatus::Shipped,
            ShipmentPatch {
                courier_name: Some("BlueDart".to_string()),
                tracking_id: Some("AWB42".to_string()),
                tracking_url: Some("https://example.com/track/AWB42".to_string()),
            },
            2000,
        )
        .unwrap();
        assert_eq!(
            order.shipment.tracking_url.as_deref(),
            Some("https://example.com/track/AWB42")
        );
    }

    #[test]
    fn test_unknown_courier_synthesizes_empty_url() {
        let mut order = pending_order();
        apply_status_update(
            &mut order,
            OrderStatus::Shipped,
            ShipmentPatch {
                courier_name: Some("Some Local Courier".to_string()),
                tracking_id: Some("X1".to_string()),
                tracking_url: None,
            },
            2000,
        )
        .unwrap();
        assert_eq!(order.shipment.tracking_url.as_deref(), Some(""));
    }

    #[test]
    fn test_shipment_fields_persist_through_delivered() {
        let mut order = pending_order();
        apply_status_update(
            &mut order,
            OrderStatus::Shipped,
            ShipmentPatch {
                courier_name: Some("Delhivery".to_string()),
                tracking_id: Some("PKG1".to_string()),
                tracking_url: None,
            },
            2000,
        )
        .unwrap();

        apply_status_update(&mut order, OrderStatus::Delivered, ShipmentPatch::default(), 3000)
            .unwrap();
        assert_eq!(order.shipment.courier_name.as_deref(), Some("Delhivery"));
        assert_eq!(order.shipment.tracking_id.as_deref(), Some("PKG1"));
        assert_eq!(order.delivered_at, Some(3000));
    }

    #[test]
    fn test_timestamps_stamp_once() {
        let mut order = pending_order();
        apply_status_update(
            &mut order,
            OrderStatus::Shipped,
            ShipmentPatch {
                courier_name: Some("Ekart".to_string()),
                tracking_id: Some("T1".to_string()),
                tracking_url: None,
            },
            2000,
        )
        .unwrap();
        apply_status_update(&mut order, OrderStatus::Shipped, ShipmentPatch::default(), 5000)
            .unwrap();
        assert_eq!(order.shipped_at, Some(2000));

        apply_status_update(&mut order, OrderStatus::Delivered, ShipmentPatch::default(), 6000)
            .unwrap();
        apply_status_update(&mut order, OrderStatus::Delivered, ShipmentPatch::default(), 7000)
            .unwrap();
        assert_eq!(order.delivered_at, Some(6000));
    }

    #[test]
    fn test_cancelled_reachable_and_appends_history() {
        let mut order = pending_order();
        apply_status_update(&mut order, OrderStatus::Cancelled, ShipmentPatch::default(), 2000)
            .unwrap();
        assert_eq!(order.status, OrderStatus::Cancelled);
        assert_eq!(order.status_history.len(), 2);
    }

    #[test]
    fn test_empty_patch_values_do_not_clobber() {
        let mut order = pending_order();
        apply_status_update(
            &mut order,
            OrderStatus::Processing,
            ShipmentPatch {
                courier_name: Some("DTDC".to_string()),
                tracking_id: Some("C9".to_string()),
                tracking_url: None,
            },
            2000,
        )
        .unwrap();

        apply_status_update(
            &mut order,
            OrderStatus::Processing,
            ShipmentPatch {
                courier_name: Some("   ".to_string()),
                tracking_id: None,
                tracking_url: None,
            },
            3000,
        )
        .unwrap();
        assert_eq!(order.shipment.courier_name.as_deref(), Some("DTDC"));
        assert_eq!(order.shipment.tracking_id.as_deref(), Some("C9"));
    }
}
