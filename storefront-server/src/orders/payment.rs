//! Online-payment verification sub-flow
//!
//! Two-actor flow over the same order document: the buyer submits a
//! transaction reference after paying through the UPI deep link, an admin
//! verifies it. Payment state never touches fulfillment state.

use crate::db::models::{Order, PaymentMethod, PaymentStatus};
use crate::utils::{AppError, AppResult};
use urlencoding::encode;

/// Build the UPI deep link for an ONLINE order
///
/// `upi://pay?pa=<vpa>&pn=<name>&am=<total>&cu=INR&tn=Order <order_no>`
pub fn build_upi_uri(payee_vpa: &str, payee_name: &str, total: f64, order_no: &str) -> String {
    let note = format!("Order {order_no}");
    format!(
        "upi://pay?pa={}&pn={}&am={:.2}&cu=INR&tn={}",
        encode(payee_vpa),
        encode(payee_name),
        total,
        encode(&note),
    )
}

fn require_online(order: &Order) -> AppResult<()> {
    if order.payment_method != PaymentMethod::Online {
        return Err(AppError::validation(
            "Payment references apply to ONLINE orders only",
        ));
    }
    Ok(())
}

/// Buyer submits the transaction reference after paying in their UPI app
///
/// Ownership is required; a missing or foreign order reads the same to the
/// caller. The reference is trimmed and must be non-empty.
pub fn submit_transaction(
    order: &mut Order,
    user_id: &str,
    reference: &str,
    now: i64,
) -> AppResult<()> {
    if order.user != user_id {
        return Err(AppError::not_found("Order not found or not owned by user"));
    }
    require_online(order)?;

    let tx = reference.trim();
    if tx.is_empty() {
        return Err(AppError::validation("transactionId is required"));
    }

    order.transaction_id = Some(tx.to_string());
    order.payment_status = Some(PaymentStatus::Submitted);
    order.updated_at = now;
    Ok(())
}

/// Admin verifies the transaction and marks it Paid or Failed
///
/// A supplied non-empty reference overwrites the stored one. Fulfillment
/// status is never changed here.
pub fn verify_transaction(
    order: &mut Order,
    success: bool,
    reference: Option<&str>,
    now: i64,
) -> AppResult<()> {
    require_online(order)?;

    if let Some(tx) = reference.map(str::trim).filter(|tx| !tx.is_empty()) {
        order.transaction_id = Some(tx.to_string());
    }

    order.payment_status = Some(if success {
        PaymentStatus::Paid
    } else {
        PaymentStatus::Failed
    });
    order.updated_at = now;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::{OrderStatus, Shipment, ShippingAddress, StatusEntry};

    fn online_order() -> Order {
        Order {
            id: None,
            order_no: "987654321098765".to_string(),
            user: "user:alice".to_string(),
            items: vec![],
            subtotal: 45.0,
            discount_amount: 0.0,
            total: 45.0,
            coupon: None,
            payment_method: PaymentMethod::Online,
            upi_uri: Some(build_upi_uri("merchant@upi", "Storefront", 45.0, "987654321098765")),
            payment_status: Some(PaymentStatus::Pending),
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
    fn test_upi_uri_shape() {
        let uri = build_upi_uri("merchant@upi", "Fight Wisdom", 45.0, "123456789012345");
        assert_eq!(
            uri,
            "upi://pay?pa=merchant%40upi&pn=Fight%20Wisdom&am=45.00&cu=INR&tn=Order%20123456789012345"
        );
    }

    #[test]
    fn test_submit_sets_reference_and_status() {
        let mut order = online_order();
        submit_transaction(&mut order, "user:alice", "  UTR123  ", 2000).unwrap();
        assert_eq!(order.transaction_id.as_deref(), Some("UTR123"));
        assert_eq!(order.payment_status, Some(PaymentStatus::Submitted));
    }

    #[test]
    fn test_submit_rejects_foreign_order() {
        let mut order = online_order();
        let err = submit_transaction(&mut order, "user:mallory", "UTR123", 2000).unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(order.payment_status, Some(PaymentStatus::Pending));
    }

    #[test]
    fn test_submit_rejects_blank_reference() {
        let mut order = online_order();
        let err = submit_transaction(&mut order, "user:alice", "   ", 2000).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_verify_marks_paid_and_keeps_fulfillment() {
        let mut order = online_order();
        order.status = OrderStatus::Processing;
        verify_transaction(&mut order, true, Some("UTR123"), 2000).unwrap();
        assert_eq!(order.payment_status, Some(PaymentStatus::Paid));
        assert_eq!(order.transaction_id.as_deref(), Some("UTR123"));
        assert_eq!(order.status, OrderStatus::Processing);
    }

    #[test]
    fn test_verify_failure_keeps_stored_reference() {
        let mut order = online_order();
        order.transaction_id = Some("UTR-OLD".to_string());
        verify_transaction(&mut order, false, None, 2000).unwrap();
        assert_eq!(order.payment_status, Some(PaymentStatus::Failed));
        assert_eq!(order.transaction_id.as_deref(), Some("UTR-OLD"));
    }

    #[test]
    fn test_cod_orders_have_no_payment_flow() {
        let mut order = online_order();
        order.payment_method = PaymentMethod::Cod;
        order.payment_status = None;
        order.upi_uri = None;

        assert!(submit_transaction(&mut order, "user:alice", "UTR1", 2000).is_err());
        assert!(verify_transaction(&mut order, true, None, 2000).is_err());
        assert_eq!(order.payment_status, None);
    }
}
