//! Order flow integration tests against an in-memory SurrealDB
//! Run: cargo test -p storefront-server --test order_flow

use storefront_server::core::MerchantConfig;
use storefront_server::db::DbService;
use storefront_server::db::models::{
    Cart, CartItem, CouponCreate, Order, OrderStatus, PaymentMethod, PaymentStatus,
    ProductCategory, ProductCreate, StatusEntry,
};
use storefront_server::db::repository::{
    CartRepository, CouponRepository, OrderRepository, ProductRepository, RepoError,
};
use storefront_server::orders::{
    CreateOrderInput, OrderItemInput, OrderService, UpdateStatusInput,
};
use storefront_server::utils::AppError;

const BUYER: &str = "user:alice";
const NOW_PLUS_DAY: i64 = 2_000_000_000_000; // far future, millis

fn merchant() -> MerchantConfig {
    MerchantConfig {
        upi_vpa: "merchant@upi".to_string(),
        upi_name: "Fight Wisdom".to_string(),
    }
}

async fn setup() -> (DbService, OrderService) {
    let db = DbService::new_memory().await.expect("in-memory db");
    let service = OrderService::new(db.db.clone(), merchant());
    (db, service)
}

async fn seed_product(db: &DbService, name: &str, price: f64, stock: i32) -> String {
    let repo = ProductRepository::new(db.db.clone());
    let product = repo
        .create(ProductCreate {
            name: name.to_string(),
            description: None,
            price,
            stock,
            category: ProductCategory::Streetwear,
            image: None,
        })
        .await
        .expect("seed product");
    product.id.expect("product id").key().to_string()
}

async fn seed_coupon(db: &DbService, code: &str, discount: f64, min_amount: f64) {
    let repo = CouponRepository::new(db.db.clone());
    repo.create(CouponCreate {
        code: code.to_string(),
        discount,
        expiration: NOW_PLUS_DAY,
        min_amount: Some(min_amount),
        is_active: Some(true),
    })
    .await
    .expect("seed coupon");
}

fn order_input(product: &str, qty: i32, method: PaymentMethod, coupon: Option<&str>) -> CreateOrderInput {
    CreateOrderInput {
        items: vec![OrderItemInput {
            product: product.to_string(),
            qty,
            // Forged client price; must never be trusted
            price: Some(0.01),
        }],
        payment_method: method,
        coupon_code: coupon.map(str::to_string),
        shipping_address: None,
    }
}

#[tokio::test]
async fn create_order_recomputes_totals_from_catalog() {
    let (db, service) = setup().await;
    let p1 = seed_product(&db, "Hoodie", 25.0, 10).await;

    let order = service
        .create_order(BUYER, order_input(&p1, 2, PaymentMethod::Cod, None))
        .await
        .expect("create order");

    assert_eq!(order.subtotal, 50.0);
    assert_eq!(order.discount_amount, 0.0);
    assert_eq!(order.total, 50.0);
    assert_eq!(order.user, BUYER);
    assert_eq!(order.status, OrderStatus::Pending);

    // Human-facing number: 15 digits, no leading zero
    assert_eq!(order.order_no.len(), 15);
    assert!(order.order_no.bytes().all(|b| b.is_ascii_digit()));
    assert!(!order.order_no.starts_with('0'));

    // History seeded with the initial Pending entry
    assert_eq!(order.status_history.len(), 1);
    assert_eq!(order.status_history[0].status, OrderStatus::Pending);

    // COD: no payment sub-flow fields
    assert_eq!(order.payment_status, None);
    assert_eq!(order.upi_uri, None);

    // Stock decremented by the ordered quantity
    let product = ProductRepository::new(db.db.clone())
        .find_by_id(&p1)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(product.stock, 8);
}

#[tokio::test]
async fn create_order_applies_coupon() {
    let (db, service) = setup().await;
    let p1 = seed_product(&db, "Hoodie", 25.0, 10).await;
    seed_coupon(&db, "SAVE10", 10.0, 10.0).await;

    let order = service
        .create_order(BUYER, order_input(&p1, 2, PaymentMethod::Cod, Some("SAVE10")))
        .await
        .expect("create order");

    assert_eq!(order.subtotal, 50.0);
    assert_eq!(order.discount_amount, 5.0);
    assert_eq!(order.total, 45.0);
    assert!(order.coupon.is_some());
}

#[tokio::test]
async fn coupon_below_minimum_yields_no_discount() {
    let (db, service) = setup().await;
    let p1 = seed_product(&db, "Hoodie", 25.0, 10).await;
    seed_coupon(&db, "BIG", 10.0, 100.0).await;

    let order = service
        .create_order(BUYER, order_input(&p1, 2, PaymentMethod::Cod, Some("BIG")))
        .await
        .expect("create order");

    assert_eq!(order.discount_amount, 0.0);
    assert_eq!(order.total, 50.0);
}

#[tokio::test]
async fn online_order_carries_upi_uri_and_pending_payment() {
    let (db, service) = setup().await;
    let p1 = seed_product(&db, "Hoodie", 25.0, 10).await;
    seed_coupon(&db, "SAVE10", 10.0, 10.0).await;

    let order = service
        .create_order(BUYER, order_input(&p1, 2, PaymentMethod::Online, Some("SAVE10")))
        .await
        .expect("create order");

    assert_eq!(order.payment_status, Some(PaymentStatus::Pending));
    let uri = order.upi_uri.expect("upi uri");
    assert!(uri.starts_with("upi://pay?pa=merchant%40upi&pn=Fight%20Wisdom"));
    assert!(uri.contains("&am=45.00&cu=INR&tn=Order%20"));
    assert!(uri.ends_with(&order.order_no));
}

#[tokio::test]
async fn unresolvable_items_are_stored_but_do_not_price() {
    let (db, service) = setup().await;
    let p1 = seed_product(&db, "Hoodie", 25.0, 10).await;

    let input = CreateOrderInput {
        items: vec![
            OrderItemInput {
                product: p1.clone(),
                qty: 1,
                price: None,
            },
            OrderItemInput {
                product: "product:doesnotexist".to_string(),
                qty: 3,
                price: Some(999.0),
            },
        ],
        payment_method: PaymentMethod::Cod,
        coupon_code: None,
        shipping_address: None,
    };

    let order = service.create_order(BUYER, input).await.expect("create order");

    // Both items stored as submitted, only the resolvable one priced
    assert_eq!(order.items.len(), 2);
    assert_eq!(order.subtotal, 25.0);
    assert_eq!(order.total, 25.0);
}

#[tokio::test]
async fn empty_item_list_is_rejected() {
    let (_db, service) = setup().await;
    let err = service
        .create_order(
            BUYER,
            CreateOrderInput {
                items: vec![],
                payment_method: PaymentMethod::Cod,
                coupon_code: None,
                shipping_address: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn stock_never_goes_negative() {
    let (db, service) = setup().await;
    let p1 = seed_product(&db, "Last One", 25.0, 1).await;

    service
        .create_order(BUYER, order_input(&p1, 5, PaymentMethod::Cod, None))
        .await
        .expect("create order");

    let product = ProductRepository::new(db.db.clone())
        .find_by_id(&p1)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(product.stock, 0);
}

#[tokio::test]
async fn order_no_unique_index_rejects_duplicates() {
    let (db, service) = setup().await;
    let p1 = seed_product(&db, "Hoodie", 25.0, 10).await;

    let first = service
        .create_order(BUYER, order_input(&p1, 1, PaymentMethod::Cod, None))
        .await
        .expect("create order");

    // Re-inserting the same human-facing number must hit the unique index
    let repo = OrderRepository::new(db.db.clone());
    let mut clone = first.clone();
    clone.id = None;
    let err = repo.create(clone).await.unwrap_err();
    assert!(matches!(err, RepoError::Duplicate(_)));
}

#[tokio::test]
async fn preview_coupon_against_cart() {
    let (db, service) = setup().await;
    let p1 = seed_product(&db, "Hoodie", 25.0, 10).await;
    seed_coupon(&db, "SAVE10", 10.0, 10.0).await;

    // Cart: 2 × 25.00
    let carts = CartRepository::new(db.db.clone());
    let mut cart = Cart::empty(BUYER, 0);
    cart.items.push(CartItem {
        product: surrealdb::RecordId::from_table_key("product", p1.clone()),
        qty: 2,
    });
    carts.save(cart).await.expect("save cart");

    let discount = service.preview_coupon(BUYER, "SAVE10").await.expect("preview");
    assert_eq!(discount, 5.0);

    // Unknown code is an error, not a silent zero
    let err = service.preview_coupon(BUYER, "NOPE").await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    // Inapplicable coupon (minimum too high) is an error as well
    seed_coupon(&db, "BIG", 10.0, 1000.0).await;
    let err = service.preview_coupon(BUYER, "BIG").await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn status_flow_ships_and_delivers() {
    let (db, service) = setup().await;
    let p1 = seed_product(&db, "Hoodie", 25.0, 10).await;

    let order = service
        .create_order(BUYER, order_input(&p1, 1, PaymentMethod::Cod, None))
        .await
        .expect("create order");
    let id = order.id.clone().unwrap().key().to_string();

    // Shipped without shipment data is rejected
    let err = service
        .update_status(
            &id,
            UpdateStatusInput {
                status: OrderStatus::Shipped,
                courier_name: None,
                tracking_id: None,
                tracking_url: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let order = service
        .update_status(
            &id,
            UpdateStatusInput {
                status: OrderStatus::Processing,
                courier_name: None,
                tracking_id: None,
                tracking_url: None,
            },
        )
        .await
        .expect("processing");
    assert_eq!(order.status_history.len(), 2);

    let order = service
        .update_status(
            &id,
            UpdateStatusInput {
                status: OrderStatus::Shipped,
                courier_name: Some("BlueDart".to_string()),
                tracking_id: Some("AWB42".to_string()),
                tracking_url: None,
            },
        )
        .await
        .expect("shipped");
    assert_eq!(order.status, OrderStatus::Shipped);
    assert!(order.shipped_at.is_some());
    assert_eq!(
        order.shipment.tracking_url.as_deref(),
        Some("https://www.bluedart.com/track?track=AWB42")
    );

    let shipped_at = order.shipped_at;
    let order = service
        .update_status(
            &id,
            UpdateStatusInput {
                status: OrderStatus::Delivered,
                courier_name: None,
                tracking_id: None,
                tracking_url: None,
            },
        )
        .await
        .expect("delivered");
    assert_eq!(order.status, OrderStatus::Delivered);
    assert!(order.delivered_at.is_some());
    // Shipment info persists through Delivered, shipped_at unchanged
    assert_eq!(order.shipment.courier_name.as_deref(), Some("BlueDart"));
    assert_eq!(order.shipped_at, shipped_at);
    assert_eq!(order.status_history.len(), 4);

    let statuses: Vec<OrderStatus> = order
        .status_history
        .iter()
        .map(|StatusEntry { status, .. }| *status)
        .collect();
    assert_eq!(
        statuses,
        vec![
            OrderStatus::Pending,
            OrderStatus::Processing,
            OrderStatus::Shipped,
            OrderStatus::Delivered
        ]
    );
}

#[tokio::test]
async fn payment_flow_submit_then_verify() {
    let (db, service) = setup().await;
    let p1 = seed_product(&db, "Hoodie", 25.0, 10).await;

    let order = service
        .create_order(BUYER, order_input(&p1, 2, PaymentMethod::Online, None))
        .await
        .expect("create order");
    let id = order.id.clone().unwrap().key().to_string();

    // A stranger cannot submit against this order
    let err = service
        .submit_payment(&id, "user:mallory", "UTR123")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let order = service
        .submit_payment(&id, BUYER, " UTR123 ")
        .await
        .expect("submit");
    assert_eq!(order.payment_status, Some(PaymentStatus::Submitted));
    assert_eq!(order.transaction_id.as_deref(), Some("UTR123"));

    // Move fulfillment forward, then verify: payment must not touch it
    service
        .update_status(
            &id,
            UpdateStatusInput {
                status: OrderStatus::Processing,
                courier_name: None,
                tracking_id: None,
                tracking_url: None,
            },
        )
        .await
        .expect("processing");

    let order = service
        .verify_payment(&id, true, Some("UTR123"))
        .await
        .expect("verify");
    assert_eq!(order.payment_status, Some(PaymentStatus::Paid));
    assert_eq!(order.transaction_id.as_deref(), Some("UTR123"));
    assert_eq!(order.status, OrderStatus::Processing);

    let order = service.verify_payment(&id, false, None).await.expect("verify");
    assert_eq!(order.payment_status, Some(PaymentStatus::Failed));
}

#[tokio::test]
async fn get_order_is_owner_or_admin_only() {
    let (db, service) = setup().await;
    let p1 = seed_product(&db, "Hoodie", 25.0, 10).await;

    let order = service
        .create_order(BUYER, order_input(&p1, 1, PaymentMethod::Cod, None))
        .await
        .expect("create order");
    let id = order.id.clone().unwrap().key().to_string();

    assert!(service.get_order(&id, BUYER, false).await.is_ok());
    assert!(service.get_order(&id, "user:admin", true).await.is_ok());

    let err = service.get_order(&id, "user:mallory", false).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn on_disk_database_round_trip() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let db_path = tmp.path().join("storefront.db");
    let db = DbService::new(&db_path.to_string_lossy())
        .await
        .expect("on-disk db");
    let service = OrderService::new(db.db.clone(), merchant());

    let p1 = seed_product(&db, "Hoodie", 25.0, 10).await;
    let order = service
        .create_order(BUYER, order_input(&p1, 1, PaymentMethod::Cod, None))
        .await
        .expect("create order");

    let found = OrderRepository::new(db.db.clone())
        .find_by_order_no(&order.order_no)
        .await
        .expect("query")
        .expect("order present");
    assert_eq!(found.total, 25.0);
}

#[tokio::test]
async fn buyer_order_listing_is_scoped() {
    let (db, service) = setup().await;
    let p1 = seed_product(&db, "Hoodie", 25.0, 10).await;

    service
        .create_order(BUYER, order_input(&p1, 1, PaymentMethod::Cod, None))
        .await
        .expect("order 1");
    service
        .create_order("user:bob", order_input(&p1, 1, PaymentMethod::Cod, None))
        .await
        .expect("order 2");

    let mine: Vec<Order> = service.list_for_user(BUYER).await.expect("list");
    assert_eq!(mine.len(), 1);
    assert!(mine.iter().all(|o| o.user == BUYER));

    let all = service.list_all().await.expect("list all");
    assert_eq!(all.len(), 2);
}
