//! Integration tests for the product/order/settings stores.
//!
//! Exercises the repository layer against a real database: conditional
//! hold acquisition, snapshot decoupling from live products, expiry CAS,
//! and settings singleton semantics.

use sqlx::PgPool;

use rnr_db::models::order::{CreateOrderItem, CustomerInput};
use rnr_db::models::product::{CreateProduct, UpdateProduct};
use rnr_db::repositories::{OrderRepo, ProductRepo, SettingsRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_product(name: &str) -> CreateProduct {
    CreateProduct {
        name: name.to_string(),
        garment_type: "jacket".to_string(),
        size: "M".to_string(),
        category: "outerwear".to_string(),
        price: 18.5,
        image: "/img/p.jpg".to_string(),
        images: vec!["/img/p.jpg".to_string()],
        badge: None,
        description: None,
        featured: None,
    }
}

fn customer() -> CustomerInput {
    CustomerInput {
        name: "Rana".to_string(),
        phone: "+962791234567".to_string(),
        notes: None,
    }
}

fn item_for(product_id: i64, name: &str, price: f64) -> CreateOrderItem {
    CreateOrderItem {
        product_id,
        name: name.to_string(),
        price,
        image: "/img/p.jpg".to_string(),
        quantity: 1,
    }
}

// ---------------------------------------------------------------------------
// Products
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn test_product_crud_roundtrip(pool: PgPool) {
    let created = ProductRepo::create(&pool, &new_product("Denim Jacket"))
        .await
        .unwrap();
    assert!(!created.sold);
    assert!(!created.reserved);
    assert!(!created.featured);

    let found = ProductRepo::find_by_id(&pool, created.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.name, "Denim Jacket");

    let updated = ProductRepo::update(
        &pool,
        created.id,
        &UpdateProduct {
            price: Some(22.0),
            featured: Some(true),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(updated.price, 22.0);
    assert!(updated.featured);
    // Untouched fields survive the partial update.
    assert_eq!(updated.name, "Denim Jacket");

    assert!(ProductRepo::delete(&pool, created.id).await.unwrap());
    assert!(ProductRepo::find_by_id(&pool, created.id)
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test]
async fn test_update_missing_product_returns_none(pool: PgPool) {
    let result = ProductRepo::update(&pool, 9999, &UpdateProduct::default())
        .await
        .unwrap();
    assert!(result.is_none());
}

#[sqlx::test]
async fn test_try_hold_only_succeeds_once(pool: PgPool) {
    let product = ProductRepo::create(&pool, &new_product("Wool Coat"))
        .await
        .unwrap();

    assert!(ProductRepo::try_hold(&pool, product.id).await.unwrap());
    // Second hold on the same unit must see zero affected rows.
    assert!(!ProductRepo::try_hold(&pool, product.id).await.unwrap());

    assert!(ProductRepo::release_hold(&pool, product.id).await.unwrap());
    // Release is idempotent.
    assert!(!ProductRepo::release_hold(&pool, product.id).await.unwrap());

    // Hold succeeds again after release.
    assert!(ProductRepo::try_hold(&pool, product.id).await.unwrap());
}

#[sqlx::test]
async fn test_sold_product_cannot_be_held(pool: PgPool) {
    let product = ProductRepo::create(&pool, &new_product("Silk Scarf"))
        .await
        .unwrap();
    assert!(ProductRepo::mark_sold(&pool, product.id).await.unwrap());

    assert!(!ProductRepo::try_hold(&pool, product.id).await.unwrap());

    let row = ProductRepo::find_by_id(&pool, product.id)
        .await
        .unwrap()
        .unwrap();
    assert!(row.sold);
    assert!(!row.reserved);
}

// ---------------------------------------------------------------------------
// Orders
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn test_order_insert_and_snapshot_survives_product_deletion(pool: PgPool) {
    let product = ProductRepo::create(&pool, &new_product("Corduroy Pants"))
        .await
        .unwrap();

    let until = chrono::Utc::now() + chrono::Duration::days(2);
    let mut tx = pool.begin().await.unwrap();
    let order = OrderRepo::insert_order(&mut *tx, &customer(), 18.5, 18.5, until)
        .await
        .unwrap();
    OrderRepo::insert_items(
        &mut tx,
        order.id,
        &[item_for(product.id, &product.name, product.price)],
    )
    .await
    .unwrap();
    tx.commit().await.unwrap();

    assert_eq!(order.status, "reserved");

    // Deleting the product must not disturb the order's snapshot.
    assert!(ProductRepo::delete(&pool, product.id).await.unwrap());

    let full = OrderRepo::find_with_items(&pool, order.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(full.items.len(), 1);
    assert_eq!(full.items[0].name, "Corduroy Pants");
    assert_eq!(full.items[0].product_id, product.id);
}

#[sqlx::test]
async fn test_list_with_items_newest_first(pool: PgPool) {
    let p1 = ProductRepo::create(&pool, &new_product("A")).await.unwrap();
    let p2 = ProductRepo::create(&pool, &new_product("B")).await.unwrap();

    let until = chrono::Utc::now() + chrono::Duration::days(1);
    for p in [&p1, &p2] {
        let mut tx = pool.begin().await.unwrap();
        let order = OrderRepo::insert_order(&mut *tx, &customer(), p.price, p.price, until)
            .await
            .unwrap();
        OrderRepo::insert_items(&mut tx, order.id, &[item_for(p.id, &p.name, p.price)])
            .await
            .unwrap();
        tx.commit().await.unwrap();
    }

    let orders = OrderRepo::list_with_items(&pool).await.unwrap();
    assert_eq!(orders.len(), 2);
    assert!(orders[0].order.id > orders[1].order.id);
    assert_eq!(orders[0].items.len(), 1);
    assert_eq!(orders[1].items.len(), 1);
}

#[sqlx::test]
async fn test_expire_if_due_is_a_cas(pool: PgPool) {
    let until = chrono::Utc::now() - chrono::Duration::hours(1);
    let mut tx = pool.begin().await.unwrap();
    let order = OrderRepo::insert_order(&mut *tx, &customer(), 0.0, 0.0, until)
        .await
        .unwrap();
    tx.commit().await.unwrap();

    let expired = OrderRepo::find_expired_ids(&pool).await.unwrap();
    assert!(expired.contains(&order.id));

    assert!(OrderRepo::expire_if_due(&pool, order.id).await.unwrap());
    // Second attempt loses the CAS.
    assert!(!OrderRepo::expire_if_due(&pool, order.id).await.unwrap());

    let row = OrderRepo::find_by_id(&pool, order.id).await.unwrap().unwrap();
    assert_eq!(row.status, "expired");
}

#[sqlx::test]
async fn test_future_reservation_is_not_due(pool: PgPool) {
    let until = chrono::Utc::now() + chrono::Duration::days(2);
    let mut tx = pool.begin().await.unwrap();
    let order = OrderRepo::insert_order(&mut *tx, &customer(), 0.0, 0.0, until)
        .await
        .unwrap();
    tx.commit().await.unwrap();

    assert!(!OrderRepo::expire_if_due(&pool, order.id).await.unwrap());
    let expired = OrderRepo::find_expired_ids(&pool).await.unwrap();
    assert!(!expired.contains(&order.id));
}

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn test_settings_default_created_on_first_read(pool: PgPool) {
    let settings = SettingsRepo::get_or_init(&pool).await.unwrap();
    assert_eq!(settings.id, 1);
    assert_eq!(settings.reservation_days, 2);
}

#[sqlx::test]
async fn test_settings_update_persists(pool: PgPool) {
    SettingsRepo::get_or_init(&pool).await.unwrap();
    let updated = SettingsRepo::set_reservation_days(&pool, 5).await.unwrap();
    assert_eq!(updated.reservation_days, 5);

    // Subsequent reads keep the configured value.
    let read = SettingsRepo::get_or_init(&pool).await.unwrap();
    assert_eq!(read.reservation_days, 5);
}
