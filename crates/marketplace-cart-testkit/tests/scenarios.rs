//! End-to-end cart scenarios over the public API.

use std::sync::Arc;

use marketplace_cart::core::{decode, encode};
use marketplace_cart::store::{KeyValueStore, MemoryStore, SqliteStore};
use marketplace_cart::{
    CartConfig, CartError, CartProvider, CartStore, Hydration, NewItem, Persisted,
    DEFAULT_STORAGE_KEY,
};
use marketplace_cart_testkit::{item, FailingStore, TestFixture};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing_subscriber::filter::LevelFilter::DEBUG)
        .try_init();
}

#[tokio::test]
async fn add_to_empty_cart() {
    init_tracing();
    let fixture = TestFixture::new().await;

    fixture
        .cart
        .add_to_cart(NewItem::new("p1", "Shirt", "u", 10.0))
        .await
        .unwrap();

    let snapshot = fixture.cart.snapshot();
    assert_eq!(snapshot.len(), 1);
    let line = &snapshot.items()[0];
    assert_eq!(line.id, "p1");
    assert_eq!(line.title, "Shirt");
    assert_eq!(line.image_url, "u");
    assert_eq!(line.price, 10.0);
    assert_eq!(line.quantity, 1);
}

#[tokio::test]
async fn increment_existing_line() {
    let fixture = TestFixture::new().await;
    fixture.cart.add_to_cart(item("p1")).await.unwrap();

    fixture.cart.increment("p1").await;

    assert_eq!(fixture.cart.snapshot().quantity_of("p1"), Some(2));
}

#[tokio::test]
async fn decrement_last_unit_removes_line() {
    let fixture = TestFixture::new().await;
    fixture.cart.add_to_cart(item("p1")).await.unwrap();

    fixture.cart.decrement("p1").await;

    assert!(fixture.cart.snapshot().is_empty());
    assert_eq!(fixture.stored_payload().await.as_deref(), Some("[]"));
}

#[tokio::test]
async fn restores_previous_session_exactly() {
    let payload = r#"[{"id":"p1","title":"Shirt","image_url":"u","price":10.0,"quantity":3}]"#;
    let storage = Arc::new(MemoryStore::with_entries([(DEFAULT_STORAGE_KEY, payload)]));

    let fixture = TestFixture::with_storage(storage).await;

    assert_eq!(*fixture.cart.snapshot(), decode(payload).unwrap());
}

#[tokio::test]
async fn new_session_sees_last_write() {
    let fixture = TestFixture::new().await;
    fixture.cart.add_to_cart(item("p1")).await.unwrap();
    fixture.cart.add_to_cart(item("p2")).await.unwrap();
    fixture.cart.add_to_cart(item("p1")).await.unwrap();
    fixture.cart.decrement("p2").await;

    let next_session = fixture.reopen().await;

    assert_eq!(next_session.snapshot(), fixture.cart.snapshot());
    assert_eq!(next_session.snapshot().quantity_of("p1"), Some(2));
    assert!(!next_session.snapshot().contains("p2"));
}

#[tokio::test]
async fn stored_payload_matches_memory_after_each_mutation() {
    let fixture = TestFixture::new().await;

    async fn check(fixture: &TestFixture, persisted: Persisted) {
        assert_eq!(persisted, Persisted::Written);
        let stored = fixture.stored_payload().await.unwrap();
        assert_eq!(stored, encode(&fixture.cart.snapshot()).unwrap());
    }

    let m = fixture.cart.add_to_cart(item("p1")).await.unwrap();
    check(&fixture, m.persisted).await;
    let m = fixture.cart.add_to_cart(item("p2")).await.unwrap();
    check(&fixture, m.persisted).await;
    let m = fixture.cart.increment("p2").await;
    check(&fixture, m.persisted).await;
    let m = fixture.cart.decrement("p1").await;
    check(&fixture, m.persisted).await;
    let m = fixture.cart.decrement("nope").await;
    check(&fixture, m.persisted).await;
}

#[tokio::test]
async fn broken_storage_never_breaks_the_session() {
    init_tracing();
    let cart = CartStore::new(FailingStore, CartConfig::default());
    assert_eq!(cart.initialize().await, Hydration::Unavailable);

    cart.add_to_cart(item("p1")).await.unwrap();
    cart.add_to_cart(item("p1")).await.unwrap();
    let mutation = cart.decrement("p1").await;

    assert_eq!(mutation.persisted, Persisted::Failed);
    assert_eq!(cart.snapshot().quantity_of("p1"), Some(1));
    assert!(matches!(cart.flush().await, Err(CartError::Store(_))));
}

#[tokio::test]
async fn corrupt_payload_is_treated_as_no_cart() {
    let storage = Arc::new(MemoryStore::with_entries([(DEFAULT_STORAGE_KEY, "[{\"id\":")]));

    let cart = CartStore::new(Arc::clone(&storage), CartConfig::default());
    assert_eq!(cart.initialize().await, Hydration::Discarded);
    assert!(cart.snapshot().is_empty());

    // The next mutation overwrites the corrupt payload.
    cart.add_to_cart(item("p1")).await.unwrap();
    let stored = storage.get(DEFAULT_STORAGE_KEY).await.unwrap().unwrap();
    assert_eq!(decode(&stored).unwrap().quantity_of("p1"), Some(1));
}

#[tokio::test]
async fn provider_hands_out_one_cart() {
    let provider = CartProvider::new();
    assert!(matches!(provider.cart(), Err(CartError::NotProvided)));

    let storage = SqliteStore::open_memory().unwrap();
    provider.provide(Arc::new(CartStore::open(storage, CartConfig::default()).await));

    let header = provider.clone();
    let product_page = provider.clone();

    product_page
        .cart()
        .unwrap()
        .add_to_cart(item("p1"))
        .await
        .unwrap();

    let badge = header.cart().unwrap().snapshot().total_quantity();
    assert_eq!(badge, 1);
}

#[tokio::test]
async fn observers_see_every_change() {
    let fixture = TestFixture::new().await;
    let mut subscription = fixture.cart.subscribe();

    fixture.cart.add_to_cart(item("p1")).await.unwrap();
    let first = subscription.changed().await.unwrap();

    fixture.cart.increment("p1").await;
    let second = subscription.changed().await.unwrap();

    assert!(!Arc::ptr_eq(&first, &second));
    assert_eq!(first.quantity_of("p1"), Some(1));
    assert_eq!(second.quantity_of("p1"), Some(2));
}
