//! Test fixtures and helpers.
//!
//! Common setup code for integration tests, plus storage doubles that fail
//! or record on demand.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use marketplace_cart::{CartConfig, CartStore, NewItem};
use marketplace_cart_store::{KeyValueStore, MemoryStore, Result, StoreError};

/// A test fixture with a memory-backed cart.
pub struct TestFixture {
    pub storage: Arc<MemoryStore>,
    pub cart: CartStore<Arc<MemoryStore>>,
}

impl TestFixture {
    /// Create a fixture with an empty, initialized cart.
    pub async fn new() -> Self {
        Self::with_storage(Arc::new(MemoryStore::new())).await
    }

    /// Create a fixture over existing storage, hydrating from it.
    pub async fn with_storage(storage: Arc<MemoryStore>) -> Self {
        let cart = CartStore::open(Arc::clone(&storage), CartConfig::default()).await;
        Self { storage, cart }
    }

    /// Reopen a cart over the same storage, as a new session would.
    pub async fn reopen(&self) -> CartStore<Arc<MemoryStore>> {
        CartStore::open(Arc::clone(&self.storage), self.cart.config().clone()).await
    }

    /// The raw payload currently stored for the cart.
    pub async fn stored_payload(&self) -> Option<String> {
        self.storage
            .get(&self.cart.config().storage_key)
            .await
            .ok()
            .flatten()
    }
}

/// A descriptor with the given id and fixed display fields.
pub fn item(id: &str) -> NewItem {
    NewItem::new(id, format!("Product {id}"), format!("https://img/{id}.png"), 10.0)
}

/// A store whose every call fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct FailingStore;

#[async_trait]
impl KeyValueStore for FailingStore {
    async fn get(&self, _key: &str) -> Result<Option<String>> {
        Err(StoreError::Unavailable("failing store".into()))
    }

    async fn set(&self, _key: &str, _value: &str) -> Result<()> {
        Err(StoreError::Unavailable("failing store".into()))
    }

    async fn remove(&self, _key: &str) -> Result<()> {
        Err(StoreError::Unavailable("failing store".into()))
    }
}

/// An in-memory store that records every write and can delay them.
///
/// Delays are consumed in order, one per `set`; once exhausted, writes
/// complete immediately.
#[derive(Debug, Default)]
pub struct RecordingStore {
    inner: MemoryStore,
    writes: Mutex<Vec<(String, String)>>,
    delays: Mutex<Vec<Duration>>,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay the next writes by the given durations, in order.
    pub fn with_write_delays(delays: impl IntoIterator<Item = Duration>) -> Self {
        let mut delays: Vec<Duration> = delays.into_iter().collect();
        delays.reverse();
        Self {
            delays: Mutex::new(delays),
            ..Self::default()
        }
    }

    /// Every `(key, value)` written so far, in completion order.
    pub fn writes(&self) -> Vec<(String, String)> {
        self.writes.lock().map(|w| w.clone()).unwrap_or_default()
    }

    fn next_delay(&self) -> Option<Duration> {
        self.delays.lock().ok().and_then(|mut d| d.pop())
    }
}

#[async_trait]
impl KeyValueStore for RecordingStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        if let Some(delay) = self.next_delay() {
            tokio::time::sleep(delay).await;
        }
        self.inner.set(key, value).await?;
        if let Ok(mut writes) = self.writes.lock() {
            writes.push((key.to_string(), value.to_string()));
        }
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.inner.remove(key).await
    }
}
