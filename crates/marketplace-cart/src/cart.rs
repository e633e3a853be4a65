//! The CartStore: the live cart for a session.
//!
//! The store owns the authoritative in-memory [`CartState`] and mirrors it
//! to a [`KeyValueStore`] after every change. In-memory state is updated and
//! published before any storage I/O is awaited, so observers see a change
//! immediately regardless of storage latency.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use marketplace_cart_core::{codec, CartState, NewItem};
use marketplace_cart_store::KeyValueStore;
use tokio::sync::{watch, Mutex};
use tracing::instrument;

use crate::error::{CartError, Result};

/// Storage key the cart payload lives under.
pub const DEFAULT_STORAGE_KEY: &str = "@GoMarketplace:products";

/// Configuration for a [`CartStore`].
#[derive(Debug, Clone)]
pub struct CartConfig {
    /// Key the encoded cart is read from and written to.
    pub storage_key: String,
    /// Whether mutations are written through to storage.
    pub persist: bool,
}

impl CartConfig {
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    /// A configuration that never writes to storage.
    pub fn in_memory() -> Self {
        Self {
            persist: false,
            ..Self::default()
        }
    }
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            persist: true,
        }
    }
}

/// Outcome of restoring the cart from storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Hydration {
    /// A saved cart was found and replaced the in-memory one.
    Restored {
        /// Number of lines restored.
        items: usize,
    },
    /// Nothing was saved under the storage key.
    Empty,
    /// A payload was found but could not be decoded; it was ignored.
    Discarded,
    /// Storage could not be read.
    Unavailable,
    /// The store was already initialized.
    Skipped,
}

/// Whether a mutation reached storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Persisted {
    /// The latest cart was written.
    Written,
    /// Persistence is disabled in the configuration.
    Skipped,
    /// The write failed and was logged.
    Failed,
}

/// Result of a cart mutation.
#[derive(Debug, Clone)]
pub struct Mutation {
    /// The snapshot this mutation published.
    pub snapshot: Arc<CartState>,
    /// What happened to the write-through.
    pub persisted: Persisted,
}

/// The live cart, backed by a key-value store.
///
/// Share it across call sites with an `Arc` or a
/// [`CartProvider`](crate::CartProvider).
pub struct CartStore<S: KeyValueStore> {
    /// The storage backend.
    store: S,
    /// Configuration.
    config: CartConfig,
    /// Current snapshot, and the channel observers subscribe to.
    state: watch::Sender<Arc<CartState>>,
    /// Serializes writes so the last one to land carries the latest cart.
    write_lock: Mutex<()>,
    /// Set once hydration has started.
    initialized: AtomicBool,
}

/// A cart store over a type-erased backend.
pub type DynCartStore = CartStore<Arc<dyn KeyValueStore>>;

impl<S: KeyValueStore> CartStore<S> {
    /// Create an empty cart store. Call [`initialize`](Self::initialize) to
    /// restore the saved cart.
    pub fn new(store: S, config: CartConfig) -> Self {
        let (state, _) = watch::channel(Arc::new(CartState::new()));
        Self {
            store,
            config,
            state,
            write_lock: Mutex::new(()),
            initialized: AtomicBool::new(false),
        }
    }

    /// Create a cart store and restore the saved cart.
    pub async fn open(store: S, config: CartConfig) -> Self {
        let cart = Self::new(store, config);
        cart.initialize().await;
        cart
    }

    /// Get the configuration.
    pub fn config(&self) -> &CartConfig {
        &self.config
    }

    /// Get the storage backend.
    pub fn store(&self) -> &S {
        &self.store
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Hydration
    // ─────────────────────────────────────────────────────────────────────────

    /// Restore the cart from storage.
    ///
    /// A decodable payload replaces the in-memory cart wholesale and is
    /// published to observers. A missing, unreadable, or undecodable payload
    /// leaves the cart as it is. Only the first call does any work.
    #[instrument(skip(self), fields(key = %self.config.storage_key))]
    pub async fn initialize(&self) -> Hydration {
        if self.initialized.swap(true, Ordering::SeqCst) {
            return Hydration::Skipped;
        }

        let payload = match self.store.get(&self.config.storage_key).await {
            Ok(Some(payload)) => payload,
            Ok(None) => {
                tracing::info!("no saved cart");
                return Hydration::Empty;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to read saved cart");
                return Hydration::Unavailable;
            }
        };

        match codec::decode(&payload) {
            Ok(restored) => {
                let items = restored.len();
                self.state.send_replace(Arc::new(restored));
                tracing::info!(items, "restored saved cart");
                Hydration::Restored { items }
            }
            Err(e) => {
                tracing::warn!(error = %e, "discarding undecodable saved cart");
                Hydration::Discarded
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Observation
    // ─────────────────────────────────────────────────────────────────────────

    /// The current cart.
    pub fn snapshot(&self) -> Arc<CartState> {
        self.state.borrow().clone()
    }

    /// Subscribe to cart changes.
    pub fn subscribe(&self) -> CartSubscription {
        CartSubscription {
            rx: self.state.subscribe(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Add one unit of a product.
    ///
    /// A product already in the cart has its quantity raised by one; the
    /// descriptor's other fields are ignored. A new product is appended with
    /// quantity 1.
    #[instrument(skip(self, item), fields(id = %item.id))]
    pub async fn add_to_cart(&self, item: NewItem) -> Result<Mutation> {
        if item.id.is_empty() {
            return Err(CartError::InvalidItem("item id must not be empty".into()));
        }
        if !item.price.is_finite() {
            return Err(CartError::InvalidItem(format!(
                "item {} has non-finite price {}",
                item.id, item.price
            )));
        }

        let snapshot = self.apply(|current| current.with_added(item));
        Ok(self.write_through(snapshot).await)
    }

    /// Add one unit to the line with this id.
    ///
    /// An unknown id leaves the cart unchanged but still publishes and
    /// persists it.
    #[instrument(skip(self))]
    pub async fn increment(&self, id: &str) -> Mutation {
        let snapshot = self.apply(|current| current.with_incremented(id));
        self.write_through(snapshot).await
    }

    /// Remove one unit from the line with this id, dropping the line when it
    /// reaches zero.
    ///
    /// An unknown id leaves the cart unchanged but still publishes and
    /// persists it.
    #[instrument(skip(self))]
    pub async fn decrement(&self, id: &str) -> Mutation {
        let snapshot = self.apply(|current| current.with_decremented(id));
        self.write_through(snapshot).await
    }

    /// Write the current cart to storage, reporting any failure.
    pub async fn flush(&self) -> Result<()> {
        self.write_latest().await
    }

    /// Compute the next cart from the current one and publish it.
    ///
    /// Runs under the channel's lock, so concurrent callers each see the
    /// previous caller's result.
    fn apply(&self, next: impl FnOnce(&CartState) -> CartState) -> Arc<CartState> {
        let mut published = Arc::default();
        self.state.send_modify(|current| {
            *current = Arc::new(next(current));
            published = Arc::clone(current);
        });
        tracing::debug!(items = published.len(), "published cart");
        published
    }

    async fn write_through(&self, snapshot: Arc<CartState>) -> Mutation {
        if !self.config.persist {
            return Mutation {
                snapshot,
                persisted: Persisted::Skipped,
            };
        }

        let persisted = match self.write_latest().await {
            Ok(()) => Persisted::Written,
            Err(e) => {
                tracing::warn!(error = %e, "failed to persist cart; keeping in-memory state");
                Persisted::Failed
            }
        };

        Mutation {
            snapshot,
            persisted,
        }
    }

    /// Encode and store whatever the cart is when the write lock is acquired.
    ///
    /// Writes are serialized and each one reads the snapshot only after it
    /// holds the lock, so the final stored payload always matches the final
    /// in-memory cart.
    async fn write_latest(&self) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let latest = self.snapshot();
        let payload = codec::encode(&latest)?;
        self.store.set(&self.config.storage_key, &payload).await?;
        Ok(())
    }
}

impl<S: KeyValueStore> std::fmt::Debug for CartStore<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("config", &self.config)
            .field("items", &self.state.borrow().len())
            .finish_non_exhaustive()
    }
}

/// A handle that observes cart changes.
#[derive(Debug, Clone)]
pub struct CartSubscription {
    rx: watch::Receiver<Arc<CartState>>,
}

impl CartSubscription {
    /// The latest published cart.
    pub fn current(&self) -> Arc<CartState> {
        self.rx.borrow().clone()
    }

    /// Wait for the next published cart.
    pub async fn changed(&mut self) -> Result<Arc<CartState>> {
        self.rx.changed().await.map_err(|_| CartError::Closed)?;
        Ok(self.rx.borrow_and_update().clone())
    }
}
