//! The cart store: load-from-storage on construction, three mutating
//! operations, write-through persistence, and a watch-channel subscription
//! for consumers.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{watch, Mutex};
use tracing::warn;

use crate::domain::{Cart, CatalogProduct, ProductId, Stock};
use crate::errors::{CartError, CatalogError, StorageError};
use crate::notify::{CartNotice, NotificationSink};

/// Fixed key the serialized cart blob lives under in the persistent store.
pub const CART_STORAGE_KEY: &str = "trolley:cart";

/// Read access to the remote stock/product catalog. Stock and product are
/// two independent reads with no transactional pairing.
#[async_trait]
pub trait CatalogClient: Send + Sync {
    async fn fetch_stock(&self, id: ProductId) -> Result<Stock, CatalogError>;
    async fn fetch_product(&self, id: ProductId) -> Result<CatalogProduct, CatalogError>;
}

#[async_trait]
impl<T: CatalogClient + ?Sized> CatalogClient for Arc<T> {
    async fn fetch_stock(&self, id: ProductId) -> Result<Stock, CatalogError> {
        (**self).fetch_stock(id).await
    }

    async fn fetch_product(&self, id: ProductId) -> Result<CatalogProduct, CatalogError> {
        (**self).fetch_product(id).await
    }
}

/// Synchronous key-value persistence for the cart blob.
pub trait CartStorage: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<T: CartStorage + ?Sized> CartStorage for Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}

/// Cart state manager over injected collaborators.
///
/// The current cart sits behind a mutex that operations hold across their
/// catalog fetches, so overlapping operations on the same product serialize
/// instead of clobbering each other's writes. Consumers observe snapshots
/// through [`CartStore::subscribe`]. Every successful mutation is persisted
/// before the in-memory state and subscribers see it; failure paths leave
/// both untouched and surface exactly one notice through the sink.
pub struct CartStore<C, S, N> {
    catalog: C,
    storage: S,
    sink: N,
    state: Mutex<Cart>,
    publisher: watch::Sender<Cart>,
}

impl<C, S, N> CartStore<C, S, N>
where
    C: CatalogClient,
    S: CartStorage,
    N: NotificationSink,
{
    /// Builds the store from the persisted blob under [`CART_STORAGE_KEY`].
    /// An absent blob yields an empty cart; an unreadable or malformed blob
    /// is treated as recoverable corruption and also yields an empty cart.
    pub fn new(catalog: C, storage: S, sink: N) -> Self {
        let initial = load_initial(&storage);
        let (publisher, _) = watch::channel(initial.clone());
        Self { catalog, storage, sink, state: Mutex::new(initial), publisher }
    }

    /// Snapshot of the current cart.
    pub async fn cart(&self) -> Cart {
        self.state.lock().await.clone()
    }

    /// Reactive consumer contract: receivers wake on every committed
    /// mutation and can borrow the latest snapshot.
    pub fn subscribe(&self) -> watch::Receiver<Cart> {
        self.publisher.subscribe()
    }

    /// Adds one unit of `product_id`, bounded by available stock.
    pub async fn add_product(&self, product_id: ProductId) {
        let mut cart = self.state.lock().await;
        if let Err(error) = self.try_add(&mut cart, product_id).await {
            self.report(product_id, &error, CartNotice::AddFailed);
        }
    }

    /// Removes the whole line for `product_id`, regardless of its amount.
    pub async fn remove_product(&self, product_id: ProductId) {
        let mut cart = self.state.lock().await;
        if let Err(error) = self.try_remove(&mut cart, product_id) {
            self.report(product_id, &error, CartNotice::RemoveFailed);
        }
    }

    /// Sets the line for `product_id` to exactly `amount`, bounded by
    /// available stock. A non-positive `amount` is ignored without a notice;
    /// the UI's decrement control can drive the shown quantity to zero and
    /// the deletion path is removal, not a zero amount.
    pub async fn update_product_amount(&self, product_id: ProductId, amount: i64) {
        if amount <= 0 {
            return;
        }
        let target = u32::try_from(amount).unwrap_or(u32::MAX);

        let mut cart = self.state.lock().await;
        if let Err(error) = self.try_update(&mut cart, product_id, target).await {
            self.report(product_id, &error, CartNotice::UpdateFailed);
        }
    }

    async fn try_add(&self, cart: &mut Cart, product_id: ProductId) -> Result<(), CartError> {
        let stock = self.catalog.fetch_stock(product_id).await?;
        let product = self.catalog.fetch_product(product_id).await?;

        let current = cart.quantity_of(product_id);
        if stock.amount <= current {
            return Err(CartError::OutOfStock { product_id });
        }

        self.commit(cart, cart.with_added_unit(&product))
    }

    fn try_remove(&self, cart: &mut Cart, product_id: ProductId) -> Result<(), CartError> {
        let next = cart.with_removed(product_id).ok_or(CartError::NotInCart { product_id })?;
        self.commit(cart, next)
    }

    async fn try_update(
        &self,
        cart: &mut Cart,
        product_id: ProductId,
        amount: u32,
    ) -> Result<(), CartError> {
        let stock = self.catalog.fetch_stock(product_id).await?;

        let next =
            cart.with_amount(product_id, amount).ok_or(CartError::NotInCart { product_id })?;
        if stock.amount < amount {
            return Err(CartError::OutOfStock { product_id });
        }

        self.commit(cart, next)
    }

    /// Write-through commit: persist the candidate cart, then make it the
    /// in-memory state and publish it. A storage failure leaves everything
    /// as it was.
    fn commit(&self, cart: &mut Cart, next: Cart) -> Result<(), CartError> {
        let blob = serde_json::to_string(&next)
            .map_err(|error| StorageError::Write(error.to_string()))?;
        self.storage.set(CART_STORAGE_KEY, &blob)?;

        *cart = next.clone();
        self.publisher.send_replace(next);
        Ok(())
    }

    fn report(&self, product_id: ProductId, error: &CartError, fallback: CartNotice) {
        let notice = match error {
            CartError::OutOfStock { .. } => CartNotice::OutOfStock,
            _ => fallback,
        };
        warn!(
            event_name = "cart.operation_failed",
            product_id = product_id.0,
            notice = notice.code(),
            error = %error,
            "cart operation failed"
        );
        self.sink.notify(notice);
    }
}

fn load_initial<S: CartStorage>(storage: &S) -> Cart {
    let blob = match storage.get(CART_STORAGE_KEY) {
        Ok(Some(blob)) => blob,
        Ok(None) => return Cart::default(),
        Err(error) => {
            warn!(
                event_name = "cart.storage_unreadable",
                error = %error,
                "persisted cart could not be read, starting empty"
            );
            return Cart::default();
        }
    };

    match serde_json::from_str(&blob) {
        Ok(cart) => cart,
        Err(error) => {
            warn!(
                event_name = "cart.storage_corrupt",
                error = %error,
                "persisted cart is malformed, starting empty"
            );
            Cart::default()
        }
    }
}
