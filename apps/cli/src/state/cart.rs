//! # Cart Store
//!
//! Owns the current cart, runs the three cart operations and mirrors every
//! committed change to the key-value store.
//!
//! ## Thread Safety
//! - Every operation holds `writer` (an async mutex) for its whole
//!   read-modify-write cycle, inventory calls included, so overlapping calls
//!   are linearized and no update is lost.
//! - Readers never take the lock. The current cart is an `Arc<Cart>`
//!   published through a `watch` channel; `cart()` clones the latest `Arc`
//!   and `subscribe()` observes every committed version.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Store Operations                                │
//! │                                                                         │
//! │  Caller                   Operation                 Inventory calls     │
//! │  ──────                   ─────────                 ───────────────     │
//! │                                                                         │
//! │  Buy button ────────────► add_product(id) ────────► stock, product     │
//! │                              │ (already in cart)                        │
//! │                              └─► update path ─────► stock (again)      │
//! │                                                                         │
//! │  Trash icon ────────────► remove_product(id) ─────► (none)             │
//! │                                                                         │
//! │  Quantity input ────────► update_product_amount() ► stock              │
//! │  +/- buttons ───────────► adjust_product_amount() ► stock              │
//! │                                                                         │
//! │  Cart badge ────────────► cart() / subscribe() ───► (none, no lock)    │
//! │                                                                         │
//! │  Commit order: persist snapshot ──► publish new Arc<Cart>               │
//! │  A failed write leaves the published cart untouched.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Failures
//! Operations never return errors. Inventory, storage and cart errors are
//! logged at `warn` and turned into the operation's notice, which goes to the
//! [`Notifier`]. At most one notice is raised per call.

use std::sync::Arc;

use rocket_core::{AmountUpdate, Cart, CartItem, Notice, ProductId, CART_STORAGE_KEY};
use rocket_inventory::InventoryClient;
use rocket_storage::KeyValueStore;
use tokio::sync::{watch, Mutex};
use tracing::{debug, info, warn};

use crate::error::{StoreError, StoreResult};
use crate::state::notify::Notifier;

// =============================================================================
// Mutation Outcome
// =============================================================================

/// What a cart operation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOutcome {
    /// A new cart was persisted and published.
    Applied,
    /// Nothing changed and no notice was raised.
    Unchanged,
    /// The operation was refused; the notice was sent to the notifier.
    Rejected(Notice),
}

impl MutationOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, MutationOutcome::Applied)
    }

    /// The notice raised, if any.
    pub fn notice(&self) -> Option<Notice> {
        match self {
            MutationOutcome::Rejected(notice) => Some(*notice),
            _ => None,
        }
    }
}

// =============================================================================
// Cart Store
// =============================================================================

/// The cart plus the collaborators its operations need.
///
/// Share it as `Arc<CartStore<..>>`; all methods take `&self`.
pub struct CartStore<I, S, N> {
    inventory: I,
    storage: S,
    notifier: N,
    storage_key: String,
    writer: Mutex<()>,
    current: watch::Sender<Arc<Cart>>,
}

impl<I, S, N> CartStore<I, S, N>
where
    I: InventoryClient,
    S: KeyValueStore,
    N: Notifier,
{
    /// Builds the store from the snapshot under [`CART_STORAGE_KEY`].
    pub async fn initialize(inventory: I, storage: S, notifier: N) -> Self {
        Self::with_key(inventory, storage, notifier, CART_STORAGE_KEY).await
    }

    /// Builds the store from the snapshot under `key`.
    ///
    /// ## When This Starts Empty
    /// - No snapshot stored under `key`
    /// - The store could not be read
    /// - The snapshot isn't a JSON array of cart items
    /// - The snapshot repeats a product or holds an amount below 1
    ///
    /// Nothing is written back; the bad snapshot stays until the first
    /// committed change overwrites it.
    pub async fn with_key(inventory: I, storage: S, notifier: N, key: impl Into<String>) -> Self {
        let storage_key = key.into();
        let cart = load_snapshot(&storage, &storage_key).await;
        let (current, _) = watch::channel(Arc::new(cart));

        CartStore {
            inventory,
            storage,
            notifier,
            storage_key,
            writer: Mutex::new(()),
            current,
        }
    }

    /// The latest committed cart.
    pub fn cart(&self) -> Arc<Cart> {
        self.current.borrow().clone()
    }

    /// A receiver that sees every committed cart.
    pub fn subscribe(&self) -> watch::Receiver<Arc<Cart>> {
        self.current.subscribe()
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    pub fn inventory(&self) -> &I {
        &self.inventory
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Adds one unit of a product.
    ///
    /// ## Behavior
    /// - Stock at or below 0: out-of-stock notice
    /// - Not in cart: product details fetched, line appended with amount 1
    /// - In cart with amount n: goes through the update path with n + 1, so
    ///   stock is checked again and failures there carry the update notice
    pub async fn add_product(&self, product_id: ProductId) -> MutationOutcome {
        let _guard = self.writer.lock().await;
        debug!(product_id, "add_product");

        let outcome = match self.try_add(product_id).await {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!(product_id, error = %err, "Failed to add product");
                MutationOutcome::Rejected(Notice::AddFailed)
            }
        };
        self.raise(outcome);
        outcome
    }

    /// Removes a product's line.
    ///
    /// A product that isn't in the cart raises the removal notice and
    /// writes nothing.
    pub async fn remove_product(&self, product_id: ProductId) -> MutationOutcome {
        let _guard = self.writer.lock().await;
        debug!(product_id, "remove_product");

        let outcome = match self.try_remove(product_id).await {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!(product_id, error = %err, "Failed to remove product");
                MutationOutcome::Rejected(Notice::RemoveFailed)
            }
        };
        self.raise(outcome);
        outcome
    }

    /// Sets a line's quantity.
    ///
    /// ## Behavior
    /// - `amount <= 0`: nothing happens (no request, no write, no notice)
    /// - More than the stock: out-of-stock notice, no write
    /// - Product not in cart: the unchanged cart is written again and no
    ///   notice is raised
    pub async fn update_product_amount(&self, update: AmountUpdate) -> MutationOutcome {
        let _guard = self.writer.lock().await;
        debug!(product_id = update.product_id, amount = update.amount, "update_product_amount");

        let outcome = self.update_locked(update).await;
        self.raise(outcome);
        outcome
    }

    /// Moves a line's quantity by `delta` and goes through the update path.
    ///
    /// The current amount is read under the writer lock, so overlapping
    /// adjustments all land. A product that isn't in the cart counts as 0.
    pub async fn adjust_product_amount(&self, product_id: ProductId, delta: i64) -> MutationOutcome {
        let _guard = self.writer.lock().await;

        let current = self.cart().find(product_id).map_or(0, |item| item.amount);
        let amount = current.saturating_add(delta);
        debug!(product_id, delta, amount, "adjust_product_amount");

        let outcome = self
            .update_locked(AmountUpdate::new(product_id, amount))
            .await;
        self.raise(outcome);
        outcome
    }

    // =========================================================================
    // Internals (writer lock held)
    // =========================================================================

    async fn try_add(&self, product_id: ProductId) -> StoreResult<MutationOutcome> {
        let stock = self.inventory.stock(product_id).await?;
        if stock.is_depleted() {
            debug!(product_id, stock = stock.amount, "Product out of stock");
            return Ok(MutationOutcome::Rejected(Notice::OutOfStock));
        }

        let cart = self.cart();
        if let Some(item) = cart.find(product_id) {
            let next_amount = item.amount + 1;
            if !stock.covers(next_amount) {
                debug!(product_id, stock = stock.amount, next_amount, "Not enough stock");
                return Ok(MutationOutcome::Rejected(Notice::OutOfStock));
            }
            return Ok(self
                .update_locked(AmountUpdate::new(product_id, next_amount))
                .await);
        }

        let product = self.inventory.product(product_id).await?;
        if product.id != product_id {
            return Err(StoreError::ProductMismatch {
                requested: product_id,
                received: product.id,
            });
        }

        let next = cart.with_item(CartItem::from_product(product, 1))?;
        self.commit(next).await?;
        Ok(MutationOutcome::Applied)
    }

    async fn try_remove(&self, product_id: ProductId) -> StoreResult<MutationOutcome> {
        let cart = self.cart();
        match cart.without(product_id) {
            Some(next) => {
                self.commit(next).await?;
                Ok(MutationOutcome::Applied)
            }
            None => {
                debug!(product_id, "Product not in cart");
                Ok(MutationOutcome::Rejected(Notice::RemoveFailed))
            }
        }
    }

    /// Update path shared by `update_product_amount` and `add_product`.
    /// Errors become the update notice here, whoever the caller is.
    async fn update_locked(&self, update: AmountUpdate) -> MutationOutcome {
        match self.try_update(update).await {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!(
                    product_id = update.product_id,
                    amount = update.amount,
                    error = %err,
                    "Failed to change product quantity"
                );
                MutationOutcome::Rejected(Notice::UpdateFailed)
            }
        }
    }

    async fn try_update(&self, update: AmountUpdate) -> StoreResult<MutationOutcome> {
        let AmountUpdate { product_id, amount } = update;
        if amount <= 0 {
            return Ok(MutationOutcome::Unchanged);
        }

        let stock = self.inventory.stock(product_id).await?;
        let cart = self.cart();

        if !cart.contains(product_id) {
            // Not an error for updates: the current cart is written back as is.
            debug!(product_id, "Product not in cart, rewriting snapshot");
            self.persist(&cart).await?;
            return Ok(MutationOutcome::Unchanged);
        }

        if !stock.covers(amount) {
            debug!(product_id, stock = stock.amount, amount, "Not enough stock");
            return Ok(MutationOutcome::Rejected(Notice::OutOfStock));
        }

        match cart.with_amount(product_id, amount)? {
            Some(next) => {
                self.commit(next).await?;
                Ok(MutationOutcome::Applied)
            }
            None => Ok(MutationOutcome::Unchanged),
        }
    }

    /// Persists `next`, then publishes it.
    async fn commit(&self, next: Cart) -> StoreResult<()> {
        self.persist(&next).await?;

        info!(
            items = next.len(),
            quantity = next.total_quantity(),
            "Cart updated"
        );
        self.current.send_replace(Arc::new(next));
        Ok(())
    }

    async fn persist(&self, cart: &Cart) -> StoreResult<()> {
        let snapshot = cart.to_snapshot()?;
        self.storage.set(&self.storage_key, &snapshot).await?;
        Ok(())
    }

    fn raise(&self, outcome: MutationOutcome) {
        if let Some(notice) = outcome.notice() {
            self.notifier.error(notice.message());
        }
    }
}

async fn load_snapshot<S: KeyValueStore>(storage: &S, key: &str) -> Cart {
    match storage.get(key).await {
        Ok(Some(snapshot)) => match Cart::from_snapshot(&snapshot) {
            Ok(cart) => {
                info!(key, items = cart.len(), "Restored cart");
                cart
            }
            Err(err) => {
                warn!(key, error = %err, "Discarding unreadable cart snapshot");
                Cart::new()
            }
        },
        Ok(None) => {
            debug!(key, "No cart snapshot, starting empty");
            Cart::new()
        }
        Err(err) => {
            warn!(key, error = %err, "Could not read cart snapshot, starting empty");
            Cart::new()
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::notify::RecordingNotifier;
    use rocket_core::{Product, StockInfo};
    use rocket_inventory::{InventoryError, InventoryResult};
    use rocket_storage::{MemoryStore, StorageError, StorageResult};
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::time::Duration;

    // -------------------------------------------------------------------------
    // Fakes
    // -------------------------------------------------------------------------

    #[derive(Default)]
    struct FakeInventory {
        stock: std::sync::Mutex<HashMap<ProductId, i64>>,
        stock_calls: AtomicUsize,
        product_calls: AtomicUsize,
        fail_stock: AtomicBool,
        delay: Option<Duration>,
    }

    impl FakeInventory {
        fn with_stock(entries: &[(ProductId, i64)]) -> Self {
            FakeInventory {
                stock: std::sync::Mutex::new(entries.iter().copied().collect()),
                ..Default::default()
            }
        }

        fn set_stock(&self, id: ProductId, amount: i64) {
            self.stock.lock().unwrap().insert(id, amount);
        }

        fn stock_calls(&self) -> usize {
            self.stock_calls.load(Ordering::SeqCst)
        }
    }

    fn product(id: ProductId) -> Product {
        Product {
            id,
            title: format!("Tênis {}", id),
            price: 179.9,
            image: format!("https://cdn.example.com/{}.jpg", id),
        }
    }

    impl InventoryClient for FakeInventory {
        async fn stock(&self, id: ProductId) -> InventoryResult<StockInfo> {
            self.stock_calls.fetch_add(1, Ordering::SeqCst);
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            if self.fail_stock.load(Ordering::SeqCst) {
                return Err(InventoryError::Status {
                    status: 500,
                    url: format!("http://fake/stock/{}", id),
                });
            }
            let amount = self.stock.lock().unwrap().get(&id).copied();
            amount
                .map(|amount| StockInfo { id, amount })
                .ok_or(InventoryError::NotFound {
                    resource: "stock",
                    id: id.to_string(),
                })
        }

        async fn product(&self, id: ProductId) -> InventoryResult<Product> {
            self.product_calls.fetch_add(1, Ordering::SeqCst);
            Ok(product(id))
        }

        async fn products(&self) -> InventoryResult<Vec<Product>> {
            let mut ids: Vec<_> = self.stock.lock().unwrap().keys().copied().collect();
            ids.sort_unstable();
            Ok(ids.into_iter().map(product).collect())
        }
    }

    /// Memory store that counts writes and can be told to fail them.
    #[derive(Default, Clone)]
    struct CountingStore {
        inner: MemoryStore,
        writes: Arc<AtomicUsize>,
        fail_writes: Arc<AtomicBool>,
    }

    impl CountingStore {
        fn with_snapshot(snapshot: &str) -> Self {
            CountingStore {
                inner: MemoryStore::with_entry(CART_STORAGE_KEY, snapshot),
                ..Default::default()
            }
        }

        fn writes(&self) -> usize {
            self.writes.load(Ordering::SeqCst)
        }

        async fn snapshot(&self) -> Option<String> {
            self.inner.get(CART_STORAGE_KEY).await.unwrap()
        }
    }

    impl KeyValueStore for CountingStore {
        async fn get(&self, key: &str) -> StorageResult<Option<String>> {
            self.inner.get(key).await
        }

        async fn set(&self, key: &str, value: &str) -> StorageResult<()> {
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(StorageError::QueryFailed("disk full".to_string()));
            }
            self.writes.fetch_add(1, Ordering::SeqCst);
            self.inner.set(key, value).await
        }
    }

    type TestStore = CartStore<FakeInventory, CountingStore, Arc<RecordingNotifier>>;

    async fn store_with(
        inventory: FakeInventory,
        storage: CountingStore,
    ) -> (TestStore, CountingStore, Arc<RecordingNotifier>) {
        let notifier = Arc::new(RecordingNotifier::new());
        let store =
            CartStore::initialize(inventory, storage.clone(), Arc::clone(&notifier)).await;
        (store, storage, notifier)
    }

    fn one_item_snapshot(id: ProductId, amount: i64) -> String {
        Cart::new()
            .with_item(CartItem::from_product(product(id), amount))
            .unwrap()
            .to_snapshot()
            .unwrap()
    }

    // -------------------------------------------------------------------------
    // Initialization
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_initialize_restores_snapshot() {
        let storage = CountingStore::with_snapshot(&one_item_snapshot(3, 2));
        let (store, storage, _) = store_with(FakeInventory::default(), storage).await;

        assert_eq!(store.cart().len(), 1);
        assert_eq!(store.cart().find(3).unwrap().amount, 2);
        assert_eq!(store.inventory().stock_calls(), 0);
        assert_eq!(storage.writes(), 0);
    }

    #[tokio::test]
    async fn test_initialize_discards_bad_snapshots() {
        for snapshot in [
            "not json",
            r#"{"id":1}"#,
            r#"[{"id":1,"title":"a","price":1.0,"image":"i","amount":0}]"#,
            r#"[{"id":1,"title":"a","price":1.0,"image":"i","amount":1},
                {"id":1,"title":"a","price":1.0,"image":"i","amount":2}]"#,
        ] {
            let storage = CountingStore::with_snapshot(snapshot);
            let (store, storage, notifier) = store_with(FakeInventory::default(), storage).await;

            assert!(store.cart().is_empty(), "snapshot {snapshot} was adopted");
            assert_eq!(storage.writes(), 0);
            assert!(notifier.messages().is_empty());
        }
    }

    #[tokio::test]
    async fn test_initialize_with_custom_key() {
        let storage = CountingStore::default();
        storage
            .inner
            .set("other-cart", &one_item_snapshot(5, 1))
            .await
            .unwrap();

        let store = CartStore::with_key(
            FakeInventory::default(),
            storage,
            RecordingNotifier::new(),
            "other-cart",
        )
        .await;

        assert_eq!(store.storage_key(), "other-cart");
        assert!(store.cart().contains(5));
    }

    // -------------------------------------------------------------------------
    // add_product
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_add_new_product_to_empty_cart() {
        let inventory = FakeInventory::with_stock(&[(1, 5)]);
        let (store, storage, notifier) = store_with(inventory, CountingStore::default()).await;

        let outcome = store.add_product(1).await;

        assert_eq!(outcome, MutationOutcome::Applied);
        let cart = store.cart();
        assert_eq!(cart.items(), &[CartItem::from_product(product(1), 1)]);
        assert_eq!(storage.snapshot().await, Some(one_item_snapshot(1, 1)));
        assert!(notifier.messages().is_empty());
    }

    #[tokio::test]
    async fn test_add_new_product_keeps_other_lines() {
        let inventory = FakeInventory::with_stock(&[(1, 5), (2, 5)]);
        let storage = CountingStore::with_snapshot(&one_item_snapshot(2, 3));
        let (store, _, _) = store_with(inventory, storage).await;
        let before = store.cart();

        store.add_product(1).await;

        let after = store.cart();
        assert_eq!(after.len(), 2);
        assert_eq!(after.items()[0], before.items()[0]);
        assert_eq!(after.find(1).unwrap().amount, 1);
    }

    #[tokio::test]
    async fn test_add_existing_product_increments() {
        let inventory = FakeInventory::with_stock(&[(1, 5)]);
        let storage = CountingStore::with_snapshot(&one_item_snapshot(1, 2));
        let (store, storage, notifier) = store_with(inventory, storage).await;

        let outcome = store.add_product(1).await;

        assert_eq!(outcome, MutationOutcome::Applied);
        assert_eq!(store.cart().len(), 1);
        assert_eq!(store.cart().find(1).unwrap().amount, 3);
        // Once for the add check, once more on the update path.
        assert_eq!(store.inventory().stock_calls(), 2);
        assert_eq!(store.inventory().product_calls.load(Ordering::SeqCst), 0);
        assert_eq!(storage.snapshot().await, Some(one_item_snapshot(1, 3)));
        assert!(notifier.messages().is_empty());
    }

    #[tokio::test]
    async fn test_add_with_zero_stock_is_rejected() {
        let inventory = FakeInventory::with_stock(&[(1, 0)]);
        let (store, storage, notifier) = store_with(inventory, CountingStore::default()).await;

        let outcome = store.add_product(1).await;

        assert_eq!(outcome, MutationOutcome::Rejected(Notice::OutOfStock));
        assert!(store.cart().is_empty());
        assert_eq!(storage.writes(), 0);
        assert_eq!(notifier.messages(), vec!["Requested quantity out of stock"]);
    }

    #[tokio::test]
    async fn test_add_with_negative_stock_is_rejected() {
        let inventory = FakeInventory::with_stock(&[(1, -2)]);
        let (store, _, notifier) = store_with(inventory, CountingStore::default()).await;

        assert_eq!(
            store.add_product(1).await,
            MutationOutcome::Rejected(Notice::OutOfStock)
        );
        assert_eq!(notifier.messages().len(), 1);
    }

    #[tokio::test]
    async fn test_add_beyond_stock_is_rejected() {
        let inventory = FakeInventory::with_stock(&[(1, 1)]);
        let snapshot = one_item_snapshot(1, 1);
        let storage = CountingStore::with_snapshot(&snapshot);
        let (store, storage, notifier) = store_with(inventory, storage).await;
        let before = store.cart();

        let outcome = store.add_product(1).await;

        assert_eq!(outcome, MutationOutcome::Rejected(Notice::OutOfStock));
        assert_eq!(store.cart(), before);
        assert_eq!(store.cart().to_snapshot().unwrap(), snapshot);
        assert_eq!(storage.writes(), 0);
        assert_eq!(notifier.messages(), vec!["Requested quantity out of stock"]);
    }

    #[tokio::test]
    async fn test_add_inventory_failure_raises_add_notice() {
        let inventory = FakeInventory::default();
        let (store, storage, notifier) = store_with(inventory, CountingStore::default()).await;

        // Unknown id: the fake answers NotFound.
        let outcome = store.add_product(42).await;

        assert_eq!(outcome, MutationOutcome::Rejected(Notice::AddFailed));
        assert!(store.cart().is_empty());
        assert_eq!(storage.writes(), 0);
        assert_eq!(notifier.messages(), vec!["Error adding product"]);
    }

    #[tokio::test]
    async fn test_add_write_failure_leaves_cart_unchanged() {
        let inventory = FakeInventory::with_stock(&[(1, 5)]);
        let storage = CountingStore::default();
        storage.fail_writes.store(true, Ordering::SeqCst);
        let (store, _, notifier) = store_with(inventory, storage).await;

        let outcome = store.add_product(1).await;

        assert_eq!(outcome, MutationOutcome::Rejected(Notice::AddFailed));
        assert!(store.cart().is_empty());
        assert_eq!(notifier.messages(), vec!["Error adding product"]);
    }

    #[tokio::test]
    async fn test_add_existing_reports_update_failure_from_update_path() {
        let inventory = FakeInventory::with_stock(&[(1, 5)]);
        let storage = CountingStore::with_snapshot(&one_item_snapshot(1, 1));
        storage.fail_writes.store(true, Ordering::SeqCst);
        let (store, _, notifier) = store_with(inventory, storage).await;

        let outcome = store.add_product(1).await;

        assert_eq!(outcome, MutationOutcome::Rejected(Notice::UpdateFailed));
        assert_eq!(store.cart().find(1).unwrap().amount, 1);
        assert_eq!(notifier.messages(), vec!["Error changing product quantity"]);
    }

    // -------------------------------------------------------------------------
    // remove_product
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_remove_present_product() {
        let cart = Cart::new()
            .with_item(CartItem::from_product(product(1), 1))
            .unwrap()
            .with_item(CartItem::from_product(product(2), 4))
            .unwrap();
        let storage = CountingStore::with_snapshot(&cart.to_snapshot().unwrap());
        let (store, storage, notifier) = store_with(FakeInventory::default(), storage).await;

        let outcome = store.remove_product(1).await;

        assert_eq!(outcome, MutationOutcome::Applied);
        let after = store.cart();
        assert_eq!(after.len(), 1);
        assert!(!after.contains(1));
        assert_eq!(after.find(2).unwrap().amount, 4);
        assert_eq!(storage.snapshot().await, Some(after.to_snapshot().unwrap()));
        assert_eq!(store.inventory().stock_calls(), 0);
        assert!(notifier.messages().is_empty());
    }

    #[tokio::test]
    async fn test_remove_absent_product() {
        let storage = CountingStore::with_snapshot(&one_item_snapshot(2, 1));
        let (store, storage, notifier) = store_with(FakeInventory::default(), storage).await;
        let before = store.cart();

        let outcome = store.remove_product(1).await;

        assert_eq!(outcome, MutationOutcome::Rejected(Notice::RemoveFailed));
        assert_eq!(store.cart(), before);
        assert_eq!(storage.writes(), 0);
        assert_eq!(notifier.messages(), vec!["Error removing product"]);
    }

    #[tokio::test]
    async fn test_remove_write_failure_keeps_line() {
        let storage = CountingStore::with_snapshot(&one_item_snapshot(1, 1));
        storage.fail_writes.store(true, Ordering::SeqCst);
        let (store, _, notifier) = store_with(FakeInventory::default(), storage).await;

        let outcome = store.remove_product(1).await;

        assert_eq!(outcome, MutationOutcome::Rejected(Notice::RemoveFailed));
        assert!(store.cart().contains(1));
        assert_eq!(notifier.messages(), vec!["Error removing product"]);
    }

    // -------------------------------------------------------------------------
    // update_product_amount
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_update_to_zero_or_below_is_noop() {
        let snapshot = one_item_snapshot(1, 2);
        let inventory = FakeInventory::with_stock(&[(1, 5)]);
        let storage = CountingStore::with_snapshot(&snapshot);
        let (store, storage, notifier) = store_with(inventory, storage).await;

        for amount in [0, -1] {
            let outcome = store.update_product_amount(AmountUpdate::new(1, amount)).await;
            assert_eq!(outcome, MutationOutcome::Unchanged);
        }

        assert_eq!(store.cart().to_snapshot().unwrap(), snapshot);
        assert_eq!(storage.snapshot().await, Some(snapshot));
        assert_eq!(storage.writes(), 0);
        assert_eq!(store.inventory().stock_calls(), 0);
        assert!(notifier.messages().is_empty());
    }

    #[tokio::test]
    async fn test_update_within_stock() {
        let inventory = FakeInventory::with_stock(&[(1, 5)]);
        let storage = CountingStore::with_snapshot(&one_item_snapshot(1, 1));
        let (store, storage, notifier) = store_with(inventory, storage).await;

        for k in [5, 2] {
            let outcome = store.update_product_amount(AmountUpdate::new(1, k)).await;
            assert_eq!(outcome, MutationOutcome::Applied);
            assert_eq!(store.cart().find(1).unwrap().amount, k);
            assert_eq!(storage.snapshot().await, Some(one_item_snapshot(1, k)));
        }
        assert!(notifier.messages().is_empty());
    }

    #[tokio::test]
    async fn test_update_beyond_stock() {
        let inventory = FakeInventory::with_stock(&[(1, 3)]);
        let storage = CountingStore::with_snapshot(&one_item_snapshot(1, 1));
        let (store, storage, notifier) = store_with(inventory, storage).await;
        let before = store.cart();

        let outcome = store.update_product_amount(AmountUpdate::new(1, 4)).await;

        assert_eq!(outcome, MutationOutcome::Rejected(Notice::OutOfStock));
        assert_eq!(store.cart(), before);
        assert_eq!(storage.writes(), 0);
        assert_eq!(notifier.messages(), vec!["Requested quantity out of stock"]);
    }

    #[tokio::test]
    async fn test_update_absent_product_rewrites_snapshot_silently() {
        let snapshot = one_item_snapshot(2, 1);
        let inventory = FakeInventory::with_stock(&[(1, 5)]);
        let storage = CountingStore::with_snapshot(&snapshot);
        let (store, storage, notifier) = store_with(inventory, storage).await;

        let outcome = store.update_product_amount(AmountUpdate::new(1, 2)).await;

        assert_eq!(outcome, MutationOutcome::Unchanged);
        assert_eq!(storage.writes(), 1);
        assert_eq!(storage.snapshot().await, Some(snapshot));
        assert!(notifier.messages().is_empty());
    }

    #[tokio::test]
    async fn test_update_inventory_failure() {
        let inventory = FakeInventory::with_stock(&[(1, 5)]);
        inventory.fail_stock.store(true, Ordering::SeqCst);
        let storage = CountingStore::with_snapshot(&one_item_snapshot(1, 1));
        let (store, storage, notifier) = store_with(inventory, storage).await;

        let outcome = store.update_product_amount(AmountUpdate::new(1, 2)).await;

        assert_eq!(outcome, MutationOutcome::Rejected(Notice::UpdateFailed));
        assert_eq!(store.cart().find(1).unwrap().amount, 1);
        assert_eq!(storage.writes(), 0);
        assert_eq!(notifier.messages(), vec!["Error changing product quantity"]);
    }

    #[tokio::test]
    async fn test_update_builds_new_item() {
        let inventory = FakeInventory::with_stock(&[(1, 5)]);
        let storage = CountingStore::with_snapshot(&one_item_snapshot(1, 1));
        let (store, _, _) = store_with(inventory, storage).await;
        let held = store.cart();

        store.update_product_amount(AmountUpdate::new(1, 3)).await;

        // The version read before the update is untouched.
        assert_eq!(held.find(1).unwrap().amount, 1);
        assert_eq!(store.cart().find(1).unwrap().amount, 3);
    }

    // -------------------------------------------------------------------------
    // Publishing & concurrency
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_subscribers_see_commits_only() {
        let inventory = FakeInventory::with_stock(&[(1, 5), (2, 0)]);
        let (store, _, _) = store_with(inventory, CountingStore::default()).await;
        let mut rx = store.subscribe();

        store.add_product(2).await;
        assert!(!rx.has_changed().unwrap());

        store.add_product(1).await;
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().len(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_adds_are_serialized() {
        let inventory = FakeInventory {
            delay: Some(Duration::from_millis(10)),
            ..FakeInventory::with_stock(&[(1, 10)])
        };
        let (store, storage, notifier) = store_with(inventory, CountingStore::default()).await;
        let store = Arc::new(store);

        let tasks: Vec<_> = (0..5)
            .map(|_| {
                let store = Arc::clone(&store);
                tokio::spawn(async move { store.add_product(1).await })
            })
            .collect();
        for task in tasks {
            assert_eq!(task.await.unwrap(), MutationOutcome::Applied);
        }

        assert_eq!(store.cart().find(1).unwrap().amount, 5);
        assert_eq!(storage.snapshot().await, Some(one_item_snapshot(1, 5)));
        assert!(notifier.messages().is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_adds_stop_at_stock() {
        let inventory = FakeInventory::with_stock(&[(1, 3)]);
        let (store, _, notifier) = store_with(inventory, CountingStore::default()).await;
        let store = Arc::new(store);

        let tasks: Vec<_> = (0..5)
            .map(|_| {
                let store = Arc::clone(&store);
                tokio::spawn(async move { store.add_product(1).await })
            })
            .collect();
        let mut applied = 0;
        for task in tasks {
            if task.await.unwrap().is_applied() {
                applied += 1;
            }
        }

        assert_eq!(applied, 3);
        assert_eq!(store.cart().find(1).unwrap().amount, 3);
        assert_eq!(
            notifier.messages(),
            vec!["Requested quantity out of stock"; 2]
        );
    }

    #[tokio::test]
    async fn test_adjust_moves_amount_by_delta() {
        let inventory = FakeInventory::with_stock(&[(1, 5)]);
        let storage = CountingStore::with_snapshot(&one_item_snapshot(1, 2));
        let (store, storage, notifier) = store_with(inventory, storage).await;

        assert_eq!(store.adjust_product_amount(1, 1).await, MutationOutcome::Applied);
        assert_eq!(store.cart().find(1).unwrap().amount, 3);

        assert_eq!(store.adjust_product_amount(1, -1).await, MutationOutcome::Applied);
        assert_eq!(store.cart().find(1).unwrap().amount, 2);
        assert_eq!(storage.snapshot().await, Some(one_item_snapshot(1, 2)));

        assert_eq!(
            store.adjust_product_amount(1, 4).await,
            MutationOutcome::Rejected(Notice::OutOfStock)
        );
        assert_eq!(notifier.messages(), vec!["Requested quantity out of stock"]);
    }

    #[tokio::test]
    async fn test_adjust_down_from_one_is_noop() {
        let inventory = FakeInventory::with_stock(&[(1, 5)]);
        let storage = CountingStore::with_snapshot(&one_item_snapshot(1, 1));
        let (store, storage, notifier) = store_with(inventory, storage).await;

        assert_eq!(store.adjust_product_amount(1, -1).await, MutationOutcome::Unchanged);
        assert_eq!(store.cart().find(1).unwrap().amount, 1);
        assert_eq!(storage.writes(), 0);
        assert_eq!(store.inventory().stock_calls(), 0);
        assert!(notifier.messages().is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_adjustments_are_not_lost() {
        let inventory = FakeInventory {
            delay: Some(Duration::from_millis(10)),
            ..FakeInventory::with_stock(&[(1, 10)])
        };
        let storage = CountingStore::with_snapshot(&one_item_snapshot(1, 1));
        let (store, storage, notifier) = store_with(inventory, storage).await;
        let store = Arc::new(store);

        let tasks: Vec<_> = (0..4)
            .map(|_| {
                let store = Arc::clone(&store);
                tokio::spawn(async move { store.adjust_product_amount(1, 1).await })
            })
            .collect();
        for task in tasks {
            assert_eq!(task.await.unwrap(), MutationOutcome::Applied);
        }

        assert_eq!(store.cart().find(1).unwrap().amount, 5);
        assert_eq!(storage.snapshot().await, Some(one_item_snapshot(1, 5)));
        assert!(notifier.messages().is_empty());
    }

    #[tokio::test]
    async fn test_stock_change_between_calls_is_observed() {
        let inventory = FakeInventory::with_stock(&[(1, 2)]);
        let (store, _, notifier) = store_with(inventory, CountingStore::default()).await;

        store.add_product(1).await;
        store.add_product(1).await;
        store.inventory().set_stock(1, 1);

        assert_eq!(
            store.update_product_amount(AmountUpdate::new(1, 2)).await,
            MutationOutcome::Rejected(Notice::OutOfStock)
        );
        assert_eq!(store.cart().find(1).unwrap().amount, 2);
        assert_eq!(notifier.take().len(), 1);
    }
}
