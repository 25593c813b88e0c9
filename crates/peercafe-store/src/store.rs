//! # Cart Store
//!
//! The single source of truth for the active cart, kept in sync with a
//! key-value storage medium.
//!
//! ## Operation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Store Operations                                │
//! │                                                                         │
//! │  UI Action              CartStore method            Commit              │
//! │  ─────────              ────────────────            ──────              │
//! │                                                                         │
//! │  Click "Add" ─────────► add_to_cart() ────────────► persist()           │
//! │                           └─ conflict? no mutation, no persist          │
//! │  Confirm replace ─────► clear_cart_and_add_item() ► persist()           │
//! │  Change quantity ─────► update_quantity() ────────► persist()           │
//! │  Click remove ────────► remove_from_cart() ───────► persist()           │
//! │  Empty cart ──────────► clear_cart() ─────────────► persist()           │
//! │                                                                         │
//! │  persist():  "peerCafeCart"           ← items (always written)          │
//! │              "peerCafeCartRestaurant" ← restaurant, or removed if None  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Failure Semantics
//! - Missing entries on load: empty cart / no restaurant
//! - Malformed entries on load: logged, treated as missing
//! - Failed writes: logged; the in-memory cart keeps the mutation
//!
//! ## Usage
//! ```rust
//! use peercafe_core::{CartItemInput, Money};
//! use peercafe_store::{CartStore, MemoryStorage};
//!
//! let mut store = CartStore::load(MemoryStorage::new());
//! let soup = CartItemInput {
//!     item_id: 9,
//!     name: "Tomato Soup".into(),
//!     unit_price: Money::from_cents(650),
//!     image_ref: None,
//!     restaurant_id: 3,
//!     restaurant_name: "Corner Bistro".into(),
//! };
//!
//! assert!(store.add_to_cart(&soup).is_added());
//!
//! // A fresh store over the same storage sees the same cart
//! let reloaded = CartStore::load(store.into_storage());
//! assert_eq!(reloaded.total_items(), 1);
//! ```

use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use peercafe_core::checkout::{CheckoutOptions, DeliveryAddress, OrderDraft, PricingRules};
use peercafe_core::{
    AddOutcome, Cart, CartItemInput, CartLineItem, CartSnapshot, CoreResult, ItemId, Money,
    RestaurantRef, CART_RESTAURANT_STORAGE_KEY, CART_STORAGE_KEY,
};

use crate::error::StorageResult;
use crate::storage::KeyValueStorage;

// =============================================================================
// Storage Keys
// =============================================================================

/// The two entries the cart is persisted under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeys {
    pub items: String,
    pub restaurant: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        StorageKeys {
            items: CART_STORAGE_KEY.to_string(),
            restaurant: CART_RESTAURANT_STORAGE_KEY.to_string(),
        }
    }
}

// =============================================================================
// Cart Store
// =============================================================================

/// A cart bound to a storage medium.
///
/// ## Ownership
/// The store owns the cart outright. Consumers get borrowed views or owned
/// snapshots, and change the cart only through the methods below. One
/// writer at a time: every method runs to completion before returning.
#[derive(Debug)]
pub struct CartStore<S: KeyValueStorage> {
    cart: Cart,
    storage: S,
    keys: StorageKeys,
}

impl<S: KeyValueStorage> CartStore<S> {
    /// Restores the cart from `storage` under the default keys.
    pub fn load(storage: S) -> Self {
        Self::load_with_keys(storage, StorageKeys::default())
    }

    /// Restores the cart from `storage` under custom keys.
    ///
    /// Never fails: each entry that is missing, unreadable or malformed
    /// falls back to empty / `None` on its own. The two entries are not
    /// checked against each other.
    pub fn load_with_keys(storage: S, keys: StorageKeys) -> Self {
        let items: Vec<CartLineItem> = load_entry(&storage, &keys.items).unwrap_or_default();
        let restaurant: Option<RestaurantRef> = load_entry(&storage, &keys.restaurant);

        info!(
            items = items.len(),
            restaurant = restaurant.as_ref().map(|r| r.id),
            "Cart restored"
        );

        CartStore {
            cart: Cart::from_parts(items, restaurant),
            storage,
            keys,
        }
    }

    // -------------------------------------------------------------------------
    // Mutations
    // -------------------------------------------------------------------------

    /// Adds one unit of an item.
    ///
    /// Returns [`AddOutcome::RestaurantConflict`] (and leaves everything,
    /// storage included, untouched) when the cart belongs to another
    /// restaurant. The caller should then ask the user before calling
    /// [`CartStore::clear_cart_and_add_item`].
    pub fn add_to_cart(&mut self, item: &CartItemInput) -> AddOutcome {
        let outcome = self.cart.add_item(item);
        if outcome.is_added() {
            debug!(item_id = item.item_id, restaurant_id = item.restaurant_id, "Added to cart");
            self.persist();
        }
        outcome
    }

    /// Removes a line. Unknown IDs are a no-op.
    pub fn remove_from_cart(&mut self, item_id: ItemId) {
        let removed = self.cart.remove_item(item_id);
        debug!(item_id, removed, "Removed from cart");
        self.persist();
    }

    /// Sets a line's quantity; `quantity <= 0` removes the line.
    pub fn update_quantity(&mut self, item_id: ItemId, quantity: i64) {
        self.cart.update_quantity(item_id, quantity);
        debug!(item_id, quantity, "Updated cart quantity");
        self.persist();
    }

    /// Empties the cart.
    pub fn clear_cart(&mut self) {
        self.cart.clear();
        debug!("Cleared cart");
        self.persist();
    }

    /// Discards the current cart and starts a new one with `item` (quantity 1).
    pub fn clear_cart_and_add_item(&mut self, item: &CartItemInput) {
        self.cart.replace_with(item);
        debug!(
            item_id = item.item_id,
            restaurant_id = item.restaurant_id,
            "Replaced cart"
        );
        self.persist();
    }

    // -------------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------------

    pub fn items(&self) -> &[CartLineItem] {
        self.cart.items()
    }

    pub fn restaurant(&self) -> Option<&RestaurantRef> {
        self.cart.restaurant()
    }

    pub fn total_items(&self) -> i64 {
        self.cart.total_items()
    }

    pub fn total_price(&self) -> Money {
        self.cart.total_price()
    }

    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    /// Owned copy of the cart and its totals.
    pub fn snapshot(&self) -> CartSnapshot {
        self.cart.snapshot()
    }

    /// Read-only access to the underlying cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Builds the order payload for the current cart.
    ///
    /// The cart is left as-is; clear it once the backend accepts the order.
    pub fn checkout(
        &self,
        user_id: &str,
        address: DeliveryAddress,
        options: &CheckoutOptions,
        pricing: &PricingRules,
    ) -> CoreResult<OrderDraft> {
        OrderDraft::from_cart(&self.cart, user_id, address, options, pricing)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Gives the storage medium back (e.g. to reload a fresh store from it).
    pub fn into_storage(self) -> S {
        self.storage
    }

    // -------------------------------------------------------------------------
    // Persistence
    // -------------------------------------------------------------------------

    // Best effort: a failed write is logged and the in-memory cart stays as is.
    fn persist(&mut self) {
        if let Err(e) = self.write_items() {
            warn!(key = %self.keys.items, error = %e, "Failed to persist cart items");
        }
        if let Err(e) = self.write_restaurant() {
            warn!(key = %self.keys.restaurant, error = %e, "Failed to persist cart restaurant");
        }
    }

    fn write_items(&mut self) -> StorageResult<()> {
        let json = serde_json::to_string(self.cart.items())?;
        self.storage.set_item(&self.keys.items, &json)
    }

    fn write_restaurant(&mut self) -> StorageResult<()> {
        match self.cart.restaurant() {
            Some(restaurant) => {
                let json = serde_json::to_string(restaurant)?;
                self.storage.set_item(&self.keys.restaurant, &json)
            }
            None => self.storage.remove_item(&self.keys.restaurant),
        }
    }
}

/// Reads and decodes one entry; any failure is logged and yields `None`.
fn load_entry<T: DeserializeOwned>(storage: &impl KeyValueStorage, key: &str) -> Option<T> {
    let raw = match storage.get_item(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            warn!(key, error = %e, "Failed to read persisted cart entry, using default");
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(key, error = %e, "Discarding malformed persisted cart entry");
            None
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
