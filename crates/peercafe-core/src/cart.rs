//! # Cart
//!
//! The single-restaurant shopping cart as a pure state machine.
//!
//! ## States
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Cart State Machine                               │
//! │                                                                         │
//! │              add_item(r)                                                │
//! │   ┌───────┐ ─────────────────────────► ┌────────────────────┐          │
//! │   │ Empty │                            │  NonEmpty(r)       │◄──┐      │
//! │   └───────┘ ◄───────────────────────── └────────────────────┘   │      │
//! │       │     remove last / qty ≤ 0 /        │    │               │      │
//! │       │     clear                          │    │ add_item(r)   │      │
//! │       │                                    │    └───────────────┘      │
//! │       │                                    │ add_item(r') → Conflict   │
//! │       │                                    │ (state unchanged)         │
//! │       │  replace_with(item of r')          ▼                           │
//! │       └──────────────────────────────► NonEmpty(r')                    │
//! │                                                                         │
//! │  Invariant: restaurant is None  ⇔  items is empty                      │
//! │             every item.restaurant_id == restaurant.id                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use peercafe_core::cart::{AddOutcome, Cart};
//! use peercafe_core::money::Money;
//! use peercafe_core::types::CartItemInput;
//!
//! let mut cart = Cart::new();
//! let pizza = CartItemInput {
//!     item_id: 1,
//!     name: "Margherita Pizza".into(),
//!     unit_price: Money::from_cents(1299),
//!     image_ref: None,
//!     restaurant_id: 100,
//!     restaurant_name: "Luigi's".into(),
//! };
//!
//! assert!(cart.add_item(&pizza).is_added());
//! assert!(cart.add_item(&pizza).is_added());
//! assert_eq!(cart.total_items(), 2);
//! assert_eq!(cart.total_price(), Money::from_cents(2598));
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::money::Money;
use crate::types::{CartItemInput, CartLineItem, ItemId, RestaurantRef, MAX_LINE_QUANTITY};

// =============================================================================
// Add Outcome
// =============================================================================

/// Result of adding an item to the cart.
///
/// A conflict is not an error: the caller is expected to ask the user
/// whether to discard the current cart and then call
/// [`Cart::replace_with`], or cancel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "outcome", rename_all = "snake_case")]
#[ts(export)]
pub enum AddOutcome {
    /// The item was added (new line or quantity incremented).
    Added,
    /// The cart holds items from a different restaurant; nothing changed.
    RestaurantConflict {
        current: RestaurantRef,
        requested: RestaurantRef,
    },
}

impl AddOutcome {
    /// `true` when the cart changed.
    #[inline]
    pub fn is_added(&self) -> bool {
        matches!(self, AddOutcome::Added)
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
///
/// ## Invariants
/// - Items are unique by `item_id` (adding the same item increases quantity)
/// - Every quantity is in `1..=MAX_LINE_QUANTITY` (setting 0 or less removes the line)
/// - All items belong to `restaurant`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    items: Vec<CartLineItem>,
    restaurant: Option<RestaurantRef>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart::default()
    }

    /// Rebuilds a cart from previously persisted parts.
    ///
    /// The two parts are taken as-is, even when they disagree with each
    /// other. The next mutation brings them back in line.
    pub fn from_parts(items: Vec<CartLineItem>, restaurant: Option<RestaurantRef>) -> Self {
        Cart { items, restaurant }
    }

    /// Adds one unit of an item.
    ///
    /// ## Behavior
    /// - Empty cart: new line with quantity 1, cart now belongs to the item's restaurant
    /// - Same restaurant: increments the existing line or appends a new one
    /// - Different restaurant: no change, returns [`AddOutcome::RestaurantConflict`]
    pub fn add_item(&mut self, input: &CartItemInput) -> AddOutcome {
        if self.items.is_empty() {
            self.items.push(CartLineItem::from_input(input));
            self.restaurant = Some(input.restaurant());
            return AddOutcome::Added;
        }

        let current = self.current_restaurant();
        if current.id != input.restaurant_id {
            debug!(
                current = current.id,
                requested = input.restaurant_id,
                "Rejected item from another restaurant"
            );
            return AddOutcome::RestaurantConflict {
                current,
                requested: input.restaurant(),
            };
        }

        if let Some(line) = self.items.iter_mut().find(|l| l.item_id == input.item_id) {
            line.quantity = line.quantity.saturating_add(1).min(MAX_LINE_QUANTITY);
        } else {
            self.items.push(CartLineItem::from_input(input));
        }

        if self.restaurant.is_none() {
            self.restaurant = Some(current);
        }
        AddOutcome::Added
    }

    /// Removes a line by item ID.
    ///
    /// Returns `true` if a line was removed. Unknown IDs are a no-op.
    pub fn remove_item(&mut self, item_id: ItemId) -> bool {
        let initial_len = self.items.len();
        self.items.retain(|l| l.item_id != item_id);

        if self.items.is_empty() {
            self.restaurant = None;
        }
        self.items.len() != initial_len
    }

    /// Sets the quantity of a line.
    ///
    /// ## Behavior
    /// - `quantity <= 0`: same as [`Cart::remove_item`]
    /// - `quantity > MAX_LINE_QUANTITY`: clamped to [`MAX_LINE_QUANTITY`]
    /// - Unknown item ID: no-op
    pub fn update_quantity(&mut self, item_id: ItemId, quantity: i64) {
        if quantity <= 0 {
            self.remove_item(item_id);
            return;
        }

        if let Some(line) = self.items.iter_mut().find(|l| l.item_id == item_id) {
            line.quantity = quantity.min(MAX_LINE_QUANTITY);
        }
    }

    /// Empties the cart.
    pub fn clear(&mut self) {
        self.items.clear();
        self.restaurant = None;
    }

    /// Replaces everything with a single line of `input` (quantity 1).
    ///
    /// Used after the user confirms discarding a cart from another restaurant.
    pub fn replace_with(&mut self, input: &CartItemInput) {
        self.items = vec![CartLineItem::from_input(input)];
        self.restaurant = Some(input.restaurant());
    }

    /// Line items in insertion order.
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// The restaurant the cart belongs to, if any.
    pub fn restaurant(&self) -> Option<&RestaurantRef> {
        self.restaurant.as_ref()
    }

    /// Sum of all quantities.
    pub fn total_items(&self) -> i64 {
        self.items
            .iter()
            .fold(0i64, |acc, l| acc.saturating_add(l.quantity))
    }

    /// Sum of `unit_price × quantity` over all lines.
    pub fn total_price(&self) -> Money {
        self.items.iter().map(CartLineItem::line_total).sum()
    }

    /// Checks if the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Owned, read-only view for UI consumers.
    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot::from(self)
    }

    // Restaurant of a non-empty cart. Falls back to the first line when the
    // restored reference was missing.
    fn current_restaurant(&self) -> RestaurantRef {
        match (&self.restaurant, self.items.first()) {
            (Some(r), _) => r.clone(),
            (None, Some(line)) => RestaurantRef::new(line.restaurant_id, line.restaurant_name.clone()),
            (None, None) => RestaurantRef::new(0, String::new()),
        }
    }
}

// =============================================================================
// Snapshot
// =============================================================================

/// Cart contents plus derived totals, as handed to the cart dropdown and
/// checkout views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartSnapshot {
    pub items: Vec<CartLineItem>,
    pub restaurant: Option<RestaurantRef>,
    pub total_items: i64,
    #[ts(type = "number")]
    pub total_price: Money,
    pub is_empty: bool,
}

impl From<&Cart> for CartSnapshot {
    fn from(cart: &Cart) -> Self {
        CartSnapshot {
            items: cart.items.clone(),
            restaurant: cart.restaurant.clone(),
            total_items: cart.total_items(),
            total_price: cart.total_price(),
            is_empty: cart.is_empty(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn item(item_id: ItemId, price_cents: i64, restaurant_id: i64) -> CartItemInput {
        CartItemInput {
            item_id,
            name: format!("Item {}", item_id),
            unit_price: Money::from_cents(price_cents),
            image_ref: None,
            restaurant_id,
            restaurant_name: format!("Restaurant {}", restaurant_id),
        }
    }

    #[test]
    fn test_add_to_empty_cart_sets_restaurant() {
        let mut cart = Cart::new();

        assert_eq!(cart.add_item(&item(1, 1299, 100)), AddOutcome::Added);

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.total_items(), 1);
        assert_eq!(cart.total_price(), Money::from_cents(1299));
        assert_eq!(cart.restaurant().unwrap().id, 100);
    }

    #[test]
    fn test_add_same_item_increments_quantity() {
        let mut cart = Cart::new();
        cart.add_item(&item(1, 1299, 100));
        cart.add_item(&item(1, 1299, 100));

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].quantity, 2);
        assert_eq!(cart.total_price(), Money::from_cents(2598));
    }

    #[test]
    fn test_add_new_item_same_restaurant_appends() {
        let mut cart = Cart::new();
        cart.add_item(&item(1, 1299, 100));
        cart.add_item(&item(2, 450, 100));
        cart.add_item(&item(2, 450, 100));

        let ids: Vec<ItemId> = cart.items().iter().map(|l| l.item_id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(cart.total_items(), 3);
        assert_eq!(cart.total_price(), Money::from_cents(1299 + 900));
    }

    #[test]
    fn test_add_other_restaurant_is_rejected_without_change() {
        let mut cart = Cart::new();
        cart.add_item(&item(1, 1299, 100));
        let before = cart.clone();

        let outcome = cart.add_item(&item(3, 1599, 200));

        assert!(!outcome.is_added());
        assert_eq!(
            outcome,
            AddOutcome::RestaurantConflict {
                current: RestaurantRef::new(100, "Restaurant 100"),
                requested: RestaurantRef::new(200, "Restaurant 200"),
            }
        );
        assert_eq!(cart, before);

        // Rejection is repeatable.
        assert!(!cart.add_item(&item(3, 1599, 200)).is_added());
        assert_eq!(cart, before);
    }

    #[test]
    fn test_remove_last_item_clears_restaurant() {
        let mut cart = Cart::new();
        cart.add_item(&item(1, 1299, 100));

        assert!(cart.remove_item(1));
        assert!(cart.is_empty());
        assert!(cart.restaurant().is_none());
    }

    #[test]
    fn test_remove_unknown_item_is_noop() {
        let mut cart = Cart::new();
        cart.add_item(&item(1, 1299, 100));

        assert!(!cart.remove_item(42));
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.restaurant().unwrap().id, 100);
    }

    #[test]
    fn test_update_quantity_sets_value() {
        let mut cart = Cart::new();
        cart.add_item(&item(1, 1299, 100));
        cart.add_item(&item(2, 450, 100));

        cart.update_quantity(2, 5);

        assert_eq!(cart.items()[0].quantity, 1);
        assert_eq!(cart.items()[1].quantity, 5);
        assert_eq!(cart.total_items(), 6);
    }

    #[test]
    fn test_update_quantity_clamps_huge_values() {
        let mut cart = Cart::new();
        cart.add_item(&item(1, 1299, 100));

        cart.update_quantity(1, i64::MAX / 100);

        assert_eq!(cart.items()[0].quantity, MAX_LINE_QUANTITY);
        assert_eq!(cart.total_items(), MAX_LINE_QUANTITY);
        assert_eq!(cart.total_price().cents(), 1299 * MAX_LINE_QUANTITY);

        // Adding again stays at the cap
        assert!(cart.add_item(&item(1, 1299, 100)).is_added());
        assert_eq!(cart.items()[0].quantity, MAX_LINE_QUANTITY);
        assert_eq!(cart.snapshot().total_items, MAX_LINE_QUANTITY);
    }

    #[test]
    fn test_update_quantity_zero_or_negative_removes() {
        for qty in [0, -1] {
            let mut updated = Cart::new();
            updated.add_item(&item(1, 1299, 100));
            updated.add_item(&item(2, 450, 100));
            let mut removed = updated.clone();

            updated.update_quantity(1, qty);
            removed.remove_item(1);

            assert_eq!(updated, removed);
        }

        let mut cart = Cart::new();
        cart.add_item(&item(1, 1299, 100));
        cart.update_quantity(1, -1);
        assert!(cart.is_empty());
        assert!(cart.restaurant().is_none());
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.add_item(&item(1, 1299, 100));

        cart.clear();

        assert!(cart.is_empty());
        assert!(cart.restaurant().is_none());
        assert_eq!(cart.total_price(), Money::zero());
    }

    #[test]
    fn test_replace_with_always_yields_single_line() {
        let mut cart = Cart::new();
        cart.add_item(&item(1, 1299, 100));
        cart.add_item(&item(1, 1299, 100));
        cart.add_item(&item(2, 450, 100));

        cart.replace_with(&item(3, 1599, 200));

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].item_id, 3);
        assert_eq!(cart.items()[0].quantity, 1);
        assert_eq!(cart.restaurant().unwrap().id, 200);
        assert_eq!(cart.total_price(), Money::from_cents(1599));

        let mut empty = Cart::new();
        empty.replace_with(&item(3, 1599, 200));
        assert_eq!(empty, cart);
    }

    #[test]
    fn test_totals_track_quantities() {
        let mut cart = Cart::new();
        let prices = [(1, 1299), (2, 450), (3, 99)];
        for round in 0..4 {
            for (id, price) in prices.iter().take(round % 3 + 1) {
                cart.add_item(&item(*id, *price, 100));
            }
        }

        let expected_items: i64 = cart.items().iter().map(|l| l.quantity).sum();
        let expected_price: i64 = cart
            .items()
            .iter()
            .map(|l| l.unit_price.cents() * l.quantity)
            .sum();
        assert_eq!(cart.total_items(), expected_items);
        assert_eq!(cart.total_price().cents(), expected_price);
    }

    #[test]
    fn test_restored_items_without_restaurant_still_guard_conflicts() {
        let line = CartLineItem::from_input(&item(1, 1299, 100));
        let mut cart = Cart::from_parts(vec![line], None);

        assert!(!cart.add_item(&item(3, 1599, 200)).is_added());
        assert!(cart.add_item(&item(1, 1299, 100)).is_added());
        assert_eq!(cart.restaurant().unwrap().id, 100);
    }

    #[test]
    fn test_snapshot_carries_derived_totals() {
        let mut cart = Cart::new();
        cart.add_item(&item(1, 1299, 100));
        cart.add_item(&item(1, 1299, 100));

        let snapshot = cart.snapshot();
        assert_eq!(snapshot.total_items, 2);
        assert_eq!(snapshot.total_price, Money::from_cents(2598));
        assert!(!snapshot.is_empty);

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["totalPrice"], 25.98);
        assert_eq!(json["restaurant"]["id"], 100);
    }
}
