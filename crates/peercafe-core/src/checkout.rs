//! # Checkout
//!
//! Turns the cart into the order-creation payload the backend API accepts.
//!
//! ## Pricing Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Order Pricing                                   │
//! │                                                                         │
//! │  Cart lines ──► OrderItem.subtotal = price × quantity                   │
//! │                         │                                               │
//! │                         ▼                                               │
//! │                 subtotal = Σ item subtotals                             │
//! │                         │                                               │
//! │                         ├──► tax_amount = subtotal × tax rate           │
//! │                         ├──► delivery_fee (pricing rules)               │
//! │                         ├──► tip_amount (customer)                      │
//! │                         └──► discount_amount (customer)                 │
//! │                                                                         │
//! │  total_amount = subtotal + tax + delivery_fee + tip − discount          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All arithmetic is integer cents, so the backend's "does the total add
//! up" check never trips on rounding.
//!
//! ## Usage
//! ```rust
//! use peercafe_core::cart::Cart;
//! use peercafe_core::checkout::{CheckoutOptions, DeliveryAddress, OrderDraft, PricingRules};
//! use peercafe_core::money::Money;
//! use peercafe_core::types::CartItemInput;
//!
//! let mut cart = Cart::new();
//! let pizza = CartItemInput {
//!     item_id: 123,
//!     name: "Margherita Pizza".into(),
//!     unit_price: Money::from_cents(1299),
//!     image_ref: None,
//!     restaurant_id: 1,
//!     restaurant_name: "Luigi's".into(),
//! };
//! cart.add_item(&pizza);
//! cart.add_item(&pizza);
//!
//! let address = DeliveryAddress {
//!     street: "123 Main St".into(),
//!     city: "San Francisco".into(),
//!     state: "CA".into(),
//!     zip_code: "94105".into(),
//!     instructions: None,
//! };
//! let options = CheckoutOptions { tip: Money::from_cents(500), ..Default::default() };
//!
//! let draft = OrderDraft::from_cart(&cart, "user_123", address, &options, &PricingRules::default())?;
//! assert_eq!(draft.subtotal.cents(), 2598);
//! assert_eq!(draft.tax_amount.cents(), 208);
//! assert_eq!(draft.total_amount.cents(), 3705);
//! # Ok::<(), peercafe_core::CoreError>(())
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::cart::Cart;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{CartLineItem, ItemId, RestaurantId, TaxRate};
use crate::validation::{self, ValidationResult};

/// Default sales tax applied at checkout (8%).
pub const DEFAULT_TAX_RATE_BPS: u32 = 800;

/// Default flat delivery fee ($3.99).
pub const DEFAULT_DELIVERY_FEE_CENTS: i64 = 399;

// =============================================================================
// Pricing Rules
// =============================================================================

/// Charges the platform adds on top of the food.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricingRules {
    pub tax_rate: TaxRate,
    pub delivery_fee: Money,
}

impl Default for PricingRules {
    fn default() -> Self {
        PricingRules {
            tax_rate: TaxRate::from_bps(DEFAULT_TAX_RATE_BPS),
            delivery_fee: Money::from_cents(DEFAULT_DELIVERY_FEE_CENTS),
        }
    }
}

// =============================================================================
// Customer Input
// =============================================================================

/// Where the order goes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DeliveryAddress {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub instructions: Option<String>,
}

impl DeliveryAddress {
    /// Checks every field against the backend's limits.
    pub fn validate(&self) -> ValidationResult<()> {
        validation::validate_length("street", &self.street, 1, validation::MAX_STREET_LEN)?;
        validation::validate_length("city", &self.city, 1, validation::MAX_CITY_LEN)?;
        validation::validate_length(
            "state",
            &self.state,
            validation::MIN_STATE_LEN,
            validation::MAX_STATE_LEN,
        )?;
        validation::validate_length(
            "zip_code",
            &self.zip_code,
            validation::MIN_ZIP_LEN,
            validation::MAX_ZIP_LEN,
        )?;
        validation::validate_optional_text(
            "instructions",
            self.instructions.as_deref(),
            validation::MAX_DELIVERY_INSTRUCTIONS_LEN,
        )
    }
}

/// Extras the customer picks on the checkout page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckoutOptions {
    pub tip: Money,
    pub discount: Money,
    pub notes: Option<String>,
    /// Per-line special instructions, keyed by item ID.
    pub item_instructions: BTreeMap<ItemId, String>,
}

// =============================================================================
// Order Payload
// =============================================================================

/// One line of the order payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OrderItem {
    pub item_id: ItemId,
    pub item_name: String,
    #[ts(type = "number")]
    pub price: Money,
    pub quantity: i64,
    #[ts(type = "number")]
    pub subtotal: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_instructions: Option<String>,
}

impl OrderItem {
    fn from_line(line: &CartLineItem, special_instructions: Option<String>) -> Self {
        OrderItem {
            item_id: line.item_id,
            item_name: line.name.clone(),
            price: line.unit_price,
            quantity: line.quantity,
            subtotal: line.line_total(),
            special_instructions,
        }
    }

    fn validate(&self) -> ValidationResult<()> {
        validation::validate_length("item_name", &self.item_name, 1, validation::MAX_ITEM_NAME_LEN)?;
        validation::validate_positive_amount("price", self.price)?;
        validation::validate_quantity(self.quantity)?;
        validation::validate_optional_text(
            "special_instructions",
            self.special_instructions.as_deref(),
            validation::MAX_SPECIAL_INSTRUCTIONS_LEN,
        )
    }
}

/// The order-creation payload (`POST /orders`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OrderDraft {
    pub user_id: String,
    pub restaurant_id: RestaurantId,
    pub order_items: Vec<OrderItem>,
    pub delivery_address: DeliveryAddress,
    pub notes: Option<String>,
    #[ts(type = "number")]
    pub subtotal: Money,
    #[ts(type = "number")]
    pub tax_amount: Money,
    #[ts(type = "number")]
    pub delivery_fee: Money,
    #[ts(type = "number")]
    pub tip_amount: Money,
    #[ts(type = "number")]
    pub discount_amount: Money,
    #[ts(type = "number")]
    pub total_amount: Money,
}

impl OrderDraft {
    /// Builds and validates the order payload for the current cart.
    ///
    /// ## Errors
    /// - [`CoreError::EmptyCart`] if the cart has no lines
    /// - [`CoreError::Validation`] for any field outside the backend's limits
    /// - [`CoreError::NonPositiveTotal`] if the discount eats the whole order
    pub fn from_cart(
        cart: &Cart,
        user_id: &str,
        delivery_address: DeliveryAddress,
        options: &CheckoutOptions,
        pricing: &PricingRules,
    ) -> CoreResult<Self> {
        let first = cart.items().first().ok_or(CoreError::EmptyCart)?;
        let restaurant_id = cart.restaurant().map_or(first.restaurant_id, |r| r.id);

        validation::validate_required("user_id", user_id)?;
        delivery_address.validate()?;
        validation::validate_optional_text(
            "notes",
            options.notes.as_deref(),
            validation::MAX_ORDER_NOTES_LEN,
        )?;
        validation::validate_non_negative_amount("tip_amount", options.tip)?;
        validation::validate_non_negative_amount("discount_amount", options.discount)?;

        let order_items = cart
            .items()
            .iter()
            .map(|line| {
                let instructions = options.item_instructions.get(&line.item_id).cloned();
                OrderItem::from_line(line, instructions)
            })
            .collect::<Vec<_>>();
        for item in &order_items {
            item.validate()?;
        }

        let subtotal: Money = order_items.iter().map(|i| i.subtotal).sum();
        let tax_amount = subtotal.calculate_tax(pricing.tax_rate);
        let total_amount =
            subtotal + tax_amount + pricing.delivery_fee + options.tip - options.discount;

        if !total_amount.is_positive() {
            return Err(CoreError::NonPositiveTotal {
                total_cents: total_amount.cents(),
            });
        }

        debug!(
            restaurant_id,
            items = order_items.len(),
            subtotal = subtotal.cents(),
            total = total_amount.cents(),
            "Order draft built"
        );

        Ok(OrderDraft {
            user_id: user_id.trim().to_string(),
            restaurant_id,
            order_items,
            delivery_address,
            notes: options.notes.clone(),
            subtotal,
            tax_amount,
            delivery_fee: pricing.delivery_fee,
            tip_amount: options.tip,
            discount_amount: options.discount,
            total_amount,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
