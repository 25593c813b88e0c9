//! # Domain Types
//!
//! Cart-facing types shared by the core and the store.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │ CartItemInput   │   │  CartLineItem   │   │  RestaurantRef  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  item_id        │──►│  item_id        │   │  id             │       │
//! │  │  name           │   │  name           │   │  name           │       │
//! │  │  unit_price     │   │  unit_price     │   └─────────────────┘       │
//! │  │  image_ref?     │   │  quantity ≥ 1   │                              │
//! │  │  restaurant_id  │   │  image_ref?     │   ┌─────────────────┐       │
//! │  │  restaurant_name│   │  restaurant_id  │   │    TaxRate      │       │
//! │  └─────────────────┘   │  restaurant_name│   │  bps (u32)      │       │
//! │   (no quantity)        └─────────────────┘   │  800 = 8%       │       │
//! │                                              └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Format
//! Line items and the restaurant reference are persisted as camelCase JSON:
//! `{"itemId":1,"name":"Margherita","unitPrice":12.99,"quantity":2,
//!   "imageRef":null,"restaurantId":100,"restaurantName":"Luigi's"}`

use serde::{de, Deserialize, Deserializer, Serialize};
use ts_rs::TS;

use crate::money::{self, Money};

/// Menu item identifier (unique within a restaurant's menu).
pub type ItemId = i64;

/// Restaurant identifier.
pub type RestaurantId = i64;

/// Largest quantity a single line can hold. Larger requests are clamped.
pub const MAX_LINE_QUANTITY: i64 = 10_000;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// 1 basis point = 0.01%, so 800 bps = 8%.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Creates a tax rate from a percentage (for configuration input).
    pub fn from_percentage(pct: f64) -> Self {
        TaxRate((pct * 100.0).round() as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

// =============================================================================
// Restaurant Reference
// =============================================================================

/// The restaurant a cart belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RestaurantRef {
    pub id: RestaurantId,
    pub name: String,
}

impl RestaurantRef {
    pub fn new(id: RestaurantId, name: impl Into<String>) -> Self {
        RestaurantRef {
            id,
            name: name.into(),
        }
    }
}

// =============================================================================
// Cart Item Input
// =============================================================================

/// What a menu button hands to the cart.
///
/// Carries no quantity: a new line always starts at 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartItemInput {
    pub item_id: ItemId,
    pub name: String,
    #[ts(type = "number")]
    pub unit_price: Money,
    pub image_ref: Option<String>,
    pub restaurant_id: RestaurantId,
    pub restaurant_name: String,
}

impl CartItemInput {
    /// The restaurant this item is sold by.
    pub fn restaurant(&self) -> RestaurantRef {
        RestaurantRef::new(self.restaurant_id, self.restaurant_name.clone())
    }
}

// =============================================================================
// Cart Line Item
// =============================================================================

/// One distinct menu item and its quantity within the cart.
///
/// ## Snapshot Pattern
/// Name and price are frozen when the item is first added. Menu edits made
/// afterwards do not change what the cart shows or charges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartLineItem {
    pub item_id: ItemId,
    pub name: String,
    #[serde(deserialize_with = "money::non_negative")]
    #[ts(type = "number")]
    pub unit_price: Money,
    #[serde(deserialize_with = "line_quantity")]
    pub quantity: i64,
    #[serde(default)]
    pub image_ref: Option<String>,
    pub restaurant_id: RestaurantId,
    pub restaurant_name: String,
}

impl CartLineItem {
    /// Creates a fresh line (quantity 1) from an item input.
    pub fn from_input(input: &CartItemInput) -> Self {
        CartLineItem {
            item_id: input.item_id,
            name: input.name.clone(),
            unit_price: input.unit_price,
            quantity: 1,
            image_ref: input.image_ref.clone(),
            restaurant_id: input.restaurant_id,
            restaurant_name: input.restaurant_name.clone(),
        }
    }

    /// Line total (unit price × quantity).
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }
}

/// Serde helper for persisted quantities: `1..=MAX_LINE_QUANTITY`.
fn line_quantity<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    let quantity = i64::deserialize(deserializer)?;
    if !(1..=MAX_LINE_QUANTITY).contains(&quantity) {
        return Err(de::Error::custom(format!(
            "quantity out of range (1..={MAX_LINE_QUANTITY}): {quantity}"
        )));
    }
    Ok(quantity)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn pizza() -> CartItemInput {
        CartItemInput {
            item_id: 1,
            name: "Margherita Pizza".to_string(),
            unit_price: Money::from_cents(1299),
            image_ref: Some("https://example.com/margherita.jpg".to_string()),
            restaurant_id: 100,
            restaurant_name: "Luigi's".to_string(),
        }
    }

    #[test]
    fn test_tax_rate_from_percentage() {
        let rate = TaxRate::from_percentage(8.25);
        assert_eq!(rate.bps(), 825);
        assert!((rate.percentage() - 8.25).abs() < 0.001);
    }

    #[test]
    fn test_line_item_starts_at_quantity_one() {
        let line = CartLineItem::from_input(&pizza());
        assert_eq!(line.quantity, 1);
        assert_eq!(line.restaurant_id, 100);
        assert_eq!(line.line_total().cents(), 1299);
    }

    #[test]
    fn test_line_item_json_field_names() {
        let line = CartLineItem::from_input(&pizza());
        let value = serde_json::to_value(&line).unwrap();

        assert_eq!(value["itemId"], 1);
        assert_eq!(value["unitPrice"], 12.99);
        assert_eq!(value["quantity"], 1);
        assert_eq!(value["imageRef"], "https://example.com/margherita.jpg");
        assert_eq!(value["restaurantId"], 100);
        assert_eq!(value["restaurantName"], "Luigi's");
    }

    #[test]
    fn test_line_item_rejects_negative_price() {
        let json = r#"{"itemId":1,"name":"x","unitPrice":-2.5,"quantity":1,
                       "restaurantId":1,"restaurantName":"r"}"#;
        assert!(serde_json::from_str::<CartLineItem>(json).is_err());
    }

    #[test]
    fn test_line_item_rejects_out_of_range_quantity() {
        for quantity in ["0", "-3", "10001", "9223372036854775807"] {
            let json = format!(
                r#"{{"itemId":1,"name":"x","unitPrice":2.5,"quantity":{quantity},
                    "restaurantId":1,"restaurantName":"r"}}"#
            );
            assert!(
                serde_json::from_str::<CartLineItem>(&json).is_err(),
                "quantity {quantity} should be rejected"
            );
        }

        let json = r#"{"itemId":1,"name":"x","unitPrice":2.5,"quantity":10000,
                       "restaurantId":1,"restaurantName":"r"}"#;
        let line: CartLineItem = serde_json::from_str(json).unwrap();
        assert_eq!(line.quantity, MAX_LINE_QUANTITY);
    }

    #[test]
    fn test_line_item_image_ref_is_optional() {
        let json = r#"{"itemId":7,"name":"Soda","unitPrice":2,"quantity":3,
                       "restaurantId":1,"restaurantName":"r"}"#;
        let line: CartLineItem = serde_json::from_str(json).unwrap();
        assert_eq!(line.image_ref, None);
        assert_eq!(line.line_total().cents(), 600);
    }

    #[test]
    fn test_input_restaurant_ref() {
        assert_eq!(pizza().restaurant(), RestaurantRef::new(100, "Luigi's"));
    }
}
