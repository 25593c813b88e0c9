//! # peercafe-core: Pure Cart Logic for PeerCafe
//!
//! This crate holds the restaurant cart and everything derived from it as
//! plain data and pure functions. It never touches storage.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       PeerCafe Cart Architecture                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                         UI consumers                             │   │
//! │  │    Menu "Add" button ──► Cart dropdown ──► Checkout ──► Tracking │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                peercafe-store (CartStore)                        │   │
//! │  │        restores on startup, persists after every mutation        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ peercafe-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌──────────┐ ┌────────┐  │   │
//! │  │   │  types  │ │  money  │ │  cart   │ │ checkout │ │ order  │  │   │
//! │  │   └─────────┘ └─────────┘ └─────────┘ └──────────┘ └────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO NETWORK • PURE FUNCTIONS             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Line items, item input, restaurant reference
//! - [`money`] - Money type with integer arithmetic
//! - [`cart`] - Single-restaurant cart state machine
//! - [`checkout`] - Order payload built from the cart
//! - [`order`] - Order status lifecycle and poll schedule
//! - [`validation`] - Field rules for checkout
//! - [`error`] - Domain error types

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod checkout;
pub mod error;
pub mod money;
pub mod order;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{AddOutcome, Cart, CartSnapshot};
pub use checkout::{CheckoutOptions, DeliveryAddress, OrderDraft, OrderItem, PricingRules};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use order::{OrderStatus, StatusPoller};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Storage key holding the persisted line items.
pub const CART_STORAGE_KEY: &str = "peerCafeCart";

/// Storage key holding the persisted restaurant reference.
pub const CART_RESTAURANT_STORAGE_KEY: &str = "peerCafeCartRestaurant";
