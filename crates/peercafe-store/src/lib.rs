//! # peercafe-store: Persisted Cart for PeerCafe
//!
//! Keeps the pure [`peercafe_core::Cart`] in sync with a key-value storage
//! medium so it survives reloads.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        PeerCafe Cart Data Flow                          │
//! │                                                                         │
//! │  Menu button / cart dropdown / checkout                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  peercafe-store (THIS CRATE)                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐   │   │
//! │  │   │   CartStore   │    │    Storage    │    │    Config    │   │   │
//! │  │   │  (store.rs)   │───►│ (storage.rs)  │    │ (config.rs)  │   │   │
//! │  │   │ load/persist  │    │ Memory / File │    │  PEERCAFE_*  │   │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘   │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  peerCafeCart / peerCafeCartRestaurant entries                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`store`] - The persisted cart
//! - [`storage`] - Storage medium trait and implementations
//! - [`config`] - Environment-driven configuration
//! - [`error`] - Storage error types
//!
//! ## Usage
//!
//! ```rust,no_run
//! use peercafe_store::{CartStore, FileStorage, StoreConfig};
//!
//! let config = StoreConfig::from_env();
//! let store = CartStore::load_with_keys(FileStorage::new(&config.data_dir), config.storage_keys());
//! println!("{} items in cart", store.total_items());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod storage;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::StoreConfig;
pub use error::{StorageError, StorageResult};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage};
pub use store::{CartStore, StorageKeys};
