//! # Configuration
//!
//! Settings for the persisted cart, loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`PEERCAFE_*`)
//! 2. Defaults (this file)
//!
//! Configuration is read-only after startup.

use std::path::PathBuf;

use chrono::Duration;
use directories::ProjectDirs;
use tracing::warn;

use peercafe_core::checkout::{DEFAULT_DELIVERY_FEE_CENTS, DEFAULT_TAX_RATE_BPS};
use peercafe_core::order::DEFAULT_POLL_INTERVAL_SECS;
use peercafe_core::{
    Money, PricingRules, StatusPoller, TaxRate, CART_RESTAURANT_STORAGE_KEY, CART_STORAGE_KEY,
};

use crate::store::StorageKeys;

/// Store configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreConfig {
    /// Directory for the file-backed storage medium.
    pub data_dir: PathBuf,

    /// Key holding the line items.
    pub cart_key: String,

    /// Key holding the restaurant reference.
    pub restaurant_key: String,

    /// Checkout tax rate in basis points (800 = 8%).
    pub tax_rate_bps: u32,

    /// Flat delivery fee in cents.
    pub delivery_fee_cents: i64,

    /// Order tracking refetch interval.
    pub poll_interval_secs: i64,

    /// Currency symbol (for display)
    pub currency_symbol: String,
}

impl Default for StoreConfig {
    /// ## Default Values
    /// - Data dir: platform app-data dir (`~/.local/share/peercafe-cart` on Linux),
    ///   `./.peercafe` if none can be determined
    /// - Keys: `peerCafeCart` / `peerCafeCartRestaurant`
    /// - Tax: 8%, delivery fee: $3.99, polling every 10s
    fn default() -> Self {
        StoreConfig {
            data_dir: default_data_dir(),
            cart_key: CART_STORAGE_KEY.to_string(),
            restaurant_key: CART_RESTAURANT_STORAGE_KEY.to_string(),
            tax_rate_bps: DEFAULT_TAX_RATE_BPS,
            delivery_fee_cents: DEFAULT_DELIVERY_FEE_CENTS,
            poll_interval_secs: DEFAULT_POLL_INTERVAL_SECS,
            currency_symbol: "$".to_string(),
        }
    }
}

impl StoreConfig {
    /// Creates a StoreConfig from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `PEERCAFE_DATA_DIR`: storage directory
    /// - `PEERCAFE_TAX_RATE`: tax rate as a percentage (e.g. "8.25")
    /// - `PEERCAFE_DELIVERY_FEE_CENTS`: delivery fee (e.g. "399")
    /// - `PEERCAFE_POLL_INTERVAL_SECS`: tracking refetch interval
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`StoreConfig::from_env`], reading variables through `lookup`.
    ///
    /// Unparseable values are logged and ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = StoreConfig::default();

        if let Some(dir) = lookup("PEERCAFE_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }

        if let Some(raw) = lookup("PEERCAFE_TAX_RATE") {
            match raw.trim().parse::<f64>() {
                Ok(pct) if (0.0..=100.0).contains(&pct) => {
                    config.tax_rate_bps = TaxRate::from_percentage(pct).bps();
                }
                _ => warn!(value = %raw, "Ignoring invalid PEERCAFE_TAX_RATE"),
            }
        }

        if let Some(raw) = lookup("PEERCAFE_DELIVERY_FEE_CENTS") {
            match raw.trim().parse::<i64>() {
                Ok(cents) if cents >= 0 => config.delivery_fee_cents = cents,
                _ => warn!(value = %raw, "Ignoring invalid PEERCAFE_DELIVERY_FEE_CENTS"),
            }
        }

        if let Some(raw) = lookup("PEERCAFE_POLL_INTERVAL_SECS") {
            match raw.trim().parse::<i64>() {
                Ok(secs) if secs > 0 => config.poll_interval_secs = secs,
                _ => warn!(value = %raw, "Ignoring invalid PEERCAFE_POLL_INTERVAL_SECS"),
            }
        }

        config
    }

    /// Storage keys for [`crate::CartStore::load_with_keys`].
    pub fn storage_keys(&self) -> StorageKeys {
        StorageKeys {
            items: self.cart_key.clone(),
            restaurant: self.restaurant_key.clone(),
        }
    }

    /// Pricing rules for checkout.
    pub fn pricing(&self) -> PricingRules {
        PricingRules {
            tax_rate: TaxRate::from_bps(self.tax_rate_bps),
            delivery_fee: Money::from_cents(self.delivery_fee_cents),
        }
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::seconds(self.poll_interval_secs)
    }

    /// Refetch schedule for order tracking, at the configured interval.
    pub fn status_poller(&self) -> StatusPoller {
        StatusPoller::new(self.poll_interval())
    }

    /// Formats a cent amount as a currency string.
    ///
    /// ## Example
    /// ```rust
    /// use peercafe_store::StoreConfig;
    ///
    /// let config = StoreConfig::default();
    /// assert_eq!(config.format_currency(1234), "$12.34");
    /// ```
    pub fn format_currency(&self, cents: i64) -> String {
        let whole = cents / 100;
        let frac = (cents % 100).abs();

        format!(
            "{}{}{}.{:02}",
            if cents < 0 { "-" } else { "" },
            self.currency_symbol,
            whole.abs(),
            frac
        )
    }
}

fn default_data_dir() -> PathBuf {
    ProjectDirs::from("com", "peercafe", "cart")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".peercafe"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = StoreConfig::from_lookup(|_| None);
        assert_eq!(config.cart_key, "peerCafeCart");
        assert_eq!(config.restaurant_key, "peerCafeCartRestaurant");
        assert_eq!(config.pricing(), PricingRules::default());
        assert_eq!(config.poll_interval(), Duration::seconds(10));
    }

    #[test]
    fn test_env_overrides() {
        let config = StoreConfig::from_lookup(lookup_from(&[
            ("PEERCAFE_DATA_DIR", "/tmp/peercafe"),
            ("PEERCAFE_TAX_RATE", "8.25"),
            ("PEERCAFE_DELIVERY_FEE_CENTS", "0"),
            ("PEERCAFE_POLL_INTERVAL_SECS", "3"),
        ]));

        assert_eq!(config.data_dir, PathBuf::from("/tmp/peercafe"));
        assert_eq!(config.tax_rate_bps, 825);
        assert_eq!(config.pricing().delivery_fee, Money::zero());
        assert_eq!(config.poll_interval(), Duration::seconds(3));
    }

    #[test]
    fn test_invalid_env_values_are_ignored() {
        let config = StoreConfig::from_lookup(lookup_from(&[
            ("PEERCAFE_TAX_RATE", "lots"),
            ("PEERCAFE_DELIVERY_FEE_CENTS", "-5"),
            ("PEERCAFE_POLL_INTERVAL_SECS", "0"),
        ]));

        assert_eq!(config.tax_rate_bps, DEFAULT_TAX_RATE_BPS);
        assert_eq!(config.delivery_fee_cents, DEFAULT_DELIVERY_FEE_CENTS);
        assert_eq!(config.poll_interval_secs, DEFAULT_POLL_INTERVAL_SECS);
    }

    #[test]
    fn test_status_poller_uses_configured_interval() {
        let config = StoreConfig::from_lookup(lookup_from(&[("PEERCAFE_POLL_INTERVAL_SECS", "3")]));
        assert_eq!(config.status_poller().interval(), Duration::seconds(3));
        assert_eq!(
            StoreConfig::default().status_poller().interval(),
            Duration::seconds(DEFAULT_POLL_INTERVAL_SECS)
        );
    }

    #[test]
    fn test_storage_keys() {
        let keys = StoreConfig::default().storage_keys();
        assert_eq!(keys, StorageKeys::default());
    }

    #[test]
    fn test_format_currency() {
        let config = StoreConfig::default();
        assert_eq!(config.format_currency(1234), "$12.34");
        assert_eq!(config.format_currency(1), "$0.01");
        assert_eq!(config.format_currency(0), "$0.00");
        assert_eq!(config.format_currency(-1234), "-$12.34");
    }
}
