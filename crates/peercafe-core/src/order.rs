//! # Order Status Tracking
//!
//! Order lifecycle as reported by the backend, and the schedule the order
//! tracking view uses to refetch it.
//!
//! ## Lifecycle
//! ```text
//! pending ─► confirmed ─► preparing ─► ready ─► assigned ─► picked_up ─► en_route ─► delivered
//!    │           │            │          │          │
//!    └───────────┴────────────┴──────────┴──────────┴──────────────► cancelled
//! ```
//!
//! ## Polling
//! The tracking view refetches the order on a fixed interval and stops once
//! the order reaches `delivered` or `cancelled`.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};

/// Default refetch interval for the order tracking view.
pub const DEFAULT_POLL_INTERVAL_SECS: i64 = 10;

// =============================================================================
// Order Status
// =============================================================================

/// Where an order is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Preparing,
    Ready,
    Assigned,
    PickedUp,
    EnRoute,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Statuses in progress-bar order (cancelled is off the track).
    pub const PROGRESS: [OrderStatus; 8] = [
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::Preparing,
        OrderStatus::Ready,
        OrderStatus::Assigned,
        OrderStatus::PickedUp,
        OrderStatus::EnRoute,
        OrderStatus::Delivered,
    ];

    /// Wire name (`picked_up`, `en_route`, ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Ready => "ready",
            OrderStatus::Assigned => "assigned",
            OrderStatus::PickedUp => "picked_up",
            OrderStatus::EnRoute => "en_route",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// 0-based step on the progress bar, `None` for cancelled orders.
    pub fn progress_step(&self) -> Option<usize> {
        Self::PROGRESS.iter().position(|s| s == self)
    }

    /// Fraction of the progress bar to fill, in `[0.0, 1.0]`.
    pub fn progress_fraction(&self) -> f64 {
        match self.progress_step() {
            Some(step) => step as f64 / (Self::PROGRESS.len() - 1) as f64,
            None => 0.0,
        }
    }

    /// Delivered and cancelled orders never change again.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// Whether the customer may still cancel.
    pub fn can_cancel(&self) -> bool {
        !self.is_terminal()
    }

    /// Checks that an order in this status can be cancelled.
    pub fn ensure_cancellable(&self) -> CoreResult<()> {
        if !self.can_cancel() {
            return Err(CoreError::NotCancellable { status: *self });
        }
        Ok(())
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses a wire name (`"picked_up"`).
impl FromStr for OrderStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::PROGRESS
            .iter()
            .chain(std::iter::once(&OrderStatus::Cancelled))
            .find(|status| status.as_str() == s)
            .copied()
            .ok_or_else(|| CoreError::UnknownStatus(s.to_string()))
    }
}

// =============================================================================
// Status Poller
// =============================================================================

/// Fixed-interval refetch schedule for one order.
///
/// ## Usage
/// ```rust
/// use chrono::{Duration, Utc};
/// use peercafe_core::order::{OrderStatus, StatusPoller};
///
/// let mut poller = StatusPoller::new(Duration::seconds(10));
/// let now = Utc::now();
/// assert!(poller.due(now));
///
/// poller.record(OrderStatus::Preparing, now);
/// assert!(!poller.due(now + Duration::seconds(5)));
/// assert!(poller.due(now + Duration::seconds(10)));
///
/// poller.record(OrderStatus::Delivered, now + Duration::seconds(10));
/// assert!(!poller.due(now + Duration::hours(1)));
/// ```
#[derive(Debug, Clone)]
pub struct StatusPoller {
    interval: Duration,
    last_polled_at: Option<DateTime<Utc>>,
    last_status: Option<OrderStatus>,
}

impl StatusPoller {
    pub fn new(interval: Duration) -> Self {
        StatusPoller {
            interval,
            last_polled_at: None,
            last_status: None,
        }
    }

    /// Whether the order should be refetched at `now`.
    pub fn due(&self, now: DateTime<Utc>) -> bool {
        if self.is_finished() {
            return false;
        }
        match self.last_polled_at {
            Some(at) => now >= at + self.interval,
            None => true,
        }
    }

    /// When the next refetch is due, `None` once polling has stopped.
    pub fn next_poll_at(&self) -> Option<DateTime<Utc>> {
        if self.is_finished() {
            return None;
        }
        Some(self.last_polled_at.map_or_else(Utc::now, |at| at + self.interval))
    }

    /// Records the result of a refetch.
    ///
    /// Returns `true` if the status changed since the previous refetch.
    pub fn record(&mut self, status: OrderStatus, at: DateTime<Utc>) -> bool {
        let changed = self.last_status != Some(status);
        self.last_status = Some(status);
        self.last_polled_at = Some(at);
        changed
    }

    /// Last status seen, if any.
    pub fn last_status(&self) -> Option<OrderStatus> {
        self.last_status
    }

    /// Polling stops after a terminal status.
    pub fn is_finished(&self) -> bool {
        self.last_status.is_some_and(|s| s.is_terminal())
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl Default for StatusPoller {
    fn default() -> Self {
        StatusPoller::new(Duration::seconds(DEFAULT_POLL_INTERVAL_SECS))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap()
    }

    #[test]
    fn test_status_wire_names() {
        assert_eq!(serde_json::to_string(&OrderStatus::PickedUp).unwrap(), "\"picked_up\"");
        assert_eq!(
            serde_json::from_str::<OrderStatus>("\"en_route\"").unwrap(),
            OrderStatus::EnRoute
        );
        assert_eq!(OrderStatus::Cancelled.to_string(), "cancelled");
    }

    #[test]
    fn test_status_from_str() {
        assert_eq!("picked_up".parse::<OrderStatus>().unwrap(), OrderStatus::PickedUp);
        assert_eq!("cancelled".parse::<OrderStatus>().unwrap(), OrderStatus::Cancelled);
        assert!(matches!(
            "PickedUp".parse::<OrderStatus>(),
            Err(CoreError::UnknownStatus(_))
        ));
    }

    #[test]
    fn test_progress_steps() {
        assert_eq!(OrderStatus::Pending.progress_step(), Some(0));
        assert_eq!(OrderStatus::Delivered.progress_step(), Some(7));
        assert_eq!(OrderStatus::Cancelled.progress_step(), None);

        assert_eq!(OrderStatus::Pending.progress_fraction(), 0.0);
        assert_eq!(OrderStatus::Delivered.progress_fraction(), 1.0);
    }

    #[test]
    fn test_cancellation_rules() {
        assert!(OrderStatus::Pending.can_cancel());
        assert!(OrderStatus::EnRoute.can_cancel());
        assert!(!OrderStatus::Delivered.can_cancel());
        assert!(!OrderStatus::Cancelled.can_cancel());

        assert!(OrderStatus::Ready.ensure_cancellable().is_ok());
        assert!(matches!(
            OrderStatus::Delivered.ensure_cancellable(),
            Err(CoreError::NotCancellable {
                status: OrderStatus::Delivered
            })
        ));
    }

    #[test]
    fn test_poller_fixed_interval() {
        let mut poller = StatusPoller::new(Duration::seconds(10));
        assert!(poller.due(t0()));

        assert!(poller.record(OrderStatus::Pending, t0()));
        assert!(!poller.due(t0() + Duration::seconds(9)));
        assert!(poller.due(t0() + Duration::seconds(10)));
        assert_eq!(poller.next_poll_at(), Some(t0() + Duration::seconds(10)));

        assert!(!poller.record(OrderStatus::Pending, t0() + Duration::seconds(10)));
        assert!(poller.record(OrderStatus::Confirmed, t0() + Duration::seconds(20)));
        assert_eq!(poller.last_status(), Some(OrderStatus::Confirmed));
    }

    #[test]
    fn test_poller_stops_on_terminal_status() {
        let mut poller = StatusPoller::default();
        assert_eq!(poller.interval(), Duration::seconds(DEFAULT_POLL_INTERVAL_SECS));

        poller.record(OrderStatus::Cancelled, t0());

        assert!(poller.is_finished());
        assert!(!poller.due(t0() + Duration::days(1)));
        assert_eq!(poller.next_poll_at(), None);
    }
}
