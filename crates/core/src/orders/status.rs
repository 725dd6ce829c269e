//! Order status

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::parse::ParseVariantError;

/// Lifecycle stage of an order. Variants are declared in lifecycle order, so
/// the derived ordering follows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Order received, not yet started
    Processing,

    /// In the kitchen
    Preparing,

    /// Ready for pickup or dispatch
    Ready,

    /// Out for delivery
    Delivering,

    /// Handed over
    Completed,
}

/// A step of the order progress tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusStep {
    /// Status this step represents
    pub status: OrderStatus,

    /// Whether the order has reached this step
    pub completed: bool,

    /// Whether this is the order's current status
    pub current: bool,
}

impl OrderStatus {
    /// Every status in lifecycle order.
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Processing,
        OrderStatus::Preparing,
        OrderStatus::Ready,
        OrderStatus::Delivering,
        OrderStatus::Completed,
    ];

    /// The status one step forward, or `None` once completed.
    pub const fn next(self) -> Option<Self> {
        match self {
            OrderStatus::Processing => Some(OrderStatus::Preparing),
            OrderStatus::Preparing => Some(OrderStatus::Ready),
            OrderStatus::Ready => Some(OrderStatus::Delivering),
            OrderStatus::Delivering => Some(OrderStatus::Completed),
            OrderStatus::Completed => None,
        }
    }

    /// Whether no further status follows.
    pub const fn is_terminal(self) -> bool {
        self.next().is_none()
    }

    /// Progress tracker steps; every step up to and including `self` is
    /// completed and the step for `self` is current.
    pub fn progress(self) -> [StatusStep; 5] {
        OrderStatus::ALL.map(|status| StatusStep {
            status,
            completed: status <= self,
            current: status == self,
        })
    }

    /// Lowercase name used in storage and on the command line.
    pub const fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Processing => "processing",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Ready => "ready",
            OrderStatus::Delivering => "delivering",
            OrderStatus::Completed => "completed",
        }
    }
}

/// The status one step forward from `current`, or `None` if it is terminal.
pub const fn next_status(current: OrderStatus) -> Option<OrderStatus> {
    current.next()
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = ParseVariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                ParseVariantError::new(
                    "status",
                    s,
                    "processing, preparing, ready, delivering, completed",
                )
            })
    }
}
