//! Slot and order lifecycle - the reservation state machine
//!
//! Per-slot transitions:
//!
//! ```text
//! available --reserve/purchase--> reserved --confirm--> sold
//! reserved --cancel--> available
//! any --reset--> available (batch)
//! ```
//!
//! `sold` is terminal until a full reset. The server enforces these same
//! edges in SQL via status-guarded UPDATEs; the methods here are the
//! canonical definition and the thing the unit tests pin down.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TransitionError;

/// Lifecycle status of a raffle slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotStatus {
    Available,
    Reserved,
    Sold,
}

impl SlotStatus {
    /// Status as stored in the `slots.status` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Reserved => "reserved",
            Self::Sold => "sold",
        }
    }

    /// Transition taken by `reserve` and the first half of `purchase`.
    pub fn begin_reservation(self) -> Result<Self, TransitionError> {
        match self {
            Self::Available => Ok(Self::Reserved),
            other => Err(TransitionError::NotAvailable { current: other }),
        }
    }

    /// Transition taken by `confirm`. Repeated confirms fail: `sold` is not
    /// a legal starting point, so confirm is deliberately not idempotent.
    pub fn confirm_sale(self) -> Result<Self, TransitionError> {
        match self {
            Self::Reserved => Ok(Self::Sold),
            other => Err(TransitionError::NotReserved { current: other }),
        }
    }

    /// Transition taken by `cancel`, releasing the slot for a new buyer.
    pub fn release(self) -> Result<Self, TransitionError> {
        match self {
            Self::Reserved => Ok(Self::Available),
            other => Err(TransitionError::NotReserved { current: other }),
        }
    }

    /// Whether `reset` needs to touch this slot (it always may; reset is a
    /// batch operation and every status maps back to `Available`).
    pub fn after_reset(self) -> Self {
        Self::Available
    }
}

impl fmt::Display for SlotStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SlotStatus {
    type Err = TransitionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available" => Ok(Self::Available),
            "reserved" => Ok(Self::Reserved),
            "sold" => Ok(Self::Sold),
            other => Err(TransitionError::UnknownStatus {
                value: other.to_owned(),
            }),
        }
    }
}

/// Lifecycle status of a purchase order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl OrderStatus {
    /// Status as stored in the `orders.status` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
        }
    }

    /// An order counts against the one-active-order-per-slot invariant
    /// unless it has been cancelled.
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Cancelled)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = TransitionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(TransitionError::UnknownStatus {
                value: other.to_owned(),
            }),
        }
    }
}
