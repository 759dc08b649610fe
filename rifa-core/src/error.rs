//! Error types for rifa-core

use thiserror::Error;

use crate::status::SlotStatus;

/// A slot was asked to make a transition its current status does not allow.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransitionError {
    /// Reserve attempted on a slot that is not available
    #[error("slot is {current}, expected available")]
    NotAvailable { current: SlotStatus },

    /// Confirm or cancel attempted on a slot that is not reserved
    #[error("slot is {current}, expected reserved")]
    NotReserved { current: SlotStatus },

    /// Stored status string does not name a known variant
    #[error("unknown status value: '{value}'")]
    UnknownStatus { value: String },
}
