//! rifa-core: domain core for the raffle backend
//!
//! Holds the slot/order lifecycle as a pure state machine, independent of
//! any storage or transport. The server crate enforces the same transitions
//! against Postgres with conditional updates; this crate is the single place
//! where the legal transitions are written down and unit tested.

pub mod error;
pub mod status;

pub use error::TransitionError;
pub use status::{OrderStatus, SlotStatus};
