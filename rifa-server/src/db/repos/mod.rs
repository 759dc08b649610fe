//! Repository implementations for database access
//!
//! Each repository takes `&PgPool` explicitly and follows these patterns:
//! - Status transitions via conditional UPDATE with checked row counts
//! - Transactions for multi-step operations (purchase, confirm, cancel, reset)
//! - JOINs for list operations (no N+1)
//! - Parameterized batch inserts (no SQL string assembly)

pub mod ledger;
pub mod orders;
pub mod settings;
pub mod slots;

pub use ledger::{LedgerError, LedgerRepo, WinningSlot};
pub use orders::{OrderRepo, OrderWithSlot};
pub use settings::{RaffleSettings, SettingsRepo};
pub use slots::{Slot, SlotRepo};
