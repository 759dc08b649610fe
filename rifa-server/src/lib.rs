//! rifa-server: the slot reservation ledger and its HTTP boundary
//!
//! The ledger owns every slot/order mutation. Each transition is a
//! status-guarded UPDATE inside a transaction, so concurrent buyers racing
//! for the same slot resolve to exactly one winner at the database level.

pub mod db;
pub mod http;
pub mod models;
