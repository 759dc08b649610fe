//! Route handlers organized by resource

pub mod common;
pub mod health;
pub mod orders;
pub mod raffle;
pub mod settings;
pub mod slots;
