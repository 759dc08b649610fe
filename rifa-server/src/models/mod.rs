//! Request-boundary domain models
//!
//! Validated newtypes for buyer input. Constructing one proves the value
//! passed validation; handlers convert failures to 400s.

pub mod validation;

pub use validation::{BuyerName, Phone, ValidationError};
