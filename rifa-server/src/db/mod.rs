//! Database layer - connection pool, migrations, and repositories
//!
//! # Design Principles
//!
//! - Connection pool passed explicitly to repositories - no module-level
//!   singleton
//! - Status transitions are conditional UPDATEs with checked row counts -
//!   no SELECT-then-UPDATE
//! - Transactions for every multi-step operation
//! - Batch inserts are parameterized (UNNEST) - no SQL string assembly

pub mod migrations;
pub mod pool;
pub mod repos;

pub use pool::create_pool;
pub use repos::*;
