//! HTTP boundary - axum router, error mapping, route handlers
//!
//! The wire contract keeps the original Portuguese field and path names
//! (`/nomes`, `/comprar`, `nomeId`, ...); internals use the ledger's
//! vocabulary.

pub mod error;
pub mod routes;
pub mod server;

pub use error::ApiError;
pub use server::{run_server, AppState, ServerConfig};
