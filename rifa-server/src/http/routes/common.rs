//! Wire types shared across route modules

use serde::{Deserialize, Serialize};

/// Optional tenant scope carried as a query parameter.
#[derive(Deserialize)]
pub struct ScopeQuery {
    #[serde(rename = "usuarioId")]
    pub usuario_id: Option<i64>,
}

/// Bare success response
#[derive(Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}
