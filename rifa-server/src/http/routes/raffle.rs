//! Raffle endpoints: GET /sorteio, POST /resetar

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::db::repos::{LedgerRepo, WinningSlot};
use crate::http::error::ApiError;
use crate::http::routes::common::{ScopeQuery, SuccessResponse};
use crate::http::server::AppState;

/// Winning slot in the wire contract shape.
#[derive(Serialize)]
pub struct DrawResponse {
    pub success: bool,
    pub nome: WinnerSlotResponse,
    pub comprador: BuyerResponse,
}

#[derive(Serialize)]
pub struct WinnerSlotResponse {
    pub id: i64,
    pub nome: String,
    pub valor: Decimal,
}

#[derive(Serialize)]
pub struct BuyerResponse {
    pub nome: String,
    pub telefone: String,
}

impl From<WinningSlot> for DrawResponse {
    fn from(w: WinningSlot) -> Self {
        Self {
            success: true,
            nome: WinnerSlotResponse {
                id: w.slot_id,
                nome: w.name,
                valor: w.price,
            },
            comprador: BuyerResponse {
                nome: w.buyer_name,
                telefone: w.buyer_phone,
            },
        }
    }
}

/// Reset request
#[derive(Deserialize, Default)]
pub struct ResetRequest {
    #[serde(rename = "usuarioId")]
    pub usuario_id: Option<i64>,
}

/// GET /sorteio - draw the winner once every slot in scope is sold
async fn draw_winner(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ScopeQuery>,
) -> Result<Json<DrawResponse>, ApiError> {
    let winner = LedgerRepo::new(&state.pool)
        .draw_winner(query.usuario_id)
        .await?;

    Ok(Json(DrawResponse::from(winner)))
}

/// POST /resetar - cancel all orders, free all slots, arm a new winner
async fn reset(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ResetRequest>,
) -> Result<Json<SuccessResponse>, ApiError> {
    LedgerRepo::new(&state.pool).reset(req.usuario_id).await?;
    Ok(Json(SuccessResponse { success: true }))
}

/// Raffle routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/sorteio", get(draw_winner))
        .route("/resetar", post(reset))
}
