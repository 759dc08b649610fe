//! Slot endpoints: GET /nomes, POST /reservar

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::db::repos::{LedgerRepo, Slot, SlotRepo};
use crate::http::error::ApiError;
use crate::http::routes::common::ScopeQuery;
use crate::http::server::AppState;

/// Slot in the wire contract shape.
#[derive(Serialize)]
pub struct SlotResponse {
    pub id: i64,
    pub nome: String,
    pub valor: Decimal,
    pub status: String,
}

impl From<Slot> for SlotResponse {
    fn from(s: Slot) -> Self {
        Self {
            id: s.id,
            nome: s.name,
            valor: s.price,
            status: s.status,
        }
    }
}

/// Reserve request
#[derive(Deserialize)]
pub struct ReserveRequest {
    #[serde(rename = "nomeId")]
    pub nome_id: i64,
}

/// Reserve response
#[derive(Serialize)]
pub struct ReserveResponse {
    pub success: bool,
    pub nome: SlotResponse,
}

/// GET /nomes - list slots in scope, ascending by id
async fn list_slots(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ScopeQuery>,
) -> Result<Json<Vec<SlotResponse>>, ApiError> {
    let slots = SlotRepo::new(&state.pool).list(query.usuario_id).await?;
    Ok(Json(slots.into_iter().map(SlotResponse::from).collect()))
}

/// POST /reservar - transition a slot available -> reserved
async fn reserve_slot(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ReserveRequest>,
) -> Result<Json<ReserveResponse>, ApiError> {
    let slot = LedgerRepo::new(&state.pool).reserve(req.nome_id).await?;

    Ok(Json(ReserveResponse {
        success: true,
        nome: SlotResponse::from(slot),
    }))
}

/// Slot routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/nomes", get(list_slots))
        .route("/reservar", post(reserve_slot))
}
