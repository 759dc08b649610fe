//! Raffle configuration endpoints: GET /configuracao, PUT /configuracao

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::db::repos::{RaffleSettings, SettingsRepo};
use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::models::ValidationError;

/// Settings in the wire contract shape.
#[derive(Serialize)]
pub struct SettingsResponse {
    #[serde(rename = "valorNome")]
    pub valor_nome: Decimal,
    pub premio: String,
    #[serde(rename = "atualizadoEm")]
    pub atualizado_em: String,
}

impl From<RaffleSettings> for SettingsResponse {
    fn from(s: RaffleSettings) -> Self {
        Self {
            valor_nome: s.slot_price,
            premio: s.prize_description,
            atualizado_em: s.updated_at.to_rfc3339(),
        }
    }
}

/// Update settings request
#[derive(Deserialize)]
pub struct UpdateSettingsRequest {
    #[serde(rename = "valorNome")]
    pub valor_nome: Decimal,
    pub premio: String,
}

/// GET /configuracao
async fn get_settings(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SettingsResponse>, ApiError> {
    let settings = SettingsRepo::new(&state.pool).get().await?;
    Ok(Json(SettingsResponse::from(settings)))
}

/// PUT /configuracao
async fn update_settings(
    State(state): State<Arc<AppState>>,
    Json(req): Json<UpdateSettingsRequest>,
) -> Result<Json<SettingsResponse>, ApiError> {
    if req.valor_nome <= Decimal::ZERO {
        return Err(ValidationError::InvalidFormat {
            field: "valorNome",
            reason: "must be greater than zero",
        }
        .into());
    }

    let premio = req.premio.trim();
    if premio.is_empty() {
        return Err(ValidationError::Empty { field: "premio" }.into());
    }

    let settings = SettingsRepo::new(&state.pool)
        .upsert(req.valor_nome, premio)
        .await?;

    Ok(Json(SettingsResponse::from(settings)))
}

/// Settings routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/configuracao", get(get_settings).put(update_settings))
}
