//! Order endpoints: POST /comprar, GET /pedidos, POST /confirmar, POST /cancelar

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::repos::{LedgerRepo, OrderRepo, OrderWithSlot};
use crate::http::error::ApiError;
use crate::http::routes::common::{ScopeQuery, SuccessResponse};
use crate::http::server::AppState;
use crate::models::{BuyerName, Phone};

/// Purchase request
#[derive(Deserialize)]
pub struct PurchaseRequest {
    #[serde(rename = "nomeId")]
    pub nome_id: i64,
    #[serde(rename = "usuarioNome")]
    pub usuario_nome: String,
    pub telefone: String,
}

/// Purchase response
#[derive(Serialize)]
pub struct PurchaseResponse {
    pub success: bool,
    #[serde(rename = "pedidoId")]
    pub pedido_id: Uuid,
}

/// Order in the wire contract shape, joined with its slot name.
#[derive(Serialize)]
pub struct OrderResponse {
    pub id: Uuid,
    #[serde(rename = "nomeId")]
    pub nome_id: i64,
    pub nome: String,
    #[serde(rename = "usuarioNome")]
    pub usuario_nome: String,
    pub telefone: String,
    pub status: String,
    #[serde(rename = "criadoEm")]
    pub criado_em: DateTime<Utc>,
}

impl From<OrderWithSlot> for OrderResponse {
    fn from(o: OrderWithSlot) -> Self {
        Self {
            id: o.id,
            nome_id: o.slot_id,
            nome: o.slot_name,
            usuario_nome: o.buyer_name,
            telefone: o.buyer_phone,
            status: o.status,
            criado_em: o.created_at,
        }
    }
}

/// Confirm/cancel request: keyed by slot, optional order cross-check.
#[derive(Deserialize)]
pub struct TransitionRequest {
    #[serde(rename = "nomeId")]
    pub nome_id: i64,
    #[serde(rename = "pedidoId")]
    pub pedido_id: Option<Uuid>,
}

/// POST /comprar - atomically reserve a slot and create its pending order
async fn purchase(
    State(state): State<Arc<AppState>>,
    Json(req): Json<PurchaseRequest>,
) -> Result<Json<PurchaseResponse>, ApiError> {
    let buyer = BuyerName::new(&req.usuario_nome)?;
    let phone = Phone::new(&req.telefone)?;

    let (_slot, order_id) = LedgerRepo::new(&state.pool)
        .purchase(req.nome_id, buyer.as_str(), phone.as_str())
        .await?;

    Ok(Json(PurchaseResponse {
        success: true,
        pedido_id: order_id,
    }))
}

/// GET /pedidos - list orders joined with slot names, newest first
async fn list_orders(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ScopeQuery>,
) -> Result<Json<Vec<OrderResponse>>, ApiError> {
    let orders = OrderRepo::new(&state.pool).list(query.usuario_id).await?;
    Ok(Json(orders.into_iter().map(OrderResponse::from).collect()))
}

/// POST /confirmar - slot reserved -> sold, order pending -> confirmed
async fn confirm(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TransitionRequest>,
) -> Result<Json<SuccessResponse>, ApiError> {
    LedgerRepo::new(&state.pool)
        .confirm(req.nome_id, req.pedido_id)
        .await?;

    Ok(Json(SuccessResponse { success: true }))
}

/// POST /cancelar - slot reserved -> available, order pending -> cancelled
async fn cancel(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TransitionRequest>,
) -> Result<Json<SuccessResponse>, ApiError> {
    LedgerRepo::new(&state.pool)
        .cancel(req.nome_id, req.pedido_id)
        .await?;

    Ok(Json(SuccessResponse { success: true }))
}

/// Order routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/comprar", post(purchase))
        .route("/pedidos", get(list_orders))
        .route("/confirmar", post(confirm))
        .route("/cancelar", post(cancel))
}
