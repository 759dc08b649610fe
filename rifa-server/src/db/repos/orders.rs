//! Order repository - read side
//!
//! Order mutation (create on purchase, confirm, cancel) belongs to the
//! ledger; this repository lists orders joined with their slot's display
//! name in a single query.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::LedgerError;

/// Order joined with slot display name for list views.
#[derive(Debug, Clone, FromRow)]
pub struct OrderWithSlot {
    pub id: Uuid,
    pub slot_id: i64,
    pub slot_name: String,
    pub buyer_name: String,
    pub buyer_phone: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Order repository.
pub struct OrderRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List orders in a scope, newest first, each with its slot name.
    pub async fn list(&self, scope: Option<i64>) -> Result<Vec<OrderWithSlot>, LedgerError> {
        let orders = sqlx::query_as(
            r#"
            SELECT
                o.id,
                o.slot_id,
                s.name AS slot_name,
                o.buyer_name,
                o.buyer_phone,
                o.status,
                o.created_at
            FROM orders o
            JOIN slots s ON s.id = o.slot_id
            WHERE o.usuario_id IS NOT DISTINCT FROM $1
            ORDER BY o.created_at DESC
            "#,
        )
        .bind(scope)
        .fetch_all(self.pool)
        .await?;

        Ok(orders)
    }
}
