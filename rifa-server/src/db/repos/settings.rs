//! Raffle settings repository
//!
//! Single-row configuration (slot price, prize description) consumed by
//! seeding and exposed over HTTP. Not part of the ledger invariants.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};

use super::LedgerError;

/// The configuration row.
#[derive(Debug, Clone, FromRow)]
pub struct RaffleSettings {
    pub slot_price: Decimal,
    pub prize_description: String,
    pub updated_at: DateTime<Utc>,
}

/// Settings repository.
pub struct SettingsRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> SettingsRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get the settings row.
    pub async fn get(&self) -> Result<RaffleSettings, LedgerError> {
        sqlx::query_as(
            r#"
            SELECT slot_price, prize_description, updated_at
            FROM raffle_settings
            WHERE id = 1
            "#,
        )
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| LedgerError::NotFound {
            resource: "settings",
            id: "1".to_owned(),
        })
    }

    /// Create or update the settings row (idempotent upsert).
    pub async fn upsert(
        &self,
        slot_price: Decimal,
        prize_description: &str,
    ) -> Result<RaffleSettings, LedgerError> {
        let settings = sqlx::query_as(
            r#"
            INSERT INTO raffle_settings (id, slot_price, prize_description)
            VALUES (1, $1, $2)
            ON CONFLICT (id) DO UPDATE SET
                slot_price = EXCLUDED.slot_price,
                prize_description = EXCLUDED.prize_description,
                updated_at = NOW()
            RETURNING slot_price, prize_description, updated_at
            "#,
        )
        .bind(slot_price)
        .bind(prize_description)
        .fetch_one(self.pool)
        .await?;

        Ok(settings)
    }
}
