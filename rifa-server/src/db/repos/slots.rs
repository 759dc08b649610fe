//! Slot repository - read side plus raffle setup
//!
//! Mutation of slot status belongs to the ledger ([`super::LedgerRepo`]);
//! this repository only lists, fetches, and batch-inserts slots.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};

use super::LedgerError;

/// Slot record from the database.
#[derive(Debug, Clone, FromRow)]
pub struct Slot {
    pub id: i64,
    pub name: String,
    pub price: Decimal,
    pub status: String,
    pub winner_eligible: bool,
    pub usuario_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

/// Slot repository.
pub struct SlotRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> SlotRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all slots in a scope, ascending by id. Read-only.
    pub async fn list(&self, scope: Option<i64>) -> Result<Vec<Slot>, LedgerError> {
        let slots = sqlx::query_as(
            r#"
            SELECT id, name, price, status, winner_eligible, usuario_id, created_at
            FROM slots
            WHERE usuario_id IS NOT DISTINCT FROM $1
            ORDER BY id ASC
            "#,
        )
        .bind(scope)
        .fetch_all(self.pool)
        .await?;

        Ok(slots)
    }

    /// Get a single slot by id.
    pub async fn get(&self, id: i64) -> Result<Slot, LedgerError> {
        let slot = sqlx::query_as(
            r#"
            SELECT id, name, price, status, winner_eligible, usuario_id, created_at
            FROM slots
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| LedgerError::NotFound {
            resource: "slot",
            id: id.to_string(),
        })?;

        Ok(slot)
    }

    /// Batch-insert available slots for a scope.
    ///
    /// Single parameterized statement via UNNEST; never assembles SQL from
    /// the name strings.
    pub async fn seed(
        &self,
        scope: Option<i64>,
        names: &[String],
        price: Decimal,
    ) -> Result<u64, LedgerError> {
        if names.is_empty() {
            return Ok(0);
        }

        let result = sqlx::query(
            r#"
            INSERT INTO slots (name, price, usuario_id)
            SELECT n, $2, $3 FROM UNNEST($1::text[]) AS n
            "#,
        )
        .bind(names)
        .bind(price)
        .bind(scope)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    // Integration tests - run with DATABASE_URL set
    // cargo test -p rifa-server -- --ignored

    use rust_decimal::Decimal;

    use super::*;

    #[tokio::test]
    #[ignore = "requires database"]
    async fn seed_inserts_requested_count() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = crate::db::create_pool(&url).await.expect("pool");
        crate::db::migrations::run(&pool).await.expect("migrations");

        let scope = Some(rand_scope());
        let names: Vec<String> = (1..=5).map(|i| format!("Nome {i}")).collect();
        let inserted = SlotRepo::new(&pool)
            .seed(scope, &names, Decimal::new(1000, 2))
            .await
            .expect("seed failed");

        assert_eq!(inserted, 5);

        let listed = SlotRepo::new(&pool).list(scope).await.expect("list failed");
        assert_eq!(listed.len(), 5);
        assert!(listed.iter().all(|s| s.status == "available"));
        // Ascending by id
        assert!(listed.windows(2).all(|w| w[0].id < w[1].id));
    }

    /// Unique scope per test run so tests can share a database.
    fn rand_scope() -> i64 {
        (uuid::Uuid::new_v4().as_u128() % i64::MAX as u128) as i64
    }
}
