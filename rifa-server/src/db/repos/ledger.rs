//! Slot reservation ledger - the transactional state machine
//!
//! Every transition is a status-guarded UPDATE (compare-and-swap on the
//! status column) with the affected-row count checked, never a SELECT
//! followed by a separate UPDATE. Two requests racing for the same slot
//! therefore resolve at the database: one UPDATE matches, the other sees
//! zero rows and reports the conflict. Multi-step operations run inside a
//! single transaction; dropping the transaction on the error path rolls
//! everything back, so no partial transition is ever observable.

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use rifa_core::SlotStatus;

use super::slots::Slot;

/// Error taxonomy surfaced by the ledger.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// Slot was not available for reserve/purchase
    #[error("slot {slot_id} is {current}, expected available")]
    Conflict { slot_id: i64, current: SlotStatus },

    /// Slot was not reserved for confirm/cancel
    #[error("slot {slot_id} is {current}, expected reserved")]
    InvalidState { slot_id: i64, current: SlotStatus },

    /// Referenced slot, order, winner, or scope is absent
    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },

    /// Draw attempted before the raffle is ready
    #[error("precondition failed: {reason}")]
    Precondition { reason: String },

    /// Transaction or connection failure; the operation rolled back whole
    /// and is safe to retry
    #[error("database error: {0}")]
    Storage(#[from] sqlx::Error),
}

/// Winning slot joined with its confirmed order's buyer info.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct WinningSlot {
    pub slot_id: i64,
    pub name: String,
    pub price: Decimal,
    pub buyer_name: String,
    pub buyer_phone: String,
}

/// The ledger. Exclusive owner of slot/order mutation.
pub struct LedgerRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> LedgerRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Reserve a slot: available -> reserved.
    ///
    /// Single conditional UPDATE; of any number of concurrent reserves for
    /// the same slot, exactly one matches the `status = 'available'` guard.
    pub async fn reserve(&self, slot_id: i64) -> Result<Slot, LedgerError> {
        let updated: Option<Slot> = sqlx::query_as(
            r#"
            UPDATE slots SET status = 'reserved'
            WHERE id = $1 AND status = 'available'
            RETURNING id, name, price, status, winner_eligible, usuario_id, created_at
            "#,
        )
        .bind(slot_id)
        .fetch_optional(self.pool)
        .await?;

        match updated {
            Some(slot) => Ok(slot),
            None => Err(classify_failure(self.pool, slot_id, Expected::Available).await),
        }
    }

    /// Purchase a slot: atomically reserve it and create a pending order.
    ///
    /// One transaction around both steps. If the order insert fails the
    /// reserve rolls back with it, so a slot is never left reserved without
    /// an order by this path.
    pub async fn purchase(
        &self,
        slot_id: i64,
        buyer_name: &str,
        buyer_phone: &str,
    ) -> Result<(Slot, Uuid), LedgerError> {
        let mut tx = self.pool.begin().await?;

        let reserved: Option<Slot> = sqlx::query_as(
            r#"
            UPDATE slots SET status = 'reserved'
            WHERE id = $1 AND status = 'available'
            RETURNING id, name, price, status, winner_eligible, usuario_id, created_at
            "#,
        )
        .bind(slot_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(slot) = reserved else {
            return Err(classify_failure(&mut *tx, slot_id, Expected::Available).await);
        };

        // Order inherits the slot's scope. The partial unique index on
        // orders(slot_id) WHERE status <> 'cancelled' backs this up: a
        // lingering active order surfaces as a unique violation here and
        // rolls the reserve back.
        let order_id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO orders (slot_id, buyer_name, buyer_phone, usuario_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(slot_id)
        .bind(buyer_name)
        .bind(buyer_phone)
        .bind(slot.usuario_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if e.as_database_error()
                .is_some_and(|d| d.is_unique_violation())
            {
                LedgerError::Conflict {
                    slot_id,
                    current: SlotStatus::Reserved,
                }
            } else {
                LedgerError::Storage(e)
            }
        })?;

        tx.commit().await?;
        Ok((slot, order_id))
    }

    /// Confirm a sale: slot reserved -> sold, order pending -> confirmed.
    ///
    /// Not idempotent: confirming an already-sold slot fails with
    /// `InvalidState`. A reserved slot with no pending order (reserved via
    /// bare `reserve`) fails with `NotFound` and rolls back, leaving the
    /// slot reserved.
    pub async fn confirm(
        &self,
        slot_id: i64,
        order_id: Option<Uuid>,
    ) -> Result<(), LedgerError> {
        let mut tx = self.pool.begin().await?;

        let sold = sqlx::query(
            r#"
            UPDATE slots SET status = 'sold'
            WHERE id = $1 AND status = 'reserved'
            "#,
        )
        .bind(slot_id)
        .execute(&mut *tx)
        .await?;

        if sold.rows_affected() == 0 {
            return Err(classify_failure(&mut *tx, slot_id, Expected::Reserved).await);
        }

        let confirmed = sqlx::query(
            r#"
            UPDATE orders SET status = 'confirmed'
            WHERE slot_id = $1 AND status = 'pending'
              AND ($2::uuid IS NULL OR id = $2)
            "#,
        )
        .bind(slot_id)
        .bind(order_id)
        .execute(&mut *tx)
        .await?;

        if confirmed.rows_affected() == 0 {
            return Err(LedgerError::NotFound {
                resource: "order",
                id: order_id
                    .map(|o| o.to_string())
                    .unwrap_or_else(|| format!("pending for slot {slot_id}")),
            });
        }

        tx.commit().await?;
        Ok(())
    }

    /// Cancel a reservation: slot reserved -> available, order pending ->
    /// cancelled (soft cancel; the row stays for auditability).
    ///
    /// A bare reservation with no order cancels fine unless the caller
    /// named a specific order, in which case a missing match is `NotFound`.
    pub async fn cancel(
        &self,
        slot_id: i64,
        order_id: Option<Uuid>,
    ) -> Result<(), LedgerError> {
        let mut tx = self.pool.begin().await?;

        let released = sqlx::query(
            r#"
            UPDATE slots SET status = 'available'
            WHERE id = $1 AND status = 'reserved'
            "#,
        )
        .bind(slot_id)
        .execute(&mut *tx)
        .await?;

        if released.rows_affected() == 0 {
            return Err(classify_failure(&mut *tx, slot_id, Expected::Reserved).await);
        }

        let cancelled = sqlx::query(
            r#"
            UPDATE orders SET status = 'cancelled'
            WHERE slot_id = $1 AND status = 'pending'
              AND ($2::uuid IS NULL OR id = $2)
            "#,
        )
        .bind(slot_id)
        .bind(order_id)
        .execute(&mut *tx)
        .await?;

        if cancelled.rows_affected() == 0 {
            if let Some(order_id) = order_id {
                return Err(LedgerError::NotFound {
                    resource: "order",
                    id: order_id.to_string(),
                });
            }
        }

        tx.commit().await?;
        Ok(())
    }

    /// Draw the winner for a scope.
    ///
    /// Requires every slot in the scope to be sold; then returns the
    /// winner-eligible slot with its confirmed buyer, picked uniformly at
    /// random among eligibles (storage-native ORDER BY random()).
    pub async fn draw_winner(&self, scope: Option<i64>) -> Result<WinningSlot, LedgerError> {
        let mut tx = self.pool.begin().await?;

        let (total, unsold): (i64, i64) = sqlx::query_as(
            r#"
            SELECT COUNT(*), COUNT(*) FILTER (WHERE status <> 'sold')
            FROM slots
            WHERE usuario_id IS NOT DISTINCT FROM $1
            "#,
        )
        .bind(scope)
        .fetch_one(&mut *tx)
        .await?;

        if total == 0 {
            return Err(LedgerError::Precondition {
                reason: "no slots in scope".to_owned(),
            });
        }
        if unsold > 0 {
            return Err(LedgerError::Precondition {
                reason: format!("{unsold} of {total} slots not yet sold"),
            });
        }

        let winner: Option<WinningSlot> = sqlx::query_as(
            r#"
            SELECT s.id AS slot_id, s.name, s.price, o.buyer_name, o.buyer_phone
            FROM slots s
            JOIN orders o ON o.slot_id = s.id AND o.status = 'confirmed'
            WHERE s.winner_eligible AND s.usuario_id IS NOT DISTINCT FROM $1
            ORDER BY random()
            LIMIT 1
            "#,
        )
        .bind(scope)
        .fetch_optional(&mut *tx)
        .await?;

        tx.commit().await?;

        winner.ok_or_else(|| LedgerError::NotFound {
            resource: "winner",
            id: scope.map(|s| s.to_string()).unwrap_or_else(|| "-".to_owned()),
        })
    }

    /// Reset a scope for a new raffle round.
    ///
    /// Returns every slot to available with the winner flag cleared,
    /// soft-cancels every order, then marks exactly one uniformly random
    /// slot winner-eligible. All in one transaction.
    ///
    /// The slot update runs first: its row locks make a racing purchase
    /// wait for the reset to commit (then see available and start a fresh
    /// round), and any purchase that committed before the locks were taken
    /// has its order visible to the sweep below. Orders are never left
    /// pending against a freshly reset slot.
    pub async fn reset(&self, scope: Option<i64>) -> Result<(), LedgerError> {
        let mut tx = self.pool.begin().await?;

        let reset = sqlx::query(
            r#"
            UPDATE slots SET status = 'available', winner_eligible = FALSE
            WHERE usuario_id IS NOT DISTINCT FROM $1
            "#,
        )
        .bind(scope)
        .execute(&mut *tx)
        .await?;

        if reset.rows_affected() == 0 {
            return Err(LedgerError::NotFound {
                resource: "scope",
                id: scope.map(|s| s.to_string()).unwrap_or_else(|| "-".to_owned()),
            });
        }

        sqlx::query(
            r#"
            UPDATE orders SET status = 'cancelled'
            WHERE usuario_id IS NOT DISTINCT FROM $1 AND status <> 'cancelled'
            "#,
        )
        .bind(scope)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            UPDATE slots SET winner_eligible = TRUE
            WHERE id = (
                SELECT id FROM slots
                WHERE usuario_id IS NOT DISTINCT FROM $1
                ORDER BY random()
                LIMIT 1
            )
            "#,
        )
        .bind(scope)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }
}

/// Which guard the failed conditional UPDATE carried.
enum Expected {
    Available,
    Reserved,
}

/// Classify a zero-row conditional UPDATE: missing row or wrong status.
///
/// Reads the current status on the same connection for error reporting.
/// The status can move again after this read; the classification is a
/// snapshot for the caller, not a guard.
async fn classify_failure<'c, E>(executor: E, slot_id: i64, expected: Expected) -> LedgerError
where
    E: sqlx::PgExecutor<'c>,
{
    let raw: Result<Option<String>, sqlx::Error> =
        sqlx::query_scalar("SELECT status FROM slots WHERE id = $1")
            .bind(slot_id)
            .fetch_optional(executor)
            .await;

    let raw = match raw {
        Ok(raw) => raw,
        Err(e) => return LedgerError::Storage(e),
    };

    let Some(raw) = raw else {
        return LedgerError::NotFound {
            resource: "slot",
            id: slot_id.to_string(),
        };
    };

    let current = match raw.parse::<SlotStatus>() {
        Ok(current) => current,
        // CHECK constraint makes this unreachable short of schema drift
        Err(e) => return LedgerError::Storage(sqlx::Error::Decode(Box::new(e))),
    };

    match expected {
        Expected::Available => LedgerError::Conflict { slot_id, current },
        Expected::Reserved => LedgerError::InvalidState { slot_id, current },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_names_the_state() {
        let err = LedgerError::Conflict {
            slot_id: 7,
            current: SlotStatus::Sold,
        };
        assert_eq!(err.to_string(), "slot 7 is sold, expected available");

        let err = LedgerError::InvalidState {
            slot_id: 7,
            current: SlotStatus::Available,
        };
        assert_eq!(err.to_string(), "slot 7 is available, expected reserved");
    }
}
