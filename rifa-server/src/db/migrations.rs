//! Schema bootstrap for the raffle tables
//!
//! Idempotent CREATE TABLE / CREATE INDEX statements run at startup. Two
//! partial unique indexes carry the ledger invariants the application code
//! must never be trusted with alone:
//!
//! - at most one non-cancelled order per slot
//! - at most one winner-eligible slot per scope

use sqlx::PgPool;

/// Run all migrations.
pub async fn run(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("Running raffle migrations...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS slots (
            id BIGSERIAL PRIMARY KEY,
            name TEXT NOT NULL,
            price NUMERIC(10, 2) NOT NULL,
            status TEXT NOT NULL DEFAULT 'available'
                CHECK (status IN ('available', 'reserved', 'sold')),
            winner_eligible BOOLEAN NOT NULL DEFAULT FALSE,
            usuario_id BIGINT,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS orders (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            slot_id BIGINT NOT NULL REFERENCES slots(id) ON DELETE CASCADE,
            buyer_name TEXT NOT NULL,
            buyer_phone TEXT NOT NULL,
            status TEXT NOT NULL DEFAULT 'pending'
                CHECK (status IN ('pending', 'confirmed', 'cancelled')),
            usuario_id BIGINT,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    // One active (non-cancelled) order per slot, enforced by the database
    // even if two purchase transactions interleave.
    sqlx::query(
        r#"
        CREATE UNIQUE INDEX IF NOT EXISTS orders_one_active_per_slot
        ON orders (slot_id)
        WHERE status <> 'cancelled'
        "#,
    )
    .execute(pool)
    .await?;

    // One winner-eligible slot per scope. COALESCE folds the unscoped
    // (NULL usuario_id) raffle into its own bucket.
    sqlx::query(
        r#"
        CREATE UNIQUE INDEX IF NOT EXISTS slots_one_winner_per_scope
        ON slots ((COALESCE(usuario_id, -1)))
        WHERE winner_eligible
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS orders_slot_id_idx ON orders (slot_id)
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS raffle_settings (
            id INT PRIMARY KEY CHECK (id = 1),
            slot_price NUMERIC(10, 2) NOT NULL,
            prize_description TEXT NOT NULL,
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    tracing::info!("Migrations complete");
    Ok(())
}
