//! Seed command - batch-create slots for a raffle scope
//!
//! Inserts numbered slots, optionally records the raffle settings, then
//! runs a ledger reset so exactly one slot is armed winner-eligible.

use anyhow::{bail, Context, Result};
use clap::Parser;
use rust_decimal::Decimal;

use rifa_server::db::repos::{LedgerRepo, SettingsRepo, SlotRepo};
use rifa_server::db::{create_pool, migrations};

/// Arguments for the seed command
#[derive(Parser, Debug)]
pub struct SeedArgs {
    /// Number of slots to create
    #[arg(long, default_value_t = 100)]
    pub count: u32,

    /// Price per slot, e.g. 10.00
    #[arg(long, default_value = "10.00")]
    pub price: Decimal,

    /// Display-name prefix; slots are named "<prefix> 1" .. "<prefix> N"
    #[arg(long, default_value = "Nome")]
    pub prefix: String,

    /// Tenant scope (usuario_id); omit for the unscoped raffle
    #[arg(long)]
    pub usuario_id: Option<i64>,

    /// Prize description to record in the raffle settings
    #[arg(long)]
    pub prize: Option<String>,

    /// Database URL (overrides environment)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,
}

/// Seed slots and arm the raffle
pub async fn run_seed(args: SeedArgs) -> Result<()> {
    if args.count == 0 {
        bail!("--count must be at least 1");
    }
    if args.price <= Decimal::ZERO {
        bail!("--price must be greater than zero");
    }

    let database_url = args
        .database_url
        .context("DATABASE_URL not set. Set via --database-url, DATABASE_URL env, or .env")?;

    let pool = create_pool(&database_url)
        .await
        .context("Failed to create database pool")?;

    migrations::run(&pool)
        .await
        .context("Failed to run migrations")?;

    let names: Vec<String> = (1..=args.count)
        .map(|i| format!("{} {}", args.prefix, i))
        .collect();

    let inserted = SlotRepo::new(&pool)
        .seed(args.usuario_id, &names, args.price)
        .await
        .context("Failed to seed slots")?;

    if let Some(prize) = &args.prize {
        SettingsRepo::new(&pool)
            .upsert(args.price, prize)
            .await
            .context("Failed to record raffle settings")?;
    }

    // Reset arms the raffle: all slots available, one winner-eligible
    LedgerRepo::new(&pool)
        .reset(args.usuario_id)
        .await
        .context("Failed to arm the raffle")?;

    tracing::info!(
        inserted,
        scope = ?args.usuario_id,
        "Seed complete; raffle armed"
    );
    Ok(())
}
