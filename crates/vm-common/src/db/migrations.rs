use deadpool_postgres::PoolError;
use thiserror::Error;
use tokio_postgres::Error as PgError;
use tracing::{info, instrument};

use crate::db::PgPool;

#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("failed to get postgres connection: {0}")]
    Pool(#[from] PoolError),
    #[error("failed to run migration: {0}")]
    Postgres(#[from] PgError),
}

struct Migration {
    id: i32,
    description: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        id: 1,
        description: "users, investor preferences and startups",
        sql: r#"
CREATE TABLE IF NOT EXISTS vm.users (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    role TEXT NOT NULL CHECK (role IN ('investor', 'founder')),
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE TABLE IF NOT EXISTS vm.investor_preferences (
    id TEXT PRIMARY KEY DEFAULT gen_random_uuid()::text,
    investor_id TEXT NOT NULL REFERENCES vm.users(id) ON DELETE CASCADE,
    areas_of_interest TEXT,
    preferred_domains TEXT[] NOT NULL DEFAULT '{}',
    investment_amount TEXT,
    stage TEXT,
    location_interest TEXT[] NOT NULL DEFAULT '{}',
    notes TEXT,
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE TABLE IF NOT EXISTS vm.startups (
    id TEXT PRIMARY KEY DEFAULT gen_random_uuid()::text,
    founder_id TEXT NOT NULL REFERENCES vm.users(id) ON DELETE CASCADE,
    name TEXT NOT NULL,
    domain TEXT,
    stage TEXT,
    location TEXT,
    summary TEXT,
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
"#,
    },
    Migration {
        id: 2,
        description: "owner lookup indexes",
        sql: r#"
CREATE INDEX IF NOT EXISTS idx_investor_preferences_investor
    ON vm.investor_preferences(investor_id, updated_at DESC);
CREATE INDEX IF NOT EXISTS idx_startups_founder
    ON vm.startups(founder_id, updated_at DESC);
"#,
    },
];

/// Apply pending migrations in order; each one runs in its own transaction and
/// is recorded in `vm.schema_migrations`.
#[instrument(skip(pool))]
pub async fn run_migrations(pool: &PgPool) -> Result<(), MigrationError> {
    let mut client = pool.get().await?;
    client
        .batch_execute(
            "CREATE SCHEMA IF NOT EXISTS vm;
             CREATE TABLE IF NOT EXISTS vm.schema_migrations (
                id INTEGER PRIMARY KEY,
                description TEXT NOT NULL,
                applied_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
             );",
        )
        .await?;

    for migration in MIGRATIONS {
        let already_applied: bool = client
            .query_one(
                "SELECT EXISTS (SELECT 1 FROM vm.schema_migrations WHERE id = $1)",
                &[&migration.id],
            )
            .await?
            .get(0);

        if already_applied {
            continue;
        }

        let tx = client.transaction().await?;
        tx.batch_execute(migration.sql).await?;
        tx.execute(
            "INSERT INTO vm.schema_migrations (id, description) VALUES ($1, $2)",
            &[&migration.id, &migration.description],
        )
        .await?;
        tx.commit().await?;

        info!(
            id = migration.id,
            description = migration.description,
            "applied migration"
        );
    }

    Ok(())
}
