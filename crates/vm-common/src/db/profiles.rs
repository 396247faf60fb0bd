use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio_postgres::Row;
use tracing::instrument;

use crate::db::store::{ProfileStore, ProfileStoreError};
use crate::db::util::timed;
use crate::db::PgPool;
use crate::profile::{InvestorProfile, StartupProfile};

const PREFERENCE_COLUMNS: &str = "p.id, p.investor_id, u.name AS investor_name, \
     p.areas_of_interest, p.preferred_domains, p.investment_amount, p.stage, \
     p.location_interest, p.notes, p.updated_at";

const STARTUP_COLUMNS: &str = "s.id, s.founder_id, u.name AS founder_name, s.name, \
     s.domain, s.stage, s.location, s.summary, s.updated_at";

/// Postgres-backed [`ProfileStore`] over the `vm` schema.
#[derive(Clone)]
pub struct PgProfileStore {
    pool: PgPool,
}

impl PgProfileStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn preference_from_row(row: &Row) -> InvestorProfile {
    InvestorProfile {
        id: row.get("id"),
        investor_id: row.get("investor_id"),
        investor_name: row.get("investor_name"),
        areas_of_interest: row.get("areas_of_interest"),
        preferred_domains: row
            .get::<_, Option<Vec<String>>>("preferred_domains")
            .unwrap_or_default(),
        investment_amount: row.get("investment_amount"),
        stage: row.get("stage"),
        location_interest: row
            .get::<_, Option<Vec<String>>>("location_interest")
            .unwrap_or_default(),
        notes: row.get("notes"),
        updated_at: row.get::<_, Option<DateTime<Utc>>>("updated_at"),
        is_synthetic: false,
    }
}

fn startup_from_row(row: &Row) -> StartupProfile {
    StartupProfile {
        id: row.get("id"),
        founder_id: row.get("founder_id"),
        founder_name: row.get("founder_name"),
        name: row.get("name"),
        domain: row.get("domain"),
        stage: row.get("stage"),
        location: row.get("location"),
        summary: row.get("summary"),
        updated_at: row.get::<_, Option<DateTime<Utc>>>("updated_at"),
        is_synthetic: false,
    }
}

#[async_trait]
impl ProfileStore for PgProfileStore {
    #[instrument(skip(self))]
    async fn find_preference_by_investor(
        &self,
        investor_id: &str,
    ) -> Result<Option<InvestorProfile>, ProfileStoreError> {
        let client = self.pool.get().await?;
        let query = format!(
            "SELECT {PREFERENCE_COLUMNS} \
             FROM vm.investor_preferences p \
             LEFT JOIN vm.users u ON u.id = p.investor_id \
             WHERE p.investor_id = $1 \
             ORDER BY p.updated_at DESC \
             LIMIT 1"
        );

        let statement = client.prepare_cached(&query).await?;
        let row = timed(
            "find_preference_by_investor",
            client.query_opt(&statement, &[&investor_id]),
        )
        .await?;

        Ok(row.as_ref().map(preference_from_row))
    }

    #[instrument(skip(self))]
    async fn find_startup_by_founder(
        &self,
        founder_id: &str,
    ) -> Result<Option<StartupProfile>, ProfileStoreError> {
        let client = self.pool.get().await?;
        let query = format!(
            "SELECT {STARTUP_COLUMNS} \
             FROM vm.startups s \
             LEFT JOIN vm.users u ON u.id = s.founder_id \
             WHERE s.founder_id = $1 \
             ORDER BY s.updated_at DESC \
             LIMIT 1"
        );

        let statement = client.prepare_cached(&query).await?;
        let row = timed(
            "find_startup_by_founder",
            client.query_opt(&statement, &[&founder_id]),
        )
        .await?;

        Ok(row.as_ref().map(startup_from_row))
    }

    #[instrument(skip(self))]
    async fn find_all_startups(&self) -> Result<Vec<StartupProfile>, ProfileStoreError> {
        let client = self.pool.get().await?;
        let query = format!(
            "SELECT {STARTUP_COLUMNS} \
             FROM vm.startups s \
             LEFT JOIN vm.users u ON u.id = s.founder_id"
        );

        let statement = client.prepare_cached(&query).await?;
        let rows = timed("find_all_startups", client.query(&statement, &[])).await?;

        Ok(rows.iter().map(startup_from_row).collect())
    }

    #[instrument(skip(self))]
    async fn find_all_investor_preferences(
        &self,
    ) -> Result<Vec<InvestorProfile>, ProfileStoreError> {
        let client = self.pool.get().await?;
        let query = format!(
            "SELECT {PREFERENCE_COLUMNS} \
             FROM vm.investor_preferences p \
             LEFT JOIN vm.users u ON u.id = p.investor_id"
        );

        let statement = client.prepare_cached(&query).await?;
        let rows = timed(
            "find_all_investor_preferences",
            client.query(&statement, &[]),
        )
        .await?;

        Ok(rows.iter().map(preference_from_row).collect())
    }

    async fn ping(&self) -> Result<(), ProfileStoreError> {
        let client = self.pool.get().await?;
        client.simple_query("SELECT 1").await?;
        Ok(())
    }
}
