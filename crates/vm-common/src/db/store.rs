use async_trait::async_trait;
use deadpool_postgres::PoolError;
use thiserror::Error;
use tokio_postgres::Error as PgError;

use crate::profile::{InvestorProfile, StartupProfile};

#[derive(Debug, Error)]
pub enum ProfileStoreError {
    #[error("failed to get postgres connection: {0}")]
    Pool(#[from] PoolError),
    #[error("postgres error: {0}")]
    Postgres(#[from] PgError),
    #[error("profile store unavailable: {0}")]
    Unavailable(String),
}

/// Read-only access to stored profiles. Candidate lists come back with the
/// owner's display name already attached.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn find_preference_by_investor(
        &self,
        investor_id: &str,
    ) -> Result<Option<InvestorProfile>, ProfileStoreError>;

    async fn find_startup_by_founder(
        &self,
        founder_id: &str,
    ) -> Result<Option<StartupProfile>, ProfileStoreError>;

    async fn find_all_startups(&self) -> Result<Vec<StartupProfile>, ProfileStoreError>;

    async fn find_all_investor_preferences(
        &self,
    ) -> Result<Vec<InvestorProfile>, ProfileStoreError>;

    /// Cheap round trip used by the readiness check.
    async fn ping(&self) -> Result<(), ProfileStoreError>;
}
