use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::db::store::{ProfileStore, ProfileStoreError};
use crate::profile::{InvestorProfile, StartupProfile};

/// In-process [`ProfileStore`] for tests and local demos.
///
/// Display names are resolved from the registered users at read time, the same
/// way the Postgres store joins `vm.users`.
#[derive(Default)]
pub struct InMemoryProfileStore {
    users: RwLock<HashMap<String, String>>,
    preferences: RwLock<Vec<InvestorProfile>>,
    startups: RwLock<Vec<StartupProfile>>,
    unavailable: AtomicBool,
}

impl InMemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_user(&self, id: impl Into<String>, name: impl Into<String>) {
        self.users.write().await.insert(id.into(), name.into());
    }

    pub async fn insert_preference(&self, preference: InvestorProfile) {
        self.preferences.write().await.push(preference);
    }

    pub async fn insert_startup(&self, startup: StartupProfile) {
        self.startups.write().await.push(startup);
    }

    /// Simulate an outage: every call fails until switched back.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn ensure_available(&self) -> Result<(), ProfileStoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(ProfileStoreError::Unavailable(
                "in-memory store marked unavailable".into(),
            ));
        }
        Ok(())
    }

    async fn with_investor_name(&self, mut preference: InvestorProfile) -> InvestorProfile {
        if let Some(id) = preference.investor_id.as_deref() {
            if let Some(name) = self.users.read().await.get(id) {
                preference.investor_name = Some(name.clone());
            }
        }
        preference
    }

    async fn with_founder_name(&self, mut startup: StartupProfile) -> StartupProfile {
        if let Some(id) = startup.founder_id.as_deref() {
            if let Some(name) = self.users.read().await.get(id) {
                startup.founder_name = Some(name.clone());
            }
        }
        startup
    }
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn find_preference_by_investor(
        &self,
        investor_id: &str,
    ) -> Result<Option<InvestorProfile>, ProfileStoreError> {
        self.ensure_available()?;
        let found = self
            .preferences
            .read()
            .await
            .iter()
            .rev()
            .find(|p| p.investor_id.as_deref() == Some(investor_id))
            .cloned();

        match found {
            Some(preference) => Ok(Some(self.with_investor_name(preference).await)),
            None => Ok(None),
        }
    }

    async fn find_startup_by_founder(
        &self,
        founder_id: &str,
    ) -> Result<Option<StartupProfile>, ProfileStoreError> {
        self.ensure_available()?;
        let found = self
            .startups
            .read()
            .await
            .iter()
            .rev()
            .find(|s| s.founder_id.as_deref() == Some(founder_id))
            .cloned();

        match found {
            Some(startup) => Ok(Some(self.with_founder_name(startup).await)),
            None => Ok(None),
        }
    }

    async fn find_all_startups(&self) -> Result<Vec<StartupProfile>, ProfileStoreError> {
        self.ensure_available()?;
        let startups = self.startups.read().await.clone();

        let mut named = Vec::with_capacity(startups.len());
        for startup in startups {
            named.push(self.with_founder_name(startup).await);
        }
        Ok(named)
    }

    async fn find_all_investor_preferences(
        &self,
    ) -> Result<Vec<InvestorProfile>, ProfileStoreError> {
        self.ensure_available()?;
        let preferences = self.preferences.read().await.clone();

        let mut named = Vec::with_capacity(preferences.len());
        for preference in preferences {
            named.push(self.with_investor_name(preference).await);
        }
        Ok(named)
    }

    async fn ping(&self) -> Result<(), ProfileStoreError> {
        self.ensure_available()
    }
}
