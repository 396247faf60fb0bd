use axum::{extract::State, Json};
use serde_json::json;
use tokio::time::{timeout, Duration};

use crate::error::ApiError;
use crate::SharedState;

const READINESS_TIMEOUT: Duration = Duration::from_secs(1);

pub async fn livez() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn readyz(State(state): State<SharedState>) -> Result<Json<serde_json::Value>, ApiError> {
    if !state.readiness.load(std::sync::atomic::Ordering::SeqCst) {
        return Err(ApiError::NotReady("shutting_down"));
    }

    timeout(READINESS_TIMEOUT, state.store.ping())
        .await
        .map_err(|_| ApiError::NotReady("store_ping_timeout"))?
        .map_err(ApiError::StoreUnavailable)?;

    Ok(Json(json!({
        "status": "ok",
        "database": "ok",
        "application": env!("CARGO_PKG_NAME"),
    })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::Ordering;
    use std::sync::Arc;

    use vm_common::db::InMemoryProfileStore;

    use crate::test_state_with_store;

    #[tokio::test]
    async fn readyz_rejects_when_readiness_disabled() {
        let state = test_state_with_store("test-key", Arc::new(InMemoryProfileStore::new()));
        state.readiness.store(false, Ordering::SeqCst);

        match readyz(State(state)).await {
            Err(ApiError::NotReady(reason)) => assert_eq!(reason, "shutting_down"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn readyz_reports_store_outage() {
        let store = Arc::new(InMemoryProfileStore::new());
        store.set_unavailable(true);
        let state = test_state_with_store("test-key", store);

        let result = readyz(State(state)).await;
        assert!(matches!(result, Err(ApiError::StoreUnavailable(_))));
    }

    #[tokio::test]
    async fn readyz_ok_with_healthy_store() {
        let state = test_state_with_store("test-key", Arc::new(InMemoryProfileStore::new()));
        let Json(body) = readyz(State(state)).await.unwrap();
        assert_eq!(body["database"], "ok");
    }
}
