use axum::{
    extract::{Query, State},
    Json,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use tracing::warn;

use vm_common::api::match_request::{MatchPreviewRequest, MatchQuery};
use vm_common::api::match_response::MatchPreviewResponse;
use vm_common::matching::{
    investor_matches_for_founder, startup_matches_for_investor, MatchRun, MatchServiceError,
    MatchedCandidate, Perspective,
};
use vm_common::{InvestorProfile, StartupProfile};

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::SharedState;

pub type MatchList<T> = Json<Vec<MatchedCandidate<T>>>;

// Entropy-seeded per request: `ThreadRng` is not `Send` and cannot be held
// across the store awaits.
fn request_rng() -> StdRng {
    StdRng::from_entropy()
}

fn finish<T: Serialize>(
    perspective: Perspective,
    result: Result<MatchRun<T>, MatchServiceError>,
    limit: usize,
) -> Result<MatchList<T>, ApiError> {
    let run = match result {
        Ok(run) => run,
        Err(err) => {
            warn!(perspective = perspective.as_ref(), error = %err, "match_run_failed");
            vm_metrics::record_match_failure(perspective.as_ref());
            return Err(err.into());
        }
    };

    let mut matches = run.matches;
    matches.truncate(limit);
    vm_metrics::record_match_run(perspective.as_ref(), run.demo_mode, matches.len());

    Ok(Json(matches))
}

/// Startups for the calling investor, best first.
pub async fn startup_matches(
    State(state): State<SharedState>,
    auth: AuthUser,
    Query(query): Query<MatchQuery>,
) -> Result<MatchList<StartupProfile>, ApiError> {
    let limit = state.match_config.effective_limit(query.limit);
    let mut rng = request_rng();

    let result =
        startup_matches_for_investor(state.store.as_ref(), &auth.subject, &state.scorer, &mut rng)
            .await;

    finish(Perspective::InvestorView, result, limit)
}

/// Investor preferences for the calling founder's startup, best first.
pub async fn investor_matches(
    State(state): State<SharedState>,
    auth: AuthUser,
    Query(query): Query<MatchQuery>,
) -> Result<MatchList<InvestorProfile>, ApiError> {
    let limit = state.match_config.effective_limit(query.limit);
    let mut rng = request_rng();

    let result =
        investor_matches_for_founder(state.store.as_ref(), &auth.subject, &state.scorer, &mut rng)
            .await;

    finish(Perspective::FounderView, result, limit)
}

pub async fn preview_match(
    State(state): State<SharedState>,
    _auth: AuthUser,
    Json(request): Json<MatchPreviewRequest>,
) -> Result<Json<MatchPreviewResponse>, ApiError> {
    let mut rng = request_rng();

    let outcome = match request.perspective {
        Perspective::InvestorView => {
            state
                .scorer
                .score_startup_for_investor(&request.investor, &request.startup, &mut rng)
        }
        Perspective::FounderView => {
            state
                .scorer
                .score_investor_for_founder(&request.startup, &request.investor, &mut rng)
        }
    };

    Ok(Json(MatchPreviewResponse::new(request.perspective, outcome)))
}
