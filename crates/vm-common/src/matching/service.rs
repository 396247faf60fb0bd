use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, instrument};

use super::scoring::{MatchOutcome, MatchScorer, Perspective};
use crate::db::{ProfileStore, ProfileStoreError};
use crate::profile::{
    default_demo_investor_profile, default_demo_startup_profile, InvestorProfile, StartupProfile,
};

#[derive(Debug, Error)]
pub enum MatchServiceError {
    #[error("failed to load profiles: {0}")]
    Store(#[from] ProfileStoreError),
}

/// A candidate record decorated with its score; serializes as the candidate's
/// own fields plus `matchScore` and `matchReasons`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchedCandidate<T> {
    #[serde(flatten)]
    pub candidate: T,
    pub match_score: u32,
    pub match_reasons: Vec<String>,
}

/// Result of one full candidate scan.
#[derive(Debug, Clone)]
pub struct MatchRun<T> {
    pub perspective: Perspective,
    /// True when the caller had no stored profile and a placeholder was scored.
    pub demo_mode: bool,
    pub scanned: usize,
    pub matches: Vec<MatchedCandidate<T>>,
}

/// Score every candidate, drop zero scores and sort by score descending.
/// Ties keep no particular order.
pub fn rank_candidates<T, F>(candidates: Vec<T>, mut score: F) -> Vec<MatchedCandidate<T>>
where
    F: FnMut(&T) -> MatchOutcome,
{
    let mut ranked: Vec<MatchedCandidate<T>> = candidates
        .into_iter()
        .filter_map(|candidate| {
            let outcome = score(&candidate);
            (outcome.score > 0).then(|| MatchedCandidate {
                candidate,
                match_score: outcome.score,
                match_reasons: outcome.reasons,
            })
        })
        .collect();

    ranked.sort_unstable_by(|a, b| b.match_score.cmp(&a.match_score));
    ranked
}

/// Startups ranked for an investor. Falls back to the demo preference when the
/// investor has none stored.
#[instrument(skip(store, scorer, rng))]
pub async fn startup_matches_for_investor<S, R>(
    store: &S,
    investor_id: &str,
    scorer: &MatchScorer,
    rng: &mut R,
) -> Result<MatchRun<StartupProfile>, MatchServiceError>
where
    S: ProfileStore + ?Sized,
    R: Rng + Send,
{
    let source: InvestorProfile = store
        .find_preference_by_investor(investor_id)
        .await?
        .unwrap_or_else(default_demo_investor_profile);
    let candidates = store.find_all_startups().await?;

    let run = build_run(Perspective::InvestorView, source.is_synthetic, candidates, |c| {
        scorer.score_startup_for_investor(&source, c, rng)
    });
    log_run(&run);
    Ok(run)
}

/// Investor preferences ranked for a founder's startup. Falls back to the demo
/// startup when the founder has not listed one.
#[instrument(skip(store, scorer, rng))]
pub async fn investor_matches_for_founder<S, R>(
    store: &S,
    founder_id: &str,
    scorer: &MatchScorer,
    rng: &mut R,
) -> Result<MatchRun<InvestorProfile>, MatchServiceError>
where
    S: ProfileStore + ?Sized,
    R: Rng + Send,
{
    let source: StartupProfile = store
        .find_startup_by_founder(founder_id)
        .await?
        .unwrap_or_else(default_demo_startup_profile);
    let candidates = store.find_all_investor_preferences().await?;

    let run = build_run(Perspective::FounderView, source.is_synthetic, candidates, |c| {
        scorer.score_investor_for_founder(&source, c, rng)
    });
    log_run(&run);
    Ok(run)
}

fn build_run<T, F>(
    perspective: Perspective,
    demo_mode: bool,
    candidates: Vec<T>,
    score: F,
) -> MatchRun<T>
where
    F: FnMut(&T) -> MatchOutcome,
{
    let scanned = candidates.len();
    MatchRun {
        perspective,
        demo_mode,
        scanned,
        matches: rank_candidates(candidates, score),
    }
}

fn log_run<T>(run: &MatchRun<T>) {
    info!(
        perspective = run.perspective.as_ref(),
        demo_mode = run.demo_mode,
        scanned = run.scanned,
        surfaced = run.matches.len(),
        "match_run_completed"
    );
}
