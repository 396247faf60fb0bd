use serde::{Deserialize, Serialize};

use crate::matching::{MatchOutcome, Perspective, ScoringConfig};

pub const DEFAULT_MATCH_LIMIT: usize = 50;
pub const MAX_MATCH_LIMIT: usize = 200;

/// Scoring result for a single previewed pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchPreviewResponse {
    pub perspective: Perspective,
    pub match_score: u32,
    pub match_reasons: Vec<String>,
}

impl MatchPreviewResponse {
    pub fn new(perspective: Perspective, outcome: MatchOutcome) -> Self {
        Self {
            perspective,
            match_score: outcome.score,
            match_reasons: outcome.reasons,
        }
    }
}

/// Runtime knobs for the match endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchConfig {
    /// Random variance for callers without a stored profile.
    pub demo_variance: bool,
    pub default_limit: usize,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            demo_variance: true,
            default_limit: DEFAULT_MATCH_LIMIT,
        }
    }
}

impl MatchConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            demo_variance: lookup("VM_DEMO_VARIANCE")
                .map(|value| !(value == "0" || value.eq_ignore_ascii_case("false")))
                .unwrap_or(defaults.demo_variance),
            default_limit: lookup("VM_MATCH_DEFAULT_LIMIT")
                .and_then(|s| s.parse::<usize>().ok())
                .map(|limit| limit.clamp(1, MAX_MATCH_LIMIT))
                .unwrap_or(defaults.default_limit),
        }
    }

    pub fn scoring_config(&self) -> ScoringConfig {
        ScoringConfig {
            demo_variance: self.demo_variance,
            ..ScoringConfig::default()
        }
    }

    /// Requested limit clamped to 1..=200, or the configured default.
    pub fn effective_limit(&self, requested: Option<usize>) -> usize {
        requested
            .unwrap_or(self.default_limit)
            .clamp(1, MAX_MATCH_LIMIT)
    }
}
