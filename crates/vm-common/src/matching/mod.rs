pub mod scoring;
pub mod service;
pub mod weights;

pub use scoring::{MatchOutcome, MatchScorer, Perspective, ScoringConfig};
pub use service::{
    MatchRun, MatchServiceError, MatchedCandidate, investor_matches_for_founder, rank_candidates,
    startup_matches_for_investor,
};
