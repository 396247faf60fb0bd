use serde::Deserialize;

use crate::matching::Perspective;
use crate::profile::{InvestorProfile, StartupProfile};

/// Query string accepted by both match listing endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MatchQuery {
    /// Truncates the ranked list; clamped to 1..=200 by the handler.
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Ad-hoc scoring of one pair. `perspective` decides which profile is the
/// source: the investor for `investor_view`, the startup for `founder_view`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchPreviewRequest {
    pub perspective: Perspective,
    pub investor: InvestorProfile,
    pub startup: StartupProfile,
}
