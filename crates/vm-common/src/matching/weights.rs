/// Upper bound of every match score.
pub const MAX_SCORE: u32 = 100;

/// Rule weights used by both match directions.
pub const DEFAULT_WEIGHTS: ScoringWeights = ScoringWeights {
    industry: 45,
    tech_consolation: 15,
    stage: 25,
    location: 20,
    keywords: 10,
};

/// Variance applied when the source profile is a synthetic placeholder.
pub const DEFAULT_DEMO_ADJUSTMENT: DemoAdjustment = DemoAdjustment {
    max_bonus: 14,
    floor: 30,
    floor_boost: 20,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringWeights {
    pub industry: u32,
    /// Awarded instead of `industry` when only one side mentions "technology".
    pub tech_consolation: u32,
    pub stage: u32,
    pub location: u32,
    pub keywords: u32,
}

impl ScoringWeights {
    /// Highest reachable rule total (consolation and industry are exclusive).
    pub fn max_total(&self) -> u32 {
        self.industry.max(self.tech_consolation) + self.stage + self.location + self.keywords
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemoAdjustment {
    /// Inclusive upper bound of the uniform random bonus.
    pub max_bonus: u32,
    /// Post-bonus scores below this get `floor_boost` added.
    pub floor: u32,
    pub floor_boost: u32,
}
