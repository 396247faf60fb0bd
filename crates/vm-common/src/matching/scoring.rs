use rand::Rng;
use serde::{Deserialize, Serialize};
use strum::AsRefStr;

use super::weights::{
    DemoAdjustment, ScoringWeights, DEFAULT_DEMO_ADJUSTMENT, DEFAULT_WEIGHTS, MAX_SCORE,
};
use crate::normalize::{any_overlap, keyword_tokens, overlaps};
use crate::profile::{InvestorProfile, MatchProfile, StartupProfile};

pub const REASON_INDUSTRY: &str = "High industry relevance";
pub const REASON_TECH_SECTOR: &str = "Aligned with tech sector";
pub const REASON_KEYWORDS: &str = "Profile keywords align";
pub const REASON_EMERGING: &str = "Potential emerging match";
pub const REASON_GENERAL: &str = "General sector fit";

const TECH_TOKEN: &str = "technology";

/// Which caller role drives the comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Perspective {
    /// Source is an investor preference, candidates are startups.
    InvestorView,
    /// Source is a startup, candidates are investor preferences.
    FounderView,
}

impl Perspective {
    /// Keyword overlap is only wired for the investor direction.
    pub fn compares_text(self) -> bool {
        matches!(self, Perspective::InvestorView)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchOutcome {
    /// 0..=100
    pub score: u32,
    /// Never empty.
    pub reasons: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct ScoringConfig {
    pub weights: ScoringWeights,
    pub demo: DemoAdjustment,
    /// When false, synthetic sources score exactly like stored ones.
    pub demo_variance: bool,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            weights: DEFAULT_WEIGHTS,
            demo: DEFAULT_DEMO_ADJUSTMENT,
            demo_variance: true,
        }
    }
}

impl ScoringConfig {
    pub fn reproducible() -> Self {
        Self {
            demo_variance: false,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MatchScorer {
    config: ScoringConfig,
}

impl MatchScorer {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Investor looking at a startup.
    pub fn score_startup_for_investor<R: Rng>(
        &self,
        investor: &InvestorProfile,
        startup: &StartupProfile,
        rng: &mut R,
    ) -> MatchOutcome {
        self.score(investor, startup, Perspective::InvestorView, rng)
    }

    /// Founder looking at an investor preference.
    pub fn score_investor_for_founder<R: Rng>(
        &self,
        startup: &StartupProfile,
        investor: &InvestorProfile,
        rng: &mut R,
    ) -> MatchOutcome {
        self.score(startup, investor, Perspective::FounderView, rng)
    }

    /// Run the four additive rules, then the demo adjustment when the source
    /// is synthetic. Reasons follow rule order; `rng` is only consulted in demo mode.
    pub fn score<S, C, R>(
        &self,
        source: &S,
        candidate: &C,
        perspective: Perspective,
        rng: &mut R,
    ) -> MatchOutcome
    where
        S: MatchProfile + ?Sized,
        C: MatchProfile + ?Sized,
        R: Rng,
    {
        let weights = self.config.weights;
        let mut total = 0u32;
        let mut reasons: Vec<String> = Vec::new();

        if let Some((points, reason)) = self.industry_rule(source, candidate) {
            total += points;
            reasons.push(reason);
        }

        if stage_matches(source, candidate) {
            total += weights.stage;
            reasons.push(format!("Matches stage: {}", candidate.stage_label()));
        }

        if let Some(region) = location_match(source, candidate, perspective) {
            total += weights.location;
            reasons.push(format!("Location match ({region})"));
        }

        if perspective.compares_text() && keywords_match(source, candidate) {
            total += weights.keywords;
            reasons.push(REASON_KEYWORDS.to_string());
        }

        if source.is_synthetic() && self.config.demo_variance {
            let demo = self.config.demo;
            total += rng.gen_range(0..=demo.max_bonus);
            if total < demo.floor {
                total += demo.floor_boost;
                reasons.push(REASON_EMERGING.to_string());
            }
        }

        if reasons.is_empty() {
            reasons.push(REASON_GENERAL.to_string());
        }

        MatchOutcome {
            score: total.min(MAX_SCORE),
            reasons,
        }
    }

    fn industry_rule<S, C>(&self, source: &S, candidate: &C) -> Option<(u32, String)>
    where
        S: MatchProfile + ?Sized,
        C: MatchProfile + ?Sized,
    {
        let source_tokens = source.industry_tokens();
        let candidate_tokens = candidate.industry_tokens();

        if any_overlap(&source_tokens, &candidate_tokens) {
            return Some((self.config.weights.industry, REASON_INDUSTRY.to_string()));
        }

        let mentions_tech = source_tokens
            .iter()
            .chain(candidate_tokens.iter())
            .any(|token| token == TECH_TOKEN);
        mentions_tech.then(|| {
            (
                self.config.weights.tech_consolation,
                REASON_TECH_SECTOR.to_string(),
            )
        })
    }
}

fn stage_matches<S, C>(source: &S, candidate: &C) -> bool
where
    S: MatchProfile + ?Sized,
    C: MatchProfile + ?Sized,
{
    overlaps(&source.stage_token(), &candidate.stage_token())
}

/// Returns the startup's raw location when the investor side accepts it.
fn location_match<S, C>(source: &S, candidate: &C, perspective: Perspective) -> Option<String>
where
    S: MatchProfile + ?Sized,
    C: MatchProfile + ?Sized,
{
    // The investor's accepted regions are checked against the startup's single
    // region in both directions.
    let (accepted, region, label) = match perspective {
        Perspective::InvestorView => (
            source.location_tokens(),
            candidate.location_tokens(),
            candidate.location_label(),
        ),
        Perspective::FounderView => (
            candidate.location_tokens(),
            source.location_tokens(),
            source.location_label(),
        ),
    };

    if any_overlap(&accepted, &region) {
        Some(label.unwrap_or_default())
    } else {
        None
    }
}

fn keywords_match<S, C>(source: &S, candidate: &C) -> bool
where
    S: MatchProfile + ?Sized,
    C: MatchProfile + ?Sized,
{
    let source_text = source.text();
    let candidate_text = candidate.text();
    if source_text.is_empty() || candidate_text.is_empty() {
        return false;
    }

    keyword_tokens(&source_text)
        .iter()
        .any(|word| candidate_text.contains(word.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{default_demo_investor_profile, default_demo_startup_profile};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    fn investor() -> InvestorProfile {
        InvestorProfile {
            areas_of_interest: Some("Health,Tech".into()),
            investment_amount: Some("Seed".into()),
            location_interest: vec!["USA".into()],
            ..InvestorProfile::default()
        }
    }

    fn startup() -> StartupProfile {
        StartupProfile {
            domain: Some("Health".into()),
            stage: Some("Seed".into()),
            location: Some("USA".into()),
            ..StartupProfile::default()
        }
    }

    fn disjoint_pair() -> (InvestorProfile, StartupProfile) {
        (
            InvestorProfile {
                areas_of_interest: Some("Retail".into()),
                stage: Some("Series B".into()),
                location_interest: vec!["Germany".into()],
                notes: Some("Consumer brands only".into()),
                ..InvestorProfile::default()
            },
            StartupProfile {
                domain: Some("Agriculture".into()),
                stage: Some("Seed".into()),
                location: Some("Brazil".into()),
                summary: Some("Soil sensors for farms".into()),
                ..StartupProfile::default()
            },
        )
    }

    #[test]
    fn industry_stage_and_location_add_up() {
        let scorer = MatchScorer::default();
        let outcome = scorer.score_startup_for_investor(&investor(), &startup(), &mut rng());

        assert_eq!(outcome.score, 90);
        assert_eq!(
            outcome.reasons,
            vec![
                REASON_INDUSTRY.to_string(),
                "Matches stage: Seed".to_string(),
                "Location match (USA)".to_string(),
            ]
        );
    }

    #[test]
    fn industry_overlap_is_case_insensitive_and_bidirectional() {
        let scorer = MatchScorer::default();
        let source = InvestorProfile {
            areas_of_interest: Some("Technology".into()),
            ..InvestorProfile::default()
        };
        let candidate = StartupProfile {
            domain: Some("technology".into()),
            ..StartupProfile::default()
        };
        let outcome = scorer.score_startup_for_investor(&source, &candidate, &mut rng());
        assert_eq!(outcome.score, 45);
        assert_eq!(outcome.reasons, vec![REASON_INDUSTRY.to_string()]);

        let partial = InvestorProfile {
            areas_of_interest: Some("Tech".into()),
            ..InvestorProfile::default()
        };
        let outcome = scorer.score_startup_for_investor(&partial, &candidate, &mut rng());
        assert_eq!(outcome.score, 45);
    }

    #[test]
    fn tech_consolation_replaces_industry_match() {
        let scorer = MatchScorer::default();
        let source = InvestorProfile {
            areas_of_interest: Some("Retail".into()),
            ..InvestorProfile::default()
        };
        let candidate = StartupProfile {
            domain: Some("Technology".into()),
            ..StartupProfile::default()
        };

        let outcome = scorer.score_startup_for_investor(&source, &candidate, &mut rng());
        assert_eq!(outcome.score, 15);
        assert_eq!(outcome.reasons, vec![REASON_TECH_SECTOR.to_string()]);
        assert!(!outcome.reasons.iter().any(|r| r == REASON_INDUSTRY));
    }

    #[test]
    fn stage_matches_by_containment() {
        let scorer = MatchScorer::default();
        let source = InvestorProfile {
            stage: Some("Seed".into()),
            ..InvestorProfile::default()
        };
        let candidate = StartupProfile {
            stage: Some("Seed Round".into()),
            ..StartupProfile::default()
        };
        let outcome = scorer.score_startup_for_investor(&source, &candidate, &mut rng());
        assert_eq!(outcome.score, 25);
        assert_eq!(outcome.reasons, vec!["Matches stage: Seed Round".to_string()]);
    }

    #[test]
    fn empty_stage_never_matches() {
        let scorer = MatchScorer::default();
        let candidate = StartupProfile {
            stage: Some("Seed".into()),
            ..StartupProfile::default()
        };
        let outcome =
            scorer.score_startup_for_investor(&InvestorProfile::default(), &candidate, &mut rng());
        assert_eq!(outcome.score, 0);
    }

    #[test]
    fn location_checks_any_accepted_region() {
        let scorer = MatchScorer::default();
        let source = InvestorProfile {
            location_interest: vec!["India".into(), "Remote".into()],
            ..InvestorProfile::default()
        };
        let candidate = StartupProfile {
            location: Some("India".into()),
            ..StartupProfile::default()
        };
        let outcome = scorer.score_startup_for_investor(&source, &candidate, &mut rng());
        assert_eq!(outcome.score, 20);
        assert_eq!(outcome.reasons, vec!["Location match (India)".to_string()]);
    }

    #[test]
    fn keywords_need_long_shared_words() {
        let scorer = MatchScorer::default();
        let source = InvestorProfile {
            notes: Some("Looking for healthcare startups".into()),
            ..InvestorProfile::default()
        };
        let candidate = StartupProfile {
            summary: Some("healthcare platform for clinics".into()),
            ..StartupProfile::default()
        };
        let outcome = scorer.score_startup_for_investor(&source, &candidate, &mut rng());
        assert_eq!(outcome.score, 10);
        assert_eq!(outcome.reasons, vec![REASON_KEYWORDS.to_string()]);

        let short_words = InvestorProfile {
            notes: Some("for the ai".into()),
            ..InvestorProfile::default()
        };
        let outcome = scorer.score_startup_for_investor(&short_words, &candidate, &mut rng());
        assert_eq!(outcome.score, 0);
    }

    #[test]
    fn zero_match_reports_general_fit() {
        let scorer = MatchScorer::default();
        let (source, candidate) = disjoint_pair();
        let outcome = scorer.score_startup_for_investor(&source, &candidate, &mut rng());
        assert_eq!(outcome.score, 0);
        assert_eq!(outcome.reasons, vec![REASON_GENERAL.to_string()]);
    }

    #[test]
    fn founder_view_checks_investor_accepts_my_region() {
        let scorer = MatchScorer::default();
        let founder = StartupProfile {
            location: Some("India".into()),
            ..StartupProfile::default()
        };
        let accepting = InvestorProfile {
            location_interest: vec!["India, Remote".into()],
            ..InvestorProfile::default()
        };
        let outcome = scorer.score_investor_for_founder(&founder, &accepting, &mut rng());
        assert_eq!(outcome.score, 20);
        assert_eq!(outcome.reasons, vec!["Location match (India)".to_string()]);
    }

    #[test]
    fn founder_view_never_compares_text() {
        let scorer = MatchScorer::default();
        let founder = StartupProfile {
            summary: Some("healthcare platform for clinics".into()),
            ..StartupProfile::default()
        };
        let investor = InvestorProfile {
            notes: Some("healthcare platform for clinics".into()),
            ..InvestorProfile::default()
        };
        let outcome = scorer.score_investor_for_founder(&founder, &investor, &mut rng());
        assert_eq!(outcome.score, 0);
        assert_eq!(outcome.reasons, vec![REASON_GENERAL.to_string()]);
    }

    #[test]
    fn founder_view_uses_investor_stage_label() {
        let scorer = MatchScorer::default();
        let founder = StartupProfile {
            domain: Some("Fintech".into()),
            stage: Some("Series A".into()),
            ..StartupProfile::default()
        };
        let investor = InvestorProfile {
            areas_of_interest: Some("fintech, insurtech".into()),
            investment_amount: Some("Series A".into()),
            ..InvestorProfile::default()
        };
        let outcome = scorer.score_investor_for_founder(&founder, &investor, &mut rng());
        assert_eq!(outcome.score, 70);
        assert_eq!(
            outcome.reasons,
            vec![
                REASON_INDUSTRY.to_string(),
                "Matches stage: Series A".to_string()
            ]
        );
    }

    #[test]
    fn demo_source_adds_seeded_bonus() {
        let scorer = MatchScorer::default();
        let mut source = investor();
        source.is_synthetic = true;

        let mut expected_rng = StdRng::seed_from_u64(42);
        let bonus: u32 = expected_rng.gen_range(0..=DEFAULT_DEMO_ADJUSTMENT.max_bonus);

        let mut rng = StdRng::seed_from_u64(42);
        let outcome = scorer.score_startup_for_investor(&source, &startup(), &mut rng);

        assert_eq!(outcome.score, (90 + bonus).min(MAX_SCORE));
        assert!(!outcome.reasons.iter().any(|r| r == REASON_EMERGING));
    }

    #[test]
    fn demo_floor_boost_replaces_general_reason() {
        let scorer = MatchScorer::default();
        let (mut source, candidate) = disjoint_pair();
        source.is_synthetic = true;

        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let outcome = scorer.score_startup_for_investor(&source, &candidate, &mut rng);
            assert!((20..=34).contains(&outcome.score), "score {}", outcome.score);
            assert_eq!(outcome.reasons, vec![REASON_EMERGING.to_string()]);
        }
    }

    #[test]
    fn demo_scores_never_drop_below_rules_or_exceed_max() {
        let scorer = MatchScorer::default();
        let reproducible = MatchScorer::new(ScoringConfig::reproducible());
        let source = default_demo_investor_profile();
        let candidates = [
            startup(),
            StartupProfile {
                domain: Some("Technology".into()),
                stage: Some("Seed".into()),
                location: Some("India".into()),
                summary: Some("scalable technology for clinics".into()),
                ..StartupProfile::default()
            },
            disjoint_pair().1,
        ];

        for candidate in &candidates {
            let base = reproducible
                .score_startup_for_investor(&source, candidate, &mut rng())
                .score;
            for seed in 0..30 {
                let mut rng = StdRng::seed_from_u64(seed);
                let outcome = scorer.score_startup_for_investor(&source, candidate, &mut rng);
                assert!(outcome.score >= base);
                assert!(outcome.score <= MAX_SCORE);
                assert!(!outcome.reasons.is_empty());
            }
        }
    }

    #[test]
    fn full_match_clamps_at_max() {
        let scorer = MatchScorer::default();
        let source = default_demo_investor_profile();
        let candidate = StartupProfile {
            domain: Some("Technology".into()),
            stage: Some("Seed".into()),
            location: Some("India".into()),
            summary: Some("innovative scalable technology".into()),
            ..StartupProfile::default()
        };

        let reproducible = MatchScorer::new(ScoringConfig::reproducible());
        assert_eq!(
            reproducible
                .score_startup_for_investor(&source, &candidate, &mut rng())
                .score,
            100
        );

        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let outcome = scorer.score_startup_for_investor(&source, &candidate, &mut rng);
            assert_eq!(outcome.score, 100);
        }
    }

    #[test]
    fn demo_founder_uses_synthetic_startup() {
        let scorer = MatchScorer::default();
        let founder = default_demo_startup_profile();
        let investor = InvestorProfile {
            areas_of_interest: Some("Technology".into()),
            stage: Some("Seed".into()),
            location_interest: vec!["India".into()],
            ..InvestorProfile::default()
        };
        let outcome = scorer.score_investor_for_founder(&founder, &investor, &mut rng());
        assert!(outcome.score >= 90);
        assert!(outcome.score <= MAX_SCORE);
    }

    #[test]
    fn perspective_labels_are_snake_case() {
        assert_eq!(Perspective::InvestorView.as_ref(), "investor_view");
        assert_eq!(Perspective::FounderView.as_ref(), "founder_view");
    }
}
