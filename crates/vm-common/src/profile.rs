use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::normalize::{non_blank, normalize, normalize_list, split_list};

/// Stage label used in reasons when the candidate carries no stage at all.
pub const DEFAULT_STAGE_LABEL: &str = "Target";

/// Investor preference record (or the synthetic stand-in used in demo mode).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestorProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub investor_id: Option<String>,
    /// Denormalized from the owning user record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub investor_name: Option<String>,
    /// Comma-delimited industries, e.g. `"Health, Tech"`.
    #[serde(default)]
    pub areas_of_interest: Option<String>,
    /// Legacy list field, only read when `areas_of_interest` is blank.
    #[serde(default)]
    pub preferred_domains: Vec<String>,
    #[serde(default)]
    pub investment_amount: Option<String>,
    #[serde(default)]
    pub stage: Option<String>,
    #[serde(default)]
    pub location_interest: Vec<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_synthetic: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartupProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub founder_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub founder_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub stage: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_synthetic: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Placeholder preference for investors who have not saved one yet.
pub fn default_demo_investor_profile() -> InvestorProfile {
    InvestorProfile {
        investor_name: Some("Demo Investor".into()),
        areas_of_interest: Some("Technology, Healthcare, Fintech, Education".into()),
        investment_amount: Some("Seed".into()),
        stage: Some("Seed".into()),
        location_interest: vec!["India".into(), "USA".into(), "Remote".into()],
        notes: Some("Looking for innovative startups with scalable technology".into()),
        is_synthetic: true,
        ..InvestorProfile::default()
    }
}

/// Placeholder startup for founders who have not listed one yet.
pub fn default_demo_startup_profile() -> StartupProfile {
    StartupProfile {
        name: Some("Demo Startup".into()),
        domain: Some("Technology".into()),
        stage: Some("Seed".into()),
        location: Some("India".into()),
        summary: Some("An innovative technology platform building scalable products".into()),
        is_synthetic: true,
        ..StartupProfile::default()
    }
}

/// Field access the scorer needs, implemented once per entity type.
///
/// All token accessors return normalized values; only `stage_label` and
/// `location_label` hand back raw text for reason strings.
pub trait MatchProfile {
    fn industry_tokens(&self) -> Vec<String>;
    fn stage_token(&self) -> String;
    fn location_tokens(&self) -> Vec<String>;
    fn text(&self) -> String;
    fn stage_label(&self) -> String;
    fn location_label(&self) -> Option<String>;
    fn is_synthetic(&self) -> bool;
}

impl MatchProfile for InvestorProfile {
    fn industry_tokens(&self) -> Vec<String> {
        match non_blank(self.areas_of_interest.as_deref()) {
            Some(areas) => split_list(Some(areas)),
            None => normalize_list(&self.preferred_domains),
        }
    }

    fn stage_token(&self) -> String {
        let raw = non_blank(self.investment_amount.as_deref()).or(self.stage.as_deref());
        normalize(raw)
    }

    fn location_tokens(&self) -> Vec<String> {
        normalize_list(&self.location_interest)
    }

    fn text(&self) -> String {
        normalize(self.notes.as_deref())
    }

    fn stage_label(&self) -> String {
        non_blank(self.stage.as_deref())
            .or_else(|| non_blank(self.investment_amount.as_deref()))
            .unwrap_or(DEFAULT_STAGE_LABEL)
            .to_string()
    }

    /// Always `None`: the location reason names the startup's region in both
    /// directions, so an investor's accepted regions never reach a reason.
    fn location_label(&self) -> Option<String> {
        None
    }

    fn is_synthetic(&self) -> bool {
        self.is_synthetic
    }
}

impl MatchProfile for StartupProfile {
    fn industry_tokens(&self) -> Vec<String> {
        single_token(self.domain.as_deref())
    }

    fn stage_token(&self) -> String {
        normalize(self.stage.as_deref())
    }

    fn location_tokens(&self) -> Vec<String> {
        single_token(self.location.as_deref())
    }

    fn text(&self) -> String {
        normalize(self.summary.as_deref())
    }

    fn stage_label(&self) -> String {
        non_blank(self.stage.as_deref())
            .unwrap_or(DEFAULT_STAGE_LABEL)
            .to_string()
    }

    fn location_label(&self) -> Option<String> {
        non_blank(self.location.as_deref()).map(str::to_string)
    }

    fn is_synthetic(&self) -> bool {
        self.is_synthetic
    }
}

// Startup fields are single-valued: no comma splitting.
fn single_token(value: Option<&str>) -> Vec<String> {
    let token = normalize(value);
    if token.is_empty() {
        Vec::new()
    } else {
        vec![token]
    }
}
