//! Matchmaking core: profile model, text normalization, the match scorer and
//! the storage collaborators it reads candidates from.

pub mod api;
pub mod db;
pub mod logging;
pub mod matching;
pub mod normalize;
pub mod profile;

pub use profile::{
    default_demo_investor_profile, default_demo_startup_profile, InvestorProfile, MatchProfile,
    StartupProfile,
};
