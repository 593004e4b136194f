pub mod config;
pub mod decision;
pub mod engine;
pub mod profile;
pub mod validation;

pub use config::*;
pub use decision::{format_inr, CreditOffer, Decision, DecisionBands};
pub use engine::{
    classify, evaluate, Contribution, Factor, ScoreBreakdown, ScoreEngine, ScoreResult,
    WaterfallStep,
};
pub use profile::{
    ApplicantInput, ApplicantProfile, CollegeTier, InvalidProfile, Major, Stream, GPA_MAX,
    GPA_MIN, MAX_INTERNSHIPS,
};
pub use validation::validate_scoring;
