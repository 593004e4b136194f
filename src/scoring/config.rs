use serde::{Deserialize, Serialize};

use super::decision::DecisionBands;
use super::profile::{CollegeTier, Stream};

/// Weights and thresholds of the scoring model.
///
/// Every field is optional in YAML; omitted fields keep the reference weights.
///
/// Example YAML:
/// ```yaml
/// scoring:
///   base_score: 300
///   score_cap: 900
///   college_tier: { tier1: 250, tier2: 150, tier3: 50 }
///   stream: { cs_circuital_medical: 100, core_commerce: 70, arts_other: 40 }
///   gpa_points: 30
///   internship_points: 30
///   backlog_penalty: 100
///   bands: { elite: 750, standard: 600 }
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct ScoringConfig {
    /// Starting point before any factor is applied
    pub base_score: i32,

    /// Upper bound on the total. There is no lower bound.
    pub score_cap: i32,

    pub college_tier: TierWeights,

    pub stream: StreamWeights,

    /// Points per GPA point above 5.0, truncated toward zero
    pub gpa_points: i32,

    /// Points per past internship
    pub internship_points: i32,

    /// Subtracted when the applicant has an active backlog
    pub backlog_penalty: i32,

    pub bands: DecisionBands,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            base_score: 300,
            score_cap: 900,
            college_tier: TierWeights::default(),
            stream: StreamWeights::default(),
            gpa_points: 30,
            internship_points: 30,
            backlog_penalty: 100,
            bands: DecisionBands::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields, default)]
pub struct TierWeights {
    pub tier1: i32,
    pub tier2: i32,
    pub tier3: i32,
}

impl Default for TierWeights {
    fn default() -> Self {
        Self {
            tier1: 250,
            tier2: 150,
            tier3: 50,
        }
    }
}

impl TierWeights {
    pub fn weight(&self, tier: CollegeTier) -> i32 {
        match tier {
            CollegeTier::Tier1 => self.tier1,
            CollegeTier::Tier2 => self.tier2,
            CollegeTier::Tier3 => self.tier3,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields, default)]
pub struct StreamWeights {
    pub cs_circuital_medical: i32,
    pub core_commerce: i32,
    pub arts_other: i32,
}

impl Default for StreamWeights {
    fn default() -> Self {
        Self {
            cs_circuital_medical: 100,
            core_commerce: 70,
            arts_other: 40,
        }
    }
}

impl StreamWeights {
    pub fn weight(&self, stream: Stream) -> i32 {
        match stream {
            Stream::CsOrCircuitalOrMedical => self.cs_circuital_medical,
            Stream::CoreOrCommerce => self.core_commerce,
            Stream::ArtsOrOther => self.arts_other,
        }
    }
}
