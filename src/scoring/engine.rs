use std::fmt;

use serde::Serialize;
use tracing::{debug, trace};

use super::config::ScoringConfig;
use super::decision::{Decision, DecisionBands};
use super::profile::{ApplicantProfile, InvalidProfile, GPA_MIN};

/// A named scoring factor, in canonical waterfall order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Factor {
    #[serde(rename = "College Tier")]
    CollegeTier,
    Stream,
    #[serde(rename = "GPA")]
    Gpa,
    Experience,
    #[serde(rename = "Risk Penalty")]
    RiskPenalty,
}

impl Factor {
    pub fn label(self) -> &'static str {
        match self {
            Factor::CollegeTier => "College Tier",
            Factor::Stream => "Stream",
            Factor::Gpa => "GPA",
            Factor::Experience => "Experience",
            Factor::RiskPenalty => "Risk Penalty",
        }
    }
}

impl fmt::Display for Factor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Contribution {
    #[serde(rename = "label")]
    pub factor: Factor,
    /// Signed points.
    pub delta: i32,
    /// How the points were earned, e.g. "(8.50 - 5.0) x 30".
    pub description: String,
}

impl Contribution {
    pub fn label(&self) -> &'static str {
        self.factor.label()
    }
}

/// One bar of the waterfall: a signed increment from `start` to `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WaterfallStep {
    pub factor: Factor,
    pub delta: i32,
    pub start: i32,
    pub end: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub base_score: i32,
    pub contributions: Vec<Contribution>,
}

impl ScoreBreakdown {
    pub fn iter(&self) -> std::slice::Iter<'_, Contribution> {
        self.contributions.iter()
    }

    pub fn len(&self) -> usize {
        self.contributions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contributions.is_empty()
    }

    pub fn get(&self, factor: Factor) -> Option<&Contribution> {
        self.contributions.iter().find(|c| c.factor == factor)
    }

    /// Sum of all deltas, excluding the base.
    pub fn sum(&self) -> i32 {
        self.contributions
            .iter()
            .fold(0, |acc: i32, c| acc.saturating_add(c.delta))
    }

    pub fn pre_cap_total(&self) -> i32 {
        self.base_score.saturating_add(self.sum())
    }

    /// Cumulative steps for a waterfall chart, starting from 0.
    pub fn waterfall(&self) -> Vec<WaterfallStep> {
        let mut running: i32 = 0;
        self.contributions
            .iter()
            .map(|c| {
                let start = running;
                running = running.saturating_add(c.delta);
                WaterfallStep {
                    factor: c.factor,
                    delta: c.delta,
                    start,
                    end: running,
                }
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreResult {
    pub total: i32,
    pub breakdown: ScoreBreakdown,
}

impl ScoreResult {
    /// True when the cap cut the total short.
    pub fn is_capped(&self) -> bool {
        self.breakdown.pre_cap_total() > self.total
    }

    /// Headline delta shown next to the score ("+485 points added").
    pub fn points_added(&self) -> i32 {
        self.total.saturating_sub(self.breakdown.base_score)
    }
}

/// Stateless evaluator applying a [`ScoringConfig`] to applicant profiles.
///
/// Cheap to clone and safe to share across threads.
#[derive(Debug, Clone, Default)]
pub struct ScoreEngine {
    config: ScoringConfig,
}

impl ScoreEngine {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn evaluate(&self, profile: &ApplicantProfile) -> Result<ScoreResult, InvalidProfile> {
        profile.validate()?;

        let config = &self.config;
        let mut score = config.base_score;
        let mut contributions = Vec::with_capacity(5);

        let mut push = |factor: Factor, delta: i32, description: String| {
            score = score.saturating_add(delta);
            contributions.push(Contribution {
                factor,
                delta,
                description,
            });
        };

        push(
            Factor::CollegeTier,
            config.college_tier.weight(profile.college_tier),
            profile.college_tier.label().to_string(),
        );

        push(
            Factor::Stream,
            config.stream.weight(profile.stream),
            profile.stream.label().to_string(),
        );

        // Truncates toward zero: 5.99 earns 29 points, not 30
        let gpa_delta = ((profile.gpa - GPA_MIN) * f64::from(config.gpa_points)) as i32;
        push(
            Factor::Gpa,
            gpa_delta,
            format!("({:.2} - {:.1}) x {}", profile.gpa, GPA_MIN, config.gpa_points),
        );

        let internships = i32::try_from(profile.internship_count).unwrap_or(i32::MAX);
        push(
            Factor::Experience,
            internships.saturating_mul(config.internship_points),
            format!("{} internship(s) x {}", internships, config.internship_points),
        );

        if profile.has_active_backlog {
            push(
                Factor::RiskPenalty,
                -config.backlog_penalty,
                "active backlog".to_string(),
            );
        }

        let total = score.min(config.score_cap);
        trace!(?profile, pre_cap = score, "profile evaluated");
        if total < score {
            debug!(pre_cap = score, cap = config.score_cap, "score capped");
        }

        Ok(ScoreResult {
            total,
            breakdown: ScoreBreakdown {
                base_score: config.base_score,
                contributions,
            },
        })
    }

    pub fn classify(&self, total: i32) -> Decision {
        self.config.bands.classify(total)
    }
}

/// Evaluate with the reference weights.
pub fn evaluate(profile: &ApplicantProfile) -> Result<ScoreResult, InvalidProfile> {
    ScoreEngine::default().evaluate(profile)
}

/// Classify with the reference thresholds (750 elite, 600 standard).
pub fn classify(total: i32) -> Decision {
    DecisionBands::default().classify(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{CollegeTier, Stream, StreamWeights};

    pub(super) fn profile(
        tier: CollegeTier,
        stream: Stream,
        gpa: f64,
        internships: u32,
        backlog: bool,
    ) -> ApplicantProfile {
        ApplicantProfile {
            college_tier: tier,
            stream,
            gpa,
            internship_count: internships,
            has_active_backlog: backlog,
        }
    }

    fn deltas(result: &ScoreResult) -> Vec<(&'static str, i32)> {
        result.breakdown.iter().map(|c| (c.label(), c.delta)).collect()
    }

    #[test]
    fn test_strong_profile_is_elite() {
        let p = profile(CollegeTier::Tier1, Stream::CsOrCircuitalOrMedical, 8.5, 1, false);
        let result = evaluate(&p).unwrap();

        assert_eq!(
            deltas(&result),
            vec![
                ("College Tier", 250),
                ("Stream", 100),
                ("GPA", 105),
                ("Experience", 30),
            ]
        );
        assert_eq!(result.total, 785);
        assert!(!result.is_capped());
        assert_eq!(classify(result.total), Decision::Elite);
    }

    #[test]
    fn test_weakest_profile_with_backlog() {
        let p = profile(CollegeTier::Tier3, Stream::ArtsOrOther, 5.0, 0, true);
        let result = evaluate(&p).unwrap();

        assert_eq!(
            deltas(&result),
            vec![
                ("College Tier", 50),
                ("Stream", 40),
                ("GPA", 0),
                ("Experience", 0),
                ("Risk Penalty", -100),
            ]
        );
        assert_eq!(result.total, 290);
        assert_eq!(classify(result.total), Decision::Rejected);
    }

    #[test]
    fn test_perfect_profile_capped() {
        let p = profile(CollegeTier::Tier1, Stream::CsOrCircuitalOrMedical, 10.0, 5, false);
        let result = evaluate(&p).unwrap();

        assert_eq!(result.breakdown.get(Factor::Gpa).unwrap().delta, 150);
        assert_eq!(result.breakdown.get(Factor::Experience).unwrap().delta, 150);
        assert_eq!(result.breakdown.pre_cap_total(), 950);
        assert_eq!(result.total, 900);
        assert!(result.is_capped());
        assert_eq!(classify(result.total), Decision::Elite);
    }

    #[test]
    fn test_gpa_truncates_not_rounds() {
        // (5.99 - 5.0) * 30 = 29.7 -> 29
        let p = profile(CollegeTier::Tier2, Stream::CoreOrCommerce, 5.99, 0, false);
        let result = evaluate(&p).unwrap();
        assert_eq!(result.breakdown.get(Factor::Gpa).unwrap().delta, 29);
    }

    #[test]
    fn test_no_penalty_entry_without_backlog() {
        let p = profile(CollegeTier::Tier2, Stream::CoreOrCommerce, 7.0, 2, false);
        let result = evaluate(&p).unwrap();
        assert_eq!(result.breakdown.len(), 4);
        assert!(result.breakdown.get(Factor::RiskPenalty).is_none());
    }

    #[test]
    fn test_standard_band_profile() {
        // 300 + 150 + 70 + 60 + 30 = 610
        let p = profile(CollegeTier::Tier2, Stream::CoreOrCommerce, 7.0, 1, false);
        let result = evaluate(&p).unwrap();
        assert_eq!(result.total, 610);
        assert_eq!(classify(result.total), Decision::Standard);
        assert_eq!(result.points_added(), 310);
    }

    #[test]
    fn test_invalid_profile_rejected() {
        let p = profile(CollegeTier::Tier1, Stream::ArtsOrOther, 11.0, 0, false);
        assert_eq!(evaluate(&p).unwrap_err(), InvalidProfile::GpaOutOfRange(11.0));

        let p = profile(CollegeTier::Tier1, Stream::ArtsOrOther, 6.0, 9, false);
        assert_eq!(evaluate(&p).unwrap_err(), InvalidProfile::InternshipsOutOfRange(9));
    }

    #[test]
    fn test_waterfall_runs_from_zero() {
        let p = profile(CollegeTier::Tier3, Stream::ArtsOrOther, 6.0, 1, true);
        let result = evaluate(&p).unwrap();
        let steps = result.breakdown.waterfall();

        assert_eq!(steps.len(), 5);
        assert_eq!(steps[0].start, 0);
        assert_eq!(steps[0].end, 50);
        assert_eq!(steps[1].start, 50);
        for pair in steps.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
        let last = steps.last().unwrap();
        assert_eq!(last.factor, Factor::RiskPenalty);
        assert_eq!(last.end, result.breakdown.sum());
        assert_eq!(last.end - last.start, -100);
    }

    #[test]
    fn test_custom_weights() {
        let engine = ScoreEngine::new(ScoringConfig {
            base_score: 0,
            stream: StreamWeights {
                arts_other: 90,
                ..StreamWeights::default()
            },
            backlog_penalty: 40,
            ..ScoringConfig::default()
        });
        let p = profile(CollegeTier::Tier3, Stream::ArtsOrOther, 5.0, 0, true);
        let result = engine.evaluate(&p).unwrap();
        // 0 + 50 + 90 + 0 + 0 - 40
        assert_eq!(result.total, 100);
        assert_eq!(engine.classify(result.total), Decision::Rejected);
    }

    #[test]
    fn test_no_floor_applied() {
        let engine = ScoreEngine::new(ScoringConfig {
            base_score: 0,
            backlog_penalty: 500,
            ..ScoringConfig::default()
        });
        let p = profile(CollegeTier::Tier3, Stream::ArtsOrOther, 5.0, 0, true);
        let result = engine.evaluate(&p).unwrap();
        assert_eq!(result.total, -410);
    }

    #[test]
    fn test_serialized_breakdown_uses_labels() {
        let p = profile(CollegeTier::Tier1, Stream::CsOrCircuitalOrMedical, 8.5, 1, true);
        let result = evaluate(&p).unwrap();
        let json = serde_json::to_value(&result).unwrap();

        let entries = json["breakdown"]["contributions"].as_array().unwrap();
        assert_eq!(entries[0]["label"], "College Tier");
        assert_eq!(entries[4]["label"], "Risk Penalty");
        assert_eq!(entries[4]["delta"], -100);
        assert_eq!(json["total"], 685);
    }
}

#[cfg(test)]
mod property_tests {
    use super::tests::profile;
    use super::*;
    use crate::scoring::{CollegeTier, Stream, TierWeights};
    use proptest::prelude::*;

    fn any_profile() -> impl Strategy<Value = ApplicantProfile> {
        (
            prop::sample::select(CollegeTier::ALL.to_vec()),
            prop::sample::select(vec![
                Stream::CsOrCircuitalOrMedical,
                Stream::CoreOrCommerce,
                Stream::ArtsOrOther,
            ]),
            5.0..=10.0f64,
            0u32..=5,
            any::<bool>(),
        )
            .prop_map(|(college_tier, stream, gpa, internship_count, has_active_backlog)| {
                ApplicantProfile {
                    college_tier,
                    stream,
                    gpa,
                    internship_count,
                    has_active_backlog,
                }
            })
    }

    proptest! {
        #[test]
        fn total_stays_in_range(p in any_profile()) {
            let result = evaluate(&p).unwrap();
            prop_assert!(result.total >= 0 && result.total <= 900);
        }

        #[test]
        fn evaluation_is_deterministic(p in any_profile()) {
            prop_assert_eq!(evaluate(&p).unwrap(), evaluate(&p).unwrap());
        }

        #[test]
        fn breakdown_sums_to_pre_cap_total(p in any_profile()) {
            let result = evaluate(&p).unwrap();
            let pre_cap = 300 + result.breakdown.sum();
            prop_assert_eq!(result.breakdown.pre_cap_total(), pre_cap);
            if pre_cap > 900 {
                prop_assert_eq!(result.total, 900);
            } else {
                prop_assert_eq!(result.total, pre_cap);
            }
        }

        #[test]
        fn penalty_present_iff_backlog(p in any_profile()) {
            let result = evaluate(&p).unwrap();
            let penalty = result.breakdown.get(Factor::RiskPenalty);
            prop_assert_eq!(penalty.is_some(), p.has_active_backlog);
            if let Some(entry) = penalty {
                prop_assert_eq!(entry.delta, -100);
                prop_assert_eq!(result.breakdown.contributions.last(), Some(entry));
            }
        }

        #[test]
        fn gpa_contribution_bounded(p in any_profile()) {
            let result = evaluate(&p).unwrap();
            let gpa = result.breakdown.get(Factor::Gpa).unwrap().delta;
            prop_assert!((0..=150).contains(&gpa));
        }
    }

    #[test]
    fn test_unvalidated_weights_saturate() {
        let engine = ScoreEngine::new(ScoringConfig {
            base_score: 2_000_000_000,
            score_cap: i32::MAX,
            college_tier: TierWeights {
                tier1: 2_000_000_000,
                ..TierWeights::default()
            },
            ..ScoringConfig::default()
        });
        let p = profile(CollegeTier::Tier1, Stream::CsOrCircuitalOrMedical, 8.5, 1, false);
        let result = engine.evaluate(&p).unwrap();
        assert_eq!(result.total, i32::MAX);
        assert_eq!(engine.classify(result.total), Decision::Elite);
    }
}
