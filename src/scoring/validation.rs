use super::config::ScoringConfig;

/// Upper bound for the base, the cap and every weight. Keeps the worst-case
/// total (base plus five full-scale contributions) far inside `i32`.
pub const MAX_POINTS: i32 = 10_000;

/// Validate scoring configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_scoring(config: &ScoringConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    require_points(&mut errors, "scoring.base_score", config.base_score);

    if config.score_cap > MAX_POINTS {
        errors.push(format!(
            "scoring.score_cap: {} exceeds the limit of {}",
            config.score_cap, MAX_POINTS
        ));
    }
    if config.score_cap < config.base_score {
        errors.push(format!(
            "scoring.score_cap: {} is below base_score {}",
            config.score_cap, config.base_score
        ));
    }

    // Weights must add; penalties are stored positive and subtracted
    let tiers = &config.college_tier;
    require_points(&mut errors, "scoring.college_tier.tier1", tiers.tier1);
    require_points(&mut errors, "scoring.college_tier.tier2", tiers.tier2);
    require_points(&mut errors, "scoring.college_tier.tier3", tiers.tier3);

    let streams = &config.stream;
    require_points(
        &mut errors,
        "scoring.stream.cs_circuital_medical",
        streams.cs_circuital_medical,
    );
    require_points(&mut errors, "scoring.stream.core_commerce", streams.core_commerce);
    require_points(&mut errors, "scoring.stream.arts_other", streams.arts_other);

    if config.gpa_points <= 0 || config.gpa_points > MAX_POINTS {
        errors.push(format!(
            "scoring.gpa_points: must be in 1..={}, got {}",
            MAX_POINTS, config.gpa_points
        ));
    }
    require_points(&mut errors, "scoring.internship_points", config.internship_points);
    require_points(&mut errors, "scoring.backlog_penalty", config.backlog_penalty);

    let bands = &config.bands;
    if bands.standard >= bands.elite {
        errors.push(format!(
            "scoring.bands: standard ({}) must be below elite ({})",
            bands.standard, bands.elite
        ));
    }
    if bands.elite > config.score_cap {
        errors.push(format!(
            "scoring.bands.elite: {} can never be reached with score_cap {}",
            bands.elite, config.score_cap
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn require_points(errors: &mut Vec<String>, path: &str, value: i32) {
    if value < 0 {
        errors.push(format!("{}: must be non-negative, got {}", path, value));
    } else if value > MAX_POINTS {
        errors.push(format!(
            "{}: {} exceeds the limit of {}",
            path, value, MAX_POINTS
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{
        ApplicantProfile, CollegeTier, DecisionBands, ScoreEngine, Stream, TierWeights,
    };

    #[test]
    fn test_default_config_valid() {
        assert!(validate_scoring(&ScoringConfig::default()).is_ok());
    }

    #[test]
    fn test_negative_base_score() {
        let config = ScoringConfig {
            base_score: -10,
            ..ScoringConfig::default()
        };
        let errors = validate_scoring(&config).unwrap_err();
        assert!(errors[0].contains("scoring.base_score"));
    }

    #[test]
    fn test_cap_below_base() {
        let config = ScoringConfig {
            score_cap: 200,
            bands: DecisionBands {
                elite: 150,
                standard: 100,
            },
            ..ScoringConfig::default()
        };
        let errors = validate_scoring(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("scoring.score_cap"));
    }

    #[test]
    fn test_negative_tier_weight() {
        let mut config = ScoringConfig::default();
        config.college_tier.tier2 = -5;
        let errors = validate_scoring(&config).unwrap_err();
        assert!(errors[0].contains("scoring.college_tier.tier2"));
    }

    #[test]
    fn test_zero_gpa_points() {
        let config = ScoringConfig {
            gpa_points: 0,
            ..ScoringConfig::default()
        };
        let errors = validate_scoring(&config).unwrap_err();
        assert!(errors[0].contains("scoring.gpa_points"));
    }

    #[test]
    fn test_inverted_bands() {
        let config = ScoringConfig {
            bands: DecisionBands {
                elite: 600,
                standard: 750,
            },
            ..ScoringConfig::default()
        };
        let errors = validate_scoring(&config).unwrap_err();
        assert!(errors[0].contains("scoring.bands"));
    }

    #[test]
    fn test_unreachable_elite_band() {
        let config = ScoringConfig {
            bands: DecisionBands {
                elite: 950,
                standard: 600,
            },
            ..ScoringConfig::default()
        };
        let errors = validate_scoring(&config).unwrap_err();
        assert!(errors[0].contains("scoring.bands.elite"));
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = ScoringConfig {
            backlog_penalty: -100,
            internship_points: -30,
            ..ScoringConfig::default()
        };
        config.stream.arts_other = -1;
        let errors = validate_scoring(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_oversized_weights_rejected() {
        let config = ScoringConfig {
            base_score: 2_000_000_000,
            score_cap: i32::MAX,
            college_tier: TierWeights {
                tier1: 2_000_000_000,
                ..TierWeights::default()
            },
            ..ScoringConfig::default()
        };
        let errors = validate_scoring(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.iter().any(|e| e.contains("scoring.base_score")));
        assert!(errors.iter().any(|e| e.contains("scoring.score_cap")));
        assert!(errors.iter().any(|e| e.contains("scoring.college_tier.tier1")));
    }

    #[test]
    fn test_largest_valid_config_evaluates() {
        let mut config = ScoringConfig {
            base_score: MAX_POINTS,
            score_cap: MAX_POINTS,
            gpa_points: MAX_POINTS,
            internship_points: MAX_POINTS,
            backlog_penalty: MAX_POINTS,
            bands: DecisionBands {
                elite: MAX_POINTS,
                standard: 0,
            },
            ..ScoringConfig::default()
        };
        config.college_tier.tier1 = MAX_POINTS;
        config.stream.cs_circuital_medical = MAX_POINTS;
        assert!(validate_scoring(&config).is_ok());

        let profile =
            ApplicantProfile::new(CollegeTier::Tier1, Stream::CsOrCircuitalOrMedical, 10.0, 5, false)
                .unwrap();
        let result = ScoreEngine::new(config).evaluate(&profile).unwrap();
        assert_eq!(result.breakdown.pre_cap_total(), 130_000);
        assert_eq!(result.total, MAX_POINTS);
    }
}
