use serde::{Deserialize, Serialize};

pub const REJECTION_REASON: &str = "Projected earning potential below risk threshold.";

/// Underwriting outcome derived from a total score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Elite,
    Standard,
    Rejected,
}

impl Decision {
    pub fn headline(self) -> &'static str {
        match self {
            Decision::Elite => "ELITE TIER APPROVED",
            Decision::Standard => "STANDARD TIER APPROVED",
            Decision::Rejected => "REJECTED (High Risk)",
        }
    }

    /// Credit product the applicant qualifies for, if any.
    pub fn offer(self) -> Option<CreditOffer> {
        match self {
            Decision::Elite => Some(CreditOffer {
                credit_limit: 45_000,
                interest_rate_pct: 1.2,
            }),
            Decision::Standard => Some(CreditOffer {
                credit_limit: 15_000,
                interest_rate_pct: 2.5,
            }),
            Decision::Rejected => None,
        }
    }

    /// One line for the display layer: the offer, or why there is none.
    pub fn summary(self) -> String {
        match self.offer() {
            Some(offer) => format!("Eligible for: {}", offer.describe()),
            None => format!("Reason: {}", REJECTION_REASON),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CreditOffer {
    /// Limit in rupees
    pub credit_limit: u32,
    pub interest_rate_pct: f64,
}

impl CreditOffer {
    pub fn describe(&self) -> String {
        format!(
            "{} Credit Limit @ {}% Interest",
            format_inr(self.credit_limit),
            self.interest_rate_pct
        )
    }
}

/// Score thresholds for the approval bands.
///
/// `elite` and `standard` are inclusive lower bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields, default)]
pub struct DecisionBands {
    pub elite: i32,
    pub standard: i32,
}

impl Default for DecisionBands {
    fn default() -> Self {
        Self {
            elite: 750,
            standard: 600,
        }
    }
}

impl DecisionBands {
    pub fn classify(&self, total: i32) -> Decision {
        if total >= self.elite {
            Decision::Elite
        } else if total >= self.standard {
            Decision::Standard
        } else {
            Decision::Rejected
        }
    }
}

/// Rupee amount with Indian digit grouping ("₹1,50,000").
pub fn format_inr(amount: u32) -> String {
    let digits = amount.to_string();
    if digits.len() <= 3 {
        return format!("₹{}", digits);
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 2 {
        groups.push(&head[end - 2..end]);
        end -= 2;
    }
    groups.push(&head[..end]);
    groups.reverse();

    format!("₹{},{}", groups.join(","), tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_boundaries() {
        let bands = DecisionBands::default();
        assert_eq!(bands.classify(749), Decision::Standard);
        assert_eq!(bands.classify(750), Decision::Elite);
        assert_eq!(bands.classify(599), Decision::Rejected);
        assert_eq!(bands.classify(600), Decision::Standard);
    }

    #[test]
    fn test_extremes() {
        let bands = DecisionBands::default();
        assert_eq!(bands.classify(900), Decision::Elite);
        assert_eq!(bands.classify(0), Decision::Rejected);
        assert_eq!(bands.classify(-50), Decision::Rejected);
    }

    #[test]
    fn test_custom_bands() {
        let bands = DecisionBands {
            elite: 800,
            standard: 500,
        };
        assert_eq!(bands.classify(785), Decision::Standard);
        assert_eq!(bands.classify(500), Decision::Standard);
        assert_eq!(bands.classify(499), Decision::Rejected);
    }

    #[test]
    fn test_offers() {
        assert_eq!(Decision::Elite.offer().unwrap().credit_limit, 45_000);
        assert_eq!(Decision::Standard.offer().unwrap().interest_rate_pct, 2.5);
        assert!(Decision::Rejected.offer().is_none());
    }

    #[test]
    fn test_summary_text() {
        assert_eq!(
            Decision::Elite.summary(),
            "Eligible for: ₹45,000 Credit Limit @ 1.2% Interest"
        );
        assert_eq!(
            Decision::Standard.summary(),
            "Eligible for: ₹15,000 Credit Limit @ 2.5% Interest"
        );
        assert!(Decision::Rejected.summary().contains("below risk threshold"));
    }

    #[test]
    fn test_format_inr_grouping() {
        assert_eq!(format_inr(0), "₹0");
        assert_eq!(format_inr(999), "₹999");
        assert_eq!(format_inr(15_000), "₹15,000");
        assert_eq!(format_inr(150_000), "₹1,50,000");
        assert_eq!(format_inr(12_345_678), "₹1,23,45,678");
    }

    #[test]
    fn test_partial_bands_parse() {
        let bands: DecisionBands = serde_saphyr::from_str("elite: 800\n").unwrap();
        assert_eq!(bands.elite, 800);
        assert_eq!(bands.standard, 600);
    }
}
