use std::io::IsTerminal;

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use serde::Serialize;
use terminal_size::{terminal_size, Width};

use super::waterfall::WaterfallScale;
use crate::scoring::{
    ApplicantInput, ApplicantProfile, Contribution, CreditOffer, Decision, ScoreResult,
    WaterfallStep,
};

const LABEL_WIDTH: usize = 14;
const DELTA_WIDTH: usize = 5;
const DEFAULT_CHART_WIDTH: usize = 40;

pub const HYPOTHESIS: &str = "Students with higher employability signals (Tier 1 + High GPA) \
have a 90% lower default rate on micro-credit products.";

/// Weightage notes shown in the logic panel: (factor, rationale)
pub const WEIGHTAGE: [(&str, &str); 3] = [
    ("College Tier (40%)", "Strongest correlation with starting salary."),
    ("GPA (20%)", "Proxy for conscientiousness and discipline."),
    ("Backlogs (negative)", "High correlation with delayed employment."),
];

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width, defaulting to None for pipes
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Width left for bars once the label and delta columns are laid out.
fn chart_width(term_width: Option<usize>) -> usize {
    match term_width {
        Some(w) => w
            .saturating_sub(2 + LABEL_WIDTH + 1 + DELTA_WIDTH + 2)
            .clamp(10, 60),
        None => DEFAULT_CHART_WIDTH,
    }
}

/// Signed points ("+250", "-100", "+0")
pub fn format_delta(delta: i32) -> String {
    format!("{:+}", delta)
}

/// One-line summary of the form values.
pub fn format_applicant(input: &ApplicantInput, use_colors: bool) -> String {
    let backlog = if input.active_backlog {
        "active backlog"
    } else {
        "no backlog"
    };
    if use_colors {
        format!(
            "{} | {} | GPA {:.2} | {} internship(s) | {}",
            input.college_tier.label().cyan(),
            input.major.label().cyan(),
            input.gpa,
            input.internships,
            backlog
        )
    } else {
        format!(
            "{} | {} | GPA {:.2} | {} internship(s) | {}",
            input.college_tier.label(),
            input.major.label(),
            input.gpa,
            input.internships,
            backlog
        )
    }
}

/// Headline score, band and offer text.
///
/// ```text
/// Predicted Credit Score: 785 (+485 points added)
/// ELITE TIER APPROVED
/// Eligible for: ₹45,000 Credit Limit @ 1.2% Interest
/// ```
pub fn format_score_card(result: &ScoreResult, decision: Decision, use_colors: bool) -> String {
    let mut headline = format!(
        "Predicted Credit Score: {} ({} points added)",
        result.total,
        format_delta(result.points_added())
    );
    if result.is_capped() {
        headline.push_str(&format!(
            " [capped from {}]",
            result.breakdown.pre_cap_total()
        ));
    }

    if use_colors {
        let band = match decision {
            Decision::Elite => decision.headline().green().bold().to_string(),
            Decision::Standard => decision.headline().yellow().bold().to_string(),
            Decision::Rejected => decision.headline().red().bold().to_string(),
        };
        format!("{}\n{}\n{}", headline.bold(), band, decision.summary())
    } else {
        format!("{}\n{}\n{}", headline, decision.headline(), decision.summary())
    }
}

/// Waterfall of the breakdown as text, one bar per contribution.
///
/// Positive steps draw with `█`, negative with `░`, each starting where the
/// previous one ended.
pub fn format_breakdown(result: &ScoreResult, use_colors: bool) -> String {
    format_breakdown_with_width(result, use_colors, chart_width(get_terminal_width()))
}

fn format_breakdown_with_width(result: &ScoreResult, use_colors: bool, width: usize) -> String {
    let steps = result.breakdown.waterfall();
    let scale = WaterfallScale::new(&steps, width);

    let mut lines = vec![if use_colors {
        "Score Composition".bold().to_string()
    } else {
        "Score Composition".to_string()
    }];

    for step in &steps {
        lines.push(format_step(step, &scale, use_colors));
    }

    let base = format!(
        "  {:<lw$} {:>dw$}",
        "Base",
        result.breakdown.base_score,
        lw = LABEL_WIDTH,
        dw = DELTA_WIDTH
    );
    let total = format!(
        "  {:<lw$} {:>dw$}",
        "Total",
        result.total,
        lw = LABEL_WIDTH,
        dw = DELTA_WIDTH
    );
    if use_colors {
        lines.push(base.dimmed().to_string());
        lines.push(total.bold().to_string());
    } else {
        lines.push(base);
        lines.push(total);
    }

    lines.join("\n")
}

fn format_step(step: &WaterfallStep, scale: &WaterfallScale, use_colors: bool) -> String {
    let span = scale.span(step);
    let glyph = if span.negative { "░" } else { "█" };
    let bar = glyph.repeat(span.len);
    let pad = " ".repeat(span.offset);
    let delta = format!("{:>w$}", format_delta(step.delta), w = DELTA_WIDTH);
    let label = format!("{:<w$}", step.factor.label(), w = LABEL_WIDTH);

    if use_colors {
        let (delta, bar) = if span.negative {
            (delta.red().to_string(), bar.red().to_string())
        } else {
            (delta.green().to_string(), bar.green().to_string())
        };
        format!("  {} {}  {}{}", label, delta, pad, bar)
    } else {
        format!("  {} {}  {}{}", label, delta, pad, bar)
            .trim_end()
            .to_string()
    }
}

/// Tab-separated breakdown for scripting: one `label\tdelta` row per
/// contribution, then `Base` and `Total` rows. No colors.
pub fn format_tsv(result: &ScoreResult) -> String {
    let mut rows: Vec<String> = result
        .breakdown
        .iter()
        .map(|c| format!("{}\t{}", c.label(), c.delta))
        .collect();
    rows.push(format!("Base\t{}", result.breakdown.base_score));
    rows.push(format!("Total\t{}", result.total));
    rows.join("\n")
}

/// Machine-readable evaluation.
#[derive(Debug, Serialize)]
pub struct ScoreReport<'a> {
    pub profile: &'a ApplicantProfile,
    pub total: i32,
    pub pre_cap_total: i32,
    pub capped: bool,
    pub points_added: i32,
    pub decision: Decision,
    pub headline: &'static str,
    pub offer: Option<CreditOffer>,
    pub base_score: i32,
    pub breakdown: &'a [Contribution],
    pub waterfall: Vec<WaterfallStep>,
}

impl<'a> ScoreReport<'a> {
    pub fn new(profile: &'a ApplicantProfile, result: &'a ScoreResult, decision: Decision) -> Self {
        Self {
            profile,
            total: result.total,
            pre_cap_total: result.breakdown.pre_cap_total(),
            capped: result.is_capped(),
            points_added: result.points_added(),
            decision,
            headline: decision.headline(),
            offer: decision.offer(),
            base_score: result.breakdown.base_score,
            breakdown: &result.breakdown.contributions,
            waterfall: result.breakdown.waterfall(),
        }
    }
}

pub fn format_json(report: &ScoreReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("Failed to serialize score report")
}

/// Band lookup for a bare total.
pub fn format_classification(total: i32, decision: Decision, use_colors: bool) -> String {
    let headline = if use_colors {
        match decision {
            Decision::Elite => decision.headline().green().bold().to_string(),
            Decision::Standard => decision.headline().yellow().bold().to_string(),
            Decision::Rejected => decision.headline().red().bold().to_string(),
        }
    } else {
        decision.headline().to_string()
    };
    format!("{}: {}\n{}", total, headline, decision.summary())
}

/// The "underwriting logic" panel: hypothesis plus weightage notes.
pub fn format_logic(use_colors: bool) -> String {
    let mut lines = Vec::new();
    if use_colors {
        lines.push(format!("{} {}", "Hypothesis:".bold(), HYPOTHESIS));
        lines.push(String::new());
        lines.push("Weightage Logic:".bold().to_string());
        for (factor, why) in WEIGHTAGE {
            lines.push(format!("  - {} {}", format!("{}:", factor).cyan(), why));
        }
    } else {
        lines.push(format!("Hypothesis: {}", HYPOTHESIS));
        lines.push(String::new());
        lines.push("Weightage Logic:".to_string());
        for (factor, why) in WEIGHTAGE {
            lines.push(format!("  - {}: {}", factor, why));
        }
    }
    lines.join("\n")
}
