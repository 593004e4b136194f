pub mod formatter;
pub mod waterfall;

pub use formatter::{
    format_applicant, format_breakdown, format_classification, format_delta, format_json,
    format_logic, format_score_card, format_tsv, should_use_colors, ScoreReport, HYPOTHESIS,
    WEIGHTAGE,
};
pub use waterfall::{BarSpan, WaterfallScale};
