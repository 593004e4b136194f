use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::scoring::{ApplicantInput, ScoringConfig};

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// tracing filter directive, e.g. "info" or "ntc_underwriter=debug"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,

    #[serde(default)]
    pub theme: ThemeSetting,

    #[serde(default)]
    pub scoring: ScoringConfig,

    /// Starting profile for the interactive form
    #[serde(default)]
    pub applicant: ApplicantInput,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ThemeSetting {
    /// Detect from the terminal background
    #[default]
    Auto,
    Dark,
    Light,
}
