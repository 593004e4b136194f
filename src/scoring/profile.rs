use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lowest GPA the model accepts (and the zero point of the GPA factor).
pub const GPA_MIN: f64 = 5.0;
pub const GPA_MAX: f64 = 10.0;
pub const MAX_INTERNSHIPS: u32 = 5;

/// Rejection raised when a profile field lies outside its domain.
///
/// The engine never clamps: a GPA of 11 is a caller bug, not a strong student.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidProfile {
    #[error("gpa {0} is outside 5.0..=10.0")]
    GpaOutOfRange(f64),

    #[error("gpa must be a finite number")]
    GpaNotFinite,

    #[error("internship count {0} is outside 0..=5")]
    InternshipsOutOfRange(u32),
}

/// Institutional prestige bucket, used as a starting-salary proxy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CollegeTier {
    /// IIT / NIT / BITS
    Tier1,
    /// State government or otherwise reputed
    Tier2,
    /// Private or other
    Tier3,
}

impl CollegeTier {
    pub const ALL: [CollegeTier; 3] = [CollegeTier::Tier1, CollegeTier::Tier2, CollegeTier::Tier3];

    pub fn label(self) -> &'static str {
        match self {
            CollegeTier::Tier1 => "Tier 1 (IIT/NIT/BITS)",
            CollegeTier::Tier2 => "Tier 2 (State Govt/Reputed)",
            CollegeTier::Tier3 => "Tier 3 (Private/Other)",
        }
    }

    pub fn next(self) -> Self {
        cycle(&Self::ALL, self, 1)
    }

    pub fn previous(self) -> Self {
        cycle(&Self::ALL, self, Self::ALL.len() - 1)
    }
}

/// Weight class of an academic stream.
///
/// Several majors share a class; see [`Major::stream`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stream {
    CsOrCircuitalOrMedical,
    CoreOrCommerce,
    ArtsOrOther,
}

impl Stream {
    pub fn label(self) -> &'static str {
        match self {
            Stream::CsOrCircuitalOrMedical => "CS / Circuital / Medical",
            Stream::CoreOrCommerce => "Core / Commerce",
            Stream::ArtsOrOther => "Arts / Other",
        }
    }
}

/// Major as picked on the input form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Major {
    /// CS / IT / Circuital
    Cs,
    /// Core engineering
    Core,
    /// Commerce / Finance
    Commerce,
    /// Arts / Humanities
    Arts,
    Medical,
}

impl Major {
    pub const ALL: [Major; 5] = [
        Major::Cs,
        Major::Core,
        Major::Commerce,
        Major::Arts,
        Major::Medical,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Major::Cs => "CS / IT / Circuital",
            Major::Core => "Core Engineering",
            Major::Commerce => "Commerce / Finance",
            Major::Arts => "Arts / Humanities",
            Major::Medical => "Medical",
        }
    }

    /// Weight class this major is scored under.
    pub fn stream(self) -> Stream {
        match self {
            Major::Cs | Major::Medical => Stream::CsOrCircuitalOrMedical,
            Major::Core | Major::Commerce => Stream::CoreOrCommerce,
            Major::Arts => Stream::ArtsOrOther,
        }
    }

    pub fn next(self) -> Self {
        cycle(&Self::ALL, self, 1)
    }

    pub fn previous(self) -> Self {
        cycle(&Self::ALL, self, Self::ALL.len() - 1)
    }
}

fn cycle<T: Copy + PartialEq>(all: &[T], current: T, step: usize) -> T {
    let pos = all.iter().position(|v| *v == current).unwrap_or(0);
    all[(pos + step) % all.len()]
}

/// Validated applicant attributes for one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ApplicantProfile {
    pub college_tier: CollegeTier,
    pub stream: Stream,
    pub gpa: f64,
    pub internship_count: u32,
    pub has_active_backlog: bool,
}

impl ApplicantProfile {
    pub fn new(
        college_tier: CollegeTier,
        stream: Stream,
        gpa: f64,
        internship_count: u32,
        has_active_backlog: bool,
    ) -> Result<Self, InvalidProfile> {
        let profile = Self {
            college_tier,
            stream,
            gpa,
            internship_count,
            has_active_backlog,
        };
        profile.validate()?;
        Ok(profile)
    }

    pub fn validate(&self) -> Result<(), InvalidProfile> {
        if !self.gpa.is_finite() {
            return Err(InvalidProfile::GpaNotFinite);
        }
        if !(GPA_MIN..=GPA_MAX).contains(&self.gpa) {
            return Err(InvalidProfile::GpaOutOfRange(self.gpa));
        }
        if self.internship_count > MAX_INTERNSHIPS {
            return Err(InvalidProfile::InternshipsOutOfRange(self.internship_count));
        }
        Ok(())
    }
}

/// Raw form values before they become an [`ApplicantProfile`].
///
/// Also the shape of the `applicant:` section of the config file, which seeds
/// the TUI form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct ApplicantInput {
    pub college_tier: CollegeTier,
    pub major: Major,
    pub gpa: f64,
    pub internships: u32,
    pub active_backlog: bool,
}

impl Default for ApplicantInput {
    fn default() -> Self {
        Self {
            college_tier: CollegeTier::Tier1,
            major: Major::Cs,
            gpa: 8.5,
            internships: 1,
            active_backlog: false,
        }
    }
}

impl ApplicantInput {
    pub fn to_profile(&self) -> Result<ApplicantProfile, InvalidProfile> {
        ApplicantProfile::new(
            self.college_tier,
            self.major.stream(),
            self.gpa,
            self.internships,
            self.active_backlog,
        )
    }
}
