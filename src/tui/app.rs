use crate::scoring::{
    ApplicantInput, Decision, InvalidProfile, ScoreEngine, ScoreResult, GPA_MAX, GPA_MIN,
    MAX_INTERNSHIPS,
};
use crate::tui::theme::ThemeColors;
use std::time::Instant;
use tracing::debug;

const GPA_STEP: f64 = 0.1;

/// Form field, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Tier,
    Major,
    Gpa,
    Internships,
    Backlog,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::Tier,
        Field::Major,
        Field::Gpa,
        Field::Internships,
        Field::Backlog,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Field::Tier => "College Tier",
            Field::Major => "Stream / Major",
            Field::Gpa => "CGPA (of 10)",
            Field::Internships => "Internships",
            Field::Backlog => "Active Backlogs?",
        }
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|f| *f == self).unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputMode {
    Normal,
    Help,
    Logic,
}

/// Outcome of the latest evaluation of the form.
pub type Evaluation = Result<(ScoreResult, Decision), InvalidProfile>;

pub struct App {
    pub input: ApplicantInput,
    pub initial_input: ApplicantInput,
    pub engine: ScoreEngine,
    pub evaluation: Evaluation,
    pub focus: Field,
    pub input_mode: InputMode,
    pub flash_message: Option<(String, Instant)>,
    pub should_quit: bool,
    pub theme: ThemeColors,
}

impl App {
    pub fn new(engine: ScoreEngine, input: ApplicantInput, theme: ThemeColors) -> Self {
        let evaluation = evaluate_input(&engine, &input);
        Self {
            initial_input: input.clone(),
            input,
            engine,
            evaluation,
            focus: Field::Tier,
            input_mode: InputMode::Normal,
            flash_message: None,
            should_quit: false,
            theme,
        }
    }

    /// Re-run the engine on the current form values.
    pub fn recompute(&mut self) {
        self.evaluation = evaluate_input(&self.engine, &self.input);
        match &self.evaluation {
            Ok((result, decision)) => {
                debug!(total = result.total, ?decision, "profile re-evaluated")
            }
            Err(e) => debug!(error = %e, "profile rejected"),
        }
    }

    pub fn next_field(&mut self) {
        let i = (self.focus.index() + 1) % Field::ALL.len();
        self.focus = Field::ALL[i];
    }

    pub fn previous_field(&mut self) {
        let len = Field::ALL.len();
        let i = (self.focus.index() + len - 1) % len;
        self.focus = Field::ALL[i];
    }

    /// Right / `l`: next option, bigger number, or toggle.
    pub fn increase(&mut self) {
        self.adjust(true);
    }

    /// Left / `h`: previous option, smaller number, or toggle.
    pub fn decrease(&mut self) {
        self.adjust(false);
    }

    fn adjust(&mut self, up: bool) {
        let input = &mut self.input;
        match self.focus {
            Field::Tier => {
                input.college_tier = if up {
                    input.college_tier.next()
                } else {
                    input.college_tier.previous()
                };
            }
            Field::Major => {
                input.major = if up {
                    input.major.next()
                } else {
                    input.major.previous()
                };
            }
            Field::Gpa => {
                let step = if up { GPA_STEP } else { -GPA_STEP };
                input.gpa = step_gpa(input.gpa, step);
            }
            Field::Internships => {
                input.internships = if up {
                    (input.internships + 1).min(MAX_INTERNSHIPS)
                } else {
                    input.internships.saturating_sub(1).min(MAX_INTERNSHIPS)
                };
            }
            Field::Backlog => input.active_backlog = !input.active_backlog,
        }
        self.recompute();
    }

    /// Space / Enter on the focused field.
    pub fn activate_field(&mut self) {
        self.increase();
    }

    /// Restore the starting profile from config.
    pub fn reset(&mut self) {
        self.input = self.initial_input.clone();
        self.recompute();
        self.show_flash("Reset to starting profile".to_string());
    }

    pub fn result(&self) -> Option<&ScoreResult> {
        self.evaluation.as_ref().ok().map(|(result, _)| result)
    }

    pub fn decision(&self) -> Option<Decision> {
        self.evaluation.as_ref().ok().map(|(_, decision)| *decision)
    }

    pub fn update_flash(&mut self) {
        if let Some((_, timestamp)) = self.flash_message {
            if timestamp.elapsed().as_secs() >= 3 {
                self.flash_message = None;
            }
        }
    }

    pub fn show_flash(&mut self, msg: String) {
        self.flash_message = Some((msg, Instant::now()));
    }

    /// Show help overlay
    pub fn show_help(&mut self) {
        self.input_mode = InputMode::Help;
    }

    /// Show the underwriting logic panel
    pub fn show_logic(&mut self) {
        self.input_mode = InputMode::Logic;
    }

    /// Dismiss any overlay
    pub fn dismiss_overlay(&mut self) {
        self.input_mode = InputMode::Normal;
    }
}

fn evaluate_input(engine: &ScoreEngine, input: &ApplicantInput) -> Evaluation {
    let profile = input.to_profile()?;
    let result = engine.evaluate(&profile)?;
    let decision = engine.classify(result.total);
    Ok((result, decision))
}

/// Move the GPA slider by `step`, staying on the 0.01 grid inside the domain.
fn step_gpa(gpa: f64, step: f64) -> f64 {
    let moved = if gpa.is_finite() { gpa + step } else { GPA_MIN };
    ((moved * 100.0).round() / 100.0).clamp(GPA_MIN, GPA_MAX)
}
