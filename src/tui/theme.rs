//! Centralized theme module for TUI color constants and styles

use ratatui::prelude::*;

use crate::config::ThemeSetting;
use crate::scoring::Decision;

/// Complete color palette for the TUI
#[derive(Debug, Clone)]
pub struct ThemeColors {
    // Decision bands (traffic light pattern)
    pub elite: Color,
    pub standard: Color,
    pub rejected: Color,

    // Waterfall colors
    pub delta_positive: Color,
    pub delta_negative: Color,
    pub axis: Color,

    // Form colors
    pub field_label: Color,
    pub field_focused: Style,
    pub gauge_filled: Color,
    pub gauge_empty: Color,

    // General colors
    pub muted: Color,
    pub title_color: Color,
    pub error: Color,

    // Status bar colors
    pub status_bar_bg: Color,
    pub status_key_color: Color,
    pub flash: Color,

    // Popup overlay colors
    pub popup_border: Color,
    pub popup_title: Style,
    pub popup_bg: Color,
}

impl ThemeColors {
    pub fn dark() -> Self {
        Self {
            elite: Color::Green,
            standard: Color::Yellow,
            rejected: Color::Red,
            delta_positive: Color::Green,
            delta_negative: Color::Red,
            axis: Color::Indexed(238),
            field_label: Color::Gray,
            field_focused: Style::new().fg(Color::Cyan).bold().reversed(),
            gauge_filled: Color::Cyan,
            gauge_empty: Color::DarkGray,
            muted: Color::Gray,
            title_color: Color::Cyan,
            error: Color::LightRed,
            status_bar_bg: Color::Indexed(236),
            status_key_color: Color::Cyan,
            flash: Color::Green,
            popup_border: Color::Cyan,
            popup_title: Style::new().fg(Color::Cyan).bold(),
            popup_bg: Color::Indexed(234),
        }
    }

    pub fn light() -> Self {
        Self {
            elite: Color::Rgb(0, 128, 0),
            standard: Color::Rgb(176, 112, 0),
            rejected: Color::Rgb(190, 0, 0),
            delta_positive: Color::Rgb(0, 128, 0),
            delta_negative: Color::Rgb(190, 0, 0),
            axis: Color::Indexed(250),
            field_label: Color::DarkGray,
            field_focused: Style::new().fg(Color::Blue).bold().reversed(),
            gauge_filled: Color::Blue,
            gauge_empty: Color::Indexed(252),
            muted: Color::DarkGray,
            title_color: Color::Blue,
            error: Color::Red,
            status_bar_bg: Color::Indexed(254),
            status_key_color: Color::Blue,
            flash: Color::Rgb(0, 128, 0),
            popup_border: Color::Blue,
            popup_title: Style::new().fg(Color::Blue).bold(),
            popup_bg: Color::Indexed(255),
        }
    }

    pub fn decision_color(&self, decision: Decision) -> Color {
        match decision {
            Decision::Elite => self.elite,
            Decision::Standard => self.standard,
            Decision::Rejected => self.rejected,
        }
    }

    pub fn delta_color(&self, delta: i32) -> Color {
        if delta < 0 {
            self.delta_negative
        } else {
            self.delta_positive
        }
    }
}

/// Resolve the configured theme. `Auto` asks the terminal for its background
/// luma, so call this before the TUI takes over the terminal.
pub fn resolve_theme(setting: ThemeSetting) -> ThemeColors {
    match setting {
        ThemeSetting::Dark => ThemeColors::dark(),
        ThemeSetting::Light => ThemeColors::light(),
        ThemeSetting::Auto => match terminal_light::luma() {
            Ok(luma) if luma > 0.6 => ThemeColors::light(),
            _ => ThemeColors::dark(),
        },
    }
}
