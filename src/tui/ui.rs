use ratatui::prelude::*;
use ratatui::widgets::{Block, Clear, Paragraph, Wrap};

use crate::output::{format_delta, WaterfallScale, HYPOTHESIS, WEIGHTAGE};
use crate::scoring::{Decision, ScoreResult, GPA_MAX, GPA_MIN, MAX_INTERNSHIPS};
use crate::tui::app::{App, Field, InputMode};

const TITLE: &str = "NTC Underwriter";
const SUBTITLE: &str = "Future-Potential Underwriting Model";
const FORM_WIDTH: u16 = 44;
const LABEL_WIDTH: usize = 14;
const DELTA_WIDTH: usize = 5;
const GAUGE_WIDTH: usize = 10;

pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Handle very small terminal sizes gracefully
    if area.height < 14 || area.width < 70 {
        let msg = Paragraph::new("Terminal too small").alignment(Alignment::Center);
        frame.render_widget(msg, area);
        return;
    }

    // Layout: Title(1) + Body(fill) + Status(1)
    let rows = Layout::vertical([
        Constraint::Length(1), // Title bar
        Constraint::Fill(1),   // Form | score + chart
        Constraint::Length(1), // Status bar
    ])
    .split(area);

    let columns = Layout::horizontal([Constraint::Length(FORM_WIDTH), Constraint::Fill(1)])
        .split(rows[1]);

    let right = Layout::vertical([
        Constraint::Length(5), // Score card
        Constraint::Fill(1),   // Waterfall
    ])
    .split(columns[1]);

    render_title(frame, rows[0], app);
    render_form(frame, columns[0], app);
    render_score_card(frame, right[0], app);
    render_waterfall(frame, right[1], app);
    render_status_bar(frame, rows[2], app);

    match app.input_mode {
        InputMode::Help => render_help_popup(frame, app),
        InputMode::Logic => render_logic_popup(frame, app),
        InputMode::Normal => {}
    }
}

fn render_title(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let padding_len = (area.width as usize).saturating_sub(TITLE.len() + SUBTITLE.len());
    let title = Line::from(vec![
        Span::styled(TITLE, Style::default().fg(theme.title_color).bold()),
        Span::raw(" ".repeat(padding_len)),
        Span::styled(SUBTITLE, Style::default().fg(theme.muted)),
    ]);
    frame.render_widget(Paragraph::new(title), area);
}

fn render_form(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let block = Block::bordered()
        .title(" Applicant Profile ")
        .border_style(Style::default().fg(theme.muted));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = Vec::new();
    for field in Field::ALL {
        let focused = app.focus == field;
        let label_style = if focused {
            Style::default().fg(theme.title_color).bold()
        } else {
            Style::default().fg(theme.field_label)
        };
        lines.push(Line::from(Span::styled(field.label(), label_style)));

        let mut value_spans = vec![Span::raw("  ")];
        let value = field_value(app, field);
        if focused {
            value_spans.push(Span::styled(format!("< {} >", value), theme.field_focused));
        } else {
            value_spans.push(Span::raw(format!("  {}  ", value)));
        }
        if field == Field::Gpa {
            value_spans.push(Span::raw(" "));
            value_spans.extend(gpa_gauge(app.input.gpa, app));
        }
        lines.push(Line::from(value_spans));
        lines.push(Line::from(""));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

fn field_value(app: &App, field: Field) -> String {
    let input = &app.input;
    match field {
        Field::Tier => input.college_tier.label().to_string(),
        Field::Major => input.major.label().to_string(),
        Field::Gpa => format!("{:.2}", input.gpa),
        Field::Internships => format!("{} / {}", input.internships, MAX_INTERNSHIPS),
        Field::Backlog => if input.active_backlog { "Yes" } else { "No" }.to_string(),
    }
}

/// Slider track for the GPA field, 5.0 at the left edge and 10.0 at the right.
fn gpa_gauge(gpa: f64, app: &App) -> Vec<Span<'static>> {
    let ratio = ((gpa - GPA_MIN) / (GPA_MAX - GPA_MIN)).clamp(0.0, 1.0);
    let filled = (ratio * GAUGE_WIDTH as f64).round() as usize;
    let empty = GAUGE_WIDTH.saturating_sub(filled);

    let mut spans = Vec::new();
    if filled > 0 {
        spans.push(Span::styled(
            "█".repeat(filled),
            Style::default().fg(app.theme.gauge_filled),
        ));
    }
    if empty > 0 {
        spans.push(Span::styled(
            "░".repeat(empty),
            Style::default().fg(app.theme.gauge_empty),
        ));
    }
    spans
}

fn render_score_card(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let block = Block::bordered()
        .title(" Predicted Credit Score ")
        .border_style(Style::default().fg(theme.muted));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = match &app.evaluation {
        Ok((result, decision)) => score_card_lines(result, *decision, app),
        Err(e) => vec![
            Line::from(Span::styled(
                format!("Invalid profile: {}", e),
                Style::default().fg(theme.error).bold(),
            )),
            Line::from(Span::styled(
                "Adjust the highlighted value to continue.",
                Style::default().fg(theme.muted),
            )),
        ],
    };

    frame.render_widget(Paragraph::new(lines), inner);
}

fn score_card_lines(result: &ScoreResult, decision: Decision, app: &App) -> Vec<Line<'static>> {
    let theme = &app.theme;
    let color = theme.decision_color(decision);

    let mut headline = vec![
        Span::styled(result.total.to_string(), Style::default().fg(color).bold()),
        Span::styled(
            format!("  {} points added", format_delta(result.points_added())),
            Style::default().fg(theme.muted),
        ),
    ];
    if result.is_capped() {
        headline.push(Span::styled(
            format!("  (capped from {})", result.breakdown.pre_cap_total()),
            Style::default().fg(theme.muted),
        ));
    }

    vec![
        Line::from(headline),
        Line::from(Span::styled(
            decision.headline(),
            Style::default().fg(color).bold(),
        )),
        Line::from(decision.summary()),
    ]
}

fn render_waterfall(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let block = Block::bordered()
        .title(" Why this score? ")
        .border_style(Style::default().fg(theme.muted));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let result = match app.result() {
        Some(r) => r,
        None => {
            let msg = Paragraph::new("No breakdown for an invalid profile")
                .alignment(Alignment::Center)
                .style(Style::default().fg(theme.muted));
            frame.render_widget(msg, inner);
            return;
        }
    };

    let steps = result.breakdown.waterfall();
    let chart_width = (inner.width as usize).saturating_sub(LABEL_WIDTH + 1 + DELTA_WIDTH + 3);
    let scale = WaterfallScale::new(&steps, chart_width);

    let mut lines = vec![Line::from(Span::styled(
        "Score Composition",
        Style::default().bold(),
    ))];
    lines.push(Line::from(""));

    for step in &steps {
        let span = scale.span(step);
        let color = theme.delta_color(step.delta);
        let mut spans = vec![
            Span::raw(format!("{:<w$} ", step.factor.label(), w = LABEL_WIDTH)),
            Span::styled(
                format!("{:>w$}", format_delta(step.delta), w = DELTA_WIDTH),
                Style::default().fg(color),
            ),
            Span::styled(" │", Style::default().fg(theme.axis)),
            Span::raw(" ".repeat(span.offset + 1)),
        ];
        if span.len > 0 {
            spans.push(Span::styled("█".repeat(span.len), Style::default().fg(color)));
        }
        lines.push(Line::from(spans));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled(format!("{:<w$} ", "Base", w = LABEL_WIDTH), Style::default().fg(theme.muted)),
        Span::styled(
            format!("{:>w$}", result.breakdown.base_score, w = DELTA_WIDTH),
            Style::default().fg(theme.muted),
        ),
    ]));
    lines.push(Line::from(vec![
        Span::styled(format!("{:<w$} ", "Total", w = LABEL_WIDTH), Style::default().bold()),
        Span::styled(
            format!("{:>w$}", result.total, w = DELTA_WIDTH),
            Style::default().bold(),
        ),
    ]));

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let text = if let Some((ref msg, _)) = app.flash_message {
        Line::from(Span::styled(msg.clone(), Style::default().fg(theme.flash)))
    } else {
        let hints = [
            ("j/k", ":field "),
            ("h/l", ":adjust "),
            ("Space", ":toggle "),
            ("r", ":reset "),
            ("e", ":logic "),
            ("?", ":help "),
            ("q", ":quit"),
        ];

        let mut spans = Vec::new();
        for (i, (key, label)) in hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" "));
            }
            spans.push(Span::styled(*key, Style::default().fg(theme.status_key_color)));
            spans.push(Span::raw(*label));
        }
        Line::from(spans)
    };

    frame.render_widget(
        Paragraph::new(text).style(Style::default().bg(theme.status_bar_bg)),
        area,
    );
}

/// Create a centered rectangle with fixed width and height
fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    // Clamp dimensions to area bounds
    let width = width.min(area.width);
    let height = height.min(area.height);

    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;

    Rect {
        x,
        y,
        width,
        height,
    }
}

fn popup_block(title: &'static str, app: &App) -> Block<'static> {
    Block::bordered()
        .title(title)
        .title_style(app.theme.popup_title)
        .border_style(Style::default().fg(app.theme.popup_border))
        .style(Style::default().bg(app.theme.popup_bg))
}

/// Render the help overlay popup
fn render_help_popup(frame: &mut Frame, app: &App) {
    let popup_area = centered_rect_fixed(50, 14, frame.area());
    frame.render_widget(Clear, popup_area);

    let block = popup_block(" Keyboard Shortcuts ", app);
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let key_style = Style::default().fg(app.theme.status_key_color).bold();
    let bindings = [
        ("j / Down      ", "Next field"),
        ("k / Up        ", "Previous field"),
        ("l / Right     ", "Increase / next option"),
        ("h / Left      ", "Decrease / previous option"),
        ("Space / Enter ", "Toggle or cycle field"),
        ("r             ", "Reset to starting profile"),
        ("e             ", "Show underwriting logic"),
        ("?             ", "Show/hide this help"),
        ("q / Ctrl-c    ", "Quit"),
    ];

    let mut help_lines: Vec<Line> = bindings
        .iter()
        .map(|(key, action)| Line::from(vec![Span::styled(*key, key_style), Span::raw(*action)]))
        .collect();
    help_lines.push(Line::from(""));
    help_lines.push(Line::from(Span::styled(
        "Press any key to close",
        Style::default().fg(app.theme.muted),
    )));

    frame.render_widget(Paragraph::new(help_lines), inner);
}

/// Render the underwriting logic panel
fn render_logic_popup(frame: &mut Frame, app: &App) {
    let popup_area = centered_rect_fixed(64, 16, frame.area());
    frame.render_widget(Clear, popup_area);

    let block = popup_block(" Underwriting Logic ", app);
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Hypothesis: ", Style::default().bold()),
            Span::raw(HYPOTHESIS),
        ]),
        Line::from(""),
        Line::from(Span::styled("Weightage Logic:", Style::default().bold())),
    ];
    for (factor, why) in WEIGHTAGE {
        lines.push(Line::from(vec![
            Span::raw("- "),
            Span::styled(
                format!("{}: ", factor),
                Style::default().fg(app.theme.status_key_color),
            ),
            Span::raw(why),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Press any key to close",
        Style::default().fg(app.theme.muted),
    )));

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
}
