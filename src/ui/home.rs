//! Consultation screen shown after signing in

use super::forms::{draw_form, draw_help_text, FormScreen};
use super::layout::centered_column;
use crate::app::App;
use crate::platform::{COPY_SHORTCUT, SUBMIT_SHORTCUT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

const SCREEN: FormScreen<'static> = FormScreen {
    heading: "Health Consultation",
    subtitle: "Describe what you feel and attach supporting records",
    submit_label: "Consult",
    pending_label: "Consulting...",
};

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let column = centered_column(area);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(column);

    let rest = draw_form(frame, chunks[0], &app.consultation, &SCREEN);
    draw_help_text(
        frame,
        rest,
        &[(SUBMIT_SHORTCUT, "consult"), (COPY_SHORTCUT, "copy suggestion")],
    );

    draw_suggestion(frame, chunks[1], app.suggestion.as_deref());
}

fn draw_suggestion(frame: &mut Frame, area: Rect, suggestion: Option<&str>) {
    let (lines, style): (Vec<Line>, Style) = match suggestion {
        Some(text) => (
            text.lines().map(|l| Line::from(l.to_string())).collect(),
            Style::default(),
        ),
        None => (
            vec![Line::from("No suggestion yet")],
            Style::default().fg(Color::DarkGray),
        ),
    };

    let block = Block::default()
        .title(" Suggestion ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));
    let paragraph = Paragraph::new(lines)
        .style(style)
        .wrap(Wrap { trim: false })
        .block(block);
    frame.render_widget(paragraph, area);
}
