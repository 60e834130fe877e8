//! Layout components (centered column, status bar)

use crate::app::App;
use crate::platform::{COPY_SHORTCUT, SUBMIT_SHORTCUT};
use crate::state::View;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Width of the form column on wide terminals
const COLUMN_WIDTH: u16 = 64;

/// Split the screen into content and a one-line status bar
pub fn create_layout(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    (chunks[0], chunks[1])
}

/// Horizontally centered column for a form screen
pub fn centered_column(area: Rect) -> Rect {
    let width = COLUMN_WIDTH.min(area.width);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + u16::min(1, area.height),
        width,
        height: area.height.saturating_sub(1),
    }
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let view = app.state.current_view;
    let session = if view.is_auth_view() {
        Span::styled(" ○ ", Style::default().fg(Color::Red))
    } else {
        Span::styled(" ● ", Style::default().fg(Color::Green))
    };
    let mut spans = vec![
        session,
        Span::styled(
            format!(" {} ", view.title()),
            Style::default().fg(Color::Black).bg(Color::Cyan),
        ),
    ];

    spans.push(Span::raw(" "));
    spans.push(Span::styled(
        get_view_hints(view),
        Style::default().fg(Color::Gray),
    ));

    if let Some(msg) = &app.state.status_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg, Style::default().fg(Color::Yellow)));
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, area);

    // Quit hint on the right
    let quit_hint = " ^C:quit ";
    let quit_area = Rect {
        x: area.x + area.width.saturating_sub(quit_hint.len() as u16),
        y: area.y,
        width: (quit_hint.len() as u16).min(area.width),
        height: 1,
    };
    let quit_widget =
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}

/// Get keyboard hints for the current view
fn get_view_hints(view: View) -> String {
    match view {
        View::Login => "Tab:next  Enter:sign in  ^R:sign up".to_string(),
        View::Register => "Tab:next  Enter:create  ^L:sign in  Esc:back".to_string(),
        View::Home => {
            format!("Tab:next  {SUBMIT_SHORTCUT}:consult  {COPY_SHORTCUT}:copy  ^L:sign out")
        }
    }
}
