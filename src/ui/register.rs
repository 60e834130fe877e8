//! Sign-up screen

use super::forms::{draw_form, draw_help_text, FormScreen};
use super::layout::centered_column;
use crate::app::App;
use ratatui::{layout::Rect, Frame};

const SCREEN: FormScreen<'static> = FormScreen {
    heading: "Create Account",
    subtitle: "Start your journey to better health",
    submit_label: "Create Account",
    pending_label: "Creating Account...",
};

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let column = centered_column(area);
    let rest = draw_form(frame, column, &app.register, &SCREEN);
    draw_help_text(
        frame,
        rest,
        &[
            ("^G", "continue with Google"),
            ("^F", "continue with Facebook"),
            ("^L", "already have an account? sign in"),
        ],
    );
}
