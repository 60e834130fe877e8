//! Sign-in screen

use super::forms::{draw_form, draw_help_text, FormScreen};
use super::layout::centered_column;
use crate::app::App;
use ratatui::{layout::Rect, Frame};

const SCREEN: FormScreen<'static> = FormScreen {
    heading: "Welcome Back!",
    subtitle: "Continue your journey to better health",
    submit_label: "Sign In",
    pending_label: "Signing In...",
};

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let column = centered_column(area);
    let rest = draw_form(frame, column, &app.login, &SCREEN);
    draw_help_text(
        frame,
        rest,
        &[
            ("^F", "forgot password?"),
            ("^R", "don't have an account? sign up"),
        ],
    );
}
