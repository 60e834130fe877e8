//! UI module for rendering the TUI

mod components;
mod forms;
mod home;
mod layout;
mod login;
mod register;

use crate::app::App;
use crate::state::View;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let (main_area, status_area) = layout::create_layout(frame.area());

    match app.state.current_view {
        View::Login => login::draw(frame, main_area, app),
        View::Register => register::draw(frame, main_area, app),
        View::Home => home::draw(frame, main_area, app),
    }

    layout::draw_status_bar(frame, status_area, app);

    // Error dialog overlays everything until dismissed
    if let Some(error) = app.state.current_error() {
        components::render_error_dialog(frame, error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Services;
    use crate::auth::MockSubmissionTask;
    use crate::consultation::MockConsultationApi;
    use crate::state::{Form, LoginValues, RegisterValues};
    use ratatui::{backend::TestBackend, Terminal};
    use std::sync::Arc;

    fn app() -> App {
        App::new(Services {
            login: Arc::new(MockSubmissionTask::<LoginValues>::new()),
            register: Arc::new(MockSubmissionTask::<RegisterValues>::new()),
            consultation: Arc::new(MockConsultationApi::new()),
        })
    }

    fn render(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_login_screen_renders_labels() {
        let screen = render(&app());
        assert!(screen.contains("Welcome Back!"));
        assert!(screen.contains("Email"));
        assert!(screen.contains("Sign In"));
    }

    #[test]
    fn test_register_screen_renders_heading() {
        let mut app = app();
        app.navigate(View::Register);
        assert!(render(&app).contains("Create Account"));
    }

    #[test]
    fn test_validation_errors_are_drawn_inline() {
        let mut app = app();
        app.login.form_mut().validate();
        let screen = render(&app);
        assert!(screen.contains("Email is required"));
        assert!(screen.contains("Password is required"));
    }

    #[test]
    fn test_error_dialog_is_drawn_on_top() {
        let mut app = app();
        app.push_error("Login failed: offline");
        let screen = render(&app);
        assert!(screen.contains("Login failed: offline"));
        assert!(screen.contains("to dismiss"));
    }

    #[test]
    fn test_home_screen_shows_suggestion() {
        let mut app = app();
        app.navigate(View::Home);
        app.suggestion = Some("Drink water".to_string());
        let screen = render(&app);
        assert!(screen.contains("Health Consultation"));
        assert!(screen.contains("Drink water"));
    }
}
