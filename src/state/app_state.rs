//! Application state definitions

use std::collections::VecDeque;

/// Current view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Login,
    Register,
    /// Signed-in destination hosting the consultation screen
    Home,
}

impl View {
    /// Views that own a sign-in or sign-up form
    pub fn is_auth_view(&self) -> bool {
        matches!(self, View::Login | View::Register)
    }

    pub fn title(&self) -> &'static str {
        match self {
            View::Login => "Sign In",
            View::Register => "Create Account",
            View::Home => "Consultation",
        }
    }
}

/// One-way navigation triggered by a successful submission
#[cfg_attr(test, mockall::automock)]
pub trait Navigator {
    fn navigate(&mut self, view: View);
}

/// Application-wide state shared by every screen
#[derive(Debug, Default)]
pub struct AppState {
    // Navigation
    pub current_view: View,
    pub view_history: Vec<View>,

    // Status line
    pub status_message: Option<String>,

    // Error dialog queue, oldest first
    errors: VecDeque<String>,
}

impl AppState {
    /// Go back to previous view; returns false when history is empty
    pub fn go_back(&mut self) -> bool {
        match self.view_history.pop() {
            Some(view) => {
                self.current_view = view;
                true
            }
            None => false,
        }
    }

    /// Replace the current view and forget history (sign-out)
    pub fn reset_to(&mut self, view: View) {
        self.view_history.clear();
        self.current_view = view;
    }

    /// Push an error message to the error queue for display
    pub fn push_error(&mut self, message: String) {
        self.errors.push_back(message);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Error currently shown in the dialog
    pub fn current_error(&self) -> Option<&str> {
        self.errors.front().map(String::as_str)
    }

    pub fn dismiss_error(&mut self) {
        self.errors.pop_front();
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }
}

impl Navigator for AppState {
    fn navigate(&mut self, view: View) {
        if view == self.current_view {
            return;
        }
        self.view_history.push(self.current_view);
        self.current_view = view;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_view_is_login() {
        let state = AppState::default();
        assert_eq!(state.current_view, View::Login);
        assert!(state.view_history.is_empty());
    }

    #[test]
    fn test_navigate_pushes_history() {
        let mut state = AppState::default();
        state.navigate(View::Register);
        assert_eq!(state.current_view, View::Register);
        assert_eq!(state.view_history, vec![View::Login]);
    }

    #[test]
    fn test_navigate_to_current_view_is_noop() {
        let mut state = AppState::default();
        state.navigate(View::Login);
        assert!(state.view_history.is_empty());
    }

    #[test]
    fn test_go_back_restores_previous_view() {
        let mut state = AppState::default();
        state.navigate(View::Register);
        assert!(state.go_back());
        assert_eq!(state.current_view, View::Login);
    }

    #[test]
    fn test_go_back_empty_history_does_nothing() {
        let mut state = AppState::default();
        assert!(!state.go_back());
        assert_eq!(state.current_view, View::Login);
    }

    #[test]
    fn test_reset_to_clears_history() {
        let mut state = AppState::default();
        state.navigate(View::Register);
        state.navigate(View::Home);
        state.reset_to(View::Login);
        assert_eq!(state.current_view, View::Login);
        assert!(state.view_history.is_empty());
    }

    #[test]
    fn test_error_queue_is_fifo() {
        let mut state = AppState::default();
        assert!(!state.has_errors());
        state.push_error("first".to_string());
        state.push_error("second".to_string());
        assert_eq!(state.current_error(), Some("first"));
        state.dismiss_error();
        assert_eq!(state.current_error(), Some("second"));
        state.dismiss_error();
        assert!(!state.has_errors());
    }

    #[test]
    fn test_auth_views() {
        assert!(View::Login.is_auth_view());
        assert!(View::Register.is_auth_view());
        assert!(!View::Home.is_auth_view());
    }
}
