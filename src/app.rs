//! Application state and core logic

use crate::auth::{SimulatedSubmission, SubmissionError, SubmissionTask};
use crate::config::TuiConfig;
use crate::consultation::{
    load_attachments, ConsultationApi, ConsultationClient, ConsultationError,
    ConsultationResponse, Endpoint,
};
use crate::state::{
    AppState, ConsultationForm, Form, FormController, LoginForm, LoginValues, Navigator,
    RegisterForm, RegisterValues, Submission, SubmitError, View,
};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::fmt::Debug;
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{info, warn};
use uuid::Uuid;

/// Backends the screens submit to
#[derive(Clone)]
pub struct Services {
    pub login: Arc<dyn SubmissionTask<LoginValues>>,
    pub register: Arc<dyn SubmissionTask<RegisterValues>>,
    pub consultation: Arc<dyn ConsultationApi>,
}

impl Services {
    /// Simulated sign-in/sign-up and the HTTP consultation client
    pub fn from_config(config: &TuiConfig) -> Self {
        let delay = config
            .submission_delay()
            .unwrap_or(SimulatedSubmission::DEFAULT_DELAY);
        Self {
            login: Arc::new(SimulatedSubmission::new("Login").with_delay(delay)),
            register: Arc::new(SimulatedSubmission::new("Register").with_delay(delay)),
            consultation: Arc::new(ConsultationClient::new(Endpoint::from_env(
                config.backend_api_url.clone(),
            ))),
        }
    }
}

/// Outcome of work running off the UI loop
#[derive(Debug)]
pub enum BackgroundEvent {
    Login {
        attempt: Uuid,
        outcome: Result<(), SubmissionError>,
    },
    Register {
        attempt: Uuid,
        outcome: Result<(), SubmissionError>,
    },
    Consultation {
        attempt: Uuid,
        outcome: Result<ConsultationResponse, ConsultationError>,
    },
}

/// What a key press did to a form
enum FormKey {
    Submit,
    Handled,
    Unhandled,
}

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    pub login: FormController<LoginForm>,
    pub register: FormController<RegisterForm>,
    pub consultation: FormController<ConsultationForm>,
    /// Last suggestion returned by the consultation service
    pub suggestion: Option<String>,
    services: Services,
    events_tx: UnboundedSender<BackgroundEvent>,
    events_rx: UnboundedReceiver<BackgroundEvent>,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create a new App instance
    pub fn new(services: Services) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            state: AppState::default(),
            login: FormController::new(LoginForm::new()).navigate_on_success(View::Home),
            register: FormController::new(RegisterForm::new()).navigate_on_success(View::Home),
            consultation: FormController::new(ConsultationForm::new()),
            suggestion: None,
            services,
            events_tx,
            events_rx,
            quit: false,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn request_quit(&mut self) {
        self.quit = true;
    }

    /// Push an error message to the error queue for display
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.state.push_error(message.into());
    }

    /// Apply every finished background submission
    pub fn poll_background(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            self.apply_event(event);
        }
    }

    fn apply_event(&mut self, event: BackgroundEvent) {
        match event {
            BackgroundEvent::Login { attempt, outcome } => {
                let failure = outcome.as_ref().err().map(ToString::to_string);
                if self.login.complete(attempt, outcome, &mut self.state) {
                    if let Some(message) = failure {
                        self.push_error(format!("Login failed: {message}"));
                    }
                }
            }
            BackgroundEvent::Register { attempt, outcome } => {
                let failure = outcome.as_ref().err().map(ToString::to_string);
                if self.register.complete(attempt, outcome, &mut self.state) {
                    if let Some(message) = failure {
                        self.push_error(format!("Registration failed: {message}"));
                    }
                }
            }
            BackgroundEvent::Consultation { attempt, outcome } => match outcome {
                Ok(response) => {
                    if self.consultation.complete(attempt, Ok(()), &mut self.state) {
                        self.suggestion = Some(response.suggestion);
                    }
                }
                Err(err) => {
                    let message = err.to_string();
                    let rejected = Err(SubmissionError::Rejected(message.clone()));
                    if self.consultation.complete(attempt, rejected, &mut self.state) {
                        self.push_error(message);
                    }
                }
            },
        }
        self.discard_unmounted_forms();
    }

    /// Handle a key press
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Handle error dialog dismissal first (modal)
        if self.state.has_errors() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return Ok(());
        }

        // Clear any status messages on key press
        self.state.status_message = None;

        match self.state.current_view {
            View::Login => self.handle_login_key(key),
            View::Register => self.handle_register_key(key),
            View::Home => self.handle_home_key(key)?,
        }

        self.discard_unmounted_forms();
        Ok(())
    }

    /// Navigate to a new view
    pub fn navigate(&mut self, view: View) {
        self.state.navigate(view);
        self.discard_unmounted_forms();
    }

    /// Go back to previous view
    pub fn go_back(&mut self) {
        self.state.go_back();
        self.discard_unmounted_forms();
    }

    /// A form lives while its view is shown or still on the history stack
    fn is_mounted(&self, view: View) -> bool {
        self.state.current_view == view || self.state.view_history.contains(&view)
    }

    fn discard_unmounted_forms(&mut self) {
        if !self.is_mounted(View::Login) {
            self.login.reset();
        }
        if !self.is_mounted(View::Register) {
            self.register.reset();
        }
        if !self.is_mounted(View::Home) {
            self.consultation.reset();
            self.suggestion = None;
        }
    }

    /// Handle keys in Login view
    fn handle_login_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('r') if ctrl => self.navigate(View::Register),
            KeyCode::Char('f') if ctrl => {
                info!("Forgot password");
                self.state.set_status("Password recovery is not available yet");
            }
            _ => {
                if let FormKey::Submit = edit_form(&mut self.login, key) {
                    self.submit_login();
                }
            }
        }
    }

    /// Handle keys in Register view
    fn handle_register_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => self.go_back(),
            KeyCode::Char('l') if ctrl => {
                if self.state.view_history.last() == Some(&View::Login) {
                    self.go_back();
                } else {
                    self.navigate(View::Login);
                }
            }
            KeyCode::Char('g') if ctrl => self.social_sign_in("Google"),
            KeyCode::Char('f') if ctrl => self.social_sign_in("Facebook"),
            _ => {
                if let FormKey::Submit = edit_form(&mut self.register, key) {
                    self.submit_register();
                }
            }
        }
    }

    /// Handle keys in Home view
    fn handle_home_key(&mut self, key: KeyEvent) -> Result<()> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('l') if ctrl => self.sign_out(),
            KeyCode::Char('y') if key.modifiers.contains(crate::platform::COPY_MODIFIER) => {
                if let Err(err) = self.copy_suggestion() {
                    warn!("Copy failed: {err:#}");
                    self.push_error(format!("Failed to copy: {err}"));
                }
            }
            _ => match edit_form(&mut self.consultation, key) {
                FormKey::Submit => self.submit_consultation(),
                FormKey::Handled | FormKey::Unhandled => {}
            },
        }
        Ok(())
    }

    fn social_sign_in(&mut self, provider: &str) {
        info!("{provider} sign in pressed");
        self.state
            .set_status(format!("Continue with {provider} is not available yet"));
    }

    fn sign_out(&mut self) {
        info!("Signing out");
        self.state.reset_to(View::Login);
        self.login.reset();
        self.discard_unmounted_forms();
    }

    fn submit_login(&mut self) {
        match self.login.begin_submit() {
            Ok(submission) => spawn_submission(
                Arc::clone(&self.services.login),
                submission,
                self.events_tx.clone(),
                |attempt, outcome| BackgroundEvent::Login { attempt, outcome },
            ),
            Err(err) => self.report_rejected_submit(err),
        }
    }

    fn submit_register(&mut self) {
        match self.register.begin_submit() {
            Ok(submission) => spawn_submission(
                Arc::clone(&self.services.register),
                submission,
                self.events_tx.clone(),
                |attempt, outcome| BackgroundEvent::Register { attempt, outcome },
            ),
            Err(err) => self.report_rejected_submit(err),
        }
    }

    fn submit_consultation(&mut self) {
        let Submission { attempt, values } = match self.consultation.begin_submit() {
            Ok(submission) => submission,
            Err(err) => return self.report_rejected_submit(err),
        };
        self.suggestion = None;

        let attachments = match load_attachments(&values.attachment_paths) {
            Ok(attachments) => attachments,
            Err(err) => {
                warn!("Attachment loading failed: {err}");
                let rejected = Err(SubmissionError::Rejected(err.to_string()));
                self.consultation.complete(attempt, rejected, &mut self.state);
                self.push_error(err.to_string());
                return;
            }
        };

        let api = Arc::clone(&self.services.consultation);
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let outcome = api.fetch_consultation(&values.complaint, attachments).await;
            let _ = tx.send(BackgroundEvent::Consultation { attempt, outcome });
        });
    }

    fn report_rejected_submit<K: Debug>(&mut self, err: SubmitError<K>) {
        match err {
            SubmitError::Invalid { .. } => {
                self.state.set_status("Please fix the highlighted fields");
            }
            SubmitError::AlreadyPending => {}
            SubmitError::Failed(err) => self.push_error(err.to_string()),
        }
    }

    fn copy_suggestion(&mut self) -> Result<()> {
        let Some(suggestion) = &self.suggestion else {
            return Ok(());
        };
        let mut clipboard = arboard::Clipboard::new()?;
        clipboard.set_text(suggestion.clone())?;
        self.state.set_status("Copied suggestion to clipboard");
        Ok(())
    }
}

/// Run `task` off the UI loop and report its outcome on `tx`
fn spawn_submission<V>(
    task: Arc<dyn SubmissionTask<V>>,
    submission: Submission<V>,
    tx: UnboundedSender<BackgroundEvent>,
    wrap: fn(Uuid, Result<(), SubmissionError>) -> BackgroundEvent,
) where
    V: Send + Sync + 'static,
{
    let Submission { attempt, values } = submission;
    tokio::spawn(async move {
        let outcome = task.run(values).await;
        let _ = tx.send(wrap(attempt, outcome));
    });
}

/// Shared editing keys for every form
fn edit_form<F: Form>(controller: &mut FormController<F>, key: KeyEvent) -> FormKey {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let form = controller.form_mut();
    match key.code {
        KeyCode::Char('s') if ctrl => FormKey::Submit,
        KeyCode::Char(_) if ctrl => FormKey::Unhandled,
        KeyCode::Tab | KeyCode::Down => {
            form.next_field();
            FormKey::Handled
        }
        KeyCode::BackTab | KeyCode::Up => {
            form.prev_field();
            FormKey::Handled
        }
        KeyCode::Enter => {
            let field = form.get_active_field_mut();
            if field.is_multiline {
                field.push_char('\n');
                FormKey::Handled
            } else {
                FormKey::Submit
            }
        }
        KeyCode::Char(c) => {
            form.get_active_field_mut().push_char(c);
            FormKey::Handled
        }
        KeyCode::Backspace => {
            form.get_active_field_mut().pop_char();
            FormKey::Handled
        }
        _ => FormKey::Unhandled,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::MockSubmissionTask;
    use crate::consultation::MockConsultationApi;
    use crate::state::SubmissionStatus;
    use pretty_assertions::assert_eq;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c))).unwrap();
        }
    }

    fn services(
        login: MockSubmissionTask<LoginValues>,
        register: MockSubmissionTask<RegisterValues>,
        consultation: MockConsultationApi,
    ) -> Services {
        Services {
            login: Arc::new(login),
            register: Arc::new(register),
            consultation: Arc::new(consultation),
        }
    }

    fn idle_app() -> App {
        App::new(services(
            MockSubmissionTask::new(),
            MockSubmissionTask::new(),
            MockConsultationApi::new(),
        ))
    }

    fn fill_login(app: &mut App) {
        type_text(app, "a@b.co");
        app.handle_key(key(KeyCode::Tab)).unwrap();
        type_text(app, "123456");
    }

    async fn next_event(app: &mut App) {
        let event = app.events_rx.recv().await.expect("background event");
        app.apply_event(event);
    }

    mod navigation {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_starts_on_login() {
            let app = idle_app();
            assert_eq!(app.state.current_view, View::Login);
            assert!(!app.should_quit());
        }

        #[test]
        fn test_ctrl_r_opens_register_and_esc_returns() {
            let mut app = idle_app();
            app.handle_key(ctrl('r')).unwrap();
            assert_eq!(app.state.current_view, View::Register);
            app.handle_key(key(KeyCode::Esc)).unwrap();
            assert_eq!(app.state.current_view, View::Login);
        }

        #[test]
        fn test_ctrl_l_on_register_pops_back_to_login() {
            let mut app = idle_app();
            app.handle_key(ctrl('r')).unwrap();
            app.handle_key(ctrl('l')).unwrap();
            assert_eq!(app.state.current_view, View::Login);
            assert!(app.state.view_history.is_empty());
        }

        #[test]
        fn test_leaving_register_discards_its_form() {
            let mut app = idle_app();
            app.handle_key(ctrl('r')).unwrap();
            type_text(&mut app, "Budi");
            assert_eq!(app.register.form().full_name.as_text(), "Budi");
            app.handle_key(key(KeyCode::Esc)).unwrap();
            assert_eq!(app.register.form().full_name.as_text(), "");
        }

        #[test]
        fn test_login_form_survives_visit_to_register() {
            let mut app = idle_app();
            type_text(&mut app, "a@b.co");
            app.handle_key(ctrl('r')).unwrap();
            app.handle_key(key(KeyCode::Esc)).unwrap();
            assert_eq!(app.login.form().email.as_text(), "a@b.co");
        }

        #[test]
        fn test_stubs_only_set_status() {
            let mut app = idle_app();
            app.handle_key(ctrl('f')).unwrap();
            assert_eq!(app.state.current_view, View::Login);
            assert!(app.state.status_message.is_some());

            app.handle_key(ctrl('r')).unwrap();
            app.handle_key(ctrl('g')).unwrap();
            assert_eq!(app.state.current_view, View::Register);
            assert_eq!(
                app.state.status_message.as_deref(),
                Some("Continue with Google is not available yet")
            );
        }
    }

    mod login {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_invalid_login_never_runs_task() {
            let mut login = MockSubmissionTask::<LoginValues>::new();
            login.expect_run().times(0);
            let mut app = App::new(services(
                login,
                MockSubmissionTask::new(),
                MockConsultationApi::new(),
            ));

            type_text(&mut app, "foo");
            app.handle_key(key(KeyCode::Enter)).unwrap();

            assert_eq!(app.login.status(), SubmissionStatus::Idle);
            assert_eq!(app.login.form().email.error(), Some("Invalid email address"));
            assert_eq!(
                app.login.form().password.error(),
                Some("Password is required")
            );
            assert_eq!(app.state.current_view, View::Login);
        }

        #[tokio::test]
        async fn test_valid_login_goes_pending_then_home() {
            let mut login = MockSubmissionTask::<LoginValues>::new();
            login
                .expect_run()
                .withf(|values: &LoginValues| {
                    values.email == "a@b.co" && values.password == "123456"
                })
                .times(1)
                .returning(|_| Ok(()));
            let mut app = App::new(services(
                login,
                MockSubmissionTask::new(),
                MockConsultationApi::new(),
            ));

            fill_login(&mut app);
            app.handle_key(key(KeyCode::Enter)).unwrap();
            assert_eq!(app.login.status(), SubmissionStatus::Pending);

            next_event(&mut app).await;
            assert_eq!(app.state.current_view, View::Home);
            assert_eq!(app.state.view_history, vec![View::Login]);
        }

        #[tokio::test]
        async fn test_double_enter_submits_once() {
            let mut login = MockSubmissionTask::<LoginValues>::new();
            login.expect_run().times(1).returning(|_| Ok(()));
            let mut app = App::new(services(
                login,
                MockSubmissionTask::new(),
                MockConsultationApi::new(),
            ));

            fill_login(&mut app);
            app.handle_key(key(KeyCode::Enter)).unwrap();
            app.handle_key(key(KeyCode::Enter)).unwrap();

            next_event(&mut app).await;
            assert_eq!(app.state.current_view, View::Home);
        }

        #[tokio::test]
        async fn test_rejected_login_shows_error_and_stays() {
            let mut login = MockSubmissionTask::<LoginValues>::new();
            login
                .expect_run()
                .times(1)
                .returning(|_| Err(SubmissionError::Rejected("invalid credentials".to_string())));
            let mut app = App::new(services(
                login,
                MockSubmissionTask::new(),
                MockConsultationApi::new(),
            ));

            fill_login(&mut app);
            app.handle_key(key(KeyCode::Enter)).unwrap();
            next_event(&mut app).await;

            assert_eq!(app.state.current_view, View::Login);
            assert_eq!(app.login.status(), SubmissionStatus::Failed);
            assert_eq!(
                app.state.current_error(),
                Some("Login failed: invalid credentials")
            );

            // Error dialog swallows keys until dismissed
            app.handle_key(key(KeyCode::Char('x'))).unwrap();
            assert_eq!(app.login.form().password.as_text(), "123456");
            app.handle_key(key(KeyCode::Esc)).unwrap();
            assert!(!app.state.has_errors());
        }
    }

    mod register {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_valid_registration_goes_home() {
            let mut register = MockSubmissionTask::<RegisterValues>::new();
            register
                .expect_run()
                .withf(|values: &RegisterValues| values.full_name == "Budi")
                .times(1)
                .returning(|_| Ok(()));
            let mut app = App::new(services(
                MockSubmissionTask::new(),
                register,
                MockConsultationApi::new(),
            ));

            app.handle_key(ctrl('r')).unwrap();
            type_text(&mut app, "Budi");
            app.handle_key(key(KeyCode::Tab)).unwrap();
            type_text(&mut app, "budi@example.com");
            app.handle_key(key(KeyCode::Tab)).unwrap();
            type_text(&mut app, "secret1");
            app.handle_key(key(KeyCode::Tab)).unwrap();
            type_text(&mut app, "secret1");
            app.handle_key(key(KeyCode::Enter)).unwrap();
            assert_eq!(app.register.status(), SubmissionStatus::Pending);

            next_event(&mut app).await;
            assert_eq!(app.state.current_view, View::Home);
        }
    }

    mod home {
        use super::*;
        use pretty_assertions::assert_eq;

        async fn signed_in_app(consultation: MockConsultationApi) -> App {
            let mut login = MockSubmissionTask::<LoginValues>::new();
            login.expect_run().returning(|_| Ok(()));
            let mut app = App::new(services(login, MockSubmissionTask::new(), consultation));
            fill_login(&mut app);
            app.handle_key(key(KeyCode::Enter)).unwrap();
            next_event(&mut app).await;
            assert_eq!(app.state.current_view, View::Home);
            app
        }

        #[tokio::test]
        async fn test_consultation_shows_suggestion() {
            let mut api = MockConsultationApi::new();
            api.expect_fetch_consultation()
                .withf(|complaint: &str, attachments: &Vec<serde_json::Value>| {
                    complaint == "pusing" && attachments.is_empty()
                })
                .times(1)
                .returning(|_, _| {
                    Ok(ConsultationResponse {
                        suggestion: "rest more".to_string(),
                    })
                });
            let mut app = signed_in_app(api).await;

            type_text(&mut app, "pusing");
            app.handle_key(ctrl('s')).unwrap();
            assert_eq!(app.consultation.status(), SubmissionStatus::Pending);

            next_event(&mut app).await;
            assert_eq!(app.consultation.status(), SubmissionStatus::Succeeded);
            assert_eq!(app.suggestion.as_deref(), Some("rest more"));
        }

        #[tokio::test]
        async fn test_consultation_failure_is_reported() {
            let mut api = MockConsultationApi::new();
            api.expect_fetch_consultation()
                .times(1)
                .returning(|_, _| Err(ConsultationError::NotConfigured("BACKEND_API_URL")));
            let mut app = signed_in_app(api).await;

            type_text(&mut app, "batuk");
            app.handle_key(ctrl('s')).unwrap();
            next_event(&mut app).await;

            assert_eq!(app.consultation.status(), SubmissionStatus::Failed);
            assert!(app.suggestion.is_none());
            assert!(app
                .state
                .current_error()
                .is_some_and(|e| e.contains("BACKEND_API_URL")));
        }

        #[tokio::test]
        async fn test_missing_attachment_fails_before_request() {
            let mut api = MockConsultationApi::new();
            api.expect_fetch_consultation().times(0);
            let mut app = signed_in_app(api).await;

            type_text(&mut app, "batuk");
            app.handle_key(key(KeyCode::Tab)).unwrap();
            type_text(&mut app, "/no/such/file.json");
            app.handle_key(ctrl('s')).unwrap();

            assert_eq!(app.consultation.status(), SubmissionStatus::Failed);
            assert!(app.state.has_errors());
        }

        #[tokio::test]
        async fn test_enter_in_complaint_adds_newline() {
            let mut app = signed_in_app(MockConsultationApi::new()).await;
            type_text(&mut app, "a");
            app.handle_key(key(KeyCode::Enter)).unwrap();
            type_text(&mut app, "b");
            assert_eq!(app.consultation.form().complaint.as_text(), "a\nb");
            assert_eq!(app.consultation.status(), SubmissionStatus::Idle);
        }

        #[tokio::test]
        async fn test_sign_out_returns_to_fresh_login() {
            let mut app = signed_in_app(MockConsultationApi::new()).await;
            type_text(&mut app, "draft complaint");
            app.handle_key(ctrl('l')).unwrap();

            assert_eq!(app.state.current_view, View::Login);
            assert!(app.state.view_history.is_empty());
            assert_eq!(app.login.form().email.as_text(), "");
            assert_eq!(app.login.status(), SubmissionStatus::Idle);
            assert_eq!(app.consultation.form().complaint.as_text(), "");
        }
    }
}
