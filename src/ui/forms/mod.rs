//! Form rendering module
//!
//! - `field_renderer`: single field with its inline validation error
//! - `draw_form`: header, every field of a form, and the submit button

mod field_renderer;

pub use field_renderer::{draw_field, draw_help_text, FIELD_HEIGHT};

use crate::state::{Form, FormController, SubmissionStatus};
use crate::ui::components::{render_button, BUTTON_HEIGHT};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::Paragraph,
    Frame,
};

/// Static text of a form screen
pub struct FormScreen<'a> {
    pub heading: &'a str,
    pub subtitle: &'a str,
    pub submit_label: &'a str,
    pub pending_label: &'a str,
}

/// Label of the submit button for the controller's current status
pub fn submit_label<'a, F: Form>(
    controller: &FormController<F>,
    screen: &FormScreen<'a>,
) -> &'a str {
    match controller.status() {
        SubmissionStatus::Pending => screen.pending_label,
        _ => screen.submit_label,
    }
}

/// Draw heading, fields and submit button; returns the area left below the button
pub fn draw_form<F: Form>(
    frame: &mut Frame,
    area: Rect,
    controller: &FormController<F>,
    screen: &FormScreen,
) -> Rect {
    let form = controller.form();
    let mut constraints = vec![
        Constraint::Length(1), // Heading
        Constraint::Length(1), // Subtitle
        Constraint::Length(1), // Spacer
    ];
    for field in form.fields() {
        constraints.push(if field.is_multiline {
            Constraint::Min(FIELD_HEIGHT + 2)
        } else {
            Constraint::Length(FIELD_HEIGHT)
        });
    }
    constraints.push(Constraint::Length(BUTTON_HEIGHT));
    constraints.push(Constraint::Min(0));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let heading = Paragraph::new(Line::from(screen.heading))
        .alignment(Alignment::Center)
        .style(Style::default().add_modifier(Modifier::BOLD));
    frame.render_widget(heading, chunks[0]);

    let subtitle = Paragraph::new(Line::from(screen.subtitle))
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Gray));
    frame.render_widget(subtitle, chunks[1]);

    let active = form.active_field();
    for (index, field) in form.fields().into_iter().enumerate() {
        draw_field(frame, chunks[3 + index], field, index == active);
    }

    let button_index = 3 + form.field_count();
    render_button(
        frame,
        chunks[button_index],
        submit_label(controller, screen),
        Color::Green,
        controller.status().can_submit(),
    );

    chunks[button_index + 1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{LoginField, LoginForm, Navigator, View};

    struct Nowhere;

    impl Navigator for Nowhere {
        fn navigate(&mut self, _view: View) {}
    }

    const SCREEN: FormScreen<'static> = FormScreen {
        heading: "Welcome Back!",
        subtitle: "Continue your journey to better health",
        submit_label: "Sign In",
        pending_label: "Signing In...",
    };

    #[test]
    fn test_submit_label_follows_status() {
        let mut controller = FormController::new(LoginForm::new());
        assert_eq!(submit_label(&controller, &SCREEN), "Sign In");

        controller.set_field_value(LoginField::Email, "a@b.co");
        controller.set_field_value(LoginField::Password, "123456");
        let submission = controller.begin_submit().unwrap();
        assert_eq!(submit_label(&controller, &SCREEN), "Signing In...");

        controller.complete(submission.attempt, Ok(()), &mut Nowhere);
        assert_eq!(submit_label(&controller, &SCREEN), "Sign In");
    }
}
