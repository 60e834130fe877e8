//! Form domain layer
//!
//! Type-safe form handling for the sign-in, sign-up and consultation screens:
//! fields with ordered validation rules, per-form field enums, and a
//! controller that gates submission on validation.

mod controller;
mod field;
mod form_state;
mod rules;

pub use controller::{FormController, Submission, SubmissionStatus, SubmitError};
pub use field::FormField;
pub use form_state::{
    ConsultationField, ConsultationForm, ConsultationValues, Form, LoginField, LoginForm,
    LoginValues, RegisterField, RegisterForm, RegisterValues,
};
pub use rules::{FieldLookup, Rule};
