//! Form trait and the concrete sign-in, sign-up and consultation forms

use super::field::FormField;
use super::rules::{FieldLookup, Rule};
use serde::Serialize;
use std::fmt;

/// Trait for common form operations
///
/// Each form names its fields with its own `Field` enum, so controllers and
/// key handlers are checked against the field set of the concrete form.
pub trait Form {
    type Field: Copy + Eq + fmt::Debug + Send + 'static;
    type Values: Clone + fmt::Debug + Send + Sync + 'static;

    /// Fields in display and validation order
    const FIELDS: &'static [Self::Field];

    fn field(&self, field: Self::Field) -> &FormField;
    fn field_mut(&mut self, field: Self::Field) -> &mut FormField;

    /// Snapshot of the current values
    fn values(&self) -> Self::Values;

    fn active_field(&self) -> usize;
    fn set_active_field(&mut self, index: usize);

    fn field_count(&self) -> usize {
        Self::FIELDS.len()
    }

    fn next_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        self.set_active_field((current + 1) % count);
    }

    fn prev_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        if current == 0 {
            self.set_active_field(count - 1);
        } else {
            self.set_active_field(current - 1);
        }
    }

    fn active(&self) -> Self::Field {
        let index = self.active_field().min(Self::FIELDS.len() - 1);
        Self::FIELDS[index]
    }

    fn get_active_field_mut(&mut self) -> &mut FormField {
        let active = self.active();
        self.field_mut(active)
    }

    fn fields(&self) -> Vec<&FormField> {
        Self::FIELDS.iter().map(|&f| self.field(f)).collect()
    }

    /// Run every field's rules, recomputing all errors; returns the failing fields
    fn validate(&mut self) -> Vec<Self::Field>
    where
        Self: Sized,
    {
        let this: &Self = self;
        let results: Vec<(Self::Field, Option<String>)> = Self::FIELDS
            .iter()
            .map(|&f| (f, this.field(f).first_failure(&FormLookup(this))))
            .collect();

        let mut failing = Vec::new();
        for (field, error) in results {
            if error.is_some() {
                failing.push(field);
            }
            self.field_mut(field).set_error(error);
        }
        failing
    }

    /// Drop every field's error without touching values
    fn clear_errors(&mut self) {
        for &f in Self::FIELDS {
            self.field_mut(f).set_error(None);
        }
    }
}

/// Cross-field view of a form, keyed by field name
struct FormLookup<'a, F>(&'a F);

impl<F: Form> FieldLookup for FormLookup<'_, F> {
    fn value_of(&self, name: &str) -> Option<&str> {
        F::FIELDS
            .iter()
            .map(|&f| self.0.field(f))
            .find(|field| field.name == name)
            .map(FormField::as_text)
    }
}

const EMAIL_REQUIRED: &str = "Email is required";
const EMAIL_INVALID: &str = "Invalid email address";
const PASSWORD_REQUIRED: &str = "Password is required";
const PASSWORD_TOO_SHORT: &str = "Password must be at least 6 characters";
const PASSWORD_MIN_LENGTH: usize = 6;

fn email_field(placeholder: &'static str) -> FormField {
    FormField::text("email", "Email")
        .placeholder(placeholder)
        .required(EMAIL_REQUIRED)
        .rule(Rule::email(EMAIL_INVALID))
}

fn password_field(placeholder: &'static str) -> FormField {
    FormField::text("password", "Password")
        .placeholder(placeholder)
        .secret()
        .required(PASSWORD_REQUIRED)
        .rule(Rule::min_length(PASSWORD_MIN_LENGTH, PASSWORD_TOO_SHORT))
}

// Login Form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Email,
    Password,
}

#[derive(Debug, Clone)]
pub struct LoginForm {
    pub email: FormField,
    pub password: FormField,
    pub active_field_index: usize,
}

/// Validated sign-in values handed to the submission task
#[derive(Clone, Serialize)]
pub struct LoginValues {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for LoginValues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginValues")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl LoginForm {
    pub fn new() -> Self {
        Self {
            email: email_field("Enter your email"),
            password: password_field("Enter your password"),
            active_field_index: 0,
        }
    }
}

impl Default for LoginForm {
    fn default() -> Self {
        Self::new()
    }
}

impl Form for LoginForm {
    type Field = LoginField;
    type Values = LoginValues;

    const FIELDS: &'static [LoginField] = &[LoginField::Email, LoginField::Password];

    fn field(&self, field: LoginField) -> &FormField {
        match field {
            LoginField::Email => &self.email,
            LoginField::Password => &self.password,
        }
    }

    fn field_mut(&mut self, field: LoginField) -> &mut FormField {
        match field {
            LoginField::Email => &mut self.email,
            LoginField::Password => &mut self.password,
        }
    }

    fn values(&self) -> LoginValues {
        LoginValues {
            email: self.email.value.clone(),
            password: self.password.value.clone(),
        }
    }

    fn active_field(&self) -> usize {
        self.active_field_index
    }

    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(1);
    }
}

// Register Form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterField {
    FullName,
    Email,
    Password,
    ConfirmPassword,
}

#[derive(Debug, Clone)]
pub struct RegisterForm {
    pub full_name: FormField,
    pub email: FormField,
    pub password: FormField,
    pub confirm_password: FormField,
    pub active_field_index: usize,
}

/// Validated sign-up values handed to the submission task
#[derive(Clone, Serialize)]
pub struct RegisterValues {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl fmt::Debug for RegisterValues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterValues")
            .field("full_name", &self.full_name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("confirm_password", &"<redacted>")
            .finish()
    }
}

impl RegisterForm {
    pub fn new() -> Self {
        Self {
            full_name: FormField::text("fullName", "Full Name")
                .placeholder("Enter your full name")
                .required("Full name is required")
                .rule(Rule::min_length(2, "Name must be at least 2 characters")),
            email: email_field("Enter your email"),
            password: password_field("Create a password"),
            confirm_password: FormField::text("confirmPassword", "Confirm Password")
                .placeholder("Confirm your password")
                .secret()
                .required("Please confirm your password")
                .rule(Rule::matches("password", "Passwords do not match")),
            active_field_index: 0,
        }
    }
}

impl Default for RegisterForm {
    fn default() -> Self {
        Self::new()
    }
}

impl Form for RegisterForm {
    type Field = RegisterField;
    type Values = RegisterValues;

    const FIELDS: &'static [RegisterField] = &[
        RegisterField::FullName,
        RegisterField::Email,
        RegisterField::Password,
        RegisterField::ConfirmPassword,
    ];

    fn field(&self, field: RegisterField) -> &FormField {
        match field {
            RegisterField::FullName => &self.full_name,
            RegisterField::Email => &self.email,
            RegisterField::Password => &self.password,
            RegisterField::ConfirmPassword => &self.confirm_password,
        }
    }

    fn field_mut(&mut self, field: RegisterField) -> &mut FormField {
        match field {
            RegisterField::FullName => &mut self.full_name,
            RegisterField::Email => &mut self.email,
            RegisterField::Password => &mut self.password,
            RegisterField::ConfirmPassword => &mut self.confirm_password,
        }
    }

    fn values(&self) -> RegisterValues {
        RegisterValues {
            full_name: self.full_name.value.clone(),
            email: self.email.value.clone(),
            password: self.password.value.clone(),
            confirm_password: self.confirm_password.value.clone(),
        }
    }

    fn active_field(&self) -> usize {
        self.active_field_index
    }

    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(3);
    }
}

// Consultation Form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsultationField {
    Complaint,
    Attachments,
}

#[derive(Debug, Clone)]
pub struct ConsultationForm {
    pub complaint: FormField,
    /// Comma-separated paths of JSON files sent along with the complaint
    pub attachments: FormField,
    pub active_field_index: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsultationValues {
    pub complaint: String,
    pub attachment_paths: Vec<String>,
}

impl ConsultationForm {
    pub fn new() -> Self {
        Self {
            complaint: FormField::text("keluhan", "Complaint")
                .placeholder("Describe how you feel")
                .multiline()
                .required("Complaint is required"),
            attachments: FormField::text("file", "Attachments (JSON files, comma separated)")
                .placeholder("e.g. vitals.json, history.json"),
            active_field_index: 0,
        }
    }
}

impl Default for ConsultationForm {
    fn default() -> Self {
        Self::new()
    }
}

impl Form for ConsultationForm {
    type Field = ConsultationField;
    type Values = ConsultationValues;

    const FIELDS: &'static [ConsultationField] =
        &[ConsultationField::Complaint, ConsultationField::Attachments];

    fn field(&self, field: ConsultationField) -> &FormField {
        match field {
            ConsultationField::Complaint => &self.complaint,
            ConsultationField::Attachments => &self.attachments,
        }
    }

    fn field_mut(&mut self, field: ConsultationField) -> &mut FormField {
        match field {
            ConsultationField::Complaint => &mut self.complaint,
            ConsultationField::Attachments => &mut self.attachments,
        }
    }

    fn values(&self) -> ConsultationValues {
        ConsultationValues {
            complaint: self.complaint.value.clone(),
            attachment_paths: self
                .attachments
                .as_text()
                .split(',')
                .map(str::trim)
                .filter(|path| !path.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }

    fn active_field(&self) -> usize {
        self.active_field_index
    }

    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(1);
    }
}
