//! Form field value objects

use super::rules::{FieldLookup, Rule};

/// Represents a single form field with its configuration, value and last validation error
#[derive(Debug, Clone)]
pub struct FormField {
    pub name: &'static str,
    pub label: &'static str,
    pub placeholder: &'static str,
    pub value: String,
    /// Empty optional fields skip every rule
    pub required: bool,
    /// Rendered masked (passwords)
    pub secret: bool,
    /// Edited since the form was created
    pub dirty: bool,
    pub is_multiline: bool,
    rules: Vec<Rule>,
    error: Option<String>,
}

impl FormField {
    /// Create a new, optional, empty text field
    pub fn text(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            placeholder: "",
            value: String::new(),
            required: false,
            secret: false,
            dirty: false,
            is_multiline: false,
            rules: Vec::new(),
            error: None,
        }
    }

    pub fn placeholder(mut self, placeholder: &'static str) -> Self {
        self.placeholder = placeholder;
        self
    }

    pub fn secret(mut self) -> Self {
        self.secret = true;
        self
    }

    pub fn multiline(mut self) -> Self {
        self.is_multiline = true;
        self
    }

    /// Mark the field required; the required check always runs first
    pub fn required(mut self, message: &'static str) -> Self {
        self.required = true;
        self.rules.insert(0, Rule::required(message));
        self
    }

    /// Append a rule, evaluated after the ones already attached
    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn as_text(&self) -> &str {
        &self.value
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Replace the value without re-validating
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.dirty = true;
    }

    pub fn push_char(&mut self, c: char) {
        self.value.push(c);
        self.dirty = true;
    }

    pub fn pop_char(&mut self) {
        if self.value.pop().is_some() {
            self.dirty = true;
        }
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.error = None;
        self.dirty = false;
    }

    /// Message of the first failing rule, in declaration order
    pub fn first_failure(&self, form: &dyn FieldLookup) -> Option<String> {
        if self.value.is_empty() && !self.required {
            return None;
        }
        self.rules
            .iter()
            .find_map(|rule| rule.check(&self.value, form).err())
            .map(str::to_string)
    }

    /// Overwrite the stored error with the result of a fresh validation pass
    pub fn set_error(&mut self, error: Option<String>) {
        self.error = error;
    }

    /// Get the display value for rendering
    pub fn display_value(&self) -> String {
        if self.secret {
            "•".repeat(self.value.chars().count())
        } else {
            self.value.clone()
        }
    }
}
