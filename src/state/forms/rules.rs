//! Field validation rules

use regex::{Regex, RegexBuilder};
use std::sync::LazyLock;

/// Email address shape accepted by the sign-in and sign-up forms
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    RegexBuilder::new(r"^[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}$")
        .case_insensitive(true)
        .unicode(false)
        .build()
        .expect("email pattern is a valid regex")
});

/// Read access to the current values of a form, used by cross-field rules
pub trait FieldLookup {
    fn value_of(&self, name: &str) -> Option<&str>;
}

/// A single validation rule attached to a form field
#[derive(Debug, Clone)]
pub enum Rule {
    /// Value must not be the empty string (no trimming)
    Required(&'static str),
    /// Value must match the regex
    Pattern { regex: Regex, message: &'static str },
    /// Value must contain at least `min` characters
    MinLength { min: usize, message: &'static str },
    /// Value must equal the current value of another field
    Matches {
        field: &'static str,
        message: &'static str,
    },
}

impl Rule {
    pub fn required(message: &'static str) -> Self {
        Rule::Required(message)
    }

    pub fn email(message: &'static str) -> Self {
        Rule::Pattern {
            regex: EMAIL_PATTERN.clone(),
            message,
        }
    }

    pub fn min_length(min: usize, message: &'static str) -> Self {
        Rule::MinLength { min, message }
    }

    pub fn matches(field: &'static str, message: &'static str) -> Self {
        Rule::Matches { field, message }
    }

    /// Check `value` against this rule, returning the error message on failure
    pub fn check(&self, value: &str, form: &dyn FieldLookup) -> Result<(), &'static str> {
        let passed = match self {
            Rule::Required(_) => !value.is_empty(),
            Rule::Pattern { regex, .. } => regex.is_match(value),
            // Counts Unicode scalar values, not UTF-16 units
            Rule::MinLength { min, .. } => value.chars().count() >= *min,
            Rule::Matches { field, .. } => form.value_of(field) == Some(value),
        };

        if passed {
            Ok(())
        } else {
            Err(self.message())
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Rule::Required(message)
            | Rule::Pattern { message, .. }
            | Rule::MinLength { message, .. }
            | Rule::Matches { message, .. } => message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct Values(HashMap<&'static str, &'static str>);

    impl FieldLookup for Values {
        fn value_of(&self, name: &str) -> Option<&str> {
            self.0.get(name).copied()
        }
    }

    fn empty() -> Values {
        Values(HashMap::new())
    }

    mod required {
        use super::*;

        #[test]
        fn test_empty_string_fails() {
            let rule = Rule::required("Email is required");
            assert_eq!(rule.check("", &empty()), Err("Email is required"));
        }

        #[test]
        fn test_whitespace_is_not_trimmed() {
            let rule = Rule::required("Email is required");
            assert!(rule.check(" ", &empty()).is_ok());
        }
    }

    mod email {
        use super::*;

        #[test]
        fn test_rejects_malformed_addresses() {
            let rule = Rule::email("Invalid email address");
            for input in ["foo", "foo@bar", "@bar.com", "foo@bar.c", "foo bar@baz.com", ""] {
                assert_eq!(
                    rule.check(input, &empty()),
                    Err("Invalid email address"),
                    "{input:?} should be rejected"
                );
            }
        }

        #[test]
        fn test_accepts_well_formed_addresses() {
            let rule = Rule::email("Invalid email address");
            for input in ["a@b.co", "first.last+tag@sub.example.org", "USER@EXAMPLE.COM"] {
                assert!(rule.check(input, &empty()).is_ok(), "{input:?} should pass");
            }
        }

        #[test]
        fn test_case_folding_stays_ascii() {
            let rule = Rule::email("Invalid email address");
            for input in ["a@b.\u{17f}\u{17f}", "\u{17f}@b.co", "a@b.co\u{212a}"] {
                assert_eq!(
                    rule.check(input, &empty()),
                    Err("Invalid email address"),
                    "{input:?} should be rejected"
                );
            }
        }
    }

    mod min_length {
        use super::*;

        #[test]
        fn test_boundary() {
            let rule = Rule::min_length(6, "Password must be at least 6 characters");
            assert!(rule.check("12345", &empty()).is_err());
            assert!(rule.check("123456", &empty()).is_ok());
            assert!(rule.check("1234567", &empty()).is_ok());
        }

        #[test]
        fn test_counts_characters_not_bytes() {
            let rule = Rule::min_length(2, "Name must be at least 2 characters");
            assert!(rule.check("é", &empty()).is_err());
            assert!(rule.check("éé", &empty()).is_ok());
        }
    }

    mod matches {
        use super::*;

        #[test]
        fn test_equal_to_other_field_passes() {
            let form = Values(HashMap::from([("password", "secret1")]));
            let rule = Rule::matches("password", "Passwords do not match");
            assert!(rule.check("secret1", &form).is_ok());
        }

        #[test]
        fn test_different_from_other_field_fails() {
            let form = Values(HashMap::from([("password", "secret1")]));
            let rule = Rule::matches("password", "Passwords do not match");
            assert_eq!(rule.check("secret2", &form), Err("Passwords do not match"));
        }

        #[test]
        fn test_missing_other_field_fails() {
            let rule = Rule::matches("password", "Passwords do not match");
            assert!(rule.check("anything", &empty()).is_err());
        }
    }
}
