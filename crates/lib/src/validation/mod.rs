//! Form validation for the auth and contact surfaces
//!
//! Pure, synchronous validators that never fail: each one returns a
//! [`ValidationErrors`] map from field name to a human-readable message.
//! An empty map means the form is submit-eligible. Validation errors never
//! reach the gateway - callers clear them on field edit or successful submit.

use std::collections::BTreeMap;

use crate::constants::{MIN_MESSAGE_LENGTH, MIN_PASSWORD_LENGTH};

/// Field-level validation errors keyed by field name.
///
/// Absence of a key means the field is valid. Iteration order is stable
/// (sorted by field name) so error rendering is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: BTreeMap<String, String>,
}

impl ValidationErrors {
    /// Create an empty error map.
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(&mut self, field: &str, message: impl Into<String>) {
        self.errors.insert(field.to_string(), message.into());
    }

    /// Get the message for a field, if it failed validation.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    /// Check whether a field failed validation.
    pub fn contains(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    /// True when every field passed validation (submit-eligible).
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of fields that failed validation.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Iterate over `(field, message)` pairs in field-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.errors.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Input for the contact form.
#[derive(Debug, Clone, Default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Input for the login form.
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Input for the registration form.
#[derive(Debug, Clone, Default)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Check that a value has a conservative `local@domain.tld` shape.
///
/// This is a shared predicate, not an RFC validator: no whitespace, exactly
/// one `@`, non-empty local part, and a dot in the domain that is neither its
/// first nor last character.
pub fn validate_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

fn check_email(errors: &mut ValidationErrors, email: &str) {
    if email.trim().is_empty() {
        errors.insert("email", "Email is required");
    } else if !validate_email(email) {
        errors.insert("email", "Please enter a valid email");
    }
}

fn check_password(errors: &mut ValidationErrors, password: &str) {
    // Passwords are deliberately not trimmed.
    if password.is_empty() {
        errors.insert("password", "Password is required");
    } else if password.len() < MIN_PASSWORD_LENGTH {
        errors.insert(
            "password",
            format!("Password must be at least {MIN_PASSWORD_LENGTH} characters"),
        );
    }
}

/// Validate the contact form.
pub fn validate_contact_form(form: &ContactForm) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    if form.name.trim().is_empty() {
        errors.insert("name", "Name is required");
    }

    check_email(&mut errors, &form.email);

    let message = form.message.trim();
    if message.is_empty() {
        errors.insert("message", "Message is required");
    } else if message.len() < MIN_MESSAGE_LENGTH {
        errors.insert(
            "message",
            format!("Message must be at least {MIN_MESSAGE_LENGTH} characters"),
        );
    }

    errors
}

/// Validate the login form.
pub fn validate_login_form(form: &LoginForm) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    check_email(&mut errors, &form.email);
    check_password(&mut errors, &form.password);
    errors
}

/// Validate the registration form.
pub fn validate_register_form(form: &RegisterForm) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    if form.name.trim().is_empty() {
        errors.insert("name", "Name is required");
    }

    check_email(&mut errors, &form.email);
    check_password(&mut errors, &form.password);

    if form.confirm_password.is_empty() {
        errors.insert("confirmPassword", "Please confirm your password");
    } else if form.password != form.confirm_password {
        errors.insert("confirmPassword", "Passwords do not match");
    }

    errors
}
