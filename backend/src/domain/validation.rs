//! Pure field validators composed by the entity draft constructors.
//!
//! Each validator takes a raw value and returns the normalised stored form
//! or a [`FieldError`] naming the offending field. Constructors collect
//! every failure into [`ValidationErrors`] so one response reports them all.
//! The single side-effecting check, MX-record reachability, lives behind
//! the [`crate::domain::ports::MxResolver`] port instead.

use serde_json::json;

use crate::domain::DomainError;

/// A validation failure scoped to one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Field the failure applies to, in request naming.
    pub field: &'static str,
    /// Reason the value was rejected.
    pub message: String,
}

impl FieldError {
    /// Construct a field error.
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Accumulated field errors from a validate-and-construct pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    /// Create an empty accumulator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the failure of `result`, passing successful values through.
    pub fn capture<T>(&mut self, result: Result<T, FieldError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                self.0.push(err);
                None
            }
        }
    }

    /// Append a single error.
    pub fn push(&mut self, err: FieldError) {
        self.0.push(err);
    }

    /// Absorb every error from another accumulator.
    pub fn extend(&mut self, other: Self) {
        self.0.extend(other.0);
    }

    /// Whether any error has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Recorded errors in capture order.
    #[must_use]
    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for err in &self.0 {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", err.field, err.message)?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl From<ValidationErrors> for DomainError {
    fn from(errors: ValidationErrors) -> Self {
        let details: Vec<_> = errors
            .errors()
            .iter()
            .map(|err| json!({ "field": err.field, "message": err.message }))
            .collect();
        Self::invalid_request("request validation failed")
            .with_details(json!({ "errors": details }))
    }
}

/// A structurally valid, lower-cased email address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email {
    value: String,
    domain_start: usize,
}

impl Email {
    /// The normalised address.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// The domain part, used for MX reachability checks.
    #[must_use]
    pub fn domain(&self) -> &str {
        &self.value[self.domain_start..]
    }

    /// Consume the address into its stored form.
    #[must_use]
    pub fn into_string(self) -> String {
        self.value
    }
}

/// Validate a person or facility name: 3-100 characters, alphabetic and
/// spaces only. Returns the Title-cased stored form.
pub fn validate_name(raw: &str) -> Result<String, FieldError> {
    let length = raw.chars().count();
    if !(3..=100).contains(&length) {
        return Err(FieldError::new(
            "name",
            "must be between 3 and 100 characters",
        ));
    }
    if !raw.chars().all(|ch| ch.is_alphabetic() || ch == ' ') {
        return Err(FieldError::new(
            "name",
            "must only contain alphabetic characters",
        ));
    }
    Ok(title_case(raw))
}

/// Validate the structure of an email address and lower-case it. The
/// domain must be non-empty; whether it resolves is checked separately.
pub fn validate_email(raw: &str) -> Result<Email, FieldError> {
    let value = raw.to_lowercase();
    match value.find('@') {
        Some(at) if at > 0 && at + 1 < value.len() => Ok(Email {
            domain_start: at + 1,
            value,
        }),
        _ => Err(FieldError::new(
            "email",
            "must contain a local part and a domain",
        )),
    }
}

/// Validate a zip code: exactly five ASCII digits.
pub fn validate_zip_code(raw: &str) -> Result<String, FieldError> {
    if raw.len() != 5 || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(FieldError::new("zip_code", "must be a 5-digit number"));
    }
    Ok(raw.to_owned())
}

/// Title-case a name: upper-case each character that follows a space,
/// lower-case the rest.
fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut boundary = true;
    for ch in value.chars() {
        if ch == ' ' {
            boundary = true;
            out.push(ch);
        } else if boundary {
            out.extend(ch.to_uppercase());
            boundary = false;
        } else {
            out.extend(ch.to_lowercase());
        }
    }
    out
}
