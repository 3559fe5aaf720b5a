use regex::Regex;
use std::sync::LazyLock;

use crate::errors::ValidationError;
use crate::models::{FormSubmission, REQUIRED_FIELDS};

pub const MIN_AGE: f64 = 18.0;
pub const MAX_AGE: f64 = 100.0;

/// A shape check only: something, one `@`, something, a dot, something.
static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@]+@[^@]+\.[^@]+$").expect("email pattern is valid"));

pub type ValidationOutcome = Result<(), ValidationError>;

/// Checks a submission before it is sent. Pure: no page or network access.
pub fn validate(submission: &FormSubmission) -> ValidationOutcome {
    let missing = REQUIRED_FIELDS
        .iter()
        .any(|field| submission.get(field).is_none_or(str::is_empty));
    if missing {
        return Err(ValidationError::MissingFields);
    }

    let email = submission.get("email").unwrap_or_default();
    if !EMAIL_PATTERN.is_match(email) {
        return Err(ValidationError::InvalidEmail);
    }

    let age = submission.get("age").and_then(parse_age);
    match age {
        Some(age) if (MIN_AGE..=MAX_AGE).contains(&age) => Ok(()),
        _ => Err(ValidationError::InvalidAge),
    }
}

/// Numeric value of the age field; `None` when it is not a finite number.
fn parse_age(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|age| age.is_finite())
}
