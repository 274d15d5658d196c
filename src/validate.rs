use crate::model::{FieldDescriptor, FieldKind};
use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

pub type FieldValues = HashMap<String, String>;
pub type FieldErrors = HashMap<String, Vec<FieldError>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("The field is required")]
    RequiredFieldEmpty,
    #[error("Invalid email")]
    InvalidEmailFormat,
}

// ASCII word characters only; intentionally looser than RFC 5322.
const EMAIL_PATTERN: &str = r"(?-u)^\w+([.-]?\w+)*@\w+([.-]?\w+)*(\.\w{2,3})+$";

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("email pattern compiles"))
}

pub fn is_email_valid(value: &str) -> bool {
    email_regex().is_match(value)
}

/// Errors for a single value, in display order: required first, then format.
pub fn validate_field(value: &str, kind: FieldKind, required: bool) -> Vec<FieldError> {
    let mut errors = Vec::new();
    if required && value.is_empty() {
        errors.push(FieldError::RequiredFieldEmpty);
    }
    if kind == FieldKind::Email && !is_email_valid(value) {
        errors.push(FieldError::InvalidEmailFormat);
    }
    errors
}

/// Validate every value whose id is known to `schema`. Values without a
/// descriptor are skipped rather than reported.
pub fn validate_form(schema: &[FieldDescriptor], values: &FieldValues) -> FieldErrors {
    let mut errors = FieldErrors::new();
    for (id, value) in values {
        let Some(desc) = schema.iter().find(|d| &d.id == id) else {
            continue;
        };
        errors.insert(id.clone(), validate_field(value, desc.kind, desc.required));
    }
    errors
}

/// Ids with at least one error, sorted for stable reporting.
pub fn invalid_fields(errors: &FieldErrors) -> Vec<String> {
    let mut ids: Vec<String> = errors
        .iter()
        .filter(|(_, errs)| !errs.is_empty())
        .map(|(id, _)| id.clone())
        .collect();
    ids.sort();
    ids
}

pub fn is_form_valid(errors: &FieldErrors) -> bool {
    errors.values().all(|errs| errs.is_empty())
}
