//! Field validation for users and partial updates.
//!
//! Validation never fails fast: every broken field produces one
//! [`ErrorMessage`], and an empty list means the input is valid.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::patch::UserPatch;
use super::types::User;

const MAX_ID_LEN: usize = 40;
const MAX_USERNAME_LEN: usize = 100;
const MAX_EMAIL_LEN: usize = 100;
const MAX_PHONE_LEN: usize = 18;

/// Ids that collide with literal routes under `/users/`.
const RESERVED_IDS: [&str; 1] = ["search"];

/// A single validation failure, reported to clients as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorMessage {
    pub field: String,
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub param: Option<String>,
    pub message: String,
}

impl ErrorMessage {
    fn new(field: &str, code: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            code: code.to_string(),
            param: None,
            message: message.into(),
        }
    }

    fn with_param(mut self, param: impl Into<String>) -> Self {
        self.param = Some(param.into());
        self
    }
}

/// Validates a full user for creation or replacement.
///
/// `today` bounds the date of birth.
pub fn validate_user(user: &User, today: NaiveDate) -> Vec<ErrorMessage> {
    let mut errors = Vec::new();

    check_id(&mut errors, &user.id);
    check_required_text(&mut errors, "username", &user.username, MAX_USERNAME_LEN);
    check_email(&mut errors, &user.email);
    if let Some(phone) = &user.phone {
        check_phone(&mut errors, phone);
    }
    if let Some(date_of_birth) = user.date_of_birth {
        check_date_of_birth(&mut errors, date_of_birth, today);
    }

    errors
}

/// Validates only the fields present in a patch.
pub fn validate_patch(patch: &UserPatch, today: NaiveDate) -> Vec<ErrorMessage> {
    let mut errors = Vec::new();

    check_id(&mut errors, &patch.id);
    if let Some(username) = &patch.username {
        check_required_text(&mut errors, "username", username, MAX_USERNAME_LEN);
    }
    if let Some(email) = &patch.email {
        check_email(&mut errors, email);
    }
    if let Some(phone) = &patch.phone {
        check_phone(&mut errors, phone);
    }
    if let Some(Some(date_of_birth)) = patch.date_of_birth {
        check_date_of_birth(&mut errors, date_of_birth, today);
    }

    errors
}

fn check_required_text(errors: &mut Vec<ErrorMessage>, field: &str, value: &str, max: usize) {
    if value.trim().is_empty() {
        errors.push(ErrorMessage::new(field, "required", format!("{field} is required")));
    } else if value.chars().count() > max {
        errors.push(
            ErrorMessage::new(
                field,
                "max",
                format!("{field} must be at most {max} characters"),
            )
            .with_param(max.to_string()),
        );
    }
}

fn check_id(errors: &mut Vec<ErrorMessage>, id: &str) {
    let before = errors.len();
    check_required_text(errors, "id", id, MAX_ID_LEN);
    if errors.len() == before && RESERVED_IDS.contains(&id) {
        errors.push(
            ErrorMessage::new("id", "reserved", format!("id '{id}' is reserved"))
                .with_param(id.to_string()),
        );
    }
}

fn check_email(errors: &mut Vec<ErrorMessage>, email: &str) {
    let before = errors.len();
    check_required_text(errors, "email", email, MAX_EMAIL_LEN);
    if errors.len() == before && !is_valid_email(email) {
        errors.push(ErrorMessage::new(
            "email",
            "email",
            "email must be a valid email address",
        ));
    }
}

fn check_phone(errors: &mut Vec<ErrorMessage>, phone: &str) {
    if phone.chars().count() > MAX_PHONE_LEN {
        errors.push(
            ErrorMessage::new(
                "phone",
                "max",
                format!("phone must be at most {MAX_PHONE_LEN} characters"),
            )
            .with_param(MAX_PHONE_LEN.to_string()),
        );
    } else if !phone
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '+' | '-' | '(' | ')'))
    {
        errors.push(ErrorMessage::new(
            "phone",
            "phone",
            "phone may only contain digits, spaces and + - ( )",
        ));
    }
}

fn check_date_of_birth(errors: &mut Vec<ErrorMessage>, date_of_birth: NaiveDate, today: NaiveDate) {
    if date_of_birth > today {
        errors.push(
            ErrorMessage::new(
                "dateOfBirth",
                "max",
                "dateOfBirth cannot be in the future",
            )
            .with_param(today.to_string()),
        );
    }
}

/// Checks the `local@domain.tld` shape without resolving anything.
fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .split_once('.')
        .is_some_and(|(host, _)| !host.is_empty())
        && !domain.ends_with('.')
}
