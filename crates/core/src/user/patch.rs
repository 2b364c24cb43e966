//! Partial updates for a user.
//!
//! A [`UserPatch`] carries the id plus whichever fields the caller wants to
//! change. [`UserPatch::changes`] turns it into an ordered list of
//! column/value pairs so storage backends can bind every value as a
//! parameter.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::types::UserField;

/// A partial-field mapping for a user.
///
/// For `username`, `email` and `phone` both a missing key and `null` mean
/// "leave unchanged". `date_of_birth` distinguishes the two: a missing key
/// leaves it unchanged, `null` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::serde::deserialize_nullable_date"
    )]
    pub date_of_birth: Option<Option<NaiveDate>>,
}

/// A value bound to a single column in a partial update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Date(NaiveDate),
    Null,
}

/// One column assignment produced by [`UserPatch::changes`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldChange {
    pub field: UserField,
    pub value: FieldValue,
}

impl UserPatch {
    /// Creates an empty patch for the given user id.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Sets the date of birth; `None` clears it.
    pub fn with_date_of_birth(mut self, date_of_birth: Option<NaiveDate>) -> Self {
        self.date_of_birth = Some(date_of_birth);
        self
    }

    /// Returns true if no changeable field is present.
    pub fn is_empty(&self) -> bool {
        self.username.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.date_of_birth.is_none()
    }

    /// Column assignments in table column order. Never includes the id.
    pub fn changes(&self) -> Vec<FieldChange> {
        let mut changes = Vec::new();

        if let Some(username) = &self.username {
            changes.push(FieldChange {
                field: UserField::Username,
                value: FieldValue::Text(username.clone()),
            });
        }
        if let Some(email) = &self.email {
            changes.push(FieldChange {
                field: UserField::Email,
                value: FieldValue::Text(email.clone()),
            });
        }
        if let Some(phone) = &self.phone {
            changes.push(FieldChange {
                field: UserField::Phone,
                value: FieldValue::Text(phone.clone()),
            });
        }
        if let Some(date_of_birth) = &self.date_of_birth {
            changes.push(FieldChange {
                field: UserField::DateOfBirth,
                value: date_of_birth.map_or(FieldValue::Null, FieldValue::Date),
            });
        }

        changes
    }
}
