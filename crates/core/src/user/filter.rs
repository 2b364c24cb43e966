//! Search criteria for users.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::types::UserField;
use crate::serde::{deserialize_optional_date, deserialize_optional_string, deserialize_optional_u32};

/// Filter, sort and paging options for a user search.
///
/// Deserializes from both a query string and a JSON body. Empty strings are
/// treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserFilter {
    /// Exact id match.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_optional_string"
    )]
    pub id: Option<String>,
    /// Username prefix.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_optional_string"
    )]
    pub username: Option<String>,
    /// Email prefix.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_optional_string"
    )]
    pub email: Option<String>,
    /// Phone prefix.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_optional_string"
    )]
    pub phone: Option<String>,
    /// Inclusive lower bound on date of birth.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_optional_date"
    )]
    pub date_of_birth_from: Option<NaiveDate>,
    /// Inclusive upper bound on date of birth.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_optional_date"
    )]
    pub date_of_birth_to: Option<NaiveDate>,
    /// Comma separated sort keys, e.g. `-dateOfBirth,username`.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_optional_string"
    )]
    pub sort: Option<String>,
    /// 1-based page number.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_optional_u32"
    )]
    pub page: Option<u32>,
    /// Page size.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_optional_u32"
    )]
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

/// A validated sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
    pub field: UserField,
    pub direction: SortDirection,
}

impl UserFilter {
    /// Parses the `sort` expression into sort keys.
    ///
    /// Unknown field names are dropped, as are repeats of a field already
    /// listed. Falls back to `id` ascending when nothing usable remains.
    pub fn sort_keys(&self) -> Vec<SortKey> {
        let mut keys: Vec<SortKey> = Vec::new();

        for token in self.sort.as_deref().unwrap_or_default().split(',') {
            let token = token.trim();
            let (direction, name) = if let Some(name) = token.strip_prefix('-') {
                (SortDirection::Desc, name)
            } else if let Some(name) = token.strip_prefix('+') {
                (SortDirection::Asc, name)
            } else {
                (SortDirection::Asc, token)
            };

            let Some(field) = UserField::from_name(name.trim()) else {
                continue;
            };
            if keys.iter().any(|key| key.field == field) {
                continue;
            }
            keys.push(SortKey { field, direction });
        }

        if keys.is_empty() {
            keys.push(SortKey {
                field: UserField::Id,
                direction: SortDirection::Asc,
            });
        }

        keys
    }

    /// Resolves the page size: missing or zero uses `default_limit`, anything
    /// above `max_limit` is clamped.
    pub fn effective_limit(&self, default_limit: u32, max_limit: u32) -> u32 {
        match self.limit {
            None | Some(0) => default_limit.min(max_limit),
            Some(limit) => limit.min(max_limit),
        }
    }

    /// Row offset for the requested page.
    pub fn offset(&self, limit: u32) -> u64 {
        let page = self.page.unwrap_or(1).max(1);
        u64::from(page - 1) * u64::from(limit)
    }
}
