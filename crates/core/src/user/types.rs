use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A column of the `users` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserField {
    Id,
    Username,
    Email,
    Phone,
    DateOfBirth,
}

impl UserField {
    /// All fields in table column order.
    pub const ALL: [UserField; 5] = [
        UserField::Id,
        UserField::Username,
        UserField::Email,
        UserField::Phone,
        UserField::DateOfBirth,
    ];

    /// The SQL column name.
    pub fn column(&self) -> &'static str {
        match self {
            UserField::Id => "id",
            UserField::Username => "username",
            UserField::Email => "email",
            UserField::Phone => "phone",
            UserField::DateOfBirth => "date_of_birth",
        }
    }

    /// The JSON key used on the wire.
    pub fn json_name(&self) -> &'static str {
        match self {
            UserField::DateOfBirth => "dateOfBirth",
            other => other.column(),
        }
    }

    /// Looks a field up by its JSON key or its column name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|field| field.json_name() == name || field.column() == name)
    }
}

/// A user record as stored in the `users` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Primary key. Immutable once the user is created.
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
}

impl User {
    /// Creates a user with the required fields set.
    pub fn new(
        id: impl Into<String>,
        username: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            email: email.into(),
            phone: None,
            date_of_birth: None,
        }
    }

    /// Sets the phone number.
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Sets the date of birth.
    pub fn with_date_of_birth(mut self, date_of_birth: NaiveDate) -> Self {
        self.date_of_birth = Some(date_of_birth);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_lookup_accepts_json_and_column_names() {
        assert_eq!(UserField::from_name("dateOfBirth"), Some(UserField::DateOfBirth));
        assert_eq!(UserField::from_name("date_of_birth"), Some(UserField::DateOfBirth));
        assert_eq!(UserField::from_name("email"), Some(UserField::Email));
        assert_eq!(UserField::from_name("password"), None);
    }

    #[test]
    fn test_serializes_with_camel_case_keys() {
        let user = User::new("u1", "ada", "ada@example.com")
            .with_date_of_birth(NaiveDate::from_ymd_opt(1815, 12, 10).unwrap());

        let json = serde_json::to_value(&user).unwrap();

        assert_eq!(json["id"], "u1");
        assert_eq!(json["dateOfBirth"], "1815-12-10");
        assert!(json["phone"].is_null());
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let user: User = serde_json::from_str(r#"{"username": "grace"}"#).unwrap();

        assert_eq!(user.id, "");
        assert_eq!(user.username, "grace");
        assert_eq!(user.email, "");
        assert_eq!(user.phone, None);
        assert_eq!(user.date_of_birth, None);
    }
}
