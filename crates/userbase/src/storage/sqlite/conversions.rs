//! SQLite row conversion functions.
//!
//! Pure functions for converting between SQLite rows and domain types.

use chrono::NaiveDate;
use rusqlite::types::Value;
use rusqlite::Row;

use userbase_core::user::{FieldValue, User};

/// Convert a SQLite row to a User.
///
/// Expected columns: id, username, email, phone, date_of_birth
pub fn row_to_user(row: &Row) -> rusqlite::Result<User> {
    let id: String = row.get(0)?;
    let username: String = row.get(1)?;
    let email: String = row.get(2)?;
    let phone: Option<String> = row.get(3)?;
    let date_of_birth: Option<String> = row.get(4)?;

    Ok(User {
        id,
        username,
        email,
        phone,
        date_of_birth: date_of_birth
            .as_deref()
            .map(|s| parse_date(s, 4))
            .transpose()?,
    })
}

/// Parse a date from ISO 8601 string (YYYY-MM-DD).
fn parse_date(s: &str, column: usize) -> rusqlite::Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(column, rusqlite::types::Type::Text, Box::new(e))
    })
}

/// Format a NaiveDate for SQLite storage (YYYY-MM-DD).
pub fn format_date(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Convert a patch value into a bindable SQLite value.
pub fn field_value_to_sql(value: &FieldValue) -> Value {
    match value {
        FieldValue::Text(text) => Value::Text(text.clone()),
        FieldValue::Date(date) => Value::Text(format_date(date)),
        FieldValue::Null => Value::Null,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn test_format_date_is_iso() {
        let date = NaiveDate::from_ymd_opt(1990, 4, 2).unwrap();
        assert_eq!(format_date(&date), "1990-04-02");
    }

    #[test]
    fn test_field_value_to_sql() {
        let date = NaiveDate::from_ymd_opt(2001, 9, 9).unwrap();

        assert_eq!(
            field_value_to_sql(&FieldValue::Text("ada".to_string())),
            Value::Text("ada".to_string())
        );
        assert_eq!(
            field_value_to_sql(&FieldValue::Date(date)),
            Value::Text("2001-09-09".to_string())
        );
        assert_eq!(field_value_to_sql(&FieldValue::Null), Value::Null);
    }

    #[test]
    fn test_row_to_user_reads_nullable_columns() {
        let conn = Connection::open_in_memory().unwrap();

        let user = conn
            .query_row(
                "SELECT 'u1', 'ada', 'ada@example.com', NULL, '1815-12-10'",
                [],
                row_to_user,
            )
            .unwrap();

        assert_eq!(user.id, "u1");
        assert_eq!(user.phone, None);
        assert_eq!(
            user.date_of_birth,
            Some(NaiveDate::from_ymd_opt(1815, 12, 10).unwrap())
        );
    }

    #[test]
    fn test_row_to_user_rejects_malformed_date() {
        let conn = Connection::open_in_memory().unwrap();

        let result = conn.query_row(
            "SELECT 'u1', 'ada', 'ada@example.com', NULL, 'yesterday'",
            [],
            row_to_user,
        );

        assert!(matches!(
            result,
            Err(rusqlite::Error::FromSqlConversionFailure(4, _, _))
        ));
    }
}
