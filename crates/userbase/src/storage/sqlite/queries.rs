//! Statements built at runtime.
//!
//! Column names only ever come from [`UserField::column`]; every value is a
//! bound parameter. The builders are pure so they can be tested without a
//! database.

use rusqlite::types::Value;

use userbase_core::user::{SortDirection, SortKey, UserField, UserFilter, UserPatch};

use super::conversions::{field_value_to_sql, format_date};
use super::schema::{USERS_TABLE, USER_COLUMNS};

/// SQL text plus the values to bind, in placeholder order.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub sql: String,
    pub params: Vec<Value>,
}

/// The page query and the matching count query for a search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchStatements {
    pub select: Statement,
    pub count: Statement,
}

/// Builds `UPDATE users SET ... WHERE id = ?` from the fields present in a
/// patch.
///
/// Returns `None` when the patch changes nothing.
pub fn build_patch(patch: &UserPatch) -> Option<Statement> {
    let changes = patch.changes();
    if changes.is_empty() {
        return None;
    }

    let mut params = Vec::with_capacity(changes.len() + 1);
    let assignments: Vec<String> = changes
        .iter()
        .map(|change| {
            params.push(field_value_to_sql(&change.value));
            format!("{} = ?{}", change.field.column(), params.len())
        })
        .collect();

    params.push(Value::Text(patch.id.clone()));
    let sql = format!(
        "UPDATE {USERS_TABLE} SET {} WHERE {} = ?{}",
        assignments.join(", "),
        UserField::Id.column(),
        params.len()
    );

    Some(Statement { sql, params })
}

/// Builds the page and count statements for a search.
pub fn build_search(filter: &UserFilter, limit: u32, offset: u64) -> SearchStatements {
    let mut conditions: Vec<String> = Vec::new();
    let mut params: Vec<Value> = Vec::new();

    if let Some(id) = &filter.id {
        params.push(Value::Text(id.clone()));
        conditions.push(format!("{} = ?{}", UserField::Id.column(), params.len()));
    }

    for (field, prefix) in [
        (UserField::Username, &filter.username),
        (UserField::Email, &filter.email),
        (UserField::Phone, &filter.phone),
    ] {
        if let Some(prefix) = prefix {
            params.push(Value::Text(format!("{}%", escape_like(prefix))));
            conditions.push(format!(
                "{} LIKE ?{} ESCAPE '\\'",
                field.column(),
                params.len()
            ));
        }
    }

    if let Some(from) = &filter.date_of_birth_from {
        params.push(Value::Text(format_date(from)));
        conditions.push(format!(
            "{} >= ?{}",
            UserField::DateOfBirth.column(),
            params.len()
        ));
    }
    if let Some(to) = &filter.date_of_birth_to {
        params.push(Value::Text(format_date(to)));
        conditions.push(format!(
            "{} <= ?{}",
            UserField::DateOfBirth.column(),
            params.len()
        ));
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", conditions.join(" AND "))
    };

    let mut sort_keys = filter.sort_keys();
    if !sort_keys.iter().any(|key| key.field == UserField::Id) {
        // Unique last key keeps LIMIT/OFFSET pages stable.
        sort_keys.push(SortKey {
            field: UserField::Id,
            direction: SortDirection::Asc,
        });
    }

    let order_by: Vec<String> = sort_keys
        .into_iter()
        .map(|key| {
            let direction = match key.direction {
                SortDirection::Asc => "ASC",
                SortDirection::Desc => "DESC",
            };
            format!("{} {direction}", key.field.column())
        })
        .collect();

    let count = Statement {
        sql: format!("SELECT COUNT(*) FROM {USERS_TABLE}{where_clause}"),
        params: params.clone(),
    };

    let mut select_params = params;
    select_params.push(Value::Integer(i64::from(limit)));
    let limit_index = select_params.len();
    select_params.push(Value::Integer(i64::try_from(offset).unwrap_or(i64::MAX)));
    let offset_index = select_params.len();

    let select = Statement {
        sql: format!(
            "SELECT {USER_COLUMNS} FROM {USERS_TABLE}{where_clause} ORDER BY {} LIMIT ?{limit_index} OFFSET ?{offset_index}",
            order_by.join(", ")
        ),
        params: select_params,
    };

    SearchStatements { select, count }
}

/// Escapes LIKE wildcards so user input only ever matches literally.
fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
