//! SQLite schema definitions and SQL query constants.
//!
//! Pure data, no I/O. Statements built at runtime live in `queries`.

/// SQL statement to create all tables.
pub const CREATE_TABLES: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id TEXT PRIMARY KEY,
    username TEXT NOT NULL,
    email TEXT NOT NULL,
    phone TEXT,
    date_of_birth TEXT
);

CREATE INDEX IF NOT EXISTS idx_users_username ON users(username);
CREATE INDEX IF NOT EXISTS idx_users_email ON users(email);
"#;

/// Table name shared by the static and the generated statements.
pub const USERS_TABLE: &str = "users";

/// Column list in the order `row_to_user` expects.
pub const USER_COLUMNS: &str = "id, username, email, phone, date_of_birth";

pub const SELECT_USER_BY_ID: &str = r#"
SELECT id, username, email, phone, date_of_birth
FROM users
WHERE id = ?1
"#;

pub const INSERT_USER: &str = r#"
INSERT INTO users (id, username, email, phone, date_of_birth)
VALUES (?1, ?2, ?3, ?4, ?5)
"#;

pub const UPDATE_USER: &str = r#"
UPDATE users
SET username = ?2, email = ?3, phone = ?4, date_of_birth = ?5
WHERE id = ?1
"#;

pub const DELETE_USER: &str = r#"
DELETE FROM users
WHERE id = ?1
"#;
