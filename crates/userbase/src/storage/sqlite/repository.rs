//! SQLite user repository.
//!
//! Translates each user operation into SQL on a borrowed connection. The
//! connection may be a `rusqlite::Transaction` (it derefs to `Connection`);
//! opening and closing transactions is the service's job.

use rusqlite::{params_from_iter, Connection};

use userbase_core::storage::{RepositoryError, Result, SearchResult};
use userbase_core::user::{User, UserFilter, UserPatch};

use super::conversions::{format_date, row_to_user};
use super::error::map_rusqlite_error;
use super::queries::{build_patch, build_search};
use super::schema;

/// SQL operations for users.
///
/// Mutations return the number of affected rows.
pub trait UserRepository: Send + Sync + 'static {
    fn load(&self, conn: &Connection, id: &str) -> Result<Option<User>>;

    fn create(&self, conn: &Connection, user: &User) -> Result<u64>;

    fn update(&self, conn: &Connection, user: &User) -> Result<u64>;

    fn patch(&self, conn: &Connection, patch: &UserPatch) -> Result<u64>;

    fn delete(&self, conn: &Connection, id: &str) -> Result<u64>;

    fn search(
        &self,
        conn: &Connection,
        filter: &UserFilter,
        limit: u32,
        offset: u64,
    ) -> Result<SearchResult<User>>;
}

/// SQLite-based user repository.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqliteUserRepository;

impl UserRepository for SqliteUserRepository {
    fn load(&self, conn: &Connection, id: &str) -> Result<Option<User>> {
        let mut stmt = conn
            .prepare_cached(schema::SELECT_USER_BY_ID)
            .map_err(|e| map_rusqlite_error(&e, id))?;
        match stmt.query_row([id], row_to_user) {
            Ok(user) => Ok(Some(user)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(map_rusqlite_error(&e, id)),
        }
    }

    fn create(&self, conn: &Connection, user: &User) -> Result<u64> {
        let date_of_birth = user.date_of_birth.as_ref().map(format_date);

        let rows = conn
            .execute(
                schema::INSERT_USER,
                rusqlite::params![
                    user.id,
                    user.username,
                    user.email,
                    user.phone,
                    date_of_birth
                ],
            )
            .map_err(|e| map_rusqlite_error(&e, &user.id))?;

        Ok(rows as u64)
    }

    fn update(&self, conn: &Connection, user: &User) -> Result<u64> {
        let date_of_birth = user.date_of_birth.as_ref().map(format_date);

        let rows = conn
            .execute(
                schema::UPDATE_USER,
                rusqlite::params![
                    user.id,
                    user.username,
                    user.email,
                    user.phone,
                    date_of_birth
                ],
            )
            .map_err(|e| map_rusqlite_error(&e, &user.id))?;

        Ok(rows as u64)
    }

    fn patch(&self, conn: &Connection, patch: &UserPatch) -> Result<u64> {
        let statement = build_patch(patch).ok_or_else(|| {
            RepositoryError::InvalidData(format!("No fields to patch for User {}", patch.id))
        })?;

        let rows = conn
            .execute(&statement.sql, params_from_iter(statement.params))
            .map_err(|e| map_rusqlite_error(&e, &patch.id))?;

        Ok(rows as u64)
    }

    fn delete(&self, conn: &Connection, id: &str) -> Result<u64> {
        let rows = conn
            .execute(schema::DELETE_USER, [id])
            .map_err(|e| map_rusqlite_error(&e, id))?;

        Ok(rows as u64)
    }

    fn search(
        &self,
        conn: &Connection,
        filter: &UserFilter,
        limit: u32,
        offset: u64,
    ) -> Result<SearchResult<User>> {
        let statements = build_search(filter, limit, offset);
        let to_error = |e: rusqlite::Error| map_rusqlite_error(&e, "search");

        let total: i64 = conn
            .query_row(
                &statements.count.sql,
                params_from_iter(statements.count.params),
                |row| row.get(0),
            )
            .map_err(to_error)?;

        let mut stmt = conn.prepare(&statements.select.sql).map_err(to_error)?;
        let rows = stmt
            .query_map(params_from_iter(statements.select.params), row_to_user)
            .map_err(to_error)?;

        let mut users = Vec::new();
        for row_result in rows {
            users.push(row_result.map_err(to_error)?);
        }

        Ok(SearchResult::new(users, total.max(0) as u64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn setup() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(schema::CREATE_TABLES).unwrap();
        conn
    }

    fn ada() -> User {
        User::new("u1", "ada", "ada@example.com")
            .with_phone("555-0100")
            .with_date_of_birth(NaiveDate::from_ymd_opt(1815, 12, 10).unwrap())
    }

    #[test]
    fn test_load_missing_returns_none() {
        let conn = setup();

        let loaded = SqliteUserRepository.load(&conn, "nobody").unwrap();

        assert_eq!(loaded, None);
    }

    #[test]
    fn test_create_then_load_matches_every_field() {
        let conn = setup();
        let repo = SqliteUserRepository;

        assert_eq!(repo.create(&conn, &ada()).unwrap(), 1);

        assert_eq!(repo.load(&conn, "u1").unwrap(), Some(ada()));
    }

    #[test]
    fn test_create_duplicate_id_is_already_exists() {
        let conn = setup();
        let repo = SqliteUserRepository;
        repo.create(&conn, &ada()).unwrap();

        let result = repo.create(&conn, &ada());

        assert_eq!(
            result,
            Err(RepositoryError::AlreadyExists {
                entity_type: "User",
                id: "u1".to_string(),
            })
        );
    }

    #[test]
    fn test_update_replaces_fields_but_not_id() {
        let conn = setup();
        let repo = SqliteUserRepository;
        repo.create(&conn, &ada()).unwrap();

        let mut changed = ada();
        changed.username = "lovelace".to_string();
        changed.phone = None;

        assert_eq!(repo.update(&conn, &changed).unwrap(), 1);
        assert_eq!(repo.load(&conn, "u1").unwrap(), Some(changed));
    }

    #[test]
    fn test_update_missing_affects_no_rows() {
        let conn = setup();

        assert_eq!(SqliteUserRepository.update(&conn, &ada()).unwrap(), 0);
    }

    #[test]
    fn test_patch_email_only_leaves_other_fields() {
        let conn = setup();
        let repo = SqliteUserRepository;
        repo.create(&conn, &ada()).unwrap();

        let patch = UserPatch::new("u1").with_email("countess@example.com");
        assert_eq!(repo.patch(&conn, &patch).unwrap(), 1);

        let loaded = repo.load(&conn, "u1").unwrap().unwrap();
        assert_eq!(loaded.email, "countess@example.com");
        assert_eq!(loaded.username, "ada");
        assert_eq!(loaded.phone.as_deref(), Some("555-0100"));
        assert_eq!(loaded.date_of_birth, ada().date_of_birth);
    }

    #[test]
    fn test_patch_stores_quotes_verbatim_and_touches_one_row() {
        let conn = setup();
        let repo = SqliteUserRepository;
        repo.create(&conn, &ada()).unwrap();
        repo.create(&conn, &User::new("u2", "grace", "grace@example.com"))
            .unwrap();

        let hostile = "x', email = 'pwned";
        let patch = UserPatch::new("u1").with_username(hostile);
        assert_eq!(repo.patch(&conn, &patch).unwrap(), 1);

        assert_eq!(repo.load(&conn, "u1").unwrap().unwrap().username, hostile);
        assert_eq!(
            repo.load(&conn, "u2").unwrap().unwrap().email,
            "grace@example.com"
        );
    }

    #[test]
    fn test_patch_can_clear_date_of_birth() {
        let conn = setup();
        let repo = SqliteUserRepository;
        repo.create(&conn, &ada()).unwrap();

        repo.patch(&conn, &UserPatch::new("u1").with_date_of_birth(None))
            .unwrap();

        assert_eq!(repo.load(&conn, "u1").unwrap().unwrap().date_of_birth, None);
    }

    #[test]
    fn test_empty_patch_is_invalid_data() {
        let conn = setup();

        let result = SqliteUserRepository.patch(&conn, &UserPatch::new("u1"));

        assert!(matches!(result, Err(RepositoryError::InvalidData(_))));
    }

    #[test]
    fn test_delete_then_load_returns_none() {
        let conn = setup();
        let repo = SqliteUserRepository;
        repo.create(&conn, &ada()).unwrap();

        assert_eq!(repo.delete(&conn, "u1").unwrap(), 1);
        assert_eq!(repo.load(&conn, "u1").unwrap(), None);
        assert_eq!(repo.delete(&conn, "u1").unwrap(), 0);
    }

    #[test]
    fn test_search_filters_sorts_and_pages() {
        let conn = setup();
        let repo = SqliteUserRepository;
        for (id, name) in [("u1", "adam"), ("u2", "ada"), ("u3", "grace"), ("u4", "adele")] {
            repo.create(&conn, &User::new(id, name, format!("{name}@example.com")))
                .unwrap();
        }

        let filter = UserFilter {
            username: Some("ad".to_string()),
            sort: Some("-username".to_string()),
            ..UserFilter::default()
        };

        let first = repo.search(&conn, &filter, 2, 0).unwrap();
        assert_eq!(first.total, 3);
        let names: Vec<&str> = first.list.iter().map(|u| u.username.as_str()).collect();
        assert_eq!(names, vec!["adele", "adam"]);

        let second = repo.search(&conn, &filter, 2, 2).unwrap();
        assert_eq!(second.total, 3);
        assert_eq!(second.list.len(), 1);
        assert_eq!(second.list[0].username, "ada");
    }

    #[test]
    fn test_search_pages_with_tied_sort_values_cover_every_row() {
        let conn = setup();
        let repo = SqliteUserRepository;
        for id in ["u3", "u1", "u4", "u2"] {
            repo.create(&conn, &User::new(id, "same", format!("{id}@example.com")))
                .unwrap();
        }

        let filter = UserFilter {
            sort: Some("username".to_string()),
            ..UserFilter::default()
        };

        let mut ids: Vec<String> = Vec::new();
        for offset in [0, 2] {
            let page = repo.search(&conn, &filter, 2, offset).unwrap();
            ids.extend(page.list.into_iter().map(|u| u.id));
        }

        assert_eq!(ids, vec!["u1", "u2", "u3", "u4"]);
    }

    #[test]
    fn test_search_prefix_treats_wildcards_literally() {
        let conn = setup();
        let repo = SqliteUserRepository;
        repo.create(&conn, &User::new("u1", "a_b", "one@example.com"))
            .unwrap();
        repo.create(&conn, &User::new("u2", "axb", "two@example.com"))
            .unwrap();

        let filter = UserFilter {
            username: Some("a_".to_string()),
            ..UserFilter::default()
        };

        let result = repo.search(&conn, &filter, 10, 0).unwrap();
        assert_eq!(result.total, 1);
        assert_eq!(result.list[0].id, "u1");
    }

    #[test]
    fn test_search_by_date_of_birth_range() {
        let conn = setup();
        let repo = SqliteUserRepository;
        repo.create(&conn, &ada()).unwrap();
        repo.create(
            &conn,
            &User::new("u2", "grace", "grace@example.com")
                .with_date_of_birth(NaiveDate::from_ymd_opt(1906, 12, 9).unwrap()),
        )
        .unwrap();
        repo.create(&conn, &User::new("u3", "nobody", "nobody@example.com"))
            .unwrap();

        let filter = UserFilter {
            date_of_birth_from: NaiveDate::from_ymd_opt(1900, 1, 1),
            ..UserFilter::default()
        };

        let result = repo.search(&conn, &filter, 10, 0).unwrap();
        assert_eq!(result.total, 1);
        assert_eq!(result.list[0].id, "u2");
    }
}
