//! User CRUD and search handlers.
//!
//! Each handler decodes the request, validates it, and hands the result to the
//! `UserService` held in `AppState`. Mutations that match no row become 404.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use uuid::Uuid;

use userbase_core::storage::{RepositoryError, SearchResult};
use userbase_core::user::{
    validate_patch, validate_user, ErrorMessage, User, UserFilter, UserPatch,
};

use crate::{
    handlers::{error::RequestError, AppError},
    state::AppState,
};

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

fn not_found(id: &str) -> AppError {
    RepositoryError::NotFound {
        entity_type: "User",
        id: id.to_string(),
    }
    .into()
}

fn ensure_valid(errors: Vec<ErrorMessage>) -> Result<(), RequestError> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(RequestError::Validation(errors))
    }
}

/// Reconciles the id in the path with the id in the body.
///
/// An empty body id takes the path id; a different one is rejected.
fn resolve_id(path_id: &str, body_id: &mut String) -> Result<(), RequestError> {
    if body_id.trim().is_empty() {
        *body_id = path_id.to_string();
        Ok(())
    } else if body_id != path_id {
        Err(RequestError::BadRequest(format!(
            "Id in body '{body_id}' does not match id in path '{path_id}'"
        )))
    } else {
        Ok(())
    }
}

fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, RequestError> {
    body.map(|Json(value)| value)
        .map_err(|e| RequestError::BadRequest(format!("Failed to parse body: {}", e.body_text())))
}

// ============================================================================
// Load
// ============================================================================

/// Get a user by ID (GET /users/{id}).
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<User>, AppError> {
    match state.user_service.load(&id).await? {
        Some(user) => Ok(Json(user)),
        None => Err(not_found(&id)),
    }
}

// ============================================================================
// Create
// ============================================================================

/// Create a new user (POST /users).
///
/// A missing or empty id is replaced with a random UUID.
pub async fn create_user(
    State(state): State<AppState>,
    body: Result<Json<User>, JsonRejection>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let mut user = json_body(body)?;
    if user.id.trim().is_empty() {
        user.id = Uuid::new_v4().to_string();
    }

    ensure_valid(validate_user(&user, today()))?;

    state.user_service.create(&user).await?;

    tracing::info!(user_id = %user.id, username = %user.username, "Created user");

    Ok((StatusCode::CREATED, Json(user)))
}

// ============================================================================
// Update
// ============================================================================

/// Replace a user (PUT /users/{id}).
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<User>, JsonRejection>,
) -> Result<Json<User>, AppError> {
    let mut user = json_body(body)?;
    resolve_id(&id, &mut user.id)?;

    ensure_valid(validate_user(&user, today()))?;

    let rows = state.user_service.update(&user).await?;
    if rows == 0 {
        return Err(not_found(&id));
    }

    tracing::info!(user_id = %id, "Updated user");

    Ok(Json(user))
}

// ============================================================================
// Patch
// ============================================================================

/// Change some fields of a user (PATCH /users/{id}).
///
/// Responds with the patch as it was applied.
pub async fn patch_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<UserPatch>, JsonRejection>,
) -> Result<Json<UserPatch>, AppError> {
    let mut patch = json_body(body)?;
    resolve_id(&id, &mut patch.id)?;

    if patch.is_empty() {
        return Err(RequestError::BadRequest("No fields to patch".to_string()).into());
    }

    ensure_valid(validate_patch(&patch, today()))?;

    let rows = state.user_service.patch(&patch).await?;
    if rows == 0 {
        return Err(not_found(&id));
    }

    let fields: Vec<&str> = patch
        .changes()
        .iter()
        .map(|change| change.field.json_name())
        .collect();
    tracing::info!(user_id = %id, fields = ?fields, "Patched user");

    Ok(Json(patch))
}

// ============================================================================
// Delete
// ============================================================================

/// Delete a user (DELETE /users/{id}). Responds with the affected row count.
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<u64>, AppError> {
    let rows = state.user_service.delete(&id).await?;
    if rows == 0 {
        return Err(not_found(&id));
    }

    tracing::info!(user_id = %id, "Deleted user");

    Ok(Json(rows))
}

// ============================================================================
// Search
// ============================================================================

/// Search users from query parameters (GET /users/search).
pub async fn search_users(
    State(state): State<AppState>,
    query: Result<Query<UserFilter>, QueryRejection>,
) -> Result<Json<SearchResult<User>>, AppError> {
    let Query(filter) = query.map_err(|e| {
        RequestError::BadRequest(format!("Failed to parse query: {}", e.body_text()))
    })?;

    search_users_impl(&state, filter).await
}

/// Search users from a JSON body (POST /users/search).
pub async fn search_users_by_body(
    State(state): State<AppState>,
    body: Result<Json<UserFilter>, JsonRejection>,
) -> Result<Json<SearchResult<User>>, AppError> {
    let filter = json_body(body)?;

    search_users_impl(&state, filter).await
}

async fn search_users_impl(
    state: &AppState,
    filter: UserFilter,
) -> Result<Json<SearchResult<User>>, AppError> {
    tracing::debug!(filter = ?filter, "Searching users");

    let result = state.user_service.search(&filter).await?;

    Ok(Json(result))
}
