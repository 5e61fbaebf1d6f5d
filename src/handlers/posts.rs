//! Post handlers: list, read, create, update, delete, plus the preflight, 404 and 405 responders.

use crate::error::AppError;
use crate::model::{Post, PostInput};
use crate::response::{success_created, success_deleted, success_many, success_one_ok, success_updated};
use crate::service::{PostService, PostValidator};
use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::{
        rejection::{BytesRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::IntoResponse,
};

pub const CREATED: &str = "Post created successfully";
pub const UPDATED: &str = "Post updated successfully";
pub const DELETED: &str = "Post deleted successfully";

/// An id segment that cannot be decoded cannot name a stored post.
fn post_id(path: Result<Path<String>, PathRejection>) -> Result<String, AppError> {
    match path {
        Ok(Path(id)) => Ok(id),
        Err(rejection) => {
            tracing::debug!(error = %rejection, "undecodable post id");
            Err(AppError::PostNotFound)
        }
    }
}

/// Bodies that are not a JSON object are read as empty input and fail validation like one.
fn read_input(body: Result<Bytes, BytesRejection>) -> Result<PostInput, AppError> {
    match body {
        Ok(bytes) => Ok(PostInput::from_body(&bytes)),
        Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            Err(AppError::PayloadTooLarge)
        }
        Err(rejection) => {
            tracing::warn!(error = %rejection, "could not read request body");
            Ok(PostInput::default())
        }
    }
}

pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let posts = PostService::list(&state.pool).await?;
    Ok(success_many(posts))
}

pub async fn read(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<impl IntoResponse, AppError> {
    let id = post_id(path)?;
    let post = PostService::read(&state.pool, &id)
        .await?
        .ok_or(AppError::PostNotFound)?;
    Ok(success_one_ok(post))
}

pub async fn create(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<impl IntoResponse, AppError> {
    let input = read_input(body)?;
    let errors = PostValidator::for_create(&input);
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }
    let changes = input.into_changes();
    let post = Post::new(
        changes.title.unwrap_or_default(),
        changes.content.unwrap_or_default(),
    );
    let stored = PostService::create(&state.pool, &post).await?;
    tracing::info!(id = %stored.id, "post created");
    Ok(success_created(CREATED, stored))
}

pub async fn update(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    body: Result<Bytes, BytesRejection>,
) -> Result<impl IntoResponse, AppError> {
    let input = read_input(body)?;
    let errors = PostValidator::for_update(&input);
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }
    let id = post_id(path)?;
    let changes = input.into_changes();
    let post = PostService::update(&state.pool, &id, &changes)
        .await?
        .ok_or(AppError::PostNotFound)?;
    tracing::info!(id = %post.id, "post updated");
    Ok(success_updated(UPDATED, post))
}

pub async fn delete(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<impl IntoResponse, AppError> {
    let id = post_id(path)?;
    let post = PostService::delete(&state.pool, &id)
        .await?
        .ok_or(AppError::PostNotFound)?;
    tracing::info!(id = %post.id, "post deleted");
    Ok(success_deleted(DELETED, post))
}

/// PATCH or DELETE on the collection path.
pub async fn missing_id() -> AppError {
    AppError::MissingId
}

/// Preflight probe: success, no body.
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

pub async fn resource_not_found() -> AppError {
    AppError::ResourceNotFound
}
