//! Standard response envelope helpers.

use axum::{http::StatusCode, Json};
use serde::Serialize;

#[derive(Serialize)]
pub struct SuccessOne<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
    pub data: T,
}

#[derive(Serialize)]
pub struct SuccessMany<T> {
    pub success: bool,
    pub data: Vec<T>,
    pub count: usize,
}

/// Envelope returned by delete; carries the snapshot so the client can offer undo.
#[derive(Serialize)]
pub struct SuccessDeleted<T> {
    pub success: bool,
    pub message: &'static str,
    pub deleted_post: T,
}

pub fn success_many<T: Serialize>(data: Vec<T>) -> (StatusCode, Json<SuccessMany<T>>) {
    let count = data.len();
    (
        StatusCode::OK,
        Json(SuccessMany {
            success: true,
            data,
            count,
        }),
    )
}

pub fn success_one_ok<T: Serialize>(data: T) -> (StatusCode, Json<SuccessOne<T>>) {
    (
        StatusCode::OK,
        Json(SuccessOne {
            success: true,
            message: None,
            data,
        }),
    )
}

pub fn success_created<T: Serialize>(message: &'static str, data: T) -> (StatusCode, Json<SuccessOne<T>>) {
    (
        StatusCode::CREATED,
        Json(SuccessOne {
            success: true,
            message: Some(message),
            data,
        }),
    )
}

pub fn success_updated<T: Serialize>(message: &'static str, data: T) -> (StatusCode, Json<SuccessOne<T>>) {
    (
        StatusCode::OK,
        Json(SuccessOne {
            success: true,
            message: Some(message),
            data,
        }),
    )
}

pub fn success_deleted<T: Serialize>(message: &'static str, deleted_post: T) -> (StatusCode, Json<SuccessDeleted<T>>) {
    (
        StatusCode::OK,
        Json(SuccessDeleted {
            success: true,
            message,
            deleted_post,
        }),
    )
}
