//! Request validation for post bodies. Errors are collected, never short-circuited.

use crate::model::{FieldValue, PostInput};

pub const TITLE_REQUIRED: &str = "Title is required";
pub const CONTENT_REQUIRED: &str = "Content is required";
pub const TITLE_EMPTY: &str = "Title cannot be empty";
pub const CONTENT_EMPTY: &str = "Content cannot be empty";
pub const TITLE_NOT_STRING: &str = "Title must be a string";
pub const CONTENT_NOT_STRING: &str = "Content must be a string";
pub const NOTHING_TO_UPDATE: &str = "At least one field (title or content) must be provided";

pub struct PostValidator;

impl PostValidator {
    /// Title and content are both required and non-empty.
    pub fn for_create(input: &PostInput) -> Vec<String> {
        let mut errors = Vec::new();
        required(&input.title, TITLE_REQUIRED, TITLE_NOT_STRING, &mut errors);
        required(&input.content, CONTENT_REQUIRED, CONTENT_NOT_STRING, &mut errors);
        errors
    }

    /// Supplied fields must be non-empty, and at least one field must carry a value.
    pub fn for_update(input: &PostInput) -> Vec<String> {
        let mut errors = Vec::new();
        optional(&input.title, TITLE_EMPTY, TITLE_NOT_STRING, &mut errors);
        optional(&input.content, CONTENT_EMPTY, CONTENT_NOT_STRING, &mut errors);
        if !input.title.is_filled() && !input.content.is_filled() {
            errors.push(NOTHING_TO_UPDATE.to_string());
        }
        errors
    }
}

fn required(field: &FieldValue, missing: &str, not_string: &str, errors: &mut Vec<String>) {
    if field.is_invalid() {
        errors.push(not_string.to_string());
    } else if !field.is_filled() {
        errors.push(missing.to_string());
    }
}

fn optional(field: &FieldValue, empty: &str, not_string: &str, errors: &mut Vec<String>) {
    if field.is_invalid() {
        errors.push(not_string.to_string());
    } else if field.is_present() && !field.is_filled() {
        errors.push(empty.to_string());
    }
}
