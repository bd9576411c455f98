//! Extractors that report rejections as [`AppError`] JSON bodies.
//!
//! Axum's stock `Json` and `Path` reject with plain-text 415/422 responses.
//! These wrappers turn every body or path failure (malformed JSON, a `null`
//! body, an id that is not a UUID) into a 400 with the standard error body.

use axum::extract::{FromRequest, FromRequestParts};
use validator::Validate;

use crate::error::{AppError, AppResult};

/// JSON body extractor with [`AppError`] rejections.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// Path parameter extractor with [`AppError`] rejections.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);

/// Run `validator` rules on a DTO.
pub fn validate_input<T: Validate>(input: &T) -> AppResult<()> {
    input.validate().map_err(AppError::from)
}
