//! Request body extractor with structured validation errors.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::Json;
use serde::de::DeserializeOwned;
use validator::Validate;
use zoo_core::error::{CoreError, FieldError};

use crate::error::AppError;

/// Prefix axum puts in front of serde's message for data errors.
const DATA_ERROR_PREFIX: &str = "Failed to deserialize the JSON body into the target type: ";

/// Field reported when serde cannot attribute an error to a field.
const BODY_FIELD: &str = "body";

/// JSON body that has been deserialized and checked with `validator`.
///
/// Missing or mistyped fields and rule violations become
/// `400 VALIDATION_ERROR` naming the offending field. Unparseable bodies and
/// a wrong content type stay `400 BAD_REQUEST`.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(rejection_to_error)?;
        value.validate().map_err(CoreError::from)?;
        Ok(Self(value))
    }
}

fn rejection_to_error(rejection: JsonRejection) -> AppError {
    match rejection {
        JsonRejection::JsonDataError(err) => {
            let field_error = field_error_from_data_error(&err.body_text());
            tracing::debug!(field = %field_error.field, "Rejecting request body");
            AppError::Core(CoreError::InvalidField(field_error))
        }
        other => AppError::BadRequest(other.body_text()),
    }
}

/// Turn serde's data-error text into a [`FieldError`].
///
/// Handles `missing field `x``, and `path.to.x: <message>` as produced for
/// errors below the root. Anything else is attributed to `body`.
fn field_error_from_data_error(text: &str) -> FieldError {
    let detail = strip_position(text.strip_prefix(DATA_ERROR_PREFIX).unwrap_or(text));

    if let Some(field) = backticked_after(detail, "missing field `") {
        return FieldError::new(field, "This field is required.");
    }

    if let Some((path, message)) = detail.split_once(": ") {
        if let Some(field) = last_path_segment(path) {
            return FieldError::new(field, message);
        }
    }

    FieldError::new(BODY_FIELD, detail)
}

/// Drop serde_json's trailing ` at line N column M`.
fn strip_position(text: &str) -> &str {
    match text.rfind(" at line ") {
        Some(idx) if text[idx..].contains(" column ") => &text[..idx],
        _ => text,
    }
}

fn backticked_after<'a>(text: &'a str, marker: &str) -> Option<&'a str> {
    let start = text.find(marker)? + marker.len();
    let len = text[start..].find('`')?;
    Some(&text[start..start + len])
}

/// `species_ids[2]` -> `species_ids`, `a.b` -> `b`. `None` when `path` does
/// not look like a field path.
fn last_path_segment(path: &str) -> Option<&str> {
    if path.is_empty() || path.contains(char::is_whitespace) {
        return None;
    }
    let segment = path.rsplit('.').find(|s| !s.is_empty())?;
    let segment = segment.split('[').next().unwrap_or(segment);
    (!segment.is_empty() && segment != "?").then_some(segment)
}
