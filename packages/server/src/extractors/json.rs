use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use serde::de::DeserializeOwned;

use crate::error::{AppError, FieldError};

const DATA_ERROR_PREFIX: &str = "Failed to deserialize the JSON body into the target type: ";

/// `Json<T>` whose rejections are `VALIDATION_ERROR` bodies.
///
/// A body that parses but does not fit `T` (wrong type, missing field, unknown
/// enum value) is reported per field in `details`. Syntax and content-type
/// problems keep a single message.
pub struct AppJson<T>(pub T);

impl<S, T> FromRequest<S> for AppJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(AppJson(value)),
            Err(JsonRejection::JsonDataError(err)) => Err(AppError::InvalidFields(vec![
                shape_error(&err.body_text()),
            ])),
            Err(rejection) => Err(AppError::Validation(rejection.body_text())),
        }
    }
}

/// Split axum's data-error text (`"<prefix><path>: <reason> at line L column C"`)
/// into the offending field and the reason.
fn shape_error(text: &str) -> FieldError {
    let detail = text.strip_prefix(DATA_ERROR_PREFIX).unwrap_or(text);
    let detail = detail
        .rsplit_once(" at line ")
        .map_or(detail, |(reason, _)| reason);

    // Missing fields are reported at the parent, so the name is in the reason.
    if let Some(rest) = detail.strip_prefix("missing field `")
        && let Some((field, _)) = rest.split_once('`')
    {
        return FieldError {
            field: field.to_string(),
            message: "is required".into(),
        };
    }

    match detail.split_once(": ") {
        Some((path, reason)) if !path.is_empty() && !path.contains(' ') => FieldError {
            field: path.to_string(),
            message: reason.to_string(),
        },
        _ => FieldError {
            field: "body".into(),
            message: detail.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrong_type_names_the_field() {
        let err = shape_error(
            "Failed to deserialize the JSON body into the target type: title: invalid type: \
             integer `42`, expected a string at line 1 column 12",
        );
        assert_eq!(err.field, "title");
        assert_eq!(err.message, "invalid type: integer `42`, expected a string");
    }

    #[test]
    fn nested_paths_are_kept() {
        let err = shape_error(
            "Failed to deserialize the JSON body into the target type: highlights[1]: \
             invalid type: boolean `true`, expected a string at line 1 column 40",
        );
        assert_eq!(err.field, "highlights[1]");
    }

    #[test]
    fn missing_field_is_required() {
        let err = shape_error(
            "Failed to deserialize the JSON body into the target type: missing field `title` \
             at line 1 column 2",
        );
        assert_eq!(
            err,
            FieldError {
                field: "title".into(),
                message: "is required".into(),
            }
        );
    }

    #[test]
    fn root_level_errors_fall_back_to_body() {
        let err = shape_error(
            "Failed to deserialize the JSON body into the target type: invalid type: \
             sequence, expected struct CreateHeroRequest at line 1 column 0",
        );
        assert_eq!(err.field, "body");
        assert!(err.message.starts_with("invalid type"));
    }
}
