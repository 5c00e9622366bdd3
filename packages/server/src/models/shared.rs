use serde::{Deserialize, Deserializer};

use crate::error::{AppError, FieldError};

/// Maximum number of media items attached to one entity.
pub const MAX_MEDIA_ITEMS: usize = 50;

/// Serde helper for PATCH semantics on nullable fields.
///
/// * JSON field absent  => `None`          (don't update)
/// * JSON field = null  => `Some(None)`    (set to NULL)
/// * JSON field = value => `Some(Some(v))` (set to value)
pub fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Some(Option::deserialize(deserializer)?))
}

/// Request body for `PATCH /{type}/{id}/publish`.
#[derive(Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublishRequest {
    /// `true` publishes (or activates) the row, `false` hides it.
    #[schema(example = true)]
    pub is_active: bool,
}

/// Trim a string, mapping blank input to `None`.
pub fn clean(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Same as [`clean`] for the PATCH form of a nullable field.
pub fn clean_patch(value: Option<Option<String>>) -> Option<Option<String>> {
    value.map(clean)
}

/// The value a PATCH field sets, if it sets one.
pub fn patched(value: &Option<Option<String>>) -> Option<&str> {
    value.as_ref().and_then(|v| v.as_deref())
}

/// Collects every offending field of a payload before rejecting it.
#[derive(Debug, Default)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.push(FieldError {
            field: field.to_string(),
            message: message.into(),
        });
    }

    /// Required text: 1..=`max` characters after trimming.
    pub fn text(&mut self, field: &str, value: &str, max: usize) {
        let len = value.trim().chars().count();
        if len == 0 {
            self.add(field, "must not be empty");
        } else if len > max {
            self.add(field, format!("must be at most {max} characters"));
        }
    }

    /// Optional text: when present, at most `max` characters.
    pub fn optional_text(&mut self, field: &str, value: Option<&str>, max: usize) {
        if let Some(value) = value
            && value.trim().chars().count() > max
        {
            self.add(field, format!("must be at most {max} characters"));
        }
    }

    /// Links must be absolute http(s) URLs or site-relative paths.
    pub fn link(&mut self, field: &str, value: Option<&str>) {
        if let Some(value) = value.map(str::trim).filter(|v| !v.is_empty())
            && !(value.starts_with("https://")
                || value.starts_with("http://")
                || value.starts_with('/'))
        {
            self.add(field, "must be an http(s) URL or a path starting with '/'");
        }
    }

    pub fn order(&mut self, field: &str, value: Option<i32>) {
        if let Some(order) = value
            && order < 0
        {
            self.add(field, "must be >= 0");
        }
    }

    pub fn media_ids(&mut self, field: &str, ids: Option<&[i32]>) {
        let Some(ids) = ids else { return };
        if ids.len() > MAX_MEDIA_ITEMS {
            self.add(field, format!("must contain at most {MAX_MEDIA_ITEMS} items"));
        }
        if ids.iter().any(|&id| id <= 0) {
            self.add(field, "must contain only positive ids");
        }
    }

    /// `Ok(())` when nothing was collected, otherwise `AppError::InvalidFields`.
    pub fn finish(self) -> Result<(), AppError> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(AppError::InvalidFields(self.0))
        }
    }
}
