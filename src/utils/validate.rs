use crate::error::{AppError, AppResult};

/// Column width of the short text fields (`varchar(255)`).
pub const MAX_TEXT_LEN: usize = 255;

/// Column width of `decoration_package.image_url`.
pub const MAX_IMAGE_URL_LEN: usize = 512;

/// Reject `value` when it would not fit a `varchar(max)` column.
pub fn check_len(field: &str, value: &str, max: usize) -> AppResult<()> {
    if value.chars().count() > max {
        return Err(AppError::BadRequest(format!(
            "Field '{}' must be at most {} characters",
            field, max
        )));
    }
    Ok(())
}
