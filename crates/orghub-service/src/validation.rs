//! Input validation shared by the services.

use validator::Validate;

use orghub_core::error::AppError;
use orghub_core::result::AppResult;

/// Longest accepted name, in characters.
pub const MAX_NAME_LEN: usize = 255;

/// Run the derive-based checks of a request.
pub fn validate_request<T: Validate>(request: &T) -> AppResult<()> {
    request
        .validate()
        .map_err(|e| AppError::validation(format!("Invalid request: {e}")))
}

/// Trim a display name and reject it when nothing is left.
pub fn normalize_name(value: &str, what: &str) -> AppResult<String> {
    let name = value.trim();
    if name.is_empty() {
        return Err(AppError::validation(format!(
            "{what} name is required and cannot be empty"
        )));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(AppError::validation(format!(
            "{what} name cannot exceed {MAX_NAME_LEN} characters"
        )));
    }
    Ok(name.to_string())
}

/// Trim an optional free-text field, dropping it when blank.
pub fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse an optional raw id.
pub fn parse_optional<T>(
    value: Option<&str>,
    parse: impl Fn(&str) -> AppResult<T>,
) -> AppResult<Option<T>> {
    value.map(parse).transpose()
}
