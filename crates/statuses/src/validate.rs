use serde_json::Value;

use sentinel_common::{error::AppError, types::StatusesPage};

/// Assert that the decoded API body has the expected envelope shape.
///
/// `homeworks` must be an array and `current_date` an integer; a response
/// without a usable cursor is rejected outright, never warned about.
/// On success the `homeworks` sequence is returned unchanged (may be empty).
pub fn check_response(raw: &Value) -> Result<StatusesPage, AppError> {
    tracing::debug!("checking API response shape");

    let body = raw.as_object().ok_or(AppError::NotAnObject)?;

    let homeworks = body
        .get("homeworks")
        .ok_or(AppError::ResponseFieldMissing("homeworks"))?
        .as_array()
        .ok_or(AppError::ResponseFieldType("homeworks", "an array"))?;

    let current_date = body
        .get("current_date")
        .ok_or(AppError::ResponseFieldMissing("current_date"))?
        .as_i64()
        .ok_or(AppError::ResponseFieldType("current_date", "an integer"))?;

    Ok(StatusesPage {
        homeworks: homeworks.clone(),
        current_date,
    })
}
