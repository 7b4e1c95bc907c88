use serde_json::Value;

use sentinel_common::{
    error::AppError,
    types::{HomeworkRecord, HomeworkStatus},
};

/// Lift one raw homework record into its typed form.
///
/// Field checks are explicit so each failure names the offending field; a
/// value that is absent, null, or not a string counts as missing.
pub fn parse_record(record: &Value) -> Result<HomeworkRecord, AppError> {
    let homework_name = required_str(record, "homework_name")?;
    let status_raw = required_str(record, "status")?;

    let status = HomeworkStatus::parse(status_raw)
        .ok_or_else(|| AppError::UnknownStatus(status_raw.to_string()))?;

    Ok(HomeworkRecord {
        homework_name: homework_name.to_string(),
        status,
    })
}

/// Render the chat message announcing a review-status change.
pub fn render_status_change(record: &Value) -> Result<String, AppError> {
    let record = parse_record(record)?;
    Ok(format!(
        "Изменился статус проверки работы \"{}\". {}",
        record.homework_name,
        record.status.verdict()
    ))
}

fn required_str<'a>(record: &'a Value, field: &'static str) -> Result<&'a str, AppError> {
    record
        .get(field)
        .filter(|value| !value.is_null())
        .and_then(Value::as_str)
        .ok_or(AppError::HomeworkFieldMissing(field))
}
