use chrono::NaiveDate;

use crate::errors::AppError;

/// A validated schedule: the ISO date plus its long display form.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleDate {
    pub date: String,
    pub formatted: String,
}

/// Parses a picker date (`YYYY-MM-DD`) and rejects days before `today`.
pub fn parse_schedule_date(raw: &str, today: NaiveDate) -> Result<ScheduleDate, AppError> {
    let raw = raw.trim();
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .filter(|_| raw.len() == 10)
        .ok_or_else(|| AppError::Validation(format!("'{raw}' is not a YYYY-MM-DD date")))?;

    if date < today {
        return Err(AppError::Validation(format!(
            "Cannot schedule for {raw}: the date is in the past"
        )));
    }

    Ok(ScheduleDate {
        date: date.format("%Y-%m-%d").to_string(),
        formatted: format_schedule_date(date),
    })
}

/// Long US form, e.g. `Saturday, March 1, 2025`.
pub fn format_schedule_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}
