use std::cmp::Ordering;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde_json::Value;

use crate::core::types::{Record, RecordId};
use crate::error::RecordError;

/// Parses a numeric record value.
///
/// JSON numbers are taken as-is. Strings are parsed as decimals because
/// OData-style sources serialize `Edm.Decimal` columns as text.
pub fn parse_number(value: Option<&Value>, field: &'static str) -> Result<f64, RecordError> {
    let parsed = match value {
        Some(Value::Number(number)) => number.as_f64(),
        Some(Value::String(text)) => Decimal::from_str(text.trim())
            .ok()
            .and_then(|decimal| decimal.to_f64()),
        _ => None,
    };

    parsed
        .filter(|v| v.is_finite())
        .ok_or(RecordError::InvalidNumericField { field })
}

/// Reads a numeric field, substituting `0` when it is missing or malformed.
#[must_use]
pub fn number_or_zero(record: &Record, field: &'static str) -> f64 {
    match parse_number(record.get(field), field) {
        Ok(value) => value,
        Err(err) => {
            tracing::trace!(error = %err, "substituting 0 for numeric field");
            0.0
        }
    }
}

/// Parses an id from an integer number or a numeric string.
#[must_use]
pub fn parse_id(value: Option<&Value>) -> Option<RecordId> {
    match value? {
        Value::Number(number) => number.as_i64().or_else(|| {
            number
                .as_f64()
                .filter(|v| v.fract() == 0.0 && v.is_finite())
                .map(|v| v as i64)
        }),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

/// Resolves a foreign key from its flat `<name>_id` field, falling back to
/// the `id` of an expanded nested object.
pub fn resolve_reference(
    record: &Record,
    id_field: &'static str,
    nested_field: &'static str,
) -> Result<RecordId, RecordError> {
    reference_id(record, id_field, nested_field)
        .ok_or(RecordError::MissingReference { field: id_field })
}

/// Non-failing form of [`resolve_reference`] for runtime field names.
#[must_use]
pub fn reference_id(record: &Record, id_field: &str, nested_field: &str) -> Option<RecordId> {
    parse_id(record.get(id_field)).or_else(|| {
        record
            .get(nested_field)
            .and_then(Value::as_object)
            .and_then(|nested| parse_id(nested.get("id")))
    })
}

pub fn required_id(record: &Record, field: &'static str) -> Result<RecordId, RecordError> {
    parse_id(record.get(field)).ok_or(RecordError::MissingField { field })
}

#[must_use]
pub fn text_field(record: &Record, field: &str) -> String {
    match record.get(field) {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Number(number)) => number.to_string(),
        _ => String::new(),
    }
}

pub fn required_text(record: &Record, field: &'static str) -> Result<String, RecordError> {
    let text = text_field(record, field);
    if text.trim().is_empty() {
        return Err(RecordError::MissingField { field });
    }
    Ok(text)
}

/// Scaled magnitude from which every `f64` is already a whole number (2^52).
const INTEGRAL_LIMIT: f64 = 4_503_599_627_370_496.0;

/// Rounds half away from zero to `decimals` fractional digits.
///
/// Values too large to carry that many fractional digits come back unchanged,
/// so the result is always finite for finite input.
#[must_use]
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10_f64.powi(decimals);
    let scaled = value * factor;
    if !scaled.is_finite() || scaled.abs() >= INTEGRAL_LIMIT {
        return value;
    }
    scaled.round() / factor
}

pub fn parse_calendar_date(text: &str, field: &'static str) -> Result<NaiveDate, RecordError> {
    let trimmed = text.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(trimmed).map(|dt| dt.date_naive()))
        .map_err(|_| RecordError::MalformedDate {
            field,
            value: text.to_owned(),
        })
}

/// Sort key in unix milliseconds. Unparsable dates map to `0`.
///
/// Plain calendar dates are interpreted as UTC midnight.
#[must_use]
pub fn date_sort_key(text: &str) -> i64 {
    let trimmed = text.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return date.and_time(NaiveTime::MIN).and_utc().timestamp_millis();
    }
    DateTime::parse_from_rfc3339(trimmed)
        .map(|dt| dt.timestamp_millis())
        .unwrap_or(0)
}

/// Parses `HH:MM`, `HH:MM:SS` or `HH:MM:SS.fff`. Fractional seconds are truncated.
pub fn parse_time_of_day(text: &str, field: &'static str) -> Result<NaiveTime, RecordError> {
    let malformed = || RecordError::MalformedTime {
        field,
        value: text.to_owned(),
    };

    let mut parts = text.trim().split(':');
    let hour: u32 = parts
        .next()
        .and_then(|p| p.trim().parse().ok())
        .ok_or_else(malformed)?;
    let minute: u32 = parts
        .next()
        .and_then(|p| p.trim().parse().ok())
        .ok_or_else(malformed)?;
    let second: u32 = match parts.next() {
        Some(part) => part
            .split('.')
            .next()
            .and_then(|p| p.trim().parse().ok())
            .ok_or_else(malformed)?,
        None => 0,
    };
    if parts.next().is_some() {
        return Err(malformed());
    }

    NaiveTime::from_hms_opt(hour, minute, second).ok_or_else(malformed)
}

#[must_use]
pub fn format_hhmm(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

/// Compares lowercased text without allocating.
#[must_use]
pub fn case_insensitive_cmp(lhs: &str, rhs: &str) -> Ordering {
    lhs.chars()
        .flat_map(char::to_lowercase)
        .cmp(rhs.chars().flat_map(char::to_lowercase))
}

/// Ordering used for venue lists.
///
/// Case-insensitive first, raw text as tie-break so the result is total.
#[must_use]
pub fn locale_cmp(lhs: &str, rhs: &str) -> Ordering {
    case_insensitive_cmp(lhs, rhs).then_with(|| lhs.cmp(rhs))
}

/// Case-insensitive substring test; an empty needle matches everything.
#[must_use]
pub fn contains_case_insensitive(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}
