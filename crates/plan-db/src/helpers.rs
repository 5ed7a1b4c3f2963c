//! Row-to-entity parsing helpers and SQL value conversion.
//!
//! Rows are column-indexed `libsql::Row`s. Timestamps are written in the
//! fixed-width form from [`plan_core::value::timestamp_text`], but readers also
//! accept SQLite's own `datetime('now')` format for rows written by hand.

use chrono::{DateTime, SubsecRound, Utc};
use plan_core::value::{FieldValue, timestamp_text};

use crate::error::DatabaseError;

/// Parse a required TEXT column as `DateTime<Utc>`.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string cannot be parsed as either format.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, DatabaseError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .map(|naive| naive.and_utc())
        .map_err(|e| DatabaseError::Query(format!("Failed to parse datetime '{s}': {e}")))
}

/// Parse an optional TEXT column as `Option<DateTime<Utc>>`.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if a non-empty string cannot be parsed.
pub fn parse_optional_datetime(s: Option<&str>) -> Result<Option<DateTime<Utc>>, DatabaseError> {
    match s {
        Some(s) if !s.is_empty() => Ok(Some(parse_datetime(s)?)),
        _ => Ok(None),
    }
}

/// Parse a TEXT column into a serde-deserializable enum.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string does not match any enum variant.
pub fn parse_enum<T: serde::de::DeserializeOwned>(s: &str) -> Result<T, DatabaseError> {
    serde_json::from_value(serde_json::Value::String(s.to_string()))
        .map_err(|e| DatabaseError::Query(format!("Failed to parse enum from '{s}': {e}")))
}

/// Read a nullable TEXT column. Returns `None` for both SQL NULL and empty string.
///
/// `row.get::<String>(idx)` on a NULL column returns an error, not `""`.
///
/// # Errors
///
/// Returns `DatabaseError` if the column read fails.
pub fn get_opt_string(row: &libsql::Row, idx: i32) -> Result<Option<String>, DatabaseError> {
    match row.get::<Option<String>>(idx)? {
        Some(s) if s.is_empty() => Ok(None),
        other => Ok(other),
    }
}

/// Write-side mirror of [`get_opt_string`]: an empty string is stored as NULL.
#[must_use]
pub fn empty_to_none(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

/// Read a required timestamp column.
///
/// # Errors
///
/// Returns `DatabaseError` if the column is NULL or unparseable.
pub fn get_datetime(row: &libsql::Row, idx: i32) -> Result<DateTime<Utc>, DatabaseError> {
    parse_datetime(&row.get::<String>(idx)?)
}

/// Read a nullable timestamp column.
///
/// # Errors
///
/// Returns `DatabaseError` if a present value is unparseable.
pub fn get_opt_datetime(
    row: &libsql::Row,
    idx: i32,
) -> Result<Option<DateTime<Utc>>, DatabaseError> {
    parse_optional_datetime(get_opt_string(row, idx)?.as_deref())
}

/// Read an INTEGER 0/1 column as `bool`.
///
/// # Errors
///
/// Returns `DatabaseError` if the column read fails.
pub fn get_bool(row: &libsql::Row, idx: i32) -> Result<bool, DatabaseError> {
    Ok(row.get::<i64>(idx)? != 0)
}

/// Read a `COUNT(*)`-style column as `u64`.
///
/// # Errors
///
/// Returns `DatabaseError::Query` for a negative count.
pub fn get_count(row: &libsql::Row, idx: i32) -> Result<u64, DatabaseError> {
    let n = row.get::<i64>(idx)?;
    u64::try_from(n).map_err(|_| DatabaseError::Query(format!("negative count {n}")))
}

/// Canonical stored form of a timestamp.
#[must_use]
pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    timestamp_text(dt)
}

/// Drop sub-millisecond precision so in-memory values equal what is read back.
#[must_use]
pub fn truncate_millis(dt: DateTime<Utc>) -> DateTime<Utc> {
    dt.trunc_subsecs(3)
}

/// Round up to the next stored millisecond. Used for `<` and `>=` bounds so a
/// sub-millisecond cutoff compares the same as it would in memory.
#[must_use]
pub fn ceil_millis(dt: DateTime<Utc>) -> DateTime<Utc> {
    let floor = truncate_millis(dt);
    if floor == dt {
        floor
    } else {
        floor + chrono::Duration::milliseconds(1)
    }
}

/// Bind a `FieldValue` as a column value. Booleans become INTEGER 0/1.
#[must_use]
pub fn field_value_to_sql(value: &FieldValue) -> libsql::Value {
    match value {
        FieldValue::Null => libsql::Value::Null,
        FieldValue::Boolean(b) => libsql::Value::Integer(i64::from(*b)),
        FieldValue::Integer(n) => libsql::Value::Integer(*n),
        FieldValue::Text(s) => libsql::Value::Text(s.clone()),
    }
}

/// Bind an optional timestamp column.
#[must_use]
pub fn opt_datetime_to_sql(dt: Option<&DateTime<Utc>>) -> libsql::Value {
    dt.map_or(libsql::Value::Null, |dt| libsql::Value::Text(format_datetime(dt)))
}

/// Escape `%`, `_` and the escape character itself so user text is matched
/// literally by `LIKE ... ESCAPE '\'`.
#[must_use]
pub fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// `%{escaped}%` pattern for substring search.
#[must_use]
pub fn contains_pattern(input: &str) -> String {
    format!("%{}%", escape_like(input))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn parses_both_datetime_formats() {
        let expected = Utc.with_ymd_and_hms(2026, 2, 9, 14, 30, 0).unwrap();
        assert_eq!(parse_datetime("2026-02-09T14:30:00.000Z").unwrap(), expected);
        assert_eq!(parse_datetime("2026-02-09T14:30:00+00:00").unwrap(), expected);
        assert_eq!(parse_datetime("2026-02-09 14:30:00").unwrap(), expected);
        assert!(parse_datetime("yesterday").is_err());
    }

    #[test]
    fn empty_optional_datetime_is_none() {
        assert_eq!(parse_optional_datetime(Some("")).unwrap(), None);
        assert_eq!(parse_optional_datetime(None).unwrap(), None);
    }

    #[rstest]
    #[case("plain", "plain")]
    #[case("50%_off", r"50\%\_off")]
    #[case(r"C:\tmp", r"C:\\tmp")]
    #[case(r"\%", r"\\\%")]
    fn like_escaping(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(escape_like(input), expected);
    }

    #[test]
    fn contains_pattern_wraps_in_wildcards() {
        assert_eq!(contains_pattern("a_b"), r"%a\_b%");
    }

    #[test]
    fn booleans_bind_as_integers() {
        assert_eq!(
            field_value_to_sql(&FieldValue::Boolean(true)),
            libsql::Value::Integer(1)
        );
        assert_eq!(field_value_to_sql(&FieldValue::Null), libsql::Value::Null);
    }

    #[test]
    fn truncation_keeps_millis() {
        let dt = Utc.timestamp_opt(1_700_000_000, 123_456_789).unwrap();
        assert_eq!(truncate_millis(dt).timestamp_subsec_nanos(), 123_000_000);
    }

    #[rstest]
    #[case(123_456_789, 124_000_000)]
    #[case(123_000_000, 123_000_000)]
    #[case(999_000_001, 0)]
    fn ceiling_rounds_up_partial_millis(#[case] nanos: u32, #[case] expected: u32) {
        let dt = Utc.timestamp_opt(1_700_000_000, nanos).unwrap();
        assert_eq!(ceil_millis(dt).timestamp_subsec_nanos(), expected);
    }

    #[test]
    fn empty_strings_collapse_to_none() {
        assert_eq!(empty_to_none(Some(String::new())), None);
        assert_eq!(empty_to_none(Some(" ".into())), Some(" ".into()));
        assert_eq!(empty_to_none(None), None);
    }
}
