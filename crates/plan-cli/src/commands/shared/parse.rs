use chrono::{DateTime, NaiveDate, Utc};
use plan_core::enums::TaskField;
use serde::de::DeserializeOwned;

/// Parse a snake_case enum value using serde-deserialization.
pub fn parse_enum<T>(raw: &str, field: &str) -> anyhow::Result<T>
where
    T: DeserializeOwned,
{
    let normalized = raw.replace('-', "_");
    let json = format!("\"{normalized}\"");
    serde_json::from_str(&json).map_err(|error| anyhow::anyhow!("invalid {field} '{raw}': {error}"))
}

/// Parse an RFC 3339 timestamp, or a bare `YYYY-MM-DD` as midnight UTC.
pub fn parse_when(raw: &str, field: &str) -> anyhow::Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| anyhow::anyhow!("invalid {field} '{raw}': expected RFC 3339 or YYYY-MM-DD"))
}

pub fn parse_opt_when(raw: Option<&str>, field: &str) -> anyhow::Result<Option<DateTime<Utc>>> {
    raw.map(|value| parse_when(value, field)).transpose()
}

/// Parse a tracked field name, accepting hyphens for underscores.
pub fn parse_field(raw: &str) -> anyhow::Result<TaskField> {
    TaskField::from_name(&raw.replace('-', "_")).ok_or_else(|| {
        let known = TaskField::ALL
            .iter()
            .map(|field| field.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        anyhow::anyhow!("invalid field '{raw}': expected one of {known}")
    })
}

/// Turn an absent lookup into a user-facing error.
pub fn require<T>(value: Option<T>, entity: &str, id: &str) -> anyhow::Result<T> {
    value.ok_or_else(|| anyhow::anyhow!("{entity} '{id}' not found"))
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use plan_core::enums::Priority;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parses_snake_case_enum() {
        let priority: Priority = parse_enum("high", "priority").expect("priority should parse");
        assert_eq!(priority, Priority::High);
    }

    #[test]
    fn errors_on_invalid_enum() {
        let err = parse_enum::<Priority>("urgent", "priority").expect_err("should fail");
        assert!(err.to_string().contains("invalid priority 'urgent'"));
    }

    #[test]
    fn parses_dates_and_timestamps() {
        let midnight = Utc.with_ymd_and_hms(2026, 10, 19, 0, 0, 0).unwrap();
        assert_eq!(parse_when("2026-10-19", "date").unwrap(), midnight);

        let offset = parse_when("2026-10-19T10:00:00+02:00", "date").unwrap();
        assert_eq!(offset, Utc.with_ymd_and_hms(2026, 10, 19, 8, 0, 0).unwrap());

        assert!(parse_when("next tuesday", "date").is_err());
    }

    #[test]
    fn parses_field_names_with_hyphens() {
        assert_eq!(parse_field("deleted-at").unwrap(), TaskField::DeletedAt);
        assert_eq!(parse_field("priority").unwrap(), TaskField::Priority);
        assert!(parse_field("title").is_err());
    }

    #[test]
    fn require_reports_missing_entity() {
        let err = require::<()>(None, "task", "tsk-1").unwrap_err();
        assert_eq!(err.to_string(), "task 'tsk-1' not found");
    }
}
