//! Backend timestamps come either RFC 3339 or naive (`2025-10-15T10:30:00.123456`, UTC implied).

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};

pub fn parse(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| naive.and_utc())
}

/// Lenient `Option<DateTime<Utc>>` field: unparsable values become `None`.
pub fn deserialize_option<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn naive_and_offset_forms_are_accepted() {
        let naive = parse("2025-10-15T10:30:00.123456").unwrap();
        assert_eq!((naive.hour(), naive.minute()), (10, 30));

        let offset = parse("2025-10-15T12:30:00+02:00").unwrap();
        assert_eq!(offset.hour(), 10);
        assert_eq!(offset.day(), 15);

        assert!(parse("yesterday").is_none());
    }
}
