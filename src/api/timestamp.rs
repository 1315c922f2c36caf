// Lenient timestamp parsing for response fields.
//
// The backend serialises `LocalDateTime` either as ISO-8601
// (`2024-05-01T08:30:00`) or with a space separator, depending on its
// Jackson setup. Requests always go out in ISO form.

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer};

const FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

pub fn parse(raw: &str) -> Option<NaiveDateTime> {
    FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
}

/// `deserialize_with` helper for `Option<NaiveDateTime>` fields.
pub fn deserialize_opt<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => parse(s)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp `{s}`"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_iso_and_space_separated() {
        let iso = parse("2024-05-01T08:30:00").unwrap();
        let spaced = parse("2024-05-01 08:30:00").unwrap();
        assert_eq!(iso, spaced);
    }

    #[test]
    fn parses_fractional_seconds() {
        assert!(parse("2024-05-01T08:30:00.123").is_some());
    }

    #[test]
    fn rejects_dates_without_time() {
        assert!(parse("2024-05-01").is_none());
    }
}
