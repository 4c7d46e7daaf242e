//! Serde adapter for `created_at`/`updated_at` fields.
//!
//! Emits `YYYY-MM-DDTHH:MM:SSZ` and accepts any RFC 3339 timestamp on input.
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serializer};

pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format(value))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|value| value.with_timezone(&Utc))
        .map_err(serde::de::Error::custom)
}

pub fn format(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn formats_with_seconds_and_z_suffix() {
        let value = Utc.with_ymd_and_hms(2025, 1, 15, 10, 20, 30).unwrap();
        assert_eq!(format(&value), "2025-01-15T10:20:30Z");
    }

    #[test]
    fn parses_offset_timestamps_into_utc() {
        let mut de = serde_json::Deserializer::from_str("\"2025-01-15T12:20:30+02:00\"");
        let parsed = deserialize(&mut de).expect("timestamp");
        assert_eq!(parsed, Utc.with_ymd_and_hms(2025, 1, 15, 10, 20, 30).unwrap());
    }
}
