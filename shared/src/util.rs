use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

/// Current UTC timestamp in milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Generate a Snowflake-style i64 for use as resource ID.
///
/// Layout (53 bits, fits in JavaScript's Number.MAX_SAFE_INTEGER):
///   - 41 bits: milliseconds since 2024-01-01 UTC (~69 years)
///   - 12 bits: random (4096 values per ms)
pub fn snowflake_id() -> i64 {
    use rand::Rng;
    // Custom epoch: 2024-01-01 00:00:00 UTC
    const EPOCH_MS: i64 = 1_704_067_200_000;
    let now = now_millis();
    let ts = (now - EPOCH_MS) & 0x1FF_FFFF_FFFF; // 41 bits
    let rand_bits: i64 = rand::thread_rng().gen_range(0..0x1000); // 12 bits
    (ts << 12) | rand_bits
}

/// Date format used by every response DTO
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Format a timestamp as `yyyy-MM-dd`, dropping the time of day
pub fn format_date(value: &NaiveDateTime) -> String {
    value.format(DATE_FORMAT).to_string()
}

/// Parse a client-supplied date.
///
/// Accepts `yyyy-MM-dd` (midnight), a naive `yyyy-MM-ddTHH:MM:SS[.f]`
/// timestamp, or RFC 3339. Offsets are dropped and the wall-clock value kept.
pub fn parse_date(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, DATE_FORMAT) {
        return Some(date.and_time(NaiveTime::MIN));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f") {
        return Some(dt);
    }
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.naive_local())
}

/// Serde adapters for `yyyy-MM-dd` dates carried as `NaiveDateTime`
pub mod serde_date {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_date(value))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_date(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid date: {raw}")))
    }

    /// Same as the parent module, for optional fields
    pub mod option {
        use chrono::NaiveDateTime;
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S>(value: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match value {
                Some(v) => serializer.serialize_str(&super::super::format_date(v)),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
        where
            D: Deserializer<'de>,
        {
            match Option::<String>::deserialize(deserializer)? {
                Some(raw) if !raw.trim().is_empty() => super::super::parse_date(&raw)
                    .map(Some)
                    .ok_or_else(|| serde::de::Error::custom(format!("invalid date: {raw}"))),
                _ => Ok(None),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date_drops_time_of_day() {
        let morning = parse_date("2024-01-15T00:00:01").unwrap();
        let night = parse_date("2024-01-15T23:59:59.999").unwrap();
        assert_eq!(format_date(&morning), "2024-01-15");
        assert_eq!(format_date(&night), "2024-01-15");
    }

    #[test]
    fn test_parse_date_variants() {
        let plain = parse_date("2024-01-15").unwrap();
        assert_eq!(plain.to_string(), "2024-01-15 00:00:00");

        let spaced = parse_date("2024-01-15 08:30:00").unwrap();
        assert_eq!(format_date(&spaced), "2024-01-15");

        // Wall-clock date is kept even when the offset would roll it over in UTC
        let offset = parse_date("2024-01-15T23:30:00+09:00").unwrap();
        assert_eq!(format_date(&offset), "2024-01-15");

        assert!(parse_date("15/01/2024").is_none());
        assert!(parse_date("").is_none());
    }

    #[test]
    fn test_snowflake_ids_are_positive_and_distinct() {
        let a = snowflake_id();
        let b = snowflake_id();
        assert!(a > 0);
        assert!(b > 0);
        // 12 random bits: a collision within the same millisecond is possible but rare
        let ids: std::collections::HashSet<i64> = (0..64).map(|_| snowflake_id()).collect();
        assert!(ids.len() > 48);
    }
}
