use chrono::DateTime;

/// Backend timestamps are RFC 3339; shown in the offset they were sent with.
pub fn timestamp(raw: &str) -> String {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(ts) => ts.format("%Y-%m-%d %H:%M:%S").to_string(),
        Err(_) => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_rfc3339_with_fraction() {
        assert_eq!(timestamp("2024-05-01T13:04:05.123456Z"), "2024-05-01 13:04:05");
        assert_eq!(timestamp("2024-05-01T13:04:05+02:00"), "2024-05-01 13:04:05");
    }

    #[test]
    fn unparsable_is_shown_raw() {
        assert_eq!(timestamp("yesterday"), "yesterday");
    }
}
