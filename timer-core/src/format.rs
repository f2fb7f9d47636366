/// Format milliseconds as "MM:SS.cc" (centiseconds, truncated).
///
/// Negative input reads as zero. Minutes are not wrapped into hours, so the
/// minutes field grows past two digits for long stopwatch runs.
pub fn format_duration(ms: i64) -> String {
    let ms = ms.max(0) as u64;
    let cs = (ms % 1000) / 10;
    let total_secs = ms / 1000;
    let m = total_secs / 60;
    let s = total_secs % 60;
    format!("{:02}:{:02}.{:02}", m, s, cs)
}

/// Same as [`format_duration`] for unsigned readings.
pub fn format_millis(ms: u64) -> String {
    format_duration(i64::try_from(ms).unwrap_or(i64::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_zero() {
        assert_eq!(format_duration(0), "00:00.00");
        assert_eq!(format_millis(0), "00:00.00");
    }

    #[test]
    fn test_format_truncates_centiseconds() {
        assert_eq!(format_duration(9), "00:00.00");
        assert_eq!(format_duration(1_239), "00:01.23");
        assert_eq!(format_duration(59_999), "00:59.99");
    }

    #[test]
    fn test_format_minutes_roll() {
        assert_eq!(format_duration(60_000), "01:00.00");
        assert_eq!(format_duration(30_000), "00:30.00");
        assert_eq!(format_duration(754_560), "12:34.56");
    }

    #[test]
    fn test_format_minutes_unbounded() {
        assert_eq!(format_duration(100 * 60_000), "100:00.00");
        assert!(format_millis(u64::MAX).len() > 8);
    }

    #[test]
    fn test_format_negative_clamps() {
        assert_eq!(format_duration(-1), "00:00.00");
        assert_eq!(format_duration(i64::MIN), "00:00.00");
    }

    #[test]
    fn test_format_matches_field_rules() {
        for ms in [0i64, 7, 10, 999, 1_000, 61_010, 3_599_990, 3_600_000, 86_399_999] {
            let cs = (ms % 1000) / 10;
            let ss = (ms / 1000) % 60;
            let mm = ms / 1000 / 60;
            assert_eq!(format_duration(ms), format!("{:02}:{:02}.{:02}", mm, ss, cs));
        }
    }
}
