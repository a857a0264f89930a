//! Display formatting for elapsed time and minute amounts.

/// Format elapsed seconds as `"1h 2m 5s"`, dropping the hour part
/// while it is zero.
pub fn format_elapsed(seconds: u64) -> String {
    let hrs = seconds / 3600;
    let mins = (seconds % 3600) / 60;
    let secs = seconds % 60;
    if hrs > 0 {
        format!("{hrs}h {mins}m {secs}s")
    } else {
        format!("{mins}m {secs}s")
    }
}

/// Format a minute amount as `"2h 0m"`, or just `"45m"` under an hour.
pub fn format_minutes(minutes: u32) -> String {
    let hrs = minutes / 60;
    let mins = minutes % 60;
    if hrs > 0 {
        format!("{hrs}h {mins}m")
    } else {
        format!("{mins}m")
    }
}

/// Compact clock face for the timer banner: `"12:05"` or `"1:02:05"`.
pub fn clock_face(seconds: u64) -> String {
    let hrs = seconds / 3600;
    let mins = (seconds % 3600) / 60;
    let secs = seconds % 60;
    if hrs > 0 {
        format!("{hrs}:{mins:02}:{secs:02}")
    } else {
        format!("{mins}:{secs:02}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_under_an_hour_omits_hours() {
        assert_eq!(format_elapsed(0), "0m 0s");
        assert_eq!(format_elapsed(125), "2m 5s");
        assert_eq!(format_elapsed(3599), "59m 59s");
    }

    #[test]
    fn elapsed_over_an_hour_includes_hours() {
        assert_eq!(format_elapsed(3600), "1h 0m 0s");
        assert_eq!(format_elapsed(3725), "1h 2m 5s");
    }

    #[test]
    fn minutes_roll_into_hours() {
        assert_eq!(format_minutes(45), "45m");
        assert_eq!(format_minutes(120), "2h 0m");
        assert_eq!(format_minutes(125), "2h 5m");
    }

    #[test]
    fn clock_face_pads_trailing_fields() {
        assert_eq!(clock_face(65), "1:05");
        assert_eq!(clock_face(725), "12:05");
        assert_eq!(clock_face(3725), "1:02:05");
    }
}
