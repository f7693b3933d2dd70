/// `1h 2m 3s`, `2m 3s` or `3s`.
pub fn format_time(seconds: i64) -> String {
    let seconds = seconds.max(0);
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    if hours > 0 {
        format!("{hours}h {minutes}m {secs}s")
    } else if minutes > 0 {
        format!("{minutes}m {secs}s")
    } else {
        format!("{secs}s")
    }
}

/// `1h 2m` or `2m`; seconds are dropped.
pub fn format_time_compact(seconds: i64) -> String {
    let seconds = seconds.max(0);
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    if hours > 0 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m")
    }
}

pub fn format_hours(seconds: i64) -> String {
    format!("{:.2}", seconds.max(0) as f64 / 3600.0)
}

/// `HH:MM:SS` for the live timer readout.
pub fn format_clock(seconds: i64) -> String {
    let seconds = seconds.max(0);
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    format!("{hours:02}:{minutes:02}:{secs:02}")
}

pub fn format_money(amount: f64) -> String {
    format!("${amount:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_time_picks_largest_unit() {
        assert_eq!(format_time(0), "0s");
        assert_eq!(format_time(59), "59s");
        assert_eq!(format_time(90), "1m 30s");
        assert_eq!(format_time(3600), "1h 0m 0s");
        assert_eq!(format_time(3723), "1h 2m 3s");
    }

    #[test]
    fn test_format_time_compact_drops_seconds() {
        assert_eq!(format_time_compact(59), "0m");
        assert_eq!(format_time_compact(150), "2m");
        assert_eq!(format_time_compact(7260), "2h 1m");
    }

    #[test]
    fn test_format_hours_two_places() {
        assert_eq!(format_hours(5400), "1.50");
        assert_eq!(format_hours(60), "0.02");
    }

    #[test]
    fn test_format_clock_pads() {
        assert_eq!(format_clock(5), "00:00:05");
        assert_eq!(format_clock(3723), "01:02:03");
        assert_eq!(format_clock(-4), "00:00:00");
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(40.0), "$40.00");
        assert_eq!(format_money(12.346), "$12.35");
    }
}
