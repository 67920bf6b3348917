use shared_kernel::warsaw_date_time::WarsawTZDateTime;

const MILLIS_PER_MINUTE: i64 = 60 * 1000;
const MINUTES_PER_HOUR: i64 = 60;
const MINUTES_PER_DAY: i64 = 24 * MINUTES_PER_HOUR;

/// Renders a floored minute count with its largest unit:
/// `2d 3h`, `2d`, `1h 15m`, `1h`, `45m`.
/// Negative counts always fall through to minutes.
fn largest_units(total_minutes: i64) -> String {
    let hours = total_minutes.div_euclid(MINUTES_PER_HOUR);
    let days = total_minutes.div_euclid(MINUTES_PER_DAY);

    if days > 0 {
        let remaining_hours = hours % 24;
        if remaining_hours > 0 {
            format!("{days}d {remaining_hours}h")
        } else {
            format!("{days}d")
        }
    } else if hours > 0 {
        let remaining_minutes = total_minutes % MINUTES_PER_HOUR;
        if remaining_minutes > 0 {
            format!("{hours}h {remaining_minutes}m")
        } else {
            format!("{hours}h")
        }
    } else {
        format!("{total_minutes}m")
    }
}

/// `in 2d 3h` for the future (and for now), `30m ago` for the past.
pub fn format_relative_time(target: &WarsawTZDateTime, now: &WarsawTZDateTime) -> String {
    let diff_ms = target.signed_duration_since(now).num_milliseconds();
    let relative = largest_units(diff_ms.abs().div_euclid(MILLIS_PER_MINUTE));
    if diff_ms < 0 {
        format!("{relative} ago")
    } else {
        format!("in {relative}")
    }
}

pub fn format_duration(start: &WarsawTZDateTime, stop: &WarsawTZDateTime) -> String {
    let diff_ms = stop.signed_duration_since(start).num_milliseconds();
    largest_units(diff_ms.div_euclid(MILLIS_PER_MINUTE))
}

#[cfg(test)]
mod tests {
    use super::{format_duration, format_relative_time};
    use chrono::NaiveDateTime;
    use rstest::rstest;
    use shared_kernel::warsaw_date_time::WarsawTZDateTime;

    fn warsaw(value: &str) -> WarsawTZDateTime {
        NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
            .map_err(|err| err.to_string())
            .and_then(WarsawTZDateTime::try_from)
            .unwrap()
    }

    #[rstest]
    #[case("2024-01-12 13:00:00", "in 2d 3h")]
    #[case("2024-01-10 09:30:00", "30m ago")]
    #[case("2024-01-10 10:45:00", "in 45m")]
    #[case("2024-01-10 12:00:00", "in 2h")]
    #[case("2024-01-10 11:20:30", "in 1h 20m")]
    #[case("2024-01-11 10:00:00", "in 1d")]
    #[case("2024-01-09 08:30:00", "1d 1h ago")]
    #[case("2024-01-10 10:00:00", "in 0m")]
    #[case("2024-01-10 09:59:30", "0m ago")]
    fn test_relative_time_uses_the_largest_unit(#[case] target: &str, #[case] expected: &str) {
        let now = warsaw("2024-01-10 10:00:00");
        assert_eq!(format_relative_time(&warsaw(target), &now), expected);
    }

    #[test]
    fn test_relative_time_spans_the_spring_clock_change() {
        // Clocks jump 02:00 -> 03:00 on 2024-03-31, so only 3 hours elapse.
        let now = warsaw("2024-03-31 00:00:00");
        assert_eq!(
            format_relative_time(&warsaw("2024-03-31 04:00:00"), &now),
            "in 3h"
        );
    }

    #[rstest]
    #[case("2024-01-10 10:00:00", "2024-01-10 11:15:00", "1h 15m")]
    #[case("2024-01-10 10:00:00", "2024-01-10 10:45:00", "45m")]
    #[case("2024-01-10 10:00:00", "2024-01-11 10:00:00", "1d")]
    #[case("2024-01-10 08:00:00", "2024-01-12 11:59:00", "2d 3h")]
    #[case("2024-01-10 10:00:00", "2024-01-10 10:00:00", "0m")]
    #[case("2024-01-10 10:16:00", "2024-01-10 10:00:00", "-16m")]
    fn test_duration_uses_the_largest_unit(
        #[case] start: &str,
        #[case] stop: &str,
        #[case] expected: &str,
    ) {
        assert_eq!(format_duration(&warsaw(start), &warsaw(stop)), expected);
    }
}
