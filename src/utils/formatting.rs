//! Formatting utilities used for CLI outputs.

use chrono::TimeDelta;
use unicode_width::UnicodeWidthStr;

pub fn bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}

/// Pad to `width` terminal columns, so wide characters line up.
pub fn pad_right(s: &str, width: usize) -> String {
    let fill = width.saturating_sub(UnicodeWidthStr::width(s));
    format!("{}{}", s, " ".repeat(fill))
}

/// `02h 25m` or, with `short`, `02:25`.
pub fn format_hours(d: TimeDelta, short: bool) -> String {
    let mins = d.num_minutes();
    let sign = if mins < 0 { "-" } else { "" };
    let abs_m = mins.abs();
    let hours = abs_m / 60;
    let minutes = abs_m % 60;

    if short {
        format!("{}{:02}:{:02}", sign, hours, minutes)
    } else {
        format!("{}{:02}h {:02}m", sign, hours, minutes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_hours_long_and_short() {
        let d = TimeDelta::minutes(145);
        assert_eq!(format_hours(d, false), "02h 25m");
        assert_eq!(format_hours(d, true), "02:25");
        assert_eq!(format_hours(TimeDelta::zero(), false), "00h 00m");
    }

    #[test]
    fn padding_counts_columns() {
        assert_eq!(pad_right("ab", 4), "ab  ");
        assert_eq!(pad_right("日本", 5), "日本 ");
    }
}
