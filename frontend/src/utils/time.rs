use chrono::{Datelike, Duration, Local, NaiveDate, NaiveDateTime, NaiveTime};

pub const WEEKDAY_LABELS: [&str; 7] = ["一", "二", "三", "四", "五", "六", "日"];

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn parse_date_input(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

/// Accepts `HH:MM` and `HH:MM:SS`.
pub fn parse_time_input(raw: &str) -> Option<NaiveTime> {
    let raw = raw.trim();
    NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .ok()
}

pub fn format_time(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

/// Renders backend timestamps as `YYYY-MM-DD HH:MM`; unknown formats pass through.
pub fn format_timestamp(raw: &str) -> String {
    let trimmed = raw.trim();
    let candidate = trimmed.split('.').next().unwrap_or(trimmed);
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(candidate, fmt).ok())
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| trimmed.to_string())
}

/// `datetime-local` inputs produce `YYYY-MM-DDTHH:MM`.
pub fn parse_datetime_input(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S"))
        .ok()
}

pub fn first_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = shift_month(year, month, 1);
    match (first_of_month(year, month), first_of_month(next_year, next_month)) {
        (Some(start), Some(next)) => (next - start).num_days() as u32,
        _ => 0,
    }
}

pub fn last_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    first_of_month(year, month).map(|start| start + Duration::days(days_in_month(year, month) as i64 - 1))
}

/// Moves `(year, month)` by `delta` months.
pub fn shift_month(year: i32, month: u32, delta: i32) -> (i32, u32) {
    let index = year * 12 + month as i32 - 1 + delta;
    (index.div_euclid(12), index.rem_euclid(12) as u32 + 1)
}

pub fn month_title(year: i32, month: u32) -> String {
    format!("{}年{}月", year, month)
}

pub fn year_month(date: NaiveDate) -> (i32, u32) {
    (date.year(), date.month())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_arithmetic_wraps_years() {
        assert_eq!(shift_month(2024, 12, 1), (2025, 1));
        assert_eq!(shift_month(2024, 1, -1), (2023, 12));
        assert_eq!(shift_month(2024, 5, -17), (2022, 12));
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(
            last_of_month(2024, 4),
            NaiveDate::from_ymd_opt(2024, 4, 30)
        );
    }

    #[test]
    fn timestamps_are_shortened() {
        assert_eq!(format_timestamp("2024-06-01T08:30:12.123"), "2024-06-01 08:30");
        assert_eq!(format_timestamp("2024-06-01 08:30:12"), "2024-06-01 08:30");
        assert_eq!(format_timestamp("yesterday"), "yesterday");
    }

    #[test]
    fn inputs_parse_browser_formats() {
        assert_eq!(parse_time_input("09:00"), NaiveTime::from_hms_opt(9, 0, 0));
        assert_eq!(parse_time_input("18:30:00"), NaiveTime::from_hms_opt(18, 30, 0));
        assert!(parse_date_input("2024-13-01").is_none());
        assert_eq!(
            parse_datetime_input("2024-05-01T09:05").map(|dt| dt.time()),
            NaiveTime::from_hms_opt(9, 5, 0)
        );
    }
}
