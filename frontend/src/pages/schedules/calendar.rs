use std::collections::{BTreeMap, BTreeSet};

use chrono::{Datelike, Duration, NaiveDate};

use crate::{
    api::{CopyScheduleRequest, ScheduleEntry, ScheduleMap},
    utils::time::{first_of_month, last_of_month, year_month},
};

/// Days with more entries than this collapse into a summary.
pub const INLINE_LIMIT: usize = 2;

pub fn shift_label(shift_type_id: i64) -> &'static str {
    match shift_type_id {
        1 => "早班",
        2 => "中班",
        3 => "晚班",
        _ => "排班",
    }
}

pub fn shift_tone(shift_type_id: i64) -> &'static str {
    match shift_type_id {
        1 => "bg-status-success-bg text-status-success-text border border-status-success-border",
        2 => "bg-status-warning-bg text-status-warning-text border border-status-warning-border",
        3 => "bg-status-error-bg text-status-error-text border border-status-error-border",
        _ => "bg-surface-muted text-fg-muted border border-border",
    }
}

pub fn status_label(status: i32) -> &'static str {
    if status == 1 {
        "已安排"
    } else {
        "待确认"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub in_month: bool,
    pub is_weekend: bool,
}

/// Monday-first weeks covering the whole month, padded with the
/// neighbouring months' days.
pub fn month_grid(year: i32, month: u32) -> Vec<[CalendarDay; 7]> {
    let (Some(first), Some(last)) = (first_of_month(year, month), last_of_month(year, month)) else {
        return Vec::new();
    };
    let mut cursor = first - Duration::days(first.weekday().num_days_from_monday() as i64);
    let mut weeks = Vec::new();
    while cursor <= last {
        let week = std::array::from_fn(|offset| {
            let date = cursor + Duration::days(offset as i64);
            CalendarDay {
                date,
                in_month: year_month(date) == (year, month),
                is_weekend: offset >= 5,
            }
        });
        weeks.push(week);
        cursor += Duration::days(7);
    }
    weeks
}

#[derive(Debug, Clone, PartialEq)]
pub enum DayContent {
    Empty,
    Inline(Vec<ScheduleEntry>),
    /// `(shift label, count)` badges plus the day total.
    Summary { badges: Vec<(&'static str, usize)>, total: usize },
}

pub fn entries_for(map: &ScheduleMap, date: NaiveDate) -> Vec<ScheduleEntry> {
    map.get(&date).cloned().unwrap_or_default()
}

pub fn day_content(entries: Vec<ScheduleEntry>) -> DayContent {
    if entries.is_empty() {
        DayContent::Empty
    } else if entries.len() <= INLINE_LIMIT {
        DayContent::Inline(entries)
    } else {
        let total = entries.len();
        let badges = count_by_shift(&entries)
            .into_iter()
            .map(|(shift_type_id, count)| (shift_label(shift_type_id), count))
            .collect();
        DayContent::Summary { badges, total }
    }
}

fn count_by_shift(entries: &[ScheduleEntry]) -> BTreeMap<i64, usize> {
    let mut counts = BTreeMap::new();
    for entry in entries {
        *counts.entry(entry.shift_type_id).or_insert(0) += 1;
    }
    counts
}

pub fn badge_text(label: &str, count: usize) -> String {
    format!("{} ×{}", label, count)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DayStats {
    pub total: usize,
    pub employees: usize,
    pub shift_types: usize,
}

pub fn day_stats(entries: &[ScheduleEntry]) -> DayStats {
    let employees: BTreeSet<i64> = entries.iter().map(|entry| entry.employee_id).collect();
    DayStats {
        total: entries.len(),
        employees: employees.len(),
        shift_types: count_by_shift(entries).len(),
    }
}

/// Entries grouped by shift type, in shift-type order.
pub fn group_by_shift(entries: &[ScheduleEntry]) -> Vec<(i64, Vec<ScheduleEntry>)> {
    let mut groups: BTreeMap<i64, Vec<ScheduleEntry>> = BTreeMap::new();
    for entry in entries {
        groups.entry(entry.shift_type_id).or_default().push(entry.clone());
    }
    groups.into_iter().collect()
}

pub fn day_title(date: NaiveDate) -> String {
    const WEEKDAYS: [&str; 7] = ["星期一", "星期二", "星期三", "星期四", "星期五", "星期六", "星期日"];
    format!(
        "{} ({})",
        date.format("%Y年%m月%d日"),
        WEEKDAYS[date.weekday().num_days_from_monday() as usize]
    )
}

/// Copies the entry's month onto the target day's month for that employee.
pub fn copy_request(entry: &ScheduleEntry, target: NaiveDate) -> CopyScheduleRequest {
    let (source_year, source_month) = year_month(entry.start_date);
    let (target_year, target_month) = year_month(target);
    CopyScheduleRequest {
        source_year,
        source_month,
        target_year,
        target_month,
        employee_ids: vec![entry.employee_id],
    }
}

pub fn entry_label(entry: &ScheduleEntry) -> String {
    format!(
        "{} - {}",
        entry.employee_name.as_deref().unwrap_or("员工"),
        entry
            .shift_type_name
            .as_deref()
            .unwrap_or_else(|| shift_label(entry.shift_type_id))
    )
}

#[cfg(test)]
pub(crate) fn entry(id: i64, employee_id: i64, shift_type_id: i64, day: NaiveDate) -> ScheduleEntry {
    ScheduleEntry {
        id,
        employee_id,
        employee_name: Some(format!("员工{}", employee_id)),
        shift_type_id,
        shift_type_name: None,
        start_date: day,
        end_date: day,
        status: 1,
        conflict: None,
    }
}
