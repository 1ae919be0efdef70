//! Response-shape adaptation for list and calendar endpoints.
//!
//! The backend answers list calls as a bare array, `{ "data": [...] }` or
//! `{ "list": [...] }` (reports also use `{ "reports": [...] }`). Every
//! service decodes through [`ListEnvelope`] so callers only ever see a
//! flat `Vec`.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::Deserialize;

use super::types::ScheduleEntry;

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ListEnvelope<T> {
    Bare(Vec<T>),
    Data { data: Vec<T> },
    List { list: Vec<T> },
    Reports { reports: Vec<T> },
    Items { items: Vec<T> },
}

impl<T> ListEnvelope<T> {
    pub fn into_items(self) -> Vec<T> {
        match self {
            ListEnvelope::Bare(items)
            | ListEnvelope::Data { data: items }
            | ListEnvelope::List { list: items }
            | ListEnvelope::Reports { reports: items }
            | ListEnvelope::Items { items } => items,
        }
    }
}

/// Day → entries map for one calendar month, keyed by ISO date.
pub type ScheduleMap = BTreeMap<NaiveDate, Vec<ScheduleEntry>>;

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum MonthShape {
    Keyed(BTreeMap<NaiveDate, Vec<ScheduleEntry>>),
    Flat(Vec<ScheduleEntry>),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ScheduleMonthEnvelope {
    Wrapped { data: MonthShape },
    Bare(MonthShape),
}

impl ScheduleMonthEnvelope {
    /// Normalizes either a keyed map or a flat list into a day map
    /// restricted to `year`/`month`. Flat entries spanning several days
    /// are listed under every day they cover.
    pub fn into_month(self, year: i32, month: u32) -> ScheduleMap {
        let shape = match self {
            ScheduleMonthEnvelope::Wrapped { data } | ScheduleMonthEnvelope::Bare(data) => data,
        };
        match shape {
            MonthShape::Keyed(map) => map
                .into_iter()
                .filter(|(day, _)| day.year() == year && day.month() == month)
                .collect(),
            MonthShape::Flat(entries) => spread_over_month(entries, year, month),
        }
    }
}

fn spread_over_month(entries: Vec<ScheduleEntry>, year: i32, month: u32) -> ScheduleMap {
    let mut map = ScheduleMap::new();
    for entry in entries {
        let mut day = entry.start_date;
        while day <= entry.end_date {
            if day.year() == year && day.month() == month {
                map.entry(day).or_default().push(entry.clone());
            }
            match day.succ_opt() {
                Some(next) => day = next,
                None => break,
            }
        }
    }
    map
}
