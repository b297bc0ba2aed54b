use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::dates::{date_key, days_in_month};
use crate::models::{DayRecord, DayStatus};
use crate::store::CalendarStore;

pub fn classify(day: &DayRecord) -> DayStatus {
    let total = day.total();
    if total == 0 {
        DayStatus::Empty
    } else if day.completed() >= total {
        DayStatus::Completed
    } else if day.completed() > 0 {
        DayStatus::Partial
    } else {
        DayStatus::Pending
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct DayCell {
    pub date_key: String,
    pub day: u32,
    pub status: DayStatus,
}

/// Status of every day in `year`/`month` for the calendar picker.
///
/// Read-only: days missing from the store are reported as empty and are not created.
pub fn month_overview(store: &CalendarStore, year: i32, month: u32) -> Vec<DayCell> {
    (1..=days_in_month(year, month))
        .filter_map(|day| NaiveDate::from_ymd_opt(year, month, day))
        .map(|date| {
            let key = date_key(date);
            let status = store.day(&key).map(classify).unwrap_or(DayStatus::Empty);
            DayCell {
                day: date.day(),
                date_key: key,
                status,
            }
        })
        .collect()
}
