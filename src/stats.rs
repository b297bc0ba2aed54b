use chrono::{Datelike, NaiveDate};

use crate::dates::{parse_date_key, week_start};
use crate::models::Stats;
use crate::store::CalendarStore;

/// Totals over every day on or after the Sunday starting `reference`'s week.
///
/// There is no upper bound: days later in the calendar (including future weeks)
/// already present in the store are counted too.
pub fn weekly_stats(store: &CalendarStore, reference: NaiveDate) -> Stats {
    let start = week_start(reference);
    fold_days(store, |date| date >= start)
}

pub fn monthly_stats(store: &CalendarStore, reference: NaiveDate) -> Stats {
    fold_days(store, |date| {
        date.year() == reference.year() && date.month() == reference.month()
    })
}

/// `round(100 * completed / total)`, halves rounded up; 0 for an empty total.
pub fn percentage(completed: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    let completed = completed as u64;
    let total = total as u64;
    ((200 * completed + total) / (2 * total)) as u32
}

fn fold_days(store: &CalendarStore, include: impl Fn(NaiveDate) -> bool) -> Stats {
    let mut stats = Stats::default();
    for (key, day) in store.iter() {
        let Some(date) = parse_date_key(key) else {
            log::debug!("stats skipped unparseable date key={key:?}");
            continue;
        };
        if include(date) {
            stats.add_day(day);
        }
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DayRecord, Task};

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn day(completed: usize, total: usize) -> DayRecord {
        DayRecord::new(
            (0..total)
                .map(|i| Task::new(i.to_string(), format!("task-{i}"), i < completed))
                .collect(),
        )
    }

    #[test]
    fn percentage_rounds_to_nearest_integer() {
        assert_eq!(percentage(0, 0), 0);
        assert_eq!(percentage(3, 4), 75);
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(2, 3), 67);
        assert_eq!(percentage(1, 8), 13);
        assert_eq!(percentage(5, 5), 100);
        assert_eq!(percentage(0, 9), 0);
    }

    #[test]
    fn stats_on_empty_store_are_zero() {
        let store = CalendarStore::new();
        let reference = ymd(2024, 1, 10);
        assert_eq!(weekly_stats(&store, reference), Stats::default());
        assert_eq!(monthly_stats(&store, reference), Stats::default());
        assert_eq!(weekly_stats(&store, reference).percentage(), 0);
    }

    #[test]
    fn monthly_stats_only_sums_reference_month_and_year() {
        let mut store = CalendarStore::new();
        store.insert_day("2024-01-03", day(1, 2));
        store.insert_day("2024-01-31", day(3, 3));
        store.insert_day("2024-02-01", day(4, 4));
        store.insert_day("2023-01-15", day(1, 1));

        let stats = monthly_stats(&store, ymd(2024, 1, 20));
        assert_eq!(stats, Stats { completed: 4, total: 5 });
        assert_eq!(stats.percentage(), 80);
    }

    #[test]
    fn weekly_stats_start_on_sunday() {
        let mut store = CalendarStore::new();
        // 2024-01-07 is a Sunday; 2024-01-06 belongs to the previous week.
        store.insert_day("2024-01-06", day(5, 5));
        store.insert_day("2024-01-07", day(1, 2));
        store.insert_day("2024-01-10", day(2, 3));

        let stats = weekly_stats(&store, ymd(2024, 1, 10));
        assert_eq!(stats, Stats { completed: 3, total: 5 });

        // A Saturday reference still starts on the same Sunday.
        assert_eq!(weekly_stats(&store, ymd(2024, 1, 13)), stats);
    }

    #[test]
    fn weekly_stats_include_later_days_without_upper_bound() {
        let mut store = CalendarStore::new();
        store.insert_day("2024-01-08", day(1, 1));
        store.insert_day("2024-03-01", day(0, 4));

        let stats = weekly_stats(&store, ymd(2024, 1, 8));
        assert_eq!(stats, Stats { completed: 1, total: 5 });
    }

    #[test]
    fn unparseable_keys_are_skipped_without_aborting() {
        let mut store = CalendarStore::new();
        store.insert_day("garbage", day(2, 2));
        store.insert_day("2024-1-9", day(1, 1));
        store.insert_day("2024-01-09", day(1, 3));
        store.insert_day("zzzz", day(1, 1));

        let reference = ymd(2024, 1, 9);
        assert_eq!(weekly_stats(&store, reference), Stats { completed: 1, total: 3 });
        assert_eq!(monthly_stats(&store, reference), Stats { completed: 1, total: 3 });
    }

    #[test]
    fn sample_data_stats() {
        // 2024-03-06 is a Wednesday, so yesterday is in the same week and month.
        let today = ymd(2024, 3, 6);
        let store = CalendarStore::with_sample_data(today);
        let weekly = weekly_stats(&store, today);
        assert_eq!(weekly, Stats { completed: 4, total: 12 });
        assert_eq!(weekly.percentage(), 33);
        assert_eq!(monthly_stats(&store, today), weekly);

        // On the 1st, yesterday falls into the previous month.
        let first = ymd(2024, 3, 1);
        let store = CalendarStore::with_sample_data(first);
        assert_eq!(monthly_stats(&store, first), Stats { completed: 0, total: 7 });
    }
}
