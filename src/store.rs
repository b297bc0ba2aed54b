use std::collections::btree_map::{BTreeMap, Iter};

use chrono::{Duration, NaiveDate, Utc};

use crate::dates::{date_key, today};
use crate::models::{DayRecord, Task};

/// In-memory calendar of day records keyed by `YYYY-MM-DD`.
///
/// The store is owned by the front-end session and handed to callers by reference;
/// there is no shared or global copy.
#[derive(Debug, Clone, Default)]
pub struct CalendarStore {
    days: BTreeMap<String, DayRecord>,
    last_id: i64,
}

impl CalendarStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds today and yesterday (local calendar) with sample tasks.
    pub fn initial_data() -> Self {
        Self::with_sample_data(today())
    }

    pub fn with_sample_data(today: NaiveDate) -> Self {
        let mut store = Self::new();
        store.insert_day(
            date_key(today),
            DayRecord::new(vec![
                Task::new("1", "Morning workout", false),
                Task::new("2", "Check email", false),
                Task::new("3", "Team meeting", false),
                Task::new("4", "Finish project", false),
                Task::new("5", "Update calendar", false),
                Task::new("6", "Call client", false),
                Task::new("7", "Read for 20 minutes", false),
            ]),
        );
        let yesterday = today - Duration::days(1);
        store.insert_day(
            date_key(yesterday),
            DayRecord::new(vec![
                Task::new("8", "Morning workout", true),
                Task::new("9", "Check email", true),
                Task::new("10", "Buy groceries", true),
                Task::new("11", "Call mom", false),
                Task::new("12", "Read for 20 minutes", true),
            ]),
        );
        store
    }

    /// Replaces the record stored under `key`. The completion count is rebuilt from the tasks.
    pub fn insert_day(&mut self, key: impl Into<String>, mut record: DayRecord) {
        record.recount();
        self.days.insert(key.into(), record);
    }

    /// Returns the record for `key`, inserting an empty one first if none exists.
    pub fn get_day(&mut self, key: &str) -> &DayRecord {
        self.day_mut(key)
    }

    /// Read-only lookup; never creates a record.
    pub fn day(&self, key: &str) -> Option<&DayRecord> {
        self.days.get(key)
    }

    pub fn add_task(&mut self, key: &str, title: &str) -> Option<Task> {
        let title = title.trim();
        if title.is_empty() {
            log::debug!("add_task ignored blank title date={key}");
            return None;
        }
        let task = Task::new(self.next_id(), title, false);
        let day = self.day_mut(key);
        day.tasks.push(task.clone());
        day.recount();
        log::debug!(
            "task added date={key} id={} completed={}/{}",
            task.id,
            day.completed(),
            day.total()
        );
        Some(task)
    }

    pub fn toggle_task(&mut self, key: &str, task_id: &str) -> bool {
        let day = self.day_mut(key);
        let toggled = match day.tasks.iter_mut().find(|task| task.id == task_id) {
            Some(task) => {
                task.completed = !task.completed;
                true
            }
            None => false,
        };
        day.recount();
        if toggled {
            log::debug!(
                "task toggled date={key} id={task_id} completed={}/{}",
                day.completed(),
                day.total()
            );
        } else {
            log::debug!("toggle_task unknown id date={key} id={task_id}");
        }
        toggled
    }

    pub fn delete_task(&mut self, key: &str, task_id: &str) -> bool {
        let day = self.day_mut(key);
        let before = day.tasks.len();
        day.tasks.retain(|task| task.id != task_id);
        let removed = day.tasks.len() != before;
        day.recount();
        if removed {
            log::debug!(
                "task deleted date={key} id={task_id} completed={}/{}",
                day.completed(),
                day.total()
            );
        }
        removed
    }

    pub fn iter(&self) -> Iter<'_, String, DayRecord> {
        self.days.iter()
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    fn day_mut(&mut self, key: &str) -> &mut DayRecord {
        if !self.days.contains_key(key) {
            log::debug!("day record created date={key}");
        }
        self.days.entry(key.to_string()).or_default()
    }

    // Millisecond clock, bumped past the previous id so rapid additions stay unique.
    fn next_id(&mut self) -> String {
        let now = Utc::now().timestamp_millis();
        self.last_id = std::cmp::max(now, self.last_id + 1);
        self.last_id.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const DAY: &str = "2024-01-01";

    fn assert_counter_consistent(store: &CalendarStore, key: &str) {
        let day = store.day(key).expect("day exists");
        let expected = day.tasks.iter().filter(|task| task.completed).count();
        assert_eq!(day.completed(), expected);
    }

    fn store_with(tasks: Vec<Task>) -> CalendarStore {
        let mut store = CalendarStore::new();
        store.insert_day(DAY, DayRecord::new(tasks));
        store
    }

    #[test]
    fn get_day_creates_missing_record_once() {
        let mut store = CalendarStore::new();
        assert!(store.day(DAY).is_none());

        let day = store.get_day(DAY);
        assert!(day.tasks.is_empty());
        assert_eq!(day.completed(), 0);
        assert_eq!(store.len(), 1);

        store.get_day(DAY);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn add_task_trims_title_and_appends_in_order() {
        let mut store = CalendarStore::new();
        let first = store.add_task(DAY, "  write report ").expect("task created");
        let second = store.add_task(DAY, "review").expect("task created");

        assert_eq!(first.title, "write report");
        assert!(!first.completed);
        let day = store.day(DAY).unwrap();
        let ids: Vec<_> = day.tasks.iter().map(|task| task.id.as_str()).collect();
        assert_eq!(ids, vec![first.id.as_str(), second.id.as_str()]);
        assert_eq!(day.completed(), 0);
    }

    #[test]
    fn add_task_rejects_blank_titles_without_side_effects() {
        let mut store = store_with(vec![Task::new("a", "A", true)]);
        let before = store.day(DAY).cloned();

        assert!(store.add_task(DAY, "").is_none());
        assert!(store.add_task(DAY, "   ").is_none());
        assert!(store.add_task(DAY, "\t\n").is_none());

        assert_eq!(store.day(DAY).cloned(), before);
    }

    #[test]
    fn add_task_ids_are_unique_even_in_a_burst() {
        let mut store = CalendarStore::new();
        let ids: HashSet<_> = (0..200)
            .map(|i| store.add_task(DAY, &format!("task {i}")).unwrap().id)
            .collect();
        assert_eq!(ids.len(), 200);
    }

    #[test]
    fn toggle_task_twice_restores_previous_state() {
        let mut store = store_with(vec![Task::new("a", "A", false), Task::new("b", "B", true)]);

        assert!(store.toggle_task(DAY, "a"));
        assert_eq!(store.day(DAY).unwrap().completed(), 2);
        assert!(store.day(DAY).unwrap().tasks[0].completed);

        assert!(store.toggle_task(DAY, "a"));
        let day = store.day(DAY).unwrap();
        assert_eq!(day.completed(), 1);
        assert!(!day.tasks[0].completed);
    }

    #[test]
    fn toggle_and_delete_unknown_ids_are_no_ops() {
        let mut store = store_with(vec![Task::new("a", "A", true)]);
        let before = store.day(DAY).cloned();

        assert!(!store.toggle_task(DAY, "missing"));
        assert!(!store.delete_task(DAY, "missing"));
        assert_eq!(store.day(DAY).cloned(), before);

        // Unknown day: record is created lazily, nothing else happens.
        assert!(!store.toggle_task("2024-02-02", "a"));
        assert_eq!(store.day("2024-02-02"), Some(&DayRecord::default()));
    }

    #[test]
    fn delete_task_recomputes_completed_count() {
        let mut store = store_with(vec![Task::new("a", "A", true), Task::new("b", "B", false)]);
        assert!(store.delete_task(DAY, "a"));
        let day = store.day(DAY).unwrap();
        assert_eq!(day.total(), 1);
        assert_eq!(day.completed(), 0);
        assert!(!store.delete_task(DAY, "a"));
    }

    #[test]
    fn insert_day_repairs_stale_counter() {
        let mut store = CalendarStore::new();
        let stale: DayRecord = serde_json::from_value(serde_json::json!({
            "tasks": [{ "id": "a", "title": "A", "completed": true }],
            "completed": 7
        }))
        .expect("record should deserialize");
        assert_eq!(stale.completed(), 7);
        store.insert_day(DAY, stale);
        assert_counter_consistent(&store, DAY);
    }

    #[test]
    fn counter_stays_consistent_across_mixed_operations() {
        let mut store = CalendarStore::new();
        let mut ids = Vec::new();
        for i in 0..6 {
            ids.push(store.add_task(DAY, &format!("task {i}")).unwrap().id);
            assert_counter_consistent(&store, DAY);
        }
        for id in ids.iter().step_by(2) {
            store.toggle_task(DAY, id);
            assert_counter_consistent(&store, DAY);
        }
        store.delete_task(DAY, &ids[0]);
        assert_counter_consistent(&store, DAY);
        store.delete_task(DAY, &ids[1]);
        assert_counter_consistent(&store, DAY);
        store.toggle_task(DAY, &ids[0]);
        assert_counter_consistent(&store, DAY);
        store.add_task(DAY, " ");
        assert_counter_consistent(&store, DAY);

        let day = store.day(DAY).unwrap();
        assert_eq!(day.total(), 4);
        assert_eq!(day.completed(), 2);
    }

    #[test]
    fn end_to_end_toggle_add_delete_scenario() {
        let mut store = store_with(vec![Task::new("A", "A", false), Task::new("B", "B", false)]);

        assert!(store.toggle_task(DAY, "A"));
        assert_eq!(store.get_day(DAY).completed(), 1);

        store.add_task(DAY, "C").expect("task created");
        assert_eq!(store.get_day(DAY).total(), 3);
        assert_eq!(store.get_day(DAY).completed(), 1);

        assert!(store.delete_task(DAY, "B"));
        assert_eq!(store.get_day(DAY).total(), 2);
        assert_eq!(store.get_day(DAY).completed(), 1);

        assert_eq!(
            crate::status::classify(store.get_day(DAY)),
            crate::models::DayStatus::Partial
        );
    }

    #[test]
    fn sample_data_seeds_today_and_yesterday() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let store = CalendarStore::with_sample_data(today);
        assert_eq!(store.len(), 2);

        let today_record = store.day("2024-03-01").expect("today seeded");
        assert_eq!(today_record.total(), 7);
        assert_eq!(today_record.completed(), 0);

        let yesterday_record = store.day("2024-02-29").expect("yesterday seeded");
        assert_eq!(yesterday_record.total(), 5);
        assert_eq!(yesterday_record.completed(), 4);
    }

    #[test]
    fn new_ids_do_not_collide_with_seeded_ids() {
        let mut store = CalendarStore::initial_data();
        let key = crate::dates::today_key();
        let task = store.add_task(&key, "extra").unwrap();
        let day = store.day(&key).unwrap();
        assert_eq!(day.tasks.iter().filter(|t| t.id == task.id).count(), 1);
        assert_eq!(day.total(), 8);
    }
}
