use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub completed: bool,
}

impl Task {
    pub fn new(id: impl Into<String>, title: impl Into<String>, completed: bool) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            completed,
        }
    }
}

/// Tasks for one calendar date.
///
/// `completed` caches the number of completed tasks. It is private and only written by
/// [`DayRecord::recount`], which the store calls after every change to `tasks`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct DayRecord {
    pub tasks: Vec<Task>,
    completed: usize,
}

impl DayRecord {
    pub fn new(tasks: Vec<Task>) -> Self {
        let mut record = Self {
            tasks,
            completed: 0,
        };
        record.recount();
        record
    }

    pub fn completed(&self) -> usize {
        self.completed
    }

    pub fn total(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_all_completed(&self) -> bool {
        !self.tasks.is_empty() && self.completed == self.tasks.len()
    }

    pub(crate) fn recount(&mut self) {
        self.completed = self.tasks.iter().filter(|task| task.completed).count();
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct Stats {
    pub completed: usize,
    pub total: usize,
}

impl Stats {
    pub fn percentage(&self) -> u32 {
        crate::stats::percentage(self.completed, self.total)
    }

    pub(crate) fn add_day(&mut self, day: &DayRecord) {
        self.completed += day.completed();
        self.total += day.total();
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DayStatus {
    Empty,
    Pending,
    Partial,
    Completed,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct Settings {
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_seed_sample_data")]
    pub seed_sample_data: bool,
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            language: default_language(),
            seed_sample_data: default_seed_sample_data(),
            log_dir: None,
        }
    }
}

fn default_language() -> String {
    "auto".to_string()
}

fn default_seed_sample_data() -> bool {
    true
}
