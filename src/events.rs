use serde::Serialize;

use crate::models::{DayStatus, Stats, Task};

pub const EVENT_STATE_UPDATED: &str = "state_updated";

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct DayView {
    pub date_key: String,
    pub tasks: Vec<Task>,
    pub completed: usize,
    pub total: usize,
    pub status: DayStatus,
    pub all_completed: bool,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct StatsView {
    pub weekly: Stats,
    pub monthly: Stats,
    pub weekly_percentage: u32,
    pub monthly_percentage: u32,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StatePayload {
    pub date_key: String,
    pub day: DayView,
    pub stats: StatsView,
}
