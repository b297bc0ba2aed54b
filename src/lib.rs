//! Per-day todo lists with calendar completion status and weekly/monthly stats.
//!
//! The [`store::CalendarStore`] owns the day records; [`stats`] and [`status`] derive
//! everything a front-end renders from it, and [`commands`] is the adapter front-ends call.

pub mod commands;
pub mod config;
pub mod dates;
pub mod events;
pub mod labels;
pub mod logging;
pub mod models;
pub mod stats;
pub mod status;
pub mod store;

pub use models::{DayRecord, DayStatus, Settings, Stats, Task};
pub use stats::{monthly_stats, percentage, weekly_stats};
pub use status::classify;
pub use store::CalendarStore;
