//! Front-end adapter over the calendar store.
//!
//! Every front-end (terminal, mobile, web) drives the engine through these commands and
//! renders the returned views. Mutations also push a [`StatePayload`] to the host so it
//! can redraw the calendar, the stats cards and the task list in one go.

use chrono::NaiveDate;

use crate::dates::parse_date_key;
use crate::events::{DayView, StatePayload, StatsView};
use crate::models::{DayRecord, Task};
use crate::stats::{monthly_stats, weekly_stats};
use crate::status::{classify, month_overview, DayCell};
use crate::store::CalendarStore;

#[derive(Debug, serde::Serialize)]
pub struct CommandResult<T> {
    pub ok: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

/// Host services a front-end provides to the commands.
pub trait CommandCtx {
    /// Local calendar date used as the stats reference.
    fn today(&self) -> NaiveDate;
    fn emit_state_updated(&self, payload: StatePayload);
}

fn ok<T>(data: T) -> CommandResult<T> {
    CommandResult {
        ok: true,
        data: Some(data),
        error: None,
    }
}

fn err<T>(message: &str) -> CommandResult<T> {
    CommandResult {
        ok: false,
        data: None,
        error: Some(message.to_string()),
    }
}

fn day_view(date_key: &str, day: &DayRecord) -> DayView {
    DayView {
        date_key: date_key.to_string(),
        tasks: day.tasks.clone(),
        completed: day.completed(),
        total: day.total(),
        status: classify(day),
        all_completed: day.is_all_completed(),
    }
}

fn stats_view(store: &CalendarStore, reference: NaiveDate) -> StatsView {
    let weekly = weekly_stats(store, reference);
    let monthly = monthly_stats(store, reference);
    StatsView {
        weekly,
        monthly,
        weekly_percentage: weekly.percentage(),
        monthly_percentage: monthly.percentage(),
    }
}

fn notify(ctx: &impl CommandCtx, store: &mut CalendarStore, date_key: &str) {
    let day = day_view(date_key, store.get_day(date_key));
    let payload = StatePayload {
        date_key: date_key.to_string(),
        day,
        stats: stats_view(store, ctx.today()),
    };
    ctx.emit_state_updated(payload);
}

pub fn load_day(store: &mut CalendarStore, date_key: &str) -> CommandResult<DayView> {
    if parse_date_key(date_key).is_none() {
        return err("invalid date");
    }
    ok(day_view(date_key, store.get_day(date_key)))
}

pub fn add_task(
    ctx: &impl CommandCtx,
    store: &mut CalendarStore,
    date_key: &str,
    title: &str,
) -> CommandResult<Option<Task>> {
    if parse_date_key(date_key).is_none() {
        return err("invalid date");
    }
    let task = store.add_task(date_key, title);
    if task.is_some() {
        notify(ctx, store, date_key);
    }
    ok(task)
}

pub fn toggle_task(
    ctx: &impl CommandCtx,
    store: &mut CalendarStore,
    date_key: &str,
    task_id: &str,
) -> CommandResult<bool> {
    if parse_date_key(date_key).is_none() {
        return err("invalid date");
    }
    if !store.toggle_task(date_key, task_id) {
        return err("task not found");
    }
    notify(ctx, store, date_key);
    ok(true)
}

pub fn delete_task(
    ctx: &impl CommandCtx,
    store: &mut CalendarStore,
    date_key: &str,
    task_id: &str,
) -> CommandResult<bool> {
    if parse_date_key(date_key).is_none() {
        return err("invalid date");
    }
    if !store.delete_task(date_key, task_id) {
        return err("task not found");
    }
    notify(ctx, store, date_key);
    ok(true)
}

pub fn load_stats(ctx: &impl CommandCtx, store: &CalendarStore) -> CommandResult<StatsView> {
    ok(stats_view(store, ctx.today()))
}

pub fn load_month(store: &CalendarStore, year: i32, month: u32) -> CommandResult<Vec<DayCell>> {
    if !(1..=12).contains(&month) {
        return err("invalid month");
    }
    ok(month_overview(store, year, month))
}
