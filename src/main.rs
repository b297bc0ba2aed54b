use std::error::Error;
use std::io::{self, BufRead, Write};

use chrono::{Datelike, NaiveDate};

use daily_todo_lib::commands::{self, CommandCtx, CommandResult};
use daily_todo_lib::config::{load_settings, settings_path_from_env};
use daily_todo_lib::dates::{date_key, parse_date_key, shift_month, today};
use daily_todo_lib::events::{DayView, StatePayload, StatsView, EVENT_STATE_UPDATED};
use daily_todo_lib::labels::{self, Language};
use daily_todo_lib::logging::init_logging;
use daily_todo_lib::models::{DayStatus, Settings};
use daily_todo_lib::status::DayCell;
use daily_todo_lib::store::CalendarStore;

const HELP: &str = "\
commands:
  day [YYYY-MM-DD]   select a day (default: today) and show its tasks
  add <title>        add a task to the selected day
  toggle <id>        toggle a task on the selected day
  delete <id>        delete a task from the selected day
  stats              show weekly and monthly completion
  month [YYYY-MM]    show the calendar for a month (default: selected)
  next | prev        move the selection one month
  help               show this help
  quit               exit";

struct TerminalCtx {
    lang: Language,
}

impl CommandCtx for TerminalCtx {
    fn today(&self) -> NaiveDate {
        today()
    }

    fn emit_state_updated(&self, payload: StatePayload) {
        log::debug!("{EVENT_STATE_UPDATED} date={}", payload.date_key);
        print_day(self.lang, &payload.day, self.today());
        print_stats(&payload.stats);
    }
}

struct Session {
    ctx: TerminalCtx,
    store: CalendarStore,
    selected: NaiveDate,
}

fn main() -> Result<(), Box<dyn Error>> {
    let settings = match settings_path_from_env() {
        Some(path) => load_settings(&path)?,
        None => Settings::default(),
    };
    let _logger = init_logging(settings.log_dir.as_deref())?;

    let lang = labels::resolve_language(&settings.language);
    let store = if settings.seed_sample_data {
        CalendarStore::initial_data()
    } else {
        CalendarStore::new()
    };
    log::info!(
        "session started language={lang:?} seeded_days={} today={}",
        store.len(),
        date_key(today())
    );

    let mut session = Session {
        ctx: TerminalCtx { lang },
        store,
        selected: today(),
    };
    session.show_selected();
    println!("{HELP}");

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        print!("> ");
        stdout.flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        if !session.handle(line.trim()) {
            break;
        }
    }
    log::info!("session ended");
    Ok(())
}

impl Session {
    /// Returns `false` when the user asked to quit.
    fn handle(&mut self, line: &str) -> bool {
        let (command, arg) = match line.split_once(char::is_whitespace) {
            Some((command, arg)) => (command, arg.trim()),
            None => (line, ""),
        };
        let key = date_key(self.selected);
        match command {
            "" => {}
            "quit" | "exit" => return false,
            "help" => println!("{HELP}"),
            "day" => {
                if arg.is_empty() {
                    self.selected = today();
                } else if let Some(date) = parse_date_key(arg) {
                    self.selected = date;
                } else {
                    println!("invalid date: {arg}");
                    return true;
                }
                self.show_selected();
            }
            "add" => {
                let r = commands::add_task(&self.ctx, &mut self.store, &key, arg);
                if matches!(r.data, Some(None)) {
                    println!("task title is empty");
                }
                report_error(&r);
            }
            "toggle" => report_error(&commands::toggle_task(&self.ctx, &mut self.store, &key, arg)),
            "delete" => report_error(&commands::delete_task(&self.ctx, &mut self.store, &key, arg)),
            "stats" => {
                if let Some(stats) = commands::load_stats(&self.ctx, &self.store).data {
                    print_stats(&stats);
                }
            }
            "month" => match parse_month_arg(arg, self.selected) {
                Some((year, month)) => self.show_month(year, month),
                None => println!("invalid month: {arg}"),
            },
            "next" | "prev" => {
                let delta = if command == "next" { 1 } else { -1 };
                self.selected = shift_month(self.selected, delta);
                self.show_selected();
            }
            other => println!("unknown command: {other} (try `help`)"),
        }
        true
    }

    fn show_selected(&mut self) {
        self.show_month(self.selected.year(), self.selected.month());
        let r = commands::load_day(&mut self.store, &date_key(self.selected));
        match &r.data {
            Some(day) => print_day(self.ctx.lang, day, self.ctx.today()),
            None => report_error(&r),
        }
    }

    fn show_month(&self, year: i32, month: u32) {
        let r = commands::load_month(&self.store, year, month);
        match &r.data {
            Some(cells) => print_month(self.ctx.lang, year, month, cells),
            None => report_error(&r),
        }
    }
}

fn parse_month_arg(arg: &str, selected: NaiveDate) -> Option<(i32, u32)> {
    if arg.is_empty() {
        return Some((selected.year(), selected.month()));
    }
    let (year, month) = arg.split_once('-')?;
    let year: i32 = year.parse().ok()?;
    let month: u32 = month.parse().ok()?;
    (1..=12).contains(&month).then_some((year, month))
}

fn report_error<T>(result: &CommandResult<T>) {
    if let Some(error) = &result.error {
        println!("error: {error}");
    }
}

fn status_glyph(status: DayStatus) -> char {
    match status {
        DayStatus::Empty => ' ',
        DayStatus::Pending => 'o',
        DayStatus::Partial => '~',
        DayStatus::Completed => '*',
    }
}

fn print_month(lang: Language, year: i32, month: u32, cells: &[DayCell]) {
    println!();
    println!("{}", labels::month_title(lang, year, month));
    let header: Vec<String> = labels::weekday_names(lang)
        .iter()
        .map(|name| format!("{name:<4}"))
        .collect();
    println!("{}", header.concat());

    let leading = NaiveDate::from_ymd_opt(year, month, 1)
        .map(|first| first.weekday().num_days_from_sunday() as usize)
        .unwrap_or(0);
    let mut line = "    ".repeat(leading);
    for (index, cell) in cells.iter().enumerate() {
        line.push_str(&format!("{:>2}{} ", cell.day, status_glyph(cell.status)));
        if (leading + index + 1) % 7 == 0 {
            println!("{}", line.trim_end());
            line.clear();
        }
    }
    if !line.is_empty() {
        println!("{}", line.trim_end());
    }
}

fn print_day(lang: Language, day: &DayView, today: NaiveDate) {
    println!();
    let heading = parse_date_key(&day.date_key)
        .map(|date| labels::task_list_heading(lang, date, today))
        .unwrap_or_else(|| day.date_key.clone());
    println!("{heading} ({}/{})", day.completed, day.total);
    for task in &day.tasks {
        let mark = if task.completed { 'x' } else { ' ' };
        println!("  [{mark}] {:<14} {}", task.id, task.title);
    }
    if day.all_completed {
        println!("  all done!");
    }
}

fn print_stats(stats: &StatsView) {
    println!(
        "week: {}% ({}/{})  month: {}% ({}/{})",
        stats.weekly_percentage,
        stats.weekly.completed,
        stats.weekly.total,
        stats.monthly_percentage,
        stats.monthly.completed,
        stats.monthly.total
    );
}
