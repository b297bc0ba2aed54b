use chrono::{Datelike, NaiveDate};
use sys_locale::get_locale;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Es,
    En,
}

struct Labels {
    months: [&'static str; 12],
    weekdays: [&'static str; 7],
    tasks_today: &'static str,
    tasks_for: &'static str,
}

const ES: Labels = Labels {
    months: [
        "Enero",
        "Febrero",
        "Marzo",
        "Abril",
        "Mayo",
        "Junio",
        "Julio",
        "Agosto",
        "Septiembre",
        "Octubre",
        "Noviembre",
        "Diciembre",
    ],
    weekdays: ["Dom", "Lun", "Mar", "Mié", "Jue", "Vie", "Sáb"],
    tasks_today: "Tareas para hoy",
    tasks_for: "Tareas para",
};

const EN: Labels = Labels {
    months: [
        "January",
        "February",
        "March",
        "April",
        "May",
        "June",
        "July",
        "August",
        "September",
        "October",
        "November",
        "December",
    ],
    weekdays: ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"],
    tasks_today: "Tasks for today",
    tasks_for: "Tasks for",
};

fn labels(lang: Language) -> &'static Labels {
    match lang {
        Language::Es => &ES,
        Language::En => &EN,
    }
}

/// `"es"`/`"en"` pick a language explicitly; anything else follows the system locale.
pub fn resolve_language(setting: &str) -> Language {
    let normalized = setting.trim().to_lowercase();
    match normalized.as_str() {
        "es" => Language::Es,
        "en" => Language::En,
        _ => language_for_locale(&get_locale().unwrap_or_default()),
    }
}

fn language_for_locale(locale: &str) -> Language {
    if locale.to_lowercase().starts_with("es") {
        Language::Es
    } else {
        Language::En
    }
}

pub fn month_names(lang: Language) -> [&'static str; 12] {
    labels(lang).months
}

/// Short weekday names, Sunday first.
pub fn weekday_names(lang: Language) -> [&'static str; 7] {
    labels(lang).weekdays
}

pub fn month_title(lang: Language, year: i32, month: u32) -> String {
    let name = month
        .checked_sub(1)
        .and_then(|index| labels(lang).months.get(index as usize))
        .copied()
        .unwrap_or("?");
    format!("{name} {year}")
}

pub fn task_list_heading(lang: Language, date: NaiveDate, today: NaiveDate) -> String {
    let labels = labels(lang);
    if date == today {
        return labels.tasks_today.to_string();
    }
    format!("{} {}", labels.tasks_for, long_date(lang, date))
}

fn long_date(lang: Language, date: NaiveDate) -> String {
    let labels = labels(lang);
    let weekday = labels.weekdays[date.weekday().num_days_from_sunday() as usize];
    let month = labels.months[date.month0() as usize];
    match lang {
        Language::Es => format!(
            "{weekday} {} de {} de {}",
            date.day(),
            month.to_lowercase(),
            date.year()
        ),
        Language::En => format!("{weekday}, {month} {}, {}", date.day(), date.year()),
    }
}
