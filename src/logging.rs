pub const LOG_ENV: &str = "DAILY_TODO_LOG";
pub const LOG_FILE_BASENAME: &str = "daily-todo";
pub const LOG_FILE_SUFFIX: &str = "log";
pub const LOG_ROTATE_SIZE_BYTES: u64 = 10 * 1024 * 1024;
pub const LOG_ROTATE_KEEP_FILES: usize = 7;

/// Log spec from `DAILY_TODO_LOG`, then `RUST_LOG`, else the build default.
pub fn log_spec() -> String {
    let default_spec = if cfg!(debug_assertions) {
        "warn,daily_todo_lib=debug,daily_todo=debug"
    } else {
        "warn,daily_todo_lib=info,daily_todo=info"
    };
    first_non_blank(&[std::env::var(LOG_ENV).ok(), std::env::var("RUST_LOG").ok()])
        .unwrap_or_else(|| default_spec.to_string())
}

fn first_non_blank(candidates: &[Option<String>]) -> Option<String> {
    candidates
        .iter()
        .flatten()
        .find(|value| !value.trim().is_empty())
        .cloned()
}

/// Starts the logger. With `log_dir` set, logs go to rotated files there; otherwise to stderr.
#[cfg(all(feature = "app", not(test)))]
pub fn init_logging(
    log_dir: Option<&std::path::Path>,
) -> Result<flexi_logger::LoggerHandle, flexi_logger::FlexiLoggerError> {
    use flexi_logger::{
        detailed_format, Cleanup, Criterion, Duplicate, FileSpec, Logger, Naming, WriteMode,
    };

    let logger = Logger::try_with_str(log_spec())?;
    let handle = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            logger
                .log_to_file(
                    FileSpec::default()
                        .directory(dir)
                        .basename(LOG_FILE_BASENAME)
                        .suffix(LOG_FILE_SUFFIX),
                )
                .write_mode(WriteMode::BufferAndFlush)
                .format_for_files(detailed_format)
                .rotate(
                    Criterion::Size(LOG_ROTATE_SIZE_BYTES),
                    Naming::Numbers,
                    Cleanup::KeepLogFiles(LOG_ROTATE_KEEP_FILES),
                )
                .duplicate_to_stderr(if cfg!(debug_assertions) {
                    Duplicate::Info
                } else {
                    Duplicate::None
                })
                .start()?
        }
        None => logger.log_to_stderr().start()?,
    };

    install_panic_hook();

    match log_dir {
        Some(dir) => log::info!(
            "logger initialized dir={} rotate_size_bytes={} keep_files={}",
            dir.display(),
            LOG_ROTATE_SIZE_BYTES,
            LOG_ROTATE_KEEP_FILES
        ),
        None => log::info!("logger initialized target=stderr"),
    }
    Ok(handle)
}

#[cfg(any(feature = "app", test))]
/// Text of a panic payload; `panic!` produces either `&str` or `String`.
fn panic_message(payload: &(dyn std::any::Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(|s| s.as_str()))
        .unwrap_or("<non-string panic payload>")
}

#[cfg(any(feature = "app", test))]
/// Crate version, local date and thread, so a crash report can be matched to a session day.
fn panic_context() -> String {
    let thread = std::thread::current();
    format!(
        "version={} date={} thread={}",
        env!("CARGO_PKG_VERSION"),
        crate::dates::today_key(),
        thread.name().unwrap_or("<unnamed>")
    )
}

#[cfg(all(feature = "app", not(test)))]
fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info: &std::panic::PanicHookInfo<'_>| {
        let message = panic_message(info.payload());
        let location = info
            .location()
            .map(|loc| loc.to_string())
            .unwrap_or_else(|| "<unknown>".to_string());
        let backtrace = std::backtrace::Backtrace::capture();

        log::error!(
            "panic {}: {message} at {location}\nbacktrace:\n{backtrace}",
            panic_context()
        );
        default_hook(info);
    }));
}
