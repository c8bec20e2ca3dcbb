use crate::shared::constants;
use lazy_static::lazy_static;
use std::backtrace::Backtrace;
use std::fs::OpenOptions;
use std::io::Write;
use std::panic;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

#[derive(Clone)]
struct LogFiles {
    error_log: PathBuf,
    debug_log: PathBuf,
}

lazy_static! {
    static ref LOGGER: Mutex<Option<LogFiles>> = Mutex::new(None);
}

fn append_line(path: &Path, line: &str) {
    if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(path) {
        let _ = writeln!(file, "{}", line);
    }
}

fn truncate_with_banner(path: &Path, label: &str) {
    if let Ok(mut file) = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)
    {
        let _ = writeln!(
            file,
            "=== {} {} started: {} ===",
            constants::APP_NAME,
            label,
            chrono::Local::now()
        );
    }
}

/// Start fresh debug/error logs in the working directory and install a
/// panic hook that records the panic message and backtrace before the
/// process dies. Logging calls made before init are silently dropped.
pub fn init() {
    let cwd = std::env::current_dir().unwrap_or_default();
    let files = LogFiles {
        error_log: cwd.join(constants::ERROR_LOG_FILE),
        debug_log: cwd.join(constants::DEBUG_LOG_FILE),
    };

    truncate_with_banner(&files.error_log, "error log");
    truncate_with_banner(&files.debug_log, "debug log");

    *LOGGER.lock().unwrap() = Some(files.clone());

    panic::set_hook(Box::new(move |info| {
        let backtrace = Backtrace::capture();
        let msg = if let Some(s) = info.payload().downcast_ref::<&str>() {
            *s
        } else if let Some(s) = info.payload().downcast_ref::<String>() {
            s.as_str()
        } else {
            "Box<Any>"
        };

        let location = info
            .location()
            .map(|l| format!("{}:{}", l.file(), l.line()))
            .unwrap_or_else(|| "unknown".to_string());

        let report = format!(
            "\npanic at {}: {}\nbacktrace:\n{:?}\n",
            location, msg, backtrace
        );

        append_line(&files.error_log, &report);
        append_line(&files.debug_log, &report);

        eprintln!("panic, details in {}", files.error_log.display());
    }));
}

pub fn log(level: &str, msg: &str) {
    if let Some(files) = LOGGER.lock().unwrap().as_ref() {
        let timestamp = chrono::Local::now().format("%H:%M:%S%.3f");
        let line = format!("{} [{}] {}", timestamp, level, msg);
        append_line(&files.debug_log, &line);

        if level == "ERROR" {
            append_line(&files.error_log, &line);
        }
    }
}

pub fn info(msg: &str) {
    log("INFO", msg);
}

pub fn warn(msg: &str) {
    log("WARN", msg);
}

pub fn error(msg: &str) {
    log("ERROR", msg);
}

pub fn debug(msg: &str) {
    log("DEBUG", msg);
}
