use chrono::Local;
use log::{LevelFilter, Metadata, Record, SetLoggerError};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Log target for desktop-notification records; they get their own file.
pub const DESKTOP_TARGET: &str = "desktop";
const DESKTOP_LOG_FILE: &str = "macos_notification.log";

/// Appends `[timestamp] message` lines to `<dir>/<category>.log`.
///
/// Every record opens the file in append mode and closes it again, so hook
/// processes running side by side can share a log file without holding it.
pub struct FileLogger {
    dir: PathBuf,
    category: String,
    stderr: bool,
    level: LevelFilter,
}

impl FileLogger {
    pub fn new(dir: PathBuf, category: &str, stderr: bool, level: LevelFilter) -> Self {
        FileLogger {
            dir,
            category: category.to_string(),
            stderr,
            level,
        }
    }

    pub fn log_path_for(&self, target: &str) -> PathBuf {
        if target == DESKTOP_TARGET {
            self.dir.join(DESKTOP_LOG_FILE)
        } else {
            self.dir.join(format!("{}.log", self.category))
        }
    }
}

fn append_line(path: &Path, line: &str) {
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(path) {
        let _ = file.write_all(line.as_bytes());
    }
}

impl log::Log for FileLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        let line = format!("[{timestamp}] {}\n", record.args());

        append_line(&self.log_path_for(record.target()), &line);

        if self.stderr {
            eprint!("{}", line);
        }
    }

    fn flush(&self) {}
}

static LOGGER: OnceLock<FileLogger> = OnceLock::new();

/// Install the file logger for this process. `category` names the log file
/// (e.g. `stop_hook` → `stop_hook.log`).
pub fn init(dir: PathBuf, category: &str, stderr: bool, verbose: bool) -> Result<(), SetLoggerError> {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let logger = LOGGER.get_or_init(|| FileLogger::new(dir, category, stderr, level));

    log::set_logger(logger)?;
    log::set_max_level(level);
    Ok(())
}
