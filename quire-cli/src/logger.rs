//! A `log` backend that writes coloured lines to stderr.

use log::{Level, LevelFilter, Log, Metadata, Record};
use owo_colors::OwoColorize;

struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let label = match record.level() {
            Level::Error => "error".red().bold().to_string(),
            Level::Warn => "warning".yellow().bold().to_string(),
            Level::Info => "info".green().to_string(),
            Level::Debug => "debug".blue().to_string(),
            Level::Trace => "trace".dimmed().to_string(),
        };
        eprintln!("{label}: {}", record.args());
    }

    fn flush(&self) {}
}

/// Install the logger. Only the first call has any effect.
pub fn init(level: LevelFilter) {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}
