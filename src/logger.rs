//! A small stderr logger for the command-line front end.
//!
//! The library only talks to the `log` facade; this is the backend the
//! binary installs. Each record is written as a colored level tag, the
//! record's target and the message.

use std::io::Write;

use log::{Level, LevelFilter, Log, Metadata, Record};

const RESET: &str = "\x1b[0m";

/// Returns the ANSI color code used for a level's tag.
const fn color_code(level: Level) -> &'static str {
    match level {
        Level::Error => "\x1b[31m", // Red
        Level::Warn => "\x1b[33m",  // Yellow
        Level::Info => "\x1b[32m",  // Green
        Level::Debug => "\x1b[36m", // Cyan
        Level::Trace => "\x1b[35m", // Magenta
    }
}

/// Writes log records to standard error.
pub struct StderrLogger;

static LOGGER: StderrLogger = StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let level = record.level();
        let mut stderr = std::io::stderr().lock();
        let _ = writeln!(stderr,
                         "{}[{level}]{RESET} {}: {}",
                         color_code(level),
                         record.target(),
                         record.args());
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

/// Parses a level name such as `"warn"` or `"TRACE"`. `"off"` disables
/// logging.
///
/// # Example
/// ```
/// use log::LevelFilter;
/// use minilang::logger::parse_level;
///
/// assert_eq!(parse_level("debug"), Ok(LevelFilter::Debug));
/// assert_eq!(parse_level("OFF"), Ok(LevelFilter::Off));
/// assert!(parse_level("loud").is_err());
/// ```
pub fn parse_level(s: &str) -> Result<LevelFilter, String> {
    s.parse::<LevelFilter>()
     .map_err(|_| format!("Invalid log level: {s}"))
}

/// Installs the stderr logger as the global `log` backend.
///
/// # Errors
/// Fails if another logger has already been installed.
pub fn init(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    log::set_logger(&LOGGER)?;
    log::set_max_level(level);
    Ok(())
}
