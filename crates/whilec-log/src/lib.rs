//! A small logging crate shared by the `whilec` crates.
//!
//! Messages go to stderr, tagged with their level and the module path that
//! emitted them. The level is process-wide and can be set programmatically
//! or from the `WHILEC_LOG` environment variable.
//!
//! # Example
//!
//! ```
//! use whilec_log::{debug, trace, Level};
//!
//! whilec_log::set_level(Level::Debug);
//!
//! debug!("checking method {}", "main");
//! trace!("this one is filtered out");
//! ```

use std::fmt::Arguments;
use std::io::Write;
use std::str::FromStr;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};

/// Environment variable holding the log level name.
pub const LEVEL_ENV: &str = "WHILEC_LOG";

/// Environment variable that disables ANSI colours when set.
pub const NO_COLOR_ENV: &str = "NO_COLOR";

/// Severity of a log message.
///
/// Lower numeric values are more severe; a logger set to `Info` lets
/// `Error`, `Warn` and `Info` through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    /// Failures the caller cannot recover from
    Error = 0,
    /// Suspicious input that was accepted anyway
    Warn = 1,
    /// Coarse progress
    Info = 2,
    /// Per-declaration detail
    Debug = 3,
    /// Per-node detail
    Trace = 4,
}

impl Level {
    const fn color_code(self) -> &'static str {
        match self {
            Level::Error => "\x1b[31m",
            Level::Warn => "\x1b[33m",
            Level::Info => "\x1b[32m",
            Level::Debug => "\x1b[36m",
            Level::Trace => "\x1b[35m",
        }
    }

    /// Upper-case name used in log lines.
    pub const fn as_str(self) -> &'static str {
        match self {
            Level::Error => "ERROR",
            Level::Warn => "WARN",
            Level::Info => "INFO",
            Level::Debug => "DEBUG",
            Level::Trace => "TRACE",
        }
    }

    const fn from_u8(raw: u8) -> Level {
        match raw {
            0 => Level::Error,
            1 => Level::Warn,
            2 => Level::Info,
            3 => Level::Debug,
            _ => Level::Trace,
        }
    }
}

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "error" => Ok(Level::Error),
            "warn" | "warning" => Ok(Level::Warn),
            "info" => Ok(Level::Info),
            "debug" => Ok(Level::Debug),
            "trace" => Ok(Level::Trace),
            _ => Err(ParseLevelError(s.to_string())),
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a level name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseLevelError(pub String);

impl std::fmt::Display for ParseLevelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid log level `{}`", self.0)
    }
}

impl std::error::Error for ParseLevelError {}

/// Process-wide logger state.
pub struct Logger {
    level: AtomicU8,
    color: AtomicBool,
}

impl Logger {
    const fn new(level: Level) -> Self {
        Logger {
            level: AtomicU8::new(level as u8),
            color: AtomicBool::new(true),
        }
    }

    /// Sets the most verbose level that is still emitted.
    pub fn set_level(&self, level: Level) {
        self.level.store(level as u8, Ordering::SeqCst);
    }

    /// Current level.
    pub fn level(&self) -> Level {
        Level::from_u8(self.level.load(Ordering::Relaxed))
    }

    /// Turns ANSI colouring of the level tag on or off.
    pub fn set_color(&self, enabled: bool) {
        self.color.store(enabled, Ordering::SeqCst);
    }

    /// Whether messages at `level` pass the filter.
    pub fn enabled(&self, level: Level) -> bool {
        level as u8 <= self.level.load(Ordering::Relaxed)
    }

    fn format(&self, level: Level, target: &str, args: Arguments<'_>) -> String {
        if self.color.load(Ordering::Relaxed) {
            format!("{}[{}]\x1b[0m {target}: {args}", level.color_code(), level)
        } else {
            format!("[{level}] {target}: {args}")
        }
    }
}

static LOGGER: OnceLock<Logger> = OnceLock::new();

/// The global logger, created at `Warn` on first use.
pub fn get_logger() -> &'static Logger {
    LOGGER.get_or_init(|| Logger::new(Level::Warn))
}

/// Sets the global level.
pub fn set_level(level: Level) {
    get_logger().set_level(level);
}

/// Configures the global logger from `WHILEC_LOG` and `NO_COLOR`.
///
/// An unset `WHILEC_LOG` leaves the level untouched; an unparseable one is
/// reported as an error so drivers can surface the typo.
pub fn init_from_env() -> Result<(), ParseLevelError> {
    let logger = get_logger();
    if std::env::var_os(NO_COLOR_ENV).is_some() {
        logger.set_color(false);
    }
    match std::env::var(LEVEL_ENV) {
        Ok(value) if !value.trim().is_empty() => {
            logger.set_level(value.parse()?);
            Ok(())
        }
        _ => Ok(()),
    }
}

#[doc(hidden)]
pub fn __log_with_target(level: Level, target: &str, args: Arguments<'_>) {
    let logger = get_logger();
    if !logger.enabled(level) {
        return;
    }
    let line = logger.format(level, target, args);
    // A closed stderr is not worth failing a type check over.
    let _ = writeln!(std::io::stderr().lock(), "{line}");
}

/// Logs at an explicit level.
///
/// ```
/// use whilec_log::{log, Level};
///
/// log!(level: Level::Warn, "{} declarations skipped", 2);
/// ```
#[macro_export]
macro_rules! log {
    (level: $level:expr, $($arg:tt)*) => {{
        let level = $level;
        if $crate::get_logger().enabled(level) {
            $crate::__log_with_target(level, module_path!(), format_args!($($arg)*));
        }
    }};
}

/// Logs at [`Level::Error`].
#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => { $crate::log!(level: $crate::Level::Error, $($arg)*) };
}

/// Logs at [`Level::Warn`].
#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => { $crate::log!(level: $crate::Level::Warn, $($arg)*) };
}

/// Logs at [`Level::Info`].
#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => { $crate::log!(level: $crate::Level::Info, $($arg)*) };
}

/// Logs at [`Level::Debug`].
#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => { $crate::log!(level: $crate::Level::Debug, $($arg)*) };
}

/// Logs at [`Level::Trace`].
#[macro_export]
macro_rules! trace {
    ($($arg:tt)*) => { $crate::log!(level: $crate::Level::Trace, $($arg)*) };
}
