//! Logging for the cronwalk crates.
//!
//! A small environment-driven logger: every crate in the workspace logs
//! through the `trace!`, `debug!`, `info!`, `warn!` and `error!` macros
//! exported here. Output goes to stderr in a pretty, compact or JSON layout,
//! or is handed to the [`log`] facade when the host application already owns
//! a logger.
//!
//! # Usage
//!
//! ```rust
//! use cronwalk_log::{debug, info, trace, warn};
//!
//! trace!("scanning minute field");
//! debug!("parsed entry '{}'", "0 12 * * * *");
//! info!("next trigger at {}", "2024-04-01 12:00");
//! warn!(target: "cronwalk::search", "search budget exhausted");
//! ```
//!
//! # Environment Variables
//!
//! - `CRONWALK_DEBUG=1` - Enable debug logging
//! - `CRONWALK_LOG_LEVEL=trace|debug|info|warn|error|off` - Minimum level
//! - `CRONWALK_LOG_FORMAT=pretty|compact|json|facade` - Output layout
//! - `CRONWALK_LOG_TIMESTAMPS=1|0` - Prefix records with a timestamp
//! - `CRONWALK_LOG_MODULE=1|0` - Include the record target

use once_cell::sync::Lazy;
use std::env;
use std::io::Write;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};

/// Severity of a log record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Level {
    /// Per-step search detail
    Trace = 0,
    /// Parse and search diagnostics
    Debug = 1,
    /// Normal operation
    Info = 2,
    /// Recoverable problems
    Warn = 3,
    /// Failures
    Error = 4,
    /// Nothing is logged
    Off = 5,
}

impl Level {
    /// Parse a level name, case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trace" => Some(Self::Trace),
            "debug" => Some(Self::Debug),
            "info" => Some(Self::Info),
            "warn" | "warning" => Some(Self::Warn),
            "error" => Some(Self::Error),
            "off" | "none" => Some(Self::Off),
            _ => None,
        }
    }

    /// Upper-case name used in rendered records.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trace => "TRACE",
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
            Self::Off => "OFF",
        }
    }

    fn from_u8(raw: u8) -> Self {
        match raw {
            0 => Self::Trace,
            1 => Self::Debug,
            2 => Self::Info,
            3 => Self::Warn,
            4 => Self::Error,
            _ => Self::Off,
        }
    }

    fn to_facade(self) -> Option<log::Level> {
        match self {
            Self::Trace => Some(log::Level::Trace),
            Self::Debug => Some(log::Level::Debug),
            Self::Info => Some(log::Level::Info),
            Self::Warn => Some(log::Level::Warn),
            Self::Error => Some(log::Level::Error),
            Self::Off => None,
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Layout of emitted records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// `2024-04-01 12:00:00.000 DEBUG [target] message`
    Pretty,
    /// `12:00:00 D target: message`
    Compact,
    /// One JSON object per line
    Json,
    /// Hand records to the `log` facade
    Facade,
}

impl Format {
    /// Layout actually written. JSON needs the `json` feature; without it
    /// records use the pretty layout.
    pub fn resolved(self) -> Self {
        #[cfg(not(feature = "json"))]
        if self == Self::Json {
            return Self::Pretty;
        }
        self
    }

    /// Parse a format name, case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Some(Self::Pretty),
            "compact" => Some(Self::Compact),
            "json" => Some(Self::Json),
            "facade" | "log" => Some(Self::Facade),
            _ => None,
        }
    }
}

static DEBUG_ENABLED: AtomicBool = AtomicBool::new(false);
static LOG_LEVEL: AtomicU8 = AtomicU8::new(Level::Warn as u8);
static CONFIG: Lazy<LogConfig> = Lazy::new(LogConfig::from_env);

/// Logger settings, read once from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// `CRONWALK_DEBUG` was set
    pub debug: bool,
    /// Minimum level
    pub level: Level,
    /// Output layout
    pub format: Format,
    /// Prefix records with a timestamp
    pub timestamps: bool,
    /// Include the record target
    pub module_path: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            debug: false,
            level: Level::Warn,
            format: Format::Pretty,
            timestamps: true,
            module_path: true,
        }
    }
}

impl LogConfig {
    /// Build the configuration from `CRONWALK_*` variables and publish the
    /// resulting level to the global filter.
    pub fn from_env() -> Self {
        let config = Self::from_lookup(|key| env::var(key).ok());
        DEBUG_ENABLED.store(config.debug, Ordering::SeqCst);
        LOG_LEVEL.store(config.level as u8, Ordering::SeqCst);
        config
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let flag = |key: &str, default: bool| {
            lookup(key)
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(default)
        };

        let debug = flag("CRONWALK_DEBUG", false);
        let level = lookup("CRONWALK_LOG_LEVEL")
            .and_then(|s| Level::parse(&s))
            .unwrap_or(if debug { Level::Debug } else { defaults.level });
        let format = lookup("CRONWALK_LOG_FORMAT")
            .and_then(|s| Format::parse(&s))
            .unwrap_or(defaults.format);

        Self {
            debug,
            level,
            format,
            timestamps: flag("CRONWALK_LOG_TIMESTAMPS", defaults.timestamps),
            module_path: flag("CRONWALK_LOG_MODULE", defaults.module_path),
        }
    }
}

/// Force the environment to be read now rather than on first use.
pub fn init() {
    Lazy::force(&CONFIG);
}

/// The active configuration.
pub fn config() -> &'static LogConfig {
    &CONFIG
}

#[inline]
pub fn is_debug_enabled() -> bool {
    init();
    DEBUG_ENABLED.load(Ordering::Relaxed)
}

#[inline]
pub fn is_level_enabled(level: Level) -> bool {
    init();
    level != Level::Off && level as u8 >= LOG_LEVEL.load(Ordering::Relaxed)
}

/// Whether a record at `level` is written. Debug records also pass while
/// debug mode is on, whatever the minimum level.
#[inline]
pub fn is_record_enabled(level: Level) -> bool {
    is_level_enabled(level) || (level == Level::Debug && is_debug_enabled())
}

pub fn current_level() -> Level {
    init();
    Level::from_u8(LOG_LEVEL.load(Ordering::Relaxed))
}

/// Change the minimum level at runtime.
pub fn set_level(level: Level) {
    init();
    LOG_LEVEL.store(level as u8, Ordering::SeqCst);
}

/// Toggle debug mode at runtime; enabling it lowers the level to `Debug`.
pub fn set_debug(enabled: bool) {
    init();
    DEBUG_ENABLED.store(enabled, Ordering::SeqCst);
    if enabled && current_level() > Level::Debug {
        LOG_LEVEL.store(Level::Debug as u8, Ordering::SeqCst);
    }
}

/// Emit one record. Called by the macros after the level check.
#[doc(hidden)]
pub fn log(level: Level, target: &str, message: &str) {
    let config = config();
    if !is_record_enabled(level) {
        return;
    }

    match config.format.resolved() {
        Format::Pretty => write_pretty(level, target, message, config),
        Format::Compact => write_compact(level, target, message, config),
        Format::Json => write_json(level, target, message),
        Format::Facade => forward(level, target, message),
    }
}

fn write_pretty(level: Level, target: &str, message: &str, config: &LogConfig) {
    let mut stderr = std::io::stderr().lock();
    if config.timestamps {
        let _ = write!(stderr, "{} ", chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"));
    }
    let _ = write!(stderr, "{:5} ", level.as_str());
    if config.module_path && !target.is_empty() {
        let _ = write!(stderr, "[{}] ", target);
    }
    let _ = writeln!(stderr, "{}", message);
}

fn write_compact(level: Level, target: &str, message: &str, config: &LogConfig) {
    let mut stderr = std::io::stderr().lock();
    if config.timestamps {
        let _ = write!(stderr, "{} ", chrono::Local::now().format("%H:%M:%S"));
    }
    let _ = write!(stderr, "{} ", level.as_str().chars().next().unwrap_or('?'));
    if config.module_path && !target.is_empty() {
        let _ = write!(stderr, "{}: ", target);
    }
    let _ = writeln!(stderr, "{}", message);
}

#[cfg(feature = "json")]
fn write_json(level: Level, target: &str, message: &str) {
    if let Some(line) = json_line(level, target, message) {
        eprintln!("{}", line);
    }
}

#[cfg(feature = "json")]
fn json_line(level: Level, target: &str, message: &str) -> Option<String> {
    use serde::Serialize;

    #[derive(Serialize)]
    struct Record<'a> {
        timestamp: String,
        level: &'a str,
        target: &'a str,
        message: &'a str,
    }

    let record = Record {
        timestamp: chrono::Utc::now().to_rfc3339(),
        level: level.as_str(),
        target,
        message,
    };

    serde_json::to_string(&record).ok()
}

// Unreachable: `Format::resolved` maps JSON to pretty without the feature.
#[cfg(not(feature = "json"))]
fn write_json(level: Level, target: &str, message: &str) {
    write_pretty(level, target, message, config());
}

fn forward(level: Level, target: &str, message: &str) {
    if let Some(level) = level.to_facade() {
        log::log!(target: target, level, "{}", message);
    }
}

/// Log a trace record.
#[macro_export]
macro_rules! trace {
    (target: $target:expr, $($arg:tt)+) => {
        if $crate::is_level_enabled($crate::Level::Trace) {
            $crate::log($crate::Level::Trace, $target, &format!($($arg)+));
        }
    };
    ($($arg:tt)+) => {
        $crate::trace!(target: module_path!(), $($arg)+)
    };
}

/// Log a debug record. Also emitted whenever debug mode is on
/// (`CRONWALK_DEBUG=1` or [`set_debug`]), even above a higher minimum level.
///
/// ```rust
/// use cronwalk_log::debug;
///
/// let expression = "*/15 * * * * *";
/// debug!("parsed '{}'", expression);
/// debug!(target: "cronwalk::field", "minute values: {:?}", [0, 15, 30, 45]);
/// ```
#[macro_export]
macro_rules! debug {
    (target: $target:expr, $($arg:tt)+) => {
        if $crate::is_record_enabled($crate::Level::Debug) {
            $crate::log($crate::Level::Debug, $target, &format!($($arg)+));
        }
    };
    ($($arg:tt)+) => {
        $crate::debug!(target: module_path!(), $($arg)+)
    };
}

/// Log an info record.
#[macro_export]
macro_rules! info {
    (target: $target:expr, $($arg:tt)+) => {
        if $crate::is_level_enabled($crate::Level::Info) {
            $crate::log($crate::Level::Info, $target, &format!($($arg)+));
        }
    };
    ($($arg:tt)+) => {
        $crate::info!(target: module_path!(), $($arg)+)
    };
}

/// Log a warning record.
#[macro_export]
macro_rules! warn {
    (target: $target:expr, $($arg:tt)+) => {
        if $crate::is_level_enabled($crate::Level::Warn) {
            $crate::log($crate::Level::Warn, $target, &format!($($arg)+));
        }
    };
    ($($arg:tt)+) => {
        $crate::warn!(target: module_path!(), $($arg)+)
    };
}

/// Log an error record.
#[macro_export]
macro_rules! error {
    (target: $target:expr, $($arg:tt)+) => {
        if $crate::is_level_enabled($crate::Level::Error) {
            $crate::log($crate::Level::Error, $target, &format!($($arg)+));
        }
    };
    ($($arg:tt)+) => {
        $crate::error!(target: module_path!(), $($arg)+)
    };
}
