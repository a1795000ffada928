//! A small, zero-dependency logging crate for `frog2d`.
//!
//! Log records are filtered by level, optionally echoed to stdout with ANSI
//! colours, and kept in a fixed-size ring buffer so tools and tests can read
//! back the most recent history. When the ring is full the oldest entry is
//! overwritten.
//!
//! # Example
//!
//! ```
//! use frog_log::{error, warn, info, debug, Level};
//!
//! // Set the minimum log level
//! frog_log::set_level(Level::Debug);
//!
//! let status = "running";
//! info!("Renderer is {}", status);
//! debug!("Swapchain images: {:?}", vec![0, 1, 2]);
//! warn!("This is a warning");
//! error!("This is an error message");
//! ```
//!
//! A [`Logger`] can also be owned and passed around explicitly:
//!
//! ```
//! use frog_log::{info, LogConfig, Logger};
//!
//! let logger = Logger::new(LogConfig { echo: false, ..LogConfig::default() });
//! info!(logger: &logger, "frame {} done", 12);
//!
//! assert_eq!(logger.count(), 1);
//! assert_eq!(logger.get(0).unwrap().text(), "frame 12 done");
//! ```

use std::fmt::{self, Arguments, Write};
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};

/// Log levels representing the severity/priority of log messages.
///
/// `Levels` are ordered from most severe (Error) to least severe (Trace).
/// Lower numeric values indicate higher severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    /// Error level - critical failures and errors
    Error = 0,
    /// Warning level - potentially harmful situations
    Warn = 1,
    /// Info level - informational messages
    Info = 2,
    /// Debug level - detailed diagnostic information
    Debug = 3,
    /// Trace level - most detailed tracing information
    Trace = 4,
}

impl Level {
    /// Returns the ANSI color code for this log level.
    const fn color_code(self) -> &'static str {
        match self {
            Level::Error => "\x1b[31m", // Red
            Level::Warn => "\x1b[33m",  // Yellow
            Level::Info => "\x1b[32m",  // Green
            Level::Debug => "\x1b[36m", // Cyan
            Level::Trace => "\x1b[35m", // Magenta
        }
    }

    /// Returns the string representation of this log level.
    pub const fn as_str(self) -> &'static str {
        match self {
            Level::Error => "ERROR",
            Level::Warn => "WARN",
            Level::Info => "INFO",
            Level::Debug => "DEBUG",
            Level::Trace => "TRACE",
        }
    }

    const fn from_u8(value: u8) -> Self {
        match value {
            0 => Level::Error,
            1 => Level::Warn,
            2 => Level::Info,
            3 => Level::Debug,
            _ => Level::Trace,
        }
    }

    /// Parses a string into a Level. `WARNING` is accepted as `Warn`.
    ///
    /// # Example
    ///
    /// ```
    /// use frog_log::Level;
    ///
    /// assert_eq!(Level::from_str("error"), Ok(Level::Error));
    /// assert_eq!(Level::from_str("Warning"), Ok(Level::Warn));
    /// assert!(Level::from_str("invalid").is_err());
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.trim().to_uppercase().as_str() {
            "ERROR" => Ok(Level::Error),
            "WARN" | "WARNING" => Ok(Level::Warn),
            "INFO" => Ok(Level::Info),
            "DEBUG" => Ok(Level::Debug),
            "TRACE" => Ok(Level::Trace),
            _ => Err(format!("Invalid log level: {s}")),
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Logger configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogConfig {
    /// Minimum level that is recorded.
    pub level: Level,
    /// Ring buffer size in entries. Rounded up to a power of two; sizes with
    /// no power of two above them fall back to `DEFAULT_CAPACITY`.
    pub capacity: usize,
    /// Whether records are also printed to stdout.
    pub echo: bool,
}

impl LogConfig {
    /// Default ring buffer size.
    pub const DEFAULT_CAPACITY: usize = 8192;

    /// Environment variable holding the minimum level name.
    pub const LEVEL_VAR: &'static str = "FROG_LOG";

    /// Environment variable switching stdout echo (`0` / `1`).
    pub const ECHO_VAR: &'static str = "FROG_LOG_ECHO";

    /// Reads overrides from `FROG_LOG` and `FROG_LOG_ECHO`.
    ///
    /// Unset or unparsable values keep their defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Like [`LogConfig::from_env`], reading variables through `lookup`.
    #[must_use]
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(level) = lookup(Self::LEVEL_VAR)
            && let Ok(level) = Level::from_str(&level)
        {
            config.level = level;
        }

        if let Some(echo) = lookup(Self::ECHO_VAR) {
            match echo.trim().to_ascii_lowercase().as_str() {
                "0" | "false" | "off" => config.echo = false,
                "1" | "true" | "on" => config.echo = true,
                _ => {}
            }
        }

        config
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::Info,
            capacity: Self::DEFAULT_CAPACITY,
            echo: true,
        }
    }
}

/// Longest message stored in a [`LogEntry`], in bytes.
pub const MAX_MESSAGE_LEN: usize = 256;

/// One recorded message.
#[derive(Clone, Copy)]
pub struct LogEntry {
    level: Level,
    target: &'static str,
    len: u16,
    text: [u8; MAX_MESSAGE_LEN],
}

impl LogEntry {
    fn new(level: Level, target: &'static str, args: Arguments<'_>) -> Self {
        let mut buf = EntryBuf {
            text: [0; MAX_MESSAGE_LEN],
            len: 0,
            full: false,
        };
        // EntryBuf never fails; a failing Display impl just ends the text.
        let _ = buf.write_fmt(args);

        Self {
            level,
            target,
            len: buf.len as u16,
            text: buf.text,
        }
    }

    /// Severity of the message.
    #[must_use]
    pub const fn level(&self) -> Level {
        self.level
    }

    /// Module path the message was logged from.
    #[must_use]
    pub const fn target(&self) -> &'static str {
        self.target
    }

    /// Message text, truncated to [`MAX_MESSAGE_LEN`] bytes.
    #[must_use]
    pub fn text(&self) -> &str {
        // SAFETY: EntryBuf only stores whole UTF-8 sequences.
        unsafe { std::str::from_utf8_unchecked(&self.text[..usize::from(self.len)]) }
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.level, self.target, self.text())
    }
}

impl fmt::Debug for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogEntry")
            .field("level", &self.level)
            .field("target", &self.target)
            .field("text", &self.text())
            .finish()
    }
}

/// Fixed buffer that truncates on a char boundary once full.
struct EntryBuf {
    text: [u8; MAX_MESSAGE_LEN],
    len: usize,
    full: bool,
}

impl Write for EntryBuf {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        if self.full {
            return Ok(());
        }

        let room = MAX_MESSAGE_LEN - self.len;
        let mut n = s.len().min(room);
        while !s.is_char_boundary(n) {
            n -= 1;
        }
        if n < s.len() {
            self.full = true;
        }

        self.text[self.len..self.len + n].copy_from_slice(&s.as_bytes()[..n]);
        self.len += n;
        Ok(())
    }
}

/// Ring buffer of the most recent entries.
struct Ring {
    entries: Vec<LogEntry>,
    /// Index of the oldest entry once the ring has wrapped.
    head: usize,
    capacity: usize,
    total: u64,
}

impl Ring {
    fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            head: 0,
            capacity,
            total: 0,
        }
    }

    fn push(&mut self, entry: LogEntry) {
        if self.entries.len() < self.capacity {
            self.entries.push(entry);
        } else {
            self.entries[self.head] = entry;
            self.head = (self.head + 1) & (self.capacity - 1);
        }
        self.total += 1;
    }

    fn get(&self, index: usize) -> Option<LogEntry> {
        if index >= self.entries.len() {
            return None;
        }
        let slot = (self.head + index) & (self.capacity - 1);
        Some(self.entries[slot])
    }
}

/// A logger: level filter, optional stdout echo and ring buffer.
///
/// Level and echo use atomics; the ring is behind a mutex, so a logger can
/// be shared between threads.
pub struct Logger {
    level: AtomicU8,
    echo: AtomicBool,
    ring: Mutex<Ring>,
}

impl Logger {
    /// Creates a logger from `config`.
    #[must_use]
    pub fn new(config: LogConfig) -> Self {
        let capacity = config
            .capacity
            .max(1)
            .checked_next_power_of_two()
            .unwrap_or(LogConfig::DEFAULT_CAPACITY);
        Logger {
            level: AtomicU8::new(config.level as u8),
            echo: AtomicBool::new(config.echo),
            ring: Mutex::new(Ring::new(capacity)),
        }
    }

    /// Sets the minimum log level.
    ///
    /// Messages below this level will not be logged.
    pub fn set_level(&self, level: Level) {
        self.level.store(level as u8, Ordering::SeqCst);
    }

    /// Returns the current minimum log level.
    pub fn level(&self) -> Level {
        Level::from_u8(self.level.load(Ordering::Relaxed))
    }

    /// Checks if a message at the given level would be logged.
    pub fn enabled(&self, level: Level) -> bool {
        level as u8 <= self.level.load(Ordering::Relaxed)
    }

    /// Turns stdout echo on or off.
    pub fn set_echo(&self, echo: bool) {
        self.echo.store(echo, Ordering::Relaxed);
    }

    /// Returns whether records are echoed to stdout.
    pub fn echo(&self) -> bool {
        self.echo.load(Ordering::Relaxed)
    }

    /// Records a message if `level` passes the filter.
    pub fn log(&self, level: Level, target: &'static str, args: Arguments<'_>) {
        static RESET: &str = "\x1b[0m";

        if !self.enabled(level) {
            return;
        }

        if self.echo() {
            let color = level.color_code();
            let level_str = level.as_str();
            println!("{color}[{level_str}]{RESET} {target}: {args}");
        }

        // Format before locking: `args` may log through this logger.
        let entry = LogEntry::new(level, target, args);
        self.ring().push(entry);
    }

    /// Ring buffer size in entries.
    pub fn capacity(&self) -> usize {
        self.ring().capacity
    }

    /// Number of entries currently held.
    pub fn count(&self) -> usize {
        self.ring().entries.len()
    }

    /// Returns the entry at `index`, where 0 is the oldest entry held.
    pub fn get(&self, index: usize) -> Option<LogEntry> {
        self.ring().get(index)
    }

    /// Returns every held entry, oldest first.
    pub fn entries(&self) -> Vec<LogEntry> {
        let ring = self.ring();
        (0..ring.entries.len()).filter_map(|i| ring.get(i)).collect()
    }

    /// Number of messages recorded since creation, overwritten ones included.
    pub fn total_logged(&self) -> u64 {
        self.ring().total
    }

    /// Drops every held entry. `total_logged` is not reset.
    pub fn clear(&self) {
        let mut ring = self.ring();
        ring.entries.clear();
        ring.head = 0;
    }

    fn ring(&self) -> MutexGuard<'_, Ring> {
        // A panic while holding the lock cannot leave the ring inconsistent.
        self.ring.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("level", &self.level())
            .field("echo", &self.echo())
            .field("count", &self.count())
            .finish()
    }
}

/// Process-wide logger.
static LOGGER: OnceLock<Logger> = OnceLock::new();

/// Installs the process-wide logger.
///
/// Only the first call installs `config`. Later calls return the logger
/// that is already installed and record a warning on it.
///
/// # Example
///
/// ```
/// use frog_log::{init, LogConfig};
///
/// let logger = init(LogConfig::from_env());
/// assert!(std::ptr::eq(logger, frog_log::logger()));
/// ```
pub fn init(config: LogConfig) -> &'static Logger {
    let mut installed = false;
    let logger = LOGGER.get_or_init(|| {
        installed = true;
        Logger::new(config)
    });

    if !installed {
        logger.log(
            Level::Warn,
            module_path!(),
            format_args!("logger already initialised, keeping existing configuration"),
        );
    }
    logger
}

/// Returns the process-wide logger.
///
/// Installs one with [`LogConfig::default`] if [`init`] has not run yet.
///
/// # Example
///
/// ```
/// use frog_log::logger;
///
/// let logger = logger();
/// logger.set_level(frog_log::Level::Debug);
/// ```
pub fn logger() -> &'static Logger {
    LOGGER.get_or_init(|| Logger::new(LogConfig::default()))
}

/// Sets the minimum log level for the process-wide logger.
///
/// # Example
///
/// ```
/// use frog_log::{set_level, Level};
///
/// set_level(Level::Debug);
/// ```
pub fn set_level(level: Level) {
    logger().set_level(level);
}

/// Sets the minimum log level from a string.
///
/// # Example
///
/// ```
/// use frog_log::set_level_from_str;
///
/// set_level_from_str("debug").unwrap();
/// ```
pub fn set_level_from_str(s: &str) -> Result<(), String> {
    let level = Level::from_str(s)?;
    set_level(level);
    Ok(())
}

/// The primary logging macro.
///
/// Logs a message at the specified level. The macro automatically captures
/// the module path where it was called. Without a `logger:` argument the
/// process-wide logger is used.
///
/// # Example
///
/// ```
/// use frog_log::{log, Level, LogConfig, Logger};
///
/// # frog_log::set_level(Level::Info);
/// log!(level: Level::Info, "This is an info message: {}", 42);
///
/// let local = Logger::new(LogConfig { echo: false, ..LogConfig::default() });
/// log!(logger: &local, level: Level::Error, "device lost");
/// assert_eq!(local.count(), 1);
/// ```
#[macro_export]
macro_rules! log {
    (logger: $logger:expr, level: $level:expr, $($arg:tt)*) => {
        {
            let logger: &$crate::Logger = $logger;
            let level = $level;
            if logger.enabled(level) {
                logger.log(level, module_path!(), format_args!($($arg)*));
            }
        }
    };
    (level: $level:expr, $($arg:tt)*) => {
        $crate::log!(logger: $crate::logger(), level: $level, $($arg)*)
    };
}

/// Logs a message at the Error level.
///
/// # Example
///
/// ```
/// use frog_log::error;
///
/// # let path = "/tmp/shader.spv";
/// error!("Failed to open file: {}", path);
/// ```
#[macro_export]
macro_rules! error {
    (logger: $logger:expr, $($arg:tt)*) => {
        $crate::log!(logger: $logger, level: $crate::Level::Error, $($arg)*)
    };
    ($($arg:tt)*) => {
        $crate::log!(level: $crate::Level::Error, $($arg)*)
    };
}

/// Logs a message at the Warn level.
#[macro_export]
macro_rules! warn {
    (logger: $logger:expr, $($arg:tt)*) => {
        $crate::log!(logger: $logger, level: $crate::Level::Warn, $($arg)*)
    };
    ($($arg:tt)*) => {
        $crate::log!(level: $crate::Level::Warn, $($arg)*)
    };
}

/// Logs a message at the Info level.
///
/// # Example
///
/// ```
/// use frog_log::info;
///
/// # frog_log::set_level(frog_log::Level::Info);
/// info!("Application started successfully");
/// ```
#[macro_export]
macro_rules! info {
    (logger: $logger:expr, $($arg:tt)*) => {
        $crate::log!(logger: $logger, level: $crate::Level::Info, $($arg)*)
    };
    ($($arg:tt)*) => {
        $crate::log!(level: $crate::Level::Info, $($arg)*)
    };
}

/// Logs a message at the Debug level.
#[macro_export]
macro_rules! debug {
    (logger: $logger:expr, $($arg:tt)*) => {
        $crate::log!(logger: $logger, level: $crate::Level::Debug, $($arg)*)
    };
    ($($arg:tt)*) => {
        $crate::log!(level: $crate::Level::Debug, $($arg)*)
    };
}

/// Logs a message at the Trace level.
///
/// # Example
///
/// ```
/// use frog_log::trace;
///
/// # let function_name = "record_commands";
/// # frog_log::set_level(frog_log::Level::Trace);
/// trace!("Entering function: {}", function_name);
/// ```
#[macro_export]
macro_rules! trace {
    (logger: $logger:expr, $($arg:tt)*) => {
        $crate::log!(logger: $logger, level: $crate::Level::Trace, $($arg)*)
    };
    ($($arg:tt)*) => {
        $crate::log!(level: $crate::Level::Trace, $($arg)*)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiet(capacity: usize) -> Logger {
        Logger::new(LogConfig {
            level: Level::Trace,
            capacity,
            echo: false,
        })
    }

    #[test]
    fn test_level_ordering() {
        assert!(Level::Error < Level::Warn);
        assert!(Level::Warn < Level::Info);
        assert!(Level::Info < Level::Debug);
        assert!(Level::Debug < Level::Trace);
    }

    #[test]
    fn test_level_from_str() {
        assert_eq!(Level::from_str("error"), Ok(Level::Error));
        assert_eq!(Level::from_str("WARN"), Ok(Level::Warn));
        assert_eq!(Level::from_str("warning"), Ok(Level::Warn));
        assert_eq!(Level::from_str("Info"), Ok(Level::Info));
        assert_eq!(Level::from_str(" DEBUG "), Ok(Level::Debug));
        assert_eq!(Level::from_str("trace"), Ok(Level::Trace));
        assert!(Level::from_str("invalid").is_err());
    }

    #[test]
    fn test_level_as_str() {
        assert_eq!(Level::Error.as_str(), "ERROR");
        assert_eq!(Level::Warn.as_str(), "WARN");
        assert_eq!(Level::Info.as_str(), "INFO");
        assert_eq!(Level::Debug.as_str(), "DEBUG");
        assert_eq!(Level::Trace.to_string(), "TRACE");
    }

    #[test]
    fn test_logger_level_filtering() {
        let logger = quiet(16);
        logger.set_level(Level::Info);

        assert!(logger.enabled(Level::Error));
        assert!(logger.enabled(Level::Warn));
        assert!(logger.enabled(Level::Info));
        assert!(!logger.enabled(Level::Debug));
        assert!(!logger.enabled(Level::Trace));

        debug!(logger: &logger, "filtered out");
        info!(logger: &logger, "kept");
        assert_eq!(logger.count(), 1);

        logger.set_level(Level::Debug);
        assert!(logger.enabled(Level::Debug));
        assert!(!logger.enabled(Level::Trace));
        assert_eq!(logger.level(), Level::Debug);
    }

    #[test]
    fn test_entries_record_level_and_target() {
        let logger = quiet(16);
        warn!(logger: &logger, "low memory: {} KB", 512);

        let entry = logger.get(0).unwrap();
        assert_eq!(entry.level(), Level::Warn);
        assert_eq!(entry.target(), module_path!());
        assert_eq!(entry.text(), "low memory: 512 KB");
        assert_eq!(
            entry.to_string(),
            format!("[WARN] {}: low memory: 512 KB", module_path!())
        );
        assert!(logger.get(1).is_none());
    }

    #[test]
    fn test_capacity_rounds_up_to_power_of_two() {
        assert_eq!(quiet(5).capacity(), 8);
        assert_eq!(quiet(0).capacity(), 1);
        assert_eq!(quiet(8192).capacity(), 8192);
        assert_eq!(quiet(usize::MAX).capacity(), LogConfig::DEFAULT_CAPACITY);
        assert_eq!(quiet(usize::MAX / 2 + 2).capacity(), LogConfig::DEFAULT_CAPACITY);
    }

    #[test]
    fn test_huge_capacity_still_records() {
        let logger = quiet(usize::MAX);
        for i in 0..3 {
            info!(logger: &logger, "entry {}", i);
        }
        assert_eq!(logger.count(), 3);
        assert_eq!(logger.get(2).unwrap().text(), "entry 2");
    }

    struct Nested<'a>(&'a Logger);

    impl fmt::Display for Nested<'_> {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            debug!(logger: self.0, "formatting nested value");
            f.write_str("nested")
        }
    }

    #[test]
    fn test_display_may_log_to_same_logger() {
        use std::sync::mpsc;
        use std::sync::Arc;
        use std::thread;
        use std::time::Duration;

        let logger = Arc::new(quiet(16));
        let (tx, rx) = mpsc::channel();

        let worker = Arc::clone(&logger);
        thread::spawn(move || {
            info!(logger: &worker, "outer {}", Nested(&worker));
            let _ = tx.send(());
        });

        rx.recv_timeout(Duration::from_secs(5))
            .expect("logging from inside a Display impl deadlocked");

        let texts: Vec<String> = logger
            .entries()
            .iter()
            .map(|e| e.text().to_owned())
            .collect();
        assert_eq!(texts, ["formatting nested value", "outer nested"]);
    }

    #[test]
    fn test_ring_overwrites_oldest() {
        let logger = quiet(4);
        for i in 0..10 {
            info!(logger: &logger, "message {}", i);
        }

        assert_eq!(logger.count(), 4);
        assert_eq!(logger.total_logged(), 10);

        let texts: Vec<String> = logger
            .entries()
            .iter()
            .map(|e| e.text().to_owned())
            .collect();
        assert_eq!(texts, ["message 6", "message 7", "message 8", "message 9"]);
        assert_eq!(logger.get(0).unwrap().text(), "message 6");
        assert_eq!(logger.get(3).unwrap().text(), "message 9");
    }

    #[test]
    fn test_clear_keeps_total() {
        let logger = quiet(4);
        for i in 0..6 {
            info!(logger: &logger, "{}", i);
        }

        logger.clear();
        assert_eq!(logger.count(), 0);
        assert_eq!(logger.total_logged(), 6);

        info!(logger: &logger, "after clear");
        assert_eq!(logger.get(0).unwrap().text(), "after clear");
    }

    #[test]
    fn test_long_message_truncated() {
        let logger = quiet(4);
        let long = "x".repeat(1000);
        info!(logger: &logger, "{}", long);

        assert_eq!(logger.get(0).unwrap().text().len(), MAX_MESSAGE_LEN);
    }

    #[test]
    fn test_truncation_respects_char_boundary() {
        let logger = quiet(4);
        // 255 ASCII bytes leave one byte, too few for a two-byte char.
        let text = format!("{}é and more", "a".repeat(MAX_MESSAGE_LEN - 1));
        info!(logger: &logger, "{}", text);

        let entry = logger.get(0).unwrap();
        assert_eq!(entry.text().len(), MAX_MESSAGE_LEN - 1);
        assert!(entry.text().chars().all(|c| c == 'a'));
    }

    #[test]
    fn test_config_from_vars() {
        let config = LogConfig::from_vars(|name| match name {
            "FROG_LOG" => Some("debug".to_owned()),
            "FROG_LOG_ECHO" => Some("0".to_owned()),
            _ => None,
        });
        assert_eq!(config.level, Level::Debug);
        assert!(!config.echo);
        assert_eq!(config.capacity, LogConfig::DEFAULT_CAPACITY);

        let config = LogConfig::from_vars(|_| Some("bogus".to_owned()));
        assert_eq!(config, LogConfig::default());

        let config = LogConfig::from_vars(|_| None);
        assert_eq!(config, LogConfig::default());
    }

    #[test]
    fn test_set_level_from_str() {
        let logger = quiet(4);
        logger.set_level(Level::from_str("error").unwrap());
        assert_eq!(logger.level(), Level::Error);
        assert!(set_level_from_str("invalid").is_err());
    }

    #[test]
    fn test_global_logger_singleton() {
        let first = init(LogConfig {
            echo: false,
            ..LogConfig::default()
        });
        let second = init(LogConfig {
            level: Level::Trace,
            capacity: 2,
            echo: true,
        });

        assert!(std::ptr::eq(first, second));
        assert!(std::ptr::eq(first, logger()));
        assert!(
            logger()
                .entries()
                .iter()
                .any(|e| e.level() == Level::Warn && e.text().contains("already initialised"))
        );
    }

    #[test]
    fn test_thread_safety() {
        use std::sync::Arc;
        use std::thread;

        let logger = Arc::new(quiet(1024));

        let handles: Vec<_> = (0..10)
            .map(|i| {
                let logger = Arc::clone(&logger);
                thread::spawn(move || {
                    for j in 0..10 {
                        info!(logger: &logger, "Thread {} message {}", i, j);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(logger.count(), 100);
        assert_eq!(logger.total_logged(), 100);
    }

    #[test]
    fn test_module_path_capture() {
        let logger = quiet(4);
        trace!(logger: &logger, "Testing module path capture");
        assert!(logger.get(0).unwrap().target().starts_with("frog_log"));
    }
}
