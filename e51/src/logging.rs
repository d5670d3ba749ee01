//! Firmware logging with configurable log levels.
//!
//! Messages go to the MMUART0 console once the boot routine has initialised
//! it. Before that, or while the console lock is held, they are dropped.
//!
//! Log levels are similar to log4j:
//! - TRACE: Fine-grained debugging information
//! - DEBUG: Debugging information
//! - INFO: Informational messages
//! - WARN: Warning messages
//! - ERROR: Error messages

use core::sync::atomic::{AtomicU8, Ordering};

#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u8)]
pub enum LogLevel {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
}

impl LogLevel {
    pub const fn tag(self) -> &'static str {
        match self {
            LogLevel::Trace => "[TRACE] ",
            LogLevel::Debug => "[DEBUG] ",
            LogLevel::Info => "[INFO]  ",
            LogLevel::Warn => "[WARN]  ",
            LogLevel::Error => "[ERROR] ",
        }
    }
}

/// Global log level filter. Messages below this level are suppressed.
static LOG_LEVEL: AtomicU8 = AtomicU8::new(LogLevel::Info as u8);

/// Get the current log level threshold.
pub fn get_log_level() -> LogLevel {
    match LOG_LEVEL.load(Ordering::Relaxed) {
        0 => LogLevel::Trace,
        1 => LogLevel::Debug,
        2 => LogLevel::Info,
        3 => LogLevel::Warn,
        _ => LogLevel::Error,
    }
}

/// Set the log level threshold. Messages below this level will be suppressed.
pub fn set_log_level(level: LogLevel) {
    LOG_LEVEL.store(level as u8, Ordering::Relaxed);
}

/// Check if a message at the given level should be logged.
#[inline]
pub fn should_log(level: LogLevel) -> bool {
    level as u8 >= LOG_LEVEL.load(Ordering::Relaxed)
}

/// Internal macro for firmware logging with level filtering.
#[macro_export]
macro_rules! klog {
    ($level:expr, $($arg:tt)*) => {{
        let level: $crate::logging::LogLevel = $level;
        if $crate::logging::should_log(level) {
            $crate::console::with_console(|uart| {
                use core::fmt::Write;
                let _ = uart.write_str(level.tag());
                let _ = write!(uart, $($arg)*);
                let _ = uart.write_str("\n");
            });
        }
    }};
}

/// Log a trace-level message (finest granularity).
#[macro_export]
macro_rules! ktrace {
    ($($arg:tt)*) => {
        $crate::klog!($crate::logging::LogLevel::Trace, $($arg)*)
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! kdebug {
    ($($arg:tt)*) => {
        $crate::klog!($crate::logging::LogLevel::Debug, $($arg)*)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! kinfo {
    ($($arg:tt)*) => {
        $crate::klog!($crate::logging::LogLevel::Info, $($arg)*)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! kwarn {
    ($($arg:tt)*) => {
        $crate::klog!($crate::logging::LogLevel::Warn, $($arg)*)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! kerror {
    ($($arg:tt)*) => {
        $crate::klog!($crate::logging::LogLevel::Error, $($arg)*)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_ordering() {
        assert!(LogLevel::Trace < LogLevel::Debug);
        assert!(LogLevel::Warn < LogLevel::Error);
    }

    #[test]
    fn test_threshold_filters_and_round_trips() {
        // Single test owns the global threshold to avoid cross-test races.
        assert_eq!(get_log_level(), LogLevel::Info);
        assert!(should_log(LogLevel::Info));
        assert!(!should_log(LogLevel::Debug));

        set_log_level(LogLevel::Error);
        assert_eq!(get_log_level(), LogLevel::Error);
        assert!(!should_log(LogLevel::Warn));
        assert!(should_log(LogLevel::Error));

        set_log_level(LogLevel::Trace);
        assert!(should_log(LogLevel::Trace));

        set_log_level(LogLevel::Info);
    }

    #[test]
    fn test_macros_drop_output_without_console() {
        crate::kerror!("no console yet: {}", 42);
        crate::kinfo!("still fine");
    }

    #[test]
    fn test_tags_are_aligned() {
        assert!([LogLevel::Trace, LogLevel::Debug, LogLevel::Info, LogLevel::Warn, LogLevel::Error]
            .iter()
            .all(|l| l.tag().len() == 8));
    }
}
