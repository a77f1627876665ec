//! # fanlog
//! Leveled logger fanning each record out to files, terminals and syslog,
//! with scoped configuration.
//!
//! ## Usage
//! ```toml
//! // Cargo.toml
//! ...
//! [dependencies]
//! fanlog = "0.2.0"
//! ```
//!
//! ```rust
//! use fanlog::logger_config;
//!
//! let _guard = logger_config()
//!    .init_global();
//! fanlog::info!("Hello, world!");
//! log::warn!("the log crate macros work too");
//! // the previous configuration comes back when the guard is dropped
//! ```
//!
//! ## Explicit loggers
//! Every sink has its own settings; records reach the newest sink first.
//! ```rust
//! use fanlog::{Level, Logger, MessageFormat, Settings, Sink};
//!
//! let logger = Logger::new();
//! let (sink, lines) = Sink::channel();
//! logger.add_sink(sink.with_settings(Settings::default().with_format(MessageFormat::MESSAGE)));
//! logger.emit(Level::Info, None, format_args!("value={}", 5));
//! assert_eq!(lines.try_recv().unwrap(), "INFO: value=5");
//! ```
//!
//! ## Scopes
//! A global scope hides the sinks registered before it; a local scope adds
//! to them and imposes its settings on them. Sinks registered inside a scope
//! keep their own settings. Dropping the guard restores everything.
//! ```rust
//! use fanlog::{Level, Logger, MessageFormat, Settings, Sink};
//!
//! let logger = Logger::new();
//! let plain = Settings::default().with_format(MessageFormat::MESSAGE);
//! let (sink, lines) = Sink::channel();
//! logger.add_sink(sink.with_settings(plain));
//! {
//!     let scope = logger.scope_local(plain.with_verbosity(Level::Error));
//!     scope.add_sink(Sink::stderr());
//!     logger.emit(Level::Info, None, format_args!("stderr only"));
//! }
//! logger.emit(Level::Info, None, format_args!("back"));
//! assert_eq!(lines.try_iter().collect::<Vec<_>>(), ["INFO: back"]);
//! assert_eq!(logger.settings(), Settings::default());
//! ```
//!
//! ## Logging to files
//! The log file is created if it does not exist and appended to if it does.
//!
//! ```rust
//! use fanlog::{MessageFormat, logger_config};
//!
//! let path = std::env::temp_dir().join("fanlog-doc.log");
//! std::fs::remove_file(&path).ok();
//! let guard = logger_config()
//!     .with_log_file(&path)
//!     .expect("Unable to create log file")
//!     .no_stdout() // disable stdout logging if needed
//!     .with_format(MessageFormat::MESSAGE)
//!     .init_global();
//!
//! log::warn!("disk almost full");
//! fanlog::info!("{} files left", 3);
//! drop(guard);
//! assert_eq!(
//!     std::fs::read_to_string(&path).unwrap(),
//!     "WARNING: disk almost full\nINFO: 3 files left\n"
//! );
//! ```

mod config;
mod logger;
mod macros;
mod scope;

use std::sync::LazyLock;

use log::{LevelFilter, Log};

pub use config::{ConfigBuilder, logger_config};
pub use fanlog_core::{
    ConsoleStream, FANLOG_CONFIG, FanlogConfig, FormattedRecord, Level, Location, LocationMask,
    LogChannel, LogConsole, LogFile, LogWriter, MAX_LEVEL, MAX_LOCATION, MessageFormat,
    ParseError, ProcessIdentity, Settings, Sink, SubSecond,
};
#[cfg(unix)]
pub use fanlog_core::{LogSyslog, SyslogFacility};
pub use logger::{Logger, SinkId};
pub use scope::{ScopeGuard, ScopeKind, SinkGuard};

/// Process-wide logger used by the macros and the `log` facade.
static GLOBAL_LOGGER: LazyLock<Logger> = LazyLock::new(|| {
    let logger = Logger::from_env();
    if log::set_boxed_logger(Box::new(LogBridge)).is_ok() {
        log::set_max_level(LevelFilter::Trace);
    }
    logger
});

/// The process-wide logger, created from the `FANLOG_*` variables on first
/// use.
pub fn global() -> &'static Logger {
    &GLOBAL_LOGGER
}

/// Forwards `log` crate records to the process-wide logger.
struct LogBridge;

impl Log for LogBridge {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        global().enabled(metadata.level().into())
    }

    fn log(&self, record: &log::Record) {
        let level = Level::from(record.level());
        if level > MAX_LEVEL {
            return;
        }
        let location = Location::new(
            record.line().unwrap_or(0),
            record.file().unwrap_or(""),
            record.module_path().unwrap_or(""),
        );
        global().emit(
            level,
            MAX_LOCATION.contains(level).then_some(&location),
            *record.args(),
        );
    }

    fn flush(&self) {
        global().flush();
    }
}
