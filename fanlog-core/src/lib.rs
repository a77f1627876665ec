//! # fanlog-core
//! Core pieces of fanlog: settings, record formatting and output sinks.
//!
//! Nothing here holds global state; the `fanlog` crate owns the dispatcher
//! and the scope stack built on top of these types.

mod buffer;
mod config;
mod error;
mod format;
mod layout;
mod level;
mod log_writer;
mod record;
mod settings;
mod sink;
#[cfg(unix)]
mod syslog;
mod timestamp;

pub use buffer::{
    DATE_TIME_CAPACITY, DEBUG_CAPACITY, LINE_CAPACITY, LineBuf, MESSAGE_CAPACITY, MessageBuf,
    PROCESS_CAPACITY, SegmentBuf,
};
pub use config::{FANLOG_CONFIG, FanlogConfig};
pub use error::ParseError;
pub use format::{FormattedRecord, format_record};
pub use layout::{RenderedLines, render_syslog, render_text};
pub use level::{Level, LocationMask, MAX_LEVEL, MAX_LOCATION};
pub use log_writer::{ConsoleStream, LogChannel, LogConsole, LogFile, LogWriter};
pub use record::{Location, Process, ProcessIdentity, Record};
pub use settings::{MessageFormat, Settings, SubSecond};
pub use sink::Sink;
#[cfg(unix)]
pub use syslog::{LogSyslog, SyslogFacility, priority as syslog_priority};
pub use timestamp::{LOCALTIME_PATH, Timestamp, read_zone_link};
