//! Writer forwarding records to the system log through syslog(3).
//!
//! POSIX allows one syslog connection per process: opening a second
//! `LogSyslog` replaces the ident and facility of the first, and dropping
//! either one closes the shared connection.

use std::{ffi::CString, fmt, str::FromStr};

use crate::{
    FormattedRecord, Level, LogWriter, ParseError,
    buffer::LINE_CAPACITY,
    layout::render_syslog,
};

/// Facility every record of a [`LogSyslog`] is filed under.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(i32)]
pub enum SyslogFacility {
    User = libc::LOG_USER,
    #[default]
    Daemon = libc::LOG_DAEMON,
    Auth = libc::LOG_AUTH,
    Syslog = libc::LOG_SYSLOG,
    Local0 = libc::LOG_LOCAL0,
    Local1 = libc::LOG_LOCAL1,
    Local2 = libc::LOG_LOCAL2,
    Local3 = libc::LOG_LOCAL3,
    Local4 = libc::LOG_LOCAL4,
    Local5 = libc::LOG_LOCAL5,
    Local6 = libc::LOG_LOCAL6,
    Local7 = libc::LOG_LOCAL7,
}

impl SyslogFacility {
    const NAMES: [(&'static str, SyslogFacility); 12] = [
        ("user", SyslogFacility::User),
        ("daemon", SyslogFacility::Daemon),
        ("auth", SyslogFacility::Auth),
        ("syslog", SyslogFacility::Syslog),
        ("local0", SyslogFacility::Local0),
        ("local1", SyslogFacility::Local1),
        ("local2", SyslogFacility::Local2),
        ("local3", SyslogFacility::Local3),
        ("local4", SyslogFacility::Local4),
        ("local5", SyslogFacility::Local5),
        ("local6", SyslogFacility::Local6),
        ("local7", SyslogFacility::Local7),
    ];

    pub fn name(self) -> &'static str {
        Self::NAMES
            .iter()
            .find(|(_, facility)| *facility == self)
            .map_or("daemon", |(name, _)| name)
    }
}

impl fmt::Display for SyslogFacility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SyslogFacility {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Self::NAMES
            .iter()
            .find(|(name, _)| *name == lower)
            .map(|(_, facility)| *facility)
            .ok_or_else(|| ParseError::UnknownFacility(s.to_string()))
    }
}

/// syslog(3) priority for each level.
pub const fn priority(level: Level) -> libc::c_int {
    match level {
        Level::Internal => libc::LOG_ALERT,
        Level::Critical => libc::LOG_CRIT,
        Level::Error => libc::LOG_ERR,
        Level::Warning => libc::LOG_WARNING,
        Level::Info => libc::LOG_INFO,
        Level::Debug => libc::LOG_DEBUG,
    }
}

/// Sends each record as one syslog call, or two for split records.
pub struct LogSyslog {
    // openlog keeps this pointer until closelog.
    ident: Option<CString>,
    facility: SyslogFacility,
}

impl LogSyslog {
    /// Opens the syslog connection with `ident` as tag and the pid attached.
    ///
    /// An ident containing a NUL byte yields an inert writer.
    pub fn open(ident: &str, facility: SyslogFacility) -> Self {
        let Ok(ident) = CString::new(ident) else {
            return Self {
                ident: None,
                facility,
            };
        };
        // SAFETY: `ident` is NUL-terminated and owned by the returned value,
        // which calls closelog before releasing it.
        unsafe {
            libc::openlog(
                ident.as_ptr(),
                libc::LOG_PID | libc::LOG_NDELAY,
                facility as libc::c_int,
            );
        }
        Self {
            ident: Some(ident),
            facility,
        }
    }

    pub fn facility(&self) -> SyslogFacility {
        self.facility
    }

    pub fn is_inert(&self) -> bool {
        self.ident.is_none()
    }

    fn send(&self, level: Level, line: &str) {
        let mut message = [0u8; LINE_CAPACITY + 1];
        let mut len = 0;
        for (slot, byte) in message
            .iter_mut()
            .zip(line.bytes().filter(|b| *b != 0).take(LINE_CAPACITY))
        {
            *slot = byte;
            len += 1;
        }
        let Ok(message) = std::ffi::CStr::from_bytes_with_nul(&message[..=len]) else {
            return;
        };
        // SAFETY: the format is a literal consuming exactly one C string
        // argument, and `message` is NUL-terminated.
        unsafe {
            libc::syslog(
                self.facility as libc::c_int | priority(level),
                c"%s".as_ptr(),
                message.as_ptr(),
            );
        }
    }
}

impl LogWriter for LogSyslog {
    fn write_record(&mut self, record: &FormattedRecord<'_>) {
        if self.is_inert() {
            return;
        }
        for line in render_syslog(record).iter() {
            self.send(record.level(), line);
        }
    }

    fn flush(&mut self) {}
}

impl Drop for LogSyslog {
    fn drop(&mut self) {
        if self.ident.is_some() {
            // SAFETY: closelog has no preconditions; the ident stays alive
            // until after this call.
            unsafe { libc::closelog() };
        }
    }
}
