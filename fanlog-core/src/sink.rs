use std::path::Path;

use crossbeam_channel::Receiver;

use crate::{LogChannel, LogConsole, LogFile, LogWriter, Record, Settings, format_record};

/// An output destination with its own verbosity and format.
pub struct Sink {
    settings: Settings,
    writer: Box<dyn LogWriter>,
}

impl Sink {
    /// Wraps `writer` with the default settings.
    pub fn new<W: LogWriter + 'static>(writer: W) -> Self {
        Self::from_boxed(Box::new(writer))
    }

    pub fn from_boxed(writer: Box<dyn LogWriter>) -> Self {
        Self {
            settings: Settings::default(),
            writer,
        }
    }

    /// Appends to `path`; a file that cannot be opened gives a sink that
    /// drops everything.
    pub fn file<P: AsRef<Path>>(path: P) -> Self {
        Self::new(LogFile::open_or_inert(path))
    }

    pub fn stdout() -> Self {
        Self::new(LogConsole::stdout())
    }

    pub fn stderr() -> Self {
        Self::new(LogConsole::stderr())
    }

    #[cfg(unix)]
    pub fn syslog(ident: &str, facility: crate::SyslogFacility) -> Self {
        Self::new(crate::LogSyslog::open(ident, facility))
    }

    /// A sink sending its rendered lines to the returned receiver.
    pub fn channel() -> (Self, Receiver<String>) {
        let (writer, receiver) = LogChannel::unbounded();
        (Self::new(writer), receiver)
    }

    pub fn with_settings(self, settings: Settings) -> Self {
        Self { settings, ..self }
    }

    pub fn settings(&self) -> Settings {
        self.settings
    }

    pub fn set_settings(&mut self, settings: Settings) {
        self.settings = settings;
    }

    /// Formats `record` under this sink's settings and writes it, unless
    /// the level is filtered out.
    pub fn log(&mut self, record: &Record<'_>) {
        let settings = self.settings;
        self.log_as(record, &settings);
    }

    /// Like [`Sink::log`], with `settings` standing in for the sink's own.
    pub fn log_as(&mut self, record: &Record<'_>, settings: &Settings) {
        if !settings.is_shown(record.level) {
            return;
        }
        let formatted = format_record(record, settings);
        self.writer.write_record(&formatted);
    }

    pub fn flush(&mut self) {
        self.writer.flush();
    }
}

impl std::fmt::Debug for Sink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sink")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}
