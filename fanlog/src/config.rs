use std::path::Path;

use fanlog_core::{FANLOG_CONFIG, Level, LocationMask, LogFile, MessageFormat, Settings, Sink};

use crate::{Logger, ScopeGuard, ScopeKind, global};

/// Builder for a logging scope and the sinks it opens.
pub struct ConfigBuilder {
    settings: Settings,
    files: Vec<LogFile>,
    stdout: Option<bool>,
    stderr: bool,
    #[cfg(unix)]
    syslog: Option<fanlog_core::SyslogFacility>,
    sinks: Vec<Sink>,
    name: Option<String>,
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self {
            settings: FANLOG_CONFIG.settings(),
            files: Vec::new(),
            stdout: None,
            stderr: false,
            #[cfg(unix)]
            syslog: None,
            sinks: Vec::new(),
            name: None,
        }
    }
}

impl ConfigBuilder {
    /// Adds a log file, opened now in append mode.
    pub fn with_log_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self, std::io::Error> {
        self.files.push(LogFile::open(path)?);
        Ok(self)
    }
    /// Maybe adds a log file.
    pub fn maybe_with_log_file<P: AsRef<Path>>(
        self,
        path: Option<P>,
    ) -> Result<Self, std::io::Error> {
        match path {
            Some(path) => self.with_log_file(path),
            None => Ok(self),
        }
    }
    /// Ignore stdout logging
    pub fn no_stdout(self) -> Self {
        Self {
            stdout: Some(false),
            ..self
        }
    }
    /// Dynamically set the stdout flag.
    /// Without it, global scopes log to stdout and local scopes do not.
    pub fn with_stdout(self, yes: bool) -> Self {
        Self {
            stdout: Some(yes),
            ..self
        }
    }
    /// Also logs to stderr.
    pub fn with_stderr(self) -> Self {
        Self {
            stderr: true,
            ..self
        }
    }
    /// Logs to syslog under `facility`, tagged with the scope's process name.
    #[cfg(unix)]
    pub fn with_syslog(self, facility: fanlog_core::SyslogFacility) -> Self {
        Self {
            syslog: Some(facility),
            ..self
        }
    }
    /// Adds a sink that keeps its own settings rather than the builder's.
    pub fn with_sink(mut self, sink: Sink) -> Self {
        self.sinks.push(sink);
        self
    }
    /// Sets the process name written by records
    pub fn with_name(self, name: &str) -> Self {
        Self {
            name: Some(name.into()),
            ..self
        }
    }
    /// Maybe sets the process name
    pub fn maybe_with_name(self, name: Option<&str>) -> Self {
        match name {
            Some(name) => self.with_name(name),
            None => self,
        }
    }
    pub fn with_level(self, level: Level) -> Self {
        Self {
            settings: self.settings.with_verbosity(level),
            ..self
        }
    }
    pub fn with_location_mask(self, location_mask: LocationMask) -> Self {
        Self {
            settings: self.settings.with_location_mask(location_mask),
            ..self
        }
    }
    pub fn with_format(self, format: MessageFormat) -> Self {
        Self {
            settings: self.settings.with_format(format),
            ..self
        }
    }
    pub fn with_settings(self, settings: Settings) -> Self {
        Self { settings, ..self }
    }

    fn enter(self, logger: &Logger, kind: ScopeKind) -> ScopeGuard<'_> {
        let Self {
            settings,
            files,
            stdout,
            stderr,
            #[cfg(unix)]
            syslog,
            sinks,
            name,
        } = self;
        let guard = match kind {
            ScopeKind::Global => logger.scope_global(settings),
            ScopeKind::Local => logger.scope_local(settings),
        };
        if let Some(name) = name {
            guard.set_process_name(name);
        }
        if stdout.unwrap_or(kind == ScopeKind::Global) {
            guard.add_sink(Sink::stdout().with_settings(settings));
        }
        if stderr {
            guard.add_sink(Sink::stderr().with_settings(settings));
        }
        for file in files {
            guard.add_sink(Sink::new(file).with_settings(settings));
        }
        #[cfg(unix)]
        if let Some(facility) = syslog {
            let ident = logger.process_name();
            guard.add_sink(Sink::syslog(&ident, facility).with_settings(settings));
        }
        for sink in sinks {
            guard.add_sink(sink);
        }
        guard
    }

    /// Enters a global scope on the process-wide logger.
    /// Returns a guard that restores the previous configuration when dropped.
    #[must_use = "ScopeGuard must be kept alive for the configuration to apply. Do \"let _guard = logger_config().init_global();\""]
    pub fn init_global(self) -> ScopeGuard<'static> {
        self.enter(global(), ScopeKind::Global)
    }
    /// Enters a local scope on the process-wide logger.
    #[must_use = "ScopeGuard must be kept alive for the configuration to apply. Do \"let _guard = logger_config().init_local();\""]
    pub fn init_local(self) -> ScopeGuard<'static> {
        self.enter(global(), ScopeKind::Local)
    }
    pub fn scope_global_on(self, logger: &Logger) -> ScopeGuard<'_> {
        self.enter(logger, ScopeKind::Global)
    }
    pub fn scope_local_on(self, logger: &Logger) -> ScopeGuard<'_> {
        self.enter(logger, ScopeKind::Local)
    }
    /// Runs `f` inside a global scope on the process-wide logger.
    pub fn scope_global<R>(self, f: impl FnOnce() -> R) -> R {
        let _guard = self.init_global();
        f()
    }
    /// Runs `f` inside a local scope on the process-wide logger.
    pub fn scope_local<R>(self, f: impl FnOnce() -> R) -> R {
        let _guard = self.init_local();
        f()
    }
}

/// Returns a default ConfigBuilder, seeded from the `FANLOG_*` variables.
pub fn logger_config() -> ConfigBuilder {
    ConfigBuilder::default()
}
