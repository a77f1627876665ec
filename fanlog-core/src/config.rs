use std::sync::LazyLock;

use derive_from_env::FromEnv;

use crate::{Level, LocationMask, MessageFormat, Settings};

/// Startup configuration read from `FANLOG_*` environment variables.
#[derive(FromEnv, Debug, Clone)]
#[from_env(prefix = "FANLOG")]
#[allow(non_snake_case)]
pub struct FanlogConfig {
    #[from_env(default = "debug")]
    pub LEVEL: Level,
    #[from_env(default = "0x21")]
    pub LOCATION: LocationMask,
    #[from_env(default = "default")]
    pub FORMAT: MessageFormat,
    #[from_env(default = "true")]
    pub STDOUT: bool,
    #[from_env(default = "false")]
    pub SYSLOG: bool,
    #[from_env(default = "daemon")]
    pub SYSLOG_FACILITY: String,
    /// Append-mode log file; empty for none.
    #[from_env(default = "")]
    pub FILE: String,
}

impl Default for FanlogConfig {
    fn default() -> Self {
        Self {
            LEVEL: Level::Debug,
            LOCATION: LocationMask::default(),
            FORMAT: MessageFormat::DEFAULT,
            STDOUT: true,
            SYSLOG: false,
            SYSLOG_FACILITY: "daemon".to_string(),
            FILE: String::new(),
        }
    }
}

impl FanlogConfig {
    pub fn settings(&self) -> Settings {
        Settings::new(self.LEVEL, self.LOCATION, self.FORMAT)
    }

    /// The configured log file, if any.
    pub fn file(&self) -> Option<&str> {
        Some(self.FILE.trim()).filter(|path| !path.is_empty())
    }

    /// Unknown facility names fall back to `daemon`.
    #[cfg(unix)]
    pub fn syslog_facility(&self) -> crate::SyslogFacility {
        self.SYSLOG_FACILITY.parse().unwrap_or_default()
    }
}

/// Environment configuration; falls back to the defaults when any variable
/// fails to parse.
pub static FANLOG_CONFIG: LazyLock<FanlogConfig> =
    LazyLock::new(|| FanlogConfig::from_env().unwrap_or_default());
