use std::{fmt, str::FromStr};

use colored::Color;

use crate::ParseError;

/// Severity of a record, from the most severe to the most verbose.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Level {
    /// Produced by failed fatal assertions.
    Internal = 0,
    /// The program can continue but something was lost.
    Critical = 1,
    /// Incorrect input.
    Error = 2,
    /// Tolerable input that should be corrected.
    Warning = 3,
    Info = 4,
    Debug = 5,
}

/// Most verbose level callers may emit, lowered by the `max_level_*`
/// features. The most restrictive enabled feature wins.
pub const MAX_LEVEL: Level = if cfg!(feature = "max_level_internal") {
    Level::Internal
} else if cfg!(feature = "max_level_critical") {
    Level::Critical
} else if cfg!(feature = "max_level_error") {
    Level::Error
} else if cfg!(feature = "max_level_warning") {
    Level::Warning
} else if cfg!(feature = "max_level_info") {
    Level::Info
} else {
    Level::Debug
};

/// Levels for which callers may attach a source location.
pub const MAX_LOCATION: LocationMask = LocationMask::EMPTY
    .with(Level::Internal)
    .with(Level::Debug);

impl Level {
    pub const ALL: [Level; 6] = [
        Level::Internal,
        Level::Critical,
        Level::Error,
        Level::Warning,
        Level::Info,
        Level::Debug,
    ];

    pub const fn index(self) -> u8 {
        self as u8
    }

    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Level::Internal),
            1 => Some(Level::Critical),
            2 => Some(Level::Error),
            3 => Some(Level::Warning),
            4 => Some(Level::Info),
            5 => Some(Level::Debug),
            _ => None,
        }
    }

    /// Label written in front of a record.
    pub const fn name(self) -> &'static str {
        match self {
            Level::Internal => "INTERNAL ERROR",
            Level::Critical => "CRITICAL ERROR",
            Level::Error => "ERROR",
            Level::Warning => "WARNING",
            Level::Info => "INFO",
            Level::Debug => "DEBUG",
        }
    }

    pub(crate) const fn color(self) -> Color {
        match self {
            Level::Internal => Color::Magenta,
            Level::Critical => Color::BrightRed,
            Level::Error => Color::Red,
            Level::Warning => Color::Yellow,
            Level::Info => Color::Green,
            Level::Debug => Color::Blue,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<log::Level> for Level {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => Level::Error,
            log::Level::Warn => Level::Warning,
            log::Level::Info => Level::Info,
            log::Level::Debug | log::Level::Trace => Level::Debug,
        }
    }
}

impl FromStr for Level {
    type Err = ParseError;

    /// Accepts a level index (`0`..`5`) or a case-insensitive level name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(index) = s.parse::<u8>() {
            return Level::from_index(index).ok_or(ParseError::LevelOutOfRange(index));
        }
        match s.to_ascii_lowercase().as_str() {
            "internal" | "fatal" => Ok(Level::Internal),
            "critical" | "crit" => Ok(Level::Critical),
            "error" | "err" => Ok(Level::Error),
            "warning" | "warn" => Ok(Level::Warning),
            "info" => Ok(Level::Info),
            "debug" | "trace" => Ok(Level::Debug),
            _ => Err(ParseError::UnknownLevel(s.to_string())),
        }
    }
}

/// One bit per level: bit `L` set means source locations are shown for `L`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LocationMask(u8);

impl LocationMask {
    pub const EMPTY: LocationMask = LocationMask(0);
    pub const ALL: LocationMask = LocationMask(0b11_1111);

    pub const fn from_bits(bits: u8) -> Self {
        LocationMask(bits & Self::ALL.0)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn with(self, level: Level) -> Self {
        LocationMask(self.0 | (1 << level.index()))
    }

    pub const fn contains(self, level: Level) -> bool {
        self.0 & (1 << level.index()) != 0
    }
}

impl Default for LocationMask {
    fn default() -> Self {
        MAX_LOCATION
    }
}

impl FromStr for LocationMask {
    type Err = ParseError;

    /// Accepts a number (decimal or `0x` hex), `all`, `none`, or a list of
    /// level names separated by `,` or `|`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(bits) = parse_bits(s) {
            let bits = u8::try_from(bits).map_err(|_| ParseError::InvalidMask(s.to_string()))?;
            if bits & !Self::ALL.0 != 0 {
                return Err(ParseError::InvalidMask(s.to_string()));
            }
            return Ok(LocationMask(bits));
        }
        match s.to_ascii_lowercase().as_str() {
            "all" => return Ok(Self::ALL),
            "none" | "" => return Ok(Self::EMPTY),
            _ => {}
        }
        s.split([',', '|'])
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .try_fold(Self::EMPTY, |mask, name| Ok(mask.with(name.parse()?)))
    }
}

/// Parses a decimal or `0x`-prefixed hexadecimal bit pattern.
pub(crate) fn parse_bits(s: &str) -> Option<u32> {
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        u32::from_str_radix(hex, 16).ok()
    } else {
        s.parse().ok()
    }
}
