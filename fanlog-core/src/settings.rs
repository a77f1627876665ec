use std::{
    fmt,
    ops::{BitAnd, BitOr, BitOrAssign, Not},
    str::FromStr,
};

use crate::{
    Level, LocationMask, ParseError,
    level::{MAX_LEVEL, parse_bits},
};

/// Set of optional segments a record shows.
///
/// The bit layout is stable so numeric formats stay meaningful across
/// versions. The timer and time-of-day toggles each use two sub-bits: one
/// selects milliseconds, the other a finer resolution, and setting both
/// shows the whole-second value with no fraction.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageFormat(u32);

impl MessageFormat {
    pub const EMPTY: MessageFormat = MessageFormat(0);

    pub const WORD_WRAP: MessageFormat = MessageFormat(1 << 0);
    pub const MESSAGE: MessageFormat = MessageFormat(1 << 1);
    pub const FILE_LINE: MessageFormat = MessageFormat(1 << 2);
    pub const FUNC: MessageFormat = MessageFormat(1 << 3);
    pub const PID: MessageFormat = MessageFormat(1 << 4);
    pub const NAME: MessageFormat = MessageFormat(1 << 5);
    pub const TZ_SYM_LINK: MessageFormat = MessageFormat(1 << 6);
    pub const TIME_MICROS: MessageFormat = MessageFormat(1 << 7);
    pub const TIME_MILLIS: MessageFormat = MessageFormat(1 << 8);
    pub const DATE: MessageFormat = MessageFormat(1 << 9);
    pub const TZ_ABBR: MessageFormat = MessageFormat(1 << 10);
    pub const TIMER_NANOS: MessageFormat = MessageFormat(1 << 11);
    pub const TIMER_MILLIS: MessageFormat = MessageFormat(1 << 12);

    /// Timer in whole seconds.
    pub const TIMER: MessageFormat = Self::TIMER_MILLIS.union(Self::TIMER_NANOS);
    /// Time of day in whole seconds.
    pub const TIME: MessageFormat = Self::TIME_MILLIS.union(Self::TIME_MICROS);
    pub const DATE_TIME_INFO: MessageFormat = Self::TIMER
        .union(Self::TZ_ABBR)
        .union(Self::DATE)
        .union(Self::TIME)
        .union(Self::TZ_SYM_LINK);
    pub const PROCESS_INFO: MessageFormat = Self::NAME.union(Self::PID);
    pub const DEBUG_INFO: MessageFormat = Self::FUNC.union(Self::FILE_LINE).union(Self::MESSAGE);
    pub const ALL: MessageFormat = Self::DATE_TIME_INFO
        .union(Self::PROCESS_INFO)
        .union(Self::DEBUG_INFO)
        .union(Self::WORD_WRAP);
    pub const DEFAULT: MessageFormat = Self::ALL;

    const NAMES: [(&'static str, MessageFormat); 18] = [
        ("word-wrap", Self::WORD_WRAP),
        ("message", Self::MESSAGE),
        ("file-line", Self::FILE_LINE),
        ("func", Self::FUNC),
        ("pid", Self::PID),
        ("name", Self::NAME),
        ("tz-link", Self::TZ_SYM_LINK),
        ("time-us", Self::TIME_MICROS),
        ("time-ms", Self::TIME_MILLIS),
        ("date", Self::DATE),
        ("tz-abbr", Self::TZ_ABBR),
        ("timer-ns", Self::TIMER_NANOS),
        ("timer-ms", Self::TIMER_MILLIS),
        ("timer", Self::TIMER),
        ("time", Self::TIME),
        ("date-time", Self::DATE_TIME_INFO),
        ("process", Self::PROCESS_INFO),
        ("debug", Self::DEBUG_INFO),
    ];

    pub const fn from_bits(bits: u32) -> Self {
        MessageFormat(bits & Self::ALL.0)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn union(self, other: MessageFormat) -> Self {
        MessageFormat(self.0 | other.0)
    }

    /// Every bit of `other` is set.
    pub const fn contains(self, other: MessageFormat) -> bool {
        self.0 & other.0 == other.0
    }

    /// At least one bit of `other` is set.
    pub const fn intersects(self, other: MessageFormat) -> bool {
        self.0 & other.0 != 0
    }

    fn resolution(self, millis: MessageFormat, fine: MessageFormat, fine_kind: SubSecond) -> SubSecond {
        match (self.intersects(millis), self.intersects(fine)) {
            (true, false) => SubSecond::Millis,
            (false, true) => fine_kind,
            _ => SubSecond::None,
        }
    }
}

impl Default for MessageFormat {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl BitOr for MessageFormat {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl BitOrAssign for MessageFormat {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = self.union(rhs);
    }
}

impl BitAnd for MessageFormat {
    type Output = Self;
    fn bitand(self, rhs: Self) -> Self {
        MessageFormat(self.0 & rhs.0)
    }
}

impl Not for MessageFormat {
    type Output = Self;
    fn not(self) -> Self {
        MessageFormat(!self.0 & Self::ALL.0)
    }
}

impl fmt::Debug for MessageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MessageFormat({:#06x})", self.0)
    }
}

impl FromStr for MessageFormat {
    type Err = ParseError;

    /// Accepts a bit pattern (decimal or `0x` hex), `all`, `none`,
    /// `default`, or toggle names separated by `,` or `|`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(bits) = parse_bits(s) {
            if bits & !Self::ALL.0 != 0 {
                return Err(ParseError::InvalidFormat(s.to_string()));
            }
            return Ok(MessageFormat(bits));
        }
        match s.to_ascii_lowercase().as_str() {
            "all" | "default" => return Ok(Self::ALL),
            "none" | "" => return Ok(Self::EMPTY),
            _ => {}
        }
        s.split([',', '|'])
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .try_fold(Self::EMPTY, |format, name| {
                let lower = name.to_ascii_lowercase();
                Self::NAMES
                    .iter()
                    .find(|(known, _)| *known == lower)
                    .map(|(_, toggle)| format | *toggle)
                    .ok_or_else(|| ParseError::UnknownToggle(name.to_string()))
            })
    }
}

/// Fractional-second resolution appended to a clock value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubSecond {
    None,
    Millis,
    Micros,
    Nanos,
}

/// What a logger or a sink shows: a verbosity threshold, the levels that
/// carry source locations, and the optional segments of each record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Settings {
    verbosity: Level,
    location_mask: LocationMask,
    format: MessageFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self::new(MAX_LEVEL, LocationMask::default(), MessageFormat::DEFAULT)
    }
}

impl Settings {
    pub const fn new(verbosity: Level, location_mask: LocationMask, format: MessageFormat) -> Self {
        Self {
            verbosity,
            location_mask,
            format,
        }
    }

    pub const fn verbosity(&self) -> Level {
        self.verbosity
    }

    pub const fn location_mask(&self) -> LocationMask {
        self.location_mask
    }

    pub const fn format(&self) -> MessageFormat {
        self.format
    }

    pub fn set_verbosity(&mut self, verbosity: Level) {
        self.verbosity = verbosity;
    }

    pub fn set_location_mask(&mut self, location_mask: LocationMask) {
        self.location_mask = location_mask;
    }

    pub fn set_format(&mut self, format: MessageFormat) {
        self.format = format;
    }

    /// Sets the verbosity threshold.
    pub fn with_verbosity(self, verbosity: Level) -> Self {
        Self { verbosity, ..self }
    }

    /// Sets the levels that carry source locations.
    pub fn with_location_mask(self, location_mask: LocationMask) -> Self {
        Self {
            location_mask,
            ..self
        }
    }

    /// Sets the message format.
    pub fn with_format(self, format: MessageFormat) -> Self {
        Self { format, ..self }
    }

    pub fn is_shown(&self, level: Level) -> bool {
        level <= self.verbosity
    }

    pub fn is_location_shown(&self, level: Level) -> bool {
        self.location_mask.contains(level)
    }

    pub fn is_timer(&self) -> bool {
        self.format.intersects(MessageFormat::TIMER)
    }

    pub fn timer_resolution(&self) -> SubSecond {
        self.format.resolution(
            MessageFormat::TIMER_MILLIS,
            MessageFormat::TIMER_NANOS,
            SubSecond::Nanos,
        )
    }

    pub fn is_timer_millis(&self) -> bool {
        self.timer_resolution() == SubSecond::Millis
    }

    pub fn is_timer_nanos(&self) -> bool {
        self.timer_resolution() == SubSecond::Nanos
    }

    pub fn is_tz_abbr(&self) -> bool {
        self.format.intersects(MessageFormat::TZ_ABBR)
    }

    pub fn is_date(&self) -> bool {
        self.format.intersects(MessageFormat::DATE)
    }

    pub fn is_time(&self) -> bool {
        self.format.intersects(MessageFormat::TIME)
    }

    pub fn time_resolution(&self) -> SubSecond {
        self.format.resolution(
            MessageFormat::TIME_MILLIS,
            MessageFormat::TIME_MICROS,
            SubSecond::Micros,
        )
    }

    pub fn is_time_millis(&self) -> bool {
        self.time_resolution() == SubSecond::Millis
    }

    pub fn is_time_micros(&self) -> bool {
        self.time_resolution() == SubSecond::Micros
    }

    pub fn is_tz_sym_link(&self) -> bool {
        self.format.intersects(MessageFormat::TZ_SYM_LINK)
    }

    pub fn is_date_time_info(&self) -> bool {
        self.format.intersects(MessageFormat::DATE_TIME_INFO)
    }

    pub fn is_name(&self) -> bool {
        self.format.intersects(MessageFormat::NAME)
    }

    pub fn is_pid(&self) -> bool {
        self.format.intersects(MessageFormat::PID)
    }

    pub fn is_process_info(&self) -> bool {
        self.format.intersects(MessageFormat::PROCESS_INFO)
    }

    pub fn is_func(&self) -> bool {
        self.format.intersects(MessageFormat::FUNC)
    }

    pub fn is_file_line(&self) -> bool {
        self.format.intersects(MessageFormat::FILE_LINE)
    }

    pub fn is_message(&self) -> bool {
        self.format.intersects(MessageFormat::MESSAGE)
    }

    pub fn is_debug_info(&self) -> bool {
        self.format.intersects(MessageFormat::DEBUG_INFO)
    }

    pub fn is_word_wrap(&self) -> bool {
        self.format.intersects(MessageFormat::WORD_WRAP)
    }
}
