use std::fmt::Write;

use crate::{
    Level, Record, Settings, SubSecond,
    buffer::{DATE_TIME_CAPACITY, DEBUG_CAPACITY, PROCESS_CAPACITY, SegmentBuf},
};

/// A record broken into the segments one sink shows, plus the flags its
/// writer needs to lay them out.
#[derive(Clone, Debug)]
pub struct FormattedRecord<'a> {
    level: Level,
    date_time: SegmentBuf<DATE_TIME_CAPACITY>,
    process: SegmentBuf<PROCESS_CAPACITY>,
    debug: SegmentBuf<DEBUG_CAPACITY>,
    file_line_shown: bool,
    full_debug_info: bool,
    word_wrap: bool,
    message: &'a str,
}

impl<'a> FormattedRecord<'a> {
    pub fn level(&self) -> Level {
        self.level
    }

    pub fn date_time(&self) -> &str {
        self.date_time.as_str()
    }

    pub fn process(&self) -> &str {
        self.process.as_str()
    }

    pub fn debug(&self) -> &str {
        self.debug.as_str()
    }

    pub fn message(&self) -> &'a str {
        self.message
    }

    /// The debug segment starts with `file:line`.
    pub fn file_line_shown(&self) -> bool {
        self.file_line_shown
    }

    /// File, line and function were all supplied and all enabled.
    pub fn is_full_debug_info(&self) -> bool {
        self.full_debug_info
    }

    /// The record is written as a location line followed by a message line.
    pub fn is_split(&self) -> bool {
        self.full_debug_info && self.word_wrap && !self.message.is_empty()
    }

    pub fn is_blank(&self) -> bool {
        self.date_time.is_empty()
            && self.process.is_empty()
            && self.debug.is_empty()
            && self.message.is_empty()
    }
}

/// Builds the segments of `record` as `settings` asks for them.
pub fn format_record<'a>(record: &Record<'a>, settings: &Settings) -> FormattedRecord<'a> {
    let mut formatted = FormattedRecord {
        level: record.level,
        date_time: SegmentBuf::new(),
        process: SegmentBuf::new(),
        debug: SegmentBuf::new(),
        file_line_shown: false,
        full_debug_info: false,
        word_wrap: settings.is_word_wrap(),
        message: if settings.is_message() {
            record.message
        } else {
            ""
        },
    };
    if settings.is_date_time_info() {
        write_date_time(&mut formatted.date_time, record, settings);
    }
    if settings.is_process_info() {
        if settings.is_name() {
            let _ = formatted.process.write_str(record.process.name);
        }
        if settings.is_pid() {
            formatted.process.append(format_args!("({})", record.process.pid));
        }
    }
    if let Some(location) = &record.location
        && settings.is_debug_info()
        && settings.is_location_shown(record.level)
    {
        let debug = &mut formatted.debug;
        if settings.is_file_line() && location.has_file_line() {
            debug.append(format_args!("{}:{}", location.file, location.line));
            formatted.file_line_shown = true;
        }
        if settings.is_func() && location.has_function() {
            let sep = if debug.is_empty() { "" } else { " " };
            debug.append(format_args!("{sep}in {}", location.function));
        }
        formatted.full_debug_info = location.has_file_line()
            && location.has_function()
            && settings.is_file_line()
            && settings.is_func();
    }
    formatted
}

fn write_date_time(
    out: &mut SegmentBuf<DATE_TIME_CAPACITY>,
    record: &Record<'_>,
    settings: &Settings,
) {
    let timestamp = record.timestamp;
    let mut sep = "";
    if settings.is_timer() {
        let timer = timestamp.monotonic();
        out.append(format_args!("{}", timer.as_secs()));
        match settings.timer_resolution() {
            SubSecond::Millis => out.append(format_args!(".{:03}", timer.subsec_millis())),
            SubSecond::Nanos => out.append(format_args!(".{:09}", timer.subsec_nanos())),
            SubSecond::None | SubSecond::Micros => {}
        }
        sep = " ";
    }
    if settings.is_tz_abbr() {
        out.append(format_args!("{sep}({})", timestamp.zone_abbr()));
        sep = " ";
    }
    if settings.is_date() || settings.is_time() {
        let wall = timestamp.wall();
        let pattern = match (settings.is_date(), settings.is_time()) {
            (true, true) => "%Y-%m-%d %H:%M:%S",
            (true, false) => "%Y-%m-%d",
            _ => "%H:%M:%S",
        };
        out.append(format_args!("{sep}{}", wall.format(pattern)));
        if settings.is_time() {
            // A leap second reports a sub-second part past one second.
            let micros = wall.timestamp_subsec_micros().min(999_999);
            match settings.time_resolution() {
                SubSecond::Millis => out.append(format_args!(".{:03}", micros / 1000)),
                SubSecond::Micros => out.append(format_args!(".{micros:06}")),
                SubSecond::None | SubSecond::Nanos => {}
            }
        }
        sep = " ";
    }
    if settings.is_tz_sym_link() {
        out.append(format_args!("{sep}'{}'", timestamp.zone_link()));
    }
}
