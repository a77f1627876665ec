//! Turns formatted segments into the physical lines a destination receives.

use std::fmt::Write;

use colored::Colorize;

use crate::{FormattedRecord, buffer::LineBuf};

/// One or two lines rendered from a single record.
#[derive(Clone, Debug, Default)]
pub struct RenderedLines {
    first: LineBuf,
    second: Option<LineBuf>,
}

impl RenderedLines {
    pub fn first(&self) -> &str {
        self.first.as_str()
    }

    pub fn second(&self) -> Option<&str> {
        self.second.as_ref().map(LineBuf::as_str)
    }

    pub fn len(&self) -> usize {
        1 + usize::from(self.second.is_some())
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.first()).chain(self.second())
    }
}

/// Writes `[date-time] [process]`, `[date-time]` or `process:` and reports
/// whether anything was written.
fn write_prefix(line: &mut LineBuf, record: &FormattedRecord<'_>) -> bool {
    let date_time = record.date_time();
    let process = record.process();
    match (date_time.is_empty(), process.is_empty()) {
        (false, false) => line.append(format_args!("[{date_time}] [{process}]")),
        (false, true) => line.append(format_args!("[{date_time}]")),
        (true, false) => line.append(format_args!("{process}:")),
        (true, true) => return false,
    }
    true
}

/// Writes `LEVEL`, `LEVEL at file:line in function` or `LEVEL in function`.
fn write_label(line: &mut LineBuf, record: &FormattedRecord<'_>, colorize: bool) {
    let level = record.level();
    if colorize {
        line.append(format_args!("{}", level.name().color(level.color())));
    } else {
        let _ = line.write_str(level.name());
    }
    let debug = record.debug();
    if !debug.is_empty() {
        let joiner = if record.file_line_shown() { " at " } else { " " };
        line.append(format_args!("{joiner}{debug}"));
    }
}

/// Layout used by files, terminals and channels.
///
/// Every line carries the level name. A record without a message ends in
/// `.`; a split record puts the message on its own `->` line under a
/// repeated prefix.
pub fn render_text(record: &FormattedRecord<'_>, colorize: bool) -> RenderedLines {
    let mut lines = RenderedLines::default();
    let line = &mut lines.first;
    if write_prefix(line, record) {
        let _ = line.write_char(' ');
    }
    write_label(line, record, colorize);
    let message = record.message();
    if message.is_empty() {
        let _ = line.write_char('.');
    } else if record.is_split() {
        let _ = line.write_char(':');
        let mut second = LineBuf::new();
        if write_prefix(&mut second, record) {
            let _ = second.write_char(' ');
        }
        second.append(format_args!("-> {message}"));
        lines.second = Some(second);
    } else {
        line.append(format_args!(": {message}"));
    }
    lines
}

/// Layout used for syslog, where the priority already carries the level.
///
/// The level name only appears next to a location, or alone when the
/// record has no segment at all.
pub fn render_syslog(record: &FormattedRecord<'_>) -> RenderedLines {
    let mut lines = RenderedLines::default();
    if record.is_blank() {
        let _ = lines.first.write_str(record.level().name());
        return lines;
    }
    let line = &mut lines.first;
    let has_prefix = write_prefix(line, record);
    let message = record.message();
    if !record.debug().is_empty() {
        if has_prefix {
            let _ = line.write_char(' ');
        }
        write_label(line, record, false);
        if message.is_empty() {
            let _ = line.write_char('.');
        } else if record.is_split() {
            let _ = line.write_char(':');
            let mut second = LineBuf::new();
            if write_prefix(&mut second, record) {
                let _ = second.write_char(' ');
            }
            second.append(format_args!("-> {message}"));
            lines.second = Some(second);
        } else {
            line.append(format_args!(": {message}"));
        }
    } else if !message.is_empty() {
        let sep = if has_prefix { " " } else { "" };
        line.append(format_args!("{sep}{message}"));
    }
    lines
}
