use std::{fmt::Write, path::Path, time::Duration};

use chrono::{DateTime, Local};

use crate::buffer::SegmentBuf;

pub const ZONE_ABBR_CAPACITY: usize = 16;
pub const ZONE_LINK_CAPACITY: usize = 256;

/// Symlink naming the local time zone.
pub const LOCALTIME_PATH: &str = "/etc/localtime";
const ZONEINFO_DIR: &str = "usr/share/zoneinfo/";

/// Clock readings taken once per record and shared by every sink.
#[derive(Clone, Debug)]
pub struct Timestamp {
    wall: DateTime<Local>,
    monotonic: Duration,
    zone_abbr: SegmentBuf<ZONE_ABBR_CAPACITY>,
    zone_link: SegmentBuf<ZONE_LINK_CAPACITY>,
}

impl Timestamp {
    /// Reads the clocks. The zone link is only resolved when asked for,
    /// since it costs a syscall.
    pub fn capture(with_zone_link: bool) -> Self {
        let wall = Local::now();
        let mut timestamp = Self::from_parts(wall, monotonic_now(), "");
        timestamp.zone_abbr = zone_abbreviation(&wall);
        if with_zone_link {
            timestamp.zone_link = read_zone_link(Path::new(LOCALTIME_PATH));
        }
        timestamp
    }

    pub fn from_parts(wall: DateTime<Local>, monotonic: Duration, zone_abbr: &str) -> Self {
        let mut abbr = SegmentBuf::new();
        let _ = abbr.write_str(zone_abbr);
        Self {
            wall,
            monotonic,
            zone_abbr: abbr,
            zone_link: SegmentBuf::new(),
        }
    }

    pub fn with_zone_link(mut self, zone_link: &str) -> Self {
        self.zone_link.clear();
        let _ = self.zone_link.write_str(zone_link);
        self
    }

    pub fn wall(&self) -> &DateTime<Local> {
        &self.wall
    }

    pub fn monotonic(&self) -> Duration {
        self.monotonic
    }

    pub fn zone_abbr(&self) -> &str {
        self.zone_abbr.as_str()
    }

    pub fn zone_link(&self) -> &str {
        self.zone_link.as_str()
    }
}

/// Resolves the zone symlink at `path`, relative to the zoneinfo
/// directory when it points inside it. When the link cannot be read the
/// error description is returned instead.
pub fn read_zone_link(path: &Path) -> SegmentBuf<ZONE_LINK_CAPACITY> {
    let mut out = SegmentBuf::new();
    match std::fs::read_link(path) {
        Ok(target) => {
            let target = target.to_string_lossy();
            let zone = match target.find(ZONEINFO_DIR) {
                Some(at) => &target[at + ZONEINFO_DIR.len()..],
                None => &target[..],
            };
            let _ = out.write_str(zone);
        }
        Err(err) => {
            let _ = write!(out, "{err}");
        }
    }
    out
}

#[cfg(unix)]
fn monotonic_now() -> Duration {
    let mut ts = libc::timespec {
        tv_sec: 0,
        tv_nsec: 0,
    };
    // SAFETY: `ts` is a valid, writable timespec for the duration of the call.
    let rc = unsafe { libc::clock_gettime(libc::CLOCK_MONOTONIC, &mut ts) };
    if rc != 0 {
        return process_uptime();
    }
    Duration::new(ts.tv_sec as u64, ts.tv_nsec as u32)
}

#[cfg(not(unix))]
fn monotonic_now() -> Duration {
    process_uptime()
}

fn process_uptime() -> Duration {
    static START: std::sync::LazyLock<std::time::Instant> =
        std::sync::LazyLock::new(std::time::Instant::now);
    START.elapsed()
}

#[cfg(any(target_os = "linux", target_os = "macos", target_os = "freebsd"))]
fn zone_abbreviation(wall: &DateTime<Local>) -> SegmentBuf<ZONE_ABBR_CAPACITY> {
    use std::ffi::CStr;

    let mut abbr = SegmentBuf::new();
    let seconds = wall.timestamp() as libc::time_t;
    // SAFETY: `tm` is plain old data for which all-zero is a valid value; it
    // is overwritten by localtime_r on success.
    let mut tm: libc::tm = unsafe { std::mem::zeroed() };
    // SAFETY: both pointers refer to live locals for the duration of the call.
    let converted = unsafe { libc::localtime_r(&seconds, &mut tm) };
    if converted.is_null() || tm.tm_zone.is_null() {
        let _ = write!(abbr, "{}", wall.format("%:z"));
    } else {
        // SAFETY: tm_zone points at a NUL-terminated name held by libc's
        // time zone state, which outlives this call.
        let zone = unsafe { CStr::from_ptr(tm.tm_zone) };
        let _ = abbr.write_str(&zone.to_string_lossy());
    }
    abbr
}

#[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "freebsd")))]
fn zone_abbreviation(wall: &DateTime<Local>) -> SegmentBuf<ZONE_ABBR_CAPACITY> {
    let mut abbr = SegmentBuf::new();
    let _ = write!(abbr, "{}", wall.format("%:z"));
    abbr
}
