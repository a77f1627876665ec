use std::fmt;

pub const DATE_TIME_CAPACITY: usize = 256;
pub const PROCESS_CAPACITY: usize = 64;
pub const DEBUG_CAPACITY: usize = 1024;
pub const MESSAGE_CAPACITY: usize = 1024;
pub const LINE_CAPACITY: usize = 4096;

/// Fixed-capacity text buffer.
///
/// Writes past the capacity are cut at the last character boundary that
/// fits and otherwise ignored, so a `SegmentBuf` never grows and writing
/// into it never fails. Allocation done by the `Display` impls written in
/// (chrono's date formatting, for one) is not covered.
#[derive(Clone)]
pub struct SegmentBuf<const N: usize> {
    bytes: [u8; N],
    len: usize,
    truncated: bool,
}

pub type MessageBuf = SegmentBuf<MESSAGE_CAPACITY>;
pub type LineBuf = SegmentBuf<LINE_CAPACITY>;

impl<const N: usize> SegmentBuf<N> {
    pub const fn new() -> Self {
        Self {
            bytes: [0; N],
            len: 0,
            truncated: false,
        }
    }

    pub fn as_str(&self) -> &str {
        // Only whole characters are ever copied in.
        std::str::from_utf8(&self.bytes[..self.len]).unwrap_or_default()
    }

    pub const fn len(&self) -> usize {
        self.len
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    /// Whether some write did not fit.
    pub const fn is_truncated(&self) -> bool {
        self.truncated
    }

    pub fn clear(&mut self) {
        self.len = 0;
        self.truncated = false;
    }

    /// Appends formatted text, truncating on overflow.
    pub fn append(&mut self, args: fmt::Arguments<'_>) {
        // write_str never fails; an error can only come from a Display impl.
        let _ = fmt::Write::write_fmt(self, args);
    }
}

impl<const N: usize> Default for SegmentBuf<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> fmt::Write for SegmentBuf<N> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let room = N - self.len;
        let mut end = s.len().min(room);
        if end < s.len() {
            self.truncated = true;
            while !s.is_char_boundary(end) {
                end -= 1;
            }
        }
        self.bytes[self.len..self.len + end].copy_from_slice(&s.as_bytes()[..end]);
        self.len += end;
        Ok(())
    }
}

impl<const N: usize> fmt::Display for SegmentBuf<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<const N: usize> fmt::Debug for SegmentBuf<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

impl<const N: usize> PartialEq<str> for SegmentBuf<N> {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl<const N: usize> PartialEq<&str> for SegmentBuf<N> {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}
