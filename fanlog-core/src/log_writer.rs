use std::{
    fs::File,
    io::{BufWriter, IsTerminal, Write},
    path::Path,
};

use crossbeam_channel::{Receiver, Sender, unbounded};

use crate::{FormattedRecord, RenderedLines, layout::render_text};

/// Destination-specific rendering of formatted records.
///
/// Writers must not log through the logger that owns them.
pub trait LogWriter: Send {
    fn write_record(&mut self, record: &FormattedRecord<'_>);
    fn flush(&mut self);
}

fn write_lines<W: Write>(out: &mut W, lines: &RenderedLines) {
    for line in lines.iter() {
        if writeln!(out, "{line}").is_err() {
            return;
        }
    }
    out.flush().ok();
}

/// Appends records to a file it opened itself and closes on drop.
///
/// A `LogFile` whose file could not be opened is inert: it accepts records
/// and drops them.
pub struct LogFile {
    file: Option<BufWriter<File>>,
}

impl LogFile {
    /// Opens `path` for appending, creating it if needed.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, std::io::Error> {
        let file = File::options().create(true).append(true).open(path)?;
        Ok(Self {
            file: Some(BufWriter::new(file)),
        })
    }

    /// Like [`LogFile::open`], but an unopenable file yields an inert writer.
    pub fn open_or_inert<P: AsRef<Path>>(path: P) -> Self {
        Self::open(path).unwrap_or(Self { file: None })
    }

    pub fn is_inert(&self) -> bool {
        self.file.is_none()
    }
}

impl LogWriter for LogFile {
    fn write_record(&mut self, record: &FormattedRecord<'_>) {
        if let Some(file) = &mut self.file {
            write_lines(file, &render_text(record, false));
        }
    }

    fn flush(&mut self) {
        if let Some(file) = &mut self.file {
            file.flush().ok();
        }
    }
}

/// Standard stream a [`LogConsole`] writes to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConsoleStream {
    Stdout,
    Stderr,
}

/// Writes records to stdout or stderr, which it never closes.
///
/// Level names are coloured when the stream is a terminal.
#[derive(Debug)]
pub struct LogConsole {
    stream: ConsoleStream,
    colorize: bool,
}

impl LogConsole {
    pub fn new(stream: ConsoleStream) -> Self {
        let colorize = match stream {
            ConsoleStream::Stdout => std::io::stdout().is_terminal(),
            ConsoleStream::Stderr => std::io::stderr().is_terminal(),
        };
        Self { stream, colorize }
    }

    pub fn stdout() -> Self {
        Self::new(ConsoleStream::Stdout)
    }

    pub fn stderr() -> Self {
        Self::new(ConsoleStream::Stderr)
    }

    /// Forces colouring on or off.
    pub fn with_color(self, colorize: bool) -> Self {
        Self { colorize, ..self }
    }

    pub fn stream(&self) -> ConsoleStream {
        self.stream
    }
}

impl LogWriter for LogConsole {
    fn write_record(&mut self, record: &FormattedRecord<'_>) {
        let lines = render_text(record, self.colorize);
        match self.stream {
            ConsoleStream::Stdout => write_lines(&mut std::io::stdout().lock(), &lines),
            ConsoleStream::Stderr => write_lines(&mut std::io::stderr().lock(), &lines),
        }
    }

    fn flush(&mut self) {
        match self.stream {
            ConsoleStream::Stdout => std::io::stdout().flush().ok(),
            ConsoleStream::Stderr => std::io::stderr().flush().ok(),
        };
    }
}

/// Sends every rendered line through a channel.
///
/// Lines sent after the receiver is gone are dropped.
#[derive(Clone, Debug)]
pub struct LogChannel {
    sender: Sender<String>,
}

impl LogChannel {
    pub fn new(sender: Sender<String>) -> Self {
        Self { sender }
    }

    /// Creates a writer together with the receiving end of its channel.
    pub fn unbounded() -> (Self, Receiver<String>) {
        let (sender, receiver) = unbounded();
        (Self::new(sender), receiver)
    }
}

impl LogWriter for LogChannel {
    fn write_record(&mut self, record: &FormattedRecord<'_>) {
        for line in render_text(record, false).iter() {
            self.sender.send(line.to_string()).ok();
        }
    }

    fn flush(&mut self) {}
}
