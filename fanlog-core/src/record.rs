use std::path::Path;

use crate::{Level, Timestamp};

/// Where a record was emitted from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Location<'a> {
    pub line: u32,
    pub file: &'a str,
    pub function: &'a str,
}

impl<'a> Location<'a> {
    pub const fn new(line: u32, file: &'a str, function: &'a str) -> Self {
        Self {
            line,
            file,
            function,
        }
    }

    pub fn has_file_line(&self) -> bool {
        self.line > 0 && !self.file.is_empty()
    }

    pub fn has_function(&self) -> bool {
        !self.function.is_empty()
    }
}

/// Name and pid written in the process segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Process<'a> {
    pub name: &'a str,
    pub pid: u32,
}

/// Owned process identity, resolved once per logger.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProcessIdentity {
    pub name: String,
    pub pid: u32,
}

impl ProcessIdentity {
    pub fn new(name: impl Into<String>, pid: u32) -> Self {
        Self {
            name: name.into(),
            pid,
        }
    }

    /// Base name of the running executable, or `default` when unknown.
    pub fn current() -> Self {
        let name = std::env::args_os()
            .next()
            .and_then(|arg0| {
                Path::new(&arg0)
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
            })
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| "default".to_string());
        Self::new(name, std::process::id())
    }

    pub fn as_process(&self) -> Process<'_> {
        Process {
            name: &self.name,
            pid: self.pid,
        }
    }
}

/// A log call after its message has been formatted, before any sink saw it.
#[derive(Clone, Copy, Debug)]
pub struct Record<'a> {
    pub level: Level,
    pub location: Option<Location<'a>>,
    pub message: &'a str,
    pub timestamp: &'a Timestamp,
    pub process: Process<'a>,
}
