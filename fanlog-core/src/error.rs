use thiserror::Error;

/// Failure to read a setting from its textual form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown log level `{0}`")]
    UnknownLevel(String),
    #[error("log level {0} is outside 0..=5")]
    LevelOutOfRange(u8),
    #[error("invalid location mask `{0}`")]
    InvalidMask(String),
    #[error("invalid message format `{0}`")]
    InvalidFormat(String),
    #[error("unknown message format toggle `{0}`")]
    UnknownToggle(String),
    #[error("unknown syslog facility `{0}`")]
    UnknownFacility(String),
}
