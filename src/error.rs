use thiserror::Error;

/// A command-level failure. Every variant knows its own wire text; the
/// dispatcher never hand-assembles an error string outside of this type.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("wrong number of arguments for '{0}' command")]
    WrongArity(String),

    #[error("value is not an integer or out of range")]
    NotAnInteger,

    #[error("invalid {0} index")]
    InvalidIndex(&'static str),

    #[error("timeout is not a float or out of range")]
    InvalidTimeout,

    #[error("syntax error")]
    SyntaxError,

    #[error("The ID specified in XADD must be greater than 0-0")]
    IdTooSmall,

    #[error("The ID specified in XADD is equal or smaller than the target stream top item")]
    IdNotIncreasing,

    #[error("invalid ID format")]
    InvalidIdFormat,
}

impl CommandError {
    /// The RESP error-type prefix this variant is reported under. Every
    /// variant is `ERR` — the three stores are independent (no command
    /// ever observes a cross-store type collision), so there is no
    /// `WRONGTYPE` case to report.
    pub fn code(&self) -> &'static str {
        "ERR"
    }
}

pub type CommandResult = Result<Vec<u8>, CommandError>;
