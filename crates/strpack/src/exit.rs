use std::fmt;
use std::io;

use strpack_codec::CodecError;
use strpack_format::{ErrorKind, PackError};

// Exit codes follow the sysexits-style ranges shared across our CLIs.
pub const SUCCESS: i32 = 0;
pub const DATA_INVALID: i32 = 60;
pub const USAGE: i32 = 64;
pub const INTERNAL: i32 = 125;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

pub fn io_error(context: &str, err: io::Error) -> CliError {
    CliError::new(INTERNAL, format!("{context}: {err}"))
}

pub fn pack_error(context: &str, err: PackError) -> CliError {
    let code = match err.kind() {
        ErrorKind::MalformedFormat | ErrorKind::Bounds | ErrorKind::Overflow => DATA_INVALID,
        ErrorKind::ParameterCount | ErrorKind::KindMismatch => USAGE,
    };
    CliError::new(code, format!("{context}: {err}"))
}

pub fn codec_error(context: &str, err: CodecError) -> CliError {
    CliError::new(DATA_INVALID, format!("{context}: {err}"))
}
