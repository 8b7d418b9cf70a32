//! Text encodings for packed buffers.
//!
//! Packed output is binary. These codecs carry it through text channels
//! (command lines, JSON documents, logs) and report malformed input with the
//! position of the offending byte.

pub mod base64;
pub mod error;
pub mod hex;

pub use error::{CodecError, Result};

use std::fmt;
use std::str::FromStr;

/// How a buffer is represented as text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Encoding {
    #[default]
    Hex,
    Base64,
    /// Bytes pass through unchanged.
    Raw,
}

impl Encoding {
    pub fn name(self) -> &'static str {
        match self {
            Encoding::Hex => "hex",
            Encoding::Base64 => "base64",
            Encoding::Raw => "raw",
        }
    }

    /// Encode `data` as text. Raw output replaces invalid UTF-8.
    pub fn encode(self, data: &[u8]) -> String {
        match self {
            Encoding::Hex => hex::encode(data),
            Encoding::Base64 => base64::encode(data),
            Encoding::Raw => String::from_utf8_lossy(data).into_owned(),
        }
    }

    pub fn decode(self, text: &str) -> Result<Vec<u8>> {
        match self {
            Encoding::Hex => hex::decode(text),
            Encoding::Base64 => base64::decode(text),
            Encoding::Raw => Ok(text.as_bytes().to_vec()),
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Encoding {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "hex" => Ok(Encoding::Hex),
            "base64" => Ok(Encoding::Base64),
            "raw" => Ok(Encoding::Raw),
            other => Err(format!("unknown encoding: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatch_round_trips() {
        let data = b"\x00\x01binary\xff";
        for encoding in [Encoding::Hex, Encoding::Base64] {
            let text = encoding.encode(data);
            assert_eq!(encoding.decode(&text).unwrap(), data, "{encoding}");
        }
        assert_eq!(Encoding::Raw.decode("abc").unwrap(), b"abc");
    }

    #[test]
    fn parses_names() {
        assert_eq!("HEX".parse::<Encoding>().unwrap(), Encoding::Hex);
        assert_eq!("base64".parse::<Encoding>().unwrap(), Encoding::Base64);
        assert!("base32".parse::<Encoding>().is_err());
    }
}
