//! Lowercase hexadecimal text.

use tracing::trace;

use crate::error::{CodecError, Result};

/// Encode `data` as lowercase hex, two digits per byte.
pub fn encode(data: &[u8]) -> String {
    ::hex::encode(data)
}

/// Decode hex text. Both cases are accepted.
pub fn decode(text: &str) -> Result<Vec<u8>> {
    ::hex::decode(text).map_err(|err| {
        trace!(len = text.len(), error = %err, "hex decode failed");
        match err {
            // the crate widens the offending byte to a char
            ::hex::FromHexError::InvalidHexCharacter { c, index } => CodecError::InvalidByte {
                position: index,
                byte: c as u8,
            },
            ::hex::FromHexError::OddLength => CodecError::OddLength,
            ::hex::FromHexError::InvalidStringLength => CodecError::InvalidLength,
        }
    })
}
