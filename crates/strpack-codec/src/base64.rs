//! Standard-alphabet base64 with `=` padding.

use ::base64::engine::general_purpose::STANDARD;
use ::base64::{DecodeError, Engine as _};
use tracing::trace;

use crate::error::{CodecError, Result};

pub fn encode(data: &[u8]) -> String {
    STANDARD.encode(data)
}

pub fn decode(text: &str) -> Result<Vec<u8>> {
    STANDARD.decode(text).map_err(|err| {
        trace!(len = text.len(), error = %err, "base64 decode failed");
        match err {
            DecodeError::InvalidByte(position, byte) if byte == b'=' => {
                CodecError::InvalidPadding { position }
            }
            DecodeError::InvalidByte(position, byte)
            | DecodeError::InvalidLastSymbol(position, byte) => {
                CodecError::InvalidByte { position, byte }
            }
            DecodeError::InvalidLength => CodecError::InvalidLength,
            DecodeError::InvalidPadding => CodecError::InvalidPadding {
                position: text.find('=').unwrap_or(text.len()),
            },
        }
    })
}

/// Length of the encoded text for `len` input bytes.
pub fn encoded_len(len: usize) -> usize {
    len.div_ceil(3) * 4
}

/// Length of the decoded payload of well-formed, padded `text`.
pub fn decoded_len(text: &str) -> usize {
    let padding = text.bytes().rev().take_while(|&b| b == b'=').count();
    (text.len() / 4 * 3).saturating_sub(padding)
}

#[cfg(test)]
mod tests {
    use super::*;

    const VECTORS: &[(&str, &str)] = &[
        ("", ""),
        ("a", "YQ=="),
        ("ab", "YWI="),
        ("abc", "YWJj"),
        ("abc123!?$*&()'-=@~", "YWJjMTIzIT8kKiYoKSctPUB+"),
        ("TutorialsPoint?java8", "VHV0b3JpYWxzUG9pbnQ/amF2YTg="),
    ];

    #[test]
    fn known_vectors() {
        for (plain, encoded) in VECTORS {
            assert_eq!(encode(plain.as_bytes()), *encoded, "encode {plain:?}");
            assert_eq!(
                decode(encoded).unwrap(),
                plain.as_bytes(),
                "decode {encoded:?}"
            );
        }
    }

    #[test]
    fn size_helpers_match_vectors() {
        for (plain, encoded) in VECTORS {
            assert_eq!(encoded_len(plain.len()), encoded.len());
            assert_eq!(decoded_len(encoded), plain.len());
        }
    }

    #[test]
    fn reports_position_of_invalid_symbol() {
        let text = "YWJkZWZhZWRmYWZhZmFmYWZhZmFmYXNmYWZhc2Zkc2FmZGFzeHp2enZhYXNkYWRhZGFzZGFk]Q==";
        let err = decode(text).unwrap_err();
        assert_eq!(
            err,
            CodecError::InvalidByte {
                position: 72,
                byte: b']'
            }
        );
        assert_eq!(err.position(), Some(72));
    }

    #[test]
    fn rejects_truncated_input() {
        assert!(decode("YWJ").is_err());
        assert!(decode("Y").is_err());
    }
}
