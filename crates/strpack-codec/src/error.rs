/// Errors raised while decoding hex or base64 text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    /// A byte outside the alphabet.
    #[error("invalid input byte 0x{byte:02x} at position {position}")]
    InvalidByte { position: usize, byte: u8 },

    /// Hex text with an odd number of digits.
    #[error("hex text has an odd number of digits")]
    OddLength,

    /// Base64 text whose length cannot be produced by the encoder.
    #[error("invalid encoded length")]
    InvalidLength,

    /// Missing, misplaced or excess `=` padding.
    #[error("invalid padding at position {position}")]
    InvalidPadding { position: usize },
}

impl CodecError {
    /// Offset of the offending byte in the input, when one is known.
    pub fn position(&self) -> Option<usize> {
        match *self {
            CodecError::InvalidByte { position, .. } | CodecError::InvalidPadding { position } => {
                Some(position)
            }
            CodecError::OddLength | CodecError::InvalidLength => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, CodecError>;
