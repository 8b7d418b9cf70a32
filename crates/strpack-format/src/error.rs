/// Broad classification of a [`PackError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The format spec itself is malformed.
    MalformedFormat,
    /// Fewer or more values/destinations than data-bearing directives.
    ParameterCount,
    /// A value's kind does not match the directive it is bound to.
    KindMismatch,
    /// A read or write would cross a declared size or the input end.
    Bounds,
    /// A wide integer does not fit into 64 bits.
    Overflow,
}

/// Errors that can occur while parsing a format spec, packing or unpacking.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PackError {
    /// An unrecognized character appeared in the format spec.
    #[error("invalid format option '{option}' at offset {offset}")]
    InvalidOption { offset: usize, option: char },

    /// A `c` directive without its required width suffix.
    #[error("missing size for format option 'c' at offset {offset}")]
    MissingSize { offset: usize },

    /// An integer or length-field width of zero.
    #[error("invalid width 0 for format option '{option}' at offset {offset}")]
    InvalidWidth { offset: usize, option: char },

    /// `X` followed by another `X`, a zero-width directive or end of spec.
    #[error("invalid next option for option 'X' at offset {offset}")]
    InvalidAlignTarget { offset: usize },

    /// The effective alignment of a directive is not a power of two.
    #[error("alignment {align} of format option '{option}' is not a power of 2 at offset {offset}")]
    AlignNotPowerOfTwo {
        offset: usize,
        option: char,
        align: usize,
    },

    /// A data-bearing directive has no value or destination bound to it.
    #[error("missing parameter for format option '{option}' at offset {offset}")]
    MissingParameter { offset: usize, option: char },

    /// More values or destinations were supplied than the spec consumes.
    #[error("{supplied} parameters supplied but format consumes only {expected}")]
    UnusedParameter { expected: usize, supplied: usize },

    /// A value's kind cannot be bound to the directive expecting it.
    #[error("type mismatch at offset {offset}: '{expected}' directive cannot take {actual} value")]
    KindMismatch {
        offset: usize,
        expected: &'static str,
        actual: &'static str,
    },

    /// A decoded value cannot be stored in the caller's destination type.
    #[error("destination {index}: {expected} cannot hold {actual} value")]
    DestinationMismatch {
        index: usize,
        expected: &'static str,
        actual: &'static str,
    },

    /// A decoded byte string is not valid UTF-8 for a `String` destination.
    #[error("destination {index}: decoded bytes are not valid UTF-8 (valid up to {valid_up_to})")]
    InvalidUtf8 { index: usize, valid_up_to: usize },

    /// A fixed-size value is longer than its declared width.
    #[error("c{size}: value of {len} bytes is longer than given size at offset {offset}")]
    ValueTooLong {
        offset: usize,
        len: usize,
        size: usize,
    },

    /// A string length does not fit into its length field.
    #[error("string length {len} does not fit in {size}-byte length field at offset {offset}")]
    LengthOverflow {
        offset: usize,
        len: usize,
        size: usize,
    },

    /// Decoding would read past the end of the input.
    #[error("data overflow: {needed} bytes needed at position {position}, input length {len}")]
    OutOfBounds {
        position: usize,
        needed: usize,
        len: usize,
    },

    /// A zero-terminated string has no terminator before the input end.
    #[error("unterminated zero-terminated string at position {position}")]
    UnterminatedString { position: usize },

    /// Excess high-order bytes of a wide integer disagree with its sign.
    #[error("{size}-byte integer does not fit into 64 bits at position {position}")]
    IntegerOverflow { position: usize, size: usize },
}

impl PackError {
    /// Classify this error by condition.
    pub fn kind(&self) -> ErrorKind {
        match self {
            PackError::InvalidOption { .. }
            | PackError::MissingSize { .. }
            | PackError::InvalidWidth { .. }
            | PackError::InvalidAlignTarget { .. }
            | PackError::AlignNotPowerOfTwo { .. } => ErrorKind::MalformedFormat,
            PackError::MissingParameter { .. } | PackError::UnusedParameter { .. } => {
                ErrorKind::ParameterCount
            }
            PackError::KindMismatch { .. }
            | PackError::DestinationMismatch { .. }
            | PackError::InvalidUtf8 { .. } => ErrorKind::KindMismatch,
            PackError::ValueTooLong { .. }
            | PackError::LengthOverflow { .. }
            | PackError::OutOfBounds { .. }
            | PackError::UnterminatedString { .. } => ErrorKind::Bounds,
            PackError::IntegerOverflow { .. } => ErrorKind::Overflow,
        }
    }

    /// Attach the destination index to a conversion error.
    pub(crate) fn at_destination(mut self, at: usize) -> Self {
        match &mut self {
            PackError::DestinationMismatch { index, .. } | PackError::InvalidUtf8 { index, .. } => {
                *index = at
            }
            _ => {}
        }
        self
    }
}

pub type Result<T> = std::result::Result<T, PackError>;
