//! Resolved format directives and the fixed widths behind each letter.
//!
//! Widths that C ties to the host ABI (`short`, `int`, `long`, `size_t`) are
//! fixed here so packed output is identical on every platform.

/// Width of `h`/`H`.
pub const SHORT_SIZE: usize = 2;

/// Default width of `i`/`I`.
pub const INT_SIZE: usize = 4;

/// Width of `l`/`L`.
pub const LONG_SIZE: usize = 8;

/// Width of `T` and default length-field width of `s`.
pub const SIZE_T_SIZE: usize = 8;

/// Width of the integer accumulator used by pack and unpack.
pub const NATIVE_INT_SIZE: usize = 8;

/// Strictest natural alignment, the value `!` sets when given no digits.
pub const MAX_ALIGN: usize = 8;

/// Largest decimal width a directive suffix can carry.
pub const MAX_WIDTH: usize = i32::MAX as usize;

/// Byte order of a multi-byte directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endian {
    Little,
    Big,
}

impl Endian {
    /// Byte order of the host.
    #[cfg(target_endian = "little")]
    pub const NATIVE: Endian = Endian::Little;

    /// Byte order of the host.
    #[cfg(target_endian = "big")]
    pub const NATIVE: Endian = Endian::Big;

    pub fn name(self) -> &'static str {
        match self {
            Endian::Little => "little",
            Endian::Big => "big",
        }
    }
}

/// What a directive does with the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// Signed integer.
    Int,
    /// Unsigned integer.
    UInt,
    /// Single-precision float.
    Float,
    /// Double-precision float.
    Double,
    /// Fixed-size byte block.
    Char,
    /// Length-prefixed string.
    String,
    /// Zero-terminated string.
    Zstr,
    /// One literal pad byte.
    Padding,
    /// Alignment only, width borrowed from the next directive.
    PadAlign,
    /// Nothing (spaces and setters).
    Nop,
    End,
}

impl Kind {
    /// Whether this directive binds one value (pack) or destination (unpack).
    pub fn is_data_bearing(self) -> bool {
        !matches!(self, Kind::Padding | Kind::PadAlign | Kind::Nop | Kind::End)
    }

    pub fn name(self) -> &'static str {
        match self {
            Kind::Int => "int",
            Kind::UInt => "uint",
            Kind::Float => "float",
            Kind::Double => "double",
            Kind::Char => "char",
            Kind::String => "string",
            Kind::Zstr => "zstr",
            Kind::Padding => "padding",
            Kind::PadAlign => "padalign",
            Kind::Nop => "nop",
            Kind::End => "end",
        }
    }
}

/// One decoded instruction of a format spec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Directive {
    pub kind: Kind,
    /// Payload width in bytes. For `s` this is the length-field width.
    pub size: usize,
    /// Filler bytes placed before the payload.
    pub padding: usize,
    pub endian: Endian,
    /// Offset of the directive character in the format spec.
    pub offset: usize,
    /// The directive character (`'\0'` for end of spec).
    pub option: char,
}
