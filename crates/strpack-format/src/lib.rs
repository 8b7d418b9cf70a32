//! Format-string driven binary pack/unpack.
//!
//! A format spec is a string of directive letters describing a binary
//! layout. [`pack`] walks the spec and encodes caller values into a byte
//! buffer; [`unpack`] walks the same spec and decodes them back:
//!
//! - `b`/`B`, `h`/`H`: 1- and 2-byte signed/unsigned integers
//! - `l`, `L`, `T`: 8-byte unsigned integers
//! - `i[n]`/`I[n]`: signed/unsigned integer of `n` bytes (default 4)
//! - `f`, `d`: 4-byte float, 8-byte double
//! - `c<n>`: fixed-size byte block of `n` bytes
//! - `s[n]`: string prefixed by an `n`-byte length (default 8)
//! - `z`: zero-terminated string
//! - `x`: one pad byte, `X<op>`: align to the width of `<op>`
//! - `<`, `>`, `=`: little, big, native byte order from here on
//! - `![n]`: max alignment from here on (default 8)
//!
//! ```
//! use strpack_format::{pack, unpack};
//!
//! let buf = pack!(">!4 b i4", -12, 100).unwrap();
//! assert_eq!(buf.as_ref(), &[0xf4, 0, 0, 0, 0, 0, 0, 100]);
//!
//! let ((a, b), used) = unpack::<(i8, u32)>(">!4 b i4", &buf).unwrap();
//! assert_eq!((a, b, used), (-12, 100, 8));
//! ```
//!
//! Every call parses the spec afresh; no state is shared between calls.

pub mod directive;
pub mod error;
pub mod pack;
pub mod parser;
pub mod unpack;
pub mod value;

pub use directive::{Directive, Endian, Kind, MAX_ALIGN, MAX_WIDTH};
pub use error::{ErrorKind, PackError, Result};
pub use pack::{pack, pack_into, PAD_BYTE};
pub use parser::{layout, Parser};
pub use unpack::{unpack, unpack_from, unpack_values};
pub use value::{FromValue, FromValues, Value};
