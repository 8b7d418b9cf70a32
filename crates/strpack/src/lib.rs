//! Format-string driven binary packing.
//!
//! strpack encodes typed values into byte buffers described by a compact
//! format spec (`"<!4 b h i4 z"`), and decodes them back. The `strpack`
//! binary (behind the `cli` feature) exposes the same engine plus hex and
//! base64 conversion on the command line.
//!
//! # Crate Structure
//!
//! - [`format`]: format spec parser, pack encoder and unpack decoder
//! - [`codec`]: hex and base64 text encodings for packed buffers
//!
//! ```
//! use strpack::{pack, unpack};
//!
//! let buf = pack!("<h z", 513, "hi").unwrap();
//! assert_eq!(buf.as_ref(), b"\x01\x02hi\x00");
//!
//! let ((n, s), _) = unpack::<(i16, String)>("<h z", &buf).unwrap();
//! assert_eq!((n, s.as_str()), (513, "hi"));
//! ```

/// Re-export format types.
pub mod format {
    pub use strpack_format::*;
}

/// Re-export codec types.
pub mod codec {
    pub use strpack_codec::*;
}

pub use strpack_format::{
    layout, pack, pack_into, unpack, unpack_from, unpack_values, FromValue, FromValues, PackError,
    Value,
};
