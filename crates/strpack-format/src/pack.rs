use bytes::{BufMut, Bytes, BytesMut};
use tracing::debug;

use crate::directive::{Directive, Endian, Kind, NATIVE_INT_SIZE};
use crate::error::{PackError, Result};
use crate::parser::Parser;
use crate::value::Value;

/// Byte used for alignment filler and `x`.
pub const PAD_BYTE: u8 = 0x00;

/// Pack `values` according to `fmt`.
///
/// Values bind to data-bearing directives left to right. Fewer values than
/// data-bearing directives fails with [`PackError::MissingParameter`], more
/// with [`PackError::UnusedParameter`].
pub fn pack(fmt: &str, values: &[Value]) -> Result<Bytes> {
    let mut dst = BytesMut::new();
    pack_into(fmt, values, &mut dst)?;
    Ok(dst.freeze())
}

/// Pack `values` according to `fmt`, appending to `dst`.
///
/// Alignment is computed relative to the first byte this call writes. On
/// failure `dst` is truncated back to its original length. Returns the
/// number of bytes written.
pub fn pack_into(fmt: &str, values: &[Value], dst: &mut BytesMut) -> Result<usize> {
    let start = dst.len();
    let result = Encoder {
        parser: Parser::new(fmt),
        dst: &mut *dst,
    }
    .run(values);

    match result {
        Ok(()) => {
            let written = dst.len() - start;
            debug!(fmt, values = values.len(), bytes = written, "packed");
            Ok(written)
        }
        Err(err) => {
            dst.truncate(start);
            debug!(fmt, error = %err, "pack failed");
            Err(err)
        }
    }
}

/// Pack values with `From` conversions applied to each argument.
///
/// ```
/// let buf = strpack_format::pack!("<i2 z", 1, "ab").unwrap();
/// assert_eq!(buf.as_ref(), b"\x01\x00ab\x00");
/// ```
#[macro_export]
macro_rules! pack {
    ($fmt:expr $(, $value:expr)* $(,)?) => {
        $crate::pack($fmt, &[$($crate::Value::from($value)),*])
    };
}

struct Encoder<'a, 'b> {
    parser: Parser<'a>,
    dst: &'b mut BytesMut,
}

impl Encoder<'_, '_> {
    fn run(mut self, values: &[Value]) -> Result<()> {
        let mut values = values.iter();
        let mut bound = 0usize;

        loop {
            let directive = self.parser.next_directive()?;
            self.dst.put_bytes(PAD_BYTE, directive.padding);

            match directive.kind {
                Kind::Padding => self.dst.put_u8(PAD_BYTE),
                Kind::PadAlign | Kind::Nop => {}
                Kind::End => {
                    let leftover = values.len();
                    if leftover > 0 {
                        return Err(PackError::UnusedParameter {
                            expected: bound,
                            supplied: bound + leftover,
                        });
                    }
                    return Ok(());
                }
                _ => {
                    let value = values.next().ok_or(PackError::MissingParameter {
                        offset: directive.offset,
                        option: directive.option,
                    })?;
                    self.pack_one(&directive, value)?;
                    bound += 1;
                }
            }
        }
    }

    fn pack_one(&mut self, directive: &Directive, value: &Value) -> Result<()> {
        let mismatch = || PackError::KindMismatch {
            offset: directive.offset,
            expected: directive.kind.name(),
            actual: value.kind_name(),
        };

        match directive.kind {
            Kind::Int | Kind::UInt => {
                let (bits, negative) = value.as_int_bits().ok_or_else(mismatch)?;
                let negative = negative && directive.kind == Kind::Int;
                put_int(self.dst, bits, directive.size, directive.endian, negative);
            }
            Kind::Float => {
                let v = value.as_f64().ok_or_else(mismatch)? as f32;
                match directive.endian {
                    Endian::Little => self.dst.put_f32_le(v),
                    Endian::Big => self.dst.put_f32(v),
                }
            }
            Kind::Double => {
                let v = value.as_f64().ok_or_else(mismatch)?;
                match directive.endian {
                    Endian::Little => self.dst.put_f64_le(v),
                    Endian::Big => self.dst.put_f64(v),
                }
            }
            Kind::Char => {
                let bytes = value.as_bytes().ok_or_else(mismatch)?;
                if bytes.len() > directive.size {
                    return Err(PackError::ValueTooLong {
                        offset: directive.offset,
                        len: bytes.len(),
                        size: directive.size,
                    });
                }
                self.dst.put_slice(bytes);
                self.dst.put_bytes(PAD_BYTE, directive.size - bytes.len());
            }
            Kind::String => {
                let bytes = value.as_bytes().ok_or_else(mismatch)?;
                if !fits_in(bytes.len(), directive.size) {
                    return Err(PackError::LengthOverflow {
                        offset: directive.offset,
                        len: bytes.len(),
                        size: directive.size,
                    });
                }
                put_int(
                    self.dst,
                    bytes.len() as u64,
                    directive.size,
                    directive.endian,
                    false,
                );
                self.dst.put_slice(bytes);
                self.parser.advance(bytes.len());
            }
            Kind::Zstr => {
                let bytes = value.as_bytes().ok_or_else(mismatch)?;
                self.dst.put_slice(bytes);
                self.dst.put_u8(0);
                self.parser.advance(bytes.len() + 1);
            }
            Kind::Padding | Kind::PadAlign | Kind::Nop | Kind::End => {
                unreachable!("non-data directive bound to a value")
            }
        }
        Ok(())
    }
}

/// Whether `len` is representable in a `size`-byte unsigned field.
fn fits_in(len: usize, size: usize) -> bool {
    size >= NATIVE_INT_SIZE || (len as u64) < 1u64 << (size * 8)
}

/// Write the low `size` bytes of `n`. Bytes beyond the 64-bit accumulator
/// are `0xFF` for negative values and zero otherwise.
fn put_int(dst: &mut BytesMut, n: u64, size: usize, endian: Endian, negative: bool) {
    let fill = if negative { 0xFF } else { 0x00 };
    let byte_at = |i: usize| {
        if i < NATIVE_INT_SIZE {
            (n >> (8 * i)) as u8
        } else {
            fill
        }
    };

    dst.reserve(size);
    match endian {
        Endian::Little => (0..size).for_each(|i| dst.put_u8(byte_at(i))),
        Endian::Big => (0..size).rev().for_each(|i| dst.put_u8(byte_at(i))),
    }
}
