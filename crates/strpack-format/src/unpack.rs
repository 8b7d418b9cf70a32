use bytes::Bytes;
use tracing::debug;

use crate::directive::{Directive, Endian, Kind, NATIVE_INT_SIZE};
use crate::error::{PackError, Result};
use crate::parser::Parser;
use crate::value::{FromValues, Value};

/// Unpack `data` into a typed tuple according to `fmt`.
///
/// Returns the tuple and the number of bytes consumed, so several calls can
/// be chained over one buffer with [`unpack_from`].
///
/// ```
/// use strpack_format::{pack, unpack};
///
/// let buf = pack!("zB", "abc", 247).unwrap();
/// let ((s, n), used) = unpack::<(String, u8)>("zB", &buf).unwrap();
/// assert_eq!((s.as_str(), n, used), ("abc", 247, 5));
/// ```
pub fn unpack<T: FromValues>(fmt: &str, data: &[u8]) -> Result<(T, usize)> {
    unpack_from(fmt, data, 0)
}

/// Unpack starting at `offset` into `data`.
///
/// Alignment is computed relative to `offset`, and the returned count is the
/// number of bytes consumed after it.
pub fn unpack_from<T: FromValues>(fmt: &str, data: &[u8], offset: usize) -> Result<(T, usize)> {
    let (values, consumed) = Decoder::new(fmt, data, offset)?.run(Some(T::ARITY))?;
    Ok((T::from_values(values)?, consumed))
}

/// Unpack every data-bearing directive of `fmt` into dynamic values.
pub fn unpack_values(fmt: &str, data: &[u8]) -> Result<(Vec<Value>, usize)> {
    Decoder::new(fmt, data, 0)?.run(None)
}

struct Decoder<'a> {
    parser: Parser<'a>,
    data: &'a [u8],
    pos: usize,
    start: usize,
}

impl<'a> Decoder<'a> {
    fn new(fmt: &'a str, data: &'a [u8], offset: usize) -> Result<Self> {
        if offset > data.len() {
            return Err(PackError::OutOfBounds {
                position: offset,
                needed: 0,
                len: data.len(),
            });
        }
        Ok(Self {
            parser: Parser::new(fmt),
            data,
            pos: offset,
            start: offset,
        })
    }

    /// Decode until the end of the spec. With `want` set, exactly that many
    /// data-bearing directives must be present.
    fn run(mut self, want: Option<usize>) -> Result<(Vec<Value>, usize)> {
        let mut values = Vec::with_capacity(want.unwrap_or(0));

        loop {
            let directive = self.parser.next_directive()?;
            self.take(directive.padding)?;

            match directive.kind {
                Kind::Padding => {
                    self.take(1)?;
                }
                Kind::PadAlign | Kind::Nop => {}
                Kind::End => {
                    if let Some(want) = want.filter(|&want| want > values.len()) {
                        return Err(PackError::UnusedParameter {
                            expected: values.len(),
                            supplied: want,
                        });
                    }
                    break;
                }
                _ => {
                    if want == Some(values.len()) {
                        return Err(PackError::MissingParameter {
                            offset: directive.offset,
                            option: directive.option,
                        });
                    }
                    let value = self.unpack_one(&directive)?;
                    values.push(value);
                }
            }
        }

        let consumed = self.pos - self.start;
        debug!(values = values.len(), bytes = consumed, "unpacked");
        Ok((values, consumed))
    }

    fn unpack_one(&mut self, directive: &Directive) -> Result<Value> {
        let position = self.pos;
        let value = match directive.kind {
            Kind::Int | Kind::UInt => {
                let signed = directive.kind == Kind::Int;
                let raw = self.take(directive.size)?;
                let n = read_int(raw, directive.endian, signed, position)?;
                if signed {
                    Value::Int(n as i64)
                } else {
                    Value::UInt(n)
                }
            }
            Kind::Float => {
                let mut raw = [0u8; 4];
                raw.copy_from_slice(self.take(4)?);
                let v = match directive.endian {
                    Endian::Little => f32::from_le_bytes(raw),
                    Endian::Big => f32::from_be_bytes(raw),
                };
                Value::Float(f64::from(v))
            }
            Kind::Double => {
                let mut raw = [0u8; 8];
                raw.copy_from_slice(self.take(8)?);
                Value::Float(match directive.endian {
                    Endian::Little => f64::from_le_bytes(raw),
                    Endian::Big => f64::from_be_bytes(raw),
                })
            }
            Kind::Char => Value::Bytes(Bytes::copy_from_slice(self.take(directive.size)?)),
            Kind::String => {
                let field = self.take(directive.size)?;
                let len = read_int(field, directive.endian, false, position)?;
                let len = usize::try_from(len).map_err(|_| PackError::OutOfBounds {
                    position: self.pos,
                    needed: usize::MAX,
                    len: self.data.len(),
                })?;
                let body = self.take(len)?;
                self.parser.advance(len);
                Value::Bytes(Bytes::copy_from_slice(body))
            }
            Kind::Zstr => {
                let rest = &self.data[self.pos..];
                let len = rest
                    .iter()
                    .position(|&b| b == 0)
                    .ok_or(PackError::UnterminatedString { position })?;
                let body = self.take(len)?;
                self.take(1)?;
                self.parser.advance(len + 1);
                Value::Bytes(Bytes::copy_from_slice(body))
            }
            Kind::Padding | Kind::PadAlign | Kind::Nop | Kind::End => {
                unreachable!("non-data directive bound to a destination")
            }
        };
        Ok(value)
    }

    /// Consume `n` bytes, failing if the input is shorter.
    fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        let end = self
            .pos
            .checked_add(n)
            .filter(|&end| end <= self.data.len())
            .ok_or(PackError::OutOfBounds {
                position: self.pos,
                needed: n,
                len: self.data.len(),
            })?;
        let bytes = &self.data[self.pos..end];
        self.pos = end;
        Ok(bytes)
    }
}

/// Decode an integer of `raw.len()` bytes into the 64-bit accumulator.
///
/// Narrow signed values are sign-extended from their top bit. Bytes beyond
/// the accumulator must all be `0x00`, or `0xFF` for a negative signed value.
fn read_int(raw: &[u8], endian: Endian, signed: bool, position: usize) -> Result<u64> {
    let size = raw.len();
    let limit = size.min(NATIVE_INT_SIZE);
    // index 0 is the least significant byte
    let byte_at = |i: usize| match endian {
        Endian::Little => raw[i],
        Endian::Big => raw[size - 1 - i],
    };

    let mut n = 0u64;
    for i in (0..limit).rev() {
        n = (n << 8) | u64::from(byte_at(i));
    }

    if size < NATIVE_INT_SIZE {
        if signed && size > 0 {
            let mask = 1u64 << (size * 8 - 1);
            n = (n ^ mask).wrapping_sub(mask);
        }
    } else if size > NATIVE_INT_SIZE {
        let fill = if signed && (n as i64) < 0 { 0xFF } else { 0x00 };
        if (limit..size).any(|i| byte_at(i) != fill) {
            return Err(PackError::IntegerOverflow { position, size });
        }
    }
    Ok(n)
}
