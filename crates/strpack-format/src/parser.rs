use std::iter::FusedIterator;

use tracing::trace;

use crate::directive::{
    Directive, Endian, Kind, INT_SIZE, LONG_SIZE, MAX_ALIGN, MAX_WIDTH, SHORT_SIZE, SIZE_T_SIZE,
};
use crate::error::{PackError, Result};

/// Single-pass reader over a format spec.
///
/// Holds the traversal state shared by pack and unpack: read cursor, active
/// endianness, active max alignment and the running total of bytes laid out
/// so far. A fresh parser always starts from native endianness, max alignment
/// 1 and a zero total.
///
/// Every directive returned by [`Parser::next_directive`] has its pre-padding
/// and fixed payload width already added to the running total. Variable
/// payloads (string bodies, terminators) are reported back through
/// [`Parser::advance`].
#[derive(Debug, Clone)]
pub struct Parser<'a> {
    src: &'a str,
    fmt: &'a [u8],
    pos: usize,
    endian: Endian,
    max_align: usize,
    total: usize,
    done: bool,
}

/// A directive letter with its width, before alignment is resolved.
#[derive(Debug, Clone, Copy)]
struct RawOption {
    kind: Kind,
    size: usize,
    offset: usize,
    option: char,
}

impl<'a> Parser<'a> {
    pub fn new(fmt: &'a str) -> Self {
        Self {
            src: fmt,
            fmt: fmt.as_bytes(),
            pos: 0,
            endian: Endian::NATIVE,
            max_align: 1,
            total: 0,
            done: false,
        }
    }

    /// Bytes laid out so far, padding included.
    pub fn total_size(&self) -> usize {
        self.total
    }

    /// Endianness currently in effect.
    pub fn endian(&self) -> Endian {
        self.endian
    }

    /// Max alignment currently in effect.
    pub fn max_align(&self) -> usize {
        self.max_align
    }

    /// Account for variable-length payload bytes written or consumed.
    pub fn advance(&mut self, n: usize) {
        self.total += n;
    }

    /// Resolve the next directive.
    ///
    /// Spaces and setter directives are consumed internally. Once the spec is
    /// exhausted every call returns a [`Kind::End`] directive.
    pub fn next_directive(&mut self) -> Result<Directive> {
        loop {
            let raw = self.read_option()?;
            let align = match raw.kind {
                Kind::Nop => continue,
                Kind::PadAlign => {
                    let target = self.read_option()?;
                    if target.kind == Kind::PadAlign || target.size == 0 {
                        return Err(PackError::InvalidAlignTarget { offset: raw.offset });
                    }
                    target.size
                }
                // fixed-size blocks are never padded
                Kind::Char => 1,
                _ => raw.size,
            };

            let padding = self.padding_for(align, &raw)?;
            self.total += padding + raw.size;

            let directive = Directive {
                kind: raw.kind,
                size: raw.size,
                padding,
                endian: self.endian,
                offset: raw.offset,
                option: raw.option,
            };
            trace!(
                kind = directive.kind.name(),
                size = directive.size,
                padding,
                offset = directive.offset,
                total = self.total,
                "resolved directive"
            );
            return Ok(directive);
        }
    }

    fn read_option(&mut self) -> Result<RawOption> {
        let offset = self.pos;
        let Some(&byte) = self.fmt.get(offset) else {
            return Ok(RawOption {
                kind: Kind::End,
                size: 0,
                offset,
                option: '\0',
            });
        };
        // the cursor only ever stops on char boundaries
        let option = self
            .src
            .get(offset..)
            .and_then(|rest| rest.chars().next())
            .unwrap_or('\0');
        self.pos += option.len_utf8();

        let (kind, size) = match byte {
            b'b' => (Kind::Int, 1),
            b'B' => (Kind::UInt, 1),
            b'h' => (Kind::Int, SHORT_SIZE),
            b'H' => (Kind::UInt, SHORT_SIZE),
            // both long letters decode unsigned
            b'l' | b'L' => (Kind::UInt, LONG_SIZE),
            b'T' => (Kind::UInt, SIZE_T_SIZE),
            b'f' => (Kind::Float, 4),
            b'd' => (Kind::Double, 8),
            b'i' => (Kind::Int, self.read_width(INT_SIZE, offset, option)?),
            b'I' => (Kind::UInt, self.read_width(INT_SIZE, offset, option)?),
            b's' => (Kind::String, self.read_width(SIZE_T_SIZE, offset, option)?),
            b'z' => (Kind::Zstr, 0),
            b'x' => (Kind::Padding, 1),
            b'c' => match self.read_number() {
                Some(size) => (Kind::Char, size),
                None => return Err(PackError::MissingSize { offset }),
            },
            b'X' => (Kind::PadAlign, 0),
            b' ' => (Kind::Nop, 0),
            b'<' => {
                self.endian = Endian::Little;
                (Kind::Nop, 0)
            }
            b'>' => {
                self.endian = Endian::Big;
                (Kind::Nop, 0)
            }
            b'=' => {
                self.endian = Endian::NATIVE;
                (Kind::Nop, 0)
            }
            b'!' => {
                self.max_align = self.read_number().unwrap_or(MAX_ALIGN);
                (Kind::Nop, 0)
            }
            _ => return Err(PackError::InvalidOption { offset, option }),
        };

        Ok(RawOption {
            kind,
            size,
            offset,
            option,
        })
    }

    /// Optional non-zero width suffix.
    fn read_width(&mut self, default: usize, offset: usize, option: char) -> Result<usize> {
        match self.read_number() {
            None => Ok(default),
            Some(0) => Err(PackError::InvalidWidth { offset, option }),
            Some(n) => Ok(n),
        }
    }

    /// Decimal suffix at the cursor. Accumulation stops before exceeding
    /// [`MAX_WIDTH`], leaving any further digits in the spec.
    fn read_number(&mut self) -> Option<usize> {
        if !self.fmt.get(self.pos)?.is_ascii_digit() {
            return None;
        }

        let mut n = 0usize;
        loop {
            n = n * 10 + usize::from(self.fmt[self.pos] - b'0');
            self.pos += 1;
            match self.fmt.get(self.pos) {
                Some(next) if next.is_ascii_digit() && n <= (MAX_WIDTH - 9) / 10 => {}
                _ => return Some(n),
            }
        }
    }

    fn padding_for(&self, align: usize, raw: &RawOption) -> Result<usize> {
        if align <= 1 {
            return Ok(0);
        }
        let align = align.min(self.max_align);
        if !align.is_power_of_two() {
            return Err(PackError::AlignNotPowerOfTwo {
                offset: raw.offset,
                option: raw.option,
                align,
            });
        }
        Ok((align - (self.total & (align - 1))) & (align - 1))
    }
}

impl Iterator for Parser<'_> {
    type Item = Result<Directive>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.next_directive() {
            Ok(directive) if directive.kind == Kind::End => {
                self.done = true;
                None
            }
            Ok(directive) => Some(Ok(directive)),
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}

impl FusedIterator for Parser<'_> {}

/// Every directive of `fmt` up to the end marker.
///
/// Variable-length payloads (`s` bodies, `z` strings) count as zero bytes,
/// so the padding shown after them is only exact for empty strings.
pub fn layout(fmt: &str) -> Result<Vec<Directive>> {
    Parser::new(fmt).collect()
}
