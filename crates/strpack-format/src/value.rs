//! Values bound to data-bearing directives.
//!
//! Numeric directives accept any numeric value, converted the way a C cast
//! would convert it. String directives accept byte sequences only.

use bytes::Bytes;

use crate::error::{PackError, Result};

/// A packed or unpacked value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    UInt(u64),
    Float(f64),
    Bytes(Bytes),
}

impl Value {
    /// Kind name used in mismatch errors.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "integer",
            Value::UInt(_) => "unsigned integer",
            Value::Float(_) => "floating-point",
            Value::Bytes(_) => "byte-sequence",
        }
    }

    /// Raw 64-bit pattern and sign for integer encoding.
    pub(crate) fn as_int_bits(&self) -> Option<(u64, bool)> {
        match *self {
            Value::Int(v) => Some((v as u64, v < 0)),
            Value::UInt(v) => Some((v, false)),
            Value::Float(v) => {
                if v < 0.0 {
                    Some(((v as i64) as u64, true))
                } else {
                    Some((v as u64, false))
                }
            }
            Value::Bytes(_) => None,
        }
    }

    pub(crate) fn as_f64(&self) -> Option<f64> {
        match *self {
            Value::Int(v) => Some(v as f64),
            Value::UInt(v) => Some(v as f64),
            Value::Float(v) => Some(v),
            Value::Bytes(_) => None,
        }
    }

    pub(crate) fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) => Some(b.as_ref()),
            _ => None,
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{v}"),
            Value::UInt(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Bytes(b) => write!(f, "{:?}", String::from_utf8_lossy(b)),
        }
    }
}

macro_rules! from_signed {
    ($($t:ty),*) => {$(
        impl From<$t> for Value {
            fn from(v: $t) -> Self {
                Value::Int(v as i64)
            }
        }
    )*};
}

macro_rules! from_unsigned {
    ($($t:ty),*) => {$(
        impl From<$t> for Value {
            fn from(v: $t) -> Self {
                Value::UInt(v as u64)
            }
        }
    )*};
}

from_signed!(i8, i16, i32, i64, isize);
from_unsigned!(u8, u16, u32, u64, usize);

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(f64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Bytes(Bytes::copy_from_slice(v.as_bytes()))
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Bytes(Bytes::from(v))
    }
}

impl From<&[u8]> for Value {
    fn from(v: &[u8]) -> Self {
        Value::Bytes(Bytes::copy_from_slice(v))
    }
}

impl<const N: usize> From<&[u8; N]> for Value {
    fn from(v: &[u8; N]) -> Self {
        Value::Bytes(Bytes::copy_from_slice(v))
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Bytes(Bytes::from(v))
    }
}

impl From<Bytes> for Value {
    fn from(v: Bytes) -> Self {
        Value::Bytes(v)
    }
}

/// A typed unpack destination.
pub trait FromValue: Sized {
    fn from_value(value: Value) -> Result<Self>;
}

impl FromValue for Value {
    fn from_value(value: Value) -> Result<Self> {
        Ok(value)
    }
}

fn mismatch(expected: &'static str, value: &Value) -> PackError {
    PackError::DestinationMismatch {
        index: 0,
        expected,
        actual: value.kind_name(),
    }
}

macro_rules! from_value_int {
    ($($t:ty),*) => {$(
        impl FromValue for $t {
            fn from_value(value: Value) -> Result<Self> {
                // same truncation as a C integer cast
                match value {
                    Value::Int(v) => Ok(v as $t),
                    Value::UInt(v) => Ok(v as $t),
                    Value::Float(v) => Ok(v as $t),
                    other => Err(mismatch(stringify!($t), &other)),
                }
            }
        }
    )*};
}

from_value_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl FromValue for f64 {
    fn from_value(value: Value) -> Result<Self> {
        value.as_f64().ok_or_else(|| mismatch("f64", &value))
    }
}

impl FromValue for f32 {
    fn from_value(value: Value) -> Result<Self> {
        value
            .as_f64()
            .map(|v| v as f32)
            .ok_or_else(|| mismatch("f32", &value))
    }
}

impl FromValue for Bytes {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Bytes(b) => Ok(b),
            other => Err(mismatch("bytes", &other)),
        }
    }
}

impl FromValue for Vec<u8> {
    fn from_value(value: Value) -> Result<Self> {
        Bytes::from_value(value).map(Vec::from)
    }
}

impl FromValue for String {
    fn from_value(value: Value) -> Result<Self> {
        let bytes = match value {
            Value::Bytes(b) => b,
            other => return Err(mismatch("String", &other)),
        };
        String::from_utf8(bytes.to_vec()).map_err(|err| PackError::InvalidUtf8 {
            index: 0,
            valid_up_to: err.utf8_error().valid_up_to(),
        })
    }
}

/// A tuple of typed unpack destinations.
pub trait FromValues: Sized {
    /// Number of destinations in the tuple.
    const ARITY: usize;

    /// Convert exactly [`Self::ARITY`] values, in order.
    fn from_values(values: Vec<Value>) -> Result<Self>;
}

macro_rules! from_values_tuple {
    ($n:expr; $($t:ident),+) => {
        impl<$($t: FromValue),+> FromValues for ($($t,)+) {
            const ARITY: usize = $n;

            fn from_values(values: Vec<Value>) -> Result<Self> {
                if values.len() != $n {
                    return Err(PackError::UnusedParameter {
                        expected: values.len(),
                        supplied: $n,
                    });
                }
                let mut iter = values.into_iter().enumerate();
                Ok(($(
                    match iter.next() {
                        Some((index, value)) => {
                            $t::from_value(value).map_err(|err| err.at_destination(index))?
                        }
                        None => unreachable!("length checked above"),
                    },
                )+))
            }
        }
    };
}

from_values_tuple!(1; A);
from_values_tuple!(2; A, B);
from_values_tuple!(3; A, B, C);
from_values_tuple!(4; A, B, C, D);
from_values_tuple!(5; A, B, C, D, E);
from_values_tuple!(6; A, B, C, D, E, F);
from_values_tuple!(7; A, B, C, D, E, F, G);
from_values_tuple!(8; A, B, C, D, E, F, G, H);
from_values_tuple!(9; A, B, C, D, E, F, G, H, I);
from_values_tuple!(10; A, B, C, D, E, F, G, H, I, J);
from_values_tuple!(11; A, B, C, D, E, F, G, H, I, J, K);
from_values_tuple!(12; A, B, C, D, E, F, G, H, I, J, K, L);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_sources_keep_sign() {
        assert_eq!(Value::from(-3i32), Value::Int(-3));
        assert_eq!(Value::from(3u8), Value::UInt(3));
        assert_eq!(
            Value::from(-12i8).as_int_bits(),
            Some((u64::MAX - 11, true))
        );
    }

    #[test]
    fn byte_sources() {
        assert_eq!(Value::from("ab"), Value::Bytes(Bytes::from_static(b"ab")));
        assert_eq!(
            Value::from(b"\xEC"),
            Value::Bytes(Bytes::from_static(&[0xEC]))
        );
        assert_eq!(Value::from(vec![1u8, 2]).as_bytes(), Some(&[1u8, 2][..]));
    }

    #[test]
    fn integer_destinations_truncate_like_c_casts() {
        assert_eq!(i8::from_value(Value::Int(-128)).unwrap(), -128);
        assert_eq!(u8::from_value(Value::UInt(0x1ff)).unwrap(), 0xff);
        assert_eq!(
            i32::from_value(Value::UInt(0xFFFF_FFFF_8000_0000)).unwrap(),
            i32::MIN
        );
        assert_eq!(u32::from_value(Value::Int(-1)).unwrap(), u32::MAX);
    }

    #[test]
    fn float_to_integer_truncates() {
        assert_eq!(i32::from_value(Value::Float(4.9)).unwrap(), 4);
        assert_eq!(i32::from_value(Value::Float(-4.9)).unwrap(), -4);
    }

    #[test]
    fn bytes_do_not_convert_to_numbers() {
        let err = i32::from_value(Value::from("abc")).unwrap_err();
        assert!(matches!(
            err,
            PackError::DestinationMismatch {
                expected: "i32",
                actual: "byte-sequence",
                ..
            }
        ));
        assert!(String::from_value(Value::Int(1)).is_err());
    }

    #[test]
    fn string_destination_checks_utf8() {
        assert_eq!(String::from_value(Value::from("hi")).unwrap(), "hi");
        assert_eq!(
            String::from_value(Value::from(&[0x61u8, 0xFF][..])).unwrap_err(),
            PackError::InvalidUtf8 {
                index: 0,
                valid_up_to: 1
            }
        );
    }

    #[test]
    fn tuple_conversion_is_ordered() {
        let values = vec![Value::Int(-12), Value::from("xy"), Value::Float(1.5)];
        let (a, b, c): (i32, String, f32) = FromValues::from_values(values).unwrap();
        assert_eq!((a, b.as_str(), c), (-12, "xy", 1.5));
        assert_eq!(<(i32, String, f32)>::ARITY, 3);
    }

    #[test]
    fn tuple_conversion_reports_destination_index() {
        let values = vec![Value::Int(1), Value::Int(2)];
        let err = <(i32, String)>::from_values(values).unwrap_err();
        assert!(matches!(
            err,
            PackError::DestinationMismatch {
                index: 1,
                expected: "String",
                ..
            }
        ));
    }
}
