//! Integer family: arbitrary-precision INTEGER and the wrapping application types.
//!
//! All wrapping types share one implementation, [`BoundedInteger`], which
//! reduces every input modulo `2^BITS` to a non-negative representative.

use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

use bytes::Bytes;
use num_bigint::{BigInt, Sign};
use num_traits::ToPrimitive;

use crate::ber::{BerType, EncodeBuf};
use crate::error::{BadValueKind, DecodeErrorKind, Error, Result};

/// Read two's-complement big-endian content, rejecting empty content.
pub(crate) fn decode_twos_complement(content: &[u8], offset: usize) -> Result<BigInt> {
    if content.is_empty() {
        tracing::debug!(target: "snmp_ber::ber", { snmp.offset = offset }, "zero-length integer");
        return Err(Error::decode(offset, DecodeErrorKind::ZeroLengthInteger));
    }
    Ok(BigInt::from_signed_bytes_be(content))
}

fn parse_decimal(type_name: &'static str, s: &str) -> Result<BigInt> {
    BigInt::from_str(s.trim())
        .map_err(|_| Error::bad_value(type_name, BadValueKind::Unparseable(s.to_string())))
}

/// ASN.1 INTEGER with no range restriction.
///
/// ```
/// use snmp_ber::value::Integer;
///
/// let v: Integer = "-129".parse().unwrap();
/// assert_eq!(v.to_i64(), Some(-129));
/// assert_eq!(&v.encode()[..], &[0x02, 0x02, 0xFF, 0x7F]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Integer {
    value: BigInt,
}

impl Integer {
    pub fn new(value: impl Into<BigInt>) -> Self {
        Self {
            value: value.into(),
        }
    }

    pub fn value(&self) -> &BigInt {
        &self.value
    }

    pub fn set_value(&mut self, value: impl Into<BigInt>) {
        self.value = value.into();
    }

    /// Replace the value from its decimal string form.
    pub fn set_str(&mut self, s: &str) -> Result<()> {
        self.value = parse_decimal("Integer", s)?;
        Ok(())
    }

    /// The value as `i64`, if it fits.
    pub fn to_i64(&self) -> Option<i64> {
        self.value.to_i64()
    }

    pub fn into_inner(self) -> BigInt {
        self.value
    }

    pub fn encode_into(&self, buf: &mut EncodeBuf) {
        buf.push_big_integer(BerType::Integer, &self.value);
    }

    pub fn encode(&self) -> Bytes {
        let mut buf = EncodeBuf::with_capacity(16);
        self.encode_into(&mut buf);
        buf.finish()
    }

    pub(crate) fn from_content(content: &[u8], offset: usize) -> Result<Self> {
        decode_twos_complement(content, offset).map(Self::new)
    }
}

impl fmt::Display for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl FromStr for Integer {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_decimal("Integer", s).map(Self::new)
    }
}

macro_rules! integer_from {
    ($($t:ty),*) => {
        $(impl From<$t> for Integer {
            fn from(v: $t) -> Self {
                Self::new(v)
            }
        })*
    };
}

integer_from!(i32, i64, u32, u64, BigInt);

/// Bit width and wire tag of a wrapping integer type.
pub trait Width: Copy + Eq + fmt::Debug + Send + Sync + 'static {
    /// Values are reduced modulo `2^BITS`. At most 64.
    const BITS: u32;
    const TAG: BerType;
    const NAME: &'static str;

    /// Render an already-reduced value.
    fn fmt_value(value: u64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", value)
    }
}

/// Wrapping unsigned integer of width `W::BITS`.
///
/// Construction, `set_value` and decoding all reduce modulo `2^BITS` with a
/// non-negative result, so `-1` becomes `2^BITS - 1`.
///
/// ```
/// use snmp_ber::value::Counter32;
///
/// assert_eq!(Counter32::new((1u64 << 32) + 5).value(), 5);
/// assert_eq!(Counter32::new(-1).value(), u32::MAX as u64);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BoundedInteger<W: Width> {
    value: u64,
    width: PhantomData<W>,
}

impl<W: Width> BoundedInteger<W> {
    const MASK: u64 = if W::BITS >= 64 {
        u64::MAX
    } else {
        (1u64 << W::BITS) - 1
    };

    pub fn new(value: impl Into<BigInt>) -> Self {
        Self {
            value: Self::reduce(&value.into()),
            width: PhantomData,
        }
    }

    /// Reduce modulo `2^BITS` to the non-negative representative.
    ///
    /// Only the low 64 bits of the magnitude matter because `2^BITS` divides
    /// `2^64`; a negative value maps to the two's complement of its magnitude.
    fn reduce(value: &BigInt) -> u64 {
        let (sign, digits) = value.to_u64_digits();
        let low = digits.first().copied().unwrap_or(0);
        let low = if sign == Sign::Minus {
            low.wrapping_neg()
        } else {
            low
        };
        low & Self::MASK
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    /// The value as an arbitrary-precision integer.
    pub fn big_value(&self) -> BigInt {
        BigInt::from(self.value)
    }

    pub fn set_value(&mut self, value: impl Into<BigInt>) {
        self.value = Self::reduce(&value.into());
    }

    /// Replace the value from its decimal string form, wrapping as usual.
    pub fn set_str(&mut self, s: &str) -> Result<()> {
        self.value = Self::reduce(&parse_decimal(W::NAME, s)?);
        Ok(())
    }

    pub fn tag(&self) -> BerType {
        W::TAG
    }

    pub fn encode_into(&self, buf: &mut EncodeBuf) {
        buf.push_unsigned(W::TAG, self.value);
    }

    pub fn encode(&self) -> Bytes {
        let mut buf = EncodeBuf::with_capacity(16);
        self.encode_into(&mut buf);
        buf.finish()
    }

    pub(crate) fn from_content(content: &[u8], offset: usize) -> Result<Self> {
        decode_twos_complement(content, offset).map(|v| Self {
            value: Self::reduce(&v),
            width: PhantomData,
        })
    }
}

impl<W: Width> Default for BoundedInteger<W> {
    fn default() -> Self {
        Self {
            value: 0,
            width: PhantomData,
        }
    }
}

impl<W: Width> fmt::Debug for BoundedInteger<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", W::NAME, self.value)
    }
}

impl<W: Width> fmt::Display for BoundedInteger<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        W::fmt_value(self.value, f)
    }
}

impl<W: Width> FromStr for BoundedInteger<W> {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_decimal(W::NAME, s).map(Self::new)
    }
}

macro_rules! bounded_from {
    ($($t:ty),*) => {
        $(impl<W: Width> From<$t> for BoundedInteger<W> {
            fn from(v: $t) -> Self {
                Self::new(v)
            }
        })*
    };
}

bounded_from!(i32, i64, u32, u64, BigInt);

macro_rules! width {
    ($(#[$meta:meta])* $marker:ident, $bits:expr, $tag:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum $marker {}

        impl Width for $marker {
            const BITS: u32 = $bits;
            const TAG: BerType = BerType::$tag;
            const NAME: &'static str = stringify!($tag);
        }
    };
}

width!(
    /// Width marker for [`Counter32`].
    Counter32Width, 32, Counter32
);
width!(
    /// Width marker for [`Gauge32`].
    Gauge32Width, 32, Gauge32
);
width!(
    /// Width marker for [`UInteger32`].
    UInteger32Width, 32, UInteger32
);
width!(
    /// Width marker for [`Counter64`].
    Counter64Width, 64, Counter64
);

/// Width marker for [`TimeTicks`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TimeTicksWidth {}

impl Width for TimeTicksWidth {
    const BITS: u32 = 32;
    const TAG: BerType = BerType::TimeTicks;
    const NAME: &'static str = "TimeTicks";

    fn fmt_value(value: u64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let centis = value % 100;
        let secs = value / 100;
        write!(
            f,
            "{} days, {:02}:{:02}:{:02}.{:02}",
            secs / 86_400,
            (secs / 3_600) % 24,
            (secs / 60) % 60,
            secs % 60,
            centis
        )
    }
}

/// Counter32: wraps at 2^32.
pub type Counter32 = BoundedInteger<Counter32Width>;
/// Gauge32: reduced modulo 2^32 like the other 32-bit types.
pub type Gauge32 = BoundedInteger<Gauge32Width>;
/// UInteger32: reduced modulo 2^32.
pub type UInteger32 = BoundedInteger<UInteger32Width>;
/// TimeTicks: hundredths of a second, wraps at 2^32.
pub type TimeTicks = BoundedInteger<TimeTicksWidth>;
/// Counter64: wraps at 2^64.
pub type Counter64 = BoundedInteger<Counter64Width>;
