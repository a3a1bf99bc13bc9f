//! Object Identifier (OID) type.
//!
//! OIDs are stored as `SmallVec<[u32; 16]>` to avoid heap allocation for common OIDs.

use crate::error::{DecodeErrorKind, Error, OidErrorKind, Result};
use smallvec::SmallVec;
use std::fmt;

/// Maximum number of arcs (subidentifiers) allowed in an OID.
///
/// Per RFC 2578 Section 3.5: "there are at most 128 sub-identifiers in a value".
/// Enforced by [`Oid::validate`] and while decoding BER content.
pub const MAX_OID_LEN: usize = 128;

/// Object Identifier.
///
/// Stored as a sequence of arc values (u32). Uses SmallVec to avoid
/// heap allocation for OIDs with 16 or fewer arcs.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct Oid {
    arcs: SmallVec<[u32; 16]>,
}

impl Oid {
    /// Create an empty OID.
    pub fn empty() -> Self {
        Self {
            arcs: SmallVec::new(),
        }
    }

    /// Create an OID from arc values.
    ///
    /// # Examples
    ///
    /// ```
    /// use snmp_ber::oid::Oid;
    ///
    /// let oid = Oid::new(vec![1, 3, 6, 1, 2, 1]);
    /// assert_eq!(oid.arcs(), &[1, 3, 6, 1, 2, 1]);
    ///
    /// let oid = Oid::new(0..5);
    /// assert_eq!(oid.arcs(), &[0, 1, 2, 3, 4]);
    /// ```
    pub fn new(arcs: impl IntoIterator<Item = u32>) -> Self {
        Self {
            arcs: arcs.into_iter().collect(),
        }
    }

    /// Create an OID from a slice of arcs.
    pub fn from_slice(arcs: &[u32]) -> Self {
        Self {
            arcs: SmallVec::from_slice(arcs),
        }
    }

    /// Parse an OID from dotted decimal notation (e.g. "1.3.6.1.2.1.1.1.0").
    ///
    /// A leading dot is tolerated. Arc constraints are not checked here; call
    /// [`validate()`](Self::validate) for that.
    ///
    /// # Examples
    ///
    /// ```
    /// use snmp_ber::oid::Oid;
    ///
    /// let oid = Oid::parse(".1.3.6.1.2.1.1.5.0").unwrap();
    /// assert_eq!(oid.to_string(), "1.3.6.1.2.1.1.5.0");
    ///
    /// assert!(Oid::parse("1.3.six").is_err());
    /// assert!(Oid::parse("3.0").unwrap().validate().is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        let body = s.strip_prefix('.').unwrap_or(s);
        if body.is_empty() {
            return Ok(Self::empty());
        }

        let mut arcs = SmallVec::new();
        for part in body.split('.') {
            let arc: u32 = part
                .parse()
                .map_err(|_| Error::invalid_oid_with_input(OidErrorKind::InvalidArc, s))?;
            arcs.push(arc);
        }

        Ok(Self { arcs })
    }

    /// Get the arc values.
    pub fn arcs(&self) -> &[u32] {
        &self.arcs
    }

    /// Get the number of arcs.
    pub fn len(&self) -> usize {
        self.arcs.len()
    }

    /// Check if the OID is empty.
    pub fn is_empty(&self) -> bool {
        self.arcs.is_empty()
    }

    /// Check if this OID starts with another OID.
    ///
    /// An OID always starts with itself, and any OID starts with an empty OID.
    pub fn starts_with(&self, other: &Oid) -> bool {
        self.arcs.len() >= other.arcs.len() && self.arcs[..other.arcs.len()] == other.arcs[..]
    }

    /// Get the parent OID (all arcs except the last), or `None` if empty.
    pub fn parent(&self) -> Option<Oid> {
        let (_, rest) = self.arcs.split_last()?;
        Some(Oid::from_slice(rest))
    }

    /// Create a child OID by appending an arc.
    ///
    /// ```
    /// use snmp_ber::oid;
    ///
    /// let sys_uptime = oid!(1, 3, 6, 1, 2, 1, 1, 3).child(0);
    /// assert_eq!(sys_uptime.to_string(), "1.3.6.1.2.1.1.3.0");
    /// ```
    pub fn child(&self, arc: u32) -> Oid {
        let mut arcs = self.arcs.clone();
        arcs.push(arc);
        Oid { arcs }
    }

    /// Check that the OID survives a BER round trip unchanged.
    ///
    /// Arc rules per X.690 Section 8.19.4:
    /// - the empty OID is accepted and encodes as zero content octets
    /// - otherwise at least two arcs, and at most [`MAX_OID_LEN`]
    /// - arc1 must be 0, 1, or 2
    /// - arc2 must be <= 39 when arc1 is 0 or 1
    ///
    /// ```
    /// use snmp_ber::oid;
    ///
    /// assert!(oid!(1, 3, 6, 1).validate().is_ok());
    /// assert!(oid!(1).validate().is_err());
    /// assert!(oid!(1, 40).validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<()> {
        let (arc1, arc2) = match self.arcs.as_slice() {
            [] => return Ok(()),
            [_] => return Err(self.invalid(OidErrorKind::SingleArc)),
            [first, second, ..] => (*first, *second),
        };

        if self.arcs.len() > MAX_OID_LEN {
            return Err(self.invalid(OidErrorKind::TooManyArcs {
                count: self.arcs.len(),
                max: MAX_OID_LEN,
            }));
        }

        if arc1 > 2 {
            return Err(self.invalid(OidErrorKind::InvalidFirstArc(arc1)));
        }

        if arc1 < 2 && arc2 >= 40 {
            return Err(self.invalid(OidErrorKind::InvalidSecondArc {
                first: arc1,
                second: arc2,
            }));
        }

        Ok(())
    }

    fn invalid(&self, kind: OidErrorKind) -> Error {
        Error::invalid_oid_with_input(kind, self.to_string())
    }

    /// Encode the BER content octets (no tag or length).
    ///
    /// OID encoding (X.690 Section 8.19):
    /// - First two arcs encoded as (arc1 * 40) + arc2 using base-128
    /// - Remaining arcs encoded as base-128 variable length
    ///
    /// Empty OIDs encode as zero content bytes. Arc rules are not checked;
    /// use [`to_ber_checked()`](Self::to_ber_checked) when the OID is not
    /// known to be valid.
    pub fn to_ber_smallvec(&self) -> SmallVec<[u8; 64]> {
        let mut bytes = SmallVec::new();

        match self.arcs.as_slice() {
            [] => {}
            [only] => encode_subidentifier(&mut bytes, u64::from(*only) * 40),
            [first, second, rest @ ..] => {
                // arc2 may exceed 127 when arc1 is 2, so this is a full subidentifier
                encode_subidentifier(&mut bytes, u64::from(*first) * 40 + u64::from(*second));
                for &arc in rest {
                    encode_subidentifier(&mut bytes, u64::from(arc));
                }
            }
        }

        bytes
    }

    /// Encode the BER content octets into a `Vec`.
    pub fn to_ber(&self) -> Vec<u8> {
        self.to_ber_smallvec().to_vec()
    }

    /// Encode the BER content octets after [`validate()`](Self::validate).
    pub fn to_ber_checked(&self) -> Result<Vec<u8>> {
        self.validate()?;
        Ok(self.to_ber())
    }

    /// Decode BER content octets.
    ///
    /// `base_offset` is the absolute offset of `data` in the enclosing buffer
    /// and is used only for error reporting. Enforces [`MAX_OID_LEN`].
    pub fn from_ber(data: &[u8], base_offset: usize) -> Result<Self> {
        if data.is_empty() {
            return Ok(Self::empty());
        }

        let mut arcs: SmallVec<[u32; 16]> = SmallVec::new();

        let (first_subid, consumed) = decode_subidentifier(data, base_offset)?;
        let (arc1, arc2) = match first_subid {
            0..40 => (0, first_subid),
            40..80 => (1, first_subid - 40),
            _ => (2, first_subid - 80),
        };
        let arc2 = u32::try_from(arc2)
            .map_err(|_| Error::decode(base_offset, DecodeErrorKind::IntegerOverflow))?;
        arcs.push(arc1);
        arcs.push(arc2);

        let mut i = consumed;
        while i < data.len() {
            let (arc, used) = decode_subidentifier(&data[i..], base_offset + i)?;
            let arc = u32::try_from(arc)
                .map_err(|_| Error::decode(base_offset + i, DecodeErrorKind::IntegerOverflow))?;
            arcs.push(arc);
            i += used;

            if arcs.len() > MAX_OID_LEN {
                return Err(Error::decode(
                    base_offset + i,
                    DecodeErrorKind::OidTooLong {
                        count: arcs.len(),
                        max: MAX_OID_LEN,
                    },
                ));
            }
        }

        Ok(Self { arcs })
    }
}

/// Encode a subidentifier in base-128 variable length.
#[inline]
fn encode_subidentifier(bytes: &mut SmallVec<[u8; 64]>, value: u64) {
    if value == 0 {
        bytes.push(0);
        return;
    }

    let groups = (64 - value.leading_zeros()).div_ceil(7);
    for i in (0..groups).rev() {
        let mut byte = ((value >> (i * 7)) & 0x7F) as u8;
        if i > 0 {
            byte |= 0x80;
        }
        bytes.push(byte);
    }
}

/// Decode a subidentifier, returning (value, bytes_consumed).
///
/// The value is wide enough to hold the combined first subidentifier of any
/// pair of u32 arcs; callers narrow it.
fn decode_subidentifier(data: &[u8], base_offset: usize) -> Result<(u64, usize)> {
    let mut value: u64 = 0;

    for (i, &byte) in data.iter().enumerate() {
        if i == 0 && byte == 0x80 {
            // Leading 0x80 is a non-minimal padding octet (X.690 8.19.2)
            return Err(Error::decode(
                base_offset,
                DecodeErrorKind::InvalidOidEncoding,
            ));
        }
        if value > (u64::from(u32::MAX) << 7) {
            return Err(Error::decode(
                base_offset + i,
                DecodeErrorKind::IntegerOverflow,
            ));
        }
        value = (value << 7) | u64::from(byte & 0x7F);
        if byte & 0x80 == 0 {
            return Ok((value, i + 1));
        }
    }

    Err(Error::Truncated {
        offset: base_offset + data.len(),
        needed: 1,
        available: 0,
    })
}

impl fmt::Debug for Oid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Oid({})", self)
    }
}

impl fmt::Display for Oid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for arc in &self.arcs {
            if !first {
                write!(f, ".")?;
            }
            write!(f, "{}", arc)?;
            first = false;
        }
        Ok(())
    }
}

impl std::str::FromStr for Oid {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<&[u32]> for Oid {
    fn from(arcs: &[u32]) -> Self {
        Self::from_slice(arcs)
    }
}

impl<const N: usize> From<[u32; N]> for Oid {
    fn from(arcs: [u32; N]) -> Self {
        Self::new(arcs)
    }
}

impl PartialOrd for Oid {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Oid {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.arcs.cmp(&other.arcs)
    }
}

/// Build an [`Oid`](crate::oid::Oid) from literal arcs.
///
/// ```
/// use snmp_ber::oid;
///
/// let sys_descr = oid!(1, 3, 6, 1, 2, 1, 1, 1, 0);
/// assert_eq!(sys_descr.to_string(), "1.3.6.1.2.1.1.1.0");
/// assert!(sys_descr.starts_with(&oid!(1, 3, 6, 1, 2, 1, 1)));
/// ```
#[macro_export]
macro_rules! oid {
    ($($arc:expr),* $(,)?) => {
        $crate::oid::Oid::from_slice(&[$($arc),*])
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        let oid = Oid::parse("1.3.6.1.2.1.1.1.0").unwrap();
        assert_eq!(oid.arcs(), &[1, 3, 6, 1, 2, 1, 1, 1, 0]);
        assert_eq!(Oid::parse(".1.3").unwrap().arcs(), &[1, 3]);
        assert!(Oid::parse("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = Oid::parse("1..3").unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidOid {
                kind: OidErrorKind::InvalidArc,
                input: Some(_)
            }
        ));
        assert!(Oid::parse("1.3.-6").is_err());
        assert!(Oid::parse("1.3.4294967296").is_err());
    }

    #[test]
    fn test_parent_and_child() {
        let oid = oid!(1, 3, 6);
        assert_eq!(oid.parent().unwrap(), oid!(1, 3));
        assert_eq!(oid.child(1), oid!(1, 3, 6, 1));
        assert!(Oid::empty().parent().is_none());
    }

    #[test]
    fn test_ber_encoding() {
        // 1.3.6.1 encodes as: (1*40+3)=43, 6, 1
        assert_eq!(oid!(1, 3, 6, 1).to_ber(), vec![0x2B, 0x06, 0x01]);
        // 2.999.3: first subidentifier 1079 spans two octets
        assert_eq!(oid!(2, 999, 3).to_ber(), vec![0x88, 0x37, 0x03]);
        assert_eq!(oid!(1, 3, 6, 1, 4, 1, 200).to_ber()[5..], [0x81, 0x48]);
    }

    #[test]
    fn test_ber_roundtrip_edges() {
        for oid in [
            oid!(0, 0),
            oid!(1, 39),
            oid!(2, 999, 3),
            oid!(1, 3, 6, 1, 4, 1, u32::MAX),
        ] {
            let ber = oid.to_ber();
            assert_eq!(Oid::from_ber(&ber, 0).unwrap(), oid);
        }
    }

    #[test]
    fn test_from_ber_truncated() {
        // Continuation bit set on the final octet
        assert!(matches!(
            Oid::from_ber(&[0x2B, 0x86], 10),
            Err(Error::Truncated { offset: 12, .. })
        ));
    }

    #[test]
    fn test_from_ber_overflow() {
        let data = [0x2B, 0x90, 0x80, 0x80, 0x80, 0x00];
        assert!(matches!(
            Oid::from_ber(&data, 0),
            Err(Error::Decode {
                kind: DecodeErrorKind::IntegerOverflow,
                ..
            })
        ));
    }

    #[test]
    fn test_from_ber_too_long() {
        let mut data = vec![0x2B];
        data.extend(std::iter::repeat_n(0x01, MAX_OID_LEN));
        assert!(matches!(
            Oid::from_ber(&data, 0),
            Err(Error::Decode {
                kind: DecodeErrorKind::OidTooLong { .. },
                ..
            })
        ));
    }

    #[test]
    fn test_validate() {
        assert!(oid!(1, 3, 6, 1).validate().is_ok());
        assert!(oid!(2, 999).validate().is_ok());
        assert!(matches!(
            oid!(3, 0).validate(),
            Err(Error::InvalidOid {
                kind: OidErrorKind::InvalidFirstArc(3),
                ..
            })
        ));
        assert!(oid!(0, 40).validate().is_err());
        assert!(oid!(1, 39).validate().is_ok());
        assert!(Oid::empty().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_what_ber_would_alter() {
        // Each of these would come back from the wire as a different OID
        assert!(matches!(
            oid!(3, 0).to_ber_checked(),
            Err(Error::InvalidOid {
                kind: OidErrorKind::InvalidFirstArc(3),
                ..
            })
        ));
        assert!(matches!(
            oid!(1).to_ber_checked(),
            Err(Error::InvalidOid {
                kind: OidErrorKind::SingleArc,
                ..
            })
        ));
        assert!(matches!(
            oid!(1, 40).to_ber_checked(),
            Err(Error::InvalidOid {
                kind: OidErrorKind::InvalidSecondArc {
                    first: 1,
                    second: 40
                },
                ..
            })
        ));

        let long = Oid::new((0..200).map(|i| if i == 0 { 1 } else { 3 }));
        assert!(matches!(
            long.to_ber_checked(),
            Err(Error::InvalidOid {
                kind: OidErrorKind::TooManyArcs {
                    count: 200,
                    max: MAX_OID_LEN
                },
                ..
            })
        ));
        let longest = Oid::new((0..MAX_OID_LEN as u32).map(|i| if i == 0 { 1 } else { 3 }));
        let ber = longest.to_ber_checked().unwrap();
        assert_eq!(Oid::from_ber(&ber, 0).unwrap(), longest);
    }

    #[test]
    fn test_ordering() {
        assert!(oid!(1, 3, 6) < oid!(1, 3, 6, 1));
        assert!(oid!(1, 3, 6, 2) > oid!(1, 3, 6, 1, 9));
    }
}
