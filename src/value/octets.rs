//! Octet string family: OCTET STRING, Opaque, BIT STRING and the fixed-length
//! address types.

use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

use bytes::Bytes;

use crate::ber::{BerType, EncodeBuf};
use crate::error::{BadValueKind, Error, Result};
use crate::format::{hex, printable};

/// OCTET STRING (arbitrary bytes).
///
/// Displays as text when every byte is printable (see
/// [`printable::as_text`]), otherwise as uppercase spaced hex.
///
/// ```
/// use snmp_ber::value::OctetString;
///
/// assert_eq!(OctetString::from(&b"hello\0"[..]).to_string(), "hello");
/// assert_eq!(OctetString::from(vec![0x01, 0x02]).to_string(), "01 02");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct OctetString {
    value: Bytes,
}

impl OctetString {
    pub fn new(value: impl Into<Bytes>) -> Self {
        Self {
            value: value.into(),
        }
    }

    pub fn value(&self) -> &[u8] {
        &self.value
    }

    /// The content as shared `Bytes`.
    pub fn bytes(&self) -> &Bytes {
        &self.value
    }

    pub fn set_value(&mut self, value: impl Into<Bytes>) {
        self.value = value.into();
    }

    pub fn len(&self) -> usize {
        self.value.len()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn encode_into(&self, buf: &mut EncodeBuf) {
        buf.push_primitive(BerType::OctetString, &self.value);
    }
}

impl fmt::Display for OctetString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match printable::as_text(&self.value) {
            Some(text) => f.write_str(&text),
            None => f.write_str(&hex::encode_spaced_upper(&self.value)),
        }
    }
}

impl From<&str> for OctetString {
    fn from(s: &str) -> Self {
        Self::new(Bytes::copy_from_slice(s.as_bytes()))
    }
}

impl From<String> for OctetString {
    fn from(s: String) -> Self {
        Self::new(s.into_bytes())
    }
}

impl From<&[u8]> for OctetString {
    fn from(data: &[u8]) -> Self {
        Self::new(Bytes::copy_from_slice(data))
    }
}

impl From<Vec<u8>> for OctetString {
    fn from(data: Vec<u8>) -> Self {
        Self::new(data)
    }
}

impl From<Bytes> for OctetString {
    fn from(data: Bytes) -> Self {
        Self::new(data)
    }
}

macro_rules! raw_bytes_type {
    ($(#[$meta:meta])* $name:ident, $tag:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
        pub struct $name {
            value: Bytes,
        }

        impl $name {
            pub fn new(value: impl Into<Bytes>) -> Self {
                Self {
                    value: value.into(),
                }
            }

            pub fn value(&self) -> &[u8] {
                &self.value
            }

            pub fn set_value(&mut self, value: impl Into<Bytes>) {
                self.value = value.into();
            }

            pub fn encode_into(&self, buf: &mut EncodeBuf) {
                buf.push_primitive(BerType::$tag, &self.value);
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&hex::encode_spaced_upper(&self.value))
            }
        }

        impl From<Vec<u8>> for $name {
            fn from(data: Vec<u8>) -> Self {
                Self::new(data)
            }
        }

        impl From<Bytes> for $name {
            fn from(data: Bytes) -> Self {
                Self::new(data)
            }
        }
    };
}

raw_bytes_type!(
    /// Opaque (legacy wrapper around arbitrary BER-encoded bytes). Always
    /// displays as hex.
    Opaque,
    Opaque
);

raw_bytes_type!(
    /// BIT STRING, kept as its raw content octets (leading unused-bits octet
    /// included). Displays as hex.
    BitString,
    BitString
);

fn check_length<const N: usize>(type_name: &'static str, data: &[u8]) -> Result<[u8; N]> {
    data.try_into().map_err(|_| {
        Error::bad_value(
            type_name,
            BadValueKind::WrongLength {
                expected: N,
                actual: data.len(),
            },
        )
    })
}

/// Split `s` on any of `delims` and parse each component in `radix` as one octet.
fn parse_octets<const N: usize>(
    type_name: &'static str,
    s: &str,
    delims: &[char],
    radix: u32,
) -> Result<[u8; N]> {
    let parts: Vec<&str> = s.trim().split(delims).collect();
    if parts.len() != N {
        return Err(Error::bad_value(
            type_name,
            BadValueKind::WrongComponentCount {
                expected: N,
                actual: parts.len(),
            },
        ));
    }

    let mut out = [0u8; N];
    for (slot, part) in out.iter_mut().zip(&parts) {
        let invalid =
            || Error::bad_value(type_name, BadValueKind::InvalidComponent(part.to_string()));
        // from_str_radix alone would accept a leading sign
        if !part.chars().all(|c| c.is_digit(radix)) {
            return Err(invalid());
        }
        let value = u32::from_str_radix(part, radix).map_err(|_| invalid())?;
        *slot = u8::try_from(value)
            .map_err(|_| Error::bad_value(type_name, BadValueKind::OctetOutOfRange(value)))?;
    }
    Ok(out)
}

/// IpAddress: exactly four octets, displayed dotted-decimal.
///
/// ```
/// use snmp_ber::value::IpAddress;
///
/// assert!(IpAddress::from_bytes(&[1, 2, 3]).is_err());
/// let ip = IpAddress::from_bytes(&[1, 2, 3, 4]).unwrap();
/// assert_eq!(ip.to_string(), "1.2.3.4");
/// assert_eq!("10.0.0.1".parse::<IpAddress>().unwrap().octets(), [10, 0, 0, 1]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct IpAddress {
    octets: [u8; 4],
}

impl IpAddress {
    pub const LEN: usize = 4;

    pub fn new(octets: [u8; 4]) -> Self {
        Self { octets }
    }

    /// Build from a byte slice, which must hold exactly four bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        check_length("IpAddress", data).map(Self::new)
    }

    /// Parse dotted-decimal notation.
    pub fn parse(s: &str) -> Result<Self> {
        parse_octets("IpAddress", s, &['.'], 10).map(Self::new)
    }

    pub fn octets(&self) -> [u8; 4] {
        self.octets
    }

    pub fn to_ipv4(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.octets)
    }

    /// Replace the address from a byte slice; the old value is kept on error.
    pub fn set_value(&mut self, data: &[u8]) -> Result<()> {
        *self = Self::from_bytes(data)?;
        Ok(())
    }

    pub fn encode_into(&self, buf: &mut EncodeBuf) {
        buf.push_primitive(BerType::IpAddress, &self.octets);
    }
}

impl fmt::Display for IpAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = self.octets;
        write!(f, "{}.{}.{}.{}", a, b, c, d)
    }
}

impl FromStr for IpAddress {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<Ipv4Addr> for IpAddress {
    fn from(addr: Ipv4Addr) -> Self {
        Self::new(addr.octets())
    }
}

impl From<[u8; 4]> for IpAddress {
    fn from(octets: [u8; 4]) -> Self {
        Self::new(octets)
    }
}

impl From<IpAddress> for Ipv4Addr {
    fn from(addr: IpAddress) -> Self {
        addr.to_ipv4()
    }
}

/// NsapAddress: exactly six octets, displayed as dash-separated lowercase hex.
///
/// ```
/// use snmp_ber::value::NsapAddress;
///
/// let nsap = NsapAddress::parse("6-4d-0-6f-91-07").unwrap();
/// assert_eq!(nsap.octets(), [0x06, 0x4d, 0x00, 0x6f, 0x91, 0x07]);
/// assert_eq!(nsap.to_string(), "06-4d-00-6f-91-07");
/// assert!(NsapAddress::parse("6-4d-0-6f-91").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct NsapAddress {
    octets: [u8; 6],
}

impl NsapAddress {
    pub const LEN: usize = 6;

    pub fn new(octets: [u8; 6]) -> Self {
        Self { octets }
    }

    /// Build from a byte slice, which must hold exactly six bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        check_length("NsapAddress", data).map(Self::new)
    }

    /// Parse six hex components separated by `-` or `.`.
    pub fn parse(s: &str) -> Result<Self> {
        parse_octets("NsapAddress", s, &['-', '.'], 16).map(Self::new)
    }

    pub fn octets(&self) -> [u8; 6] {
        self.octets
    }

    /// Replace the address from a byte slice; the old value is kept on error.
    pub fn set_value(&mut self, data: &[u8]) -> Result<()> {
        *self = Self::from_bytes(data)?;
        Ok(())
    }

    pub fn encode_into(&self, buf: &mut EncodeBuf) {
        buf.push_primitive(BerType::NsapAddress, &self.octets);
    }
}

impl fmt::Display for NsapAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, b) in self.octets.iter().enumerate() {
            if i > 0 {
                f.write_str("-")?;
            }
            write!(f, "{:02x}", b)?;
        }
        Ok(())
    }
}

impl FromStr for NsapAddress {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<[u8; 6]> for NsapAddress {
    fn from(octets: [u8; 6]) -> Self {
        Self::new(octets)
    }
}
