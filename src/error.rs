//! Error types for snmp-ber.
//!
//! All errors are `#[non_exhaustive]` to allow adding new variants without breaking changes.
//! Decoding is all-or-nothing: any error aborts the enclosing structure and no
//! partially decoded value is ever returned.

use std::net::SocketAddr;
use std::time::Duration;

use crate::ber::BerType;

/// Result type alias using the library's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Reasons a constructor or setter rejected its input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BadValueKind {
    /// Byte array has the wrong length for a fixed-size type.
    WrongLength { expected: usize, actual: usize },
    /// String form has the wrong number of delimited components.
    WrongComponentCount { expected: usize, actual: usize },
    /// A component is not a number in the expected radix.
    InvalidComponent(String),
    /// A component is outside 0..=255.
    OctetOutOfRange(u32),
    /// The whole string could not be parsed.
    Unparseable(String),
}

impl std::fmt::Display for BadValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::WrongLength { expected, actual } => {
                write!(f, "expected {} bytes, got {}", expected, actual)
            }
            Self::WrongComponentCount { expected, actual } => {
                write!(f, "expected {} components, got {}", expected, actual)
            }
            Self::InvalidComponent(c) => write!(f, "invalid component {:?}", c),
            Self::OctetOutOfRange(v) => write!(f, "octet {} outside 0..=255", v),
            Self::Unparseable(s) => write!(f, "cannot parse {:?}", s),
        }
    }
}

/// BER decode error kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeErrorKind {
    /// Expected different tag.
    UnexpectedTag { expected: u8, actual: u8 },
    /// Invalid BER length encoding.
    InvalidLength,
    /// Indefinite length not supported.
    IndefiniteLength,
    /// Length field too long.
    LengthTooLong { octets: usize },
    /// Length exceeds configured maximum.
    LengthExceedsMax { length: usize, max: usize },
    /// Zero-length integer.
    ZeroLengthInteger,
    /// NULL with non-zero length.
    InvalidNull,
    /// Subidentifier overflow.
    IntegerOverflow,
    /// Invalid OID encoding.
    InvalidOidEncoding,
    /// OID exceeds maximum arc count during decode.
    OidTooLong { count: usize, max: usize },
    /// Constructed values nested deeper than the configured maximum.
    NestingTooDeep { max: usize },
    /// Bytes left over after a complete TLV.
    TrailingData { remaining: usize },
    /// Unknown SNMP message version.
    UnknownVersion(i64),
}

impl std::fmt::Display for DecodeErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedTag { expected, actual } => {
                write!(f, "expected tag 0x{:02X}, got 0x{:02X}", expected, actual)
            }
            Self::InvalidLength => write!(f, "invalid length encoding"),
            Self::IndefiniteLength => write!(f, "indefinite length encoding not supported"),
            Self::LengthTooLong { octets } => {
                write!(f, "length encoding too long ({} octets)", octets)
            }
            Self::LengthExceedsMax { length, max } => {
                write!(f, "length {} exceeds maximum {}", length, max)
            }
            Self::ZeroLengthInteger => write!(f, "zero-length integer"),
            Self::InvalidNull => write!(f, "NULL with non-zero length"),
            Self::IntegerOverflow => write!(f, "integer overflow"),
            Self::InvalidOidEncoding => write!(f, "invalid OID encoding"),
            Self::OidTooLong { count, max } => {
                write!(f, "OID has {} arcs, exceeds maximum {}", count, max)
            }
            Self::NestingTooDeep { max } => {
                write!(f, "constructed values nested deeper than {}", max)
            }
            Self::TrailingData { remaining } => {
                write!(f, "{} trailing bytes after value", remaining)
            }
            Self::UnknownVersion(v) => write!(f, "unknown SNMP version: {}", v),
        }
    }
}

/// Structural checks applied to decoded PDUs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PduErrorKind {
    /// Tag is not one of the PDU tags.
    NotAPdu(BerType),
    /// Wrong number of top-level elements.
    WrongArity { expected: usize, actual: usize },
    /// Position must hold an Integer-family value.
    ExpectedInteger { position: usize, actual: BerType },
    /// Bindings position must hold a Sequence.
    ExpectedSequence { position: usize, actual: BerType },
    /// Position must hold an Object Identifier.
    ExpectedOid { position: usize, actual: BerType },
    /// Position must hold an IpAddress.
    ExpectedIpAddress { position: usize, actual: BerType },
    /// Position must hold TimeTicks.
    ExpectedTimeTicks { position: usize, actual: BerType },
    /// A binding is not a Sequence.
    BindingNotSequence { index: usize, actual: BerType },
    /// A binding does not have exactly two elements.
    BindingArity { index: usize, actual: usize },
    /// A binding's first element is not an Object Identifier.
    BindingNameNotOid { index: usize, actual: BerType },
    /// Notification is missing its sysUpTime.0 TimeTicks binding.
    MissingSysUpTime,
    /// Notification is missing its snmpTrapOID.0 binding.
    MissingTrapOid,
}

impl std::fmt::Display for PduErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotAPdu(t) => write!(f, "{} is not a PDU type", t),
            Self::WrongArity { expected, actual } => {
                write!(f, "expected {} elements, got {}", expected, actual)
            }
            Self::ExpectedInteger { position, actual } => {
                write!(f, "element {} must be an integer, got {}", position, actual)
            }
            Self::ExpectedSequence { position, actual } => {
                write!(f, "element {} must be a sequence, got {}", position, actual)
            }
            Self::ExpectedOid { position, actual } => {
                write!(
                    f,
                    "element {} must be an object identifier, got {}",
                    position, actual
                )
            }
            Self::ExpectedIpAddress { position, actual } => {
                write!(f, "element {} must be an IP address, got {}", position, actual)
            }
            Self::ExpectedTimeTicks { position, actual } => {
                write!(f, "element {} must be time ticks, got {}", position, actual)
            }
            Self::BindingNotSequence { index, actual } => {
                write!(f, "binding {} must be a sequence, got {}", index, actual)
            }
            Self::BindingArity { index, actual } => {
                write!(f, "binding {} has {} elements, expected 2", index, actual)
            }
            Self::BindingNameNotOid { index, actual } => {
                write!(
                    f,
                    "binding {} name must be an object identifier, got {}",
                    index, actual
                )
            }
            Self::MissingSysUpTime => write!(f, "first binding must be sysUpTime.0 TimeTicks"),
            Self::MissingTrapOid => {
                write!(f, "second binding must be snmpTrapOID.0 object identifier")
            }
        }
    }
}

/// OID validation error kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OidErrorKind {
    /// Invalid arc value.
    InvalidArc,
    /// First arc must be 0, 1, or 2.
    InvalidFirstArc(u32),
    /// Second arc too large for first arc value.
    InvalidSecondArc { first: u32, second: u32 },
    /// A non-empty OID needs at least two arcs to encode.
    SingleArc,
    /// More arcs than BER allows.
    TooManyArcs { count: usize, max: usize },
}

impl std::fmt::Display for OidErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidArc => write!(f, "invalid arc value"),
            Self::InvalidFirstArc(v) => write!(f, "first arc must be 0, 1, or 2, got {}", v),
            Self::InvalidSecondArc { first, second } => {
                write!(f, "second arc {} too large for first arc {}", second, first)
            }
            Self::SingleArc => write!(f, "a single arc cannot be encoded"),
            Self::TooManyArcs { count, max } => {
                write!(f, "{} arcs exceeds maximum {}", count, max)
            }
        }
    }
}

/// SNMP error status codes (RFC 3416).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorStatus {
    NoError,
    TooBig,
    NoSuchName,
    BadValue,
    ReadOnly,
    GenErr,
    NoAccess,
    WrongType,
    WrongLength,
    WrongEncoding,
    WrongValue,
    NoCreation,
    InconsistentValue,
    ResourceUnavailable,
    CommitFailed,
    UndoFailed,
    AuthorizationError,
    NotWritable,
    InconsistentName,
    /// Unknown/future error status code.
    Unknown(i64),
}

impl ErrorStatus {
    /// Create from raw status code.
    pub fn from_i64(value: i64) -> Self {
        match value {
            0 => Self::NoError,
            1 => Self::TooBig,
            2 => Self::NoSuchName,
            3 => Self::BadValue,
            4 => Self::ReadOnly,
            5 => Self::GenErr,
            6 => Self::NoAccess,
            7 => Self::WrongType,
            8 => Self::WrongLength,
            9 => Self::WrongEncoding,
            10 => Self::WrongValue,
            11 => Self::NoCreation,
            12 => Self::InconsistentValue,
            13 => Self::ResourceUnavailable,
            14 => Self::CommitFailed,
            15 => Self::UndoFailed,
            16 => Self::AuthorizationError,
            17 => Self::NotWritable,
            18 => Self::InconsistentName,
            other => Self::Unknown(other),
        }
    }

    /// Convert to raw status code.
    pub fn as_i64(&self) -> i64 {
        match self {
            Self::NoError => 0,
            Self::TooBig => 1,
            Self::NoSuchName => 2,
            Self::BadValue => 3,
            Self::ReadOnly => 4,
            Self::GenErr => 5,
            Self::NoAccess => 6,
            Self::WrongType => 7,
            Self::WrongLength => 8,
            Self::WrongEncoding => 9,
            Self::WrongValue => 10,
            Self::NoCreation => 11,
            Self::InconsistentValue => 12,
            Self::ResourceUnavailable => 13,
            Self::CommitFailed => 14,
            Self::UndoFailed => 15,
            Self::AuthorizationError => 16,
            Self::NotWritable => 17,
            Self::InconsistentName => 18,
            Self::Unknown(code) => *code,
        }
    }
}

impl std::fmt::Display for ErrorStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoError => write!(f, "noError"),
            Self::TooBig => write!(f, "tooBig"),
            Self::NoSuchName => write!(f, "noSuchName"),
            Self::BadValue => write!(f, "badValue"),
            Self::ReadOnly => write!(f, "readOnly"),
            Self::GenErr => write!(f, "genErr"),
            Self::NoAccess => write!(f, "noAccess"),
            Self::WrongType => write!(f, "wrongType"),
            Self::WrongLength => write!(f, "wrongLength"),
            Self::WrongEncoding => write!(f, "wrongEncoding"),
            Self::WrongValue => write!(f, "wrongValue"),
            Self::NoCreation => write!(f, "noCreation"),
            Self::InconsistentValue => write!(f, "inconsistentValue"),
            Self::ResourceUnavailable => write!(f, "resourceUnavailable"),
            Self::CommitFailed => write!(f, "commitFailed"),
            Self::UndoFailed => write!(f, "undoFailed"),
            Self::AuthorizationError => write!(f, "authorizationError"),
            Self::NotWritable => write!(f, "notWritable"),
            Self::InconsistentName => write!(f, "inconsistentName"),
            Self::Unknown(code) => write!(f, "unknown({})", code),
        }
    }
}

/// Library error type.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A constructor or setter received an unacceptable value.
    #[error("bad value for {type_name}: {kind}")]
    BadValue {
        type_name: &'static str,
        kind: BadValueKind,
    },

    /// Leading byte of a TLV is not a registered tag.
    #[error("unknown tag 0x{tag:02X} at offset {offset}")]
    UnknownTag { offset: usize, tag: u8 },

    /// Decoded PDU failed structural validation.
    #[error("malformed {pdu} PDU: {kind}")]
    MalformedPdu { pdu: BerType, kind: PduErrorKind },

    /// Fewer bytes available than a declared length demands.
    #[error("truncated at offset {offset}: need {needed} bytes but only {available} remaining")]
    Truncated {
        offset: usize,
        needed: usize,
        available: usize,
    },

    /// Other BER decoding error.
    #[error("decode error at offset {offset}: {kind}")]
    Decode {
        offset: usize,
        kind: DecodeErrorKind,
    },

    /// Invalid OID format.
    #[error("invalid OID: {kind}")]
    InvalidOid {
        kind: OidErrorKind,
        input: Option<Box<str>>, // Only allocated when parsing string input
    },

    /// I/O error during a transport exchange.
    #[error("I/O error{}: {source}", target.map(|t| format!(" communicating with {}", t)).unwrap_or_default())]
    Io {
        target: Option<SocketAddr>,
        #[source]
        source: std::io::Error,
    },

    /// Exchange timed out (after retries if configured).
    #[error("timeout after {elapsed:?}{} (request_id={request_id}, retries={retries})", target.map(|t| format!(" waiting for {}", t)).unwrap_or_default())]
    Timeout {
        target: Option<SocketAddr>,
        elapsed: Duration,
        request_id: i64,
        retries: u32,
    },

    /// Response request ID doesn't match.
    #[error("request ID mismatch: expected {expected}, got {actual}")]
    RequestIdMismatch { expected: i64, actual: i64 },

    /// Message exceeds maximum size.
    #[error("message too large: {size} bytes exceeds maximum {max}")]
    MessageTooLarge { size: usize, max: usize },
}

impl Error {
    /// Create a bad value error.
    pub fn bad_value(type_name: &'static str, kind: BadValueKind) -> Self {
        Self::BadValue { type_name, kind }
    }

    /// Create a decode error.
    pub fn decode(offset: usize, kind: DecodeErrorKind) -> Self {
        Self::Decode { offset, kind }
    }

    /// Create a malformed PDU error.
    pub fn malformed_pdu(pdu: BerType, kind: PduErrorKind) -> Self {
        Self::MalformedPdu { pdu, kind }
    }

    /// Create an invalid OID error from a kind (no input string).
    pub fn invalid_oid(kind: OidErrorKind) -> Self {
        Self::InvalidOid { kind, input: None }
    }

    /// Create an invalid OID error with the input string that failed.
    pub fn invalid_oid_with_input(kind: OidErrorKind, input: impl Into<Box<str>>) -> Self {
        Self::InvalidOid {
            kind,
            input: Some(input.into()),
        }
    }

    /// Whether this error came from decoding wire bytes.
    pub fn is_decode_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownTag { .. }
                | Self::MalformedPdu { .. }
                | Self::Truncated { .. }
                | Self::Decode { .. }
        )
    }

    /// Get the target address if this error has one.
    pub fn target(&self) -> Option<SocketAddr> {
        match self {
            Self::Io { target, .. } => *target,
            Self::Timeout { target, .. } => *target,
            _ => None,
        }
    }
}
