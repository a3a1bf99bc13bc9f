//! Request/response PDUs: Get, GetNext, Response, Set and GetBulk.

use std::fmt;

use num_bigint::Sign;
use num_traits::{ToPrimitive, Zero};

use crate::ber::{BerType, EncodeBuf};
use crate::error::{ErrorStatus, PduErrorKind, Result};
use crate::oid::Oid;
use crate::value::{Integer, Sequence, SnmpObject};
use crate::varbind::{VarBind, encode_varbind_list, null_varbinds};

use super::{PduType, validate};

/// Clamp an INTEGER to `i64` for status codes and request ids.
pub(crate) fn saturating_i64(value: &Integer) -> i64 {
    value.to_i64().unwrap_or(match value.value().sign() {
        Sign::Minus => i64::MIN,
        _ => i64::MAX,
    })
}

pub(crate) fn fmt_varbinds(f: &mut fmt::Formatter<'_>, varbinds: &[VarBind]) -> fmt::Result {
    f.write_str("[")?;
    for (i, vb) in varbinds.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", vb)?;
    }
    f.write_str("]")
}

/// PDU shared by GetRequest, GetNextRequest, Response and SetRequest.
///
/// Wire layout: `[request-id, error-status, error-index, bindings]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pdu {
    pdu_type: PduType,
    /// Request ID for correlating requests and responses
    pub request_id: Integer,
    /// Error status (0 for requests, error code for responses)
    pub error_status: Integer,
    /// Error index (1-based index of problematic varbind)
    pub error_index: Integer,
    /// Variable bindings
    pub varbinds: Vec<VarBind>,
}

impl Pdu {
    /// Build a PDU of one of the four request/response types.
    ///
    /// Any other type fails with `MalformedPdu(NotAPdu)`.
    pub fn new(
        pdu_type: PduType,
        request_id: impl Into<Integer>,
        error_status: impl Into<Integer>,
        error_index: impl Into<Integer>,
        varbinds: Vec<VarBind>,
    ) -> Result<Self> {
        if !matches!(
            pdu_type,
            PduType::GetRequest | PduType::GetNextRequest | PduType::Response | PduType::SetRequest
        ) {
            return Err(validate::fail(
                pdu_type.tag(),
                PduErrorKind::NotAPdu(pdu_type.tag()),
            ));
        }
        Ok(Self {
            pdu_type,
            request_id: request_id.into(),
            error_status: error_status.into(),
            error_index: error_index.into(),
            varbinds,
        })
    }

    fn request(pdu_type: PduType, request_id: i32, varbinds: Vec<VarBind>) -> Self {
        Self {
            pdu_type,
            request_id: Integer::new(request_id),
            error_status: Integer::new(0),
            error_index: Integer::new(0),
            varbinds,
        }
    }

    /// Create a new GET request PDU.
    pub fn get_request(request_id: i32, oids: &[Oid]) -> Self {
        Self::request(PduType::GetRequest, request_id, null_varbinds(oids))
    }

    /// Create a new GETNEXT request PDU.
    pub fn get_next_request(request_id: i32, oids: &[Oid]) -> Self {
        Self::request(PduType::GetNextRequest, request_id, null_varbinds(oids))
    }

    /// Create a new SET request PDU.
    pub fn set_request(request_id: i32, varbinds: Vec<VarBind>) -> Self {
        Self::request(PduType::SetRequest, request_id, varbinds)
    }

    /// Create a Response PDU.
    pub fn response(
        request_id: i32,
        error_status: ErrorStatus,
        error_index: i32,
        varbinds: Vec<VarBind>,
    ) -> Self {
        Self {
            pdu_type: PduType::Response,
            request_id: Integer::new(request_id),
            error_status: Integer::new(error_status.as_i64()),
            error_index: Integer::new(error_index),
            varbinds,
        }
    }

    pub fn pdu_type(&self) -> PduType {
        self.pdu_type
    }

    /// Request ID clamped to `i64`.
    pub fn request_id_i64(&self) -> i64 {
        saturating_i64(&self.request_id)
    }

    /// Error status as the RFC 3416 enum.
    pub fn error_status(&self) -> ErrorStatus {
        ErrorStatus::from_i64(saturating_i64(&self.error_status))
    }

    /// Check if this is an error response.
    pub fn is_error(&self) -> bool {
        !self.error_status.value().is_zero()
    }

    pub fn encode_into(&self, buf: &mut EncodeBuf) {
        buf.push_constructed(self.pdu_type.tag(), |buf| {
            encode_varbind_list(buf, &self.varbinds);
            self.error_index.encode_into(buf);
            self.error_status.encode_into(buf);
            self.request_id.encode_into(buf);
        });
    }

    /// Decode a request/response PDU from wire bytes.
    pub fn decode(data: &[u8]) -> Result<Self> {
        match SnmpObject::decode(data)? {
            SnmpObject::Pdu(pdu) => Ok(pdu),
            other => Err(validate::fail(other.tag(), PduErrorKind::NotAPdu(other.tag()))),
        }
    }

    pub(crate) fn from_body(pdu_type: PduType, body: Sequence) -> Result<Self> {
        let tag = pdu_type.tag();
        let [id, status, index, list] = validate::fields::<4>(tag, body)?;
        Ok(Self {
            pdu_type,
            request_id: validate::integer_at(tag, 0, id)?,
            error_status: validate::integer_at(tag, 1, status)?,
            error_index: validate::integer_at(tag, 2, index)?,
            varbinds: validate::bindings(tag, validate::sequence_at(tag, 3, list)?)?,
        })
    }
}

impl fmt::Display for Pdu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}(request-id={}, error-status={}, error-index={}, ",
            self.pdu_type,
            self.request_id,
            self.error_status(),
            self.error_index
        )?;
        fmt_varbinds(f, &self.varbinds)?;
        f.write_str(")")
    }
}

/// GETBULK request PDU.
///
/// Wire layout: `[request-id, non-repeaters, max-repetitions, bindings]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkPdu {
    /// Request ID
    pub request_id: Integer,
    /// Number of non-repeating OIDs at the start of the list
    pub non_repeaters: Integer,
    /// Maximum repetitions for the remaining OIDs
    pub max_repetitions: Integer,
    /// Variable bindings
    pub varbinds: Vec<VarBind>,
}

impl BulkPdu {
    /// Create a GETBULK request for `oids` with NULL values.
    pub fn new(request_id: i32, non_repeaters: i32, max_repetitions: i32, oids: &[Oid]) -> Self {
        Self::with_varbinds(request_id, non_repeaters, max_repetitions, null_varbinds(oids))
    }

    pub fn with_varbinds(
        request_id: i32,
        non_repeaters: i32,
        max_repetitions: i32,
        varbinds: Vec<VarBind>,
    ) -> Self {
        Self {
            request_id: Integer::new(request_id),
            non_repeaters: Integer::new(non_repeaters),
            max_repetitions: Integer::new(max_repetitions),
            varbinds,
        }
    }

    pub fn request_id_i64(&self) -> i64 {
        saturating_i64(&self.request_id)
    }

    /// Non-repeaters, if it fits in `u32` (negative values count as none).
    pub fn non_repeaters_u32(&self) -> u32 {
        self.non_repeaters.value().to_u32().unwrap_or(0)
    }

    pub fn encode_into(&self, buf: &mut EncodeBuf) {
        buf.push_constructed(BerType::GetBulkRequest, |buf| {
            encode_varbind_list(buf, &self.varbinds);
            self.max_repetitions.encode_into(buf);
            self.non_repeaters.encode_into(buf);
            self.request_id.encode_into(buf);
        });
    }

    /// Decode a GETBULK PDU from wire bytes.
    pub fn decode(data: &[u8]) -> Result<Self> {
        match SnmpObject::decode(data)? {
            SnmpObject::BulkPdu(pdu) => Ok(pdu),
            other => Err(validate::fail(other.tag(), PduErrorKind::NotAPdu(other.tag()))),
        }
    }

    pub(crate) fn from_body(body: Sequence) -> Result<Self> {
        let tag = BerType::GetBulkRequest;
        let [id, non_repeaters, max_repetitions, list] = validate::fields::<4>(tag, body)?;
        Ok(Self {
            request_id: validate::integer_at(tag, 0, id)?,
            non_repeaters: validate::integer_at(tag, 1, non_repeaters)?,
            max_repetitions: validate::integer_at(tag, 2, max_repetitions)?,
            varbinds: validate::bindings(tag, validate::sequence_at(tag, 3, list)?)?,
        })
    }
}

impl fmt::Display for BulkPdu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "GetBulkRequest(request-id={}, non-repeaters={}, max-repetitions={}, ",
            self.request_id, self.non_repeaters, self.max_repetitions
        )?;
        fmt_varbinds(f, &self.varbinds)?;
        f.write_str(")")
    }
}
