//! Variable binding (VarBind) type.
//!
//! A VarBind pairs an OID with a value. On the wire it is a two-element
//! SEQUENCE whose first element is the OID.

use crate::ber::{BerType, EncodeBuf};
use crate::error::{Error, Result};
use crate::oid::Oid;
use crate::pdu::validate;
use crate::value::{Sequence, SnmpObject};

/// Variable binding - an OID-value pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarBind {
    /// The object identifier.
    pub oid: Oid,
    /// The value.
    pub value: SnmpObject,
}

impl VarBind {
    /// Create a new VarBind.
    pub fn new(oid: Oid, value: impl Into<SnmpObject>) -> Self {
        Self {
            oid,
            value: value.into(),
        }
    }

    /// Create a VarBind with a NULL value (for GET requests).
    pub fn null(oid: Oid) -> Self {
        Self {
            oid,
            value: SnmpObject::Null,
        }
    }

    /// Check the name and any OIDs inside the value.
    pub fn validate(&self) -> Result<()> {
        self.oid.validate()?;
        self.value.validate()
    }

    /// Encode to BER.
    pub fn encode_into(&self, buf: &mut EncodeBuf) {
        buf.push_sequence(|buf| {
            self.value.encode_into(buf);
            buf.push_oid(&self.oid);
        });
    }

    /// The generic two-element SEQUENCE form.
    pub fn to_sequence(&self) -> Sequence {
        vec![
            SnmpObject::ObjectIdentifier(self.oid.clone()),
            self.value.clone(),
        ]
        .into()
    }
}

impl std::fmt::Display for VarBind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} = {}", self.oid, self.value)
    }
}

impl From<VarBind> for Sequence {
    fn from(vb: VarBind) -> Self {
        vec![SnmpObject::ObjectIdentifier(vb.oid), vb.value].into()
    }
}

impl TryFrom<SnmpObject> for VarBind {
    type Error = Error;

    /// Check the binding shape. Errors name a plain SEQUENCE as the container.
    fn try_from(obj: SnmpObject) -> Result<Self> {
        validate::binding(BerType::Sequence, 0, obj)
    }
}

/// Encodes a list of VarBinds to BER format.
///
/// Writes the VarBinds as a SEQUENCE of SEQUENCE elements, where each inner
/// SEQUENCE contains an OID and its associated value.
pub fn encode_varbind_list(buf: &mut EncodeBuf, varbinds: &[VarBind]) {
    buf.push_sequence(|buf| {
        // Encode in reverse order since we're using reverse buffer
        for vb in varbinds.iter().rev() {
            vb.encode_into(buf);
        }
    });
}

/// Decodes a BER-encoded VarBind list.
///
/// Expects a SEQUENCE of two-element SEQUENCEs, each led by an OID.
pub fn decode_varbind_list(data: &[u8]) -> Result<Vec<VarBind>> {
    let obj = SnmpObject::decode(data)?;
    let list = validate::sequence_at(BerType::Sequence, 0, obj)?;
    validate::bindings(BerType::Sequence, list)
}

/// Builds NULL-valued VarBinds for GET, GETNEXT and GETBULK requests.
pub fn null_varbinds(oids: &[Oid]) -> Vec<VarBind> {
    oids.iter().cloned().map(VarBind::null).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PduErrorKind;
    use crate::oid;
    use crate::value::{Counter32, Integer, OctetString};

    #[test]
    fn test_varbind_list_roundtrip() {
        let varbinds = vec![
            VarBind::new(oid!(1, 3, 6, 1, 2, 1, 1, 1, 0), OctetString::from("router")),
            VarBind::new(oid!(1, 3, 6, 1, 2, 1, 2, 2, 1, 10, 1), Counter32::new(1_000)),
            VarBind::null(oid!(1, 3, 6, 1, 2, 1, 1, 3, 0)),
        ];

        let mut buf = EncodeBuf::new();
        encode_varbind_list(&mut buf, &varbinds);
        let bytes = buf.finish();

        assert_eq!(decode_varbind_list(&bytes).unwrap(), varbinds);
    }

    #[test]
    fn test_varbind_list_empty() {
        let mut buf = EncodeBuf::new();
        encode_varbind_list(&mut buf, &[]);
        let bytes = buf.finish();
        assert_eq!(&bytes[..], &[0x30, 0x00]);
        assert!(decode_varbind_list(&bytes).unwrap().is_empty());
    }

    #[test]
    fn test_varbind_wire_form() {
        let mut buf = EncodeBuf::new();
        VarBind::null(oid!(1, 3, 6, 1)).encode_into(&mut buf);
        assert_eq!(
            &buf.finish()[..],
            &[0x30, 0x07, 0x06, 0x03, 0x2B, 0x06, 0x01, 0x05, 0x00]
        );
    }

    #[test]
    fn test_sequence_conversion() {
        let vb = VarBind::new(oid!(1, 3, 6, 1), Integer::new(5));
        let seq = vb.to_sequence();
        assert_eq!(Sequence::from(vb.clone()), seq);
        assert_eq!(VarBind::try_from(SnmpObject::Sequence(seq)).unwrap(), vb);
    }

    #[test]
    fn test_binding_name_must_be_oid() {
        let seq: Sequence = vec![Integer::new(1).into(), SnmpObject::Null].into();
        assert!(matches!(
            VarBind::try_from(SnmpObject::Sequence(seq)),
            Err(Error::MalformedPdu {
                kind: PduErrorKind::BindingNameNotOid { index: 0, .. },
                ..
            })
        ));
    }

    #[test]
    fn test_varbind_display() {
        let vb = VarBind::new(oid!(1, 3, 6, 1, 2, 1, 1, 5, 0), OctetString::from("core-1"));
        assert_eq!(vb.to_string(), "1.3.6.1.2.1.1.5.0 = core-1");
        assert_eq!(null_varbinds(&[oid!(1, 3)])[0].to_string(), "1.3 = NULL");
    }
}
