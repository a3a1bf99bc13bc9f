//! Structural checks shared by every PDU shape.
//!
//! A PDU is first decoded as a generic [`Sequence`]; these helpers then take
//! its elements apart by position. Each check consumes the element it
//! inspects so that the typed PDU is assembled without cloning.

use crate::ber::BerType;
use crate::error::{Error, PduErrorKind, Result};
use crate::oid::Oid;
use crate::value::{Integer, IpAddress, Sequence, SnmpObject, TimeTicks};
use crate::varbind::VarBind;

/// Build the error for a failed check, logging it first.
pub(crate) fn fail(pdu: BerType, kind: PduErrorKind) -> Error {
    tracing::debug!(target: "snmp_ber::pdu", { pdu = %pdu, kind = %kind }, "malformed PDU");
    Error::malformed_pdu(pdu, kind)
}

/// Split a PDU body into exactly `N` positional elements.
pub(crate) fn fields<const N: usize>(pdu: BerType, body: Sequence) -> Result<[SnmpObject; N]> {
    let actual = body.len();
    body.into_items().try_into().map_err(|_| {
        fail(
            pdu,
            PduErrorKind::WrongArity {
                expected: N,
                actual,
            },
        )
    })
}

/// Any integer-family value, normalized to INTEGER.
pub(crate) fn integer_at(pdu: BerType, position: usize, obj: SnmpObject) -> Result<Integer> {
    match obj {
        SnmpObject::Integer(v) => Ok(v),
        other => other.as_big_int().map(Integer::new).ok_or_else(|| {
            fail(
                pdu,
                PduErrorKind::ExpectedInteger {
                    position,
                    actual: other.tag(),
                },
            )
        }),
    }
}

pub(crate) fn sequence_at(pdu: BerType, position: usize, obj: SnmpObject) -> Result<Sequence> {
    match obj {
        SnmpObject::Sequence(seq) => Ok(seq),
        other => Err(fail(
            pdu,
            PduErrorKind::ExpectedSequence {
                position,
                actual: other.tag(),
            },
        )),
    }
}

pub(crate) fn oid_at(pdu: BerType, position: usize, obj: SnmpObject) -> Result<Oid> {
    match obj {
        SnmpObject::ObjectIdentifier(oid) => Ok(oid),
        other => Err(fail(
            pdu,
            PduErrorKind::ExpectedOid {
                position,
                actual: other.tag(),
            },
        )),
    }
}

pub(crate) fn ip_address_at(pdu: BerType, position: usize, obj: SnmpObject) -> Result<IpAddress> {
    match obj {
        SnmpObject::IpAddress(addr) => Ok(addr),
        other => Err(fail(
            pdu,
            PduErrorKind::ExpectedIpAddress {
                position,
                actual: other.tag(),
            },
        )),
    }
}

pub(crate) fn time_ticks_at(pdu: BerType, position: usize, obj: SnmpObject) -> Result<TimeTicks> {
    match obj {
        SnmpObject::TimeTicks(ticks) => Ok(ticks),
        other => Err(fail(
            pdu,
            PduErrorKind::ExpectedTimeTicks {
                position,
                actual: other.tag(),
            },
        )),
    }
}

/// One variable binding: a two-element SEQUENCE led by an OID.
pub(crate) fn binding(pdu: BerType, index: usize, obj: SnmpObject) -> Result<VarBind> {
    let seq = match obj {
        SnmpObject::Sequence(seq) => seq,
        other => {
            return Err(fail(
                pdu,
                PduErrorKind::BindingNotSequence {
                    index,
                    actual: other.tag(),
                },
            ));
        }
    };

    let actual = seq.len();
    let [name, value]: [SnmpObject; 2] = seq
        .into_items()
        .try_into()
        .map_err(|_| fail(pdu, PduErrorKind::BindingArity { index, actual }))?;

    match name {
        SnmpObject::ObjectIdentifier(oid) => Ok(VarBind { oid, value }),
        other => Err(fail(
            pdu,
            PduErrorKind::BindingNameNotOid {
                index,
                actual: other.tag(),
            },
        )),
    }
}

/// Every element of a bindings SEQUENCE.
pub(crate) fn bindings(pdu: BerType, list: Sequence) -> Result<Vec<VarBind>> {
    list.into_items()
        .into_iter()
        .enumerate()
        .map(|(index, obj)| binding(pdu, index, obj))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oid;
    use crate::value::{Counter32, OctetString};

    const PDU: BerType = BerType::GetRequest;

    #[test]
    fn test_fields_arity() {
        let body: Sequence = vec![SnmpObject::Null, SnmpObject::Null].into();
        assert!(matches!(
            fields::<3>(PDU, body.clone()),
            Err(Error::MalformedPdu {
                pdu: BerType::GetRequest,
                kind: PduErrorKind::WrongArity {
                    expected: 3,
                    actual: 2
                }
            })
        ));
        assert!(fields::<2>(PDU, body).is_ok());
    }

    #[test]
    fn test_integer_family_accepted() {
        let v = integer_at(PDU, 0, Counter32::new(9).into()).unwrap();
        assert_eq!(v, Integer::new(9));
        assert!(matches!(
            integer_at(PDU, 1, OctetString::from("9").into()),
            Err(Error::MalformedPdu {
                kind: PduErrorKind::ExpectedInteger {
                    position: 1,
                    actual: BerType::OctetString
                },
                ..
            })
        ));
    }

    #[test]
    fn test_binding_shapes() {
        assert!(matches!(
            binding(PDU, 2, SnmpObject::Null),
            Err(Error::MalformedPdu {
                kind: PduErrorKind::BindingNotSequence { index: 2, .. },
                ..
            })
        ));

        let three: Sequence = vec![oid!(1, 3).into(), SnmpObject::Null, SnmpObject::Null].into();
        assert!(matches!(
            binding(PDU, 0, three.into()),
            Err(Error::MalformedPdu {
                kind: PduErrorKind::BindingArity {
                    index: 0,
                    actual: 3
                },
                ..
            })
        ));

        let ok: Sequence = vec![oid!(1, 3).into(), SnmpObject::Null].into();
        assert_eq!(binding(PDU, 0, ok.into()).unwrap(), VarBind::null(oid!(1, 3)));
    }
}
