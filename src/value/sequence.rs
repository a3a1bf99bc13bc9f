//! SEQUENCE: ordered, heterogeneous list of values.

use std::fmt;

use crate::ber::{BerType, Decoder, EncodeBuf, Tlv};
use crate::error::Result;

use super::SnmpObject;

/// An ordered list of values.
///
/// Position is significant: PDUs and variable bindings give each element its
/// meaning by index.
///
/// ```
/// use snmp_ber::value::{Integer, OctetString, Sequence, SnmpObject};
///
/// let mut seq = Sequence::new();
/// seq.push(Integer::new(1));
/// seq.push(OctetString::from("x"));
/// let bytes = SnmpObject::from(seq).encode().unwrap();
/// assert_eq!(&bytes[..], &[0x30, 0x06, 0x02, 0x01, 0x01, 0x04, 0x01, b'x']);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Sequence {
    items: Vec<SnmpObject>,
}

impl Sequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    /// Append a value.
    pub fn push(&mut self, item: impl Into<SnmpObject>) {
        self.items.push(item.into());
    }

    pub fn items(&self) -> &[SnmpObject] {
        &self.items
    }

    pub fn get(&self, index: usize) -> Option<&SnmpObject> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SnmpObject> {
        self.items.iter()
    }

    pub fn into_items(self) -> Vec<SnmpObject> {
        self.items
    }

    /// Encode as a SEQUENCE.
    pub fn encode_into(&self, buf: &mut EncodeBuf) {
        self.encode_tagged(buf, BerType::Sequence);
    }

    /// Encode the elements under a constructed tag other than SEQUENCE.
    pub(crate) fn encode_tagged(&self, buf: &mut EncodeBuf, tag: BerType) {
        buf.push_constructed(tag, |buf| {
            // Reverse buffer: push in reverse order for forward output
            for item in self.items.iter().rev() {
                item.encode_into(buf);
            }
        });
    }

    /// Decode the elements inside a constructed TLV read by `parent`.
    ///
    /// Every element must decode; the first failure aborts the whole sequence.
    pub(crate) fn decode_content(parent: &Decoder, tlv: &Tlv) -> Result<Self> {
        let mut decoder = parent.enter(tlv)?;
        let mut items = Vec::new();
        while !decoder.is_empty() {
            items.push(SnmpObject::decode_from(&mut decoder)?);
        }
        Ok(Self { items })
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", item)?;
        }
        f.write_str("]")
    }
}

impl From<Vec<SnmpObject>> for Sequence {
    fn from(items: Vec<SnmpObject>) -> Self {
        Self { items }
    }
}

impl FromIterator<SnmpObject> for Sequence {
    fn from_iter<I: IntoIterator<Item = SnmpObject>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Sequence {
    type Item = SnmpObject;
    type IntoIter = std::vec::IntoIter<SnmpObject>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a Sequence {
    type Item = &'a SnmpObject;
    type IntoIter = std::slice::Iter<'a, SnmpObject>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
