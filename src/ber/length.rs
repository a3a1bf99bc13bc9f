//! BER length encoding and decoding.
//!
//! Length encoding follows X.690 Section 8.1.3:
//! - Short form: Single byte, bit 8=0, value 0-127
//! - Long form: Initial byte (bit 8=1, bits 7-1=count), followed by length bytes
//! - Indefinite form (0x80): Rejected

use smallvec::SmallVec;

use crate::error::{DecodeErrorKind, Error, Result};

/// Default maximum length accepted by the decoder (2MB).
///
/// Far larger than any realistic SNMP message; a sanity check against
/// hostile length fields.
pub const MAX_LENGTH: usize = 0x200000;

/// Maximum number of octets a long-form length may use.
const MAX_LENGTH_OCTETS: usize = std::mem::size_of::<u32>();

/// Encode a length in BER form.
///
/// Uses short form for lengths <= 127, otherwise `0x80 | k` followed by the
/// `k` minimal big-endian bytes of the length.
pub fn encode_length(len: usize) -> SmallVec<[u8; 9]> {
    let mut out = SmallVec::new();

    if len <= 127 {
        out.push(len as u8);
        return out;
    }

    let be = len.to_be_bytes();
    let skip = be.iter().take_while(|&&b| b == 0).count();
    let significant = &be[skip..];
    out.push(0x80 | significant.len() as u8);
    out.extend_from_slice(significant);
    out
}

/// Decode a length from bytes, returning (length, bytes_consumed).
///
/// `data` starts just after the tag byte. The `base_offset` parameter is used
/// to report error offsets correctly when this is called from within a decoder.
pub fn decode_length(data: &[u8], base_offset: usize) -> Result<(usize, usize)> {
    let Some(&first) = data.first() else {
        return Err(Error::Truncated {
            offset: base_offset,
            needed: 1,
            available: 0,
        });
    };

    if first == 0x80 {
        return Err(Error::decode(
            base_offset,
            DecodeErrorKind::IndefiniteLength,
        ));
    }

    if first & 0x80 == 0 {
        return Ok((first as usize, 1));
    }

    let num_octets = (first & 0x7F) as usize;

    if num_octets == 0x7F {
        // Reserved by X.690 8.1.3.5 (c)
        return Err(Error::decode(base_offset, DecodeErrorKind::InvalidLength));
    }

    if num_octets > MAX_LENGTH_OCTETS {
        return Err(Error::decode(
            base_offset,
            DecodeErrorKind::LengthTooLong { octets: num_octets },
        ));
    }

    if data.len() < 1 + num_octets {
        return Err(Error::Truncated {
            offset: base_offset + 1,
            needed: num_octets,
            available: data.len() - 1,
        });
    }

    let len = data[1..=num_octets]
        .iter()
        .fold(0usize, |acc, &b| (acc << 8) | b as usize);

    Ok((len, 1 + num_octets))
}
