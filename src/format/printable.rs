//! Printable-text heuristic for OCTET STRING display.
//!
//! Each byte is read as a Latin-1 code point and checked on its own. Only
//! single-byte character sets display correctly; UTF-8 multi-byte sequences
//! fall back to hex because their lead and continuation bytes land in the
//! C1 control range or form unrelated Latin-1 letters.

/// Whether a byte, read as Latin-1, is a displayable character.
///
/// A byte is not printable if it is an ISO control character (0x00..=0x1F or
/// 0x7F..=0x9F) or an identifier-ignorable one (the soft hyphen 0xAD in this
/// range).
///
/// ```
/// use snmp_ber::format::printable::is_printable;
///
/// assert!(is_printable(b'a'));
/// assert!(is_printable(0xE9)); // é
/// assert!(!is_printable(b'\n'));
/// assert!(!is_printable(0x85));
/// assert!(!is_printable(0xAD));
/// ```
pub const fn is_printable(byte: u8) -> bool {
    !matches!(byte, 0x00..=0x1F | 0x7F..=0x9F | 0xAD)
}

/// Render bytes as text if every byte is printable.
///
/// Content is cut at the first NUL unless the NUL is the very first byte, in
/// which case the whole buffer is tested (and fails). Returns `None` when any
/// byte of the tested content is not printable.
///
/// ```
/// use snmp_ber::format::printable::as_text;
///
/// assert_eq!(as_text(b"hello\0junk").as_deref(), Some("hello"));
/// assert_eq!(as_text(b"\0hello"), None);
/// assert_eq!(as_text(b"").as_deref(), Some(""));
/// ```
pub fn as_text(bytes: &[u8]) -> Option<String> {
    let content = match bytes.iter().position(|&b| b == 0) {
        Some(nul) if nul > 0 => &bytes[..nul],
        _ => bytes,
    };
    if content.iter().all(|&b| is_printable(b)) {
        Some(content.iter().map(|&b| char::from(b)).collect())
    } else {
        None
    }
}
