//! BIFF8 Unicode string encoding.
//!
//! BIFF8 strings carry a character count, a flags byte, then the
//! character data. This writer always emits uncompressed UTF-16LE
//! (flags bit 0 set), matching the UTF-16 CODEPAGE it declares.
//!
//! Character counts are Unicode *code point* counts, not UTF-16 code
//! unit counts. A supplementary-plane character contributes one to the
//! count but four bytes (a surrogate pair) to the data, so the byte
//! length of a string can exceed `2 * char_count`.

use crate::error::{XlsError, XlsResult};

/// Flags byte: uncompressed UTF-16LE character data.
pub const FLAG_UTF16: u8 = 0x01;

/// Encode a string as UTF-16LE bytes, surrogate pairs included.
pub fn encode_utf16le(s: &str) -> Vec<u8> {
    let mut buf = Vec::with_capacity(s.len() * 2);
    for unit in s.encode_utf16() {
        buf.extend_from_slice(&unit.to_le_bytes());
    }
    buf
}

/// Number of Unicode code points in a string.
pub fn char_count(s: &str) -> usize {
    s.chars().count()
}

/// Encode a BIFF8 "short" string (1-byte length prefix, used in
/// BOUNDSHEET): `[u8 char_count][u8 flags][UTF-16LE bytes]`.
///
/// Fails when the string holds more than 255 code points; the only
/// caller feeds it sheet names, which are bounded far below that.
pub fn encode_short_string(s: &str) -> XlsResult<Vec<u8>> {
    let count = char_count(s);
    if count > u8::MAX as usize {
        return Err(XlsError::InvalidSheetName(format!(
            "name of {count} characters does not fit a short string"
        )));
    }

    let data = encode_utf16le(s);
    let mut buf = Vec::with_capacity(2 + data.len());
    buf.push(count as u8);
    buf.push(FLAG_UTF16);
    buf.extend_from_slice(&data);
    Ok(buf)
}
