//! Unicode escape decoding: hex-digit accumulation, code-point validation,
//! and UTF-8 re-encoding.

use bstr::BString;

use crate::{error::SyntaxError, input::ByteCursor};

/// Reads one ASCII hex digit from the cursor.
pub(crate) fn hex_digit<I: Iterator<Item = u8>>(
    input: &mut ByteCursor<I>,
) -> Result<u32, SyntaxError> {
    let byte = input.get()?;
    match byte {
        b'0'..=b'9' => Ok(u32::from(byte - b'0')),
        b'A'..=b'F' => Ok(u32::from(byte - b'A') + 10),
        b'a'..=b'f' => Ok(u32::from(byte - b'a') + 10),
        _ => Err(SyntaxError::new(
            "Expected hex-digit",
            input.last_char_offset(),
        )),
    }
}

/// Reads a `\u`-style (4 digit) or `\U`-style (8 digit) code point.
pub(crate) fn codepoint<I: Iterator<Item = u8>>(
    input: &mut ByteCursor<I>,
    digits: usize,
) -> Result<u32, SyntaxError> {
    let mut value = 0u32;
    for _ in 0..digits {
        value = (value << 4) + hex_digit(input)?;
    }
    Ok(value)
}

/// Validates a decoded code point and appends its UTF-8 encoding (1-4 bytes)
/// to `out`.
///
/// `escape_offset` is the offset of the escape sequence's backslash; both
/// rejections point there, not at the hex digits.
pub(crate) fn append_codepoint(
    value: u32,
    escape_offset: usize,
    out: &mut BString,
) -> Result<(), SyntaxError> {
    if (0xD800..=0xDFFF).contains(&value) {
        return Err(SyntaxError::new(
            "Surrogate pairs are not allowed",
            escape_offset,
        ));
    }

    // After the surrogate check, `from_u32` fails only above 0x10FFFF.
    let Some(ch) = char::from_u32(value) else {
        return Err(SyntaxError::new(
            "Codepoint must be less or equal than 0x10FFFF",
            escape_offset,
        ));
    };

    let mut buf = [0u8; 4];
    out.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
    Ok(())
}

#[cfg(test)]
mod tests {
    use bstr::BString;

    use super::{append_codepoint, codepoint, hex_digit};
    use crate::input::ByteCursor;

    fn encode(value: u32) -> BString {
        let mut out = BString::from("");
        append_codepoint(value, 0, &mut out).unwrap();
        out
    }

    #[test]
    fn hex_digits_all_cases() {
        let mut cursor = ByteCursor::new(b"0fA".iter().copied());
        assert_eq!(hex_digit(&mut cursor).unwrap(), 0);
        assert_eq!(hex_digit(&mut cursor).unwrap(), 15);
        assert_eq!(hex_digit(&mut cursor).unwrap(), 10);
    }

    #[test]
    fn non_hex_reports_its_own_offset() {
        let mut cursor = ByteCursor::new(b"1G".iter().copied());
        assert_eq!(hex_digit(&mut cursor).unwrap(), 1);
        let err = hex_digit(&mut cursor).unwrap_err();
        assert_eq!(err.message, "Expected hex-digit");
        assert_eq!(err.offset, 1);
    }

    #[test]
    fn four_and_eight_digit_codepoints() {
        let mut cursor = ByteCursor::new(b"00e90001F600".iter().copied());
        assert_eq!(codepoint(&mut cursor, 4).unwrap(), 0xE9);
        assert_eq!(codepoint(&mut cursor, 8).unwrap(), 0x1F600);
    }

    #[test]
    fn utf8_encoding_width_boundaries() {
        assert_eq!(encode(0x24), BString::from(&b"\x24"[..]));
        assert_eq!(encode(0x7F), BString::from(&b"\x7f"[..]));
        assert_eq!(encode(0x80), BString::from(&b"\xc2\x80"[..]));
        assert_eq!(encode(0x7FF), BString::from(&b"\xdf\xbf"[..]));
        assert_eq!(encode(0x800), BString::from(&b"\xe0\xa0\x80"[..]));
        assert_eq!(encode(0xFFFF), BString::from(&b"\xef\xbf\xbf"[..]));
        assert_eq!(encode(0x10000), BString::from(&b"\xf0\x90\x80\x80"[..]));
        assert_eq!(encode(0x10FFFF), BString::from(&b"\xf4\x8f\xbf\xbf"[..]));
    }

    #[test]
    fn surrogates_rejected_at_escape_offset() {
        let mut out = BString::from("");
        for value in [0xD800u32, 0xDBFF, 0xDC00, 0xDFFF] {
            let err = append_codepoint(value, 42, &mut out).unwrap_err();
            assert_eq!(err.message, "Surrogate pairs are not allowed");
            assert_eq!(err.offset, 42);
        }
        assert!(out.is_empty());
    }

    #[test]
    fn out_of_range_rejected() {
        let mut out = BString::from("");
        let err = append_codepoint(0x110000, 7, &mut out).unwrap_err();
        assert_eq!(err.message, "Codepoint must be less or equal than 0x10FFFF");
        assert_eq!(err.offset, 7);
    }
}
