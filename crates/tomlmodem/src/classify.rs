//! Character-class predicates for the TOML grammar.

/// Bytes below 0x20. Forbidden unescaped inside quoted strings; tab is the
/// sole exception in literal strings.
#[inline]
pub(crate) fn is_control(byte: u8) -> bool {
    byte < 0x20
}

/// Characters a bare value token may contain: `[A-Za-z0-9+\-_.]`.
#[inline]
pub(crate) fn is_word_char(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || matches!(byte, b'+' | b'-' | b'_' | b'.')
}

/// Characters a bare (unquoted) key may contain: `[A-Za-z0-9\-_]`.
/// Stricter than [`is_word_char`]: no `.` (dotted paths are split by the
/// grammar, not the key scan) and no `+`.
#[inline]
pub(crate) fn is_key_char(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_')
}
