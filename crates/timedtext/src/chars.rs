//! Byte classes used by the tokenizers.

/// HTML5 "space characters": U+0020, U+0009, U+000A, U+000C and U+000D.
#[inline]
#[must_use]
pub fn is_html5_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | 0x0C | b'\r')
}

/// ASCII digits `0`-`9`.
#[inline]
#[must_use]
pub fn is_ascii_digit(b: u8) -> bool {
    b.is_ascii_digit()
}
