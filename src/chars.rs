//! Code-point classification predicates used by the lexer.
//!
//! These operate on individual `char`s; no normalization or multi-character
//! analysis happens here.

/// Folds an ASCII letter to lowercase. Other code points pass through the
/// same bit-twiddle and must be re-checked by the caller.
pub fn ascii_to_lower(ch: char) -> char {
    char::from_u32(ch as u32 | 0x20).unwrap_or(ch)
}

pub fn is_line_terminator(ch: char) -> bool {
    ch == '\n'
}

pub fn is_decimal_digit(ch: char) -> bool {
    ch.is_ascii_digit()
}

pub fn is_hex_digit(ch: char) -> bool {
    ch.is_ascii_hexdigit()
}

pub fn is_octal_digit(ch: char) -> bool {
    matches!(ch, '0'..='7')
}

pub fn is_binary_digit(ch: char) -> bool {
    ch == '0' || ch == '1'
}

pub fn is_alphanumeric(ch: char) -> bool {
    matches!(ascii_to_lower(ch), 'a'..='z') || is_decimal_digit(ch)
}

pub fn is_identifier_start(ch: char) -> bool {
    matches!(ascii_to_lower(ch), 'a'..='z') || ch == '_'
}

pub fn is_identifier_body(ch: char) -> bool {
    is_alphanumeric(ch) || ch == '_'
}

/// Numeric value of a hex digit. Only meaningful when [`is_hex_digit`]
/// holds for `ch`.
pub fn hex_digit_value(ch: char) -> u32 {
    if is_decimal_digit(ch) {
        ch as u32 - '0' as u32
    } else {
        10 + ascii_to_lower(ch) as u32 - 'a' as u32
    }
}
