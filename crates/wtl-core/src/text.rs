/// All offsets exchanged by this toolchain are 0-based UTF-16 code-unit
/// positions into the exact input string, matching what editor hosts use.
/// Lexing and compiling therefore run over the encoded unit buffer instead
/// of byte slices.
pub fn encode_units(source: &str) -> Vec<u16> {
    source.encode_utf16().collect()
}

pub fn units_to_string(units: &[u16]) -> String {
    String::from_utf16_lossy(units)
}

/// Converts a byte offset into `source` to the UTF-16 unit offset of the
/// same position. Used by the regex-driven scans, which report byte spans.
pub fn utf16_offset_at(source: &str, byte_offset: usize) -> usize {
    source[..byte_offset].encode_utf16().count()
}

pub fn unit_char(unit: u16) -> Option<char> {
    char::from_u32(u32::from(unit))
}

pub fn is_whitespace_unit(unit: u16) -> bool {
    unit_char(unit).is_some_and(|value| value.is_whitespace())
}

pub fn is_digit_unit(unit: u16) -> bool {
    unit_char(unit).is_some_and(|value| value.is_ascii_digit())
}

pub fn is_hex_digit_unit(unit: u16) -> bool {
    unit_char(unit).is_some_and(|value| value.is_ascii_hexdigit())
}

pub fn is_identifier_start_unit(unit: u16) -> bool {
    unit_char(unit).is_some_and(|value| value.is_ascii_alphabetic() || value == '_')
}

pub fn is_word_unit(unit: u16) -> bool {
    unit_char(unit).is_some_and(|value| value.is_ascii_alphanumeric() || value == '_')
}
