use wtl_core::text::{
    encode_units, is_digit_unit, is_hex_digit_unit, is_identifier_start_unit, is_whitespace_unit,
    is_word_unit, units_to_string,
};
use wtl_core::token::{StructuralKind, Token, ValueKind};

const fn unit(byte: u8) -> u16 {
    byte as u16
}

/// Lexes the whole document into a flat token stream. Total over any input:
/// unrecognized characters are skipped one position at a time, unterminated
/// strings and placeholders close at end-of-text, so a malformed document
/// can never desynchronize a downstream pass.
pub fn lex(source: &str) -> Vec<Token> {
    let units = encode_units(source);
    let mut tokens = Vec::new();
    let mut index = 0;

    while index < units.len() {
        let current = units[index];

        if current == unit(b'/') && units.get(index + 1) == Some(&unit(b'/')) {
            while index < units.len() && units[index] != unit(b'\n') {
                index += 1;
            }
            continue;
        }

        if is_whitespace_unit(current) {
            index += 1;
            continue;
        }

        if let Some(kind) = structural_kind_of(current) {
            tokens.push(Token::Structural {
                kind,
                offset: index,
                length: 1,
            });
            index += 1;
            continue;
        }

        if current == unit(b'"') {
            index = lex_string_literal(&units, index, &mut tokens);
            continue;
        }

        if current == unit(b'#') {
            index = lex_hex_literal(&units, index, &mut tokens);
            continue;
        }

        if (current == unit(b'$') || current == unit(b'@'))
            && units.get(index + 1) == Some(&unit(b'{'))
        {
            index = lex_placeholder(&units, index, &mut tokens);
            continue;
        }

        if is_digit_unit(current) || current == unit(b'-') {
            index = lex_number(&units, index, &mut tokens);
            continue;
        }

        if is_identifier_start_unit(current) {
            index = lex_identifier(&units, index, &mut tokens);
            continue;
        }

        index += 1;
    }

    tokens
}

fn structural_kind_of(current: u16) -> Option<StructuralKind> {
    match current {
        value if value == unit(b'{') => Some(StructuralKind::LeftBrace),
        value if value == unit(b'}') => Some(StructuralKind::RightBrace),
        value if value == unit(b'(') => Some(StructuralKind::LeftParenthesis),
        value if value == unit(b')') => Some(StructuralKind::RightParenthesis),
        value if value == unit(b';') => Some(StructuralKind::Semicolon),
        _ => None,
    }
}

fn lex_string_literal(units: &[u16], start: usize, tokens: &mut Vec<Token>) -> usize {
    let mut index = start + 1;
    let mut value_units = Vec::new();

    while index < units.len() && units[index] != unit(b'"') {
        if units[index] == unit(b'\\') && index + 1 < units.len() {
            // Escaped characters are taken literally, no interpretation.
            value_units.push(units[index + 1]);
            index += 2;
        } else {
            value_units.push(units[index]);
            index += 1;
        }
    }

    if index < units.len() {
        index += 1;
    }

    tokens.push(Token::Value {
        kind: ValueKind::StringLiteral,
        value: units_to_string(&value_units),
        offset: start,
        length: index - start,
    });
    index
}

fn lex_hex_literal(units: &[u16], start: usize, tokens: &mut Vec<Token>) -> usize {
    let mut index = start + 1;
    while index < units.len() && is_hex_digit_unit(units[index]) {
        index += 1;
    }

    tokens.push(Token::Value {
        kind: ValueKind::HexLiteral,
        value: units_to_string(&units[start..index]),
        offset: start,
        length: index - start,
    });
    index
}

fn lex_placeholder(units: &[u16], start: usize, tokens: &mut Vec<Token>) -> usize {
    let name_start = start + 2;
    let mut index = name_start;
    while index < units.len() && units[index] != unit(b'}') {
        index += 1;
    }

    let name = units_to_string(&units[name_start..index]);
    if index < units.len() {
        index += 1;
    }

    tokens.push(Token::Value {
        kind: ValueKind::Placeholder,
        value: name,
        offset: start,
        length: index - start,
    });
    index
}

fn lex_number(units: &[u16], start: usize, tokens: &mut Vec<Token>) -> usize {
    let mut index = start + 1;
    while index < units.len()
        && (is_digit_unit(units[index])
            || units[index] == unit(b'.')
            || units[index] == unit(b'-'))
    {
        index += 1;
    }

    tokens.push(Token::Value {
        kind: ValueKind::Number,
        value: units_to_string(&units[start..index]),
        offset: start,
        length: index - start,
    });
    index
}

fn lex_identifier(units: &[u16], start: usize, tokens: &mut Vec<Token>) -> usize {
    let mut index = start + 1;
    while index < units.len() && is_word_unit(units[index]) {
        index += 1;
    }

    let value = units_to_string(&units[start..index]);
    let kind = if value == "true" || value == "false" {
        ValueKind::Boolean
    } else {
        ValueKind::Identifier
    };

    tokens.push(Token::Value {
        kind,
        value,
        offset: start,
        length: index - start,
    });
    index
}
