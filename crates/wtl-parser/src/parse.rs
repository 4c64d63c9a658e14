use wtl_core::text::{encode_units, units_to_string};
use wtl_core::token::{StructuralKind, Token, ValueKind};

use crate::lexer::lex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceSpan {
    pub start: usize,
    pub end: usize,
}

/// One argument slot of a recovered call. An empty slot (for example the
/// trailing group in `f(a;)`) carries `span: None` and no tokens; callers
/// treat that as "absent", never as an error by itself.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedArgument {
    pub text: String,
    pub span: Option<SourceSpan>,
    pub tokens: Vec<Token>,
}

impl ParsedArgument {
    pub fn has_value(&self) -> bool {
        self.span.is_some() && !self.text.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    pub name: String,
    pub arguments: Vec<ParsedArgument>,
    pub start_offset: usize,
    pub end_offset: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub offset: usize,
    pub length: usize,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParseResult {
    pub calls: Vec<FunctionCall>,
    pub errors: Vec<ParseError>,
}

/// Recovers every function-call expression and flags unbalanced delimiters.
/// Total over any input; one malformed call never stops analysis of the
/// rest of the document. Nested calls appear in `calls` in their own right
/// because the token walk keeps visiting inner identifiers.
pub fn parse(source: &str) -> ParseResult {
    let units = encode_units(source);
    let tokens = lex(source);

    let mut calls = Vec::new();
    let mut errors = Vec::new();
    let mut open_brace_offsets: Vec<usize> = Vec::new();

    let mut index = 0;
    while index < tokens.len() {
        let token = &tokens[index];

        match token.structural_kind() {
            Some(StructuralKind::LeftBrace) => open_brace_offsets.push(token.offset()),
            Some(StructuralKind::RightBrace) => {
                if open_brace_offsets.pop().is_none() {
                    errors.push(ParseError {
                        offset: token.offset(),
                        length: token.length(),
                        message: "Unmatched }".to_string(),
                    });
                }
            }
            _ => {}
        }

        if token.value_kind() == Some(ValueKind::Identifier)
            && tokens
                .get(index + 1)
                .is_some_and(|next| next.is_structural(StructuralKind::LeftParenthesis))
        {
            let name = token.value_text().unwrap_or_default().to_string();
            match find_matching_close(&tokens, index + 2) {
                Some(close_index) => {
                    calls.push(build_call(
                        name,
                        token.offset(),
                        &tokens[index + 2..close_index],
                        &tokens[close_index],
                        &units,
                    ));
                }
                None => {
                    errors.push(ParseError {
                        offset: token.offset(),
                        length: token.length(),
                        message: format!("Missing ')' for {}", name),
                    });
                    // The unclosed scan reached end-of-stream; abandoning
                    // here avoids duplicate reports from the same region.
                    break;
                }
            }
        }

        index += 1;
    }

    for offset in open_brace_offsets {
        errors.push(ParseError {
            offset,
            length: 1,
            message: "Unmatched {".to_string(),
        });
    }

    ParseResult { calls, errors }
}

fn find_matching_close(tokens: &[Token], start: usize) -> Option<usize> {
    let mut depth = 1usize;
    for (position, token) in tokens.iter().enumerate().skip(start) {
        match token.structural_kind() {
            Some(StructuralKind::LeftParenthesis) => depth += 1,
            Some(StructuralKind::RightParenthesis) => {
                depth -= 1;
                if depth == 0 {
                    return Some(position);
                }
            }
            _ => {}
        }
    }
    None
}

fn build_call(
    name: String,
    start_offset: usize,
    inner_tokens: &[Token],
    close_token: &Token,
    units: &[u16],
) -> FunctionCall {
    FunctionCall {
        name,
        arguments: split_argument_groups(inner_tokens, units),
        start_offset,
        end_offset: close_token.end(),
    }
}

fn split_argument_groups(inner_tokens: &[Token], units: &[u16]) -> Vec<ParsedArgument> {
    if inner_tokens.is_empty() {
        return Vec::new();
    }

    let mut groups: Vec<Vec<Token>> = vec![Vec::new()];
    let mut depth = 0usize;

    for token in inner_tokens {
        match token.structural_kind() {
            Some(StructuralKind::LeftParenthesis) => depth += 1,
            Some(StructuralKind::RightParenthesis) => depth = depth.saturating_sub(1),
            // Semicolons inside a nested call do not split the outer list.
            Some(StructuralKind::Semicolon) if depth == 0 => {
                groups.push(Vec::new());
                continue;
            }
            _ => {}
        }
        groups
            .last_mut()
            .expect("argument group list starts non-empty")
            .push(token.clone());
    }

    groups
        .into_iter()
        .map(|tokens| build_argument(tokens, units))
        .collect()
}

fn build_argument(tokens: Vec<Token>, units: &[u16]) -> ParsedArgument {
    let Some(first) = tokens.first() else {
        return ParsedArgument {
            text: String::new(),
            span: None,
            tokens,
        };
    };

    let start = first.offset();
    let end = tokens
        .last()
        .expect("non-empty token group has a last token")
        .end();

    ParsedArgument {
        text: units_to_string(&units[start..end]).trim().to_string(),
        span: Some(SourceSpan { start, end }),
        tokens,
    }
}
