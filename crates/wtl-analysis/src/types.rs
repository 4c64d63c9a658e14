use std::collections::BTreeMap;

use wtl_core::token::{StructuralKind, ValueKind};
use wtl_core::FunctionCatalog;
use wtl_parser::{FunctionCall, ParsedArgument};

/// Best-effort type inference for one parsed argument. `None` means
/// "unknown": compatibility checks are skipped for unknown types, never
/// failed, so absence of information cannot produce a false positive.
pub fn infer_argument_type(
    argument: &ParsedArgument,
    calls_by_start: &BTreeMap<usize, &FunctionCall>,
    catalog: &FunctionCatalog,
) -> Option<String> {
    let span = argument.span?;

    if argument.tokens.len() == 1 {
        return infer_single_token_type(&argument.tokens[0]);
    }

    if argument.tokens.len() < 2 {
        return None;
    }

    // A multi-token argument is typed only when it is exactly one nested
    // call: identifier followed by '(' whose recorded call covers the whole
    // argument span. Anything else stays unknown.
    if argument.tokens[0].value_kind() != Some(ValueKind::Identifier)
        || !argument.tokens[1].is_structural(StructuralKind::LeftParenthesis)
    {
        return None;
    }

    let call = calls_by_start.get(&span.start)?;
    if call.end_offset != span.end {
        return None;
    }

    catalog
        .find_by_name(&call.name)
        .map(|metadata| metadata.return_type.clone())
}

fn infer_single_token_type(token: &wtl_core::Token) -> Option<String> {
    let kind = token.value_kind()?;
    let label = match kind {
        ValueKind::StringLiteral => "String",
        ValueKind::Boolean => "Boolean",
        ValueKind::Number => {
            if token.value_text().is_some_and(|value| value.contains('.')) {
                "Number"
            } else {
                "Integer"
            }
        }
        ValueKind::HexLiteral => "HexColor",
        ValueKind::Identifier => "Identifier",
        // Placeholders stay opaque until the compiler resolves them.
        ValueKind::Placeholder => return None,
    };
    Some(label.to_string())
}

/// Case-insensitive compatibility over a fixed table. An expected type of
/// `any` (or an empty expectation) always passes; a concrete type with no
/// table entry satisfies only itself.
pub fn is_type_compatible(expected: &str, actual: &str) -> bool {
    let expected_lower = expected.trim().to_ascii_lowercase();
    if expected_lower.is_empty() || expected_lower == "any" {
        return true;
    }

    let actual_lower = actual.trim().to_ascii_lowercase();
    if actual_lower == expected_lower {
        return true;
    }

    compatible_expectations(&actual_lower)
        .iter()
        .any(|candidate| *candidate == expected_lower)
}

fn compatible_expectations(actual: &str) -> &'static [&'static str] {
    match actual {
        "integer" => &["integer", "number", "long"],
        "number" => &["number", "double"],
        "hexcolor" => &["hexcolor", "string", "customcolor"],
        "identifier" => &["identifier", "string", "namedvalue"],
        _ => &[],
    }
}
