use std::collections::{BTreeMap, BTreeSet};

use regex::Regex;
use wtl_core::text::utf16_offset_at;
use wtl_core::{Diagnostic, FunctionCatalog, FunctionMetadata};
use wtl_parser::{parse, scan_placeholders, FunctionCall, ParseResult};

use crate::types::{infer_argument_type, is_type_compatible};

/// Validates a whole document: duplicate `let` declarations, undefined
/// placeholder references, structural parse errors, and function-call
/// checks against the catalog. All passes are additive, so one construct
/// can legitimately produce several diagnostics.
pub fn build_diagnostics(document: &str, catalog: &FunctionCatalog) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    let declared = collect_declared_variables(document, &mut diagnostics);
    check_placeholder_references(document, &declared, &mut diagnostics);

    let result = parse(document);
    push_parse_errors(&result, &mut diagnostics);
    check_function_calls(&result, catalog, &mut diagnostics);

    diagnostics
}

/// Catalog-independent subset of [`build_diagnostics`]: declaration,
/// placeholder, and structural parse checks. Used when no function catalog
/// is available, where unknown-function warnings would be pure noise.
pub fn build_structural_diagnostics(document: &str) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    let declared = collect_declared_variables(document, &mut diagnostics);
    check_placeholder_references(document, &declared, &mut diagnostics);
    push_parse_errors(&parse(document), &mut diagnostics);

    diagnostics
}

fn push_parse_errors(result: &ParseResult, diagnostics: &mut Vec<Diagnostic>) {
    for error in &result.errors {
        diagnostics.push(Diagnostic::error(
            error.offset,
            error.offset + error.length,
            error.message.clone(),
        ));
    }
}

/// Line-anchored regex scan for `let name = expr;` declarations. This is a
/// deliberately lightweight editor-time check; the superset compiler runs
/// its own bracket-aware scanner and the two can disagree on odd inputs.
fn collect_declared_variables(document: &str, diagnostics: &mut Vec<Diagnostic>) -> BTreeSet<String> {
    let declaration_regex = Regex::new(r"(?m)^\s*let\s+([A-Za-z_][A-Za-z0-9_]*)\s*=\s*([^;]*);")
        .expect("declaration scan regex must compile");

    let mut declared = BTreeSet::new();
    for caps in declaration_regex.captures_iter(document) {
        let whole = caps.get(0).expect("capture 0 always exists");
        let name = caps
            .get(1)
            .expect("declaration regex has a name capture")
            .as_str();

        if declared.insert(name.to_string()) {
            continue;
        }

        // Later occurrences of a seen name are flagged at their own span,
        // starting at the `let` keyword rather than the leading whitespace.
        let leading = whole.as_str().len() - whole.as_str().trim_start().len();
        let start = utf16_offset_at(document, whole.start() + leading);
        let end = utf16_offset_at(document, whole.end());
        diagnostics.push(Diagnostic::warning(
            start,
            end,
            format!("Duplicate variable '{}'", name),
        ));
    }

    declared
}

fn check_placeholder_references(
    document: &str,
    declared: &BTreeSet<String>,
    diagnostics: &mut Vec<Diagnostic>,
) {
    for reference in scan_placeholders(document) {
        if declared.contains(&reference.name) {
            continue;
        }
        diagnostics.push(Diagnostic::error(
            reference.offset,
            reference.offset + reference.length,
            format!("Undefined variable '{}'", reference.name),
        ));
    }
}

fn check_function_calls(
    result: &ParseResult,
    catalog: &FunctionCatalog,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let calls_by_start: BTreeMap<usize, &FunctionCall> = result
        .calls
        .iter()
        .map(|call| (call.start_offset, call))
        .collect();

    for call in &result.calls {
        let Some(metadata) = catalog.find_by_name(&call.name) else {
            let name_length = call.name.encode_utf16().count();
            diagnostics.push(Diagnostic::warning(
                call.start_offset,
                call.start_offset + name_length,
                format!("Unknown function '{}'", call.name),
            ));
            continue;
        };

        validate_call_arguments(call, metadata, &calls_by_start, catalog, diagnostics);
    }
}

fn validate_call_arguments(
    call: &FunctionCall,
    metadata: &FunctionMetadata,
    calls_by_start: &BTreeMap<usize, &FunctionCall>,
    catalog: &FunctionCatalog,
    diagnostics: &mut Vec<Diagnostic>,
) {
    for (position, expected) in metadata.arguments.iter().enumerate() {
        let provided = call.arguments.get(position);
        if !provided.is_some_and(|argument| argument.has_value()) {
            if expected.required {
                diagnostics.push(Diagnostic::error(
                    call.start_offset,
                    call.end_offset,
                    format!(
                        "'{}' is missing required argument '{}'",
                        call.name, expected.name
                    ),
                ));
            }
            continue;
        }

        let argument = provided.expect("presence checked above");
        let Some(actual) = infer_argument_type(argument, calls_by_start, catalog) else {
            continue;
        };

        if !is_type_compatible(&expected.r#type, &actual) {
            let (start, end) = argument
                .span
                .map(|span| (span.start, span.end))
                .unwrap_or((call.start_offset, call.end_offset));
            diagnostics.push(Diagnostic::error(
                start,
                end,
                format!(
                    "'{}' argument '{}' expects {}; received {}",
                    call.name, expected.name, expected.r#type, actual
                ),
            ));
        }
    }

    for (position, argument) in call
        .arguments
        .iter()
        .enumerate()
        .skip(metadata.arguments.len())
    {
        if !argument.has_value() {
            continue;
        }
        let (start, end) = argument
            .span
            .map(|span| (span.start, span.end))
            .unwrap_or((call.start_offset, call.end_offset));
        diagnostics.push(Diagnostic::warning(
            start,
            end,
            format!("'{}' does not accept argument {}", call.name, position + 1),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wtl_core::{FunctionArgumentMetadata, Severity};

    fn argument(name: &str, required: bool, r#type: &str) -> FunctionArgumentMetadata {
        FunctionArgumentMetadata {
            name: name.to_string(),
            required,
            r#type: r#type.to_string(),
            default_value: None,
        }
    }

    fn function(name: &str, arguments: Vec<FunctionArgumentMetadata>) -> FunctionMetadata {
        FunctionMetadata {
            canonical_name: name.to_string(),
            description: String::new(),
            return_type: "String".to_string(),
            aliases: Vec::new(),
            arguments,
        }
    }

    fn catalog_with_foo_string() -> FunctionCatalog {
        FunctionCatalog::from_functions(vec![function(
            "foo",
            vec![argument("value", true, "String")],
        )])
    }

    #[test]
    fn missing_required_argument_is_a_single_error() {
        let diagnostics = build_diagnostics("{foo()}", &catalog_with_foo_string());
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].severity, Severity::Error);
        assert!(diagnostics[0].message.contains("missing required argument"));
    }

    #[test]
    fn satisfied_required_argument_produces_no_diagnostics() {
        let diagnostics = build_diagnostics("{foo(\"x\")}", &catalog_with_foo_string());
        assert!(diagnostics.is_empty(), "got {:?}", diagnostics);
    }

    #[test]
    fn type_mismatch_spans_the_argument() {
        let diagnostics = build_diagnostics("{foo(12)}", &catalog_with_foo_string());
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0]
            .message
            .contains("'foo' argument 'value' expects String; received Integer"));
        assert_eq!(diagnostics[0].start_offset, 5);
        assert_eq!(diagnostics[0].end_offset, 7);
    }

    #[test]
    fn extra_arguments_warn_with_one_based_index() {
        let catalog = FunctionCatalog::from_functions(vec![function(
            "pair",
            vec![argument("x", true, "Any"), argument("y", true, "Any")],
        )]);
        let diagnostics = build_diagnostics("{pair(1; 2; 3)}", &catalog);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].severity, Severity::Warning);
        assert!(diagnostics[0].message.contains("does not accept argument 3"));
    }

    #[test]
    fn optional_arguments_may_be_omitted_silently() {
        let catalog = FunctionCatalog::from_functions(vec![function(
            "fmt",
            vec![argument("value", true, "Any"), argument("width", false, "Integer")],
        )]);
        let diagnostics = build_diagnostics("{fmt(1)}", &catalog);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn unknown_function_warns_spanning_the_name_only() {
        let diagnostics = build_diagnostics("{mystery()}", &FunctionCatalog::default());
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].severity, Severity::Warning);
        assert!(diagnostics[0].message.contains("Unknown function 'mystery'"));
        assert_eq!(diagnostics[0].start_offset, 1);
        assert_eq!(diagnostics[0].end_offset, 1 + "mystery".len());
    }

    #[test]
    fn duplicate_let_declarations_warn_on_later_occurrences() {
        let source = "let a = 1;\nlet b = 2;\nlet a = 3;";
        let diagnostics = build_diagnostics(source, &FunctionCatalog::default());
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].severity, Severity::Warning);
        assert!(diagnostics[0].message.contains("Duplicate variable 'a'"));
        assert_eq!(diagnostics[0].start_offset, 22);
        assert_eq!(diagnostics[0].end_offset, 32);
    }

    #[test]
    fn undefined_placeholder_is_an_error_at_its_span() {
        let diagnostics = build_diagnostics("{echo(@{ghost})}", &FunctionCatalog::default());
        let undefined = diagnostics
            .iter()
            .find(|diagnostic| diagnostic.message.contains("Undefined variable 'ghost'"))
            .expect("undefined placeholder should be reported");
        assert_eq!(undefined.severity, Severity::Error);
        assert_eq!(undefined.start_offset, 6);
        assert_eq!(undefined.end_offset, 14);
    }

    #[test]
    fn declared_placeholder_is_accepted() {
        let source = "let name = \"x\";\n{echo(@{name})}";
        let catalog = FunctionCatalog::from_functions(vec![function(
            "echo",
            vec![argument("value", true, "Any")],
        )]);
        let diagnostics = build_diagnostics(source, &catalog);
        assert!(diagnostics.is_empty(), "got {:?}", diagnostics);
    }

    #[test]
    fn parse_errors_surface_as_error_diagnostics() {
        let diagnostics = build_diagnostics("{foo(", &catalog_with_foo_string());
        assert!(diagnostics
            .iter()
            .any(|diagnostic| diagnostic.message.contains("Missing ')'")));
    }

    #[test]
    fn passes_are_additive_for_one_construct() {
        // Undefined placeholder inside an unknown function: both passes fire.
        let diagnostics = build_diagnostics("{mystery(@{ghost})}", &FunctionCatalog::default());
        assert!(diagnostics
            .iter()
            .any(|diagnostic| diagnostic.message.contains("Undefined variable")));
        assert!(diagnostics
            .iter()
            .any(|diagnostic| diagnostic.message.contains("Unknown function")));
    }

    #[test]
    fn nested_calls_are_validated_independently() {
        let catalog = FunctionCatalog::from_functions(vec![
            function("outer", vec![argument("value", true, "Any")]),
            function("inner", vec![argument("value", true, "String")]),
        ]);
        let diagnostics = build_diagnostics("{outer(inner())}", &catalog);
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0]
            .message
            .contains("'inner' is missing required argument"));
    }

    #[test]
    fn structural_diagnostics_skip_catalog_checks() {
        let source = "let a = 1;\nlet a = 2;\n{mystery(@{ghost}} {broken(";
        let diagnostics = build_structural_diagnostics(source);
        assert!(diagnostics
            .iter()
            .any(|diagnostic| diagnostic.message.contains("Duplicate variable 'a'")));
        assert!(diagnostics
            .iter()
            .any(|diagnostic| diagnostic.message.contains("Undefined variable 'ghost'")));
        assert!(diagnostics
            .iter()
            .any(|diagnostic| diagnostic.message.contains("Missing ')'")));
        assert!(!diagnostics
            .iter()
            .any(|diagnostic| diagnostic.message.contains("Unknown function")));
    }

    #[test]
    fn diagnostics_are_idempotent_for_the_same_snapshot() {
        let source = "let a = 1;\nlet a = 2;\n{foo(@{b})}";
        let catalog = catalog_with_foo_string();
        let first = build_diagnostics(source, &catalog);
        let second = build_diagnostics(source, &catalog);
        assert_eq!(first, second);
    }
}
