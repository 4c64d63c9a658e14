use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use wtl_core::text::{
    encode_units, is_identifier_start_unit, is_whitespace_unit, is_word_unit, units_to_string,
};
use wtl_parser::scan_placeholder_units;

const fn unit(byte: u8) -> u16 {
    byte as u16
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompileError {
    pub offset: usize,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompileResult {
    pub code: String,
    pub errors: Vec<CompileError>,
}

#[derive(Debug, Clone, PartialEq)]
struct VariableDeclaration {
    name: String,
    raw_value: String,
    declaration_offset: usize,
    value_offset: usize,
    end_offset: usize,
}

/// Text-to-text transform from the `let`-superset dialect to a single
/// normalized expression line. Total over any input; errors are collected
/// into the result and never abort compilation, and unresolved placeholders
/// are left verbatim in the output so the user can see what failed.
///
/// This transform is independent of the parser/diagnostics pipeline: it
/// does not validate function calls at all.
pub fn compile_superset_to_wynntils(source: &str) -> CompileResult {
    let units = encode_units(source);
    let mut errors = Vec::new();

    let declarations = scan_declarations(&units);

    let mut table: BTreeMap<String, VariableDeclaration> = BTreeMap::new();
    for declaration in &declarations {
        if table.contains_key(&declaration.name) {
            errors.push(CompileError {
                offset: declaration.declaration_offset,
                message: format!("Duplicate variable '{}'", declaration.name),
            });
            continue;
        }
        table.insert(declaration.name.clone(), declaration.clone());
    }

    let mut resolved: BTreeMap<String, String> = BTreeMap::new();
    for name in table.keys().cloned().collect::<Vec<_>>() {
        let mut in_progress = BTreeSet::new();
        resolve_variable(&name, &table, &mut resolved, &mut in_progress, &mut errors);
    }

    let body = substitute_body(&units, &declarations, &resolved, &mut errors);

    CompileResult {
        code: normalize(&body),
        errors,
    }
}

/// Bracket-aware scan for boundary-delimited `let <name> = <expr>;`
/// statements. Comments and string literals are skipped, and the
/// terminating semicolon counts only at zero `()`/`{}`/`[]` depth.
/// Deliberately stricter than the diagnostics engine's line-anchored regex
/// scan; this one is the source of truth for compilation.
fn scan_declarations(units: &[u16]) -> Vec<VariableDeclaration> {
    let mut declarations = Vec::new();
    let mut depth = 0usize;
    let mut index = 0;

    while index < units.len() {
        let current = units[index];

        if current == unit(b'/') && units.get(index + 1) == Some(&unit(b'/')) {
            while index < units.len() && units[index] != unit(b'\n') {
                index += 1;
            }
            continue;
        }

        if current == unit(b'"') || current == unit(b'\'') {
            index = skip_string(units, index);
            continue;
        }

        match current {
            value if is_open_bracket(value) => depth += 1,
            value if is_close_bracket(value) => depth = depth.saturating_sub(1),
            _ => {}
        }

        if depth == 0 && is_let_keyword_at(units, index) {
            if let Some((declaration, next_index)) = parse_declaration(units, index) {
                declarations.push(declaration);
                index = next_index;
                continue;
            }
        }

        index += 1;
    }

    declarations
}

fn is_open_bracket(value: u16) -> bool {
    value == unit(b'(') || value == unit(b'{') || value == unit(b'[')
}

fn is_close_bracket(value: u16) -> bool {
    value == unit(b')') || value == unit(b'}') || value == unit(b']')
}

/// `let` must be preceded by start-of-text or whitespace and followed by a
/// non-identifier character, so identifiers like `letter` never match.
fn is_let_keyword_at(units: &[u16], index: usize) -> bool {
    if index > 0 && !is_whitespace_unit(units[index - 1]) {
        return false;
    }

    let keyword = [unit(b'l'), unit(b'e'), unit(b't')];
    if units.get(index..index + 3) != Some(&keyword[..]) {
        return false;
    }

    match units.get(index + 3) {
        Some(next) => !is_word_unit(*next),
        None => true,
    }
}

fn parse_declaration(units: &[u16], start: usize) -> Option<(VariableDeclaration, usize)> {
    let mut cursor = start + 3;
    while cursor < units.len() && is_whitespace_unit(units[cursor]) {
        cursor += 1;
    }

    if cursor >= units.len() || !is_identifier_start_unit(units[cursor]) {
        return None;
    }
    let name_start = cursor;
    while cursor < units.len() && is_word_unit(units[cursor]) {
        cursor += 1;
    }
    let name = units_to_string(&units[name_start..cursor]);

    while cursor < units.len() && is_whitespace_unit(units[cursor]) {
        cursor += 1;
    }
    if units.get(cursor) != Some(&unit(b'=')) {
        return None;
    }
    cursor += 1;

    let value_offset = cursor;
    let mut depth = 0usize;
    let mut scan = cursor;
    while scan < units.len() {
        let current = units[scan];

        if current == unit(b'/') && units.get(scan + 1) == Some(&unit(b'/')) {
            while scan < units.len() && units[scan] != unit(b'\n') {
                scan += 1;
            }
            continue;
        }

        if current == unit(b'"') || current == unit(b'\'') {
            scan = skip_string(units, scan);
            continue;
        }

        if is_open_bracket(current) {
            depth += 1;
        } else if is_close_bracket(current) {
            depth = depth.saturating_sub(1);
        } else if current == unit(b';') && depth == 0 {
            let declaration = VariableDeclaration {
                name,
                raw_value: units_to_string(&units[value_offset..scan]),
                declaration_offset: start,
                value_offset,
                end_offset: scan + 1,
            };
            return Some((declaration, scan + 1));
        }

        scan += 1;
    }

    None
}

fn skip_string(units: &[u16], start: usize) -> usize {
    let quote = units[start];
    let mut index = start + 1;

    while index < units.len() {
        if units[index] == unit(b'\\') && index + 1 < units.len() {
            index += 2;
        } else if units[index] == quote {
            return index + 1;
        } else {
            index += 1;
        }
    }

    units.len()
}

/// Resolves one variable's placeholders recursively, memoized. Cycles are
/// reported once at the re-entered reference and left verbatim; the same
/// goes for references to names that were never declared.
fn resolve_variable(
    name: &str,
    table: &BTreeMap<String, VariableDeclaration>,
    resolved: &mut BTreeMap<String, String>,
    in_progress: &mut BTreeSet<String>,
    errors: &mut Vec<CompileError>,
) -> Option<String> {
    if let Some(value) = resolved.get(name) {
        return Some(value.clone());
    }

    let declaration = table.get(name)?;
    if !in_progress.insert(name.to_string()) {
        return None;
    }

    let value_units = encode_units(&declaration.raw_value);
    let mut output: Vec<u16> = Vec::new();
    let mut cursor = 0usize;

    for reference in scan_placeholder_units(&value_units) {
        output.extend_from_slice(&value_units[cursor..reference.offset]);
        cursor = reference.offset + reference.length;

        let absolute_offset = declaration.value_offset + reference.offset;
        let verbatim = &value_units[reference.offset..reference.offset + reference.length];

        if in_progress.contains(&reference.name) {
            errors.push(CompileError {
                offset: absolute_offset,
                message: format!(
                    "Circular variable reference involving '{}'",
                    reference.name
                ),
            });
            output.extend_from_slice(verbatim);
            continue;
        }

        match resolve_variable(&reference.name, table, resolved, in_progress, errors) {
            Some(value) => output.extend_from_slice(&encode_units(&value)),
            None => {
                errors.push(CompileError {
                    offset: absolute_offset,
                    message: format!("Undefined variable '{}'", reference.name),
                });
                output.extend_from_slice(verbatim);
            }
        }
    }

    output.extend_from_slice(&value_units[cursor..]);
    in_progress.remove(name);

    let value = finalize_value(&units_to_string(&output));
    resolved.insert(name.to_string(), value.clone());
    Some(value)
}

/// A resolved value is whitespace-trimmed, and one matched pair of
/// surrounding quotes is stripped so string-valued variables substitute as
/// bare text inside template expressions.
fn finalize_value(value: &str) -> String {
    let trimmed = value.trim();
    for quote in ['"', '\''] {
        if trimmed.len() >= 2 && trimmed.starts_with(quote) && trimmed.ends_with(quote) {
            return trimmed[1..trimmed.len() - 1].to_string();
        }
    }
    trimmed.to_string()
}

/// Concatenates the text between declarations and substitutes every
/// remaining placeholder. Unresolved names are reported at their
/// original-source offset and the placeholder text is kept unchanged.
fn substitute_body(
    units: &[u16],
    declarations: &[VariableDeclaration],
    resolved: &BTreeMap<String, String>,
    errors: &mut Vec<CompileError>,
) -> String {
    let mut segments = Vec::new();
    let mut segment_start = 0usize;
    for declaration in declarations {
        segments.push((segment_start, declaration.declaration_offset));
        segment_start = declaration.end_offset;
    }
    segments.push((segment_start, units.len()));

    let mut output: Vec<u16> = Vec::new();
    for (start, end) in segments {
        let segment = &units[start..end];
        let mut cursor = 0usize;

        for reference in scan_placeholder_units(segment) {
            output.extend_from_slice(&segment[cursor..reference.offset]);
            cursor = reference.offset + reference.length;

            match resolved.get(&reference.name) {
                Some(value) => output.extend_from_slice(&encode_units(value)),
                None => {
                    errors.push(CompileError {
                        offset: start + reference.offset,
                        message: format!("Undefined variable '{}'", reference.name),
                    });
                    output.extend_from_slice(
                        &segment[reference.offset..reference.offset + reference.length],
                    );
                }
            }
        }

        output.extend_from_slice(&segment[cursor..]);
    }

    units_to_string(&output)
}

/// Target scripts are single-line: carriage returns and newlines are
/// removed outright, then the result is trimmed.
fn normalize(code: &str) -> String {
    code.replace(['\r', '\n'], "").trim().to_string()
}
