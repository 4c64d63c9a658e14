use serde::{Deserialize, Serialize};
use wtl_core::text::{encode_units, is_word_unit, units_to_string};
use wtl_core::{FunctionCatalog, FunctionMetadata};

use crate::completion::format_signature;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hover {
    pub markdown: String,
}

/// Finds the identifier word under `offset` (UTF-16 units), looks it up in
/// the catalog, and renders the hover card. Unknown words yield `None`,
/// never an error.
pub fn hover_at(document: &str, offset: usize, catalog: &FunctionCatalog) -> Option<Hover> {
    let units = encode_units(document);
    let word = word_at(&units, offset)?;
    let metadata = catalog.find_by_name(&word)?;
    Some(Hover {
        markdown: render_markdown(metadata),
    })
}

fn word_at(units: &[u16], offset: usize) -> Option<String> {
    let mut anchor = offset.min(units.len());

    // A cursor sitting just past the last character of a word still counts
    // as being on that word.
    if anchor >= units.len() || !is_word_unit(units[anchor]) {
        if anchor == 0 || !is_word_unit(units[anchor - 1]) {
            return None;
        }
        anchor -= 1;
    }

    let mut start = anchor;
    while start > 0 && is_word_unit(units[start - 1]) {
        start -= 1;
    }
    let mut end = anchor + 1;
    while end < units.len() && is_word_unit(units[end]) {
        end += 1;
    }

    Some(units_to_string(&units[start..end]))
}

fn render_markdown(metadata: &FunctionMetadata) -> String {
    let mut markdown = format!(
        "### {}{} -> {}\n",
        metadata.canonical_name,
        format_signature(metadata, true, false),
        metadata.return_type
    );

    if !metadata.description.is_empty() {
        markdown.push('\n');
        markdown.push_str(&metadata.description);
        markdown.push('\n');
    }

    markdown.push_str("\nArguments:\n");
    if metadata.arguments.is_empty() {
        markdown.push_str("- none\n");
    }
    for argument in &metadata.arguments {
        let requirement = if argument.required {
            "required"
        } else {
            "optional"
        };
        match &argument.default_value {
            Some(default) => markdown.push_str(&format!(
                "- `{}` ({}, {}, default: {})\n",
                argument.name, argument.r#type, requirement, default
            )),
            None => markdown.push_str(&format!(
                "- `{}` ({}, {})\n",
                argument.name, argument.r#type, requirement
            )),
        }
    }

    if metadata.aliases.is_empty() {
        markdown.push_str("\nAliases: none\n");
    } else {
        markdown.push_str(&format!("\nAliases: {}\n", metadata.aliases.join(", ")));
    }

    markdown
}

#[cfg(test)]
mod tests {
    use super::*;
    use wtl_core::FunctionArgumentMetadata;

    fn catalog() -> FunctionCatalog {
        FunctionCatalog::from_functions(vec![FunctionMetadata {
            canonical_name: "clamp".to_string(),
            description: "Clamps a value between bounds.".to_string(),
            return_type: "Number".to_string(),
            aliases: vec!["limit".to_string()],
            arguments: vec![
                FunctionArgumentMetadata {
                    name: "value".to_string(),
                    required: true,
                    r#type: "Number".to_string(),
                    default_value: None,
                },
                FunctionArgumentMetadata {
                    name: "max".to_string(),
                    required: false,
                    r#type: "Number".to_string(),
                    default_value: Some("100".to_string()),
                },
            ],
        }])
    }

    #[test]
    fn hover_inside_a_known_word_renders_markdown() {
        let hover = hover_at("{clamp(1)}", 3, &catalog()).expect("hover should resolve");
        assert!(hover.markdown.contains("### clamp(value; max) -> Number"));
        assert!(hover.markdown.contains("Clamps a value between bounds."));
        assert!(hover.markdown.contains("- `value` (Number, required)"));
        assert!(hover.markdown.contains("- `max` (Number, optional, default: 100)"));
        assert!(hover.markdown.contains("Aliases: limit"));
    }

    #[test]
    fn hover_resolves_aliases_too() {
        let hover = hover_at("limit", 0, &catalog()).expect("alias hover should resolve");
        assert!(hover.markdown.contains("### clamp"));
    }

    #[test]
    fn hover_just_past_the_word_still_resolves() {
        let source = "{clamp(1)}";
        // Offset 6 is the '(' right after the name.
        let hover = hover_at(source, 6, &catalog());
        assert!(hover.is_some());
    }

    #[test]
    fn hover_on_unknown_word_is_none() {
        assert!(hover_at("{mystery(1)}", 3, &catalog()).is_none());
    }

    #[test]
    fn hover_outside_any_word_is_none() {
        assert!(hover_at("{clamp(1)}", 0, &catalog()).is_none());
        assert!(hover_at("", 5, &catalog()).is_none());
    }

    #[test]
    fn hover_renders_none_lines_for_empty_metadata() {
        let catalog = FunctionCatalog::from_functions(vec![FunctionMetadata {
            canonical_name: "ping".to_string(),
            description: String::new(),
            return_type: "Integer".to_string(),
            aliases: Vec::new(),
            arguments: Vec::new(),
        }]);
        let hover = hover_at("ping", 1, &catalog).expect("hover should resolve");
        assert!(hover.markdown.contains("### ping() -> Integer"));
        assert!(hover.markdown.contains("- none"));
        assert!(hover.markdown.contains("Aliases: none"));
    }
}
