use serde::{Deserialize, Serialize};
use wtl_core::{FunctionArgumentMetadata, FunctionCatalog, FunctionMetadata};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionItem {
    pub label: String,
    pub detail: String,
    pub insert_text: String,
}

fn included_arguments(
    metadata: &FunctionMetadata,
    include_optional: bool,
) -> impl Iterator<Item = &FunctionArgumentMetadata> {
    metadata
        .arguments
        .iter()
        .filter(move |argument| include_optional || argument.required)
}

/// Renders `(a: Type; b: Type)` style signatures; an empty argument list
/// renders as `()`.
pub fn format_signature(
    metadata: &FunctionMetadata,
    include_optional: bool,
    include_types: bool,
) -> String {
    let rendered = included_arguments(metadata, include_optional)
        .map(|argument| {
            if include_types {
                format!("{}: {}", argument.name, argument.r#type)
            } else {
                argument.name.clone()
            }
        })
        .collect::<Vec<_>>()
        .join("; ");

    format!("({})", rendered)
}

/// Editor insert text with numbered tabstops: `name(${1:a}; ${2:b})$0`.
pub fn build_snippet(
    metadata: &FunctionMetadata,
    display_name: &str,
    include_optional: bool,
) -> String {
    let stops = included_arguments(metadata, include_optional)
        .enumerate()
        .map(|(position, argument)| format!("${{{}:{}}}", position + 1, argument.name))
        .collect::<Vec<_>>()
        .join("; ");

    format!("{}({})$0", display_name, stops)
}

/// One completion item per canonical name and one per alias, so an alias
/// and its canonical function are independently selectable. Snippets insert
/// required arguments only.
pub fn completion_items(catalog: &FunctionCatalog) -> Vec<CompletionItem> {
    let mut items = Vec::new();

    for metadata in catalog.functions() {
        items.push(item_for(metadata, &metadata.canonical_name));
        for alias in &metadata.aliases {
            items.push(item_for(metadata, alias));
        }
    }

    items
}

fn item_for(metadata: &FunctionMetadata, label: &str) -> CompletionItem {
    CompletionItem {
        label: label.to_string(),
        detail: format!(
            "{}{} -> {}",
            metadata.canonical_name,
            format_signature(metadata, true, true),
            metadata.return_type
        ),
        insert_text: build_snippet(metadata, label, false),
    }
}
