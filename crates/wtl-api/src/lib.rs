use serde::Deserialize;
use wtl_analysis::{
    build_diagnostics, build_structural_diagnostics, completion_items, hover_at, CompletionItem,
    Hover,
};
use wtl_compiler::{compile_superset_to_wynntils, CompileResult};
use wtl_core::{Diagnostic, FunctionCatalog, FunctionMetadata, WtlError};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CatalogPayload {
    #[serde(default)]
    functions: Vec<FunctionMetadata>,
}

/// Builds a catalog from the host's JSON payload. Both a bare array of
/// function entries and a `{"functions": [...]}` wrapper object are
/// accepted, since hosts export either shape.
pub fn build_catalog_from_payload(payload: &str) -> Result<FunctionCatalog, WtlError> {
    if let Ok(functions) = serde_json::from_str::<Vec<FunctionMetadata>>(payload) {
        return Ok(FunctionCatalog::from_functions(functions));
    }

    let wrapped: CatalogPayload = serde_json::from_str(payload).map_err(|error| {
        WtlError::new(
            "CATALOG_PAYLOAD_INVALID",
            format!("Catalog payload is not valid JSON: {}", error),
        )
    })?;

    Ok(FunctionCatalog::from_functions(wrapped.functions))
}

pub fn document_diagnostics(document: &str, catalog: &FunctionCatalog) -> Vec<Diagnostic> {
    build_diagnostics(document, catalog)
}

/// Diagnostics without catalog-backed call validation, for hosts that have
/// no function metadata to offer.
pub fn document_structural_diagnostics(document: &str) -> Vec<Diagnostic> {
    build_structural_diagnostics(document)
}

pub fn document_completions(catalog: &FunctionCatalog) -> Vec<CompletionItem> {
    completion_items(catalog)
}

pub fn document_hover(document: &str, offset: usize, catalog: &FunctionCatalog) -> Option<Hover> {
    hover_at(document, offset, catalog)
}

pub fn compile_document(source: &str) -> CompileResult {
    compile_superset_to_wynntils(source)
}
