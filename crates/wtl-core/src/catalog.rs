use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionArgumentMetadata {
    pub name: String,
    pub required: bool,
    pub r#type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionMetadata {
    pub canonical_name: String,
    #[serde(default)]
    pub description: String,
    pub return_type: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default)]
    pub arguments: Vec<FunctionArgumentMetadata>,
}

/// Read-only index over the function metadata supplied by the host.
/// Every alias and every canonical name maps to the owning function;
/// lookups are case-sensitive exact matches. A catalog refresh builds a
/// whole new value instead of mutating this one in place, so in-flight
/// analysis calls keep observing the snapshot they started with.
#[derive(Debug, Clone, Default)]
pub struct FunctionCatalog {
    functions: Vec<FunctionMetadata>,
    index: BTreeMap<String, usize>,
}

impl FunctionCatalog {
    pub fn from_functions(functions: Vec<FunctionMetadata>) -> Self {
        let mut index = BTreeMap::new();
        for (position, metadata) in functions.iter().enumerate() {
            index.insert(metadata.canonical_name.clone(), position);
            for alias in &metadata.aliases {
                index.insert(alias.clone(), position);
            }
        }

        Self { functions, index }
    }

    pub fn find_by_name(&self, name: &str) -> Option<&FunctionMetadata> {
        self.index
            .get(name)
            .and_then(|position| self.functions.get(*position))
    }

    pub fn functions(&self) -> &[FunctionMetadata] {
        &self.functions
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}
