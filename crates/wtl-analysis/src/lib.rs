pub mod completion;
pub mod diagnostics;
pub mod hover;
pub mod types;

pub use completion::{build_snippet, completion_items, format_signature, CompletionItem};
pub use diagnostics::{build_diagnostics, build_structural_diagnostics};
pub use hover::{hover_at, Hover};
pub use types::{infer_argument_type, is_type_compatible};
