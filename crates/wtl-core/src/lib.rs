pub mod catalog;
pub mod diagnostic;
pub mod error;
pub mod text;
pub mod token;

pub use catalog::{FunctionArgumentMetadata, FunctionCatalog, FunctionMetadata};
pub use diagnostic::{Diagnostic, Severity};
pub use error::WtlError;
pub use token::{StructuralKind, Token, ValueKind};
