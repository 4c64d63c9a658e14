pub mod lexer;
pub mod parse;
pub mod placeholder;

pub use lexer::lex;
pub use parse::{parse, FunctionCall, ParseError, ParseResult, ParsedArgument, SourceSpan};
pub use placeholder::{scan_placeholder_units, scan_placeholders, PlaceholderRef};
