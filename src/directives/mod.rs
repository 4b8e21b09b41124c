/// Directive extraction from file comment headers.
mod scanner;

pub use scanner::{extract_header, parse_directives, tokenize};
