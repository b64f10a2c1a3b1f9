//! MySQL script reading and statement splitting

mod script_reader;
mod splitter;

pub use script_reader::{read_script, resolve_encoding};
pub use splitter::split_statements;
