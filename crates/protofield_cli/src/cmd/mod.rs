/// Build a message from a JSON document and export it.
pub mod export;
/// Shared value-tree printer.
pub mod print;
/// Schema document inspection command.
pub mod schema;
/// Shared helpers for command modules.
pub(crate) mod util;

#[cfg(test)]
pub(crate) mod test_support;
