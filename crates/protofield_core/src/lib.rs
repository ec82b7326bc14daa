//! Type-enforcing repeated and map field containers for protobuf-style messages.

/// Schema descriptors, normalization, field containers, messages, and export projection.
pub mod field;
