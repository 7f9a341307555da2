//! Assignability rule families, each an `impl SubtypeChecker` block.

mod functions;
mod objects;
mod tuples;
