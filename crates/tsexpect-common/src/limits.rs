//! Centralized limits for the type-assertion engine.
//!
//! Recursion limits for the solver's relation and explanation passes are
//! exposed through `tsexpect_solver::recursion::RecursionProfile`, which reads
//! its values from here so there is a single source of truth.

// =============================================================================
// Prop printing
// =============================================================================

/// Maximum number of path segments the prop printer walks before bailing out.
///
/// The printer does not detect cycles. A self-referential type such as
///
/// ```typescript
/// interface X { x: X }
/// ```
///
/// is walked until its path holds this many segments, at which point a single
/// bailout entry is emitted. A structure that is merely this deep without being
/// cyclic is truncated the same way.
pub const MAX_PROP_PRINT_DEPTH: usize = 20;

/// Segment appended to a path when [`MAX_PROP_PRINT_DEPTH`] is reached.
pub const PROP_PRINT_BAILOUT_SEGMENT: &str = " !!! bailing out to avoid infinite recursion !!! ";

// =============================================================================
// Relations
// =============================================================================

/// Maximum depth for assignability checking.
///
/// Named types are compared coinductively, so most recursive comparisons
/// terminate through cycle detection long before this depth. Hitting the
/// limit makes the relation answer `false`.
pub const MAX_SUBTYPE_DEPTH: u32 = 100;

/// Maximum total relation steps for a single assignability query.
pub const MAX_SUBTYPE_ITERATIONS: u32 = 100_000;

/// Maximum depth of a mismatch explanation tree.
///
/// Past this depth the explainer stops decomposing and reports the leaf
/// comparison of the remaining types.
pub const MAX_MISMATCH_DEPTH: u32 = 20;

/// Maximum depth when resolving chains of named type aliases.
///
/// ```typescript
/// type A = B;
/// type B = C;
/// type C = A; // never resolves to a structural type
/// ```
pub const MAX_ALIAS_RESOLUTION_DEPTH: u32 = 64;
