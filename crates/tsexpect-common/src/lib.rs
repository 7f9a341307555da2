//! Common types and utilities for the tsexpect type-assertion engine.
//!
//! This crate provides foundational types used across all tsexpect crates:
//! - String interning (`Atom`, `ShardedInterner`)
//! - Centralized limits (prop-printing depth, relation and explanation depths)

// String interning for property names and string literals
pub mod interner;
pub use interner::{Atom, ShardedInterner};

// Centralized limits and thresholds
pub mod limits;
