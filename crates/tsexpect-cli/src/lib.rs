//! Command-line front-end for the structural type-assertion solver.
//!
//! Types and assertions are written as JSON fixtures (see [`fixture`]);
//! `tsexpect check` runs them and reports each failure with its diff.
pub mod args;
pub mod config;
pub mod driver;
pub mod fixture;
pub mod reporter;
pub mod tracing_config;
