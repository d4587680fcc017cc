//! Purpose: Library crate for parsing and reading JSON Uniform Response (JUR) envelopes.
//! Exports: `api` (the `Jur` type, units, errors) and `core` (validation, units, clock, errors).
//! Role: Backs the `jur` CLI; usable directly by HTTP clients that already hold response text.
//! Invariants: No I/O or networking; everything runs synchronously in memory.
//! Invariants: Library code logs through `tracing` only and never installs a subscriber.
pub mod api;
pub mod core;
mod json;
