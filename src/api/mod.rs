//! Purpose: Define the stable public Rust API boundary for JUR envelopes.
//! Exports: `Jur`, the unit and request types, and the error model.
//! Role: Public, additive-only surface; internal decode helpers stay private.
//! Invariants: Callers reach validation only through `Jur::parse`.

mod jur;

#[doc(hidden)]
pub use crate::core::error::to_exit_code;
pub use crate::core::error::{Error, ErrorKind};
pub use crate::core::unit::{IntoUnit, Unit};
pub use crate::core::validate::{DebugTimings, Request, Violation};
pub use jur::Jur;
