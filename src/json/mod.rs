//! Purpose: Internal JSON decoding boundary for envelope parsing.
//! Exports: `parse` module with the decode helper used by `api::Jur`.
//! Role: Single seam for the decoder so callsites avoid ad hoc error mapping.
//! Invariants: Decoder failures surface with the decoder's own message, unwrapped.

pub(crate) mod parse;
