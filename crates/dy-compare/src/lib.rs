//! dy-compare: proves bit-for-bit fidelity of the relational projection
//!
//! Reparses a source file, reopens its database read-only, and compares
//! every projected field. Disagreements are collected, never thrown; the
//! only errors are failures to open an input.

mod mismatch;
mod verify;

pub use mismatch::{Mismatch, VerifyReport};
pub use verify::{VerifyError, verify_area, verify_file};
