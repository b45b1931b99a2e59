//! Foundation types for diffcheck.
//!
//! This crate provides the data model shared by the engine and the
//! renderers. Every other diffcheck crate depends on `diffcheck-types`.
//!
//! # Key Types
//!
//! - [`Line`] -- One comparison unit: raw display text plus comparison key
//! - [`Opcode`] / [`OpKind`] -- One step of an edit script over index ranges

pub mod line;
pub mod opcode;

pub use line::Line;
pub use opcode::{OpKind, Opcode};
