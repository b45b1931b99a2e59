//! Diff engine for diffcheck.
//!
//! Turns two blocks of text into line sequences, computes an edit script
//! between them and derives summary metrics. Rendering lives in
//! `diffcheck-render`.
//!
//! # Key Types
//!
//! - [`Comparison`] -- Both line sequences plus the opcodes relating them
//! - [`EngineConfig`] / [`Algorithm`] -- Per-request options and guards
//! - [`GroupedOpcodes`] -- Hunk grouping with bounded context
//! - [`Stats`] -- Line counts and similarity for display

pub mod compare;
pub mod config;
pub mod error;
pub mod group;
pub mod matcher;
pub mod normalize;
pub mod similarity;

pub use compare::{Comparison, Stats};
pub use config::{Algorithm, EngineConfig, DEFAULT_TIMEOUT_MS};
pub use error::{EngineError, EngineResult};
pub use group::{group_opcodes, group_span, GroupedOpcodes};
pub use matcher::{compact, diff_lines, diff_slices, Matched};
pub use normalize::{normalize, DEFAULT_STRIP};
pub use similarity::{char_similarity, similarity};

pub use diffcheck_types::{Line, OpKind, Opcode};
