//! Renderers for diffcheck.
//!
//! Both renderers consume a [`Comparison`](diffcheck_engine::Comparison) and
//! produce markup-free output: unified diff text, or a table of rows the
//! caller lays out however it likes.
//!
//! # Key Types
//!
//! - [`UnifiedOptions`] / [`render_unified`] -- Hunk-based text output
//! - [`SideBySide`] / [`Row`] / [`Cell`] -- Two-column table output
//! - [`intraline_spans`] -- Changed character spans within a replaced pair

pub mod intraline;
pub mod side_by_side;
pub mod unified;

pub use intraline::{intraline_spans, IntralineSpans};
pub use side_by_side::{render_side_by_side, Cell, Row, SideBySide, SideBySideOptions};
pub use unified::{render_unified, UnifiedOptions};
