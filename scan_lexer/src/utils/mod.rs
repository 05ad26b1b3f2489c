//! Shared primitive types used by the scanner, reporter and logging

pub mod span;

pub use span::{Position, Span, Spanned};
