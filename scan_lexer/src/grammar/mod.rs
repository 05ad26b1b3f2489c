//! Grammar definitions for the `var`/`begin`/`end` language

pub mod keywords;

pub use keywords::Keyword;
