//! Token model for the scanner
//!
//! - [`TokenCategory`]: the thirteen token kinds and their report labels
//! - [`Token`]: category plus text for keywords, numbers and identifiers
//! - [`TokenStream`]: the ordered result of a successful scan
//!
//! Every token carries a byte-based [`Span`] through [`SpannedToken`].

pub mod token;
pub mod token_stream;

pub use token::{Token, TokenCategory};
pub use token_stream::{SpannedToken, TokenStream};

pub use crate::utils::{Position, Span, Spanned};
