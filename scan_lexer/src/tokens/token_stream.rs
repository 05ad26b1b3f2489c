//! Ordered token sequence produced by a completed scan

use crate::{
    tokens::token::*,
    utils::{Span, Spanned},
};

/// A token with span information
pub type SpannedToken = Spanned<Token>;

/// Tokens in source order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenStream {
    tokens: Vec<SpannedToken>,
}

impl TokenStream {
    pub fn new(tokens: Vec<SpannedToken>) -> Self {
        Self { tokens }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn tokens(&self) -> &[SpannedToken] {
        &self.tokens
    }

    /// Categories in source order
    pub fn categories(&self) -> Vec<TokenCategory> {
        self.tokens.iter().map(|t| t.value.category).collect()
    }

    /// Span from the first to the last token
    pub fn covering_span(&self) -> Option<Span> {
        let first = self.tokens.first()?;
        let last = self.tokens.last()?;
        Some(first.span.merge(last.span))
    }
}

impl IntoIterator for TokenStream {
    type Item = SpannedToken;
    type IntoIter = std::vec::IntoIter<SpannedToken>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.into_iter()
    }
}

impl<'a> IntoIterator for &'a TokenStream {
    type Item = &'a SpannedToken;
    type IntoIter = std::slice::Iter<'a, SpannedToken>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

/// Span checks over scanned tokens
#[cfg(test)]
pub(crate) mod validation {
    use super::*;

    /// Spans must be non-empty and strictly increasing
    pub fn validate_span_order(tokens: &[SpannedToken]) -> Result<(), String> {
        if let Some(empty) = tokens.iter().find(|t| t.span.is_empty()) {
            return Err(format!("Empty span for token {}", empty.value));
        }

        for window in tokens.windows(2) {
            let current = window[0].span;
            let next = window[1].span;

            if current.end.offset > next.start.offset {
                return Err(format!(
                    "Span order violation: token ending at {} overlaps next token at {}",
                    current.end.offset, next.start.offset
                ));
            }
        }
        Ok(())
    }

    /// Each token's span must cover exactly its lexeme in the source
    pub fn validate_against_source(tokens: &[SpannedToken], source: &[u8]) -> Result<(), String> {
        for token in tokens {
            if token.span.end.offset > source.len() {
                return Err(format!("Span {} exceeds source length", token.span));
            }
            if token.span.slice(source) != token.value.lexeme().as_bytes() {
                return Err(format!(
                    "Span {} does not cover lexeme '{}'",
                    token.span,
                    token.value.lexeme()
                ));
            }
        }
        Ok(())
    }
}
