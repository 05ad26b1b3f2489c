//! Lexical analysis: byte classes, the token automaton and the scan driver
//!
//! [`automaton::next_token`] recognizes one lexeme per call. [`Scanner`]
//! drives it over a whole buffer and [`LexicalAnalyzer`] adds limits,
//! metrics and file-aware logging on top.

pub mod analyzer;
pub mod automaton;
pub mod classifier;

use crate::config::compile_time::file_processing::MAX_FILE_SIZE;
use crate::config::compile_time::lexical::{MAX_LEXEME_LENGTH, MAX_TOKEN_COUNT};
use crate::logging::codes;
use crate::tokens::TokenStream;

pub use analyzer::{LexerError, LexicalAnalyzer, LexicalMetrics, ScanReport, Scanner, Termination};
pub use automaton::{next_token, ScanOutcome, State, Step};

/// Tokenize a buffer with default preferences
pub fn tokenize(source: &[u8]) -> Result<TokenStream, LexerError> {
    LexicalAnalyzer::new().tokenize(source)
}

/// Compile-time limits applied while scanning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SecurityLimits {
    pub max_lexeme_length: usize,
    pub max_token_count: usize,
    pub max_file_size: u64,
}

pub fn get_security_limits() -> SecurityLimits {
    SecurityLimits {
        max_lexeme_length: MAX_LEXEME_LENGTH,
        max_token_count: MAX_TOKEN_COUNT,
        max_file_size: MAX_FILE_SIZE,
    }
}

/// Check that lexical codes are registered and limits are usable.
/// Run once at startup.
pub fn validate_tokenization() -> Result<(), String> {
    let lexical_codes = [
        codes::lexical::ILLEGAL_CHARACTER,
        codes::lexical::LEXEME_TOO_LONG,
        codes::lexical::TOO_MANY_TOKENS,
        codes::success::TOKENIZATION_COMPLETE,
    ];

    for code in &lexical_codes {
        if codes::get_error_metadata(code.as_str()).is_none() {
            return Err(format!(
                "Lexical code {} not found in metadata registry",
                code.as_str()
            ));
        }
    }

    let limits = get_security_limits();
    if limits.max_lexeme_length == 0 {
        return Err("max_lexeme_length must be greater than zero".to_string());
    }
    if limits.max_token_count == 0 {
        return Err("max_token_count must be greater than zero".to_string());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_tokenize() {
        let stream = tokenize(b"begin x = 1 end.").unwrap();
        assert_eq!(stream.len(), 6);
        assert_matches!(tokenize(b"x # y"), Err(LexerError::IllegalCharacter { byte: b'#', .. }));
    }

    #[test]
    fn test_security_limits() {
        let limits = get_security_limits();
        assert_eq!(limits.max_lexeme_length, 100);
        assert!(limits.max_token_count > 0);
        assert_eq!(limits.max_file_size, MAX_FILE_SIZE);
    }

    #[test]
    fn test_validate_tokenization() {
        assert!(validate_tokenization().is_ok());
    }
}
