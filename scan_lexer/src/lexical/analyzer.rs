//! Scan driver: runs the automaton to exhaustion with limits, metrics and logging

use super::automaton::{next_token, ScanOutcome};
use crate::config::compile_time::lexical::{MAX_LEXEME_LENGTH, MAX_TOKEN_COUNT};
use crate::config::runtime::LexicalPreferences;
use crate::file_processor::FileProcessingResult;
use crate::logging::codes;
use crate::tokens::{SpannedToken, Token, TokenCategory, TokenStream};
use crate::utils::{Position, Span};
use crate::{log_debug, log_error, log_success};
use std::collections::BTreeMap;

/// Lexical analysis errors. Each one ends the scan.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexerError {
    #[error("Non-recognizable character 0x{byte:02X} at line {line}, column {column}")]
    IllegalCharacter { byte: u8, line: u32, column: u32 },

    #[error("Lexeme too long: {length} bytes (max {MAX_LEXEME_LENGTH})")]
    LexemeTooLong { length: usize },

    #[error("Too many tokens: {count} (max {MAX_TOKEN_COUNT})")]
    TooManyTokens { count: usize },
}

impl LexerError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            LexerError::IllegalCharacter { .. } => codes::lexical::ILLEGAL_CHARACTER,
            LexerError::LexemeTooLong { .. } => codes::lexical::LEXEME_TOO_LONG,
            LexerError::TooManyTokens { .. } => codes::lexical::TOO_MANY_TOKENS,
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LexicalMetrics {
    pub total_tokens: usize,
    pub keyword_tokens: usize,
    pub identifier_tokens: usize,
    pub number_tokens: usize,
    pub symbol_tokens: usize,
    pub whitespace_bytes_skipped: usize,
    /// Length in bytes of the longest lexeme seen
    pub longest_lexeme: usize,

    // Only filled when `track_category_histogram` is set
    pub category_histogram: BTreeMap<TokenCategory, usize>,
}

impl LexicalMetrics {
    pub(crate) fn record_token(&mut self, token: &Token, preferences: &LexicalPreferences) {
        self.total_tokens += 1;
        self.longest_lexeme = self.longest_lexeme.max(token.lexeme().len());

        match token.category {
            TokenCategory::Keyword => self.keyword_tokens += 1,
            TokenCategory::Identifier => self.identifier_tokens += 1,
            TokenCategory::Number => self.number_tokens += 1,
            _ => self.symbol_tokens += 1,
        }

        if preferences.track_category_histogram {
            *self.category_histogram.entry(token.category).or_insert(0) += 1;
        }
    }

    pub(crate) fn record_whitespace(&mut self, bytes: usize) {
        self.whitespace_bytes_skipped += bytes;
    }
}

/// Iterator over the tokens of a buffer.
///
/// Whitespace is skipped. The first error is yielded once and the iterator
/// is fused afterwards; reaching the end of the buffer ends it with `None`.
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    buffer: &'a [u8],
    position: Position,
    emitted: usize,
    whitespace_skipped: usize,
    finished: bool,
}

impl<'a> Scanner<'a> {
    pub fn new(buffer: &'a [u8]) -> Self {
        Self {
            buffer,
            position: Position::start(),
            emitted: 0,
            whitespace_skipped: 0,
            finished: false,
        }
    }

    /// Position of the next unread byte
    pub fn position(&self) -> Position {
        self.position
    }

    pub fn whitespace_skipped(&self) -> usize {
        self.whitespace_skipped
    }

    fn fail(&mut self, error: LexerError) -> Option<Result<SpannedToken, LexerError>> {
        self.finished = true;
        Some(Err(error))
    }
}

impl Iterator for Scanner<'_> {
    type Item = Result<SpannedToken, LexerError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            let start = self.position;
            let step = next_token(self.buffer, start.offset);
            let covered = &self.buffer[start.offset..start.offset + step.consumed];

            match step.outcome {
                ScanOutcome::NoToken => {
                    self.whitespace_skipped += step.consumed;
                    self.position = start.advance_over(covered);
                }
                ScanOutcome::EndOfInput => {
                    self.finished = true;
                    return None;
                }
                ScanOutcome::IllegalCharacter(byte) => {
                    return self.fail(LexerError::IllegalCharacter {
                        byte,
                        line: start.line,
                        column: start.column,
                    });
                }
                ScanOutcome::Token(token) => {
                    if step.consumed > MAX_LEXEME_LENGTH {
                        return self.fail(LexerError::LexemeTooLong {
                            length: step.consumed,
                        });
                    }
                    if self.emitted >= MAX_TOKEN_COUNT {
                        return self.fail(LexerError::TooManyTokens {
                            count: self.emitted + 1,
                        });
                    }

                    let end = start.advance_over(covered);
                    self.position = end;
                    self.emitted += 1;
                    return Some(Ok(SpannedToken::new(token, Span::new(start, end))));
                }
            }
        }
    }
}

impl std::iter::FusedIterator for Scanner<'_> {}

/// How a scan ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Termination {
    EndOfInput,
    Failed(LexerError),
}

/// Tokens recognized before the scan stopped, plus the reason it stopped
#[derive(Debug, Clone, PartialEq)]
pub struct ScanReport {
    pub tokens: TokenStream,
    pub termination: Termination,
    /// Where scanning stopped: end of buffer, or the start of the failing lexeme
    pub stopped_at: Position,
}

impl ScanReport {
    pub fn is_success(&self) -> bool {
        self.termination == Termination::EndOfInput
    }

    pub fn error(&self) -> Option<&LexerError> {
        match &self.termination {
            Termination::Failed(error) => Some(error),
            Termination::EndOfInput => None,
        }
    }

    pub fn into_result(self) -> Result<TokenStream, LexerError> {
        match self.termination {
            Termination::EndOfInput => Ok(self.tokens),
            Termination::Failed(error) => Err(error),
        }
    }
}

pub struct LexicalAnalyzer {
    metrics: LexicalMetrics,
    preferences: LexicalPreferences,
}

impl LexicalAnalyzer {
    pub fn new() -> Self {
        Self {
            metrics: LexicalMetrics::default(),
            preferences: LexicalPreferences::default(),
        }
    }

    pub fn with_preferences(preferences: LexicalPreferences) -> Self {
        Self {
            metrics: LexicalMetrics::default(),
            preferences,
        }
    }

    /// Tokenize the whole buffer, discarding partial output on failure
    pub fn tokenize(&mut self, source: &[u8]) -> Result<TokenStream, LexerError> {
        self.scan(source).into_result()
    }

    /// Scan the buffer, keeping every token recognized before a failure
    pub fn scan(&mut self, source: &[u8]) -> ScanReport {
        self.metrics = LexicalMetrics::default();

        let mut scanner = Scanner::new(source);
        let mut tokens = Vec::new();

        let termination = loop {
            match scanner.next() {
                Some(Ok(token)) => {
                    self.metrics.record_token(&token.value, &self.preferences);
                    tokens.push(token);
                }
                Some(Err(error)) => break Termination::Failed(error),
                None => break Termination::EndOfInput,
            }
        };

        self.metrics.record_whitespace(scanner.whitespace_skipped());

        ScanReport {
            tokens: TokenStream::new(tokens),
            termination,
            stopped_at: scanner.position(),
        }
    }

    /// Scan a loaded file with file-aware logging
    pub fn scan_file_result(&mut self, file_result: &FileProcessingResult) -> ScanReport {
        let file_path = file_result.metadata.path.display().to_string();

        log_debug!("Starting lexical analysis",
            "file" => file_path.as_str(),
            "byte_count" => file_result.byte_count(),
            "line_count" => file_result.metadata.line_count,
            "max_tokens_allowed" => MAX_TOKEN_COUNT,
            "max_lexeme_length" => MAX_LEXEME_LENGTH
        );

        let report = self.scan(&file_result.source);

        match &report.termination {
            Termination::EndOfInput => {
                log_success!(
                    codes::success::TOKENIZATION_COMPLETE,
                    "Lexical analysis completed",
                    "file" => file_path.as_str(),
                    "tokens" => self.metrics.total_tokens,
                    "keywords" => self.metrics.keyword_tokens,
                    "identifiers" => self.metrics.identifier_tokens,
                    "numbers" => self.metrics.number_tokens,
                    "symbols" => self.metrics.symbol_tokens,
                    "whitespace_bytes" => self.metrics.whitespace_bytes_skipped
                );
            }
            Termination::Failed(error) => self.log_failure(error, &report, &file_path),
        }

        report
    }

    fn log_failure(&self, error: &LexerError, report: &ScanReport, file_path: &str) {
        if self.preferences.include_position_in_errors {
            log_error!(error.error_code(), &error.to_string(),
                span = Span::single(report.stopped_at),
                "file" => file_path,
                "tokens_before_error" => report.tokens.len()
            );
        } else {
            log_error!(error.error_code(), &error.to_string(),
                "file" => file_path,
                "tokens_before_error" => report.tokens.len()
            );
        }
    }

    pub fn metrics(&self) -> &LexicalMetrics {
        &self.metrics
    }
}

impl Default for LexicalAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::Keyword;
    use crate::tokens::token_stream::validation;
    use assert_matches::assert_matches;

    fn tokens_of(source: &str) -> Vec<Token> {
        LexicalAnalyzer::new()
            .tokenize(source.as_bytes())
            .unwrap()
            .into_iter()
            .map(|t| t.value)
            .collect()
    }

    #[test]
    fn test_sample_program() {
        assert_eq!(
            tokens_of("var x; begin x = 1 end."),
            vec![
                Token::keyword(Keyword::Var),
                Token::identifier("x"),
                Token::symbol(TokenCategory::Semicolon),
                Token::keyword(Keyword::Begin),
                Token::identifier("x"),
                Token::symbol(TokenCategory::Assign),
                Token::number("1"),
                Token::keyword(Keyword::End),
                Token::symbol(TokenCategory::Period),
            ]
        );
    }

    #[test]
    fn test_whitespace_transparency() {
        let plain = tokens_of("var x;begin x=1 end.");
        let spaced = tokens_of(" \t var\n\nx ;\r\n begin\x0Bx\x0C= 1   end .\n");
        assert_eq!(plain, spaced);
    }

    #[test]
    fn test_longest_match_and_keywords() {
        assert_eq!(
            tokens_of("var123 end"),
            vec![Token::identifier("var123"), Token::keyword(Keyword::End)]
        );
        assert_eq!(tokens_of("var9"), vec![Token::identifier("var9")]);
    }

    #[test]
    fn test_numbers() {
        assert_eq!(tokens_of("123"), vec![Token::number("123")]);
        assert_eq!(tokens_of("12.34"), vec![Token::number("12.34")]);
        assert_eq!(tokens_of("12."), vec![Token::number("12.")]);
    }

    #[test]
    fn test_symbols_in_order() {
        let stream = LexicalAnalyzer::new().tokenize(b",;=.+-*/()").unwrap();
        assert_eq!(
            stream.categories(),
            vec![
                TokenCategory::Comma,
                TokenCategory::Semicolon,
                TokenCategory::Assign,
                TokenCategory::Period,
                TokenCategory::Plus,
                TokenCategory::Minus,
                TokenCategory::Mul,
                TokenCategory::Div,
                TokenCategory::LParen,
                TokenCategory::RParen,
            ]
        );
    }

    #[test]
    fn test_illegal_character_alone() {
        let report = LexicalAnalyzer::new().scan(b"@");
        assert!(report.tokens.is_empty());
        assert_matches!(
            report.termination,
            Termination::Failed(LexerError::IllegalCharacter { byte: b'@', line: 1, column: 1 })
        );
        assert!(!report.is_success());
        assert_eq!(report.stopped_at.offset, 0);
    }

    #[test]
    fn test_partial_tokens_kept_on_failure() {
        let report = LexicalAnalyzer::new().scan(b"var x;\n  y @ z");
        assert_eq!(
            report.tokens.categories(),
            vec![
                TokenCategory::Keyword,
                TokenCategory::Identifier,
                TokenCategory::Semicolon,
                TokenCategory::Identifier,
            ]
        );
        assert_matches!(
            report.error(),
            Some(LexerError::IllegalCharacter { byte: b'@', line: 2, column: 5 })
        );
    }

    #[test]
    fn test_tokenize_discards_partial_output() {
        let err = LexicalAnalyzer::new().tokenize(b"x !").unwrap_err();
        assert_eq!(err.error_code().as_str(), "E020");
        assert!(codes::requires_halt(err.error_code().as_str()));
    }

    #[test]
    fn test_lexeme_limit() {
        let at_limit = "a".repeat(MAX_LEXEME_LENGTH);
        assert_eq!(tokens_of(&at_limit), vec![Token::identifier(at_limit.clone())]);

        let over = "a".repeat(MAX_LEXEME_LENGTH + 1);
        let err = LexicalAnalyzer::new().tokenize(over.as_bytes()).unwrap_err();
        assert_matches!(err, LexerError::LexemeTooLong { length } if length == MAX_LEXEME_LENGTH + 1);

        let long_number = "9".repeat(MAX_LEXEME_LENGTH + 1);
        let err = LexicalAnalyzer::new()
            .tokenize(long_number.as_bytes())
            .unwrap_err();
        assert_matches!(err, LexerError::LexemeTooLong { .. });
    }

    #[test]
    fn test_token_limit() {
        let source = vec![b';'; MAX_TOKEN_COUNT + 1];
        let report = LexicalAnalyzer::new().scan(&source);

        assert_matches!(
            report.termination,
            Termination::Failed(LexerError::TooManyTokens { count }) if count == MAX_TOKEN_COUNT + 1
        );
        assert_eq!(report.tokens.len(), MAX_TOKEN_COUNT);
        assert_eq!(report.stopped_at.offset, MAX_TOKEN_COUNT);
        assert_eq!(report.error().map(LexerError::error_code), Some(codes::lexical::TOO_MANY_TOKENS));
    }

    #[test]
    fn test_scanner_fuses_after_error() {
        let mut scanner = Scanner::new(b"a @ b");
        assert_matches!(scanner.next(), Some(Ok(_)));
        assert_matches!(scanner.next(), Some(Err(LexerError::IllegalCharacter { .. })));
        assert!(scanner.next().is_none());
        assert!(scanner.next().is_none());
        assert_eq!(scanner.position().offset, 2);
    }

    #[test]
    fn test_scanner_reaches_end() {
        let mut scanner = Scanner::new(b"a b  ");
        assert_eq!(scanner.by_ref().count(), 2);
        assert_eq!(scanner.whitespace_skipped(), 3);
        assert_eq!(scanner.position().offset, 5);
    }

    #[test]
    fn test_empty_buffer_ends_immediately() {
        let report = LexicalAnalyzer::new().scan(b"");
        assert!(report.is_success());
        assert!(report.tokens.is_empty());
    }

    #[test]
    fn test_spans_cover_lexemes() {
        let source = b"var  alpha;\nbegin alpha = 12.5 end.";
        let stream = LexicalAnalyzer::new().tokenize(source).unwrap();
        assert!(validation::validate_span_order(stream.tokens()).is_ok());
        assert!(validation::validate_against_source(stream.tokens(), source).is_ok());

        let begin = &stream.tokens()[3];
        assert_eq!(begin.span.start.line, 2);
        assert_eq!(begin.span.start.column, 1);
    }

    #[test]
    fn test_metrics() {
        let mut analyzer = LexicalAnalyzer::with_preferences(LexicalPreferences {
            track_category_histogram: true,
            include_position_in_errors: true,
        });
        analyzer.scan(b"var x; begin x = 10.25 end.");

        let metrics = analyzer.metrics();
        assert_eq!(metrics.total_tokens, 9);
        assert_eq!(metrics.keyword_tokens, 3);
        assert_eq!(metrics.identifier_tokens, 2);
        assert_eq!(metrics.number_tokens, 1);
        assert_eq!(metrics.symbol_tokens, 3);
        assert_eq!(metrics.whitespace_bytes_skipped, 6);
        assert_eq!(metrics.longest_lexeme, 5);
        assert_eq!(metrics.category_histogram.get(&TokenCategory::Keyword), Some(&3));
    }

    #[test]
    fn test_histogram_off_by_default() {
        let mut analyzer = LexicalAnalyzer::with_preferences(LexicalPreferences {
            track_category_histogram: false,
            include_position_in_errors: true,
        });
        analyzer.scan(b"a b c");
        assert!(analyzer.metrics().category_histogram.is_empty());
        assert_eq!(analyzer.metrics().identifier_tokens, 3);
    }

    #[test]
    fn test_metrics_reset_between_scans() {
        let mut analyzer = LexicalAnalyzer::new();
        analyzer.scan(b"a b c");
        analyzer.scan(b"d");
        assert_eq!(analyzer.metrics().total_tokens, 1);
    }
}
