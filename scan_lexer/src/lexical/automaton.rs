//! Deterministic finite automaton that recognizes one lexeme per call
//!
//! The automaton reads `buffer[cursor..]` and reports how many bytes it
//! consumed. It never mutates the buffer and keeps no state between calls;
//! the caller advances its cursor by `consumed`.

use super::classifier::{is_digit, is_letter, is_whitespace, is_word_continue};
use crate::tokens::{Token, TokenCategory};

/// Automaton states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum State {
    Start,
    /// Inside an identifier or keyword
    Word,
    /// Integer part of a numeral
    IntegerDigits,
    /// After the decimal point; zero digits are accepted
    FractionDigits,
    /// One-byte tokens, whitespace and end of input
    Symbol,
}

/// Result of one automaton run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    Token(Token),
    /// Whitespace was skipped; not terminal
    NoToken,
    /// Cursor is at the end of the buffer
    EndOfInput,
    /// The byte at the cursor cannot start any token
    IllegalCharacter(u8),
}

impl ScanOutcome {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::EndOfInput | Self::IllegalCharacter(_))
    }
}

/// Outcome plus the number of bytes it covered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub outcome: ScanOutcome,
    pub consumed: usize,
}

impl Step {
    fn new(outcome: ScanOutcome, consumed: usize) -> Self {
        Self { outcome, consumed }
    }
}

/// Recognize the next lexeme starting at `cursor`.
///
/// Words and numerals take the longest run available (`var1` is one
/// identifier). The byte that ends a word or numeral is left for the next call.
///
/// # Panics
///
/// In debug builds, if `cursor > buffer.len()`.
pub fn next_token(buffer: &[u8], cursor: usize) -> Step {
    debug_assert!(cursor <= buffer.len(), "cursor past end of buffer");

    let start = cursor;
    let mut offset = cursor;
    let mut state = State::Start;

    loop {
        let current = buffer.get(offset).copied();

        state = match state {
            State::Start => match current {
                Some(b) if is_letter(b) => {
                    offset += 1;
                    State::Word
                }
                Some(b) if is_digit(b) => {
                    offset += 1;
                    State::IntegerDigits
                }
                _ => State::Symbol,
            },

            State::Word => match current {
                Some(b) if is_word_continue(b) => {
                    offset += 1;
                    State::Word
                }
                _ => {
                    let word = String::from_utf8_lossy(&buffer[start..offset]);
                    let token = Token::from_word(&word);
                    return Step::new(ScanOutcome::Token(token), offset - start);
                }
            },

            State::IntegerDigits => match current {
                Some(b) if is_digit(b) => {
                    offset += 1;
                    State::IntegerDigits
                }
                Some(b'.') => {
                    offset += 1;
                    State::FractionDigits
                }
                _ => return close_number(buffer, start, offset),
            },

            State::FractionDigits => match current {
                Some(b) if is_digit(b) => {
                    offset += 1;
                    State::FractionDigits
                }
                _ => return close_number(buffer, start, offset),
            },

            State::Symbol => {
                return match current {
                    None => Step::new(ScanOutcome::EndOfInput, 0),
                    Some(b) if is_whitespace(b) => Step::new(ScanOutcome::NoToken, 1),
                    Some(b) => match TokenCategory::from_symbol(b) {
                        Some(category) => Step::new(ScanOutcome::Token(Token::symbol(category)), 1),
                        None => Step::new(ScanOutcome::IllegalCharacter(b), 0),
                    },
                };
            }
        };
    }
}

fn close_number(buffer: &[u8], start: usize, end: usize) -> Step {
    // Numerals are ASCII digits and '.', so the slice is valid UTF-8
    let text = String::from_utf8_lossy(&buffer[start..end]).into_owned();
    Step::new(ScanOutcome::Token(Token::number(text)), end - start)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::Keyword;
    use assert_matches::assert_matches;

    fn single(input: &[u8]) -> Step {
        next_token(input, 0)
    }

    #[test]
    fn test_word_becomes_identifier() {
        let step = single(b"abc");
        assert_eq!(step.outcome, ScanOutcome::Token(Token::identifier("abc")));
        assert_eq!(step.consumed, 3);
    }

    #[test]
    fn test_keyword_recognition() {
        assert_eq!(
            single(b"var").outcome,
            ScanOutcome::Token(Token::keyword(Keyword::Var))
        );
        assert_eq!(
            single(b"begin ").outcome,
            ScanOutcome::Token(Token::keyword(Keyword::Begin))
        );
    }

    #[test]
    fn test_longest_match_beats_keyword() {
        let step = single(b"var9");
        assert_eq!(step.outcome, ScanOutcome::Token(Token::identifier("var9")));
        assert_eq!(step.consumed, 4);
    }

    #[test]
    fn test_terminator_not_consumed() {
        let step = single(b"x;");
        assert_eq!(step.consumed, 1);
        let step = next_token(b"x;", 1);
        assert_eq!(
            step.outcome,
            ScanOutcome::Token(Token::symbol(TokenCategory::Semicolon))
        );
    }

    #[test]
    fn test_numbers() {
        for text in ["123", "12.34", "12.", "0", "007.5"] {
            let step = single(text.as_bytes());
            assert_eq!(step.outcome, ScanOutcome::Token(Token::number(text)));
            assert_eq!(step.consumed, text.len());
        }
    }

    #[test]
    fn test_second_period_ends_number() {
        let step = single(b"1.2.3");
        assert_eq!(step.outcome, ScanOutcome::Token(Token::number("1.2")));
        assert_eq!(step.consumed, 3);
        assert_eq!(
            next_token(b"1.2.3", 3).outcome,
            ScanOutcome::Token(Token::symbol(TokenCategory::Period))
        );
    }

    #[test]
    fn test_digit_then_letter_splits() {
        let step = single(b"12ab");
        assert_eq!(step.outcome, ScanOutcome::Token(Token::number("12")));
        assert_eq!(step.consumed, 2);
    }

    #[test]
    fn test_leading_period_is_symbol() {
        let step = single(b".5");
        assert_eq!(
            step.outcome,
            ScanOutcome::Token(Token::symbol(TokenCategory::Period))
        );
        assert_eq!(step.consumed, 1);
    }

    #[test]
    fn test_every_symbol() {
        for (i, &b) in b",;=.+-*/()".iter().enumerate() {
            let step = next_token(b",;=.+-*/()", i);
            let category = TokenCategory::from_symbol(b).unwrap();
            assert_eq!(step.outcome, ScanOutcome::Token(Token::symbol(category)));
            assert_eq!(step.consumed, 1);
        }
    }

    #[test]
    fn test_whitespace_is_no_token() {
        for b in [b' ', b'\t', b'\n', 0x0B, 0x0C, b'\r'] {
            let step = single(&[b]);
            assert_eq!(step.outcome, ScanOutcome::NoToken);
            assert_eq!(step.consumed, 1);
            assert!(!step.outcome.is_terminal());
        }
    }

    #[test]
    fn test_end_of_input() {
        let step = single(b"");
        assert_eq!(step.outcome, ScanOutcome::EndOfInput);
        assert_eq!(step.consumed, 0);
        assert_eq!(next_token(b"ab", 2).outcome, ScanOutcome::EndOfInput);
    }

    #[test]
    fn test_illegal_characters() {
        for b in [b'@', b'_', b'!', 0u8, 0xE9] {
            let step = single(&[b]);
            assert_matches!(step.outcome, ScanOutcome::IllegalCharacter(found) if found == b);
            assert_eq!(step.consumed, 0);
            assert!(step.outcome.is_terminal());
        }
    }

    #[test]
    fn test_word_stops_at_non_ascii() {
        let step = single("abé".as_bytes());
        assert_eq!(step.outcome, ScanOutcome::Token(Token::identifier("ab")));
        assert_matches!(
            next_token("abé".as_bytes(), 2).outcome,
            ScanOutcome::IllegalCharacter(0xC3)
        );
    }

    #[test]
    fn test_buffer_not_mutated() {
        let buffer = b"var x;".to_vec();
        let copy = buffer.clone();
        let mut cursor = 0;
        loop {
            let step = next_token(&buffer, cursor);
            if step.outcome.is_terminal() {
                break;
            }
            cursor += step.consumed;
        }
        assert_eq!(buffer, copy);
        assert_eq!(cursor, buffer.len());
    }
}
