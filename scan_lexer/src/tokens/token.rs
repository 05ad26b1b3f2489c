//! Token categories and the token value produced by the automaton
use crate::grammar::keywords::Keyword;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of token kinds. Whitespace never becomes a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TokenCategory {
    Keyword,
    Comma,
    Semicolon,
    Assign,
    Period,
    Number,
    Plus,
    Minus,
    Mul,
    Div,
    LParen,
    RParen,
    Identifier,
}

impl TokenCategory {
    pub const ALL: [TokenCategory; 13] = [
        Self::Keyword,
        Self::Comma,
        Self::Semicolon,
        Self::Assign,
        Self::Period,
        Self::Number,
        Self::Plus,
        Self::Minus,
        Self::Mul,
        Self::Div,
        Self::LParen,
        Self::RParen,
        Self::Identifier,
    ];

    /// Label used in the token report
    pub const fn report_name(self) -> &'static str {
        match self {
            Self::Keyword => "KEYWORD",
            Self::Comma => "COMMA",
            Self::Semicolon => "SEMICOLON",
            Self::Assign => "ASSIGN",
            Self::Period => "PERIOD",
            Self::Number => "NUM",
            Self::Plus => "PLUS",
            Self::Minus => "MINUS",
            Self::Mul => "MUL",
            Self::Div => "DIV",
            Self::LParen => "LBRACE",
            Self::RParen => "RBRACE",
            Self::Identifier => "ID",
        }
    }

    /// Source spelling of a symbol category
    pub const fn symbol_text(self) -> Option<&'static str> {
        match self {
            Self::Comma => Some(","),
            Self::Semicolon => Some(";"),
            Self::Assign => Some("="),
            Self::Period => Some("."),
            Self::Plus => Some("+"),
            Self::Minus => Some("-"),
            Self::Mul => Some("*"),
            Self::Div => Some("/"),
            Self::LParen => Some("("),
            Self::RParen => Some(")"),
            Self::Keyword | Self::Number | Self::Identifier => None,
        }
    }

    /// The single source byte of a symbol category
    pub const fn symbol(self) -> Option<u8> {
        match self.symbol_text() {
            Some(text) => Some(text.as_bytes()[0]),
            None => None,
        }
    }

    /// Inverse of [`TokenCategory::symbol`]
    pub fn from_symbol(byte: u8) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|category| category.symbol() == Some(byte))
    }

    /// Whether tokens of this category carry their own text
    pub const fn has_value(self) -> bool {
        matches!(self, Self::Keyword | Self::Number | Self::Identifier)
    }

    pub const fn is_symbol(self) -> bool {
        !self.has_value()
    }
}

impl fmt::Display for TokenCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.report_name())
    }
}

/// A recognized token. `text` is present exactly when the category has a value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    pub category: TokenCategory,
    pub text: Option<String>,
}

impl Token {
    pub fn keyword(keyword: Keyword) -> Self {
        Self {
            category: TokenCategory::Keyword,
            text: Some(keyword.as_str().to_string()),
        }
    }

    pub fn identifier(name: impl Into<String>) -> Self {
        Self {
            category: TokenCategory::Identifier,
            text: Some(name.into()),
        }
    }

    pub fn number(text: impl Into<String>) -> Self {
        Self {
            category: TokenCategory::Number,
            text: Some(text.into()),
        }
    }

    /// Token for a symbol category; valued categories get no text
    pub fn symbol(category: TokenCategory) -> Self {
        debug_assert!(category.is_symbol(), "{category:?} carries a value");
        Self {
            category,
            text: None,
        }
    }

    /// Classify a completed word: keyword when reserved, identifier otherwise
    pub fn from_word(word: &str) -> Self {
        match Keyword::from_str(word) {
            Some(keyword) => Self::keyword(keyword),
            None => Self::identifier(word),
        }
    }

    /// Source text of the token, stored or implied by the symbol
    pub fn lexeme(&self) -> &str {
        self.text
            .as_deref()
            .or(self.category.symbol_text())
            .unwrap_or_default()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.text {
            Some(text) => write!(f, "{}({})", self.category, text),
            None => write!(f, "{}", self.category),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_names() {
        let names: Vec<_> = TokenCategory::ALL.iter().map(|c| c.report_name()).collect();
        assert_eq!(
            names,
            [
                "KEYWORD",
                "COMMA",
                "SEMICOLON",
                "ASSIGN",
                "PERIOD",
                "NUM",
                "PLUS",
                "MINUS",
                "MUL",
                "DIV",
                "LBRACE",
                "RBRACE",
                "ID"
            ]
        );
    }

    #[test]
    fn test_symbol_mapping_is_inverse() {
        for category in TokenCategory::ALL {
            match category.symbol() {
                Some(byte) => assert_eq!(TokenCategory::from_symbol(byte), Some(category)),
                None => assert!(category.has_value()),
            }
        }
        assert_eq!(TokenCategory::from_symbol(b'@'), None);
    }

    #[test]
    fn test_lexeme_for_symbols_and_values() {
        assert_eq!(Token::symbol(TokenCategory::LParen).lexeme(), "(");
        for category in TokenCategory::ALL.into_iter().filter(|c| c.is_symbol()) {
            let lexeme = Token::symbol(category).lexeme().as_bytes().to_vec();
            assert_eq!(lexeme, vec![category.symbol().unwrap()]);
        }
        assert_eq!(Token::number("12.34").lexeme(), "12.34");
        assert_eq!(Token::from_word("x1").lexeme(), "x1");
    }

    #[test]
    fn test_from_word_classification() {
        assert_eq!(Token::from_word("begin"), Token::keyword(Keyword::Begin));
        assert_eq!(Token::from_word("var9"), Token::identifier("var9"));
        assert_eq!(Token::from_word("end"), Token::keyword(Keyword::End));
        assert_eq!(Token::from_word("End"), Token::identifier("End"));
    }

    #[test]
    fn test_display() {
        assert_eq!(Token::identifier("x").to_string(), "ID(x)");
        assert_eq!(Token::symbol(TokenCategory::Semicolon).to_string(), "SEMICOLON");
    }
}
