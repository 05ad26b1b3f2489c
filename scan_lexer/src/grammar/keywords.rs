//! Reserved words of the language
//!
//! Matching is exact and case-sensitive: `VAR` and `Begin` are identifiers.
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Keyword {
    /// Opens the declaration section
    Var,
    /// Opens the statement block
    Begin,
    /// Closes the statement block
    End,
}

impl Keyword {
    pub const ALL: [Keyword; 3] = [Keyword::Var, Keyword::Begin, Keyword::End];

    /// Exact spelling as it appears in source
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Var => "var",
            Self::Begin => "begin",
            Self::End => "end",
        }
    }

    /// Lookup applied to a completed word
    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|keyword| keyword.as_str() == s)
    }
}

impl std::fmt::Display for Keyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
