//! Path tokens and tokenization

use std::fmt;

/// One segment of a traversal path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Plain key lookup. Resolves one child and continues.
    Key(String),
    /// `*` token. Branches over every key of the current node.
    Wildcard,
    /// `key[]` token. Resolves `key`, requires an array, and branches over
    /// its elements.
    Array(String),
}

impl Token {
    /// Classifies one dotted-path segment by its literal text.
    ///
    /// `*` is a wildcard, a `[]` suffix marks an array branch and anything
    /// else is a plain key. The empty string is a plain key too; it can
    /// only match an empty object key.
    pub fn classify(segment: &str) -> Token {
        if segment == "*" {
            Token::Wildcard
        } else if let Some(key) = segment.strip_suffix("[]") {
            Token::Array(key.to_string())
        } else {
            Token::Key(segment.to_string())
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Key(key) => f.write_str(key),
            Token::Wildcard => f.write_str("*"),
            Token::Array(key) => write!(f, "{key}[]"),
        }
    }
}

/// A parsed traversal path: tokens applied left to right.
///
/// Built from dotted strings (`"users.*.name"`), pre-split segment lists or
/// explicit [`Token`]s. Dotted strings cannot express keys that contain `.`;
/// pass those pre-split.
///
/// ```
/// use burrow::{Path, Token};
///
/// let path = Path::from("users.alice.cards[]");
/// assert_eq!(path.tokens.len(), 3);
/// assert_eq!(path.tokens[2], Token::Array("cards".into()));
/// assert_eq!(path.to_string(), "users.alice.cards[]");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Path {
    /// Ordered tokens, outermost first.
    pub tokens: Vec<Token>,
}

impl Path {
    /// Creates a path from explicit tokens.
    pub fn new(tokens: Vec<Token>) -> Self {
        Path { tokens }
    }

    /// Number of tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether the path has no tokens. An empty path resolves to the root.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, token) in self.tokens.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{token}")?;
        }
        Ok(())
    }
}

impl From<&str> for Path {
    fn from(s: &str) -> Self {
        Path {
            tokens: s.split('.').map(Token::classify).collect(),
        }
    }
}

impl From<String> for Path {
    fn from(s: String) -> Self {
        Path::from(s.as_str())
    }
}

impl From<&String> for Path {
    fn from(s: &String) -> Self {
        Path::from(s.as_str())
    }
}

impl From<Vec<Token>> for Path {
    fn from(tokens: Vec<Token>) -> Self {
        Path { tokens }
    }
}

impl From<Vec<String>> for Path {
    fn from(segments: Vec<String>) -> Self {
        Path {
            tokens: segments.iter().map(|s| Token::classify(s)).collect(),
        }
    }
}

impl From<Vec<&str>> for Path {
    fn from(segments: Vec<&str>) -> Self {
        Path {
            tokens: segments.into_iter().map(Token::classify).collect(),
        }
    }
}

impl From<&[&str]> for Path {
    fn from(segments: &[&str]) -> Self {
        Path {
            tokens: segments.iter().map(|s| Token::classify(s)).collect(),
        }
    }
}
