pub mod frame;

use std::fmt::{self, Display};

/// Boolean connective between two clauses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connective {
    And, // &
    Or,  // |
}

impl Connective {
    pub fn symbol(&self) -> char {
        match self {
            Connective::And => '&',
            Connective::Or => '|',
        }
    }
}

/// Parsed filter expression. Clauses borrow their text from the source.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterExpr<'a> {
    Clause(pest::Span<'a>),
    And(Box<Self>, Box<Self>),
    Or(Box<Self>, Box<Self>),
    Group(Box<Self>),
}

impl<'a> FilterExpr<'a> {
    pub fn and(a: Self, b: Self) -> Self {
        Self::And(Box::new(a), Box::new(b))
    }

    pub fn or(a: Self, b: Self) -> Self {
        Self::Or(Box::new(a), Box::new(b))
    }

    pub fn group(a: Self) -> Self {
        Self::Group(Box::new(a))
    }

    /// Clause text with surrounding whitespace removed
    pub fn clause_text(span: &pest::Span<'a>) -> &'a str {
        span.as_str().trim()
    }
}

// Connectives are rendered without implicit grouping, so the output reads
// back to the same tree: `a & b | c` is already `(a & b) | c`.
impl Display for FilterExpr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Clause(span) => write!(f, "{}", Self::clause_text(span)),
            Self::And(a, b) => write!(f, "{} {} {}", a, Connective::And.symbol(), b),
            Self::Or(a, b) => write!(f, "{} {} {}", a, Connective::Or.symbol(), b),
            Self::Group(a) => write!(f, "({})", a),
        }
    }
}
