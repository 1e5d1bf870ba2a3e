use std::fmt::{self, Display};

use itertools::Itertools;

use crate::backend::Backend;
use crate::literal::Literal;

/// Lookup-style predicate tree keyed by `field__lookup` paths
#[derive(Debug, Clone, PartialEq)]
pub enum Q {
    Leaf { key: String, value: Literal },
    And(Box<Self>, Box<Self>),
    Or(Box<Self>, Box<Self>),
    Not(Box<Self>),
}

impl Q {
    pub fn leaf(key: impl Into<String>, value: impl Into<Literal>) -> Self {
        Self::Leaf {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn and(a: Self, b: Self) -> Self {
        Self::And(Box::new(a), Box::new(b))
    }

    pub fn or(a: Self, b: Self) -> Self {
        Self::Or(Box::new(a), Box::new(b))
    }

    pub fn negate(a: Self) -> Self {
        Self::Not(Box::new(a))
    }

    // flattens runs of the same connective for display, `(AND: a, b, c)`
    fn flatten<'a>(&'a self, and: bool, out: &mut Vec<&'a Q>) {
        match (self, and) {
            (Q::And(a, b), true) | (Q::Or(a, b), false) => {
                a.flatten(and, out);
                b.flatten(and, out);
            }
            _ => out.push(self),
        }
    }
}

impl Display for Q {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Q::Leaf { key, value } => write!(f, "{}={}", key, value),
            Q::And(_, _) | Q::Or(_, _) => {
                let and = matches!(self, Q::And(_, _));
                let mut children = Vec::new();
                self.flatten(and, &mut children);
                let connector = if and { "AND" } else { "OR" };
                write!(f, "({}: {})", connector, children.iter().join(", "))
            }
            Q::Not(x) => write!(f, "(NOT: {})", x),
        }
    }
}

/// Builds [`Q`] trees
#[derive(Debug, Clone, Copy, Default)]
pub struct QBackend;

impl Backend for QBackend {
    type Predicate = Q;

    const PATH_SEPARATOR: &'static str = "__";

    fn leaf(&self, key: String, value: Literal) -> Q {
        Q::Leaf { key, value }
    }

    fn and(&self, lhs: Q, rhs: Q) -> Q {
        Q::and(lhs, rhs)
    }

    fn or(&self, lhs: Q, rhs: Q) -> Q {
        Q::or(lhs, rhs)
    }

    fn not(&self, predicate: Q) -> Q {
        Q::negate(predicate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_flattens_same_connective() {
        let q = Q::or(
            Q::and(
                Q::and(Q::leaf("a__exact", 1), Q::leaf("b__exact", 2)),
                Q::leaf("c__exact", 3),
            ),
            Q::negate(Q::leaf("d__exact", "x")),
        );
        assert_eq!(
            q.to_string(),
            "(OR: (AND: a__exact=1, b__exact=2, c__exact=3), (NOT: d__exact=x))"
        );
    }
}
