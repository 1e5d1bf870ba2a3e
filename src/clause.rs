use std::ops::Range;

use regex::Match;

use crate::literal::{coerce, Literal};
use crate::operator::{operator_regex, LookupKind, Operator};

/// A single comparison clause split into its parts.
///
/// `lookup` and `value` are both absent when the clause holds no operator, or
/// more than one. Such a clause is a bare name and is resolved as a
/// placeholder or name lookup rather than a comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedClause {
    pub field: String,
    pub lookup: Option<LookupKind>,
    pub value: Option<Literal>,
}

impl ParsedClause {
    fn bare(field: &str) -> Self {
        Self {
            field: field.trim().to_string(),
            lookup: None,
            value: None,
        }
    }

    pub fn is_comparison(&self) -> bool {
        self.lookup.is_some()
    }
}

/// Split `field OP value` (or a bare `field`) on the operator table.
pub fn parse_clause(clause: &str) -> ParsedClause {
    split_on(clause, operator_regex().find_iter(clause))
}

/// Like [`parse_clause`], but operator tokens inside `"..."` belong to the
/// value: `note == "a<b"` compares `note` against `a<b`.
pub fn parse_quoted_clause(clause: &str) -> ParsedClause {
    let quoted = quoted_spans(clause);
    let ops = operator_regex()
        .find_iter(clause)
        .filter(|op| !quoted.iter().any(|span| span.contains(&op.start())));

    split_on(clause, ops)
}

fn split_on<'c>(clause: &'c str, mut ops: impl Iterator<Item = Match<'c>>) -> ParsedClause {
    let Some(op) = ops.next() else {
        return ParsedClause::bare(clause);
    };

    // split into more than three parts: give up on it as a comparison
    if ops.next().is_some() {
        return ParsedClause::bare(clause);
    }

    let field = clause[..op.start()].trim();
    let value = clause[op.end()..].trim();

    // the regex only matches table tokens
    let lookup = Operator::from_token(op.as_str()).map(|op| op.lookup_kind());

    ParsedClause {
        field: field.to_string(),
        lookup,
        value: Some(coerce(value)),
    }
}

/// Byte ranges of `"..."` runs, quotes included. An unterminated quote runs
/// to the end of the clause.
fn quoted_spans(clause: &str) -> Vec<Range<usize>> {
    let mut spans = Vec::new();
    let mut open = None;

    for (i, c) in clause.char_indices() {
        if c != '"' {
            continue;
        }
        match open.take() {
            Some(start) => spans.push(start..i + 1),
            None => open = Some(i),
        }
    }

    if let Some(start) = open {
        spans.push(start..clause.len());
    }
    spans
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operator::Lookup;

    #[test]
    fn test_trims_segments() {
        let parsed = parse_clause("  last  ==  jones ");
        assert_eq!(parsed.field, "last");
        assert_eq!(parsed.lookup, Some(LookupKind::new(Lookup::Exact)));
        assert_eq!(parsed.value, Some(Literal::from("jones")));
    }

    #[test]
    fn test_two_operators_is_bare() {
        let parsed = parse_clause("a == b == c");
        assert!(!parsed.is_comparison());
        assert_eq!(parsed.field, "a == b == c");
        assert_eq!(parsed.value, None);
    }

    #[test]
    fn test_quoted_operators_stay_in_value() {
        let parsed = parse_quoted_clause("note == \"a<b == c\"");
        assert_eq!(parsed.field, "note");
        assert_eq!(parsed.lookup, Some(LookupKind::new(Lookup::Exact)));
        assert_eq!(parsed.value, Some(Literal::from("a<b == c")));

        // the permissive split still sees every token
        assert!(!parse_clause("note == \"a<b\"").is_comparison());
    }

    #[test]
    fn test_quoted_spans() {
        assert_eq!(quoted_spans(r#"a == "x" | "y"#), vec![5..8, 11..13]);
        assert!(quoted_spans("a == 1").is_empty());
    }
}
