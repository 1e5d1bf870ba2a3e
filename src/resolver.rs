pub mod placeholder;

use std::ops::Range;
use std::sync::OnceLock;

use regex::Regex;
use slog::{debug, o, Discard, Logger};

use crate::backend::Backend;
use crate::clause::{parse_clause, ParsedClause};
use crate::config::FilterConfig;
use crate::error::{check_parens, FilterError};
use crate::expr::Connective;
use crate::literal::Literal;
use crate::predicate::QBackend;

pub use self::placeholder::PlaceholderMap;

/// Translates filter strings into backend predicates.
///
/// A `Filter` is immutable once built; one instance can serve any number of
/// translations, including concurrently.
pub struct Filter<B: Backend = QBackend> {
    backend: B,
    config: FilterConfig,
    logger: Logger,
}

impl Filter<QBackend> {
    pub fn new(config: FilterConfig) -> Self {
        Self::with_backend(QBackend, config)
    }
}

impl Default for Filter<QBackend> {
    fn default() -> Self {
        Self::new(FilterConfig::default())
    }
}

impl<B: Backend> Filter<B> {
    pub fn with_backend(backend: B, config: FilterConfig) -> Self {
        Self {
            backend,
            config,
            logger: Logger::root(Discard, o!()),
        }
    }

    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = logger;
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub(crate) fn logger(&self) -> &Logger {
        &self.logger
    }

    /// Build the predicate for a single clause.
    ///
    /// Returns `None` for a placeholder name: the caller resolves those
    /// against its [`PlaceholderMap`] instead.
    pub fn build_predicate(&self, clause: &str) -> Option<B::Predicate> {
        if PlaceholderMap::<B::Predicate>::is_placeholder(clause) {
            return None;
        }

        Some(self.predicate_for(parse_clause(clause)))
    }

    pub(crate) fn predicate_for(&self, parsed: ParsedClause) -> B::Predicate {
        let kind = parsed.lookup.unwrap_or_default();
        let value = parsed.value.unwrap_or(Literal::Null);

        let key = self.field_key(&parsed.field, kind.lookup.as_str());
        let leaf = self.backend.leaf(key, value);

        if kind.negated {
            self.backend.not(leaf)
        } else {
            leaf
        }
    }

    fn field_key(&self, field: &str, lookup: &str) -> String {
        match &self.config.relation {
            Some(relation) => [relation.as_str(), field, lookup].join(B::PATH_SEPARATOR),
            None => [field, lookup].join(B::PATH_SEPARATOR),
        }
    }

    /// Fold a paren-free sequence of clauses left to right. `&` and `|` bind
    /// equally tightly: `a & b | c` is `(a & b) | c`.
    pub fn combine(
        &self,
        flat: &str,
        placeholders: &mut PlaceholderMap<B::Predicate>,
    ) -> Result<B::Predicate, FilterError> {
        let (clauses, connectives) = split_connectives(flat);
        debug!(self.logger, "combine"; "expr" => flat, "clauses" => clauses.len());

        let mut clauses = clauses.into_iter();
        let first = clauses
            .next()
            .ok_or_else(|| FilterError::internal("split always yields a clause"))?;
        let mut acc = self.resolve_clause(flat, first, placeholders)?;

        // zip stops at the shorter side if the two ever disagree
        for (connective, clause) in connectives.into_iter().zip(clauses) {
            let next = self.resolve_clause(flat, clause, placeholders)?;
            acc = match connective {
                Connective::And => self.backend.and(acc, next),
                Connective::Or => self.backend.or(acc, next),
            };
        }

        Ok(acc)
    }

    fn resolve_clause(
        &self,
        flat: &str,
        clause: Range<usize>,
        placeholders: &mut PlaceholderMap<B::Predicate>,
    ) -> Result<B::Predicate, FilterError> {
        let text = &flat[clause.clone()];
        if let Some(predicate) = self.build_predicate(text) {
            return Ok(predicate);
        }

        let name = text.trim();
        placeholders
            .take(name)
            .ok_or_else(|| FilterError::UnknownPlaceholder {
                name: name.to_string(),
                span: trimmed_span(flat, clause),
                src: flat.to_string(),
            })
    }

    /// Resolve a full filter expression.
    ///
    /// Each pass replaces every innermost `(...)` group with a placeholder
    /// bound to the group's combined predicate, until no parentheses remain.
    /// Parentheses are checked up front, so every pass consumes at least one
    /// pair and the loop always ends.
    pub fn resolve(&self, expr: &str) -> Result<B::Predicate, FilterError> {
        check_parens(expr)?;

        let mut working = expr.to_string();
        let mut placeholders = PlaceholderMap::new();

        for pass in 0usize.. {
            let groups: Vec<Range<usize>> =
                group_regex().find_iter(&working).map(|m| m.range()).collect();
            if groups.is_empty() {
                break;
            }
            debug!(self.logger, "resolution pass"; "pass" => pass, "groups" => groups.len(), "expr" => &working);

            let mut next = String::with_capacity(working.len());
            let mut cursor = 0;
            for group in groups {
                let content = working[group.clone()]
                    .trim_matches(|c: char| c == '(' || c == ')' || c.is_whitespace());
                let predicate = self.combine(content, &mut placeholders)?;
                let name = placeholders.bind(predicate);
                debug!(self.logger, "bound group"; "placeholder" => &name, "group" => content);

                next.push_str(&working[cursor..group.start]);
                next.push_str(&name);
                cursor = group.end;
            }
            next.push_str(&working[cursor..]);
            working = next;
        }

        if working.contains(['(', ')']) {
            return Err(FilterError::Internal {
                message: "parentheses left after resolution".to_string(),
                src: working,
            });
        }

        let predicate = self.combine(&working, &mut placeholders)?;
        debug!(self.logger, "resolved"; "expr" => expr, "unused_placeholders" => placeholders.len());
        Ok(predicate)
    }
}

/// Innermost group: a non-empty parenthesized span with no nested parens
fn group_regex() -> &'static Regex {
    static GROUP: OnceLock<Regex> = OnceLock::new();
    GROUP.get_or_init(|| Regex::new(r"\([^()]+\)").expect("static pattern"))
}

/// Split on `&`/`|`, returning the byte range of each clause and the
/// connectives between them in order.
fn split_connectives(flat: &str) -> (Vec<Range<usize>>, Vec<Connective>) {
    let mut clauses = Vec::new();
    let mut connectives = Vec::new();
    let mut start = 0;

    for (i, c) in flat.char_indices() {
        let connective = match c {
            '&' => Connective::And,
            '|' => Connective::Or,
            _ => continue,
        };
        clauses.push(start..i);
        connectives.push(connective);
        start = i + 1;
    }
    clauses.push(start..flat.len());

    (clauses, connectives)
}

fn trimmed_span(src: &str, range: Range<usize>) -> miette::SourceSpan {
    let text = &src[range.clone()];
    let leading = text.len() - text.trim_start().len();
    (range.start + leading, text.trim().len()).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_connectives() {
        let (clauses, connectives) = split_connectives("a==1 & b==2 | c");
        let texts: Vec<&str> = clauses
            .iter()
            .map(|r| &"a==1 & b==2 | c"[r.clone()])
            .collect();
        assert_eq!(texts, vec!["a==1 ", " b==2 ", " c"]);
        assert_eq!(connectives, vec![Connective::And, Connective::Or]);
    }

    #[test]
    fn test_split_without_connectives() {
        let (clauses, connectives) = split_connectives("");
        assert_eq!(clauses, vec![0..0]);
        assert!(connectives.is_empty());
    }

    #[test]
    fn test_trimmed_span() {
        let span = trimmed_span("a & #Q9 ", 3..8);
        assert_eq!(span.offset(), 4);
        assert_eq!(span.len(), 3);
    }
}
