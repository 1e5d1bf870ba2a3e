use recursion::CollapsibleExt;
use slog::debug;

use crate::backend::Backend;
use crate::clause::parse_quoted_clause;
use crate::error::FilterError;
use crate::expr::frame::ExprFrame;
use crate::expr::FilterExpr;
use crate::resolver::{Filter, PlaceholderMap};

use super::raw::FilterParser;

impl<B: Backend> Filter<B> {
    /// Parse `expr` with the strict grammar and build its predicate.
    ///
    /// Unlike [`Filter::resolve`], malformed input is a syntax error. Quoted
    /// values may contain connectives and parentheses.
    pub fn parse(&self, expr: &str) -> Result<B::Predicate, FilterError> {
        let ast = FilterParser::parse_expr(expr)?;
        debug!(self.logger(), "parsed"; "expr" => expr, "ast" => %ast);
        self.lower(&ast, expr)
    }

    /// Build the predicate for an already parsed expression, bottom-up
    pub fn lower(&self, ast: &FilterExpr<'_>, src: &str) -> Result<B::Predicate, FilterError> {
        let backend = self.backend();

        ast.collapse_frames(|frame| match frame {
            ExprFrame::Clause(span) => {
                if PlaceholderMap::<B::Predicate>::is_placeholder(span.as_str()) {
                    return Err(FilterError::UnknownPlaceholder {
                        name: FilterExpr::clause_text(&span).to_string(),
                        span: (span.start(), span.as_str().trim_end().len()).into(),
                        src: src.to_string(),
                    });
                }
                Ok(self.predicate_for(parse_quoted_clause(span.as_str())))
            }
            ExprFrame::And(a, b) => Ok(backend.and(a?, b?)),
            ExprFrame::Or(a, b) => Ok(backend.or(a?, b?)),
            ExprFrame::Group(a) => a,
        })
    }
}
