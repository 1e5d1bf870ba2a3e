use pest::{
    iterators::Pair,
    pratt_parser::{Assoc::*, Op, PrattParser},
    Parser,
};
use pest_derive::Parser;

use crate::error::FilterError;
use crate::expr::FilterExpr;

#[derive(Parser)]
#[grammar = "parser/grammar.pest"]
pub struct FilterParser;

impl FilterParser {
    /// Parse a filter expression into its AST
    pub fn parse_expr(input: &str) -> Result<FilterExpr<'_>, FilterError> {
        let mut pairs = Self::parse(Rule::program, input)
            .map_err(|e| FilterError::from_pest(Box::new(e), input.to_string()))?;

        let program_pair = pairs
            .next()
            .ok_or_else(|| FilterError::internal("Grammar guarantees program exists"))?;

        let expr_pair = program_pair
            .into_inner()
            .next()
            .ok_or_else(|| FilterError::internal("Grammar guarantees program contains expr"))?;

        Self::parse_infix_chain(expr_pair)
    }

    fn parse_infix_chain(pair: Pair<'_, Rule>) -> Result<FilterExpr<'_>, FilterError> {
        // a single level: no precedence between & and |
        let pratt = PrattParser::new().op(Op::infix(Rule::and, Left) | Op::infix(Rule::or, Left));

        pratt
            .map_primary(Self::parse_primary)
            .map_infix(Self::parse_infix)
            .parse(pair.into_inner())
    }

    fn parse_primary(pair: Pair<'_, Rule>) -> Result<FilterExpr<'_>, FilterError> {
        match pair.as_rule() {
            Rule::clause => Ok(FilterExpr::Clause(pair.as_span())),
            Rule::group => {
                let inner = pair
                    .into_inner()
                    .next()
                    .ok_or_else(|| FilterError::internal("Grammar guarantees group has expr"))?;
                Ok(FilterExpr::group(Self::parse_infix_chain(inner)?))
            }
            rule => Err(FilterError::internal(format!(
                "Unexpected primary rule: {:?}",
                rule
            ))),
        }
    }

    fn parse_infix<'a>(
        lhs: Result<FilterExpr<'a>, FilterError>,
        op: Pair<'a, Rule>,
        rhs: Result<FilterExpr<'a>, FilterError>,
    ) -> Result<FilterExpr<'a>, FilterError> {
        match op.as_rule() {
            Rule::and => Ok(FilterExpr::and(lhs?, rhs?)),
            Rule::or => Ok(FilterExpr::or(lhs?, rhs?)),
            rule => Err(FilterError::internal(format!(
                "Unexpected infix rule: {:?}",
                rule
            ))),
        }
    }
}
