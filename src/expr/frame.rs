use super::FilterExpr;
use recursion::{Collapsible, MappableFrame, PartiallyApplied};

/// short-lived single layer of a filter expression, used for expressing
/// recursive algorithms over a single layer of a borrowed FilterExpr
pub enum ExprFrame<'a, X> {
    // borrowed clause text
    Clause(pest::Span<'a>),
    // boolean operators
    And(X, X),
    Or(X, X),
    // explicit parentheses
    Group(X),
}

impl<'a> MappableFrame for ExprFrame<'a, PartiallyApplied> {
    type Frame<X> = ExprFrame<'a, X>;

    fn map_frame<A, B>(input: Self::Frame<A>, mut f: impl FnMut(A) -> B) -> Self::Frame<B> {
        use ExprFrame::*;
        match input {
            Clause(span) => Clause(span),
            And(a, b) => And(f(a), f(b)),
            Or(a, b) => Or(f(a), f(b)),
            Group(a) => Group(f(a)),
        }
    }
}

impl<'a, 'b> Collapsible for &'b FilterExpr<'a> {
    type FrameToken = ExprFrame<'a, PartiallyApplied>;

    fn into_frame(self) -> ExprFrame<'a, Self> {
        match self {
            FilterExpr::Clause(span) => ExprFrame::Clause(*span),
            FilterExpr::And(a, b) => ExprFrame::And(a.as_ref(), b.as_ref()),
            FilterExpr::Or(a, b) => ExprFrame::Or(a.as_ref(), b.as_ref()),
            FilterExpr::Group(a) => ExprFrame::Group(a.as_ref()),
        }
    }
}
