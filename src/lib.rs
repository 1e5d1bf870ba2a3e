//! Translate compact filter strings such as `(last==jones & first==joe) | age>50`
//! into composable lookup predicates.
//!
//! Two front ends share the same clause handling:
//! - [`Filter::resolve`] rewrites parenthesized groups into placeholders until
//!   the expression is flat, and is permissive about malformed clauses
//! - [`Filter::parse`] parses with a pest grammar and reports syntax errors

pub mod backend;
pub mod clause;
pub mod config;
pub mod error;
#[cfg(feature = "records")]
pub mod eval;
pub mod expr;
pub mod literal;
pub mod operator;
pub mod parser;
pub mod predicate;
pub mod resolver;

pub use backend::Backend;
pub use config::FilterConfig;
pub use error::FilterError;
pub use literal::{coerce, Literal};
pub use predicate::{QBackend, Q};
pub use resolver::{Filter, PlaceholderMap};

/// Resolve `expr` into a [`Q`] with no relation prefix
pub fn resolve(expr: &str) -> Result<Q, FilterError> {
    Filter::default().resolve(expr)
}

/// Resolve `expr` into a [`Q`] with every key namespaced under `relation`
pub fn resolve_with_relation(relation: &str, expr: &str) -> Result<Q, FilterError> {
    Filter::new(FilterConfig::with_relation(relation)).resolve(expr)
}
