use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

/// Errors raised while translating a filter expression
#[allow(dead_code)] // Fields are used by miette's derive macros
#[derive(Debug, Clone, Diagnostic, Error)]
pub enum FilterError {
    // Syntax errors from pest (strict front end only)
    #[error("Syntax error at line {line}, column {col}")]
    #[diagnostic(code(qfilter::syntax))]
    Syntax {
        #[source_code]
        src: String,
        #[label("{expected_msg}")]
        span: SourceSpan,
        #[help]
        help: Option<String>,
        expected_msg: String,
        line: usize,
        col: usize,
    },

    #[error("Unbalanced parenthesis")]
    #[diagnostic(
        code(qfilter::unbalanced_paren),
        help("Every '(' needs a matching ')'")
    )]
    UnbalancedParen {
        paren: char,
        #[label("unmatched '{paren}'")]
        span: SourceSpan,
        #[source_code]
        src: String,
    },

    #[error("Empty group")]
    #[diagnostic(
        code(qfilter::empty_group),
        help("Put a clause inside the parentheses or remove them")
    )]
    EmptyGroup {
        #[label("nothing to group")]
        span: SourceSpan,
        #[source_code]
        src: String,
    },

    #[error("Unknown placeholder: {name}")]
    #[diagnostic(
        code(qfilter::unknown_placeholder),
        help("Names starting with '#Q' and a digit are reserved for resolved groups")
    )]
    UnknownPlaceholder {
        name: String,
        #[label("not bound by any group")]
        span: SourceSpan,
        #[source_code]
        src: String,
    },

    #[error("Internal resolver error: {message}")]
    #[diagnostic(code(qfilter::internal))]
    Internal {
        message: String,
        #[source_code]
        src: String,
    },
}

impl FilterError {
    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        FilterError::Internal {
            message: msg.into(),
            src: String::new(),
        }
    }
}

/// Locate the first unmatched or empty parenthesis pair in `src`.
///
/// The textual resolver only consumes well-formed, non-empty `(...)` spans,
/// so anything this rejects would otherwise never be resolved.
pub fn check_parens(src: &str) -> Result<(), FilterError> {
    let mut open: Vec<usize> = Vec::new();

    for (i, c) in src.char_indices() {
        match c {
            '(' => open.push(i),
            ')' => match open.pop() {
                Some(start) if src[start + 1..i].trim().is_empty() => {
                    return Err(FilterError::EmptyGroup {
                        span: (start, i + 1 - start).into(),
                        src: src.to_string(),
                    })
                }
                Some(_) => {}
                None => {
                    return Err(FilterError::UnbalancedParen {
                        paren: ')',
                        span: (i, 1).into(),
                        src: src.to_string(),
                    })
                }
            },
            _ => {}
        }
    }

    match open.pop() {
        Some(start) => Err(FilterError::UnbalancedParen {
            paren: '(',
            span: (start, 1).into(),
            src: src.to_string(),
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_balanced() {
        assert!(check_parens("(a==1 & (b==2)) | c==3").is_ok());
        assert!(check_parens("a==1").is_ok());
    }

    #[test]
    fn test_unmatched_close() {
        let err = check_parens("a==1) | b==2").unwrap_err();
        assert!(matches!(err, FilterError::UnbalancedParen { paren: ')', span, .. } if span.offset() == 4));
    }

    #[test]
    fn test_unmatched_open() {
        let err = check_parens("((a==1)").unwrap_err();
        assert!(matches!(err, FilterError::UnbalancedParen { paren: '(', span, .. } if span.offset() == 0));
    }

    #[test]
    fn test_empty_group() {
        let err = check_parens("a==1 & ()").unwrap_err();
        assert!(matches!(err, FilterError::EmptyGroup { span, .. } if span.offset() == 7));
    }

    #[test]
    fn test_whitespace_only_group_is_empty() {
        let err = check_parens("a==1 & ( \t)").unwrap_err();
        assert!(matches!(
            err,
            FilterError::EmptyGroup { span, .. } if span.offset() == 7 && span.len() == 4
        ));
    }
}
