use std::fmt::{self, Display};

/// Typed value on the right-hand side of a comparison clause
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl Literal {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Literal::Int(i) => Some(*i as f64),
            Literal::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Literal::Null)
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Str(s) => write!(f, "{}", s),
            Literal::Int(i) => write!(f, "{}", i),
            Literal::Float(x) => write!(f, "{:?}", x),
            Literal::Bool(b) => write!(f, "{}", b),
            Literal::Null => write!(f, "null"),
        }
    }
}

impl From<&str> for Literal {
    fn from(s: &str) -> Self {
        Literal::Str(s.to_string())
    }
}

impl From<i64> for Literal {
    fn from(i: i64) -> Self {
        Literal::Int(i)
    }
}

impl From<f64> for Literal {
    fn from(x: f64) -> Self {
        Literal::Float(x)
    }
}

impl From<bool> for Literal {
    fn from(b: bool) -> Self {
        Literal::Bool(b)
    }
}

/// Convert a raw value token into a typed literal.
///
/// Never fails: anything that is not quoted, numeric, boolean or null falls
/// through to a bare string. Integers are tried before floats so that `50`
/// stays an `Int`.
pub fn coerce(raw: &str) -> Literal {
    if let Some(inner) = strip_quotes(raw) {
        return Literal::Str(inner.to_string());
    }

    if let Ok(i) = raw.parse::<i64>() {
        return Literal::Int(i);
    }

    if let Ok(x) = raw.parse::<f64>() {
        return Literal::Float(x);
    }

    if raw.eq_ignore_ascii_case("true") {
        return Literal::Bool(true);
    }
    if raw.eq_ignore_ascii_case("false") {
        return Literal::Bool(false);
    }

    if raw.eq_ignore_ascii_case("null") {
        return Literal::Null;
    }

    Literal::Str(raw.to_string())
}

// a lone `"` is not a quoted empty string
fn strip_quotes(raw: &str) -> Option<&str> {
    if raw.len() >= 2 {
        raw.strip_prefix('"')?.strip_suffix('"')
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_quotes() {
        assert_eq!(strip_quotes("\"abc\""), Some("abc"));
        assert_eq!(strip_quotes("\"\""), Some(""));
        assert_eq!(strip_quotes("\""), None);
        assert_eq!(strip_quotes("abc\""), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Literal::Float(5.0).to_string(), "5.0");
        assert_eq!(Literal::Null.to_string(), "null");
        assert_eq!(Literal::from("jones").to_string(), "jones");
    }
}
