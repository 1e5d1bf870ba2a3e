/// Operator table: symbolic comparison tokens and the lookup kinds they map to
use std::fmt::{self, Display};
use std::sync::OnceLock;

use itertools::Itertools;
use regex::Regex;

/// Backend-facing comparison semantics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lookup {
    Exact,
    IExact,
    Contains,
    IContains,
    Lt,
    Lte,
    Gt,
    Gte,
    StartsWith,
    IStartsWith,
    EndsWith,
    IEndsWith,
}

impl Lookup {
    pub fn as_str(&self) -> &'static str {
        match self {
            Lookup::Exact => "exact",
            Lookup::IExact => "iexact",
            Lookup::Contains => "contains",
            Lookup::IContains => "icontains",
            Lookup::Lt => "lt",
            Lookup::Lte => "lte",
            Lookup::Gt => "gt",
            Lookup::Gte => "gte",
            Lookup::StartsWith => "startswith",
            Lookup::IStartsWith => "istartswith",
            Lookup::EndsWith => "endswith",
            Lookup::IEndsWith => "iendswith",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let lookup = match name {
            "exact" => Lookup::Exact,
            "iexact" => Lookup::IExact,
            "contains" => Lookup::Contains,
            "icontains" => Lookup::IContains,
            "lt" => Lookup::Lt,
            "lte" => Lookup::Lte,
            "gt" => Lookup::Gt,
            "gte" => Lookup::Gte,
            "startswith" => Lookup::StartsWith,
            "istartswith" => Lookup::IStartsWith,
            "endswith" => Lookup::EndsWith,
            "iendswith" => Lookup::IEndsWith,
            _ => return None,
        };
        Some(lookup)
    }
}

impl Display for Lookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A lookup plus the negation marker. Displays as `!exact` when negated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LookupKind {
    pub lookup: Lookup,
    pub negated: bool,
}

impl LookupKind {
    pub const NEGATION_MARKER: char = '!';

    pub const fn new(lookup: Lookup) -> Self {
        Self {
            lookup,
            negated: false,
        }
    }

    pub const fn negated(lookup: Lookup) -> Self {
        Self {
            lookup,
            negated: true,
        }
    }

    /// Parse a lookup-kind name such as `icontains` or `!exact`
    pub fn from_name(name: &str) -> Option<Self> {
        match name.strip_prefix(Self::NEGATION_MARKER) {
            Some(rest) => Lookup::from_name(rest).map(Self::negated),
            None => Lookup::from_name(name).map(Self::new),
        }
    }
}

impl Default for LookupKind {
    fn default() -> Self {
        Self::new(Lookup::Exact)
    }
}

impl Display for LookupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negated {
            write!(f, "{}", Self::NEGATION_MARKER)?;
        }
        f.write_str(self.lookup.as_str())
    }
}

/// Symbolic comparison operators accepted in a clause
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    NotEquals,             // !=
    Equals,                // ==
    EqualsIgnoreCase,      // ~=
    NotContains,           // !@
    Contains,              // @@
    ContainsIgnoreCase,    // ~@
    LessOrEqual,           // <=
    GreaterOrEqual,        // >=
    StartsWith,            // =%
    StartsWithIgnoreCase,  // ~%
    EndsWith,              // %=
    EndsWithIgnoreCase,    // %~
    Less,                  // <
    Greater,               // >
}

impl Operator {
    /// Every operator, two-character tokens before the one-character ones
    /// they share a prefix with.
    pub const ALL: [Operator; 14] = [
        Operator::NotEquals,
        Operator::Equals,
        Operator::EqualsIgnoreCase,
        Operator::NotContains,
        Operator::Contains,
        Operator::ContainsIgnoreCase,
        Operator::LessOrEqual,
        Operator::GreaterOrEqual,
        Operator::StartsWith,
        Operator::StartsWithIgnoreCase,
        Operator::EndsWith,
        Operator::EndsWithIgnoreCase,
        Operator::Less,
        Operator::Greater,
    ];

    pub fn token(&self) -> &'static str {
        match self {
            Operator::NotEquals => "!=",
            Operator::Equals => "==",
            Operator::EqualsIgnoreCase => "~=",
            Operator::NotContains => "!@",
            Operator::Contains => "@@",
            Operator::ContainsIgnoreCase => "~@",
            Operator::LessOrEqual => "<=",
            Operator::GreaterOrEqual => ">=",
            Operator::StartsWith => "=%",
            Operator::StartsWithIgnoreCase => "~%",
            Operator::EndsWith => "%=",
            Operator::EndsWithIgnoreCase => "%~",
            Operator::Less => "<",
            Operator::Greater => ">",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.token() == token)
    }

    pub fn lookup_kind(&self) -> LookupKind {
        match self {
            Operator::NotEquals => LookupKind::negated(Lookup::Exact),
            Operator::Equals => LookupKind::new(Lookup::Exact),
            Operator::EqualsIgnoreCase => LookupKind::new(Lookup::IExact),
            Operator::NotContains => LookupKind::negated(Lookup::Contains),
            Operator::Contains => LookupKind::new(Lookup::Contains),
            Operator::ContainsIgnoreCase => LookupKind::new(Lookup::IContains),
            Operator::LessOrEqual => LookupKind::new(Lookup::Lte),
            Operator::GreaterOrEqual => LookupKind::new(Lookup::Gte),
            Operator::StartsWith => LookupKind::new(Lookup::StartsWith),
            Operator::StartsWithIgnoreCase => LookupKind::new(Lookup::IStartsWith),
            Operator::EndsWith => LookupKind::new(Lookup::EndsWith),
            Operator::EndsWithIgnoreCase => LookupKind::new(Lookup::IEndsWith),
            Operator::Less => LookupKind::new(Lookup::Lt),
            Operator::Greater => LookupKind::new(Lookup::Gt),
        }
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Single alternation over every operator token. Regex alternation is
/// leftmost-first, so listing `<=` before `<` makes the longer token win.
pub(crate) fn operator_regex() -> &'static Regex {
    static OPERATORS: OnceLock<Regex> = OnceLock::new();
    OPERATORS.get_or_init(|| {
        let alternation = Operator::ALL
            .iter()
            .map(|op| regex::escape(op.token()))
            .join("|");
        Regex::new(&alternation).expect("operator tokens are escaped literals")
    })
}
