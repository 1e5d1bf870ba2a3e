use std::cmp::Ordering;

use serde_json::Value;
use slog::{debug, o, Logger};

use crate::backend::Backend;
use crate::literal::Literal;
use crate::operator::Lookup;
use crate::predicate::{QBackend, Q};

/// evaluate a predicate against one JSON record, logging the visit
pub fn eval(logger: &Logger, q: &Q, record: &Value) -> bool {
    let logger = logger.new(o!("record" => record.to_string()));
    debug!(logger, "visit record"; "expr" => %q);

    let result = q.matches(record);

    debug!(logger, "evaluation finished"; "result" => result);
    result
}

impl Q {
    /// Evaluate against a JSON record. `__` in a key walks nested objects
    /// (or array indices); the last segment names the lookup.
    pub fn matches(&self, record: &Value) -> bool {
        match self {
            Q::Leaf { key, value } => eval_leaf(key, value, record),
            Q::And(a, b) => a.matches(record) && b.matches(record),
            Q::Or(a, b) => a.matches(record) || b.matches(record),
            Q::Not(a) => !a.matches(record),
        }
    }
}

fn eval_leaf(key: &str, expected: &Literal, record: &Value) -> bool {
    let mut segments: Vec<&str> = key.split(QBackend::PATH_SEPARATOR).collect();

    let named = segments.last().and_then(|s| Lookup::from_name(s));
    let lookup = match named {
        Some(lookup) if segments.len() > 1 => {
            segments.pop();
            lookup
        }
        _ => Lookup::Exact,
    };

    let actual = segments
        .iter()
        .try_fold(record, |value, segment| field(value, segment));

    match actual {
        Some(actual) => compare(lookup, actual, expected),
        // missing fields only match `field == null`
        None => lookup == Lookup::Exact && expected.is_null(),
    }
}

fn field<'v>(value: &'v Value, segment: &str) -> Option<&'v Value> {
    match value {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    }
}

fn compare(lookup: Lookup, actual: &Value, expected: &Literal) -> bool {
    match lookup {
        Lookup::Exact => equals(actual, expected),
        Lookup::IExact => text_match(actual, expected, true, |a, e| a == e),
        Lookup::Contains => match actual {
            Value::Array(items) => items.iter().any(|item| equals(item, expected)),
            _ => text_match(actual, expected, false, |a, e| a.contains(e)),
        },
        Lookup::IContains => match actual {
            Value::Array(items) => items
                .iter()
                .any(|item| text_match(item, expected, true, |a, e| a == e)),
            _ => text_match(actual, expected, true, |a, e| a.contains(e)),
        },
        Lookup::StartsWith => text_match(actual, expected, false, |a, e| a.starts_with(e)),
        Lookup::IStartsWith => text_match(actual, expected, true, |a, e| a.starts_with(e)),
        Lookup::EndsWith => text_match(actual, expected, false, |a, e| a.ends_with(e)),
        Lookup::IEndsWith => text_match(actual, expected, true, |a, e| a.ends_with(e)),
        Lookup::Lt => ordering(actual, expected) == Some(Ordering::Less),
        Lookup::Lte => matches!(
            ordering(actual, expected),
            Some(Ordering::Less | Ordering::Equal)
        ),
        Lookup::Gt => ordering(actual, expected) == Some(Ordering::Greater),
        Lookup::Gte => matches!(
            ordering(actual, expected),
            Some(Ordering::Greater | Ordering::Equal)
        ),
    }
}

fn equals(actual: &Value, expected: &Literal) -> bool {
    match (actual, expected) {
        (Value::Null, Literal::Null) => true,
        (Value::Bool(a), Literal::Bool(e)) => a == e,
        (Value::String(a), Literal::Str(e)) => a == e,
        (Value::Number(a), e) => match (a.as_f64(), e.as_f64()) {
            (Some(a), Some(e)) => a == e,
            _ => false,
        },
        _ => false,
    }
}

/// string lookups compare the record's text against the literal's text
fn text_match(
    actual: &Value,
    expected: &Literal,
    ignore_case: bool,
    f: impl Fn(&str, &str) -> bool,
) -> bool {
    let Value::String(actual) = actual else {
        return false;
    };
    if expected.is_null() {
        return false;
    }
    let expected = expected.to_string();

    if ignore_case {
        f(&actual.to_lowercase(), &expected.to_lowercase())
    } else {
        f(actual, &expected)
    }
}

fn ordering(actual: &Value, expected: &Literal) -> Option<Ordering> {
    match (actual, expected) {
        (Value::Number(a), e) => a.as_f64()?.partial_cmp(&e.as_f64()?),
        (Value::String(a), Literal::Str(e)) => Some(a.as_str().cmp(e.as_str())),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_nested_path_and_array_index() {
        let record = json!({"properties": {"tags": ["red", "blue"]}});
        assert!(eval_leaf("properties__tags__1__exact", &"blue".into(), &record));
        assert!(eval_leaf("properties__tags__contains", &"red".into(), &record));
        assert!(!eval_leaf("properties__tags__contains", &"green".into(), &record));
    }

    #[test]
    fn test_missing_field_matches_only_null() {
        let record = json!({"a": 1});
        assert!(eval_leaf("b__exact", &Literal::Null, &record));
        assert!(!eval_leaf("b__exact", &Literal::Int(1), &record));
        assert!(!eval_leaf("b__lt", &Literal::Null, &record));
    }

    #[test]
    fn test_int_and_float_compare_numerically() {
        let record = json!({"age": 50});
        assert!(eval_leaf("age__exact", &Literal::Float(50.0), &record));
        assert!(eval_leaf("age__gte", &Literal::Int(50), &record));
        assert!(!eval_leaf("age__gt", &Literal::Int(50), &record));
    }
}
