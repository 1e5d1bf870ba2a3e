use qfilter::clause::{parse_clause, ParsedClause};
use qfilter::coerce;
use qfilter::operator::{Lookup, LookupKind, Operator};

fn comparison(field: &str, lookup: LookupKind, value: &str) -> ParsedClause {
    ParsedClause {
        field: field.to_string(),
        lookup: Some(lookup),
        value: Some(coerce(value)),
    }
}

#[test]
fn test_operator_table() {
    let table = vec![
        ("!=", LookupKind::negated(Lookup::Exact)),
        ("==", LookupKind::new(Lookup::Exact)),
        ("~=", LookupKind::new(Lookup::IExact)),
        ("!@", LookupKind::negated(Lookup::Contains)),
        ("@@", LookupKind::new(Lookup::Contains)),
        ("~@", LookupKind::new(Lookup::IContains)),
        ("<=", LookupKind::new(Lookup::Lte)),
        (">=", LookupKind::new(Lookup::Gte)),
        ("=%", LookupKind::new(Lookup::StartsWith)),
        ("~%", LookupKind::new(Lookup::IStartsWith)),
        ("%=", LookupKind::new(Lookup::EndsWith)),
        ("%~", LookupKind::new(Lookup::IEndsWith)),
        ("<", LookupKind::new(Lookup::Lt)),
        (">", LookupKind::new(Lookup::Gt)),
    ];
    assert_eq!(table.len(), Operator::ALL.len());

    for (token, lookup) in table {
        for value in ["50", "5.5", "jones", "\"quoted\"", "TRUE", "null"] {
            for clause in [
                format!("field{}{}", token, value),
                format!("field {} {}", token, value),
            ] {
                assert_eq!(
                    parse_clause(&clause),
                    comparison("field", lookup, value),
                    "Failed for: {}",
                    clause
                );
            }
        }
    }
}

#[test]
fn test_lookup_kind_names() {
    let names: Vec<String> = Operator::ALL
        .iter()
        .map(|op| op.lookup_kind().to_string())
        .collect();
    assert_eq!(
        names,
        vec![
            "!exact",
            "exact",
            "iexact",
            "!contains",
            "contains",
            "icontains",
            "lte",
            "gte",
            "startswith",
            "istartswith",
            "endswith",
            "iendswith",
            "lt",
            "gt",
        ]
    );
}

#[test]
fn test_bare_field() {
    let parsed = parse_clause("  active ");
    assert_eq!(
        parsed,
        ParsedClause {
            field: "active".to_string(),
            lookup: None,
            value: None,
        }
    );
}

#[test]
fn test_two_character_tokens_are_not_split() {
    let parsed = parse_clause("age<=50");
    assert_eq!(parsed.field, "age");
    assert_eq!(parsed.lookup, Some(LookupKind::new(Lookup::Lte)));
    assert_eq!(parsed.value, Some(coerce("50")));

    let parsed = parse_clause("age>=50");
    assert_eq!(parsed.lookup, Some(LookupKind::new(Lookup::Gte)));
    assert_eq!(parsed.value, Some(coerce("50")));
}

#[test]
fn test_single_equals_is_not_an_operator() {
    // `=` alone is not in the table, so this is a bare name
    let parsed = parse_clause("sex=m");
    assert!(!parsed.is_comparison());
    assert_eq!(parsed.field, "sex=m");
}

#[test]
fn test_more_than_one_operator_is_a_bare_name() {
    // Corrected behavior: any split other than 1 or 3 parts is malformed and
    // degrades to a name lookup on the whole trimmed clause.
    let test_cases = vec!["a == b == c", " x<1<2 ", "a != b @@ c"];

    for clause in test_cases {
        let parsed = parse_clause(clause);
        assert_eq!(
            parsed,
            ParsedClause {
                field: clause.trim().to_string(),
                lookup: None,
                value: None,
            },
            "Failed for: {}",
            clause
        );
    }
}

#[test]
fn test_empty_value() {
    let parsed = parse_clause("name ==");
    assert_eq!(parsed.field, "name");
    assert_eq!(parsed.value, Some(coerce("")));
}
