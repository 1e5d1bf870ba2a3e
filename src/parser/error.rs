use crate::error::FilterError;

use super::raw::Rule;

/// Convert pest Rule enum to user-friendly names
fn rule_to_friendly_name(rule: &Rule) -> &'static str {
    match rule {
        Rule::program => "program",
        Rule::expr => "expression",
        Rule::infix => "connective (& or |)",
        Rule::and => "&",
        Rule::or => "|",
        Rule::primary => "clause or group",
        Rule::group => "parenthesized group",
        Rule::clause => "clause",
        Rule::clause_part => "clause",
        Rule::quoted_string => "quoted string",
        Rule::WHITESPACE => "whitespace",
        Rule::EOI => "end of input",
    }
}

/// Generate contextual help text based on error patterns
fn generate_help_text(positives: &[Rule], found_eoi: bool, found: Option<char>) -> Option<String> {
    if found == Some('"') {
        return Some("Quoted values need a closing '\"'".to_string());
    }

    if positives.is_empty() {
        return found_eoi.then(|| "Expression ended early. Check for a missing ')'.".to_string());
    }

    if (positives.contains(&Rule::clause) || positives.contains(&Rule::group)) && found_eoi {
        return Some("Expression is incomplete. Add a clause after the connective.".to_string());
    }

    if positives.contains(&Rule::clause) || positives.contains(&Rule::group) {
        return Some("Expected a clause like `age > 50` or a parenthesized group".to_string());
    }

    if positives.contains(&Rule::EOI) || positives.contains(&Rule::and) {
        return Some("Unexpected input. Check for unbalanced parentheses or quotes.".to_string());
    }

    found_eoi.then(|| "Expression ended early. Check for a missing ')'.".to_string())
}

impl FilterError {
    /// Create a syntax error from pest error with diagnostic information
    pub fn from_pest(pest_err: Box<pest::error::Error<Rule>>, src: String) -> Self {
        use pest::error::{ErrorVariant, InputLocation};

        // non-zero width so miette has something to point at
        let (span, pos) = match pest_err.location {
            InputLocation::Pos(pos) => {
                if pos >= src.len() && pos > 0 {
                    ((pos - 1, 1).into(), pos)
                } else if pos < src.len() {
                    ((pos, 1).into(), pos)
                } else {
                    ((0, 0).into(), pos)
                }
            }
            InputLocation::Span((start, end)) => {
                let width = end.saturating_sub(start).max(1);
                ((start, width).into(), start)
            }
        };

        let (line, col) = match pest_err.line_col {
            pest::error::LineColLocation::Pos((line, col)) => (line, col),
            pest::error::LineColLocation::Span((line, col), _) => (line, col),
        };

        let (expected_msg, help) = match &pest_err.variant {
            ErrorVariant::ParsingError {
                positives,
                negatives: _,
            } => {
                let found_eoi = pos >= src.len();
                let found = src.get(pos..).and_then(|rest| rest.chars().next());

                let expected_msg = if positives.is_empty() {
                    "Unexpected input".to_string()
                } else if positives.len() == 1 {
                    format!("Expected {}", rule_to_friendly_name(&positives[0]))
                } else {
                    let names: Vec<&str> = positives.iter().map(rule_to_friendly_name).collect();
                    if names.len() <= 3 {
                        format!("Expected one of: {}", names.join(", "))
                    } else {
                        format!("Expected one of: {}, ...", names[..3].join(", "))
                    }
                };

                let help = generate_help_text(positives, found_eoi, found);
                (expected_msg, help)
            }
            ErrorVariant::CustomError { message } => (message.clone(), None),
        };

        FilterError::Syntax {
            src,
            span,
            help,
            expected_msg,
            line,
            col,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_help_for_dangling_connective() {
        let help = generate_help_text(&[Rule::group, Rule::clause], true, None);
        assert!(help.unwrap().contains("incomplete"));
    }

    #[test]
    fn test_help_for_unterminated_quote() {
        let help = generate_help_text(&[Rule::EOI], false, Some('"'));
        assert!(help.unwrap().contains("closing"));
    }
}
