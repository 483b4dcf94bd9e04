use crate::types::{FunctionHeader, Statement};

/// The two-token assignment operator.
pub const ARROW: &str = "<-";

fn owned(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

/// Classify a line by its leading word(s). Indentation plays no part here.
///
/// Dispatch order is comment/blank, `function`, `return`, `print`, `x <- e`, and
/// everything else falls through as a bare expression statement.
pub fn classify(words: &[&str]) -> Statement {
    match words {
        [] => Statement::Skip,
        [first, ..] if first.starts_with('#') => Statement::Skip,
        ["function", rest @ ..] => {
            let (name, params) = match rest {
                [name, params @ ..] => (name.to_string(), owned(params)),
                [] => (String::new(), vec![]),
            };
            Statement::FunctionHeader(FunctionHeader { name, params })
        },
        ["return", expr @ ..] => Statement::Return(owned(expr)),
        ["print", expr @ ..] => Statement::Print(owned(expr)),
        [target, arrow, expr @ ..] if *arrow == ARROW && !expr.is_empty() =>
            Statement::Assignment(target.to_string(), owned(expr)),
        _ => Statement::GenericExpression(owned(words)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::StatementKind;

    fn kind(line: &str) -> StatementKind {
        let words: Vec<&str> = line.split_whitespace().collect();
        classify(&words).kind()
    }

    #[test]
    fn blanks_and_comments_skip() {
        assert_eq!(kind(""), StatementKind::Skip);
        assert_eq!(kind("# a comment"), StatementKind::Skip);
        assert_eq!(kind("#tight comment"), StatementKind::Skip);
    }

    #[test]
    fn hash_after_first_word_is_not_a_comment() {
        assert_eq!(kind("x <- 1 # trailing"), StatementKind::Assignment);
    }

    #[test]
    fn keywords_dispatch() {
        assert_eq!(kind("function f a b"), StatementKind::FunctionHeader);
        assert_eq!(kind("return a + b"), StatementKind::Return);
        assert_eq!(kind("print 3"), StatementKind::Print);
        assert_eq!(kind("x <- 3"), StatementKind::Assignment);
        assert_eq!(kind("f 1 2"), StatementKind::GenericExpression);
    }

    #[test]
    fn keyword_wins_over_arrow() {
        assert_eq!(kind("print <- 3"), StatementKind::Print);
    }

    #[test]
    fn arrow_needs_an_operand() {
        assert_eq!(kind("x <-"), StatementKind::GenericExpression);
    }

    #[test]
    fn header_fields() {
        let stmt = classify(&["function", "add", "a", "b"]);
        assert_eq!(stmt, Statement::FunctionHeader(FunctionHeader {
            name: "add".to_string(),
            params: vec!["a".to_string(), "b".to_string()],
        }));
    }

    #[test]
    fn bare_return_is_accepted() {
        assert_eq!(classify(&["return"]), Statement::Return(vec![]));
    }
}
