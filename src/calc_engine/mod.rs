//! Expression core: tokenizer, shunting-yard converter, value model, RPN
//! evaluator and program runner.

pub mod error;
pub mod infix;
pub mod operators;
pub mod program;
pub mod rpn;
pub mod tokenizer;
pub mod value;

pub use error::{CalcError, CalcResult, ErrorKind};
pub use infix::infix_to_rpn;
pub use program::{line_to_rpn, run_line, run_program, LineOutcome, Session};
pub use rpn::{evaluate, evaluate_traced, Environment, EvaluationTrace, Step};
pub use value::Value;

/// True when the text contains any infix operator or parenthesis.
pub fn is_infix(expr: &str) -> bool {
    expr.contains(['+', '-', '*', '/', '^', '%', '(', ')'])
}

/// Collapses whitespace runs to single spaces and trims both ends.
pub fn normalize_postfix(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Routes `expr` through the shunting-yard converter when it looks infix,
/// otherwise treats it as RPN already.
pub fn to_rpn(expr: &str) -> CalcResult<String> {
    if is_infix(expr) {
        infix_to_rpn(expr)
    } else {
        Ok(normalize_postfix(expr))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infix_detection() {
        assert!(is_infix("3+4"));
        assert!(is_infix("(x)"));
        assert!(is_infix("7 2 //"));
        assert!(!is_infix("3 4 angle"));
        assert!(!is_infix("[1,2] abs"));
    }

    #[test]
    fn normalize_collapses_whitespace() {
        assert_eq!(normalize_postfix("  228  192     + "), "228 192 +");
        assert_eq!(normalize_postfix("\t1\n2 "), "1 2");
        assert_eq!(normalize_postfix(""), "");
    }

    #[test]
    fn dispatch() {
        assert_eq!(to_rpn("1 +2").unwrap(), "1 2 +");
        assert_eq!(to_rpn(" a   b  angle").unwrap(), "a b angle");
    }
}
