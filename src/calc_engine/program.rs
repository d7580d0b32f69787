//! Line classification and sequential program evaluation.

use super::error::{CalcError, CalcResult};
use super::operators::is_reserved_word;
use super::rpn::{evaluate_traced, Environment, EvaluationTrace};
use super::to_rpn;
use super::value::Value;

/// A non-blank input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement<'a> {
    Assignment { name: &'a str, expr: &'a str },
    Expression(&'a str),
}

/// Result of evaluating one line.
#[derive(Debug, Clone, PartialEq)]
pub struct LineOutcome {
    /// Variable the value was bound to, for assignment lines.
    pub target: Option<String>,
    pub rpn: String,
    pub value: Value,
}

pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Splits an assignment on its first `=`. Blank lines yield `None`.
pub fn classify(line: &str) -> CalcResult<Option<Statement<'_>>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let Some((name, expr)) = line.split_once('=') else {
        return Ok(Some(Statement::Expression(line)));
    };
    let name = name.trim();
    if !is_identifier(name) || is_reserved_word(name) {
        return Err(CalcError::InvalidName(name.to_string()));
    }
    Ok(Some(Statement::Assignment { name, expr: expr.trim() }))
}

/// RPN form of a line without evaluating it. Assignments keep their
/// `name = ` prefix.
pub fn line_to_rpn(line: &str) -> CalcResult<Option<String>> {
    match classify(line)? {
        None => Ok(None),
        Some(Statement::Expression(expr)) => to_rpn(expr).map(Some),
        Some(Statement::Assignment { name, expr }) => {
            Ok(Some(format!("{} = {}", name, to_rpn(expr)?)))
        }
    }
}

/// Evaluates one line against `env`, binding the value on assignment.
/// The environment is untouched when the line fails.
pub fn run_line(
    line: &str,
    env: &mut Environment,
    trace: &mut EvaluationTrace,
) -> CalcResult<Option<LineOutcome>> {
    let Some(statement) = classify(line)? else {
        return Ok(None);
    };
    let (target, expr) = match statement {
        Statement::Assignment { name, expr } => (Some(name.to_string()), expr),
        Statement::Expression(expr) => (None, expr),
    };
    let rpn = to_rpn(expr)?;
    let value = evaluate_traced(&rpn, env, trace)?;
    if let Some(name) = &target {
        log::debug!("bind {} = {}", name, value);
        env.insert(name.clone(), value.clone());
    }
    Ok(Some(LineOutcome { target, rpn, value }))
}

/// Runs `lines` in order, threading `env` through them. Returns the value of
/// the last bare expression line, if any. Stops at the first failing line;
/// bindings made by earlier lines are kept.
pub fn run_program<I, S>(lines: I, env: &mut Environment) -> CalcResult<Option<Value>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut last = None;
    let mut trace = EvaluationTrace::new(false);
    for line in lines {
        if let Some(outcome) = run_line(line.as_ref(), env, &mut trace)? {
            if outcome.target.is_none() {
                last = Some(outcome.value);
            }
        }
    }
    Ok(last)
}

/// An environment that lives across interactive lines.
#[derive(Default)]
pub struct Session {
    env: Environment,
}

impl Session {
    pub fn new() -> Self {
        Session::default()
    }

    pub fn eval_line(&mut self, line: &str) -> CalcResult<Option<LineOutcome>> {
        run_line(line, &mut self.env, &mut EvaluationTrace::new(false))
    }

    pub fn eval_line_traced(
        &mut self,
        line: &str,
        trace: &mut EvaluationTrace,
    ) -> CalcResult<Option<LineOutcome>> {
        run_line(line, &mut self.env, trace)
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    /// Bindings sorted by name.
    pub fn variables(&self) -> Vec<(&str, &Value)> {
        let mut vars: Vec<(&str, &Value)> = self.env.iter().map(|(k, v)| (k.as_str(), v)).collect();
        vars.sort_by(|a, b| a.0.cmp(b.0));
        vars
    }

    pub fn clear_variables(&mut self) {
        self.env.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rpn_form_of_assignments_and_expressions() {
        assert_eq!(line_to_rpn("x = 1+2").unwrap(), Some("x = 1 2 +".to_string()));
        assert_eq!(line_to_rpn(" 3 * (4 - 1) ").unwrap(), Some("3 4 1 - *".to_string()));
        assert_eq!(line_to_rpn("a   b +").unwrap(), Some("a b +".to_string()));
        assert_eq!(line_to_rpn("  ").unwrap(), None);
        assert!(matches!(line_to_rpn("1x = 2"), Err(CalcError::InvalidName(_))));
    }
    use crate::calc_engine::error::ErrorKind;

    #[test]
    fn identifier_rules() {
        assert!(is_identifier("a"));
        assert!(is_identifier("_tmp2"));
        assert!(!is_identifier("1a"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("a-b"));
    }

    #[test]
    fn classify_splits_on_first_equals() {
        assert_eq!(classify("   ").unwrap(), None);
        assert_eq!(
            classify(" x = 1 2 + ").unwrap(),
            Some(Statement::Assignment { name: "x", expr: "1 2 +" })
        );
        assert_eq!(
            classify("y = a = b").unwrap(),
            Some(Statement::Assignment { name: "y", expr: "a = b" })
        );
        assert_eq!(classify("3 4 *").unwrap(), Some(Statement::Expression("3 4 *")));
        assert_eq!(classify("sqrt = 4").unwrap_err().kind(), ErrorKind::InvalidName);
    }

    #[test]
    fn program_threads_bindings_in_order() {
        let mut env = Environment::new();
        let last = run_program(["a = 4", "", "b = 5", "c = a b +", "c * 2"], &mut env).unwrap();
        assert_eq!(env.get("c"), Some(&Value::Scalar(9.0)));
        assert_eq!(last, Some(Value::Scalar(18.0)));
    }

    #[test]
    fn forward_references_fail() {
        let mut env = Environment::new();
        let err = run_program(["a = b 1 +", "b = 2"], &mut env).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UndefinedSymbol);
        assert!(env.is_empty());
    }

    #[test]
    fn failed_line_leaves_bindings_alone() {
        let mut session = Session::new();
        session.eval_line("x = 1").unwrap();
        assert!(session.eval_line("x = 1 0 //").is_err());
        assert!(session.eval_line("1a = 5").is_err());
        assert_eq!(session.variables(), vec![("x", &Value::Scalar(1.0))]);
    }

    #[test]
    fn session_reports_rpn_and_target() {
        let mut session = Session::new();
        let outcome = session.eval_line("r = (1 + 2) * 3").unwrap().unwrap();
        assert_eq!(outcome.target.as_deref(), Some("r"));
        assert_eq!(outcome.rpn, "1 2 + 3 *");
        assert_eq!(outcome.value, Value::Scalar(9.0));

        session.clear_variables();
        assert!(session.env().is_empty());
    }
}
