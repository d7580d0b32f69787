//! Stack evaluator for RPN token streams.

use std::collections::HashMap;

use super::error::{CalcError, CalcResult};
use super::operators::{constant, BinaryOp, UnaryOp};
use super::value::Value;

pub type Environment = HashMap<String, Value>;

pub struct Step {
    pub operation: String,
    pub result: Value,
}

/// Collects one [`Step`] per operator application when detailed mode is on.
pub struct EvaluationTrace {
    pub steps: Vec<Step>,
    pub detailed_mode: bool,
}

impl EvaluationTrace {
    pub fn new(detailed_mode: bool) -> Self {
        EvaluationTrace {
            steps: Vec::new(),
            detailed_mode,
        }
    }

    pub fn add_step(&mut self, operation: String, result: &Value) {
        if self.detailed_mode {
            self.steps.push(Step {
                operation,
                result: result.clone(),
            });
        }
    }
}

/// Evaluates an RPN string against `env`.
pub fn evaluate(rpn: &str, env: &Environment) -> CalcResult<Value> {
    evaluate_traced(rpn, env, &mut EvaluationTrace::new(false))
}

pub fn evaluate_traced(
    rpn: &str,
    env: &Environment,
    trace: &mut EvaluationTrace,
) -> CalcResult<Value> {
    let mut stack: Vec<Value> = Vec::new();

    for token in rpn.split_whitespace() {
        if let Some(op) = BinaryOp::from_symbol(token) {
            let depth = stack.len();
            let (Some(b), Some(a)) = (stack.pop(), stack.pop()) else {
                return Err(CalcError::Arity {
                    op: token.to_string(),
                    needed: 2,
                    found: depth,
                });
            };
            let operation = if trace.detailed_mode {
                format!("{} {} {}", a, token, b)
            } else {
                String::new()
            };
            let result = Value::apply_binary(op, a, b)?;
            log::trace!("{} -> {}", token, result);
            trace.add_step(operation, &result);
            stack.push(result);
        } else if let Some(op) = UnaryOp::from_name(token) {
            let Some(a) = stack.pop() else {
                return Err(CalcError::Arity {
                    op: token.to_string(),
                    needed: 1,
                    found: 0,
                });
            };
            let operation = if trace.detailed_mode {
                format!("{} {}", token, a)
            } else {
                String::new()
            };
            let result = Value::apply_unary(op, a)?;
            log::trace!("{} -> {}", token, result);
            trace.add_step(operation, &result);
            stack.push(result);
        } else {
            stack.push(resolve_operand(token, env)?);
        }
    }

    match stack.len() {
        1 => Ok(stack.remove(0)),
        remaining => Err(CalcError::MalformedExpression { remaining }),
    }
}

/// Number literal, vector literal, bound variable or constant, in that order.
fn resolve_operand(token: &str, env: &Environment) -> CalcResult<Value> {
    if token.starts_with('[') {
        return Value::parse_vector(token);
    }
    let looks_numeric = token
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_digit() || matches!(c, '-' | '+' | '.'));
    if looks_numeric {
        if let Ok(x) = token.parse::<f64>() {
            return Ok(Value::Scalar(x));
        }
    }
    if let Some(value) = env.get(token) {
        return Ok(value.clone());
    }
    constant(token)
        .map(Value::Scalar)
        .ok_or_else(|| CalcError::UndefinedSymbol(token.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calc_engine::error::ErrorKind;

    fn eval(rpn: &str) -> CalcResult<Value> {
        evaluate(rpn, &Environment::new())
    }

    fn kind(rpn: &str) -> ErrorKind {
        eval(rpn).unwrap_err().kind()
    }

    #[test]
    fn pushes_signed_and_fractional_literals() {
        assert_eq!(eval("42").unwrap(), Value::Scalar(42.0));
        assert_eq!(eval("-13").unwrap(), Value::Scalar(-13.0));
        match eval("2.5 3.1 +").unwrap() {
            Value::Scalar(x) => assert!((x - 5.6).abs() < 1e-9),
            other => panic!("expected scalar, got {:?}", other),
        }
    }

    #[test]
    fn operand_order_is_reverse_pop_order() {
        assert_eq!(eval("69 27 -").unwrap(), Value::Scalar(42.0));
        assert_eq!(eval("-420 60 //").unwrap(), Value::Scalar(-7.0));
        assert_eq!(eval("3 6 3 * 1 4 - 2 ^ // +").unwrap(), Value::Scalar(5.0));
    }

    #[test]
    fn stack_depth_errors() {
        assert_eq!(kind("42 +"), ErrorKind::Arity);
        assert_eq!(kind("neg"), ErrorKind::Arity);
        assert_eq!(kind(""), ErrorKind::MalformedExpression);
        assert_eq!(kind("228 69 42 +"), ErrorKind::MalformedExpression);
    }

    #[test]
    fn resolves_variables_then_constants() {
        let mut env = Environment::new();
        env.insert("x".to_string(), Value::Scalar(4.0));
        env.insert("e".to_string(), Value::Scalar(1.0));
        assert_eq!(evaluate("x 2 ^", &env).unwrap(), Value::Scalar(16.0));
        assert_eq!(evaluate("e", &env).unwrap(), Value::Scalar(1.0));
        assert_eq!(evaluate("pi", &env).unwrap(), Value::Scalar(std::f64::consts::PI));
        assert_eq!(evaluate("y", &env).unwrap_err().kind(), ErrorKind::UndefinedSymbol);
        assert_eq!(evaluate("nan", &env).unwrap_err().kind(), ErrorKind::UndefinedSymbol);
    }

    #[test]
    fn malformed_vector_text_is_a_syntax_error() {
        assert_eq!(kind("[1,x]"), ErrorKind::Syntax);
        assert_eq!(kind("[1,"), ErrorKind::Syntax);
        assert_eq!(eval("[] neg").unwrap(), Value::Vector(vec![]));
    }

    #[test]
    fn trace_records_each_application() {
        let mut trace = EvaluationTrace::new(true);
        let result = evaluate_traced("3 4 + neg", &Environment::new(), &mut trace).unwrap();
        assert_eq!(result, Value::Scalar(-7.0));
        let ops: Vec<&str> = trace.steps.iter().map(|s| s.operation.as_str()).collect();
        assert_eq!(ops, vec!["3 + 4", "neg 7"]);

        let mut quiet = EvaluationTrace::new(false);
        evaluate_traced("3 4 +", &Environment::new(), &mut quiet).unwrap();
        assert!(quiet.steps.is_empty());
    }
}
