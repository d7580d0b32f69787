//! Infix to RPN conversion (shunting-yard).

use super::error::{CalcError, CalcResult};
use super::operators::{Assoc, BinaryOp, UnaryOp, UNARY_PRECEDENCE};
use super::tokenizer::{tokenize, Token};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Pending {
    LParen,
    Binary(BinaryOp),
    Unary(UnaryOp),
}

impl Pending {
    fn binding(self) -> Option<(u8, Assoc)> {
        match self {
            Pending::LParen => None,
            Pending::Binary(op) => op.infix_binding(),
            Pending::Unary(_) => Some((UNARY_PRECEDENCE, Assoc::Right)),
        }
    }

    fn text(self) -> &'static str {
        match self {
            Pending::LParen => "(",
            Pending::Binary(op) => op.symbol(),
            Pending::Unary(op) => op.name(),
        }
    }
}

/// Role of the previous token; decides whether `-` is negation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Role {
    Start,
    Operand,
    Operator,
    Function,
    OpenParen,
    CloseParen,
}

struct Converter {
    output: Vec<String>,
    stack: Vec<Pending>,
}

impl Converter {
    fn new() -> Self {
        Converter {
            output: Vec::new(),
            stack: Vec::new(),
        }
    }

    fn emit(&mut self, text: impl Into<String>) {
        self.output.push(text.into());
    }

    /// Pops every stacked operator that dominates the incoming one, then
    /// pushes it.
    fn push_operator(&mut self, incoming: Pending, (prec, assoc): (u8, Assoc)) {
        while let Some(&top) = self.stack.last() {
            let Some((top_prec, _)) = top.binding() else {
                break;
            };
            let dominates = top_prec > prec || (top_prec == prec && assoc == Assoc::Left);
            if !dominates {
                break;
            }
            self.stack.pop();
            self.emit(top.text());
        }
        self.stack.push(incoming);
    }

    fn close_paren(&mut self) -> CalcResult<()> {
        loop {
            match self.stack.pop() {
                Some(Pending::LParen) => break,
                Some(op) => self.emit(op.text()),
                None => return Err(CalcError::syntax("unbalanced parentheses: unexpected ')'")),
            }
        }
        if let Some(&Pending::Unary(op)) = self.stack.last() {
            if op.is_function() {
                self.stack.pop();
                self.emit(op.name());
            }
        }
        Ok(())
    }

    fn finish(mut self) -> CalcResult<String> {
        while let Some(op) = self.stack.pop() {
            if op == Pending::LParen {
                return Err(CalcError::syntax("unbalanced parentheses: missing ')'"));
            }
            self.emit(op.text());
        }
        Ok(self.output.join(" "))
    }
}

/// Converts an infix expression into a space-separated RPN string.
///
/// Identifiers that are not unary functions pass through verbatim as
/// variable or constant references; resolving them is the evaluator's job.
pub fn infix_to_rpn(expression: &str) -> CalcResult<String> {
    let tokens = tokenize(expression)?;
    let mut conv = Converter::new();
    let mut prev = Role::Start;

    for token in tokens {
        prev = match token {
            Token::Number(text) | Token::Vector(text) => {
                conv.emit(text);
                Role::Operand
            }
            Token::Ident(name) => match UnaryOp::from_name(&name) {
                Some(op) => {
                    conv.push_operator(Pending::Unary(op), (UNARY_PRECEDENCE, Assoc::Right));
                    Role::Function
                }
                None => {
                    conv.emit(name);
                    Role::Operand
                }
            },
            Token::LParen => {
                conv.stack.push(Pending::LParen);
                Role::OpenParen
            }
            Token::RParen => {
                conv.close_paren()?;
                Role::CloseParen
            }
            Token::Op("-") if !matches!(prev, Role::Operand | Role::CloseParen) => {
                conv.push_operator(Pending::Unary(UnaryOp::Neg), (UNARY_PRECEDENCE, Assoc::Right));
                Role::Operator
            }
            Token::Op(symbol) => {
                let op = BinaryOp::from_symbol(symbol)
                    .ok_or_else(|| CalcError::syntax(format!("unknown operator '{}'", symbol)))?;
                let binding = op
                    .infix_binding()
                    .ok_or_else(|| CalcError::syntax(format!("'{}' is postfix-only", symbol)))?;
                conv.push_operator(Pending::Binary(op), binding);
                Role::Operator
            }
        };
    }

    let rpn = conv.finish()?;
    log::debug!("infix '{}' -> rpn '{}'", expression, rpn);
    Ok(rpn)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rpn(expr: &str) -> String {
        infix_to_rpn(expr).unwrap()
    }

    #[test]
    fn honors_precedence_and_parentheses() {
        assert_eq!(rpn("3+6*(3-2)"), "3 6 3 2 - * +");
        assert_eq!(rpn("5 * 3 + 2 ^ 4 % 5"), "5 3 * 2 4 ^ 5 % +");
        assert_eq!(rpn("6 * (3-5) ^ 2"), "6 3 5 - 2 ^ *");
    }

    #[test]
    fn left_and_right_associativity() {
        assert_eq!(rpn("10 - 4 - 3"), "10 4 - 3 -");
        assert_eq!(rpn("100 // 5 % 3"), "100 5 // 3 %");
        assert_eq!(rpn("2 ^ 3 ^ 2"), "2 3 2 ^ ^");
    }

    #[test]
    fn minus_after_operand_is_subtraction() {
        assert_eq!(rpn("-3"), "3 neg");
        assert_eq!(rpn("2 * -3"), "2 3 neg *");
        assert_eq!(rpn("(-3) - -2"), "3 neg 2 neg -");
        assert_eq!(rpn("x - 1"), "x 1 -");
        assert_eq!(rpn("(1) - 1"), "1 1 -");
    }

    #[test]
    fn negation_binds_tighter_than_power() {
        assert_eq!(rpn("-2 ^ 2"), "2 neg 2 ^");
        assert_eq!(rpn("2 ^ -1"), "2 1 neg ^");
    }

    #[test]
    fn functions_bind_to_their_parenthesized_argument() {
        assert_eq!(rpn("sqrt(9) + 1"), "9 sqrt 1 +");
        assert_eq!(rpn("abs(x - 5) * 2"), "x 5 - abs 2 *");
        assert_eq!(rpn("sin(cos(0))"), "0 cos sin");
        assert_eq!(rpn("sqrt 16 + 9"), "16 sqrt 9 +");
    }

    #[test]
    fn vectors_and_variables_pass_through() {
        assert_eq!(rpn("[1, 2] + v * 2"), "[1,2] v 2 * +");
        assert_eq!(rpn("pi * r ^ 2"), "pi r 2 ^ *");
    }

    #[test]
    fn unbalanced_parentheses() {
        assert!(matches!(infix_to_rpn("(1 + 2"), Err(CalcError::Syntax(_))));
        assert!(matches!(infix_to_rpn("1 + 2)"), Err(CalcError::Syntax(_))));
        assert!(matches!(infix_to_rpn(")("), Err(CalcError::Syntax(_))));
    }
}
