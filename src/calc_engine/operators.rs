//! Static operator, function and constant tables.
//!
//! Precedence, lowest to highest: `+ -` (1) < `* / // %` (2) < `^` (3) <
//! `neg` and the unary functions (4). Only `^` and the unary level are
//! right-associative.

use std::f64::consts::{E, PI};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assoc {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    FloorDiv,
    Rem,
    Pow,
    Angle,
    Dot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
    Sqrt,
    Sin,
    Cos,
    Tan,
    Abs,
}

pub const UNARY_PRECEDENCE: u8 = 4;

impl BinaryOp {
    pub fn from_symbol(token: &str) -> Option<Self> {
        let op = match token {
            "+" => BinaryOp::Add,
            "-" => BinaryOp::Sub,
            "*" => BinaryOp::Mul,
            "/" => BinaryOp::Div,
            "//" => BinaryOp::FloorDiv,
            "%" => BinaryOp::Rem,
            "^" => BinaryOp::Pow,
            "angle" => BinaryOp::Angle,
            "dot" => BinaryOp::Dot,
            _ => return None,
        };
        Some(op)
    }

    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::FloorDiv => "//",
            BinaryOp::Rem => "%",
            BinaryOp::Pow => "^",
            BinaryOp::Angle => "angle",
            BinaryOp::Dot => "dot",
        }
    }

    /// Precedence and associativity in infix text. `angle` and `dot` are
    /// postfix-only words and have none.
    pub fn infix_binding(self) -> Option<(u8, Assoc)> {
        match self {
            BinaryOp::Add | BinaryOp::Sub => Some((1, Assoc::Left)),
            BinaryOp::Mul | BinaryOp::Div | BinaryOp::FloorDiv | BinaryOp::Rem => {
                Some((2, Assoc::Left))
            }
            BinaryOp::Pow => Some((3, Assoc::Right)),
            BinaryOp::Angle | BinaryOp::Dot => None,
        }
    }
}

impl UnaryOp {
    pub fn from_name(token: &str) -> Option<Self> {
        let op = match token {
            "neg" => UnaryOp::Neg,
            "sqrt" => UnaryOp::Sqrt,
            "sin" => UnaryOp::Sin,
            "cos" => UnaryOp::Cos,
            "tan" => UnaryOp::Tan,
            "abs" => UnaryOp::Abs,
            _ => return None,
        };
        Some(op)
    }

    pub fn name(self) -> &'static str {
        match self {
            UnaryOp::Neg => "neg",
            UnaryOp::Sqrt => "sqrt",
            UnaryOp::Sin => "sin",
            UnaryOp::Cos => "cos",
            UnaryOp::Tan => "tan",
            UnaryOp::Abs => "abs",
        }
    }

    /// Function-call style words, i.e. everything except `neg`.
    pub fn is_function(self) -> bool {
        !matches!(self, UnaryOp::Neg)
    }
}

pub fn constant(name: &str) -> Option<f64> {
    match name {
        "pi" => Some(PI),
        "e" => Some(E),
        _ => None,
    }
}

/// Words the evaluator interprets as operators; a variable with one of these
/// names could never be read back.
pub fn is_reserved_word(word: &str) -> bool {
    BinaryOp::from_symbol(word).is_some() || UnaryOp::from_name(word).is_some()
}
