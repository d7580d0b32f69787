//! Invariants checked over hand-picked input sets.

use rpncalc::calc_engine::operators::{BinaryOp, UnaryOp};
use rpncalc::{evaluate, normalize_postfix, Environment, ErrorKind, Value};

fn vector_literal(xs: &[f64]) -> String {
    let parts: Vec<String> = xs.iter().map(|x| x.to_string()).collect();
    format!("[{}]", parts.join(","))
}

fn kind_of(rpn: &str) -> ErrorKind {
    match evaluate(rpn, &Environment::new()) {
        Ok(v) => panic!("'{}' unexpectedly evaluated to {}", rpn, v),
        Err(e) => e.kind(),
    }
}

const BINARY_WORDS: [&str; 9] = ["+", "-", "*", "/", "//", "%", "^", "angle", "dot"];
const UNARY_WORDS: [&str; 6] = ["neg", "sqrt", "sin", "cos", "tan", "abs"];

#[test]
fn normalize_postfix_is_idempotent() {
    let samples = [
        "",
        "   ",
        "1 2 +",
        "  228  192     + ",
        "\t[1,2]\n[3,4]  angle ",
        "a b c d",
    ];
    for s in samples {
        let once = normalize_postfix(s);
        assert_eq!(normalize_postfix(&once), once, "{:?}", s);
        assert!(!once.contains("  "));
        assert_eq!(once.trim(), once);
    }
}

#[test]
fn binary_operators_need_two_operands() {
    for word in BINARY_WORDS {
        assert!(BinaryOp::from_symbol(word).is_some());
        assert_eq!(kind_of(word), ErrorKind::Arity, "{}", word);
        assert_eq!(kind_of(&format!("1 {}", word)), ErrorKind::Arity, "1 {}", word);
        assert_eq!(kind_of(&format!("[1] {}", word)), ErrorKind::Arity, "[1] {}", word);
    }
}

#[test]
fn unary_operators_need_one_operand() {
    for word in UNARY_WORDS {
        assert!(UnaryOp::from_name(word).is_some());
        assert_eq!(kind_of(word), ErrorKind::Arity, "{}", word);
        assert_eq!(kind_of(&format!("{} 1", word)), ErrorKind::Arity, "{} 1", word);
    }
}

#[test]
fn mismatched_vector_lengths_always_fail() {
    let vectors: [&[f64]; 5] = [&[], &[1.0], &[1.0, 2.0], &[0.0, -1.0, 2.5], &[1.0, 1.0, 1.0, 1.0]];
    for a in vectors {
        for b in vectors {
            if a.len() == b.len() {
                continue;
            }
            for op in ["+", "-", "dot"] {
                let rpn = format!("{} {} {}", vector_literal(a), vector_literal(b), op);
                assert_eq!(kind_of(&rpn), ErrorKind::Value, "{}", rpn);
            }
        }
    }
}

#[test]
fn angle_of_a_vector_with_itself_is_zero() {
    let vectors: [&[f64]; 5] = [
        &[1.0],
        &[3.0, 4.0],
        &[-2.0, 0.5, 7.0],
        &[1e-3, 1e-3],
        &[1e6, -1e6, 1.0, 0.0],
    ];
    for v in vectors {
        let lit = vector_literal(v);
        let rpn = format!("{} {} angle", lit, lit);
        match evaluate(&rpn, &Environment::new()) {
            Ok(Value::Scalar(x)) => assert!(x.abs() < 1e-6, "{} -> {}", rpn, x),
            other => panic!("{} -> {:?}", rpn, other),
        }
    }
}

#[test]
fn angle_with_a_zero_vector_always_fails() {
    let others = ["[1,2]", "[0,0]", "[-3,4]"];
    for other in others {
        assert_eq!(kind_of(&format!("[0,0] {} angle", other)), ErrorKind::Value);
        assert_eq!(kind_of(&format!("{} [0,0] angle", other)), ErrorKind::Value);
    }
}

#[test]
fn vectors_reject_scalar_only_operations() {
    for op in ["/", "//", "%", "^"] {
        assert_eq!(kind_of(&format!("[1,2] 2 {}", op)), ErrorKind::Type, "{}", op);
        assert_eq!(kind_of(&format!("2 [1,2] {}", op)), ErrorKind::Type, "{}", op);
    }
    for op in ["sqrt", "sin", "cos", "tan"] {
        assert_eq!(kind_of(&format!("[1,2] {}", op)), ErrorKind::Type, "{}", op);
    }
    assert_eq!(kind_of("[1,2] [3,4] *"), ErrorKind::Type);
    assert_eq!(kind_of("1 2 angle"), ErrorKind::Type);
}

#[test]
fn leftover_values_are_malformed() {
    for rpn in ["", "1 2", "1 2 3 +", "[1] [2]"] {
        assert_eq!(kind_of(rpn), ErrorKind::MalformedExpression, "{:?}", rpn);
    }
}

#[test]
fn floor_division_and_modulo_recombine_to_the_dividend() {
    let pairs: [(f64, f64); 8] = [
        (1.0, 0.1),
        (7.0, 2.0),
        (-7.0, 2.0),
        (7.0, -2.0),
        (-7.5, -2.0),
        (5.3, 0.7),
        (-0.25, 0.1),
        (1e10, 3.0),
    ];
    for (a, b) in pairs {
        let scalar = |rpn: String| match evaluate(&rpn, &Environment::new()) {
            Ok(Value::Scalar(x)) => x,
            other => panic!("{} -> {:?}", rpn, other),
        };
        let q = scalar(format!("{} {} //", a, b));
        let r = scalar(format!("{} {} %", a, b));
        assert_eq!(q.fract(), 0.0, "{} // {}", a, b);
        assert!(r == 0.0 || (r < 0.0) == (b < 0.0), "{} % {} = {}", a, b, r);
        assert!(r.abs() < b.abs(), "{} % {} = {}", a, b, r);
        assert!((b * q + r - a).abs() < 1e-9, "{} != {} * {} + {}", a, b, q, r);
    }
}
