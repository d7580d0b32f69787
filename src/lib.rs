//! # rpncalc
//!
//! Calculator core that accepts infix or postfix (RPN) text over scalars and
//! fixed-length vectors, with named variables threaded across lines.
//!
//! ```
//! use rpncalc::{evaluate, infix_to_rpn, Environment, Value};
//!
//! let rpn = infix_to_rpn("3+6*(3-2)").unwrap();
//! assert_eq!(rpn, "3 6 3 2 - * +");
//! assert_eq!(evaluate(&rpn, &Environment::new()).unwrap(), Value::Scalar(9.0));
//! ```

pub mod calc_engine;

pub use calc_engine::{
    evaluate, infix_to_rpn, is_infix, normalize_postfix, run_program, to_rpn, CalcError, CalcResult,
    Environment, ErrorKind, Session, Value,
};
