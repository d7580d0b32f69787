use std::fmt;

use super::error::{CalcError, CalcResult};
use super::operators::{BinaryOp, UnaryOp};

/// A calculator value. Operations never mutate their operands.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Scalar(f64),
    Vector(Vec<f64>),
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Scalar(v)
    }
}

impl From<Vec<f64>> for Value {
    fn from(v: Vec<f64>) -> Self {
        Value::Vector(v)
    }
}

impl Value {
    /// Parses `[n1,n2,...]` (or `[]`) into a vector.
    pub fn parse_vector(text: &str) -> CalcResult<Value> {
        let inner = text
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
            .ok_or_else(|| CalcError::syntax(format!("malformed vector literal '{}'", text)))?;
        if inner.trim().is_empty() {
            return Ok(Value::Vector(Vec::new()));
        }
        inner
            .split(',')
            .map(|part| {
                part.trim()
                    .parse::<f64>()
                    .map_err(|_| CalcError::syntax(format!("malformed vector literal '{}'", text)))
            })
            .collect::<CalcResult<Vec<f64>>>()
            .map(Value::Vector)
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Scalar(_) => "scalar",
            Value::Vector(_) => "vector",
        }
    }

    /// Integral scalars reduce to an integer for display; everything else
    /// stays as is.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Scalar(x) if x.is_finite() && x.fract() == 0.0 && x.abs() < 9.0e15 => {
                Some(*x as i64)
            }
            _ => None,
        }
    }

    pub fn apply_binary(op: BinaryOp, a: Value, b: Value) -> CalcResult<Value> {
        match op {
            BinaryOp::Add => a.add(&b),
            BinaryOp::Sub => a.sub(&b),
            BinaryOp::Mul => a.mul(&b),
            BinaryOp::Div => a.div(&b),
            BinaryOp::FloorDiv => a.floor_div(&b),
            BinaryOp::Rem => a.rem(&b),
            BinaryOp::Pow => a.pow(&b),
            BinaryOp::Angle => a.angle(&b),
            BinaryOp::Dot => a.dot(&b).map(Value::Scalar),
        }
    }

    pub fn apply_unary(op: UnaryOp, a: Value) -> CalcResult<Value> {
        match (op, a) {
            (UnaryOp::Neg, Value::Scalar(x)) => Ok(Value::Scalar(-x)),
            (UnaryOp::Neg, Value::Vector(v)) => Ok(Value::Vector(v.iter().map(|x| -x).collect())),
            (UnaryOp::Abs, Value::Scalar(x)) => Ok(Value::Scalar(x.abs())),
            (UnaryOp::Abs, Value::Vector(v)) => Ok(Value::Scalar(norm(&v))),
            (op, Value::Vector(_)) => {
                Err(CalcError::type_error(format!("{} is not defined for vectors", op.name())))
            }
            (UnaryOp::Sqrt, Value::Scalar(x)) => {
                if x < 0.0 {
                    return Err(CalcError::value_error(format!(
                        "square root of negative number {}",
                        x
                    )));
                }
                Ok(Value::Scalar(x.sqrt()))
            }
            (UnaryOp::Sin, Value::Scalar(x)) => Ok(Value::Scalar(x.sin())),
            (UnaryOp::Cos, Value::Scalar(x)) => Ok(Value::Scalar(x.cos())),
            (UnaryOp::Tan, Value::Scalar(x)) => Ok(Value::Scalar(x.tan())),
        }
    }

    fn add(&self, other: &Value) -> CalcResult<Value> {
        match (self, other) {
            (Value::Scalar(a), Value::Scalar(b)) => Ok(Value::Scalar(a + b)),
            (Value::Vector(a), Value::Vector(b)) => zip_same_len("add", a, b, |x, y| x + y),
            _ => Err(CalcError::type_error("cannot add a vector and a scalar")),
        }
    }

    fn sub(&self, other: &Value) -> CalcResult<Value> {
        match (self, other) {
            (Value::Scalar(a), Value::Scalar(b)) => Ok(Value::Scalar(a - b)),
            (Value::Vector(a), Value::Vector(b)) => zip_same_len("subtract", a, b, |x, y| x - y),
            _ => Err(CalcError::type_error("cannot subtract a vector and a scalar")),
        }
    }

    fn mul(&self, other: &Value) -> CalcResult<Value> {
        match (self, other) {
            (Value::Scalar(a), Value::Scalar(b)) => Ok(Value::Scalar(a * b)),
            (Value::Vector(v), Value::Scalar(s)) | (Value::Scalar(s), Value::Vector(v)) => {
                Ok(Value::Vector(v.iter().map(|x| x * s).collect()))
            }
            (Value::Vector(_), Value::Vector(_)) => Err(CalcError::type_error(
                "vector * vector is not supported (use angle or dot)",
            )),
        }
    }

    fn div(&self, other: &Value) -> CalcResult<Value> {
        let (a, b) = scalars("/", self, other)?;
        if b == 0.0 {
            return Err(CalcError::DivisionByZero("/".to_string()));
        }
        Ok(Value::Scalar(a / b))
    }

    /// Floor division, rounding toward negative infinity.
    fn floor_div(&self, other: &Value) -> CalcResult<Value> {
        let (a, b) = scalars("//", self, other)?;
        if b == 0.0 {
            return Err(CalcError::DivisionByZero("//".to_string()));
        }
        Ok(Value::Scalar(floor_divmod(a, b).0))
    }

    /// Remainder with the sign of the divisor.
    fn rem(&self, other: &Value) -> CalcResult<Value> {
        let (a, b) = scalars("%", self, other)?;
        if b == 0.0 {
            return Err(CalcError::DivisionByZero("%".to_string()));
        }
        Ok(Value::Scalar(floor_divmod(a, b).1))
    }

    fn pow(&self, other: &Value) -> CalcResult<Value> {
        let (a, b) = scalars("^", self, other)?;
        if a == 0.0 && b < 0.0 {
            return Err(CalcError::DivisionByZero("^".to_string()));
        }
        if a < 0.0 && b.fract() != 0.0 {
            return Err(CalcError::value_error(format!(
                "{} ^ {} has no real result",
                a, b
            )));
        }
        Ok(Value::Scalar(a.powf(b)))
    }

    fn dot(&self, other: &Value) -> CalcResult<f64> {
        match (self, other) {
            (Value::Vector(a), Value::Vector(b)) => {
                if a.len() != b.len() {
                    return Err(length_mismatch("dot", a, b));
                }
                Ok(a.iter().zip(b).map(|(x, y)| x * y).sum())
            }
            _ => Err(CalcError::type_error("dot needs two vectors")),
        }
    }

    /// Angle in radians between two vectors.
    fn angle(&self, other: &Value) -> CalcResult<Value> {
        let (Value::Vector(a), Value::Vector(b)) = (self, other) else {
            return Err(CalcError::type_error("angle needs two vectors"));
        };
        let dot = self.dot(other)?;
        let (mag_a, mag_b) = (norm(a), norm(b));
        if mag_a == 0.0 || mag_b == 0.0 {
            return Err(CalcError::value_error("angle with a zero vector is undefined"));
        }
        let cos_theta = (dot / (mag_a * mag_b)).clamp(-1.0, 1.0);
        Ok(Value::Scalar(cos_theta.acos()))
    }
}

fn norm(v: &[f64]) -> f64 {
    v.iter().map(|x| x * x).sum::<f64>().sqrt()
}

fn length_mismatch(what: &str, a: &[f64], b: &[f64]) -> CalcError {
    CalcError::value_error(format!(
        "cannot {} vectors of different lengths: {} vs {}",
        what,
        a.len(),
        b.len()
    ))
}

fn zip_same_len(
    what: &str,
    a: &[f64],
    b: &[f64],
    f: impl Fn(f64, f64) -> f64,
) -> CalcResult<Value> {
    if a.len() != b.len() {
        return Err(length_mismatch(what, a, b));
    }
    Ok(Value::Vector(a.iter().zip(b).map(|(x, y)| f(*x, *y)).collect()))
}

/// Quotient and remainder with `a == b * q + r` and `r` carrying the sign of `b`.
///
/// The quotient comes from the exact remainder, not from `a / b`, so
/// `1 // 0.1` is 9 rather than the rounded 10. `b` must be non-zero.
fn floor_divmod(a: f64, b: f64) -> (f64, f64) {
    let mut m = a % b;
    let mut q = (a - m) / b;
    if m != 0.0 {
        if (b < 0.0) != (m < 0.0) {
            m += b;
            q -= 1.0;
        }
    } else {
        m = 0.0_f64.copysign(b);
    }
    let q = if q != 0.0 {
        let floored = q.floor();
        if q - floored > 0.5 {
            floored + 1.0
        } else {
            floored
        }
    } else {
        0.0_f64.copysign(a / b)
    };
    (q, m)
}

fn scalars(op: &str, a: &Value, b: &Value) -> CalcResult<(f64, f64)> {
    match (a, b) {
        (Value::Scalar(a), Value::Scalar(b)) => Ok((*a, *b)),
        _ => Err(CalcError::type_error(format!(
            "'{}' is not defined for {} and {}",
            op,
            a.kind_name(),
            b.kind_name()
        ))),
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Scalar(x) => match self.as_integer() {
                Some(n) => write!(f, "{}", n),
                None => write!(f, "{}", x),
            },
            Value::Vector(v) => {
                let parts: Vec<String> = v.iter().map(|x| x.to_string()).collect();
                write!(f, "[{}]", parts.join(", "))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(x: f64) -> Value {
        Value::Scalar(x)
    }

    fn v(xs: &[f64]) -> Value {
        Value::Vector(xs.to_vec())
    }

    #[test]
    fn parses_vector_literals() {
        assert_eq!(Value::parse_vector("[1,2.5,-3]").unwrap(), v(&[1.0, 2.5, -3.0]));
        assert_eq!(Value::parse_vector("[]").unwrap(), v(&[]));
        assert!(matches!(Value::parse_vector("[1,,2]"), Err(CalcError::Syntax(_))));
        assert!(matches!(Value::parse_vector("[1,a]"), Err(CalcError::Syntax(_))));
    }

    #[test]
    fn vector_arithmetic() {
        let sum =
            Value::apply_binary(BinaryOp::Add, v(&[1.0, 2.0, 3.0]), v(&[4.0, 5.0, 6.0])).unwrap();
        assert_eq!(sum, v(&[5.0, 7.0, 9.0]));
        let scaled = Value::apply_binary(BinaryOp::Mul, s(2.0), v(&[1.0, -1.0])).unwrap();
        assert_eq!(scaled, v(&[2.0, -2.0]));
        assert!(matches!(
            Value::apply_binary(BinaryOp::Sub, v(&[1.0]), v(&[1.0, 2.0])),
            Err(CalcError::Value(_))
        ));
        assert!(matches!(
            Value::apply_binary(BinaryOp::Mul, v(&[1.0]), v(&[1.0])),
            Err(CalcError::Type(_))
        ));
        assert!(matches!(
            Value::apply_binary(BinaryOp::FloorDiv, v(&[4.0]), s(2.0)),
            Err(CalcError::Type(_))
        ));
    }

    #[test]
    fn floor_division_and_modulo_follow_the_divisor_sign() {
        let fd = |a, b| Value::apply_binary(BinaryOp::FloorDiv, s(a), s(b)).unwrap();
        assert_eq!(fd(7.0, 2.0), s(3.0));
        assert_eq!(fd(-7.0, 2.0), s(-4.0));
        assert_eq!(fd(228.0, -4.0), s(-57.0));

        let rem = |a, b| Value::apply_binary(BinaryOp::Rem, s(a), s(b)).unwrap();
        assert_eq!(rem(16.0, 5.0), s(1.0));
        assert_eq!(rem(-7.0, 3.0), s(2.0));
        assert_eq!(rem(7.0, -3.0), s(-2.0));
        assert_eq!(fd(1.0, 0.1), s(9.0));

        assert!(matches!(
            Value::apply_binary(BinaryOp::Rem, s(1.0), s(0.0)),
            Err(CalcError::DivisionByZero(_))
        ));
    }

    #[test]
    fn power_domain() {
        assert_eq!(Value::apply_binary(BinaryOp::Pow, s(2.0), s(10.0)).unwrap(), s(1024.0));
        assert_eq!(Value::apply_binary(BinaryOp::Pow, s(-2.0), s(3.0)).unwrap(), s(-8.0));
        assert!(matches!(
            Value::apply_binary(BinaryOp::Pow, s(0.0), s(-1.0)),
            Err(CalcError::DivisionByZero(_))
        ));
        assert!(matches!(
            Value::apply_binary(BinaryOp::Pow, s(-8.0), s(0.5)),
            Err(CalcError::Value(_))
        ));
    }

    #[test]
    fn angle_and_dot() {
        let right = Value::apply_binary(BinaryOp::Angle, v(&[1.0, 0.0]), v(&[0.0, 2.0])).unwrap();
        match right {
            Value::Scalar(x) => assert!((x - std::f64::consts::FRAC_PI_2).abs() < 1e-12),
            other => panic!("expected scalar, got {:?}", other),
        }
        assert_eq!(
            Value::apply_binary(BinaryOp::Dot, v(&[1.0, 2.0]), v(&[3.0, 4.0])).unwrap(),
            s(11.0)
        );
        assert!(matches!(
            Value::apply_binary(BinaryOp::Angle, v(&[0.0, 0.0]), v(&[1.0, 1.0])),
            Err(CalcError::Value(_))
        ));
    }

    #[test]
    fn unary_operations() {
        assert_eq!(Value::apply_unary(UnaryOp::Abs, v(&[3.0, 4.0])).unwrap(), s(5.0));
        assert_eq!(Value::apply_unary(UnaryOp::Neg, v(&[1.0, -2.0])).unwrap(), v(&[-1.0, 2.0]));
        assert!(matches!(Value::apply_unary(UnaryOp::Sin, v(&[1.0])), Err(CalcError::Type(_))));
        assert!(matches!(Value::apply_unary(UnaryOp::Sqrt, s(-4.0)), Err(CalcError::Value(_))));
    }

    #[test]
    fn display_collapses_integral_scalars() {
        assert_eq!(s(9.0).to_string(), "9");
        assert_eq!(s(-0.0).to_string(), "0");
        assert_eq!(s(2.5).to_string(), "2.5");
        assert_eq!(s(9.0).as_integer(), Some(9));
        assert_eq!(s(0.5).as_integer(), None);
        assert_eq!(v(&[5.0, 7.5]).to_string(), "[5, 7.5]");
    }
}
