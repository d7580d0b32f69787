use thiserror::Error;

pub type CalcResult<T> = Result<T, CalcError>;

/// Everything that can go wrong while converting or evaluating a line.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    #[error("Syntax error: {0}")]
    Syntax(String),

    #[error("Not enough operands for '{op}': needs {needed}, stack has {found}")]
    Arity {
        op: String,
        needed: usize,
        found: usize,
    },

    #[error("Malformed expression: {remaining} values left on the stack (expected exactly one)")]
    MalformedExpression { remaining: usize },

    #[error("'{0}' is not a number, vector or known variable")]
    UndefinedSymbol(String),

    #[error("Type error: {0}")]
    Type(String),

    #[error("Value error: {0}")]
    Value(String),

    #[error("Division by zero in '{0}'")]
    DivisionByZero(String),

    #[error("Invalid variable name: '{0}'")]
    InvalidName(String),
}

/// Fieldless mirror of [`CalcError`] for callers that only care about the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Syntax,
    Arity,
    MalformedExpression,
    UndefinedSymbol,
    Type,
    Value,
    DivisionByZero,
    InvalidName,
}

impl CalcError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CalcError::Syntax(_) => ErrorKind::Syntax,
            CalcError::Arity { .. } => ErrorKind::Arity,
            CalcError::MalformedExpression { .. } => ErrorKind::MalformedExpression,
            CalcError::UndefinedSymbol(_) => ErrorKind::UndefinedSymbol,
            CalcError::Type(_) => ErrorKind::Type,
            CalcError::Value(_) => ErrorKind::Value,
            CalcError::DivisionByZero(_) => ErrorKind::DivisionByZero,
            CalcError::InvalidName(_) => ErrorKind::InvalidName,
        }
    }

    pub(crate) fn syntax(msg: impl Into<String>) -> Self {
        CalcError::Syntax(msg.into())
    }

    pub(crate) fn type_error(msg: impl Into<String>) -> Self {
        CalcError::Type(msg.into())
    }

    pub(crate) fn value_error(msg: impl Into<String>) -> Self {
        CalcError::Value(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offender() {
        let err = CalcError::Arity { op: "+".to_string(), needed: 2, found: 1 };
        assert_eq!(err.to_string(), "Not enough operands for '+': needs 2, stack has 1");

        let err = CalcError::UndefinedSymbol("x".to_string());
        assert_eq!(err.kind(), ErrorKind::UndefinedSymbol);
        assert!(err.to_string().contains("'x'"));
    }
}
