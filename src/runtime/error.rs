use std::fmt;

use thiserror::Error;

use super::value::Holder;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    #[error("no such variable '{name}'")]
    UndefinedVariable { name: String },
    #[error("no such method '{method}' for class {class}")]
    UnknownMethod { method: String, class: String },
    #[error("expected a class instance, got {type_name}")]
    NotAnInstance { type_name: &'static str },
    #[error("wrong types for {operation}: {lhs} and {rhs}")]
    UnsupportedOperands {
        operation: &'static str,
        lhs: &'static str,
        rhs: &'static str,
    },
    #[error("cannot compare {lhs} and {rhs} for {relation}")]
    NotComparable {
        relation: &'static str,
        lhs: &'static str,
        rhs: &'static str,
    },
    #[error("division by zero")]
    DivisionByZero,
    #[error("failed to write output: {message}")]
    OutputFailure { message: String },
}

/// Non-local exit travelling up the evaluation stack: either a `return`
/// unwinding to the nearest enclosing method body, or a fatal error.
///
/// Only `Statement::MethodBody` may catch the `Return` variant; every other
/// node propagates it untouched.
#[derive(Debug, Clone)]
pub enum Unwind {
    Return(Holder),
    Error(RuntimeError),
}

impl From<RuntimeError> for Unwind {
    fn from(error: RuntimeError) -> Self {
        Unwind::Error(error)
    }
}

impl fmt::Display for Unwind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unwind::Return(_) => f.write_str("return outside of a method body"),
            Unwind::Error(error) => write!(f, "{error}"),
        }
    }
}

pub type ExecResult = Result<Holder, Unwind>;
