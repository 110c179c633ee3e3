//! Run-time errors
//!
//! These mirror the failures generated Java code would raise: class cast
//! failures, null dereferences and missing collaborators.

use jrepresenter_core::ir::{FunctionKind, Var};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RuntimeError {
    #[error("no unit loaded for mapper `{0}`")]
    UnknownMapper(String),

    #[error("mapper `{mapper}` has no {function:?} function")]
    MissingFunction {
        mapper: String,
        function: FunctionKind,
    },

    #[error("nothing registered for helper `{0}`")]
    UnboundCallable(String),

    #[error("variable {0:?} is not bound")]
    UnboundVariable(Var),

    #[error("cannot cast {found} to {expected}")]
    TypeMismatch { expected: String, found: String },

    #[error("null dereference: {0}")]
    NullDereference(String),

    #[error("model `{0}` cannot be converted to JSON")]
    NotSerializable(String),
}
