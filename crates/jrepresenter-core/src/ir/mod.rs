//! Generated unit IR.
//!
//! The compiler's output: an ordered list of functions, each a small
//! statement sequence over an expression tree. Nothing in here is specific
//! to a target language; back ends render it, the runtime interprets it.

pub mod expr;
pub mod stmt;
pub mod unit;
pub mod visitor;
pub mod walker;

pub use expr::{Expr, ValueType, Var};
pub use stmt::{MatchArm, Stmt};
pub use unit::{Constant, ConstantRole, Function, FunctionKind, GeneratedUnit, Param};
pub use visitor::Visitor;
