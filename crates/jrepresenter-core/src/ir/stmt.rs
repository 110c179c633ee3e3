use super::{Expr, ValueType, Var};
use crate::descriptor::Attribute;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stmt {
    Declare {
        var: Var,
        ty: ValueType,
        init: Expr,
    },
    Assign {
        var: Var,
        value: Expr,
    },
    /// Insert or replace one container entry; a replaced key keeps its position
    Put {
        target: Var,
        key: String,
        value: Expr,
    },
    /// Insert every entry of another container
    PutAll {
        target: Var,
        source: Expr,
    },
    /// Write a model attribute (a setter)
    SetAttribute {
        target: Var,
        attribute: Attribute,
        value: Expr,
    },
    If {
        condition: Expr,
        then: Vec<Stmt>,
    },
    /// Run the first arm whose literal equals the scrutinee; no arm runs otherwise
    Match {
        scrutinee: Expr,
        arms: Vec<MatchArm>,
    },
    Return(Expr),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchArm {
    pub literal: String,
    pub body: Vec<Stmt>,
}

impl Stmt {
    pub fn put(target: Var, key: impl Into<String>, value: Expr) -> Self {
        Stmt::Put {
            target,
            key: key.into(),
            value,
        }
    }

    pub fn when(condition: Expr, then: Vec<Stmt>) -> Self {
        Stmt::If { condition, then }
    }
}
