use super::FunctionKind;
use crate::descriptor::Attribute;
use crate::naming::TypeRef;
use serde::{Deserialize, Serialize};

/// The fixed set of local variables a generated function can use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Var {
    /// Model instance being serialized
    Value,
    /// Model list being serialized
    Values,
    RequestContext,
    /// Container being built or read
    Json,
    /// Container list being read
    JsonArray,
    /// The `_embedded` container
    EmbeddedMap,
    /// Model instance being deserialized
    Model,
}

/// Static type of a parameter, declaration, return value or cast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    /// A model or scalar type declared by the descriptor
    Declared(TypeRef),
    /// List of a declared type
    DeclaredList(TypeRef),
    Container,
    /// List of containers consumed by a collection read
    ContainerList,
    /// List produced by a collection write
    SerializedList,
    RequestContext,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expr {
    Var(Var),
    Null,
    Str(String),
    /// Empty insertion-ordered container
    NewContainer,
    /// Default-constructed model instance
    New(TypeRef),
    EmptyList,
    /// Read a model attribute (a getter)
    GetAttribute {
        target: Var,
        attribute: Attribute,
    },
    HasKey {
        container: Var,
        key: String,
    },
    Lookup {
        container: Var,
        key: String,
    },
    /// Nested container under `key`, or an empty one when the key is absent
    SubContainer {
        container: Var,
        key: String,
    },
    IsNull(Box<Expr>),
    IsInstance {
        value: Var,
        ty: TypeRef,
    },
    /// Narrowing coercion; fails at run time on a type mismatch
    Cast {
        target: ValueType,
        value: Box<Expr>,
    },
    /// Apply a helper constant (serializer/deserializer) to a value
    Apply {
        constant: String,
        argument: Box<Expr>,
    },
    /// Links helper invoked with a links-provider constant
    Links {
        constant: String,
        value: Var,
        context: Var,
    },
    CallMapper {
        mapper: TypeRef,
        function: FunctionKind,
        args: Vec<Expr>,
    },
    /// Apply a mapper function to every element of a list, keeping order
    MapEach {
        source: Var,
        mapper: TypeRef,
        function: FunctionKind,
        context: Option<Var>,
    },
}

impl Expr {
    pub fn var(var: Var) -> Self {
        Expr::Var(var)
    }

    pub fn lookup(container: Var, key: impl Into<String>) -> Self {
        Expr::Lookup {
            container,
            key: key.into(),
        }
    }

    pub fn has_key(container: Var, key: impl Into<String>) -> Self {
        Expr::HasKey {
            container,
            key: key.into(),
        }
    }

    pub fn cast(target: ValueType, value: Expr) -> Self {
        Expr::Cast {
            target,
            value: Box::new(value),
        }
    }

    pub fn is_null(value: Expr) -> Self {
        Expr::IsNull(Box::new(value))
    }

    pub fn apply(constant: impl Into<String>, argument: Expr) -> Self {
        Expr::Apply {
            constant: constant.into(),
            argument: Box::new(argument),
        }
    }

    pub fn get(target: Var, attribute: &Attribute) -> Self {
        Expr::GetAttribute {
            target,
            attribute: attribute.clone(),
        }
    }
}
