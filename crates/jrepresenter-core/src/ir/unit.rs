use super::{Stmt, ValueType, Var, Visitor};
use crate::naming::{RepresenterId, TypeRef};
use serde::{Deserialize, Serialize};

/// The four conversion functions a unit may contain.
///
/// Functions are named `toJSON`/`fromJSON` in every unit and told apart by
/// their parameter types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FunctionKind {
    ToJson,
    ToJsonCollection,
    FromJson,
    FromJsonCollection,
}

impl FunctionKind {
    pub fn name(&self) -> &'static str {
        match self {
            FunctionKind::ToJson | FunctionKind::ToJsonCollection => "toJSON",
            FunctionKind::FromJson | FunctionKind::FromJsonCollection => "fromJSON",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    pub var: Var,
    pub ty: ValueType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Function {
    pub kind: FunctionKind,
    pub params: Vec<Param>,
    pub returns: ValueType,
    pub body: Vec<Stmt>,
}

/// What a static helper field holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstantRole {
    LinksProvider,
    Serializer,
    Deserializer,
    CustomDeserializer,
}

/// A static helper field: one default-constructed instance of `ty`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constant {
    pub name: String,
    pub role: ConstantRole,
    pub ty: TypeRef,
}

/// Compiled output for one representer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedUnit {
    /// Type name of the unit itself, e.g. `gen.com.foo.UserMapper`
    pub mapper: TypeRef,
    pub representer: RepresenterId,
    pub model: TypeRef,
    pub constants: Vec<Constant>,
    pub functions: Vec<Function>,
}

impl GeneratedUnit {
    pub fn function(&self, kind: FunctionKind) -> Option<&Function> {
        self.functions.iter().find(|f| f.kind == kind)
    }

    pub fn has_function(&self, kind: FunctionKind) -> bool {
        self.function(kind).is_some()
    }

    pub fn constant(&self, name: &str) -> Option<&Constant> {
        self.constants.iter().find(|c| c.name == name)
    }

    /// Other mappers this unit calls, in first-use order
    pub fn dependencies(&self) -> Vec<TypeRef> {
        let mut collector = MapperCollector {
            own: &self.mapper,
            found: Vec::new(),
        };
        collector.visit_unit(self);
        collector.found
    }
}

struct MapperCollector<'a> {
    own: &'a TypeRef,
    found: Vec<TypeRef>,
}

impl Visitor for MapperCollector<'_> {
    fn visit_mapper_ref(&mut self, mapper: &TypeRef) {
        if mapper != self.own && !self.found.contains(mapper) {
            self.found.push(mapper.clone());
        }
    }
}
