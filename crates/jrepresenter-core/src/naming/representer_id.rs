use super::TypeRef;
use crate::error::Result;
use schemars::{JsonSchema, Schema, SchemaGenerator};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

/// RepresenterId is a newtype wrapper around the representer's TypeRef.
/// It distinguishes representer identities from model types at the type level.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RepresenterId(pub TypeRef);

impl RepresenterId {
    pub fn new(ty: TypeRef) -> Self {
        Self(ty)
    }

    /// Create a RepresenterId from a qualified name (e.g., "com.foo.UserRepresenter")
    pub fn parse(s: &str) -> Result<Self> {
        TypeRef::parse(s).map(Self)
    }

    pub fn as_type_ref(&self) -> &TypeRef {
        &self.0
    }
}

impl fmt::Display for RepresenterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<TypeRef> for RepresenterId {
    fn from(ty: TypeRef) -> Self {
        Self(ty)
    }
}

impl FromStr for RepresenterId {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl JsonSchema for RepresenterId {
    fn schema_name() -> Cow<'static, str> {
        "RepresenterId".into()
    }

    fn json_schema(generator: &mut SchemaGenerator) -> Schema {
        TypeRef::json_schema(generator)
    }
}
