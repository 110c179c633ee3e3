use crate::error::Result;
use crate::naming::{Identifier, TypeRef};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A named, optionally typed field on either side of a mapping.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct Attribute {
    pub name: Identifier,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub ty: Option<TypeRef>,
}

impl Attribute {
    pub fn new(name: &str, ty: Option<TypeRef>) -> Result<Self> {
        Ok(Self {
            name: Identifier::new(name)?,
            ty,
        })
    }

    /// Attribute with a type given as a qualified name
    pub fn typed(name: &str, ty: &str) -> Result<Self> {
        Self::new(name, Some(TypeRef::parse(ty)?))
    }

    pub fn untyped(name: &str) -> Result<Self> {
        Self::new(name, None)
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Key of this attribute in the JSON container: `firstName` -> `first_name`
    pub fn wire_key(&self) -> String {
        self.name.to_snake_case()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_wire_key() {
        let attr = Attribute::typed("firstName", "java.lang.String").unwrap();
        assert_eq!(attr.wire_key(), "first_name");
        assert_eq!(attr.ty.as_ref().unwrap().simple_name(), "String");
    }

    #[test]
    fn test_wire_key_is_stable() {
        let attr = Attribute::untyped("backedUpBy").unwrap();
        assert_eq!(attr.wire_key(), attr.wire_key());
        assert_eq!(attr.wire_key(), "backed_up_by");
    }

    #[test]
    fn test_rejects_invalid_name() {
        assert!(matches!(
            Attribute::untyped(""),
            Err(Error::InvalidIdentifier(_))
        ));
        assert!(matches!(
            Attribute::untyped("first name"),
            Err(Error::InvalidIdentifier(_))
        ));
    }

    #[test]
    fn test_serde_shape() {
        let attr = Attribute::typed("fname", "java.lang.String").unwrap();
        let json = serde_json::to_value(&attr).unwrap();
        assert_eq!(json, serde_json::json!({"name": "fname", "type": "java.lang.String"}));

        let untyped: Attribute = serde_json::from_value(serde_json::json!({"name": "user"})).unwrap();
        assert_eq!(untyped.ty, None);
    }
}
