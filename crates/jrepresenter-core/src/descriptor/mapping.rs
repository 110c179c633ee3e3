use super::Attribute;
use crate::naming::{RepresenterId, TypeRef};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One model <-> wire field correspondence.
///
/// The variant decides how the value is converted: as is (optionally through
/// a custom serializer/deserializer pair), through another representer's
/// generated unit for a single object, or through it for a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum AttributeMapping {
    Property {
        model_attribute: Attribute,
        wire_attribute: Attribute,
        #[serde(default)]
        embedded: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        serializer: Option<TypeRef>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        deserializer: Option<TypeRef>,
    },
    SingleNested {
        model_attribute: Attribute,
        wire_attribute: Attribute,
        #[serde(default)]
        embedded: bool,
        nested_representer: RepresenterId,
    },
    Collection {
        model_attribute: Attribute,
        wire_attribute: Attribute,
        #[serde(default)]
        embedded: bool,
        nested_representer: RepresenterId,
        nested_model_type: TypeRef,
    },
}

impl AttributeMapping {
    pub fn property(model_attribute: Attribute, wire_attribute: Attribute) -> Self {
        Self::Property {
            model_attribute,
            wire_attribute,
            embedded: false,
            serializer: None,
            deserializer: None,
        }
    }

    /// Property converted by caller-supplied serializer/deserializer types
    pub fn property_with_codec(
        model_attribute: Attribute,
        wire_attribute: Attribute,
        serializer: Option<TypeRef>,
        deserializer: Option<TypeRef>,
    ) -> Self {
        Self::Property {
            model_attribute,
            wire_attribute,
            embedded: false,
            serializer,
            deserializer,
        }
    }

    pub fn single_nested(
        model_attribute: Attribute,
        wire_attribute: Attribute,
        nested_representer: RepresenterId,
    ) -> Self {
        Self::SingleNested {
            model_attribute,
            wire_attribute,
            embedded: false,
            nested_representer,
        }
    }

    pub fn collection(
        model_attribute: Attribute,
        wire_attribute: Attribute,
        nested_representer: RepresenterId,
        nested_model_type: TypeRef,
    ) -> Self {
        Self::Collection {
            model_attribute,
            wire_attribute,
            embedded: false,
            nested_representer,
            nested_model_type,
        }
    }

    /// Route this mapping through the `_embedded` container
    pub fn embedded(mut self, value: bool) -> Self {
        match &mut self {
            Self::Property { embedded, .. }
            | Self::SingleNested { embedded, .. }
            | Self::Collection { embedded, .. } => *embedded = value,
        }
        self
    }

    pub fn model_attribute(&self) -> &Attribute {
        match self {
            Self::Property {
                model_attribute, ..
            }
            | Self::SingleNested {
                model_attribute, ..
            }
            | Self::Collection {
                model_attribute, ..
            } => model_attribute,
        }
    }

    pub fn wire_attribute(&self) -> &Attribute {
        match self {
            Self::Property { wire_attribute, .. }
            | Self::SingleNested { wire_attribute, .. }
            | Self::Collection { wire_attribute, .. } => wire_attribute,
        }
    }

    pub fn is_embedded(&self) -> bool {
        match self {
            Self::Property { embedded, .. }
            | Self::SingleNested { embedded, .. }
            | Self::Collection { embedded, .. } => *embedded,
        }
    }

    pub fn wire_key(&self) -> String {
        self.wire_attribute().wire_key()
    }

    /// Representer whose generated unit converts this value, if any
    pub fn nested_representer(&self) -> Option<&RepresenterId> {
        match self {
            Self::Property { .. } => None,
            Self::SingleNested {
                nested_representer, ..
            }
            | Self::Collection {
                nested_representer, ..
            } => Some(nested_representer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fname() -> AttributeMapping {
        AttributeMapping::property(
            Attribute::typed("fname", "java.lang.String").unwrap(),
            Attribute::typed("firstName", "java.lang.String").unwrap(),
        )
    }

    #[test]
    fn test_defaults_to_top_level() {
        let mapping = fname();
        assert!(!mapping.is_embedded());
        assert_eq!(mapping.wire_key(), "first_name");
        assert_eq!(mapping.model_attribute().name(), "fname");
        assert!(mapping.nested_representer().is_none());
    }

    #[test]
    fn test_embedded_toggle() {
        assert!(fname().embedded(true).is_embedded());
        assert!(!fname().embedded(true).embedded(false).is_embedded());
    }

    #[test]
    fn test_tagged_serde() {
        let mapping = AttributeMapping::single_nested(
            Attribute::typed("backedUpBy", "com.foo.User").unwrap(),
            Attribute::untyped("user").unwrap(),
            RepresenterId::parse("com.foo.representers.UserRepresenter").unwrap(),
        )
        .embedded(true);

        let json = serde_json::to_value(&mapping).unwrap();
        assert_eq!(json["kind"], "single-nested");
        assert_eq!(json["embedded"], true);
        assert_eq!(
            json["nested_representer"],
            "com.foo.representers.UserRepresenter"
        );

        let back: AttributeMapping = serde_json::from_value(json).unwrap();
        assert_eq!(back, mapping);
    }
}
