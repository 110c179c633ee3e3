use crate::error::Result;
use crate::naming::{RepresenterId, TypeRef};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Per-model metadata of one representer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RepresenterDescriptor {
    pub representer: RepresenterId,
    pub model: TypeRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links_provider: Option<TypeRef>,
    #[serde(default)]
    pub skip_serialize: bool,
    #[serde(default)]
    pub skip_deserialize: bool,
    /// Replaces the whole per-attribute deserialize path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_deserializer: Option<TypeRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subclass_dispatch: Option<SubclassDispatch>,
}

impl RepresenterDescriptor {
    pub fn new(representer: RepresenterId, model: TypeRef) -> Self {
        Self {
            representer,
            model,
            links_provider: None,
            skip_serialize: false,
            skip_deserialize: false,
            custom_deserializer: None,
            subclass_dispatch: None,
        }
    }

    /// Build from qualified names, e.g. `("com.foo.UserRepresenter", "com.foo.User")`
    pub fn parse(representer: &str, model: &str) -> Result<Self> {
        Ok(Self::new(
            RepresenterId::parse(representer)?,
            TypeRef::parse(model)?,
        ))
    }

    pub fn id(&self) -> &RepresenterId {
        &self.representer
    }

    pub fn with_links_provider(mut self, provider: TypeRef) -> Self {
        self.links_provider = Some(provider);
        self
    }

    pub fn skip_serialize(mut self, skip: bool) -> Self {
        self.skip_serialize = skip;
        self
    }

    pub fn skip_deserialize(mut self, skip: bool) -> Self {
        self.skip_deserialize = skip;
        self
    }

    pub fn with_custom_deserializer(mut self, deserializer: TypeRef) -> Self {
        self.custom_deserializer = Some(deserializer);
        self
    }

    pub fn with_subclass_dispatch(mut self, dispatch: SubclassDispatch) -> Self {
        self.subclass_dispatch = Some(dispatch);
        self
    }
}

/// Discriminator table of a polymorphic base representer.
///
/// On read, the value under `discriminator` selects the variant whose
/// generated unit constructs the concrete model. On write, the variant
/// matching the value's runtime type contributes its fields after the base.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SubclassDispatch {
    /// Wire key holding the discriminator value, e.g. `type`
    pub discriminator: String,
    /// Wire key of the container holding the subclass fields; merged into
    /// the base container when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nested_attribute: Option<String>,
    pub variants: Vec<SubclassVariant>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SubclassVariant {
    /// Discriminator value
    pub id: String,
    pub representer: RepresenterId,
}

impl SubclassDispatch {
    pub fn new(discriminator: &str) -> Self {
        Self {
            discriminator: discriminator.to_string(),
            nested_attribute: None,
            variants: Vec::new(),
        }
    }

    pub fn nested_under(mut self, attribute: &str) -> Self {
        self.nested_attribute = Some(attribute.to_string());
        self
    }

    pub fn variant(mut self, id: &str, representer: RepresenterId) -> Self {
        self.variants.push(SubclassVariant {
            id: id.to_string(),
            representer,
        });
        self
    }
}
