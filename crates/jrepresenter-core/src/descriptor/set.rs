use super::{AttributeMapping, RepresenterDescriptor};
use crate::error::Result;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Serialized form of a whole descriptor graph, as produced by a front end.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DescriptorSet {
    #[serde(default)]
    pub representers: Vec<RepresenterEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RepresenterEntry {
    #[serde(flatten)]
    pub descriptor: RepresenterDescriptor,
    /// Attribute mappings in declaration order
    #[serde(default)]
    pub attributes: Vec<AttributeMapping>,
    /// Generated elsewhere; only resolvable, never compiled
    #[serde(default)]
    pub external: bool,
}

impl DescriptorSet {
    pub fn from_json(source: &str) -> Result<Self> {
        Ok(serde_json::from_str(source)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
