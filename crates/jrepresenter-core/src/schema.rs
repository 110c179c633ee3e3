//! JSON Schema of the descriptor set exchanged with front ends.

use crate::descriptor::DescriptorSet;
use crate::error::Result;
use schemars::{Schema, schema_for};

pub fn descriptor_set_schema() -> Schema {
    schema_for!(DescriptorSet)
}

/// Pretty-printed schema document
pub fn descriptor_set_schema_json() -> Result<String> {
    Ok(serde_json::to_string_pretty(&descriptor_set_schema())?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_describes_representers() -> anyhow::Result<()> {
        let json: serde_json::Value = serde_json::from_str(&descriptor_set_schema_json()?)?;
        assert_eq!(json["title"], "DescriptorSet");
        assert!(json["properties"]["representers"].is_object());
        Ok(())
    }
}
