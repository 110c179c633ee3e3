//! Descriptor registry
//!
//! Indexes every representer by id together with its ordered attribute
//! mappings. Populate it fully, then [`DescriptorRegistry::freeze`] it; the
//! frozen registry is immutable and can be shared by concurrent compilations.
//! Cross-references are resolved by id lookup only, so cyclic descriptor
//! graphs are fine.

use crate::descriptor::{AttributeMapping, DescriptorSet, RepresenterDescriptor};
use crate::error::{Error, Result};
use crate::naming::RepresenterId;
use indexmap::IndexMap;
use std::ops::Deref;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Origin {
    /// Compiled from this registry
    Local,
    /// Generated elsewhere, only referenced
    External,
}

#[derive(Debug, Clone)]
struct Registration {
    descriptor: RepresenterDescriptor,
    origin: Origin,
}

/// Mutable registry used during the "register all" phase.
#[derive(Debug, Clone, Default)]
pub struct DescriptorRegistry {
    descriptors: IndexMap<RepresenterId, Registration>,
    attributes: IndexMap<RepresenterId, Vec<AttributeMapping>>,
}

impl DescriptorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from a serialized descriptor set
    pub fn from_set(set: DescriptorSet) -> Result<Self> {
        let mut registry = Self::new();
        for entry in set.representers {
            let id = entry.descriptor.representer.clone();
            if entry.external {
                registry.register_external(entry.descriptor)?;
            } else {
                registry.register(entry.descriptor)?;
            }
            for mapping in entry.attributes {
                registry.add_attribute(&id, mapping);
            }
        }
        Ok(registry)
    }

    /// Register a descriptor to be compiled.
    ///
    /// Registering the same id again with the same model type is a no-op and
    /// keeps the first descriptor; a different model type is an error.
    pub fn register(&mut self, descriptor: RepresenterDescriptor) -> Result<()> {
        self.insert(descriptor, Origin::Local)
    }

    /// Register a descriptor whose unit is generated elsewhere
    pub fn register_external(&mut self, descriptor: RepresenterDescriptor) -> Result<()> {
        self.insert(descriptor, Origin::External)
    }

    fn insert(&mut self, descriptor: RepresenterDescriptor, origin: Origin) -> Result<()> {
        if let Some(existing) = self.descriptors.get(descriptor.id()) {
            if existing.descriptor.model != descriptor.model {
                return Err(Error::ConflictingRegistration {
                    representer: descriptor.representer,
                    existing: existing.descriptor.model.clone(),
                    conflicting: descriptor.model,
                });
            }
            debug!("Representer already registered: {}", descriptor.id());
            return Ok(());
        }

        debug!(
            "Registering representer {} for model {} ({:?})",
            descriptor.id(),
            descriptor.model,
            origin
        );
        self.descriptors.insert(
            descriptor.representer.clone(),
            Registration { descriptor, origin },
        );
        Ok(())
    }

    /// Append an attribute mapping to a representer, keeping insertion order
    pub fn add_attribute(&mut self, representer: &RepresenterId, mapping: AttributeMapping) {
        self.attributes
            .entry(representer.clone())
            .or_default()
            .push(mapping);
    }

    /// Attribute mappings in insertion order; empty when none were added
    pub fn attributes_of(&self, representer: &RepresenterId) -> &[AttributeMapping] {
        self.attributes
            .get(representer)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn resolve(&self, representer: &RepresenterId) -> Result<&RepresenterDescriptor> {
        self.descriptors
            .get(representer)
            .map(|r| &r.descriptor)
            .ok_or_else(|| Error::UnknownRepresenter(representer.clone()))
    }

    pub fn contains(&self, representer: &RepresenterId) -> bool {
        self.descriptors.contains_key(representer)
    }

    pub fn is_external(&self, representer: &RepresenterId) -> bool {
        self.descriptors
            .get(representer)
            .is_some_and(|r| r.origin == Origin::External)
    }

    /// All descriptors in registration order, external ones included
    pub fn descriptors(&self) -> impl Iterator<Item = &RepresenterDescriptor> {
        self.descriptors.values().map(|r| &r.descriptor)
    }

    /// Descriptors this registry generates units for, in registration order
    pub fn local_descriptors(&self) -> impl Iterator<Item = &RepresenterDescriptor> {
        self.descriptors
            .values()
            .filter(|r| r.origin == Origin::Local)
            .map(|r| &r.descriptor)
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// End the registration phase
    pub fn freeze(self) -> FrozenRegistry {
        FrozenRegistry(Arc::new(self))
    }
}

/// Read-only, shareable view of a fully populated registry.
#[derive(Debug, Clone)]
pub struct FrozenRegistry(Arc<DescriptorRegistry>);

impl Deref for FrozenRegistry {
    type Target = DescriptorRegistry;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
