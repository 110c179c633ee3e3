//! Mapping compiler for JSON representers.
//!
//! A representer describes how a model type maps to and from a JSON-like
//! container. This crate holds the descriptor model handed over by a front
//! end, the [`DescriptorRegistry`] that indexes it, and the
//! [`MappingCompiler`] that turns one descriptor into a language-neutral
//! [`GeneratedUnit`]. Back ends render units to source text.

pub mod compiler;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod ir;
pub mod naming;
pub mod registry;
pub mod schema;

pub use compiler::MappingCompiler;
pub use config::{GeneratorSection, JavaSection, JrepresenterConfig};
pub use descriptor::{
    Attribute, AttributeMapping, DescriptorSet, RepresenterDescriptor, RepresenterEntry,
    SubclassDispatch, SubclassVariant,
};
pub use error::{Error, Result};
pub use ir::GeneratedUnit;
pub use naming::{Identifier, Name, RepresenterId, TypeRef};
pub use registry::{DescriptorRegistry, FrozenRegistry};

/// Key of the nested container that holds embedded attributes.
pub const EMBEDDED_KEY: &str = "_embedded";
