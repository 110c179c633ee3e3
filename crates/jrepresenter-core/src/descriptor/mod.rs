//! Descriptor model handed over by the front end.
//!
//! Nothing here is mutated after construction; the compiler only reads it.

pub mod attribute;
pub mod mapping;
pub mod representer;
pub mod set;

pub use attribute::Attribute;
pub use mapping::AttributeMapping;
pub use representer::{RepresenterDescriptor, SubclassDispatch, SubclassVariant};
pub use set::{DescriptorSet, RepresenterEntry};
