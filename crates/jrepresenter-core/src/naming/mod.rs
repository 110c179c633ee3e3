pub mod identifier;
pub mod name;
pub mod representer_id;
pub mod type_ref;

// Re-export common types
pub use identifier::Identifier;
pub use name::Name;
pub use representer_id::RepresenterId;
pub use type_ref::TypeRef;
