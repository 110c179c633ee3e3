//! Error types for descriptor handling and generation
//!
//! Every error here is a generation-time error: it aborts compilation of the
//! whole descriptor graph and carries the ids needed to locate the problem.

use crate::naming::{RepresenterId, TypeRef};
use thiserror::Error;

/// Result type alias for generation operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for descriptor and compiler operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid identifier `{0}`")]
    InvalidIdentifier(String),

    #[error("invalid type reference `{0}`")]
    InvalidTypeRef(String),

    #[error("unknown representer `{0}`")]
    UnknownRepresenter(RepresenterId),

    #[error("unknown representer `{missing}` referenced from `{representer}`")]
    UnresolvedReference {
        representer: RepresenterId,
        missing: RepresenterId,
    },

    #[error(
        "representer `{representer}` registered with model `{existing}`, cannot re-register it with model `{conflicting}`"
    )]
    ConflictingRegistration {
        representer: RepresenterId,
        existing: TypeRef,
        conflicting: TypeRef,
    },

    #[error("representer `{representer}` declares subclass discriminator `{id}` more than once")]
    DuplicateDiscriminator {
        representer: RepresenterId,
        id: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}
