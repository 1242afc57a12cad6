use thiserror::Error;

use crate::registry::ResourceTypeId;

/// Errors raised while declaring resource types or installing a registry.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegistryError {
    #[error("resource type name cannot be empty")]
    EmptyTypeName,

    #[error("resource type already declared: {0}")]
    DuplicateType(String),

    #[error("resource type {name} declares unknown parent {parent}")]
    UnknownParent { name: String, parent: String },

    #[error("unknown resource type: {0}")]
    UnknownType(String),

    #[error("a process-wide registry is already installed")]
    AlreadyInstalled,

    #[error("invalid registry config: {0}")]
    Config(#[from] toml::de::Error),
}

/// Errors raised while building outbound payloads.
///
/// Parsing never produces one of these; serialization fails fast.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MarshalError {
    #[error("attribute key {0:?} cannot be used as a payload key")]
    InvalidAttributeKey(String),

    #[error("resource type id {0} is not declared in this registry")]
    UnknownResourceType(ResourceTypeId),

    #[error("embedding {type_name} exceeds the maximum depth of {max_depth}")]
    EmbeddingTooDeep { type_name: String, max_depth: usize },
}
