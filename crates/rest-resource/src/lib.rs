//! Marshaling layer for REST-backed resources.
//!
//! # Overview
//!
//! Resource types are declared once into a [`TypeRegistry`]. Each type may
//! override any option of its parent; everything else is resolved by walking
//! the parent chain at lookup time. A [`ResourceType`] view then converts:
//!
//! - inbound decoded payloads into attribute maps ([`ResourceType::parse`],
//!   [`ResourceType::extract_array`]), unwrapping a root element or a
//!   JSON:API list when configured;
//! - in-memory [`Resource`]s into outbound payloads
//!   ([`ResourceType::to_params`]), embedding associated resources and
//!   optionally keeping only changed attributes.
//!
//! # Example
//!
//! ```
//! use rest_resource::{Format, ResourceDeclaration, TypeRegistry};
//! use serde_json::json;
//!
//! let mut builder = TypeRegistry::builder();
//! builder
//!     .declare(ResourceDeclaration::new("Base").parse_root_in_json(true).format(Format::JsonApi))
//!     .unwrap();
//! let article = builder
//!     .declare(ResourceDeclaration::new("Article").parent("Base").include_root_in_json(true))
//!     .unwrap();
//! let registry = builder.build();
//! let ty = registry.get(article).unwrap();
//!
//! let data = json!({"articles": [{"id": 1, "title": "t"}]});
//! let attrs = ty.parse(data.as_object().unwrap().clone());
//! assert_eq!(attrs.get("title"), Some(&json!("t")));
//!
//! let resource = ty.instantiate(attrs);
//! let params = resource.to_params(&registry).unwrap();
//! assert_eq!(
//!     serde_json::Value::Object(params),
//!     json!({"articles": [{"id": 1, "title": "t"}]})
//! );
//! ```

pub mod association;
pub mod attributes;
pub mod cli;
pub mod config;
pub mod declaration;
pub mod embed;
pub mod error;
pub mod format;
pub mod parse;
pub mod registry;
pub mod resolver;
pub mod serialize;

// Re-export the core public API
pub use association::{AssociationDefinition, AssociationKind, AssociationsByKind};
pub use attributes::{normalize_key, AttrValue, AttributeMap, ChangeSet, JsonMap, Resource, Serializable};
pub use config::{ApiSettings, RegistryConfig};
pub use declaration::ResourceDeclaration;
pub use error::{MarshalError, RegistryError};
pub use format::{Format, RootOption};
pub use parse::{ParsedCollection, ParsedRecord};
pub use registry::{global, install, ResourceTypeId, TypeRegistry, TypeRegistryBuilder};
pub use resolver::{Ancestors, ResourceType};
