//! In-memory resource state consumed by the serializer.

use indexmap::{IndexMap, IndexSet};
use rest_resource_util::is_present;
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

use crate::error::MarshalError;
use crate::registry::ResourceTypeId;

pub type JsonMap = Map<String, Value>;

/// A model-like value that knows how to turn itself into attributes.
pub trait Serializable: Send + Sync {
    fn to_attribute_map(&self) -> JsonMap;
}

/// One attribute value of a resource.
#[derive(Clone)]
pub enum AttrValue {
    /// Scalars and plain nested collections.
    Json(Value),
    /// A single associated resource.
    Resource(Box<Resource>),
    /// A collection of associated resources.
    Resources(Vec<Resource>),
    /// A value serialized through its own attribute map.
    Serializable(Arc<dyn Serializable>),
}

impl AttrValue {
    /// Mirrors [`is_present`] for plain values; nested resources and
    /// serializable values always count as present unless they are an empty
    /// collection.
    pub fn is_present(&self) -> bool {
        match self {
            AttrValue::Json(value) => is_present(value),
            AttrValue::Resource(_) | AttrValue::Serializable(_) => true,
            AttrValue::Resources(items) => !items.is_empty(),
        }
    }

    /// The plain JSON value, if this is not a nested resource.
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            AttrValue::Json(value) => Some(value),
            _ => None,
        }
    }
}

impl fmt::Debug for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Json(value) => f.debug_tuple("Json").field(value).finish(),
            AttrValue::Resource(resource) => f.debug_tuple("Resource").field(resource).finish(),
            AttrValue::Resources(items) => f.debug_tuple("Resources").field(items).finish(),
            AttrValue::Serializable(value) => f
                .debug_tuple("Serializable")
                .field(&value.to_attribute_map())
                .finish(),
        }
    }
}

impl From<Value> for AttrValue {
    fn from(value: Value) -> Self {
        AttrValue::Json(value)
    }
}

impl From<Resource> for AttrValue {
    fn from(resource: Resource) -> Self {
        AttrValue::Resource(Box::new(resource))
    }
}

impl From<Vec<Resource>> for AttrValue {
    fn from(resources: Vec<Resource>) -> Self {
        AttrValue::Resources(resources)
    }
}

/// Ordered attribute name → value map.
pub type AttributeMap = IndexMap<String, AttrValue>;

/// Names of attributes modified since the last sync.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet(IndexSet<String>);

impl ChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>) -> bool {
        self.0.insert(key.into())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for ChangeSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// An instance of a declared resource type.
#[derive(Debug, Clone)]
pub struct Resource {
    pub resource_type: ResourceTypeId,
    pub attributes: AttributeMap,
    pub changes: ChangeSet,
}

impl Resource {
    pub fn new(resource_type: ResourceTypeId) -> Self {
        Self {
            resource_type,
            attributes: AttributeMap::new(),
            changes: ChangeSet::new(),
        }
    }

    /// Sets an attribute without recording a change.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Sets an attribute and records it as changed.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<AttrValue>) {
        let key = key.into();
        self.changes.insert(key.clone());
        self.attributes.insert(key, value.into());
    }

    /// Builds a resource from plain JSON attributes.
    pub fn from_json(resource_type: ResourceTypeId, attributes: JsonMap) -> Self {
        Self {
            resource_type,
            attributes: attributes
                .into_iter()
                .map(|(key, value)| (key, AttrValue::Json(value)))
                .collect(),
            changes: ChangeSet::new(),
        }
    }
}

/// Normalized payload form of an attribute key.
///
/// Keys are used verbatim; empty keys and keys containing control characters
/// cannot be put on the wire.
pub fn normalize_key(key: &str) -> Result<&str, MarshalError> {
    if key.is_empty() || key.chars().any(char::is_control) {
        return Err(MarshalError::InvalidAttributeKey(key.to_string()));
    }
    Ok(key)
}
