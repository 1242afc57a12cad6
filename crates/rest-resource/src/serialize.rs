//! Outbound payloads.

use serde_json::Value;

use crate::attributes::{normalize_key, AttrValue, AttributeMap, ChangeSet, JsonMap, Resource};
use crate::error::MarshalError;
use crate::registry::TypeRegistry;
use crate::resolver::ResourceType;

impl<'r> ResourceType<'r> {
    /// Builds the request payload for `attributes`.
    ///
    /// Nested resources are never inlined; they only reach the payload
    /// through their association's embedding, which keeps the position of
    /// the association attribute. With
    /// `send_only_modified_attributes` only keys in `changes` are kept. The
    /// result is wrapped in the included root element when one is enabled,
    /// as a one-element list for JSON:API.
    pub fn to_params(
        &self,
        attributes: &AttributeMap,
        changes: &ChangeSet,
    ) -> Result<JsonMap, MarshalError> {
        self.params(attributes, changes, false, 0)
    }

    /// Same as [`to_params`](Self::to_params), wrapped with the embedded
    /// root element instead.
    pub fn to_embedded_params(
        &self,
        attributes: &AttributeMap,
        changes: &ChangeSet,
    ) -> Result<JsonMap, MarshalError> {
        self.params(attributes, changes, true, 0)
    }

    pub(crate) fn params(
        &self,
        attributes: &AttributeMap,
        changes: &ChangeSet,
        embedded: bool,
        depth: usize,
    ) -> Result<JsonMap, MarshalError> {
        let associations = self.associations();
        let mut associated = self.embed_at_depth(attributes, depth)?;
        let mut filtered = JsonMap::new();
        for (key, value) in attributes {
            let key = normalize_key(key)?;
            match value {
                AttrValue::Resource(_) | AttrValue::Resources(_) => {
                    // Embedded form takes the slot of the association attribute.
                    let data_keys = associations
                        .values()
                        .flatten()
                        .filter(|definition| definition.name == key)
                        .map(|definition| definition.data_key());
                    for data_key in data_keys {
                        if let Some(nested) = associated.remove(data_key) {
                            filtered.insert(data_key.to_string(), nested);
                        }
                    }
                }
                AttrValue::Serializable(model) => {
                    let mut hash = JsonMap::new();
                    for (nested_key, nested_value) in model.to_attribute_map() {
                        normalize_key(&nested_key)?;
                        hash.insert(nested_key, nested_value);
                    }
                    filtered.insert(key.to_string(), Value::Object(hash));
                }
                AttrValue::Json(raw) => {
                    filtered.insert(key.to_string(), raw.clone());
                }
            }
        }

        for (key, value) in associated {
            filtered.insert(key, value);
        }

        if self.registry().api().send_only_modified_attributes {
            let mut changed = Vec::with_capacity(changes.len());
            for key in changes.iter() {
                changed.push(normalize_key(key)?);
            }
            filtered.retain(|key, _| changed.contains(&key.as_str()));
        }

        let element = if embedded {
            self.embedded_root_element()
        } else {
            self.included_root_element()
        };
        let Some(element) = element else {
            return Ok(filtered);
        };

        let body = if self.is_json_api_format() {
            Value::Array(vec![Value::Object(filtered)])
        } else {
            Value::Object(filtered)
        };
        let mut wrapped = JsonMap::new();
        wrapped.insert(element, body);
        Ok(wrapped)
    }
}

impl Resource {
    /// Request payload for this resource, using its own type and changes.
    pub fn to_params(&self, registry: &TypeRegistry) -> Result<JsonMap, MarshalError> {
        self.resource_type_in(registry)?
            .to_params(&self.attributes, &self.changes)
    }

    /// Embedded request payload for this resource.
    pub fn to_embedded_params(&self, registry: &TypeRegistry) -> Result<JsonMap, MarshalError> {
        self.resource_type_in(registry)?
            .to_embedded_params(&self.attributes, &self.changes)
    }

    fn resource_type_in<'r>(&self, registry: &'r TypeRegistry) -> Result<ResourceType<'r>, MarshalError> {
        registry
            .get(self.resource_type)
            .ok_or(MarshalError::UnknownResourceType(self.resource_type))
    }
}
