//! Inbound payloads: root-element unwrapping and collection extraction.
//!
//! Parsing is permissive. A missing or mistyped root element leaves the
//! payload as it was; nothing here returns an error.

use serde_json::Value;

use crate::association::AssociationKind;
use crate::attributes::{AttrValue, JsonMap, Resource};
use crate::resolver::ResourceType;

/// One record from a response envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRecord {
    pub attributes: JsonMap,
    pub metadata: Value,
    pub errors: Value,
}

/// A record list from a response envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedCollection {
    pub records: Vec<JsonMap>,
    pub metadata: Value,
    pub errors: Value,
}

impl<'r> ResourceType<'r> {
    /// Extracts the resource attributes from a decoded detail payload.
    ///
    /// With root parsing enabled and the root element holding an object or
    /// array, the wrapped data is returned: the object itself, or for
    /// JSON:API the first element of the array. Anything else returns
    /// `data` unchanged.
    pub fn parse(&self, mut data: JsonMap) -> JsonMap {
        let Some(element) = self.parsed_root_element() else {
            return data;
        };
        let json_api = self.is_json_api_format();
        let unwrappable = match data.get(&element) {
            Some(Value::Object(_)) => true,
            Some(Value::Array(items)) => json_api && matches!(items.first(), Some(Value::Object(_))),
            _ => false,
        };
        if !unwrappable {
            tracing::debug!(resource = self.name(), %element, "root element absent, using payload as is");
            return data;
        }

        match data.remove(&element) {
            Some(Value::Array(items)) => items.into_iter().next().and_then(into_object),
            other => other.and_then(into_object),
        }
        .unwrap_or_default()
    }

    /// Extracts the record list from a decoded collection payload.
    ///
    /// Serializer-style and JSON:API payloads keep the list under
    /// `data.<pluralized root element>`; otherwise `data` is the list.
    pub fn extract_array(&self, mut payload: JsonMap) -> Vec<Value> {
        let data = payload.remove("data").unwrap_or(Value::Null);
        let wrapped = self.is_serializer_format() || self.is_json_api_format();
        let list = match data {
            Value::Object(mut inner) if wrapped => {
                let key = self.pluralized_parsed_root_element();
                inner.remove(&key).unwrap_or_else(|| {
                    tracing::debug!(resource = self.name(), %key, "collection key absent");
                    Value::Null
                })
            }
            other => other,
        };
        match list {
            Value::Array(items) => items,
            Value::Null => Vec::new(),
            single => vec![single],
        }
    }

    /// Parses a response envelope `{data, metadata, errors}` holding one record.
    pub fn parse_record(&self, mut envelope: JsonMap) -> ParsedRecord {
        let attributes = match envelope.remove("data") {
            Some(Value::Object(data)) => self.parse(data),
            _ => JsonMap::new(),
        };
        ParsedRecord {
            attributes,
            metadata: envelope.remove("metadata").unwrap_or(Value::Null),
            errors: envelope.remove("errors").unwrap_or(Value::Null),
        }
    }

    /// Parses a response envelope `{data, metadata, errors}` holding a list.
    ///
    /// Every object in the list goes through [`parse`](Self::parse); other
    /// entries are dropped.
    pub fn parse_collection(&self, mut envelope: JsonMap) -> ParsedCollection {
        let metadata = envelope.remove("metadata").unwrap_or(Value::Null);
        let errors = envelope.remove("errors").unwrap_or(Value::Null);
        let records = self
            .extract_array(envelope)
            .into_iter()
            .filter_map(|item| match item {
                Value::Object(map) => Some(self.parse(map)),
                _ => None,
            })
            .collect();
        ParsedCollection {
            records,
            metadata,
            errors,
        }
    }

    /// Builds a resource from parsed attributes.
    ///
    /// Data under the key of an association with a declared target type is
    /// turned into nested resources stored under the association name, in
    /// the position the key had. Attribute order is otherwise kept.
    pub fn instantiate(&self, attributes: JsonMap) -> Resource {
        let mut targets = Vec::new();
        for definitions in self.associations().into_values() {
            for definition in definitions {
                let target = definition
                    .target
                    .as_deref()
                    .and_then(|name| self.registry().by_name(name));
                if let Some(target) = target {
                    targets.push((definition, target));
                }
            }
        }

        let mut resource = Resource::new(self.id());
        for (key, value) in attributes {
            let association = targets
                .iter()
                .find(|(definition, _)| definition.data_key() == key);
            let (key, value) = match (association, value) {
                (Some((definition, target)), Value::Object(map))
                    if definition.kind != AssociationKind::HasMany =>
                {
                    (definition.name.clone(), AttrValue::from(target.instantiate(map)))
                }
                (Some((definition, target)), Value::Array(items)) => (
                    definition.name.clone(),
                    AttrValue::Resources(
                        items
                            .into_iter()
                            .filter_map(into_object)
                            .map(|map| target.instantiate(map))
                            .collect(),
                    ),
                ),
                (_, value) => (key, AttrValue::Json(value)),
            };
            resource.attributes.insert(key, value);
        }
        resource
    }
}

fn into_object(value: Value) -> Option<JsonMap> {
    match value {
        Value::Object(map) => Some(map),
        _ => None,
    }
}
