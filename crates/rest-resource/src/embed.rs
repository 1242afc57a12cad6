//! Embedding of associated resources into outbound payloads.

use rest_resource_util::is_present;
use serde_json::Value;

use crate::association::AssociationKind;
use crate::attributes::{AttrValue, AttributeMap, JsonMap, Resource};
use crate::error::MarshalError;
use crate::resolver::ResourceType;

impl<'r> ResourceType<'r> {
    /// Serializes the associated resources found in `attributes`, keyed by
    /// each association's data key.
    ///
    /// A `belongs_to` association whose foreign key is already set is left
    /// out, as is any association that serializes to nothing.
    pub fn embed(&self, attributes: &AttributeMap) -> Result<JsonMap, MarshalError> {
        self.embed_at_depth(attributes, 0)
    }

    pub(crate) fn embed_at_depth(
        &self,
        attributes: &AttributeMap,
        depth: usize,
    ) -> Result<JsonMap, MarshalError> {
        let mut embedded = JsonMap::new();
        for (kind, definitions) in self.associations() {
            for definition in definitions {
                if kind == AssociationKind::BelongsTo {
                    let foreign_key = definition.foreign_key();
                    if attributes.get(&foreign_key).is_some_and(AttrValue::is_present) {
                        tracing::trace!(
                            resource = self.name(),
                            association = %definition.name,
                            %foreign_key,
                            "foreign key set, not embedding"
                        );
                        continue;
                    }
                }

                let value = match attributes.get(&definition.name) {
                    Some(AttrValue::Resources(items)) => {
                        let mut serialized = Vec::with_capacity(items.len());
                        for item in items {
                            let params = self.embedded_params_of(item, depth)?;
                            if !params.is_empty() {
                                serialized.push(Value::Object(params));
                            }
                        }
                        Value::Array(serialized)
                    }
                    Some(AttrValue::Resource(item)) => {
                        Value::Object(self.embedded_params_of(item, depth)?)
                    }
                    _ => continue,
                };
                if is_present(&value) {
                    embedded.insert(definition.data_key().to_string(), value);
                }
            }
        }
        Ok(embedded)
    }

    fn embedded_params_of(&self, nested: &Resource, depth: usize) -> Result<JsonMap, MarshalError> {
        let nested_type = self
            .registry()
            .get(nested.resource_type)
            .ok_or(MarshalError::UnknownResourceType(nested.resource_type))?;
        let max_depth = self.registry().api().max_embed_depth;
        if depth >= max_depth {
            return Err(MarshalError::EmbeddingTooDeep {
                type_name: nested_type.name().to_string(),
                max_depth,
            });
        }
        nested_type.params(&nested.attributes, &nested.changes, true, depth + 1)
    }
}

#[cfg(test)]
mod tests {
    use crate::association::AssociationDefinition;
    use crate::attributes::{AttributeMap, Resource};
    use crate::config::ApiSettings;
    use crate::declaration::ResourceDeclaration;
    use crate::error::MarshalError;
    use crate::registry::{ResourceTypeId, TypeRegistry};
    use serde_json::json;

    struct Fixture {
        registry: TypeRegistry,
        post: ResourceTypeId,
        user: ResourceTypeId,
        comment: ResourceTypeId,
    }

    fn fixture(api: ApiSettings) -> Fixture {
        let mut builder = TypeRegistry::builder().api(api);
        let user = builder.declare(ResourceDeclaration::new("User")).unwrap();
        let comment = builder.declare(ResourceDeclaration::new("Comment")).unwrap();
        let post = builder
            .declare(
                ResourceDeclaration::new("Post")
                    .association(AssociationDefinition::belongs_to("author").with_target("User"))
                    .association(
                        AssociationDefinition::has_many("comments")
                            .with_data_key("comments_attributes")
                            .with_target("Comment"),
                    )
                    .association(AssociationDefinition::has_one("cover")),
            )
            .unwrap();
        Fixture {
            registry: builder.build(),
            post,
            user,
            comment,
        }
    }

    #[test]
    fn embeds_single_and_collection_associations() {
        let f = fixture(ApiSettings::default());
        let mut attrs = AttributeMap::new();
        attrs.insert(
            "author".into(),
            Resource::new(f.user).with("name", json!("ann")).into(),
        );
        attrs.insert(
            "comments".into(),
            vec![
                Resource::new(f.comment).with("body", json!("a")),
                Resource::new(f.comment),
                Resource::new(f.comment).with("body", json!("b")),
            ]
            .into(),
        );

        let embedded = f.registry.get(f.post).unwrap().embed(&attrs).unwrap();
        assert_eq!(
            serde_json::Value::Object(embedded),
            json!({
                "author": {"name": "ann"},
                "comments_attributes": [{"body": "a"}, {"body": "b"}]
            })
        );
    }

    #[test]
    fn skips_belongs_to_when_foreign_key_is_set() {
        let f = fixture(ApiSettings::default());
        let mut attrs = AttributeMap::new();
        attrs.insert("author_id".into(), json!(5).into());
        attrs.insert(
            "author".into(),
            Resource::new(f.user).with("name", json!("ann")).into(),
        );

        let embedded = f.registry.get(f.post).unwrap().embed(&attrs).unwrap();
        assert!(embedded.is_empty());
    }

    #[test]
    fn blank_foreign_key_does_not_block_embedding() {
        let f = fixture(ApiSettings::default());
        let mut attrs = AttributeMap::new();
        attrs.insert("author_id".into(), json!(null).into());
        attrs.insert(
            "author".into(),
            Resource::new(f.user).with("name", json!("ann")).into(),
        );

        let embedded = f.registry.get(f.post).unwrap().embed(&attrs).unwrap();
        assert_eq!(embedded.get("author"), Some(&json!({"name": "ann"})));
    }

    #[test]
    fn omits_empty_and_plain_values() {
        let f = fixture(ApiSettings::default());
        let mut attrs = AttributeMap::new();
        attrs.insert("author".into(), Resource::new(f.user).into());
        attrs.insert("comments".into(), vec![Resource::new(f.comment)].into());
        attrs.insert("cover".into(), json!({"url": "x"}).into());

        let embedded = f.registry.get(f.post).unwrap().embed(&attrs).unwrap();
        assert!(embedded.is_empty());
    }

    #[test]
    fn unknown_nested_type_is_an_error() {
        let f = fixture(ApiSettings::default());
        let mut attrs = AttributeMap::new();
        attrs.insert(
            "author".into(),
            Resource::new(ResourceTypeId(99)).with("x", json!(1)).into(),
        );

        let err = f.registry.get(f.post).unwrap().embed(&attrs).unwrap_err();
        assert_eq!(err, MarshalError::UnknownResourceType(ResourceTypeId(99)));
    }

    #[test]
    fn depth_limit_stops_runaway_nesting() {
        let mut builder = TypeRegistry::builder().api(ApiSettings {
            max_embed_depth: 2,
            ..ApiSettings::default()
        });
        let node = builder
            .declare(
                ResourceDeclaration::new("Node")
                    .association(AssociationDefinition::has_one("child")),
            )
            .unwrap();
        let registry = builder.build();

        let mut leaf = Resource::new(node).with("id", json!(3));
        for id in (0..3).rev() {
            leaf = Resource::new(node).with("id", json!(id)).with("child", leaf);
        }

        let err = registry.get(node).unwrap().embed(&leaf.attributes).unwrap_err();
        assert!(matches!(err, MarshalError::EmbeddingTooDeep { max_depth: 2, .. }));
    }
}
