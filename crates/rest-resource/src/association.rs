//! Association definitions, as supplied by the model layer.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Relationship kind of an association.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssociationKind {
    BelongsTo,
    HasOne,
    #[serde(alias = "has_many_through")]
    HasMany,
}

/// One declared association of a resource type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssociationDefinition {
    /// Attribute name holding the associated resource(s).
    pub name: String,
    pub kind: AssociationKind,
    /// Payload key the association is read from and embedded under.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_key: Option<String>,
    /// Attribute carrying the associated id, for `belongs_to`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreign_key: Option<String>,
    /// Name of the associated resource type, when it is declared.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

impl AssociationDefinition {
    pub fn new(name: impl Into<String>, kind: AssociationKind) -> Self {
        Self {
            name: name.into(),
            kind,
            data_key: None,
            foreign_key: None,
            target: None,
        }
    }

    pub fn belongs_to(name: impl Into<String>) -> Self {
        Self::new(name, AssociationKind::BelongsTo)
    }

    pub fn has_one(name: impl Into<String>) -> Self {
        Self::new(name, AssociationKind::HasOne)
    }

    pub fn has_many(name: impl Into<String>) -> Self {
        Self::new(name, AssociationKind::HasMany)
    }

    pub fn with_data_key(mut self, data_key: impl Into<String>) -> Self {
        self.data_key = Some(data_key.into());
        self
    }

    pub fn with_foreign_key(mut self, foreign_key: impl Into<String>) -> Self {
        self.foreign_key = Some(foreign_key.into());
        self
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// Defaults to [`name`](Self::name).
    pub fn data_key(&self) -> &str {
        self.data_key.as_deref().unwrap_or(&self.name)
    }

    /// Defaults to `{name}_id`.
    pub fn foreign_key(&self) -> String {
        match &self.foreign_key {
            Some(key) => key.clone(),
            None => format!("{}_id", self.name),
        }
    }
}

/// Association definitions grouped by kind.
pub type AssociationsByKind = BTreeMap<AssociationKind, Vec<AssociationDefinition>>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn defaults_derive_from_name() {
        let def = AssociationDefinition::belongs_to("author");
        assert_eq!(def.data_key(), "author");
        assert_eq!(def.foreign_key(), "author_id");

        let def = def.with_data_key("writer").with_foreign_key("writer_uid");
        assert_eq!(def.data_key(), "writer");
        assert_eq!(def.foreign_key(), "writer_uid");
    }

    #[test]
    fn deserializes_with_kind_names() {
        let def: AssociationDefinition = serde_json::from_value(json!({
            "name": "tags",
            "kind": "has_many_through",
            "target": "Tag"
        }))
        .unwrap();
        assert_eq!(def.kind, AssociationKind::HasMany);
        assert_eq!(def.target.as_deref(), Some("Tag"));
        assert_eq!(def.data_key(), "tags");
    }
}
