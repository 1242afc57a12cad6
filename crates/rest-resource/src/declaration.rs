//! Declaration-time configuration of one resource type.
//!
//! Every field is a *local* override: `None` means "inherit from the parent
//! type". Declarations are frozen once the registry is built.

use serde::{Deserialize, Serialize};

use crate::association::AssociationDefinition;
use crate::format::{Format, RootOption};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResourceDeclaration {
    /// Type name, possibly module-qualified (`Api::BlogPost`).
    pub name: String,
    /// Name of an already declared parent type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<Format>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_root_in_json: Option<RootOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_root_in_embedded_json: Option<RootOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parse_root_in_json: Option<RootOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_new_object_on_build: Option<bool>,
    /// Explicit root element. Applies to this type only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_element: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub associations: Vec<AssociationDefinition>,
}

impl ResourceDeclaration {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn format(mut self, format: Format) -> Self {
        self.format = Some(format);
        self
    }

    pub fn include_root_in_json(mut self, value: impl Into<RootOption>) -> Self {
        self.include_root_in_json = Some(value.into());
        self
    }

    pub fn include_root_in_embedded_json(mut self, value: impl Into<RootOption>) -> Self {
        self.include_root_in_embedded_json = Some(value.into());
        self
    }

    pub fn parse_root_in_json(mut self, value: impl Into<RootOption>) -> Self {
        self.parse_root_in_json = Some(value.into());
        self
    }

    pub fn request_new_object_on_build(mut self, value: bool) -> Self {
        self.request_new_object_on_build = Some(value);
        self
    }

    pub fn root_element(mut self, element: impl Into<String>) -> Self {
        self.root_element = Some(element.into());
        self
    }

    pub fn association(mut self, definition: AssociationDefinition) -> Self {
        self.associations.push(definition);
        self
    }
}
