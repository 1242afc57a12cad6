//! API-level settings and the on-disk registry config.
//!
//! ```toml
//! [api]
//! send_only_modified_attributes = true
//!
//! [[resource]]
//! name = "Base"
//! parse_root_in_json = true
//! format = "json_api"
//!
//! [[resource]]
//! name = "Article"
//! parent = "Base"
//!
//! [[resource.associations]]
//! name = "author"
//! kind = "belongs_to"
//! target = "User"
//! ```

use serde::{Deserialize, Serialize};

use crate::declaration::ResourceDeclaration;
use crate::error::RegistryError;

pub const DEFAULT_MAX_EMBED_DEPTH: usize = 32;

/// Settings shared by every type of one API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    /// Restrict outbound payloads to changed attributes.
    pub send_only_modified_attributes: bool,
    /// Deepest nesting of embedded associations before serialization fails.
    pub max_embed_depth: usize,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            send_only_modified_attributes: false,
            max_embed_depth: DEFAULT_MAX_EMBED_DEPTH,
        }
    }
}

/// Declarations in dependency order, parents first.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RegistryConfig {
    #[serde(default)]
    pub api: ApiSettings,
    #[serde(default, rename = "resource")]
    pub resources: Vec<ResourceDeclaration>,
}

impl RegistryConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, RegistryError> {
        Ok(toml::from_str(text)?)
    }
}
