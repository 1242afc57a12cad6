//! Resource-type registry.
//!
//! Types live in an arena; each descriptor keeps the index of its parent so
//! configuration can be resolved by walking the chain. A registry is built
//! once through [`TypeRegistryBuilder`] and is read-only afterwards. One
//! registry may be installed process-wide with [`install`].

use std::any::TypeId;
use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

use crate::config::{ApiSettings, RegistryConfig};
use crate::declaration::ResourceDeclaration;
use crate::error::RegistryError;
use crate::resolver::ResourceType;

/// Index of a resource type inside its registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ResourceTypeId(pub(crate) usize);

impl fmt::Display for ResourceTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug)]
pub(crate) struct TypeDescriptor {
    pub(crate) declaration: ResourceDeclaration,
    pub(crate) parent: Option<ResourceTypeId>,
    /// Default root element, computed on first read.
    pub(crate) default_root_element: OnceLock<String>,
}

/// Frozen set of resource types sharing one [`ApiSettings`].
#[derive(Debug, Default)]
pub struct TypeRegistry {
    pub(crate) types: Vec<TypeDescriptor>,
    by_name: HashMap<String, ResourceTypeId>,
    by_rust_type: HashMap<TypeId, ResourceTypeId>,
    api: ApiSettings,
}

impl TypeRegistry {
    pub fn builder() -> TypeRegistryBuilder {
        TypeRegistryBuilder::default()
    }

    /// Builds a registry from a TOML document (see [`RegistryConfig`]).
    pub fn from_toml_str(text: &str) -> Result<Self, RegistryError> {
        Self::from_config(RegistryConfig::from_toml_str(text)?)
    }

    pub fn from_config(config: RegistryConfig) -> Result<Self, RegistryError> {
        let mut builder = Self::builder().api(config.api);
        for declaration in config.resources {
            builder.declare(declaration)?;
        }
        Ok(builder.build())
    }

    pub fn api(&self) -> &ApiSettings {
        &self.api
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Returns a view of one declared type.
    pub fn get(&self, id: ResourceTypeId) -> Option<ResourceType<'_>> {
        (id.0 < self.types.len()).then(|| ResourceType::new(self, id))
    }

    /// Looks a type up by its declared name.
    pub fn by_name(&self, name: &str) -> Option<ResourceType<'_>> {
        self.by_name.get(name).map(|&id| ResourceType::new(self, id))
    }

    /// Looks a type up by the Rust type it was declared for.
    pub fn lookup<T: 'static>(&self) -> Option<ResourceType<'_>> {
        self.by_rust_type
            .get(&TypeId::of::<T>())
            .map(|&id| ResourceType::new(self, id))
    }

    pub(crate) fn descriptor(&self, id: ResourceTypeId) -> &TypeDescriptor {
        &self.types[id.0]
    }
}

/// Collects declarations; parents must be declared before their children.
#[derive(Debug, Default)]
pub struct TypeRegistryBuilder {
    registry: TypeRegistry,
}

impl TypeRegistryBuilder {
    pub fn api(mut self, api: ApiSettings) -> Self {
        self.registry.api = api;
        self
    }

    /// Registers one type and returns its id.
    pub fn declare(
        &mut self,
        declaration: ResourceDeclaration,
    ) -> Result<ResourceTypeId, RegistryError> {
        let name = declaration.name.trim().to_string();
        if name.is_empty() {
            return Err(RegistryError::EmptyTypeName);
        }
        if self.registry.by_name.contains_key(&name) {
            return Err(RegistryError::DuplicateType(name));
        }
        let parent = match declaration.parent.as_deref() {
            Some(parent) => Some(*self.registry.by_name.get(parent.trim()).ok_or_else(|| {
                RegistryError::UnknownParent {
                    name: name.clone(),
                    parent: parent.to_string(),
                }
            })?),
            None => None,
        };

        let id = ResourceTypeId(self.registry.types.len());
        tracing::debug!(resource = %name, ?parent, "declared resource type");
        self.registry.types.push(TypeDescriptor {
            declaration: ResourceDeclaration { name: name.clone(), ..declaration },
            parent,
            default_root_element: OnceLock::new(),
        });
        self.registry.by_name.insert(name, id);
        Ok(id)
    }

    /// Registers one type keyed by the Rust type `T`.
    pub fn declare_for<T: 'static>(
        &mut self,
        declaration: ResourceDeclaration,
    ) -> Result<ResourceTypeId, RegistryError> {
        let id = self.declare(declaration)?;
        self.registry.by_rust_type.insert(TypeId::of::<T>(), id);
        Ok(id)
    }

    /// Mutable access to a declaration that is not frozen yet.
    ///
    /// Children declared earlier observe the change, since nothing is
    /// copied into them.
    pub fn declaration_mut(&mut self, id: ResourceTypeId) -> Option<&mut ResourceDeclaration> {
        self.registry
            .types
            .get_mut(id.0)
            .map(|descriptor| &mut descriptor.declaration)
    }

    pub fn build(self) -> TypeRegistry {
        self.registry
    }
}

static GLOBAL: OnceLock<TypeRegistry> = OnceLock::new();

/// Installs the process-wide registry. Succeeds once.
pub fn install(registry: TypeRegistry) -> Result<&'static TypeRegistry, RegistryError> {
    let mut pending = Some(registry);
    let installed = GLOBAL.get_or_init(|| pending.take().unwrap_or_default());
    if pending.is_some() {
        return Err(RegistryError::AlreadyInstalled);
    }
    tracing::info!(types = installed.len(), "installed resource registry");
    Ok(installed)
}

/// The process-wide registry, if one was installed.
pub fn global() -> Option<&'static TypeRegistry> {
    GLOBAL.get()
}
