//! Configuration resolution over the parent chain.
//!
//! Every lookup walks the chain from the type itself up to the root and
//! returns the first local override, falling back to the option's default.
//! Nothing is flattened into subtypes, so a declaration only ever affects
//! the type it belongs to and the types below it.

use rest_resource_util::{demodulize, pluralize, underscore};

use crate::association::AssociationsByKind;
use crate::declaration::ResourceDeclaration;
use crate::format::{Format, RootOption};
use crate::registry::{ResourceTypeId, TypeRegistry};

/// A resource type seen through its registry.
#[derive(Debug, Clone, Copy)]
pub struct ResourceType<'r> {
    registry: &'r TypeRegistry,
    id: ResourceTypeId,
}

impl<'r> ResourceType<'r> {
    pub(crate) fn new(registry: &'r TypeRegistry, id: ResourceTypeId) -> Self {
        Self { registry, id }
    }

    pub fn id(&self) -> ResourceTypeId {
        self.id
    }

    pub fn registry(&self) -> &'r TypeRegistry {
        self.registry
    }

    pub fn name(&self) -> &'r str {
        &self.declaration().name
    }

    /// The type's own declaration, without anything inherited.
    pub fn declaration(&self) -> &'r ResourceDeclaration {
        &self.registry.descriptor(self.id).declaration
    }

    pub fn parent(&self) -> Option<ResourceType<'r>> {
        self.registry
            .descriptor(self.id)
            .parent
            .map(|id| ResourceType::new(self.registry, id))
    }

    /// This type followed by its parents, nearest first.
    pub fn ancestors(&self) -> Ancestors<'r> {
        Ancestors { next: Some(*self) }
    }

    /// Nearest local override picked by `option`.
    pub fn resolve<T>(&self, option: impl Fn(&'r ResourceDeclaration) -> Option<T>) -> Option<T> {
        self.ancestors().find_map(|ty| option(ty.declaration()))
    }

    pub fn include_root_in_json(&self) -> RootOption {
        self.resolve(|d| d.include_root_in_json.clone())
            .unwrap_or_default()
    }

    pub fn include_root_in_embedded_json(&self) -> RootOption {
        self.resolve(|d| d.include_root_in_embedded_json.clone())
            .unwrap_or_default()
    }

    pub fn parse_root_in_json(&self) -> RootOption {
        self.resolve(|d| d.parse_root_in_json.clone())
            .unwrap_or_default()
    }

    pub fn request_new_object_on_build(&self) -> bool {
        self.resolve(|d| d.request_new_object_on_build)
            .unwrap_or(false)
    }

    /// Whether this type or any ancestor declares the serializer-style format.
    pub fn is_serializer_format(&self) -> bool {
        self.declares_format(Format::ActiveModelSerializers)
    }

    /// Whether this type or any ancestor declares the JSON:API format.
    pub fn is_json_api_format(&self) -> bool {
        self.declares_format(Format::JsonApi)
    }

    /// Effective format; JSON:API wins when both are declared in the chain.
    pub fn format(&self) -> Format {
        if self.is_json_api_format() {
            Format::JsonApi
        } else if self.is_serializer_format() {
            Format::ActiveModelSerializers
        } else {
            Format::None
        }
    }

    fn declares_format(&self, format: Format) -> bool {
        self.ancestors()
            .any(|ty| ty.declaration().format == Some(format))
    }

    /// Root element of this type.
    ///
    /// An explicit declaration wins. Otherwise the demodulized, underscored
    /// type name is used, pluralized for JSON:API. The default is computed
    /// once per type.
    pub fn root_element(&self) -> &'r str {
        if let Some(element) = &self.declaration().root_element {
            return element;
        }
        self.registry
            .descriptor(self.id)
            .default_root_element
            .get_or_init(|| {
                let name = demodulize(self.name());
                let element = if self.is_json_api_format() {
                    underscore(&pluralize(name))
                } else {
                    underscore(name)
                };
                tracing::trace!(resource = self.name(), %element, "computed root element");
                element
            })
    }

    /// Wrapper key for outbound payloads, if wrapping is enabled.
    pub fn included_root_element(&self) -> Option<String> {
        self.include_root_in_json().element(self.root_element())
    }

    /// Wrapper key for embedded outbound payloads, if wrapping is enabled.
    pub fn embedded_root_element(&self) -> Option<String> {
        self.include_root_in_embedded_json()
            .element(self.root_element())
    }

    /// Key unwrapped from inbound payloads, if unwrapping is enabled.
    pub fn parsed_root_element(&self) -> Option<String> {
        self.parse_root_in_json().element(self.root_element())
    }

    /// Key holding the record list of a wrapped collection payload.
    pub fn pluralized_parsed_root_element(&self) -> String {
        match self.parsed_root_element() {
            Some(element) => pluralize(&element),
            None => pluralize(self.root_element()),
        }
    }

    /// Inherited associations followed by the type's own, grouped by kind.
    pub fn associations(&self) -> AssociationsByKind {
        let mut chain: Vec<ResourceType<'r>> = self.ancestors().collect();
        chain.reverse();

        let mut grouped = AssociationsByKind::new();
        for ty in chain {
            for definition in &ty.declaration().associations {
                grouped
                    .entry(definition.kind)
                    .or_default()
                    .push(definition.clone());
            }
        }
        grouped
    }
}

/// Iterator over a type and its parents.
pub struct Ancestors<'r> {
    next: Option<ResourceType<'r>>,
}

impl<'r> Iterator for Ancestors<'r> {
    type Item = ResourceType<'r>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        self.next = current.parent();
        Some(current)
    }
}
