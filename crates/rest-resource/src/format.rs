//! Wire conventions and root-element toggles.

use serde::{Deserialize, Serialize};

/// Wrapping convention used for payloads of a resource type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Format {
    /// Plain payloads, or a singular root element when one is enabled.
    #[default]
    None,
    /// Serializer-style: `{article: {...}}`, lists under `data.articles`.
    ActiveModelSerializers,
    /// JSON:API-style: `{articles: [{...}]}`, lists under `data.articles`.
    JsonApi,
}

/// A root-element toggle: off, on with the type's root element, or on with
/// an explicit key.
///
/// Deserializes from `false`, `true` or a string key.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "RootToggle", into = "RootToggle")]
pub enum RootOption {
    #[default]
    Disabled,
    Enabled,
    Key(String),
}

impl RootOption {
    /// The wrapper key this toggle selects, given the type's root element.
    pub fn element(&self, root_element: &str) -> Option<String> {
        match self {
            RootOption::Disabled => None,
            RootOption::Enabled => Some(root_element.to_string()),
            RootOption::Key(key) => Some(key.clone()),
        }
    }
}

impl From<bool> for RootOption {
    fn from(enabled: bool) -> Self {
        if enabled {
            RootOption::Enabled
        } else {
            RootOption::Disabled
        }
    }
}

impl From<&str> for RootOption {
    fn from(key: &str) -> Self {
        RootOption::Key(key.to_string())
    }
}

impl From<String> for RootOption {
    fn from(key: String) -> Self {
        RootOption::Key(key)
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RootToggle {
    Flag(bool),
    Key(String),
}

impl From<RootToggle> for RootOption {
    fn from(toggle: RootToggle) -> Self {
        match toggle {
            RootToggle::Flag(flag) => flag.into(),
            RootToggle::Key(key) => RootOption::Key(key),
        }
    }
}

impl From<RootOption> for RootToggle {
    fn from(option: RootOption) -> Self {
        match option {
            RootOption::Disabled => RootToggle::Flag(false),
            RootOption::Enabled => RootToggle::Flag(true),
            RootOption::Key(key) => RootToggle::Key(key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn root_option_deserializes_from_bool_or_key() {
        let off: RootOption = serde_json::from_value(json!(false)).unwrap();
        let on: RootOption = serde_json::from_value(json!(true)).unwrap();
        let key: RootOption = serde_json::from_value(json!("post")).unwrap();

        assert_eq!(off, RootOption::Disabled);
        assert_eq!(on, RootOption::Enabled);
        assert_eq!(key, RootOption::Key("post".into()));
    }

    #[test]
    fn root_option_serializes_back_to_wire_form() {
        assert_eq!(serde_json::to_value(RootOption::Enabled).unwrap(), json!(true));
        assert_eq!(serde_json::to_value(RootOption::Key("x".into())).unwrap(), json!("x"));
    }

    #[test]
    fn element_selects_key() {
        assert_eq!(RootOption::Disabled.element("article"), None);
        assert_eq!(RootOption::Enabled.element("article").as_deref(), Some("article"));
        assert_eq!(RootOption::from("post").element("article").as_deref(), Some("post"));
    }

    #[test]
    fn format_uses_snake_case_names() {
        let f: Format = serde_json::from_value(json!("json_api")).unwrap();
        assert_eq!(f, Format::JsonApi);
        let f: Format = serde_json::from_value(json!("active_model_serializers")).unwrap();
        assert_eq!(f, Format::ActiveModelSerializers);
    }
}
