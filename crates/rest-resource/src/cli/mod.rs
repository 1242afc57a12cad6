//! `rest-resource` command-line tool.
//!
//! Provides the core logic used by the binary entry point: a registry is
//! loaded from a TOML config, a JSON document is read, and one marshaling
//! operation of the named type is applied to it.
//!
//! - `parse`              — unwrap a detail envelope `{data, metadata, errors}`
//! - `parse-collection`   — extract and unwrap a list envelope
//! - `to-params`          — serialize plain attributes into a request payload
//! - `to-embedded-params` — same, with the embedded root element

use serde_json::{json, Value};
use std::str::FromStr;
use thiserror::Error;

use crate::error::{MarshalError, RegistryError};
use crate::registry::TypeRegistry;

// ── Errors ────────────────────────────────────────────────────────────────

#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Registry(#[from] RegistryError),

    #[error("{0}")]
    Marshal(#[from] MarshalError),

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Expected a JSON object on input")]
    NotAnObject,
}

// ── Commands ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Parse,
    ParseCollection,
    ToParams,
    ToEmbeddedParams,
}

impl FromStr for Command {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "parse" => Ok(Command::Parse),
            "parse-collection" => Ok(Command::ParseCollection),
            "to-params" => Ok(Command::ToParams),
            "to-embedded-params" => Ok(Command::ToEmbeddedParams),
            other => Err(CliError::UnknownCommand(other.to_string())),
        }
    }
}

/// Runs `command` for `type_name` on the JSON text `input`, returning JSON text.
pub fn run(
    registry: &TypeRegistry,
    command: Command,
    type_name: &str,
    input: &str,
) -> Result<String, CliError> {
    let ty = registry
        .by_name(type_name)
        .ok_or_else(|| RegistryError::UnknownType(type_name.to_string()))?;
    let document = match serde_json::from_str::<Value>(input)? {
        Value::Object(map) => map,
        _ => return Err(CliError::NotAnObject),
    };

    let output = match command {
        Command::Parse => {
            let record = ty.parse_record(document);
            json!({
                "data": record.attributes,
                "metadata": record.metadata,
                "errors": record.errors,
            })
        }
        Command::ParseCollection => {
            let collection = ty.parse_collection(document);
            json!({
                "data": collection.records,
                "metadata": collection.metadata,
                "errors": collection.errors,
            })
        }
        Command::ToParams => Value::Object(ty.instantiate(document).to_params(registry)?),
        Command::ToEmbeddedParams => {
            Value::Object(ty.instantiate(document).to_embedded_params(registry)?)
        }
    };
    Ok(serde_json::to_string(&output)?)
}

/// Loads a registry from TOML text.
pub fn load_registry(config: &str) -> Result<TypeRegistry, CliError> {
    Ok(TypeRegistry::from_toml_str(config)?)
}

/// Installs a `tracing` subscriber writing to stderr, filtered by `RUST_LOG`.
pub fn setup_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: &str = r#"
        [[resource]]
        name = "User"

        [[resource]]
        name = "Post"
        include_root_in_json = true
        parse_root_in_json = true
        format = "json_api"

        [[resource.associations]]
        name = "author"
        kind = "belongs_to"
        target = "User"
    "#;

    #[test]
    fn parses_commands() {
        assert_eq!("parse".parse::<Command>().unwrap(), Command::Parse);
        assert_eq!(
            "to-embedded-params".parse::<Command>().unwrap(),
            Command::ToEmbeddedParams
        );
        assert!(matches!(
            "nope".parse::<Command>(),
            Err(CliError::UnknownCommand(_))
        ));
    }

    #[test]
    fn runs_parse() {
        let registry = load_registry(CONFIG).unwrap();
        let out = run(
            &registry,
            Command::Parse,
            "Post",
            r#"{"data": {"posts": [{"id": 1}]}, "metadata": {"page": 1}}"#,
        )
        .unwrap();
        let out: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(out, json!({"data": {"id": 1}, "metadata": {"page": 1}, "errors": null}));
    }

    #[test]
    fn runs_to_params_with_nested_author() {
        let registry = load_registry(CONFIG).unwrap();
        let out = run(
            &registry,
            Command::ToParams,
            "Post",
            r#"{"title": "t", "author": {"name": "ann"}}"#,
        )
        .unwrap();
        let out: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(out, json!({"posts": [{"title": "t", "author": {"name": "ann"}}]}));
    }

    #[test]
    fn rejects_unknown_type_and_non_objects() {
        let registry = load_registry(CONFIG).unwrap();
        let err = run(&registry, Command::Parse, "Nope", "{}").unwrap_err();
        assert!(matches!(err, CliError::Registry(RegistryError::UnknownType(_))));

        let err = run(&registry, Command::Parse, "Post", "[1]").unwrap_err();
        assert!(matches!(err, CliError::NotAnObject));
    }
}
