//! Wire-format cases replayed from `tests/fixtures/wire_formats.toml`.

use std::fs;
use std::path::Path;

use rest_resource::{ChangeSet, TypeRegistry};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct CaseFile {
    case: Vec<Case>,
}

#[derive(Debug, Deserialize)]
struct Case {
    name: String,
    op: String,
    #[serde(rename = "type")]
    type_name: String,
    config: String,
    input: String,
    expected: String,
    #[serde(default)]
    changes: Vec<String>,
}

fn load_cases() -> Vec<Case> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("wire_formats.toml");
    let text = fs::read_to_string(&path).unwrap_or_else(|e| panic!("failed to read {:?}: {e}", path));
    let file: CaseFile =
        toml::from_str(&text).unwrap_or_else(|e| panic!("failed to parse {:?}: {e}", path));
    file.case
}

fn evaluate(case: &Case) -> Value {
    let registry = TypeRegistry::from_toml_str(&case.config)
        .unwrap_or_else(|e| panic!("{}: bad config: {e}", case.name));
    let ty = registry
        .by_name(&case.type_name)
        .unwrap_or_else(|| panic!("{}: unknown type {}", case.name, case.type_name));
    let input = match serde_json::from_str::<Value>(&case.input) {
        Ok(Value::Object(map)) => map,
        other => panic!("{}: input must be an object, got {other:?}", case.name),
    };

    match case.op.as_str() {
        "parse" => Value::Object(ty.parse(input)),
        "extract_array" => Value::Array(ty.extract_array(input)),
        "to_params" => {
            let mut resource = ty.instantiate(input);
            resource.changes = case.changes.iter().cloned().collect::<ChangeSet>();
            Value::Object(
                resource
                    .to_params(&registry)
                    .unwrap_or_else(|e| panic!("{}: {e}", case.name)),
            )
        }
        other => panic!("{}: unknown op {other}", case.name),
    }
}

#[test]
fn wire_format_cases() {
    let cases = load_cases();
    assert!(!cases.is_empty());

    let mut failures = Vec::new();
    for case in &cases {
        let expected: Value = serde_json::from_str(&case.expected)
            .unwrap_or_else(|e| panic!("{}: bad expected JSON: {e}", case.name));
        let actual = evaluate(case);
        if actual != expected {
            failures.push(format!("{}: expected {expected}, got {actual}", case.name));
        }
    }
    assert!(failures.is_empty(), "failing cases:\n{}", failures.join("\n"));
}
