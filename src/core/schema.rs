use super::codec::Envelope;
use schemars::schema_for;
use serde_json::{json, Value};

/// JSON Schema of the prompt envelope, flattened for publishing: no
/// `$schema`/`title`/`definitions` noise, and optional fields expressed as
/// `type` + `nullable` instead of a type array.
pub fn envelope_schema() -> serde_json::Result<Value> {
    let mut root = serde_json::to_value(schema_for!(Envelope))?;

    normalize_node(&mut root);

    if let Value::Object(ref mut map) = root {
        map.remove("$schema");
        map.remove("title");
        map.remove("definitions");
    }

    Ok(root)
}

fn normalize_node(node: &mut Value) {
    let Value::Object(map) = node else {
        return;
    };

    map.remove("default");

    // ["string", "null"] -> "string" + nullable
    let collapsed = match map.get("type") {
        Some(Value::Array(types)) if types.len() == 2 && types.contains(&json!("null")) => {
            types.iter().find(|t| *t != &json!("null")).cloned()
        }
        _ => None,
    };
    if let Some(real_type) = collapsed {
        map.insert("type".to_string(), real_type);
        map.insert("nullable".to_string(), json!(true));
    }

    if let Some(Value::Object(props)) = map.get_mut("properties") {
        for prop in props.values_mut() {
            normalize_node(prop);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_lists_the_four_envelope_fields() {
        let schema = envelope_schema().unwrap();
        let props = schema["properties"].as_object().unwrap();
        let mut keys: Vec<&str> = props.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, ["context_text", "prompt_kind", "prompt_text", "version"]);
        assert_eq!(schema["type"], json!("object"));
    }

    #[test]
    fn optional_strings_become_nullable() {
        let schema = envelope_schema().unwrap();
        for field in ["context_text", "prompt_text", "prompt_kind"] {
            let prop = &schema["properties"][field];
            assert_eq!(prop["type"], json!("string"), "{field}");
            assert_eq!(prop["nullable"], json!(true), "{field}");
        }
    }

    #[test]
    fn root_noise_is_removed() {
        let schema = envelope_schema().unwrap();
        assert!(schema.get("$schema").is_none());
        assert!(schema.get("title").is_none());
        assert!(schema["properties"]["version"].get("default").is_none());
        assert!(schema["description"].as_str().is_some());
    }
}
