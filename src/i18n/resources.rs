use std::collections::HashMap;

use serde_json::Value;

use super::loader::LoadError;
use crate::core::locale::LanguageCode;

/// Translation strings for one language, keyed by dotted path
/// (`"emergency.title"` for `{"emergency": {"title": ...}}`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceSet {
    language: LanguageCode,
    entries: HashMap<String, String>,
}

impl ResourceSet {
    pub fn new(language: LanguageCode) -> Self {
        Self {
            language,
            entries: HashMap::new(),
        }
    }

    /// Builds a set from a flat or nested JSON object.
    pub fn from_json(language: LanguageCode, value: &Value) -> Result<Self, LoadError> {
        let Value::Object(map) = value else {
            return Err(LoadError::Parse(format!(
                "translation resource for '{language}' is not a JSON object"
            )));
        };
        let mut entries = HashMap::new();
        for (key, child) in map {
            flatten_into(&mut entries, key.clone(), child);
        }
        Ok(Self { language, entries })
    }

    pub fn from_json_str(language: LanguageCode, json: &str) -> Result<Self, LoadError> {
        let value: Value =
            serde_json::from_str(json).map_err(|e| LoadError::Parse(e.to_string()))?;
        Self::from_json(language, &value)
    }

    pub fn language(&self) -> LanguageCode {
        self.language
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }
}

fn flatten_into(out: &mut HashMap<String, String>, prefix: String, value: &Value) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                flatten_into(out, format!("{prefix}.{key}"), child);
            }
        }
        Value::Array(items) => {
            for (i, child) in items.iter().enumerate() {
                flatten_into(out, format!("{prefix}.{i}"), child);
            }
        }
        Value::String(s) => {
            out.insert(prefix, s.clone());
        }
        Value::Null => {}
        other => {
            out.insert(prefix, other.to_string());
        }
    }
}

/// Replaces `{{name}}` placeholders with the matching argument. Unknown
/// placeholders are left as written.
pub fn interpolate(template: &str, args: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find("}}") {
            Some(end) => {
                let name = after[..end].trim();
                match args.iter().find(|(k, _)| *k == name) {
                    Some((_, v)) => out.push_str(v),
                    None => out.push_str(&rest[start..start + 2 + end + 2]),
                }
                rest = &after[end + 2..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_keys_are_flattened() {
        let json = r#"{
            "app": { "title": "Blood Link", "nav": { "home": "Home" } },
            "count": 3,
            "steps": ["Register", "Donate"],
            "missing": null
        }"#;
        let set = ResourceSet::from_json_str(LanguageCode::En, json).unwrap();
        assert_eq!(set.get("app.title"), Some("Blood Link"));
        assert_eq!(set.get("app.nav.home"), Some("Home"));
        assert_eq!(set.get("count"), Some("3"));
        assert_eq!(set.get("steps.1"), Some("Donate"));
        assert_eq!(set.get("missing"), None);
        assert_eq!(set.len(), 5);
    }

    #[test]
    fn test_non_object_is_rejected() {
        assert!(matches!(
            ResourceSet::from_json_str(LanguageCode::En, "[1, 2]"),
            Err(LoadError::Parse(_))
        ));
        assert!(matches!(
            ResourceSet::from_json_str(LanguageCode::En, "{oops"),
            Err(LoadError::Parse(_))
        ));
    }

    #[test]
    fn test_interpolate() {
        assert_eq!(
            interpolate("{{count}} requests in {{ city }}", &[("count", "4"), ("city", "Pune")]),
            "4 requests in Pune"
        );
        assert_eq!(interpolate("Hi {{name}}", &[]), "Hi {{name}}");
        assert_eq!(interpolate("open {{brace", &[("brace", "x")]), "open {{brace");
        assert_eq!(interpolate("plain", &[]), "plain");
    }
}
