//! Descriptor documents: one YAML mapping per dataset.
//!
//! Descriptors have an open schema. Fields are carried through untouched, in
//! document order, and the only field the indexer owns is `url`.

use serde::Serialize;
use serde_json::{Map, Value};
use std::path::Path;
use tokio::fs;

use crate::error::IndexError;
use crate::reference::DescriptorReference;

/// Key holding the public URL of the descriptor's data file.
pub const URL_KEY: &str = "url";

/// Parsed descriptor fields, serialized as a plain JSON object.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Descriptor {
    fields: Map<String, Value>,
}

impl Descriptor {
    /// Parse YAML text. `path` is only used for error reporting.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::Parse`] for malformed YAML and
    /// [`IndexError::NotAMapping`] when the document is not a key/value mapping.
    pub fn parse(text: &str, path: &Path) -> Result<Self, IndexError> {
        let yaml: serde_yaml::Value =
            serde_yaml::from_str(text).map_err(|source| IndexError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        match yaml_to_json(yaml) {
            Value::Object(fields) => Ok(Self { fields }),
            _ => Err(IndexError::NotAMapping {
                path: path.to_path_buf(),
            }),
        }
    }

    /// Set `url`, replacing any previous value in place.
    ///
    /// Returns the previous value if it differed from `url`.
    pub fn set_url(&mut self, url: &str) -> Option<Value> {
        let previous = self
            .fields
            .insert(URL_KEY.to_string(), Value::String(url.to_string()))?;
        (previous.as_str() != Some(url)).then_some(previous)
    }

    /// Current `url` value, if it is a string.
    pub fn url(&self) -> Option<&str> {
        self.fields.get(URL_KEY).and_then(Value::as_str)
    }

    /// Look up a field.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// All fields in document order.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}

/// Read, parse and augment the descriptor at `reference.local_path`.
///
/// # Errors
///
/// Returns [`IndexError::Read`] if the file cannot be read, or a parse error
/// (see [`Descriptor::parse`]) if its contents are not a YAML mapping.
pub async fn load_descriptor(reference: &DescriptorReference) -> Result<Descriptor, IndexError> {
    let path = &reference.local_path;
    let text = fs::read_to_string(path)
        .await
        .map_err(|source| IndexError::Read {
            path: path.clone(),
            source,
        })?;

    let mut descriptor = Descriptor::parse(&text, path)?;
    if let Some(previous) = descriptor.set_url(&reference.source_url) {
        tracing::warn!(
            "{}: overwriting url {previous} with {}",
            path.display(),
            reference.source_url
        );
    }
    tracing::debug!("loaded {}", path.display());

    Ok(descriptor)
}

/// Convert a YAML value into its JSON equivalent.
///
/// Scalar mapping keys are stringified and tags are dropped. Timestamps stay
/// the strings they were written as.
fn yaml_to_json(value: serde_yaml::Value) -> Value {
    use serde_yaml::Value as Yaml;

    match value {
        Yaml::Null => Value::Null,
        Yaml::Bool(b) => Value::Bool(b),
        Yaml::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::from(i)
            } else if let Some(u) = n.as_u64() {
                Value::from(u)
            } else {
                n.as_f64().map_or(Value::Null, float_to_json)
            }
        }
        Yaml::String(s) => Value::String(s),
        Yaml::Sequence(items) => Value::Array(items.into_iter().map(yaml_to_json).collect()),
        Yaml::Mapping(mapping) => Value::Object(
            mapping
                .into_iter()
                .map(|(k, v)| (yaml_key(k), yaml_to_json(v)))
                .collect(),
        ),
        Yaml::Tagged(tagged) => yaml_to_json(tagged.value),
    }
}

/// JSON number for `f` as a JavaScript serializer prints it: integral values
/// lose their fraction (`1.0` becomes `1`), non-finite values become `null`.
#[allow(clippy::float_cmp, clippy::cast_possible_truncation)]
fn float_to_json(f: f64) -> Value {
    // 2^53: beyond this an f64 no longer represents every integer.
    const MAX_SAFE: f64 = 9_007_199_254_740_992.0;

    if f.is_finite() && f.fract() == 0.0 && f.abs() <= MAX_SAFE {
        Value::from(f as i64)
    } else {
        serde_json::Number::from_f64(f).map_or(Value::Null, Value::Number)
    }
}

fn yaml_key(key: serde_yaml::Value) -> String {
    match key {
        serde_yaml::Value::String(s) => s,
        other => match yaml_to_json(other) {
            Value::String(s) => s,
            json => json.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn parse(text: &str) -> Result<Descriptor, IndexError> {
        Descriptor::parse(text, Path::new("test.yaml"))
    }

    #[test]
    fn test_parse_keeps_document_order() {
        let descriptor = parse("title: CO2 emissions\nunits: kt\ndescription: Annual totals\n")
            .unwrap();
        let keys: Vec<_> = descriptor.fields().keys().map(String::as_str).collect();
        assert_eq!(keys, ["title", "units", "description"]);
    }

    #[test]
    fn test_set_url_appends_new_key() {
        let mut descriptor = parse("title: CO2 emissions").unwrap();
        assert_eq!(descriptor.set_url("https://example.com/energy/co2.csv"), None);
        assert_eq!(descriptor.url(), Some("https://example.com/energy/co2.csv"));
        assert_eq!(descriptor.fields().keys().last().map(String::as_str), Some("url"));
    }

    #[test]
    fn test_set_url_overwrites_in_place() {
        let mut descriptor = parse("url: stale\ntitle: CO2").unwrap();
        let previous = descriptor.set_url("https://example.com/energy/co2.csv");
        assert_eq!(previous, Some(Value::String("stale".into())));
        assert_eq!(descriptor.fields().len(), 2);
        assert_eq!(descriptor.fields().keys().next().map(String::as_str), Some("url"));
        assert_eq!(descriptor.url(), Some("https://example.com/energy/co2.csv"));
    }

    #[test]
    fn test_set_url_same_value_reports_nothing() {
        let mut descriptor = parse("url: https://example.com/a.csv").unwrap();
        assert_eq!(descriptor.set_url("https://example.com/a.csv"), None);
    }

    #[test]
    fn test_parse_malformed_yaml() {
        let err = parse("title: [unclosed").unwrap_err();
        assert!(matches!(err, IndexError::Parse { .. }));
        assert!(err.is_parse_error());
    }

    #[test]
    fn test_parse_rejects_non_mapping_documents() {
        assert!(matches!(parse("- a\n- b"), Err(IndexError::NotAMapping { .. })));
        assert!(matches!(parse("just a string"), Err(IndexError::NotAMapping { .. })));
        assert!(parse("").unwrap_err().is_parse_error());
    }

    #[test]
    fn test_nested_values_and_scalar_keys_convert() {
        let descriptor = parse("year_range: [2010, 2019]\nratio: 0.5\n2015: baseline\nsource:\n  name: ONS\n")
            .unwrap();
        assert_eq!(descriptor.get("year_range"), Some(&serde_json::json!([2010, 2019])));
        assert_eq!(descriptor.get("ratio"), Some(&serde_json::json!(0.5)));
        assert_eq!(descriptor.get("2015"), Some(&serde_json::json!("baseline")));
        assert_eq!(descriptor.get("source"), Some(&serde_json::json!({"name": "ONS"})));
    }

    #[test]
    fn test_integral_floats_serialize_without_fraction() {
        let descriptor = parse("scale: 1.0\nnegative: -2.0\nratio: 2.5\nnan: .nan\n")
            .unwrap();
        let json = serde_json::to_string(&descriptor).unwrap();
        assert_eq!(
            json,
            r#"{"scale":1,"negative":-2,"ratio":2.5,"nan":null}"#
        );
    }

    #[test]
    fn test_timestamps_stay_as_written() {
        let descriptor = parse("updated: 2020-01-01\n").unwrap();
        assert_eq!(descriptor.get("updated"), Some(&serde_json::json!("2020-01-01")));
    }

    #[tokio::test]
    async fn test_load_descriptor_sets_url() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("co2.yaml");
        std::fs::write(&path, "title: CO2 emissions\n").unwrap();

        let reference = DescriptorReference {
            local_path: path,
            source_url: "https://example.com/energy/co2.csv".to_string(),
        };
        let descriptor = load_descriptor(&reference).await.unwrap();
        assert_eq!(
            serde_json::to_value(&descriptor).unwrap(),
            serde_json::json!({
                "title": "CO2 emissions",
                "url": "https://example.com/energy/co2.csv"
            })
        );
    }

    #[tokio::test]
    async fn test_load_missing_descriptor_is_read_error() {
        let reference = DescriptorReference {
            local_path: PathBuf::from("/nonexistent/energy/co2.yaml"),
            source_url: String::new(),
        };
        let err = load_descriptor(&reference).await.unwrap_err();
        assert!(matches!(err, IndexError::Read { .. }));
    }
}
