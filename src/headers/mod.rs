//! Request header files
//!
//! Headers are read from a JSON or YAML mapping of header name to either a
//! single value or a list of values. The reader is chosen by file extension
//! and can be replaced per format through [`HeaderReaderRegistry`].

use crate::{
    error::{AppError, Result},
    models::Headers,
};
use serde::Deserialize;
use std::{collections::BTreeMap, path::Path};

/// Turns raw file content into headers
pub type HeaderReader = fn(&[u8]) -> Result<Headers>;

/// Header values as written in a file
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawValues {
    One(String),
    Many(Vec<String>),
}

impl From<RawValues> for Vec<String> {
    fn from(raw: RawValues) -> Self {
        match raw {
            RawValues::One(value) => vec![value],
            RawValues::Many(values) => values,
        }
    }
}

fn into_headers(raw: BTreeMap<String, RawValues>) -> Headers {
    raw.into_iter().map(|(name, values)| (name, values.into())).collect()
}

/// Parse a JSON object of headers
pub fn json_read(raw: &[u8]) -> Result<Headers> {
    let parsed: BTreeMap<String, RawValues> =
        serde_json::from_slice(raw).map_err(|e| AppError::parse(format!("invalid JSON headers: {}", e)))?;
    Ok(into_headers(parsed))
}

/// Parse a YAML mapping of headers.
///
/// Scalar values (strings, numbers, booleans) are taken as their text, so
/// `DNT: 1` reads as `"1"`. Null and nested mapping values are rejected.
pub fn yaml_read(raw: &[u8]) -> Result<Headers> {
    let parsed: BTreeMap<String, serde_yaml::Value> =
        serde_yaml::from_slice(raw).map_err(|e| AppError::parse(format!("invalid YAML headers: {}", e)))?;

    parsed
        .into_iter()
        .map(|(name, value)| -> Result<(String, Vec<String>)> {
            let values = match value {
                serde_yaml::Value::Sequence(items) => items
                    .into_iter()
                    .map(|item| yaml_scalar(&name, item))
                    .collect::<Result<Vec<_>>>()?,
                other => vec![yaml_scalar(&name, other)?],
            };
            Ok((name, values))
        })
        .collect()
}

fn yaml_scalar(name: &str, value: serde_yaml::Value) -> Result<String> {
    match value {
        serde_yaml::Value::String(text) => Ok(text),
        serde_yaml::Value::Number(number) => Ok(number.to_string()),
        serde_yaml::Value::Bool(flag) => Ok(flag.to_string()),
        _ => Err(AppError::parse(format!(
            "invalid YAML headers: header '{}' must be a scalar or a list of scalars",
            name
        ))),
    }
}

/// Extension to reader table
#[derive(Debug, Clone)]
pub struct HeaderReaderRegistry {
    readers: BTreeMap<String, HeaderReader>,
}

impl HeaderReaderRegistry {
    /// Registry with the built-in `json`, `yaml` and `yml` readers
    pub fn new() -> Self {
        let mut registry = Self { readers: BTreeMap::new() };
        registry.register("json", json_read);
        registry.register("yaml", yaml_read);
        registry.register("yml", yaml_read);
        registry
    }

    /// Set the reader for a format, replacing any existing one
    pub fn register<S: Into<String>>(&mut self, format: S, reader: HeaderReader) {
        self.readers.insert(format.into(), reader);
    }

    /// Supported file extensions, sorted
    pub fn formats(&self) -> Vec<&str> {
        self.readers.keys().map(String::as_str).collect()
    }

    /// Read headers from `path`, picking the reader from its extension
    pub fn read_from_file(&self, path: &Path) -> Result<Headers> {
        let format = path.extension().and_then(|ext| ext.to_str()).unwrap_or_default();
        let reader = self
            .readers
            .get(format)
            .ok_or_else(|| AppError::validation(format!("unsupported format {}", format)))?;

        let raw = std::fs::read(path)
            .map_err(|e| AppError::io(format!("read {} file: {}", path.display(), e)))?;

        reader(&raw)
    }
}

impl Default for HeaderReaderRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Read headers with the built-in readers
pub fn read_from_file(path: &Path) -> Result<Headers> {
    HeaderReaderRegistry::new().read_from_file(path)
}
