//! Title lookups for table columns.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, Mutex, PoisonError};

use serde_json::Value;

/// Resolves `<namespace>.<field>` keys to display strings.
pub trait Localizer: Send + Sync {
    fn t(&self, key: &str) -> String;
}

/// In-memory catalog of translations keyed by dotted path.
#[derive(Debug, Clone, Default)]
pub struct MessageCatalog {
    messages: BTreeMap<String, String>,
    /// Missing keys already logged; titles are looked up every frame.
    reported: Arc<Mutex<BTreeSet<String>>>,
}

impl MessageCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_translation(&mut self, key: impl Into<String>, text: impl Into<String>) {
        self.messages.insert(key.into(), text.into());
    }

    /// Build from a nested JSON object, e.g. `{"user": {"name": "Name"}}`
    /// registers `user.name`. Non-string leaves are ignored.
    pub fn from_json(value: &Value) -> Self {
        let mut catalog = Self::new();
        catalog.flatten("", value);
        catalog
    }

    pub fn from_json_str(source: &str) -> serde_json::Result<Self> {
        let value: Value = serde_json::from_str(source)?;
        Ok(Self::from_json(&value))
    }

    fn flatten(&mut self, prefix: &str, value: &Value) {
        match value {
            Value::Object(map) => {
                for (key, child) in map {
                    let path = if prefix.is_empty() {
                        key.clone()
                    } else {
                        format!("{prefix}.{key}")
                    };
                    self.flatten(&path, child);
                }
            }
            Value::String(text) => {
                self.messages.insert(prefix.to_owned(), text.clone());
            }
            _ => {}
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.messages.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl Localizer for MessageCatalog {
    /// Missing keys come back unchanged.
    fn t(&self, key: &str) -> String {
        match self.get(key) {
            Some(text) => text.to_owned(),
            None => {
                let first = self
                    .reported
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .insert(key.to_owned());
                if first {
                    log::warn!("Missing translation for {key}");
                }
                key.to_owned()
            }
        }
    }
}
