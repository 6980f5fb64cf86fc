//! Per-resource configuration and the field kinds derived from it.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use ustr::Ustr;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid resource config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("resource config lists `{field}` in collapse group `{group}` but not in `form`")]
    UnknownCollapseField { group: String, field: String },
}

/// Static description of one resource, as shipped with the dashboard.
///
/// ```json
/// {
///   "form": ["name", "traffic", "enabled"],
///   "info": ["name", "traffic", "updated"],
///   "example": {"name": "", "traffic": 10, "enabled": true},
///   "placeholder": {"name": "display name"},
///   "suffix": {"balance": "CNY"}
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceConfig {
    /// Fields shown in the create/edit form, in order.
    pub form: Vec<String>,
    /// Fields shown as table columns, in order.
    pub info: Vec<String>,
    #[serde(default)]
    pub search: Vec<String>,
    /// Fields forced to numeric input regardless of `example`.
    #[serde(default)]
    pub number: Vec<String>,
    /// Fields forced to a toggle regardless of `example`.
    #[serde(default)]
    pub boolean: Vec<String>,
    /// Default values for a new entry; their JSON types drive field inference.
    #[serde(default)]
    pub example: Map<String, Value>,
    #[serde(default)]
    pub placeholder: BTreeMap<String, String>,
    #[serde(default)]
    pub suffix: BTreeMap<String, String>,
    /// Collapsible form sections: title → fields.
    #[serde(default)]
    pub collapse: BTreeMap<String, Vec<String>>,
    /// Fields rendered by the caller instead of the generic field renderer.
    #[serde(default)]
    pub custom: Vec<String>,
}

impl ResourceConfig {
    pub fn from_json_str(source: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(source)?)
    }

    /// Check cross references between lists.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (group, fields) in &self.collapse {
            if let Some(field) = fields.iter().find(|field| !self.form.contains(field)) {
                return Err(ConfigError::UnknownCollapseField {
                    group: group.clone(),
                    field: field.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Input widget family of a form field, resolved once per config.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    Boolean,
    /// `min` is `None` for free numeric fields such as `order` and `balance`.
    Numeric { min: Option<f64> },
    /// Quota in GiB.
    Traffic,
    Date,
    /// `conf`: a list of `{Key, Value}` pairs.
    KeyValueList,
    Text,
}

/// Boolean and numeric field names inferred from `example`, merged with the
/// explicit `boolean`/`number` lists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InferredTypes {
    pub boolean: BTreeSet<String>,
    pub number: BTreeSet<String>,
}

impl InferredTypes {
    pub fn from_config(config: &ResourceConfig) -> Self {
        let mut inferred = Self::default();
        for (key, value) in &config.example {
            match value {
                Value::Bool(_) => {
                    inferred.boolean.insert(key.clone());
                }
                Value::Number(_) => {
                    inferred.number.insert(key.clone());
                }
                _ => {}
            }
        }
        inferred.boolean.extend(config.boolean.iter().cloned());
        inferred.number.extend(config.number.iter().cloned());
        inferred
    }
}

impl FieldKind {
    /// First matching rule wins.
    pub fn resolve(key: &str, inferred: &InferredTypes) -> Self {
        if inferred.boolean.contains(key) {
            Self::Boolean
        } else if key == "order" || key == "balance" {
            Self::Numeric { min: None }
        } else if key.contains("traffic") {
            Self::Traffic
        } else if inferred.number.contains(key) {
            Self::Numeric { min: Some(0.0) }
        } else if key.contains("date") {
            Self::Date
        } else if key == "conf" {
            Self::KeyValueList
        } else {
            Self::Text
        }
    }
}

/// A group of form fields; `title` is `None` for fields outside any collapse group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSection {
    pub title: Option<String>,
    pub fields: Vec<String>,
}

/// A [`ResourceConfig`] with every field kind resolved.
#[derive(Debug, Clone)]
pub struct ResourceSchema {
    config: ResourceConfig,
    inferred: InferredTypes,
    kinds: BTreeMap<Ustr, FieldKind>,
}

impl ResourceSchema {
    pub fn new(config: ResourceConfig) -> Self {
        let inferred = InferredTypes::from_config(&config);
        let kinds = config
            .form
            .iter()
            .chain(&config.info)
            .chain(config.example.keys())
            .map(|key| (Ustr::from(key.as_str()), FieldKind::resolve(key, &inferred)))
            .collect();

        Self {
            config,
            inferred,
            kinds,
        }
    }

    pub fn from_json_str(source: &str) -> Result<Self, ConfigError> {
        let config = ResourceConfig::from_json_str(source)?;
        config.validate()?;
        Ok(Self::new(config))
    }

    pub fn config(&self) -> &ResourceConfig {
        &self.config
    }

    pub fn inferred(&self) -> &InferredTypes {
        &self.inferred
    }

    pub fn kind(&self, key: &str) -> FieldKind {
        self.kinds
            .get(&Ustr::from(key))
            .copied()
            .unwrap_or_else(|| FieldKind::resolve(key, &self.inferred))
    }

    pub fn suffix(&self, key: &str) -> Option<&str> {
        self.config.suffix.get(key).map(String::as_str)
    }

    pub fn placeholder(&self, key: &str) -> Option<&str> {
        self.config.placeholder.get(key).map(String::as_str)
    }

    pub fn is_custom(&self, key: &str) -> bool {
        self.config.custom.iter().any(|custom| custom == key)
    }

    pub fn form_fields(&self) -> &[String] {
        &self.config.form
    }

    pub fn info_fields(&self) -> &[String] {
        &self.config.info
    }

    /// Form fields split into sections: ungrouped fields first, then each
    /// collapse group in title order. Field order follows `form`.
    pub fn form_sections(&self) -> Vec<FormSection> {
        let grouped: BTreeSet<&str> = self
            .config
            .collapse
            .values()
            .flatten()
            .map(String::as_str)
            .collect();

        let mut sections = vec![FormSection {
            title: None,
            fields: self
                .config
                .form
                .iter()
                .filter(|field| !grouped.contains(field.as_str()))
                .cloned()
                .collect(),
        }];

        for (title, members) in &self.config.collapse {
            sections.push(FormSection {
                title: Some(title.clone()),
                fields: self
                    .config
                    .form
                    .iter()
                    .filter(|field| members.contains(field))
                    .cloned()
                    .collect(),
            });
        }

        sections.retain(|section| section.title.is_some() || !section.fields.is_empty());
        sections
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn schema() -> ResourceSchema {
        let config: ResourceConfig = serde_json::from_value(json!({
            "form": ["name", "enabled", "order", "traffic", "price", "expire_date", "conf", "remark"],
            "info": ["name", "traffic", "updated"],
            "number": ["port"],
            "example": {
                "name": "",
                "enabled": true,
                "order": 0,
                "traffic": 10,
                "price": 1.5,
                "expire_date": "2025-01-01",
            },
            "placeholder": {"name": "display name"},
            "suffix": {"price": "CNY"},
            "collapse": {"Advanced": ["conf", "remark"]},
        }))
        .expect("valid config");
        ResourceSchema::new(config)
    }

    #[test]
    fn example_types_drive_inference() {
        let schema = schema();
        assert!(schema.inferred().boolean.contains("enabled"));
        assert!(schema.inferred().number.contains("price"));
        assert!(schema.inferred().number.contains("port"));
        assert!(!schema.inferred().number.contains("name"));
    }

    #[test]
    fn kinds_follow_rule_order() {
        let schema = schema();
        assert_eq!(schema.kind("enabled"), FieldKind::Boolean);
        assert_eq!(schema.kind("order"), FieldKind::Numeric { min: None });
        assert_eq!(schema.kind("balance"), FieldKind::Numeric { min: None });
        // traffic wins over the numeric example
        assert_eq!(schema.kind("traffic"), FieldKind::Traffic);
        assert_eq!(schema.kind("upload_traffic"), FieldKind::Traffic);
        assert_eq!(schema.kind("price"), FieldKind::Numeric { min: Some(0.0) });
        assert_eq!(schema.kind("port"), FieldKind::Numeric { min: Some(0.0) });
        assert_eq!(schema.kind("expire_date"), FieldKind::Date);
        assert_eq!(schema.kind("conf"), FieldKind::KeyValueList);
        assert_eq!(schema.kind("remark"), FieldKind::Text);
    }

    #[test]
    fn boolean_beats_every_name_rule() {
        let config = ResourceConfig {
            boolean: vec!["order".to_owned(), "traffic_reset".to_owned()],
            ..ResourceConfig::default()
        };
        let schema = ResourceSchema::new(config);
        assert_eq!(schema.kind("order"), FieldKind::Boolean);
        assert_eq!(schema.kind("traffic_reset"), FieldKind::Boolean);
    }

    #[test]
    fn missing_lookups_are_absent() {
        let schema = schema();
        assert_eq!(schema.placeholder("name"), Some("display name"));
        assert_eq!(schema.placeholder("remark"), None);
        assert_eq!(schema.suffix("price"), Some("CNY"));
        assert_eq!(schema.suffix("order"), None);
    }

    #[test]
    fn sections_split_collapse_groups() {
        let sections = schema().form_sections();
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].title, None);
        assert_eq!(
            sections[0].fields,
            vec!["name", "enabled", "order", "traffic", "price", "expire_date"]
        );
        assert_eq!(sections[1].title.as_deref(), Some("Advanced"));
        assert_eq!(sections[1].fields, vec!["conf", "remark"]);
    }

    #[test]
    fn parse_rejects_unknown_collapse_fields() {
        let result = ResourceSchema::from_json_str(
            r#"{"form": ["a"], "info": ["a"], "collapse": {"More": ["b"]}}"#,
        );
        assert!(matches!(
            result,
            Err(ConfigError::UnknownCollapseField { ref field, .. }) if field == "b"
        ));
    }

    #[test]
    fn optional_lists_default_to_empty() {
        let config =
            ResourceConfig::from_json_str(r#"{"form": [], "info": ["id"]}"#).expect("minimal config");
        assert!(config.search.is_empty());
        assert!(config.example.is_empty());
        assert!(config.custom.is_empty());
    }
}
