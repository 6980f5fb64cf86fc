//! Maps a form field to the widget that edits it.
//!
//! Rendering is a pure function of the schema and the current values; edits
//! travel back as [`FieldUpdate`](crate::FieldUpdate)s.

use chrono::NaiveDate;
use ustr::Ustr;

use crate::form::{FormValues, KeyValuePair};
use crate::resource::{FieldKind, ResourceSchema};

/// Smallest accepted traffic quota, in GiB.
pub const TRAFFIC_MIN: f64 = 0.0001;
pub const TRAFFIC_SUFFIX: &str = "GB";
/// Traffic is shown with two decimals.
pub const TRAFFIC_DECIMALS: usize = 2;
/// Display layout of the date picker.
pub const DATE_PICKER_FORMAT: &str = "yyyy-MM-dd";

#[derive(Debug, Clone, PartialEq)]
pub enum FieldWidget {
    Toggle {
        value: bool,
    },
    Stepper {
        value: Option<f64>,
        min: Option<f64>,
        suffix: Option<String>,
        /// Digits shown after the point; the stored value is not rounded.
        decimals: Option<usize>,
    },
    DatePicker {
        value: Option<NaiveDate>,
        clearable: bool,
    },
    KeyValueList {
        pairs: Vec<KeyValuePair>,
    },
    TextInput {
        value: String,
        placeholder: Option<String>,
        suffix: Option<String>,
    },
}

/// A widget bound to its field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldView {
    pub key: Ustr,
    pub widget: FieldWidget,
}

/// A titled group of field views, see [`ResourceSchema::form_sections`].
#[derive(Debug, Clone, PartialEq)]
pub struct SectionView {
    pub title: Option<String>,
    pub fields: Vec<FieldView>,
}

#[derive(Debug, Clone, Copy)]
pub struct FieldRenderer<'a> {
    schema: &'a ResourceSchema,
}

impl<'a> FieldRenderer<'a> {
    pub fn new(schema: &'a ResourceSchema) -> Self {
        Self { schema }
    }

    pub fn render(&self, key: &str, values: &FormValues) -> FieldWidget {
        let suffix = || self.schema.suffix(key).map(str::to_owned);

        match self.schema.kind(key) {
            FieldKind::Boolean => FieldWidget::Toggle {
                value: values.bool(key),
            },
            FieldKind::Numeric { min } => FieldWidget::Stepper {
                value: values.number(key),
                min,
                suffix: suffix(),
                decimals: None,
            },
            FieldKind::Traffic => FieldWidget::Stepper {
                value: values.number(key),
                min: Some(TRAFFIC_MIN),
                suffix: Some(TRAFFIC_SUFFIX.to_owned()),
                decimals: Some(TRAFFIC_DECIMALS),
            },
            FieldKind::Date => FieldWidget::DatePicker {
                value: values.date(key),
                clearable: true,
            },
            FieldKind::KeyValueList => FieldWidget::KeyValueList {
                pairs: values.pairs(key),
            },
            FieldKind::Text => FieldWidget::TextInput {
                value: values.text(key),
                placeholder: self.schema.placeholder(key).map(str::to_owned),
                suffix: suffix(),
            },
        }
    }

    /// Views for every non-custom form field, grouped by section.
    pub fn render_form(&self, values: &FormValues) -> Vec<SectionView> {
        self.schema
            .form_sections()
            .into_iter()
            .map(|section| SectionView {
                title: section.title,
                fields: section
                    .fields
                    .iter()
                    .filter(|key| !self.schema.is_custom(key))
                    .map(|key| FieldView {
                        key: Ustr::from(key.as_str()),
                        widget: self.render(key, values),
                    })
                    .collect(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::record::Record;
    use crate::resource::ResourceConfig;

    fn schema() -> ResourceSchema {
        let config: ResourceConfig = serde_json::from_value(json!({
            "form": ["name", "enabled", "balance", "traffic", "port", "expire_date", "conf", "script"],
            "info": [],
            "custom": ["script"],
            "example": {"name": "", "enabled": true, "balance": 0, "traffic": 1, "port": 443},
            "placeholder": {"name": "display name"},
            "suffix": {"balance": "CNY", "name": "@"},
            "collapse": {"More": ["conf"]},
        }))
        .expect("valid config");
        ResourceSchema::new(config)
    }

    fn values(value: serde_json::Value) -> FormValues {
        FormValues::from(Record::try_from(value).expect("object"))
    }

    #[test]
    fn boolean_renders_toggle() {
        let schema = schema();
        let widget =
            FieldRenderer::new(&schema).render("enabled", &values(json!({"enabled": true})));
        assert_eq!(widget, FieldWidget::Toggle { value: true });
    }

    #[test]
    fn balance_is_unbounded_with_suffix() {
        let schema = schema();
        let widget =
            FieldRenderer::new(&schema).render("balance", &values(json!({"balance": -3})));
        assert_eq!(
            widget,
            FieldWidget::Stepper {
                value: Some(-3.0),
                min: None,
                suffix: Some("CNY".to_owned()),
                decimals: None,
            }
        );
    }

    #[test]
    fn traffic_shows_two_decimals_without_rounding_the_value() {
        let schema = schema();
        let widget =
            FieldRenderer::new(&schema).render("traffic", &values(json!({"traffic": 1.23456})));
        assert_eq!(
            widget,
            FieldWidget::Stepper {
                value: Some(1.23456),
                min: Some(TRAFFIC_MIN),
                suffix: Some("GB".to_owned()),
                decimals: Some(TRAFFIC_DECIMALS),
            }
        );
    }

    #[test]
    fn numbers_have_zero_minimum() {
        let schema = schema();
        let widget = FieldRenderer::new(&schema).render("port", &FormValues::new());
        assert_eq!(
            widget,
            FieldWidget::Stepper {
                value: None,
                min: Some(0.0),
                suffix: None,
                decimals: None,
            }
        );
    }

    #[test]
    fn zero_date_renders_empty() {
        let schema = schema();
        let widget = FieldRenderer::new(&schema)
            .render("expire_date", &values(json!({"expire_date": "0001-01-01T00:00:00Z"})));
        assert_eq!(
            widget,
            FieldWidget::DatePicker {
                value: None,
                clearable: true,
            }
        );
    }

    #[test]
    fn conf_defaults_to_empty_list() {
        let schema = schema();
        let widget = FieldRenderer::new(&schema).render("conf", &FormValues::new());
        assert_eq!(widget, FieldWidget::KeyValueList { pairs: Vec::new() });
    }

    #[test]
    fn text_carries_placeholder_and_suffix() {
        let schema = schema();
        let widget = FieldRenderer::new(&schema).render("name", &values(json!({"name": "n"})));
        assert_eq!(
            widget,
            FieldWidget::TextInput {
                value: "n".to_owned(),
                placeholder: Some("display name".to_owned()),
                suffix: Some("@".to_owned()),
            }
        );
    }

    #[test]
    fn form_skips_custom_fields_and_groups_collapse() {
        let schema = schema();
        let sections = FieldRenderer::new(&schema).render_form(&FormValues::new());
        assert_eq!(sections.len(), 2);

        let keys: Vec<&str> = sections[0].fields.iter().map(|f| f.key.as_str()).collect();
        assert_eq!(
            keys,
            vec!["name", "enabled", "balance", "traffic", "port", "expire_date"]
        );
        assert_eq!(sections[1].title.as_deref(), Some("More"));
        assert_eq!(sections[1].fields[0].key, "conf");
    }

    #[test]
    fn rendering_is_repeatable() {
        let schema = schema();
        let renderer = FieldRenderer::new(&schema);
        let values = values(json!({"traffic": 2}));
        assert_eq!(
            renderer.render_form(&values),
            renderer.render_form(&values)
        );
    }
}
