//! Form values of the create/edit modal.

use std::any::Any;

use chrono::NaiveDate;
use dashboard_states::State;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use ustr::Ustr;

use crate::format::{format_date, is_zero_date, parse_date, round2};
use crate::record::{Record, RowId};
use crate::resource::{FieldKind, ResourceSchema};

/// One entry of a `conf` list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyValuePair {
    #[serde(rename = "Key")]
    pub key: String,
    #[serde(rename = "Value")]
    pub value: String,
}

/// A single edit coming from a field widget.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldUpdate {
    Bool(bool),
    /// `None` clears the field.
    Number(Option<f64>),
    Text(String),
    Date(Option<NaiveDate>),
    AddPair,
    RemovePair(usize),
    PairKey(usize, String),
    PairValue(usize, String),
}

/// Values of the form being edited, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormValues(Record);

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed values for a new entry from the configured examples.
    pub fn from_examples(schema: &ResourceSchema) -> Self {
        Self(Record::from(schema.config().example.clone())).normalize(schema)
    }

    pub fn record(&self) -> &Record {
        &self.0
    }

    pub fn into_record(self) -> Record {
        self.0
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn bool(&self, key: &str) -> bool {
        match self.0.get(key) {
            Some(Value::Bool(value)) => *value,
            Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
            Some(Value::String(s)) => s == "true",
            _ => false,
        }
    }

    pub fn number(&self, key: &str) -> Option<f64> {
        self.0.get_f64(key)
    }

    pub fn text(&self, key: &str) -> String {
        self.0.display(key)
    }

    pub fn date(&self, key: &str) -> Option<NaiveDate> {
        self.0.get_str(key).and_then(parse_date)
    }

    /// The `{Key, Value}` list stored under `key`; unset or malformed is empty.
    pub fn pairs(&self, key: &str) -> Vec<KeyValuePair> {
        match self.0.get(key) {
            Some(value @ Value::Array(_)) => {
                serde_json::from_value(value.clone()).unwrap_or_else(|err| {
                    log::warn!("Ignoring malformed key/value list `{key}`: {err}");
                    Vec::new()
                })
            }
            _ => Vec::new(),
        }
    }

    /// Keys of `required` that are unset, null, blank or an empty list.
    pub fn missing(&self, required: &[Ustr]) -> Vec<Ustr> {
        required
            .iter()
            .copied()
            .filter(|key| match self.0.get(key) {
                None | Some(Value::Null) => true,
                Some(Value::String(text)) => text.trim().is_empty(),
                Some(Value::Array(items)) => items.is_empty(),
                Some(_) => false,
            })
            .collect()
    }

    /// Values with `update` applied to `key`.
    pub fn apply(&self, key: &str, update: FieldUpdate) -> Self {
        let mut next = self.clone();
        next.apply_in_place(key, update);
        next
    }

    fn apply_in_place(&mut self, key: &str, update: FieldUpdate) {
        let value = match update {
            FieldUpdate::Bool(value) => Value::Bool(value),
            FieldUpdate::Number(value) => value
                .and_then(serde_json::Number::from_f64)
                .map_or(Value::Null, Value::Number),
            FieldUpdate::Text(text) => Value::String(text),
            FieldUpdate::Date(date) => date.map_or(Value::Null, |d| Value::String(format_date(d))),
            FieldUpdate::AddPair => {
                let mut pairs = self.pairs(key);
                pairs.push(KeyValuePair::default());
                pairs_value(pairs)
            }
            FieldUpdate::RemovePair(index) => {
                let mut pairs = self.pairs(key);
                if index < pairs.len() {
                    pairs.remove(index);
                } else {
                    log::debug!("Remove of pair {index} out of range for `{key}`");
                }
                pairs_value(pairs)
            }
            FieldUpdate::PairKey(index, text) => {
                let mut pairs = self.pairs(key);
                if let Some(pair) = pairs.get_mut(index) {
                    pair.key = text;
                }
                pairs_value(pairs)
            }
            FieldUpdate::PairValue(index, text) => {
                let mut pairs = self.pairs(key);
                if let Some(pair) = pairs.get_mut(index) {
                    pair.value = text;
                }
                pairs_value(pairs)
            }
        };
        self.0.insert(key, value);
    }

    /// One-time cleanup after populating a form: traffic rounded to two
    /// decimals, zero dates cleared.
    pub fn normalize(mut self, schema: &ResourceSchema) -> Self {
        let keys: Vec<String> = self.0.as_map().keys().cloned().collect();
        for key in keys {
            match schema.kind(&key) {
                FieldKind::Traffic => {
                    if let Some(value) = self.number(&key) {
                        self.apply_in_place(&key, FieldUpdate::Number(Some(round2(value))));
                    }
                }
                FieldKind::Date => {
                    if self.0.get_str(&key).is_some_and(is_zero_date) {
                        self.0.insert(key, Value::Null);
                    }
                }
                _ => {}
            }
        }
        self
    }
}

fn pairs_value(pairs: Vec<KeyValuePair>) -> Value {
    Value::Array(
        pairs
            .into_iter()
            .map(|pair| {
                let mut object = serde_json::Map::new();
                object.insert("Key".to_owned(), Value::String(pair.key));
                object.insert("Value".to_owned(), Value::String(pair.value));
                Value::Object(object)
            })
            .collect(),
    )
}

impl From<Record> for FormValues {
    fn from(record: Record) -> Self {
        Self(record)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormMode {
    #[default]
    Create,
    Edit(RowId),
}

/// The create/edit modal.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    pub open: bool,
    pub mode: FormMode,
    pub values: FormValues,
    pub submitting: bool,
}

impl State for FormState {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl FormState {
    pub fn open_create(&mut self, values: FormValues) {
        self.open = true;
        self.mode = FormMode::Create;
        self.values = values;
        self.submitting = false;
    }

    pub fn open_edit(&mut self, id: RowId, values: FormValues) {
        self.open = true;
        self.mode = FormMode::Edit(id);
        self.values = values;
        self.submitting = false;
    }

    pub fn apply(&mut self, key: &str, update: FieldUpdate) {
        self.values = self.values.apply(key, update);
    }

    pub fn close(&mut self) {
        self.open = false;
        self.submitting = false;
    }
}
