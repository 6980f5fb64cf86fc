//! egui rendering of [`FieldWidget`]s.
//!
//! Widgets edit a local copy of the value and report the change as a
//! [`FieldUpdate`]; the caller applies it to the form values.

use dashboard_business::{FieldUpdate, FieldWidget, KeyValuePair};
use egui::{DragValue, TextEdit, Ui};
use egui_extras::DatePickerButton;

/// Width of single-line inputs.
const INPUT_WIDTH: f32 = 220.0;

/// Draws `widget` for field `key` and returns the edit made this frame.
pub fn field_input(ui: &mut Ui, key: &str, widget: &FieldWidget) -> Option<FieldUpdate> {
    match widget {
        FieldWidget::Toggle { value } => {
            let mut value = *value;
            ui.checkbox(&mut value, "")
                .changed()
                .then_some(FieldUpdate::Bool(value))
        }
        FieldWidget::Stepper {
            value,
            min,
            suffix,
            decimals,
        } => stepper(ui, *value, *min, suffix.as_deref(), *decimals),
        FieldWidget::DatePicker { value, clearable } => date_picker(ui, key, *value, *clearable),
        FieldWidget::KeyValueList { pairs } => key_value_list(ui, key, pairs),
        FieldWidget::TextInput {
            value,
            placeholder,
            suffix,
        } => {
            let mut text = value.clone();
            let changed = ui
                .horizontal(|ui| {
                    let mut edit = TextEdit::singleline(&mut text).desired_width(INPUT_WIDTH);
                    if let Some(placeholder) = placeholder {
                        edit = edit.hint_text(placeholder.as_str());
                    }
                    let changed = ui.add(edit).changed();
                    if let Some(suffix) = suffix {
                        ui.label(suffix.as_str());
                    }
                    changed
                })
                .inner;
            changed.then_some(FieldUpdate::Text(text))
        }
    }
}

/// Only a drag or typed edit reports a change. A stored value outside the
/// range is shown as is and left alone.
fn stepper(
    ui: &mut Ui,
    value: Option<f64>,
    min: Option<f64>,
    suffix: Option<&str>,
    decimals: Option<usize>,
) -> Option<FieldUpdate> {
    let initial = value.unwrap_or_default();
    let mut number = initial;
    let mut drag = DragValue::new(&mut number)
        .speed(0.1)
        .clamp_existing_to_range(false);
    if let Some(min) = min {
        drag = drag.range(min..=f64::INFINITY);
    }
    if let Some(suffix) = suffix {
        drag = drag.suffix(format!(" {suffix}"));
    }
    if let Some(decimals) = decimals {
        drag = drag.fixed_decimals(decimals);
    }
    let changed = ui.add(drag).changed();
    (changed && number.to_bits() != initial.to_bits()).then_some(FieldUpdate::Number(Some(number)))
}

fn date_picker(
    ui: &mut Ui,
    key: &str,
    value: Option<chrono::NaiveDate>,
    clearable: bool,
) -> Option<FieldUpdate> {
    ui.horizontal(|ui| match value {
        Some(date) => {
            let mut date = date;
            let picked = ui
                .add(DatePickerButton::new(&mut date).id_salt(key))
                .changed();
            if clearable && ui.small_button("Clear").clicked() {
                Some(FieldUpdate::Date(None))
            } else {
                picked.then_some(FieldUpdate::Date(Some(date)))
            }
        }
        None => ui
            .button("Pick date")
            .clicked()
            .then(|| FieldUpdate::Date(Some(chrono::Local::now().date_naive()))),
    })
    .inner
}

fn key_value_list(ui: &mut Ui, key: &str, pairs: &[KeyValuePair]) -> Option<FieldUpdate> {
    let mut update = None;
    ui.vertical(|ui| {
        for (index, pair) in pairs.iter().enumerate() {
            ui.push_id((key, index), |ui| {
                ui.horizontal(|ui| {
                    let mut pair_key = pair.key.clone();
                    let mut pair_value = pair.value.clone();
                    if ui
                        .add(TextEdit::singleline(&mut pair_key).hint_text("Key").desired_width(100.0))
                        .changed()
                    {
                        update = Some(FieldUpdate::PairKey(index, pair_key));
                    }
                    if ui
                        .add(TextEdit::singleline(&mut pair_value).hint_text("Value").desired_width(140.0))
                        .changed()
                    {
                        update = Some(FieldUpdate::PairValue(index, pair_value));
                    }
                    if ui.small_button("Remove").clicked() {
                        update = Some(FieldUpdate::RemovePair(index));
                    }
                });
            });
        }
        if ui.button("Add").clicked() {
            update = Some(FieldUpdate::AddPair);
        }
    });
    update
}
