//! Create/edit dialog generated from the resource's form fields.

use dashboard_business::{
    FieldRenderer, FieldUpdate, FormMode, Localizer, SectionView, TableScreen,
};
use egui::{CollapsingHeader, Grid, Ui, Window};
use ustr::Ustr;

use super::field::field_input;

/// What the dialog asks for this frame.
#[derive(Debug, Clone, PartialEq)]
pub enum FormAction {
    Field(Ustr, FieldUpdate),
    Save,
    Cancel,
}

pub fn form_title(screen: &TableScreen) -> String {
    let name = &screen.options().name;
    match screen.form().mode {
        FormMode::Create => format!("Create {name}"),
        FormMode::Edit(id) => format!("Edit {name} #{id}"),
    }
}

/// Draws the form while it is open.
pub fn show_form_modal(
    ui: &mut Ui,
    screen: &TableScreen,
    localizer: &dyn Localizer,
) -> Vec<FormAction> {
    let form = screen.form();
    if !form.open {
        return Vec::new();
    }

    let mut actions = Vec::new();
    let mut open = true;
    let sections = FieldRenderer::new(screen.schema()).render_form(&form.values);
    let lang = screen.options().lang;

    Window::new(form_title(screen))
        .id(egui::Id::new(("form_modal", screen.options().name.as_str())))
        .open(&mut open)
        .collapsible(false)
        .resizable(true)
        .show(ui.ctx(), |ui| {
            egui::ScrollArea::vertical().max_height(480.0).show(ui, |ui| {
                for (index, section) in sections.iter().enumerate() {
                    match &section.title {
                        Some(title) => {
                            CollapsingHeader::new(title.as_str())
                                .id_salt(("form_section", index))
                                .default_open(false)
                                .show(ui, |ui| {
                                    render_section(ui, section, index, lang, localizer, &mut actions);
                                });
                        }
                        None => render_section(ui, section, index, lang, localizer, &mut actions),
                    }
                }
            });

            ui.add_space(8.0);
            ui.horizontal(|ui| {
                let saving = screen.is_saving();
                if ui.add_enabled(!saving, egui::Button::new("Save")).clicked() {
                    actions.push(FormAction::Save);
                }
                if ui.button("Cancel").clicked() {
                    actions.push(FormAction::Cancel);
                }
                if saving {
                    ui.spinner();
                }
            });
        });

    if !open {
        actions.push(FormAction::Cancel);
    }
    actions
}

fn render_section(
    ui: &mut Ui,
    section: &SectionView,
    index: usize,
    lang: Ustr,
    localizer: &dyn Localizer,
    actions: &mut Vec<FormAction>,
) {
    Grid::new(("form_grid", index))
        .num_columns(2)
        .spacing([12.0, 8.0])
        .show(ui, |ui| {
            for field in &section.fields {
                ui.label(localizer.t(&format!("{lang}.{}", field.key)));
                if let Some(update) = field_input(ui, &field.key, &field.widget) {
                    actions.push(FormAction::Field(field.key, update));
                }
                ui.end_row();
            }
        });
}

pub fn apply_form_actions(screen: &mut TableScreen, actions: Vec<FormAction>) {
    for action in actions {
        match action {
            FormAction::Field(key, update) => screen.apply_field(&key, update),
            FormAction::Save => screen.submit_form(),
            FormAction::Cancel => screen.close_form(),
        }
    }
}
