//! Search bar above the table: field picker, query input, submit and reset.

use dashboard_business::{Localizer, SearchType, TableScreen};
use egui::{ComboBox, TextEdit, Ui};
use ustr::Ustr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchAction {
    Field(Ustr),
    Query(String),
    Submit,
    Reset,
}

/// Nothing is drawn when the resource has no searchable fields.
pub fn show_search_bar(
    ui: &mut Ui,
    screen: &TableScreen,
    localizer: &dyn Localizer,
) -> Vec<SearchAction> {
    let search = screen.search();
    if search.items().is_empty() {
        return Vec::new();
    }

    let lang = screen.options().lang;
    let title = |name: &str| localizer.t(&format!("{lang}.{name}"));
    let params = &search.params;
    let mut actions = Vec::new();

    ui.horizontal(|ui| {
        let current = search.item(&params.filter);
        let mut field = current.map(|item| item.name);
        ComboBox::from_id_salt("search_field")
            .selected_text(field.map_or_else(|| "Field".to_owned(), |name| title(&name)))
            .show_ui(ui, |ui| {
                for item in search.items() {
                    ui.selectable_value(&mut field, Some(item.name), title(&item.name));
                }
            });
        if let Some(name) = field
            && current.is_none_or(|item| item.name != name)
        {
            actions.push(SearchAction::Field(name));
        }

        match current {
            Some(item) if item.kind == SearchType::Filter => {
                let mut query = params.search.clone();
                ComboBox::from_id_salt("search_value")
                    .selected_text(if query.is_empty() { "Any" } else { query.as_str() }.to_owned())
                    .show_ui(ui, |ui| {
                        for value in &item.search_list {
                            ui.selectable_value(&mut query, value.clone(), value.as_str());
                        }
                    });
                if query != params.search {
                    actions.push(SearchAction::Query(query));
                }
            }
            _ => {
                let mut query = params.search.clone();
                let response = ui.add(
                    TextEdit::singleline(&mut query)
                        .hint_text("Keyword")
                        .desired_width(180.0),
                );
                if response.changed() {
                    actions.push(SearchAction::Query(query));
                }
                if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    actions.push(SearchAction::Submit);
                }
            }
        }

        if ui.button("Search").clicked() {
            actions.push(SearchAction::Submit);
        }
        if ui.button("Reset").clicked() {
            actions.push(SearchAction::Reset);
        }
    });

    actions
}

pub fn apply_search_actions(screen: &mut TableScreen, actions: Vec<SearchAction>) {
    for action in actions {
        match action {
            SearchAction::Field(name) => {
                let search = screen.search_mut();
                search.select_filter(&name);
                search.set_query(String::new());
            }
            SearchAction::Query(query) => screen.search_mut().set_query(query),
            SearchAction::Submit => screen.submit_search(),
            SearchAction::Reset => {
                screen.search_mut().reset();
                screen.submit_search();
            }
        }
    }
}
