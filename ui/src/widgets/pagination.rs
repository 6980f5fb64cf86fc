//! Page cursor controls below the table.

use dashboard_business::TableScreen;
use egui::{ComboBox, Ui};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageAction {
    Page(u32),
    PageSize(u32),
}

pub fn show_pagination(ui: &mut Ui, screen: &TableScreen) -> Option<PageAction> {
    let pagination = screen.pagination();
    let count = screen.data().count();
    let page = pagination.page();
    let last = pagination.page_count(count);
    let mut action = None;

    ui.horizontal(|ui| {
        ui.label(format!("{count} total"));
        if ui.add_enabled(page > 1, egui::Button::new("Previous")).clicked() {
            action = Some(PageAction::Page(page - 1));
        }
        ui.label(format!("Page {page} of {last}"));
        if ui.add_enabled(page < last, egui::Button::new("Next")).clicked() {
            action = Some(PageAction::Page(page + 1));
        }

        if pagination.show_size_picker {
            let mut size = pagination.page_size();
            ComboBox::from_id_salt("page_size")
                .selected_text(format!("{size} / page"))
                .show_ui(ui, |ui| {
                    for option in pagination.page_sizes() {
                        ui.selectable_value(&mut size, *option, format!("{option} / page"));
                    }
                });
            if size != pagination.page_size() {
                action = Some(PageAction::PageSize(size));
            }
        }
    });

    action
}

pub fn apply_page_action(screen: &mut TableScreen, action: PageAction) {
    match action {
        PageAction::Page(page) => screen.change_page(page),
        PageAction::PageSize(size) => {
            if let Err(err) = screen.change_page_size(size) {
                log::warn!("Ignoring page size change: {err}");
            }
        }
    }
}
