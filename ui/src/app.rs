use std::time::Duration;

use crate::{state::State, widgets};

/// How often to poll while requests are in flight.
const BUSY_REPAINT: Duration = Duration::from_millis(50);

pub struct DashboardApp {
    pub state: State,
    loaded: bool,
}

impl DashboardApp {
    pub fn new(state: State) -> Self {
        Self {
            state,
            loaded: false,
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let State {
            catalog,
            screen,
            notices,
            table,
            ..
        } = &mut self.state;
        let catalog = &*catalog;

        // Apply finished requests before drawing
        screen.sync();
        if !self.loaded {
            screen.load();
            self.loaded = true;
        }
        if screen.data().is_loading() {
            table.reset_sort();
        }
        notices.extend(screen.drain_notices());
        for (label, id) in screen.take_triggered_actions() {
            log::info!("Action {label} on row {id} has no handler");
        }

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                ui.strong(format!("Dashboard / {}", screen.options().name));
                if screen.data().is_loading() {
                    ui.spinner();
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let search = widgets::show_search_bar(ui, screen, catalog);
            widgets::apply_search_actions(screen, search);

            ui.horizontal(|ui| {
                if screen.can_create() && ui.button("Create").clicked() {
                    screen.open_create();
                }
                if ui.button("Refresh").clicked() {
                    screen.load();
                }
                let selected = screen.selection().len();
                if selected > 0 {
                    ui.label(format!("{selected} selected"));
                }
            });
            ui.separator();

            let page = widgets::show_pagination(ui, screen);
            let rows = table.show(ui, screen);
            table.apply(screen, rows);
            if let Some(page) = page {
                widgets::apply_page_action(screen, page);
            }

            let form = widgets::show_form_modal(ui, screen, catalog);
            widgets::apply_form_actions(screen, form);
            if let Some(confirm) = widgets::show_confirm_dialog(ui, screen) {
                widgets::apply_confirm_action(screen, confirm);
            }
        });

        notices.show(ctx);

        if !screen.is_idle() {
            ctx.request_repaint_after(BUSY_REPAINT);
        }
    }
}
