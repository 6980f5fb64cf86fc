//! Toast-style notices in the bottom right corner.

use dashboard_business::{Notice, NoticeLevel};
use egui::{Align2, Area, Context, Frame, Id, Margin, RichText};

use crate::utils::colors::{COLOR_BLUE, COLOR_GREEN, COLOR_RED};

/// How long a notice stays on screen, in seconds.
pub const NOTICE_TTL: f64 = 3.0;

#[derive(Debug, Clone)]
struct Shown {
    notice: Notice,
    expires_at: Option<f64>,
}

/// Notices currently on screen.
#[derive(Debug, Default)]
pub struct NoticeBoard {
    shown: Vec<Shown>,
}

impl NoticeBoard {
    pub fn push(&mut self, notice: Notice) {
        self.shown.push(Shown {
            notice,
            expires_at: None,
        });
    }

    pub fn extend(&mut self, notices: impl IntoIterator<Item = Notice>) {
        for notice in notices {
            self.push(notice);
        }
    }

    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.shown.iter().map(|shown| shown.notice.message.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.shown.is_empty()
    }

    /// Draw the notices and drop the expired ones. Expiry starts at first display.
    pub fn show(&mut self, ctx: &Context) {
        let now = ctx.input(|i| i.time);
        for shown in &mut self.shown {
            shown.expires_at.get_or_insert(now + NOTICE_TTL);
        }
        self.shown
            .retain(|shown| shown.expires_at.is_some_and(|at| at > now));
        if self.shown.is_empty() {
            return;
        }

        Area::new(Id::new("dashboard_notices"))
            .anchor(Align2::RIGHT_BOTTOM, [-12.0, -12.0])
            .show(ctx, |ui| {
                for shown in &self.shown {
                    let color = match shown.notice.level {
                        NoticeLevel::Info => COLOR_BLUE,
                        NoticeLevel::Success => COLOR_GREEN,
                        NoticeLevel::Error => COLOR_RED,
                    };
                    Frame::popup(ui.style())
                        .inner_margin(Margin::symmetric(12, 8))
                        .show(ui, |ui| {
                            ui.label(RichText::new(&shown.notice.message).color(color));
                        });
                }
            });

        ctx.request_repaint_after(std::time::Duration::from_millis(250));
    }
}
