mod confirm;
mod field;
mod form_modal;
mod notices;
mod pagination;
mod search_bar;
pub mod table;

pub use confirm::{ConfirmAction, apply_confirm_action, show_confirm_dialog};
pub use field::field_input;
pub use form_modal::{FormAction, apply_form_actions, form_title, show_form_modal};
pub use notices::{NOTICE_TTL, NoticeBoard};
pub use pagination::{PageAction, apply_page_action, show_pagination};
pub use search_bar::{SearchAction, apply_search_actions, show_search_bar};
pub use table::{TableAction, TableView};
