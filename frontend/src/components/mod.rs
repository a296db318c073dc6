pub mod auth_form;
pub mod calendar;
pub mod category_panel;
pub mod event_modal;
pub mod header;
pub mod profile_modal;
pub mod toast_stack;
pub mod todo_list;
