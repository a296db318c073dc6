pub mod use_app;
pub mod use_auth;
pub mod use_calendar;
pub mod use_categories;
pub mod use_gesture;
pub mod use_todos;
pub mod use_toasts;
