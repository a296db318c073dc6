//! Application core of the calendar client.
//!
//! Everything here is independent of the browser: the view models talk to
//! the backend through the traits in [`api`], and keep their state in
//! shared `Rc<RefCell<_>>` handles that the frontend clones into its
//! components.

pub mod api;
pub mod auth;
pub mod calendar;
pub mod categories;
pub mod config;
pub mod editor;
pub mod layout;
pub mod local;
pub mod observe;
pub mod session;
pub mod time;
pub mod todos;

#[cfg(test)]
mod test_utils;

pub use api::{ApiResult, Backend, CategoryApi, EventApi, TodoApi, UserApi};
pub use auth::{Auth, AuthError};
pub use calendar::{CalendarError, CalendarView, EventFormValues, EventStats, Gesture, LoadState};
pub use categories::CategoryList;
pub use config::{BackendMode, ClientConfig};
pub use editor::{EditorError, EventEditor};
pub use layout::GridMetrics;
pub use local::LocalBackend;
pub use observe::{Observable, Subscription};
pub use session::{MemoryStore, Session, SessionStore};
pub use time::{TimeInputError, ViewMode};
pub use todos::TodoList;
