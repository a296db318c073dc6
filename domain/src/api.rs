//! # Backend API Traits
//!
//! These traits abstract the remote server so the view models can run
//! against the HTTP client in the browser, the local (offline) backend,
//! or a recording mock in tests.
//!
//! Everything here is single-threaded: implementations hold `Rc`s and
//! browser futures, so the traits are declared `?Send`.

use async_trait::async_trait;
use shared::{
    ApiError, Category, DateRange, Event, EventPatch, LoginRequest, NewCategory, NewEvent, NewTodo,
    RegisterRequest, Todo, User, UserUpdate,
};

pub type ApiResult<T> = Result<T, ApiError>;

/// Calendar events (GraphQL on the remote server)
#[async_trait(?Send)]
pub trait EventApi {
    /// All events whose interval intersects `range`
    async fn events_in_range(&self, range: &DateRange) -> ApiResult<Vec<Event>>;

    async fn event(&self, id: &str) -> ApiResult<Event>;

    async fn create_event(&self, event: &NewEvent) -> ApiResult<Event>;

    /// Update only the fields present in `patch`
    async fn update_event(&self, id: &str, patch: &EventPatch) -> ApiResult<Event>;

    /// Returns whether an event was actually removed
    async fn delete_event(&self, id: &str) -> ApiResult<bool>;
}

/// To-do checklist (REST)
#[async_trait(?Send)]
pub trait TodoApi {
    async fn todos(&self, user_id: &str) -> ApiResult<Vec<Todo>>;

    async fn todo(&self, id: &str) -> ApiResult<Todo>;

    async fn create_todo(&self, todo: &NewTodo) -> ApiResult<Todo>;

    /// Flip the completed flag. `toggle_link` is the server-supplied
    /// hypermedia URL for the action, when the to-do carried one.
    async fn toggle_todo(&self, id: &str, toggle_link: Option<&str>) -> ApiResult<Todo>;

    async fn delete_todo(&self, id: &str) -> ApiResult<()>;
}

/// User accounts (REST)
#[async_trait(?Send)]
pub trait UserApi {
    async fn login(&self, request: &LoginRequest) -> ApiResult<User>;

    async fn register(&self, request: &RegisterRequest) -> ApiResult<User>;

    async fn user(&self, id: &str) -> ApiResult<User>;

    async fn users(&self) -> ApiResult<Vec<User>>;

    async fn update_user(&self, id: &str, update: &UserUpdate) -> ApiResult<User>;

    async fn delete_user(&self, id: &str) -> ApiResult<()>;
}

/// Event categories (REST)
#[async_trait(?Send)]
pub trait CategoryApi {
    async fn categories(&self, user_id: &str) -> ApiResult<Vec<Category>>;

    async fn create_category(&self, category: &NewCategory) -> ApiResult<Category>;

    async fn update_category(&self, id: &str, category: &NewCategory) -> ApiResult<Category>;

    async fn delete_category(&self, id: &str) -> ApiResult<()>;
}

/// Everything the application talks to
pub trait Backend: EventApi + TodoApi + UserApi + CategoryApi {}

impl<T> Backend for T where T: EventApi + TodoApi + UserApi + CategoryApi + ?Sized {}
