//! In-memory backend for model tests: records every call and can be told
//! to fail specific operations.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use shared::{
    ApiError, Category, DateRange, Event, EventPatch, LoginRequest, NewCategory, NewEvent, NewTodo,
    Priority, RegisterRequest, Todo, User, UserUpdate,
};

use crate::api::{ApiResult, CategoryApi, EventApi, TodoApi, UserApi};
use crate::session::{MemoryStore, Session};

#[derive(Default)]
pub struct MockBackend {
    pub events: RefCell<Vec<Event>>,
    pub todos: RefCell<Vec<Todo>>,
    pub categories: RefCell<Vec<Category>>,
    pub users: RefCell<Vec<User>>,
    calls: RefCell<Vec<String>>,
    failures: RefCell<HashMap<&'static str, ApiError>>,
    next_id: Cell<u32>,
}

impl MockBackend {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Make every call to `operation` fail with `error` until cleared
    pub fn fail(&self, operation: &'static str, error: ApiError) {
        self.failures.borrow_mut().insert(operation, error);
    }

    pub fn clear_failures(&self) {
        self.failures.borrow_mut().clear();
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn count(&self, operation: &str) -> usize {
        self.calls.borrow().iter().filter(|call| call.as_str() == operation).count()
    }

    pub fn reset_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    fn enter(&self, operation: &'static str) -> ApiResult<()> {
        self.calls.borrow_mut().push(operation.to_string());
        match self.failures.borrow().get(operation) {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    fn fresh_id(&self, prefix: &str) -> String {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        format!("{}-{}", prefix, id)
    }
}

pub fn server_error() -> ApiError {
    ApiError::Http {
        status: 500,
        message: "Internal Server Error".to_string(),
    }
}

pub fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
}

pub fn user(id: &str) -> User {
    User {
        id: id.to_string(),
        name: id.to_string(),
        email: format!("{}@example.com", id),
        password: None,
    }
}

pub fn event(id: &str, owner: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> Event {
    Event {
        id: id.to_string(),
        title: id.to_string(),
        start,
        end,
        user_id: owner.to_string(),
        priority: Priority::Medium,
        category_id: None,
    }
}

pub fn todo(id: &str, owner: &str, title: &str) -> Todo {
    Todo {
        id: id.to_string(),
        title: title.to_string(),
        description: None,
        user_id: owner.to_string(),
        completed: false,
        links: Default::default(),
    }
}

/// Session signed in as `user_id`, backed by memory
pub fn signed_in(user_id: &str) -> Session {
    let session = Session::new(Rc::new(MemoryStore::new()), "auth");
    session.establish(user(user_id));
    session
}

pub fn signed_out() -> Session {
    Session::new(Rc::new(MemoryStore::new()), "auth")
}

#[async_trait(?Send)]
impl EventApi for MockBackend {
    async fn events_in_range(&self, range: &DateRange) -> ApiResult<Vec<Event>> {
        self.enter("events_in_range")?;
        Ok(self.events.borrow().iter().filter(|e| e.intersects(range)).cloned().collect())
    }

    async fn event(&self, id: &str) -> ApiResult<Event> {
        self.enter("event")?;
        self.events
            .borrow()
            .iter()
            .find(|e| e.id == id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("Event {} not found", id)))
    }

    async fn create_event(&self, event: &NewEvent) -> ApiResult<Event> {
        self.enter("create_event")?;
        let created = event.clone().into_event(self.fresh_id("evt"));
        self.events.borrow_mut().push(created.clone());
        Ok(created)
    }

    async fn update_event(&self, id: &str, patch: &EventPatch) -> ApiResult<Event> {
        self.enter("update_event")?;
        let mut events = self.events.borrow_mut();
        let event = events
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| ApiError::NotFound(format!("Event {} not found", id)))?;
        patch.apply_to(event);
        Ok(event.clone())
    }

    async fn delete_event(&self, id: &str) -> ApiResult<bool> {
        self.enter("delete_event")?;
        let mut events = self.events.borrow_mut();
        let before = events.len();
        events.retain(|e| e.id != id);
        Ok(events.len() < before)
    }
}

#[async_trait(?Send)]
impl TodoApi for MockBackend {
    async fn todos(&self, user_id: &str) -> ApiResult<Vec<Todo>> {
        self.enter("todos")?;
        Ok(self.todos.borrow().iter().filter(|t| t.user_id == user_id).cloned().collect())
    }

    async fn todo(&self, id: &str) -> ApiResult<Todo> {
        self.enter("todo")?;
        self.todos
            .borrow()
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("Todo {} not found", id)))
    }

    async fn create_todo(&self, todo: &NewTodo) -> ApiResult<Todo> {
        self.enter("create_todo")?;
        let created = Todo {
            id: self.fresh_id("todo"),
            title: todo.title.clone(),
            description: todo.description.clone(),
            user_id: todo.user_id.clone(),
            completed: todo.completed,
            links: Default::default(),
        };
        self.todos.borrow_mut().push(created.clone());
        Ok(created)
    }

    async fn toggle_todo(&self, id: &str, _toggle_link: Option<&str>) -> ApiResult<Todo> {
        self.enter("toggle_todo")?;
        let mut todos = self.todos.borrow_mut();
        let todo = todos
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| ApiError::NotFound(format!("Todo {} not found", id)))?;
        todo.completed = !todo.completed;
        Ok(todo.clone())
    }

    async fn delete_todo(&self, id: &str) -> ApiResult<()> {
        self.enter("delete_todo")?;
        let mut todos = self.todos.borrow_mut();
        let before = todos.len();
        todos.retain(|t| t.id != id);
        if todos.len() == before {
            return Err(ApiError::NotFound(format!("Todo {} not found", id)));
        }
        Ok(())
    }
}

#[async_trait(?Send)]
impl UserApi for MockBackend {
    async fn login(&self, request: &LoginRequest) -> ApiResult<User> {
        self.enter("login")?;
        self.users
            .borrow()
            .iter()
            .find(|u| u.email == request.email && u.password.as_deref() == Some(request.password.as_str()))
            .cloned()
            .ok_or_else(|| ApiError::Http {
                status: 401,
                message: "Invalid email or password".to_string(),
            })
    }

    async fn register(&self, request: &RegisterRequest) -> ApiResult<User> {
        self.enter("register")?;
        let created = User {
            id: self.fresh_id("user"),
            name: request.name.clone(),
            email: request.email.clone(),
            password: Some(request.password.clone()),
        };
        self.users.borrow_mut().push(created.clone());
        Ok(created)
    }

    async fn user(&self, id: &str) -> ApiResult<User> {
        self.enter("user")?;
        self.users
            .borrow()
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("User {} not found", id)))
    }

    async fn users(&self) -> ApiResult<Vec<User>> {
        self.enter("users")?;
        Ok(self.users.borrow().clone())
    }

    async fn update_user(&self, id: &str, update: &UserUpdate) -> ApiResult<User> {
        self.enter("update_user")?;
        let mut users = self.users.borrow_mut();
        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| ApiError::NotFound(format!("User {} not found", id)))?;
        user.name = update.name.clone();
        user.email = update.email.clone();
        if update.password.is_some() {
            user.password = update.password.clone();
        }
        Ok(user.clone())
    }

    async fn delete_user(&self, id: &str) -> ApiResult<()> {
        self.enter("delete_user")?;
        self.users.borrow_mut().retain(|u| u.id != id);
        Ok(())
    }
}

#[async_trait(?Send)]
impl CategoryApi for MockBackend {
    async fn categories(&self, user_id: &str) -> ApiResult<Vec<Category>> {
        self.enter("categories")?;
        Ok(self.categories.borrow().iter().filter(|c| c.user_id == user_id).cloned().collect())
    }

    async fn create_category(&self, category: &NewCategory) -> ApiResult<Category> {
        self.enter("create_category")?;
        let created = Category {
            id: self.fresh_id("cat"),
            name: category.name.clone(),
            color: category.color.clone(),
            user_id: category.user_id.clone(),
        };
        self.categories.borrow_mut().push(created.clone());
        Ok(created)
    }

    async fn update_category(&self, id: &str, category: &NewCategory) -> ApiResult<Category> {
        self.enter("update_category")?;
        let mut categories = self.categories.borrow_mut();
        let existing = categories
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| ApiError::NotFound(format!("Category {} not found", id)))?;
        existing.name = category.name.clone();
        existing.color = category.color.clone();
        Ok(existing.clone())
    }

    async fn delete_category(&self, id: &str) -> ApiResult<()> {
        self.enter("delete_category")?;
        self.categories.borrow_mut().retain(|c| c.id != id);
        Ok(())
    }
}
