//! # Offline Backend
//!
//! Implements every API trait on top of a [`SessionStore`], so the app
//! can run without a server. Each collection is one JSON blob:
//!
//! | key                | value                                        |
//! |--------------------|----------------------------------------------|
//! | `users`            | array of users, credentials included         |
//! | `events`           | object from `YYYY-MM-DD` (UTC start date) to event array |
//! | `todos`            | array of to-dos                              |
//! | `customCategories` | array of categories                          |
//!
//! Every mutation rewrites the whole blob with a single `set_item`.

use std::collections::BTreeMap;
use std::rc::Rc;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use shared::{
    ApiError, Category, DateRange, Event, EventPatch, LoginRequest, NewCategory, NewEvent, NewTodo,
    RegisterRequest, Todo, User, UserUpdate,
};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::api::{ApiResult, CategoryApi, EventApi, TodoApi, UserApi};
use crate::session::SessionStore;

pub const USERS_KEY: &str = "users";
pub const EVENTS_KEY: &str = "events";
pub const TODOS_KEY: &str = "todos";
pub const CATEGORIES_KEY: &str = "customCategories";

type EventsByDate = BTreeMap<String, Vec<Event>>;

pub struct LocalBackend {
    store: Rc<dyn SessionStore>,
}

impl LocalBackend {
    pub fn new(store: Rc<dyn SessionStore>) -> Self {
        Self { store }
    }

    fn load<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        match self.store.get_item(key) {
            Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!("Ignoring unreadable '{}' blob: {}", key, e);
                T::default()
            }),
            None => T::default(),
        }
    }

    fn save<T: Serialize>(&self, key: &str, value: &T) -> ApiResult<()> {
        let json = serde_json::to_string(value).map_err(|e| ApiError::Decode(e.to_string()))?;
        self.store
            .set_item(key, &json)
            .map_err(|e| ApiError::Transport(format!("Could not write '{}': {}", key, e)))?;
        debug!("Saved '{}' ({} bytes)", key, json.len());
        Ok(())
    }

    fn events(&self) -> EventsByDate {
        self.load(EVENTS_KEY)
    }

    fn file_event(events: &mut EventsByDate, event: Event) {
        events.entry(date_key(&event)).or_default().push(event);
    }

    /// Remove event `id` wherever it is filed
    fn take_event(events: &mut EventsByDate, id: &str) -> Option<Event> {
        let (key, index) = events.iter().find_map(|(key, list)| {
            list.iter().position(|e| e.id == id).map(|index| (key.clone(), index))
        })?;
        let list = events.get_mut(&key)?;
        let event = list.remove(index);
        if list.is_empty() {
            events.remove(&key);
        }
        Some(event)
    }
}

fn date_key(event: &Event) -> String {
    event.start.format("%Y-%m-%d").to_string()
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

fn not_found(kind: &str, id: &str) -> ApiError {
    ApiError::NotFound(format!("{} {} not found", kind, id))
}

#[async_trait(?Send)]
impl EventApi for LocalBackend {
    async fn events_in_range(&self, range: &DateRange) -> ApiResult<Vec<Event>> {
        let mut found: Vec<Event> = self
            .events()
            .into_values()
            .flatten()
            .filter(|event| event.intersects(range))
            .collect();
        found.sort_by(|a, b| a.start.cmp(&b.start));
        Ok(found)
    }

    async fn event(&self, id: &str) -> ApiResult<Event> {
        self.events()
            .into_values()
            .flatten()
            .find(|event| event.id == id)
            .ok_or_else(|| not_found("Event", id))
    }

    async fn create_event(&self, event: &NewEvent) -> ApiResult<Event> {
        let created = event.clone().into_event(new_id());
        let mut events = self.events();
        Self::file_event(&mut events, created.clone());
        self.save(EVENTS_KEY, &events)?;
        Ok(created)
    }

    async fn update_event(&self, id: &str, patch: &EventPatch) -> ApiResult<Event> {
        let mut events = self.events();
        let mut event = Self::take_event(&mut events, id).ok_or_else(|| not_found("Event", id))?;
        patch.apply_to(&mut event);
        Self::file_event(&mut events, event.clone());
        self.save(EVENTS_KEY, &events)?;
        Ok(event)
    }

    async fn delete_event(&self, id: &str) -> ApiResult<bool> {
        let mut events = self.events();
        if Self::take_event(&mut events, id).is_none() {
            return Ok(false);
        }
        self.save(EVENTS_KEY, &events)?;
        Ok(true)
    }
}

#[async_trait(?Send)]
impl TodoApi for LocalBackend {
    async fn todos(&self, user_id: &str) -> ApiResult<Vec<Todo>> {
        let todos: Vec<Todo> = self.load(TODOS_KEY);
        Ok(todos.into_iter().filter(|todo| todo.user_id == user_id).collect())
    }

    async fn todo(&self, id: &str) -> ApiResult<Todo> {
        let todos: Vec<Todo> = self.load(TODOS_KEY);
        todos
            .into_iter()
            .find(|todo| todo.id == id)
            .ok_or_else(|| not_found("Todo", id))
    }

    async fn create_todo(&self, todo: &NewTodo) -> ApiResult<Todo> {
        let created = Todo {
            id: new_id(),
            title: todo.title.clone(),
            description: todo.description.clone(),
            user_id: todo.user_id.clone(),
            completed: todo.completed,
            links: BTreeMap::new(),
        };
        let mut todos: Vec<Todo> = self.load(TODOS_KEY);
        todos.push(created.clone());
        self.save(TODOS_KEY, &todos)?;
        Ok(created)
    }

    async fn toggle_todo(&self, id: &str, _toggle_link: Option<&str>) -> ApiResult<Todo> {
        let mut todos: Vec<Todo> = self.load(TODOS_KEY);
        let todo = todos
            .iter_mut()
            .find(|todo| todo.id == id)
            .ok_or_else(|| not_found("Todo", id))?;
        todo.completed = !todo.completed;
        let toggled = todo.clone();
        self.save(TODOS_KEY, &todos)?;
        Ok(toggled)
    }

    async fn delete_todo(&self, id: &str) -> ApiResult<()> {
        let mut todos: Vec<Todo> = self.load(TODOS_KEY);
        let before = todos.len();
        todos.retain(|todo| todo.id != id);
        if todos.len() == before {
            return Err(not_found("Todo", id));
        }
        self.save(TODOS_KEY, &todos)
    }
}

#[async_trait(?Send)]
impl UserApi for LocalBackend {
    async fn login(&self, request: &LoginRequest) -> ApiResult<User> {
        let users: Vec<User> = self.load(USERS_KEY);
        users
            .into_iter()
            .find(|user| {
                user.email.eq_ignore_ascii_case(&request.email)
                    && user.password.as_deref() == Some(request.password.as_str())
            })
            .map(|user| user.without_credential())
            .ok_or_else(|| ApiError::Http {
                status: 401,
                message: "Invalid email or password".to_string(),
            })
    }

    async fn register(&self, request: &RegisterRequest) -> ApiResult<User> {
        let mut users: Vec<User> = self.load(USERS_KEY);
        if users.iter().any(|user| user.email.eq_ignore_ascii_case(&request.email)) {
            return Err(ApiError::Http {
                status: 409,
                message: "Email is already registered".to_string(),
            });
        }
        let created = User {
            id: new_id(),
            name: request.name.clone(),
            email: request.email.clone(),
            password: Some(request.password.clone()),
        };
        users.push(created.clone());
        self.save(USERS_KEY, &users)?;
        Ok(created.without_credential())
    }

    async fn user(&self, id: &str) -> ApiResult<User> {
        let users: Vec<User> = self.load(USERS_KEY);
        users
            .into_iter()
            .find(|user| user.id == id)
            .map(|user| user.without_credential())
            .ok_or_else(|| not_found("User", id))
    }

    async fn users(&self) -> ApiResult<Vec<User>> {
        let users: Vec<User> = self.load(USERS_KEY);
        Ok(users.iter().map(User::without_credential).collect())
    }

    async fn update_user(&self, id: &str, update: &UserUpdate) -> ApiResult<User> {
        let mut users: Vec<User> = self.load(USERS_KEY);
        let user = users
            .iter_mut()
            .find(|user| user.id == id)
            .ok_or_else(|| not_found("User", id))?;
        user.name = update.name.clone();
        user.email = update.email.clone();
        if let Some(password) = &update.password {
            user.password = Some(password.clone());
        }
        let updated = user.without_credential();
        self.save(USERS_KEY, &users)?;
        Ok(updated)
    }

    /// Removes the user together with everything they own
    async fn delete_user(&self, id: &str) -> ApiResult<()> {
        let mut users: Vec<User> = self.load(USERS_KEY);
        let before = users.len();
        users.retain(|user| user.id != id);
        if users.len() == before {
            return Err(not_found("User", id));
        }
        self.save(USERS_KEY, &users)?;

        let mut events = self.events();
        for list in events.values_mut() {
            list.retain(|event| event.user_id != id);
        }
        events.retain(|_, list| !list.is_empty());
        self.save(EVENTS_KEY, &events)?;

        let mut todos: Vec<Todo> = self.load(TODOS_KEY);
        todos.retain(|todo| todo.user_id != id);
        self.save(TODOS_KEY, &todos)?;

        let mut categories: Vec<Category> = self.load(CATEGORIES_KEY);
        categories.retain(|category| category.user_id != id);
        self.save(CATEGORIES_KEY, &categories)
    }
}

#[async_trait(?Send)]
impl CategoryApi for LocalBackend {
    async fn categories(&self, user_id: &str) -> ApiResult<Vec<Category>> {
        let categories: Vec<Category> = self.load(CATEGORIES_KEY);
        Ok(categories.into_iter().filter(|c| c.user_id == user_id).collect())
    }

    async fn create_category(&self, category: &NewCategory) -> ApiResult<Category> {
        let created = Category {
            id: new_id(),
            name: category.name.clone(),
            color: category.color.clone(),
            user_id: category.user_id.clone(),
        };
        let mut categories: Vec<Category> = self.load(CATEGORIES_KEY);
        categories.push(created.clone());
        self.save(CATEGORIES_KEY, &categories)?;
        Ok(created)
    }

    async fn update_category(&self, id: &str, category: &NewCategory) -> ApiResult<Category> {
        let mut categories: Vec<Category> = self.load(CATEGORIES_KEY);
        let existing = categories
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| not_found("Category", id))?;
        existing.name = category.name.clone();
        existing.color = category.color.clone();
        let updated = existing.clone();
        self.save(CATEGORIES_KEY, &categories)?;
        Ok(updated)
    }

    async fn delete_category(&self, id: &str) -> ApiResult<()> {
        let mut categories: Vec<Category> = self.load(CATEGORIES_KEY);
        let before = categories.len();
        categories.retain(|c| c.id != id);
        if categories.len() == before {
            return Err(not_found("Category", id));
        }
        self.save(CATEGORIES_KEY, &categories)
    }
}
