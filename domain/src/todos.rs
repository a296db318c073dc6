//! To-do checklist model.
//!
//! Reads degrade to an empty list. Mutations propagate their errors and
//! are always followed by a reload, so the list only ever shows what the
//! server returned. A toggle is shown tentatively before the server
//! answers and reconciled by that reload.

use std::cell::RefCell;
use std::rc::Rc;

use shared::{ApiError, NewTodo, Todo};
use tracing::{error, info, warn};

use crate::api::TodoApi;
use crate::observe::{Listeners, Observable, Subscription};
use crate::session::Session;

pub struct TodoList<A: ?Sized> {
    api: Rc<A>,
    session: Session,
    items: Rc<RefCell<Vec<Todo>>>,
    listeners: Listeners,
}

impl<A: ?Sized> Clone for TodoList<A> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            session: self.session.clone(),
            items: self.items.clone(),
            listeners: self.listeners.clone(),
        }
    }
}

impl<A: ?Sized> PartialEq for TodoList<A> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.items, &other.items)
    }
}

impl<A: ?Sized> Observable for TodoList<A> {
    fn subscribe(&self, callback: impl Fn() + 'static) -> Subscription {
        self.listeners.subscribe(callback)
    }
}

impl<A: TodoApi + ?Sized> TodoList<A> {
    pub fn new(api: Rc<A>, session: Session) -> Self {
        Self {
            api,
            session,
            items: Rc::new(RefCell::new(Vec::new())),
            listeners: Listeners::default(),
        }
    }

    pub fn items(&self) -> Vec<Todo> {
        self.items.borrow().clone()
    }

    pub fn open_count(&self) -> usize {
        self.items.borrow().iter().filter(|todo| !todo.completed).count()
    }

    pub fn completed_count(&self) -> usize {
        self.items.borrow().iter().filter(|todo| todo.completed).count()
    }

    /// Fetch the signed-in user's to-dos; any failure shows an empty list
    pub async fn reload(&self) {
        let todos = match self.session.user_id() {
            Some(user_id) => match self.api.todos(&user_id).await {
                Ok(todos) => todos,
                Err(e) => {
                    warn!("Failed to load todos, showing none: {}", e);
                    Vec::new()
                }
            },
            None => Vec::new(),
        };
        self.replace(todos);
    }

    /// Add a to-do. A blank title is declined without a call (`Ok(None)`).
    pub async fn create(&self, title: &str, description: &str) -> Result<Option<Todo>, ApiError> {
        let title = title.trim();
        if title.is_empty() {
            return Ok(None);
        }
        let Some(user_id) = self.session.user_id() else {
            warn!("Ignoring new todo without a session");
            return Ok(None);
        };

        let description = Some(description.trim())
            .filter(|d| !d.is_empty())
            .map(str::to_string);
        let created = self
            .api
            .create_todo(&NewTodo::new(title, description, user_id))
            .await
            .map_err(|e| {
                error!("Failed to create todo: {}", e);
                e
            })?;
        info!("Created todo {}", created.id);
        self.reload().await;
        Ok(Some(created))
    }

    /// Flip `completed`, shown immediately and reconciled by a reload
    pub async fn toggle(&self, id: &str) -> Result<(), ApiError> {
        let link = {
            let mut items = self.items.borrow_mut();
            items.iter_mut().find(|todo| todo.id == id).and_then(|todo| {
                todo.completed = !todo.completed;
                todo.toggle_link().map(str::to_string)
            })
        };
        self.listeners.notify();

        let result = self.api.toggle_todo(id, link.as_deref()).await;
        if let Err(e) = &result {
            error!("Failed to toggle todo {}: {}", id, e);
        }
        self.reload().await;
        result.map(|_| ())
    }

    pub async fn remove(&self, id: &str) -> Result<(), ApiError> {
        let result = self.api.delete_todo(id).await;
        match &result {
            Ok(()) => info!("Deleted todo {}", id),
            Err(e) => error!("Failed to delete todo {}: {}", id, e),
        }
        self.reload().await;
        result
    }

    fn replace(&self, todos: Vec<Todo>) {
        *self.items.borrow_mut() = todos;
        self.listeners.notify();
    }
}
