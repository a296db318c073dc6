//! Per-user event categories and the grid's visibility filter.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use shared::{is_hex_color, ApiError, Category, Event, NewCategory, DEFAULT_CATEGORY_COLOR};
use tracing::{error, info, warn};

use crate::api::CategoryApi;
use crate::observe::{Listeners, Observable, Subscription};
use crate::session::Session;

#[derive(Default)]
struct CategoryState {
    items: Vec<Category>,
    hidden: HashSet<String>,
}

pub struct CategoryList<A: ?Sized> {
    api: Rc<A>,
    session: Session,
    state: Rc<RefCell<CategoryState>>,
    listeners: Listeners,
}

impl<A: ?Sized> Clone for CategoryList<A> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            session: self.session.clone(),
            state: self.state.clone(),
            listeners: self.listeners.clone(),
        }
    }
}

impl<A: ?Sized> PartialEq for CategoryList<A> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.state, &other.state)
    }
}

impl<A: ?Sized> Observable for CategoryList<A> {
    fn subscribe(&self, callback: impl Fn() + 'static) -> Subscription {
        self.listeners.subscribe(callback)
    }
}

/// `color` if it is `#rrggbb`, else the default
pub fn normalize_color(color: &str) -> String {
    let color = color.trim();
    if is_hex_color(color) {
        color.to_ascii_lowercase()
    } else {
        DEFAULT_CATEGORY_COLOR.to_string()
    }
}

impl<A: CategoryApi + ?Sized> CategoryList<A> {
    pub fn new(api: Rc<A>, session: Session) -> Self {
        Self {
            api,
            session,
            state: Rc::new(RefCell::new(CategoryState::default())),
            listeners: Listeners::default(),
        }
    }

    pub fn items(&self) -> Vec<Category> {
        self.state.borrow().items.clone()
    }

    pub fn category(&self, id: &str) -> Option<Category> {
        self.state.borrow().items.iter().find(|c| c.id == id).cloned()
    }

    /// Display color for an event's category; uncategorized events get the default
    pub fn color_of(&self, category_id: Option<&str>) -> String {
        category_id
            .and_then(|id| self.category(id))
            .map(|category| category.color)
            .unwrap_or_else(|| DEFAULT_CATEGORY_COLOR.to_string())
    }

    /// Fetch the signed-in user's categories; any failure shows none
    pub async fn reload(&self) {
        let items = match self.session.user_id() {
            Some(user_id) => match self.api.categories(&user_id).await {
                Ok(items) => items,
                Err(e) => {
                    warn!("Failed to load categories, showing none: {}", e);
                    Vec::new()
                }
            },
            None => Vec::new(),
        };
        {
            let mut state = self.state.borrow_mut();
            // forget hidden ids that no longer exist
            let ids: HashSet<&str> = items.iter().map(|c| c.id.as_str()).collect();
            let hidden = state.hidden.iter().filter(|id| ids.contains(id.as_str())).cloned().collect();
            state.hidden = hidden;
            state.items = items;
        }
        self.listeners.notify();
    }

    /// Add a category. A blank name is declined without a call.
    pub async fn create(&self, name: &str, color: &str) -> Result<Option<Category>, ApiError> {
        let Some(request) = self.request(name, color) else {
            return Ok(None);
        };
        let created = self.api.create_category(&request).await.map_err(|e| {
            error!("Failed to create category: {}", e);
            e
        })?;
        info!("Created category {} ({})", created.name, created.id);
        self.reload().await;
        Ok(Some(created))
    }

    pub async fn update(&self, id: &str, name: &str, color: &str) -> Result<Option<Category>, ApiError> {
        let Some(request) = self.request(name, color) else {
            return Ok(None);
        };
        let updated = self.api.update_category(id, &request).await.map_err(|e| {
            error!("Failed to update category {}: {}", id, e);
            e
        })?;
        info!("Updated category {}", id);
        self.reload().await;
        Ok(Some(updated))
    }

    pub async fn remove(&self, id: &str) -> Result<(), ApiError> {
        self.api.delete_category(id).await.map_err(|e| {
            error!("Failed to delete category {}: {}", id, e);
            e
        })?;
        info!("Deleted category {}", id);
        self.reload().await;
        Ok(())
    }

    pub fn toggle_visibility(&self, id: &str) {
        {
            let mut state = self.state.borrow_mut();
            if !state.hidden.remove(id) {
                state.hidden.insert(id.to_string());
            }
        }
        self.listeners.notify();
    }

    /// Events without a category are always visible
    pub fn is_visible(&self, category_id: Option<&str>) -> bool {
        match category_id {
            Some(id) => !self.state.borrow().hidden.contains(id),
            None => true,
        }
    }

    /// Filter for [`crate::layout::time_grid`] and [`crate::layout::month_grid`]
    pub fn shows(&self, event: &Event) -> bool {
        self.is_visible(event.category_id.as_deref())
    }

    fn request(&self, name: &str, color: &str) -> Option<NewCategory> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        let user_id = self.session.user_id()?;
        Some(NewCategory {
            name: name.to_string(),
            color: normalize_color(color),
            user_id,
        })
    }
}
