//! Application-wide handles shared through a Yew context.

use std::rc::Rc;

use calendar_domain::{
    Auth, Backend, BackendMode, CalendarView, CategoryList, ClientConfig, LocalBackend, MemoryStore, Session,
    SessionStore, TodoList,
};
use chrono::Local;
use tracing::{info, warn};

use crate::services::api::HttpApiClient;
use crate::services::date_utils;
use crate::services::storage::LocalStore;

/// Every view model, wired to one backend and one session
#[derive(Clone, PartialEq)]
pub struct AppContext {
    pub config: Rc<ClientConfig>,
    pub auth: Auth<dyn Backend>,
    pub calendar: CalendarView<dyn Backend>,
    pub todos: TodoList<dyn Backend>,
    pub categories: CategoryList<dyn Backend>,
}

impl AppContext {
    pub fn build(config: ClientConfig) -> Self {
        let config = Rc::new(config);

        let store: Rc<dyn SessionStore> = match LocalStore::open() {
            Some(store) => Rc::new(store),
            None => {
                warn!("Local storage unavailable, the session will not survive a reload");
                Rc::new(MemoryStore::new())
            }
        };

        let session = Session::new(store.clone(), config.session_key.as_str());
        session.restore();

        let backend: Rc<dyn Backend> = match config.backend {
            BackendMode::Remote => {
                info!("Using calendar server at {}", config.api_base_url);
                Rc::new(HttpApiClient::new(config.clone()))
            }
            BackendMode::Offline => {
                info!("Using offline storage backend");
                Rc::new(LocalBackend::new(store))
            }
        };

        Self {
            auth: Auth::new(backend.clone(), session.clone()),
            calendar: CalendarView::new(backend.clone(), session.clone(), date_utils::today())
                .in_time_zone(Local),
            todos: TodoList::new(backend.clone(), session.clone()),
            categories: CategoryList::new(backend, session),
            config,
        }
    }
}
