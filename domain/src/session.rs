//! # Session State
//!
//! Holds the single signed-in user (or none) and mirrors it to persistent
//! storage, so a reload restores the session without signing in again.
//!
//! `Session` is a cheap `Clone` handle: every clone sees the same user.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use shared::User;
use tracing::{info, warn};

/// String key/value storage (browser local storage, or memory)
pub trait SessionStore {
    fn get_item(&self, key: &str) -> Option<String>;

    /// Replace the stored value for `key` in one write
    fn set_item(&self, key: &str, value: &str) -> Result<(), String>;

    fn remove_item(&self, key: &str);
}

/// In-memory store, used in tests and when local storage is unavailable
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    items: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemoryStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), String> {
        self.items.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) {
        self.items.borrow_mut().remove(key);
    }
}

#[derive(Clone)]
pub struct Session {
    store: Rc<dyn SessionStore>,
    key: Rc<str>,
    user: Rc<RefCell<Option<User>>>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("key", &self.key)
            .field("user", &self.user.borrow())
            .finish()
    }
}

impl PartialEq for Session {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.user, &other.user)
    }
}

impl Session {
    /// Create an empty session over `store`; call [`Session::restore`] to load it
    pub fn new(store: Rc<dyn SessionStore>, key: impl Into<String>) -> Self {
        let key: String = key.into();
        Self {
            store,
            key: Rc::from(key.as_str()),
            user: Rc::new(RefCell::new(None)),
        }
    }

    /// Read the persisted user. An absent or corrupt blob means no session.
    pub fn restore(&self) -> Option<User> {
        let restored = match self.store.get_item(&self.key) {
            Some(raw) => match serde_json::from_str::<User>(&raw) {
                Ok(user) => {
                    info!("Restored session for user {}", user.id);
                    Some(user)
                }
                Err(e) => {
                    warn!("Discarding unreadable session blob: {}", e);
                    self.store.remove_item(&self.key);
                    None
                }
            },
            None => None,
        };
        *self.user.borrow_mut() = restored.clone();
        restored
    }

    /// Make `user` the current user, replacing any previous session
    pub fn establish(&self, user: User) {
        let stored = user.without_credential();
        match serde_json::to_string(&stored) {
            Ok(json) => {
                if let Err(e) = self.store.set_item(&self.key, &json) {
                    warn!("Failed to persist session: {}", e);
                }
            }
            Err(e) => warn!("Failed to serialize session: {}", e),
        }
        info!("Session established for user {}", stored.id);
        *self.user.borrow_mut() = Some(stored);
    }

    /// Drop the current user from memory and storage
    pub fn clear(&self) {
        self.store.remove_item(&self.key);
        if let Some(user) = self.user.borrow_mut().take() {
            info!("Session cleared for user {}", user.id);
        }
    }

    pub fn current(&self) -> Option<User> {
        self.user.borrow().clone()
    }

    pub fn user_id(&self) -> Option<String> {
        self.user.borrow().as_ref().map(|user| user.id.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.borrow().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ada() -> User {
        User {
            id: "u1".to_string(),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            password: Some("secret".to_string()),
        }
    }

    fn session_with(store: &MemoryStore) -> Session {
        Session::new(Rc::new(store.clone()), "auth")
    }

    #[test]
    fn test_restore_absent_blob() {
        let store = MemoryStore::new();
        let session = session_with(&store);
        assert_eq!(session.restore(), None);
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_establish_persists_without_credential() {
        let store = MemoryStore::new();
        let session = session_with(&store);
        session.establish(ada());

        let raw = store.get_item("auth").unwrap();
        assert!(!raw.contains("secret"));

        let reloaded = session_with(&store);
        let user = reloaded.restore().unwrap();
        assert_eq!(user.id, "u1");
        assert_eq!(user.password, None);
        assert_eq!(reloaded.user_id().as_deref(), Some("u1"));
    }

    #[test]
    fn test_restore_corrupt_blob() {
        let store = MemoryStore::new();
        store.set_item("auth", "{not json").unwrap();
        let session = session_with(&store);
        assert_eq!(session.restore(), None);
        assert_eq!(store.get_item("auth"), None);
    }

    #[test]
    fn test_establish_replaces_previous_user() {
        let store = MemoryStore::new();
        let session = session_with(&store);
        session.establish(ada());
        session.establish(User {
            id: "u2".to_string(),
            name: "Grace".to_string(),
            email: "grace@example.com".to_string(),
            password: None,
        });
        assert_eq!(session.user_id().as_deref(), Some("u2"));
        assert_eq!(session_with(&store).restore().unwrap().id, "u2");
    }

    #[test]
    fn test_clear() {
        let store = MemoryStore::new();
        let session = session_with(&store);
        let other_handle = session.clone();
        session.establish(ada());
        other_handle.clear();
        assert!(!session.is_authenticated());
        assert_eq!(store.get_item("auth"), None);
    }
}
