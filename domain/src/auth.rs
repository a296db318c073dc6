use std::rc::Rc;

use shared::{ApiError, LoginRequest, RegisterRequest, User, UserUpdate};
use thiserror::Error;
use tracing::{error, info, warn};

use crate::api::UserApi;
use crate::observe::{Listeners, Observable, Subscription};
use crate::session::Session;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AuthError {
    #[error("Please fill in the {0} field")]
    MissingField(&'static str),
    #[error("Please sign in first")]
    NotSignedIn,
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Sign-in, registration and account maintenance on top of [`Session`]
pub struct Auth<A: ?Sized> {
    api: Rc<A>,
    session: Session,
    listeners: Listeners,
}

impl<A: ?Sized> Clone for Auth<A> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            session: self.session.clone(),
            listeners: self.listeners.clone(),
        }
    }
}

impl<A: ?Sized> PartialEq for Auth<A> {
    fn eq(&self, other: &Self) -> bool {
        self.session == other.session
    }
}

impl<A: ?Sized> Observable for Auth<A> {
    fn subscribe(&self, callback: impl Fn() + 'static) -> Subscription {
        self.listeners.subscribe(callback)
    }
}

fn required<'a>(value: &'a str, field: &'static str) -> Result<&'a str, AuthError> {
    let value = value.trim();
    if value.is_empty() {
        Err(AuthError::MissingField(field))
    } else {
        Ok(value)
    }
}

impl<A: UserApi + ?Sized> Auth<A> {
    pub fn new(api: Rc<A>, session: Session) -> Self {
        Self {
            api,
            session,
            listeners: Listeners::default(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn current_user(&self) -> Option<User> {
        self.session.current()
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let request = LoginRequest {
            email: required(email, "email")?.to_string(),
            password: required(password, "password")?.to_string(),
        };
        let user = self.api.login(&request).await.map_err(|e| {
            warn!("Login failed for {}: {}", request.email, e);
            e
        })?;
        Ok(self.establish(user))
    }

    pub async fn register(&self, name: &str, email: &str, password: &str) -> Result<User, AuthError> {
        let request = RegisterRequest {
            name: required(name, "name")?.to_string(),
            email: required(email, "email")?.to_string(),
            password: required(password, "password")?.to_string(),
        };
        let user = self.api.register(&request).await.map_err(|e| {
            warn!("Registration failed for {}: {}", request.email, e);
            e
        })?;
        info!("Registered user {}", user.id);
        Ok(self.establish(user))
    }

    pub fn logout(&self) {
        self.session.clear();
        self.listeners.notify();
    }

    /// Replace name and email, and the password when one is given
    pub async fn update_profile(
        &self,
        name: &str,
        email: &str,
        password: Option<&str>,
    ) -> Result<User, AuthError> {
        let user_id = self.session.user_id().ok_or(AuthError::NotSignedIn)?;
        let update = UserUpdate {
            name: required(name, "name")?.to_string(),
            email: required(email, "email")?.to_string(),
            password: password.map(str::trim).filter(|p| !p.is_empty()).map(str::to_string),
        };
        let user = self.api.update_user(&user_id, &update).await.map_err(|e| {
            error!("Failed to update user {}: {}", user_id, e);
            e
        })?;
        info!("Updated profile of user {}", user_id);
        Ok(self.establish(user))
    }

    pub async fn delete_account(&self) -> Result<(), AuthError> {
        let user_id = self.session.user_id().ok_or(AuthError::NotSignedIn)?;
        self.api.delete_user(&user_id).await.map_err(|e| {
            error!("Failed to delete user {}: {}", user_id, e);
            e
        })?;
        info!("Deleted account {}", user_id);
        self.logout();
        Ok(())
    }

    /// All users, for labelling other people's events. Failures show nobody.
    pub async fn directory(&self) -> Vec<User> {
        match self.api.users().await {
            Ok(users) => users.iter().map(User::without_credential).collect(),
            Err(e) => {
                warn!("Failed to load users: {}", e);
                Vec::new()
            }
        }
    }

    fn establish(&self, user: User) -> User {
        let stored = user.without_credential();
        self.session.establish(user);
        self.listeners.notify();
        stored
    }
}
