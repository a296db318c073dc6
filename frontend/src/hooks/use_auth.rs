use std::collections::HashMap;
use std::rc::Rc;

use shared::User;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::use_app::{use_app, use_observed};
use super::use_toasts::use_toaster;

#[derive(Clone, PartialEq)]
pub struct AuthState {
    pub user: Option<User>,
    pub pending: bool,
    pub error: Option<String>,
}

pub struct UseAuthResult {
    pub state: AuthState,
    pub actions: UseAuthActions,
}

#[derive(Clone)]
pub struct UseAuthActions {
    /// (email, password)
    pub login: Callback<(String, String)>,
    /// (name, email, password)
    pub register: Callback<(String, String, String)>,
    pub logout: Callback<()>,
}

#[hook]
pub fn use_auth() -> UseAuthResult {
    let app = use_app();
    let toaster = use_toaster();
    use_observed(&app.auth);

    let pending = use_state(|| false);
    let error = use_state(|| Option::<String>::None);

    let login = {
        let auth = app.auth.clone();
        let pending = pending.clone();
        let error = error.clone();
        let toaster = toaster.clone();
        use_callback((), move |(email, password): (String, String), _| {
            let auth = auth.clone();
            let pending = pending.clone();
            let error = error.clone();
            let toaster = toaster.clone();
            pending.set(true);
            error.set(None);
            spawn_local(async move {
                match auth.login(&email, &password).await {
                    Ok(user) => toaster.success(format!("Welcome back, {}", user.name)),
                    Err(e) => error.set(Some(e.to_string())),
                }
                pending.set(false);
            });
        })
    };

    let register = {
        let auth = app.auth.clone();
        let pending = pending.clone();
        let error = error.clone();
        let toaster = toaster.clone();
        use_callback((), move |(name, email, password): (String, String, String), _| {
            let auth = auth.clone();
            let pending = pending.clone();
            let error = error.clone();
            let toaster = toaster.clone();
            pending.set(true);
            error.set(None);
            spawn_local(async move {
                match auth.register(&name, &email, &password).await {
                    Ok(user) => toaster.success(format!("Welcome, {}", user.name)),
                    Err(e) => error.set(Some(e.to_string())),
                }
                pending.set(false);
            });
        })
    };

    let logout = {
        let auth = app.auth.clone();
        let error = error.clone();
        use_callback((), move |_: (), _| {
            error.set(None);
            auth.logout();
        })
    };

    UseAuthResult {
        state: AuthState {
            user: app.auth.current_user(),
            pending: *pending,
            error: (*error).clone(),
        },
        actions: UseAuthActions {
            login,
            register,
            logout,
        },
    }
}

/// Display names by user id, for labelling other people's events
#[hook]
pub fn use_directory() -> Rc<HashMap<String, String>> {
    let app = use_app();
    let names = use_state(|| Rc::new(HashMap::<String, String>::new()));
    let user_id = app.auth.session().user_id();

    {
        let auth = app.auth.clone();
        let names = names.clone();
        use_effect_with(user_id, move |user_id| {
            if user_id.is_some() {
                spawn_local(async move {
                    let directory = auth
                        .directory()
                        .await
                        .into_iter()
                        .map(|user| (user.id, user.name))
                        .collect();
                    names.set(Rc::new(directory));
                });
            }
            || ()
        });
    }

    (*names).clone()
}
