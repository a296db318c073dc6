use shared::Todo;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::use_app::{use_app, use_observed};
use super::use_toasts::use_toaster;

#[derive(Clone, PartialEq)]
pub struct TodoState {
    pub items: Vec<Todo>,
    pub open_count: usize,
    pub completed_count: usize,
}

pub struct UseTodosResult {
    pub state: TodoState,
    pub actions: UseTodosActions,
}

#[derive(Clone, PartialEq)]
pub struct UseTodosActions {
    /// (title, description)
    pub create: Callback<(String, String)>,
    pub toggle: Callback<String>,
    pub remove: Callback<String>,
}

#[hook]
pub fn use_todos() -> UseTodosResult {
    let app = use_app();
    let toaster = use_toaster();
    let todos = app.todos.clone();
    use_observed(&todos);

    let create = {
        let todos = todos.clone();
        let toaster = toaster.clone();
        use_callback((), move |(title, description): (String, String), _| {
            let todos = todos.clone();
            let toaster = toaster.clone();
            spawn_local(async move {
                match todos.create(&title, &description).await {
                    Ok(Some(todo)) => toaster.success(format!("Added \"{}\"", todo.title)),
                    Ok(None) => {}
                    Err(e) => toaster.error(format!("Could not add to-do: {}", e)),
                }
            });
        })
    };

    let toggle = {
        let todos = todos.clone();
        let toaster = toaster.clone();
        use_callback((), move |id: String, _| {
            let todos = todos.clone();
            let toaster = toaster.clone();
            spawn_local(async move {
                if let Err(e) = todos.toggle(&id).await {
                    toaster.error(format!("Could not update to-do: {}", e));
                }
            });
        })
    };

    let remove = {
        let todos = todos.clone();
        use_callback((), move |id: String, _| {
            let todos = todos.clone();
            let toaster = toaster.clone();
            spawn_local(async move {
                if let Err(e) = todos.remove(&id).await {
                    toaster.error(format!("Could not delete to-do: {}", e));
                }
            });
        })
    };

    // Load on mount and whenever the signed-in user changes
    use_effect_with(app.auth.session().user_id(), {
        let todos = todos.clone();
        move |_| {
            spawn_local(async move { todos.reload().await });
            || ()
        }
    });

    UseTodosResult {
        state: TodoState {
            items: todos.items(),
            open_count: todos.open_count(),
            completed_count: todos.completed_count(),
        },
        actions: UseTodosActions { create, toggle, remove },
    }
}
