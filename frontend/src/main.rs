use yew::prelude::*;

mod components;
mod context;
mod hooks;
mod services;

use components::auth_form::AuthForm;
use components::calendar::CalendarPanel;
use components::category_panel::CategoryPanel;
use components::header::Header;
use components::profile_modal::ProfileModal;
use components::toast_stack::ToastStack;
use components::todo_list::TodoList;
use context::AppContext;
use hooks::use_app::{use_app, use_observed};
use hooks::use_toasts::{ToastQueue, Toaster};
use services::config::load_config;
use services::date_utils;

#[function_component(App)]
fn app() -> Html {
    let context = use_memo((), |_| AppContext::build(load_config()));
    let toasts = use_reducer(ToastQueue::default);
    let toaster = Toaster::new(toasts.dispatcher());

    html! {
        <ContextProvider<Toaster> context={toaster.clone()}>
            <ContextProvider<AppContext> context={(*context).clone()}>
                <Shell />
                <ToastStack queue={toasts} toaster={toaster} />
            </ContextProvider<AppContext>>
        </ContextProvider<Toaster>>
    }
}

/// Sign-in page, or the calendar workspace once a user is signed in
#[function_component(Shell)]
fn shell() -> Html {
    let app = use_app();
    use_observed(&app.auth);
    use_observed(&app.calendar);
    let profile_open = use_state(|| false);

    let Some(user) = app.auth.current_user() else {
        return html! { <AuthForm /> };
    };

    let on_open_profile = {
        let profile_open = profile_open.clone();
        Callback::from(move |_: ()| profile_open.set(true))
    };

    let on_close_profile = {
        let profile_open = profile_open.clone();
        Callback::from(move |_: ()| profile_open.set(false))
    };

    let on_logout = {
        let auth = app.auth.clone();
        Callback::from(move |_: ()| auth.logout())
    };

    let stats = app.calendar.stats(date_utils::today(), &chrono::Local);

    html! {
        <>
            <Header user={user} stats={stats} on_open_profile={on_open_profile} on_logout={on_logout} />
            <main class="main">
                <div class="container workspace">
                    <aside class="sidebar">
                        <CategoryPanel />
                        <TodoList />
                    </aside>
                    <CalendarPanel />
                </div>
            </main>
            <ProfileModal is_open={*profile_open} on_close={on_close_profile} />
        </>
    }
}

fn main() {
    console_error_panic_hook::set_once();
    wasm_tracing::set_as_global_default();
    yew::Renderer::<App>::new().render();
}
