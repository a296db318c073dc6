use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::hooks::use_auth::use_auth;

#[derive(Clone, Copy, PartialEq)]
enum Mode {
    Login,
    Register,
}

/// Sign-in and registration, shown while nobody is signed in
#[function_component(AuthForm)]
pub fn auth_form() -> Html {
    let auth = use_auth();
    let mode = use_state(|| Mode::Login);
    let name = use_state(String::new);
    let email = use_state(String::new);
    let password = use_state(String::new);

    let bind = |field: &UseStateHandle<String>| {
        let field = field.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            field.set(input.value());
        })
    };

    let on_submit = {
        let mode = mode.clone();
        let name = name.clone();
        let email = email.clone();
        let password = password.clone();
        let login = auth.actions.login.clone();
        let register = auth.actions.register.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            match *mode {
                Mode::Login => login.emit(((*email).clone(), (*password).clone())),
                Mode::Register => register.emit(((*name).clone(), (*email).clone(), (*password).clone())),
            }
        })
    };

    let switch_to = |target: Mode| {
        let mode = mode.clone();
        let password = password.clone();
        Callback::from(move |_: MouseEvent| {
            password.set(String::new());
            mode.set(target);
        })
    };

    let pending = auth.state.pending;
    let registering = *mode == Mode::Register;

    html! {
        <div class="auth-page">
            <section class="auth-card">
                <h2>{if registering { "Create an account" } else { "Sign in" }}</h2>

                <div class="auth-tabs">
                    <button
                        type="button"
                        class={classes!("auth-tab", (!registering).then_some("active"))}
                        onclick={switch_to(Mode::Login)}
                    >
                        {"Sign in"}
                    </button>
                    <button
                        type="button"
                        class={classes!("auth-tab", registering.then_some("active"))}
                        onclick={switch_to(Mode::Register)}
                    >
                        {"Register"}
                    </button>
                </div>

                {if let Some(error) = auth.state.error.as_ref() {
                    html! { <div class="form-message error">{error}</div> }
                } else { html! {} }}

                <form class="auth-form" onsubmit={on_submit}>
                    {if registering {
                        html! {
                            <div class="form-group">
                                <label for="auth-name">{"Name"}</label>
                                <input
                                    type="text"
                                    id="auth-name"
                                    autocomplete="name"
                                    value={(*name).clone()}
                                    oninput={bind(&name)}
                                    disabled={pending}
                                />
                            </div>
                        }
                    } else { html! {} }}

                    <div class="form-group">
                        <label for="auth-email">{"Email"}</label>
                        <input
                            type="email"
                            id="auth-email"
                            autocomplete="email"
                            value={(*email).clone()}
                            oninput={bind(&email)}
                            disabled={pending}
                        />
                    </div>

                    <div class="form-group">
                        <label for="auth-password">{"Password"}</label>
                        <input
                            type="password"
                            id="auth-password"
                            autocomplete={if registering { "new-password" } else { "current-password" }}
                            value={(*password).clone()}
                            oninput={bind(&password)}
                            disabled={pending}
                        />
                    </div>

                    <button type="submit" class="btn btn-primary" disabled={pending}>
                        {match (pending, registering) {
                            (true, _) => "Please wait...",
                            (false, true) => "Create account",
                            (false, false) => "Sign in",
                        }}
                    </button>
                </form>
            </section>
        </div>
    }
}
