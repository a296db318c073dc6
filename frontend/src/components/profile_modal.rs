use web_sys::{HtmlInputElement, MouseEvent};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::hooks::use_app::use_app;
use crate::hooks::use_toasts::use_toaster;

#[derive(Properties, PartialEq)]
pub struct ProfileModalProps {
    pub is_open: bool,
    pub on_close: Callback<()>,
}

/// Edit name, email and password, or delete the account
#[function_component(ProfileModal)]
pub fn profile_modal(props: &ProfileModalProps) -> Html {
    let app = use_app();
    let toaster = use_toaster();
    let name = use_state(String::new);
    let email = use_state(String::new);
    let password = use_state(String::new);
    let is_submitting = use_state(|| false);
    let confirm_delete = use_state(|| false);
    let error_message = use_state(|| Option::<String>::None);

    // Refill the form from the session every time the modal opens
    {
        let auth = app.auth.clone();
        let name = name.clone();
        let email = email.clone();
        let password = password.clone();
        let confirm_delete = confirm_delete.clone();
        let error_message = error_message.clone();
        use_effect_with(props.is_open, move |is_open| {
            if *is_open {
                if let Some(user) = auth.current_user() {
                    name.set(user.name);
                    email.set(user.email);
                }
                password.set(String::new());
                confirm_delete.set(false);
                error_message.set(None);
            }
            || ()
        });
    }

    let bind = |field: &UseStateHandle<String>| {
        let field = field.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            field.set(input.value());
        })
    };

    let on_backdrop_click = {
        let on_close = props.on_close.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            on_close.emit(());
        })
    };

    let on_modal_click = Callback::from(|e: MouseEvent| {
        e.stop_propagation();
    });

    let on_close_click = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    let on_submit = {
        let auth = app.auth.clone();
        let toaster = toaster.clone();
        let name = name.clone();
        let email = email.clone();
        let password = password.clone();
        let is_submitting = is_submitting.clone();
        let error_message = error_message.clone();
        let on_close = props.on_close.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let auth = auth.clone();
            let toaster = toaster.clone();
            let name = (*name).clone();
            let email = (*email).clone();
            let password = (*password).clone();
            let is_submitting = is_submitting.clone();
            let error_message = error_message.clone();
            let on_close = on_close.clone();

            is_submitting.set(true);
            spawn_local(async move {
                match auth.update_profile(&name, &email, Some(&password)).await {
                    Ok(_) => {
                        toaster.success("Profile updated");
                        on_close.emit(());
                    }
                    Err(e) => error_message.set(Some(e.to_string())),
                }
                is_submitting.set(false);
            });
        })
    };

    let on_delete_click = {
        let auth = app.auth.clone();
        let toaster = toaster.clone();
        let confirm_delete = confirm_delete.clone();
        let is_submitting = is_submitting.clone();
        let error_message = error_message.clone();
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| {
            if !*confirm_delete {
                confirm_delete.set(true);
                return;
            }
            let auth = auth.clone();
            let toaster = toaster.clone();
            let is_submitting = is_submitting.clone();
            let error_message = error_message.clone();
            let on_close = on_close.clone();

            is_submitting.set(true);
            spawn_local(async move {
                match auth.delete_account().await {
                    Ok(()) => {
                        toaster.success("Your account was deleted");
                        on_close.emit(());
                    }
                    Err(e) => {
                        error_message.set(Some(e.to_string()));
                        is_submitting.set(false);
                    }
                }
            });
        })
    };

    if !props.is_open {
        return html! {};
    }

    let busy = *is_submitting;

    html! {
        <div class="modal-backdrop" onclick={on_backdrop_click}>
            <div class="modal profile-modal" onclick={on_modal_click}>
                <div class="modal-content">
                    <h3 class="modal-title">{"👤 Your Profile"}</h3>

                    {if let Some(error) = (*error_message).as_ref() {
                        html! { <div class="form-message error">{error}</div> }
                    } else { html! {} }}

                    <form onsubmit={on_submit}>
                        <div class="form-group">
                            <label for="profile-name">{"Name"}</label>
                            <input type="text" id="profile-name" value={(*name).clone()}
                                oninput={bind(&name)} disabled={busy} />
                        </div>
                        <div class="form-group">
                            <label for="profile-email">{"Email"}</label>
                            <input type="email" id="profile-email" value={(*email).clone()}
                                oninput={bind(&email)} disabled={busy} />
                        </div>
                        <div class="form-group">
                            <label for="profile-password">{"New password"}</label>
                            <input type="password" id="profile-password" autocomplete="new-password"
                                placeholder="Leave blank to keep the current one"
                                value={(*password).clone()} oninput={bind(&password)} disabled={busy} />
                        </div>

                        <div class="modal-buttons">
                            <button type="button" class="btn btn-danger" onclick={on_delete_click} disabled={busy}>
                                {if *confirm_delete { "Really delete account?" } else { "Delete account" }}
                            </button>
                            <button type="button" class="btn btn-secondary" onclick={on_close_click}>
                                {"Cancel"}
                            </button>
                            <button type="submit" class="btn btn-primary" disabled={busy}>
                                {if busy { "Saving..." } else { "Save" }}
                            </button>
                        </div>
                    </form>
                </div>
            </div>
        </div>
    }
}
