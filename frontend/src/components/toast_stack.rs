use gloo::timers::callback::Timeout;
use yew::prelude::*;

use crate::hooks::use_toasts::{Toast, ToastQueue, Toaster};

/// How long a toast stays up, in milliseconds
const TOAST_LIFETIME_MS: u32 = 4000;

#[derive(Properties, PartialEq)]
pub struct ToastStackProps {
    pub queue: UseReducerHandle<ToastQueue>,
    pub toaster: Toaster,
}

#[function_component(ToastStack)]
pub fn toast_stack(props: &ToastStackProps) -> Html {
    html! {
        <div class="toast-stack">
            {for props.queue.items.iter().map(|toast| html! {
                <ToastItem key={toast.id} toast={toast.clone()} toaster={props.toaster.clone()} />
            })}
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct ToastItemProps {
    toast: Toast,
    toaster: Toaster,
}

#[function_component(ToastItem)]
fn toast_item(props: &ToastItemProps) -> Html {
    {
        let toaster = props.toaster.clone();
        use_effect_with(props.toast.id, move |id| {
            let id = *id;
            let timeout = Timeout::new(TOAST_LIFETIME_MS, move || toaster.dismiss(id));
            move || drop(timeout)
        });
    }

    let on_dismiss = {
        let toaster = props.toaster.clone();
        let id = props.toast.id;
        Callback::from(move |_: MouseEvent| toaster.dismiss(id))
    };

    html! {
        <div class={props.toast.kind.css_class()} role="status">
            <span class="toast-message">{&props.toast.message}</span>
            <button type="button" class="toast-close" onclick={on_dismiss}>{"×"}</button>
        </div>
    }
}
