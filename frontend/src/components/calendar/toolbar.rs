use calendar_domain::{LoadState, ViewMode};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ToolbarProps {
    pub title: String,
    pub mode: ViewMode,
    pub load: LoadState,
    pub on_prev: Callback<MouseEvent>,
    pub on_next: Callback<MouseEvent>,
    pub on_today: Callback<MouseEvent>,
    pub on_mode: Callback<ViewMode>,
    pub on_new_event: Callback<()>,
}

#[function_component(Toolbar)]
pub fn toolbar(props: &ToolbarProps) -> Html {
    let on_new_click = {
        let on_new_event = props.on_new_event.clone();
        Callback::from(move |_: MouseEvent| on_new_event.emit(()))
    };

    html! {
        <div class="calendar-toolbar">
            <div class="toolbar-left">
                <button type="button" class="nav-button" onclick={props.on_prev.clone()}>{"‹"}</button>
                <button type="button" class="nav-button" onclick={props.on_next.clone()}>{"›"}</button>
                <button type="button" class="btn btn-secondary" onclick={props.on_today.clone()}>{"Today"}</button>
            </div>
            <h2 class="calendar-title">
                {&props.title}
                {match &props.load {
                    LoadState::Loading => html! { <span class="load-indicator">{"Loading..."}</span> },
                    LoadState::Error(message) => html! {
                        <span class="load-indicator error" title={message.clone()}>{"⚠ Not up to date"}</span>
                    },
                    _ => html! {},
                }}
            </h2>
            <div class="toolbar-right">
                <div class="view-switch">
                    {for ViewMode::ALL.iter().map(|mode| {
                        let on_mode = props.on_mode.clone();
                        let mode = *mode;
                        html! {
                            <button
                                type="button"
                                class={classes!("view-button", (mode == props.mode).then_some("active"))}
                                onclick={Callback::from(move |_: MouseEvent| on_mode.emit(mode))}
                            >
                                {mode.label()}
                            </button>
                        }
                    })}
                </div>
                <button type="button" class="btn btn-primary" onclick={on_new_click}>{"+ New event"}</button>
            </div>
        </div>
    }
}
