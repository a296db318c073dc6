use calendar_domain::EventEditor;
use shared::{Category, Priority};
use web_sys::{HtmlInputElement, HtmlSelectElement, MouseEvent};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct EventModalProps {
    pub editor: EventEditor,
    pub categories: Vec<Category>,
    pub busy: bool,
    pub on_change: Callback<EventEditor>,
    pub on_save: Callback<()>,
    pub on_delete: Callback<()>,
    pub on_close: Callback<()>,
}

/// Create/edit form for one event. Field edits flow back through `on_change`.
#[function_component(EventModal)]
pub fn event_modal(props: &EventModalProps) -> Html {
    if !props.editor.open {
        return html! {};
    }

    let update = |apply: fn(&mut EventEditor, String)| {
        let editor = props.editor.clone();
        let on_change = props.on_change.clone();
        move |value: String| {
            let mut next = editor.clone();
            apply(&mut next, value);
            on_change.emit(next);
        }
    };

    let on_title_input = {
        let set = update(|editor, value| editor.values.title = value);
        Callback::from(move |e: InputEvent| set(e.target_unchecked_into::<HtmlInputElement>().value()))
    };
    let on_start_input = {
        let set = update(|editor, value| editor.values.start = value);
        Callback::from(move |e: InputEvent| set(e.target_unchecked_into::<HtmlInputElement>().value()))
    };
    let on_end_input = {
        let set = update(|editor, value| editor.values.end = value);
        Callback::from(move |e: InputEvent| set(e.target_unchecked_into::<HtmlInputElement>().value()))
    };
    let on_priority_change = {
        let set = update(|editor, value| {
            if let Some(priority) = Priority::parse(&value) {
                editor.values.priority = priority;
            }
        });
        Callback::from(move |e: Event| set(e.target_unchecked_into::<HtmlSelectElement>().value()))
    };
    let on_category_change = {
        let set = update(|editor, value| {
            editor.values.category_id = Some(value).filter(|id| !id.is_empty());
        });
        Callback::from(move |e: Event| set(e.target_unchecked_into::<HtmlSelectElement>().value()))
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

    let on_submit = {
        let on_save = props.on_save.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            on_save.emit(());
        })
    };

    let on_delete_click = {
        let on_delete = props.on_delete.clone();
        Callback::from(move |_: MouseEvent| on_delete.emit(()))
    };

    let on_cancel_click = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    let values = &props.editor.values;
    let selected_category = values.category_id.clone().unwrap_or_default();

    html! {
        <div class="modal-backdrop" onclick={on_backdrop_click}>
            <div class="modal event-modal" onclick={on_modal_click}>
                <div class="modal-content">
                    <h3 class="modal-title">
                        {if props.editor.is_editing() { "Edit event" } else { "New event" }}
                    </h3>

                    {if let Some(error) = props.editor.error.as_ref() {
                        html! { <div class="form-message error">{error}</div> }
                    } else { html! {} }}

                    <form onsubmit={on_submit}>
                        <div class="form-group">
                            <label for="event-title">{"Title"}</label>
                            <input type="text" id="event-title" value={values.title.clone()}
                                oninput={on_title_input} disabled={props.busy} />
                        </div>
                        <div class="form-row">
                            <div class="form-group">
                                <label for="event-start">{"Start"}</label>
                                <input type="datetime-local" id="event-start" value={values.start.clone()}
                                    oninput={on_start_input} disabled={props.busy} />
                            </div>
                            <div class="form-group">
                                <label for="event-end">{"End"}</label>
                                <input type="datetime-local" id="event-end" value={values.end.clone()}
                                    oninput={on_end_input} disabled={props.busy} />
                            </div>
                        </div>
                        <div class="form-row">
                            <div class="form-group">
                                <label for="event-priority">{"Priority"}</label>
                                <select id="event-priority" onchange={on_priority_change} disabled={props.busy}>
                                    {for Priority::ALL.iter().map(|priority| html! {
                                        <option value={priority.as_str()} selected={*priority == values.priority}>
                                            {priority.label()}
                                        </option>
                                    })}
                                </select>
                            </div>
                            <div class="form-group">
                                <label for="event-category">{"Category"}</label>
                                <select id="event-category" onchange={on_category_change} disabled={props.busy}>
                                    <option value="" selected={selected_category.is_empty()}>{"None"}</option>
                                    {for props.categories.iter().map(|category| html! {
                                        <option value={category.id.clone()} selected={category.id == selected_category}>
                                            {&category.name}
                                        </option>
                                    })}
                                </select>
                            </div>
                        </div>

                        <div class="modal-buttons">
                            {if props.editor.is_editing() {
                                html! {
                                    <button type="button" class="btn btn-danger"
                                        onclick={on_delete_click} disabled={props.busy}>
                                        {"Delete"}
                                    </button>
                                }
                            } else { html! {} }}
                            <button type="button" class="btn btn-secondary" onclick={on_cancel_click}>
                                {"Cancel"}
                            </button>
                            <button type="submit" class="btn btn-primary" disabled={props.busy}>
                                {if props.busy { "Saving..." } else { "Save" }}
                            </button>
                        </div>
                    </form>
                </div>
            </div>
        </div>
    }
}
