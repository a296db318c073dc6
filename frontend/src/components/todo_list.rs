use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

use crate::hooks::use_todos::use_todos;

#[function_component(TodoList)]
pub fn todo_list() -> Html {
    let todos = use_todos();
    let title = use_state(String::new);
    let description = use_state(String::new);

    let on_title_input = {
        let title = title.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            title.set(input.value());
        })
    };

    let on_description_input = {
        let description = description.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlTextAreaElement = e.target_unchecked_into();
            description.set(input.value());
        })
    };

    let on_submit = {
        let title = title.clone();
        let description = description.clone();
        let create = todos.actions.create.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if title.trim().is_empty() {
                return;
            }
            create.emit(((*title).clone(), (*description).clone()));
            title.set(String::new());
            description.set(String::new());
        })
    };

    html! {
        <section class="todo-section">
            <h2>
                {"✅ To-Do"}
                <span class="todo-counts">
                    {format!("{} open · {} done", todos.state.open_count, todos.state.completed_count)}
                </span>
            </h2>

            <form class="todo-form" onsubmit={on_submit}>
                <input
                    type="text"
                    placeholder="What needs doing?"
                    value={(*title).clone()}
                    oninput={on_title_input}
                />
                <textarea
                    placeholder="Details (optional)"
                    rows="2"
                    value={(*description).clone()}
                    oninput={on_description_input}
                />
                <button type="submit" class="btn btn-primary">{"Add"}</button>
            </form>

            {if todos.state.items.is_empty() {
                html! { <div class="empty-state">{"Nothing to do yet"}</div> }
            } else {
                html! {
                    <ul class="todo-items">
                        {for todos.state.items.iter().map(|todo| {
                            let on_toggle = {
                                let toggle = todos.actions.toggle.clone();
                                let id = todo.id.clone();
                                Callback::from(move |_: Event| toggle.emit(id.clone()))
                            };
                            let on_delete = {
                                let remove = todos.actions.remove.clone();
                                let id = todo.id.clone();
                                Callback::from(move |_: MouseEvent| remove.emit(id.clone()))
                            };
                            html! {
                                <li key={todo.id.clone()} class={classes!("todo-item", todo.completed.then_some("completed"))}>
                                    <label class="todo-label">
                                        <input type="checkbox" checked={todo.completed} onchange={on_toggle} />
                                        <span class="todo-title">{&todo.title}</span>
                                    </label>
                                    {if let Some(details) = todo.description.as_ref() {
                                        html! { <p class="todo-description">{details}</p> }
                                    } else { html! {} }}
                                    <button type="button" class="btn-icon delete" title="Delete" onclick={on_delete}>
                                        {"🗑"}
                                    </button>
                                </li>
                            }
                        })}
                    </ul>
                }
            }}
        </section>
    }
}
