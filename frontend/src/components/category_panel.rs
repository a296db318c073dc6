use shared::{Category, DEFAULT_CATEGORY_COLOR};
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::hooks::use_categories::{use_categories, UseCategoriesActions};

/// Category list with visibility toggles, inline editing and a create form
#[function_component(CategoryPanel)]
pub fn category_panel() -> Html {
    let categories = use_categories();
    let name = use_state(String::new);
    let color = use_state(|| DEFAULT_CATEGORY_COLOR.to_string());

    let on_name_input = {
        let name = name.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            name.set(input.value());
        })
    };

    let on_color_input = {
        let color = color.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            color.set(input.value());
        })
    };

    let on_submit = {
        let name = name.clone();
        let color = color.clone();
        let create = categories.actions.create.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            create.emit(((*name).clone(), (*color).clone()));
            name.set(String::new());
        })
    };

    html! {
        <section class="category-section">
            <h2>{"🏷️ Categories"}</h2>
            <ul class="category-items">
                {for categories.items.iter().map(|category| html! {
                    <CategoryRow
                        key={category.id.clone()}
                        category={category.clone()}
                        visible={categories.list.is_visible(Some(category.id.as_str()))}
                        actions={categories.actions.clone()}
                    />
                })}
            </ul>
            <form class="category-form" onsubmit={on_submit}>
                <input type="color" value={(*color).clone()} oninput={on_color_input} />
                <input type="text" placeholder="New category" value={(*name).clone()} oninput={on_name_input} />
                <button type="submit" class="btn btn-secondary">{"Add"}</button>
            </form>
        </section>
    }
}

#[derive(Properties, PartialEq)]
struct CategoryRowProps {
    category: Category,
    visible: bool,
    actions: UseCategoriesActions,
}

#[function_component(CategoryRow)]
fn category_row(props: &CategoryRowProps) -> Html {
    let editing = use_state(|| false);
    let name = use_state(|| props.category.name.clone());
    let color = use_state(|| props.category.color.clone());

    let on_toggle = {
        let toggle = props.actions.toggle_visibility.clone();
        let id = props.category.id.clone();
        Callback::from(move |_: Event| toggle.emit(id.clone()))
    };

    let on_edit = {
        let editing = editing.clone();
        let name = name.clone();
        let color = color.clone();
        let category = props.category.clone();
        Callback::from(move |_: MouseEvent| {
            name.set(category.name.clone());
            color.set(category.color.clone());
            editing.set(true);
        })
    };

    let on_save = {
        let editing = editing.clone();
        let name = name.clone();
        let color = color.clone();
        let update = props.actions.update.clone();
        let id = props.category.id.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            update.emit((id.clone(), (*name).clone(), (*color).clone()));
            editing.set(false);
        })
    };

    let on_cancel = {
        let editing = editing.clone();
        Callback::from(move |_: MouseEvent| editing.set(false))
    };

    let on_delete = {
        let remove = props.actions.remove.clone();
        let id = props.category.id.clone();
        Callback::from(move |_: MouseEvent| remove.emit(id.clone()))
    };

    if *editing {
        let on_name_input = {
            let name = name.clone();
            Callback::from(move |e: InputEvent| {
                let input: HtmlInputElement = e.target_unchecked_into();
                name.set(input.value());
            })
        };
        let on_color_input = {
            let color = color.clone();
            Callback::from(move |e: InputEvent| {
                let input: HtmlInputElement = e.target_unchecked_into();
                color.set(input.value());
            })
        };
        return html! {
            <li class="category-item editing">
                <form class="category-form" onsubmit={on_save}>
                    <input type="color" value={(*color).clone()} oninput={on_color_input} />
                    <input type="text" value={(*name).clone()} oninput={on_name_input} />
                    <button type="submit" class="btn btn-primary">{"Save"}</button>
                    <button type="button" class="btn btn-secondary" onclick={on_cancel}>{"Cancel"}</button>
                </form>
            </li>
        };
    }

    html! {
        <li class="category-item">
            <label class="category-label">
                <input type="checkbox" checked={props.visible} onchange={on_toggle} />
                <span class="category-swatch" style={format!("background-color: {}", props.category.color)}></span>
                <span class="category-name">{&props.category.name}</span>
            </label>
            <button type="button" class="btn-icon" title="Edit" onclick={on_edit}>{"✏️"}</button>
            <button type="button" class="btn-icon delete" title="Delete" onclick={on_delete}>{"🗑"}</button>
        </li>
    }
}
