use calendar_domain::{Backend, CategoryList};
use shared::Category;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::use_app::{use_app, use_observed};
use super::use_toasts::use_toaster;

pub struct UseCategoriesResult {
    pub items: Vec<Category>,
    pub actions: UseCategoriesActions,
    /// For color lookups and the visibility filter
    pub list: CategoryList<dyn Backend>,
}

#[derive(Clone, PartialEq)]
pub struct UseCategoriesActions {
    /// (name, color)
    pub create: Callback<(String, String)>,
    /// (id, name, color)
    pub update: Callback<(String, String, String)>,
    pub remove: Callback<String>,
    pub toggle_visibility: Callback<String>,
}

#[hook]
pub fn use_categories() -> UseCategoriesResult {
    let app = use_app();
    let toaster = use_toaster();
    let list = app.categories.clone();
    use_observed(&list);

    let create = {
        let list = list.clone();
        let toaster = toaster.clone();
        use_callback((), move |(name, color): (String, String), _| {
            let list = list.clone();
            let toaster = toaster.clone();
            spawn_local(async move {
                match list.create(&name, &color).await {
                    Ok(Some(category)) => toaster.success(format!("Created category {}", category.name)),
                    Ok(None) => toaster.error("Please enter a category name"),
                    Err(e) => toaster.error(format!("Could not create category: {}", e)),
                }
            });
        })
    };

    let update = {
        let list = list.clone();
        let toaster = toaster.clone();
        use_callback((), move |(id, name, color): (String, String, String), _| {
            let list = list.clone();
            let toaster = toaster.clone();
            spawn_local(async move {
                match list.update(&id, &name, &color).await {
                    Ok(Some(_)) => {}
                    Ok(None) => toaster.error("Please enter a category name"),
                    Err(e) => toaster.error(format!("Could not update category: {}", e)),
                }
            });
        })
    };

    let remove = {
        let list = list.clone();
        use_callback((), move |id: String, _| {
            let list = list.clone();
            let toaster = toaster.clone();
            spawn_local(async move {
                if let Err(e) = list.remove(&id).await {
                    toaster.error(format!("Could not delete category: {}", e));
                }
            });
        })
    };

    let toggle_visibility = {
        let list = list.clone();
        use_callback((), move |id: String, _| list.toggle_visibility(&id))
    };

    use_effect_with(app.auth.session().user_id(), {
        let list = list.clone();
        move |_| {
            spawn_local(async move { list.reload().await });
            || ()
        }
    });

    UseCategoriesResult {
        items: list.items(),
        actions: UseCategoriesActions {
            create,
            update,
            remove,
            toggle_visibility,
        },
        list,
    }
}
