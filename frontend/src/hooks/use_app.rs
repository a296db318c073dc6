use calendar_domain::Observable;
use yew::prelude::*;

use crate::context::AppContext;

/// The application context provided by `App`
#[hook]
pub fn use_app() -> AppContext {
    use_context::<AppContext>().expect("AppContext must be provided by App")
}

/// Re-render the calling component whenever `model` changes
#[hook]
pub fn use_observed<M>(model: &M)
where
    M: Observable + Clone + PartialEq + 'static,
{
    let trigger = use_force_update();
    use_effect_with(model.clone(), move |model| {
        let subscription = model.subscribe(move || trigger.force_update());
        move || drop(subscription)
    });
}
