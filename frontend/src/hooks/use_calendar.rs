use calendar_domain::{Backend, CalendarView, EventStats, LoadState, ViewMode};
use chrono::{Local, NaiveDate};
use shared::Event;
use wasm_bindgen_futures::spawn_local;
use web_sys::MouseEvent;
use yew::prelude::*;

use super::use_app::{use_app, use_observed};
use super::use_toasts::use_toaster;
use crate::services::date_utils;

#[derive(Clone, PartialEq)]
pub struct CalendarState {
    pub cursor: NaiveDate,
    pub mode: ViewMode,
    pub title: String,
    pub events: Vec<Event>,
    pub load: LoadState,
    pub stats: EventStats,
}

pub struct UseCalendarResult {
    pub state: CalendarState,
    pub actions: UseCalendarActions,
    pub view: CalendarView<dyn Backend>,
}

#[derive(Clone)]
pub struct UseCalendarActions {
    pub prev: Callback<MouseEvent>,
    pub next: Callback<MouseEvent>,
    pub today: Callback<MouseEvent>,
    pub set_mode: Callback<ViewMode>,
    pub refresh: Callback<()>,
}

#[hook]
pub fn use_calendar() -> UseCalendarResult {
    let app = use_app();
    let toaster = use_toaster();
    let view = app.calendar.clone();
    use_observed(&view);
    use_observed(&app.auth);

    let refresh = {
        let view = view.clone();
        use_callback((), move |_: (), _| {
            let view = view.clone();
            let toaster = toaster.clone();
            spawn_local(async move {
                if let Err(e) = view.reload().await {
                    toaster.error(format!("Could not load events: {}", e));
                }
            });
        })
    };

    let prev = {
        let view = view.clone();
        use_callback((), move |_: MouseEvent, _| view.step(-1))
    };

    let next = {
        let view = view.clone();
        use_callback((), move |_: MouseEvent, _| view.step(1))
    };

    let today = {
        let view = view.clone();
        use_callback((), move |_: MouseEvent, _| view.go_to(date_utils::today()))
    };

    let set_mode = {
        let view = view.clone();
        use_callback((), move |mode: ViewMode, _| view.set_mode(mode))
    };

    // Refetch whenever the visible range or the signed-in user changes
    use_effect_with((view.cursor(), view.mode(), app.auth.session().user_id()), {
        let refresh = refresh.clone();
        move |_| {
            refresh.emit(());
            || ()
        }
    });

    let state = CalendarState {
        cursor: view.cursor(),
        mode: view.mode(),
        title: view.title(),
        events: view.events(),
        load: view.load_state(),
        stats: view.stats(date_utils::today(), &Local),
    };

    let actions = UseCalendarActions {
        prev,
        next,
        today,
        set_mode,
        refresh,
    };

    UseCalendarResult { state, actions, view }
}
