//! Calendar panel: toolbar, the month or time grid, and the event editor.

mod month_view;
mod time_grid;
mod toolbar;

use std::collections::HashMap;
use std::rc::Rc;

use calendar_domain::layout;
use calendar_domain::{time, EventEditor, ViewMode};
use chrono::{DateTime, Local, NaiveDate, Utc};
use shared::{Event as CalendarEvent, DEFAULT_CATEGORY_COLOR};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use self::month_view::MonthView;
use self::time_grid::TimeGridView;
use self::toolbar::Toolbar;
use super::event_modal::EventModal;
use crate::hooks::use_app::{use_app, use_observed};
use crate::hooks::use_auth::use_directory;
use crate::hooks::use_calendar::use_calendar;
use crate::hooks::use_gesture::{use_gesture, GestureHandle};
use crate::hooks::use_toasts::use_toaster;
use crate::services::date_utils;

/// What an event chip needs to draw itself and react to the pointer
#[derive(Clone, PartialEq)]
pub struct EventInteractions {
    pub gesture: GestureHandle,
    pub user_id: Option<String>,
    /// Category colors by category id
    pub colors: Rc<HashMap<String, String>>,
    /// User names by user id
    pub owners: Rc<HashMap<String, String>>,
    pub on_event_click: Callback<CalendarEvent>,
}

impl EventInteractions {
    pub fn owns(&self, event: &CalendarEvent) -> bool {
        self.user_id.as_deref().is_some_and(|user_id| event.is_owned_by(user_id))
    }

    pub fn color_of(&self, event: &CalendarEvent) -> &str {
        event
            .category_id
            .as_ref()
            .and_then(|id| self.colors.get(id))
            .map(String::as_str)
            .unwrap_or(DEFAULT_CATEGORY_COLOR)
    }

    /// Owner's name for other people's events
    pub fn owner_name(&self, event: &CalendarEvent) -> Option<&str> {
        if self.owns(event) {
            return None;
        }
        self.owners.get(&event.user_id).map(String::as_str)
    }

    /// Opens the editor, unless the click just ended a drag
    pub fn click_handler(&self, event: &CalendarEvent) -> Callback<MouseEvent> {
        let gesture = self.gesture.clone();
        let on_event_click = self.on_event_click.clone();
        let event = event.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            if gesture.take_moved() {
                return;
            }
            on_event_click.emit(event.clone());
        })
    }
}

#[function_component(CalendarPanel)]
pub fn calendar_panel() -> Html {
    let app = use_app();
    let toaster = use_toaster();
    let calendar = use_calendar();
    let owners = use_directory();
    use_observed(&app.categories);

    let metrics = app.config.grid.clone();
    let gesture = use_gesture(metrics.clone());
    let editor = use_state(EventEditor::closed);
    let saving = use_state(|| false);

    let open_editor_at = {
        let editor = editor.clone();
        Callback::from(move |start: DateTime<Utc>| editor.set(EventEditor::open_for_slot(start, &Local)))
    };

    let on_new_event = {
        let editor = editor.clone();
        Callback::from(move |_: ()| editor.set(EventEditor::open_create(date_utils::now(), &Local)))
    };

    let on_event_click = {
        let editor = editor.clone();
        let auth = app.auth.clone();
        let toaster = toaster.clone();
        Callback::from(move |event: CalendarEvent| {
            let user_id = auth.session().user_id();
            match EventEditor::open_edit(&event, user_id.as_deref(), &Local) {
                Ok(opened) => editor.set(opened),
                Err(e) => toaster.error(e),
            }
        })
    };

    let on_date_click = {
        let open_editor_at = open_editor_at.clone();
        Callback::from(move |date: NaiveDate| open_editor_at.emit(time::at_local_minute(date, 0, &Local)))
    };

    let on_day_link = {
        let view = calendar.view.clone();
        Callback::from(move |date: NaiveDate| view.set_view(date, ViewMode::Day))
    };

    let on_editor_change = {
        let editor = editor.clone();
        Callback::from(move |next: EventEditor| editor.set(next))
    };

    let on_editor_close = {
        let editor = editor.clone();
        Callback::from(move |_: ()| editor.set(EventEditor::closed()))
    };

    let on_save = {
        let editor = editor.clone();
        let saving = saving.clone();
        let view = calendar.view.clone();
        let toaster = toaster.clone();
        Callback::from(move |_: ()| {
            let mut draft = (*editor).clone();
            let editor = editor.clone();
            let saving = saving.clone();
            let view = view.clone();
            let toaster = toaster.clone();
            let creating = !draft.is_editing();
            saving.set(true);
            spawn_local(async move {
                match draft.submit(&view, &Local).await {
                    Ok(saved) if creating => toaster.success(format!("Created \"{}\"", saved.title)),
                    Ok(saved) => toaster.success(format!("Saved \"{}\"", saved.title)),
                    Err(e) => toaster.error(e),
                }
                editor.set(draft);
                saving.set(false);
            });
        })
    };

    let on_delete = {
        let editor = editor.clone();
        let saving = saving.clone();
        let view = calendar.view.clone();
        Callback::from(move |_: ()| {
            let mut draft = (*editor).clone();
            let editor = editor.clone();
            let saving = saving.clone();
            let view = view.clone();
            let toaster = toaster.clone();
            saving.set(true);
            spawn_local(async move {
                match draft.delete(&view).await {
                    Ok(()) => toaster.success("Event deleted"),
                    Err(e) => toaster.error(e),
                }
                editor.set(draft);
                saving.set(false);
            });
        })
    };

    let colors: HashMap<String, String> = app
        .categories
        .items()
        .into_iter()
        .map(|category| (category.id, category.color))
        .collect();

    let interactions = EventInteractions {
        gesture,
        user_id: app.auth.session().user_id(),
        colors: Rc::new(colors),
        owners,
        on_event_click,
    };

    let today = date_utils::today();
    let categories = app.categories.clone();
    let shows = move |event: &CalendarEvent| categories.shows(event);

    let body = match calendar.state.mode {
        ViewMode::Month => html! {
            <MonthView
                grid={layout::month_grid(calendar.state.cursor, &calendar.state.events, &Local, shows)}
                today={today}
                interactions={interactions}
                on_date_click={on_date_click}
                on_day_link={on_day_link}
            />
        },
        ViewMode::Week | ViewMode::Day => html! {
            <TimeGridView
                grid={layout::time_grid(&calendar.view.range(), &calendar.state.events, &Local, &metrics, shows)}
                today={today}
                metrics={metrics.clone()}
                interactions={interactions}
                on_slot={open_editor_at}
            />
        },
    };

    html! {
        <section class="calendar-section">
            <Toolbar
                title={calendar.state.title.clone()}
                mode={calendar.state.mode}
                load={calendar.state.load.clone()}
                on_prev={calendar.actions.prev.clone()}
                on_next={calendar.actions.next.clone()}
                on_today={calendar.actions.today.clone()}
                on_mode={calendar.actions.set_mode.clone()}
                on_new_event={on_new_event}
            />
            {body}
            <EventModal
                editor={(*editor).clone()}
                categories={app.categories.items()}
                busy={*saving}
                on_change={on_editor_change}
                on_save={on_save}
                on_delete={on_delete}
                on_close={on_editor_close}
            />
        </section>
    }
}
