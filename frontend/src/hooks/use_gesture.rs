//! Pointer-driven drag and resize of calendar events.
//!
//! A gesture starts on `mousedown` over an event and installs `mousemove`,
//! `mouseup` and `keydown` listeners on the document. They live exactly as
//! long as the gesture. Moves are previewed through
//! [`calendar_domain::CalendarView::preview`]; releasing the button commits,
//! `Escape` puts the event back.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use calendar_domain::layout::{self, ResizeEdge};
use calendar_domain::{Gesture, GridMetrics};
use chrono::{DateTime, Local, NaiveDate, Utc};
use gloo::events::EventListener;
use shared::Event;
use tracing::debug;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{KeyboardEvent, MouseEvent};
use yew::prelude::*;

use super::use_app::use_app;
use super::use_toasts::use_toaster;

/// Attribute carried by every element an event can be dropped on
pub const DROP_DATE_ATTR: &str = "data-drop-date";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureKind {
    /// Drag inside a time grid; the pointer stays `grab_offset_px` below the event's top
    Move { grab_offset_px: f64 },
    /// Drag between month cells, keeping the time of day
    MoveToDate,
    Resize(ResizeEdge),
}

#[derive(Debug, Clone, PartialEq)]
pub struct GestureStart {
    pub event: Event,
    pub kind: GestureKind,
    pub client_y: f64,
}

struct ActiveGesture {
    gesture: Gesture,
    kind: GestureKind,
    event: Event,
    origin_y: f64,
    _listeners: Vec<EventListener>,
}

type Slot = Rc<RefCell<Option<ActiveGesture>>>;

#[derive(Clone)]
pub struct GestureHandle {
    pub start: Callback<GestureStart>,
    /// Id of the event being dragged or resized
    pub active: Option<String>,
    moved: Rc<Cell<bool>>,
}

impl PartialEq for GestureHandle {
    fn eq(&self, other: &Self) -> bool {
        self.start == other.start && self.active == other.active && Rc::ptr_eq(&self.moved, &other.moved)
    }
}

impl GestureHandle {
    /// Whether the last gesture moved something. Resets the flag, so the
    /// click that ends a drag is swallowed exactly once.
    pub fn take_moved(&self) -> bool {
        self.moved.replace(false)
    }
}

/// Date and column-relative offset of the drop target under the pointer
fn drop_target(client_x: f64, client_y: f64) -> Option<(NaiveDate, f64)> {
    let element = gloo::utils::document().element_from_point(client_x as f32, client_y as f32)?;
    let target = element.closest(&format!("[{}]", DROP_DATE_ATTR)).ok()??;
    let date = target.get_attribute(DROP_DATE_ATTR)?;
    let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d").ok()?;
    let top = target.get_bounding_client_rect().top();
    Some((date, client_y - top))
}

/// New instants for the event under `active` at the pointer position
fn position_for(
    active: &ActiveGesture,
    e: &MouseEvent,
    metrics: &GridMetrics,
) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let client_x = f64::from(e.client_x());
    let client_y = f64::from(e.client_y());
    match active.kind {
        GestureKind::Move { grab_offset_px } => {
            let (date, y) = drop_target(client_x, client_y)?;
            Some(layout::drop_at(date, y - grab_offset_px, &active.event, &Local, metrics))
        }
        GestureKind::MoveToDate => {
            let (date, _) = drop_target(client_x, client_y)?;
            Some(layout::drop_on_date(date, &active.event, &Local))
        }
        GestureKind::Resize(edge) => {
            let delta = client_y - active.origin_y;
            Some(layout::resize(edge, &active.event, delta, metrics))
        }
    }
}

#[hook]
pub fn use_gesture(metrics: GridMetrics) -> GestureHandle {
    let app = use_app();
    let toaster = use_toaster();
    let slot: Slot = use_mut_ref(|| None);
    let active = use_state(|| Option::<String>::None);
    let moved = use_memo((), |_| Rc::new(Cell::new(false)));

    let start = {
        let calendar = app.calendar.clone();
        let slot = slot.clone();
        let active = active.clone();
        let moved = (*moved).clone();
        use_callback(metrics, move |start: GestureStart, metrics| {
            let metrics = metrics.clone();
            if slot.borrow().is_some() {
                return;
            }
            let gesture = match calendar.begin_gesture(&start.event.id) {
                Ok(gesture) => gesture,
                Err(e) => {
                    toaster.error(e);
                    return;
                }
            };
            debug!("Gesture {:?} on event {}", start.kind, gesture.event_id);
            moved.set(false);

            let document = gloo::utils::document();

            let on_move = {
                let calendar = calendar.clone();
                let slot = slot.clone();
                let moved = moved.clone();
                EventListener::new(&document, "mousemove", move |e| {
                    let Some(e) = e.dyn_ref::<MouseEvent>() else {
                        return;
                    };
                    e.prevent_default();
                    let next = match slot.borrow().as_ref() {
                        Some(current) => {
                            position_for(current, e, &metrics).map(|times| (current.gesture.clone(), times))
                        }
                        None => None,
                    };
                    if let Some((gesture, (start, end))) = next {
                        if start != gesture.original_start || end != gesture.original_end {
                            moved.set(true);
                        }
                        calendar.preview(&gesture, start, end);
                    }
                })
            };

            let on_up = {
                let calendar = calendar.clone();
                let slot = slot.clone();
                let active = active.clone();
                let toaster = toaster.clone();
                EventListener::new(&document, "mouseup", move |_| {
                    let Some(finished) = slot.borrow_mut().take() else {
                        return;
                    };
                    active.set(None);
                    let calendar = calendar.clone();
                    let toaster = toaster.clone();
                    // the listeners are dropped once this handler has returned
                    spawn_local(async move {
                        if let Err(e) = calendar.commit(&finished.gesture).await {
                            toaster.error(format!("Could not move event: {}", e));
                        }
                        drop(finished);
                    });
                })
            };

            let on_key = {
                let calendar = calendar.clone();
                let slot = slot.clone();
                let active = active.clone();
                let moved = moved.clone();
                EventListener::new(&document, "keydown", move |e| {
                    let Some(e) = e.dyn_ref::<KeyboardEvent>() else {
                        return;
                    };
                    if e.key() != "Escape" {
                        return;
                    }
                    let Some(cancelled) = slot.borrow_mut().take() else {
                        return;
                    };
                    calendar.cancel(&cancelled.gesture);
                    moved.set(false);
                    active.set(None);
                    spawn_local(async move { drop(cancelled) });
                })
            };

            active.set(Some(gesture.event_id.clone()));
            *slot.borrow_mut() = Some(ActiveGesture {
                gesture,
                kind: start.kind,
                event: start.event,
                origin_y: start.client_y,
                _listeners: vec![on_move, on_up, on_key],
            });
        })
    };

    GestureHandle {
        start,
        active: (*active).clone(),
        moved: (*moved).clone(),
    }
}
