use calendar_domain::layout::{self, PositionedEvent, ResizeEdge, TimeGrid};
use calendar_domain::{time, GridMetrics};
use chrono::{DateTime, Local, NaiveDate, Utc};
use wasm_bindgen::JsCast;
use web_sys::Element;
use yew::prelude::*;

use super::EventInteractions;
use crate::hooks::use_gesture::{GestureKind, GestureStart};
use crate::services::date_utils;

#[derive(Properties, PartialEq)]
pub struct TimeGridViewProps {
    pub grid: TimeGrid,
    pub today: NaiveDate,
    pub metrics: GridMetrics,
    pub interactions: EventInteractions,
    /// Click on an empty slot, snapped to the grid
    pub on_slot: Callback<DateTime<Utc>>,
}

fn element_of(e: &MouseEvent) -> Option<Element> {
    e.current_target().and_then(|target| target.dyn_into::<Element>().ok())
}

/// Week and day views: one column per day, hours down the side
#[function_component(TimeGridView)]
pub fn time_grid_view(props: &TimeGridViewProps) -> Html {
    let scroll_ref = use_node_ref();

    // Bring the current time into view when the grid first shows
    {
        let scroll_ref = scroll_ref.clone();
        let metrics = props.metrics.clone();
        use_effect_with((), move |_| {
            if let Some(body) = scroll_ref.cast::<Element>() {
                let viewport = f64::from(body.client_height());
                let offset = layout::scroll_offset(date_utils::now(), &Local, viewport, &metrics);
                body.set_scroll_top(offset as i32);
            }
            || ()
        });
    }

    let hour_style = format!("height: {}px", props.grid.hour_height_px);
    let day_height = props.metrics.day_height_px();
    let now_offset = layout::offset_of(time::minute_of_day(date_utils::now(), &Local), &props.metrics);

    html! {
        <div class="time-grid">
            <div class="time-grid-header">
                <div class="time-gutter"></div>
                {for props.grid.days.iter().map(|day| html! {
                    <div class={classes!(
                        "column-header",
                        layout::is_weekend(day.date).then_some("weekend"),
                        (day.date == props.today).then_some("today"),
                    )}>
                        {date_utils::format_day_header(day.date)}
                    </div>
                })}
            </div>
            <div class="time-grid-body" ref={scroll_ref}>
                <div class="time-grid-inner" style={format!("height: {}px", day_height)}>
                    <div class="hour-labels">
                        {for props.grid.hours().map(|hour| html! {
                            <div class="hour-label" style={hour_style.clone()}>{date_utils::hour_label(hour)}</div>
                        })}
                    </div>
                    {for props.grid.days.iter().map(|day| {
                        let date = day.date;
                        let on_column_click = {
                            let on_slot = props.on_slot.clone();
                            let metrics = props.metrics.clone();
                            Callback::from(move |e: MouseEvent| {
                                let Some(column) = element_of(&e) else {
                                    return;
                                };
                                let y = f64::from(e.client_y()) - column.get_bounding_client_rect().top();
                                on_slot.emit(layout::slot_at(date, y, &Local, &metrics));
                            })
                        };
                        let drop_date = date.format("%Y-%m-%d").to_string();
                        html! {
                            <div
                                key={drop_date.clone()}
                                class={classes!("day-column", layout::is_weekend(date).then_some("weekend"))}
                                data-drop-date={drop_date}
                                onclick={on_column_click}
                            >
                                {for props.grid.hours().map(|_| html! {
                                    <div class="hour-line" style={hour_style.clone()}></div>
                                })}
                                {if date == props.today {
                                    html! { <div class="now-line" style={format!("top: {}px", now_offset)}></div> }
                                } else { html! {} }}
                                {for day.events.iter().map(|positioned| timed_event(positioned, &props.interactions))}
                            </div>
                        }
                    })}
                </div>
            </div>
        </div>
    }
}

fn timed_event(positioned: &PositionedEvent, interactions: &EventInteractions) -> Html {
    let event = &positioned.event;
    let owned = interactions.owns(event);
    let dragging = interactions.gesture.active.as_deref() == Some(event.id.as_str());

    let begin = |kind_of: fn(&MouseEvent) -> Option<GestureKind>| {
        let start = interactions.gesture.start.clone();
        let event = event.clone();
        Callback::from(move |e: MouseEvent| {
            if !owned || e.button() != 0 {
                return;
            }
            e.stop_propagation();
            e.prevent_default();
            if let Some(kind) = kind_of(&e) {
                start.emit(GestureStart {
                    event: event.clone(),
                    kind,
                    client_y: f64::from(e.client_y()),
                });
            }
        })
    };

    let on_body_down = begin(|e| {
        let top = element_of(e)?.get_bounding_client_rect().top();
        Some(GestureKind::Move {
            grab_offset_px: f64::from(e.client_y()) - top,
        })
    });
    let on_top_handle_down = begin(|_| Some(GestureKind::Resize(ResizeEdge::Top)));
    let on_bottom_handle_down = begin(|_| Some(GestureKind::Resize(ResizeEdge::Bottom)));

    let style = format!(
        "top: {}px; height: {}px; left: {}%; width: {}%; border-left-color: {}",
        positioned.top_px,
        positioned.height_px,
        positioned.left_percent(),
        positioned.width_percent(),
        interactions.color_of(event),
    );

    html! {
        <div
            key={event.id.clone()}
            class={classes!(
                "timed-event",
                event.priority.css_class(),
                owned.then_some("owned"),
                dragging.then_some("dragging"),
                positioned.continues_before.then_some("continues-before"),
                positioned.continues_after.then_some("continues-after"),
            )}
            style={style}
            title={date_utils::event_tooltip(event, interactions.owner_name(event))}
            onmousedown={on_body_down}
            onclick={interactions.click_handler(event)}
        >
            {if owned && !positioned.continues_before {
                html! { <div class="resize-handle top" onmousedown={on_top_handle_down}></div> }
            } else { html! {} }}
            <div class="event-title">{&event.title}</div>
            <div class="event-time">{date_utils::format_event_times(event)}</div>
            {if owned && !positioned.continues_after {
                html! { <div class="resize-handle bottom" onmousedown={on_bottom_handle_down}></div> }
            } else { html! {} }}
        </div>
    }
}
