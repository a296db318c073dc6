use calendar_domain::layout::{CellKind, MonthGrid, WEEKDAY_LABELS};
use calendar_domain::time;
use chrono::{Datelike, Local, NaiveDate};
use shared::Event as CalendarEvent;
use yew::prelude::*;

use super::EventInteractions;
use crate::hooks::use_gesture::{GestureKind, GestureStart};
use crate::services::date_utils;

/// Chips shown per cell before collapsing into "+n more"
const MAX_CHIPS_PER_CELL: usize = 3;

#[derive(Properties, PartialEq)]
pub struct MonthViewProps {
    pub grid: MonthGrid,
    pub today: NaiveDate,
    pub interactions: EventInteractions,
    /// Click on a cell's empty area
    pub on_date_click: Callback<NaiveDate>,
    /// Click on a cell's day number
    pub on_day_link: Callback<NaiveDate>,
}

#[function_component(MonthView)]
pub fn month_view(props: &MonthViewProps) -> Html {
    html! {
        <div class="month-view">
            <div class="weekday-header">
                {for WEEKDAY_LABELS.iter().map(|label| html! { <div class="weekday">{*label}</div> })}
            </div>
            <div class="calendar-grid">
                {for props.grid.weeks.iter().flatten().map(|cell| {
                    let date = cell.date;
                    let class = classes!(
                        "calendar-day",
                        (cell.kind != CellKind::MonthDay).then_some("empty"),
                        (date == props.today).then_some("today"),
                    );
                    let on_cell_click = {
                        let on_date_click = props.on_date_click.clone();
                        Callback::from(move |_: MouseEvent| on_date_click.emit(date))
                    };
                    let on_number_click = {
                        let on_day_link = props.on_day_link.clone();
                        Callback::from(move |e: MouseEvent| {
                            e.stop_propagation();
                            on_day_link.emit(date);
                        })
                    };
                    let hidden = cell.events.len().saturating_sub(MAX_CHIPS_PER_CELL);
                    let drop_date = date.format("%Y-%m-%d").to_string();

                    html! {
                        <div key={drop_date.clone()} class={class} data-drop-date={drop_date} onclick={on_cell_click}>
                            <div class="day-header">
                                <button type="button" class="day-number" onclick={on_number_click}>{date.day()}</button>
                            </div>
                            <div class="day-events">
                                {for cell.events.iter().take(MAX_CHIPS_PER_CELL).map(|event| {
                                    month_chip(event, &props.interactions)
                                })}
                                {if hidden > 0 {
                                    html! { <div class="more-events">{format!("+{} more", hidden)}</div> }
                                } else { html! {} }}
                            </div>
                        </div>
                    }
                })}
            </div>
        </div>
    }
}

fn month_chip(event: &CalendarEvent, interactions: &EventInteractions) -> Html {
    let owned = interactions.owns(event);
    let dragging = interactions.gesture.active.as_deref() == Some(event.id.as_str());

    let on_mouse_down = {
        let start = interactions.gesture.start.clone();
        let event = event.clone();
        Callback::from(move |e: MouseEvent| {
            if !owned || e.button() != 0 {
                return;
            }
            e.prevent_default();
            start.emit(GestureStart {
                event: event.clone(),
                kind: GestureKind::MoveToDate,
                client_y: f64::from(e.client_y()),
            });
        })
    };

    html! {
        <div
            key={event.id.clone()}
            class={classes!(
                "event-chip",
                event.priority.css_class(),
                owned.then_some("owned"),
                dragging.then_some("dragging"),
            )}
            style={format!("border-left-color: {}", interactions.color_of(event))}
            title={date_utils::event_tooltip(event, interactions.owner_name(event))}
            onmousedown={on_mouse_down}
            onclick={interactions.click_handler(event)}
        >
            <span class="event-time">{time::format_time(event.start, &Local)}</span>
            <span class="event-title">{&event.title}</span>
        </div>
    }
}
