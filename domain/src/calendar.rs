//! # Calendar View Model
//!
//! Owns the navigation cursor (date and view mode) and the event set for
//! the visible range. Every successful mutation is followed by a reload
//! that replaces the set wholesale; there is no incremental merging.
//!
//! ## Gestures
//!
//! Drag and resize are split into [`CalendarView::begin_gesture`],
//! [`CalendarView::preview`] and [`CalendarView::commit`]. The gesture
//! captures the event's instants before the first preview, and a failed
//! commit restores exactly those instants without asking the server.
//!
//! ## Ownership
//!
//! Editing, deleting, moving and resizing are refused with
//! [`CalendarError::NotOwner`] for events owned by another user. No API
//! call is made in that case. The server must still enforce this.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use shared::{ApiError, DateRange, Event, EventPatch, NewEvent, Priority};
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::api::EventApi;
use crate::observe::{Listeners, Observable, Subscription};
use crate::session::Session;
use crate::time::{self, TimeInputError, ViewMode};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalendarError {
    #[error("Please sign in first")]
    NotSignedIn,
    #[error("You can only change your own events")]
    NotOwner,
    #[error("Event {0} is not in the current view")]
    UnknownEvent(String),
    #[error(transparent)]
    InvalidInput(#[from] TimeInputError),
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Fetch cycle state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Unauthenticated,
    Loading,
    Ready,
    /// The last fetch failed; the previous event set is still shown
    Error(String),
}

/// Raw editor fields. `start` and `end` are local `datetime-local` values.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EventFormValues {
    pub id: Option<String>,
    pub title: String,
    pub start: String,
    pub end: String,
    pub priority: Priority,
    pub category_id: Option<String>,
}

/// A drag or resize in progress
#[derive(Debug, Clone, PartialEq)]
pub struct Gesture {
    pub event_id: String,
    pub original_start: DateTime<Utc>,
    pub original_end: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EventStats {
    pub today: usize,
    pub this_week: usize,
    pub total: usize,
}

struct CalendarState {
    cursor: NaiveDate,
    mode: ViewMode,
    events: Vec<Event>,
    load: LoadState,
}

type RangeFn = dyn Fn(NaiveDate, ViewMode) -> DateRange;

pub struct CalendarView<A: ?Sized> {
    api: Rc<A>,
    session: Session,
    state: Rc<RefCell<CalendarState>>,
    listeners: Listeners,
    /// Visible range in the viewer's time zone
    range_of: Rc<RangeFn>,
}

impl<A: ?Sized> Clone for CalendarView<A> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            session: self.session.clone(),
            state: self.state.clone(),
            listeners: self.listeners.clone(),
            range_of: self.range_of.clone(),
        }
    }
}

impl<A: ?Sized> PartialEq for CalendarView<A> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.state, &other.state)
    }
}

impl<A: ?Sized> Observable for CalendarView<A> {
    fn subscribe(&self, callback: impl Fn() + 'static) -> Subscription {
        self.listeners.subscribe(callback)
    }
}

impl<A: ?Sized> fmt::Debug for CalendarView<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("CalendarView")
            .field("cursor", &state.cursor)
            .field("mode", &state.mode)
            .field("events", &state.events.len())
            .field("load", &state.load)
            .finish()
    }
}

impl<A: EventApi + ?Sized> CalendarView<A> {
    pub fn new(api: Rc<A>, session: Session, today: NaiveDate) -> Self {
        Self {
            api,
            session,
            state: Rc::new(RefCell::new(CalendarState {
                cursor: today,
                mode: ViewMode::default(),
                events: Vec::new(),
                load: LoadState::Unauthenticated,
            })),
            listeners: Listeners::default(),
            range_of: Rc::new(time::visible_range),
        }
    }

    /// Fetch week and day ranges between local midnights of `tz`
    pub fn in_time_zone<Tz>(mut self, tz: Tz) -> Self
    where
        Tz: TimeZone + 'static,
    {
        self.range_of = Rc::new(move |cursor, mode| time::visible_range_in(cursor, mode, &tz));
        self
    }

    pub fn cursor(&self) -> NaiveDate {
        self.state.borrow().cursor
    }

    pub fn mode(&self) -> ViewMode {
        self.state.borrow().mode
    }

    pub fn events(&self) -> Vec<Event> {
        self.state.borrow().events.clone()
    }

    pub fn load_state(&self) -> LoadState {
        self.state.borrow().load.clone()
    }

    pub fn event(&self, id: &str) -> Option<Event> {
        self.state.borrow().events.iter().find(|e| e.id == id).cloned()
    }

    /// Instant range of the current cursor and mode
    pub fn range(&self) -> DateRange {
        let state = self.state.borrow();
        (self.range_of)(state.cursor, state.mode)
    }

    pub fn title(&self) -> String {
        let state = self.state.borrow();
        time::title_for(state.cursor, state.mode)
    }

    // Navigation only moves the cursor. Callers decide when to reload.

    pub fn set_view(&self, date: NaiveDate, mode: ViewMode) {
        {
            let mut state = self.state.borrow_mut();
            state.cursor = date;
            state.mode = mode;
        }
        self.listeners.notify();
    }

    pub fn set_mode(&self, mode: ViewMode) {
        self.set_view(self.cursor(), mode);
    }

    pub fn go_to(&self, date: NaiveDate) {
        self.set_view(date, self.mode());
    }

    /// Move by one month, week or day; `delta` is usually `1` or `-1`
    pub fn step(&self, delta: i32) {
        let (cursor, mode) = {
            let state = self.state.borrow();
            (state.cursor, state.mode)
        };
        self.set_view(time::step(cursor, mode, delta), mode);
    }

    /// Fetch the visible range and replace the event set.
    ///
    /// Without a session nothing is fetched, the set is emptied and the
    /// state becomes `Unauthenticated`. On failure the previous set stays in place.
    pub async fn reload(&self) -> Result<(), CalendarError> {
        if !self.session.is_authenticated() {
            {
                let mut state = self.state.borrow_mut();
                state.events.clear();
                state.load = LoadState::Unauthenticated;
            }
            self.listeners.notify();
            return Ok(());
        }

        let range = self.range();
        self.set_load(LoadState::Loading);
        debug!("Loading events from {} to {}", range.start, range.end);

        match self.api.events_in_range(&range).await {
            Ok(events) => {
                info!("Loaded {} events", events.len());
                {
                    let mut state = self.state.borrow_mut();
                    state.events = events;
                    state.load = LoadState::Ready;
                }
                self.listeners.notify();
                Ok(())
            }
            Err(e) => {
                error!("Failed to load events: {}", e);
                self.set_load(LoadState::Error(e.to_string()));
                Err(e.into())
            }
        }
    }

    /// Whether the signed-in user may change `event`
    pub fn can_edit(&self, event: &Event) -> bool {
        self.session
            .user_id()
            .map(|user_id| event.is_owned_by(&user_id))
            .unwrap_or(false)
    }

    /// Create an event, or update it when `values.id` is set.
    /// `tz` is the zone the form's local times are in.
    pub async fn create_or_update<Tz: TimeZone>(
        &self,
        values: &EventFormValues,
        tz: &Tz,
    ) -> Result<Event, CalendarError> {
        let user_id = self.session.user_id().ok_or(CalendarError::NotSignedIn)?;
        let start = time::parse_local_input(&values.start, tz)?;
        let end = time::parse_local_input(&values.end, tz)?;
        let title = values.title.trim().to_string();

        let saved = match &values.id {
            Some(id) => {
                self.owned_event(id)?;
                let patch = EventPatch {
                    title: Some(title),
                    start: Some(start),
                    end: Some(end),
                    priority: Some(values.priority),
                    category_id: Some(values.category_id.clone()),
                };
                let updated = self.api.update_event(id, &patch).await.map_err(|e| {
                    error!("Failed to update event {}: {}", id, e);
                    e
                })?;
                info!("Updated event {}", updated.id);
                updated
            }
            None => {
                let new_event = NewEvent {
                    title,
                    start,
                    end,
                    user_id,
                    priority: values.priority,
                    category_id: values.category_id.clone(),
                };
                let created = self.api.create_event(&new_event).await.map_err(|e| {
                    error!("Failed to create event: {}", e);
                    e
                })?;
                info!("Created event {}", created.id);
                created
            }
        };

        self.refresh().await;
        Ok(saved)
    }

    /// Delete an owned event
    pub async fn remove(&self, id: &str) -> Result<(), CalendarError> {
        self.owned_event(id)?;
        let deleted = self.api.delete_event(id).await.map_err(|e| {
            error!("Failed to delete event {}: {}", id, e);
            e
        })?;
        if !deleted {
            warn!("Server reported nothing deleted for event {}", id);
            self.refresh().await;
            return Err(ApiError::NotFound(format!("Event {} was not found", id)).into());
        }
        info!("Deleted event {}", id);
        self.refresh().await;
        Ok(())
    }

    /// Start a drag or resize of an owned event
    pub fn begin_gesture(&self, id: &str) -> Result<Gesture, CalendarError> {
        let event = self.owned_event(id)?;
        Ok(Gesture {
            event_id: event.id,
            original_start: event.start,
            original_end: event.end,
        })
    }

    /// Show a tentative position while the pointer moves
    pub fn preview(&self, gesture: &Gesture, start: DateTime<Utc>, end: DateTime<Utc>) {
        if self.set_local_times(&gesture.event_id, start, end) {
            self.listeners.notify();
        }
    }

    /// Put the event back where the gesture found it
    pub fn cancel(&self, gesture: &Gesture) {
        self.preview(gesture, gesture.original_start, gesture.original_end);
    }

    /// Persist the previewed position. Only start and end are sent.
    /// On failure the pre-gesture instants are restored locally.
    pub async fn commit(&self, gesture: &Gesture) -> Result<(), CalendarError> {
        let current = self
            .event(&gesture.event_id)
            .ok_or_else(|| CalendarError::UnknownEvent(gesture.event_id.clone()))?;
        if current.start == gesture.original_start && current.end == gesture.original_end {
            return Ok(());
        }

        let patch = EventPatch::reschedule(current.start, current.end);
        match self.api.update_event(&gesture.event_id, &patch).await {
            Ok(_) => {
                info!(
                    "Rescheduled event {} to {} - {}",
                    gesture.event_id, current.start, current.end
                );
                self.refresh().await;
                Ok(())
            }
            Err(e) => {
                error!("Failed to reschedule event {}: {}", gesture.event_id, e);
                self.cancel(gesture);
                Err(e.into())
            }
        }
    }

    /// Move or resize in one step
    pub async fn reschedule(
        &self,
        id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<(), CalendarError> {
        let gesture = self.begin_gesture(id)?;
        self.preview(&gesture, start, end);
        self.commit(&gesture).await
    }

    /// Counts for the header: events today, this week (Sunday start) and loaded in total
    pub fn stats<Tz: TimeZone>(&self, today: NaiveDate, tz: &Tz) -> EventStats {
        let day = DateRange::new(
            time::at_local_minute(today, 0, tz),
            time::at_local_minute(today + Duration::days(1), 0, tz),
        );
        let week_start = time::start_of_week(today);
        let week = DateRange::new(
            time::at_local_minute(week_start, 0, tz),
            time::at_local_minute(week_start + Duration::days(7), 0, tz),
        );

        let state = self.state.borrow();
        EventStats {
            today: state.events.iter().filter(|e| e.intersects(&day)).count(),
            this_week: state.events.iter().filter(|e| e.intersects(&week)).count(),
            total: state.events.len(),
        }
    }

    /// Loaded event `id`, if the signed-in user owns it
    fn owned_event(&self, id: &str) -> Result<Event, CalendarError> {
        let user_id = self.session.user_id().ok_or(CalendarError::NotSignedIn)?;
        let event = self
            .event(id)
            .ok_or_else(|| CalendarError::UnknownEvent(id.to_string()))?;
        if !event.is_owned_by(&user_id) {
            warn!("User {} may not change event {} owned by {}", user_id, id, event.user_id);
            return Err(CalendarError::NotOwner);
        }
        Ok(event)
    }

    fn set_local_times(&self, id: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        let mut state = self.state.borrow_mut();
        match state.events.iter_mut().find(|e| e.id == id) {
            Some(event) => {
                event.start = start;
                event.end = end;
                true
            }
            None => false,
        }
    }

    fn set_load(&self, load: LoadState) {
        self.state.borrow_mut().load = load;
        self.listeners.notify();
    }

    /// Reload after a successful mutation; a failure here only shows in the load state
    async fn refresh(&self) {
        if let Err(e) = self.reload().await {
            warn!("Reload after change failed: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{event, server_error, signed_in, signed_out, utc, MockBackend};
    use chrono::FixedOffset;
    use std::cell::Cell;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn view(api: &Rc<MockBackend>, user: &str) -> CalendarView<MockBackend> {
        let view = CalendarView::new(api.clone(), signed_in(user), date(2024, 1, 2));
        view.set_mode(ViewMode::Day);
        view
    }

    fn standup_values() -> EventFormValues {
        EventFormValues {
            title: "Standup".to_string(),
            start: "2024-01-02T11:00".to_string(),
            end: "2024-01-02T11:30".to_string(),
            ..EventFormValues::default()
        }
    }

    #[tokio::test]
    async fn test_reload_without_session_makes_no_call() {
        let api = MockBackend::new();
        let view = CalendarView::new(api.clone(), signed_out(), date(2024, 1, 2));
        view.reload().await.unwrap();
        assert_eq!(view.load_state(), LoadState::Unauthenticated);
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_reload_after_sign_out_forgets_events() {
        let api = MockBackend::new();
        api.events
            .borrow_mut()
            .push(event("standup", "user-a", utc(2024, 1, 2, 9, 0), utc(2024, 1, 2, 9, 30)));
        let session = signed_in("user-a");
        let view = CalendarView::new(api.clone(), session.clone(), date(2024, 1, 2));
        view.set_mode(ViewMode::Day);
        view.reload().await.unwrap();
        assert_eq!(view.events().len(), 1);

        session.clear();
        view.reload().await.unwrap();
        assert_eq!(view.load_state(), LoadState::Unauthenticated);
        assert!(view.events().is_empty());
        assert_eq!(view.stats(date(2024, 1, 2), &Utc).total, 0);
    }

    #[tokio::test]
    async fn test_evening_event_west_of_utc_stays_in_day_view() {
        let api = MockBackend::new();
        let tz = FixedOffset::west_opt(5 * 3600).unwrap();
        let view =
            CalendarView::new(api.clone(), signed_in("user-a"), date(2024, 1, 2)).in_time_zone(tz);
        view.set_mode(ViewMode::Day);

        let values = EventFormValues {
            title: "Dinner".to_string(),
            start: "2024-01-02T20:00".to_string(),
            end: "2024-01-02T21:00".to_string(),
            ..EventFormValues::default()
        };
        let created = view.create_or_update(&values, &tz).await.unwrap();
        assert_eq!(created.start, utc(2024, 1, 3, 1, 0));
        assert_eq!(view.range(), DateRange::new(utc(2024, 1, 2, 5, 0), utc(2024, 1, 3, 5, 0)));
        assert_eq!(view.events().len(), 1);

        let grid = crate::layout::time_grid(
            &view.range(),
            &view.events(),
            &tz,
            &crate::layout::GridMetrics::default(),
            |_| true,
        );
        assert_eq!(grid.days.len(), 1);
        assert_eq!(grid.days[0].date, date(2024, 1, 2));
        assert_eq!(grid.days[0].events.len(), 1);
    }

    #[tokio::test]
    async fn test_create_then_range_then_delete() {
        let api = MockBackend::new();
        let view = view(&api, "user-a");
        let tz = FixedOffset::east_opt(2 * 3600).unwrap();

        let created = view.create_or_update(&standup_values(), &tz).await.unwrap();
        assert_eq!(created.start, utc(2024, 1, 2, 9, 0));
        assert_eq!(created.end, utc(2024, 1, 2, 9, 30));
        assert_eq!(created.user_id, "user-a");
        assert_eq!(created.priority, Priority::Medium);

        // the reload after create put it in the view
        assert_eq!(view.load_state(), LoadState::Ready);
        let loaded = view.events();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].title, "Standup");

        view.remove(&created.id).await.unwrap();
        assert!(view.events().is_empty());
        assert_eq!(api.count("delete_event"), 1);
    }

    #[tokio::test]
    async fn test_range_excludes_other_days() {
        let api = MockBackend::new();
        api.events.borrow_mut().extend([
            event("today", "user-a", utc(2024, 1, 2, 9, 0), utc(2024, 1, 2, 10, 0)),
            event("tomorrow", "user-a", utc(2024, 1, 3, 9, 0), utc(2024, 1, 3, 10, 0)),
        ]);
        let view = view(&api, "user-a");
        view.reload().await.unwrap();
        let ids: Vec<String> = view.events().into_iter().map(|e| e.id).collect();
        assert_eq!(ids, vec!["today".to_string()]);

        view.step(1);
        view.reload().await.unwrap();
        assert_eq!(view.events()[0].id, "tomorrow");
    }

    #[tokio::test]
    async fn test_failed_reload_keeps_previous_events() {
        let api = MockBackend::new();
        api.events
            .borrow_mut()
            .push(event("standup", "user-a", utc(2024, 1, 2, 9, 0), utc(2024, 1, 2, 9, 30)));
        let view = view(&api, "user-a");
        view.reload().await.unwrap();

        api.fail("events_in_range", server_error());
        assert!(view.reload().await.is_err());
        assert_eq!(view.events().len(), 1);
        assert!(matches!(view.load_state(), LoadState::Error(_)));

        api.clear_failures();
        view.reload().await.unwrap();
        assert_eq!(view.load_state(), LoadState::Ready);
    }

    #[tokio::test]
    async fn test_ownership_gate_blocks_without_call() {
        let api = MockBackend::new();
        api.events
            .borrow_mut()
            .push(event("theirs", "user-b", utc(2024, 1, 2, 9, 0), utc(2024, 1, 2, 9, 30)));
        let view = view(&api, "user-a");
        view.reload().await.unwrap();
        api.reset_calls();

        let theirs = view.event("theirs").unwrap();
        assert!(!view.can_edit(&theirs));

        let values = EventFormValues {
            id: Some("theirs".to_string()),
            ..standup_values()
        };
        assert_eq!(view.create_or_update(&values, &Utc).await, Err(CalendarError::NotOwner));
        assert_eq!(view.remove("theirs").await, Err(CalendarError::NotOwner));
        assert_eq!(view.begin_gesture("theirs"), Err(CalendarError::NotOwner));
        assert_eq!(
            view.reschedule("theirs", utc(2024, 1, 2, 10, 0), utc(2024, 1, 2, 10, 30)).await,
            Err(CalendarError::NotOwner)
        );
        assert!(api.calls().is_empty());
        assert_eq!(view.event("theirs").unwrap().start, utc(2024, 1, 2, 9, 0));
    }

    #[tokio::test]
    async fn test_failed_resize_reverts_to_pre_gesture_times() {
        let api = MockBackend::new();
        api.events
            .borrow_mut()
            .push(event("standup", "user-a", utc(2024, 1, 2, 9, 0), utc(2024, 1, 2, 9, 30)));
        let view = view(&api, "user-a");
        view.reload().await.unwrap();
        api.fail("update_event", server_error());
        api.reset_calls();

        let gesture = view.begin_gesture("standup").unwrap();
        view.preview(&gesture, utc(2024, 1, 2, 9, 0), utc(2024, 1, 2, 9, 45));
        view.preview(&gesture, utc(2024, 1, 2, 9, 0), utc(2024, 1, 2, 10, 15));
        assert_eq!(view.event("standup").unwrap().end, utc(2024, 1, 2, 10, 15));

        let result = view.commit(&gesture).await;
        assert_eq!(result, Err(CalendarError::Api(server_error())));

        let reverted = view.event("standup").unwrap();
        assert_eq!(reverted.start, utc(2024, 1, 2, 9, 0));
        assert_eq!(reverted.end, utc(2024, 1, 2, 9, 30));
        // reverted from the captured value, not re-fetched
        assert_eq!(api.calls(), vec!["update_event".to_string()]);
    }

    #[tokio::test]
    async fn test_reschedule_sends_only_times_and_keeps_owner_and_priority() {
        let api = MockBackend::new();
        let mut standup = event("standup", "user-a", utc(2024, 1, 2, 9, 0), utc(2024, 1, 2, 9, 30));
        standup.priority = Priority::High;
        api.events.borrow_mut().push(standup);
        let view = view(&api, "user-a");
        view.reload().await.unwrap();

        view.reschedule("standup", utc(2024, 1, 2, 13, 0), utc(2024, 1, 2, 13, 30))
            .await
            .unwrap();

        let moved = view.event("standup").unwrap();
        assert_eq!(moved.start, utc(2024, 1, 2, 13, 0));
        assert_eq!(moved.user_id, "user-a");
        assert_eq!(moved.priority, Priority::High);
    }

    #[tokio::test]
    async fn test_update_keeps_owner() {
        let api = MockBackend::new();
        api.events
            .borrow_mut()
            .push(event("standup", "user-a", utc(2024, 1, 2, 9, 0), utc(2024, 1, 2, 9, 30)));
        let view = view(&api, "user-a");
        view.reload().await.unwrap();

        let values = EventFormValues {
            id: Some("standup".to_string()),
            title: "Daily standup".to_string(),
            start: "2024-01-02T09:00".to_string(),
            end: "2024-01-02T09:15".to_string(),
            priority: Priority::Low,
            category_id: None,
        };
        let updated = view.create_or_update(&values, &Utc).await.unwrap();
        assert_eq!(updated.title, "Daily standup");
        assert_eq!(updated.user_id, "user-a");
        assert_eq!(updated.priority, Priority::Low);
        assert_eq!(updated.duration_minutes(), 15);
    }

    #[tokio::test]
    async fn test_edit_without_category_clears_it() {
        let api = MockBackend::new();
        let mut standup = event("standup", "user-a", utc(2024, 1, 2, 9, 0), utc(2024, 1, 2, 9, 30));
        standup.category_id = Some("work".to_string());
        api.events.borrow_mut().push(standup);
        let view = view(&api, "user-a");
        view.reload().await.unwrap();

        let values = EventFormValues {
            id: Some("standup".to_string()),
            start: "2024-01-02T09:00".to_string(),
            end: "2024-01-02T09:30".to_string(),
            category_id: None,
            ..standup_values()
        };
        let updated = view.create_or_update(&values, &Utc).await.unwrap();
        assert_eq!(updated.category_id, None);
        assert_eq!(view.event("standup").unwrap().category_id, None);
    }

    #[tokio::test]
    async fn test_failed_create_leaves_events_untouched() {
        let api = MockBackend::new();
        api.fail("create_event", server_error());
        let view = view(&api, "user-a");

        let result = view.create_or_update(&standup_values(), &Utc).await;
        assert_eq!(result, Err(CalendarError::Api(server_error())));
        assert!(view.events().is_empty());
        assert_eq!(api.count("events_in_range"), 0);
    }

    #[tokio::test]
    async fn test_malformed_time_makes_no_call() {
        let api = MockBackend::new();
        let view = view(&api, "user-a");
        let values = EventFormValues {
            start: "soon".to_string(),
            ..standup_values()
        };
        assert!(matches!(
            view.create_or_update(&values, &Utc).await,
            Err(CalendarError::InvalidInput(_))
        ));
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_navigation_does_not_fetch() {
        let api = MockBackend::new();
        let view = view(&api, "user-a");
        let notified = Rc::new(Cell::new(0));
        let counter = notified.clone();
        let _subscription = view.subscribe(move || counter.set(counter.get() + 1));

        view.set_mode(ViewMode::Month);
        view.step(-1);
        view.go_to(date(2024, 3, 5));
        assert_eq!(view.cursor(), date(2024, 3, 5));
        assert_eq!(view.range().start, utc(2024, 3, 1, 0, 0));
        assert_eq!(view.title(), "March 2024");
        assert_eq!(notified.get(), 3);
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_stats() {
        let api = MockBackend::new();
        api.events.borrow_mut().extend([
            event("a", "user-a", utc(2024, 1, 2, 9, 0), utc(2024, 1, 2, 10, 0)),
            event("b", "user-a", utc(2024, 1, 4, 9, 0), utc(2024, 1, 4, 10, 0)),
            event("c", "user-b", utc(2024, 1, 20, 9, 0), utc(2024, 1, 20, 10, 0)),
        ]);
        let view = view(&api, "user-a");
        view.set_mode(ViewMode::Month);
        view.reload().await.unwrap();

        let stats = view.stats(date(2024, 1, 2), &Utc);
        assert_eq!(stats, EventStats { today: 1, this_week: 2, total: 3 });
    }
}
