//! Modal form state for creating and editing events.
//!
//! The editor holds no server state. It validates, hands the values to
//! [`CalendarView::create_or_update`], and closes only when that succeeds,
//! so a failed save keeps what the user typed.

use chrono::{DateTime, Duration, TimeZone, Utc};
use shared::{Event, Priority};
use std::fmt::Display;
use thiserror::Error;
use tracing::debug;

use crate::api::EventApi;
use crate::calendar::{CalendarError, CalendarView, EventFormValues};
use crate::time;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EditorError {
    #[error("Please enter a title")]
    EmptyTitle,
    #[error("The end must not be before the start")]
    EndBeforeStart,
    #[error("Only saved events can be deleted")]
    NotSaved,
    #[error(transparent)]
    Calendar(#[from] CalendarError),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct EventEditor {
    pub open: bool,
    pub values: EventFormValues,
    /// Message from the last failed save or delete
    pub error: Option<String>,
}

impl EventEditor {
    pub fn closed() -> Self {
        Self::default()
    }

    /// Blank form starting at `now` (to the minute) and lasting an hour
    pub fn open_create<Tz>(now: DateTime<Utc>, tz: &Tz) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        Self::open_for_slot(time::truncate_to_minute(now), tz)
    }

    /// Blank form for a click on an empty grid slot
    pub fn open_for_slot<Tz>(start: DateTime<Utc>, tz: &Tz) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let end = start + Duration::hours(1);
        Self {
            open: true,
            values: EventFormValues {
                id: None,
                title: String::new(),
                start: time::format_local_input(start, tz),
                end: time::format_local_input(end, tz),
                priority: Priority::Medium,
                category_id: None,
            },
            error: None,
        }
    }

    /// Form pre-filled from `event`. Refused unless `user_id` owns it.
    pub fn open_edit<Tz>(event: &Event, user_id: Option<&str>, tz: &Tz) -> Result<Self, EditorError>
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let user_id = user_id.ok_or(CalendarError::NotSignedIn)?;
        if !event.is_owned_by(user_id) {
            return Err(CalendarError::NotOwner.into());
        }
        Ok(Self {
            open: true,
            values: EventFormValues {
                id: Some(event.id.clone()),
                title: event.title.clone(),
                start: time::format_local_input(event.start, tz),
                end: time::format_local_input(event.end, tz),
                priority: event.priority,
                category_id: event.category_id.clone(),
            },
            error: None,
        })
    }

    /// Edit mode shows the delete action
    pub fn is_editing(&self) -> bool {
        self.values.id.is_some()
    }

    pub fn close(&mut self) {
        *self = Self::closed();
    }

    pub fn validate<Tz: TimeZone>(&self, tz: &Tz) -> Result<(), EditorError> {
        if self.values.title.trim().is_empty() {
            return Err(EditorError::EmptyTitle);
        }
        let start = time::parse_local_input(&self.values.start, tz).map_err(CalendarError::from)?;
        let end = time::parse_local_input(&self.values.end, tz).map_err(CalendarError::from)?;
        if end < start {
            return Err(EditorError::EndBeforeStart);
        }
        Ok(())
    }

    pub async fn submit<A, Tz>(&mut self, calendar: &CalendarView<A>, tz: &Tz) -> Result<Event, EditorError>
    where
        A: EventApi + ?Sized,
        Tz: TimeZone,
    {
        let outcome = match self.validate(tz) {
            Ok(()) => calendar
                .create_or_update(&self.values, tz)
                .await
                .map_err(EditorError::from),
            Err(e) => Err(e),
        };
        match outcome {
            Ok(saved) => {
                self.close();
                Ok(saved)
            }
            Err(e) => {
                debug!("Editor stays open: {}", e);
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    pub async fn delete<A>(&mut self, calendar: &CalendarView<A>) -> Result<(), EditorError>
    where
        A: EventApi + ?Sized,
    {
        let outcome = match self.values.id.clone() {
            Some(id) => calendar.remove(&id).await.map_err(EditorError::from),
            None => Err(EditorError::NotSaved),
        };
        match outcome {
            Ok(()) => {
                self.close();
                Ok(())
            }
            Err(e) => {
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }
}
