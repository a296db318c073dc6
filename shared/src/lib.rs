use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use chrono::{DateTime, Utc};

pub mod error;
pub mod graphql;
pub mod hal;
pub mod timestamp;

pub use error::ApiError;
pub use hal::{HalCollection, Link};

/// A registered account as returned by login/register
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    /// Display name shown in the header
    pub name: String,
    pub email: String,
    /// Opaque credential; only ever echoed back by the server
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl User {
    /// Copy of this user without the credential, suitable for persisting
    pub fn without_credential(&self) -> Self {
        Self {
            password: None,
            ..self.clone()
        }
    }
}

/// Priority of a calendar event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

    /// Wire value (`HIGH`, `MEDIUM`, `LOW`)
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "HIGH",
            Priority::Medium => "MEDIUM",
            Priority::Low => "LOW",
        }
    }

    /// Label used in the editor's priority select
    pub fn label(&self) -> &'static str {
        match self {
            Priority::High => "Important",
            Priority::Medium => "Standard",
            Priority::Low => "Optional",
        }
    }

    /// CSS class suffix for event chips
    pub fn css_class(&self) -> &'static str {
        match self {
            Priority::High => "event-high",
            Priority::Medium => "event-medium",
            Priority::Low => "event-low",
        }
    }

    /// Parse a wire or form value, case-insensitive
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "HIGH" => Some(Priority::High),
            "MEDIUM" => Some(Priority::Medium),
            "LOW" => Some(Priority::Low),
            _ => None,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A calendar event. Instants are always held in UTC.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub title: String,
    #[serde(with = "timestamp")]
    pub start: DateTime<Utc>,
    #[serde(with = "timestamp")]
    pub end: DateTime<Utc>,
    /// ID of the user who owns (and may mutate) this event
    pub user_id: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
}

impl Event {
    /// Length of the event in whole minutes (zero for inverted intervals)
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes().max(0)
    }

    /// Whether `[start, end)` of this event intersects the given range
    pub fn intersects(&self, range: &DateRange) -> bool {
        (self.start < range.end && self.end > range.start)
            || (self.start == self.end && range.contains(self.start))
    }

    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.user_id == user_id
    }
}

/// Variables for the `createEvent` mutation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEvent {
    pub title: String,
    #[serde(with = "timestamp")]
    pub start: DateTime<Utc>,
    #[serde(with = "timestamp")]
    pub end: DateTime<Utc>,
    pub user_id: String,
    pub priority: Priority,
    pub category_id: Option<String>,
}

impl NewEvent {
    /// Materialize this request as an event with the given identifier
    pub fn into_event(self, id: String) -> Event {
        Event {
            id,
            title: self.title,
            start: self.start,
            end: self.end,
            user_id: self.user_id,
            priority: self.priority,
            category_id: self.category_id,
        }
    }
}

/// Partial update for the `updateEvent` mutation; absent fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "timestamp::option")]
    pub start: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "timestamp::option")]
    pub end: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    /// `Some(None)` clears the category and is sent as `null`
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "present")]
    pub category_id: Option<Option<String>>,
}

/// Distinguish an explicit `null` from a missing field
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

impl EventPatch {
    /// Patch that only moves the event in time
    pub fn reschedule(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
            ..Self::default()
        }
    }

    /// Apply this patch to an event in place
    pub fn apply_to(&self, event: &mut Event) {
        if let Some(title) = &self.title {
            event.title = title.clone();
        }
        if let Some(start) = self.start {
            event.start = start;
        }
        if let Some(end) = self.end {
            event.end = end;
        }
        if let Some(priority) = self.priority {
            event.priority = priority;
        }
        if let Some(category_id) = &self.category_id {
            event.category_id = category_id.clone();
        }
    }
}

/// Half-open `[start, end)` window of instants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    #[serde(with = "timestamp")]
    pub start: DateTime<Utc>,
    #[serde(with = "timestamp")]
    pub end: DateTime<Utc>,
}

impl DateRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start && instant < self.end
    }
}

/// A checklist item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub user_id: String,
    #[serde(default)]
    pub completed: bool,
    /// Hypermedia links (`self`, `toggle`, `user-todos`) supplied by the server
    #[serde(rename = "_links", default, skip_serializing_if = "BTreeMap::is_empty")]
    pub links: BTreeMap<String, Link>,
}

impl Todo {
    /// Server-supplied URL for toggling this to-do, if any
    pub fn toggle_link(&self) -> Option<&str> {
        self.links.get("toggle").map(|link| link.href.as_str())
    }
}

/// Request body for `POST /todos`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTodo {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub user_id: String,
    pub completed: bool,
}

impl NewTodo {
    pub fn new(title: impl Into<String>, description: Option<String>, user_id: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description,
            user_id: user_id.into(),
            completed: false,
        }
    }
}

/// Default color for categories without a valid color
pub const DEFAULT_CATEGORY_COLOR: &str = "#3788d8";

/// A user-defined event category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(deserialize_with = "hal::string_or_number")]
    pub id: String,
    pub name: String,
    #[serde(default = "default_category_color")]
    pub color: String,
    #[serde(deserialize_with = "hal::string_or_number")]
    pub user_id: String,
}

fn default_category_color() -> String {
    DEFAULT_CATEGORY_COLOR.to_string()
}

/// Request body for creating or replacing a category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCategory {
    pub name: String,
    pub color: String,
    pub user_id: String,
}

/// Check whether a string is a `#rrggbb` color
pub fn is_hex_color(value: &str) -> bool {
    value.len() == 7
        && value.starts_with('#')
        && value[1..].chars().all(|c| c.is_ascii_hexdigit())
}

/// Request body for `POST /users/login`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request body for `POST /users/register`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Request body for `PUT /users/{id}` (full replacement)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserUpdate {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}
