//! GraphQL documents and envelope types for the event service.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

use crate::{ApiError, DateRange, Event, EventPatch};

pub const EVENTS_BY_DATE_RANGE: &str = "query EventsByDateRange($start: DateTime!, $end: DateTime!) {
  eventsByDateRange(start: $start, end: $end) { id title start end userId priority categoryId }
}";

pub const EVENT_BY_ID: &str = "query GetEvent($id: ID!) {
  event(id: $id) { id title start end userId priority categoryId }
}";

pub const CREATE_EVENT: &str = "mutation CreateEvent($title: String!, $start: DateTime!, $end: DateTime!, $userId: String!, $priority: Priority!, $categoryId: String) {
  createEvent(title: $title, start: $start, end: $end, userId: $userId, priority: $priority, categoryId: $categoryId) { id title start end userId priority categoryId }
}";

pub const UPDATE_EVENT: &str = "mutation UpdateEvent($id: ID!, $title: String, $start: DateTime, $end: DateTime, $priority: Priority, $categoryId: String) {
  updateEvent(id: $id, title: $title, start: $start, end: $end, priority: $priority, categoryId: $categoryId) { id title start end userId priority categoryId }
}";

pub const DELETE_EVENT: &str = "mutation DeleteEvent($id: ID!) {
  deleteEvent(id: $id)
}";

/// Request body POSTed to the GraphQL endpoint
#[derive(Debug, Clone, Serialize)]
pub struct GraphQlRequest<V> {
    pub query: &'static str,
    pub variables: V,
}

impl<V: Serialize> GraphQlRequest<V> {
    pub fn new(query: &'static str, variables: V) -> Self {
        Self { query, variables }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct IdVariables<'a> {
    pub id: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateEventVariables<'a> {
    pub id: &'a str,
    #[serde(flatten)]
    pub patch: &'a EventPatch,
}

pub fn events_by_date_range(range: &DateRange) -> GraphQlRequest<DateRange> {
    GraphQlRequest::new(EVENTS_BY_DATE_RANGE, *range)
}

/// One entry of the response `errors` list
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GraphQlError {
    pub message: String,
    #[serde(default)]
    pub extensions: Option<Value>,
}

impl GraphQlError {
    fn is_not_found(&self) -> bool {
        self.extensions
            .as_ref()
            .and_then(|ext| ext.get("classification"))
            .and_then(Value::as_str)
            .map(|classification| classification == "NOT_FOUND")
            .unwrap_or(false)
    }
}

/// Response envelope: `{data, errors?}`
#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

impl<T> GraphQlResponse<T> {
    /// Any entry in `errors` is a failure, even when `data` is present
    pub fn into_result(self) -> Result<T, ApiError> {
        if !self.errors.is_empty() {
            if self.errors.iter().all(GraphQlError::is_not_found) {
                let message = self.errors.into_iter().map(|e| e.message).collect::<Vec<_>>().join(", ");
                return Err(ApiError::NotFound(message));
            }
            return Err(ApiError::GraphQl(self.errors.into_iter().map(|e| e.message).collect()));
        }
        self.data
            .ok_or_else(|| ApiError::Decode("response carried neither data nor errors".to_string()))
    }
}

/// Decode a raw GraphQL response body
pub fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str::<GraphQlResponse<T>>(body)
        .map_err(|e| ApiError::Decode(e.to_string()))?
        .into_result()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventsByDateRangeData {
    pub events_by_date_range: Vec<Event>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventData {
    pub event: Option<Event>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventData {
    pub create_event: Event,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventData {
    pub update_event: Event,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteEventData {
    pub delete_event: bool,
}
