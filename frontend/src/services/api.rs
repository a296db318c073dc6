use std::rc::Rc;

use async_trait::async_trait;
use calendar_domain::{ApiResult, CategoryApi, ClientConfig, EventApi, TodoApi, UserApi};
use gloo::net::http::{Request, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Serialize};
use shared::graphql::{
    self, CreateEventData, DeleteEventData, EventData, EventsByDateRangeData, GraphQlRequest, IdVariables,
    UpdateEventData, UpdateEventVariables,
};
use shared::{
    ApiError, Category, DateRange, Event, EventPatch, HalCollection, LoginRequest, NewCategory, NewEvent,
    NewTodo, RegisterRequest, Todo, User, UserUpdate,
};
use tracing::debug;

/// HTTP client for the calendar server: GraphQL for events, REST for the rest
#[derive(Clone)]
pub struct HttpApiClient {
    config: Rc<ClientConfig>,
}

impl PartialEq for HttpApiClient {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.config, &other.config)
    }
}

fn transport(e: gloo::net::Error) -> ApiError {
    ApiError::Transport(e.to_string())
}

fn json_headers(builder: RequestBuilder) -> RequestBuilder {
    builder.header("Accept", "application/json")
}

impl HttpApiClient {
    pub fn new(config: Rc<ClientConfig>) -> Self {
        Self { config }
    }

    fn url(&self, path: &str) -> String {
        self.config.rest_url(path)
    }

    /// Send a request; non-2xx statuses become errors
    async fn send(&self, request: Result<Request, gloo::net::Error>) -> ApiResult<Response> {
        let request = request.map_err(transport)?;
        debug!("Request to {}", request.url());
        let response = request.send().await.map_err(transport)?;
        if response.ok() {
            return Ok(response);
        }
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(ApiError::from_status(status, &body))
    }

    async fn fetch_json<T: DeserializeOwned>(&self, request: Result<Request, gloo::net::Error>) -> ApiResult<T> {
        let response = self.send(request).await?;
        let body = response.text().await.map_err(transport)?;
        serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// List endpoints answer with a bare array or a HAL `_embedded` envelope
    async fn fetch_list<T: DeserializeOwned>(&self, request: Result<Request, gloo::net::Error>) -> ApiResult<Vec<T>> {
        self.fetch_json::<HalCollection<T>>(request)
            .await
            .map(HalCollection::into_items)
    }

    async fn graphql<V: Serialize, T: DeserializeOwned>(&self, request: &GraphQlRequest<V>) -> ApiResult<T> {
        let response = json_headers(Request::post(&self.config.graphql_url))
            .json(request)
            .map_err(transport)?
            .send()
            .await
            .map_err(transport)?;
        let status = response.status();
        let ok = response.ok();
        let body = response.text().await.map_err(transport)?;

        match graphql::decode::<T>(&body) {
            Err(ApiError::Decode(_)) if !ok => Err(ApiError::from_status(status, &body)),
            result => result,
        }
    }
}

#[async_trait(?Send)]
impl EventApi for HttpApiClient {
    async fn events_in_range(&self, range: &DateRange) -> ApiResult<Vec<Event>> {
        let data: EventsByDateRangeData = self.graphql(&graphql::events_by_date_range(range)).await?;
        Ok(data.events_by_date_range)
    }

    async fn event(&self, id: &str) -> ApiResult<Event> {
        let data: EventData = self
            .graphql(&GraphQlRequest::new(graphql::EVENT_BY_ID, IdVariables { id }))
            .await?;
        data.event
            .ok_or_else(|| ApiError::NotFound(format!("Event {} not found", id)))
    }

    async fn create_event(&self, event: &NewEvent) -> ApiResult<Event> {
        let data: CreateEventData = self
            .graphql(&GraphQlRequest::new(graphql::CREATE_EVENT, event))
            .await?;
        Ok(data.create_event)
    }

    async fn update_event(&self, id: &str, patch: &EventPatch) -> ApiResult<Event> {
        let data: UpdateEventData = self
            .graphql(&GraphQlRequest::new(
                graphql::UPDATE_EVENT,
                UpdateEventVariables { id, patch },
            ))
            .await?;
        Ok(data.update_event)
    }

    async fn delete_event(&self, id: &str) -> ApiResult<bool> {
        let data: DeleteEventData = self
            .graphql(&GraphQlRequest::new(graphql::DELETE_EVENT, IdVariables { id }))
            .await?;
        Ok(data.delete_event)
    }
}

#[async_trait(?Send)]
impl TodoApi for HttpApiClient {
    async fn todos(&self, user_id: &str) -> ApiResult<Vec<Todo>> {
        let request = json_headers(Request::get(&self.url("/todos")))
            .query([("userId", user_id)])
            .build();
        self.fetch_list(request).await
    }

    async fn todo(&self, id: &str) -> ApiResult<Todo> {
        let request = json_headers(Request::get(&self.url(&format!("/todos/{}", id)))).build();
        self.fetch_json(request).await
    }

    async fn create_todo(&self, todo: &NewTodo) -> ApiResult<Todo> {
        let request = json_headers(Request::post(&self.url("/todos"))).json(todo);
        self.fetch_json(request).await
    }

    async fn toggle_todo(&self, id: &str, toggle_link: Option<&str>) -> ApiResult<Todo> {
        let url = match toggle_link {
            Some(link) => link.to_string(),
            None => self.url(&format!("/todos/{}/toggle", id)),
        };
        self.fetch_json(json_headers(Request::patch(&url)).build()).await
    }

    async fn delete_todo(&self, id: &str) -> ApiResult<()> {
        let request = json_headers(Request::delete(&self.url(&format!("/todos/{}", id)))).build();
        self.send(request).await.map(|_| ())
    }
}

#[async_trait(?Send)]
impl UserApi for HttpApiClient {
    async fn login(&self, request: &LoginRequest) -> ApiResult<User> {
        self.fetch_json(json_headers(Request::post(&self.url("/users/login"))).json(request))
            .await
    }

    async fn register(&self, request: &RegisterRequest) -> ApiResult<User> {
        self.fetch_json(json_headers(Request::post(&self.url("/users/register"))).json(request))
            .await
    }

    async fn user(&self, id: &str) -> ApiResult<User> {
        self.fetch_json(json_headers(Request::get(&self.url(&format!("/users/{}", id)))).build())
            .await
    }

    async fn users(&self) -> ApiResult<Vec<User>> {
        self.fetch_list(json_headers(Request::get(&self.url("/users"))).build())
            .await
    }

    async fn update_user(&self, id: &str, update: &UserUpdate) -> ApiResult<User> {
        self.fetch_json(json_headers(Request::put(&self.url(&format!("/users/{}", id)))).json(update))
            .await
    }

    async fn delete_user(&self, id: &str) -> ApiResult<()> {
        let request = json_headers(Request::delete(&self.url(&format!("/users/{}", id)))).build();
        self.send(request).await.map(|_| ())
    }
}

#[async_trait(?Send)]
impl CategoryApi for HttpApiClient {
    async fn categories(&self, user_id: &str) -> ApiResult<Vec<Category>> {
        let request = json_headers(Request::get(&self.url("/categories")))
            .query([("userId", user_id)])
            .build();
        self.fetch_list(request).await
    }

    async fn create_category(&self, category: &NewCategory) -> ApiResult<Category> {
        self.fetch_json(json_headers(Request::post(&self.url("/categories"))).json(category))
            .await
    }

    async fn update_category(&self, id: &str, category: &NewCategory) -> ApiResult<Category> {
        let url = self.url(&format!("/categories/{}", id));
        self.fetch_json(json_headers(Request::put(&url)).json(category))
            .await
    }

    async fn delete_category(&self, id: &str) -> ApiResult<()> {
        let request = json_headers(Request::delete(&self.url(&format!("/categories/{}", id)))).build();
        self.send(request).await.map(|_| ())
    }
}
