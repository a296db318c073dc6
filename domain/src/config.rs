use serde::{Deserialize, Serialize};

use crate::layout::GridMetrics;

/// Storage key for the persisted session user
pub const DEFAULT_SESSION_KEY: &str = "auth";

/// Which backend the application talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendMode {
    /// REST + GraphQL server
    #[default]
    Remote,
    /// Everything kept in browser local storage
    Offline,
}

/// Client configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL for the REST resources (`/todos`, `/users`, `/categories`)
    pub api_base_url: String,
    /// Single POST endpoint for event queries and mutations
    pub graphql_url: String,
    pub session_key: String,
    pub backend: BackendMode,
    pub grid: GridMetrics,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8080/api".to_string(),
            graphql_url: "http://localhost:8080/graphql".to_string(),
            session_key: DEFAULT_SESSION_KEY.to_string(),
            backend: BackendMode::Remote,
            grid: GridMetrics::default(),
        }
    }
}

impl ClientConfig {
    /// Apply optional overrides (typically baked in at build time).
    /// Blank values are ignored; trailing slashes are trimmed from URLs.
    pub fn with_overrides(
        mut self,
        api_base_url: Option<&str>,
        graphql_url: Option<&str>,
        offline: Option<&str>,
    ) -> Self {
        if let Some(url) = api_base_url.map(str::trim).filter(|url| !url.is_empty()) {
            self.api_base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(url) = graphql_url.map(str::trim).filter(|url| !url.is_empty()) {
            self.graphql_url = url.trim_end_matches('/').to_string();
        }
        if let Some(flag) = offline {
            if matches!(flag.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes") {
                self.backend = BackendMode::Offline;
            }
        }
        self
    }

    /// Absolute URL of a REST path such as `/todos/42`
    pub fn rest_url(&self, path: &str) -> String {
        format!("{}/{}", self.api_base_url, path.trim_start_matches('/'))
    }
}
