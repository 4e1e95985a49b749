//! HTTP client for content detail and social-action endpoints.

use crate::envelope::Envelope;
use crate::{ApiError, ApiResult};
use reqwest::StatusCode;
use serde_json::Value;
use tracing::{debug, warn};

/// Current route prefix for content detail records.
pub const DEFAULT_PRIMARY_RESOURCE: &str = "news";

/// Legacy route prefix the resource family migrated away from. Social
/// action routes (view/like/share) still live under this prefix.
pub const DEFAULT_SECONDARY_RESOURCE: &str = "posts";

/// Outcome of a detail fetch across the fallback chain.
///
/// Produced once per screen mount (or manual refresh), consumed
/// immediately; never cached across mounts.
#[derive(Debug)]
pub enum DetailFetch {
    /// A body with a success envelope, from whichever endpoint answered.
    Success(Value),
    /// Both endpoints returned well-formed but unsuccessful responses.
    NotFoundOnBothEndpoints,
    /// Transport failure (timeout, DNS, connection reset), a server error
    /// status, or an undecodable body.
    NetworkError(ApiError),
}

/// Per-attempt classification, internal to the chain.
///
/// Only a miss (404 or a well-formed unsuccessful envelope) may trigger
/// the fallback; every other failure is an error that stops the chain.
enum Attempt {
    Hit(Value),
    Miss,
    Error(ApiError),
}

/// Client for the content detail and social-action routes.
#[derive(Clone)]
pub struct ContentClient {
    http_client: reqwest::Client,
    api_url: String,
    primary_resource: String,
    secondary_resource: String,
}

impl ContentClient {
    /// Create a new content client against the given API base URL.
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            api_url: api_url.into(),
            primary_resource: DEFAULT_PRIMARY_RESOURCE.to_string(),
            secondary_resource: DEFAULT_SECONDARY_RESOURCE.to_string(),
        }
    }

    /// Override the route prefixes (used by tests and staging builds).
    pub fn with_resources(
        api_url: impl Into<String>,
        primary_resource: impl Into<String>,
        secondary_resource: impl Into<String>,
    ) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            api_url: api_url.into(),
            primary_resource: primary_resource.into(),
            secondary_resource: secondary_resource.into(),
        }
    }

    /// Build the detail URL for a resource prefix.
    fn resource_url(&self, resource: &str, resource_id: &str) -> String {
        format!("{}/{}/{}", self.api_url, resource, resource_id)
    }

    /// Build a social-action URL. Actions live under the legacy prefix.
    fn action_url(&self, resource_id: &str, action: &str) -> String {
        format!(
            "{}/{}/{}/{}",
            self.api_url, self.secondary_resource, resource_id, action
        )
    }

    /// Fetch a content detail record, trying the current endpoint first
    /// and the legacy endpoint on a miss.
    ///
    /// The fallback is a compatibility shim for a backend route migration
    /// without a guaranteed id-space overlap, not a retry policy: the
    /// legacy endpoint is tried exactly once, only after the primary
    /// reports a miss (HTTP 404 or a well-formed unsuccessful envelope),
    /// and never after a transport failure or a server error.
    pub async fn fetch_detail(&self, resource_id: &str, token: Option<&str>) -> DetailFetch {
        let primary_url = self.resource_url(&self.primary_resource, resource_id);

        match self.try_fetch(&primary_url, token).await {
            Attempt::Hit(record) => DetailFetch::Success(record),
            Attempt::Error(e) => DetailFetch::NetworkError(e),
            Attempt::Miss => {
                debug!(
                    resource_id = %resource_id,
                    "Primary endpoint missed, trying legacy endpoint"
                );
                let secondary_url = self.resource_url(&self.secondary_resource, resource_id);
                match self.try_fetch(&secondary_url, token).await {
                    Attempt::Hit(record) => DetailFetch::Success(record),
                    Attempt::Error(e) => DetailFetch::NetworkError(e),
                    Attempt::Miss => DetailFetch::NotFoundOnBothEndpoints,
                }
            }
        }
    }

    /// Fetch a detail record and fire the view increment for the same id.
    ///
    /// The view call is dispatched before the fetch is awaited and its
    /// outcome never affects the returned result.
    pub async fn fetch_detail_reporting_view(
        &self,
        resource_id: &str,
        token: Option<&str>,
        reporter: &crate::ViewReporter,
    ) -> DetailFetch {
        reporter.report_once(self, resource_id, token);
        self.fetch_detail(resource_id, token).await
    }

    /// Single GET attempt, classified for the fallback chain.
    async fn try_fetch(&self, url: &str, token: Option<&str>) -> Attempt {
        debug!(url = %url, "Fetching content detail");

        let mut request = self.http_client.get(url).header("Accept", "application/json");
        if let Some(token) = token {
            request = request.header("Authorization", format!("Bearer {}", token));
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(url = %url, error = %e, "Content fetch transport failure");
                return Attempt::Error(e.into());
            }
        };

        if response.status() == StatusCode::NOT_FOUND {
            debug!(url = %url, "Content not found (404)");
            return Attempt::Miss;
        }

        // Any other non-success status is a server error, not a miss.
        let response = match response.error_for_status() {
            Ok(response) => response,
            Err(e) => {
                warn!(url = %url, error = %e, "Content fetch failed with error status");
                return Attempt::Error(e.into());
            }
        };

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                warn!(url = %url, error = %e, "Failed to read response body");
                return Attempt::Error(e.into());
            }
        };

        let value: Value = match serde_json::from_str(&body) {
            Ok(value) => value,
            Err(e) => {
                warn!(url = %url, error = %e, "Undecodable response body");
                return Attempt::Error(ApiError::Api(format!("undecodable body: {}", e)));
            }
        };

        match Envelope::from_value(&value) {
            Envelope::Success(data) => Attempt::Hit(data),
            Envelope::Failure { message } => {
                debug!(url = %url, message = %message, "Unsuccessful envelope");
                Attempt::Miss
            }
        }
    }

    /// Issue a PATCH against a social-action route (view/like/share).
    pub(crate) async fn patch_action(
        &self,
        resource_id: &str,
        action: &str,
        token: Option<&str>,
    ) -> ApiResult<()> {
        let url = self.action_url(resource_id, action);
        debug!(url = %url, "Sending social action");

        let mut request = self.http_client.patch(&url);
        if let Some(token) = token {
            request = request.header("Authorization", format!("Bearer {}", token));
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Api(format!("HTTP {}: {}", status, body)));
        }
        Ok(())
    }

    /// Dispatch a social action as a best-effort background task.
    ///
    /// Failures are logged and never surfaced; the returned handle may be
    /// dropped, and a completion after the screen unmounts is a no-op.
    pub(crate) fn spawn_action(
        &self,
        resource_id: &str,
        action: &'static str,
        token: Option<&str>,
    ) -> tokio::task::JoinHandle<()> {
        let client = self.clone();
        let resource_id = resource_id.to_string();
        let token = token.map(str::to_string);

        tokio::spawn(async move {
            if let Err(e) = client
                .patch_action(&resource_id, action, token.as_deref())
                .await
            {
                warn!(
                    resource_id = %resource_id,
                    action = %action,
                    error = %e,
                    "Best-effort social action failed"
                );
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = ContentClient::new("https://api.uzhavan.app");
        assert_eq!(client.api_url, "https://api.uzhavan.app");
        assert_eq!(client.primary_resource, DEFAULT_PRIMARY_RESOURCE);
        assert_eq!(client.secondary_resource, DEFAULT_SECONDARY_RESOURCE);
    }

    #[test]
    fn test_resource_url() {
        let client = ContentClient::new("https://api.uzhavan.app");
        assert_eq!(
            client.resource_url(&client.primary_resource, "17"),
            "https://api.uzhavan.app/news/17"
        );
    }

    #[test]
    fn test_action_url_uses_legacy_prefix() {
        let client = ContentClient::new("https://api.uzhavan.app");
        assert_eq!(
            client.action_url("17", "like"),
            "https://api.uzhavan.app/posts/17/like"
        );
    }
}
