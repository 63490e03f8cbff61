/// Moonstream HTTP API client
///
/// Thin async wrapper over `reqwest`. The client is cheap to clone, so every
/// iced task gets its own copy.
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

use crate::error::ApiError;
use crate::state::data::{Subscription, SubscriptionsList};
use crate::state::edit::SubscriptionPatch;

/// Result type for API operations.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Endpoints that do not depend on a resource id
const FIXED_ENDPOINTS: [&str; 4] = ["/ping", "/version", "/now", "/subscriptions/"];

/// Normalise `url` and build the fixed endpoint map.
///
/// A missing scheme becomes `http://` and trailing slashes are dropped.
pub fn moonstream_endpoints(url: &str) -> (String, HashMap<&'static str, String>) {
    let with_protocol = if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("http://{}", url)
    };
    let normalized = with_protocol.trim_end_matches('/').to_string();

    let endpoints = FIXED_ENDPOINTS
        .iter()
        .map(|endpoint| (*endpoint, format!("{}{}", normalized, endpoint)))
        .collect();
    (normalized, endpoints)
}

#[derive(Debug, Deserialize)]
pub struct PingResponse {
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct VersionResponse {
    pub version: String,
}

/// Startup health check: reachability, server version and clock skew
#[derive(Debug, Clone, PartialEq)]
pub struct ServerStatus {
    pub status: String,
    pub version: String,
    /// Server time minus local time, in seconds
    pub clock_skew_secs: f64,
}

#[derive(Clone, Debug)]
pub struct MoonstreamClient {
    http: reqwest::Client,
    base_url: String,
    endpoints: HashMap<&'static str, String>,
    access_token: Option<String>,
    offline: bool,
}

impl MoonstreamClient {
    pub fn new(url: &str, access_token: Option<String>, offline: bool) -> Self {
        let (base_url, endpoints) = moonstream_endpoints(url);
        Self {
            http: reqwest::Client::new(),
            base_url,
            endpoints,
            access_token,
            offline,
        }
    }

    /// Give up on any request, API or image, after `timeout`
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self> {
        self.http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(self)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn is_offline(&self) -> bool {
        self.offline
    }

    /// The underlying HTTP client, shared with the image loader
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    fn endpoint(&self, name: &str) -> &str {
        // Only called with FIXED_ENDPOINTS entries
        self.endpoints.get(name).map(String::as_str).unwrap_or(&self.base_url)
    }

    fn subscription_url(&self, id: &str) -> String {
        format!("{}/subscriptions/{}", self.base_url, id)
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.access_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Send, fail on non-2xx, and keep the body for the error message
    async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response> {
        if self.offline {
            return Err(ApiError::Offline);
        }
        let response = self.authorized(request).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status { status: status.as_u16(), body });
        }
        Ok(response)
    }

    pub async fn ping(&self) -> Result<PingResponse> {
        let response = self.send(self.http.get(self.endpoint("/ping"))).await?;
        Ok(response.json().await?)
    }

    pub async fn version(&self) -> Result<VersionResponse> {
        let response = self.send(self.http.get(self.endpoint("/version"))).await?;
        Ok(response.json().await?)
    }

    /// Server time as seconds since the epoch
    pub async fn server_time(&self) -> Result<f64> {
        let response = self.send(self.http.get(self.endpoint("/now"))).await?;
        let body: serde_json::Value = response.json().await?;
        parse_epoch_time(&body)
    }

    /// Ping, version and server time in one go
    pub async fn server_status(&self) -> Result<ServerStatus> {
        let ping = self.ping().await?;
        let version = self.version().await?;
        let server_time = self.server_time().await?;
        let local_time = chrono::Utc::now().timestamp_millis() as f64 / 1000.0;
        Ok(ServerStatus {
            status: ping.status,
            version: version.version,
            clock_skew_secs: server_time - local_time,
        })
    }

    pub async fn list_subscriptions(&self) -> Result<SubscriptionsList> {
        let response = self.send(self.http.get(self.endpoint("/subscriptions/"))).await?;
        Ok(response.json().await?)
    }

    pub async fn update_subscription(&self, id: &str, patch: &SubscriptionPatch) -> Result<Subscription> {
        let request = self.http.put(self.subscription_url(id)).form(patch);
        let response = self.send(request).await?;
        Ok(response.json().await?)
    }

    pub async fn delete_subscription(&self, id: &str) -> Result<()> {
        self.send(self.http.delete(self.subscription_url(id))).await?;
        Ok(())
    }
}

/// Extract `epoch_time` from a `/now` body.
///
/// Accepts a number or a numeric string.
pub fn parse_epoch_time(body: &serde_json::Value) -> Result<f64> {
    let raw = body.get("epoch_time").ok_or_else(|| {
        ApiError::UnexpectedResponse(format!("Server response does not contain \"epoch_time\": {}", body))
    })?;

    let parsed = match raw {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| {
        ApiError::UnexpectedResponse(format!("Could not process epoch time as a float: {}", raw))
    })
}
