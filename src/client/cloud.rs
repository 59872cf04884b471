//! WURFL Cloud HTTP client implementation

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use reqwest::{Client as HttpClient, StatusCode};

use super::{RemoteLookup, lookup_path};
use crate::config::Config;
use crate::error::RemoteFailure;
use crate::models::{DeviceRecord, RequestSignal};

/// Header identifying this client to the service
const CLOUD_CLIENT_HEADER: &str = "X-Cloud-Client";

/// Framing and hop-by-hop headers that are never forwarded from the caller
const SKIPPED_HEADERS: &[&str] = &[
    "connection",
    "content-length",
    "expect",
    "host",
    "keep-alive",
    "proxy-authorization",
    "proxy-connection",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
];

/// HTTP client for the WURFL Cloud JSON API
pub struct CloudClient {
    http: HttpClient,
    api_host: String,
    base_path: String,
    client_header: HeaderValue,
    credentials: Option<(String, Option<String>)>,
}

impl CloudClient {
    /// Create a client from configuration
    pub fn new(config: &Config) -> Result<Self, RemoteFailure> {
        let http = HttpClient::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| RemoteFailure::TransportError(e.to_string()))?;

        let client_header = HeaderValue::from_str(&config.client_header()).map_err(|e| {
            RemoteFailure::TransportError(format!("Invalid client header: {}", e))
        })?;

        let credentials = config.api_key.as_ref().map(|key| match key.split_once(':') {
            Some((user, secret)) => (user.to_string(), Some(secret.to_string())),
            None => (key.clone(), None),
        });
        if credentials.is_none() {
            log::warn!("No API key configured; requests will be sent unauthenticated");
        }

        Ok(Self {
            http,
            api_host: config.api_host.trim_end_matches('/').to_string(),
            base_path: config.base_path.clone(),
            client_header,
            credentials,
        })
    }

    /// Full request URL for a capability list
    pub fn lookup_url(&self, capabilities: &[String]) -> String {
        format!("{}{}", self.api_host, lookup_path(&self.base_path, capabilities))
    }

    /// Outgoing headers for a signal.
    ///
    /// An explicit user agent is sent as `User-Agent`. Otherwise the caller's
    /// headers are passed through and `User-Agent` is set from whichever of them
    /// carries the device user agent.
    fn request_headers(&self, signal: &RequestSignal) -> HeaderMap {
        let mut headers = HeaderMap::new();

        if signal.keyed_on_headers() {
            for (name, value) in signal.headers() {
                match (
                    HeaderName::from_bytes(name.as_bytes()),
                    HeaderValue::from_str(value),
                ) {
                    (Ok(name), _) if is_skipped(&name) => {
                        log::debug!("Not forwarding header '{}'", name);
                    }
                    (Ok(name), Ok(value)) => {
                        headers.insert(name, value);
                    }
                    _ => log::warn!("Skipping header '{}' that is not valid HTTP", name),
                }
            }
        }

        if let Some(ua) = signal.user_agent() {
            match HeaderValue::from_str(ua) {
                Ok(value) => {
                    headers.insert(USER_AGENT, value);
                }
                Err(_) => log::warn!("User agent is not a valid header value, not sending it"),
            }
        }

        headers.insert(CLOUD_CLIENT_HEADER, self.client_header.clone());
        headers
    }
}

fn is_skipped(name: &HeaderName) -> bool {
    SKIPPED_HEADERS.contains(&name.as_str())
}

#[async_trait]
impl RemoteLookup for CloudClient {
    async fn fetch(
        &self,
        signal: &RequestSignal,
        capabilities: &[String],
    ) -> Result<DeviceRecord, RemoteFailure> {
        let url = self.lookup_url(capabilities);
        log::debug!("GET {}", url);

        let mut request = self.http.get(&url).headers(self.request_headers(signal));
        if let Some((ref user, ref secret)) = self.credentials {
            request = request.basic_auth(user, secret.as_ref());
        }

        let response = request.send().await.map_err(RemoteFailure::from)?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(RemoteFailure::NonOkStatus {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await.map_err(RemoteFailure::from)?;
        serde_json::from_str::<DeviceRecord>(&body).map_err(|e| {
            RemoteFailure::MalformedResponse(format!(
                "Failed to parse lookup response: {}. Body was: {}",
                e, body
            ))
        })
    }
}
