//! Mock remote lookup client for testing
//!
//! Returns a configured record, counts calls and captures the capability list
//! of every request.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::RemoteLookup;
use crate::error::RemoteFailure;
use crate::models::{DeviceRecord, RequestSignal};

/// A request seen by the mock
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub user_agent: Option<String>,
    pub keyed_on_headers: bool,
    pub capabilities: Vec<String>,
}

/// Mock remote client for testing.
///
/// # Example
/// ```ignore
/// let mock = MockRemoteClient::new().with_record(record).await;
/// let device = mock.fetch(&signal, &caps).await?;
/// assert_eq!(mock.call_count().await, 1);
/// ```
#[derive(Default)]
pub struct MockRemoteClient {
    /// Record to return from fetch
    record: Arc<Mutex<Option<DeviceRecord>>>,
    /// Failure to return (if any) - consumed on first use
    failure: Arc<Mutex<Option<RemoteFailure>>>,
    /// Captured requests for test assertions
    captured_requests: Arc<Mutex<Vec<CapturedRequest>>>,
}

impl MockRemoteClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn with_record(self, record: DeviceRecord) -> Self {
        *self.record.lock().await = Some(record);
        self
    }

    pub async fn with_failure(self, failure: RemoteFailure) -> Self {
        *self.failure.lock().await = Some(failure);
        self
    }

    pub async fn call_count(&self) -> usize {
        self.captured_requests.lock().await.len()
    }

    pub async fn captured_requests(&self) -> Vec<CapturedRequest> {
        self.captured_requests.lock().await.clone()
    }
}

#[async_trait]
impl RemoteLookup for MockRemoteClient {
    async fn fetch(
        &self,
        signal: &RequestSignal,
        capabilities: &[String],
    ) -> Result<DeviceRecord, RemoteFailure> {
        self.captured_requests.lock().await.push(CapturedRequest {
            user_agent: signal.user_agent().map(str::to_string),
            keyed_on_headers: signal.keyed_on_headers(),
            capabilities: capabilities.to_vec(),
        });

        if let Some(failure) = self.failure.lock().await.take() {
            return Err(failure);
        }

        self.record
            .lock()
            .await
            .clone()
            .ok_or_else(|| RemoteFailure::NonOkStatus {
                status: 404,
                body: "no record configured".to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Capabilities, CapabilityErrors};

    #[tokio::test]
    async fn test_mock_default_is_not_found() {
        let mock = MockRemoteClient::new();
        let result = mock
            .fetch(&RequestSignal::from_user_agent("ua"), &[])
            .await;

        assert!(matches!(
            result,
            Err(RemoteFailure::NonOkStatus { status: 404, .. })
        ));
        assert_eq!(mock.call_count().await, 1);
    }

    #[tokio::test]
    async fn test_mock_failure_consumed() {
        let record = DeviceRecord::new("x", "v", 0, Capabilities::new(), CapabilityErrors::new());
        let mock = MockRemoteClient::new()
            .with_record(record)
            .await
            .with_failure(RemoteFailure::TransportError("down".to_string()))
            .await;
        let signal = RequestSignal::from_user_agent("ua");

        assert!(mock.fetch(&signal, &[]).await.is_err());
        assert!(mock.fetch(&signal, &[]).await.is_ok());
        assert_eq!(mock.call_count().await, 2);
    }
}
