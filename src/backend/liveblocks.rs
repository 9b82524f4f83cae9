//! REST client for the hosted Liveblocks service.
//!
//! Every call is a single authenticated HTTPS request against the `v2` API.
//! Status codes are mapped onto [`BackendError`] so callers never see
//! transport types.

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use super::client::{BackendError, CollaborationBackend};
use super::models::{CreateRoomRequest, InboxNotification, Room, RoomList, UpdateRoomRequest};

pub const DEFAULT_API_BASE: &str = "https://api.liveblocks.io";

/// Liveblocks-backed implementation of CollaborationBackend
#[derive(Clone)]
pub struct LiveblocksBackend {
    client: Client,
    base_url: Url,
    secret_key: String,
}

impl std::fmt::Debug for LiveblocksBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LiveblocksBackend")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl LiveblocksBackend {
    /// Builds a client for the given API base (e.g. `https://api.liveblocks.io`)
    pub fn new(
        base_url: &str,
        secret_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, BackendError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| BackendError::Network(format!("invalid API base {base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(BackendError::Network(format!(
                "invalid API base {base_url}: not a base URL"
            )));
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BackendError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url,
            secret_key: secret_key.into(),
        })
    }

    /// Joins path segments onto the API base, percent-encoding each one
    fn endpoint(&self, segments: &[&str]) -> Result<Url, BackendError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| BackendError::Network("API base cannot hold a path".to_string()))?
            .pop_if_empty()
            .push("v2")
            .extend(segments);
        Ok(url)
    }

    fn bearer(&self) -> String {
        format!("Bearer {}", self.secret_key)
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<Response, BackendError> {
        request
            .header(AUTHORIZATION, self.bearer())
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Request to collaboration service failed");
                BackendError::Network(e.to_string())
            })
    }
}

/// Maps non-success statuses onto BackendError, passing successful responses through
async fn check_status(response: Response, subject: &str) -> Result<Response, BackendError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = match response.text().await {
        Ok(body) => body,
        Err(e) => {
            debug!(error = %e, "Failed to read error response body");
            String::new()
        }
    };
    debug!(status = status.as_u16(), body = %body, "Collaboration service rejected request");

    if status == StatusCode::NOT_FOUND {
        return Err(BackendError::NotFound(subject.to_string()));
    }
    Err(BackendError::Status {
        status: status.as_u16(),
        body,
    })
}

async fn read_json<T: DeserializeOwned>(
    response: Response,
    subject: &str,
) -> Result<T, BackendError> {
    check_status(response, subject)
        .await?
        .json::<T>()
        .await
        .map_err(|e| BackendError::Decode(e.to_string()))
}

#[async_trait]
impl CollaborationBackend for LiveblocksBackend {
    #[instrument(skip(self, request), fields(room_id = %request.id))]
    async fn create_room(&self, request: &CreateRoomRequest) -> Result<Room, BackendError> {
        let url = self.endpoint(&["rooms"])?;
        let response = self.send(self.client.post(url).json(request)).await?;
        read_json(response, &request.id).await
    }

    #[instrument(skip(self))]
    async fn get_room(&self, room_id: &str) -> Result<Room, BackendError> {
        let url = self.endpoint(&["rooms", room_id])?;
        let response = self.send(self.client.get(url)).await?;
        read_json(response, room_id).await
    }

    #[instrument(skip(self, request))]
    async fn update_room(
        &self,
        room_id: &str,
        request: &UpdateRoomRequest,
    ) -> Result<Room, BackendError> {
        let url = self.endpoint(&["rooms", room_id])?;
        let response = self.send(self.client.post(url).json(request)).await?;
        read_json(response, room_id).await
    }

    #[instrument(skip(self))]
    async fn delete_room(&self, room_id: &str) -> Result<(), BackendError> {
        let url = self.endpoint(&["rooms", room_id])?;
        let response = self.send(self.client.delete(url)).await?;
        check_status(response, room_id).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_rooms(&self, user_id: &str) -> Result<RoomList, BackendError> {
        let mut url = self.endpoint(&["rooms"])?;
        url.query_pairs_mut().append_pair("userId", user_id);
        let response = self.send(self.client.get(url)).await?;
        read_json(response, "rooms").await
    }

    #[instrument(skip(self, notification), fields(user_id = %notification.user_id))]
    async fn trigger_inbox_notification(
        &self,
        notification: &InboxNotification,
    ) -> Result<(), BackendError> {
        let url = self.endpoint(&["inbox-notifications", "trigger"])?;
        let response = self.send(self.client.post(url).json(notification)).await?;
        check_status(response, &notification.subject_id).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend(base: &str) -> LiveblocksBackend {
        LiveblocksBackend::new(base, "sk_test", Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_endpoint_joins_segments() {
        let backend = backend(DEFAULT_API_BASE);
        let url = backend.endpoint(&["rooms", "abc"]).unwrap();
        assert_eq!(url.as_str(), "https://api.liveblocks.io/v2/rooms/abc");
    }

    #[test]
    fn test_endpoint_tolerates_trailing_slash() {
        let backend = backend("http://127.0.0.1:8080/");
        let url = backend.endpoint(&["inbox-notifications", "trigger"]).unwrap();
        assert_eq!(
            url.as_str(),
            "http://127.0.0.1:8080/v2/inbox-notifications/trigger"
        );
    }

    #[test]
    fn test_endpoint_encodes_room_ids() {
        let backend = backend(DEFAULT_API_BASE);
        let url = backend.endpoint(&["rooms", "a b/c"]).unwrap();
        assert_eq!(url.as_str(), "https://api.liveblocks.io/v2/rooms/a%20b%2Fc");
    }

    #[test]
    fn test_invalid_base_is_rejected() {
        let result = LiveblocksBackend::new("not a url", "sk_test", Duration::from_secs(5));
        assert!(matches!(result, Err(BackendError::Network(_))));
    }

    #[test]
    fn test_debug_hides_secret() {
        let rendered = format!("{:?}", backend(DEFAULT_API_BASE));
        assert!(!rendered.contains("sk_test"));
    }
}
