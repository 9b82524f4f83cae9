use async_trait::async_trait;
use thiserror::Error;

use super::models::{CreateRoomRequest, InboxNotification, Room, RoomList, UpdateRoomRequest};

/// Failures reported by a collaboration backend
#[derive(Debug, Clone, Error, PartialEq)]
pub enum BackendError {
    #[error("Room not found: {0}")]
    NotFound(String),

    #[error("Backend returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid backend response: {0}")]
    Decode(String),
}

/// Remote room-based collaboration service
///
/// Implementations own durability and consistency; callers treat each call
/// as an independent, non-transactional request.
#[async_trait]
pub trait CollaborationBackend: Send + Sync {
    async fn create_room(&self, request: &CreateRoomRequest) -> Result<Room, BackendError>;
    async fn get_room(&self, room_id: &str) -> Result<Room, BackendError>;

    /// Applies a partial update: metadata keys are merged, access entries set
    /// to `None` are removed
    async fn update_room(
        &self,
        room_id: &str,
        request: &UpdateRoomRequest,
    ) -> Result<Room, BackendError>;

    async fn delete_room(&self, room_id: &str) -> Result<(), BackendError>;

    /// Lists rooms the given user has an access entry in (single page)
    async fn get_rooms(&self, user_id: &str) -> Result<RoomList, BackendError>;

    async fn trigger_inbox_notification(
        &self,
        notification: &InboxNotification,
    ) -> Result<(), BackendError>;
}
