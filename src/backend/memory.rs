use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

use super::client::{BackendError, CollaborationBackend};
use super::models::{CreateRoomRequest, InboxNotification, Room, RoomList, UpdateRoomRequest};

/// In-memory implementation of CollaborationBackend for development and testing
pub struct InMemoryBackend {
    rooms: RwLock<HashMap<String, Room>>,
    notifications: RwLock<Vec<InboxNotification>>,
}

impl Default for InMemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryBackend {
    /// Creates a new empty in-memory backend
    pub fn new() -> Self {
        Self {
            rooms: RwLock::new(HashMap::new()),
            notifications: RwLock::new(Vec::new()),
        }
    }

    /// Notifications dispatched so far, in order
    pub async fn notifications(&self) -> Vec<InboxNotification> {
        self.notifications.read().await.clone()
    }

    /// Notifications addressed to a single user
    pub async fn notifications_for(&self, user_id: &str) -> Vec<InboxNotification> {
        self.notifications
            .read()
            .await
            .iter()
            .filter(|n| n.user_id == user_id)
            .cloned()
            .collect()
    }

    pub async fn room_count(&self) -> usize {
        self.rooms.read().await.len()
    }
}

#[async_trait]
impl CollaborationBackend for InMemoryBackend {
    #[instrument(skip(self, request), fields(room_id = %request.id))]
    async fn create_room(&self, request: &CreateRoomRequest) -> Result<Room, BackendError> {
        let mut rooms = self.rooms.write().await;
        if rooms.contains_key(&request.id) {
            warn!("Room already exists in memory");
            return Err(BackendError::Status {
                status: 409,
                body: format!("Room with id \"{}\" already exists", request.id),
            });
        }

        let room = Room {
            id: request.id.clone(),
            created_at: Some(Utc::now()),
            last_connection_at: None,
            metadata: request.metadata.clone(),
            default_accesses: request.default_accesses.clone(),
            groups_accesses: Default::default(),
            users_accesses: request.users_accesses.clone(),
        };
        rooms.insert(room.id.clone(), room.clone());

        debug!("Room created in memory");
        Ok(room)
    }

    #[instrument(skip(self))]
    async fn get_room(&self, room_id: &str) -> Result<Room, BackendError> {
        let rooms = self.rooms.read().await;
        rooms.get(room_id).cloned().ok_or_else(|| {
            debug!("Room not found in memory");
            BackendError::NotFound(room_id.to_string())
        })
    }

    #[instrument(skip(self, request))]
    async fn update_room(
        &self,
        room_id: &str,
        request: &UpdateRoomRequest,
    ) -> Result<Room, BackendError> {
        let mut rooms = self.rooms.write().await;
        let room = rooms
            .get_mut(room_id)
            .ok_or_else(|| BackendError::NotFound(room_id.to_string()))?;

        if let Some(metadata) = &request.metadata {
            for (key, value) in metadata {
                room.metadata.insert(key.clone(), value.clone());
            }
        }

        if let Some(accesses) = &request.users_accesses {
            for (user_id, tokens) in accesses {
                match tokens {
                    Some(tokens) => {
                        room.users_accesses.insert(user_id.clone(), tokens.clone());
                    }
                    None => {
                        room.users_accesses.remove(user_id);
                    }
                }
            }
        }

        debug!(users = room.users_accesses.len(), "Room updated in memory");
        Ok(room.clone())
    }

    #[instrument(skip(self))]
    async fn delete_room(&self, room_id: &str) -> Result<(), BackendError> {
        let mut rooms = self.rooms.write().await;
        match rooms.remove(room_id) {
            Some(_) => {
                info!("Room deleted from memory");
                Ok(())
            }
            None => Err(BackendError::NotFound(room_id.to_string())),
        }
    }

    #[instrument(skip(self))]
    async fn get_rooms(&self, user_id: &str) -> Result<RoomList, BackendError> {
        let rooms = self.rooms.read().await;
        let mut data: Vec<Room> = rooms
            .values()
            .filter(|room| room.has_user(user_id))
            .cloned()
            .collect();
        // Newest first, matching the hosted service
        data.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));

        debug!(room_count = data.len(), "Rooms listed from memory");
        Ok(RoomList {
            data,
            next_cursor: None,
        })
    }

    #[instrument(skip(self, notification), fields(user_id = %notification.user_id))]
    async fn trigger_inbox_notification(
        &self,
        notification: &InboxNotification,
    ) -> Result<(), BackendError> {
        self.notifications.write().await.push(notification.clone());
        debug!(kind = %notification.kind, "Inbox notification recorded in memory");
        Ok(())
    }
}
